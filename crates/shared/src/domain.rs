use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(RecordId);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One cat breed as served by the breeds endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub origin: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub temperament: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl BreedRecord {
    pub fn new(
        name: impl Into<String>,
        origin: impl Into<String>,
        temperament: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            temperament: temperament.into(),
            description: description.into(),
        }
    }

    pub fn apply(&mut self, patch: BreedPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(origin) = patch.origin {
            self.origin = origin;
        }
        if let Some(temperament) = patch.temperament {
            self.temperament = temperament;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Field-level overwrite; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedPatch {
    pub name: Option<String>,
    pub origin: Option<String>,
    pub temperament: Option<String>,
    pub description: Option<String>,
}

impl BreedPatch {
    /// A patch that overwrites every field with the values of `record`.
    pub fn replace_with(record: BreedRecord) -> Self {
        Self {
            name: Some(record.name),
            origin: Some(record.origin),
            temperament: Some(record.temperament),
            description: Some(record.description),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.origin.is_none()
            && self.temperament.is_none()
            && self.description.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreedField {
    Name,
    Origin,
    Temperament,
    Description,
}

impl BreedField {
    pub const ALL: [BreedField; 4] = [
        BreedField::Name,
        BreedField::Origin,
        BreedField::Temperament,
        BreedField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BreedField::Name => "Breed name",
            BreedField::Origin => "Origin",
            BreedField::Temperament => "Temperament",
            BreedField::Description => "Description",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, BreedField::Temperament | BreedField::Description)
    }

    pub fn get(self, record: &BreedRecord) -> &str {
        match self {
            BreedField::Name => &record.name,
            BreedField::Origin => &record.origin,
            BreedField::Temperament => &record.temperament,
            BreedField::Description => &record.description,
        }
    }

    pub fn get_mut(self, record: &mut BreedRecord) -> &mut String {
        match self {
            BreedField::Name => &mut record.name,
            BreedField::Origin => &mut record.origin,
            BreedField::Temperament => &mut record.temperament,
            BreedField::Description => &mut record.description,
        }
    }
}

pub const ALL_ORIGINS_LABEL: &str = "All countries";
pub const UNKNOWN_ORIGIN_LABEL: &str = "(unknown)";

/// The single filter dimension of the catalog table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum OriginFilter {
    #[default]
    All,
    Origin(String),
}

impl OriginFilter {
    /// Exact, case-sensitive comparison with no trimming.
    pub fn matches(&self, record: &BreedRecord) -> bool {
        match self {
            OriginFilter::All => true,
            OriginFilter::Origin(origin) => record.origin == *origin,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OriginFilter::All => ALL_ORIGINS_LABEL,
            OriginFilter::Origin(origin) => origin_label(origin),
        }
    }
}

pub fn origin_label(origin: &str) -> &str {
    if origin.is_empty() {
        UNKNOWN_ORIGIN_LABEL
    } else {
        origin
    }
}
