//! UI/backend events and error modeling for the catalog window.

use breed_core::FetchError;
use chrono::{DateTime, Local};
use shared::domain::BreedRecord;

pub enum UiEvent {
    Info(String),
    BreedsLoaded {
        records: Vec<BreedRecord>,
        fetched_at: DateTime<Local>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Decode,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchBreeds,
    EditRecord,
}

pub fn classify_fetch_failure(err: &FetchError) -> String {
    match err {
        FetchError::InvalidEndpoint { .. } => {
            format!("Breeds endpoint is misconfigured; fix the API URL and reload: {err}")
        }
        FetchError::Transport(_) if err.is_timeout() => {
            "Breeds API timed out; check the network and reload.".to_string()
        }
        FetchError::Transport(_) | FetchError::ClientBuild(_) => {
            format!("Breeds API unreachable; check URL/network and reload: {err}")
        }
        FetchError::Status { status } => format!("Breeds API answered HTTP {status}."),
        FetchError::Decode(_) => {
            format!("Breeds API returned data that is not a breed list: {err}")
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("decode")
            || message_lower.contains("json")
            || message_lower.contains("not a breed list")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("misconfigured")
            || message_lower.contains("no breed record")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("network")
            || message_lower.contains("http")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_fetch_error(err: &FetchError) -> Self {
        let category = match err {
            FetchError::InvalidEndpoint { .. } => UiErrorCategory::Validation,
            FetchError::Decode(_) => UiErrorCategory::Decode,
            FetchError::ClientBuild(_) | FetchError::Transport(_) | FetchError::Status { .. } => {
                UiErrorCategory::Transport
            }
        };
        Self {
            category,
            context: UiErrorContext::FetchBreeds,
            message: classify_fetch_failure(err),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Decode => "Data",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Error",
    }
}
