use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::domain::BreedRecord;
use tracing::{error, info};
use url::Url;

use crate::error::FetchError;

pub const DEFAULT_BREEDS_URL: &str = "https://api.thecatapi.com/v1/breeds";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "x-api-key";

/// Provider of the initial breed list.
#[async_trait]
pub trait BreedSource: Send + Sync {
    async fn fetch_breeds(&self) -> Result<Vec<BreedRecord>, FetchError>;
}

pub struct BreedApiClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl BreedApiClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint).map_err(|source| FetchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            http,
            endpoint,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.trim().is_empty()).then_some(api_key);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl BreedSource for BreedApiClient {
    async fn fetch_breeds(&self) -> Result<Vec<BreedRecord>, FetchError> {
        let mut request = self.http.get(self.endpoint.clone());
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let res = request.send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        // Decoded separately so a malformed body is reported as such rather
        // than as a transport failure.
        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug)]
pub struct SeedOutcome {
    pub records: Vec<BreedRecord>,
    pub error: Option<FetchError>,
}

/// Fetches once; any failure degrades to an empty list plus the error.
pub async fn load_or_empty(source: &dyn BreedSource) -> SeedOutcome {
    match source.fetch_breeds().await {
        Ok(records) => {
            info!(count = records.len(), "loaded breed records");
            SeedOutcome {
                records,
                error: None,
            }
        }
        Err(err) => {
            error!("failed to load breed records: {err}");
            SeedOutcome {
                records: Vec::new(),
                error: Some(err),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
