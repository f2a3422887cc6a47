use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid breeds endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("breeds request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("breeds endpoint returned HTTP {status}")]
    Status { status: u16 },
    #[error("breeds response is not a valid breed list: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(err) if err.is_timeout())
    }
}
