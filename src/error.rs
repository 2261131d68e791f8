#[derive(Debug, thiserror::Error)]
pub enum HouseholdError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl HouseholdError {
    /// True for failures to reach the server at all (connect, timeout, etc.),
    /// as opposed to the server answering with an error status.
    pub fn is_transport(&self) -> bool {
        match self {
            HouseholdError::Http(e) => e.status().is_none(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HouseholdError>;
