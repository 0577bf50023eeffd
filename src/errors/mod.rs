use thiserror::Error;

/// Failure of a single fetch against the news endpoint.
///
/// The pagination layer does not distinguish variants; every one of them
/// ends up as `RequestStatus::Error`.
#[derive(Error, Debug)]
pub enum RequestError {
    // Network errors
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint returned {code}: {message}")]
    Status { code: u16, message: String },

    // Parsing errors
    #[error("Response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum NewsError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Request(#[from] RequestError),
}

pub type NewsResult<T> = Result<T, NewsError>;
