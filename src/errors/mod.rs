use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedhoundError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // URL errors
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    // Network errors
    #[error("Unable to connect: {0}")]
    Connection(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(String),

    #[error("Too many redirects starting at {0}")]
    TooManyRedirects(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedhoundError {
    /// True for name-resolution and connect failures, which the caller can
    /// usually fix by changing scheme or host.
    pub fn is_connection(&self) -> bool {
        match self {
            FeedhoundError::Connection(_) => true,
            FeedhoundError::Http(e) => e.is_connect(),
            _ => false,
        }
    }
}

pub type FeedhoundResult<T> = Result<T, FeedhoundError>;
