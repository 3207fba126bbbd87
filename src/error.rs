use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrismicError {
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Can't connect to Prismic's API: {status} {message}")]
    Connection { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed fragment: {0}")]
    MalformedFragment(String),
    #[error("Unsupported form method: {0}")]
    UnsupportedMethod(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PrismicError>;

// Helper conversions
impl From<reqwest::Error> for PrismicError {
    fn from(e: reqwest::Error) -> Self { Self::Transport(e.to_string()) }
}
impl From<url::ParseError> for PrismicError {
    fn from(e: url::ParseError) -> Self { Self::InvalidUrl(e.to_string()) }
}
impl From<serde_json::Error> for PrismicError {
    fn from(e: serde_json::Error) -> Self { Self::MalformedResponse(e.to_string()) }
}
impl From<::config::ConfigError> for PrismicError {
    fn from(e: ::config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
