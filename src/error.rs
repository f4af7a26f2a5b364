use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Menu API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Menu API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Menu API returned an unreadable payload: {0}")]
    Payload(String),

    #[error("Invalid menu API URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Invalid email address: {0}")]
    Address(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Delivery failed for {} recipient(s) ({delivered} delivered): {}", failed.len(), failed.join(", "))]
    Delivery {
        failed: Vec<String>,
        delivered: usize,
    },
}

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Send error: {0}")]
    Send(#[from] SendError),
}

pub type Result<T> = std::result::Result<T, NotifierError>;
