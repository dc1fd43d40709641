use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("PDF conversion failed: {message}")]
    Pdf { message: String },

    #[error("Dataset error: {message}")]
    Dataset { message: String },

    #[error("Site {0} not found")]
    NotFound(i64),
}

pub type Result<T> = std::result::Result<T, SiteError>;
