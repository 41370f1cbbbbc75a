use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Credentials must not be empty")]
    InvalidCredentials,

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Cancelled by user")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, InventoryError>;
