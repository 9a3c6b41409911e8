use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: u64 },

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to persist {key}: {message}")]
    Persist { key: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Lookup,
    Storage,
    Configuration,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::Api(_) | CartError::UnexpectedStatus { .. } => ErrorCategory::Network,
            CartError::NotFound { .. } => ErrorCategory::Lookup,
            CartError::Io(_) | CartError::Serialization(_) | CartError::Persist { .. } => {
                ErrorCategory::Storage
            }
            CartError::Config { .. } | CartError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the stock service: {}", self),
            ErrorCategory::Lookup => format!("Unknown product: {}", self),
            ErrorCategory::Storage => format!("Could not read or write the saved cart: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
