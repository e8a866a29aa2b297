use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation error for {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Property not found: {0}")]
    NotFound(String),

    #[error("Property store error: {message}")]
    StoreError { message: String },

    #[error("Cache error: {message}")]
    CacheError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AvailabilityError {
    /// Message suitable for direct display to an operator or API consumer.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AvailabilityError::IoError(e) => format!("A file operation failed: {}", e),
            AvailabilityError::SerializationError(e) => {
                format!("Data could not be encoded or decoded: {}", e)
            }
            AvailabilityError::ValidationError { field, reason } => {
                format!("Invalid input for '{}': {}", field, reason)
            }
            AvailabilityError::NotFound(id) => {
                format!("No property with id '{}' exists", id)
            }
            AvailabilityError::StoreError { message } => {
                format!("The property store is unavailable: {}", message)
            }
            AvailabilityError::CacheError { message } => {
                format!("The cache backend failed: {}", message)
            }
            AvailabilityError::ConfigError { message } => {
                format!("The configuration could not be loaded: {}", message)
            }
            AvailabilityError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    /// Actionable hint printed next to the friendly message by the binary.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AvailabilityError::IoError(_) => {
                "Check that the referenced file exists and is readable"
            }
            AvailabilityError::SerializationError(_) => {
                "Check the JSON payload or seed file for syntax errors"
            }
            AvailabilityError::ValidationError { .. } => {
                "Correct the highlighted field and retry the request"
            }
            AvailabilityError::NotFound(_) => {
                "Verify the property id against the current listings"
            }
            AvailabilityError::StoreError { .. } | AvailabilityError::CacheError { .. } => {
                "Retry later; if the problem persists, inspect the backing service"
            }
            AvailabilityError::ConfigError { .. }
            | AvailabilityError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and restart the service"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
