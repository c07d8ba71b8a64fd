use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors surfaced to callers of the north node pipeline
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Invalid parameter `{field}`: {message}")]
    InputValidation { field: String, message: String },
    #[error("Unrecognised timezone offset: {input:?}. Expected e.g. `UTC+5:00`, `EST-5` or `-7`")]
    TimezoneParse { input: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl NodeError {
    pub fn missing(field: &str) -> Self {
        NodeError::InputValidation {
            field: field.to_string(),
            message: "parameter is required".to_string(),
        }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        NodeError::InputValidation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Stable name of the error category, used in response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            NodeError::InputValidation { .. } => "InputValidationError",
            NodeError::TimezoneParse { .. } => "TimezoneParseError",
            NodeError::Ephemeris(_) => "EphemerisFailure",
        }
    }

    /// Whether the caller supplied bad input (as opposed to a server-side failure)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, NodeError::Ephemeris(_))
    }
}
