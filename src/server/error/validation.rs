use thiserror::Error;

/// Input rejected before it reaches the service layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("'{value}' is not a valid IP address")]
    InvalidIp { value: String },

    #[error("{field} must be at least {min}")]
    OutOfRange { field: &'static str, min: i64 },

    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u64 },
}
