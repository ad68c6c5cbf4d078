//! Error types for the Profile table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile name must not be empty")]
    EmptyName,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Profile gateway error: {0}")]
    Gateway(String),
}

impl From<String> for ProfileError {
    fn from(msg: String) -> Self {
        ProfileError::Gateway(msg)
    }
}
