//! Error types for the Setting table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingError {
    #[error("Setting not found: {0}")]
    NotFound(String),

    #[error("Setting key must not be empty")]
    EmptyKey,

    #[error("Setting gateway error: {0}")]
    Gateway(String),
}

impl From<String> for SettingError {
    fn from(msg: String) -> Self {
        SettingError::Gateway(msg)
    }
}
