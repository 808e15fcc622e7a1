use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FieldName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Configuration,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: FieldName,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_guests must be at least 1")]
    NoGuestsAllowed,
    #[error("meal_options must not be empty")]
    NoMealOptions,
    #[error("meal option at position {0} is blank")]
    BlankMealOption(usize),
    #[error("duplicate meal option '{0}'")]
    DuplicateMealOption(String),
    #[error("intake_url '{url}' is not a valid URL: {reason}")]
    InvalidIntakeUrl { url: String, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Configuration
    }
}
