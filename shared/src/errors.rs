//! Shared error types for the route planner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Visit store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Invalid user id: {input}")]
    InvalidUserId { input: String },

    #[error("Serialization failed: {message}")]
    SerializationError { message: String },
}

impl SharedError {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable { message: message.into() }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError { message: e.to_string() }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
