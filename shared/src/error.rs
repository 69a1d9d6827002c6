use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Participant is required")]
    MissingParticipant,
    #[error("Participant not authorized")]
    InvalidParticipant,
    #[error("No votes provided")]
    EmptyVotes,
    #[error("Invalid priority")]
    InvalidPriority,
    #[error("Unknown module")]
    UnknownModule,
    #[error("Duplicate module")]
    DuplicateModule,
    #[error("Invalid request")]
    BadRequest,
    #[error("Resource not found")]
    NotFound,
    #[error("Malformed request body")]
    UnprocessableEntity,
    #[error("Internal system error")]
    InternalError,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self { error: error.into(), code }
    }
}
