use std::collections::HashSet;
use crate::catalog::Catalog;
use crate::error::ErrorCode;
use crate::models::{ModuleVote, SubmitVotesRequest, VoteMap, VotesPayload};
use crate::priority::Priority;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Participant is required")]
    MissingParticipant,
    #[error("Participant not authorized: {0}")]
    InvalidParticipant(String),
    #[error("No votes provided")]
    EmptyVotes,
    #[error("Invalid priority for module {module_id}: {value} (must be 1, 2 or 3)")]
    InvalidPriority { module_id: String, value: String },
    #[error("Unknown module: {0}")]
    UnknownModule(String),
    #[error("Duplicate vote for module: {0}")]
    DuplicateModule(String),
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::MissingParticipant => ErrorCode::MissingParticipant,
            ValidationError::InvalidParticipant(_) => ErrorCode::InvalidParticipant,
            ValidationError::EmptyVotes => ErrorCode::EmptyVotes,
            ValidationError::InvalidPriority { .. } => ErrorCode::InvalidPriority,
            ValidationError::UnknownModule(_) => ErrorCode::UnknownModule,
            ValidationError::DuplicateModule(_) => ErrorCode::DuplicateModule,
        }
    }
}

pub fn validate_participant(catalog: &Catalog, participant: &str) -> Result<(), ValidationError> {
    if participant.trim().is_empty() {
        return Err(ValidationError::MissingParticipant);
    }
    if !catalog.is_participant(participant) {
        return Err(ValidationError::InvalidParticipant(participant.to_string()));
    }
    Ok(())
}

fn parse_priority(module_id: &str, value: &serde_json::Value) -> Result<Priority, ValidationError> {
    let invalid = || ValidationError::InvalidPriority {
        module_id: module_id.to_string(),
        value: value.to_string(),
    };
    let n = value.as_i64().ok_or_else(invalid)?;
    Priority::try_from(n).map_err(|_| invalid())
}

fn parse_vote(catalog: &Catalog, module_id: &str, value: &serde_json::Value) -> Result<ModuleVote, ValidationError> {
    let priority = parse_priority(module_id, value)?;
    if catalog.module(module_id).is_none() {
        return Err(ValidationError::UnknownModule(module_id.to_string()));
    }
    Ok(ModuleVote { module_id: module_id.to_string(), priority })
}

/// Parses raw wire votes into typed records. The first invalid entry
/// rejects the whole payload.
pub fn validate_votes(catalog: &Catalog, payload: &VotesPayload) -> Result<Vec<ModuleVote>, ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::EmptyVotes);
    }

    match payload {
        VotesPayload::Map(map) => map
            .iter()
            .map(|(module_id, value)| parse_vote(catalog, module_id, value))
            .collect(),
        VotesPayload::List(list) => {
            let mut seen = HashSet::new();
            list.iter()
                .map(|raw| {
                    if !seen.insert(raw.module_id.as_str()) {
                        return Err(ValidationError::DuplicateModule(raw.module_id.clone()));
                    }
                    parse_vote(catalog, &raw.module_id, &raw.priority)
                })
                .collect()
        }
    }
}

/// Checks a whole submission and returns the participant with its typed votes.
pub fn validate_submission(
    catalog: &Catalog,
    request: &SubmitVotesRequest,
) -> Result<(String, Vec<ModuleVote>), ValidationError> {
    let participant = request.participant.as_deref().unwrap_or_default();
    validate_participant(catalog, participant)?;

    let votes = match &request.votes {
        Some(payload) => validate_votes(catalog, payload)?,
        None => return Err(ValidationError::EmptyVotes),
    };

    Ok((participant.to_string(), votes))
}

pub fn into_vote_map(votes: Vec<ModuleVote>) -> VoteMap {
    votes.into_iter().map(|v| (v.module_id, v.priority)).collect()
}
