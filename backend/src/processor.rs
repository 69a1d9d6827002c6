use time::OffsetDateTime;
use tracing::{debug, info};
use shared::catalog::Catalog;
use shared::models::*;
use shared::results;
use shared::validation::{into_vote_map, validate_participant, validate_submission, ValidationError};
use crate::error::ApiError;
use crate::store::VoteStore;

/// Validates requests against the catalog and runs them through the store.
pub struct VoteProcessor {
    catalog: Catalog,
    store: Box<dyn VoteStore>,
}

impl VoteProcessor {
    pub fn new(catalog: Catalog, store: Box<dyn VoteStore>) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn votes_for(&self, participant: &str) -> Result<VoteMap, ApiError> {
        validate_participant(&self.catalog, participant)?;
        Ok(self
            .store
            .get(participant)?
            .map(|s| s.votes)
            .unwrap_or_default())
    }

    pub fn submit(&self, request: &SubmitVotesRequest) -> Result<(OffsetDateTime, usize), ApiError> {
        let (participant, votes) = validate_submission(&self.catalog, request)?;
        self.upsert(&participant, votes)
    }

    pub fn upsert(&self, participant: &str, votes: Vec<ModuleVote>) -> Result<(OffsetDateTime, usize), ApiError> {
        validate_participant(&self.catalog, participant)?;
        if votes.is_empty() {
            return Err(ValidationError::EmptyVotes.into());
        }
        if let Some(unknown) = votes.iter().find(|v| self.catalog.module(&v.module_id).is_none()) {
            return Err(ValidationError::UnknownModule(unknown.module_id.clone()).into());
        }

        let submission = VoteSubmission::new(into_vote_map(votes));
        let (timestamp, count) = (submission.timestamp, submission.total_votes());
        self.store.put(participant, submission)?;

        info!("🗳️ Recorded {} votes for {}", count, participant);
        Ok((timestamp, count))
    }

    pub fn reset(&self, participant: &str) -> Result<bool, ApiError> {
        validate_participant(&self.catalog, participant)?;
        let removed = self.store.remove(participant)?;
        if removed {
            info!("🗑️ Reset votes for {}", participant);
        } else {
            debug!("Nothing to reset for {}", participant);
        }
        Ok(removed)
    }

    pub fn results(&self) -> Result<VoteResults, ApiError> {
        let snapshot = self.store.all()?;
        Ok(results::build_results(&self.catalog, &snapshot))
    }

    pub fn chart_series(&self) -> Result<ChartSeries, ApiError> {
        let snapshot = self.store.all()?;
        Ok(results::build_chart_series(&self.catalog, &snapshot))
    }
}
