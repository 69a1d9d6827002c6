use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use crate::priority::Priority;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
}

pub type VoteMap = BTreeMap<String, Priority>;

/// A participant's latest submission, as kept by the vote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteSubmission {
    #[serde(with = "stored_timestamp")]
    pub timestamp: OffsetDateTime,
    pub votes: VoteMap,
}

impl VoteSubmission {
    pub fn new(votes: VoteMap) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            votes,
        }
    }

    pub fn total_votes(&self) -> usize {
        self.votes.len()
    }
}

/// Written as RFC 3339. Reads also accept ISO-8601 date-times without an
/// offset, as older vote files hold, and take them as UTC.
mod stored_timestamp {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{OffsetDateTime, PrimitiveDateTime};

    pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&raw, &Rfc3339)
            .or_else(|_| {
                PrimitiveDateTime::parse(
                    &raw,
                    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
                )
                .map(PrimitiveDateTime::assume_utc)
            })
            .map_err(serde::de::Error::custom)
    }
}

/// One validated `(module, priority)` entry of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVote {
    pub module_id: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawModuleVote {
    pub module_id: String,
    pub priority: serde_json::Value,
}

/// Votes as they arrive on the wire, before validation. Either a
/// `{moduleId: priority}` object or a list of `{moduleId, priority}` records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VotesPayload {
    Map(BTreeMap<String, serde_json::Value>),
    List(Vec<RawModuleVote>),
}

impl Default for VotesPayload {
    fn default() -> Self {
        VotesPayload::Map(BTreeMap::new())
    }
}

impl VotesPayload {
    pub fn len(&self) -> usize {
        match self {
            VotesPayload::Map(map) => map.len(),
            VotesPayload::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubmitVotesRequest {
    #[serde(default)]
    pub participant: Option<String>,
    #[serde(default)]
    pub votes: Option<VotesPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitVotesResponse {
    pub message: String,
    pub count: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResetResponse {
    pub message: String,
    pub reset: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsSummary {
    pub total_votes: u32,
    #[serde(rename = "participants")]
    pub participant_count: usize,
    #[serde(rename = "modules_voted")]
    pub modules_voted_count: usize,
    #[serde(rename = "total_modules")]
    pub total_modules_in_catalog: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartRow {
    pub module: String,
    pub priority_1: u32,
    pub priority_2: u32,
    pub priority_3: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailedRow {
    pub module: String,
    pub duration: String,
    pub priority_1: u32,
    pub priority_2: u32,
    pub priority_3: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieSlice {
    pub name: String,
    pub value: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantDetail {
    pub participant: String,
    pub vote_count: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteResults {
    pub summary: ResultsSummary,
    pub chart_data: Vec<ChartRow>,
    pub pie_data: Vec<PieSlice>,
    pub detailed_data: Vec<DetailedRow>,
    pub participant_details: Vec<ParticipantDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u32>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

/// Bar-chart series: `labels[i]` names the module whose counts sit at
/// index `i` of every dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}
