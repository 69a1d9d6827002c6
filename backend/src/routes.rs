use rocket::{State, get, post, delete, http::Status, serde::json::Json};
use time::OffsetDateTime;
use tracing::{debug, instrument};
use shared::models::*;
use crate::{error::ApiError, processor::VoteProcessor};

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        timestamp: OffsetDateTime::now_utc(),
    })
}

#[get("/participants")]
pub fn list_participants(processor: &State<VoteProcessor>) -> Json<Vec<String>> {
    Json(processor.catalog().participants().to_vec())
}

#[get("/modules")]
pub fn list_modules(processor: &State<VoteProcessor>) -> Json<Vec<Module>> {
    Json(processor.catalog().modules().to_vec())
}

#[instrument(skip(processor))]
#[get("/votes/<participant>")]
pub fn get_votes(processor: &State<VoteProcessor>, participant: &str) -> Result<Json<VoteMap>, ApiError> {
    processor.votes_for(participant).map(Json)
}

#[instrument(skip(processor, request))]
#[post("/votes", data = "<request>")]
pub fn submit_votes(
    processor: &State<VoteProcessor>,
    request: Json<SubmitVotesRequest>,
) -> Result<Json<SubmitVotesResponse>, ApiError> {
    let request = request.into_inner();
    debug!("Submission from {:?} with {} votes",
        request.participant, request.votes.as_ref().map_or(0, |v| v.len()));

    let (timestamp, count) = processor.submit(&request)?;
    Ok(Json(SubmitVotesResponse {
        message: "Votes recorded successfully".into(),
        count,
        timestamp,
    }))
}

#[instrument(skip(processor))]
#[delete("/votes/<participant>")]
pub fn reset_votes(processor: &State<VoteProcessor>, participant: &str) -> Result<Json<ResetResponse>, ApiError> {
    let reset = processor.reset(participant)?;
    let message = if reset { "Votes reset successfully" } else { "No votes to reset" };
    Ok(Json(ResetResponse { message: message.into(), reset }))
}

#[get("/results")]
pub fn get_results(processor: &State<VoteProcessor>) -> Result<Json<VoteResults>, ApiError> {
    processor.results().map(Json)
}

#[get("/results/chart-data")]
pub fn get_chart_data(processor: &State<VoteProcessor>) -> Result<Json<ChartSeries>, ApiError> {
    processor.chart_series().map(Json)
}

#[rocket::options("/<_..>")]
pub fn all_options() -> Status {
    Status::Ok
}
