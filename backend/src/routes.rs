use std::sync::Arc;

use rocket::{State, delete, get, post, serde::json::Json};
use shared::models::*;
use shared::validation::validate_poll_request;
use tracing::{debug, info, instrument};

use crate::{error::ApiError, store::PollStore, utils::parse_poll_id};

pub struct AppState {
    pub store: Arc<dyn PollStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }
}

#[get("/polls")]
pub async fn list_polls(state: &State<AppState>) -> Result<Json<PollListResponse>, ApiError> {
    let polls = state.store.get_all().await?;
    debug!("Listing {} polls", polls.len());
    Ok(Json(PollListResponse { success: true, polls }))
}

#[instrument(skip(state), fields(poll_id = %id))]
#[get("/polls/<id>")]
pub async fn get_poll(state: &State<AppState>, id: &str) -> Result<Json<Poll>, ApiError> {
    let id = parse_poll_id(id)?;
    state.store.get(id).await.map(Json).map_err(ApiError::from)
}

#[instrument(skip(state, request))]
#[post("/create-poll", format = "json", data = "<request>")]
pub async fn create_poll(
    state: &State<AppState>,
    request: Json<CreatePollRequest>,
) -> Result<Json<CreatePollResponse>, ApiError> {
    let request = request.into_inner();
    validate_poll_request(&request)?;

    let poll = state.store.create(request).await?;
    info!("✓ Created poll {} with {} options", poll.id, poll.options.len());

    Ok(Json(CreatePollResponse { success: true, poll_id: poll.id }))
}

async fn remove_poll(state: &AppState, id: &str) -> Result<Json<StatusResponse>, ApiError> {
    let id = parse_poll_id(id)?;
    state.store.delete(id).await?;
    info!("🗑️ Deleted poll {}", id);
    Ok(Json(StatusResponse::with_message("Poll deleted successfully")))
}

#[instrument(skip(state), fields(poll_id = %id))]
#[delete("/delete-poll/<id>")]
pub async fn delete_poll(state: &State<AppState>, id: &str) -> Result<Json<StatusResponse>, ApiError> {
    remove_poll(state, id).await
}

#[instrument(skip(state), fields(poll_id = %id))]
#[post("/delete-poll/<id>")]
pub async fn delete_poll_post(state: &State<AppState>, id: &str) -> Result<Json<StatusResponse>, ApiError> {
    remove_poll(state, id).await
}

#[instrument(skip(state, vote), fields(poll_id = %vote.poll_id))]
#[post("/vote", format = "json", data = "<vote>")]
pub async fn cast_vote(
    state: &State<AppState>,
    vote: Json<VoteRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let VoteRequest { poll_id, options } = vote.into_inner();
    let id = parse_poll_id(&poll_id)?;

    state.store.add_vote(id, &options).await?;
    debug!("Recorded ballot with {} selections", options.len());

    Ok(Json(StatusResponse::ok()))
}
