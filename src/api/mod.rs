//! HTTP surface over [`NotePipeline`].

pub mod error;

use crate::core::pipeline::{NotePipeline, ProcessOutcome, ProfileOutcome};
use crate::core::store::DEFAULT_RECENT_LIMIT;
use crate::domain::model::{Command, Note};
use crate::domain::ports::{Storage, TextGenerator};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use error::ApiError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub struct AppState<S: Storage, G: TextGenerator> {
    pub pipeline: Arc<NotePipeline<S, G>>,
}

impl<S: Storage, G: TextGenerator> Clone for AppState<S, G> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProcessNoteRequest {
    pub note_id: String,
    pub command: Command,
}

#[derive(Debug, Deserialize)]
pub struct ProfileInsightRequest {
    pub command: Command,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
}

pub fn router<S, G>(pipeline: Arc<NotePipeline<S, G>>) -> Router
where
    S: Storage + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/notes", get(list_notes::<S, G>))
        .route("/notes/recent", get(recent_notes::<S, G>))
        .route("/process-note", post(process_note::<S, G>))
        .route("/profile-insight", post(profile_insight::<S, G>))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { pipeline })
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Sticky Notes Processing API is running"}))
}

async fn list_notes<S, G>(State(state): State<AppState<S, G>>) -> Json<NotesResponse>
where
    S: Storage + 'static,
    G: TextGenerator + 'static,
{
    Json(NotesResponse {
        notes: state.pipeline.repository().list_all().to_vec(),
    })
}

async fn recent_notes<S, G>(
    State(state): State<AppState<S, G>>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<NotesResponse>, ApiError>
where
    S: Storage + 'static,
    G: TextGenerator + 'static,
{
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    Ok(Json(NotesResponse {
        notes: state.pipeline.repository().recent(limit),
    }))
}

async fn process_note<S, G>(
    State(state): State<AppState<S, G>>,
    payload: Result<Json<ProcessNoteRequest>, JsonRejection>,
) -> Result<Json<ProcessOutcome>, ApiError>
where
    S: Storage + 'static,
    G: TextGenerator + 'static,
{
    let Json(request) = payload?;
    let outcome = state.pipeline.run(&request.note_id, request.command).await?;
    Ok(Json(outcome))
}

async fn profile_insight<S, G>(
    State(state): State<AppState<S, G>>,
    payload: Result<Json<ProfileInsightRequest>, JsonRejection>,
) -> Result<Json<ProfileOutcome>, ApiError>
where
    S: Storage + 'static,
    G: TextGenerator + 'static,
{
    let Json(request) = payload?;
    if request.command != Command::ProfileInsight {
        return Err(ApiError::InvalidRequest(format!(
            "command must be 'profile_insight', got '{}'",
            request.command
        )));
    }

    let limit = request.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let outcome = state.pipeline.run_profile_insight(limit).await?;
    Ok(Json(outcome))
}
