use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    models::{Ack, CreateAck, MovieInput, parse_id},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    id: Option<String>,
}

/// `GET /movies`: every row, or the single row named by `?id=`.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
) -> AppResult<Response> {
    match q.id.as_deref().filter(|id| !id.is_empty()) {
        Some(raw) => {
            let id = parse_id(raw)?;
            Ok(Json(state.store.get(id).await?).into_response())
        },
        None => Ok(Json(state.store.list().await?).into_response()),
    }
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&raw)?;
    Ok(Json(state.store.get(id).await?).into_response())
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<CreateAck>> {
    let Json(input) = body?;
    tracing::debug!(title = ?input.title, "creating movie");
    let result = state.store.create(&input).await?;
    Ok(Json(CreateAck { success: true, result }))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Ack>> {
    let id = parse_id(&raw)?;
    let Json(input) = body?;
    state.store.update(id, &input).await?;
    Ok(Json(Ack::ok("Movie updated successfully")))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> AppResult<Json<Ack>> {
    let id = parse_id(&raw)?;
    state.store.delete(id).await?;
    Ok(Json(Ack::ok("Movie deleted successfully")))
}
