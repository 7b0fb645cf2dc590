use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Serialize};
use terms::Entry;
use tracing::{info, warn};

use crate::{
    error::AppError::{self, MalformedPayload},
    state::AppState,
    views::render_entry,
};

#[derive(Deserialize)]
pub struct UpsertRequest {
    name: Option<String>,
    description: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
pub struct UpsertResponse {
    message: &'static str,
    entry: Entry,
}

#[derive(Deserialize)]
pub struct UnlockRequest {
    password: Option<String>,
}

#[derive(Serialize)]
pub struct Message {
    message: &'static str,
}

/// GET /api/dictionary
pub async fn list_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Entry>> {
    Json(state.store.get_all().await)
}

/// POST /api/dictionary
pub async fn upsert_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpsertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| {
        warn!("Rejected dictionary payload: {e}");
        MalformedPayload
    })?;

    let upserted = state
        .store
        .upsert(
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.password.as_deref(),
        )
        .await
        .inspect_err(|e| warn!("Upsert rejected: {e}"))?;

    if !upserted.persisted && state.config.strict_writes {
        return Err(AppError::StorageUnavailable(
            "the dictionary file could not be written".to_string(),
        ));
    }

    info!("Added/updated {:?}", upserted.entry.name);

    Ok((
        StatusCode::CREATED,
        Json(UpsertResponse {
            message: "Term added/updated.",
            entry: upserted.entry,
        }),
    ))
}

/// POST /api/unlock
pub async fn unlock_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UnlockRequest>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let Json(payload) = payload.map_err(|_| MalformedPayload)?;

    state.store.verify_password(payload.password.as_deref())?;

    Ok(Json(Message {
        message: "Editing unlocked.",
    }))
}

/// GET /entry/{name}
pub async fn entry_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let entry = state.store.get_by_key(&name).await?;

    Ok(Html(render_entry(&entry)))
}

pub async fn health_handler() -> impl IntoResponse {
    "OK"
}
