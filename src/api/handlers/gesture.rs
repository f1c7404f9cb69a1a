//! Gesture handlers: completed operator moves of sources and the reference.
//!
//! Each successful request applies the new pose locally and sends exactly
//! one message to the SSR.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::put;
use axum::{Json, Router};

use crate::api::dto::{PoseUpdateRequest, ReferenceDto, SourceDto};
use crate::app_state::AppState;
use crate::domain::{SceneEvent, Source, SourceId};
use crate::error::{ClientError, ErrorResponse};
use crate::protocol::Gesture;

/// `PUT /sources/{id}/pose` — Report a completed source drag/rotate.
///
/// # Errors
///
/// Returns [`ClientError::InvalidRequest`] on a malformed body and
/// [`ClientError::SourceNotFound`] for an unknown source.
#[utoipa::path(
    put,
    path = "/api/v1/sources/{id}/pose",
    tag = "Gestures",
    summary = "Move a source",
    description = "Applies the new position and/or orientation and sends one `mod-src` message to the renderer.",
    params(
        ("id" = String, Path, description = "Source id"),
    ),
    request_body = PoseUpdateRequest,
    responses(
        (status = 200, description = "Updated source", body = SourceDto),
        (status = 400, description = "Invalid pose", body = ErrorResponse),
        (status = 404, description = "Source not found", body = ErrorResponse),
    )
)]
pub async fn move_source(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PoseUpdateRequest>,
) -> Result<impl IntoResponse, ClientError> {
    let (position, orientation) = req.into_parts()?;
    let events = state
        .scene_service
        .apply_gesture(Gesture::Source {
            id: SourceId::from(id.as_str()),
            position,
            orientation,
        })
        .await?;
    let source = modified_source(events).ok_or_else(|| ClientError::SourceNotFound(id.into()))?;
    Ok(Json(SourceDto::from(source)))
}

/// Source state produced by a gesture, independent of later scene changes.
fn modified_source(events: Vec<SceneEvent>) -> Option<Source> {
    events.into_iter().find_map(|event| match event {
        SceneEvent::SourceModified { source, .. } => Some(source),
        _ => None,
    })
}

/// `PUT /reference/pose` — Report a completed reference drag/rotate.
///
/// # Errors
///
/// Returns [`ClientError::InvalidRequest`] on a malformed body.
#[utoipa::path(
    put,
    path = "/api/v1/reference/pose",
    tag = "Gestures",
    summary = "Move the reference",
    description = "Applies the new reference pose and sends one `state` message with `ref-pos`/`ref-rot`.",
    request_body = PoseUpdateRequest,
    responses(
        (status = 200, description = "Updated reference", body = ReferenceDto),
        (status = 400, description = "Invalid pose", body = ErrorResponse),
    )
)]
pub async fn move_reference(
    State(state): State<AppState>,
    Json(req): Json<PoseUpdateRequest>,
) -> Result<impl IntoResponse, ClientError> {
    let (position, orientation) = req.into_parts()?;
    let service = &state.scene_service;
    service
        .apply_gesture(Gesture::Reference {
            position,
            orientation,
        })
        .await?;
    Ok(Json(ReferenceDto::from(service.reference().await)))
}

/// `PUT /reference/offset` — Report a completed reference-offset gesture.
///
/// # Errors
///
/// Returns [`ClientError::InvalidRequest`] on a malformed body.
#[utoipa::path(
    put,
    path = "/api/v1/reference/offset",
    tag = "Gestures",
    summary = "Move the reference offset",
    description = "Applies the new offset pose and sends one `state` message with `ref-pos-offset`/`ref-rot-offset`.",
    request_body = PoseUpdateRequest,
    responses(
        (status = 200, description = "Updated reference", body = ReferenceDto),
        (status = 400, description = "Invalid pose", body = ErrorResponse),
    )
)]
pub async fn move_reference_offset(
    State(state): State<AppState>,
    Json(req): Json<PoseUpdateRequest>,
) -> Result<impl IntoResponse, ClientError> {
    let (position, orientation) = req.into_parts()?;
    let service = &state.scene_service;
    service
        .apply_gesture(Gesture::ReferenceOffset {
            position,
            orientation,
        })
        .await?;
    Ok(Json(ReferenceDto::from(service.reference().await)))
}

/// Gesture routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sources/{id}/pose", put(move_source))
        .route("/reference/pose", put(move_reference))
        .route("/reference/offset", put(move_reference_offset))
}
