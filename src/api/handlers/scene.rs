//! Read-only scene handlers: snapshot, source list, single source.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{SceneDto, SourceDto};
use crate::app_state::AppState;
use crate::error::{ClientError, ErrorResponse};

/// `GET /scene` — Full scene snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/scene",
    tag = "Scene",
    summary = "Get the scene",
    description = "Returns the mirrored scene: reference with offset, loudspeakers resolved against the reference, and all live sources.",
    responses(
        (status = 200, description = "Scene snapshot", body = SceneDto),
    )
)]
pub async fn get_scene(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.scene_service;
    let snapshot = service.snapshot().await;
    Json(SceneDto::from_snapshot(snapshot, service.is_connected()))
}

/// `GET /sources` — List live sources.
#[utoipa::path(
    get,
    path = "/api/v1/sources",
    tag = "Scene",
    summary = "List sources",
    description = "Returns all live sources in id order.",
    responses(
        (status = 200, description = "Source list", body = Vec<SourceDto>),
    )
)]
pub async fn list_sources(State(state): State<AppState>) -> impl IntoResponse {
    let sources: Vec<SourceDto> = state
        .scene_service
        .sources()
        .await
        .into_iter()
        .map(SourceDto::from)
        .collect();
    Json(sources)
}

/// `GET /sources/{id}` — Get one source.
///
/// # Errors
///
/// Returns [`ClientError::SourceNotFound`] if the source does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/sources/{id}",
    tag = "Scene",
    summary = "Get source",
    params(
        ("id" = String, Path, description = "Source id"),
    ),
    responses(
        (status = 200, description = "Source details", body = SourceDto),
        (status = 404, description = "Source not found", body = ErrorResponse),
    )
)]
pub async fn get_source(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ClientError> {
    let source = state.scene_service.source(&id).await?;
    Ok(Json(SourceDto::from(source)))
}

/// Scene read routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scene", get(get_scene))
        .route("/sources", get(list_sources))
        .route("/sources/{id}", get(get_source))
}
