//! OpenAPI document for the local API.

use utoipa::OpenApi;

use super::dto::{
    LoudspeakerDto, PoseDto, PoseUpdateRequest, ReferenceDto, SceneDto, SourceDto,
};
use super::handlers::{gesture, scene, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description of all REST endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "ssr-scene-client",
        description = "Local API of the SoundScape Renderer scene client"
    ),
    paths(
        system::health_handler,
        scene::get_scene,
        scene::list_sources,
        scene::get_source,
        gesture::move_source,
        gesture::move_reference,
        gesture::move_reference_offset,
    ),
    components(schemas(
        system::HealthResponse,
        SceneDto,
        SourceDto,
        ReferenceDto,
        LoudspeakerDto,
        PoseDto,
        PoseUpdateRequest,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Health"),
        (name = "Scene", description = "Mirrored scene state"),
        (name = "Gestures", description = "Operator edits sent to the renderer"),
    )
)]
pub struct ApiDoc;
