//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the generation endpoints, the catalog listing and the OpenAPI
//! documentation.

use crate::{
    handlers,
    models::{FlatActionRequest, NestedActionRequest},
    state::AppState,
};
use promptgate_core::{
    action::Action,
    catalog::{ActionDescriptor, GenerationProfile, OptionalField},
    envelope::{Candidate, Content, Part, ResponseData, ResponseEnvelope},
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::generate,
        handlers::generate_nested,
        handlers::list_actions,
    ),
    components(
        schemas(
            FlatActionRequest, NestedActionRequest, ResponseEnvelope, ResponseData, Candidate,
            Content, Part, Action, ActionDescriptor, OptionalField, GenerationProfile
        )
    ),
    tags(
        (name = "Prompt Gateway", description = "Action-based prompt rendering and completion")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/generate", post(handlers::generate))
        .route("/gemini", post(handlers::generate_nested))
        .route("/actions", get(handlers::list_actions))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
