//! Axum Handlers for the REST API
//!
//! Both generation routes funnel into the same dispatcher; they differ only in
//! how the payload is nested. Every outcome, success or failure, is returned
//! as a [`ResponseEnvelope`].

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use promptgate_core::{
    catalog::ActionDescriptor,
    dispatcher::{self, DispatchError},
    envelope::ResponseEnvelope,
    payload::RequestPayload,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::{
    models::{FlatActionRequest, NestedActionRequest},
    state::AppState,
};

#[derive(Debug)]
pub enum ApiError {
    /// The request was malformed or named an unusable action. Maps to 400.
    BadRequest(String),
    /// The provider failed or returned something unusable. Maps to 500 and
    /// carries the provider's message unchanged.
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                warn!(error = %message, "Rejected request");
                (StatusCode::BAD_REQUEST, Json(ResponseEnvelope::failure(message))).into_response()
            }
            ApiError::Upstream(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseEnvelope::failure(message)),
            )
                .into_response(),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

async fn run_action(
    state: &AppState,
    action: Option<&Value>,
    payload: &RequestPayload,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let action = dispatcher::require_action(action)?;
    let data = state.dispatcher.generate(&action, payload).await?;
    Ok(Json(ResponseEnvelope::success(data)))
}

/// Run an action with its fields alongside `action` in the body.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = FlatActionRequest,
    responses(
        (status = 200, description = "Generated content", body = ResponseEnvelope),
        (status = 400, description = "Missing or unsupported action, or missing fields", body = ResponseEnvelope),
        (status = 500, description = "Completion provider failure", body = ResponseEnvelope)
    )
)]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FlatActionRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let Json(request) = body?;
    let (action, payload) = request.into_parts();
    run_action(&state, action.as_ref(), &payload).await
}

/// Run an action with its fields nested under `data`.
#[utoipa::path(
    post,
    path = "/gemini",
    request_body = NestedActionRequest,
    responses(
        (status = 200, description = "Generated content", body = ResponseEnvelope),
        (status = 400, description = "Missing or unsupported action, or missing fields", body = ResponseEnvelope),
        (status = 500, description = "Completion provider failure", body = ResponseEnvelope)
    )
)]
pub async fn generate_nested(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NestedActionRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let Json(request) = body?;
    let (action, payload) = request.into_parts();
    run_action(&state, action.as_ref(), &payload).await
}

/// List every supported action with its fields and generation profile.
#[utoipa::path(
    get,
    path = "/actions",
    responses(
        (status = 200, description = "The action catalog", body = [ActionDescriptor])
    )
)]
pub async fn list_actions(State(state): State<Arc<AppState>>) -> Json<Vec<ActionDescriptor>> {
    Json(state.dispatcher.catalog().describe())
}
