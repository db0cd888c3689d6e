//! API Request Models
//!
//! The two payload conventions accepted by the gateway. Both are thin
//! adapters: each splits the body into the raw `action` value and a flat
//! [`RequestPayload`] for the shared dispatcher.

use promptgate_core::payload::RequestPayload;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Body of `POST /generate`: the action and its fields side by side.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "action": "summarize_text",
    "text": "Rust is a systems programming language..."
}), value_type = Object)]
pub struct FlatActionRequest(pub Map<String, Value>);

impl FlatActionRequest {
    pub fn into_parts(self) -> (Option<Value>, RequestPayload) {
        let mut fields = self.0;
        let action = fields.remove("action");
        (action, RequestPayload::new(fields))
    }
}

/// Body of `POST /gemini`: the action's fields nested under `data`.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "action": "generate_flashcards",
    "data": { "topic": "Photosynthesis", "purpose": "school", "difficulty": "beginner" }
}))]
pub struct NestedActionRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub action: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: Option<Value>,
}

impl NestedActionRequest {
    /// A `data` value that is not an object carries no fields.
    pub fn into_parts(self) -> (Option<Value>, RequestPayload) {
        let fields = match self.data {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        (self.action, RequestPayload::new(fields))
    }
}
