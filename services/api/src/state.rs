//! Shared Application State
//!
//! This module defines the `AppState` struct, created once at startup and
//! shared read-only by every request.

use promptgate_core::dispatcher::Dispatcher;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}
