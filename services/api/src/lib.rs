//! Prompt Gateway API Library Crate
//!
//! This library contains the HTTP layer of the gateway: configuration,
//! request models, handlers, routing and the shared application state. The
//! `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
