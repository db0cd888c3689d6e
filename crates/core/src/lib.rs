//! Prompt Gateway Core
//!
//! Turns a named action plus a payload of fields into a rendered prompt,
//! sends it to a completion provider and shapes whatever comes back into the
//! canonical response envelope. The HTTP service is a thin layer over this
//! crate.

pub mod action;
pub mod catalog;
pub mod dispatcher;
pub mod envelope;
pub mod gemini;
pub mod llm_client;
pub mod normalizer;
pub mod payload;
pub mod templates;
pub mod validator;
