//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion provider (Groq chat completions, offline mock)
//! - Backend HTTP server (axum) and the client that calls it
//! - Durable history storage (JSON files, in-memory)
//! - CLI wiring and controllers

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
pub use http::*;
