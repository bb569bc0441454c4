//! # officehub-api
//!
//! HTTP API layer for OfficeHub built on Axum.
//!
//! Provides the REST endpoints for notifications, preferences,
//! announcements and event intake, the four WebSocket topics, the
//! `X-User-Id` identity extractor, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::{AppState, Stores};
