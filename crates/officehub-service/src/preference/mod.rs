//! Per-user notification preferences.

pub mod service;

pub use service::PreferenceService;
