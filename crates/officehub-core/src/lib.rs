//! # officehub-core
//!
//! Core crate for OfficeHub. Contains configuration schemas, typed
//! identifiers, domain events published by the other office subsystems,
//! pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other OfficeHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
