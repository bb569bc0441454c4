//! # officehub-database
//!
//! Persistence for OfficeHub notifications. The services depend only on
//! the traits in [`store`]; [`repositories`] implements them on
//! PostgreSQL and [`memory`] implements them in process for tests and
//! local tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{AnnouncementStore, NotificationStats, NotificationStore, PreferenceStore, UserDirectory};
