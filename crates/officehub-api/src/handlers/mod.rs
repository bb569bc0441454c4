//! Route handlers organized by domain.

pub mod announcement;
pub mod event;
pub mod health;
pub mod notification;
pub mod preference;
pub mod ws;
