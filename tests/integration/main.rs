//! HTTP and WebSocket integration tests over in-memory stores.

mod helpers;

mod announcement_test;
mod auth_test;
mod event_test;
mod notification_test;
mod preference_test;
mod ws_test;
