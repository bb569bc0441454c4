//! PostgreSQL implementations of the store traits.

pub mod announcement;
pub mod notification;
pub mod preference;
pub mod user;

pub use announcement::AnnouncementRepository;
pub use notification::NotificationRepository;
pub use preference::PreferenceRepository;
pub use user::UserRepository;
