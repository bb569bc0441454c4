//! Topic names and parsing.

use std::fmt;

use officehub_core::types::UserId;

/// Name of the global announcement topic.
pub const SYSTEM_ANNOUNCEMENTS: &str = "system_announcements";

/// A real-time broadcast group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Personal notification feed.
    User(UserId),
    /// Task updates of an assignee.
    Tasks(UserId),
    /// Attendance updates of a user.
    Attendance(UserId),
    /// System-wide announcements.
    SystemAnnouncements,
}

impl Topic {
    /// Parses a topic string into a typed topic.
    pub fn parse(name: &str) -> Option<Self> {
        if name == SYSTEM_ANNOUNCEMENTS {
            return Some(Self::SystemAnnouncements);
        }
        let (prefix, id) = name.split_once('_')?;
        let id = id.parse::<UserId>().ok()?;
        match prefix {
            "user" => Some(Self::User(id)),
            "tasks" => Some(Self::Tasks(id)),
            "attendance" => Some(Self::Attendance(id)),
            _ => None,
        }
    }

    /// The group name, e.g. `user_{id}`.
    pub fn name(&self) -> String {
        match self {
            Self::User(id) => format!("user_{id}"),
            Self::Tasks(id) => format!("tasks_{id}"),
            Self::Attendance(id) => format!("attendance_{id}"),
            Self::SystemAnnouncements => SYSTEM_ANNOUNCEMENTS.to_string(),
        }
    }

    /// The user a per-user topic belongs to.
    pub fn owner(&self) -> Option<UserId> {
        match self {
            Self::User(id) | Self::Tasks(id) | Self::Attendance(id) => Some(*id),
            Self::SystemAnnouncements => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
