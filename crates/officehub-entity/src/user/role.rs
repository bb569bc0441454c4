//! User role enumeration.

use std::fmt;
use std::str::FromStr;

use officehub_core::AppError;
use serde::{Deserialize, Serialize};

/// Roles a user account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator; approves accounts and publishes announcements.
    Admin,
    /// Regular employee.
    Employee,
    /// Trainee enrolled in courses.
    Trainee,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Trainee => "trainee",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            "trainee" => Ok(Self::Trainee),
            _ => Err(AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, employee, trainee"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("TRAINEE".parse::<UserRole>().unwrap(), UserRole::Trainee);
        assert!("manager".parse::<UserRole>().is_err());
    }
}
