//! Resolves broadcast audiences to concrete recipients.

use std::sync::Arc;

use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_database::UserDirectory;
use officehub_entity::{UserProfile, UserRole};

/// Who a bulk notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// A single user.
    User(UserId),
    /// Active, approved users holding a role.
    Role(UserRole),
    /// Active, approved users of a department.
    Department(String),
    /// Active administrators.
    Admins,
}

/// Looks audiences up in the user directory.
#[derive(Clone)]
pub struct AudienceResolver {
    users: Arc<dyn UserDirectory>,
}

impl AudienceResolver {
    /// Creates a resolver.
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Recipient IDs for `audience`, leaving out `exclude`.
    ///
    /// A single-user audience resolves to that user even when they are
    /// inactive; the directory filters only apply to group audiences.
    pub async fn resolve(
        &self,
        audience: &Audience,
        exclude: Option<UserId>,
    ) -> Result<Vec<UserId>, AppError> {
        let members: Vec<UserProfile> = match audience {
            Audience::User(id) => return Ok(if Some(*id) == exclude { vec![] } else { vec![*id] }),
            Audience::Admins => self.users.active_by_role(UserRole::Admin).await?,
            Audience::Role(role) => approved(self.users.active_by_role(*role).await?),
            Audience::Department(name) => {
                approved(self.users.active_by_department(name).await?)
            }
        };

        Ok(members
            .into_iter()
            .map(|u| u.id)
            .filter(|id| Some(*id) != exclude)
            .collect())
    }
}

fn approved(users: Vec<UserProfile>) -> Vec<UserProfile> {
    users.into_iter().filter(|u| u.is_approved).collect()
}

#[cfg(test)]
mod tests {
    use officehub_database::memory::MemoryUserDirectory;

    use super::*;

    fn user(role: UserRole, department: &str, approved: bool) -> UserProfile {
        UserProfile {
            id: UserId::new(),
            email: format!("{}@example.com", UserId::new()),
            first_name: "Test".into(),
            last_name: "User".into(),
            role,
            department: Some(department.into()),
            is_active: true,
            is_approved: approved,
        }
    }

    #[tokio::test]
    async fn test_role_audience_requires_approval() {
        let dir = MemoryUserDirectory::new();
        let ok = user(UserRole::Employee, "Sales", true);
        let pending = user(UserRole::Employee, "Sales", false);
        dir.insert(ok.clone());
        dir.insert(pending);

        let resolver = AudienceResolver::new(Arc::new(dir));
        let ids = resolver
            .resolve(&Audience::Role(UserRole::Employee), None)
            .await
            .unwrap();
        assert_eq!(ids, vec![ok.id]);
    }

    #[tokio::test]
    async fn test_department_audience_excludes_actor() {
        let dir = MemoryUserDirectory::new();
        let a = user(UserRole::Employee, "HR", true);
        let b = user(UserRole::Trainee, "HR", true);
        dir.insert(a.clone());
        dir.insert(b.clone());
        dir.insert(user(UserRole::Employee, "Finance", true));

        let resolver = AudienceResolver::new(Arc::new(dir));
        let ids = resolver
            .resolve(&Audience::Department("HR".into()), Some(a.id))
            .await
            .unwrap();
        assert_eq!(ids, vec![b.id]);
    }

    #[tokio::test]
    async fn test_admins_need_not_be_approved() {
        let dir = MemoryUserDirectory::new();
        let admin = user(UserRole::Admin, "IT", false);
        dir.insert(admin.clone());

        let resolver = AudienceResolver::new(Arc::new(dir));
        let ids = resolver.resolve(&Audience::Admins, None).await.unwrap();
        assert_eq!(ids, vec![admin.id]);
    }
}
