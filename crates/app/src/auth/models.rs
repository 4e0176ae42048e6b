//! Auth data models.

use crate::ids::TypedId;

/// Marker for user identifiers. User profiles are owned by another service.
#[derive(Debug)]
pub struct User;

/// User Id
pub type UserId = TypedId<User>;

/// The authenticated identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user: UserId,
    pub is_admin: bool,
}

impl Requester {
    #[must_use]
    pub const fn user(user: UserId) -> Self {
        Self {
            user,
            is_admin: false,
        }
    }

    #[must_use]
    pub const fn admin(user: UserId) -> Self {
        Self {
            user,
            is_admin: true,
        }
    }

    /// Whether this requester may read a resource owned by `owner`.
    #[must_use]
    pub fn can_access(&self, owner: UserId) -> bool {
        self.is_admin || self.user == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_access_own_resources() {
        let requester = Requester::user(UserId::from_i64(7));

        assert!(requester.can_access(UserId::from_i64(7)));
        assert!(!requester.can_access(UserId::from_i64(8)));
    }

    #[test]
    fn admin_can_access_any_resource() {
        let requester = Requester::admin(UserId::from_i64(1));

        assert!(requester.can_access(UserId::from_i64(99)));
    }
}
