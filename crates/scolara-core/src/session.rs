// ── Session state ──
//
// The session is owned by the Coordinator (single writer); consumers
// observe it through a watch channel and never mutate it directly.
// The invariant behind `Authenticated`: the token slot holds a token
// AND the profile has been resolved against the server.

use uuid::Uuid;

use crate::roles::Role;

/// Resolved user profile, derived from `/auth/context`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Effective application role, from the first active mapped grant.
    pub role: Role,
    /// School the effective role is scoped to. `None` only for a user
    /// with no role grants at all.
    pub school_id: Option<Uuid>,
}

impl Profile {
    /// Display name: "First Last" when both are known, else the email.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }
}

/// Authentication state observable by consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No token.
    #[default]
    Unauthenticated,
    /// A persisted token exists but the profile has not been resolved
    /// against the server yet (startup revalidation in flight).
    PendingProfile,
    /// Token and profile both present.
    Authenticated(Profile),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            user_id: Uuid::nil(),
            email: "jane@school.test".into(),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            role: Role::Teacher,
            school_id: Some(Uuid::nil()),
        }
    }

    #[test]
    fn authenticated_requires_profile() {
        assert!(!SessionState::Unauthenticated.is_authenticated());
        assert!(!SessionState::PendingProfile.is_authenticated());
        assert!(SessionState::Authenticated(profile()).is_authenticated());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut p = profile();
        assert_eq!(p.display_name(), "Jane Doe");
        p.first_name = None;
        assert_eq!(p.display_name(), "jane@school.test");
    }
}
