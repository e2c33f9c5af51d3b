//! Session Oracle boundary.
//!
//! The portal never stores identity itself. Every guard evaluation asks the
//! oracle again.

use super::role::Role;

/// Source of truth for "who is the current viewer and are they logged in"
pub trait SessionOracle {
    /// Whether the current viewer holds a valid session
    fn is_authenticated(&self) -> bool;

    /// The current viewer's role, if known
    fn role(&self) -> Option<Role>;

    /// End the current session
    fn logout(&self);
}

/// Fixed-answer oracle for offline resolution and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticOracle {
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl StaticOracle {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(role: Role) -> Self {
        Self {
            authenticated: true,
            role: Some(role),
        }
    }
}

impl SessionOracle for StaticOracle {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn role(&self) -> Option<Role> {
        self.role
    }

    fn logout(&self) {}
}
