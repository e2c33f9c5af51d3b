//! # Route and Role Guards
//!
//! Decide per request whether protected content renders or a redirect
//! happens.
//!
//! ## Invariants
//! - Decisions are computed fresh on every evaluation
//! - A redirect is always replace-style
//! - An absent role is unauthorized, never an error

use std::collections::BTreeSet;

use serde::Serialize;

use super::oracle::SessionOracle;
use super::role::Role;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum AuthorizationDecision {
    Render,
    RedirectTo(&'static str),
}

impl AuthorizationDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, AuthorizationDecision::Render)
    }

    /// Navigation command for this decision, `None` when content renders
    pub fn command(&self) -> Option<NavigationCommand> {
        match *self {
            AuthorizationDecision::Render => None,
            AuthorizationDecision::RedirectTo(to) => Some(NavigationCommand::Replace { to }),
        }
    }
}

/// Navigation issued through the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationCommand {
    /// Overwrite the current history entry
    Replace { to: &'static str },
    /// End the session and fully reload at `to`, discarding client state
    EndSession { to: &'static str },
}

impl NavigationCommand {
    pub fn target(&self) -> &'static str {
        match *self {
            NavigationCommand::Replace { to } | NavigationCommand::EndSession { to } => to,
        }
    }
}

/// Gate for the authenticated area
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn evaluate(is_authenticated: bool) -> AuthorizationDecision {
        if is_authenticated {
            AuthorizationDecision::Render
        } else {
            AuthorizationDecision::RedirectTo(LOGIN_PATH)
        }
    }

    /// Evaluate against the oracle's current answer
    pub fn check(oracle: &dyn SessionOracle) -> AuthorizationDecision {
        Self::evaluate(oracle.is_authenticated())
    }
}

/// Gate for a sub-view restricted to a set of roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGuard {
    allowed: BTreeSet<Role>,
}

impl RoleGuard {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn evaluate(&self, current: Option<Role>) -> AuthorizationDecision {
        match current {
            Some(role) if self.allowed.contains(&role) => AuthorizationDecision::Render,
            _ => AuthorizationDecision::RedirectTo(HOME_PATH),
        }
    }

    pub fn check(&self, oracle: &dyn SessionOracle) -> AuthorizationDecision {
        self.evaluate(oracle.role())
    }
}
