//! # Portal Core
//!
//! Role-based route authorization and navigation composition.
//!
//! Control flow for a navigation request:
//! Route Guard (signed in?) → Shell Composer (sidebar from the
//! Navigation Catalog) → Role Guard (allowed for this sub-view?) → view.
//!
//! Everything here is synchronous and free of I/O. Identity comes from a
//! [`SessionOracle`] queried on every evaluation.

pub mod guard;
pub mod navigation;
pub mod oracle;
pub mod role;
pub mod routes;
pub mod shell;

pub use guard::{AuthorizationDecision, NavigationCommand, RoleGuard, RouteGuard};
pub use navigation::{build_navigation, NavIcon, NavigationEntry};
pub use oracle::{SessionOracle, StaticOracle};
pub use role::Role;
pub use routes::{Access, Resolution, RouteError, RouteSpec, RouteTable, View};
pub use shell::{end_session, render, shell_config, ShellConfig, ShellView};
