//! # Shell Composer
//!
//! Assembles the authenticated layout: sidebar, header and content slot.
//! All role-conditional choices come from [`shell_config`].

use serde::Serialize;

use super::guard::{NavigationCommand, HOME_PATH};
use super::navigation::{active_entry, build_navigation, NavigationEntry};
use super::oracle::SessionOracle;
use super::role::Role;

pub const BRAND: &str = "CareerVerse";

/// Role-dependent rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellConfig {
    pub role: Role,
    pub portal_label: &'static str,
    pub header_title: &'static str,
    pub show_create_webinar: bool,
    pub navigation: Vec<NavigationEntry>,
}

/// Map a role to its shell configuration
pub fn shell_config(role: Role) -> ShellConfig {
    let (portal_label, header_title) = match role {
        Role::Mentor => ("Mentor Portal", "Mentor Dashboard"),
        Role::Student => ("Student Portal", "Student Dashboard"),
    };

    ShellConfig {
        role,
        portal_label,
        header_title,
        show_create_webinar: role.is_mentor(),
        navigation: build_navigation(role),
    }
}

/// Sidebar link with its highlight state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    #[serde(flatten)]
    pub entry: NavigationEntry,
    pub active: bool,
}

/// Composed shell around a content slot
#[derive(Debug, Clone, Serialize)]
pub struct ShellView<C> {
    pub brand: &'static str,
    pub role: Role,
    pub portal_label: &'static str,
    pub header_title: &'static str,
    pub show_create_webinar: bool,
    pub navigation: Vec<NavLink>,
    pub content: C,
}

impl<C> ShellView<C> {
    /// The highlighted entry, if the active path is in the sidebar
    pub fn active_link(&self) -> Option<&NavLink> {
        self.navigation.iter().find(|link| link.active)
    }
}

/// Build the shell for `role` with the entry at `active_path` highlighted
pub fn render<C>(role: Role, active_path: &str, content: C) -> ShellView<C> {
    let config = shell_config(role);
    let active = active_entry(&config.navigation, active_path).map(|entry| entry.path);
    let navigation = config
        .navigation
        .into_iter()
        .map(|entry| NavLink {
            active: Some(entry.path) == active,
            entry,
        })
        .collect();

    ShellView {
        brand: BRAND,
        role,
        portal_label: config.portal_label,
        header_title: config.header_title,
        show_create_webinar: config.show_create_webinar,
        navigation,
        content,
    }
}

/// Log the viewer out and navigate to the root with a full reload
pub fn end_session(oracle: &dyn SessionOracle) -> NavigationCommand {
    oracle.logout();
    NavigationCommand::EndSession { to: HOME_PATH }
}
