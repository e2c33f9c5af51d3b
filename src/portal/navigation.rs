//! # Navigation Catalog
//!
//! Maps a role to the ordered sidebar entries of the dashboard shell.
//!
//! ## Invariants
//! - Six entries, always in the same order
//! - Same role always yields the same sequence
//! - Active entry is an exact match on `path`

use serde::Serialize;

use super::role::Role;

/// Symbolic icon reference for a navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavIcon {
    LayoutDashboard,
    FileText,
    Video,
    Users,
    Calendar,
    Settings,
}

impl NavIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavIcon::LayoutDashboard => "layout-dashboard",
            NavIcon::FileText => "file-text",
            NavIcon::Video => "video",
            NavIcon::Users => "users",
            NavIcon::Calendar => "calendar",
            NavIcon::Settings => "settings",
        }
    }
}

/// A single sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub icon: NavIcon,
    pub label: &'static str,
    pub path: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl NavigationEntry {
    fn new(icon: NavIcon, label: &'static str, path: &'static str) -> Self {
        Self {
            icon,
            label,
            path,
            description: None,
        }
    }

    fn described(mut self, description: Option<&'static str>) -> Self {
        self.description = description;
        self
    }

    /// Whether this entry is the one for `active_path`
    pub fn is_active(&self, active_path: &str) -> bool {
        self.path == active_path
    }
}

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const RESUME_PATH: &str = "/dashboard/resume";
pub const INTERVIEW_PATH: &str = "/dashboard/interview";
pub const MENTORS_PATH: &str = "/dashboard/mentors";
pub const WEBINARS_PATH: &str = "/dashboard/webinars";
pub const SETTINGS_PATH: &str = "/dashboard/settings";

/// Build the sidebar navigation for a role
pub fn build_navigation(role: Role) -> Vec<NavigationEntry> {
    let (dashboard, mentors, webinars) = match role {
        Role::Mentor => (
            Some("+ Upcoming Webinar Management"),
            "+ Post/Edit mentor profile",
            "+ Create/Edit webinar events",
        ),
        Role::Student => (None, "View mentors", "Register"),
    };

    vec![
        NavigationEntry::new(NavIcon::LayoutDashboard, "Dashboard", DASHBOARD_PATH)
            .described(dashboard),
        NavigationEntry::new(NavIcon::FileText, "Resume Builder", RESUME_PATH),
        NavigationEntry::new(NavIcon::Video, "Interview Prep", INTERVIEW_PATH),
        NavigationEntry::new(NavIcon::Users, "Mentors", MENTORS_PATH).described(Some(mentors)),
        NavigationEntry::new(NavIcon::Calendar, "Webinars", WEBINARS_PATH)
            .described(Some(webinars)),
        NavigationEntry::new(NavIcon::Settings, "Settings", SETTINGS_PATH),
    ]
}

/// Find the entry matching `active_path`, if any
pub fn active_entry<'a>(
    entries: &'a [NavigationEntry],
    active_path: &str,
) -> Option<&'a NavigationEntry> {
    entries.iter().find(|entry| entry.is_active(active_path))
}
