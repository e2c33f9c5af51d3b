//! # Route Table
//!
//! Declarative route set for the portal and the pure resolution chain:
//! match the path, then the Route Guard, then the nested Role Guard.

use serde::Serialize;
use thiserror::Error;

use super::guard::{AuthorizationDecision, RoleGuard, RouteGuard, HOME_PATH};
use super::navigation::{
    DASHBOARD_PATH, INTERVIEW_PATH, MENTORS_PATH, RESUME_PATH, SETTINGS_PATH, WEBINARS_PATH,
};
use super::oracle::SessionOracle;
use super::role::Role;

/// Screens the portal can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Dashboard,
    ResumeBuilder,
    InterviewPrep,
    Mentors,
    Webinars,
    Settings,
}

impl View {
    /// Stable identifier, matching the serialized form
    pub fn slug(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Login => "login",
            View::Register => "register",
            View::ForgotPassword => "forgot_password",
            View::ResetPassword => "reset_password",
            View::Dashboard => "dashboard",
            View::ResumeBuilder => "resume_builder",
            View::InterviewPrep => "interview_prep",
            View::Mentors => "mentors",
            View::Webinars => "webinars",
            View::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Welcome to CareerVerse",
            View::Login => "Sign In",
            View::Register => "Create an Account",
            View::ForgotPassword => "Forgot Password",
            View::ResetPassword => "Reset Password",
            View::Dashboard => "Dashboard",
            View::ResumeBuilder => "Resume Builder",
            View::InterviewPrep => "Interview Prep",
            View::Mentors => "Mentors",
            View::Webinars => "Webinars",
            View::Settings => "Settings",
        }
    }
}

/// Who may reach a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Inside the authenticated shell
    Authenticated,
    /// Inside the authenticated shell and restricted to roles
    Roles(RoleGuard),
}

impl Access {
    pub fn requires_session(&self) -> bool {
        !matches!(self, Access::Public)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: String,
    pub view: View,
    pub access: Access,
}

impl RouteSpec {
    pub fn new(path: impl Into<String>, view: View, access: Access) -> Self {
        Self {
            path: path.into(),
            view,
            access,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route already registered: {0}")]
    DuplicatePath(String),

    #[error("route path must be absolute: {0}")]
    RelativePath(String),

    #[error("route path must be literal, found parameter segment: {0}")]
    ParameterSegment(String),

    #[error("route path is served by the portal itself: {0}")]
    Reserved(String),
}

/// Result of running a path through the guard chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Render {
        view: View,
        /// Role the shell is composed for, `None` outside the shell
        #[serde(skip_serializing_if = "Option::is_none")]
        shell_role: Option<Role>,
    },
    Redirect {
        to: &'static str,
    },
}

impl Resolution {
    fn from_decision(decision: AuthorizationDecision) -> Option<Self> {
        match decision {
            AuthorizationDecision::Render => None,
            AuthorizationDecision::RedirectTo(to) => Some(Resolution::Redirect { to }),
        }
    }
}

/// Strip a trailing slash, keeping the root as `/`
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH
    } else {
        trimmed
    }
}

/// Sign-out endpoint
pub const LOGOUT_PATH: &str = "/logout";
/// JSON resolution endpoint
pub const RESOLVE_API_PATH: &str = "/api/resolve";
/// Liveness endpoint
pub const HEALTH_PATH: &str = "/health";

/// Paths the server answers outside the route table
pub const RESERVED_PATHS: [&str; 3] = [LOGOUT_PATH, RESOLVE_API_PATH, HEALTH_PATH];

/// Role used for the shell when the oracle is signed in but has no role
pub const DEFAULT_SHELL_ROLE: Role = Role::Student;

/// Ordered, duplicate-free set of routes
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteSpec>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The portal's route set
    pub fn standard() -> Self {
        let both = || Access::Roles(RoleGuard::new(Role::ALL));
        let specs = [
            RouteSpec::new("/", View::Home, Access::Public),
            RouteSpec::new("/login", View::Login, Access::Public),
            RouteSpec::new("/register", View::Register, Access::Public),
            RouteSpec::new("/forgot-password", View::ForgotPassword, Access::Public),
            RouteSpec::new("/reset-password", View::ResetPassword, Access::Public),
            RouteSpec::new(DASHBOARD_PATH, View::Dashboard, Access::Authenticated),
            RouteSpec::new(RESUME_PATH, View::ResumeBuilder, Access::Authenticated),
            RouteSpec::new(INTERVIEW_PATH, View::InterviewPrep, Access::Authenticated),
            RouteSpec::new(SETTINGS_PATH, View::Settings, Access::Authenticated),
            RouteSpec::new(MENTORS_PATH, View::Mentors, both()),
            RouteSpec::new(WEBINARS_PATH, View::Webinars, both()),
        ];

        Self {
            routes: Vec::from(specs),
        }
    }

    /// Register a route, rejecting duplicates
    ///
    /// The path is stored without its trailing slash. Paths are matched
    /// literally, so `:param` and `*wildcard` segments are refused, as are
    /// the endpoints in [`RESERVED_PATHS`].
    pub fn insert(&mut self, mut spec: RouteSpec) -> Result<(), RouteError> {
        if !spec.path.starts_with('/') {
            return Err(RouteError::RelativePath(spec.path));
        }
        if spec
            .path
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
        {
            return Err(RouteError::ParameterSegment(spec.path));
        }

        spec.path = normalize_path(&spec.path).to_string();
        if RESERVED_PATHS.contains(&spec.path.as_str()) {
            return Err(RouteError::Reserved(spec.path));
        }
        if self.find(&spec.path).is_some() {
            return Err(RouteError::DuplicatePath(spec.path));
        }
        self.routes.push(spec);
        Ok(())
    }

    pub fn with_route(mut self, spec: RouteSpec) -> Result<Self, RouteError> {
        self.insert(spec)?;
        Ok(self)
    }

    pub fn routes(&self) -> &[RouteSpec] {
        &self.routes
    }

    pub fn find(&self, path: &str) -> Option<&RouteSpec> {
        let path = normalize_path(path);
        self.routes.iter().find(|spec| spec.path == path)
    }

    /// Run `path` through the guard chain
    ///
    /// Unknown paths redirect home. The oracle is queried on every call.
    pub fn resolve(&self, path: &str, oracle: &dyn SessionOracle) -> Resolution {
        let Some(spec) = self.find(path) else {
            return Resolution::Redirect { to: HOME_PATH };
        };

        if !spec.access.requires_session() {
            return Resolution::Render {
                view: spec.view,
                shell_role: None,
            };
        }

        if let Some(redirect) = Resolution::from_decision(RouteGuard::check(oracle)) {
            return redirect;
        }

        if let Access::Roles(guard) = &spec.access {
            if let Some(redirect) = Resolution::from_decision(guard.check(oracle)) {
                return redirect;
            }
        }

        Resolution::Render {
            view: spec.view,
            shell_role: Some(oracle.role().unwrap_or(DEFAULT_SHELL_ROLE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::oracle::StaticOracle;

    #[test]
    fn test_standard_table_has_single_login_route() {
        let table = RouteTable::standard();
        let logins = table.routes().iter().filter(|r| r.path == "/login").count();
        assert_eq!(logins, 1);
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut table = RouteTable::standard();
        let result = table.insert(RouteSpec::new("/login", View::Login, Access::Public));
        assert_eq!(result, Err(RouteError::DuplicatePath("/login".to_string())));
    }

    #[test]
    fn test_relative_route_rejected() {
        let result = RouteTable::new().with_route(RouteSpec::new("login", View::Login, Access::Public));
        assert!(matches!(result, Err(RouteError::RelativePath(_))));
    }

    #[test]
    fn test_trailing_slash_stored_normalized() {
        let table = RouteTable::standard()
            .with_route(RouteSpec::new(
                "/dashboard/extra/",
                View::Settings,
                Access::Authenticated,
            ))
            .unwrap();

        assert!(table.routes().iter().any(|r| r.path == "/dashboard/extra"));
        let mentor = StaticOracle::signed_in(Role::Mentor);
        for path in ["/dashboard/extra", "/dashboard/extra/"] {
            assert_eq!(
                table.resolve(path, &mentor),
                Resolution::Render {
                    view: View::Settings,
                    shell_role: Some(Role::Mentor),
                }
            );
        }
    }

    #[test]
    fn test_trailing_slash_duplicate_rejected() {
        let result = RouteTable::standard().with_route(RouteSpec::new(
            "/dashboard/settings/",
            View::Settings,
            Access::Authenticated,
        ));
        assert_eq!(
            result.err(),
            Some(RouteError::DuplicatePath("/dashboard/settings".to_string()))
        );
    }

    #[test]
    fn test_parameter_segments_rejected() {
        for path in ["/dashboard/:id", "/files/*rest", "/dashboard/:id/edit"] {
            let result =
                RouteTable::new().with_route(RouteSpec::new(path, View::Dashboard, Access::Authenticated));
            assert_eq!(
                result.err(),
                Some(RouteError::ParameterSegment(path.to_string())),
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_reserved_paths_rejected() {
        for path in ["/health", "/api/resolve", "/logout", "/health/"] {
            let result = RouteTable::standard().with_route(RouteSpec::new(path, View::Home, Access::Public));
            assert!(matches!(result, Err(RouteError::Reserved(_))), "{}", path);
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/dashboard/"), "/dashboard");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/login"), "/login");
    }

    #[test]
    fn test_public_routes_render_without_session() {
        let table = RouteTable::standard();
        let oracle = StaticOracle::anonymous();
        for path in ["/", "/login", "/register", "/forgot-password", "/reset-password"] {
            assert!(matches!(
                table.resolve(path, &oracle),
                Resolution::Render { shell_role: None, .. }
            ));
        }
    }

    #[test]
    fn test_anonymous_dashboard_goes_to_login() {
        let table = RouteTable::standard();
        let oracle = StaticOracle::anonymous();
        for path in ["/dashboard", "/dashboard/resume", "/dashboard/mentors"] {
            assert_eq!(
                table.resolve(path, &oracle),
                Resolution::Redirect { to: "/login" }
            );
        }
    }

    #[test]
    fn test_signed_in_student_reaches_mentors() {
        let table = RouteTable::standard();
        let resolution = table.resolve("/dashboard/mentors", &StaticOracle::signed_in(Role::Student));
        assert_eq!(
            resolution,
            Resolution::Render {
                view: View::Mentors,
                shell_role: Some(Role::Student),
            }
        );
    }

    #[test]
    fn test_signed_in_without_role() {
        let table = RouteTable::standard();
        let oracle = StaticOracle {
            authenticated: true,
            role: None,
        };

        // The shell falls back to the student layout.
        assert_eq!(
            table.resolve("/dashboard", &oracle),
            Resolution::Render {
                view: View::Dashboard,
                shell_role: Some(Role::Student),
            }
        );
        // Role-wrapped sub-views send the viewer home.
        assert_eq!(
            table.resolve("/dashboard/webinars", &oracle),
            Resolution::Redirect { to: "/" }
        );
    }

    #[test]
    fn test_mentor_only_route_sends_student_home() {
        let table = RouteTable::standard()
            .with_route(RouteSpec::new(
                "/dashboard/webinars/new",
                View::Webinars,
                Access::Roles(RoleGuard::new([Role::Mentor])),
            ))
            .unwrap();

        assert_eq!(
            table.resolve("/dashboard/webinars/new", &StaticOracle::signed_in(Role::Student)),
            Resolution::Redirect { to: "/" }
        );
        assert!(matches!(
            table.resolve("/dashboard/webinars/new", &StaticOracle::signed_in(Role::Mentor)),
            Resolution::Render { .. }
        ));
    }

    #[test]
    fn test_unknown_path_goes_home() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve("/nowhere", &StaticOracle::signed_in(Role::Mentor)),
            Resolution::Redirect { to: "/" }
        );
    }

    #[test]
    fn test_trailing_slash_matches() {
        let table = RouteTable::standard();
        assert!(matches!(
            table.resolve("/dashboard/settings/", &StaticOracle::signed_in(Role::Mentor)),
            Resolution::Render {
                view: View::Settings,
                ..
            }
        ));
    }

    #[test]
    fn test_view_slug_matches_serde() {
        for spec in RouteTable::standard().routes() {
            let json = serde_json::to_value(spec.view).unwrap();
            assert_eq!(json, spec.view.slug());
        }
    }

    #[test]
    fn test_resolution_json() {
        let json = serde_json::to_value(Resolution::Redirect { to: "/login" }).unwrap();
        assert_eq!(json["outcome"], "redirect");
        assert_eq!(json["to"], "/login");
    }
}
