//! Portal HTTP Routes
//!
//! Builds the axum router from the portal's route table. Guards run as
//! route middleware, so a redirect response is produced before the view
//! handler is ever invoked.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query, Request, State},
    http::{header, HeaderValue, StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::html::{render_public_page, render_shell_page};
use crate::auth::{RequestSession, SessionAuthority, SessionConfig};
use crate::portal::guard::{NavigationCommand, HOME_PATH};
use crate::portal::routes::{normalize_path, DEFAULT_SHELL_ROLE, LOGOUT_PATH, RESOLVE_API_PATH};
use crate::portal::{
    end_session, render, Access, Resolution, RoleGuard, RouteGuard, RouteTable, SessionOracle,
    ShellView, View,
};

/// Shared portal state
pub struct PortalState {
    pub authority: SessionAuthority,
    pub table: RouteTable,
}

impl PortalState {
    pub fn new(session: &SessionConfig, table: RouteTable) -> Self {
        Self {
            authority: SessionAuthority::new(session),
            table,
        }
    }
}

/// Portal routes with shared state
pub fn portal_routes(state: Arc<PortalState>) -> Router {
    let mut router = Router::new();

    for spec in state.table.routes() {
        let view = spec.view;
        let in_shell = spec.access.requires_session();

        let mut route = get(
            move |Extension(session): Extension<RequestSession>, uri: Uri| async move {
                page_handler(view, in_shell, &session, uri.path())
            },
        );
        // Layers wrap outward: the session check runs before the role check.
        if let Access::Roles(guard) = &spec.access {
            route = route.layer(middleware::from_fn_with_state(guard.clone(), require_role));
        }
        if in_shell {
            route = route.layer(middleware::from_fn(require_session));
        }

        router = router.route(&spec.path, route);
    }

    router
        .route(LOGOUT_PATH, post(logout_handler))
        .route(RESOLVE_API_PATH, get(resolve_handler))
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(state.clone(), attach_session))
        .with_state(state)
}

// ==================
// Middleware
// ==================

/// Build the request's Session Oracle and make it available to guards
async fn attach_session(
    State(state): State<Arc<PortalState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = state.authority.session_from_headers(request.headers());
    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Route Guard: the authenticated area requires a live session
async fn require_session(
    Extension(session): Extension<RequestSession>,
    request: Request,
    next: Next,
) -> Response {
    match RouteGuard::check(&session).command() {
        Some(command) => {
            tracing::debug!(path = %request.uri().path(), to = command.target(), "not signed in");
            navigate(command)
        }
        None => next.run(request).await,
    }
}

/// Role Guard: the sub-view requires one of the allowed roles
async fn require_role(
    State(guard): State<RoleGuard>,
    Extension(session): Extension<RequestSession>,
    request: Request,
    next: Next,
) -> Response {
    match guard.check(&session).command() {
        Some(command) => {
            tracing::debug!(
                path = %request.uri().path(),
                role = ?session.role(),
                to = command.target(),
                "role not allowed"
            );
            navigate(command)
        }
        None => next.run(request).await,
    }
}

// ==================
// Navigation responses
// ==================

/// Turn a navigation command into an HTTP response
///
/// Both kinds answer `303 See Other`: the browser replaces the blocked
/// location instead of adding a history entry. Redirects carry no body, so
/// guarded content never reaches the client.
pub fn navigate(command: NavigationCommand) -> Response {
    Redirect::to(command.target()).into_response()
}

fn end_session_response(command: NavigationCommand, cookie_name: &str) -> Response {
    let mut response = navigate(command);
    let expired = format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        cookie_name
    );
    if let Ok(value) = HeaderValue::from_str(&expired) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response.headers_mut().insert(
        "clear-site-data",
        HeaderValue::from_static("\"cache\", \"storage\""),
    );
    response
}

// ==================
// Handlers
// ==================

fn page_handler(view: View, in_shell: bool, session: &RequestSession, path: &str) -> Html<String> {
    if !in_shell {
        return Html(render_public_page(view));
    }

    let role = session.role().unwrap_or(DEFAULT_SHELL_ROLE);
    let shell = render(role, normalize_path(path), view);
    Html(render_shell_page(&shell))
}

/// Logout: end the session, then hard-navigate to the root
async fn logout_handler(
    State(state): State<Arc<PortalState>>,
    Extension(session): Extension<RequestSession>,
) -> Response {
    let command = end_session(&session);
    end_session_response(command, state.authority.cookie_name())
}

/// Unknown paths: canonicalize a trailing slash, otherwise go home
async fn fallback_handler(State(state): State<Arc<PortalState>>, uri: Uri) -> Response {
    let path = uri.path();
    let canonical = normalize_path(path);

    if canonical != path && state.table.find(canonical).is_some() {
        return Redirect::to(canonical).into_response();
    }

    tracing::debug!(path = %path, "no such route");
    navigate(NavigationCommand::Replace { to: HOME_PATH })
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

/// Resolution for a client-side router
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub path: String,
    pub resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<NavigationCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<ShellView<View>>,
}

impl IntoResponse for ResolveResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Run a path through the guard chain for the requesting session
async fn resolve_handler(
    State(state): State<Arc<PortalState>>,
    Extension(session): Extension<RequestSession>,
    Query(query): Query<ResolveQuery>,
) -> ResolveResponse {
    let path = normalize_path(&query.path).to_string();
    let resolution = state.table.resolve(&path, &session);

    let (command, shell) = match &resolution {
        Resolution::Redirect { to } => (Some(NavigationCommand::Replace { to: *to }), None),
        Resolution::Render {
            view,
            shell_role: Some(role),
        } => (None, Some(render(*role, &path, *view))),
        Resolution::Render { .. } => (None, None),
    };

    ResolveResponse {
        path,
        resolution,
        command,
        shell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_is_see_other() {
        let response = navigate(NavigationCommand::Replace { to: "/login" });
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[test]
    fn test_end_session_expires_cookie() {
        let response =
            end_session_response(NavigationCommand::EndSession { to: "/" }, "careerverse_session");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("careerverse_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(response.headers().contains_key("clear-site-data"));
    }
}
