//! # CareerVerse HTTP Server Module
//!
//! Serves the portal over HTTP. Every route from the portal's route table
//! is mounted with its guards; redirects answer before any view renders.
//!
//! # Endpoints
//!
//! - `/`, `/login`, `/register`, `/forgot-password`, `/reset-password` - public pages
//! - `/dashboard/*` - authenticated shell and its sub-views
//! - `POST /logout` - end the session and return to `/`
//! - `/api/resolve?path=` - guard decision as JSON
//! - `/health` - health check

pub mod config;
pub mod html;
pub mod portal_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use portal_routes::{portal_routes, PortalState};
pub use server::HttpServer;
