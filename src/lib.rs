//! careerverse - role-gated career development portal
//!
//! The [`portal`] module holds the route guards, navigation catalog and
//! shell composition. [`auth`] answers who the viewer is, [`http_server`]
//! serves it all over HTTP.

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod portal;
