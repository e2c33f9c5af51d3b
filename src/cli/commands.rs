//! CLI command implementations

use std::path::Path;

use serde_json::{json, Value};

use crate::config::{PortalConfig, JWT_SECRET_ENV};
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::portal::routes::normalize_path;
use crate::portal::{build_navigation, render, Resolution, Role, RouteTable, StaticOracle};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Nav { role } => write_response(nav(role)?),
        Command::Resolve { path, role } => write_response(resolve(&path, role)?),
    }
}

/// Load the config file, or defaults plus env overrides when none is given
pub fn load_config(config_path: Option<&Path>) -> CliResult<PortalConfig> {
    match config_path {
        Some(path) => Ok(PortalConfig::load(path)?),
        None => {
            let mut config = PortalConfig::default();
            config.apply_env(std::env::var(JWT_SECRET_ENV).ok());
            config.validate()?;
            Ok(config)
        }
    }
}

/// Start the portal server and block until shutdown
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    init_logging(&config.logging)?;
    tracing::info!(
        addr = %config.http.socket_addr(),
        log_format = ?config.logging.format,
        "starting CareerVerse portal"
    );
    if config.uses_development_secret() {
        tracing::warn!(
            env = JWT_SECRET_ENV,
            "using the built-in development JWT secret"
        );
    }

    let server = HttpServer::new(config.http, &config.session);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Sidebar navigation for `role` as JSON
pub fn nav(role: Role) -> CliResult<Value> {
    Ok(json!({
        "role": role,
        "navigation": serde_json::to_value(build_navigation(role))?,
    }))
}

/// Resolution of `path` for a signed-in `role`, or a signed-out viewer
pub fn resolve(path: &str, role: Option<Role>) -> CliResult<Value> {
    let oracle = match role {
        Some(role) => StaticOracle::signed_in(role),
        None => StaticOracle::anonymous(),
    };

    let resolution = RouteTable::standard().resolve(path, &oracle);
    let mut output = json!({
        "path": path,
        "resolution": serde_json::to_value(&resolution)?,
    });

    if let Resolution::Render {
        view,
        shell_role: Some(shell_role),
    } = resolution
    {
        let shell = render(shell_role, normalize_path(path), view);
        output["header_title"] = json!(shell.header_title);
        output["active"] = json!(shell.active_link().map(|link| link.entry.label));
    }

    Ok(output)
}
