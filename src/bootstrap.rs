use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use http::Method;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::{catch_panic_layer, setup_panic_hook},
    routes::{auth_routes, user_routes},
    utils::{init_logger, load_config},
    AppConfig, AppState,
};

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "userdir")]
#[command(author, version, about = "A small in-memory user directory service.")]
pub struct CliArgs {
    /// Server bind address (overrides config file)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Server port (overrides config file)
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Environment (development, staging, production)
    #[arg(short = 'E', long, default_value = "development")]
    pub env: String,

    /// Configuration file path
    #[arg(short = 'C', long, default_value = "config.toml")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, default_value = "info")]
    pub log_level: String,
}

/// Application bootstrap result containing all initialized components
pub struct BootstrapResult {
    pub app: Router,
    pub bind_addr: String,
}

/// Initialize application logger
pub fn init_logging(log_level: &str) {
    init_logger(log_level);
}

/// Setup panic hook for graceful panic handling
pub fn setup_panic_handler() {
    setup_panic_hook();
}

/// Load and merge configuration from file and CLI arguments
pub fn load_app_config(cli_args: &CliArgs) -> Result<AppConfig> {
    let mut app_config = load_config(&cli_args.config, &cli_args.env)
        .context("Failed to load application configuration")?;

    if let Some(host) = &cli_args.host {
        app_config.server.host = host.clone();
    }
    if let Some(port) = cli_args.port {
        app_config.server.port = port;
    }

    Ok(app_config)
}

/// Configure CORS layer
pub fn configure_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// Build application router with all middleware
pub fn build_app_router(state: AppState) -> Router {
    Router::new()
        .merge(user_routes())
        .merge(auth_routes())
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
        .layer(configure_cors())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Bootstrap the entire application
pub fn bootstrap(cli_args: CliArgs) -> Result<BootstrapResult> {
    tracing::info!("Starting userdir in {} mode", cli_args.env);

    let app_config = load_app_config(&cli_args)?;
    let bind_addr = format!("{}:{}", app_config.server.host, app_config.server.port);

    if app_config.directory.redact_lookups {
        tracing::info!("Passwords are redacted from user lookups");
    }

    let state = AppState::new(app_config);
    let app = build_app_router(state);

    Ok(BootstrapResult { app, bind_addr })
}

/// Start HTTP server with graceful shutdown
pub async fn start_server(bootstrap_result: BootstrapResult) -> Result<()> {
    let BootstrapResult { app, bind_addr } = bootstrap_result;

    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Server is ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("Server shutdown completed");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C signal, initiating graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("Received SIGTERM signal, initiating graceful shutdown");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::parse_from(["userdir"]);
        assert_eq!(args.env, "development");
        assert_eq!(args.config, "config.toml");
        assert_eq!(args.log_level, "info");
        assert!(args.host.is_none());
        assert!(args.port.is_none());
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = CliArgs::parse_from([
            "userdir",
            "-H",
            "127.0.0.1",
            "-P",
            "8081",
            "-C",
            "missing-config.toml",
        ]);
        let config = load_app_config(&args).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_bootstrap_bind_addr() {
        let args = CliArgs::parse_from(["userdir", "-P", "4000", "-C", "missing-config.toml"]);
        let result = bootstrap(args).unwrap();
        assert_eq!(result.bind_addr, "0.0.0.0:4000");
    }
}
