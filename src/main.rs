use std::env;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("PAYROLL_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config/fr".to_string());
    let bind_addr = env::var("PAYROLL_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let config = ConfigLoader::load(&config_dir).map_err(|e| e.to_string())?;
    info!(
        config_dir = %config_dir,
        regime = %config.regime().code,
        rate_tables = config.config().rates().len(),
        conventions = config.conventions().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
    info!(bind = %bind_addr, "Payroll engine listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| e.to_string())
}
