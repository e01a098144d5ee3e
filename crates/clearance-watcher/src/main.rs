//! Clearance room watcher binary.
//!
//! Starts the ingestion/health HTTP server with structured logging and
//! graceful shutdown on SIGTERM/SIGINT. Wires the phrase catalog,
//! suppression ledger, and dispatch coordinator to the production
//! incident-API publisher and the LiveKit SIP call initiator.

use clearance_dispatch::{
    DispatchCoordinator, HttpEventPublisher, LiveKitCallInitiator, SipCallConfig,
};
use clearance_triggers::{Matcher, PhraseCatalog, SuppressionLedger};
use clearance_watcher::{app, config, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("CLEARANCE_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — the watcher cannot start without valid config");
    config
        .validate()
        .expect("incomplete configuration — room-service credentials are required");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    let side_effect_timeout = Duration::from_secs(config.incident.timeout_secs);

    // External collaborators
    let publisher = HttpEventPublisher::new(&config.incident.base_url, side_effect_timeout)
        .expect("failed to build incident API client — check incident.base_url in config");
    let call_initiator = LiveKitCallInitiator::new(
        &config.livekit.url,
        config.livekit.api_key.clone(),
        config.livekit.api_secret.clone(),
        SipCallConfig {
            trunk_id: config.telephony.trunk_id.clone(),
            alert_room: config.telephony.alert_room.clone(),
            phone_number: config.telephony.phone_number.clone(),
        },
        side_effect_timeout,
    )
    .expect("failed to build room-service client — check livekit section in config");

    if config.telephony.trunk_id.is_none() {
        tracing::warn!("no SIP trunk configured; shots-fired calls will be skipped");
    }

    // Detection core
    let ledger = SuppressionLedger::new(
        config
            .triggers
            .suppression_window_secs
            .map(Duration::from_secs),
    );
    let coordinator =
        DispatchCoordinator::new(ledger, Arc::new(publisher), Arc::new(call_initiator))
            .with_side_effect_timeout(side_effect_timeout);

    let state = AppState {
        matcher: Arc::new(Matcher::new(PhraseCatalog::default())),
        coordinator: Arc::new(coordinator),
    };

    // Build application
    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, "starting clearance room watcher");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address — is another process using this port?");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("clearance room watcher shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
