//! Axum-based HTTP surface of the alert dispatcher, with body limits and
//! request timeouts.
//!
//! The wire contract is a single request operation with no required payload:
//! `POST /alert` means "a confirmed event occurred now". The response is a
//! fixed acknowledgement regardless of individual channel outcomes — the
//! detector only needs to know the signal was received and acted upon.

mod handlers;

use crate::channels::factory;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use handlers::{handle_alert, handle_health};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size — the alert signal carries no payload, so
/// anything beyond a few KB is noise.
pub const MAX_BODY_SIZE: usize = 4096;
/// Request timeout — prevents slow-loris requests tying up the dispatcher
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fixed acknowledgement returned for every received alert.
pub const ACK_STATUS: &str = "alert received, notifications triggered";

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Run the dispatcher gateway on the configured host/port.
pub async fn run_gateway(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_gateway_with_listener(listener, config).await
}

/// Run the dispatcher gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: Config,
) -> Result<()> {
    let channels = factory::build_channels(&config.channels);

    if channels.is_empty() {
        tracing::warn!(
            "no notification channels configured; alerts will be acknowledged but not delivered"
        );
    }
    for channel in &channels {
        if let Err(e) = channel.validate() {
            tracing::warn!(
                channel = channel.name(),
                error = %e,
                "channel registered but not fully configured"
            );
        }
    }

    let dispatcher = Arc::new(Dispatcher::new(
        channels,
        Duration::from_secs(config.gateway.channel_timeout_secs),
    ));
    let state = AppState { dispatcher };

    let app = Router::new()
        .route("/alert", post(handle_alert))
        .route("/health", get(handle_health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .with_state(state);

    let addr = listener.local_addr()?;
    tracing::info!("alert dispatcher listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
