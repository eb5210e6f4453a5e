//! Background polling loops feeding the frontend's live widgets.
//!
//! Both loops own a clone of the shared state, poll independently, and share
//! nothing with the editor session — an in-flight save never delays a status
//! sample. Poll failures are logged and skipped; the loops never stop.

use std::sync::Arc;
use std::time::Duration;

use tauri::{AppHandle, Emitter};

use crate::api::BotClient;
use crate::AppState;

/// Tauri event carrying one bot-status sample.
pub const EVT_BOT_STATUS: &str = "bot-status";
/// Tauri event carrying one CPU/RAM sample.
pub const EVT_SYSTEM_METRICS: &str = "system-metrics";

const STATUS_POLL_SECS: u64 = 5;
const METRICS_POLL_SECS: u64 = 2;

/// Start both polling loops. Returns immediately.
pub fn start_loops(app: AppHandle, state: Arc<AppState>) {
    tracing::info!(
        "Monitor starting: bot status ({STATUS_POLL_SECS}s) + system metrics ({METRICS_POLL_SECS}s)"
    );

    tokio::spawn({
        let app = app.clone();
        let state = state.clone();
        async move {
            status_loop(app, state).await;
        }
    });

    tokio::spawn(async move {
        metrics_loop(app, state).await;
    });
}

/// The client handle, if a backend is currently connected.
async fn connected_client(state: &AppState) -> Option<Arc<BotClient>> {
    state.client.lock().await.clone()
}

async fn status_loop(app: AppHandle, state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(STATUS_POLL_SECS));
    loop {
        interval.tick().await;

        let Some(client) = connected_client(&state).await else {
            continue;
        };

        match client.bot_status().await {
            Ok(status) => {
                let _ = app.emit(EVT_BOT_STATUS, status);
            }
            Err(e) => {
                tracing::debug!("Bot status poll failed: {}", e);
            }
        }
    }
}

async fn metrics_loop(app: AppHandle, state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(METRICS_POLL_SECS));
    loop {
        interval.tick().await;

        let Some(client) = connected_client(&state).await else {
            continue;
        };

        match client.system_stats().await {
            Ok(sample) => {
                let _ = app.emit(EVT_SYSTEM_METRICS, sample);
            }
            Err(e) => {
                tracing::debug!("System metrics poll failed: {}", e);
            }
        }
    }
}
