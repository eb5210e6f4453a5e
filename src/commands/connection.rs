use std::sync::Arc;

use serde::Serialize;
use tauri::State;
use ts_rs::TS;
use url::Url;

use crate::api::{self, BotClient};
use crate::error::AppError;
use crate::validation::require_non_empty;
use crate::AppState;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ConnectionInfo {
    pub url: String,
    pub is_connected: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate that a backend URL is well-formed and uses a safe scheme.
///
/// Enforces HTTPS for all remote hosts. HTTP is only permitted for loopback
/// addresses (`localhost`, `127.0.0.1`, `[::1]`) to support bots running on
/// the same machine.
fn validate_backend_url(raw: &str) -> Result<Url, AppError> {
    let parsed =
        Url::parse(raw).map_err(|e| AppError::Validation(format!("Invalid backend URL: {e}")))?;

    match parsed.scheme() {
        "https" => Ok(parsed),
        "http" => {
            let host = parsed.host_str().unwrap_or("");
            if host == "localhost" || host == "127.0.0.1" || host == "[::1]" {
                Ok(parsed)
            } else {
                Err(AppError::Validation(
                    "HTTP is only allowed for localhost. Use HTTPS for remote bots \
                     to protect the admin session in transit."
                        .into(),
                ))
            }
        }
        other => Err(AppError::Validation(format!(
            "Unsupported URL scheme \"{other}://\". Use HTTPS (or HTTP for localhost)."
        ))),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Connect to a bot backend by URL. Verifies the backend is reachable, then
/// stores the URL (and optional memory password) in the OS keyring and
/// initialises the in-memory client.
#[tauri::command]
pub async fn connect_backend(
    state: State<'_, Arc<AppState>>,
    url: String,
    memory_password: Option<String>,
) -> Result<(), AppError> {
    require_non_empty("Backend URL", &url)?;

    let parsed = validate_backend_url(url.trim())?;
    let normalized = parsed.as_str().trim_end_matches('/').to_string();

    let client = Arc::new(BotClient::new(normalized.clone()));

    // Verify the backend is actually reachable before storing anything
    client.bot_status().await.map_err(|e| {
        AppError::Operation(format!("Bot backend is not reachable: {e}"))
    })?;

    api::config::store_connection(&normalized, memory_password.as_deref())
        .map_err(AppError::Internal)?;

    *state.client.lock().await = Some(client);

    tracing::info!(url = %normalized, "Connected to bot backend");
    Ok(())
}

/// Reconnect to the bot backend using the URL already stored in the OS
/// keyring. Called automatically on startup so the operator doesn't have to
/// re-enter the address every session.
#[tauri::command]
pub async fn reconnect_from_keyring(state: State<'_, Arc<AppState>>) -> Result<(), AppError> {
    // Already connected — nothing to do
    if state.client.lock().await.is_some() {
        return Ok(());
    }

    let (url, _) = api::config::load_connection().ok_or(AppError::NotConnected)?;

    // Validate the stored URL in case it predates URL validation
    validate_backend_url(&url)?;

    let client = Arc::new(BotClient::new(url.clone()));

    client.bot_status().await.map_err(|e| {
        AppError::Operation(format!("Bot backend is not reachable: {e}"))
    })?;

    *state.client.lock().await = Some(client);

    tracing::info!(url = %url, "Auto-reconnected to bot backend from keyring");
    Ok(())
}

/// Disconnect from the bot backend: clears the keyring entry, drops the
/// in-memory client, and discards any open editor session.
#[tauri::command]
pub async fn disconnect_backend(state: State<'_, Arc<AppState>>) -> Result<(), AppError> {
    api::config::clear_connection();
    *state.client.lock().await = None;
    state.editor.lock().await.clear();

    tracing::info!("Disconnected from bot backend");
    Ok(())
}

/// Return the current connection configuration, if any.
#[tauri::command]
pub async fn get_connection(
    state: State<'_, Arc<AppState>>,
) -> Result<Option<ConnectionInfo>, AppError> {
    let is_connected = state.client.lock().await.is_some();

    match api::config::load_connection() {
        Some((url, _)) => Ok(Some(ConnectionInfo { url, is_connected })),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_urls_are_accepted() {
        assert!(validate_backend_url("https://bot.example.com:8080").is_ok());
    }

    #[test]
    fn http_is_loopback_only() {
        assert!(validate_backend_url("http://localhost:8080").is_ok());
        assert!(validate_backend_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_backend_url("http://bot.example.com").is_err());
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(validate_backend_url("ftp://bot.example.com").is_err());
        assert!(validate_backend_url("not a url").is_err());
    }
}
