use std::sync::Arc;

use tauri::State;

use crate::api::types::EnvVar;
use crate::commands::get_client;
use crate::error::AppError;
use crate::AppState;

#[tauri::command]
pub async fn load_env_vars(state: State<'_, Arc<AppState>>) -> Result<Vec<EnvVar>, AppError> {
    let client = get_client(&state).await?;
    client.env_vars().await
}

/// Replace the bot's environment settings. Rows with an empty key are
/// dropped before sending; the backend's reply (a restart reminder) is
/// returned for display. The frontend confirms before invoking this.
#[tauri::command]
pub async fn save_env_vars(
    state: State<'_, Arc<AppState>>,
    vars: Vec<EnvVar>,
) -> Result<String, AppError> {
    let vars = normalize_env_vars(vars);

    let client = get_client(&state).await?;
    let message = client.save_env_vars(&vars).await?;
    tracing::info!(count = vars.len(), "Environment settings saved");
    Ok(message)
}

fn normalize_env_vars(vars: Vec<EnvVar>) -> Vec<EnvVar> {
    vars.into_iter()
        .map(|v| EnvVar {
            key: v.key.trim().to_string(),
            value: v.value.trim().to_string(),
        })
        .filter(|v| !v.key.is_empty())
        .collect()
}
