use std::sync::Arc;

use tauri::State;

use crate::commands::get_client;
use crate::error::AppError;
use crate::AppState;

/// The last 100 lines of the bot's log file.
#[tauri::command]
pub async fn fetch_logs(state: State<'_, Arc<AppState>>) -> Result<Vec<String>, AppError> {
    let client = get_client(&state).await?;
    client.logs().await
}
