use std::sync::Arc;

use tauri::State;

use crate::api::types::BotStatus;
use crate::commands::get_client;
use crate::error::AppError;
use crate::AppState;

#[tauri::command]
pub async fn start_bot(state: State<'_, Arc<AppState>>) -> Result<String, AppError> {
    let client = get_client(&state).await?;
    let message = client.start_bot().await?;
    tracing::info!("Bot start requested");
    Ok(message)
}

/// The frontend confirms before invoking this.
#[tauri::command]
pub async fn stop_bot(state: State<'_, Arc<AppState>>) -> Result<String, AppError> {
    let client = get_client(&state).await?;
    let message = client.stop_bot().await?;
    tracing::info!("Bot stop requested");
    Ok(message)
}

/// The frontend confirms before invoking this.
#[tauri::command]
pub async fn restart_bot(state: State<'_, Arc<AppState>>) -> Result<String, AppError> {
    let client = get_client(&state).await?;
    let message = client.restart_bot().await?;
    tracing::info!("Bot restart requested");
    Ok(message)
}

#[tauri::command]
pub async fn bot_status(state: State<'_, Arc<AppState>>) -> Result<BotStatus, AppError> {
    let client = get_client(&state).await?;
    client.bot_status().await
}
