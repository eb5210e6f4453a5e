use std::sync::Arc;

use tauri::State;

use crate::api::types::{DashboardStats, RangeStats};
use crate::commands::get_client;
use crate::error::AppError;
use crate::AppState;

#[tauri::command]
pub async fn dashboard_stats(state: State<'_, Arc<AppState>>) -> Result<DashboardStats, AppError> {
    let client = get_client(&state).await?;
    client.stats().await
}

/// Message-volume history for the dashboard chart. Fetched once per panel
/// open rather than polled.
#[tauri::command]
pub async fn message_volume(state: State<'_, Arc<AppState>>) -> Result<RangeStats, AppError> {
    let client = get_client(&state).await?;
    client.memory_range_stats().await
}
