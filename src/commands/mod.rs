pub mod connection;
pub mod control;
pub mod data;
pub mod env;
pub mod logs;
pub mod memory;
pub mod stats;

use std::sync::Arc;

use crate::api::BotClient;
use crate::error::AppError;
use crate::AppState;

pub(crate) async fn get_client(state: &AppState) -> Result<Arc<BotClient>, AppError> {
    state.client.lock().await.clone().ok_or(AppError::NotConnected)
}
