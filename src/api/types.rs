use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::editor::ChatMessage;

// ============================================================================
// Response types
// ============================================================================

/// One row of the conversation list: the memory key plus the server's
/// last-updated stamp (read-only to the client).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatSummary {
    pub key: String,
    #[serde(default)]
    pub updated: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryListResponse {
    #[serde(default)]
    pub chats: Vec<ChatSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryViewResponse {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// The backend's generic mutation reply. `message` is used by the control
/// and commit endpoints, `error` by the memory mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Ack {
    /// The human-readable reason carried by a failed ack.
    pub fn reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Unknown backend error".into())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub groups: u64,
}

/// One sample of the bot host's resource usage.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SystemStats {
    pub cpu: f64,
    pub memory_percent: f64,
}

/// Message-volume history for the dashboard chart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RangeStats {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResponse {
    #[serde(default)]
    pub content: String,
}

/// The fun-response tables, stored as two string arrays.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FunTables {
    #[serde(default)]
    pub roasts: Vec<String>,
    #[serde(default)]
    pub motivations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvResponse {
    #[serde(default)]
    pub vars: Vec<EnvVar>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BotStatus {
    /// `"running"` or `"stopped"`.
    pub status: String,
}

impl BotStatus {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

// ============================================================================
// Request bodies (not exported to TS)
// ============================================================================

#[derive(Serialize)]
pub(crate) struct SaveMemoryBody<'a> {
    pub key: &'a str,
    pub messages: &'a [ChatMessage],
}

#[derive(Serialize)]
pub(crate) struct KeyBody<'a> {
    pub key: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PasswordBody<'a> {
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ContentBody<'a> {
    pub content: &'a str,
}

#[derive(Serialize)]
pub(crate) struct EnvSaveBody<'a> {
    pub vars: &'a [EnvVar],
}
