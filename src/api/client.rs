use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::types::*;
use crate::editor::ChatMessage;
use crate::error::AppError;

/// Which plain-text document an editor tab targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Prompt,
    Badwords,
}

impl DocumentKind {
    fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Prompt => "prompt",
            DocumentKind::Badwords => "badwords",
        }
    }
}

/// HTTP client that wraps all bot backend endpoints.
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
}

impl BotClient {
    /// Create a new `BotClient` for the given backend base URL.
    ///
    /// The underlying `reqwest::Client` is configured with a 30-second timeout.
    pub fn new(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --------------------------------------------------------------------
    // Private HTTP helpers
    // --------------------------------------------------------------------

    /// Check the status code (403 means the memory panel is locked) and
    /// deserialize the JSON response.
    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if response.status() == StatusCode::FORBIDDEN {
            return Err(AppError::AccessDenied);
        }
        Ok(response.error_for_status()?.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.read_json(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.read_json(response).await
    }

    /// POST with an empty body (the control and commit endpoints).
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.read_json(response).await
    }

    /// Turn a failed ack into an `Operation` error; a successful one into
    /// its optional message.
    fn check_ack(ack: Ack) -> Result<Option<String>, AppError> {
        if ack.success {
            Ok(ack.message)
        } else {
            Err(AppError::Operation(ack.reason()))
        }
    }

    // --------------------------------------------------------------------
    // Memory
    // --------------------------------------------------------------------

    /// `GET /api/memory/list` -- all tracked conversations with their
    /// last-updated stamps.
    pub async fn memory_list(&self) -> Result<Vec<ChatSummary>, AppError> {
        let response: MemoryListResponse = self.get_json("/api/memory/list").await?;
        Ok(response.chats)
    }

    /// `GET /api/memory/view/{key}` -- the full transcript for one key.
    pub async fn memory_view(&self, key: &str) -> Result<Vec<ChatMessage>, AppError> {
        let path = format!("/api/memory/view/{}", urlencoding::encode(key));
        let response: MemoryViewResponse = self.get_json(&path).await?;
        Ok(response.messages)
    }

    /// `POST /api/memory/save` -- atomically replace one conversation's
    /// stored sequence with `messages`.
    pub async fn memory_save(
        &self,
        key: &str,
        messages: &[ChatMessage],
    ) -> Result<(), AppError> {
        let ack: Ack = self
            .post_json("/api/memory/save", &SaveMemoryBody { key, messages })
            .await?;
        Self::check_ack(ack).map(|_| ())
    }

    /// `POST /api/memory/delete` -- remove one conversation server-side.
    pub async fn memory_delete(&self, key: &str) -> Result<(), AppError> {
        let ack: Ack = self.post_json("/api/memory/delete", &KeyBody { key }).await?;
        Self::check_ack(ack).map(|_| ())
    }

    /// `POST /api/memory/commit` -- force-flush the bot's memory cache to
    /// disk. Returns the server's status message.
    pub async fn memory_commit(&self) -> Result<String, AppError> {
        let ack: Ack = self.post_empty("/api/memory/commit").await?;
        Ok(Self::check_ack(ack)?.unwrap_or_else(|| "Memory committed".into()))
    }

    /// `POST /api/memory/auth` -- unlock the memory panel with the access
    /// password. A wrong password is a normal `false`, not an error.
    pub async fn memory_auth(&self, password: &str) -> Result<bool, AppError> {
        let response: AuthResponse = self
            .post_json("/api/memory/auth", &PasswordBody { password })
            .await?;
        Ok(response.success)
    }

    /// `GET /api/memory/range-stats` -- message-volume history.
    pub async fn memory_range_stats(&self) -> Result<RangeStats, AppError> {
        self.get_json("/api/memory/range-stats").await
    }

    // --------------------------------------------------------------------
    // Dashboard data
    // --------------------------------------------------------------------

    /// `GET /api/stats` -- headline dashboard numbers.
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        self.get_json("/api/stats").await
    }

    /// `GET /api/stats/system` -- one CPU/RAM sample of the bot host.
    pub async fn system_stats(&self) -> Result<SystemStats, AppError> {
        self.get_json("/api/stats/system").await
    }

    /// `GET /api/logs` -- the last 100 log lines.
    pub async fn logs(&self) -> Result<Vec<String>, AppError> {
        let response: LogsResponse = self.get_json("/api/logs").await?;
        Ok(response.logs)
    }

    // --------------------------------------------------------------------
    // Data editors
    // --------------------------------------------------------------------

    /// `GET /api/data/{prompt|badwords}` -- a plain-text document.
    pub async fn document(&self, kind: DocumentKind) -> Result<String, AppError> {
        let path = format!("/api/data/{}", kind.as_str());
        let response: DocumentResponse = self.get_json(&path).await?;
        Ok(response.content)
    }

    /// `POST /api/data/{prompt|badwords}` -- replace a plain-text document.
    pub async fn save_document(
        &self,
        kind: DocumentKind,
        content: &str,
    ) -> Result<(), AppError> {
        let path = format!("/api/data/{}", kind.as_str());
        let ack: Ack = self.post_json(&path, &ContentBody { content }).await?;
        Self::check_ack(ack).map(|_| ())
    }

    /// `GET /api/data/fun` -- the roast/motivation tables.
    pub async fn fun_tables(&self) -> Result<FunTables, AppError> {
        self.get_json("/api/data/fun").await
    }

    /// `POST /api/data/fun` -- replace the roast/motivation tables.
    pub async fn save_fun_tables(&self, tables: &FunTables) -> Result<(), AppError> {
        let ack: Ack = self.post_json("/api/data/fun", tables).await?;
        Self::check_ack(ack).map(|_| ())
    }

    // --------------------------------------------------------------------
    // Settings
    // --------------------------------------------------------------------

    /// `GET /api/env` -- the bot's environment settings.
    pub async fn env_vars(&self) -> Result<Vec<EnvVar>, AppError> {
        let response: EnvResponse = self.get_json("/api/env").await?;
        Ok(response.vars)
    }

    /// `POST /api/env` -- replace the environment settings. Returns the
    /// server's message (a restart reminder).
    pub async fn save_env_vars(&self, vars: &[EnvVar]) -> Result<String, AppError> {
        let ack: Ack = self.post_json("/api/env", &EnvSaveBody { vars }).await?;
        Ok(Self::check_ack(ack)?.unwrap_or_else(|| "Settings saved".into()))
    }

    // --------------------------------------------------------------------
    // Process control
    // --------------------------------------------------------------------

    /// `POST /api/control/start`.
    pub async fn start_bot(&self) -> Result<String, AppError> {
        let ack: Ack = self.post_empty("/api/control/start").await?;
        Ok(Self::check_ack(ack)?.unwrap_or_else(|| "Bot start signal sent".into()))
    }

    /// `POST /api/control/stop`.
    pub async fn stop_bot(&self) -> Result<String, AppError> {
        let ack: Ack = self.post_empty("/api/control/stop").await?;
        Ok(Self::check_ack(ack)?.unwrap_or_else(|| "Bot stopped".into()))
    }

    /// `POST /api/control/restart`.
    pub async fn restart_bot(&self) -> Result<String, AppError> {
        let ack: Ack = self.post_empty("/api/control/restart").await?;
        Ok(Self::check_ack(ack)?.unwrap_or_else(|| "Restart signal sent".into()))
    }

    /// `GET /api/control/status` -- whether the worker process is alive.
    pub async fn bot_status(&self) -> Result<BotStatus, AppError> {
        self.get_json("/api/control/status").await
    }
}
