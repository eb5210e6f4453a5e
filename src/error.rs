use serde::Serialize;

/// App-wide error type. Every fallible command returns `Result<T, AppError>`.
/// Serializes cleanly for Tauri IPC so the frontend gets structured error messages.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The backend answered 403 — the memory panel must swap in its lock screen.
    #[error("Access denied")]
    AccessDenied,

    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend processed the request but reported `success: false`.
    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Not connected to the bot backend")]
    NotConnected,

    #[error("{0}")]
    Internal(String),
}

/// Tauri requires `Serialize` on command return errors.
/// We serialize as `{ error: "...", kind: "..." }` for frontend consumption.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("AppError", 2)?;
        s.serialize_field("error", &self.to_string())?;
        s.serialize_field(
            "kind",
            match self {
                AppError::AccessDenied => "access_denied",
                AppError::Validation(_) => "validation",
                AppError::Operation(_) => "operation",
                AppError::Http(_) => "http",
                AppError::Serde(_) => "serde",
                AppError::NotConnected => "not_connected",
                AppError::Internal(_) => "internal",
            },
        )?;
        s.end()
    }
}
