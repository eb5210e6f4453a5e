use std::sync::Arc;

use serde::Serialize;
use tauri::State;
use ts_rs::TS;

use crate::api::types::ChatSummary;
use crate::commands::get_client;
use crate::editor::{EditorSnapshot, Role, ViewMode};
use crate::error::AppError;
use crate::AppState;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Result of operations that re-read server state: the fresh conversation
/// list plus, when a conversation is open, its re-loaded snapshot.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct MemoryRefresh {
    pub chats: Vec<ChatSummary>,
    pub snapshot: Option<EditorSnapshot>,
}

// ---------------------------------------------------------------------------
// Access gate
// ---------------------------------------------------------------------------

/// Unlock the memory panel. With no explicit password, falls back to the one
/// remembered in the keyring. A wrong password returns `false` (the lock
/// screen stays); transport problems are errors.
#[tauri::command]
pub async fn memory_unlock(
    state: State<'_, Arc<AppState>>,
    password: Option<String>,
) -> Result<bool, AppError> {
    let client = get_client(&state).await?;

    let password = password
        .filter(|p| !p.is_empty())
        .or_else(|| crate::api::config::load_connection().and_then(|(_, pwd)| pwd))
        .ok_or_else(|| AppError::Validation("Memory password required".into()))?;

    let unlocked = client.memory_auth(&password).await?;
    if unlocked {
        tracing::info!("Memory panel unlocked");
    } else {
        tracing::warn!("Memory unlock rejected by backend");
    }
    Ok(unlocked)
}

// ---------------------------------------------------------------------------
// Conversation list & loading
// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn list_conversations(
    state: State<'_, Arc<AppState>>,
) -> Result<Vec<ChatSummary>, AppError> {
    let client = get_client(&state).await?;
    client.memory_list().await
}

/// Load one conversation into the editor session: fresh working copy, empty
/// selection, page 1, bubble view. A 403 propagates as `AccessDenied` so the
/// frontend swaps in the lock screen instead of rendering.
#[tauri::command]
pub async fn open_conversation(
    state: State<'_, Arc<AppState>>,
    key: String,
) -> Result<EditorSnapshot, AppError> {
    let client = get_client(&state).await?;
    let messages = client.memory_view(&key).await?;

    let mut editor = state.editor.lock().await;
    editor.load(&key, messages);
    Ok(editor.snapshot())
}

/// Re-fetch the conversation list and, if one is open, re-load it too.
/// The one operator-triggered exception to "the working copy is not
/// re-read until save".
#[tauri::command]
pub async fn refresh_memory(state: State<'_, Arc<AppState>>) -> Result<MemoryRefresh, AppError> {
    let client = get_client(&state).await?;

    let chats = client.memory_list().await?;

    let open_key = state.editor.lock().await.key().map(String::from);
    let snapshot = match open_key {
        Some(key) => {
            let messages = client.memory_view(&key).await?;
            let mut editor = state.editor.lock().await;
            editor.load(&key, messages);
            Some(editor.snapshot())
        }
        None => None,
    };

    Ok(MemoryRefresh { chats, snapshot })
}

/// Current editor state, for re-renders that change nothing.
#[tauri::command]
pub async fn editor_state(state: State<'_, Arc<AppState>>) -> Result<EditorSnapshot, AppError> {
    Ok(state.editor.lock().await.snapshot())
}

// ---------------------------------------------------------------------------
// Bubble view: selection & bulk delete
// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn toggle_message_selection(
    state: State<'_, Arc<AppState>>,
    index: u32,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.toggle_selection(index as usize)?;
    Ok(editor.snapshot())
}

/// Persist the working copy minus every selected message, then re-load the
/// conversation so indices are derived fresh. The frontend confirms with the
/// operator before invoking this. On any failure the working copy and the
/// selection are left untouched.
#[tauri::command]
pub async fn delete_selected_messages(
    state: State<'_, Arc<AppState>>,
) -> Result<EditorSnapshot, AppError> {
    let client = get_client(&state).await?;

    let (key, retained, selected) = {
        let editor = state.editor.lock().await;
        let key = editor
            .key()
            .ok_or_else(|| AppError::Validation("No conversation is open".into()))?
            .to_string();
        if editor.selection_count() == 0 {
            return Err(AppError::Validation("No messages selected".into()));
        }
        (key, editor.retained_messages(), editor.selection_count())
    };

    client.memory_save(&key, &retained).await?;
    let messages = client.memory_view(&key).await?;

    let mut editor = state.editor.lock().await;
    editor.load(&key, messages);

    tracing::info!(key = %key, deleted = selected, "Deleted selected messages");
    Ok(editor.snapshot())
}

// ---------------------------------------------------------------------------
// Edit view
// ---------------------------------------------------------------------------

/// Switch between the bubble view and the paginated edit view.
#[tauri::command]
pub async fn set_edit_mode(
    state: State<'_, Arc<AppState>>,
    editing: bool,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.set_mode(if editing {
        ViewMode::Editing
    } else {
        ViewMode::Readonly
    })?;
    Ok(editor.snapshot())
}

#[tauri::command]
pub async fn change_editor_page(
    state: State<'_, Arc<AppState>>,
    delta: i32,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.change_page(delta as i64);
    Ok(editor.snapshot())
}

#[tauri::command]
pub async fn update_message_role(
    state: State<'_, Arc<AppState>>,
    index: u32,
    role: Role,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.set_role(index as usize, role)?;
    Ok(editor.snapshot())
}

#[tauri::command]
pub async fn update_message_content(
    state: State<'_, Arc<AppState>>,
    index: u32,
    content: String,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.set_content(index as usize, content)?;
    Ok(editor.snapshot())
}

#[tauri::command]
pub async fn delete_editor_message(
    state: State<'_, Arc<AppState>>,
    index: u32,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.remove_message(index as usize)?;
    Ok(editor.snapshot())
}

#[tauri::command]
pub async fn add_editor_message(
    state: State<'_, Arc<AppState>>,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.add_message()?;
    Ok(editor.snapshot())
}

// ---------------------------------------------------------------------------
// Create / save / delete / commit
// ---------------------------------------------------------------------------

/// Start a new conversation for an operator-supplied key, seeded with the
/// default template and opened straight into the edit view. Nothing is sent
/// to the backend until save.
#[tauri::command]
pub async fn create_conversation(
    state: State<'_, Arc<AppState>>,
    key: String,
) -> Result<EditorSnapshot, AppError> {
    let mut editor = state.editor.lock().await;
    editor.create(&key)?;
    tracing::info!(key = %key.trim(), "Created new conversation draft");
    Ok(editor.snapshot())
}

/// Atomically replace the stored sequence with the working copy. On success
/// both the conversation list and the open view are refreshed from the
/// server so displayed timestamps reflect stored state; on failure the
/// working copy is retained unchanged.
#[tauri::command]
pub async fn save_conversation(
    state: State<'_, Arc<AppState>>,
) -> Result<MemoryRefresh, AppError> {
    let client = get_client(&state).await?;

    let (key, messages) = {
        let editor = state.editor.lock().await;
        let key = editor
            .key()
            .ok_or_else(|| AppError::Validation("No conversation is open".into()))?
            .to_string();
        (key, editor.messages().to_vec())
    };

    client.memory_save(&key, &messages).await?;

    let chats = client.memory_list().await?;
    let fresh = client.memory_view(&key).await?;

    let mut editor = state.editor.lock().await;
    editor.load(&key, fresh);
    editor.mark_saved();

    tracing::info!(key = %key, messages = messages.len(), "Conversation saved");
    Ok(MemoryRefresh {
        chats,
        snapshot: Some(editor.snapshot()),
    })
}

/// Delete the open conversation server-side, clear the whole editor session,
/// and return the fresh list. The frontend confirms before invoking this.
#[tauri::command]
pub async fn delete_conversation(
    state: State<'_, Arc<AppState>>,
) -> Result<Vec<ChatSummary>, AppError> {
    let client = get_client(&state).await?;

    let key = state
        .editor
        .lock()
        .await
        .key()
        .ok_or_else(|| AppError::Validation("No conversation is open".into()))?
        .to_string();

    client.memory_delete(&key).await?;
    state.editor.lock().await.clear();

    tracing::info!(key = %key, "Conversation deleted");
    client.memory_list().await
}

/// Force-flush the bot's in-memory cache to disk. Returns the backend's
/// status message.
#[tauri::command]
pub async fn force_commit_memory(state: State<'_, Arc<AppState>>) -> Result<String, AppError> {
    let client = get_client(&state).await?;
    let message = client.memory_commit().await?;
    tracing::info!("Forced memory commit: {}", message);
    Ok(message)
}
