pub mod api;
pub mod commands;
pub mod editor;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod validation;

use std::sync::Arc;

use tauri::Manager;

use api::BotClient;
use editor::EditorSession;

/// Shared application state accessible from all Tauri commands.
pub struct AppState {
    /// Bot backend HTTP client (None when not connected).
    pub client: Arc<tokio::sync::Mutex<Option<Arc<BotClient>>>>,
    /// The conversation editor session for the memory panel.
    pub editor: Arc<tokio::sync::Mutex<EditorSession>>,
}

pub fn run() {
    logging::init();

    tracing::info!("Starting ZUZU Admin Console v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let app_data_dir = app
                .path()
                .app_data_dir()
                .expect("Failed to resolve app data directory");
            logging::install_crash_hook(&app_data_dir);

            // Restore the backend client from the keyring if previously connected
            let client_opt = api::config::load_connection()
                .map(|(url, _)| Arc::new(BotClient::new(url)));
            if client_opt.is_some() {
                tracing::info!("Backend connection restored from keyring");
            }

            let state_arc = Arc::new(AppState {
                client: Arc::new(tokio::sync::Mutex::new(client_opt)),
                editor: Arc::new(tokio::sync::Mutex::new(EditorSession::default())),
            });
            app.manage(state_arc.clone());

            // Start the polling loops after a brief delay so the webview is
            // listening before the first samples arrive
            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                monitor::start_loops(app_handle, state_arc);
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Connection
            commands::connection::connect_backend,
            commands::connection::reconnect_from_keyring,
            commands::connection::disconnect_backend,
            commands::connection::get_connection,
            // Memory — access gate & listing
            commands::memory::memory_unlock,
            commands::memory::list_conversations,
            commands::memory::open_conversation,
            commands::memory::refresh_memory,
            commands::memory::editor_state,
            // Memory — bubble view
            commands::memory::toggle_message_selection,
            commands::memory::delete_selected_messages,
            // Memory — edit view
            commands::memory::set_edit_mode,
            commands::memory::change_editor_page,
            commands::memory::update_message_role,
            commands::memory::update_message_content,
            commands::memory::delete_editor_message,
            commands::memory::add_editor_message,
            // Memory — lifecycle
            commands::memory::create_conversation,
            commands::memory::save_conversation,
            commands::memory::delete_conversation,
            commands::memory::force_commit_memory,
            // Data editors
            commands::data::load_document,
            commands::data::save_document,
            commands::data::load_fun_tables,
            commands::data::save_fun_tables,
            // Settings
            commands::env::load_env_vars,
            commands::env::save_env_vars,
            // Control
            commands::control::start_bot,
            commands::control::stop_bot,
            commands::control::restart_bot,
            commands::control::bot_status,
            // Logs & stats
            commands::logs::fetch_logs,
            commands::stats::dashboard_stats,
            commands::stats::message_volume,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
