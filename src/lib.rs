mod commands;
mod models;
mod services;

use std::sync::Mutex;

use commands::*;
use services::conversation::Conversation;
use services::history_service::HistoryStore;

/// State shared by every command: the live conversation and the persisted
/// query history, loaded once at startup.
pub struct AppState {
    pub conversation: Mutex<Conversation>,
    pub history: Mutex<HistoryStore>,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_log::Builder::new().build())
        .manage(AppState {
            conversation: Mutex::new(Conversation::new()),
            history: Mutex::new(HistoryStore::load_default()),
        })
        .invoke_handler(tauri::generate_handler![
            // Chat commands
            send_chat_message,
            get_conversation,
            check_backend_connection,
            // History commands
            get_query_history,
            clear_query_history,
            // Config commands
            get_backend_url,
            set_backend_url,
            get_config,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
