use crate::services::config_service;

#[tauri::command]
pub fn get_backend_url() -> Result<Option<String>, String> {
    config_service::get_backend_url()
}

#[tauri::command]
pub fn set_backend_url(url: String) -> Result<(), String> {
    config_service::set_backend_url(&url)
}

#[tauri::command]
pub fn get_config() -> Result<config_service::Config, String> {
    config_service::load_config()
}
