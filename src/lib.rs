pub mod atoms;
pub mod commands;
pub mod engine;

use engine::state::EngineState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .target(tauri_plugin_log::Target::new(
                    tauri_plugin_log::TargetKind::LogDir { file_name: Some("abacus".into()) },
                ))
                .max_file_size(5_000_000) // 5MB max per log file
                .build(),
        )
        .manage(EngineState::new())
        .invoke_handler(tauri::generate_handler![
            commands::chat::chat_connect,
            commands::chat::chat_disconnect,
            commands::chat::chat_send,
            commands::chat::chat_messages,
            commands::chat::chat_link_state,
            commands::chat::chat_toggle_overlay,
            commands::invoice::upload_invoice,
            commands::accounting::predict_accounting,
            commands::faq::faq_entries,
            commands::config::get_backend_config,
            commands::config::set_backend_config
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
