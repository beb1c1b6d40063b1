// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::Path;

use anyhow::Context;
use tauri::Manager;
#[cfg(target_os = "macos")]
use tracing::error;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use chatroom_core::{Backend, ChatConfig};
use chatroom_tauri::commands;
use chatroom_tauri::commands::ChatAppState;

fn init_tracing(logs_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(logs_dir, "chatroom.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chatroom_tauri=debug,chatroom_core=debug,info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    guard
}

fn main() -> anyhow::Result<()> {
    // Persist before resolving the root so this launch already uses it.
    let saved_root = chatroom_tauri::requested_root(std::env::args().skip(1));
    if let Some(root) = &saved_root {
        chatroom_common::save_persistent_root(root.clone())
            .context("Failed to save data root preference")?;
    }

    let data_root =
        chatroom_common::init_structure().context("Failed to initialize directory structure")?;

    let _guard = init_tracing(&chatroom_common::logs_dir());
    info!("Starting Chatroom (data root {:?})", data_root);
    if let Some(root) = saved_root {
        info!("[App] Saved data root preference: {:?}", root);
    }

    let config = ChatConfig::default();
    let backend = tauri::async_runtime::block_on(Backend::open(&config))
        .context("Failed to open chat database")?;

    let app = tauri::Builder::default()
        .manage(ChatAppState { backend })
        .invoke_handler(tauri::generate_handler![
            commands::register,
            commands::login,
            commands::create_room,
            commands::get_rooms,
        ])
        .build(tauri::generate_context!())
        .context("error while building tauri application")?;

    app.run(|app_handle, event| match event {
        // No exit code means the last window was closed.
        tauri::RunEvent::ExitRequested { api, code, .. } => {
            if code.is_none() && cfg!(target_os = "macos") {
                api.prevent_exit();
            }
        }
        tauri::RunEvent::Exit => {
            info!("[App] Shutdown requested. Closing database...");
            let state = app_handle.state::<ChatAppState>();
            tauri::async_runtime::block_on(state.backend.shutdown());
        }
        #[cfg(target_os = "macos")]
        tauri::RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            let main_open = app_handle
                .get_webview_window(chatroom_tauri::MAIN_WINDOW)
                .is_some();
            if !has_visible_windows && !main_open {
                if let Err(e) = chatroom_tauri::open_main_window(app_handle) {
                    error!("[App] Failed to reopen main window: {}", e);
                }
            }
        }
        _ => {}
    });

    Ok(())
}
