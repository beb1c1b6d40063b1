pub mod commands;

use std::path::PathBuf;

use tauri::{AppHandle, Runtime, WebviewUrl, WebviewWindowBuilder};

pub const MAIN_WINDOW: &str = "main";

/// Command-line flag that stores a new data root in the preference file.
pub const SET_ROOT_FLAG: &str = "--set-root";

/// Re-create the main window (macOS keeps the process alive with none open).
pub fn open_main_window<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<()> {
    WebviewWindowBuilder::new(app, MAIN_WINDOW, WebviewUrl::App("index.html".into()))
        .title("Chatroom")
        .inner_size(800.0, 600.0)
        .build()?;
    Ok(())
}

/// Pull the `--set-root <path>` (or `--set-root=<path>`) value out of the
/// process arguments. The last occurrence wins.
pub fn requested_root<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut root = None;
    while let Some(arg) = args.next() {
        if arg == SET_ROOT_FLAG {
            root = args.next().filter(|v| !v.is_empty()).map(PathBuf::from).or(root);
        } else if let Some(value) = arg.strip_prefix("--set-root=") {
            if !value.is_empty() {
                root = Some(PathBuf::from(value));
            }
        }
    }
    root
}
