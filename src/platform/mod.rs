// viewerscan platform abstraction
// Resolves the per-user configuration directory on Windows, macOS, and Linux.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for viewerscan.
///
/// - **Linux**: `~/.config/viewerscan` (or `$XDG_CONFIG_HOME/viewerscan`)
/// - **macOS**: `~/Library/Application Support/viewerscan`
/// - **Windows**: `%APPDATA%/viewerscan`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}
