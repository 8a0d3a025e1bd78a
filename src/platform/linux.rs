// viewerscan config path for Linux: $XDG_CONFIG_HOME/viewerscan or ~/.config/viewerscan

use std::env;
use std::path::PathBuf;

/// Uses `$XDG_CONFIG_HOME/viewerscan` if set, otherwise `~/.config/viewerscan`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("viewerscan"),
        _ => {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            PathBuf::from(home).join(".config").join("viewerscan")
        }
    }
}
