use std::path::PathBuf;

/// Environment variable holding an icon path or a sender bundle id
pub const ICON_ENV: &str = "CLAUDE_NOTIFICATION_ICON";

/// Terminal.app; used when no icon is configured
pub const DEFAULT_ICON: &str = "com.apple.Terminal";

/// Log file location relative to the home directory
const LOG_FILE_NAME: &str = ".claude/hook-notifications.log";

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Raw icon value: image path or bundle id
    pub icon: String,
    /// None when the home directory cannot be determined
    pub log_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(ICON_ENV).ok(), dirs::home_dir())
    }

    /// Builds the config from raw lookups. An empty icon counts as unset.
    pub fn resolve(icon: Option<String>, home: Option<PathBuf>) -> Self {
        let icon = icon
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());

        Config {
            icon,
            log_path: home.map(|home| home.join(LOG_FILE_NAME)),
        }
    }
}
