//! Settings resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG path →
//! system path → built-in defaults.

use std::path::{Path, PathBuf};

/// Discovered settings file path.
#[derive(Debug, Clone, Default)]
pub struct SettingsPaths {
    /// Path to config.json (or None for built-in defaults).
    pub settings: Option<PathBuf>,

    /// Source of the settings file (for diagnostics).
    pub source: ConfigSource,
}

/// Where the settings file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/round-tally/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
const ENV_SETTINGS_PATH: &str = "ROUND_TALLY_CONFIG";
const ENV_CONFIG_DIR: &str = "ROUND_TALLY_CONFIG_DIR";
const ENV_DATA_DIR: &str = "ROUND_TALLY_DATA_DIR";

/// Standard settings file name.
const SETTINGS_FILENAME: &str = "config.json";

/// Application name for XDG directories.
const APP_NAME: &str = "round-tally";

/// Resolve the settings file path using the standard resolution order.
///
/// 1. Explicit CLI path (if provided, taken as-is; existence is checked
///    at load time so a typo surfaces as an error instead of a silent
///    fallthrough)
/// 2. ROUND_TALLY_CONFIG environment variable (direct path)
/// 3. ROUND_TALLY_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/round-tally/)
/// 5. System config (/etc/round-tally/)
/// 6. Built-in defaults (None)
pub fn resolve_settings(cli_path: Option<&Path>) -> SettingsPaths {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return SettingsPaths {
            settings: Some(path.to_path_buf()),
            source: ConfigSource::CliArgument,
        };
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return SettingsPaths {
                settings: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SETTINGS_FILENAME);
        if path.exists() {
            return SettingsPaths {
                settings: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    // 4. XDG config directory
    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(SETTINGS_FILENAME);
        if path.exists() {
            return SettingsPaths {
                settings: Some(path),
                source: ConfigSource::XdgConfig,
            };
        }
    }

    // 5. System config
    let system_path = system_config_dir().join(SETTINGS_FILENAME);
    if system_path.exists() {
        return SettingsPaths {
            settings: Some(system_path),
            source: ConfigSource::SystemConfig,
        };
    }

    // 6. Built-in default
    SettingsPaths::default()
}

/// Get the XDG config directory for round-tally.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

/// Standard data directory for the ledger and derived state files.
///
/// ROUND_TALLY_DATA_DIR overrides the platform data dir; the final
/// fallback is the current directory, so the tool still works in
/// stripped-down containers without a home.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}
