// Configuration file handling (~/.focusflow/rc)
//
// The rc file is line based: `key=value`, blank lines and lines starting
// with '#' are ignored. Unknown keys are ignored so older binaries keep
// working with newer files.

use std::path::{Path, PathBuf};

/// Name used in the greeting when none is configured
pub const DEFAULT_GREETING_NAME: &str = "Student";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database location from `data.location`, already resolved against the rc directory
    pub data_location: Option<PathBuf>,
    /// Name shown in the greeting (`greeting.name`)
    pub greeting_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_location: None,
            greeting_name: DEFAULT_GREETING_NAME.to_string(),
        }
    }
}

impl Config {
    /// Directory holding the rc file and the default database
    pub fn config_dir() -> PathBuf {
        home_dir().join(".focusflow")
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("rc")
    }

    /// Load configuration from the rc file, falling back to defaults
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                let base = config_path.parent().unwrap_or_else(|| Path::new("."));
                Self::parse(&content, base)
            }
            Err(_) => Self::default(),
        }
    }

    /// Parse rc content. Relative `data.location` paths resolve against `base_dir`.
    pub fn parse(content: &str, base_dir: &Path) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("Ignoring malformed config line: {}", line);
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "data.location" if !value.is_empty() => {
                    let path = PathBuf::from(value);
                    config.data_location = Some(if path.is_relative() {
                        base_dir.join(path)
                    } else {
                        path
                    });
                }
                "greeting.name" if !value.is_empty() => {
                    config.greeting_name = value.to_string();
                }
                other => log::debug!("Ignoring config key: {}", other),
            }
        }

        config
    }
}

/// Home directory: `$HOME` first, then the platform lookup
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
