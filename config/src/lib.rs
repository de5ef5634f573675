//! Configuration for postreminder.
//!
//! ```toml
//! [server]
//! url = "https://chat.example.com"
//! plugin_id = "post-reminder"
//! token = "${POSTREMINDER_TOKEN}"
//! timeout_secs = 30
//!
//! [composer]
//! variant = "classic"   # or "targeted"
//! initial_message = ""
//!
//! [theme]
//! center_channel_color = "#3d3c40"
//! center_channel_bg = "#ffffff"
//! button_color = "#ffffff"
//! button_bg = "#166de0"
//!
//! [app]
//! high_contrast = false
//! ```
//!
//! Every section is optional. A missing file is not an error.

use std::{env, fmt, fs, path::Path, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use postreminder_types::{ComposerVariant, HostTheme};

pub const CONFIG_PATH_ENV: &str = "POSTREMINDER_CONFIG";
pub const TOKEN_ENV: &str = "POSTREMINDER_TOKEN";
pub const DEFAULT_PLUGIN_ID: &str = "post-reminder";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8065";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostReminderConfig {
    pub app: Option<AppConfig>,
    pub server: Option<ServerConfig>,
    pub composer: Option<ComposerConfig>,
    pub theme: Option<HostTheme>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use the high-contrast palette instead of the host theme.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Default, Deserialize)]
pub struct ServerConfig {
    pub url: Option<String>,
    pub plugin_id: Option<String>,
    /// Supports `${VAR}` expansion. `POSTREMINDER_TOKEN` takes precedence.
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

// Manual Debug impl to prevent leaking the token in logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("url", &self.url)
            .field("plugin_id", &self.plugin_id)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub variant: ComposerVariant,
    #[serde(default)]
    pub initial_message: String,
}

/// Replace `${VAR}` references with environment values (missing vars become empty).
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end_rel];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end_rel + 1..];
    }

    out.push_str(rest);
    out
}

impl PostReminderConfig {
    /// Load from [`config_path`]. `Ok(None)` when there is no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let config: Self = match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                return Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        config.warn_if_token_exposed(path);
        Ok(config)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn server_url(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.url.as_deref())
            .map(expand_env_vars)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    #[must_use]
    pub fn plugin_id(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.plugin_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_PLUGIN_ID)
            .to_string()
    }

    /// `POSTREMINDER_TOKEN` first, then the configured (expanded) token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        env::var(TOKEN_ENV)
            .ok()
            .or_else(|| {
                self.server
                    .as_ref()
                    .and_then(|s| s.token.as_deref())
                    .map(expand_env_vars)
            })
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        let secs = self
            .server
            .as_ref()
            .and_then(|s| s.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn variant(&self) -> ComposerVariant {
        self.composer.as_ref().map(|c| c.variant).unwrap_or_default()
    }

    #[must_use]
    pub fn initial_message(&self) -> String {
        self.composer
            .as_ref()
            .map(|c| c.initial_message.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn theme(&self) -> HostTheme {
        self.theme.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn high_contrast(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.high_contrast)
    }

    fn warn_if_token_exposed(&self, path: &Path) {
        let literal_token = self
            .server
            .as_ref()
            .and_then(|s| s.token.as_deref())
            .is_some_and(|token| !token.trim().is_empty() && !token.contains("${"));
        if !literal_token {
            return;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = fs::metadata(path)
                && metadata.permissions().mode() & 0o077 != 0
            {
                tracing::warn!(
                    path = %path.display(),
                    "Config file contains a literal token and is readable by other users. \
                     Consider chmod 600 or ${{POSTREMINDER_TOKEN}}."
                );
            }
        }
        #[cfg(not(unix))]
        let _ = path;
    }
}

/// `$POSTREMINDER_CONFIG`, else `~/.postreminder/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".postreminder").join("config.toml"))
}
