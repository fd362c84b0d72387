//! Page-level UI configuration.
//!
//! The server may embed a JSON block in the page:
//!
//! ```html
//! <script type="application/json" id="ui-config">{"login_path": "/auth/login"}</script>
//! ```
//!
//! Every field is optional; missing fields keep their defaults.

use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "ui-config";

pub const DEFAULT_TOKEN_KEY: &str = "auth_token";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_NOTIFICATION_DURATION_MS: u32 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown log_level: {0}")]
    LogLevel(String),
    #[error("login_path must be an absolute path, got '{0}'")]
    LoginPath(String),
}

/// Typed UI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// `localStorage` key holding the bearer token.
    pub token_key: String,
    /// Where the browser is sent after a 401.
    pub login_path: String,
    pub notification_duration_ms: u32,
    pub max_upload_bytes: u64,
    pub image_extensions: Vec<String>,
    pub audio_extensions: Vec<String>,
    pub log_level: log::Level,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            notification_duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            image_extensions: owned(DEFAULT_IMAGE_EXTENSIONS),
            audio_extensions: owned(DEFAULT_AUDIO_EXTENSIONS),
            log_level: log::Level::Info,
        }
    }
}

/// Wire shape of the embedded config block.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUiConfig {
    token_key: Option<String>,
    login_path: Option<String>,
    notification_duration_ms: Option<u32>,
    max_upload_bytes: Option<u64>,
    image_extensions: Option<Vec<String>>,
    audio_extensions: Option<Vec<String>>,
    log_level: Option<String>,
}

impl UiConfig {
    /// Parse the embedded JSON block, applying defaults for absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed JSON, an unknown `log_level`, or a
    /// `login_path` that is not absolute.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawUiConfig = serde_json::from_str(raw)?;
        let defaults = Self::default();

        let login_path = raw.login_path.unwrap_or(defaults.login_path);
        if !login_path.starts_with('/') {
            return Err(ConfigError::LoginPath(login_path));
        }

        Ok(Self {
            token_key: raw.token_key.unwrap_or(defaults.token_key),
            login_path,
            notification_duration_ms: raw
                .notification_duration_ms
                .unwrap_or(defaults.notification_duration_ms),
            max_upload_bytes: raw.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
            image_extensions: raw
                .image_extensions
                .map_or(defaults.image_extensions, normalize_extensions),
            audio_extensions: raw
                .audio_extensions
                .map_or(defaults.audio_extensions, normalize_extensions),
            log_level: parse_log_level(raw.log_level.as_deref())?,
        })
    }

    /// Fall back to defaults when `loaded` failed, logging why.
    pub fn or_defaults(loaded: Result<Self, ConfigError>) -> Self {
        loaded.unwrap_or_else(|err| {
            log::warn!("ui config ignored, using defaults: {err}");
            Self::default()
        })
    }

    /// Read the config block from the current document.
    ///
    /// A page without the block gets the defaults.
    ///
    /// # Errors
    ///
    /// Propagates [`UiConfig::from_json`] failures.
    #[cfg(feature = "hydrate")]
    pub fn load() -> Result<Self, ConfigError> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }
}

fn parse_log_level(raw: Option<&str>) -> Result<log::Level, ConfigError> {
    match raw.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => Ok(log::Level::Error),
        "warn" => Ok(log::Level::Warn),
        "info" => Ok(log::Level::Info),
        "debug" => Ok(log::Level::Debug),
        "trace" => Ok(log::Level::Trace),
        other => Err(ConfigError::LogLevel(other.to_owned())),
    }
}

fn normalize_extensions(exts: Vec<String>) -> Vec<String> {
    exts.into_iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
