//! Widget configuration from the environment.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/chat";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_ENDPOINT: &str = "CHAT_WIDGET_ENDPOINT";
pub const ENV_LANG: &str = "CHAT_WIDGET_LANG";
pub const ENV_TIMEOUT: &str = "CHAT_WIDGET_TIMEOUT_SECS";
pub const ENV_PRIMARY: &str = "CHAT_WIDGET_PRIMARY";
pub const ENV_LOG_FILE: &str = "CHAT_WIDGET_LOG_FILE";

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Full URL of the chat route, POSTed to on every send.
    pub endpoint: String,
    /// Sent verbatim as the `lang` field.
    pub lang: String,
    pub timeout: Duration,
    /// Theme colour, the counterpart of the host page's `--gradient-primary`.
    pub primary: Option<String>,
    pub log_file: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            primary: None,
            log_file: None,
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let timeout = match get(ENV_TIMEOUT) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "ignoring invalid {ENV_TIMEOUT}");
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            endpoint: get(ENV_ENDPOINT).unwrap_or(defaults.endpoint),
            lang: get(ENV_LANG).unwrap_or(defaults.lang),
            timeout,
            primary: get(ENV_PRIMARY),
            log_file: get(ENV_LOG_FILE),
        }
    }
}
