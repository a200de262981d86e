//! Plugin configuration
//!
//! Everything is read once at startup into [`NotifierConfig`] and passed by
//! reference to the components that need it.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::client::Credential;
use crate::error::{NotifyError, Result};
use crate::payload::BuildPayload;
use crate::resolver::RoomReference;

pub const DEFAULT_API_URL: &str = "https://webexapis.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Setting keys, bare name first, then the `PLUGIN_*` name the CI system exports.
const AUTH_TOKEN_KEYS: [&str; 2] = ["AUTH_TOKEN", "PLUGIN_AUTH_TOKEN"];
const ROOM_ID_KEYS: [&str; 2] = ["ROOM_ID", "PLUGIN_ROOMID"];
const ROOM_NAME_KEYS: [&str; 2] = ["ROOM_NAME", "PLUGIN_ROOMNAME"];
const CUSTOM_MESSAGE_KEYS: [&str; 2] = ["CUSTOM_MESSAGE", "PLUGIN_MESSAGE"];

/// Messaging API connection settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Optional TOML file named by `NOTIFY_CONFIG`
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub credential: Credential,
    pub room: RoomReference,
    pub custom_message: Option<String>,
    pub api: ApiSettings,
    pub build: BuildPayload,
}

impl NotifierConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Fails with [`NotifyError::Config`] when no credential is supplied.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = first_present(&lookup, &AUTH_TOKEN_KEYS).ok_or_else(|| {
            NotifyError::Config(
                "Requires a valid Cisco Spark token in AUTH_TOKEN or PLUGIN_AUTH_TOKEN".to_string(),
            )
        })?;

        let room = RoomReference::from_parts(
            first_present(&lookup, &ROOM_ID_KEYS),
            first_present(&lookup, &ROOM_NAME_KEYS),
        );

        let mut api = match non_empty(lookup("NOTIFY_CONFIG")) {
            Some(path) => load_config_file(&path)?.api,
            None => ApiSettings::default(),
        };
        if let Some(url) = non_empty(lookup("API_URL")) {
            api.base_url = url;
        }
        if let Some(raw) = non_empty(lookup("REQUEST_TIMEOUT_SECS")) {
            api.timeout_secs = raw.trim().parse().map_err(|e| {
                NotifyError::Config(format!("Invalid REQUEST_TIMEOUT_SECS '{}': {}", raw, e))
            })?;
        }
        api.base_url = api.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            credential: Credential::new(token),
            room,
            custom_message: first_present(&lookup, &CUSTOM_MESSAGE_KEYS),
            api,
            build: BuildPayload::from_lookup(&lookup),
        })
    }
}

/// Load and parse the optional settings file
pub fn load_config_file(path: impl AsRef<Path>) -> Result<FileConfig> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|e| {
        NotifyError::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(toml::from_str(&config_str)?)
}

fn first_present<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter().find_map(|key| non_empty(lookup(key)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
