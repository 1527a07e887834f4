use crate::error::{AppraisalError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-thinking-exp-1219:free";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_VAR: &str = "OPENROUTER_BASE_URL";
pub const MODEL_VAR: &str = "OPENROUTER_MODEL";

/// Endpoint settings plus the caller's credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppraisalConfig {
    /// Bearer token. `None` until the user supplies one.
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AppraisalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENROUTER_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl AppraisalConfig {
    /// Read overrides from the process environment. Unset or blank variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = read(API_KEY_VAR);

        if let Some(url) = read(BASE_URL_VAR) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppraisalError::InvalidConfig(format!(
                    "{} must be an http(s) URL, got '{}'",
                    BASE_URL_VAR, url
                )));
            }
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(model) = read(MODEL_VAR) {
            config.model = model;
        }

        debug!(
            "Loaded configuration: base_url={}, model={}, api_key set={}",
            config.base_url,
            config.model,
            config.api_key.is_some()
        );

        Ok(config)
    }

    /// The credential, or an empty string when none is configured.
    pub fn credential(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}
