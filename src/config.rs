use crate::error::{BotError, Result};
use worker::Env;

const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
const API_KEY: &str = "API_KEY";
const FOLDER_ID: &str = "FOLDER_ID";
const BUCKET_NAME: &str = "BUCKET_NAME";
const BUCKET_KEY: &str = "BUCKET_KEY";
const MODEL_NAME: &str = "MODEL_NAME";
const LOG_LEVEL: &str = "LOG_LEVEL";

pub const DEFAULT_MODEL_NAME: &str = "yandexgpt-lite";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings read from the worker's secrets and vars.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub api_key: String,
    pub folder_id: String,
    /// Name of the R2 bucket binding holding the instructions.
    pub bucket_name: String,
    pub bucket_key: String,
    pub model_name: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env(env: &Env) -> Result<Self> {
        Self::from_lookup(|name| {
            env.secret(name)
                .map(|s| s.to_string())
                .or_else(|_| env.var(name).map(|v| v.to_string()))
                .ok()
        })
    }

    /// Builds the config from any name -> value source. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| BotError::Config(format!("{} is not set", name)))
        };

        Ok(Self {
            bot_token: required(TELEGRAM_BOT_TOKEN)?,
            api_key: required(API_KEY)?,
            folder_id: required(FOLDER_ID)?,
            bucket_name: required(BUCKET_NAME)?,
            bucket_key: required(BUCKET_KEY)?,
            model_name: optional(MODEL_NAME).unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            log_level: optional(LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// The `modelUri` YandexGPT expects, e.g. `gpt://b1g.../yandexgpt-lite`.
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.folder_id, self.model_name)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"[REDACTED]")
            .field("api_key", &"[REDACTED]")
            .field("folder_id", &self.folder_id)
            .field("bucket_name", &self.bucket_name)
            .field("bucket_key", &self.bucket_key)
            .field("model_name", &self.model_name)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete() -> HashMap<String, String> {
        vars(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("API_KEY", "key"),
            ("FOLDER_ID", "b1gfolder"),
            ("BUCKET_NAME", "INSTRUCTIONS"),
            ("BUCKET_KEY", "instructions.txt"),
        ])
    }

    #[test]
    fn defaults_for_optional_values() {
        let env = complete();
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.model_name, "yandexgpt-lite");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.model_uri(), "gpt://b1gfolder/yandexgpt-lite");
    }

    #[test]
    fn model_name_override() {
        let mut env = complete();
        env.insert("MODEL_NAME".into(), "yandexgpt".into());
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.model_uri(), "gpt://b1gfolder/yandexgpt");
    }

    #[test]
    fn missing_required_value() {
        let mut env = complete();
        env.remove("API_KEY");
        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, BotError::Config(ref msg) if msg.contains("API_KEY")));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let mut env = complete();
        env.insert("BUCKET_KEY".into(), "  ".into());
        assert!(Config::from_lookup(|name| env.get(name).cloned()).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let env = complete();
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("123:abc"));
        assert!(printed.contains("[REDACTED]"));
    }
}
