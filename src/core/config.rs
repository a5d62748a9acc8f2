use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Default hosted summarization model.
pub const DEFAULT_HF_API_URL: &str =
    "https://api-inference.huggingface.co/models/sshleifer/distilbart-cnn-12-6";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub processing_queue_url: String,
    pub slack_signing_secret: String,
    pub slack_bot_token: String,
    pub hf_api_token: Option<String>,
    pub hf_api_url: String,
    pub summary_timeout: Duration,
    pub summarizer_timeout: Duration,
    pub map_delay: Duration,
    pub command_cooldown: Duration,
    pub max_messages: usize,
}

/// Everything a summarization backend needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
}

fn required<F>(lookup: &F, key: &str) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| format!("{key}: environment variable not found"))
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("{key}: {e}")),
        _ => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hf_api_url = lookup("HF_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HF_API_URL.to_string());
        Url::parse(&hf_api_url).map_err(|e| format!("HF_API_URL: {e}"))?;

        Ok(Self {
            processing_queue_url: required(&lookup, "PROCESSING_QUEUE_URL")?,
            slack_signing_secret: required(&lookup, "SLACK_SIGNING_SECRET")?,
            slack_bot_token: required(&lookup, "SLACK_BOT_TOKEN")?,
            hf_api_token: lookup("HF_TOKEN").filter(|s| !s.is_empty()),
            hf_api_url,
            summary_timeout: Duration::from_secs(parsed_or(&lookup, "SUMMARY_TIMEOUT_SECS", 45)?),
            summarizer_timeout: Duration::from_secs(parsed_or(
                &lookup,
                "SUMMARIZER_TIMEOUT_SECS",
                30,
            )?),
            map_delay: Duration::from_millis(parsed_or(&lookup, "MAP_DELAY_MS", 500)?),
            command_cooldown: Duration::from_secs(parsed_or(
                &lookup,
                "COMMAND_COOLDOWN_SECS",
                60,
            )?),
            max_messages: parsed_or(&lookup, "MAX_MESSAGES", 1500)?,
        })
    }

    #[must_use]
    pub fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig {
            endpoint: self.hf_api_url.clone(),
            api_token: self.hf_api_token.clone(),
            request_timeout: self.summarizer_timeout,
        }
    }
}
