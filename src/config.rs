use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::console::Console;
use crate::error::ConfigError;
use crate::{TOKEN_PREFIX, VALIDATE_API_URL, v_debug};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub target: TargetConfig,
    pub headers: HeaderConfig,
    pub sampling: SamplingConfig,
    pub token: TokenConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Endpoint every check calls with GET
    pub url: String,
    /// Upper bound for a single request, connect through body
    pub timeout_seconds: f64,
    /// Which HTTP statuses count as success before JSON decoding
    pub success_gate: SuccessGate,
}

/// HTTP statuses accepted before the body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessGate {
    /// Exactly 200 OK
    #[serde(rename = "ok_only")]
    OkOnly,
    /// Any 2xx status, opt-in
    #[serde(rename = "any_2xx")]
    Any2xx,
}

impl SuccessGate {
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            SuccessGate::Any2xx => (200..300).contains(&status),
            SuccessGate::OkOnly => status == 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub accept_encoding: String,
    pub connection: String,
    pub cache_control: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of sequential calls made by the sampler
    pub attempts: u32,
    /// Pause between calls; never applied after the last one
    pub delay_seconds: f64,
    /// How many leading characters of a token the sampler prints
    pub preview_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Literal prefix a well-formed token starts with
    pub expected_prefix: String,
    /// Length of the hex digest segment
    pub hash_length: usize,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: VALIDATE_API_URL.to_string(),
            timeout_seconds: 30.0,
            success_gate: SuccessGate::OkOnly,
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36".to_string(),
            accept: "application/json, text/plain, */*".to_string(),
            accept_language: "zh-CN,zh;q=0.9,en;q=0.8".to_string(),
            accept_encoding: "gzip, deflate, br".to_string(),
            connection: "keep-alive".to_string(),
            cache_control: "no-cache".to_string(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_seconds: 1.0,
            preview_chars: 30,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            expected_prefix: TOKEN_PREFIX.to_string(),
            hash_length: 32,
        }
    }
}

impl ProbeConfig {
    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(config_path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        let config: ProbeConfig = toml::from_str(config_str)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &str) -> Result<(), ConfigError> {
        if let Some(parent) = Path::new(config_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.target.url)
            .map_err(|e| ConfigError::Invalid(format!("url '{}' is not valid: {}", self.target.url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Invalid(format!("url scheme must be http or https, got '{}'", url.scheme())));
        }

        if !self.target.timeout_seconds.is_finite() || self.target.timeout_seconds <= 0.0 {
            return Err(ConfigError::Invalid("timeout_seconds must be greater than 0".to_string()));
        }
        if !self.sampling.delay_seconds.is_finite() || self.sampling.delay_seconds < 0.0 {
            return Err(ConfigError::Invalid("delay_seconds must be 0 or greater".to_string()));
        }
        if self.sampling.attempts == 0 {
            return Err(ConfigError::Invalid("attempts must be greater than 0".to_string()));
        }
        if self.token.hash_length == 0 {
            return Err(ConfigError::Invalid("hash_length must be greater than 0".to_string()));
        }

        for (name, value) in self.headers.full_set() {
            if HeaderValue::from_str(value).is_err() {
                return Err(ConfigError::Invalid(format!("header {} has an invalid value", name)));
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.target.timeout_seconds).unwrap_or_default()
    }

    pub fn sampling_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.sampling.delay_seconds).unwrap_or_default()
    }

    /// Print configuration summary
    pub fn print_summary(&self, console: &Console) {
        v_debug!(console, "📋 Configuration Summary:");
        v_debug!(console, "   🌐 Target: {}", self.target.url);
        v_debug!(console, "   ⏱️  Timeout: {:.1}s", self.target.timeout_seconds);
        v_debug!(console, "   ✅ Success gate: {:?}", self.target.success_gate);
        v_debug!(console, "   🔁 Sampling: {} attempts, {:.1}s apart",
            self.sampling.attempts, self.sampling.delay_seconds);
        v_debug!(console, "   🔑 Token: prefix '{}', {}-char hash",
            self.token.expected_prefix, self.token.hash_length);
    }
}

impl HeaderConfig {
    /// Every header, as sent by the single-call inspector
    pub fn full_set(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("User-Agent", self.user_agent.as_str()),
            ("Accept", self.accept.as_str()),
            ("Accept-Language", self.accept_language.as_str()),
            ("Accept-Encoding", self.accept_encoding.as_str()),
            ("Connection", self.connection.as_str()),
            ("Cache-Control", self.cache_control.as_str()),
        ]
    }

    /// User-Agent and Accept only
    pub fn reduced_set(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("User-Agent", self.user_agent.as_str()),
            ("Accept", self.accept.as_str()),
        ]
    }
}
