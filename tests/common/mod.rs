#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use validate_probe::{HeaderProfile, ProbeConfig, RawResponse, TransportError, ValidateTransport};

pub const GOOD_TOKEN: &str = "validate_123_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Transport that replays scripted results in order and records which header
/// profile each call used.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    profiles: Mutex<Vec<HeaderProfile>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<RawResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            profiles: Mutex::new(Vec::new()),
        }
    }

    pub fn profiles(&self) -> Vec<HeaderProfile> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl ValidateTransport for ScriptedTransport {
    fn target(&self) -> &str {
        "http://scripted.test/api/validate"
    }

    async fn fetch(&self, profile: HeaderProfile) -> Result<RawResponse, TransportError> {
        self.profiles.lock().unwrap().push(profile);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("script exhausted".to_string())))
    }
}

pub fn reply(status: u16, body: &str) -> Result<RawResponse, TransportError> {
    Ok(RawResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.to_string(),
        elapsed: Duration::from_millis(120),
    })
}

pub fn token_reply(token: &str) -> Result<RawResponse, TransportError> {
    reply(200, &format!(r#"{{"status":0,"data":{{"validate":"{}"}},"msg":"ok"}}"#, token))
}

/// Defaults with no pause between sampler calls
pub fn fast_config() -> ProbeConfig {
    let mut config = ProbeConfig::default();
    config.sampling.delay_seconds = 0.0;
    config
}
