use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};

use crate::config::{HeaderConfig, ProbeConfig};
use crate::error::{ConfigError, TransportError};

/// Which header set a request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    /// All six browser-like headers
    Full,
    /// User-Agent and Accept only
    Reduced,
}

/// Everything the checks need from one HTTP exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub elapsed: Duration,
}

/// One GET against the validate endpoint.
///
/// Implementations own their connection per call; nothing is shared between
/// calls besides immutable configuration.
#[async_trait]
pub trait ValidateTransport: Send + Sync {
    /// URL the transport calls, for display
    fn target(&self) -> &str;

    async fn fetch(&self, profile: HeaderProfile) -> Result<RawResponse, TransportError>;
}

#[derive(Clone)]
pub struct ValidateClient {
    client: reqwest::Client,
    url: String,
    full_headers: HeaderMap,
    reduced_headers: HeaderMap,
}

impl ValidateClient {
    pub fn new(config: &ProbeConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(ValidateClient {
            client,
            url: config.target.url.clone(),
            full_headers: build_header_map(&config.headers, HeaderProfile::Full)?,
            reduced_headers: build_header_map(&config.headers, HeaderProfile::Reduced)?,
        })
    }

    pub fn headers(&self, profile: HeaderProfile) -> &HeaderMap {
        match profile {
            HeaderProfile::Full => &self.full_headers,
            HeaderProfile::Reduced => &self.reduced_headers,
        }
    }
}

#[async_trait]
impl ValidateTransport for ValidateClient {
    fn target(&self) -> &str {
        &self.url
    }

    async fn fetch(&self, profile: HeaderProfile) -> Result<RawResponse, TransportError> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .headers(self.headers(profile).clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
            elapsed: start.elapsed(),
        })
    }
}

fn build_header_map(headers: &HeaderConfig, profile: HeaderProfile) -> Result<HeaderMap, ConfigError> {
    let pairs = match profile {
        HeaderProfile::Full => headers.full_set(),
        HeaderProfile::Reduced => headers.reduced_set(),
    };

    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::Invalid(format!("header name {} is not valid", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ConfigError::Invalid(format!("header {} has an invalid value", name)))?;
        map.insert(header_name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_maps_follow_profiles() {
        let client = ValidateClient::new(&ProbeConfig::default()).expect("client should build");

        let full = client.headers(HeaderProfile::Full);
        assert_eq!(full.len(), 6);
        assert_eq!(full.get("cache-control").map(|v| v.as_bytes()), Some(&b"no-cache"[..]));
        assert_eq!(full.get("accept-language").map(|v| v.as_bytes()), Some(&b"zh-CN,zh;q=0.9,en;q=0.8"[..]));

        let reduced = client.headers(HeaderProfile::Reduced);
        assert_eq!(reduced.len(), 2);
        assert!(reduced.contains_key("user-agent"));
        assert!(reduced.contains_key("accept"));
        assert!(!reduced.contains_key("connection"));
    }
}
