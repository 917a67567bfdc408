//! Client configuration.
//!
//! `ClientConfig` is immutable once built. All normalization and validation
//! happens in `ClientConfigBuilder::build`, so a config that exists is always
//! usable: the base URL has no trailing slash and every fingerprint value is a
//! legal header value.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://fivestar.support";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub const HEADER_PLATFORM: &str = "X-FiveStar-Platform";
pub const HEADER_APP_VERSION: &str = "X-FiveStar-App-Version";
pub const HEADER_DEVICE_MODEL: &str = "X-FiveStar-Device-Model";
pub const HEADER_OS_VERSION: &str = "X-FiveStar-OS-Version";

/// Tenant identity, API location and optional device fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    client_id: String,
    api_url: String,
    platform: Option<String>,
    app_version: Option<String>,
    device_model: Option<String>,
    os_version: Option<String>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ClientConfig {
    pub fn builder(client_id: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(client_id)
    }

    /// Config with defaults for everything but the tenant id.
    pub fn new(client_id: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(client_id).build()
    }

    /// Read the config from `FIVESTAR_*` environment variables, loading a
    /// `.env` file first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client_id =
            lookup("FIVESTAR_CLIENT_ID").ok_or(ConfigError::MissingEnv("FIVESTAR_CLIENT_ID"))?;
        let mut builder = Self::builder(client_id);
        if let Some(url) = lookup("FIVESTAR_API_URL") {
            builder = builder.api_url(url);
        }
        if let Some(v) = lookup("FIVESTAR_PLATFORM") {
            builder = builder.platform(v);
        }
        if let Some(v) = lookup("FIVESTAR_APP_VERSION") {
            builder = builder.app_version(v);
        }
        if let Some(v) = lookup("FIVESTAR_DEVICE_MODEL") {
            builder = builder.device_model(v);
        }
        if let Some(v) = lookup("FIVESTAR_OS_VERSION") {
            builder = builder.os_version(v);
        }
        builder.build()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    pub fn device_model(&self) -> Option<&str> {
        self.device_model.as_deref()
    }

    pub fn os_version(&self) -> Option<&str> {
        self.os_version.as_deref()
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Headers sent with every request, in a stable order.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        let fingerprint = [
            (HEADER_PLATFORM, &self.platform),
            (HEADER_APP_VERSION, &self.app_version),
            (HEADER_DEVICE_MODEL, &self.device_model),
            (HEADER_OS_VERSION, &self.os_version),
        ];
        for (name, value) in fingerprint {
            if let Some(value) = value {
                headers.push((name.to_string(), value.clone()));
            }
        }
        headers
    }
}

/// Builder for `ClientConfig`.
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    client_id: String,
    api_url: String,
    platform: Option<String>,
    app_version: Option<String>,
    device_model: Option<String>,
    os_version: Option<String>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ClientConfigBuilder {
    fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_url: DEFAULT_API_URL.to_string(),
            platform: None,
            app_version: None,
            device_model: None,
            os_version: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn platform(mut self, value: impl Into<String>) -> Self {
        self.platform = Some(value.into());
        self
    }

    pub fn app_version(mut self, value: impl Into<String>) -> Self {
        self.app_version = Some(value.into());
        self
    }

    pub fn device_model(mut self, value: impl Into<String>) -> Self {
        self.device_model = Some(value.into());
        self
    }

    pub fn os_version(mut self, value: impl Into<String>) -> Self {
        self.os_version = Some(value.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let client_id = self.client_id.trim().to_string();
        if client_id.is_empty() {
            return Err(ConfigError::MissingClientId);
        }
        Ok(ClientConfig {
            client_id,
            api_url: normalize_api_url(&self.api_url)?,
            platform: fingerprint(HEADER_PLATFORM, self.platform)?,
            app_version: fingerprint(HEADER_APP_VERSION, self.app_version)?,
            device_model: fingerprint(HEADER_DEVICE_MODEL, self.device_model)?,
            os_version: fingerprint(HEADER_OS_VERSION, self.os_version)?,
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
        })
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Empty values count as absent; anything else must be a legal header value.
fn fingerprint(header: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if reqwest::header::HeaderValue::from_str(&value).is_err() {
        return Err(ConfigError::InvalidHeaderValue { header });
    }
    Ok(Some(value))
}
