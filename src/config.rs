//! Client configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base URL of the content API.
pub const DEFAULT_BASE_URL: &str = "http://mangaapi.manhuaren.com";

/// Salt wrapped around every canonical string before hashing.
pub const GSN_SALT: &str = "4e0a48e1c0b54041bce9c8f0e036124d";

/// RSA-2048 public key of the registration endpoint (base64 SubjectPublicKeyInfo DER).
pub const EMBEDDED_PUBLIC_KEY: &str = "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAmFCg289dTws27v8GtqIffkP4zgFR+MYIuUIeVO5AGiBV0rfpRh5gg7i8RrT12E9j6XwKoe3xJz1khDnPc65P5f7CJcNJ9A8bj7Al5K4jYGxz+4Q+n0YzSllXPit/Vz/iW5jFdlP6CTIgUVwvIoGEL2sS4cqqqSpCDKHSeiXh9CtMsktc6YyrSN+8mQbBvoSSew18r/vC07iQiaYkClcs7jIPq9tuilL//2uR9kWn5jsp8zHKVjmXuLtHDhM9lObZGCVJwdlN2KDKTh276u/pzQ1s5u8z/ARtK26N8e5w8mNlGcHcHfwyhjfEQurvrnkqYH37+12U3jGk5YNHGyOPcwIDAQAB";

/// Path of the anonymous-registration endpoint, relative to the base URL.
pub const BOOTSTRAP_PATH: &str = "v1/user/createAnonyUser2";

/// Configuration for a signing client.
///
/// Every field has a default matching the official Android client, so an
/// empty JSON object is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,

    /// Salt for request signatures
    pub gsn_salt: String,

    /// Registration public key (base64 SubjectPublicKeyInfo DER)
    pub public_key: String,

    /// API key alias (`gak`)
    pub api_key: String,

    /// Client tag (`gcl`, `gfcl`)
    pub client_tag: String,

    /// App version (`gav`)
    pub app_version: String,

    /// OS version marker (`gov`), `<sdk>_<release>`
    pub os_version: String,

    /// Package name (`gpt`)
    pub package_name: String,

    /// Country code, upper case (`gcy`)
    pub country: String,

    /// Language code (`gle`)
    pub language: String,

    /// Timezone marker (`gcut`)
    pub timezone: String,

    /// Device model reported in the device-context header
    pub device_model: String,

    /// Screen resolution reported in the device-context header
    pub resolution: String,

    /// User-Agent header value
    pub user_agent: String,

    /// JSON preference file holding the credential; in-memory when absent
    pub store_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            gsn_salt: GSN_SALT.to_string(),
            public_key: EMBEDDED_PUBLIC_KEY.to_string(),
            api_key: "android_manhuaren2".to_string(),
            client_tag: "dm5".to_string(),
            app_version: "7.0.1".to_string(),
            os_version: "33_13".to_string(),
            package_name: "com.mhr.mangamini".to_string(),
            country: "US".to_string(),
            language: "zh".to_string(),
            timezone: "GMT+8".to_string(),
            device_model: "Pixel 6".to_string(),
            resolution: "1080x1920".to_string(),
            user_agent: "Dalvik/2.1.0 (Linux; U; Android 13; Pixel 6 Build/TQ3A.230901.001)"
                .to_string(),
            store_path: None,
        }
    }
}

impl ClientConfig {
    /// Load a JSON configuration file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: ClientConfig = serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("invalid config {}: {}", path.display(), e)))?;
        config.validate().map_err(Error::config)?;
        Ok(config)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL of the anonymous-registration endpoint.
    pub fn bootstrap_url(&self) -> String {
        format!("{}/{}", self.base_url(), BOOTSTRAP_PATH)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url cannot be empty".to_string());
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("base_url is not a valid URL: {}", self.base_url));
        }
        if self.gsn_salt.is_empty() {
            return Err("gsn_salt cannot be empty".to_string());
        }
        if self.public_key.is_empty() {
            return Err("public_key cannot be empty".to_string());
        }
        if self.country.is_empty() {
            return Err("country cannot be empty".to_string());
        }
        Ok(())
    }
}
