use crate::errors::{Result, StorageError};
use crate::utils::log_utils::mask_credential;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const ENV_KEY: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_BUCKET: &str = "S3_BUCKET";
pub const ENV_ENDPOINT: &str = "S3_ENDPOINT";

/// Connection settings for an S3-compatible object store
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub key: String,
    pub secret: String,
    pub region: String,
    pub bucket: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, B2)
    pub endpoint: Option<String>,
    /// Address objects as `endpoint/bucket/key` instead of `bucket.endpoint/key`
    pub force_path_style: bool,
    /// Attempts the SDK makes per request. This crate never retries on its own.
    pub max_attempts: u32,
    pub operation_timeout_secs: Option<u64>,
    /// Base for returned URLs when a CDN fronts the bucket
    pub public_base_url: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            secret: String::new(),
            region: String::new(),
            bucket: String::new(),
            endpoint: None,
            force_path_style: false,
            max_attempts: 1,
            operation_timeout_secs: None,
            public_base_url: None,
        }
    }
}

// Hand-written so the secret never ends up in logs.
impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("key", &mask_credential(&self.key))
            .field("secret", &"****")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("force_path_style", &self.force_path_style)
            .field("max_attempts", &self.max_attempts)
            .field("operation_timeout_secs", &self.operation_timeout_secs)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl StorageConfig {
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        region: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            region: region.into(),
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_path_style(mut self) -> Self {
        self.force_path_style = true;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_operation_timeout(mut self, secs: u64) -> Self {
        self.operation_timeout_secs = Some(secs);
        self
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Parse a JSON document without validating it; missing fields take defaults
    pub fn parse_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load and validate a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorageError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::parse_json(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from a variable lookup. Missing variables are left empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            key: lookup(ENV_KEY).unwrap_or_default(),
            secret: lookup(ENV_SECRET).unwrap_or_default(),
            region: lookup(ENV_REGION).unwrap_or_default(),
            bucket: lookup(ENV_BUCKET).unwrap_or_default(),
            endpoint: lookup(ENV_ENDPOINT).filter(|e| !e.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Load and validate a config from the process environment
    pub fn from_env() -> Result<Self> {
        let config = Self::from_lookup(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("key", &self.key),
            ("secret", &self.secret),
            ("region", &self.region),
            ("bucket", &self.bucket),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(StorageError::Config(format!("'{}' is required", name)));
            }
        }
        if self.max_attempts == 0 {
            return Err(StorageError::Config("'max_attempts' must be at least 1".to_string()));
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(StorageError::Config(format!(
                    "endpoint '{}' must start with http:// or https://",
                    endpoint
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_fills_defaults() {
        let config = StorageConfig::parse_json(
            r#"{"key":"k","secret":"s","region":"eu-west-1","bucket":"media"}"#,
        )
        .expect("parse");
        assert_eq!(config.max_attempts, 1);
        assert!(config.endpoint.is_none());
        assert!(!config.force_path_style);
        config.validate().expect("valid");
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let config = StorageConfig::new("k", "  ", "us-east-1", "media");
        match config.validate() {
            Err(StorageError::Config(msg)) => assert!(msg.contains("secret")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_zero_attempts_and_bad_endpoint() {
        let base = StorageConfig::new("k", "s", "us-east-1", "media");
        assert!(base.clone().with_max_attempts(0).validate().is_err());
        assert!(base.clone().with_endpoint("localhost:9000").validate().is_err());
        assert!(base.with_endpoint("http://localhost:9000").validate().is_ok());
    }
}
