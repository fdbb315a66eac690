use crate::config::StorageConfig;
use crate::errors::{Result, StorageError};
use crate::interfaces::StorageBackend;
use crate::storage::models::{
    DeleteObjectOutput, DeleteObjectRequest, ObjectAcl, PutBody, PutObjectOutput,
    PutObjectRequest,
};
use crate::storage::object_url::ObjectUrlBuilder;
use crate::utils::log_utils::{self, mask_credential};
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Region, SharedHttpClient};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Blocking S3 client.
///
/// Owns a tokio runtime so callers stay synchronous. Calls made from inside a
/// multi-thread tokio runtime block in place; calls from a current-thread
/// runtime fail with [`StorageError::Runtime`] because nothing may block there.
pub struct S3Backend {
    client: Client,
    // Taken on drop so it can shut down without blocking
    runtime: Option<Runtime>,
    urls: ObjectUrlBuilder,
    verbose: u8,
}

impl S3Backend {
    /// Create the SDK client from the provided config. No network I/O happens here.
    pub fn new(config: &StorageConfig, verbose: u8) -> Result<Self> {
        Self::build(config, verbose, None)
    }

    /// Same as [`S3Backend::new`] but sends requests through the given HTTP client
    pub fn with_http_client(
        config: &StorageConfig,
        verbose: u8,
        http_client: SharedHttpClient,
    ) -> Result<Self> {
        Self::build(config, verbose, Some(http_client))
    }

    fn build(
        config: &StorageConfig,
        verbose: u8,
        http_client: Option<SharedHttpClient>,
    ) -> Result<Self> {
        config.validate()?;

        // Reused for every operation
        let runtime = Runtime::new()
            .map_err(|e| StorageError::Runtime(format!("Failed to create runtime: {}", e)))?;

        log_utils::debug("Creating S3 client with these parameters:", verbose);
        log_utils::debug(&format!("Region: {}", config.region), verbose);
        log_utils::debug(
            &format!(
                "Endpoint: {}",
                config.endpoint.as_deref().unwrap_or("(aws default)")
            ),
            verbose,
        );
        log_utils::debug(&format!("Key ID: {}", mask_credential(&config.key)), verbose);

        let credentials = Credentials::new(
            config.key.clone(),
            config.secret.clone(),
            None,
            None,
            "StorageConfigStatic",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts))
            .force_path_style(config.force_path_style)
            .behavior_version(BehaviorVersion::latest());

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }
        if let Some(secs) = config.operation_timeout_secs {
            builder = builder.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(secs))
                    .build(),
            );
        }
        if let Some(http_client) = http_client {
            builder = builder.http_client(http_client);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            runtime: Some(runtime),
            urls: ObjectUrlBuilder::from_config(config),
            verbose,
        })
    }

    /// Public URL an object with this key would be served from
    pub fn object_url(&self, key: &str) -> String {
        self.urls.url_for(key)
    }

    /// Drive a future to completion on the owned runtime
    fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| StorageError::Runtime("runtime already shut down".to_string()))?;

        match Handle::try_current() {
            Err(_) => Ok(runtime.block_on(future)),
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                Ok(tokio::task::block_in_place(|| runtime.block_on(future)))
            }
            Ok(_) => Err(StorageError::Runtime(
                "cannot block inside a current-thread tokio runtime".to_string(),
            )),
        }
    }
}

impl Drop for S3Backend {
    fn drop(&mut self) {
        // A plain drop panics when it happens inside async code
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

fn canned_acl(acl: ObjectAcl) -> ObjectCannedAcl {
    match acl {
        ObjectAcl::PublicRead => ObjectCannedAcl::PublicRead,
    }
}

fn sdk_error<E: std::error::Error>(operation: &'static str, err: E) -> StorageError {
    StorageError::backend(operation, DisplayErrorContext(err).to_string())
}

impl StorageBackend for S3Backend {
    fn put_object(&self, request: &PutObjectRequest) -> Result<PutObjectOutput> {
        log_utils::debug(
            &format!(
                "PutObject bucket={} key={} acl={} content_type={} body={}",
                request.bucket,
                request.key,
                request.acl.as_str(),
                request.content_type,
                request.body.describe()
            ),
            self.verbose,
        );

        let response = self.block_on(async {
            // Stream files straight from disk instead of loading them into memory
            let body = match &request.body {
                PutBody::SourceFile(path) => ByteStream::from_path(path)
                    .await
                    .map_err(|e| sdk_error("PutObject", e))?,
                PutBody::Bytes(data) => ByteStream::from(data.clone()),
            };

            self.client
                .put_object()
                .acl(canned_acl(request.acl))
                .bucket(&request.bucket)
                .key(&request.key)
                .content_type(&request.content_type)
                .body(body)
                .send()
                .await
                .map_err(|e| sdk_error("PutObject", e))
        })??;

        Ok(PutObjectOutput {
            object_url: self.urls.url_for(&request.key),
            e_tag: response.e_tag().map(|tag| tag.replace('"', "")),
        })
    }

    fn delete_object(&self, request: &DeleteObjectRequest) -> Result<DeleteObjectOutput> {
        log_utils::debug(
            &format!("DeleteObject bucket={} key={}", request.bucket, request.key),
            self.verbose,
        );

        let response = self
            .block_on(
                self.client
                    .delete_object()
                    .bucket(&request.bucket)
                    .key(&request.key)
                    .send(),
            )?
            .map_err(|e| sdk_error("DeleteObject", e))?;

        Ok(DeleteObjectOutput {
            key: request.key.clone(),
            delete_marker: response.delete_marker().unwrap_or(false),
            version_id: response.version_id().map(str::to_string),
        })
    }
}
