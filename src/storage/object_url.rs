use crate::config::StorageConfig;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters kept verbatim in a key: RFC 3986 unreserved plus `/`
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Builds the public URL of an object.
/// The SDK's put output carries no URL, so it is derived from the client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrlBuilder {
    base: String,
}

impl ObjectUrlBuilder {
    pub fn from_config(config: &StorageConfig) -> Self {
        let bucket = config.bucket.trim();
        let base = if let Some(public) = &config.public_base_url {
            public.trim_end_matches('/').to_string()
        } else if let Some(endpoint) = &config.endpoint {
            let endpoint = endpoint.trim_end_matches('/');
            if config.force_path_style {
                format!("{}/{}", endpoint, bucket)
            } else {
                match endpoint.split_once("://") {
                    Some((scheme, host)) => format!("{}://{}.{}", scheme, bucket, host),
                    None => format!("https://{}.{}", bucket, endpoint),
                }
            }
        } else {
            let host = aws_host(config.region.trim());
            // The *.s3 wildcard certificate does not cover dotted bucket names
            if config.force_path_style || bucket.contains('.') {
                format!("https://{}/{}", host, bucket)
            } else {
                format!("https://{}.{}", bucket, host)
            }
        };
        Self { base }
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base, utf8_percent_encode(key, KEY_ENCODE_SET))
    }
}

/// S3 host for a region, without the bucket
fn aws_host(region: &str) -> String {
    match region {
        "" | "us-east-1" => "s3.amazonaws.com".to_string(),
        china if china.starts_with("cn-") => format!("s3.{}.amazonaws.com.cn", china),
        region => format!("s3.{}.amazonaws.com", region),
    }
}
