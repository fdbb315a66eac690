use crate::config::StorageConfig;
use crate::errors::{Result, StorageError};
use crate::utils::file_utils::{check_readable_file, value_or_file};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub fn args_checks() -> Args {
    Args::parse()
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON config file with key, secret, region, bucket and optional endpoint settings
    #[arg(short = 'c', long, value_name = "FILE", value_parser = check_readable_file)]
    pub config: Option<PathBuf>,

    /// Access key ID (falls back to AWS_ACCESS_KEY_ID)
    #[arg(long, conflicts_with = "key_file")]
    pub key: Option<String>,
    /// File holding the access key ID
    #[arg(long, value_parser = check_readable_file)]
    pub key_file: Option<PathBuf>,

    /// Secret access key (falls back to AWS_SECRET_ACCESS_KEY)
    #[arg(long, conflicts_with = "secret_file")]
    pub secret: Option<String>,
    /// File holding the secret access key
    #[arg(long, value_parser = check_readable_file)]
    pub secret_file: Option<PathBuf>,

    /// Region of the bucket (falls back to AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Target bucket (falls back to S3_BUCKET)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// S3-compatible endpoint, e.g. http://127.0.0.1:9000 (falls back to S3_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Use path-style addressing, usually needed with --endpoint
    #[arg(long)]
    pub path_style: bool,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload a local file; the content type is detected from its extension
    UploadFile {
        #[arg(value_parser = check_readable_file)]
        path: PathBuf,
        /// Object name, may include directories
        name: String,
    },
    /// Upload a string or the raw bytes of a file with an explicit content type
    UploadData {
        name: String,
        #[arg(short = 't', long)]
        content_type: String,
        #[arg(
            long,
            conflicts_with = "data_file",
            required_unless_present = "data_file"
        )]
        data: Option<String>,
        #[arg(long, value_parser = check_readable_file)]
        data_file: Option<PathBuf>,
    },
    /// Delete an object
    Delete { name: String },
}

impl Args {
    /// Resolve the storage settings. Each field comes from, in order:
    /// the command line, the `--config` file, then the environment.
    pub fn storage_config(&self) -> Result<StorageConfig> {
        self.storage_config_with(|name| std::env::var(name).ok())
    }

    pub fn storage_config_with<F>(&self, lookup: F) -> Result<StorageConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => StorageConfig::parse_json(&std::fs::read_to_string(path)?)?,
            None => StorageConfig::default(),
        };
        let env = StorageConfig::from_lookup(lookup);

        let pick = |cli: Option<String>, file: &str, fallback: &str| -> String {
            cli.or_else(|| (!file.trim().is_empty()).then(|| file.to_string()))
                .unwrap_or_else(|| fallback.to_string())
        };

        config.key = pick(
            value_or_file(self.key.as_deref(), self.key_file.as_deref())?,
            &config.key,
            &env.key,
        );
        config.secret = pick(
            value_or_file(self.secret.as_deref(), self.secret_file.as_deref())?,
            &config.secret,
            &env.secret,
        );
        config.region = pick(self.region.clone(), &config.region, &env.region);
        config.bucket = pick(self.bucket.clone(), &config.bucket, &env.bucket);
        config.endpoint = self.endpoint.clone().or(config.endpoint).or(env.endpoint);
        if self.path_style {
            config.force_path_style = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// The payload for `upload-data`
    pub fn data_payload(&self) -> Result<Vec<u8>> {
        match &self.command {
            Command::UploadData {
                data, data_file, ..
            } => match (data, data_file) {
                (_, Some(path)) => Ok(std::fs::read(path)?),
                (Some(data), None) => Ok(data.clone().into_bytes()),
                (None, None) => Err(StorageError::Config(
                    "upload-data needs --data or --data-file".to_string(),
                )),
            },
            _ => Err(StorageError::Config(
                "only upload-data carries a payload".to_string(),
            )),
        }
    }
}
