use clap::Parser;
use s3_storage::interfaces::MockStorageBackend;
use s3_storage::storage::{DeleteObjectOutput, PutBody, PutObjectOutput};
use s3_storage::{Args, Command, ObjectStorageClient, StorageError, run_command};
use std::fs;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn credentials_from_files_and_flags() -> Result<(), Box<dyn std::error::Error>> {
    let key_file = tempfile::NamedTempFile::new()?;
    let secret_file = tempfile::NamedTempFile::new()?;
    fs::write(key_file.path(), "AKIAFROMFILE\n")?;
    fs::write(secret_file.path(), "  secret-from-file  ")?;

    let args = Args::try_parse_from([
        "s3-storage",
        "--key-file",
        key_file.path().to_str().unwrap(),
        "--secret-file",
        secret_file.path().to_str().unwrap(),
        "--region",
        "us-east-1",
        "--bucket",
        "media",
        "delete",
        "images/a.png",
    ])?;

    assert_eq!(
        args.command,
        Command::Delete {
            name: "images/a.png".to_string()
        }
    );

    let config = args.storage_config_with(no_env)?;
    assert_eq!(config.key, "AKIAFROMFILE");
    assert_eq!(config.secret, "secret-from-file");
    assert_eq!(config.bucket, "media");
    Ok(())
}

#[test]
fn flags_override_config_file_which_overrides_env() -> Result<(), Box<dyn std::error::Error>> {
    let config_file = tempfile::NamedTempFile::new()?;
    fs::write(
        config_file.path(),
        r#"{"key": "file-key", "secret": "file-secret", "region": "eu-west-1", "bucket": "file-bucket"}"#,
    )?;

    let args = Args::try_parse_from([
        "s3-storage",
        "--config",
        config_file.path().to_str().unwrap(),
        "--bucket",
        "flag-bucket",
        "--endpoint",
        "http://127.0.0.1:9000",
        "--path-style",
        "delete",
        "x",
    ])?;

    let config = args.storage_config_with(|name| match name {
        "AWS_REGION" => Some("env-region".to_string()),
        "S3_ENDPOINT" => Some("http://env-endpoint".to_string()),
        _ => None,
    })?;
    assert_eq!(config.key, "file-key");
    assert_eq!(config.region, "eu-west-1");
    assert_eq!(config.bucket, "flag-bucket");
    assert_eq!(config.endpoint.as_deref(), Some("http://127.0.0.1:9000"));
    assert!(config.force_path_style);
    Ok(())
}

#[test]
fn missing_credentials_are_a_config_error() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::try_parse_from(["s3-storage", "--bucket", "media", "delete", "x"])?;
    assert!(matches!(
        args.storage_config_with(no_env),
        Err(StorageError::Config(_))
    ));
    Ok(())
}

#[test]
fn upload_data_needs_a_payload() {
    let parsed = Args::try_parse_from([
        "s3-storage",
        "upload-data",
        "docs/readme.txt",
        "--content-type",
        "text/plain",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn run_command_dispatches_upload_data() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::try_parse_from([
        "s3-storage",
        "upload-data",
        "docs/readme.txt",
        "-t",
        "text/plain",
        "--data",
        "hello",
    ])?;

    let mut backend = MockStorageBackend::new();
    backend
        .expect_put_object()
        .withf(|req| req.body == PutBody::Bytes(b"hello".to_vec()))
        .times(1)
        .returning(|req| {
            Ok(PutObjectOutput {
                object_url: format!("https://media.s3.amazonaws.com/{}", req.key),
                e_tag: None,
            })
        });

    let storage = ObjectStorageClient::new(backend, "media");
    let outcome = run_command(&storage, &args)?;
    assert_eq!(
        outcome.as_deref(),
        Some("https://media.s3.amazonaws.com/docs/readme.txt")
    );
    Ok(())
}

#[test]
fn run_command_reports_delete_failure_as_none() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::try_parse_from(["s3-storage", "delete", "images/a.png"])?;

    let mut backend = MockStorageBackend::new();
    backend
        .expect_delete_object()
        .times(1)
        .returning(|_| Err(StorageError::backend("DeleteObject", "AccessDenied")));

    let storage = ObjectStorageClient::new(backend, "media");
    assert_eq!(run_command(&storage, &args)?, None);

    // A succeeding backend yields the key back
    let mut backend = MockStorageBackend::new();
    backend.expect_delete_object().returning(|req| {
        Ok(DeleteObjectOutput {
            key: req.key.clone(),
            delete_marker: false,
            version_id: None,
        })
    });
    let storage = ObjectStorageClient::new(backend, "media");
    assert_eq!(
        run_command(&storage, &args)?.as_deref(),
        Some("images/a.png")
    );
    Ok(())
}
