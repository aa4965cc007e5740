use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::io::{Cursor, Write};

use s3unzip::pipeline::{self, DecompressCommand, DecompressError};
use s3unzip::s3::S3Client;

/// Source bucket used by the integration tests
const SOURCE_BUCKET: &str = "s3unzip-source";

/// Target bucket used by the cross-bucket test
const TARGET_BUCKET: &str = "s3unzip-target";

/// Helper function to create an S3 client pointing to localstack
async fn create_localstack_client() -> Client {
    let endpoint_url =
        std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_string());

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region("us-east-1")
        .load()
        .await;

    // Build S3-specific config with endpoint
    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .endpoint_url(&endpoint_url)
        .force_path_style(true) // Required for LocalStack
        .build();

    Client::from_conf(s3_config)
}

/// Create a bucket, tolerating reruns against the same localstack
async fn ensure_bucket(client: &Client, bucket: &str) {
    let _ = client.create_bucket().bucket(bucket).send().await;
}

/// Build a three-entry zip archive in memory
fn create_test_zip() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

    writer
        .start_file("x.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"first entry\n").unwrap();

    writer
        .start_file("y.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"second entry\n").unwrap();

    writer
        .start_file("dir/nested.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"nested entry\n").unwrap();

    writer.finish().unwrap().into_inner()
}

/// Upload the test archive to the source bucket with a metadata pair
async fn upload_test_archive(client: &Client, key: &str) {
    client
        .put_object()
        .bucket(SOURCE_BUCKET)
        .key(key)
        .metadata("owner", "tests")
        .body(Bytes::from(create_test_zip()).into())
        .send()
        .await
        .expect("Failed to upload test archive");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_decompress_into_target_bucket_with_metadata_and_delete() {
    let client = create_localstack_client().await;

    // Verify localstack is running
    let resp = client.list_buckets().send().await;
    assert!(
        resp.is_ok(),
        "Failed to connect to Localstack S3. Is it running on localhost:4566?"
    );

    ensure_bucket(&client, SOURCE_BUCKET).await;
    ensure_bucket(&client, TARGET_BUCKET).await;
    upload_test_archive(&client, "a.zip").await;

    let store = S3Client::from_client(client.clone());
    let mut command = DecompressCommand::new(SOURCE_BUCKET, "a.zip");
    command.target_bucket = Some(TARGET_BUCKET.to_string());
    command.target_prefix = "out".to_string();
    command.copy_metadata = true;
    command.delete_source_on_success = true;

    let summary = pipeline::run(&store, &command)
        .await
        .expect("Pipeline run failed");

    assert_eq!(summary.uploaded.len(), 3);
    assert!(summary.source_deleted);
    assert!(summary.delete_error.is_none());

    // The entries exist at their prefix-joined keys and carry the metadata
    let got = client
        .get_object()
        .bucket(TARGET_BUCKET)
        .key("out/x.txt")
        .send()
        .await
        .expect("out/x.txt missing from target bucket");
    assert_eq!(
        got.metadata().and_then(|m| m.get("owner")).map(String::as_str),
        Some("tests")
    );
    let body = got.body.collect().await.unwrap().into_bytes();
    assert_eq!(&body[..], b"first entry\n");

    let nested = client
        .get_object()
        .bucket(TARGET_BUCKET)
        .key("out/dir/nested.txt")
        .send()
        .await
        .expect("out/dir/nested.txt missing from target bucket");
    let nested_body = nested.body.collect().await.unwrap().into_bytes();
    assert_eq!(&nested_body[..], b"nested entry\n");

    // The source archive was deleted
    let head = client
        .head_object()
        .bucket(SOURCE_BUCKET)
        .key("a.zip")
        .send()
        .await;
    assert!(head.is_err(), "Source archive should have been deleted");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_decompress_defaults_to_source_bucket_and_keeps_archive() {
    let client = create_localstack_client().await;

    let resp = client.list_buckets().send().await;
    assert!(resp.is_ok(), "Failed to connect to Localstack S3");

    ensure_bucket(&client, SOURCE_BUCKET).await;
    upload_test_archive(&client, "keep.zip").await;

    let store = S3Client::from_client(client.clone());
    let command = DecompressCommand::new(SOURCE_BUCKET, "keep.zip");

    let summary = pipeline::run(&store, &command)
        .await
        .expect("Pipeline run failed");

    assert_eq!(summary.uploaded.len(), 3);
    assert!(!summary.source_deleted);

    // Entries land in the source bucket under their bare names
    let got = client
        .get_object()
        .bucket(SOURCE_BUCKET)
        .key("y.txt")
        .send()
        .await
        .expect("y.txt missing from source bucket");

    // Metadata is not copied unless asked for
    assert!(got.metadata().map(|m| m.is_empty()).unwrap_or(true));

    // The archive is still there
    client
        .head_object()
        .bucket(SOURCE_BUCKET)
        .key("keep.zip")
        .send()
        .await
        .expect("Source archive should have been kept");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_non_zip_object_is_rejected() {
    let client = create_localstack_client().await;

    let resp = client.list_buckets().send().await;
    assert!(resp.is_ok(), "Failed to connect to Localstack S3");

    ensure_bucket(&client, SOURCE_BUCKET).await;
    client
        .put_object()
        .bucket(SOURCE_BUCKET)
        .key("notes.txt")
        .body(Bytes::from_static(b"just some notes, not an archive").into())
        .send()
        .await
        .expect("Failed to upload notes.txt");

    let store = S3Client::from_client(client.clone());
    let command = DecompressCommand::new(SOURCE_BUCKET, "notes.txt");

    let result = pipeline::run(&store, &command).await;
    assert!(matches!(result, Err(DecompressError::NotZip { .. })));

    // The rejected object is left untouched
    client
        .head_object()
        .bucket(SOURCE_BUCKET)
        .key("notes.txt")
        .send()
        .await
        .expect("Rejected object should still exist");
}
