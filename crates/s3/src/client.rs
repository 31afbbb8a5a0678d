//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from ds-core.

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use ds_core::{Error, ObjectInfo, ObjectPath, ObjectStore, PutOptions, Result, StorageConfig};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    endpoint: String,
}

impl S3Client {
    /// Create a new S3 client from a storage configuration
    pub async fn new(config: StorageConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;

        let credentials = aws_credential_types::Credentials::new(
            config.access_key,
            config.secret_key,
            None, // session token
            None, // expiry
            "docstore-static-credentials",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region))
            .endpoint_url(&endpoint)
            .load()
            .await;

        // MinIO and most self-hosted backends only serve path-style requests
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        tracing::debug!(endpoint = %endpoint, "Created S3 client");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            endpoint,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Get the endpoint URL this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for S3Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Client")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(
        &self,
        path: &ObjectPath,
        data: Vec<u8>,
        options: PutOptions,
    ) -> Result<ObjectInfo> {
        let size = data.len() as i64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .body(body);

        if let Some(ct) = &options.content_type {
            request = request.content_type(ct);
        }

        if !options.metadata.is_empty() {
            request = request.set_metadata(Some(options.metadata.clone()));
        }

        tracing::debug!(bucket = %path.bucket, key = %path.key, size, "PUT object");
        let response = request.send().await.map_err(|e| map_sdk_error(e, path))?;

        let mut info = ObjectInfo::file(&path.key, size);
        if let Some(etag) = response.e_tag() {
            info.etag = Some(etag.trim_matches('"').to_string());
        }
        info.content_type = options.content_type;
        info.metadata = options.metadata;
        info.last_modified = Some(jiff::Timestamp::now());

        Ok(info)
    }

    async fn get_object(&self, path: &ObjectPath) -> Result<Vec<u8>> {
        tracing::debug!(bucket = %path.bucket, key = %path.key, "GET object");
        let response = self
            .inner
            .get_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, path))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn head_object(&self, path: &ObjectPath) -> Result<ObjectInfo> {
        tracing::debug!(bucket = %path.bucket, key = %path.key, "HEAD object");
        let response = self
            .inner
            .head_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, path))?;

        let size = response.content_length().unwrap_or(0);
        let mut info = ObjectInfo::file(&path.key, size);

        if let Some(modified) = response.last_modified() {
            info.last_modified = jiff::Timestamp::from_second(modified.secs()).ok();
        }

        if let Some(etag) = response.e_tag() {
            info.etag = Some(etag.trim_matches('"').to_string());
        }

        if let Some(ct) = response.content_type() {
            info.content_type = Some(ct.to_string());
        }

        if let Some(metadata) = response.metadata() {
            info.metadata = metadata.clone();
        }

        Ok(info)
    }
}

/// Convert an SDK failure into a ds-core error
fn map_sdk_error<E>(err: SdkError<E, HttpResponse>, path: &ObjectPath) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err
        .as_service_error()
        .and_then(|e| e.code())
        .map(str::to_string);
    // HEAD responses carry no error body, only the status
    let status = err.raw_response().map(|r| r.status().as_u16());
    let message = DisplayErrorContext(&err).to_string();

    classify_error(code.as_deref(), status, message, path)
}

fn classify_error(
    code: Option<&str>,
    status: Option<u16>,
    message: String,
    path: &ObjectPath,
) -> Error {
    match (code, status) {
        (Some("NoSuchBucket"), _) => Error::NotFound(format!("Bucket not found: {}", path.bucket)),
        (Some("NoSuchKey" | "NotFound"), _) | (None, Some(404)) => {
            Error::NotFound(path.to_string())
        }
        (
            Some(
                "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken",
            ),
            _,
        )
        | (None, Some(401 | 403)) => Error::Auth(message),
        _ => Error::Network(message),
    }
}
