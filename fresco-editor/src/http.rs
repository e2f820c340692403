//! HTTP implementation of the upload gateway.

use async_trait::async_trait;
use url::Url;

use crate::gateway::{
    RetryConfig, UploadError, UploadGateway, UploadRequest, UploadResult, UploadedMedia,
};

/// Upload gateway backed by an HTTP endpoint.
///
/// Sends the file bytes as the request body with the declared media kind and
/// original file name in headers, and expects a JSON body of
/// `{"url": ..., "mediaType": ...}` on success. Transient transport failures
/// are retried with exponential backoff; rejections are returned as-is.
#[derive(Debug, Clone)]
pub struct HttpUploadGateway {
    client: reqwest::Client,
    endpoint: Url,
    retry: RetryConfig,
}

impl HttpUploadGateway {
    /// Create a gateway for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidEndpoint`] if the endpoint is not a
    /// valid URL.
    pub fn new(endpoint: &str) -> UploadResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|error| UploadError::InvalidEndpoint(format!("{endpoint}: {error}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            retry: RetryConfig::default(),
        })
    }

    /// Replace the retry schedule.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn upload_once(&self, request: &UploadRequest) -> UploadResult<UploadedMedia> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("content-type", "application/octet-stream")
            .header("x-media-kind", request.media_type.as_str())
            .header("x-file-name", request.file_name.as_str())
            .body(request.bytes.clone())
            .send()
            .await
            .map_err(|error| UploadError::Transport(error.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(UploadError::Transport(format!("gateway returned {status}")));
        }
        if !status.is_success() {
            return Err(UploadError::Rejected(format!("gateway returned {status}")));
        }

        response
            .json::<UploadedMedia>()
            .await
            .map_err(|error| UploadError::InvalidResponse(error.to_string()))
    }
}

#[async_trait]
impl UploadGateway for HttpUploadGateway {
    async fn upload(&self, request: UploadRequest) -> UploadResult<UploadedMedia> {
        let mut attempt = 0;
        loop {
            match self.upload_once(&request).await {
                Ok(media) => return Ok(media),
                Err(error) if error.is_retryable() && attempt + 1 < self.retry.max_attempts => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "Upload of {} failed (attempt {}/{}), retrying in {:?}: {}",
                        request.file_name,
                        attempt + 1,
                        self.retry.max_attempts,
                        delay,
                        error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
