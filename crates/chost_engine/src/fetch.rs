use std::time::Duration;

use chost_logging::{chost_debug, chost_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::decode::decode_html;
use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// `None` keeps the transport's own timeout behavior.
    pub request_timeout: Option<Duration>,
    /// `None` accepts a body of any size.
    pub max_bytes: Option<u64>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            max_bytes: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// Single GET per call; no retries, no custom headers.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Error when `len` exceeds the configured cap, if there is one.
    fn check_size(&self, len: u64) -> Result<(), FetchError> {
        match self.settings.max_bytes {
            Some(max_bytes) if len > max_bytes => Err(FetchError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(len),
                },
                "response too large",
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        chost_debug!("GET {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            self.check_size(content_len)?;
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            self.check_size(bytes.len() as u64 + chunk.len() as u64)?;
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_html(&bytes, content_type.as_deref());

        chost_info!(
            "fetched {} bytes from {} ({})",
            bytes.len(),
            final_url,
            decoded.encoding_label
        );

        Ok(FetchOutput {
            html: decoded.html,
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                content_type,
                encoding_label: decoded.encoding_label,
                byte_len: bytes.len() as u64,
            },
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
