//! Byte sources for the consumer loop.
//!
//! A [`Transport`] opens one artifact per cycle and hands it out chunk by
//! chunk, so the renderer can draw while the body is still arriving.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eink_quant::wire::FrameFormat;

use crate::error::FetchError;
use crate::models::{fingerprint, FRAME_FORMAT_HEADER};
use crate::services::PreparePipeline;

/// Chunk size for in-memory sources; matches a small device read buffer.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Upper bound for one whole fetch, body included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An open artifact stream.
#[async_trait]
pub trait ChunkSource: Send {
    /// Next slice of the body, `Ok(None)` once the body has ended.
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError>;
}

/// Where artifacts come from.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start one artifact. Errors here mean nothing may be drawn.
    async fn open(&self) -> Result<Box<dyn ChunkSource>, FetchError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// An artifact already held in memory, released in fixed-size chunks.
pub struct BufferedChunks {
    bytes: Vec<u8>,
    offset: usize,
    chunk_size: usize,
}

impl BufferedChunks {
    pub fn new(bytes: Vec<u8>, chunk_size: usize) -> Self {
        Self {
            bytes,
            offset: 0,
            chunk_size: chunk_size.max(1),
        }
    }
}

#[async_trait]
impl ChunkSource for BufferedChunks {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError> {
        if self.offset >= self.bytes.len() {
            return Ok(None);
        }
        let end = (self.offset + self.chunk_size).min(self.bytes.len());
        let chunk = self.bytes[self.offset..end].to_vec();
        self.offset = end;
        Ok(Some(chunk))
    }
}

/// GET the artifact over HTTP and stream the response body.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    expected_fingerprint: String,
    expected_len: usize,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, format: &FrameFormat) -> Result<Self, FetchError> {
        Self::with_timeout(url, format, DEFAULT_REQUEST_TIMEOUT)
    }

    /// A server that accepts the connection but stalls fails the cycle
    /// after `timeout` instead of blocking it.
    pub fn with_timeout(
        url: impl Into<String>,
        format: &FrameFormat,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            expected_fingerprint: fingerprint(format),
            expected_len: format.byte_len(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

struct HttpChunks {
    response: reqwest::Response,
}

#[async_trait]
impl ChunkSource for HttpChunks {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError> {
        let chunk = self
            .response
            .chunk()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;
        Ok(chunk.map(|bytes| bytes.to_vec()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(&self) -> Result<Box<dyn ChunkSource>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CONNECTION, "close")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(served) = response
            .headers()
            .get(FRAME_FORMAT_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if served != self.expected_fingerprint {
                tracing::warn!(
                    expected = %self.expected_fingerprint,
                    served,
                    "Server frame format differs from local configuration"
                );
            }
        }

        if let Some(length) = response.content_length() {
            if length as usize != self.expected_len {
                tracing::warn!(
                    expected = self.expected_len,
                    actual = length,
                    "Content-Length does not match frame size"
                );
            }
        }

        Ok(Box::new(HttpChunks { response }))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Run the encode pipeline in process instead of fetching.
pub struct LocalTransport {
    pipeline: Arc<PreparePipeline>,
    source: PathBuf,
    chunk_size: usize,
}

impl LocalTransport {
    pub fn new(pipeline: Arc<PreparePipeline>, source: PathBuf) -> Self {
        Self {
            pipeline,
            source,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn open(&self) -> Result<Box<dyn ChunkSource>, FetchError> {
        let pipeline = self.pipeline.clone();
        let source = self.source.clone();
        let frame = tokio::task::spawn_blocking(move || pipeline.prepare_file(&source))
            .await
            .map_err(|e| FetchError::Transport(format!("prepare task failed: {e}")))??;

        Ok(Box::new(BufferedChunks::new(frame.bytes, self.chunk_size)))
    }

    fn describe(&self) -> String {
        self.source.display().to_string()
    }
}
