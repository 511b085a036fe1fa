//! Streaming download protocol
//!
//! A [`DownloadStream`] yields `Ok(chunk)` items as bytes arrive, then ends
//! (`None`) on natural completion. A failure is yielded once as `Err` and
//! the stream terminates right after it, so data never follows an error and
//! an error never follows the end.

use bridge_traits::error::BridgeError;
use bridge_traits::http::{ByteStream, StreamingResponse};
use bytes::{Bytes, BytesMut};
use futures::stream::{FusedStream, Stream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{ProviderError, Result};

type ErrorMapper = Box<dyn Fn(BridgeError) -> ProviderError + Send + Sync>;

/// Binary content streamed from a provider to the caller
///
/// Dropping the stream before it ends releases the underlying connection
/// instead of draining the remaining body.
pub struct DownloadStream {
    body: Option<ByteStream>,
    map_err: ErrorMapper,
    content_length: Option<u64>,
    content_type: Option<String>,
}

impl DownloadStream {
    /// Wrap a raw chunk stream; `map_err` classifies mid-stream failures
    pub fn new<F>(body: ByteStream, map_err: F) -> Self
    where
        F: Fn(BridgeError) -> ProviderError + Send + Sync + 'static,
    {
        Self {
            body: Some(body),
            map_err: Box::new(map_err),
            content_length: None,
            content_type: None,
        }
    }

    /// Wrap a successful streaming response, keeping its length and type
    pub fn from_response<F>(response: StreamingResponse, map_err: F) -> Self
    where
        F: Fn(BridgeError) -> ProviderError + Send + Sync + 'static,
    {
        let content_length = response.content_length();
        let content_type = response.content_type().map(str::to_string);

        Self {
            body: Some(response.body),
            map_err: Box::new(map_err),
            content_length,
            content_type,
        }
    }

    pub fn with_content_length(mut self, length: Option<u64>) -> Self {
        self.content_length = length;
        self
    }

    /// `Content-Length` announced by the remote, if any
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Read the whole remaining body into memory.
    ///
    /// Convenient for small payloads and tests; large downloads should be
    /// forwarded chunk by chunk instead.
    pub async fn collect_bytes(mut self) -> Result<Bytes> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl Stream for DownloadStream {
    type Item = Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(body) = this.body.as_mut() else {
            return Poll::Ready(None);
        };

        match body.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => Poll::Ready(Some(Ok(chunk))),
            Poll::Ready(Some(Err(error))) => {
                this.body = None;
                Poll::Ready(Some(Err((this.map_err)(error))))
            }
            Poll::Ready(None) => {
                this.body = None;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl FusedStream for DownloadStream {
    fn is_terminated(&self) -> bool {
        self.body.is_none()
    }
}

impl fmt::Debug for DownloadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadStream")
            .field("terminated", &self.body.is_none())
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .finish()
    }
}
