use bridge_traits::error::BridgeError;
use bytes::Bytes;
use core_provider::{DownloadStream, ErrorKind, ProviderError};
use futures::stream::{self, FusedStream, Stream, StreamExt};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

fn chunk(data: &'static [u8]) -> Result<Bytes, BridgeError> {
    Ok(Bytes::from_static(data))
}

fn transport(error: BridgeError) -> ProviderError {
    ProviderError::Transport(error)
}

#[tokio::test]
async fn test_chunks_forwarded_in_order() {
    let body = stream::iter(vec![chunk(b"ab"), chunk(b"cd"), chunk(b"ef")]);
    let mut download = DownloadStream::new(Box::pin(body), transport);

    let mut received = Vec::new();
    while let Some(item) = download.next().await {
        received.push(item.unwrap());
    }

    assert_eq!(received, vec!["ab", "cd", "ef"]);
    assert!(download.is_terminated());
}

#[tokio::test]
async fn test_no_data_after_error() {
    let body = stream::iter(vec![
        chunk(b"first"),
        Err(BridgeError::Connection("reset by peer".to_string())),
        chunk(b"late"),
    ]);
    let mut download = DownloadStream::new(Box::pin(body), transport);

    assert_eq!(download.next().await.unwrap().unwrap(), "first");

    let error = download.next().await.unwrap().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Transport);

    assert!(download.is_terminated());
    assert!(download.next().await.is_none());
    assert!(download.next().await.is_none());
}

#[tokio::test]
async fn test_no_error_after_end() {
    // Yields one chunk, ends, then would fail if polled again
    let mut polls = 0;
    let body = stream::poll_fn(move |_| {
        polls += 1;
        match polls {
            1 => Poll::Ready(Some(chunk(b"only"))),
            2 => Poll::Ready(None),
            _ => Poll::Ready(Some(Err(BridgeError::OperationFailed(
                "polled after end".to_string(),
            )))),
        }
    });
    let mut download = DownloadStream::new(Box::pin(body), transport);

    assert_eq!(download.next().await.unwrap().unwrap(), "only");
    assert!(download.next().await.is_none());
    assert!(download.next().await.is_none());
}

#[tokio::test]
async fn test_error_mapper_is_applied() {
    let body = stream::iter(vec![Err(BridgeError::Timeout("read".to_string()))]);
    let mut download =
        DownloadStream::new(Box::pin(body), |_| ProviderError::auth("facebook"));

    let error = download.next().await.unwrap().unwrap_err();
    assert!(error.is_auth_error());
}

#[tokio::test]
async fn test_collect_bytes() {
    let body = stream::iter(vec![chunk(b"hello "), chunk(b"world")]);
    let download =
        DownloadStream::new(Box::pin(body), transport).with_content_length(Some(11));

    assert_eq!(download.content_length(), Some(11));
    assert_eq!(download.content_type(), None);
    assert_eq!(download.collect_bytes().await.unwrap(), "hello world");
}

#[tokio::test]
async fn test_collect_bytes_stops_at_error() {
    let body = stream::iter(vec![
        chunk(b"partial"),
        Err(BridgeError::Connection("closed".to_string())),
    ]);
    let download = DownloadStream::new(Box::pin(body), transport);

    assert!(matches!(
        download.collect_bytes().await,
        Err(ProviderError::Transport(BridgeError::Connection(_)))
    ));
}

#[tokio::test]
async fn test_empty_body() {
    let body = stream::iter(Vec::<Result<Bytes, BridgeError>>::new());
    let mut download = DownloadStream::new(Box::pin(body), transport);

    assert!(!download.is_terminated());
    assert!(download.next().await.is_none());
    assert!(download.is_terminated());
}

/// Endless body that counts its polls and records when it is dropped
struct TrackedBody {
    polls: Arc<AtomicUsize>,
    dropped: Arc<AtomicBool>,
}

impl Stream for TrackedBody {
    type Item = Result<Bytes, BridgeError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(Some(chunk(b"frame")))
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_drop_releases_body_without_further_reads() {
    let polls = Arc::new(AtomicUsize::new(0));
    let dropped = Arc::new(AtomicBool::new(false));
    let body = TrackedBody {
        polls: Arc::clone(&polls),
        dropped: Arc::clone(&dropped),
    };

    let mut download = DownloadStream::new(Box::pin(body), transport);
    assert_eq!(download.next().await.unwrap().unwrap(), "frame");
    assert!(!dropped.load(Ordering::SeqCst));

    drop(download);

    assert!(dropped.load(Ordering::SeqCst));
    assert_eq!(polls.load(Ordering::SeqCst), 1);
}
