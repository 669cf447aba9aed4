//! Newline-delimited JSON stream pump.
//!
//! Both Ollama endpoints answer a streaming request with one JSON object
//! per line. The pump reads the raw byte stream on a background task,
//! splits it into lines, lets the backend-specific parser classify each
//! line, and forwards the result over the fragment channel.

use futures::{Stream, StreamExt};
use parley_core::error::BackendError;
use parley_core::provider::{FragmentStream, StreamEvent, Usage};
use tracing::{debug, trace};

/// What a single NDJSON line means for the stream.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Line {
    /// A piece of generated text (may be empty).
    Fragment(String),
    /// The final line; generation is complete. It may still carry text.
    Done {
        content: String,
        usage: Option<Usage>,
    },
}

/// Spawn a task that turns `bytes` into a [`FragmentStream`].
///
/// Bytes are buffered until a full line is available, so a multi-byte
/// character split across network chunks still decodes correctly.
pub(crate) fn spawn_pump<S, B, E, F>(backend: String, bytes: S, parse: F) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: std::fmt::Display + Send,
    F: Fn(&str) -> Result<Line, BackendError> + Send + Sync + 'static,
{
    let (tx, rx) = tokio::sync::mpsc::channel(64);

    tokio::spawn(async move {
        let mut bytes = Box::pin(bytes);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    let _ = tx
                        .send(Err(BackendError::StreamInterrupted(e.to_string())))
                        .await;
                    return;
                }
            };
            buffer.extend_from_slice(chunk.as_ref());

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let raw: Vec<u8> = buffer.drain(..=pos).collect();
                match forward_line(&raw, &parse, &tx).await {
                    Flow::Continue => {}
                    Flow::Stop => return,
                }
            }
        }

        // The final line may arrive without a trailing newline.
        if !buffer.is_empty() {
            if let Flow::Stop = forward_line(&buffer, &parse, &tx).await {
                return;
            }
        }

        debug!(backend = %backend, "Stream closed before completion marker");
        let _ = tx
            .send(Err(BackendError::StreamInterrupted(
                "connection closed before the response completed".into(),
            )))
            .await;
    });

    rx
}

enum Flow {
    Continue,
    Stop,
}

async fn forward_line<F>(
    raw: &[u8],
    parse: &F,
    tx: &tokio::sync::mpsc::Sender<Result<StreamEvent, BackendError>>,
) -> Flow
where
    F: Fn(&str) -> Result<Line, BackendError>,
{
    let text = String::from_utf8_lossy(raw);
    let line = text.trim();
    if line.is_empty() {
        return Flow::Continue;
    }
    trace!(line = %line, "NDJSON line");

    match parse(line) {
        Ok(Line::Fragment(content)) => {
            if content.is_empty() {
                return Flow::Continue;
            }
            if tx.send(Ok(StreamEvent::Fragment { content })).await.is_err() {
                return Flow::Stop; // receiver dropped
            }
            Flow::Continue
        }
        Ok(Line::Done { content, usage }) => {
            if !content.is_empty()
                && tx.send(Ok(StreamEvent::Fragment { content })).await.is_err()
            {
                return Flow::Stop;
            }
            let _ = tx.send(Ok(StreamEvent::End { usage })).await;
            Flow::Stop
        }
        Err(e) => {
            let _ = tx.send(Err(e)).await;
            Flow::Stop
        }
    }
}

/// Ollama reports failures mid-stream as `{"error": "..."}`.
pub(crate) fn error_line(value: &serde_json::Value) -> Option<BackendError> {
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(|msg| BackendError::StreamInterrupted(msg.to_string()))
}

/// Token counts reported on the final line, when present.
pub(crate) fn usage_from_counts(prompt: Option<u32>, completion: Option<u32>) -> Option<Usage> {
    match (prompt, completion) {
        (None, None) => None,
        (p, c) => {
            let prompt_tokens = p.unwrap_or(0);
            let completion_tokens = c.unwrap_or(0);
            Some(Usage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            })
        }
    }
}
