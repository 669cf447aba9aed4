//! Line-oriented stdin reader.
//!
//! Reads on a background task and forwards each line over a channel, so
//! the chat loop can await input without blocking the runtime. Bytes that
//! are not valid UTF-8 are replaced rather than rejected. The channel
//! closes on EOF (Ctrl+D) or when the reader itself fails.

use tokio::io::{self, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

pub fn stdin_lines() -> mpsc::Receiver<String> {
    spawn_line_reader(io::stdin())
}

fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&buf);
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Input stream failed, closing session input");
                    break;
                }
            }
        }
    });

    rx
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
