//! Stream-based data source.
//!
//! Receives health samples from an async byte stream, one JSON object per
//! line. This is the network mode: a gateway (or anything else) can push
//! samples over a TCP connection as they are measured.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use crate::data::{HealthSample, HealthUpdate};

use super::DataSource;

/// A data source that receives health samples from an async stream.
///
/// Spawns a background task that reads newline-delimited JSON from the
/// provided reader and makes samples available via `poll()`. Each line is
/// parsed as one [`HealthSample`] and appended to the history.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use gatewatch::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"time\":\"08:00\",\"score\":91}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<HealthSample>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// The reader should provide newline-delimited JSON, one sample per line.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(64);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        // EOF
                        *error_handle.lock().unwrap() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => match serde_json::from_str::<HealthSample>(line.trim()) {
                        Ok(sample) => {
                            *error_handle.lock().unwrap() = None;
                            if tx.send(sample).await.is_err() {
                                // Receiver dropped
                                break;
                            }
                        }
                        Err(e) => {
                            *error_handle.lock().unwrap() = Some(format!("Parse error: {}", e));
                        }
                    },
                    Err(e) => {
                        *error_handle.lock().unwrap() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
        }
    }
}

impl DataSource for StreamSource {
    fn poll(&mut self) -> Option<HealthUpdate> {
        match self.receiver.try_recv() {
            Ok(sample) => Some(HealthUpdate::Append(sample)),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                let mut err = self.last_error.lock().unwrap();
                if err.is_none() {
                    *err = Some("Stream disconnected".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}
