//! Shared helpers for integration tests

#![allow(dead_code)]

use doc_langid::detection::model::{LanguageModel, ModelLoader, Prediction};
use doc_langid::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A captured HTTP request.
pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

/// Serve a single HTTP response on an ephemeral port.
///
/// Returns the base URL and a receiver for the request the server saw.
pub async fn serve_once(
    status: &str,
    body: Vec<u8>,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(request);
    });

    (format!("http://{}", addr), rx)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> CapturedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break buffer.len();
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        head,
        body: buffer[header_end.min(buffer.len())..].to_vec(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Model returning canned predictions, best first.
pub struct CannedModel {
    predictions: Vec<Prediction>,
}

impl LanguageModel for CannedModel {
    fn predict(&self, _text: &str, k: usize) -> Result<Vec<Prediction>> {
        Ok(self.predictions.iter().take(k).cloned().collect())
    }
}

/// Loader that counts loads and hands out a `CannedModel`.
pub struct CannedLoader {
    pub loads: Arc<AtomicUsize>,
    predictions: Vec<Prediction>,
}

impl CannedLoader {
    pub fn new(predictions: &[(&str, f32)]) -> Self {
        Self {
            loads: Arc::new(AtomicUsize::new(0)),
            predictions: predictions
                .iter()
                .map(|(label, score)| Prediction {
                    label: label.to_string(),
                    score: *score,
                })
                .collect(),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelLoader for CannedLoader {
    fn load(&self, _path: &Path) -> Result<Arc<dyn LanguageModel>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(CannedModel {
            predictions: self.predictions.clone(),
        }))
    }
}

/// Write a placeholder model file so the cache's existence check passes.
pub fn placeholder_model(dir: &Path) -> PathBuf {
    let path = dir.join("lid.176.bin");
    std::fs::write(&path, b"placeholder").unwrap();
    path
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
