//! Text extraction from various file formats

use crate::error::{LangIdError, Result};
use log::debug;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use reqwest::header::ACCEPT;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Client for an already-running Apache Tika server.
pub struct TikaExtractor {
    client: reqwest::Client,
    endpoint: String,
}

impl TikaExtractor {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TextExtractor for TikaExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let url = format!("{}/tika", self.endpoint);
        debug!("PUT {} ({} bytes)", url, bytes.len());

        let response = self
            .client
            .put(&url)
            .header(ACCEPT, "text/plain")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                LangIdError::Extraction(format!(
                    "Parsing service unreachable at {}: {}",
                    self.endpoint, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LangIdError::Extraction(format!(
                "Parsing service returned {} for '{}'",
                status,
                path.display()
            )));
        }

        let text = response.text().await?;
        Ok(text.trim().to_string())
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

fn markdown_to_text(markdown: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();

    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
    let stripped = tag_re.replace_all(&html_output, "");

    let text = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
