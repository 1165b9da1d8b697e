//! Script feed loading and placeholder parsing.
//!
//! The feed can come from a local file or an http(s) URL. Card content is
//! split into text, placeholder and line-break segments; placeholders are
//! the shortest bracketed runs (`[Cx Name]`, `[Order ID]`).

use crate::error::FeedError;
use crate::models::{ContentSegment, ScriptRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use url::Url;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.+?)\]").expect("placeholder regex is valid"));

// ============================================================================
// Feed Source
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    File(PathBuf),
    Remote(Url),
}

impl FeedSource {
    /// Anything with a URL scheme must be http(s); everything else is a path.
    pub fn parse(source: &str) -> Result<Self, FeedError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(FeedError::InvalidSource("empty feed source".to_string()));
        }
        if !source.contains("://") {
            return Ok(FeedSource::File(PathBuf::from(source)));
        }

        let url = Url::parse(source).map_err(|e| FeedError::InvalidSource(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| FeedError::InvalidSource(format!("bad file URL: {}", source)))?;
                return Ok(FeedSource::File(path));
            }
            other => {
                return Err(FeedError::InvalidSource(format!(
                    "unsupported scheme: {}",
                    other
                )))
            }
        }
        if url.host_str().is_none() {
            return Err(FeedError::InvalidSource("no host in URL".to_string()));
        }
        Ok(FeedSource::Remote(url))
    }
}

// ============================================================================
// Loading
// ============================================================================

pub fn parse_feed(json: &str) -> Result<Vec<ScriptRecord>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

pub async fn load_feed(source: &FeedSource) -> Result<Vec<ScriptRecord>, FeedError> {
    let records = match source {
        FeedSource::File(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            parse_feed(&json)?
        }
        FeedSource::Remote(url) => {
            let client = reqwest::Client::builder()
                .user_agent("callscripts/0.1")
                .build()?;
            client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<ScriptRecord>>()
                .await?
        }
    };
    log::info!("Loaded {} script records", records.len());
    Ok(records)
}

// ============================================================================
// Placeholder Parsing
// ============================================================================

/// Split card content into text, placeholders and line breaks.
pub fn parse_content(content: &str) -> Vec<ContentSegment> {
    let mut segments = Vec::new();
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            segments.push(ContentSegment::LineBreak);
        }
        let mut last = 0;
        for m in PLACEHOLDER_RE.find_iter(line) {
            if m.start() > last {
                segments.push(ContentSegment::Text(line[last..m.start()].to_string()));
            }
            segments.push(ContentSegment::Placeholder(m.as_str().to_string()));
            last = m.end();
        }
        if last < line.len() {
            segments.push(ContentSegment::Text(line[last..].to_string()));
        }
    }
    segments
}

/// Distinct placeholders of a piece of content, in order of appearance.
pub fn placeholders(content: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for m in PLACEHOLDER_RE.find_iter(content) {
        if !out.iter().any(|p| p == m.as_str()) {
            out.push(m.as_str().to_string());
        }
    }
    out
}
