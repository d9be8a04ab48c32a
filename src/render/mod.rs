//! Page rendering interface
//!
//! The crawler never talks to the network directly. It opens a
//! [`RenderSession`] from a [`PageRenderer`], navigates it to one URL, evaluates
//! extraction functions against the loaded document, and closes it again.
//! [`HttpRenderer`] is the bundled implementation; tests substitute scripted
//! renderers.

mod http;

pub use http::{build_http_client, HttpRenderer, HttpSession};

use crate::config::CrawlConfig;
use scraper::Html;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors produced while rendering or evaluating a page
///
/// All of these are terminal for the affected URL only.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Navigation timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Blocked {kind} resource: {url}")]
    Blocked { url: String, kind: ResourceKind },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("No page loaded in this session")]
    NoPage,

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Renderer unavailable: {0}")]
    Unavailable(String),
}

/// Resource categories a renderer can refuse to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Stylesheet,
    Font,
    Media,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Image,
        ResourceKind::Stylesheet,
        ResourceKind::Font,
        ResourceKind::Media,
    ];

    /// Classifies a `Content-Type` header value
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime == "text/css" {
            Some(Self::Stylesheet)
        } else if mime.starts_with("font/")
            || mime.starts_with("application/font-")
            || mime.starts_with("application/x-font")
            || mime == "application/vnd.ms-fontobject"
        {
            Some(Self::Font)
        } else if mime.starts_with("audio/") || mime.starts_with("video/") {
            Some(Self::Media)
        } else {
            None
        }
    }

    /// Classifies a URL path by its file extension
    pub fn from_path(path: &str) -> Option<Self> {
        let file = path.rsplit('/').next().unwrap_or("");
        let (_, extension) = file.rsplit_once('.')?;

        match extension.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "ico" | "bmp" | "avif" => {
                Some(Self::Image)
            }
            "css" => Some(Self::Stylesheet),
            "woff" | "woff2" | "ttf" | "otf" | "eot" => Some(Self::Font),
            "mp3" | "mp4" | "webm" | "ogg" | "wav" | "m4a" | "mov" | "avi" => Some(Self::Media),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Stylesheet => "stylesheet",
            Self::Font => "font",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-navigation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateOptions {
    pub timeout: Duration,
    pub blocked: BTreeSet<ResourceKind>,
}

impl NavigateOptions {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            timeout: config.navigation_timeout,
            blocked: config.blocked_resource_kinds.clone(),
        }
    }

    pub fn blocks(&self, kind: ResourceKind) -> bool {
        self.blocked.contains(&kind)
    }
}

/// Source of render sessions
#[allow(async_fn_in_trait)]
pub trait PageRenderer {
    type Session: RenderSession;

    /// Opens a fresh session holding no page
    async fn open(&self) -> Result<Self::Session, RenderError>;
}

/// One logical page handle
///
/// `close` must be safe to call in any state, including after a failed
/// `navigate`.
#[allow(async_fn_in_trait)]
pub trait RenderSession {
    /// Loads `url`, returning the final URL after redirects
    async fn navigate(&mut self, url: &str, options: &NavigateOptions) -> Result<Url, RenderError>;

    /// Returns the serialized document of the loaded page
    async fn content(&mut self) -> Result<String, RenderError>;

    /// Releases the session
    async fn close(self);

    /// Runs an extraction function against the loaded document
    async fn evaluate<T, F>(&mut self, extraction: F) -> Result<T, RenderError>
    where
        F: FnOnce(&Html) -> T,
    {
        let content = self.content().await?;
        let document = Html::parse_document(&content);
        Ok(extraction(&document))
    }
}
