//! Static HTTP renderer
//!
//! Loads pages with a plain GET request and exposes the returned HTML as the
//! rendered document. No scripts run and no subresources are fetched, so
//! resource blocking applies to the navigated URL itself:
//! - URLs whose extension names a blocked kind are refused without a request
//! - responses whose `Content-Type` names a blocked kind are discarded
//! - any other non-HTML response is a content mismatch

use crate::config::UserAgentConfig;
use crate::render::{NavigateOptions, PageRenderer, RenderError, RenderSession, ResourceKind};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use site_snapshot::config::UserAgentConfig;
/// use site_snapshot::render::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer that fetches pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(config: &UserAgentConfig) -> Result<Self, RenderError> {
        let client =
            build_http_client(config).map_err(|e| RenderError::Unavailable(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Uses a preconfigured client, e.g. one with a proxy or custom headers
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageRenderer for HttpRenderer {
    type Session = HttpSession;

    async fn open(&self) -> Result<HttpSession, RenderError> {
        Ok(HttpSession {
            client: self.client.clone(),
            page: None,
        })
    }
}

/// A loaded page held by an [`HttpSession`]
#[derive(Debug)]
struct LoadedPage {
    url: Url,
    body: String,
}

/// Session handle of [`HttpRenderer`]
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    page: Option<LoadedPage>,
}

impl RenderSession for HttpSession {
    async fn navigate(&mut self, url: &str, options: &NavigateOptions) -> Result<Url, RenderError> {
        self.page = None;

        let requested = Url::parse(url).map_err(|e| RenderError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if let Some(kind) = ResourceKind::from_path(requested.path()) {
            if options.blocks(kind) {
                return Err(RenderError::Blocked {
                    url: url.to_string(),
                    kind,
                });
            }
        }

        tracing::debug!("GET {}", requested);
        let response = self
            .client
            .get(requested)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(RenderError::HttpStatus {
                url: final_url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if let Some(kind) = ResourceKind::from_content_type(&content_type) {
            if options.blocks(kind) {
                return Err(RenderError::Blocked {
                    url: final_url.to_string(),
                    kind,
                });
            }
        }

        if !content_type.is_empty() && !is_html(&content_type) {
            return Err(RenderError::ContentMismatch {
                url: final_url.to_string(),
                content_type,
            });
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        if final_url.as_str() != url {
            tracing::debug!("{} resolved to {}", url, final_url);
        }

        self.page = Some(LoadedPage {
            url: final_url.clone(),
            body,
        });
        Ok(final_url)
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        self.page
            .as_ref()
            .map(|page| page.body.clone())
            .ok_or(RenderError::NoPage)
    }

    async fn close(mut self) {
        if let Some(page) = self.page.take() {
            tracing::trace!("Closing session for {}", page.url);
        }
    }
}

fn is_html(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

/// Maps a reqwest failure onto the render error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> RenderError {
    if error.is_timeout() {
        RenderError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        RenderError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        RenderError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
