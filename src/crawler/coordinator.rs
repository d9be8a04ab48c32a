//! Crawler coordinator - depth-bounded recursive crawl
//!
//! Each crawl step claims its URL, renders it in a fresh session, extracts
//! text and links, closes the session, and only then recurses into the
//! discovered links one at a time. Children are fully explored before the next
//! sibling starts, so at most one render session is open at any moment.
//!
//! Every per-URL failure ends at the step that produced it: the step returns
//! `None` and its parent carries on with the remaining links.

use crate::config::CrawlConfig;
use crate::crawler::PageNode;
use crate::extract::{extract_page, PagePayload};
use crate::output::{serialize_snapshot, snapshot_key, CrawlStats, PersistenceSink};
use crate::render::{NavigateOptions, PageRenderer, RenderError, RenderSession};
use crate::state::{PageState, VisitedRegistry};
use crate::url::registry_key;
use url::Url;

/// What a render session produced for one URL
enum Loaded {
    Page { resolved: Url, payload: PagePayload },
    /// The URL redirected onto a page already claimed in this run
    Duplicate { resolved: Url },
}

/// Main crawler coordinator structure
///
/// Owns the run's visited registry, so separate runs never share state.
pub struct Coordinator<R, S> {
    config: CrawlConfig,
    options: NavigateOptions,
    renderer: R,
    sink: S,
    registry: VisitedRegistry,
    stats: CrawlStats,
}

impl<R, S> Coordinator<R, S>
where
    R: PageRenderer,
    S: PersistenceSink,
{
    /// Creates a coordinator for one crawl run
    ///
    /// # Arguments
    ///
    /// * `config` - The immutable run configuration
    /// * `renderer` - Source of render sessions
    /// * `sink` - Destination of per-depth snapshots
    pub fn new(config: CrawlConfig, renderer: R, sink: S) -> Self {
        let options = NavigateOptions::from_config(&config);
        Self {
            config,
            options,
            renderer,
            sink,
            registry: VisitedRegistry::new(),
            stats: CrawlStats::new(),
        }
    }

    /// Crawls from the seed URL to the depth limit
    ///
    /// Returns `None` when the seed itself could not be rendered.
    pub async fn run(&mut self) -> Option<PageNode> {
        let seed = self.config.seed_url.to_string();
        tracing::info!(
            "Starting crawl of {} (max depth {})",
            seed,
            self.config.max_depth
        );
        let start_time = std::time::Instant::now();

        let root = self.crawl(&seed, 0).await;

        match &root {
            Some(node) => tracing::info!(
                "Crawl completed: {} pages in {:?}",
                node.len(),
                start_time.elapsed()
            ),
            None => tracing::warn!("Crawl produced no output: seed {} failed", seed),
        }
        tracing::info!(
            "Claimed {}, render failures {}, snapshots written {} (failed {})",
            self.stats.claimed,
            self.stats.render_failed,
            self.stats.snapshots_written,
            self.stats.snapshot_failures
        );

        let unfinished = self.registry.active_count();
        if unfinished > 0 {
            tracing::error!("{} claimed URLs never reached a final state", unfinished);
        }

        root
    }

    /// Crawls one URL at the given depth, then its unvisited links
    ///
    /// Short-circuits, in order:
    /// 1. `depth > max_depth` returns `None` without claiming the URL
    /// 2. an already claimed URL returns `None`
    /// 3. a render or extraction failure returns `None`
    ///
    /// On success the assembled node is written under the depth's snapshot
    /// key before it is returned. A failed write is logged and the node is
    /// still returned.
    pub async fn crawl(&mut self, url: &str, depth: u32) -> Option<PageNode> {
        if depth > self.config.max_depth {
            tracing::trace!("Not crawling {}: depth {} exceeds limit", url, depth);
            self.stats.depth_skipped += 1;
            return None;
        }

        if !self.registry.try_claim(url) {
            tracing::debug!("Skipping {}: already visited", url);
            self.stats.already_visited += 1;
            return None;
        }
        self.stats.claimed += 1;

        let (resolved, payload) = self.render(url, depth).await?;
        let alias = redirect_alias(url, &resolved);
        self.mark_page(url, alias.as_deref(), PageState::Extracted);

        tracing::debug!(
            "Crawled {} at depth {}: {} fragments, {} links",
            resolved,
            depth,
            payload.content.len(),
            payload.links.len()
        );

        let mut subpages = Vec::new();
        for link in &payload.links {
            // Optimistic check; the claim inside the child step decides
            if self.registry.is_visited(link) {
                tracing::trace!("Skipping {}: already visited", link);
                self.stats.already_visited += 1;
                continue;
            }

            if let Some(child) = Box::pin(self.crawl(link, depth + 1)).await {
                subpages.push(child);
            }
        }

        let node = PageNode {
            title: payload.title,
            url: resolved.into(),
            content: payload.content,
            links: payload.links,
            products: payload.products,
            subpages,
        };
        self.stats.pages += 1;

        self.persist(url, alias.as_deref(), &node, depth).await;
        Some(node)
    }

    /// Renders a claimed URL inside its own session
    ///
    /// The session is closed on every path before this returns, so no render
    /// session outlives the step that opened it.
    async fn render(&mut self, url: &str, depth: u32) -> Option<(Url, PagePayload)> {
        let mut session = match self.renderer.open().await {
            Ok(session) => session,
            Err(e) => {
                self.render_failed(url, &e);
                return None;
            }
        };

        let loaded = self.load(&mut session, url, depth).await;
        session.close().await;

        match loaded {
            Ok(Loaded::Page { resolved, payload }) => Some((resolved, payload)),
            Ok(Loaded::Duplicate { resolved }) => {
                tracing::debug!("Skipping {}: redirected to visited {}", url, resolved);
                self.stats.duplicates += 1;
                self.mark(url, PageState::Duplicate);
                None
            }
            Err(e) => {
                self.render_failed(url, &e);
                None
            }
        }
    }

    async fn load(
        &mut self,
        session: &mut R::Session,
        url: &str,
        depth: u32,
    ) -> Result<Loaded, RenderError> {
        let resolved = session.navigate(url, &self.options).await?;
        self.mark(url, PageState::Rendered);

        // A redirect target is claimed too, so one page is never produced twice
        let alias = redirect_alias(url, &resolved);
        if let Some(alias) = &alias {
            if !self.registry.try_claim(alias) {
                return Ok(Loaded::Duplicate { resolved });
            }
            self.mark(alias, PageState::Rendered);
        }

        let discover = depth < self.config.max_depth;
        match session
            .evaluate(|document| extract_page(document, &resolved, discover))
            .await
        {
            Ok(payload) => Ok(Loaded::Page { resolved, payload }),
            Err(e) => {
                if let Some(alias) = &alias {
                    self.mark(alias, PageState::RenderFailed);
                }
                Err(e)
            }
        }
    }

    async fn persist(&mut self, url: &str, alias: Option<&str>, node: &PageNode, depth: u32) {
        let key = snapshot_key(depth);
        let written = match serialize_snapshot(node) {
            Ok(payload) => self.sink.write(&key, &payload).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(()) => {
                self.stats.snapshots_written += 1;
                self.mark_page(url, alias, PageState::Persisted);
            }
            Err(e) => {
                tracing::warn!("Failed to save {} for {}: {}", key, url, e);
                self.stats.snapshot_failures += 1;
                self.mark_page(url, alias, PageState::PersistFailed);
            }
        }
    }

    fn render_failed(&mut self, url: &str, error: &RenderError) {
        tracing::warn!("Failed to render {}: {}", url, error);
        self.stats.render_failed += 1;
        self.mark(url, PageState::RenderFailed);
    }

    fn mark(&mut self, url: &str, state: PageState) {
        if let Err(e) = self.registry.advance(url, state) {
            tracing::error!("State tracking error for {}: {}", url, e);
        }
    }

    /// Advances a page and, when it was reached through a redirect, its final URL
    fn mark_page(&mut self, url: &str, alias: Option<&str>, state: PageState) {
        self.mark(url, state);
        if let Some(alias) = alias {
            self.mark(alias, state);
        }
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// The run's visited registry
    pub fn registry(&self) -> &VisitedRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Consumes the coordinator, returning its sink and statistics
    pub fn into_parts(self) -> (S, CrawlStats) {
        (self.sink, self.stats)
    }
}

/// Final URL of a redirected page, when it names a different page than `url`
fn redirect_alias(url: &str, resolved: &Url) -> Option<String> {
    (registry_key(resolved.as_str()) != registry_key(url)).then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{MemorySink, OutputError, OutputResult};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Renderer serving fixed HTML per URL; unknown URLs fail to load
    #[derive(Default, Clone)]
    struct ScriptedRenderer {
        pages: Rc<HashMap<String, String>>,
        open_sessions: Rc<RefCell<u32>>,
        max_open: Rc<RefCell<u32>>,
    }

    impl ScriptedRenderer {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: Rc::new(
                    pages
                        .iter()
                        .map(|(url, html)| (url.to_string(), html.to_string()))
                        .collect(),
                ),
                ..Self::default()
            }
        }
    }

    struct ScriptedSession {
        renderer: ScriptedRenderer,
        page: Option<String>,
    }

    impl PageRenderer for ScriptedRenderer {
        type Session = ScriptedSession;

        async fn open(&self) -> Result<ScriptedSession, RenderError> {
            let mut open = self.open_sessions.borrow_mut();
            *open += 1;
            let mut max = self.max_open.borrow_mut();
            *max = (*max).max(*open);
            Ok(ScriptedSession {
                renderer: self.clone(),
                page: None,
            })
        }
    }

    impl RenderSession for ScriptedSession {
        async fn navigate(
            &mut self,
            url: &str,
            _options: &NavigateOptions,
        ) -> Result<Url, RenderError> {
            match self.renderer.pages.get(url) {
                Some(html) => {
                    self.page = Some(html.clone());
                    Ok(Url::parse(url).unwrap())
                }
                None => Err(RenderError::Timeout {
                    url: url.to_string(),
                }),
            }
        }

        async fn content(&mut self) -> Result<String, RenderError> {
            self.page.clone().ok_or(RenderError::NoPage)
        }

        async fn close(self) {
            *self.renderer.open_sessions.borrow_mut() -= 1;
        }
    }

    struct FailingSink;

    impl PersistenceSink for FailingSink {
        async fn write(&self, _key: &str, _payload: &str) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
    }

    fn config(max_depth: u32) -> CrawlConfig {
        CrawlConfig::new(Url::parse("https://example.test/").unwrap(), max_depth)
    }

    #[tokio::test]
    async fn test_sessions_closed_and_never_nested() {
        let renderer = ScriptedRenderer::new(&[
            ("https://example.test/", r#"<a href="/a">a</a><a href="/missing">m</a>"#),
            ("https://example.test/a", r#"<a href="/b">b</a>"#),
            ("https://example.test/b", "<p>leaf</p>"),
        ]);
        let mut coordinator = Coordinator::new(config(3), renderer.clone(), MemorySink::new());

        let root = coordinator.run().await.unwrap();

        assert_eq!(root.len(), 3);
        assert_eq!(*renderer.open_sessions.borrow(), 0);
        assert_eq!(*renderer.max_open.borrow(), 1);
    }

    #[tokio::test]
    async fn test_registry_states_after_run() {
        let renderer = ScriptedRenderer::new(&[(
            "https://example.test/",
            r#"<a href="/gone">gone</a>"#,
        )]);
        let mut coordinator = Coordinator::new(config(1), renderer, MemorySink::new());
        coordinator.run().await.unwrap();

        let registry = coordinator.registry();
        assert_eq!(
            registry.state("https://example.test/"),
            Some(PageState::Persisted)
        );
        assert_eq!(
            registry.state("https://example.test/gone"),
            Some(PageState::RenderFailed)
        );
        assert_eq!(coordinator.stats().render_failed, 1);
        assert_eq!(coordinator.stats().claimed, 2);
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_tree() {
        let renderer = ScriptedRenderer::new(&[
            ("https://example.test/", r#"<a href="/a">a</a>"#),
            ("https://example.test/a", "<p>child</p>"),
        ]);
        let mut coordinator = Coordinator::new(config(1), renderer, FailingSink);

        let root = coordinator.run().await.unwrap();

        assert_eq!(root.subpages.len(), 1);
        assert_eq!(coordinator.stats().snapshot_failures, 2);
        assert_eq!(
            coordinator.registry().state("https://example.test/a"),
            Some(PageState::PersistFailed)
        );
    }

    #[tokio::test]
    async fn test_depth_exceeded_is_not_claimed() {
        let renderer = ScriptedRenderer::new(&[("https://example.test/deep", "<p>x</p>")]);
        let mut coordinator = Coordinator::new(config(0), renderer, MemorySink::new());

        assert!(coordinator.crawl("https://example.test/deep", 1).await.is_none());
        assert!(!coordinator.registry().is_visited("https://example.test/deep"));
        assert_eq!(coordinator.stats().depth_skipped, 1);
    }
}
