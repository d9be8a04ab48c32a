//! Visited registry for a single crawl run

use crate::state::PageState;
use crate::url::registry_key;
use crate::SnapshotError;
use std::collections::HashMap;

/// Set of URLs claimed during one crawl run, with each URL's current state
///
/// Keys are normalized (see [`registry_key`]) so fragment-only and
/// tracking-parameter variants of a page share one claim. Entries are never
/// removed; a registry is created at crawl start and dropped at crawl end.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    pages: HashMap<String, PageState>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for this run
    ///
    /// Returns `true` and records the URL as [`PageState::Claimed`] if it was
    /// not visited before; returns `false` otherwise, in which case the caller
    /// must not render it.
    pub fn try_claim(&mut self, url: &str) -> bool {
        let key = registry_key(url);
        if self.pages.contains_key(&key) {
            tracing::trace!("{} already claimed", key);
            return false;
        }
        tracing::trace!("Claimed {}", key);
        self.pages.insert(key, PageState::Claimed);
        true
    }

    /// Returns true if the URL has been claimed in this run
    pub fn is_visited(&self, url: &str) -> bool {
        self.pages.contains_key(&registry_key(url))
    }

    /// Returns the current state of a claimed URL
    pub fn state(&self, url: &str) -> Option<PageState> {
        self.pages.get(&registry_key(url)).copied()
    }

    /// Moves a claimed URL to its next state
    pub fn advance(&mut self, url: &str, next: PageState) -> crate::Result<()> {
        let key = registry_key(url);
        let current = self
            .pages
            .get_mut(&key)
            .ok_or_else(|| SnapshotError::NotClaimed(key.clone()))?;

        if !current.can_transition_to(next) {
            return Err(SnapshotError::InvalidTransition {
                from: *current,
                to: next,
            });
        }

        tracing::trace!("{}: {} -> {}", key, current, next);
        *current = next;
        Ok(())
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Counts claimed URLs currently in the given state
    pub fn count_in_state(&self, state: PageState) -> usize {
        self.pages.values().filter(|s| **s == state).count()
    }

    /// Counts claimed URLs that have not reached a final state
    pub fn active_count(&self) -> usize {
        self.pages.values().filter(|s| s.is_active()).count()
    }
}
