/// Page state definitions for tracking crawl progress
///
/// Every URL moves through `Claimed -> Rendered -> Extracted -> Persisted`, or
/// stops early in a failure state. There are no retries: terminal states are
/// final for the run.
use std::fmt;

/// Represents the current state of a claimed URL within one crawl run
///
/// URLs that were never claimed are simply absent from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// URL has been claimed and a render session is being opened
    Claimed,

    /// Navigation succeeded; the page is loaded in a render session
    Rendered,

    /// Text, links and products have been extracted; children are being crawled
    Extracted,

    // ===== Terminal Success States =====
    /// The page node was handed to the persistence sink
    Persisted,

    /// The page node was produced but the snapshot write failed
    PersistFailed,

    // ===== Terminal Error States =====
    /// Render or extraction failed (timeout, network, blocked, bad content)
    RenderFailed,

    /// Navigation redirected to a URL that was already visited in this run
    Duplicate,
}

impl PageState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this is an active state (page is still being worked on)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Claimed | Self::Rendered | Self::Extracted)
    }

    /// Returns true if the page produced a node
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Persisted | Self::PersistFailed)
    }

    /// Returns true if the page produced no node
    pub fn is_error(&self) -> bool {
        matches!(self, Self::RenderFailed | Self::Duplicate)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Claimed, Self::Rendered)
                | (Self::Claimed, Self::RenderFailed)
                | (Self::Rendered, Self::Extracted)
                | (Self::Rendered, Self::RenderFailed)
                | (Self::Rendered, Self::Duplicate)
                | (Self::Extracted, Self::Persisted)
                | (Self::Extracted, Self::PersistFailed)
        )
    }

    /// Short lowercase label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claimed => "claimed",
            Self::Rendered => "rendered",
            Self::Extracted => "extracted",
            Self::Persisted => "persisted",
            Self::PersistFailed => "persist_failed",
            Self::RenderFailed => "render_failed",
            Self::Duplicate => "duplicate",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Claimed,
            Self::Rendered,
            Self::Extracted,
            Self::Persisted,
            Self::PersistFailed,
            Self::RenderFailed,
            Self::Duplicate,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
