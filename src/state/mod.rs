//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: the lifecycle of one claimed URL (claimed, rendered, extracted, persisted, failed)
//! - `VisitedRegistry`: the per-run set of claimed URLs and their states

mod page_state;
mod visited;

pub use page_state::PageState;
pub use visited::VisitedRegistry;
