//! URL handling module for Site-Snapshot
//!
//! This module provides registry-key normalization and host comparison.

mod domain;
mod normalize;

pub use domain::{extract_domain, same_host};
pub use normalize::{normalize_url, registry_key};
