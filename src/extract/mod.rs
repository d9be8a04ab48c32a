//! DOM extraction functions
//!
//! These run against a rendered document (see
//! [`RenderSession::evaluate`](crate::render::RenderSession::evaluate)):
//! - Text extraction: normalized text fragments in pre-order
//! - Link discovery: same-host http(s) anchors, deduplicated
//! - Product extraction: product cards found on the page

mod links;
mod products;
mod text;

pub use links::discover_links;
pub use products::{extract_products, Product};
pub use text::{extract_text, extract_title, normalize_text, MIN_FRAGMENT_CHARS};

use scraper::Html;
use url::Url;

/// Everything the crawler needs from one rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePayload {
    pub title: String,
    pub content: Vec<String>,
    pub links: Vec<String>,
    pub products: Vec<Product>,
}

/// Runs every extractor against a document
///
/// Link discovery is skipped when `discover` is false, which the crawler uses
/// for pages at the depth limit.
pub fn extract_page(document: &Html, page_url: &Url, discover: bool) -> PagePayload {
    PagePayload {
        title: extract_title(document),
        content: extract_text(document),
        links: if discover {
            discover_links(document, page_url)
        } else {
            Vec::new()
        },
        products: extract_products(document, page_url),
    }
}
