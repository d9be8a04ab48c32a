//! Product card extraction
//!
//! Picks up elements that look like product listings and pulls a title,
//! price, description and image out of each.

use crate::extract::links::resolve_link;
use crate::extract::text::normalize_text;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

const PRODUCT_SELECTOR: &str = r#".product, [class*="product"], [id*="product"]"#;
const TITLE_SELECTOR: &str = "h1, h2, h3, .title";
const PRICE_SELECTOR: &str = r#".price, [class*="price"]"#;
const DESCRIPTION_SELECTOR: &str = r#".description, [class*="description"]"#;
const IMAGE_SELECTOR: &str = "img[src]";

/// A product found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: String,
    pub description: String,
    pub image: String,
}

impl Product {
    fn is_empty(&self) -> bool {
        self.title.is_empty() && self.price.is_empty() && self.description.is_empty()
    }
}

/// Extracts products in document order
///
/// Products without a title, price or description are dropped. Image URLs
/// are resolved against `page_url`.
pub fn extract_products(document: &Html, page_url: &Url) -> Vec<Product> {
    let (Ok(product), Ok(title), Ok(price), Ok(description), Ok(image)) = (
        Selector::parse(PRODUCT_SELECTOR),
        Selector::parse(TITLE_SELECTOR),
        Selector::parse(PRICE_SELECTOR),
        Selector::parse(DESCRIPTION_SELECTOR),
        Selector::parse(IMAGE_SELECTOR),
    ) else {
        return Vec::new();
    };

    document
        .select(&product)
        .map(|element| Product {
            title: first_text(element, &title),
            price: first_text(element, &price),
            description: first_text(element, &description),
            image: element
                .select(&image)
                .next()
                .and_then(|img| img.value().attr("src"))
                .and_then(|src| resolve_image(src, page_url))
                .unwrap_or_default(),
        })
        .filter(|product| !product.is_empty())
        .collect()
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|found| normalize_text(&found.text().collect::<String>()))
        .unwrap_or_default()
}

fn resolve_image(src: &str, page_url: &Url) -> Option<String> {
    resolve_link(src, page_url).map(String::from)
}
