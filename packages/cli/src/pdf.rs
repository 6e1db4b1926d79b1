//! Spec-sheet PDF discovery and text extraction.
//!
//! Vendors link spec sheets from product pages with predictable anchor text
//! ("specification sheet", "data sheet"). Matching is on the anchor's
//! visible text, not the href, since the PDF URLs themselves are opaque
//! asset paths.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Find hrefs for anchors whose trimmed text equals one of `link_texts`,
/// case-insensitively. Relative hrefs are resolved against `base_url`.
/// Returns label → resolved URL for the first match per label.
pub fn find_links(html: &str, base_url: &str, link_texts: &[String]) -> IndexMap<String, String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("static selector");
    let base = Url::parse(base_url).ok();

    let mut found: IndexMap<String, String> = IndexMap::new();

    for anchor in document.select(&selector) {
        let text = anchor.text().collect::<String>();
        let text = text.trim();

        let Some(label) = link_texts.iter().find(|t| t.eq_ignore_ascii_case(text)) else {
            continue;
        };
        if found.contains_key(label.as_str()) {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let resolved = match &base {
            Some(base) => base
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string()),
            None => href.to_string(),
        };

        debug!(label = %label, url = %resolved, "found spec-sheet link");
        found.insert(label.clone(), resolved);
    }

    found
}

/// Download a PDF and extract its text.
///
/// Parsing runs on a blocking thread; `pdf-extract` is CPU-bound.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("downloading PDF from {url}"))?;

    if !response.status().is_success() {
        bail!("failed to download PDF, status {}", response.status());
    }

    let bytes = response.bytes().await.context("reading PDF body")?;

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .context("PDF parse task panicked")?
        .context("extracting PDF text")?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <a href="/assets/zr34k5-specs.pdf">Specification Sheet</a>
            <a href="https://cdn.example.com/manual.pdf">Installation Manual</a>
            <a href="/contact">Contact us</a>
            <a>Specification Sheet</a>
        </body></html>
    "#;

    #[test]
    fn matches_anchor_text_case_insensitively() {
        let links = find_links(
            PAGE,
            "https://vendor.example/products/zr34k5",
            &["specification sheet".to_string()],
        );

        assert_eq!(
            links.get("specification sheet").map(String::as_str),
            Some("https://vendor.example/assets/zr34k5-specs.pdf")
        );
    }

    #[test]
    fn absolute_hrefs_pass_through() {
        let links = find_links(
            PAGE,
            "https://vendor.example/products/zr34k5",
            &["installation manual".to_string()],
        );

        assert_eq!(
            links.get("installation manual").map(String::as_str),
            Some("https://cdn.example.com/manual.pdf")
        );
    }

    #[test]
    fn unmatched_labels_are_absent() {
        let links = find_links(
            PAGE,
            "https://vendor.example/",
            &["wiring diagram".to_string()],
        );
        assert!(links.is_empty());
    }

    #[test]
    fn first_matching_anchor_wins() {
        let html = r#"
            <a href="/first.pdf">Specification Sheet</a>
            <a href="/second.pdf">Specification Sheet</a>
        "#;
        let links = find_links(
            html,
            "https://vendor.example/",
            &["specification sheet".to_string()],
        );
        assert_eq!(
            links.get("specification sheet").map(String::as_str),
            Some("https://vendor.example/first.pdf")
        );
    }

    #[test]
    fn nested_anchor_text_is_flattened() {
        let html = r#"<a href="/s.pdf"><span>Specification</span> Sheet</a>"#;
        let links = find_links(
            html,
            "https://vendor.example/",
            &["specification sheet".to_string()],
        );
        assert_eq!(links.len(), 1);
    }
}
