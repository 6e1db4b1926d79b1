//! Thin client for the Firecrawl scraping API.
//!
//! Firecrawl handles JavaScript rendering and anti-bot protection and hands
//! back clean markdown, so the pipeline never touches raw vendor HTML
//! beyond link discovery. This client covers the two endpoints the batch
//! driver needs: `/v1/map` (site link discovery with a search term) and
//! `/v1/scrape` (single-page scrape with markdown + HTML formats).

pub mod error;

pub use error::{FirecrawlError, Result};

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Firecrawl API client.
#[derive(Clone)]
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request/Response types for the Firecrawl API

#[derive(Serialize)]
struct MapRequest {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

#[derive(Deserialize)]
struct MapResponse {
    success: bool,
    #[serde(default)]
    links: Vec<String>,
}

#[derive(Serialize)]
struct ScrapeRequest {
    url: String,
    formats: Vec<String>,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<ScrapeData>,
}

#[derive(Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    html: Option<String>,
    metadata: Option<PageMetadata>,
}

#[derive(Deserialize)]
struct PageMetadata {
    title: Option<String>,
    #[serde(rename = "sourceURL")]
    source_url: Option<String>,
}

/// A scraped page: markdown body plus the raw HTML used for link discovery.
#[derive(Debug, Clone)]
pub struct ScrapedPage {
    /// Markdown rendition of the page body.
    pub markdown: String,

    /// Raw HTML, when the scrape requested it.
    pub html: Option<String>,

    /// Canonical URL reported by the scraper (follows redirects).
    pub source_url: String,

    /// Page title, if Firecrawl found one.
    pub title: Option<String>,
}

impl FirecrawlClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| FirecrawlError::Config(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Create from the `FIRECRAWL_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FIRECRAWL_API_KEY")
            .map_err(|_| FirecrawlError::Config("FIRECRAWL_API_KEY not set".into()))?;
        Self::new(api_key)
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn post<T: Serialize, R: DeserializeOwned>(&self, endpoint: &str, body: &T) -> Result<R> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| FirecrawlError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api(format!("{status} - {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| FirecrawlError::Network(e.to_string()))
    }

    /// Map a site's links, optionally filtered by a search term.
    pub async fn map(&self, url: &str, search: Option<&str>) -> Result<Vec<String>> {
        let request = MapRequest {
            url: url.to_string(),
            search: search.map(str::to_string),
        };

        let response: MapResponse = self.post("/map", &request).await?;
        if !response.success {
            return Err(FirecrawlError::Api("map request failed".into()));
        }

        info!(url, links = response.links.len(), "mapped site");
        Ok(response.links)
    }

    /// Scrape a single URL, requesting markdown and HTML formats.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        let request = ScrapeRequest {
            url: url.to_string(),
            formats: vec!["markdown".to_string(), "html".to_string()],
        };

        let response: ScrapeResponse = self.post("/scrape", &request).await?;
        if !response.success {
            return Err(FirecrawlError::Api(format!("scrape failed for {url}")));
        }

        let data = response
            .data
            .ok_or_else(|| FirecrawlError::MissingData(format!("no data for {url}")))?;

        into_page(data, url)
    }
}

/// Convert a scrape payload into a [`ScrapedPage`], falling back to the
/// requested URL when the scraper reports no canonical one.
fn into_page(data: ScrapeData, requested_url: &str) -> Result<ScrapedPage> {
    let markdown = data
        .markdown
        .ok_or_else(|| FirecrawlError::MissingData(format!("no markdown for {requested_url}")))?;

    let (title, source_url) = match data.metadata {
        Some(meta) => (
            meta.title,
            meta.source_url
                .unwrap_or_else(|| requested_url.to_string()),
        ),
        None => (None, requested_url.to_string()),
    };

    Ok(ScrapedPage {
        markdown,
        html: data.html,
        source_url,
        title,
    })
}
