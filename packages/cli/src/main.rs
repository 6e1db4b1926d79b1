//! Batch driver: map a vendor site, scrape product pages, pull linked
//! spec-sheet PDFs, extract structured fields, and write a spreadsheet.

mod pdf;
mod schemas;
mod spreadsheet;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use firecrawl_client::FirecrawlClient;
use llm_client::OpenAiClient;
use pipeline::{
    flatten_record, Document, FieldValue, MergedRecord, OpenAiExtractor, Pipeline, Schema,
};

#[derive(Parser, Debug)]
#[command(
    name = "partscan",
    about = "Scrape vendor product pages and spec sheets into a spreadsheet"
)]
struct Args {
    /// Root URL to map for product pages
    #[arg(long)]
    url: String,

    /// Search term passed to the site mapper
    #[arg(long, default_value = "compressor")]
    search: String,

    /// Anchor text identifying spec-sheet PDFs (repeatable)
    #[arg(long = "pdf-link-text", default_value = "specification sheet")]
    pdf_link_text: Vec<String>,

    /// Output path; the .xlsx and .csv twins are written next to each other
    #[arg(long, default_value = "output.xlsx")]
    output: PathBuf,

    /// Append to an existing output instead of overwriting
    #[arg(long)]
    append: bool,

    /// Process at most this many links
    #[arg(long)]
    limit: Option<usize>,

    /// Registered schema name
    #[arg(long, default_value = "compressor")]
    schema: String,

    /// Model used for extraction
    #[arg(long, default_value = "gpt-4o-2024-08-06")]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let registry = schemas::builtin_registry();
    let schema = registry.resolve(&args.schema)?;
    let columns = schemas::display_columns(&args.schema)
        .with_context(|| format!("no display columns for schema `{}`", args.schema))?;

    let firecrawl = FirecrawlClient::from_env()?;
    let openai = OpenAiClient::from_env()?.with_timeout(Duration::from_secs(120))?;
    let extractor = OpenAiExtractor::new(openai, &args.model);
    let extraction = Pipeline::new(extractor);

    let downloads = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("building PDF download client")?;

    info!(url = %args.url, search = %args.search, "mapping site");
    let links = firecrawl.map(&args.url, Some(args.search.as_str())).await?;
    if links.is_empty() {
        bail!("no links found for {}", args.url);
    }

    // On the supported vendor sites the first three map hits are navigation
    // pages and the trailing entry is the sitemap.
    let links: Vec<String> = if links.len() > 4 {
        links[3..links.len() - 1].to_vec()
    } else {
        links
    };
    let links: Vec<String> = match args.limit {
        Some(limit) => links.into_iter().take(limit).collect(),
        None => links,
    };

    info!(count = links.len(), "processing links");
    let progress = ProgressBar::new(links.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("static template"),
    );

    let mut rows = Vec::new();
    for link in &links {
        progress.set_message(link.clone());
        match process_link(
            &firecrawl,
            &downloads,
            &extraction,
            schema,
            &args.pdf_link_text,
            link,
        )
        .await
        {
            Ok(record) => rows.push(flatten_record(&record, &columns)),
            // One bad product page must not sink the batch.
            Err(error) => warn!(link = %link, error = %format!("{error:#}"), "failed to process link"),
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    spreadsheet::write(&rows, &columns, &args.output, args.append)?;
    Ok(())
}

/// Scrape one product page, pull its spec sheets, and run the extraction
/// pipeline over page body + sheet text.
async fn process_link(
    firecrawl: &FirecrawlClient,
    downloads: &reqwest::Client,
    extraction: &Pipeline<OpenAiExtractor>,
    schema: &Schema,
    pdf_link_texts: &[String],
    link: &str,
) -> Result<MergedRecord> {
    let page = firecrawl.scrape(link).await?;
    info!(
        url = %page.source_url,
        chars = page.markdown.len(),
        "scraped page"
    );

    let mut documents =
        vec![Document::new(&page.markdown).with_source(&page.source_url)];

    // Spec sheets come after the page body so their values win the merge.
    if let Some(html) = &page.html {
        let mut sheet_text = String::new();
        for (label, pdf_url) in pdf::find_links(html, &page.source_url, pdf_link_texts) {
            match pdf::fetch_text(downloads, &pdf_url).await {
                Ok(text) => sheet_text.push_str(&text),
                Err(error) => {
                    warn!(pdf = %pdf_url, label = %label, error = %format!("{error:#}"), "skipping spec sheet")
                }
            }
        }
        if !sheet_text.trim().is_empty() {
            documents.push(Document::new(sheet_text).with_source("spec sheet"));
        }
    }

    let record = extraction.extract_entity(&documents, schema).await?;

    // The canonical link comes from the scraper, not from page text.
    Ok(record.with_value("link", FieldValue::Text(page.source_url.clone())))
}
