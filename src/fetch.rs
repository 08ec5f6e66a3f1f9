use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use scraper::{Html, Selector};

const BASE_URL: &str = "http://www.cubisima.com";
/// Date of the site's earliest listing, lower bound of the crawl window.
const FIRST_LISTING_DATE: &str = "08072010";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Paginated listings-index url, page 0 upwards.
pub fn index_page_url(page: usize) -> String {
    let today = Local::now().format("%d%m%Y");
    format!(
        "{}/casas/anuncios/{}/?fdate={}&sdate={}",
        BASE_URL, page, FIRST_LISTING_DATE, today
    )
}

/// Paginating past the last page does not 404; the site returns a real page
/// with no listing rows on it. This catches that case.
pub fn page_has_listings(html: &str) -> bool {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse(".casa_repeater").unwrap();
    document.select(&row_selector).next().is_some()
}

/// Individual listing urls out of the rows of one listings-index page,
/// made absolute.
pub fn listing_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse(".casa_repeater a[href]").unwrap();

    let mut urls = Vec::new();
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            if !href.ends_with(".htm") {
                continue;
            }
            let full_url = if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", BASE_URL, href)
            };
            if !urls.contains(&full_url) {
                urls.push(full_url);
            }
        }
    }
    urls
}

/// On-disk name for a fetched listing page. Keeps the url recoverable, which
/// the extractor relies on to derive the listing id.
pub fn listing_filename(url: &str) -> String {
    url.replace('/', "_")
}

pub fn fetch_page(url: &str) -> Result<String> {
    let response = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .context(format!("Failed to fetch {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("No page at this url: {} ({})", url, response.status());
    }

    response.text().context("Failed to read response body")
}

/// Crawl the listings index and store raw listing pages under `output_dir`.
/// Already-downloaded listings are skipped; a fixed delay keeps the crawl
/// polite. Returns the number of newly stored pages.
pub fn download_listings(
    output_dir: &str,
    max_pages: usize,
    max_items: Option<usize>,
    delay_ms: u64,
) -> Result<usize> {
    fs::create_dir_all(output_dir)
        .context(format!("Failed to create listings dir: {}", output_dir))?;

    let mut downloaded = 0;

    for page in 0..max_pages {
        let page_url = index_page_url(page);
        println!("Fetching listings page: {}", page_url);

        let index_html = match fetch_page(&page_url) {
            Ok(html) => html,
            Err(e) => {
                eprintln!("Error fetching page {}: {}", page, e);
                break;
            }
        };

        if !page_has_listings(&index_html) {
            println!("No listings on page {}, stopping", page);
            break;
        }

        for url in listing_urls(&index_html) {
            if let Some(max) = max_items {
                if downloaded >= max {
                    println!("Reached maximum number of items ({}), stopping", max);
                    return Ok(downloaded);
                }
            }

            let target: PathBuf = Path::new(output_dir).join(listing_filename(&url));
            if target.exists() {
                println!("Skipping already downloaded listing: {}", url);
                continue;
            }

            println!("Fetching listing: {}", url);
            match fetch_page(&url) {
                Ok(listing_html) => {
                    fs::write(&target, listing_html)
                        .context(format!("Failed to write {}", target.display()))?;
                    downloaded += 1;
                }
                Err(e) => eprintln!("Error fetching listing {}: {}", url, e),
            }

            std::thread::sleep(std::time::Duration::from_millis(delay_ms));
        }
    }

    Ok(downloaded)
}
