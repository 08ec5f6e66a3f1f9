use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use casafinder::{export, extractor, fetch};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Casafinder - Listing Scraper for Cubisima")]
struct Args {
    /// Directory holding raw listing HTML files
    #[clap(short, long, default_value = "raw/listings")]
    listings_dir: String,

    /// Path to output file
    #[clap(short, long, default_value = "listings.csv")]
    output: String,

    /// Output format: csv or json
    #[clap(short, long, default_value = "csv")]
    format: String,

    /// Fetch listing pages from the site before extracting
    #[clap(long)]
    fetch: bool,

    /// Maximum number of index pages to crawl
    #[clap(short, long, default_value = "1")]
    max_pages: usize,

    /// Maximum number of listings to download (if not set, fetch all available)
    #[clap(short = 'i', long)]
    max_items: Option<usize>,

    /// Delay between requests in milliseconds
    #[clap(long, default_value = "2000")]
    delay_ms: u64,

    /// Print the canonical CSV header and exit
    #[clap(long)]
    header: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.header {
        println!("{}", export::canonical_header());
        return Ok(());
    }

    println!("Casafinder - Listing Scraper for Cubisima");
    println!("=========================================");

    if args.fetch {
        let downloaded = fetch::download_listings(
            &args.listings_dir,
            args.max_pages,
            args.max_items,
            args.delay_ms,
        )?;
        println!("Downloaded {} new listing pages", downloaded);
    }

    let mut listings = Vec::new();
    let mut failed = 0;

    let entries = fs::read_dir(&args.listings_dir)
        .context(format!("Failed to read listings dir: {}", args.listings_dir))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let location = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();

        let raw = fs::read_to_string(&path)
            .context(format!("Failed to read {}", path.display()))?;

        match extractor::extract_listing(&raw, &location) {
            Ok(extraction) => {
                for issue in &extraction.issues {
                    eprintln!("{}: {}", location, issue);
                }
                listings.push(extraction.record);
            }
            // One bad document must not take the batch down with it
            Err(e) => {
                eprintln!("Error extracting {}: {}", location, e);
                failed += 1;
            }
        }
    }

    match args.format.as_str() {
        "csv" => export::save_listings_to_csv(&listings, &args.output)?,
        "json" => export::save_listings_to_json(&listings, &args.output)?,
        other => anyhow::bail!("Unknown output format: {}", other),
    }

    println!("\n=== Summary ===");
    println!("Listings extracted: {}", listings.len());
    if failed > 0 {
        println!("Documents failed: {}", failed);
    }
    println!("Saved to: {}", args.output);

    Ok(())
}
