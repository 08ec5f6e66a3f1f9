use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Listing, FIXED_COLUMNS};

/// Sorted union of amenity labels across the batch. The per-document label
/// set varies, so the stable column order can only be decided here.
pub fn amenity_columns(listings: &[Listing]) -> Vec<String> {
    let labels: BTreeSet<&str> = listings
        .iter()
        .flat_map(|listing| listing.amenities.keys().map(String::as_str))
        .collect();
    labels.into_iter().map(str::to_string).collect()
}

pub fn save_listings_to_csv(listings: &[Listing], output_path: &str) -> Result<()> {
    let file = File::create(Path::new(output_path))
        .context(format!("Failed to create output file: {}", output_path))?;
    let mut writer = csv::Writer::from_writer(file);

    let amenity_cols = amenity_columns(listings);
    let mut header: Vec<&str> = FIXED_COLUMNS.to_vec();
    header.extend(amenity_cols.iter().map(String::as_str));
    writer.write_record(&header)?;

    for listing in listings {
        let mut row = listing.fixed_values();
        for label in &amenity_cols {
            row.push(match listing.amenities.get(label) {
                Some(present) => present.to_string(),
                None => String::new(),
            });
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    println!("Saved {} listings to {}", listings.len(), output_path);
    Ok(())
}

pub fn save_listings_to_json(listings: &[Listing], output_path: &str) -> Result<()> {
    let file = File::create(Path::new(output_path))
        .context(format!("Failed to create output file: {}", output_path))?;
    serde_json::to_writer_pretty(file, listings)
        .context("Failed to serialize listings to JSON")?;
    println!("Saved {} listings to {}", listings.len(), output_path);
    Ok(())
}

/// Fixed canonical header line for CSV consumers that need the column order
/// before any data exists.
pub fn canonical_header() -> String {
    FIXED_COLUMNS.join(",")
}
