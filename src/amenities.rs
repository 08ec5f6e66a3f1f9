use std::collections::BTreeMap;

use scraper::ElementRef;

use crate::dom;

/// Graphic the site embeds in a checked amenity cell. Presence is decided by
/// exact match; near-miss urls (e.g. the "not checked" graphic) count as
/// absent.
pub const CHECKED_IMAGE_SRC: &str = "http://images.cubisima.com/checked.png";

/// Read every checkbox-style amenity row in the characteristics container.
///
/// The label set varies per document; whatever cells the page rendered is
/// what the record gets. Cells without an image or without a label carry no
/// amenity and are skipped.
pub fn extract(container: ElementRef) -> BTreeMap<String, bool> {
    let mut amenities = BTreeMap::new();
    for cell in dom::select_within(container, "td") {
        let image = match dom::select_within(cell, "img").into_iter().next() {
            Some(image) => image,
            None => continue,
        };
        let label = dom::text_of(cell).trim().to_string();
        if label.is_empty() {
            continue;
        }
        let checked = dom::attr(image, "src")
            .map_or(false, |src| src.trim() == CHECKED_IMAGE_SRC);
        amenities.insert(label, checked);
    }
    amenities
}
