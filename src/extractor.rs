use crate::amenities;
use crate::contact;
use crate::description;
use crate::dom::Document;
use crate::error::ExtractError;
use crate::models::{Listing, FIXED_COLUMNS};
use crate::sanitizer;
use crate::template;

/// Result of extracting one document: the assembled record plus whatever
/// field-level problems came up along the way. A caller can still use the
/// fields that did succeed.
#[derive(Debug)]
pub struct Extraction {
    pub record: Listing,
    pub issues: Vec<ExtractError>,
}

/// Run the whole engine over one raw listing document.
///
/// Sanitize, parse and classify failures abort the document and surface as
/// `Err`; everything past classification degrades field by field instead.
pub fn extract_listing(raw_html: &str, location: &str) -> Result<Extraction, ExtractError> {
    let id = listing_id(location)?;
    let sanitized = sanitizer::sanitize(raw_html);
    let document = Document::parse(&sanitized)?;
    let kind = template::classify(&document)?;
    let scheme = kind.scheme();

    let mut record = Listing::new(id);
    let mut issues = Vec::new();

    match document.by_id(scheme.description_container) {
        Some(container) => {
            let fields = description::extract(&document, container, &scheme, &mut issues);
            record.property_type = fields.property_type;
            record.num_bed = fields.num_bed;
            record.num_bath = fields.num_bath;
            record.price = fields.price;
            record.meters_squared = fields.meters_squared;
            record.construction_era = fields.construction_era;
            record.location = fields.location;
            record.near_to = fields.near_to;
            record.pub_date = fields.pub_date;
            record.mod_date = fields.mod_date;
            record.modified = fields.modified;
            record.notes = fields.notes;
        }
        None => issues.push(ExtractError::MissingRequiredField(
            scheme.description_container.to_string(),
        )),
    }

    match document.by_id(scheme.amenities_container) {
        Some(container) => {
            for (label, present) in amenities::extract(container) {
                // The three field groups are disjoint by construction; an
                // amenity label shadowing a fixed column must never
                // silently overwrite it.
                if FIXED_COLUMNS.contains(&label.as_str()) {
                    issues.push(ExtractError::Internal(format!(
                        "amenity label collides with fixed field: {}",
                        label
                    )));
                    continue;
                }
                record.amenities.insert(label, present);
            }
        }
        None => issues.push(ExtractError::MissingRequiredField(
            scheme.amenities_container.to_string(),
        )),
    }

    match document.by_id(scheme.contact_container) {
        Some(container) => {
            let fields = contact::extract(container, &scheme, &mut issues);
            record.contact_name = fields.contact_name;
            record.phone_number = fields.phone_number;
            record.mobile_number = fields.mobile_number;
            record.other_info = fields.other_info;
        }
        None => issues.push(ExtractError::MissingRequiredField(
            scheme.contact_container.to_string(),
        )),
    }

    Ok(Extraction { record, issues })
}

/// Numeric listing id out of the source-location string, e.g.
/// `.../apartamento-en-cerro!56458.htm` -> `56458`.
pub fn listing_id(location: &str) -> Result<String, ExtractError> {
    let (_, tail) = location
        .rsplit_once('!')
        .ok_or_else(|| ExtractError::format("id", "missing '!' delimiter in location"))?;
    let id = tail.strip_suffix(".htm").unwrap_or(tail);
    if id.is_empty() {
        return Err(ExtractError::format("id", "empty listing id in location"));
    }
    Ok(id.to_string())
}
