use std::collections::BTreeMap;

use serde::Serialize;

/// Canonical column order of the fixed field set, used for CSV headers and
/// to guard amenity labels against colliding with a fixed field.
pub const FIXED_COLUMNS: [&str; 17] = [
    "id",
    "property_type",
    "num_bed",
    "num_bath",
    "price",
    "meters_squared",
    "construction_era",
    "location",
    "near_to",
    "pub_date",
    "mod_date",
    "modified",
    "notes",
    "contact_name",
    "phone_number",
    "mobile_number",
    "other_info",
];

/// One normalized listing record: the fixed field set plus the dynamic
/// amenity mapping observed on this particular document. Built once by the
/// assembler and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: String,
    pub property_type: Option<String>,
    pub num_bed: Option<u32>,
    pub num_bath: Option<u32>,
    pub price: Option<f64>,
    pub meters_squared: Option<f64>,
    pub construction_era: Option<String>,
    pub location: Option<String>,
    pub near_to: Option<String>,
    pub pub_date: Option<String>,
    pub mod_date: Option<String>,
    pub modified: bool,
    pub notes: Option<String>,
    pub contact_name: Option<String>,
    pub phone_number: Option<String>,
    pub mobile_number: Option<String>,
    pub other_info: Option<String>,
    #[serde(flatten)]
    pub amenities: BTreeMap<String, bool>,
}

impl Listing {
    pub fn new(id: String) -> Self {
        Self {
            id,
            property_type: None,
            num_bed: None,
            num_bath: None,
            price: None,
            meters_squared: None,
            construction_era: None,
            location: None,
            near_to: None,
            pub_date: None,
            mod_date: None,
            modified: false,
            notes: None,
            contact_name: None,
            phone_number: None,
            mobile_number: None,
            other_info: None,
            amenities: BTreeMap::new(),
        }
    }

    /// CSV cells for the fixed columns, in `FIXED_COLUMNS` order. Absent
    /// values serialize as empty cells.
    pub fn fixed_values(&self) -> Vec<String> {
        fn cell<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(T::to_string).unwrap_or_default()
        }
        vec![
            self.id.clone(),
            cell(&self.property_type),
            cell(&self.num_bed),
            cell(&self.num_bath),
            cell(&self.price),
            cell(&self.meters_squared),
            cell(&self.construction_era),
            cell(&self.location),
            cell(&self.near_to),
            cell(&self.pub_date),
            cell(&self.mod_date),
            self.modified.to_string(),
            cell(&self.notes),
            cell(&self.contact_name),
            cell(&self.phone_number),
            cell(&self.mobile_number),
            cell(&self.other_info),
        ]
    }
}
