use scraper::ElementRef;

use crate::dom;
use crate::error::ExtractError;
use crate::locator;
use crate::template::FieldNamingScheme;

const PHONE_IMAGE_PREFIX: &str = "MainPlaceHolder_ImageTelefono";
const MOBILE_IMAGE_PREFIX: &str = "MainPlaceHolder_ImageMovil";

/// Fields read from the listing's contact container.
#[derive(Debug, Default, Clone)]
pub struct ContactFields {
    pub contact_name: Option<String>,
    pub phone_number: Option<String>,
    pub mobile_number: Option<String>,
    pub other_info: Option<String>,
}

/// Extract the contact group.
///
/// Phone numbers are not page text; the site renders them as images and the
/// number only exists in the image's `alt` attribute. Not every listing
/// publishes both numbers, so a missing image element is the expected-absent
/// case, as is a missing other-info element.
pub fn extract(
    container: ElementRef,
    scheme: &FieldNamingScheme,
    issues: &mut Vec<ExtractError>,
) -> ContactFields {
    let contact_name = match locator::field_text(container, "Contacto", scheme) {
        Ok(value) => value,
        Err(e) => {
            issues.push(e);
            None
        }
    };

    ContactFields {
        contact_name,
        phone_number: image_alt(container, PHONE_IMAGE_PREFIX, scheme),
        mobile_number: image_alt(container, MOBILE_IMAGE_PREFIX, scheme),
        other_info: other_info(container, scheme, issues),
    }
}

fn image_alt(
    container: ElementRef,
    id_prefix: &str,
    scheme: &FieldNamingScheme,
) -> Option<String> {
    let id = format!("{}{}", id_prefix, scheme.suffix);
    dom::find_by_id_within(container, &id)
        .and_then(|image| dom::attr(image, "alt"))
        .map(str::to_string)
}

fn other_info(
    container: ElementRef,
    scheme: &FieldNamingScheme,
    issues: &mut Vec<ExtractError>,
) -> Option<String> {
    // Unlike the description fields, this element legitimately disappears
    // on some listings; only a present-but-malformed element is reported.
    let id = locator::field_id("OtraInfo", scheme);
    dom::find_by_id_within(container, &id)?;
    match locator::field_text(container, "OtraInfo", scheme) {
        Ok(value) => value,
        Err(e) => {
            issues.push(e);
            None
        }
    }
}
