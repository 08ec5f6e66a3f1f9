use regex::Regex;
use scraper::ElementRef;

use crate::dom::{self, Document};
use crate::error::ExtractError;
use crate::locator;
use crate::sanitizer::SENTINEL;
use crate::template::FieldNamingScheme;

/// Marker present in the document text only when the listing was edited
/// after its original publication.
const MODIFIED_MARKER: &str = "Modificado:";

/// Fields read from the listing's description container.
#[derive(Debug, Default, Clone)]
pub struct DescriptionFields {
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
}

/// Extract the description group. Field-level failures land in `issues`
/// and leave the affected fields absent; the rest of the group survives.
pub fn extract(
    document: &Document,
    container: ElementRef,
    scheme: &FieldNamingScheme,
    issues: &mut Vec<ExtractError>,
) -> DescriptionFields {
    let mut fields = DescriptionFields::default();

    match basic_info(container, scheme) {
        Ok((property_type, num_bed, num_bath)) => {
            fields.property_type = Some(property_type);
            fields.num_bed = Some(num_bed);
            fields.num_bath = Some(num_bath);
        }
        Err(e) => issues.push(e),
    }

    fields.price = decimal_field(container, "Precio", scheme, issues);
    fields.meters_squared = decimal_field(container, "Metros", scheme, issues);
    fields.construction_era = text_field(container, "Ano", scheme, issues);
    fields.location = text_field(container, "Direccion", scheme, issues);
    fields.near_to = text_field(container, "CercaDe", scheme, issues);
    fields.notes = text_field(container, locator::NOTES_KEY, scheme, issues);

    match dates(document, container, scheme) {
        Ok((pub_date, mod_date, modified)) => {
            fields.pub_date = pub_date;
            fields.mod_date = mod_date;
            fields.modified = modified;
        }
        Err(e) => issues.push(e),
    }

    fields
}

fn text_field(
    container: ElementRef,
    key: &str,
    scheme: &FieldNamingScheme,
    issues: &mut Vec<ExtractError>,
) -> Option<String> {
    match locator::field_text(container, key, scheme) {
        Ok(value) => value,
        Err(e) => {
            issues.push(e);
            None
        }
    }
}

fn decimal_field(
    container: ElementRef,
    key: &str,
    scheme: &FieldNamingScheme,
    issues: &mut Vec<ExtractError>,
) -> Option<f64> {
    match locator::field_text(container, key, scheme) {
        Ok(Some(text)) => match parse_decimal(key, &text) {
            Ok(value) => Some(value),
            Err(e) => {
                issues.push(e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            issues.push(e);
            None
        }
    }
}

/// Parse a decimal out of value text like "40,000 cuc" or "120 m2":
/// first numeric run, thousands separators removed.
fn parse_decimal(key: &str, text: &str) -> Result<f64, ExtractError> {
    let numeric = Regex::new(r"[\d][\d,.]*").unwrap();
    let raw = numeric
        .find(text)
        .ok_or_else(|| ExtractError::format(key, format!("no numeric value in {:?}", text)))?;
    raw.as_str()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| ExtractError::format(key, format!("not a number: {:?}", raw.as_str())))
}

/// Compound "type + room counts" field, e.g. `<b>Casa</b> 4 cuartos, 2 banos`.
/// The bold run is the property type; of the remaining whitespace-separated
/// tokens the first is the bedroom count and the third the bathroom count.
fn basic_info(
    container: ElementRef,
    scheme: &FieldNamingScheme,
) -> Result<(String, u32, u32), ExtractError> {
    let element = locator::locate(container, "BasicInfo", scheme)?;
    let bold = dom::select_within(element, "b")
        .into_iter()
        .next()
        .ok_or_else(|| ExtractError::format("BasicInfo", "bold property type run missing"))?;
    let bold_text = dom::text_of(bold);
    let property_type = bold_text.trim().to_string();
    if property_type.is_empty() {
        return Err(ExtractError::format("BasicInfo", "empty property type"));
    }

    let full_text = dom::text_of(element);
    let counts = full_text.replacen(&bold_text, "", 1);
    let tokens: Vec<&str> = counts.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ExtractError::format(
            "BasicInfo",
            format!("expected '<n> cuartos, <n> banos', got {:?}", counts.trim()),
        ));
    }
    let num_bed = tokens[0]
        .parse::<u32>()
        .map_err(|_| ExtractError::format("BasicInfo", format!("bad bedroom count {:?}", tokens[0])))?;
    let num_bath = tokens[2]
        .parse::<u32>()
        .map_err(|_| ExtractError::format("BasicInfo", format!("bad bathroom count {:?}", tokens[2])))?;

    Ok((property_type, num_bed, num_bath))
}

/// Publication/modification dates.
///
/// On edited listings the date field holds both dates concatenated; the
/// sanitizer's sentinel is the only reliable boundary between them. The
/// document text carries the "Modificado:" marker in exactly that case.
fn dates(
    document: &Document,
    container: ElementRef,
    scheme: &FieldNamingScheme,
) -> Result<(Option<String>, Option<String>, bool), ExtractError> {
    if !document.full_text().contains(MODIFIED_MARKER) {
        let pub_date = locator::field_text(container, "Publicado", scheme)?;
        return Ok((pub_date, None, false));
    }

    let element = locator::locate(container, "Publicado", scheme)?;
    let text = dom::text_of(element);
    let segments: Vec<&str> = text.split(SENTINEL).collect();
    if segments.len() != 2 {
        return Err(ExtractError::format(
            "Publicado",
            format!(
                "modified listing should split into two date segments, got {}",
                segments.len()
            ),
        ));
    }
    let mod_date = locator::normalize(locator::value_segment(segments[0], "Publicado")?, "Publicado");
    let pub_date = locator::normalize(locator::value_segment(segments[1], "Publicado")?, "Publicado");
    Ok((pub_date, mod_date, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::sanitizer;
    use crate::template::TemplateKind;

    fn no_photos_doc(inner: &str) -> Document {
        let html = format!(
            "<div id=\"casa_detalles_sinfoto_izquierda\">{}</div>",
            inner
        );
        Document::parse(&sanitizer::sanitize(&html)).unwrap()
    }

    fn extract_from(inner: &str) -> (DescriptionFields, Vec<ExtractError>) {
        let document = no_photos_doc(inner);
        let container = document.by_id("casa_detalles_sinfoto_izquierda").unwrap();
        let scheme = TemplateKind::NoPhotos.scheme();
        let mut issues = Vec::new();
        let fields = extract(&document, container, &scheme, &mut issues);
        (fields, issues)
    }

    #[test]
    fn parses_type_and_room_counts() {
        let (fields, _) = extract_from(
            "<span id=\"MainPlaceHolder_LabelBasicInfo0\"><b>Casa</b> 4 cuartos, 2 banos</span>",
        );
        assert_eq!(fields.property_type.as_deref(), Some("Casa"));
        assert_eq!(fields.num_bed, Some(4));
        assert_eq!(fields.num_bath, Some(2));
    }

    #[test]
    fn malformed_room_counts_are_a_format_error() {
        let (fields, issues) = extract_from(
            "<span id=\"MainPlaceHolder_LabelBasicInfo0\"><b>Casa</b> amplia</span>",
        );
        assert_eq!(fields.num_bed, None);
        assert!(issues
            .iter()
            .any(|e| matches!(e, ExtractError::FormatError { field, .. } if field == "BasicInfo")));
    }

    #[test]
    fn parses_price_with_thousands_separator() {
        let (fields, _) = extract_from(
            "<span id=\"MainPlaceHolder_LabelPrecio0\">Precio:\u{a0}40,000 cuc</span>",
        );
        assert_eq!(fields.price, Some(40000.0));
    }

    #[test]
    fn placeholder_price_is_absent() {
        let (fields, issues) = extract_from(
            "<span id=\"MainPlaceHolder_LabelPrecio0\">Precio:\u{a0}-</span>",
        );
        assert_eq!(fields.price, None);
        assert!(!issues
            .iter()
            .any(|e| matches!(e, ExtractError::FormatError { field, .. } if field == "Precio")));
    }

    #[test]
    fn non_numeric_price_is_a_format_error() {
        let (fields, issues) = extract_from(
            "<span id=\"MainPlaceHolder_LabelPrecio0\">Precio:\u{a0}a convenir</span>",
        );
        assert_eq!(fields.price, None);
        assert!(issues
            .iter()
            .any(|e| matches!(e, ExtractError::FormatError { field, .. } if field == "Precio")));
    }

    #[test]
    fn unmodified_listing_has_single_publication_date() {
        let (fields, _) = extract_from(
            "<span id=\"MainPlaceHolder_LabelPublicado0\">Publicado:\u{a0}10/04/2013</span>",
        );
        assert!(!fields.modified);
        assert_eq!(fields.pub_date.as_deref(), Some("10/04/2013"));
        assert_eq!(fields.mod_date, None);
    }

    #[test]
    fn modified_listing_splits_on_sentinel() {
        let (fields, _) = extract_from(
            "<span id=\"MainPlaceHolder_LabelPublicado0\">\
             Modificado:\u{a0}12/05/2013</br>Publicado:\u{a0}10/04/2013</span>",
        );
        assert!(fields.modified);
        assert_eq!(fields.mod_date.as_deref(), Some("12/05/2013"));
        assert_eq!(fields.pub_date.as_deref(), Some("10/04/2013"));
        assert_ne!(fields.mod_date, fields.pub_date);
    }

    #[test]
    fn notes_placeholder_is_kept_verbatim() {
        let (fields, _) = extract_from(
            "<span id=\"MainPlaceHolder_LabelObservaciones0\">Observaciones:\u{a0}-</span>",
        );
        assert_eq!(fields.notes.as_deref(), Some("-"));
    }

    #[test]
    fn missing_fields_are_reported_not_defaulted() {
        let (_, issues) = extract_from("");
        assert!(issues
            .iter()
            .any(|e| matches!(e, ExtractError::MissingRequiredField(key) if key == "Precio")));
        assert!(issues
            .iter()
            .any(|e| matches!(e, ExtractError::MissingRequiredField(key) if key == "Publicado")));
    }
}
