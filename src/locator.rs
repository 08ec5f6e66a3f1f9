use scraper::ElementRef;

use crate::dom;
use crate::error::ExtractError;
use crate::template::FieldNamingScheme;

/// Non-breaking space separating a Spanish field label from its value,
/// used consistently across the site's listing pages.
pub const LABEL_SEPARATOR: char = '\u{a0}';

/// Placeholder the site renders for fields without a value.
pub const PLACEHOLDER: &str = "-";

/// Logical key of the free-text observations field. The only field whose
/// placeholder text is kept verbatim: a lone "-" there is legitimate content.
pub const NOTES_KEY: &str = "Observaciones";

const ID_PREFIX: &str = "MainPlaceHolder_Label";
const ERA_KEY: &str = "Ano";

/// Concrete element id for a logical field key under the active scheme.
pub fn field_id(key: &str, scheme: &FieldNamingScheme) -> String {
    if key == ERA_KEY {
        format!("{}{}{}", ID_PREFIX, ERA_KEY, scheme.era_modifier)
    } else {
        format!("{}{}{}", ID_PREFIX, key, scheme.suffix)
    }
}

/// Resolve the element holding a logical field within a container subtree.
///
/// A missing element here usually means template drift or a classifier bug,
/// so it is reported rather than defaulted.
pub fn locate<'a>(
    container: ElementRef<'a>,
    key: &str,
    scheme: &FieldNamingScheme,
) -> Result<ElementRef<'a>, ExtractError> {
    dom::find_by_id_within(container, &field_id(key, scheme))
        .ok_or_else(|| ExtractError::MissingRequiredField(key.to_string()))
}

/// Normalize a field value: "-" placeholder or empty text becomes absent,
/// except for the observations field which is preserved verbatim.
pub fn normalize(value: &str, key: &str) -> Option<String> {
    if key == NOTES_KEY {
        return Some(value.to_string());
    }
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Value segment after the label separator, placeholder-normalized.
pub fn field_text(
    container: ElementRef,
    key: &str,
    scheme: &FieldNamingScheme,
) -> Result<Option<String>, ExtractError> {
    let element = locate(container, key, scheme)?;
    let text = dom::text_of(element);
    Ok(normalize(value_segment(&text, key)?, key))
}

/// Segment following the first label separator in a field's text.
pub fn value_segment<'a>(text: &'a str, key: &str) -> Result<&'a str, ExtractError> {
    match text.split_once(LABEL_SEPARATOR) {
        Some((_, value)) => Ok(value),
        None => Err(ExtractError::format(key, "label separator not found")),
    }
}
