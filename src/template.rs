use crate::dom::Document;
use crate::error::ExtractError;

/// Header banner only present on certified listings.
pub const CERTIFIED_MARKER_ID: &str = "casa_certificada_cabecera";

/// The three layouts Cubisima renders a listing with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    NoPhotos,
    WithPhotos,
    Certified,
}

/// How one template names its markup: the three container ids plus the
/// modifiers appended to the shared `MainPlaceHolder_Label*` id family.
///
/// The construction-era field does not follow the general suffix rule; it
/// carries its own per-template modifier (`LabelAnoSF` on the no-photos
/// layout, not `LabelAno0`).
#[derive(Debug, Clone, Copy)]
pub struct FieldNamingScheme {
    pub description_container: &'static str,
    pub amenities_container: &'static str,
    pub contact_container: &'static str,
    pub suffix: &'static str,
    pub era_modifier: &'static str,
}

impl TemplateKind {
    pub fn scheme(self) -> FieldNamingScheme {
        match self {
            TemplateKind::NoPhotos => FieldNamingScheme {
                description_container: "casa_detalles_sinfoto_izquierda",
                amenities_container: "casa_detalles_sinfoto_centro",
                contact_container: "casa_detalles_sinfoto_derecha",
                suffix: "0",
                era_modifier: "SF",
            },
            TemplateKind::WithPhotos => FieldNamingScheme {
                description_container: "casa_detalles_confoto_izquierda",
                amenities_container: "casa_detalles_confoto_centro",
                contact_container: "casa_detalles_confoto_derecha",
                suffix: "1",
                era_modifier: "CF",
            },
            TemplateKind::Certified => FieldNamingScheme {
                description_container: "casa_detalles_certificada_izquierda",
                amenities_container: "casa_detalles_certificada_centro",
                contact_container: "casa_detalles_certificada_derecha",
                suffix: "2",
                era_modifier: "C",
            },
        }
    }
}

/// Decide which template rendered this document.
///
/// Certified must be checked before WithPhotos: a certified listing can
/// carry photo markup too. NoPhotos has no marker of its own and is chosen
/// by elimination, but only if its description container actually exists;
/// a document matching none of the three layouts is not guessed at.
pub fn classify(document: &Document) -> Result<TemplateKind, ExtractError> {
    if document.by_id(CERTIFIED_MARKER_ID).is_some() {
        return Ok(TemplateKind::Certified);
    }
    if document
        .by_id(TemplateKind::WithPhotos.scheme().description_container)
        .is_some()
    {
        return Ok(TemplateKind::WithPhotos);
    }
    if document
        .by_id(TemplateKind::NoPhotos.scheme().description_container)
        .is_some()
    {
        return Ok(TemplateKind::NoPhotos);
    }
    Err(ExtractError::ClassificationAmbiguous(
        "document matches no known listing layout".to_string(),
    ))
}
