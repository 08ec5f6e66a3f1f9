use casafinder::error::ExtractError;
use casafinder::extractor::{extract_listing, Extraction};

const NBSP: char = '\u{a0}';

fn description_block(container: &str, suffix: &str, era: &str, date_field: &str) -> String {
    format!(
        "<div id=\"{container}\">\
         <span id=\"MainPlaceHolder_LabelBasicInfo{suffix}\"><b>Casa</b> 4 cuartos, 2 banos</span>\
         <span id=\"MainPlaceHolder_LabelPrecio{suffix}\">Precio:{NBSP}40,000 cuc</span>\
         <span id=\"MainPlaceHolder_LabelMetros{suffix}\">Metros:{NBSP}120 m2</span>\
         <span id=\"MainPlaceHolder_LabelAno{era}\">Construccion:{NBSP}Anos 50</span>\
         <span id=\"MainPlaceHolder_LabelDireccion{suffix}\">Direccion:{NBSP}en Habana Vieja, La Habana</span>\
         <span id=\"MainPlaceHolder_LabelCercaDe{suffix}\">Cerca De:{NBSP}Malecon</span>\
         {date_field}\
         <span id=\"MainPlaceHolder_LabelObservaciones{suffix}\">Observaciones:{NBSP}-</span>\
         </div>"
    )
}

fn amenities_block(container: &str) -> String {
    format!(
        "<div id=\"{container}\"><table><tr>\
         <td><img src=\"http://images.cubisima.com/checked.png\">Garaje</td>\
         <td><img src=\"http://images.cubisima.com/notchecked.png\">Piscina</td>\
         <td><img src=\"http://images.cubisima.com/checked.png\">Agua</td>\
         </tr></table></div>"
    )
}

fn contact_block(container: &str, suffix: &str) -> String {
    format!(
        "<div id=\"{container}\">\
         <span id=\"MainPlaceHolder_LabelContacto{suffix}\">Contactar a:{NBSP}Juan Perez</span>\
         <img id=\"MainPlaceHolder_ImageTelefono{suffix}\" alt=\"537-8601234\">\
         <span id=\"MainPlaceHolder_LabelOtraInfo{suffix}\">Otra informacion:{NBSP}Llamar por la tarde</span>\
         </div>"
    )
}

fn no_photos_document(date_field: &str) -> String {
    format!(
        "<html><body>{}{}{}</body></html>",
        description_block("casa_detalles_sinfoto_izquierda", "0", "SF", date_field),
        amenities_block("casa_detalles_sinfoto_centro"),
        contact_block("casa_detalles_sinfoto_derecha", "0"),
    )
}

fn unmodified_date_field() -> String {
    format!("<span id=\"MainPlaceHolder_LabelPublicado0\">Publicado:{NBSP}10/04/2013</span>")
}

fn extract(html: &str) -> Extraction {
    extract_listing(
        html,
        "http:__www.cubisima.com_casas_17000-cuc-apartamento-en-cerro!56458.htm",
    )
    .unwrap()
}

#[test]
fn extracts_a_complete_no_photos_listing() {
    let extraction = extract(&no_photos_document(&unmodified_date_field()));
    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);

    let record = extraction.record;
    assert_eq!(record.id, "56458");
    assert_eq!(record.property_type.as_deref(), Some("Casa"));
    assert_eq!(record.num_bed, Some(4));
    assert_eq!(record.num_bath, Some(2));
    assert_eq!(record.price, Some(40000.0));
    assert_eq!(record.meters_squared, Some(120.0));
    assert_eq!(record.construction_era.as_deref(), Some("Anos 50"));
    assert_eq!(record.location.as_deref(), Some("en Habana Vieja, La Habana"));
    assert_eq!(record.near_to.as_deref(), Some("Malecon"));
    assert_eq!(record.pub_date.as_deref(), Some("10/04/2013"));
    assert_eq!(record.mod_date, None);
    assert!(!record.modified);
    assert_eq!(record.notes.as_deref(), Some("-"));
    assert_eq!(record.contact_name.as_deref(), Some("Juan Perez"));
    assert_eq!(record.phone_number.as_deref(), Some("537-8601234"));
    assert_eq!(record.mobile_number, None);
    assert_eq!(record.other_info.as_deref(), Some("Llamar por la tarde"));

    assert_eq!(record.amenities.get("Garaje"), Some(&true));
    assert_eq!(record.amenities.get("Piscina"), Some(&false));
    assert_eq!(record.amenities.get("Agua"), Some(&true));
}

#[test]
fn extracts_an_edited_listing_with_both_dates() {
    let date_field = format!(
        "<span id=\"MainPlaceHolder_LabelPublicado0\">\
         Modificado:{NBSP}12/05/2013</br>Publicado:{NBSP}10/04/2013</span>"
    );
    let extraction = extract(&no_photos_document(&date_field));
    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);

    let record = extraction.record;
    assert!(record.modified);
    assert_eq!(record.mod_date.as_deref(), Some("12/05/2013"));
    assert_eq!(record.pub_date.as_deref(), Some("10/04/2013"));
    assert_ne!(record.mod_date, record.pub_date);
    // The defect used to swallow the observations field too
    assert_eq!(record.notes.as_deref(), Some("-"));
}

#[test]
fn extracts_a_with_photos_listing() {
    let html = format!(
        "<html><body>{}{}{}</body></html>",
        description_block(
            "casa_detalles_confoto_izquierda",
            "1",
            "CF",
            &format!("<span id=\"MainPlaceHolder_LabelPublicado1\">Publicado:{NBSP}01/02/2013</span>"),
        ),
        amenities_block("casa_detalles_confoto_centro"),
        contact_block("casa_detalles_confoto_derecha", "1"),
    );
    let extraction = extract(&html);
    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);
    assert_eq!(extraction.record.property_type.as_deref(), Some("Casa"));
    assert_eq!(extraction.record.pub_date.as_deref(), Some("01/02/2013"));
}

#[test]
fn extracts_a_certified_listing() {
    let html = format!(
        "<html><body><div id=\"casa_certificada_cabecera\"></div>{}{}{}</body></html>",
        description_block(
            "casa_detalles_certificada_izquierda",
            "2",
            "C",
            &format!("<span id=\"MainPlaceHolder_LabelPublicado2\">Publicado:{NBSP}05/06/2013</span>"),
        ),
        amenities_block("casa_detalles_certificada_centro"),
        contact_block("casa_detalles_certificada_derecha", "2"),
    );
    let extraction = extract(&html);
    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);
    assert_eq!(extraction.record.pub_date.as_deref(), Some("05/06/2013"));
}

#[test]
fn partial_documents_still_yield_a_record() {
    // Description container present, the other two groups missing: the
    // description fields survive and the misses are reported.
    let html = format!(
        "<html><body>{}</body></html>",
        description_block(
            "casa_detalles_sinfoto_izquierda",
            "0",
            "SF",
            &unmodified_date_field(),
        ),
    );
    let extraction = extract(&html);
    assert_eq!(extraction.record.property_type.as_deref(), Some("Casa"));
    assert!(extraction.record.amenities.is_empty());
    assert!(extraction
        .issues
        .iter()
        .any(|e| matches!(e, ExtractError::MissingRequiredField(id) if id == "casa_detalles_sinfoto_centro")));
    assert!(extraction
        .issues
        .iter()
        .any(|e| matches!(e, ExtractError::MissingRequiredField(id) if id == "casa_detalles_sinfoto_derecha")));
}
