/// Split marker inserted in place of the site's malformed tag. Does not
/// occur anywhere else in Cubisima markup.
pub const SENTINEL: &str = "|||";

/// The site emits a stray `</br>` right before "Publicado" on listings that
/// were edited after publication. Left alone, the parser closes the
/// description container early and the publication date and observations
/// fields read as empty.
const EDITED_DEFECT: &str = "</br>Publicado";

/// Repair known markup defects in a raw listing document before parsing.
///
/// This is the only step allowed to mutate raw text. Further site defects
/// should be added here as separate substitutions.
pub fn sanitize(html: &str) -> String {
    html.replace(EDITED_DEFECT, &format!("{}Publicado", SENTINEL))
}
