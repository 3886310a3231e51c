//! SUNAT catalog 07 — IGV affectation type codes.
//!
//! Every UBL line carries a `TaxExemptionReasonCode` from this catalog
//! telling SUNAT *why* the line is taxed, exempt, unaffected, or free.
//! The single-letter tax category determines the default code; the full
//! table exists because gratuitous transfers have one code per legal
//! figure (bonificación, retiro, muestras, …).

use super::types::TaxCategory;

/// Check whether `code` is a known catalog 07 affectation code.
pub fn is_known_affectation_code(code: &str) -> bool {
    AFFECTATION_CODES.binary_search_by(|(c, _)| c.cmp(&code)).is_ok()
}

/// Human-readable description of a catalog 07 code, if known.
pub fn affectation_description(code: &str) -> Option<&'static str> {
    AFFECTATION_CODES
        .binary_search_by(|(c, _)| c.cmp(&code))
        .ok()
        .map(|i| AFFECTATION_CODES[i].1)
}

/// Default catalog 07 code for a tax category.
///
/// Free-of-charge lines default to "15" (bonificación), the figure the
/// line editor's promotional items model.
pub fn default_affectation(category: TaxCategory) -> &'static str {
    match category {
        TaxCategory::Taxed => "10",
        TaxCategory::Exempt => "20",
        TaxCategory::Unaffected => "30",
        TaxCategory::Free => "15",
    }
}

/// Sorted list of catalog 07 codes. Sorted by code for binary search.
static AFFECTATION_CODES: &[(&str, &str)] = &[
    ("10", "Gravado - Operación onerosa"),
    ("11", "Gravado - Retiro por premio"),
    ("12", "Gravado - Retiro por donación"),
    ("13", "Gravado - Retiro"),
    ("14", "Gravado - Retiro por publicidad"),
    ("15", "Gravado - Bonificaciones"),
    ("16", "Gravado - Retiro por entrega a trabajadores"),
    ("17", "Gravado - IVAP"),
    ("20", "Exonerado - Operación onerosa"),
    ("21", "Exonerado - Transferencia gratuita"),
    ("30", "Inafecto - Operación onerosa"),
    ("31", "Inafecto - Retiro por bonificación"),
    ("32", "Inafecto - Retiro"),
    ("33", "Inafecto - Retiro por muestras médicas"),
    ("34", "Inafecto - Retiro por convenio colectivo"),
    ("35", "Inafecto - Retiro por premio"),
    ("36", "Inafecto - Retiro por publicidad"),
    ("40", "Exportación"),
];
