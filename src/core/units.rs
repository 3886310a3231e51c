//! SUNAT catalog 03 unit-of-measure validation.
//!
//! Catalog 03 is the UN/ECE Recommendation 20 code list; this table
//! covers the codes that actually appear on facturas and boletas,
//! including the two SUNAT-specific conventions: "NIU" for goods and
//! "ZZ" for services.

/// Check whether `code` is a known catalog 03 unit code.
pub fn is_known_unit_code(code: &str) -> bool {
    UNIT_CODES.binary_search(&code).is_ok()
}

/// Sorted list of common catalog 03 unit codes.
/// Sorted for binary search.
static UNIT_CODES: &[&str] = &[
    "BG",  // Bag
    "BO",  // Bottle
    "BX",  // Box
    "CEN", // Hundred
    "CMT", // Centimetre
    "DAY", // Day
    "DZN", // Dozen
    "GLL", // Gallon (US)
    "GRM", // Gram
    "HUR", // Hour
    "KGM", // Kilogram
    "KTM", // Kilometre
    "LTR", // Litre
    "MIL", // Thousand
    "MTK", // Square metre
    "MTQ", // Cubic metre
    "MTR", // Metre
    "NIU", // Unit (goods)
    "ONZ", // Ounce
    "PK",  // Pack
    "PR",  // Pair
    "SET", // Set
    "TNE", // Tonne
    "ZZ",  // Unit (services)
];
