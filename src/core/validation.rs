use rust_decimal::Decimal;

use super::affectation;
use super::calc::round_half_up;
use super::error::ValidationError;
use super::numbering;
use super::types::*;

/// Validate a comprobante against the SUNAT issuance rules this library
/// enforces client-side. Returns all validation errors found (not just
/// the first).
///
/// The backend runs the authoritative validation on submission; this
/// pass exists to reject documents that SUNAT would observe before any
/// network round-trip is made.
pub fn validate_sunat(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Series format and prefix per document type
    if let Err(e) = numbering::validate_series(invoice.document_type, &invoice.series) {
        errors.push(ValidationError::with_rule("series", e.to_string(), "SER-01"));
    }

    if invoice.number == 0 {
        errors.push(ValidationError::with_rule(
            "number",
            "correlative number must be at least 1",
            "SER-02",
        ));
    }

    if !super::currencies::is_known_currency_code(&invoice.currency_code) {
        errors.push(ValidationError::with_rule(
            "currency_code",
            format!(
                "currency code '{}' is not a known ISO 4217 code",
                invoice.currency_code
            ),
            "CUR-01",
        ));
    }

    validate_issuer(&invoice.issuer, &mut errors);
    validate_customer(&invoice.customer, &mut errors);

    // Facturas are issued against a RUC; boletas admit any identity doc.
    if invoice.document_type == DocumentType::Factura
        && invoice.customer.doc_type != CustomerDocType::Ruc
    {
        errors.push(ValidationError::with_rule(
            "customer.doc_type",
            "facturas (01) require a customer identified by RUC (catalog 06 code 6)",
            "DOC-01",
        ));
    }

    if invoice.lines.is_empty() {
        errors.push(ValidationError::with_rule(
            "lines",
            "comprobante must have at least one line item",
            "LIN-00",
        ));
    }

    for (i, line) in invoice.lines.iter().enumerate() {
        validate_line(line, i, &mut errors);
    }

    // Duplicate line numbers
    {
        let mut seen = std::collections::HashSet::new();
        for (i, line) in invoice.lines.iter().enumerate() {
            if !seen.insert(line.line_number) {
                errors.push(ValidationError::with_rule(
                    format!("lines[{i}].line_number"),
                    format!("duplicate line number {}", line.line_number),
                    "LIN-07",
                ));
            }
        }
    }

    if let Some(perception) = &invoice.perception {
        validate_perception(perception, &mut errors);
    }

    if let Some(payment) = &invoice.payment {
        if payment.amount.is_sign_negative() {
            errors.push(ValidationError::with_rule(
                "payment.amount",
                "payment amount must not be negative",
                "PAG-01",
            ));
        }
    }

    errors.extend(validate_arithmetic(invoice));

    errors
}

/// Validate the stored amounts of an invoice for internal consistency:
/// line amounts against their own identity, and document totals against
/// a recomputation from the lines.
pub fn validate_arithmetic(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(totals) = &invoice.totals else {
        errors.push(ValidationError::with_rule(
            "totals",
            "totals must be calculated before validation (call calc::recalculate first)",
            "ART-01",
        ));
        return errors;
    };

    let mut taxed = Decimal::ZERO;
    let mut exempt = Decimal::ZERO;
    let mut unaffected = Decimal::ZERO;
    let mut free = Decimal::ZERO;
    let mut igv = Decimal::ZERO;

    for (i, line) in invoice.lines.iter().enumerate() {
        let Some(amounts) = &line.amounts else {
            errors.push(ValidationError::with_rule(
                format!("lines[{i}].amounts"),
                "line amounts must be calculated before validation",
                "ART-01",
            ));
            continue;
        };

        if amounts.total != amounts.value + amounts.igv {
            errors.push(ValidationError::with_rule(
                format!("lines[{i}].amounts.total"),
                format!(
                    "line total {} does not match value {} + IGV {}",
                    amounts.total, amounts.value, amounts.igv
                ),
                "ART-02",
            ));
        }

        match line.tax_category {
            TaxCategory::Taxed => {
                taxed += amounts.value;
                igv += amounts.igv;
            }
            TaxCategory::Exempt | TaxCategory::Unaffected => {
                if !amounts.igv.is_zero() {
                    errors.push(ValidationError::with_rule(
                        format!("lines[{i}].amounts.igv"),
                        format!(
                            "category {} line must carry no IGV, got {}",
                            line.tax_category.code(),
                            amounts.igv
                        ),
                        "ART-03",
                    ));
                }
                match line.tax_category {
                    TaxCategory::Exempt => exempt += amounts.value,
                    _ => unaffected += amounts.value,
                }
            }
            TaxCategory::Free => {
                if *amounts != LineAmounts::ZERO {
                    errors.push(ValidationError::with_rule(
                        format!("lines[{i}].amounts"),
                        "free-of-charge (Z) line amounts must all be zero",
                        "ART-03",
                    ));
                }
                free += amounts.value;
            }
        }
    }

    let checks: &[(&str, Decimal, Decimal)] = &[
        ("totals.total_taxed", totals.total_taxed, taxed),
        ("totals.total_exempt", totals.total_exempt, exempt),
        ("totals.total_unaffected", totals.total_unaffected, unaffected),
        ("totals.total_free", totals.total_free, free),
        ("totals.igv", totals.igv, igv),
    ];
    // Per-line display rounding can drift up to half a cent per line
    // against the exact aggregation; allow that, with a 2-cent floor.
    let tolerance = Decimal::new(5 * invoice.lines.len().max(4) as i64, 3);
    for (field, stored, expected) in checks {
        let expected = round_half_up(*expected, 2);
        if (*stored - expected).abs() > tolerance {
            errors.push(ValidationError::with_rule(
                *field,
                format!("{field} {stored} does not match sum of line amounts {expected}"),
                "ART-04",
            ));
        }
    }

    let expected_grand = totals.total_taxed
        + totals.total_exempt
        + totals.total_unaffected
        + totals.total_free
        + totals.igv
        + totals.perception;
    if totals.grand_total != expected_grand {
        errors.push(ValidationError::with_rule(
            "totals.grand_total",
            format!(
                "grand total {} does not match calculation {}",
                totals.grand_total, expected_grand
            ),
            "ART-05",
        ));
    }

    if totals.suggested_payment != totals.grand_total {
        errors.push(ValidationError::with_rule(
            "totals.suggested_payment",
            format!(
                "suggested payment {} does not match grand total {}",
                totals.suggested_payment, totals.grand_total
            ),
            "ART-06",
        ));
    }

    errors
}

/// Validate an 11-digit RUC with a known contributor-type prefix.
pub fn validate_ruc(ruc: &str) -> Result<(), String> {
    if ruc.len() != 11 || !ruc.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("RUC '{ruc}' must be exactly 11 digits"));
    }
    // First two digits encode the contributor type
    let prefix = &ruc[..2];
    if !matches!(prefix, "10" | "15" | "16" | "17" | "20") {
        return Err(format!("RUC '{ruc}' has unknown prefix '{prefix}'"));
    }
    Ok(())
}

fn validate_issuer(issuer: &Issuer, errors: &mut Vec<ValidationError>) {
    if let Err(msg) = validate_ruc(&issuer.ruc) {
        errors.push(ValidationError::with_rule("issuer.ruc", msg, "RUC-01"));
    }

    if issuer.business_name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "issuer.business_name",
            "razón social must not be empty",
            "EMI-01",
        ));
    }

    validate_address(&issuer.address, "issuer.address", errors);
}

fn validate_customer(customer: &Customer, errors: &mut Vec<ValidationError>) {
    if customer.business_name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "customer.business_name",
            "customer name must not be empty",
            "ADQ-01",
        ));
    }

    match customer.doc_type {
        CustomerDocType::Ruc => {
            if let Err(msg) = validate_ruc(&customer.doc_number) {
                errors.push(ValidationError::with_rule(
                    "customer.doc_number",
                    msg,
                    "ADQ-02",
                ));
            }
        }
        CustomerDocType::Dni => {
            if customer.doc_number.len() != 8
                || !customer.doc_number.chars().all(|c| c.is_ascii_digit())
            {
                errors.push(ValidationError::with_rule(
                    "customer.doc_number",
                    format!("DNI '{}' must be exactly 8 digits", customer.doc_number),
                    "ADQ-03",
                ));
            }
        }
        _ => {
            if customer.doc_number.trim().is_empty() {
                errors.push(ValidationError::with_rule(
                    "customer.doc_number",
                    "identity document number must not be empty",
                    "ADQ-04",
                ));
            }
        }
    }

    if let Some(address) = &customer.address {
        validate_address(address, "customer.address", errors);
    }
}

fn validate_address(address: &Address, prefix: &str, errors: &mut Vec<ValidationError>) {
    if address.street.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.street"),
            "address must not be empty",
            "DIR-01",
        ));
    }
    if address.district.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.district"),
            "district must not be empty",
            "DIR-02",
        ));
    }
    if let Some(ubigeo) = &address.ubigeo {
        if ubigeo.len() != 6 || !ubigeo.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.ubigeo"),
                format!("ubigeo '{ubigeo}' must be exactly 6 digits"),
                "DIR-03",
            ));
        }
    }
    if address.country_code.len() != 2 {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.country_code"),
            "country code must be 2 characters (ISO 3166-1 alpha-2)",
            "DIR-04",
        ));
    }
}

fn validate_line(line: &InvoiceLine, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("lines[{index}]");

    if line.description.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.description"),
            "description must not be empty",
            "LIN-01",
        ));
    }

    if line.quantity.is_zero() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            "invoiced quantity must not be zero",
            "LIN-02",
        ));
    }

    if line.unit_price.is_sign_negative() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
            "LIN-03",
        ));
    }

    if !super::units::is_known_unit_code(&line.unit_code) {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_code"),
            format!(
                "unit code '{}' is not a known catalog 03 code",
                line.unit_code
            ),
            "LIN-04",
        ));
    }

    // Free lines carry their value in reference_price only
    if line.tax_category == TaxCategory::Free && !line.unit_price.is_zero() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            "free-of-charge (Z) lines must have a zero unit price (use reference_price)",
            "LIN-05",
        ));
    }

    if let Some(code) = &line.affectation_code {
        if !affectation::is_known_affectation_code(code) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.affectation_code"),
                format!("affectation code '{code}' is not a known catalog 07 code"),
                "LIN-06",
            ));
        }
    }
}

fn validate_perception(perception: &Perception, errors: &mut Vec<ValidationError>) {
    if perception.percentage.is_sign_negative() {
        errors.push(ValidationError::with_rule(
            "perception.percentage",
            "perception percentage must not be negative",
            "PER-01",
        ));
    }

    let expected = round_half_up(
        perception.base * perception.percentage / Decimal::ONE_HUNDRED,
        2,
    );
    if (perception.amount - expected).abs() > Decimal::new(2, 2) {
        errors.push(ValidationError::with_rule(
            "perception.amount",
            format!(
                "perception amount {} does not match base {} × {}% = {}",
                perception.amount, perception.base, perception.percentage, expected
            ),
            "PER-02",
        ));
    }
}
