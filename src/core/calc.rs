//! IGV line calculation and document aggregation.
//!
//! This is the client-side estimate of what the backend will compute:
//! per-line value/IGV/total and the document totals that pre-fill the
//! payment amount. The backend's totals remain authoritative once a
//! document is created; these functions exist for pre-submission
//! feedback and must match its arithmetic.
//!
//! All functions here are pure and synchronous. Callers editing a line
//! sequence should apply every pending mutation first and then trigger
//! a single [`aggregate`] (or [`recalculate`]) — recomputing after each
//! individual insertion renders transient, wrong intermediate totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{DocumentTotals, Invoice, InvoiceLine, LineAmounts, TaxCategory};

/// IGV rate as a percentage (e.g. 18 for 18%).
///
/// The rate is a jurisdiction/regime-dependent parameter, so it is
/// carried explicitly rather than hard-coded at the use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgvRate(Decimal);

impl IgvRate {
    /// Create a rate from a percentage. Negative input degrades to 0%.
    pub fn new(percent: Decimal) -> Self {
        if percent.is_sign_negative() {
            Self(Decimal::ZERO)
        } else {
            Self(percent)
        }
    }

    /// The rate as a percentage (18 for the standard rate).
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// The rate as a fraction (0.18 for the standard rate).
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for IgvRate {
    /// The standard IGV rate: 18%.
    fn default() -> Self {
        Self(Decimal::new(18, 0))
    }
}

/// A coercion applied while accepting raw line input.
///
/// Malformed input degrades to a zero-value line instead of failing the
/// whole document; each degradation is reported so a form layer can
/// surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionWarning {
    /// Quantity did not parse as a number; treated as 0.
    UnparsableQuantity(String),
    /// Quantity was negative; treated as 0.
    NegativeQuantity(Decimal),
    /// Unit price did not parse as a number; treated as 0.
    UnparsablePrice(String),
    /// Unit price was negative; treated as 0.
    NegativePrice(Decimal),
    /// Tax category code was not one of S/E/O/Z; treated as O (no tax).
    UnknownTaxCategory(String),
}

impl std::fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnparsableQuantity(raw) => {
                write!(f, "quantity '{raw}' is not a number, treated as 0")
            }
            Self::NegativeQuantity(q) => write!(f, "negative quantity {q} treated as 0"),
            Self::UnparsablePrice(raw) => {
                write!(f, "unit price '{raw}' is not a number, treated as 0")
            }
            Self::NegativePrice(p) => write!(f, "negative unit price {p} treated as 0"),
            Self::UnknownTaxCategory(raw) => {
                write!(f, "unknown tax category '{raw}', treated as O (no tax)")
            }
        }
    }
}

/// Raw line input after defensive coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercedLine {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub tax_category: TaxCategory,
    /// Coercions that were applied, in field order.
    pub warnings: Vec<CoercionWarning>,
}

/// Coerce raw form-field input into calculator input.
///
/// Empty, non-numeric, or negative quantity/price become 0; an
/// unrecognized tax category code becomes `O` and is logged distinctly
/// (the warning is also returned so callers can report it).
pub fn coerce_line(quantity: &str, unit_price: &str, tax_category: &str) -> CoercedLine {
    let mut warnings = Vec::new();

    let quantity = coerce_amount(quantity, &mut warnings, true);
    let unit_price = coerce_amount(unit_price, &mut warnings, false);

    let tax_category = match TaxCategory::from_code(tax_category.trim()) {
        Some(cat) => cat,
        None => {
            log::warn!("unknown tax category '{tax_category}', falling back to O (inafecto)");
            warnings.push(CoercionWarning::UnknownTaxCategory(tax_category.to_string()));
            TaxCategory::Unaffected
        }
    };

    CoercedLine {
        quantity,
        unit_price,
        tax_category,
        warnings,
    }
}

fn coerce_amount(raw: &str, warnings: &mut Vec<CoercionWarning>, is_quantity: bool) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(v) if v.is_sign_negative() => {
            warnings.push(if is_quantity {
                CoercionWarning::NegativeQuantity(v)
            } else {
                CoercionWarning::NegativePrice(v)
            });
            Decimal::ZERO
        }
        Ok(v) => v,
        Err(_) => {
            warnings.push(if is_quantity {
                CoercionWarning::UnparsableQuantity(raw.to_string())
            } else {
                CoercionWarning::UnparsablePrice(raw.to_string())
            });
            Decimal::ZERO
        }
    }
}

/// Compute one line's derived amounts.
///
/// Never fails: negative inputs are treated as 0. Free-of-charge (Z)
/// lines short-circuit to all-zero regardless of quantity and price;
/// taxed (S) lines carry IGV at `rate`; exempt (E) and unaffected (O)
/// lines pass their value through untaxed.
///
/// The returned amounts are exact (unrounded); round at display time
/// with [`LineAmounts::rounded`].
pub fn compute_line(
    quantity: Decimal,
    unit_price: Decimal,
    category: TaxCategory,
    rate: IgvRate,
) -> LineAmounts {
    if category == TaxCategory::Free {
        return LineAmounts::ZERO;
    }

    let quantity = quantity.max(Decimal::ZERO);
    let unit_price = unit_price.max(Decimal::ZERO);

    let value = quantity * unit_price;
    let igv = if category == TaxCategory::Taxed {
        value * rate.fraction()
    } else {
        Decimal::ZERO
    };

    LineAmounts {
        value,
        igv,
        total: value + igv,
    }
}

/// Aggregate a line sequence into document totals.
///
/// Stateless and order-independent; an empty slice yields all-zero
/// totals. Accumulation is exact, only the final totals are rounded to
/// 2 decimals (half-up), so per-line rounding error does not compound.
pub fn aggregate(lines: &[InvoiceLine], rate: IgvRate) -> DocumentTotals {
    aggregate_with_perception(lines, rate, Decimal::ZERO)
}

/// [`aggregate`], with a document-level percepción added to the grand
/// total (the base amounts are unaffected).
pub fn aggregate_with_perception(
    lines: &[InvoiceLine],
    rate: IgvRate,
    perception: Decimal,
) -> DocumentTotals {
    let mut taxed = Decimal::ZERO;
    let mut exempt = Decimal::ZERO;
    let mut unaffected = Decimal::ZERO;
    let mut free = Decimal::ZERO;
    let mut igv = Decimal::ZERO;

    for line in lines {
        let amounts = compute_line(line.quantity, line.unit_price, line.tax_category, rate);
        match line.tax_category {
            TaxCategory::Taxed => {
                taxed += amounts.value;
                igv += amounts.igv;
            }
            TaxCategory::Exempt => exempt += amounts.value,
            TaxCategory::Unaffected => unaffected += amounts.value,
            TaxCategory::Free => free += amounts.value,
        }
    }

    let total_taxed = round_half_up(taxed, 2);
    let total_exempt = round_half_up(exempt, 2);
    let total_unaffected = round_half_up(unaffected, 2);
    let total_free = round_half_up(free, 2);
    let igv = round_half_up(igv, 2);
    let perception = round_half_up(perception, 2);

    let grand_total = total_taxed + total_exempt + total_unaffected + total_free + igv + perception;

    DocumentTotals {
        total_taxed,
        total_exempt,
        total_unaffected,
        total_free,
        igv,
        perception,
        grand_total,
        suggested_payment: grand_total,
    }
}

/// Recompute all derived amounts of an invoice in place: every line's
/// [`LineAmounts`] (rounded for display) and the document totals.
///
/// Does not touch an existing payment amount — the suggested payment is
/// a one-way pre-fill default, not a binding.
pub fn recalculate(invoice: &mut Invoice, rate: IgvRate) {
    for line in &mut invoice.lines {
        line.amounts =
            Some(compute_line(line.quantity, line.unit_price, line.tax_category, rate).rounded());
    }
    let perception = invoice
        .perception
        .as_ref()
        .map(|p| p.amount)
        .unwrap_or(Decimal::ZERO);
    invoice.totals = Some(aggregate_with_perception(&invoice.lines, rate, perception));
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn taxed_line() {
        let amounts = compute_line(dec!(2), dec!(100), TaxCategory::Taxed, IgvRate::default());
        assert_eq!(amounts.value, dec!(200));
        assert_eq!(amounts.igv, dec!(36));
        assert_eq!(amounts.total, dec!(236));
    }

    #[test]
    fn free_line_short_circuits() {
        let amounts = compute_line(dec!(7), dec!(30), TaxCategory::Free, IgvRate::default());
        assert_eq!(amounts, LineAmounts::ZERO);
    }

    #[test]
    fn exempt_and_unaffected_are_untaxed() {
        for cat in [TaxCategory::Exempt, TaxCategory::Unaffected] {
            let amounts = compute_line(dec!(3), dec!(40), cat, IgvRate::default());
            assert_eq!(amounts.value, dec!(120));
            assert_eq!(amounts.igv, dec!(0));
            assert_eq!(amounts.total, dec!(120));
        }
    }

    #[test]
    fn negative_inputs_degrade_to_zero() {
        let amounts = compute_line(dec!(-5), dec!(100), TaxCategory::Taxed, IgvRate::default());
        assert_eq!(amounts, LineAmounts::ZERO);
        let amounts = compute_line(dec!(5), dec!(-100), TaxCategory::Taxed, IgvRate::default());
        assert_eq!(amounts, LineAmounts::ZERO);
    }

    #[test]
    fn coerce_reports_each_field() {
        let coerced = coerce_line("abc", "-10", "Q");
        assert_eq!(coerced.quantity, dec!(0));
        assert_eq!(coerced.unit_price, dec!(0));
        assert_eq!(coerced.tax_category, TaxCategory::Unaffected);
        assert_eq!(coerced.warnings.len(), 3);
        assert!(matches!(
            coerced.warnings[2],
            CoercionWarning::UnknownTaxCategory(_)
        ));
    }

    #[test]
    fn coerce_accepts_clean_input() {
        let coerced = coerce_line("2", "100.00", "S");
        assert_eq!(coerced.quantity, dec!(2));
        assert_eq!(coerced.unit_price, dec!(100.00));
        assert_eq!(coerced.tax_category, TaxCategory::Taxed);
        assert!(coerced.warnings.is_empty());
    }

    #[test]
    fn custom_rate() {
        let amounts = compute_line(
            dec!(1),
            dec!(100),
            TaxCategory::Taxed,
            IgvRate::new(dec!(10)),
        );
        assert_eq!(amounts.igv, dec!(10));
    }

    #[test]
    fn negative_rate_degrades_to_zero() {
        assert_eq!(IgvRate::new(dec!(-18)).percent(), dec!(0));
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(dec!(0.125), 2), dec!(0.13));
        assert_eq!(round_half_up(dec!(0.124), 2), dec!(0.12));
    }

    #[test]
    fn rounded_view_preserves_total_identity() {
        // 0.5 × 2.009: value 1.0045 → 1.00 and IGV 0.18081 → 0.18 both
        // round down, while the exact total 1.18531 would round to 1.19.
        // The rounded view must stay value + igv.
        let amounts = compute_line(
            dec!(0.5),
            dec!(2.009),
            TaxCategory::Taxed,
            IgvRate::default(),
        );
        let rounded = amounts.rounded();
        assert_eq!(rounded.value, dec!(1.00));
        assert_eq!(rounded.igv, dec!(0.18));
        assert_eq!(rounded.total, dec!(1.18));
    }
}
