use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A comprobante de pago — the top-level electronic document
/// (factura or boleta de venta, plus the credit/debit note variants).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Document type code (SUNAT catalog 01).
    pub document_type: DocumentType,
    /// Series, e.g. "F001" for facturas or "B001" for boletas.
    pub series: String,
    /// Correlative number within the series (1-based, gapless).
    pub number: u32,
    /// Issue date (fecha de emisión).
    pub issue_date: NaiveDate,
    /// Payment due date (fecha de vencimiento).
    pub due_date: Option<NaiveDate>,
    /// Currency code (ISO 4217, e.g. "PEN").
    pub currency_code: String,
    /// Operation type code (SUNAT catalog 17, e.g. "0101" venta interna).
    pub operation_type: OperationType,
    /// Issuing company (emisor).
    pub issuer: Issuer,
    /// Receiving customer (adquirente).
    pub customer: Customer,
    /// Detail lines.
    pub lines: Vec<InvoiceLine>,
    /// Percepción applied on top of the total, if any.
    pub perception: Option<Perception>,
    /// Declared payment (forma de pago).
    pub payment: Option<Payment>,
    /// Free-text observations.
    pub observations: Option<String>,
    /// Calculated totals (set by `calc::recalculate` / the builder).
    pub totals: Option<DocumentTotals>,
}

impl Invoice {
    /// Series-correlative identifier, e.g. "B001-00000001".
    pub fn document_id(&self) -> String {
        format!("{}-{:08}", self.series, self.number)
    }

    /// Full SUNAT document name: `{ruc}-{type}-{series}-{number}`,
    /// e.g. "20123456789-03-B001-00000001". Used as the base name for
    /// the XML/ZIP/CDR artifacts the backend generates.
    pub fn full_document_name(&self) -> String {
        format!(
            "{}-{}-{}",
            self.issuer.ruc,
            self.document_type.code(),
            self.document_id()
        )
    }
}

/// Issuing company (emisor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issuer {
    /// RUC — 11-digit tax identifier.
    pub ruc: String,
    /// Registered legal name (razón social).
    pub business_name: String,
    /// Trading name (nombre comercial).
    pub trade_name: Option<String>,
    /// Fiscal address.
    pub address: Address,
}

/// Receiving customer (adquirente).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Identity document type (SUNAT catalog 06).
    pub doc_type: CustomerDocType,
    /// Identity document number (8-digit DNI, 11-digit RUC, …).
    pub doc_number: String,
    /// Name or razón social.
    pub business_name: String,
    /// Address, optional for boletas.
    pub address: Option<Address>,
    /// Email for automatic delivery of the document.
    pub email: Option<String>,
}

/// Peruvian postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Street address line.
    pub street: String,
    /// Distrito.
    pub district: String,
    /// Provincia.
    pub province: String,
    /// Departamento.
    pub department: String,
    /// Ubigeo code (6 digits, e.g. "150101" for Lima).
    pub ubigeo: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    pub country_code: String,
}

/// One detail line of a comprobante.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Line number (1-based).
    pub line_number: u32,
    /// Product/service code.
    pub product_code: String,
    /// Item description.
    pub description: String,
    /// Invoiced quantity.
    pub quantity: Decimal,
    /// Unit of measure (SUNAT catalog 03, e.g. "NIU" for goods, "ZZ" for services).
    pub unit_code: String,
    /// Unit price. Forced to zero for free-of-charge (Z) lines.
    pub unit_price: Decimal,
    /// Reference price for free-of-charge lines — the operator-entered
    /// price survives here for informational display even though it
    /// never contributes to totals.
    pub reference_price: Decimal,
    /// IGV affectation category for this line.
    pub tax_category: TaxCategory,
    /// IGV affectation code (SUNAT catalog 07, e.g. "20" exonerado).
    pub affectation_code: Option<String>,
    /// Calculated amounts (value, IGV, total), set by `calc::recalculate`.
    pub amounts: Option<LineAmounts>,
}

/// Tax category codes for IGV line classification.
///
/// The single-letter codes follow the UN/ECE 5305 usage in SUNAT UBL 2.1:
/// they must match what the backend's UBL generator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCategory {
    /// S — gravado: subject to IGV at the standard rate.
    #[serde(rename = "S")]
    Taxed,
    /// E — exonerado: exempt from IGV.
    #[serde(rename = "E")]
    Exempt,
    /// O — inafecto: outside the scope of IGV.
    #[serde(rename = "O")]
    Unaffected,
    /// Z — gratuito: free-of-charge / promotional, zero value regardless
    /// of the price entered.
    #[serde(rename = "Z")]
    Free,
}

impl TaxCategory {
    /// Single-letter category code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Taxed => "S",
            Self::Exempt => "E",
            Self::Unaffected => "O",
            Self::Free => "Z",
        }
    }

    /// Parse from the single-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Taxed),
            "E" => Some(Self::Exempt),
            "O" => Some(Self::Unaffected),
            "Z" => Some(Self::Free),
            _ => None,
        }
    }
}

/// SUNAT catalog 01 — document type codes (subset this library handles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// 01 — Factura.
    #[serde(rename = "01")]
    Factura,
    /// 03 — Boleta de venta.
    #[serde(rename = "03")]
    Boleta,
    /// 07 — Nota de crédito.
    #[serde(rename = "07")]
    CreditNote,
    /// 08 — Nota de débito.
    #[serde(rename = "08")]
    DebitNote,
}

impl DocumentType {
    /// Two-digit catalog 01 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Factura => "01",
            Self::Boleta => "03",
            Self::CreditNote => "07",
            Self::DebitNote => "08",
        }
    }

    /// Parse from the two-digit catalog 01 code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Factura),
            "03" => Some(Self::Boleta),
            "07" => Some(Self::CreditNote),
            "08" => Some(Self::DebitNote),
            _ => None,
        }
    }

    /// Required first letter of the document series, where SUNAT fixes one
    /// ("F001" for facturas, "B001" for boletas). Notes inherit the series
    /// letter of the document they modify, so no single letter applies.
    pub fn series_prefix(&self) -> Option<char> {
        match self {
            Self::Factura => Some('F'),
            Self::Boleta => Some('B'),
            Self::CreditNote | Self::DebitNote => None,
        }
    }
}

/// SUNAT catalog 17 — operation type codes (subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    /// 0101 — Venta interna.
    #[serde(rename = "0101")]
    InternalSale,
    /// 0112 — Venta interna con anticipos.
    #[serde(rename = "0112")]
    InternalSaleAdvances,
    /// 0200 — Exportación.
    #[serde(rename = "0200")]
    Export,
    /// 0401 — Venta interna a no domiciliados.
    #[serde(rename = "0401")]
    NonDomiciled,
}

impl OperationType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InternalSale => "0101",
            Self::InternalSaleAdvances => "0112",
            Self::Export => "0200",
            Self::NonDomiciled => "0401",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0101" => Some(Self::InternalSale),
            "0112" => Some(Self::InternalSaleAdvances),
            "0200" => Some(Self::Export),
            "0401" => Some(Self::NonDomiciled),
            _ => None,
        }
    }
}

/// SUNAT catalog 06 — customer identity document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerDocType {
    /// 0 — Doc. trib. no domiciliado sin RUC.
    #[serde(rename = "0")]
    NonDomiciled,
    /// 1 — DNI.
    #[serde(rename = "1")]
    Dni,
    /// 4 — Carnet de extranjería.
    #[serde(rename = "4")]
    ForeignerCard,
    /// 6 — RUC.
    #[serde(rename = "6")]
    Ruc,
    /// 7 — Pasaporte.
    #[serde(rename = "7")]
    Passport,
    /// A — Cédula diplomática de identidad.
    #[serde(rename = "A")]
    DiplomaticId,
    /// B — Doc. identidad país de residencia.
    #[serde(rename = "B")]
    ResidenceDoc,
    /// C — Tax Identification Number (TIN).
    #[serde(rename = "C")]
    Tin,
    /// D — Identification Number (IN).
    #[serde(rename = "D")]
    In,
    /// E — Tarjeta andina de migración.
    #[serde(rename = "E")]
    AndeanMigrationCard,
}

impl CustomerDocType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonDomiciled => "0",
            Self::Dni => "1",
            Self::ForeignerCard => "4",
            Self::Ruc => "6",
            Self::Passport => "7",
            Self::DiplomaticId => "A",
            Self::ResidenceDoc => "B",
            Self::Tin => "C",
            Self::In => "D",
            Self::AndeanMigrationCard => "E",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::NonDomiciled),
            "1" => Some(Self::Dni),
            "4" => Some(Self::ForeignerCard),
            "6" => Some(Self::Ruc),
            "7" => Some(Self::Passport),
            "A" => Some(Self::DiplomaticId),
            "B" => Some(Self::ResidenceDoc),
            "C" => Some(Self::Tin),
            "D" => Some(Self::In),
            "E" => Some(Self::AndeanMigrationCard),
            _ => None,
        }
    }
}

/// Payment means codes (SUNAT catalog, subset used for facturas/boletas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMeans {
    /// 001 — Depósito en cuenta.
    #[serde(rename = "001")]
    DepositInAccount,
    /// 002 — Giro.
    #[serde(rename = "002")]
    MoneyOrder,
    /// 003 — Transferencia de fondos.
    #[serde(rename = "003")]
    FundsTransfer,
    /// 008 — Efectivo, operaciones sin transferencia de bienes.
    #[serde(rename = "008")]
    CashNoGoodsTransfer,
    /// 009 — Efectivo, en los demás casos.
    #[serde(rename = "009")]
    Cash,
}

impl PaymentMeans {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DepositInAccount => "001",
            Self::MoneyOrder => "002",
            Self::FundsTransfer => "003",
            Self::CashNoGoodsTransfer => "008",
            Self::Cash => "009",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "001" => Some(Self::DepositInAccount),
            "002" => Some(Self::MoneyOrder),
            "003" => Some(Self::FundsTransfer),
            "008" => Some(Self::CashNoGoodsTransfer),
            "009" => Some(Self::Cash),
            _ => None,
        }
    }
}

/// Declared payment (forma de pago).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment means code.
    pub means: PaymentMeans,
    /// Payment amount. Defaults to the document's suggested payment
    /// (the grand total) when not set explicitly; an explicit amount is
    /// never overwritten by recalculation.
    pub amount: Decimal,
}

/// Percepción — an additional collection applied on top of the total
/// for certain operations (e.g. 2% on services).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perception {
    /// Régimen code (e.g. "51").
    pub code: String,
    /// Percentage applied to the base.
    pub percentage: Decimal,
    /// Base amount the percentage applies to.
    pub base: Decimal,
    /// Resulting perception amount.
    pub amount: Decimal,
}

impl Perception {
    /// Build a perception, deriving `amount = base × percentage / 100`
    /// rounded to 2 decimal places.
    pub fn new(code: impl Into<String>, percentage: Decimal, base: Decimal) -> Self {
        let amount = (base * percentage / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        Self {
            code: code.into(),
            percentage,
            base,
            amount,
        }
    }
}

/// Processing lifecycle of a document, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// Created, not yet converted to XML.
    Pending,
    /// UBL XML generated.
    Processing,
    /// XML digitally signed and zipped.
    Signed,
    /// Submitted to SUNAT, awaiting CDR.
    Sent,
    /// CDR received with acceptance code 0.
    Accepted,
    /// CDR received with a rejection code.
    Rejected,
    /// Processing failed.
    Error,
}

/// Per-line derived amounts: value (valor de venta), IGV, and total.
///
/// Held unrounded so document aggregation does not compound per-line
/// rounding error; use [`LineAmounts::rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    /// Line value before tax (quantity × unit price, zero for Z lines).
    pub value: Decimal,
    /// IGV amount (zero unless the line is taxed).
    pub igv: Decimal,
    /// Line total = value + IGV.
    pub total: Decimal,
}

impl LineAmounts {
    pub const ZERO: Self = Self {
        value: Decimal::ZERO,
        igv: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Display view: value and IGV rounded to 2 decimals, half-up.
    ///
    /// The total is re-derived from the rounded parts so that
    /// `total == value + igv` also holds for the rounded view (rounding
    /// all three independently can break it by a cent).
    pub fn rounded(&self) -> Self {
        let dp = |v: Decimal| {
            v.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        };
        let value = dp(self.value);
        let igv = dp(self.igv);
        Self {
            value,
            igv,
            total: value + igv,
        }
    }
}

/// Document-level totals, aggregated over the detail lines.
///
/// Always a full recomputation from the current lines — never patched
/// incrementally — so there is no staleness invariant to maintain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Total operaciones gravadas — sum of line values with category S.
    pub total_taxed: Decimal,
    /// Total operaciones exoneradas — sum of line values with category E.
    pub total_exempt: Decimal,
    /// Total operaciones inafectas — sum of line values with category O.
    pub total_unaffected: Decimal,
    /// Total operaciones gratuitas — sum of line values with category Z.
    /// Always zero: Z lines are zeroed before they reach aggregation.
    pub total_free: Decimal,
    /// Total IGV.
    pub igv: Decimal,
    /// Percepción amount included in the grand total.
    pub perception: Decimal,
    /// Importe total.
    pub grand_total: Decimal,
    /// Pre-fill default for a payment amount field, equal to the grand
    /// total. One-way: a user-edited payment amount is not overwritten
    /// when totals change, only an explicit recalculation step does that.
    pub suggested_payment: Decimal,
}

impl DocumentTotals {
    pub const ZERO: Self = Self {
        total_taxed: Decimal::ZERO,
        total_exempt: Decimal::ZERO,
        total_unaffected: Decimal::ZERO,
        total_free: Decimal::ZERO,
        igv: Decimal::ZERO,
        perception: Decimal::ZERO,
        grand_total: Decimal::ZERO,
        suggested_payment: Decimal::ZERO,
    };

    /// Combined exempt + unaffected base (both are IGV-free).
    pub fn exempt_and_unaffected(&self) -> Decimal {
        self.total_exempt + self.total_unaffected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_category_codes_roundtrip() {
        for cat in [
            TaxCategory::Taxed,
            TaxCategory::Exempt,
            TaxCategory::Unaffected,
            TaxCategory::Free,
        ] {
            assert_eq!(TaxCategory::from_code(cat.code()), Some(cat));
        }
        assert_eq!(TaxCategory::from_code("X"), None);
    }

    #[test]
    fn tax_category_serializes_as_letter() {
        let json = serde_json::to_string(&TaxCategory::Taxed).unwrap();
        assert_eq!(json, "\"S\"");
        let back: TaxCategory = serde_json::from_str("\"Z\"").unwrap();
        assert_eq!(back, TaxCategory::Free);
    }

    #[test]
    fn document_type_series_prefix() {
        assert_eq!(DocumentType::Factura.series_prefix(), Some('F'));
        assert_eq!(DocumentType::Boleta.series_prefix(), Some('B'));
        assert_eq!(DocumentType::CreditNote.series_prefix(), None);
    }

    #[test]
    fn processing_status_wire_format() {
        let json = serde_json::to_string(&ProcessingStatus::Accepted).unwrap();
        assert_eq!(json, "\"ACCEPTED\"");
        let back: ProcessingStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(back, ProcessingStatus::Pending);
    }

    #[test]
    fn perception_derives_amount() {
        use rust_decimal_macros::dec;
        let p = Perception::new("51", dec!(2), dec!(1000));
        assert_eq!(p.amount, dec!(20.00));
    }
}
