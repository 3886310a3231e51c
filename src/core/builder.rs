use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::affectation::default_affectation;
use super::calc::{self, IgvRate};
use super::error::ComprobanteError;
use super::types::*;
use super::validation;

/// Builder for constructing valid comprobantes.
///
/// ```
/// use chrono::NaiveDate;
/// use comprobante::core::*;
/// use rust_decimal_macros::dec;
///
/// let boleta = InvoiceBuilder::new("B001", 1, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
///     .issuer(
///         IssuerBuilder::new(
///             "20123456789",
///             "EMPRESA DE PRUEBAS SAC",
///             AddressBuilder::new("AV. PRINCIPAL 123", "LIMA", "LIMA", "LIMA").build(),
///         )
///         .build(),
///     )
///     .customer(CustomerBuilder::new(CustomerDocType::Dni, "12345678", "CLIENTE DE PRUEBAS").build())
///     .add_line(LineBuilder::new(1, "PRODUCTO GRAVADO", dec!(2), dec!(100.00)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(boleta.totals.unwrap().grand_total, dec!(236.00));
/// ```
pub struct InvoiceBuilder {
    document_type: DocumentType,
    series: String,
    number: u32,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    currency_code: String,
    operation_type: OperationType,
    issuer: Option<Issuer>,
    customer: Option<Customer>,
    lines: Vec<InvoiceLine>,
    perception: Option<Perception>,
    payment_means: PaymentMeans,
    payment_amount: Option<Decimal>,
    observations: Option<String>,
    igv_rate: IgvRate,
}

impl InvoiceBuilder {
    /// Start a boleta de venta in `series` with the given correlative.
    /// Use [`document_type`](Self::document_type) to switch to a factura
    /// or note.
    pub fn new(series: impl Into<String>, number: u32, issue_date: NaiveDate) -> Self {
        Self {
            document_type: DocumentType::Boleta,
            series: series.into(),
            number,
            issue_date,
            due_date: None,
            currency_code: "PEN".to_string(),
            operation_type: OperationType::InternalSale,
            issuer: None,
            customer: None,
            lines: Vec::new(),
            perception: None,
            payment_means: PaymentMeans::Cash,
            payment_amount: None,
            observations: None,
            igv_rate: IgvRate::default(),
        }
    }

    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn operation_type(mut self, operation_type: OperationType) -> Self {
        self.operation_type = operation_type;
        self
    }

    pub fn issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn perception(mut self, perception: Perception) -> Self {
        self.perception = Some(perception);
        self
    }

    pub fn payment_means(mut self, means: PaymentMeans) -> Self {
        self.payment_means = means;
        self
    }

    /// Set an explicit payment amount. Without this, the payment is
    /// pre-filled with the calculated grand total.
    pub fn payment_amount(mut self, amount: Decimal) -> Self {
        self.payment_amount = Some(amount);
        self
    }

    pub fn observations(mut self, text: impl Into<String>) -> Self {
        self.observations = Some(text.into());
        self
    }

    /// Override the IGV rate used for calculation (default 18%).
    pub fn igv_rate(mut self, rate: IgvRate) -> Self {
        self.igv_rate = rate;
        self
    }

    /// Build the comprobante, calculating totals and running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, ComprobanteError> {
        let rate = self.igv_rate;
        let mut invoice = self.assemble()?;

        calc::recalculate(&mut invoice, rate);
        fill_default_payment(&mut invoice);

        let errors = validation::validate_sunat(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ComprobanteError::Validation(msg));
        }

        Ok(invoice)
    }

    /// Build without validation — useful for testing or importing
    /// external data. Totals are still calculated.
    pub fn build_unchecked(self) -> Result<Invoice, ComprobanteError> {
        let rate = self.igv_rate;
        let mut invoice = self.assemble()?;
        calc::recalculate(&mut invoice, rate);
        fill_default_payment(&mut invoice);
        Ok(invoice)
    }

    fn assemble(self) -> Result<Invoice, ComprobanteError> {
        let issuer = self
            .issuer
            .ok_or_else(|| ComprobanteError::Builder("issuer is required".into()))?;
        let customer = self
            .customer
            .ok_or_else(|| ComprobanteError::Builder("customer is required".into()))?;

        if self.lines.is_empty() {
            return Err(ComprobanteError::Builder(
                "at least one line item is required".into(),
            ));
        }

        // Input limits to prevent abuse
        if self.lines.len() > 10_000 {
            return Err(ComprobanteError::Builder(
                "comprobante cannot have more than 10,000 line items".into(),
            ));
        }
        if self
            .observations
            .as_ref()
            .is_some_and(|o| o.len() > 5_000)
        {
            return Err(ComprobanteError::Builder(
                "observations cannot exceed 5,000 characters".into(),
            ));
        }

        Ok(Invoice {
            document_type: self.document_type,
            series: self.series,
            number: self.number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            currency_code: self.currency_code,
            operation_type: self.operation_type,
            issuer,
            customer,
            lines: self.lines,
            perception: self.perception,
            payment: Some(Payment {
                means: self.payment_means,
                amount: self.payment_amount.unwrap_or(Decimal::ZERO),
            }),
            observations: self.observations,
            totals: None,
        })
    }
}

/// Pre-fill a zero payment amount with the suggested payment. An
/// explicitly set (non-zero) amount is left untouched.
fn fill_default_payment(invoice: &mut Invoice) {
    let suggested = invoice
        .totals
        .as_ref()
        .map(|t| t.suggested_payment)
        .unwrap_or(Decimal::ZERO);
    if let Some(payment) = &mut invoice.payment {
        if payment.amount.is_zero() {
            payment.amount = suggested;
        }
    }
}

/// Builder for detail lines.
pub struct LineBuilder {
    line_number: u32,
    product_code: Option<String>,
    description: String,
    quantity: Decimal,
    unit_code: String,
    unit_price: Decimal,
    reference_price: Option<Decimal>,
    tax_category: TaxCategory,
}

impl LineBuilder {
    pub fn new(
        line_number: u32,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            line_number,
            product_code: None,
            description: description.into(),
            quantity,
            unit_code: "NIU".to_string(),
            unit_price,
            reference_price: None,
            tax_category: TaxCategory::Taxed,
        }
    }

    pub fn product_code(mut self, code: impl Into<String>) -> Self {
        self.product_code = Some(code.into());
        self
    }

    pub fn unit_code(mut self, code: impl Into<String>) -> Self {
        self.unit_code = code.into();
        self
    }

    pub fn tax_category(mut self, category: TaxCategory) -> Self {
        self.tax_category = category;
        self
    }

    pub fn reference_price(mut self, price: Decimal) -> Self {
        self.reference_price = Some(price);
        self
    }

    pub fn build(self) -> InvoiceLine {
        // Free-of-charge lines carry no price; the entered price is kept
        // as the informational reference instead.
        let (unit_price, reference_price) = if self.tax_category == TaxCategory::Free {
            (
                Decimal::ZERO,
                self.reference_price.unwrap_or(self.unit_price),
            )
        } else {
            (self.unit_price, self.reference_price.unwrap_or(Decimal::ZERO))
        };

        InvoiceLine {
            line_number: self.line_number,
            product_code: self
                .product_code
                .unwrap_or_else(|| format!("PROD{:03}", self.line_number)),
            description: self.description,
            quantity: self.quantity,
            unit_code: self.unit_code,
            unit_price,
            reference_price,
            tax_category: self.tax_category,
            affectation_code: Some(default_affectation(self.tax_category).to_string()),
            amounts: None,
        }
    }
}

/// Builder for the issuing company.
pub struct IssuerBuilder {
    ruc: String,
    business_name: String,
    trade_name: Option<String>,
    address: Address,
}

impl IssuerBuilder {
    pub fn new(
        ruc: impl Into<String>,
        business_name: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            ruc: ruc.into(),
            business_name: business_name.into(),
            trade_name: None,
            address,
        }
    }

    pub fn trade_name(mut self, name: impl Into<String>) -> Self {
        self.trade_name = Some(name.into());
        self
    }

    pub fn build(self) -> Issuer {
        Issuer {
            ruc: self.ruc,
            business_name: self.business_name,
            trade_name: self.trade_name,
            address: self.address,
        }
    }
}

/// Builder for the receiving customer.
pub struct CustomerBuilder {
    doc_type: CustomerDocType,
    doc_number: String,
    business_name: String,
    address: Option<Address>,
    email: Option<String>,
}

impl CustomerBuilder {
    pub fn new(
        doc_type: CustomerDocType,
        doc_number: impl Into<String>,
        business_name: impl Into<String>,
    ) -> Self {
        Self {
            doc_type,
            doc_number: doc_number.into(),
            business_name: business_name.into(),
            address: None,
            email: None,
        }
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> Customer {
        Customer {
            doc_type: self.doc_type,
            doc_number: self.doc_number,
            business_name: self.business_name,
            address: self.address,
            email: self.email,
        }
    }
}

/// Builder for addresses.
pub struct AddressBuilder {
    street: String,
    district: String,
    province: String,
    department: String,
    ubigeo: Option<String>,
    country_code: String,
}

impl AddressBuilder {
    pub fn new(
        street: impl Into<String>,
        district: impl Into<String>,
        province: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            district: district.into(),
            province: province.into(),
            department: department.into(),
            ubigeo: None,
            country_code: "PE".to_string(),
        }
    }

    pub fn ubigeo(mut self, code: impl Into<String>) -> Self {
        self.ubigeo = Some(code.into());
        self
    }

    pub fn country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            district: self.district,
            province: self.province,
            department: self.department,
            ubigeo: self.ubigeo,
            country_code: self.country_code,
        }
    }
}
