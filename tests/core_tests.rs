use chrono::NaiveDate;
use comprobante::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn issuer() -> Issuer {
    IssuerBuilder::new(
        "20123456789",
        "EMPRESA DE PRUEBAS SAC",
        AddressBuilder::new("AV. PRINCIPAL 123", "LIMA", "LIMA", "LIMA")
            .ubigeo("150101")
            .build(),
    )
    .trade_name("EMPRESA PRUEBAS")
    .build()
}

fn customer() -> Customer {
    CustomerBuilder::new(CustomerDocType::Dni, "12345678", "CLIENTE DE PRUEBAS")
        .address(AddressBuilder::new("AV. CLIENTE 456", "LIMA", "LIMA", "LIMA").build())
        .build()
}

// --- Boleta with every line scenario ---

#[test]
fn boleta_with_all_scenarios() {
    // The backend's test-scenario document: taxed, exempt, free, and a
    // taxed service with 2% percepción.
    let boleta = InvoiceBuilder::new("B001", 7, date(2025, 3, 10))
        .issuer(issuer())
        .customer(customer())
        .add_line(
            LineBuilder::new(1, "PRODUCTO GRAVADO", dec!(2), dec!(100.00))
                .product_code("PROD001")
                .build(),
        )
        .add_line(
            LineBuilder::new(2, "PRODUCTO EXONERADO", dec!(1), dec!(50.00))
                .product_code("PROD002")
                .tax_category(TaxCategory::Exempt)
                .build(),
        )
        .add_line(
            LineBuilder::new(3, "PRODUCTO GRATUITO - BONIFICACION", dec!(1), dec!(30.00))
                .product_code("PROD003")
                .tax_category(TaxCategory::Free)
                .build(),
        )
        .add_line(
            LineBuilder::new(4, "SERVICIO CON PERCEPCION", dec!(1), dec!(1000.00))
                .product_code("SERV001")
                .unit_code("ZZ")
                .build(),
        )
        .perception(Perception::new("51", dec!(2), dec!(1000.00)))
        .observations("BOLETA DE PRUEBA #7 - TODOS LOS ESCENARIOS")
        .build()
        .unwrap();

    assert_eq!(boleta.document_id(), "B001-00000007");
    assert_eq!(boleta.full_document_name(), "20123456789-03-B001-00000007");

    let totals = boleta.totals.as_ref().unwrap();
    assert_eq!(totals.total_taxed, dec!(1200.00));
    assert_eq!(totals.total_exempt, dec!(50.00));
    assert_eq!(totals.total_unaffected, dec!(0.00));
    assert_eq!(totals.total_free, dec!(0.00));
    assert_eq!(totals.igv, dec!(216.00));
    assert_eq!(totals.perception, dec!(20.00));
    // 1200 + 50 + 216 + 20
    assert_eq!(totals.grand_total, dec!(1486.00));

    // Payment pre-filled with the grand total
    let payment = boleta.payment.as_ref().unwrap();
    assert_eq!(payment.means, PaymentMeans::Cash);
    assert_eq!(payment.amount, dec!(1486.00));

    // The free line keeps its entered price as reference only
    let free_line = &boleta.lines[2];
    assert_eq!(free_line.unit_price, dec!(0));
    assert_eq!(free_line.reference_price, dec!(30.00));
    assert_eq!(free_line.amounts.unwrap(), LineAmounts::ZERO);

    // Affectation codes derived per category
    assert_eq!(boleta.lines[0].affectation_code.as_deref(), Some("10"));
    assert_eq!(boleta.lines[1].affectation_code.as_deref(), Some("20"));
    assert_eq!(boleta.lines[2].affectation_code.as_deref(), Some("15"));
}

// --- Explicit payment amount is preserved ---

#[test]
fn explicit_payment_amount_not_overwritten() {
    let boleta = InvoiceBuilder::new("B001", 1, date(2025, 3, 10))
        .issuer(issuer())
        .customer(customer())
        .add_line(LineBuilder::new(1, "PRODUCTO", dec!(2), dec!(100.00)).build())
        .payment_means(PaymentMeans::FundsTransfer)
        .payment_amount(dec!(100.00))
        .build()
        .unwrap();

    let payment = boleta.payment.as_ref().unwrap();
    assert_eq!(payment.means, PaymentMeans::FundsTransfer);
    // User override wins over the suggested 236.00
    assert_eq!(payment.amount, dec!(100.00));
    assert_eq!(
        boleta.totals.as_ref().unwrap().suggested_payment,
        dec!(236.00)
    );
}

// --- Recalculation is a full recompute ---

#[test]
fn recalculate_after_editing_lines() {
    let mut boleta = InvoiceBuilder::new("B001", 1, date(2025, 3, 10))
        .issuer(issuer())
        .customer(customer())
        .add_line(LineBuilder::new(1, "PRODUCTO", dec!(2), dec!(100.00)).build())
        .build()
        .unwrap();

    assert_eq!(boleta.totals.as_ref().unwrap().grand_total, dec!(236.00));

    // Edit the line and add another; one recompute covers both edits.
    boleta.lines[0].quantity = dec!(4);
    boleta.lines.push(
        LineBuilder::new(2, "EXONERADO", dec!(1), dec!(100.00))
            .tax_category(TaxCategory::Exempt)
            .build(),
    );
    recalculate(&mut boleta, IgvRate::default());

    let totals = boleta.totals.as_ref().unwrap();
    assert_eq!(totals.total_taxed, dec!(400.00));
    assert_eq!(totals.total_exempt, dec!(100.00));
    assert_eq!(totals.igv, dec!(72.00));
    assert_eq!(totals.grand_total, dec!(572.00));

    assert!(validate_arithmetic(&boleta).is_empty());
}

// --- Builder requirements ---

#[test]
fn builder_requires_issuer_customer_and_lines() {
    let err = InvoiceBuilder::new("B001", 1, date(2025, 3, 10))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("issuer"));

    let err = InvoiceBuilder::new("B001", 1, date(2025, 3, 10))
        .issuer(issuer())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("customer"));

    let err = InvoiceBuilder::new("B001", 1, date(2025, 3, 10))
        .issuer(issuer())
        .customer(customer())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("line"));
}

#[test]
fn factura_in_usd_for_ruc_customer() {
    let factura = InvoiceBuilder::new("F001", 1, date(2025, 3, 10))
        .document_type(DocumentType::Factura)
        .currency("USD")
        .due_date(date(2025, 4, 10))
        .issuer(issuer())
        .customer(CustomerBuilder::new(CustomerDocType::Ruc, "20987654321", "CLIENTE SAC").build())
        .add_line(
            LineBuilder::new(1, "DESARROLLO DE SOFTWARE", dec!(80), dec!(25.00))
                .unit_code("HUR")
                .build(),
        )
        .build()
        .unwrap();

    assert_eq!(factura.full_document_name(), "20123456789-01-F001-00000001");
    let totals = factura.totals.as_ref().unwrap();
    assert_eq!(totals.total_taxed, dec!(2000.00));
    assert_eq!(totals.igv, dec!(360.00));
    assert_eq!(totals.grand_total, dec!(2360.00));
}

#[test]
fn unknown_currency_rejected() {
    let result = InvoiceBuilder::new("B001", 1, date(2025, 3, 10))
        .currency("SOL")
        .issuer(issuer())
        .customer(customer())
        .add_line(LineBuilder::new(1, "PRODUCTO", dec!(1), dec!(10.00)).build())
        .build();

    assert!(result.unwrap_err().to_string().contains("currency"));
}

// --- Series numbering ---

#[test]
fn series_sequence_feeds_builder() {
    let mut seq = SeriesSequence::new(DocumentType::Boleta, "B001").unwrap();

    for expected in 1..=3u32 {
        let number = seq.next_number();
        assert_eq!(number, expected);

        let boleta = InvoiceBuilder::new(seq.series(), number, date(2025, 3, 10))
            .issuer(issuer())
            .customer(customer())
            .add_line(LineBuilder::new(1, "PRODUCTO", dec!(1), dec!(10.00)).build())
            .build()
            .unwrap();

        assert_eq!(boleta.document_id(), format_document_id("B001", expected));
    }
}

// --- Serde wire shape ---

#[test]
fn invoice_serializes_with_catalog_codes() {
    let boleta = InvoiceBuilder::new("B001", 1, date(2025, 3, 10))
        .issuer(issuer())
        .customer(customer())
        .add_line(
            LineBuilder::new(1, "PRODUCTO EXONERADO", dec!(1), dec!(50.00))
                .tax_category(TaxCategory::Exempt)
                .build(),
        )
        .build()
        .unwrap();

    let json = serde_json::to_value(&boleta).unwrap();
    assert_eq!(json["document_type"], "03");
    assert_eq!(json["operation_type"], "0101");
    assert_eq!(json["lines"][0]["tax_category"], "E");
    assert_eq!(json["customer"]["doc_type"], "1");
    assert_eq!(json["payment"]["means"], "009");

    let back: Invoice = serde_json::from_value(json).unwrap();
    assert_eq!(back.lines[0].tax_category, TaxCategory::Exempt);
    assert_eq!(back.totals, boleta.totals);
}
