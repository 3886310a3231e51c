use chrono::NaiveDate;
use comprobante::core::*;
use rust_decimal_macros::dec;

fn main() {
    // Create a standard boleta de venta
    let boleta = InvoiceBuilder::new("B001", 1, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        .issuer(
            IssuerBuilder::new(
                "20123456789",
                "EMPRESA DE PRUEBAS SAC",
                AddressBuilder::new("AV. PRINCIPAL 123", "LIMA", "LIMA", "LIMA")
                    .ubigeo("150101")
                    .build(),
            )
            .trade_name("EMPRESA PRUEBAS")
            .build(),
        )
        .customer(
            CustomerBuilder::new(CustomerDocType::Dni, "12345678", "CLIENTE DE PRUEBAS")
                .build(),
        )
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
        .build()
        .expect("boleta should be valid");

    println!("Documento: {}", boleta.full_document_name());
    println!("Emisión:   {}", boleta.issue_date);
    println!("Emisor:    {}", boleta.issuer.business_name);
    println!("Cliente:   {}", boleta.customer.business_name);
    println!("---");
    for line in &boleta.lines {
        let amounts = line.amounts.expect("calculated");
        println!(
            "  {} x {} ({}) @ {} = {} + IGV {}",
            line.quantity,
            line.description,
            line.tax_category.code(),
            line.unit_price,
            amounts.value,
            amounts.igv,
        );
    }
    println!("---");

    let totals = boleta.totals.as_ref().unwrap();
    println!("Op. gravadas:   S/ {}", totals.total_taxed);
    println!("Op. exoneradas: S/ {}", totals.total_exempt);
    println!("IGV (18%):      S/ {}", totals.igv);
    println!("Importe total:  S/ {}", totals.grand_total);
}
