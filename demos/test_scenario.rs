//! Builds the multi-scenario test document (taxed, exempt, free, and
//! percepción lines) and walks through form-input coercion.

use chrono::NaiveDate;
use comprobante::core::*;
use rust_decimal_macros::dec;

fn main() {
    let mut seq = SeriesSequence::new(DocumentType::Boleta, "B001").unwrap();
    let number = seq.next_number();

    let boleta = InvoiceBuilder::new("B001", number, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        .issuer(
            IssuerBuilder::new(
                "20123456789",
                "EMPRESA DE PRUEBAS SAC",
                AddressBuilder::new("AV. PRINCIPAL 123", "LIMA", "LIMA", "LIMA")
                    .ubigeo("150101")
                    .build(),
            )
            .build(),
        )
        .customer(
            CustomerBuilder::new(CustomerDocType::Dni, "12345678", "CLIENTE DE PRUEBAS").build(),
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
        .observations("BOLETA DE PRUEBA - TODOS LOS ESCENARIOS")
        .build()
        .expect("scenario should be valid");

    println!("Documento: {}", boleta.full_document_name());
    let totals = boleta.totals.as_ref().unwrap();
    println!("Op. gravadas:   S/ {}", totals.total_taxed);
    println!("Op. exoneradas: S/ {}", totals.total_exempt);
    println!("Op. gratuitas:  S/ {}", totals.total_free);
    println!("IGV:            S/ {}", totals.igv);
    println!("Percepción:     S/ {}", totals.perception);
    println!("Importe total:  S/ {}", totals.grand_total);
    println!(
        "Pago sugerido:  S/ {} ({})",
        boleta.payment.as_ref().unwrap().amount,
        boleta.payment.as_ref().unwrap().means.code(),
    );

    // Raw form input degrades instead of failing
    println!("---");
    let coerced = coerce_line("abc", "-10", "Q");
    println!(
        "entrada inválida → qty {}, price {}, category {}",
        coerced.quantity,
        coerced.unit_price,
        coerced.tax_category.code()
    );
    for warning in &coerced.warnings {
        println!("  aviso: {warning}");
    }
}
