//! Exercises the backend billing API end to end: create a test
//! document, run the complete flow (UBL → sign → SUNAT), then inspect
//! the artifacts.
//!
//! Requires a running backend:
//! `cargo run --example api_flow --features all -- http://localhost:8000/api`

use comprobante::api::BillingClient;
use comprobante::display::{contains_signature, format_bytes, pretty_print};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000/api".to_string());
    let client = BillingClient::new(&base_url)?;

    let conn = client.test_connection().await?;
    println!(
        "conexión: {} ({})",
        conn.status,
        conn.environment.as_deref().unwrap_or("?")
    );

    let created = client.create_test_scenario().await?;
    println!(
        "creado: id {} — {} — S/ {}",
        created.invoice_id, created.invoice_reference, created.totals.total_amount
    );

    let flow = client.process_complete(created.invoice_id).await?;
    for (i, step) in flow.steps.iter().enumerate() {
        println!("paso {}: [{}] {} — {}", i + 1, step.status, step.step, step.message);
    }

    let status = client.invoice_status(created.invoice_id).await?;
    println!("estado: {:?}", status.status);

    if let Some(xml_path) = &status.files.xml_file {
        let file = client.file_content(xml_path).await?;
        if let Some(content) = &file.content {
            println!(
                "xml: {} — firma: {}",
                format_bytes(content.len() as u64),
                if contains_signature(content) { "sí" } else { "no" }
            );
            let pretty = pretty_print(content)?;
            for line in pretty.lines().take(20) {
                println!("  {line}");
            }
        }
    }

    Ok(())
}
