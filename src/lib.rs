//! # comprobante
//!
//! Peruvian e-invoicing library covering the client side of the SUNAT
//! UBL 2.1 lifecycle: comprobante modeling, IGV line/totals calculation,
//! issuance validation, series numbering, and a typed client for the
//! backend billing API that generates, signs, and submits the XML.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! UBL generation, XML-DSig signing, ZIP packaging, and SUNAT transmission
//! are owned by the backend service and consumed here only over HTTP.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use comprobante::core::*;
//! use rust_decimal_macros::dec;
//!
//! let boleta = InvoiceBuilder::new("B001", 1, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
//!     .issuer(
//!         IssuerBuilder::new(
//!             "20123456789",
//!             "EMPRESA DE PRUEBAS SAC",
//!             AddressBuilder::new("AV. PRINCIPAL 123", "LIMA", "LIMA", "LIMA").build(),
//!         )
//!         .build(),
//!     )
//!     .customer(CustomerBuilder::new(CustomerDocType::Dni, "12345678", "CLIENTE DE PRUEBAS").build())
//!     .add_line(LineBuilder::new(1, "PRODUCTO GRAVADO", dec!(2), dec!(100.00)).build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(boleta.document_id(), "B001-00000001");
//! assert_eq!(boleta.totals.unwrap().grand_total, dec!(236.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Comprobante types, IGV calculation, SUNAT validation, numbering |
//! | `api` | Typed async client for the backend billing API |
//! | `display` | XML pretty-printing and artifact display helpers |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "display")]
pub mod display;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
