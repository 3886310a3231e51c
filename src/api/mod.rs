//! Typed client for the backend billing API.
//!
//! The backend owns everything heavy: UBL 2.1 generation, XML-DSig
//! signing, ZIP packaging, SUNAT web-service transmission, and CDR
//! processing. This module exposes that HTTP+JSON contract as typed
//! async calls, one method per endpoint.
//!
//! Server-computed totals returned by the backend are authoritative
//! over any client-side estimate from [`crate::core::calc`] — the local
//! computation exists only for pre-submission feedback.
//!
//! # Example
//!
//! ```ignore
//! use comprobante::api::BillingClient;
//!
//! let client = BillingClient::new("http://localhost:8000/api")?;
//! let created = client.create_test_scenario().await?;
//! let flow = client.process_complete(created.invoice_id).await?;
//! for step in &flow.steps {
//!     println!("{}: {} — {}", step.step, step.status, step.message);
//! }
//! ```

mod client;
mod types;

pub use client::{ApiError, BillingClient};
pub use types::*;
