//! Core comprobante types, IGV calculation, validation, and numbering.
//!
//! This module provides the foundational types for Peruvian electronic
//! invoicing (facturas and boletas de venta under the SUNAT UBL 2.1
//! regime), the line/totals calculation engine, and client-side
//! issuance validation.

pub mod affectation;
mod builder;
pub mod calc;
pub mod currencies;
mod error;
mod numbering;
mod types;
pub mod units;
mod validation;

pub use affectation::{default_affectation, is_known_affectation_code};
pub use builder::*;
pub use calc::{
    CoercedLine, CoercionWarning, IgvRate, aggregate, aggregate_with_perception, coerce_line,
    compute_line, recalculate,
};
pub use currencies::is_known_currency_code;
pub use error::*;
pub use numbering::*;
pub use types::*;
pub use units::is_known_unit_code;
pub use validation::*;
