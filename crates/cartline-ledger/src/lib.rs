//! Cart aggregation and pricing core for Cartline.
//!
//! This crate is the heart of Cartline. It provides:
//! - `LineItem` records and the ordered `CartLedger` that owns them
//! - Quantity bookkeeping with all-or-nothing mutation semantics
//! - `Totals` projection (subtotal, shipping, tax, total, item count)
//! - `PricingConfig` for the flat-rate shipping and tax constants
//! - `CartOp` operation log with deterministic replay
//! - Invariant validation for ledgers that crossed a serialization boundary

pub mod catalog;
pub mod error;
pub mod item;
pub mod ledger;
pub mod ops;
pub mod pricing;
pub mod totals;
pub mod validation;

pub use catalog::ProductCatalog;
pub use error::CartError;
pub use item::LineItem;
pub use ledger::CartLedger;
pub use ops::{CartOp, ReplayEngine, ReplayError};
pub use pricing::PricingConfig;
pub use totals::Totals;
pub use validation::{LedgerValidator, ValidationReport, Violation, ViolationKind};
