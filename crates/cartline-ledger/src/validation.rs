use std::collections::HashSet;

use cartline_types::ProductId;

use crate::item::LineItem;
use crate::ledger::CartLedger;

/// Result of ledger invariant validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub line_count: u64,
    pub ids_unique: bool,
    pub quantities_positive: bool,
    pub prices_in_range: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific invariant violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub id: ProductId,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    DuplicateId,
    ZeroQuantity,
    NegativePrice,
    OriginalBelowUnit,
}

/// Ledger invariant validator.
///
/// The mutation operations uphold these invariants by construction; the
/// validator exists for line items that crossed a serialization boundary
/// (hydrated snapshots, hand-edited cart files).
pub struct LedgerValidator;

impl LedgerValidator {
    /// Validate a ledger's line items against all invariants.
    pub fn validate(ledger: &CartLedger) -> ValidationReport {
        Self::validate_items(ledger.items())
    }

    /// Validate a bare item sequence, e.g. from a deserialized snapshot.
    pub fn validate_items(items: &[LineItem]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut ids_unique = true;
        let mut quantities_positive = true;
        let mut prices_in_range = true;
        let mut seen_ids = HashSet::new();

        for item in items {
            if !seen_ids.insert(item.id.clone()) {
                ids_unique = false;
                violations.push(Violation {
                    id: item.id.clone(),
                    kind: ViolationKind::DuplicateId,
                    description: "more than one line for this product id".into(),
                });
            }

            if item.quantity == 0 {
                quantities_positive = false;
                violations.push(Violation {
                    id: item.id.clone(),
                    kind: ViolationKind::ZeroQuantity,
                    description: "line with zero quantity should have been removed".into(),
                });
            }

            if item.unit_price.is_negative()
                || item.original_unit_price.is_some_and(|p| p.is_negative())
            {
                prices_in_range = false;
                violations.push(Violation {
                    id: item.id.clone(),
                    kind: ViolationKind::NegativePrice,
                    description: "prices must be non-negative".into(),
                });
            }

            if let Some(original) = item.original_unit_price {
                if original < item.unit_price {
                    prices_in_range = false;
                    violations.push(Violation {
                        id: item.id.clone(),
                        kind: ViolationKind::OriginalBelowUnit,
                        description: format!(
                            "original price {original} is below unit price {}",
                            item.unit_price
                        ),
                    });
                }
            }
        }

        ValidationReport {
            line_count: items.len() as u64,
            ids_unique,
            quantities_positive,
            prices_in_range,
            violations,
        }
    }
}
