use serde::{Deserialize, Serialize};

use cartline_ledger::{CartLedger, LineItem};

/// Immutable copy of a cart, handed to external collaborators.
///
/// The revision counts successful local mutations in the producing session;
/// collaborators can use it to discard stale snapshots without any knowledge
/// of the operations themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub revision: u64,
    pub items: Vec<LineItem>,
}

impl CartSnapshot {
    /// Snapshot the ledger's current line items at the given revision.
    pub fn of(ledger: &CartLedger, revision: u64) -> Self {
        Self {
            revision,
            items: ledger.items().to_vec(),
        }
    }

    /// An empty snapshot at revision zero.
    pub fn empty() -> Self {
        Self {
            revision: 0,
            items: Vec::new(),
        }
    }
}
