use cartline_types::ProductId;

/// Errors produced by cart operations.
///
/// All variants are local, recoverable conditions; a failed operation leaves
/// the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("quantity must be at least 1, got {requested}")]
    InvalidQuantity { requested: u32 },

    #[error("no line item for product {id}")]
    ItemNotFound { id: ProductId },

    #[error("product {id} is not in the catalog")]
    UnknownProduct { id: ProductId },
}
