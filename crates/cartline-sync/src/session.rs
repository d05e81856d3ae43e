use tracing::warn;

use cartline_ledger::{CartLedger, LineItem, PricingConfig, Totals};
use cartline_types::{Product, ProductId};

use crate::error::SyncResult;
use crate::transport::RemoteCartStore;
use crate::types::CartSnapshot;

/// A user-session cart: an exclusively owned ledger plus an optional remote.
///
/// Every mutating method applies the local operation first and pushes a
/// snapshot only after it succeeds, so the remote never observes a state the
/// ledger was never in. Mutation is local-first: a failed push surfaces as an
/// error but does not roll the ledger back. The revision counts successful
/// local mutations, so after a failed push the next snapshot that does land
/// carries everything that happened in between.
pub struct CartSession {
    ledger: CartLedger,
    remote: Option<Box<dyn RemoteCartStore>>,
    revision: u64,
}

impl CartSession {
    /// A purely local session; snapshots are never pushed anywhere.
    pub fn local(pricing: PricingConfig) -> Self {
        Self {
            ledger: CartLedger::with_pricing(pricing),
            remote: None,
            revision: 0,
        }
    }

    /// A session backed by a remote store.
    pub fn with_remote(pricing: PricingConfig, remote: Box<dyn RemoteCartStore>) -> Self {
        Self {
            ledger: CartLedger::with_pricing(pricing),
            remote: Some(remote),
            revision: 0,
        }
    }

    /// Replace local state with the remote's last snapshot, if one exists.
    ///
    /// Returns `true` when a snapshot was found and applied. This is how a
    /// returning session picks up a cart persisted by an earlier one.
    pub async fn hydrate(&mut self) -> SyncResult<bool> {
        let Some(remote) = &self.remote else {
            return Ok(false);
        };
        match remote.fetch_snapshot().await? {
            Some(snapshot) => {
                self.revision = snapshot.revision;
                self.ledger =
                    CartLedger::from_items(snapshot.items, self.ledger.pricing().clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Add `quantity` units of `product`, then push.
    ///
    /// Returns the resulting quantity on the product's line.
    pub async fn add_item(&mut self, product: &Product, quantity: u32) -> SyncResult<u32> {
        let line_quantity = self.ledger.add_item(product, quantity)?.quantity;
        self.record_mutation().await?;
        Ok(line_quantity)
    }

    /// Set the quantity for `id`, then push when something changed.
    pub async fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> SyncResult<()> {
        let existed = self.ledger.get(id).is_some();
        self.ledger.set_quantity(id, quantity)?;
        if quantity > 0 || existed {
            self.record_mutation().await?;
        }
        Ok(())
    }

    /// Remove the line for `id`, then push when something was removed.
    pub async fn remove_item(&mut self, id: &ProductId) -> SyncResult<Option<LineItem>> {
        let removed = self.ledger.remove_item(id);
        if removed.is_some() {
            self.record_mutation().await?;
        }
        Ok(removed)
    }

    /// Empty the cart, then push when it held anything.
    pub async fn clear(&mut self) -> SyncResult<()> {
        if self.ledger.is_empty() {
            return Ok(());
        }
        self.ledger.clear();
        self.record_mutation().await
    }

    /// The owned ledger, for rendering.
    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// Derived pricing aggregates. Synchronous; never touches the remote.
    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    async fn record_mutation(&mut self) -> SyncResult<()> {
        self.revision += 1;
        let Some(remote) = &self.remote else {
            return Ok(());
        };
        let snapshot = CartSnapshot::of(&self.ledger, self.revision);
        if let Err(error) = remote.push_snapshot(&snapshot).await {
            warn!(revision = self.revision, error = %error, "snapshot push failed; local cart retained");
            return Err(error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cartline_types::Money;

    use crate::memory::InMemoryRemote;

    use super::*;

    fn product(id: &str, price_minor: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            category: "Test".into(),
            price: Money::from_minor(price_minor),
            original_price: None,
            image_url: String::new(),
        }
    }

    fn session_with_remote() -> (CartSession, Arc<InMemoryRemote>) {
        let remote = Arc::new(InMemoryRemote::new());
        let session =
            CartSession::with_remote(PricingConfig::default(), Box::new(Arc::clone(&remote)));
        (session, remote)
    }

    #[tokio::test]
    async fn mutations_push_snapshots_in_order() {
        let (mut session, remote) = session_with_remote();

        session.add_item(&product("a", 10_000), 1).await.unwrap();
        assert_eq!(remote.stored().unwrap().revision, 1);

        session.set_quantity(&"a".into(), 4).await.unwrap();
        let stored = remote.stored().unwrap();
        assert_eq!(stored.revision, 2);
        assert_eq!(stored.items[0].quantity, 4);

        session.remove_item(&"a".into()).await.unwrap();
        let stored = remote.stored().unwrap();
        assert_eq!(stored.revision, 3);
        assert!(stored.items.is_empty());
    }

    #[tokio::test]
    async fn push_failure_keeps_local_mutation() {
        let (mut session, remote) = session_with_remote();
        remote.set_reject_pushes(true);

        let error = session.add_item(&product("a", 10_000), 2).await.unwrap_err();
        assert!(matches!(error, crate::SyncError::Remote(_)));

        // local-first: the ledger kept the line, the remote saw nothing
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.revision(), 1);
        assert!(remote.stored().is_none());

        // the next successful mutation carries the full state across
        remote.set_reject_pushes(false);
        session.add_item(&product("b", 5_000), 1).await.unwrap();
        let stored = remote.stored().unwrap();
        assert_eq!(stored.revision, 2);
        assert_eq!(stored.items.len(), 2);
    }

    #[tokio::test]
    async fn failed_local_operation_pushes_nothing() {
        let (mut session, remote) = session_with_remote();

        session.add_item(&product("a", 10_000), 0).await.unwrap_err();
        assert_eq!(session.revision(), 0);
        assert!(remote.stored().is_none());
    }

    #[tokio::test]
    async fn noop_mutations_do_not_push() {
        let (mut session, remote) = session_with_remote();

        assert!(session.remove_item(&"ghost".into()).await.unwrap().is_none());
        session.set_quantity(&"ghost".into(), 0).await.unwrap();
        session.clear().await.unwrap();

        assert_eq!(session.revision(), 0);
        assert!(remote.stored().is_none());
    }

    #[tokio::test]
    async fn hydrate_restores_a_persisted_cart() {
        let remote = Arc::new(InMemoryRemote::new());
        {
            let mut first = CartSession::with_remote(
                PricingConfig::default(),
                Box::new(Arc::clone(&remote)),
            );
            first.add_item(&product("a", 30_000), 2).await.unwrap();
        }

        let mut returning = CartSession::with_remote(
            PricingConfig::default(),
            Box::new(Arc::clone(&remote)),
        );
        assert!(returning.hydrate().await.unwrap());
        assert_eq!(returning.revision(), 1);
        assert_eq!(returning.ledger().len(), 1);
        assert_eq!(returning.totals().subtotal, Money::from_major(600));
    }

    #[tokio::test]
    async fn hydrate_without_remote_or_snapshot_is_false() {
        let mut local = CartSession::local(PricingConfig::default());
        assert!(!local.hydrate().await.unwrap());

        let (mut session, _remote) = session_with_remote();
        assert!(!session.hydrate().await.unwrap());
    }
}
