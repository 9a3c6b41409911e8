//! Cart state and the rules for mutating it.
//!
//! Every operation reads the current snapshot once, checks it against fresh
//! stock data and either commits a new cart (store write, then in-memory
//! replace) or leaves everything as it was. Failures never escape an
//! operation: they come back as an [`Outcome`] and are also pushed to the
//! [`Notifier`] as one fixed [`Notice`].

use crate::adapters::storage::CartSnapshotStore;
use crate::domain::model::{Cart, Product, ProductId, ProductMetadata};
use crate::domain::ports::{Notifier, StockApi, Storage};
use crate::utils::error::{CartError, Result};
use std::fmt;
use tokio::sync::watch;

/// User-facing failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InsufficientStock,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::InsufficientStock => "insufficient stock requested",
            Notice::AddFailed => "error adding product",
            Notice::RemoveFailed => "error removing product",
            Notice::UpdateFailed => "error updating product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InsufficientStock { requested: i64, available: u32 },
    NotInCart,
}

#[derive(Debug)]
pub enum Outcome {
    Committed(Cart),
    /// Non-positive update request; nothing read, nothing written.
    Ignored,
    Rejected { reason: Rejection, notice: Notice },
    Failed { cause: CartError, notice: Notice },
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed(_))
    }

    pub fn cart(&self) -> Option<&Cart> {
        match self {
            Outcome::Committed(cart) => Some(cart),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        match self {
            Outcome::Rejected { notice, .. } | Outcome::Failed { notice, .. } => Some(*notice),
            Outcome::Committed(_) | Outcome::Ignored => None,
        }
    }
}

/// Owns the authoritative cart.
///
/// Operations do not lock: two overlapping calls each compute against the
/// snapshot they started with and the later commit wins.
pub struct CartManager<S: Storage, A: StockApi, N: Notifier> {
    store: CartSnapshotStore<S>,
    api: A,
    notifier: N,
    state: watch::Sender<Cart>,
}

impl<S: Storage, A: StockApi, N: Notifier> CartManager<S, A, N> {
    pub fn new(cart: Cart, store: CartSnapshotStore<S>, api: A, notifier: N) -> Self {
        let (state, _) = watch::channel(cart);
        Self {
            store,
            api,
            notifier,
            state,
        }
    }

    /// Starts from whatever the store holds. A corrupt snapshot is an error.
    pub async fn load(store: CartSnapshotStore<S>, api: A, notifier: N) -> Result<Self> {
        let cart = store.load().await?;
        tracing::info!("Cart restored with {} items", cart.len());
        Ok(Self::new(cart, store, api, notifier))
    }

    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Signalled after every commit.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    pub async fn add_product(&self, id: ProductId) -> Outcome {
        let cart = self.snapshot();
        let current = cart.amount_of(id);

        let stock = match self.api.get_stock(id).await {
            Ok(stock) => stock,
            Err(cause) => return self.fail(id, Notice::AddFailed, cause),
        };

        let requested = i64::from(current) + 1;
        if requested > i64::from(stock.amount) {
            return self.reject(
                id,
                Rejection::InsufficientStock {
                    requested,
                    available: stock.amount,
                },
                Notice::InsufficientStock,
            );
        }

        let updated = if cart.contains(id) {
            cart.with_amount(id, current + 1)
        } else {
            match self.api.get_product(id).await {
                Ok(metadata) => {
                    cart.with_product(Product::new(ProductMetadata { id, ..metadata }, 1))
                }
                Err(cause) => return self.fail(id, Notice::AddFailed, cause),
            }
        };

        self.commit(id, updated, Notice::AddFailed).await
    }

    pub async fn remove_product(&self, id: ProductId) -> Outcome {
        let cart = self.snapshot();

        if !cart.contains(id) {
            return self.reject(id, Rejection::NotInCart, Notice::RemoveFailed);
        }

        self.commit(id, cart.without(id), Notice::RemoveFailed).await
    }

    /// Moves the amount one step towards `amount`.
    ///
    /// `amount` only gives the direction: greater than the current amount
    /// increments by one, anything else (equal included) decrements by one.
    /// A product missing from the cart is reported as insufficient stock.
    pub async fn update_product_amount(&self, id: ProductId, amount: i64) -> Outcome {
        if amount <= 0 {
            tracing::debug!("Ignoring update of product {} to {}", id, amount);
            return Outcome::Ignored;
        }

        let cart = self.snapshot();

        let stock = match self.api.get_stock(id).await {
            Ok(stock) => stock,
            Err(cause) => return self.fail(id, Notice::UpdateFailed, cause),
        };

        let Some(product) = cart.find(id) else {
            return self.reject(id, Rejection::NotInCart, Notice::InsufficientStock);
        };

        if amount > i64::from(stock.amount) {
            return self.reject(
                id,
                Rejection::InsufficientStock {
                    requested: amount,
                    available: stock.amount,
                },
                Notice::InsufficientStock,
            );
        }

        let next = if amount > i64::from(product.amount) {
            product.amount + 1
        } else {
            product.amount.saturating_sub(1)
        };

        let updated = cart.with_amount(id, next);
        self.commit(id, updated, Notice::UpdateFailed).await
    }

    async fn commit(&self, id: ProductId, cart: Cart, on_failure: Notice) -> Outcome {
        if let Err(cause) = self.store.save(&cart).await {
            return self.fail(id, on_failure, cause);
        }

        tracing::info!(
            "Cart committed after change to product {} ({} items)",
            id,
            cart.len()
        );
        self.state.send_replace(cart.clone());
        Outcome::Committed(cart)
    }

    fn reject(&self, id: ProductId, reason: Rejection, notice: Notice) -> Outcome {
        tracing::warn!("Product {} rejected: {:?}", id, reason);
        self.notifier.notify(notice);
        Outcome::Rejected { reason, notice }
    }

    fn fail(&self, id: ProductId, notice: Notice, cause: CartError) -> Outcome {
        tracing::error!(
            "Product {} operation failed: {} (Category: {:?})",
            id,
            cause,
            cause.category()
        );
        self.notifier.notify(notice);
        Outcome::Failed { cause, notice }
    }
}
