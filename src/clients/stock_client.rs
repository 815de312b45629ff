//! # Stock Client
//!
//! Provides a high‑level API for interacting with the `Stock` actor.
//! Action results are unpacked so callers get plain values back.
use crate::model::{StockItem, StockItemCreate, StockItemId, StockItemUpdate};
use crate::stock_actor::{StockAction, StockActionResult, StockError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Stock actor.
#[derive(Clone)]
pub struct StockClient {
    inner: ResourceClient<StockItem>,
}

impl StockClient {
    pub fn new(inner: ResourceClient<StockItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_item(&self, params: StockItemCreate) -> Result<StockItem, StockError> {
        self.inner.create(params).await.map_err(StockError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: StockItemId,
        update: StockItemUpdate,
    ) -> Result<StockItem, StockError> {
        self.inner.update(id, update).await.map_err(StockError::from)
    }

    /// Check the current stock level for an item.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: StockItemId) -> Result<u32, StockError> {
        debug!("Checking stock");
        match self.inner.perform_action(id, StockAction::CheckStock).await {
            Ok(StockActionResult::CheckStock(level)) => Ok(level),
            Ok(_) => unreachable!("CheckStock action must return CheckStock result"),
            Err(e) => Err(StockError::from(e)),
        }
    }

    /// Remove `quantity` from an item, clamped at zero.
    ///
    /// Returns the quantity before and after the debit.
    #[instrument(skip(self))]
    pub async fn debit(&self, id: StockItemId, quantity: u32) -> Result<(u32, u32), StockError> {
        debug!("Debiting stock");
        match self
            .inner
            .perform_action(id, StockAction::Debit(quantity))
            .await
        {
            Ok(StockActionResult::Debited { before, after }) => Ok((before, after)),
            Ok(_) => unreachable!("Debit action must return Debited result"),
            Err(e) => Err(StockError::from(e)),
        }
    }

    /// Items at or below their minimum quantity.
    pub async fn list_critical(&self) -> Result<Vec<StockItem>, StockError> {
        self.inner
            .query(StockItem::is_critical)
            .await
            .map_err(StockError::from)
    }
}

#[async_trait]
impl ActorClient<StockItem> for StockClient {
    type Error = StockError;

    fn inner(&self) -> &ResourceClient<StockItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StockError::from(e)
    }
}
