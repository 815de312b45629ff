//! # Equipment Client
//!
//! Provides a high‑level API for interacting with the `Equipment` actor.
use crate::equipment_actor::{EquipmentAction, EquipmentActionResult, EquipmentError};
use crate::model::{
    CustomerId, Equipment, EquipmentCreate, EquipmentId, EquipmentStatus, EquipmentUpdate,
};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Equipment actor.
#[derive(Clone)]
pub struct EquipmentClient {
    inner: ResourceClient<Equipment>,
}

impl EquipmentClient {
    pub fn new(inner: ResourceClient<Equipment>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_equipment(
        &self,
        params: EquipmentCreate,
    ) -> Result<Equipment, EquipmentError> {
        self.inner.create(params).await.map_err(EquipmentError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_equipment(
        &self,
        id: EquipmentId,
        update: EquipmentUpdate,
    ) -> Result<Equipment, EquipmentError> {
        self.inner.update(id, update).await.map_err(EquipmentError::from)
    }

    /// Change the operating status of a unit.
    ///
    /// Refused with [`EquipmentError::ActiveOrders`] while a non-terminal order references it;
    /// a request for the current status is a no-op.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: EquipmentId,
        status: EquipmentStatus,
    ) -> Result<EquipmentActionResult, EquipmentError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, EquipmentAction::SetStatus(status))
            .await
            .map_err(EquipmentError::from)
    }

    pub async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Equipment>, EquipmentError> {
        self.inner
            .query(move |equipment| equipment.customer_id == customer_id)
            .await
            .map_err(EquipmentError::from)
    }
}

#[async_trait]
impl ActorClient<Equipment> for EquipmentClient {
    type Error = EquipmentError;

    fn inner(&self) -> &ResourceClient<Equipment> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        EquipmentError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_set_status_keeps_domain_error() {
        let (client, mut receiver) = create_mock_client::<Equipment>(10);
        let equipment = EquipmentClient::new(client);

        let task = tokio::spawn(async move {
            equipment
                .set_status("e1".into(), EquipmentStatus::OutOfService)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id.as_str(), "e1");
        assert!(matches!(
            action,
            EquipmentAction::SetStatus(EquipmentStatus::OutOfService)
        ));

        responder
            .send(Err(FrameworkError::entity(EquipmentError::ActiveOrders {
                requested: EquipmentStatus::OutOfService,
                open_orders: 1,
            })))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(EquipmentError::ActiveOrders {
                requested: EquipmentStatus::OutOfService,
                open_orders: 1
            })
        );
    }
}
