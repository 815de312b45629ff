//! # Order Client
//!
//! Provides a high‑level API for interacting with the `ServiceOrder` actor: creation, the
//! status workflow and the read-only projections used by the board and the customer history.
use crate::model::{
    CustomerId, EquipmentId, OrderDraft, OrderId, OrderStatus, OrderUpdate, ServiceOrder,
    TechnicianId,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
///
/// The number, initial status and `updatedBy` of a new order are stamped by the actor, so
/// `create_order` only needs the form contents.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<ServiceOrder>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<ServiceOrder>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<ServiceOrder, OrderError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(OrderError::from)
    }

    /// Edit the work description, type, emergency flag, parts or equipment.
    /// Refused with [`OrderError::Locked`] once the order is completed or cancelled.
    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<ServiceOrder, OrderError> {
        self.inner.update(id, update).await.map_err(OrderError::from)
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(OrderError::from)
    }

    /// `open` to `in-progress`.
    #[instrument(skip(self))]
    pub async fn start_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.act(id, OrderAction::Start).await.map(|_| ())
    }

    /// Complete the order and debit its reserved parts, exactly once.
    ///
    /// A second call fails with [`OrderError::AlreadyFinalized`]. If the order was completed
    /// but a debit failed, the error is [`OrderError::StockDebit`] and the order stays completed.
    #[instrument(skip(self))]
    pub async fn finalize_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.act(id, OrderAction::Finalize).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.act(id, OrderAction::Cancel).await.map(|_| ())
    }

    /// Returns the previously assigned technician, if any.
    #[instrument(skip(self))]
    pub async fn assign_technician(
        &self,
        id: OrderId,
        technician: TechnicianId,
    ) -> Result<Option<TechnicianId>, OrderError> {
        match self.act(id, OrderAction::AssignTechnician(technician)).await? {
            OrderActionResult::Assigned { previous, .. } => Ok(previous),
            _ => unreachable!("AssignTechnician action must return Assigned result"),
        }
    }

    pub async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<ServiceOrder>, OrderError> {
        self.inner
            .query(move |order| order.customer_id == customer_id)
            .await
            .map_err(OrderError::from)
    }

    pub async fn list_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<ServiceOrder>, OrderError> {
        self.inner
            .query(move |order| order.status == status)
            .await
            .map_err(OrderError::from)
    }

    /// Orders created in `[from, to)`.
    pub async fn list_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ServiceOrder>, OrderError> {
        self.inner
            .query(move |order| order.created_at >= from && order.created_at < to)
            .await
            .map_err(OrderError::from)
    }

    /// Orders on `equipment_id` that are not completed or cancelled.
    pub async fn list_open_for_equipment(
        &self,
        equipment_id: EquipmentId,
    ) -> Result<Vec<ServiceOrder>, OrderError> {
        self.inner
            .query(move |order| order.equipment_id == equipment_id && !order.status.is_terminal())
            .await
            .map_err(OrderError::from)
    }
}

#[async_trait]
impl ActorClient<ServiceOrder> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<ServiceOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartReservation;
    use actor_framework::mock::{create_mock_client, expect_action, expect_create};

    #[tokio::test]
    async fn test_finalize_surfaces_already_finalized() {
        let (client, mut receiver) = create_mock_client::<ServiceOrder>(10);
        let orders = OrderClient::new(client);

        let task = tokio::spawn(async move { orders.finalize_order("o1".into()).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id.as_str(), "o1");
        assert!(matches!(action, OrderAction::Finalize));

        responder
            .send(Err(FrameworkError::entity(OrderError::AlreadyFinalized(
                "OS-2024-001".into(),
            ))))
            .unwrap();
        assert_eq!(
            task.await.unwrap(),
            Err(OrderError::AlreadyFinalized("OS-2024-001".into()))
        );
    }

    #[tokio::test]
    async fn test_assign_returns_previous_technician() {
        let (client, mut receiver) = create_mock_client::<ServiceOrder>(10);
        let orders = OrderClient::new(client);

        let task = tokio::spawn(async move {
            orders
                .assign_technician("o1".into(), "t2".into())
                .await
        });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        let OrderAction::AssignTechnician(technician) = action else {
            panic!("Expected AssignTechnician action");
        };
        responder
            .send(Ok(OrderActionResult::Assigned {
                previous: Some("t1".into()),
                technician,
            }))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(Some(TechnicianId::from("t1"))));
    }

    #[tokio::test]
    async fn test_create_order_forwards_draft() {
        let (client, mut receiver) = create_mock_client::<ServiceOrder>(10);
        let orders = OrderClient::new(client);

        let draft = OrderDraft {
            description: "Noise in the machine room".into(),
            parts: vec![PartReservation::new("p1", "Bearing", 1)],
            ..Default::default()
        };
        let task = tokio::spawn(async move { orders.create_order(draft).await });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.parts.len(), 1);

        responder
            .send(Err(FrameworkError::entity(OrderError::Validation(
                "customer is required".into(),
            ))))
            .unwrap();
        assert!(matches!(
            task.await.unwrap(),
            Err(OrderError::Validation(msg)) if msg == "customer is required"
        ));
    }
}
