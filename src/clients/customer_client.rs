//! # Customer Client
//!
//! Provides a high‑level API for interacting with the `Customer` actor.
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_customer(&self, params: CustomerCreate) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(CustomerError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        self.inner.update(id, update).await.map_err(CustomerError::from)
    }

    /// Stores geocoded coordinates so the map does not look the address up again.
    #[instrument(skip(self))]
    pub async fn set_coordinates(
        &self,
        id: CustomerId,
        lat: f64,
        lng: f64,
    ) -> Result<Customer, CustomerError> {
        let update = CustomerUpdate {
            coordinates: Some((lat, lng)),
            ..Default::default()
        };
        self.update_customer(id, update).await
    }

    /// Active customers only, by name.
    pub async fn list_active(&self) -> Result<Vec<Customer>, CustomerError> {
        self.inner
            .query(|customer| customer.active)
            .await
            .map_err(CustomerError::from)
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CustomerError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_update};

    #[tokio::test]
    async fn test_set_coordinates_sends_coordinate_patch() {
        let (client, mut receiver) = create_mock_client::<Customer>(10);
        let customers = CustomerClient::new(client);

        let task = tokio::spawn(async move {
            customers
                .set_coordinates("c1".into(), -23.55, -46.63)
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id.as_str(), "c1");
        assert_eq!(update.coordinates, Some((-23.55, -46.63)));
        assert!(update.address.is_none());

        responder.send(Err(FrameworkError::NotFound("c1".into()))).unwrap();
        let result = task.await.unwrap();
        assert_eq!(result, Err(CustomerError::NotFound("c1".into())));
    }
}
