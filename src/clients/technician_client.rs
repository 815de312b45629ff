//! # Technician Client
use crate::model::{Technician, TechnicianCreate, TechnicianId, TechnicianUpdate};
use crate::technician_actor::TechnicianError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::instrument;

/// Client for interacting with the Technician actor.
#[derive(Clone)]
pub struct TechnicianClient {
    inner: ResourceClient<Technician>,
}

impl TechnicianClient {
    pub fn new(inner: ResourceClient<Technician>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_technician(
        &self,
        params: TechnicianCreate,
    ) -> Result<Technician, TechnicianError> {
        self.inner.create(params).await.map_err(TechnicianError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_technician(
        &self,
        id: TechnicianId,
        update: TechnicianUpdate,
    ) -> Result<Technician, TechnicianError> {
        self.inner.update(id, update).await.map_err(TechnicianError::from)
    }

    /// Technicians that can be assigned to new orders.
    pub async fn list_active(&self) -> Result<Vec<Technician>, TechnicianError> {
        self.inner
            .query(|technician| technician.is_active)
            .await
            .map_err(TechnicianError::from)
    }
}

#[async_trait]
impl ActorClient<Technician> for TechnicianClient {
    type Error = TechnicianError;

    fn inner(&self) -> &ResourceClient<Technician> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TechnicianError::from(e)
    }
}
