//! [`ActorEntity`] implementation for [`Equipment`].
//!
//! Status changes consult the order store before anything is written, so a refused change
//! never reaches the remote and leaves the unit untouched.

use super::{EquipmentAction, EquipmentActionResult, EquipmentError};
use crate::clients::OrderClient;
use crate::model::validation::{contains_term, Violations};
use crate::model::{Equipment, EquipmentCreate, EquipmentId, EquipmentUpdate, TechnicalSpecs};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use tracing::{info, warn};

fn validate(
    name: &str,
    brand: &str,
    model: &str,
    specs: &TechnicalSpecs,
) -> Result<(), EquipmentError> {
    Violations::new()
        .required("name", name)
        .required("brand", brand)
        .required("model", model)
        .check(specs.stops >= 1, "stops must be at least 1")
        .into_result()
        .map_err(EquipmentError::Validation)
}

#[async_trait]
impl ActorEntity for Equipment {
    type Id = EquipmentId;
    type Create = EquipmentCreate;
    type Update = EquipmentUpdate;
    type Action = EquipmentAction;
    type ActionResult = EquipmentActionResult;
    type Context = OrderClient;
    type Error = EquipmentError;

    fn id(&self) -> &EquipmentId {
        &self.id
    }

    fn from_create_params(id: EquipmentId, params: EquipmentCreate) -> Result<Self, Self::Error> {
        let customer_id = params
            .customer_id
            .ok_or_else(|| EquipmentError::Validation("customer is required".into()))?;
        let now = Utc::now();
        Ok(Self {
            id,
            customer_id,
            name: params.name,
            position: params.position,
            brand: params.brand,
            model: params.model,
            serial_number: params.serial_number,
            manufacture_year: params.manufacture_year,
            technical_specs: params.technical_specs,
            status: params.status,
            last_preventive_date: None,
            next_preventive_date: None,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    fn prepare_create(
        params: EquipmentCreate,
        _: &[&Self],
        _: &OrderClient,
    ) -> Result<EquipmentCreate, EquipmentError> {
        Violations::new()
            .present("customer", &params.customer_id)
            .into_result()
            .map_err(EquipmentError::Validation)?;
        validate(
            &params.name,
            &params.brand,
            &params.model,
            &params.technical_specs,
        )?;
        Ok(params)
    }

    fn matches(&self, term: &str) -> bool {
        contains_term(&self.name, term)
            || contains_term(&self.brand, term)
            || contains_term(&self.model, term)
            || contains_term(&self.serial_number, term)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    async fn on_update(
        &mut self,
        update: EquipmentUpdate,
        _ctx: &OrderClient,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(position) = update.position {
            self.position = Some(position);
        }
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(serial_number) = update.serial_number {
            self.serial_number = serial_number;
        }
        if let Some(specs) = update.technical_specs {
            self.technical_specs = specs;
        }
        if let Some(date) = update.last_preventive_date {
            self.last_preventive_date = Some(date);
        }
        if let Some(date) = update.next_preventive_date {
            self.next_preventive_date = Some(date);
        }
        validate(&self.name, &self.brand, &self.model, &self.technical_specs)?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: EquipmentAction,
        orders: &OrderClient,
    ) -> Result<EquipmentActionResult, Self::Error> {
        match action {
            EquipmentAction::SetStatus(requested) if requested == self.status => {
                Ok(EquipmentActionResult::Unchanged)
            }
            EquipmentAction::SetStatus(requested) => {
                let open = orders
                    .list_open_for_equipment(self.id.clone())
                    .await
                    .map_err(|e| EquipmentError::OrderLookup(e.to_string()))?;
                if !open.is_empty() {
                    warn!(
                        equipment_id = %self.id,
                        %requested,
                        open_orders = open.len(),
                        "Status change refused"
                    );
                    return Err(EquipmentError::ActiveOrders {
                        requested,
                        open_orders: open.len(),
                    });
                }
                let from = self.status;
                self.status = requested;
                self.updated_at = Some(Utc::now());
                info!(equipment_id = %self.id, %from, to = %requested, "Status changed");
                Ok(EquipmentActionResult::StatusChanged { from, to: requested })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DriveType, EquipmentStatus};
    use actor_framework::mock::MockClient;

    fn specs(stops: u32) -> TechnicalSpecs {
        TechnicalSpecs {
            stops,
            capacity_kg: 630,
            capacity_persons: 8,
            speed: Some(1.0),
            drive_type: DriveType::Gearless,
            control_panel: None,
        }
    }

    fn draft() -> EquipmentCreate {
        EquipmentCreate {
            customer_id: Some("c1".into()),
            name: "Social".into(),
            position: Some("Torre A".into()),
            brand: "Atlas".into(),
            model: "Gen2".into(),
            serial_number: "SN-1".into(),
            manufacture_year: Some(2015),
            technical_specs: specs(12),
            status: EquipmentStatus::Operational,
        }
    }

    #[tokio::test]
    async fn test_prepare_create_requires_customer_and_stops() {
        let orders = OrderClient::new(MockClient::new().client());
        assert!(Equipment::prepare_create(draft(), &[], &orders).is_ok());

        let bad = EquipmentCreate {
            customer_id: None,
            brand: " ".into(),
            technical_specs: specs(0),
            ..draft()
        };
        let Err(EquipmentError::Validation(msg)) = Equipment::prepare_create(bad, &[], &orders)
        else {
            panic!("expected a validation error");
        };
        assert!(msg.contains("customer is required"));
        assert!(msg.contains("brand is required"));
        assert!(msg.contains("stops must be at least 1"));
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_revalidates() {
        let orders = OrderClient::new(MockClient::new().client());
        let mut unit = Equipment::from_create_params("e1".into(), draft()).unwrap();
        unit.updated_at = None;

        unit.on_update(
            EquipmentUpdate {
                name: Some("Serviço".into()),
                ..Default::default()
            },
            &orders,
        )
        .await
        .unwrap();
        assert_eq!(unit.name, "Serviço");
        assert_eq!(unit.brand, "Atlas");
        assert!(unit.updated_at.is_some());

        let err = unit
            .on_update(
                EquipmentUpdate {
                    technical_specs: Some(specs(0)),
                    ..Default::default()
                },
                &orders,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EquipmentError::Validation(msg) if msg.contains("stops")));
    }
}
