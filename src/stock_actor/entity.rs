//! [`ActorEntity`] implementation for [`StockItem`].

use super::{StockAction, StockActionResult, StockError};
use crate::model::validation::{contains_term, Violations};
use crate::model::{StockItem, StockItemCreate, StockItemId, StockItemUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use tracing::debug;

fn validate(
    code: &str,
    name: &str,
    category: &str,
    unit: &str,
    cost_price: f64,
) -> Result<(), StockError> {
    Violations::new()
        .required("code", code)
        .required("name", name)
        .required("category", category)
        .required("unit", unit)
        .check(
            cost_price.is_finite() && cost_price >= 0.0,
            "cost price must be zero or more",
        )
        .into_result()
        .map_err(StockError::Validation)
}

#[async_trait]
impl ActorEntity for StockItem {
    type Id = StockItemId;
    type Create = StockItemCreate;
    type Update = StockItemUpdate;
    type Action = StockAction;
    type ActionResult = StockActionResult;
    type Context = ();
    type Error = StockError;

    fn id(&self) -> &StockItemId {
        &self.id
    }

    fn from_create_params(id: StockItemId, params: StockItemCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            code: params.code,
            name: params.name,
            description: params.description,
            category: params.category,
            current_quantity: params.current_quantity,
            min_quantity: params.min_quantity,
            unit: params.unit,
            cost_price: params.cost_price,
            supplier: params.supplier,
            location: params.location,
            updated_at: Some(Utc::now()),
        })
    }

    fn prepare_create(
        params: StockItemCreate,
        existing: &[&Self],
        _: &(),
    ) -> Result<StockItemCreate, StockError> {
        validate(
            &params.code,
            &params.name,
            &params.category,
            &params.unit,
            params.cost_price,
        )?;
        let code = params.code.trim().to_uppercase();
        if existing
            .iter()
            .any(|item| item.code.eq_ignore_ascii_case(&code))
        {
            return Err(StockError::DuplicateCode(code));
        }
        Ok(StockItemCreate { code, ..params })
    }

    fn matches(&self, term: &str) -> bool {
        contains_term(&self.name, term)
            || contains_term(&self.code, term)
            || contains_term(&self.category, term)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    async fn on_update(&mut self, update: StockItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.current_quantity {
            self.current_quantity = quantity;
        }
        if let Some(min) = update.min_quantity {
            self.min_quantity = min;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(cost) = update.cost_price {
            self.cost_price = cost;
        }
        if let Some(supplier) = update.supplier {
            self.supplier = Some(supplier);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        validate(
            &self.code,
            &self.name,
            &self.category,
            &self.unit,
            self.cost_price,
        )?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    fn is_mutation(action: &StockAction) -> bool {
        matches!(action, StockAction::Debit(_))
    }

    async fn handle_action(
        &mut self,
        action: StockAction,
        _ctx: &(),
    ) -> Result<StockActionResult, Self::Error> {
        match action {
            StockAction::CheckStock => Ok(StockActionResult::CheckStock(self.current_quantity)),
            StockAction::Debit(quantity) => {
                let before = self.current_quantity;
                self.current_quantity = before.saturating_sub(quantity);
                self.updated_at = Some(Utc::now());
                debug!(code = %self.code, before, after = self.current_quantity, "Debit");
                Ok(StockActionResult::Debited {
                    before,
                    after: self.current_quantity,
                })
            }
        }
    }
}
