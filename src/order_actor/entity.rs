//! [`ActorEntity`] implementation for [`ServiceOrder`].
//!
//! Status actions and field edits only touch the candidate copy handed in by the actor; the
//! stock debit of a finalize lives in `on_committed` so it runs once the completed status is
//! stored on the server, and never for a refused or failed transition.

use super::{OrderAction, OrderActionResult, OrderContext, OrderError};
use crate::model::validation::{contains_term, Violations};
use crate::model::{
    next_order_number, OrderDraft, OrderId, OrderStatus, OrderUpdate, PartReservation,
    ServiceOrder,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{info, warn};

const MIN_DESCRIPTION_CHARS: usize = 10;

fn check_work<'a>(
    violations: &'a mut Violations,
    description: &str,
    parts: &[PartReservation],
) -> &'a mut Violations {
    let mut seen = HashSet::new();
    let duplicated = parts.iter().any(|part| !seen.insert(&part.part_id));
    violations
        .required("description", description)
        .min_chars("description", description, MIN_DESCRIPTION_CHARS)
        .check(
            parts.iter().all(|part| part.requested_quantity >= 1),
            "part quantities must be at least 1",
        )
        .check(!duplicated, "a part can only be listed once per order")
}

fn validate_work(description: &str, parts: &[PartReservation]) -> Result<(), OrderError> {
    check_work(&mut Violations::new(), description, parts)
        .into_result()
        .map_err(OrderError::Validation)
}

impl ServiceOrder {
    /// Moves the candidate to `next`, stamping who changed it and when.
    fn transition(&mut self, next: OrderStatus, operator: &str) -> Result<OrderStatus, OrderError> {
        let from = self.status;
        if from == OrderStatus::Completed && next == OrderStatus::Completed {
            return Err(OrderError::AlreadyFinalized(self.order_number.clone()));
        }
        if !from.can_transition_to(next) {
            return Err(OrderError::InvalidTransition { from, to: next });
        }
        self.status = next;
        self.stamp(operator);
        info!(order = %self.order_number, %from, to = %next, "Status changed");
        Ok(from)
    }

    fn stamp(&mut self, operator: &str) {
        self.updated_at = Some(Utc::now());
        self.updated_by = operator.to_string();
    }

    fn ensure_editable(&self) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            Err(OrderError::Locked(self.status))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ActorEntity for ServiceOrder {
    type Id = OrderId;
    type Create = OrderDraft;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn from_create_params(id: OrderId, params: OrderDraft) -> Result<Self, Self::Error> {
        let missing = |field: &str| OrderError::Validation(format!("{field} is required"));
        let now = Utc::now();
        Ok(Self {
            id,
            order_number: params.order_number,
            customer_id: params.customer_id.ok_or_else(|| missing("customer"))?,
            equipment_id: params.equipment_id.ok_or_else(|| missing("equipment"))?,
            technician_id: params.technician_id,
            kind: params.kind.ok_or_else(|| missing("type"))?,
            status: params.status.unwrap_or(OrderStatus::Open),
            is_emergency: params.is_emergency,
            description: params.description,
            parts: params.parts,
            created_at: now,
            updated_at: Some(now),
            updated_by: params.updated_by,
            customer_signature: None,
        })
    }

    /// Validates the draft, then stamps the next order number for the current year, the
    /// `open` status and the operator.
    fn prepare_create(
        params: OrderDraft,
        existing: &[&Self],
        ctx: &OrderContext,
    ) -> Result<OrderDraft, OrderError> {
        let mut violations = Violations::new();
        violations
            .present("customer", &params.customer_id)
            .present("equipment", &params.equipment_id)
            .present("technician", &params.technician_id)
            .present("type", &params.kind);
        check_work(&mut violations, &params.description, &params.parts)
            .into_result()
            .map_err(OrderError::Validation)?;

        let order_number = next_order_number(
            existing.iter().map(|order| order.order_number.as_str()),
            Utc::now().year(),
        )
        .ok_or_else(|| {
            OrderError::Validation("no order numbers left for this year".to_string())
        })?;
        let updated_by = if params.updated_by.trim().is_empty() {
            ctx.operator.clone()
        } else {
            params.updated_by
        };
        Ok(OrderDraft {
            order_number,
            status: Some(OrderStatus::Open),
            description: params.description.trim().to_string(),
            updated_by,
            ..params
        })
    }

    fn matches(&self, term: &str) -> bool {
        contains_term(&self.order_number, term) || contains_term(&self.description, term)
    }

    /// Newest first.
    fn compare(&self, other: &Self) -> Ordering {
        other.created_at.cmp(&self.created_at)
    }

    async fn on_update(&mut self, update: OrderUpdate, ctx: &OrderContext) -> Result<(), Self::Error> {
        self.ensure_editable()?;
        if let Some(equipment_id) = update.equipment_id {
            self.equipment_id = equipment_id;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(is_emergency) = update.is_emergency {
            self.is_emergency = is_emergency;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(parts) = update.parts {
            self.parts = parts;
        }
        if let Some(signature) = update.customer_signature {
            self.customer_signature = Some(signature);
        }
        validate_work(&self.description, &self.parts)?;
        self.stamp(&ctx.operator);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Start => {
                self.transition(OrderStatus::InProgress, &ctx.operator)?;
                Ok(OrderActionResult::Started)
            }
            OrderAction::Finalize => {
                self.transition(OrderStatus::Completed, &ctx.operator)?;
                Ok(OrderActionResult::Finalized {
                    parts: self.parts.clone(),
                })
            }
            OrderAction::Cancel => {
                let from = self.transition(OrderStatus::Cancelled, &ctx.operator)?;
                Ok(OrderActionResult::Cancelled { from })
            }
            OrderAction::AssignTechnician(technician) => {
                self.ensure_editable()?;
                let previous = self.technician_id.replace(technician.clone());
                self.stamp(&ctx.operator);
                Ok(OrderActionResult::Assigned {
                    previous,
                    technician,
                })
            }
        }
    }

    /// Debits every reserved part once the completion is stored. Each part is attempted even
    /// when an earlier one fails; failures are collected into a single [`OrderError::StockDebit`].
    async fn on_committed(
        &self,
        result: &OrderActionResult,
        ctx: &OrderContext,
    ) -> Result<(), Self::Error> {
        let OrderActionResult::Finalized { parts } = result else {
            return Ok(());
        };

        let mut failed = Vec::new();
        for part in parts {
            match ctx
                .stock
                .debit(part.part_id.clone(), part.requested_quantity)
                .await
            {
                Ok((before, after)) => {
                    info!(order = %self.order_number, part = %part.part_id, before, after, "Stock debited");
                }
                Err(e) => {
                    warn!(order = %self.order_number, part = %part.part_id, error = %e, "Stock debit failed");
                    failed.push(format!("{} ({e})", part.name));
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(OrderError::StockDebit(failed.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::StockClient;
    use crate::model::{OrderType, StockItem};
    use crate::stock_actor::StockActionResult;
    use actor_framework::mock::MockClient;
    use actor_framework::FrameworkError;

    fn context(mock: &MockClient<StockItem>) -> OrderContext {
        OrderContext::new(StockClient::new(mock.client()), "marta")
    }

    fn draft() -> OrderDraft {
        OrderDraft {
            customer_id: Some("c1".into()),
            equipment_id: Some("e1".into()),
            technician_id: Some("t1".into()),
            kind: Some(OrderType::Corrective),
            description: "Door does not close on floor 3".into(),
            parts: vec![PartReservation::new("p1", "Door roller", 2)],
            ..Default::default()
        }
    }

    fn order(status: OrderStatus) -> ServiceOrder {
        let mut order = ServiceOrder::from_create_params("o1".into(), draft()).unwrap();
        order.order_number = "OS-2024-001".into();
        order.status = status;
        order
    }

    #[tokio::test]
    async fn test_prepare_create_stamps_number_status_and_operator() {
        let mock = MockClient::<StockItem>::new();
        let mut previous = order(OrderStatus::Completed);
        previous.order_number = format!("OS-{}-041", Utc::now().year());

        let prepared =
            ServiceOrder::prepare_create(draft(), &[&previous], &context(&mock)).unwrap();

        assert_eq!(prepared.order_number, format!("OS-{}-042", Utc::now().year()));
        assert_eq!(prepared.status, Some(OrderStatus::Open));
        assert_eq!(prepared.updated_by, "marta");
    }

    #[tokio::test]
    async fn test_prepare_create_lists_every_violation() {
        let mock = MockClient::<StockItem>::new();
        let bad = OrderDraft {
            technician_id: None,
            description: "short".into(),
            parts: vec![
                PartReservation::new("p1", "Door roller", 1),
                PartReservation::new("p1", "Door roller", 0),
            ],
            ..draft()
        };
        let Err(OrderError::Validation(msg)) =
            ServiceOrder::prepare_create(bad, &[], &context(&mock))
        else {
            panic!("expected a validation error");
        };
        assert!(msg.contains("technician is required"));
        assert!(msg.contains("at least 10 characters"));
        assert!(msg.contains("at least 1"));
        assert!(msg.contains("only be listed once"));
    }

    #[tokio::test]
    async fn test_finalize_twice_is_refused() {
        let mock = MockClient::<StockItem>::new();
        let ctx = context(&mock);
        let mut completed = order(OrderStatus::Completed);

        let err = completed
            .handle_action(OrderAction::Finalize, &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::AlreadyFinalized("OS-2024-001".into()));
    }

    #[tokio::test]
    async fn test_transitions_stamp_operator() {
        let mock = MockClient::<StockItem>::new();
        let ctx = context(&mock);
        let mut candidate = order(OrderStatus::Open);

        candidate.handle_action(OrderAction::Start, &ctx).await.unwrap();
        assert_eq!(candidate.status, OrderStatus::InProgress);
        assert_eq!(candidate.updated_by, "marta");

        let err = candidate
            .handle_action(OrderAction::Start, &ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::InProgress,
                to: OrderStatus::InProgress
            }
        );
    }

    #[tokio::test]
    async fn test_pending_parts_can_only_be_cancelled() {
        let mock = MockClient::<StockItem>::new();
        let ctx = context(&mock);

        for action in [OrderAction::Start, OrderAction::Finalize] {
            let mut candidate = order(OrderStatus::PendingParts);
            assert!(matches!(
                candidate.handle_action(action, &ctx).await,
                Err(OrderError::InvalidTransition { .. })
            ));
        }

        let mut candidate = order(OrderStatus::PendingParts);
        let result = candidate.handle_action(OrderAction::Cancel, &ctx).await;
        assert_eq!(
            result,
            Ok(OrderActionResult::Cancelled {
                from: OrderStatus::PendingParts
            })
        );
    }

    #[tokio::test]
    async fn test_terminal_orders_are_locked() {
        let mock = MockClient::<StockItem>::new();
        let ctx = context(&mock);
        let mut cancelled = order(OrderStatus::Cancelled);

        let edit = OrderUpdate {
            description: Some("Replace the door roller".into()),
            ..Default::default()
        };
        assert_eq!(
            cancelled.on_update(edit, &ctx).await,
            Err(OrderError::Locked(OrderStatus::Cancelled))
        );
        assert_eq!(
            cancelled
                .handle_action(OrderAction::AssignTechnician("t2".into()), &ctx)
                .await,
            Err(OrderError::Locked(OrderStatus::Cancelled))
        );
    }

    #[tokio::test]
    async fn test_committed_finalize_debits_every_part() {
        let mut mock = MockClient::<StockItem>::new();
        mock.expect_action()
            .return_ok(StockActionResult::Debited { before: 10, after: 8 });
        mock.expect_action()
            .return_err(FrameworkError::NotFound("p2".into()));
        let ctx = context(&mock);

        let mut completed = order(OrderStatus::Completed);
        completed.parts.push(PartReservation::new("p2", "Cable", 1));
        let result = OrderActionResult::Finalized {
            parts: completed.parts.clone(),
        };

        let err = completed.on_committed(&result, &ctx).await.unwrap_err();
        assert!(matches!(err, OrderError::StockDebit(msg) if msg.starts_with("Cable")));
        mock.verify();
    }
}
