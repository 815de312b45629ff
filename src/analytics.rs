//! Derived views over store snapshots.
//!
//! Everything here is a pure function of the lists it is given and is recomputed on every
//! call; nothing is cached between reads.

use crate::directory::Directory;
use crate::model::{CustomerId, EquipmentId, OrderStatus, ServiceOrder, StockItem, TechnicianId};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Dashboard shortcut filters for the order board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    All,
    /// Flagged emergencies that are still open or in progress.
    Emergency,
    /// Created today and not cancelled.
    Today,
    /// Open or in progress.
    Pending,
}

impl Metric {
    pub fn matches(self, order: &ServiceOrder, today: NaiveDate) -> bool {
        match self {
            Metric::All => true,
            Metric::Emergency => order.is_emergency && !order.status.is_terminal(),
            Metric::Today => {
                order.created_at.date_naive() == today && order.status != OrderStatus::Cancelled
            }
            Metric::Pending => order.status.is_active(),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Metric::All),
            "emergency" => Ok(Metric::Emergency),
            "today" => Ok(Metric::Today),
            "pending" => Ok(Metric::Pending),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    /// `None` shows every status.
    pub status: Option<OrderStatus>,
    pub metric: Metric,
    pub query: String,
}

/// An order joined with the names the board displays.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order: ServiceOrder,
    pub customer_name: String,
    pub equipment_name: String,
    pub technician_name: String,
}

impl OrderRow {
    fn matches(&self, term: &str) -> bool {
        [
            self.customer_name.as_str(),
            self.equipment_name.as_str(),
            self.order.order_number.as_str(),
            self.order.description.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
    }
}

impl Display for OrderRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<12} {:<14} {:<24} {:<20} {:<20}{} {}",
            self.order.order_number,
            self.order.status,
            self.customer_name,
            self.equipment_name,
            self.technician_name,
            if self.order.is_emergency { " !" } else { "" },
            self.order.description,
        )
    }
}

/// The order board: names joined, newest first, then filtered by status, metric and query.
pub fn order_board(
    orders: &[ServiceOrder],
    directory: &Directory,
    filter: &BoardFilter,
    today: NaiveDate,
) -> Vec<OrderRow> {
    let term = filter.query.trim().to_lowercase();
    let mut rows: Vec<OrderRow> = orders
        .iter()
        .filter(|order| filter.status.map_or(true, |status| order.status == status))
        .filter(|order| filter.metric.matches(order, today))
        .map(|order| OrderRow {
            order: order.clone(),
            customer_name: directory.customer_name(&order.customer_id).to_string(),
            equipment_name: directory.equipment_name(&order.equipment_id).to_string(),
            technician_name: directory
                .technician_name(order.technician_id.as_ref())
                .to_string(),
        })
        .filter(|row| term.is_empty() || row.matches(&term))
        .collect();
    rows.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounters {
    pub pending: usize,
    pub emergency: usize,
    pub today: usize,
}

pub fn dashboard_counters(orders: &[ServiceOrder], today: NaiveDate) -> DashboardCounters {
    let count = |metric: Metric| orders.iter().filter(|o| metric.matches(o, today)).count();
    DashboardCounters {
        pending: count(Metric::Pending),
        emergency: count(Metric::Emergency),
        today: count(Metric::Today),
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub day: Option<NaiveDate>,
    pub technician: Option<TechnicianId>,
    pub equipment: Option<EquipmentId>,
}

/// A customer's orders, newest first, narrowed by the optional filters.
pub fn customer_history(
    orders: &[ServiceOrder],
    customer_id: &CustomerId,
    filter: &HistoryFilter,
) -> Vec<ServiceOrder> {
    let mut history: Vec<ServiceOrder> = orders
        .iter()
        .filter(|o| &o.customer_id == customer_id)
        .filter(|o| filter.day.map_or(true, |day| o.created_at.date_naive() == day))
        .filter(|o| {
            filter
                .technician
                .as_ref()
                .map_or(true, |t| o.technician_id.as_ref() == Some(t))
        })
        .filter(|o| filter.equipment.as_ref().map_or(true, |e| &o.equipment_id == e))
        .cloned()
        .collect();
    history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    history
}

/// Mean time between failures in whole days.
///
/// Failures are corrective or emergency orders; the mean is taken over the gaps between
/// chronologically adjacent failures. `None` with fewer than two failures.
pub fn mtbf_days(orders: &[ServiceOrder]) -> Option<i64> {
    let mut failures: Vec<_> = orders
        .iter()
        .filter(|o| o.is_failure())
        .map(|o| o.created_at)
        .collect();
    if failures.len() < 2 {
        return None;
    }
    failures.sort();
    let total_ms: i64 = failures
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_milliseconds())
        .sum();
    let gaps = (failures.len() - 1) as f64;
    let mean_days = total_ms as f64 / gaps / 86_400_000.0;
    Some(mean_days.round() as i64)
}

/// Orders per technician name, most first. Unassigned orders count under the fallback label.
pub fn technician_distribution(
    orders: &[ServiceOrder],
    directory: &Directory,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for order in orders {
        *counts
            .entry(directory.technician_name(order.technician_id.as_ref()))
            .or_default() += 1;
    }
    let mut distribution: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    distribution
}

/// Pin colour of a customer site on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Emergency,
    Pending,
    Stable,
}

impl Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SiteStatus::Emergency => "EMERGENCY",
            SiteStatus::Pending => "maintenance",
            SiteStatus::Stable => "stable",
        })
    }
}

pub fn site_status(orders: &[ServiceOrder], customer_id: &CustomerId) -> SiteStatus {
    let mut active = orders
        .iter()
        .filter(|o| &o.customer_id == customer_id && o.status.is_active())
        .peekable();
    if active.peek().is_none() {
        return SiteStatus::Stable;
    }
    if active.any(|o| o.is_emergency) {
        SiteStatus::Emergency
    } else {
        SiteStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockSummary {
    pub critical: Vec<StockItem>,
    pub total_value: f64,
    /// Share of items above their minimum, rounded; 0 for an empty inventory.
    pub healthy_percent: u32,
}

impl StockSummary {
    pub fn critical_count(&self) -> usize {
        self.critical.len()
    }
}

pub fn stock_summary(items: &[StockItem]) -> StockSummary {
    let critical: Vec<StockItem> = items.iter().filter(|i| i.is_critical()).cloned().collect();
    let total_value = items.iter().map(StockItem::stock_value).sum();
    let healthy_percent = if items.is_empty() {
        0
    } else {
        let healthy = (items.len() - critical.len()) as f64;
        (healthy / items.len() as f64 * 100.0).round() as u32
    };
    StockSummary {
        critical,
        total_value,
        healthy_percent,
    }
}
