//! Custom actions for the Stock actor.

#[derive(Debug, Clone)]
pub enum StockAction {
    /// Read the current quantity without modifying it.
    CheckStock,
    /// Remove a quantity consumed by a completed order, clamped at zero.
    Debit(u32),
}

/// Results from StockActions - variants match 1:1 with StockAction
#[derive(Debug, Clone, PartialEq)]
pub enum StockActionResult {
    CheckStock(u32),
    Debited { before: u32, after: u32 },
}
