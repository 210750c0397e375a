// ==========================================
// Inventory Planning Engine - Derived Model
// ==========================================
// Everything here is recomputed from a FactSnapshot on every pass
// and never persisted or mutated in place.
// ==========================================

use crate::domain::fiscal::FiscalYear;
use crate::domain::types::{
    AbcClass, AllocationStatus, CustomerCategory, MovementClass, StockStrategy,
};
use crate::domain::MaterialIdentity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;

// ==========================================
// QtyVal - quantity/value aggregate pair
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QtyVal {
    pub qty: f64,
    pub val: f64,
}

impl QtyVal {
    pub fn new(qty: f64, val: f64) -> Self {
        Self { qty, val }
    }

    pub fn add(&mut self, qty: f64, val: f64) {
        self.qty += qty;
        self.val += val;
    }

    pub fn merge(&mut self, other: QtyVal) {
        self.qty += other.qty;
        self.val += other.val;
    }

    /// Unit rate, 0 when the quantity is 0 (never NaN).
    pub fn rate(&self) -> f64 {
        if self.qty > 0.0 {
            self.val / self.qty
        } else {
            0.0
        }
    }
}

// ==========================================
// DemandForecast - weighted fiscal-year projection
// ==========================================
// Annual demand projected from the last three fiscal years' sold
// quantities, recency-weighted; the derived quantities are advisory
// and independent of the velocity-based stock norms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub annual_qty: f64,      // weighted FY0/FY-1/FY-2 quantity
    pub monthly_qty: f64,     // annual_qty / 12
    pub recommended_qty: f64, // monthly_qty x stock multiplier
    pub reorder_qty: f64,     // = monthly_qty
}

// ==========================================
// StockNorms - Min/Reorder/Max levels
// ==========================================
// All zero when the material group is outside the planned-stock policy set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StockNorms {
    pub min: QtyVal,
    pub reorder: QtyVal,
    pub max: QtyVal,
}

// ==========================================
// ActionSignals - replenishment / excess signals
// ==========================================
// The four signals are independent and not mutually exclusive;
// po_need and excess_po may both be positive for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSignals {
    pub excess_stock: QtyVal, // on-hand beyond SO commitments + max level
    pub excess_po: QtyVal,    // projected excess remaining after stock excess
    pub po_need: QtyVal,      // gap between max level and net position
    pub expedite: QtyVal,     // pending PO quantity needed near-term
}

// ==========================================
// PlanningRow - one material, fully classified
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningRow {
    pub material: MaterialIdentity,

    // Aggregated facts
    pub stock: QtyVal,
    pub so: QtyVal,
    pub po: QtyVal,
    pub net: QtyVal, // net.qty = stock.qty + po.qty - so.qty (exact)

    // Sales velocity
    pub avg_3m: QtyVal,
    pub avg_12m: QtyVal,
    pub growth_pct: f64, // 0 when avg_12m.qty = 0

    // Norms, signals, projection
    pub norms: StockNorms,
    pub actions: ActionSignals,
    pub forecast: DemandForecast,

    // Classifications
    pub abc_class: Option<AbcClass>, // None when the item has no stock value
    pub movement_class: MovementClass,
    pub stock_strategy: StockStrategy,

    // Classification inputs, surfaced for reporting
    pub active_months: u32,   // distinct sale months in the 12m window
    pub customer_count: usize, // distinct lifetime customers
    pub volume_leader: bool,  // top cumulative-30% regular volume
    pub unmatched: bool,      // no stock/SO/PO/sales fact matched this material
}

// ==========================================
// AllocationResult - per order line
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    pub line_id: String,
    pub item_key: String,
    pub allocated_qty: f64, // <= balance_qty, drawn from the item's running stock
    pub shortage_qty: f64,  // balance_qty - allocated_qty for non-future lines
    pub status: AllocationStatus,
}

// ==========================================
// CustomerYearRow - per customer, three fiscal years
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerYearRow {
    pub customer: String,
    pub fiscal_years: [FiscalYear; 3], // [FY-2, FY-1, FY0]
    pub totals: [QtyVal; 3],           // aggregates per fiscal year, same order
    pub category: Option<CustomerCategory>,
    pub growth_pct: f64, // FY0 value vs FY-1 value; 100 when FY-1 = 0 and FY0 > 0
    pub share_pct: f64,  // contribution to FY0 total value
}

// ==========================================
// UnmatchedSummary - non-fatal data-quality counters
// ==========================================
// Consumed by reporting, never by the engine itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedSummary {
    pub stock: usize,            // stock lines matching no material
    pub sales_orders: usize,     // SO lines matching no material
    pub purchase_orders: usize,  // PO lines matching no material
    pub sales: usize,            // sales rows matching no material
    pub unknown_customers: usize, // sales rows with an empty customer
}

impl UnmatchedSummary {
    pub fn any(&self) -> bool {
        self.stock + self.sales_orders + self.purchase_orders + self.sales + self.unknown_customers
            > 0
    }
}

// ==========================================
// PlanningOutcome - product of one pass
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningOutcome {
    pub pass_id: String,     // fresh UUID per recomputation
    pub as_of: NaiveDate,    // reference date of the pass
    pub rows: Vec<PlanningRow>,
    pub allocations: HashMap<String, AllocationResult>, // keyed by order-line id
    pub customer_rows: Vec<CustomerYearRow>,
    pub unmatched: UnmatchedSummary,
    pub elapsed_ms: i64,
}

impl PlanningOutcome {
    /// Diagnostics payload: counts only, no row data.
    pub fn summary_json(&self) -> JsonValue {
        json!({
            "pass_id": self.pass_id,
            "as_of": self.as_of.to_string(),
            "rows": self.rows.len(),
            "allocations": self.allocations.len(),
            "customers": self.customer_rows.len(),
            "unmatched": {
                "stock": self.unmatched.stock,
                "sales_orders": self.unmatched.sales_orders,
                "purchase_orders": self.unmatched.purchase_orders,
                "sales": self.unmatched.sales,
                "unknown_customers": self.unmatched.unknown_customers,
            },
            "elapsed_ms": self.elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qty_val_rate_zero_qty() {
        let qv = QtyVal::new(0.0, 500.0);
        assert_eq!(qv.rate(), 0.0); // never NaN
    }

    #[test]
    fn test_qty_val_rate() {
        let qv = QtyVal::new(4.0, 10.0);
        assert_eq!(qv.rate(), 2.5);
    }

    #[test]
    fn test_unmatched_any() {
        let mut u = UnmatchedSummary::default();
        assert!(!u.any());
        u.sales = 1;
        assert!(u.any());
    }
}
