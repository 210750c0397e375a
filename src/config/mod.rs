// ==========================================
// Inventory Planning Engine - Configuration
// ==========================================
// Every classification threshold lives here as data, never as an
// embedded constant inside an engine. Defaults are the observed
// production values.
// ==========================================

use crate::domain::normalize_key;
use crate::error::{PlanningError, PlanningResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// PlanningConfig - engine threshold set
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    // ===== Stock norms =====
    /// Levels are rounded up to a multiple of this step.
    pub rounding_step: f64, // default: 10.0
    pub min_multiplier: f64,     // default: 1.0  (x avg 12m)
    pub reorder_multiplier: f64, // default: 1.5
    pub max_multiplier: f64,     // default: 3.0
    /// Material groups eligible for non-zero norms (normalized on insert).
    /// Items outside this set get all-zero Min/Reorder/Max levels.
    pub planned_stock_groups: HashSet<String>,

    // ===== ABC bands =====
    pub abc_a_share: f64, // default: 0.70
    pub abc_b_share: f64, // default: 0.90

    // ===== Movement class =====
    pub fast_runner_months: u32,  // default: 9
    pub leader_fast_months: u32,  // default: 6 (fast if also a volume leader)
    pub slow_runner_months: u32,  // default: 3
    /// Cumulative regular-quantity share that defines volume leaders.
    pub leader_share: f64, // default: 0.30

    // ===== Stocking strategy (distinct lifetime customer counts) =====
    pub general_stock_customers: usize,      // default: 10 (strictly more)
    pub against_order_customers: usize,      // default: 5
    pub fast_against_order_customers: usize, // default: 3 (fast runners only)

    // ===== Demand forecast =====
    /// Recency weights applied to the [FY0, FY-1, FY-2] sold
    /// quantities when projecting annual demand.
    pub forecast_weights: [f64; 3], // default: [0.5, 0.3, 0.2]
    /// Recommended stock = monthly forecast x this multiplier.
    pub forecast_stock_multiplier: f64, // default: 1.5

    // ===== Project-sale detection =====
    /// A single transaction at or above this share of the item's
    /// fiscal-year quantity counts as a project sale.
    pub project_qty_share: f64, // default: 0.35
    /// Keywords matched case-insensitively against voucher free text.
    pub project_keywords: Vec<String>,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            rounding_step: 10.0,
            min_multiplier: 1.0,
            reorder_multiplier: 1.5,
            max_multiplier: 3.0,
            planned_stock_groups: HashSet::new(),
            abc_a_share: 0.70,
            abc_b_share: 0.90,
            fast_runner_months: 9,
            leader_fast_months: 6,
            slow_runner_months: 3,
            leader_share: 0.30,
            general_stock_customers: 10,
            against_order_customers: 5,
            fast_against_order_customers: 3,
            forecast_weights: [0.5, 0.3, 0.2],
            forecast_stock_multiplier: 1.5,
            project_qty_share: 0.35,
            project_keywords: vec![
                "project".to_string(),
                "tender".to_string(),
                "site".to_string(),
            ],
        }
    }
}

impl PlanningConfig {
    /// Register a material group as planned-stock eligible.
    pub fn add_planned_group(&mut self, group: &str) {
        self.planned_stock_groups.insert(normalize_key(group));
    }

    /// Whether `group` is in the planned-stock policy set.
    pub fn is_planned_group(&self, group: &str) -> bool {
        self.planned_stock_groups.contains(&normalize_key(group))
    }

    /// Structural sanity check, run once per pass.
    ///
    /// # Rules
    /// 1. rounding_step > 0
    /// 2. 0 < abc_a_share <= abc_b_share <= 1
    /// 3. min <= reorder <= max multipliers
    /// 4. leader_share and project_qty_share in (0, 1]
    /// 5. forecast weights and stock multiplier non-negative
    pub fn validate(&self) -> PlanningResult<()> {
        if self.rounding_step <= 0.0 {
            return Err(PlanningError::InvalidRoundingStep(self.rounding_step));
        }
        if !(self.abc_a_share > 0.0
            && self.abc_a_share <= self.abc_b_share
            && self.abc_b_share <= 1.0)
        {
            return Err(PlanningError::InvalidAbcBands {
                a_share: self.abc_a_share,
                b_share: self.abc_b_share,
            });
        }
        if !(self.min_multiplier <= self.reorder_multiplier
            && self.reorder_multiplier <= self.max_multiplier)
        {
            return Err(PlanningError::InvalidMultipliers {
                min: self.min_multiplier,
                reorder: self.reorder_multiplier,
                max: self.max_multiplier,
            });
        }
        if !(self.leader_share > 0.0 && self.leader_share <= 1.0) {
            return Err(PlanningError::ShareOutOfRange {
                field: "leader_share",
                value: self.leader_share,
            });
        }
        if !(self.project_qty_share > 0.0 && self.project_qty_share <= 1.0) {
            return Err(PlanningError::ShareOutOfRange {
                field: "project_qty_share",
                value: self.project_qty_share,
            });
        }
        if self.forecast_weights.iter().any(|w| *w < 0.0) {
            return Err(PlanningError::InvalidForecastWeights(self.forecast_weights));
        }
        if self.forecast_stock_multiplier < 0.0 {
            return Err(PlanningError::InvalidForecastMultiplier(
                self.forecast_stock_multiplier,
            ));
        }
        Ok(())
    }
}
