// ==========================================
// Inventory Planning Engine - Stock Norms
// ==========================================
// Min/Reorder/Max levels from the 12-month velocity, rounded up to
// the configured pack step. Only planned-stock material groups get
// non-zero norms.
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::{QtyVal, StockNorms};

/// Pure norm core.
pub struct NormCore;

impl NormCore {
    /// Round `qty` up to the next multiple of `step`; non-positive
    /// inputs become 0.
    pub fn ceil_step(qty: f64, step: f64) -> f64 {
        if qty <= 0.0 {
            return 0.0;
        }
        (qty / step).ceil() * step
    }

    /// Stock norms for one material.
    ///
    /// # Rules
    /// 1. materials outside the planned-stock group set get all-zero
    ///    norms (they are not planned for stock)
    /// 2. each level = ceil_step(avg12m qty x multiplier), so a level
    ///    is 0 only when the average itself is 0
    /// 3. level values are priced at the 12m effective rate
    pub fn compute(
        config: &PlanningConfig,
        avg_12m_qty: f64,
        rate_12m: f64,
        planned: bool,
    ) -> StockNorms {
        if !planned {
            return StockNorms::default();
        }

        let level = |multiplier: f64| {
            let qty = Self::ceil_step(avg_12m_qty * multiplier, config.rounding_step);
            QtyVal::new(qty, qty * rate_12m)
        };

        StockNorms {
            min: level(config.min_multiplier),
            reorder: level(config.reorder_multiplier),
            max: level(config.max_multiplier),
        }
    }
}
