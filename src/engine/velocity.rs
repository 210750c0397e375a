// ==========================================
// Inventory Planning Engine - Sales Velocity
// ==========================================
// Trailing-window consumption averages plus the valuation-rate
// fallback chain every downstream value is priced with.
// ==========================================

use crate::domain::QtyVal;

// ==========================================
// ItemVelocity - per-item velocity figures
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemVelocity {
    pub avg_3m: QtyVal,
    pub avg_12m: QtyVal,
    /// 3m average vs 12m average, percent; 0 when the 12m average is 0
    pub growth_pct: f64,
    /// Effective rate of the 12m window, used to value stock norms
    pub rate_12m: f64,
}

/// Pure velocity core.
pub struct VelocityCore;

impl VelocityCore {
    /// Valuation rate for an item, tried in order of reliability:
    /// stock rate, then PO rate, then SO rate, then 0.
    pub fn valuation_rate(stock: QtyVal, po: QtyVal, so: QtyVal) -> f64 {
        let candidates = [stock.rate(), po.rate(), so.rate()];
        candidates.into_iter().find(|r| *r > 0.0).unwrap_or(0.0)
    }

    /// Rate for a sales window: the window's own rate when it has
    /// quantity, otherwise the item valuation rate.
    pub fn effective_rate(window: QtyVal, valuation_rate: f64) -> f64 {
        if window.qty > 0.0 {
            window.rate()
        } else {
            valuation_rate
        }
    }

    /// Monthly averages over the trailing windows.
    ///
    /// # Rules
    /// 1. each window divides by its fixed calendar length (3 or 12),
    ///    regardless of how many months actually saw sales
    /// 2. average values are priced at the window's effective rate
    /// 3. growth = (avg3m - avg12m) / avg12m x 100, by quantity;
    ///    0 when the 12m average quantity is 0
    pub fn compute(sales_3m: QtyVal, sales_12m: QtyVal, valuation_rate: f64) -> ItemVelocity {
        let rate_3m = Self::effective_rate(sales_3m, valuation_rate);
        let rate_12m = Self::effective_rate(sales_12m, valuation_rate);

        let avg_3m_qty = sales_3m.qty / 3.0;
        let avg_12m_qty = sales_12m.qty / 12.0;

        let growth_pct = if avg_12m_qty > 0.0 {
            (avg_3m_qty - avg_12m_qty) / avg_12m_qty * 100.0
        } else {
            0.0
        };

        ItemVelocity {
            avg_3m: QtyVal::new(avg_3m_qty, avg_3m_qty * rate_3m),
            avg_12m: QtyVal::new(avg_12m_qty, avg_12m_qty * rate_12m),
            growth_pct,
            rate_12m,
        }
    }
}
