// ==========================================
// Inventory Planning Engine - Action Signals
// ==========================================
// Replenishment and excess signals derived from the net position and
// the Max stock level. The four signals are independent; an item can
// legitimately carry both a PO need and a projected PO excess.
// ==========================================

use crate::domain::{ActionSignals, QtyVal};

/// Pure action-signal core.
pub struct ActionCore;

impl ActionCore {
    /// Action signals for one material.
    ///
    /// # Rules
    /// 1. excess stock = on-hand beyond open SO commitments plus Max,
    ///    valued at the stock's own rate
    /// 2. excess PO = the part of the projected excess
    ///    (net - Max, floored at 0) not already counted as excess
    ///    stock, valued at the valuation rate
    /// 3. PO need = Max - net, floored at 0, valued at the valuation
    ///    rate
    /// 4. expedite = open PO quantity needed to cover the immediate
    ///    gap (SO + Max) - stock, capped at the open PO quantity
    pub fn compute(
        stock: QtyVal,
        so: QtyVal,
        po: QtyVal,
        net_qty: f64,
        max_qty: f64,
        valuation_rate: f64,
    ) -> ActionSignals {
        let excess_stock_qty = (stock.qty - (so.qty + max_qty)).max(0.0);

        let projected_excess = (net_qty - max_qty).max(0.0);
        let excess_po_qty = (projected_excess - excess_stock_qty).max(0.0);

        let po_need_qty = (max_qty - net_qty).max(0.0);

        let immediate_gap = (so.qty + max_qty) - stock.qty;
        let expedite_qty = if immediate_gap > 0.0 && po.qty > 0.0 {
            immediate_gap.min(po.qty)
        } else {
            0.0
        };

        ActionSignals {
            excess_stock: QtyVal::new(excess_stock_qty, excess_stock_qty * stock.rate()),
            excess_po: QtyVal::new(excess_po_qty, excess_po_qty * valuation_rate),
            po_need: QtyVal::new(po_need_qty, po_need_qty * valuation_rate),
            expedite: QtyVal::new(expedite_qty, expedite_qty * valuation_rate),
        }
    }
}
