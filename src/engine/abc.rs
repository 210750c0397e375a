// ==========================================
// Inventory Planning Engine - ABC Classification
// ==========================================
// Cumulative-value partition of stocked items. Only items with a
// positive stock value are ranked; everything else stays unclassed.
// ==========================================

use crate::domain::AbcClass;
use crate::engine::identity::ItemHandle;
use std::collections::HashMap;

/// Pure ABC core.
pub struct AbcCore;

impl AbcCore {
    /// Partition items by cumulative share of total stock value.
    ///
    /// # Rules
    /// 1. only items with stock value > 0 are ranked; the returned map
    ///    has no entry for the rest
    /// 2. rank by stock value descending; ties keep input order
    /// 3. an item's class is decided by the cumulative share BEFORE
    ///    it: < a_share -> A, < b_share -> B, else C. The item that
    ///    crosses a boundary therefore still lands in the upper band.
    pub fn classify(
        items: &[(ItemHandle, f64)],
        a_share: f64,
        b_share: f64,
    ) -> HashMap<ItemHandle, AbcClass> {
        let mut ranked: Vec<(ItemHandle, f64)> = items
            .iter()
            .copied()
            .filter(|(_, value)| *value > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let total: f64 = ranked.iter().map(|(_, value)| value).sum();
        if total <= 0.0 {
            return HashMap::new();
        }

        let mut classes = HashMap::with_capacity(ranked.len());
        let mut cumulative = 0.0;
        for (handle, value) in ranked {
            let share_before = cumulative / total;
            let class = if share_before < a_share {
                AbcClass::A
            } else if share_before < b_share {
                AbcClass::B
            } else {
                AbcClass::C
            };
            classes.insert(handle, class);
            cumulative += value;
        }
        classes
    }
}
