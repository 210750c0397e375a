// ==========================================
// Inventory Planning Engine - Lookup Index Builder
// ==========================================
// Responsibility: one pass over the fact snapshot, producing the
// keyed aggregates every downstream stage reads. Facts that resolve
// to no material raise a non-fatal unmatched counter; they stay in
// the maps (the FIFO allocator works directly off raw keys) but no
// material row will ever consult them.
// ==========================================

use crate::domain::{FactSnapshot, QtyVal, UnmatchedSummary};
use crate::engine::identity::ItemIndex;
use chrono::{Months, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, warn};

// ==========================================
// LookupIndex - keyed fact aggregates for one pass
// ==========================================
#[derive(Debug, Default)]
pub struct LookupIndex {
    /// On-hand stock by normalized item key
    pub stock: HashMap<String, QtyVal>,
    /// Open sales-order balances by normalized item key
    pub so: HashMap<String, QtyVal>,
    /// Open purchase-order balances by normalized item key
    pub po: HashMap<String, QtyVal>,
    /// Sales totals over the trailing 12-month window
    pub sales_12m: HashMap<String, QtyVal>,
    /// Sales totals over the trailing 3-month window (subset of 12m)
    pub sales_3m: HashMap<String, QtyVal>,
    /// Indices into the snapshot's sales list, by normalized item key
    pub sales_rows: HashMap<String, Vec<usize>>,
    /// Non-fatal counts of facts that resolved to no material
    pub unmatched: UnmatchedSummary,
}

impl LookupIndex {
    /// Aggregate the snapshot's facts into keyed lookup maps.
    ///
    /// # Rules
    /// 1. keys are normalized (trimmed, lowercased); empty keys are
    ///    counted unmatched and skipped
    /// 2. order lines contribute their remaining balance quantity and
    ///    the balance valued at the line rate
    /// 3. the 3-month and 12-month windows trail `as_of`; undated
    ///    transactions fall outside both windows but keep their place
    ///    in the per-item transaction lists
    pub fn build(snapshot: &FactSnapshot, index: &ItemIndex, as_of: NaiveDate) -> Self {
        let start_12m = months_before(as_of, 12);
        let start_3m = months_before(as_of, 3);

        let mut out = Self::default();

        for fact in &snapshot.stock {
            let key = fact.item_key();
            if index.resolve(&key).is_none() {
                out.unmatched.stock += 1;
            }
            if key.is_empty() {
                continue;
            }
            out.stock
                .entry(key)
                .or_default()
                .add(fact.quantity, fact.value);
        }

        for line in &snapshot.sales_orders {
            let key = line.item_key();
            if index.resolve(&key).is_none() {
                out.unmatched.sales_orders += 1;
            }
            if key.is_empty() {
                continue;
            }
            out.so
                .entry(key)
                .or_default()
                .add(line.balance_qty, line.balance_value());
        }

        for line in &snapshot.purchase_orders {
            let key = line.item_key();
            if index.resolve(&key).is_none() {
                out.unmatched.purchase_orders += 1;
            }
            if key.is_empty() {
                continue;
            }
            out.po
                .entry(key)
                .or_default()
                .add(line.balance_qty, line.balance_value());
        }

        for (i, txn) in snapshot.sales.iter().enumerate() {
            let key = txn.item_key();
            if index.resolve(&key).is_none() {
                out.unmatched.sales += 1;
            }
            if txn.customer_key().is_empty() {
                out.unmatched.unknown_customers += 1;
            }
            if key.is_empty() {
                continue;
            }
            out.sales_rows.entry(key.clone()).or_default().push(i);
            if let Some(date) = txn.date {
                if date >= start_12m {
                    out.sales_12m
                        .entry(key.clone())
                        .or_default()
                        .add(txn.quantity, txn.value);
                }
                if date >= start_3m {
                    out.sales_3m.entry(key).or_default().add(txn.quantity, txn.value);
                }
            }
        }

        if out.unmatched.any() {
            warn!(
                stock = out.unmatched.stock,
                sales_orders = out.unmatched.sales_orders,
                purchase_orders = out.unmatched.purchase_orders,
                sales = out.unmatched.sales,
                unknown_customers = out.unmatched.unknown_customers,
                "facts matched no material"
            );
        }

        debug!(
            stock_keys = out.stock.len(),
            so_keys = out.so.len(),
            po_keys = out.po.len(),
            sales_keys = out.sales_rows.len(),
            "lookup index built"
        );

        out
    }
}

/// The calendar date `months` months before `date`, clamping the day
/// of month when the target month is shorter.
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
