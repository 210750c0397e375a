// ==========================================
// Inventory Planning Engine - FIFO Stock Allocation
// ==========================================
// Walks each item's open sales-order lines in due-date order and
// draws from a running stock balance. Lines due after the end of the
// current month (or undated) are out of scope for allocation.
// ==========================================

use crate::domain::{AllocationResult, AllocationStatus, OpenOrderLine, QtyVal};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use tracing::warn;

/// Pure allocation core.
pub struct FifoAllocator;

impl FifoAllocator {
    /// Last day of `as_of`'s calendar month, the allocation horizon.
    pub fn end_of_month(as_of: NaiveDate) -> NaiveDate {
        let (year, month) = if as_of.month() == 12 {
            (as_of.year() + 1, 1)
        } else {
            (as_of.year(), as_of.month() + 1)
        };
        // the first of a valid month always exists and has a predecessor
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(as_of)
    }

    /// Allocate on-hand stock to open sales-order lines, per item.
    ///
    /// # Rules
    /// 1. lines group by normalized item key; within a group they are
    ///    ordered by due date ascending, undated lines last; ties keep
    ///    input order
    /// 2. lines undated or due after the end of the current month get
    ///    status FUTURE with no allocation
    /// 3. in-scope lines draw min(running stock, balance); running
    ///    stock starts at the item's on-hand quantity (floored at 0)
    ///    and never goes negative
    /// 4. status: FULL when the shortage is 0, NONE when nothing was
    ///    allocated against a positive balance, PARTIAL otherwise
    pub fn allocate(
        sales_orders: &[OpenOrderLine],
        stock: &HashMap<String, QtyVal>,
        as_of: NaiveDate,
    ) -> HashMap<String, AllocationResult> {
        let cutoff = Self::end_of_month(as_of);

        // group, preserving input order within each item
        let mut groups: HashMap<String, Vec<&OpenOrderLine>> = HashMap::new();
        for line in sales_orders {
            groups.entry(line.item_key()).or_default().push(line);
        }

        let mut results = HashMap::with_capacity(sales_orders.len());
        for (item_key, mut lines) in groups {
            // stable sort: only the due date orders lines
            lines.sort_by_key(|line| (line.due_date.is_none(), line.due_date));

            let mut running = stock
                .get(&item_key)
                .map(|qv| qv.qty.max(0.0))
                .unwrap_or(0.0);

            for line in lines {
                if line.balance_qty < 0.0 {
                    warn!(line_id = %line.id, balance = line.balance_qty, "negative order balance");
                }
                let in_scope = matches!(line.due_date, Some(due) if due <= cutoff);
                let result = if !in_scope {
                    AllocationResult {
                        line_id: line.id.clone(),
                        item_key: item_key.clone(),
                        allocated_qty: 0.0,
                        shortage_qty: line.balance_qty.max(0.0),
                        status: AllocationStatus::Future,
                    }
                } else {
                    let balance = line.balance_qty.max(0.0);
                    let allocated = running.min(balance);
                    running -= allocated;
                    let shortage = balance - allocated;
                    let status = if shortage <= 0.0 {
                        AllocationStatus::Full
                    } else if allocated <= 0.0 {
                        AllocationStatus::None
                    } else {
                        AllocationStatus::Partial
                    };
                    AllocationResult {
                        line_id: line.id.clone(),
                        item_key: item_key.clone(),
                        allocated_qty: allocated,
                        shortage_qty: shortage,
                        status,
                    }
                };
                results.insert(line.id.clone(), result);
            }
        }
        results
    }
}
