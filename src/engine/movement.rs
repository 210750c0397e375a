// ==========================================
// Inventory Planning Engine - Movement & Stocking Strategy
// ==========================================
// Classifies each material's sales cadence (fast / slow / non-moving)
// and derives a stocking strategy from customer breadth. Project
// sales are filtered out of the volume ranking so one-off tender
// business does not promote an item to volume leader.
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::{DemandForecast, FiscalYear, MovementClass, SalesTransaction, StockStrategy};
use crate::engine::identity::ItemHandle;
use crate::engine::lookup::months_before;
use chrono::{Datelike, NaiveDate};
use std::collections::{HashMap, HashSet};

// ==========================================
// MovementFacts - per-item classification result
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementFacts {
    pub movement: MovementClass,
    pub strategy: StockStrategy,
    /// Distinct calendar months with a dated sale in the 12m window
    pub active_months: u32,
    /// Distinct lifetime customers (empty names excluded)
    pub customer_count: usize,
    /// Top cumulative share of regular (non-project) volume
    pub volume_leader: bool,
    /// Recency-weighted demand projection
    pub forecast: DemandForecast,
}

impl Default for MovementFacts {
    fn default() -> Self {
        Self {
            movement: MovementClass::NonMoving,
            strategy: StockStrategy::MadeToOrder,
            active_months: 0,
            customer_count: 0,
            volume_leader: false,
            forecast: DemandForecast::default(),
        }
    }
}

#[derive(Debug, Default)]
struct ItemStats {
    active_months: u32,
    customer_count: usize,
    /// Non-project quantity over the two most recent fiscal years
    regular_qty: f64,
    /// Total sold quantity per fiscal year, [FY0, FY-1, FY-2]
    fy_qty: [f64; 3],
}

/// Pure movement core.
pub struct MovementCore;

impl MovementCore {
    /// Classify every item's movement and stocking strategy.
    ///
    /// `per_item` carries each item's transaction indices in material
    /// order; ranking ties keep that order.
    pub fn classify_all(
        sales: &[SalesTransaction],
        per_item: &[(ItemHandle, Vec<usize>)],
        as_of: NaiveDate,
        config: &PlanningConfig,
    ) -> HashMap<ItemHandle, MovementFacts> {
        let window_start = months_before(as_of, 12);
        let fy0 = FiscalYear::of(as_of);
        let fy1 = fy0.offset(-1);

        let stats: Vec<(ItemHandle, ItemStats)> = per_item
            .iter()
            .map(|(handle, rows)| {
                (
                    *handle,
                    Self::item_stats(sales, rows, window_start, fy0, fy1, config),
                )
            })
            .collect();

        let ranked: Vec<(ItemHandle, f64)> = stats
            .iter()
            .map(|(handle, s)| (*handle, s.regular_qty))
            .collect();
        let leaders = Self::volume_leaders(&ranked, config.leader_share);

        stats
            .into_iter()
            .map(|(handle, s)| {
                let leader = leaders.contains(&handle);
                let movement = Self::movement_class(s.active_months, leader, config);
                let strategy =
                    Self::stock_strategy(s.customer_count, movement == MovementClass::FastRunner, config);
                (
                    handle,
                    MovementFacts {
                        movement,
                        strategy,
                        active_months: s.active_months,
                        customer_count: s.customer_count,
                        volume_leader: leader,
                        forecast: Self::forecast(s.fy_qty, config),
                    },
                )
            })
            .collect()
    }

    fn item_stats(
        sales: &[SalesTransaction],
        rows: &[usize],
        window_start: NaiveDate,
        fy0: FiscalYear,
        fy1: FiscalYear,
        config: &PlanningConfig,
    ) -> ItemStats {
        // per-fiscal-year quantity totals drive the project-share test
        let mut fy_totals: HashMap<FiscalYear, f64> = HashMap::new();
        for &i in rows {
            if let Some(date) = sales[i].date {
                *fy_totals.entry(FiscalYear::of(date)).or_default() += sales[i].quantity;
            }
        }

        let mut months: HashSet<(i32, u32)> = HashSet::new();
        let mut customers: HashSet<String> = HashSet::new();
        let mut regular_qty = 0.0;

        for &i in rows {
            let txn = &sales[i];

            let key = txn.customer_key();
            if !key.is_empty() {
                customers.insert(key);
            }

            if let Some(date) = txn.date {
                if date >= window_start {
                    months.insert((date.year(), date.month()));
                }
                let fy = FiscalYear::of(date);
                if (fy == fy0 || fy == fy1) && !Self::is_project_sale(txn, &fy_totals, config) {
                    regular_qty += txn.quantity;
                }
            }
        }

        // all sales count toward the forecast, project business included
        let fy_qty = [
            fy_totals.get(&fy0).copied().unwrap_or(0.0),
            fy_totals.get(&fy1).copied().unwrap_or(0.0),
            fy_totals.get(&fy0.offset(-2)).copied().unwrap_or(0.0),
        ];

        ItemStats {
            active_months: months.len() as u32,
            customer_count: customers.len(),
            regular_qty,
            fy_qty,
        }
    }

    /// Recency-weighted annual demand over the last three fiscal
    /// years, with the advisory stock quantities derived from its
    /// monthly figure.
    fn forecast(fy_qty: [f64; 3], config: &PlanningConfig) -> DemandForecast {
        let annual_qty: f64 = fy_qty
            .iter()
            .zip(config.forecast_weights.iter())
            .map(|(qty, weight)| qty * weight)
            .sum();
        let monthly_qty = annual_qty / 12.0;
        DemandForecast {
            annual_qty,
            monthly_qty,
            recommended_qty: monthly_qty * config.forecast_stock_multiplier,
            reorder_qty: monthly_qty,
        }
    }

    /// A sale is a project sale when its voucher free text contains a
    /// project keyword, or its quantity alone is at least the
    /// configured share of the item's total for that fiscal year.
    fn is_project_sale(
        txn: &SalesTransaction,
        fy_totals: &HashMap<FiscalYear, f64>,
        config: &PlanningConfig,
    ) -> bool {
        let mut text = String::new();
        if let Some(v) = &txn.voucher_no {
            text.push_str(&v.to_lowercase());
        }
        if let Some(v) = &txn.voucher_ref {
            text.push(' ');
            text.push_str(&v.to_lowercase());
        }
        if config
            .project_keywords
            .iter()
            .any(|kw| !kw.is_empty() && text.contains(&kw.to_lowercase()))
        {
            return true;
        }

        if let Some(date) = txn.date {
            let total = fy_totals.get(&FiscalYear::of(date)).copied().unwrap_or(0.0);
            if total > 0.0 && txn.quantity >= config.project_qty_share * total {
                return true;
            }
        }
        false
    }

    /// Items whose cumulative share of regular volume, counted before
    /// the item itself, is below `leader_share`. Same crossing rule as
    /// the ABC bands.
    fn volume_leaders(ranked: &[(ItemHandle, f64)], leader_share: f64) -> HashSet<ItemHandle> {
        let mut positive: Vec<(ItemHandle, f64)> = ranked
            .iter()
            .copied()
            .filter(|(_, qty)| *qty > 0.0)
            .collect();
        positive.sort_by(|a, b| b.1.total_cmp(&a.1));

        let total: f64 = positive.iter().map(|(_, qty)| qty).sum();
        if total <= 0.0 {
            return HashSet::new();
        }

        let mut leaders = HashSet::new();
        let mut cumulative = 0.0;
        for (handle, qty) in positive {
            if cumulative / total < leader_share {
                leaders.insert(handle);
            }
            cumulative += qty;
        }
        leaders
    }

    fn movement_class(active_months: u32, leader: bool, config: &PlanningConfig) -> MovementClass {
        if active_months == 0 {
            MovementClass::NonMoving
        } else if active_months >= config.fast_runner_months
            || (leader && active_months >= config.leader_fast_months)
        {
            MovementClass::FastRunner
        } else if active_months >= config.slow_runner_months {
            MovementClass::SlowRunner
        } else {
            MovementClass::NonMoving
        }
    }

    fn stock_strategy(customers: usize, fast: bool, config: &PlanningConfig) -> StockStrategy {
        if customers > config.general_stock_customers
            || (customers >= config.against_order_customers && fast)
        {
            StockStrategy::GeneralStock
        } else if customers >= config.against_order_customers
            || (customers >= config.fast_against_order_customers && fast)
        {
            StockStrategy::AgainstOrder
        } else {
            StockStrategy::MadeToOrder
        }
    }
}
