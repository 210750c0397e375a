// ==========================================
// Inventory Planning Engine - Pass Orchestrator
// ==========================================
// Sequences one full recomputation: identity resolution, fact
// aggregation, per-item figures, cross-item classifications, FIFO
// allocation and customer analysis. The whole pass is a pure function
// of (snapshot, as_of, config); nothing is cached between passes.
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::{FactSnapshot, PlanningOutcome, PlanningRow, QtyVal};
use crate::engine::abc::AbcCore;
use crate::engine::actions::ActionCore;
use crate::engine::allocator::FifoAllocator;
use crate::engine::customer::CustomerCore;
use crate::engine::identity::{dual_key_rows, dual_key_total, ItemHandle, ItemIndex};
use crate::engine::lookup::LookupIndex;
use crate::engine::movement::MovementCore;
use crate::engine::norms::NormCore;
use crate::engine::velocity::VelocityCore;
use crate::error::PlanningResult;
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// PlanningEngine - configured entry point
// ==========================================
pub struct PlanningEngine {
    config: PlanningConfig,
}

impl PlanningEngine {
    pub fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PlanningConfig::default())
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Run one planning pass over a fact snapshot.
    ///
    /// Rows come back in material-master order; allocations key by
    /// order-line id. Fails only on invalid configuration.
    #[instrument(skip(self, snapshot), fields(materials = snapshot.materials.len()))]
    pub fn run_pass(
        &self,
        snapshot: &FactSnapshot,
        as_of: NaiveDate,
    ) -> PlanningResult<PlanningOutcome> {
        self.config.validate()?;
        let started = Instant::now();
        let pass_id = Uuid::new_v4().to_string();

        let index = ItemIndex::build(&snapshot.materials);
        let lookup = LookupIndex::build(snapshot, &index, as_of);

        // per-item transaction lists, in material order for stable ranking
        let per_item: Vec<(ItemHandle, Vec<usize>)> = index
            .iter()
            .map(|(handle, _)| {
                let (desc, part) = index.lookup_keys(handle);
                (handle, dual_key_rows(&desc, part.as_deref(), &lookup.sales_rows))
            })
            .collect();

        let movement =
            MovementCore::classify_all(&snapshot.sales, &per_item, as_of, &self.config);

        let mut rows = Vec::with_capacity(index.len());
        let mut stock_values: Vec<(ItemHandle, f64)> = Vec::with_capacity(index.len());

        for (handle, material) in index.iter() {
            let (desc_key, part_key) = index.lookup_keys(handle);

            let stock = lookup.stock.get(&desc_key).copied().unwrap_or_default();
            let so = lookup.so.get(&desc_key).copied().unwrap_or_default();
            let po = lookup.po.get(&desc_key).copied().unwrap_or_default();

            let sales_3m = dual_key_total(&desc_key, part_key.as_deref(), &lookup.sales_3m);
            let sales_12m = dual_key_total(&desc_key, part_key.as_deref(), &lookup.sales_12m);

            let valuation_rate = VelocityCore::valuation_rate(stock, po, so);
            let velocity = VelocityCore::compute(sales_3m, sales_12m, valuation_rate);

            let planned = self.config.is_planned_group(&material.material_group);
            let norms =
                NormCore::compute(&self.config, velocity.avg_12m.qty, velocity.rate_12m, planned);

            let net_qty = stock.qty + po.qty - so.qty;
            let net = QtyVal::new(net_qty, net_qty * valuation_rate);

            let actions =
                ActionCore::compute(stock, so, po, net_qty, norms.max.qty, valuation_rate);

            let facts = movement.get(&handle).copied().unwrap_or_default();

            let unmatched = !lookup.stock.contains_key(&desc_key)
                && !lookup.so.contains_key(&desc_key)
                && !lookup.po.contains_key(&desc_key)
                && per_item[handle.index()].1.is_empty();

            stock_values.push((handle, stock.val));
            rows.push(PlanningRow {
                material: material.clone(),
                stock,
                so,
                po,
                net,
                avg_3m: velocity.avg_3m,
                avg_12m: velocity.avg_12m,
                growth_pct: velocity.growth_pct,
                norms,
                actions,
                forecast: facts.forecast,
                abc_class: None, // assigned below, once all stock values are known
                movement_class: facts.movement,
                stock_strategy: facts.strategy,
                active_months: facts.active_months,
                customer_count: facts.customer_count,
                volume_leader: facts.volume_leader,
                unmatched,
            });
        }

        let classes =
            AbcCore::classify(&stock_values, self.config.abc_a_share, self.config.abc_b_share);
        for (i, row) in rows.iter_mut().enumerate() {
            row.abc_class = classes.get(&ItemHandle(i as u32)).copied();
        }

        let allocations = FifoAllocator::allocate(&snapshot.sales_orders, &lookup.stock, as_of);
        let customer_rows = CustomerCore::categorize(&snapshot.sales, as_of);

        let outcome = PlanningOutcome {
            pass_id,
            as_of,
            rows,
            allocations,
            customer_rows,
            unmatched: lookup.unmatched,
            elapsed_ms: started.elapsed().as_millis() as i64,
        };

        info!(
            pass_id = %outcome.pass_id,
            rows = outcome.rows.len(),
            allocations = outcome.allocations.len(),
            customers = outcome.customer_rows.len(),
            unmatched = outcome.unmatched.any(),
            elapsed_ms = outcome.elapsed_ms,
            "planning pass complete"
        );
        Ok(outcome)
    }
}
