// ==========================================
// Planning pass integration tests
// ==========================================
// End-to-end passes over small fact snapshots: allocation scenarios,
// norm derivation, ABC bands, customer categories, and the numeric
// guarantees every row must satisfy.
// ==========================================

use chrono::NaiveDate;
use inventory_planner::logging;
use inventory_planner::{
    AbcClass, AllocationStatus, CustomerCategory, FactSnapshot, MaterialIdentity, MovementClass,
    OpenOrderLine, PlanningConfig, PlanningEngine, SalesTransaction, StockFact,
};
use std::collections::HashMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn material(desc: &str, group: &str) -> MaterialIdentity {
    MaterialIdentity {
        description: desc.to_string(),
        part_no: String::new(),
        make: "ACME".to_string(),
        material_group: group.to_string(),
    }
}

fn stock(item: &str, qty: f64, rate: f64) -> StockFact {
    StockFact {
        item: item.to_string(),
        quantity: qty,
        rate,
        value: qty * rate,
    }
}

fn so_line(id: &str, item: &str, balance: f64, due: Option<NaiveDate>) -> OpenOrderLine {
    OpenOrderLine {
        id: id.to_string(),
        item: item.to_string(),
        customer: "Acme Industries".to_string(),
        order_no: format!("SO-{id}"),
        ordered_qty: balance,
        balance_qty: balance,
        rate: 5.0,
        value: balance * 5.0,
        due_date: due,
        order_date: None,
    }
}

fn sale(item: &str, customer: &str, d: NaiveDate, qty: f64, rate: f64) -> SalesTransaction {
    SalesTransaction {
        item: item.to_string(),
        customer: customer.to_string(),
        date: Some(d),
        quantity: qty,
        value: qty * rate,
        voucher_no: None,
        voucher_ref: None,
    }
}

fn planned_engine(groups: &[&str]) -> PlanningEngine {
    let mut config = PlanningConfig::default();
    for g in groups {
        config.add_planned_group(g);
    }
    PlanningEngine::new(config)
}

// ==========================================
// Allocation (Scenario A + guarantees)
// ==========================================

#[test]
fn test_allocation_scenario_due_vs_future() {
    logging::init_test();

    // stock 50; line1 due in-month balance 30, line2 due next month balance 40
    let as_of = date(2024, 1, 15);
    let snapshot = FactSnapshot {
        materials: vec![material("Item X", "GRP")],
        stock: vec![stock("Item X", 50.0, 2.0)],
        sales_orders: vec![
            so_line("l1", "Item X", 30.0, Some(date(2024, 1, 1))),
            so_line("l2", "Item X", 40.0, Some(date(2024, 2, 1))),
        ],
        ..Default::default()
    };

    let outcome = PlanningEngine::with_defaults()
        .run_pass(&snapshot, as_of)
        .unwrap();

    let l1 = &outcome.allocations["l1"];
    assert_eq!(l1.allocated_qty, 30.0);
    assert_eq!(l1.shortage_qty, 0.0);
    assert_eq!(l1.status, AllocationStatus::Full);

    let l2 = &outcome.allocations["l2"];
    assert_eq!(l2.status, AllocationStatus::Future);
    assert_eq!(l2.allocated_qty, 0.0);
    assert_eq!(l2.shortage_qty, 40.0);
}

#[test]
fn test_allocation_guarantees_hold() {
    logging::init_test();

    let as_of = date(2024, 1, 15);
    let snapshot = FactSnapshot {
        materials: vec![material("Item X", "GRP"), material("Item Y", "GRP")],
        stock: vec![stock("Item X", 35.0, 2.0), stock("Item Y", 5.0, 1.0)],
        sales_orders: vec![
            so_line("x1", "Item X", 30.0, Some(date(2024, 1, 5))),
            so_line("x2", "Item X", 30.0, Some(date(2024, 1, 20))),
            so_line("x3", "Item X", 30.0, Some(date(2024, 3, 1))),
            so_line("y1", "Item Y", 10.0, Some(date(2024, 1, 10))),
            so_line("y2", "Item Y", 10.0, None),
        ],
        ..Default::default()
    };

    let outcome = PlanningEngine::with_defaults()
        .run_pass(&snapshot, as_of)
        .unwrap();

    // per item, due-line allocations never exceed on-hand stock
    let mut allocated: HashMap<&str, f64> = HashMap::new();
    for result in outcome.allocations.values() {
        *allocated.entry(result.item_key.as_str()).or_default() += result.allocated_qty;
        if result.status == AllocationStatus::Future {
            assert_eq!(result.allocated_qty, 0.0);
        } else {
            // allocated + shortage reconstructs the balance
            let line = snapshot
                .sales_orders
                .iter()
                .find(|l| l.id == result.line_id)
                .unwrap();
            assert_eq!(result.allocated_qty + result.shortage_qty, line.balance_qty);
        }
    }
    assert!(allocated["item x"] <= 35.0);
    assert!(allocated["item y"] <= 5.0);

    assert_eq!(outcome.allocations["x3"].status, AllocationStatus::Future);
    assert_eq!(outcome.allocations["y2"].status, AllocationStatus::Future);
    assert_eq!(outcome.allocations["y1"].status, AllocationStatus::Partial);
}

// ==========================================
// Norms (Scenario B) and net position
// ==========================================

#[test]
fn test_norm_levels_from_velocity() {
    logging::init_test();

    // 144 units over the 12m window -> avg 12/mo; step 10
    let as_of = date(2025, 6, 15);
    let mut sales = Vec::new();
    for m in 0..12u32 {
        let d = date(2025, 6, 1)
            .checked_sub_months(chrono::Months::new(m))
            .unwrap();
        sales.push(sale("Item Y", "C1", d, 12.0, 4.0));
    }
    let snapshot = FactSnapshot {
        materials: vec![material("Item Y", "PLANNED")],
        stock: vec![stock("Item Y", 10.0, 4.0)],
        sales,
        ..Default::default()
    };

    let outcome = planned_engine(&["PLANNED"])
        .run_pass(&snapshot, as_of)
        .unwrap();
    let row = &outcome.rows[0];

    assert_eq!(row.avg_12m.qty, 12.0);
    assert_eq!(row.norms.min.qty, 20.0);
    assert_eq!(row.norms.reorder.qty, 20.0);
    assert_eq!(row.norms.max.qty, 40.0);
    // valued at the window's effective rate
    assert_eq!(row.norms.max.val, 160.0);

    // weighted demand projection: FY0 sold 36, FY-1 sold 108
    // -> annual 36x0.5 + 108x0.3 = 50.4, monthly 4.2
    assert!((row.forecast.annual_qty - 50.4).abs() < 1e-9);
    assert!((row.forecast.monthly_qty - 4.2).abs() < 1e-9);
    assert!((row.forecast.recommended_qty - 6.3).abs() < 1e-9);
}

#[test]
fn test_unplanned_group_gets_zero_norms() {
    logging::init_test();

    let as_of = date(2025, 6, 15);
    let snapshot = FactSnapshot {
        materials: vec![material("Item Y", "UNPLANNED")],
        stock: vec![stock("Item Y", 10.0, 4.0)],
        sales: vec![sale("Item Y", "C1", date(2025, 5, 1), 24.0, 4.0)],
        ..Default::default()
    };
    let outcome = planned_engine(&["PLANNED"])
        .run_pass(&snapshot, as_of)
        .unwrap();
    assert_eq!(outcome.rows[0].norms.max.qty, 0.0);
    // net position is computed regardless of the policy gate
    assert_eq!(outcome.rows[0].net.qty, 10.0);
}

#[test]
fn test_net_position_and_growth_guarantees() {
    logging::init_test();

    let as_of = date(2025, 6, 15);
    let snapshot = FactSnapshot {
        materials: vec![material("Quiet Item", "GRP")],
        stock: vec![stock("Quiet Item", 8.0, 3.0)],
        sales_orders: vec![so_line("s1", "Quiet Item", 20.0, Some(date(2025, 6, 20)))],
        purchase_orders: vec![so_line("p1", "Quiet Item", 5.0, None)],
        ..Default::default()
    };
    let outcome = PlanningEngine::with_defaults()
        .run_pass(&snapshot, as_of)
        .unwrap();
    let row = &outcome.rows[0];

    assert_eq!(row.net.qty, 8.0 + 5.0 - 20.0);
    // no sales history: growth is exactly 0, never NaN
    assert_eq!(row.growth_pct, 0.0);
    assert!(row.avg_12m.qty == 0.0);
}

// ==========================================
// ABC bands (Scenario D)
// ==========================================

#[test]
fn test_abc_bands_partition_exactly() {
    logging::init_test();

    let as_of = date(2025, 6, 15);
    let values = [100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0];
    let materials: Vec<MaterialIdentity> = (0..10)
        .map(|i| material(&format!("Item {i}"), "GRP"))
        .collect();
    let stocks: Vec<StockFact> = values
        .iter()
        .enumerate()
        .map(|(i, v)| stock(&format!("Item {i}"), *v, 1.0))
        .collect();
    let snapshot = FactSnapshot {
        materials,
        stock: stocks,
        ..Default::default()
    };

    let outcome = PlanningEngine::with_defaults()
        .run_pass(&snapshot, as_of)
        .unwrap();

    let classes: Vec<Option<AbcClass>> = outcome.rows.iter().map(|r| r.abc_class).collect();
    let expect = [
        Some(AbcClass::A),
        Some(AbcClass::A),
        Some(AbcClass::A),
        Some(AbcClass::A),
        Some(AbcClass::A),
        Some(AbcClass::B),
        Some(AbcClass::B),
        Some(AbcClass::B),
        Some(AbcClass::C),
        Some(AbcClass::C),
    ];
    assert_eq!(classes, expect);
    // every ranked item got exactly one class
    assert!(classes.iter().all(|c| c.is_some()));
}

// ==========================================
// Customer categories (Scenario C)
// ==========================================

#[test]
fn test_lost_customer_category() {
    logging::init_test();

    // as_of in FY2024 (Apr 2024 - Mar 2025): sold FY-2 and FY-1 only
    let as_of = date(2024, 9, 10);
    let snapshot = FactSnapshot {
        materials: vec![material("Item Z", "GRP")],
        sales: vec![
            sale("Item Z", "Fading Corp", date(2022, 8, 1), 5.0, 10.0),
            sale("Item Z", "Fading Corp", date(2023, 8, 1), 5.0, 10.0),
        ],
        ..Default::default()
    };
    let outcome = PlanningEngine::with_defaults()
        .run_pass(&snapshot, as_of)
        .unwrap();

    assert_eq!(outcome.customer_rows.len(), 1);
    let row = &outcome.customer_rows[0];
    assert_eq!(row.category, Some(CustomerCategory::Lost));
    assert_eq!(row.fiscal_years[0].label(), "2022-23");
    assert_eq!(row.fiscal_years[2].label(), "2024-25");
}

// ==========================================
// Movement + unmatched flags through a full pass
// ==========================================

#[test]
fn test_movement_and_unmatched_through_pass() {
    logging::init_test();

    let as_of = date(2025, 6, 15);
    let mut sales = Vec::new();
    for m in 0..10u32 {
        let d = date(2025, 6, 1)
            .checked_sub_months(chrono::Months::new(m))
            .unwrap();
        sales.push(sale("Runner", &format!("Cust {}", m % 4), d, 10.0, 2.0));
    }
    // an orphan stock line with no material
    let snapshot = FactSnapshot {
        materials: vec![material("Runner", "GRP")],
        stock: vec![stock("Runner", 20.0, 2.0), stock("Nobody", 1.0, 1.0)],
        sales,
        ..Default::default()
    };

    let outcome = PlanningEngine::with_defaults()
        .run_pass(&snapshot, as_of)
        .unwrap();

    let row = &outcome.rows[0];
    assert_eq!(row.movement_class, MovementClass::FastRunner);
    assert_eq!(row.active_months, 10);
    assert_eq!(row.customer_count, 4);

    assert!(outcome.unmatched.any());
    assert_eq!(outcome.unmatched.stock, 1);
}
