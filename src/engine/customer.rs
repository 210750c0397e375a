// ==========================================
// Inventory Planning Engine - Customer Fiscal-Year Analysis
// ==========================================
// Rolls sales up per customer across the three most recent fiscal
// years (April to March) and tags each customer's trajectory.
// "Sold" means positive value in the year; quantity alone does not
// count.
// ==========================================

use crate::domain::{
    normalize_key, CustomerCategory, CustomerYearRow, FiscalYear, QtyVal, SalesTransaction,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Display name used for rows whose customer field is empty.
const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Pure customer-analysis core.
pub struct CustomerCore;

impl CustomerCore {
    /// Group sales by customer and fiscal year, then categorize.
    ///
    /// # Rules
    /// 1. the window is [FY-2, FY-1, FY0] where FY0 contains `as_of`;
    ///    sales outside it are ignored
    /// 2. customers key by normalized name; the first raw spelling
    ///    seen becomes the display name, empty names share one
    ///    "Unknown Customer" bucket
    /// 3. REPEAT = sold FY0 and FY-1; NEW = sold FY0 only;
    ///    REBUILD = sold FY0 and FY-2 but not FY-1;
    ///    LOST = sold FY-2 and FY-1 but not FY0; anything else is
    ///    uncategorized
    /// 4. growth compares FY0 value to FY-1 value; 100 when FY-1 is 0
    ///    and FY0 is positive
    /// 5. share = FY0 value over the FY0 total across all customers
    pub fn categorize(sales: &[SalesTransaction], as_of: NaiveDate) -> Vec<CustomerYearRow> {
        let fy0 = FiscalYear::of(as_of);
        let years = [fy0.offset(-2), fy0.offset(-1), fy0];

        struct Bucket {
            display: String,
            totals: [QtyVal; 3],
        }

        let mut buckets: HashMap<String, Bucket> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for txn in sales {
            let Some(date) = txn.date else { continue };
            let fy = FiscalYear::of(date);
            let Some(slot) = years.iter().position(|y| *y == fy) else {
                continue;
            };

            let key = txn.customer_key();
            let display = if key.is_empty() {
                UNKNOWN_CUSTOMER.to_string()
            } else {
                txn.customer.trim().to_string()
            };
            let key = if key.is_empty() {
                normalize_key(UNKNOWN_CUSTOMER)
            } else {
                key
            };

            let bucket = buckets.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Bucket {
                    display,
                    totals: [QtyVal::default(); 3],
                }
            });
            bucket.totals[slot].add(txn.quantity, txn.value);
        }

        let fy0_total: f64 = buckets.values().map(|b| b.totals[2].val).sum();

        let mut rows: Vec<CustomerYearRow> = order
            .into_iter()
            .map(|key| {
                let bucket = &buckets[&key];
                let totals = bucket.totals;
                let sold = [
                    totals[0].val > 0.0,
                    totals[1].val > 0.0,
                    totals[2].val > 0.0,
                ];
                let category = Self::categorize_one(sold);

                let growth_pct = if totals[1].val > 0.0 {
                    (totals[2].val - totals[1].val) / totals[1].val * 100.0
                } else if totals[2].val > 0.0 {
                    100.0
                } else {
                    0.0
                };

                let share_pct = if fy0_total > 0.0 {
                    totals[2].val / fy0_total * 100.0
                } else {
                    0.0
                };

                CustomerYearRow {
                    customer: bucket.display.clone(),
                    fiscal_years: years,
                    totals,
                    category,
                    growth_pct,
                    share_pct,
                }
            })
            .collect();

        rows.sort_by(|a, b| a.customer.to_lowercase().cmp(&b.customer.to_lowercase()));
        rows
    }

    // sold = [FY-2, FY-1, FY0]
    fn categorize_one(sold: [bool; 3]) -> Option<CustomerCategory> {
        match sold {
            [_, true, true] => Some(CustomerCategory::Repeat),
            [false, false, true] => Some(CustomerCategory::New),
            [true, false, true] => Some(CustomerCategory::Rebuild),
            [true, true, false] => Some(CustomerCategory::Lost),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(customer: &str, d: NaiveDate, qty: f64, val: f64) -> SalesTransaction {
        SalesTransaction {
            item: "Bearing".to_string(),
            customer: customer.to_string(),
            date: Some(d),
            quantity: qty,
            value: val,
            voucher_no: None,
            voucher_ref: None,
        }
    }

    #[test]
    fn test_categories_across_three_years() {
        // as_of 2025-06-15 -> FY0 = 2025 (Apr 2025 - Mar 2026)
        let as_of = date(2025, 6, 15);
        let sales = vec![
            // Repeat: FY-1 and FY0
            sale("Alpha", date(2024, 7, 1), 1.0, 100.0),
            sale("Alpha", date(2025, 5, 1), 1.0, 150.0),
            // New: FY0 only
            sale("Beta", date(2025, 4, 2), 1.0, 50.0),
            // Rebuild: FY-2 and FY0, skipped FY-1
            sale("Gamma", date(2023, 8, 1), 1.0, 70.0),
            sale("Gamma", date(2026, 3, 31), 1.0, 20.0),
            // Lost: FY-2 and FY-1, nothing in FY0
            sale("Delta", date(2023, 6, 1), 1.0, 40.0),
            sale("Delta", date(2024, 6, 1), 1.0, 45.0),
        ];
        let rows = CustomerCore::categorize(&sales, as_of);
        assert_eq!(rows.len(), 4);

        let by_name: HashMap<&str, &CustomerYearRow> =
            rows.iter().map(|r| (r.customer.as_str(), r)).collect();
        assert_eq!(by_name["Alpha"].category, Some(CustomerCategory::Repeat));
        assert_eq!(by_name["Beta"].category, Some(CustomerCategory::New));
        assert_eq!(by_name["Gamma"].category, Some(CustomerCategory::Rebuild));
        assert_eq!(by_name["Delta"].category, Some(CustomerCategory::Lost));
    }

    #[test]
    fn test_growth_and_share() {
        let as_of = date(2025, 6, 15);
        let sales = vec![
            sale("Alpha", date(2024, 7, 1), 1.0, 100.0),
            sale("Alpha", date(2025, 5, 1), 1.0, 150.0),
            sale("Beta", date(2025, 4, 2), 1.0, 50.0),
        ];
        let rows = CustomerCore::categorize(&sales, as_of);
        let by_name: HashMap<&str, &CustomerYearRow> =
            rows.iter().map(|r| (r.customer.as_str(), r)).collect();

        assert_eq!(by_name["Alpha"].growth_pct, 50.0);
        // no FY-1 value, positive FY0 -> pegged at 100
        assert_eq!(by_name["Beta"].growth_pct, 100.0);
        assert_eq!(by_name["Alpha"].share_pct, 75.0);
        assert_eq!(by_name["Beta"].share_pct, 25.0);
    }

    #[test]
    fn test_unknown_customers_share_one_bucket() {
        let as_of = date(2025, 6, 15);
        let sales = vec![
            sale("  ", date(2025, 5, 1), 1.0, 10.0),
            sale("", date(2025, 5, 2), 2.0, 20.0),
        ];
        let rows = CustomerCore::categorize(&sales, as_of);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer, UNKNOWN_CUSTOMER);
        assert_eq!(rows[0].totals[2], QtyVal::new(3.0, 30.0));
    }

    #[test]
    fn test_out_of_window_sales_ignored() {
        let as_of = date(2025, 6, 15);
        let sales = vec![
            sale("Old", date(2022, 5, 1), 1.0, 10.0), // FY2022, before FY-2
            sale("Alpha", date(2025, 5, 1), 1.0, 10.0),
        ];
        let rows = CustomerCore::categorize(&sales, as_of);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer, "Alpha");
    }

    #[test]
    fn test_same_customer_case_insensitive() {
        let as_of = date(2025, 6, 15);
        let sales = vec![
            sale("ACME Ltd", date(2025, 5, 1), 1.0, 10.0),
            sale("acme ltd ", date(2025, 5, 2), 1.0, 15.0),
        ];
        let rows = CustomerCore::categorize(&sales, as_of);
        assert_eq!(rows.len(), 1);
        // first spelling wins
        assert_eq!(rows[0].customer, "ACME Ltd");
        assert_eq!(rows[0].totals[2].val, 25.0);
    }
}
