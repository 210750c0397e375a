// ==========================================
// Inventory Planning Engine - Fact Model
// ==========================================
// Raw facts consumed from the data-loading collaborator.
// Note: numeric coercion of malformed fields happens upstream;
// the engine performs no validation of its own.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Normalized item/customer key: trimmed, lowercased.
///
/// Every lookup in the engine goes through this; raw strings are never
/// compared directly.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ==========================================
// MaterialIdentity - material master record
// ==========================================
// Identity key = normalize(description); secondary key = normalize(part_no).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialIdentity {
    pub description: String,    // primary identity (free text)
    pub part_no: String,        // secondary identity, may be empty
    pub make: String,           // manufacturer / brand
    pub material_group: String, // planning policy group
}

impl MaterialIdentity {
    pub fn description_key(&self) -> String {
        normalize_key(&self.description)
    }

    pub fn part_no_key(&self) -> String {
        normalize_key(&self.part_no)
    }
}

// ==========================================
// StockFact - closing stock line
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockFact {
    pub item: String,  // item description as imported
    pub quantity: f64, // on-hand quantity
    pub rate: f64,     // unit valuation rate
    pub value: f64,    // extended value
}

impl StockFact {
    pub fn item_key(&self) -> String {
        normalize_key(&self.item)
    }
}

// ==========================================
// OpenOrderLine - pending SO or PO line
// ==========================================
// Invariant (enforced upstream): balance_qty <= ordered_qty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenOrderLine {
    pub id: String,                   // stable line id, allocation result key
    pub item: String,                 // item description as imported
    pub customer: String,             // party name (supplier for PO lines)
    pub order_no: String,             // source document number
    pub ordered_qty: f64,             // originally ordered quantity
    pub balance_qty: f64,             // still-open quantity
    pub rate: f64,                    // line rate
    pub value: f64,                   // line value as imported (carried, not derived)
    pub due_date: Option<NaiveDate>,  // promised date, may be absent
    pub order_date: Option<NaiveDate>, // entry date
}

impl OpenOrderLine {
    pub fn item_key(&self) -> String {
        normalize_key(&self.item)
    }

    /// Open value of the line: balance x rate.
    pub fn balance_value(&self) -> f64 {
        self.balance_qty * self.rate
    }
}

// ==========================================
// SalesTransaction - immutable sales history row
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTransaction {
    pub item: String,                // particulars (description or part number)
    pub customer: String,            // customer name, may be empty
    pub date: Option<NaiveDate>,     // invoice date; undated rows never enter windows
    pub quantity: f64,
    pub value: f64,
    pub voucher_no: Option<String>,  // free text, scanned for project keywords
    pub voucher_ref: Option<String>, // free text, scanned for project keywords
}

impl SalesTransaction {
    pub fn item_key(&self) -> String {
        normalize_key(&self.item)
    }

    pub fn customer_key(&self) -> String {
        normalize_key(&self.customer)
    }
}

// ==========================================
// FactSnapshot - one consistent input snapshot
// ==========================================
// Loaded once per pass; all derived rows are pure functions of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactSnapshot {
    pub materials: Vec<MaterialIdentity>,
    pub stock: Vec<StockFact>,
    pub sales_orders: Vec<OpenOrderLine>,
    pub purchase_orders: Vec<OpenOrderLine>,
    pub sales: Vec<SalesTransaction>,
}
