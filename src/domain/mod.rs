// ==========================================
// Inventory Planning Engine - Domain Layer
// ==========================================
// Facts in, derived rows out. No behavior beyond key
// normalization and aggregate arithmetic lives here.
// ==========================================

pub mod fiscal;
pub mod material;
pub mod planning;
pub mod types;

pub use fiscal::FiscalYear;
pub use material::{
    normalize_key, FactSnapshot, MaterialIdentity, OpenOrderLine, SalesTransaction, StockFact,
};
pub use planning::{
    ActionSignals, AllocationResult, CustomerYearRow, DemandForecast, PlanningOutcome,
    PlanningRow, QtyVal, StockNorms, UnmatchedSummary,
};
pub use types::{AbcClass, AllocationStatus, CustomerCategory, MovementClass, StockStrategy};
