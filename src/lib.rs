// ==========================================
// Inventory Planning Engine - Core Library
// ==========================================
// Decision-support engine for spares inventory: stock commitment,
// velocity-based norms, movement and ABC classification, customer
// fiscal-year analysis. Planners keep final control; the engine only
// computes signals.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - facts, derived rows, shared types
pub mod domain;

// Engine layer - computation cores and the pass orchestrator
pub mod engine;

// Configuration layer - planning thresholds
pub mod config;

// Error types
pub mod error;

// Logging setup
pub mod logging;

// ==========================================
// Re-exports of core types
// ==========================================

// Domain types
pub use domain::types::{
    AbcClass, AllocationStatus, CustomerCategory, MovementClass, StockStrategy,
};

// Domain entities
pub use domain::{
    ActionSignals, AllocationResult, CustomerYearRow, DemandForecast, FactSnapshot, FiscalYear,
    MaterialIdentity, OpenOrderLine, PlanningOutcome, PlanningRow, QtyVal, SalesTransaction,
    StockFact, StockNorms, UnmatchedSummary,
};

// Engine
pub use engine::{
    AbcCore, ActionCore, CustomerCore, FifoAllocator, ItemIndex, MovementCore, NormCore,
    PlanningEngine, VelocityCore,
};

// Configuration & errors
pub use config::PlanningConfig;
pub use error::{PlanningError, PlanningResult};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Inventory Planning Engine";
