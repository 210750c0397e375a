// ==========================================
// Inventory Planning Engine - Error Types
// ==========================================
// Tool: thiserror derive macro
// Note: data-quality issues are NOT errors; they degrade to
// zero-valued aggregates plus unmatched counters (see UnmatchedSummary).
// Errors here mean the engine was misconfigured, not misfed.
// ==========================================

use thiserror::Error;

/// Engine error type.
#[derive(Error, Debug)]
pub enum PlanningError {
    // ===== Configuration errors =====
    #[error("non-positive rounding step: {0}")]
    InvalidRoundingStep(f64),

    #[error("ABC bands out of order: a_share={a_share}, b_share={b_share} (need 0 < a <= b <= 1)")]
    InvalidAbcBands { a_share: f64, b_share: f64 },

    #[error("stock multipliers out of order: min={min}, reorder={reorder}, max={max}")]
    InvalidMultipliers { min: f64, reorder: f64, max: f64 },

    #[error("share threshold out of range (field={field}): {value}")]
    ShareOutOfRange { field: &'static str, value: f64 },

    #[error("negative forecast weight in {0:?}")]
    InvalidForecastWeights([f64; 3]),

    #[error("negative forecast stock multiplier: {0}")]
    InvalidForecastMultiplier(f64),
}

/// Result type alias.
pub type PlanningResult<T> = Result<T, PlanningError>;
