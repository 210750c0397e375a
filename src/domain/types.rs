// ==========================================
// Inventory Planning Engine - Domain Types
// ==========================================
// Classification results are categorical, not scored.
// Serialization format: SCREAMING_SNAKE_CASE (stable for export consumers)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// AbcClass - cumulative-value segmentation
// ==========================================
// A: items covering the first 70% of stock value
// B: items covering the next 20%
// C: the tail
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbcClass::A => write!(f, "A"),
            AbcClass::B => write!(f, "B"),
            AbcClass::C => write!(f, "C"),
        }
    }
}

// ==========================================
// MovementClass - demand-frequency category
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementClass {
    FastRunner, // frequent, regular demand
    SlowRunner, // intermittent demand
    NonMoving,  // no sale in the rolling window
}

impl fmt::Display for MovementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementClass::FastRunner => write!(f, "FAST_RUNNER"),
            MovementClass::SlowRunner => write!(f, "SLOW_RUNNER"),
            MovementClass::NonMoving => write!(f, "NON_MOVING"),
        }
    }
}

// ==========================================
// StockStrategy - stocking policy
// ==========================================
// Derived from customer breadth and movement class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStrategy {
    GeneralStock, // pre-stocked for the general market
    AgainstOrder, // stocked against confirmed customer orders
    MadeToOrder,  // never pre-stocked
}

impl fmt::Display for StockStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStrategy::GeneralStock => write!(f, "GENERAL_STOCK"),
            StockStrategy::AgainstOrder => write!(f, "AGAINST_ORDER"),
            StockStrategy::MadeToOrder => write!(f, "MADE_TO_ORDER"),
        }
    }
}

// ==========================================
// AllocationStatus - FIFO allocation outcome
// ==========================================
// Future lines never compete for current stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStatus {
    Future,  // due after the cutoff, allocated 0
    Full,    // shortage = 0
    Partial, // 0 < shortage < balance
    None,    // shortage = balance
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStatus::Future => write!(f, "FUTURE"),
            AllocationStatus::Full => write!(f, "FULL"),
            AllocationStatus::Partial => write!(f, "PARTIAL"),
            AllocationStatus::None => write!(f, "NONE"),
        }
    }
}

// ==========================================
// CustomerCategory - year-over-year category
// ==========================================
// Evaluated over three consecutive fiscal years FY-2, FY-1, FY0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerCategory {
    Repeat,  // sold in FY0 and FY-1
    New,     // sold in FY0 only
    Rebuild, // sold in FY0 and FY-2, skipped FY-1
    Lost,    // sold in FY-2 and FY-1, gone in FY0
}

impl fmt::Display for CustomerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerCategory::Repeat => write!(f, "REPEAT"),
            CustomerCategory::New => write!(f, "NEW"),
            CustomerCategory::Rebuild => write!(f, "REBUILD"),
            CustomerCategory::Lost => write!(f, "LOST"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_format_matches_display() {
        let json = serde_json::to_string(&MovementClass::FastRunner).unwrap();
        assert_eq!(json, "\"FAST_RUNNER\"");
        assert_eq!(MovementClass::FastRunner.to_string(), "FAST_RUNNER");
    }

    #[test]
    fn test_abc_ordering() {
        assert!(AbcClass::A < AbcClass::B);
        assert!(AbcClass::B < AbcClass::C);
    }
}
