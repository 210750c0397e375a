// ==========================================
// Inventory Planning Engine - Fiscal Year
// ==========================================
// Boundary: April 1 - March 31
// Label: "YYYY-YY+1" (e.g. 2024-25 runs Apr 2024 .. Mar 2025)
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fiscal year, identified by its starting calendar year.
///
/// # Rules
/// - month >= April -> the date belongs to FY(year)
/// - month < April  -> the date belongs to FY(year - 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalYear(pub i32);

impl FiscalYear {
    /// Fiscal year containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        if date.month() >= 4 {
            FiscalYear(date.year())
        } else {
            FiscalYear(date.year() - 1)
        }
    }

    /// Fiscal year shifted by `years` (negative = earlier).
    pub fn offset(self, years: i32) -> Self {
        FiscalYear(self.0 + years)
    }

    /// Label in "YYYY-YY+1" form, e.g. "2024-25".
    pub fn label(self) -> String {
        format!("{}-{:02}", self.0, (self.0 + 1) % 100)
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
