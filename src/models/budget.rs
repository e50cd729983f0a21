//! Budget breakdown models

use serde::{Deserialize, Serialize};

/// Fixed-ratio cost breakdown for a trip. All figures are whole currency
/// units produced by truncating the fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    /// One-off transport cost for the whole trip
    pub transport: u64,
    /// Hotel cost per day
    pub hotel_per_day: u64,
    /// Local transport cost per day
    pub local_transport_per_day: u64,
    /// Food cost per day
    pub food_per_day: u64,
    /// Miscellaneous cost per day
    pub misc_per_day: u64,
    /// Transport plus all per-day figures times the trip length
    pub total: u64,
    /// What is left of the budget after the total
    pub remaining: RemainingBudget,
}

/// Budget remainder. A trip that costs more than its budget reports the
/// shortfall explicitly instead of a negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemainingBudget {
    Within { amount: u64 },
    OverBudget { shortfall: u64 },
}

impl RemainingBudget {
    #[must_use]
    pub fn from_totals(budget: u64, total: u64) -> Self {
        if total > budget {
            Self::OverBudget {
                shortfall: total - budget,
            }
        } else {
            Self::Within {
                amount: budget - total,
            }
        }
    }

    #[must_use]
    pub fn is_over_budget(self) -> bool {
        matches!(self, Self::OverBudget { .. })
    }
}
