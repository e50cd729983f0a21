//! Fixed-ratio budget allocation
//!
//! Splits a trip budget into transport and per-day costs using literal
//! ratios. Every figure is truncated to whole currency units before the
//! total is summed, so a breakdown never owes its value to rounding order.

use crate::models::{BudgetBreakdown, RemainingBudget, TransportMode};

/// Budget share spent on a flight ticket
const FLIGHT_BUDGET_SHARE: f64 = 0.3;
/// Budget share spent on a train ticket
const TRAIN_BUDGET_SHARE: f64 = 0.15;
/// Budget share spent on a bus ticket
const BUS_BUDGET_SHARE: f64 = 0.1;
/// Cost per kilometer when driving
const CAR_COST_PER_KM: f64 = 6.0;
/// Cost per kilometer when cycling
const BIKE_COST_PER_KM: f64 = 2.0;

/// Budget share for the hotel, spread over the trip
const HOTEL_SHARE: f64 = 0.2;
/// Budget share for local transport, spread over the trip
const LOCAL_TRANSPORT_SHARE: f64 = 0.1;
/// Budget share for food, spread over the trip
const FOOD_SHARE: f64 = 0.15;
/// Budget share for everything else, spread over the trip
const MISC_SHARE: f64 = 0.1;

/// Split `budget` across transport and daily costs for a trip of `days`
/// days. Callers validate `days >= 1` before reaching this point.
///
/// Flight/Train/Bus cost a share of the budget; Car and Bike cost a flat
/// rate per kilometer, so `distance_km` only matters for those two modes.
#[must_use]
pub fn allocate(budget: u64, days: u32, mode: TransportMode, distance_km: f64) -> BudgetBreakdown {
    let budget_f = budget as f64;
    let days_f = f64::from(days);

    let transport = match mode {
        TransportMode::Flight => budget_f * FLIGHT_BUDGET_SHARE,
        TransportMode::Train => budget_f * TRAIN_BUDGET_SHARE,
        TransportMode::Bus => budget_f * BUS_BUDGET_SHARE,
        TransportMode::Car => distance_km * CAR_COST_PER_KM,
        TransportMode::Bike => distance_km * BIKE_COST_PER_KM,
    } as u64;

    let hotel_per_day = (budget_f * HOTEL_SHARE / days_f) as u64;
    let local_transport_per_day = (budget_f * LOCAL_TRANSPORT_SHARE / days_f) as u64;
    let food_per_day = (budget_f * FOOD_SHARE / days_f) as u64;
    let misc_per_day = (budget_f * MISC_SHARE / days_f) as u64;

    let total = transport
        + u64::from(days) * (hotel_per_day + local_transport_per_day + food_per_day + misc_per_day);

    BudgetBreakdown {
        transport,
        hotel_per_day,
        local_transport_per_day,
        food_per_day,
        misc_per_day,
        total,
        remaining: RemainingBudget::from_totals(budget, total),
    }
}
