//! Arithmetic identities of the budget allocator
//!
//! These tests sweep realistic budget/day combinations and check the
//! relations that must hold between the figures, rather than pinning
//! individual numbers.

use rstest::rstest;

use tripsmith::budget::allocate;
use tripsmith::models::{BudgetBreakdown, RemainingBudget, TransportMode};

fn per_day_sum(breakdown: &BudgetBreakdown) -> u64 {
    breakdown.hotel_per_day
        + breakdown.local_transport_per_day
        + breakdown.food_per_day
        + breakdown.misc_per_day
}

/// The total is always the transport figure plus `days` times the
/// per-day figures, with no hidden adjustment.
#[rstest]
#[case(1000, 1)]
#[case(10000, 5)]
#[case(25000, 7)]
#[case(99999, 14)]
#[case(500000, 30)]
fn test_total_is_transport_plus_days_times_daily(#[case] budget: u64, #[case] days: u32) {
    for mode in TransportMode::ALL {
        let breakdown = allocate(budget, days, mode, 320.0);
        assert_eq!(
            breakdown.total,
            breakdown.transport + u64::from(days) * per_day_sum(&breakdown),
            "total mismatch for {mode} with budget {budget} over {days} days"
        );
        assert!(breakdown.total >= breakdown.transport);
    }
}

/// Whichever side of the budget the total lands on, the remaining
/// figure accounts for the difference exactly.
#[rstest]
#[case(TransportMode::Flight, 12000, 4, 0.0)]
#[case(TransportMode::Train, 3500, 2, 0.0)]
#[case(TransportMode::Bus, 800, 6, 0.0)]
#[case(TransportMode::Car, 15000, 3, 410.5)]
#[case(TransportMode::Car, 2000, 2, 900.0)]
#[case(TransportMode::Bike, 1200, 10, 75.3)]
fn test_remaining_balances_against_budget(
    #[case] mode: TransportMode,
    #[case] budget: u64,
    #[case] days: u32,
    #[case] distance_km: f64,
) {
    let breakdown = allocate(budget, days, mode, distance_km);
    match breakdown.remaining {
        RemainingBudget::Within { amount } => {
            assert_eq!(breakdown.total + amount, budget);
        }
        RemainingBudget::OverBudget { shortfall } => {
            assert_eq!(budget + shortfall, breakdown.total);
            assert!(shortfall > 0);
        }
    }
}

/// Per-day figures depend only on the budget and day count, never on
/// the transport mode or the distance.
#[test]
fn test_daily_figures_independent_of_mode() {
    let reference = allocate(20000, 6, TransportMode::Flight, 0.0);
    for mode in TransportMode::ALL {
        let breakdown = allocate(20000, 6, mode, 1234.5);
        assert_eq!(breakdown.hotel_per_day, reference.hotel_per_day);
        assert_eq!(
            breakdown.local_transport_per_day,
            reference.local_transport_per_day
        );
        assert_eq!(breakdown.food_per_day, reference.food_per_day);
        assert_eq!(breakdown.misc_per_day, reference.misc_per_day);
    }
}

/// Distance scales the transport figure linearly for the per-km modes.
#[rstest]
#[case(TransportMode::Car, 6)]
#[case(TransportMode::Bike, 2)]
fn test_per_km_modes_scale_with_distance(#[case] mode: TransportMode, #[case] rate: u64) {
    let short = allocate(50000, 5, mode, 100.0);
    let long = allocate(50000, 5, mode, 400.0);
    assert_eq!(short.transport, 100 * rate);
    assert_eq!(long.transport, 400 * rate);
    // Only the transport figure moved; the daily spend is untouched.
    assert_eq!(long.total - long.transport, short.total - short.transport);
}

/// Spreading the same budget over more days shrinks each daily figure
/// while the transport share stays fixed.
#[test]
fn test_daily_figures_shrink_as_days_grow() {
    let short = allocate(30000, 3, TransportMode::Train, 500.0);
    let long = allocate(30000, 6, TransportMode::Train, 500.0);
    assert_eq!(short.transport, long.transport);
    assert_eq!(short.hotel_per_day, long.hotel_per_day * 2);
    // The divisions are exact here, so the daily spend re-multiplies
    // to the same total.
    assert_eq!(short.total, long.total);
}

/// A small budget stretched over a long trip produces small but valid
/// figures, never an error.
#[test]
fn test_small_budget_long_trip_never_errors() {
    let breakdown = allocate(1000, 10, TransportMode::Bus, 60.0);
    assert_eq!(breakdown.transport, 100);
    assert_eq!(breakdown.hotel_per_day, 20);
    assert_eq!(breakdown.local_transport_per_day, 10);
    assert_eq!(breakdown.food_per_day, 15);
    assert_eq!(breakdown.misc_per_day, 10);
    assert_eq!(breakdown.total, 100 + 10 * 55);
    assert_eq!(breakdown.remaining, RemainingBudget::Within { amount: 350 });
}

/// A zero budget is allowed and produces an all-zero breakdown for the
/// share modes.
#[test]
fn test_zero_budget_share_mode_is_all_zero() {
    let breakdown = allocate(0, 5, TransportMode::Bus, 250.0);
    assert_eq!(breakdown.transport, 0);
    assert_eq!(per_day_sum(&breakdown), 0);
    assert_eq!(breakdown.total, 0);
    assert_eq!(breakdown.remaining, RemainingBudget::Within { amount: 0 });
}

/// Even with a zero budget, the per-km modes still charge for the
/// distance and flag the shortfall.
#[test]
fn test_zero_budget_still_charges_per_km_distance() {
    let breakdown = allocate(0, 1, TransportMode::Bike, 10.0);
    assert_eq!(breakdown.transport, 20);
    assert_eq!(
        breakdown.remaining,
        RemainingBudget::OverBudget { shortfall: 20 }
    );
}
