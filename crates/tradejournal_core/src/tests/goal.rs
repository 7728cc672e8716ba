//! Tests for the one-shot goal celebration
//!
//! These tests verify that:
//! - The transition fires exactly on the append that crosses the goal
//! - Further payouts above the goal do not fire again
//! - The re-arm policy clears the flag below the goal only when enabled

use super::payout;
use crate::config::AccountConfig;
use crate::goal::{CelebrationState, GoalTransition};
use crate::stats::compute;
use crate::store::EntryStore;

#[test]
fn test_fires_once_when_crossing_goal() {
    let config = AccountConfig::default();
    let mut store = EntryStore::new();
    let mut state = CelebrationState::default();

    let stats = compute(store.append(payout("p1", 1, 19_000.0)), &config);
    assert_eq!(state.observe(stats.total_payouts, &config, true), None);
    assert!(!state.is_celebrated());

    let stats = compute(store.append(payout("p2", 2, 2_000.0)), &config);
    assert_eq!(stats.total_payouts, 21_000.0);
    assert_eq!(
        state.observe(stats.total_payouts, &config, true),
        Some(GoalTransition::Reached)
    );
    assert!(state.is_celebrated());

    let stats = compute(store.append(payout("p3", 3, 500.0)), &config);
    assert_eq!(state.observe(stats.total_payouts, &config, true), None);
    assert!(state.is_celebrated());
}

#[test]
fn test_exact_goal_counts_as_reached() {
    let config = AccountConfig::default();
    let mut state = CelebrationState::NotCelebrated;
    assert_eq!(
        state.observe(20_000.0, &config, true),
        Some(GoalTransition::Reached)
    );
}

#[test]
fn test_rearm_below_goal() {
    let config = AccountConfig::default();
    let mut state = CelebrationState::from_flag(true);

    assert_eq!(
        state.observe(12_000.0, &config, true),
        Some(GoalTransition::Rearmed)
    );
    assert_eq!(state, CelebrationState::NotCelebrated);

    // Crossing again celebrates again
    assert_eq!(
        state.observe(20_500.0, &config, true),
        Some(GoalTransition::Reached)
    );
}

#[test]
fn test_no_rearm_when_policy_disabled() {
    let config = AccountConfig::default();
    let mut state = CelebrationState::from_flag(true);

    assert_eq!(state.observe(12_000.0, &config, false), None);
    assert!(state.is_celebrated());
}

#[test]
fn test_below_goal_without_flag_is_noop() {
    let config = AccountConfig::default();
    let mut state = CelebrationState::NotCelebrated;
    assert_eq!(state.observe(0.0, &config, true), None);
    assert_eq!(state.observe(19_999.0, &config, false), None);
}
