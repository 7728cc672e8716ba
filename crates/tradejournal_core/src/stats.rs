//! Statistics engine
//!
//! [`compute`] is a total function over any entry collection, the empty one
//! included. It always recomputes everything from scratch; at realistic
//! journal sizes (thousands of entries) one O(n log n) pass per append is
//! negligible.

use crate::config::AccountConfig;
use crate::model::{EntryKind, JournalEntry, TradingStats};

/// Signed streak counter.
///
/// Positive values are winning runs, negative values losing runs, zero means
/// no run has started. Flat days do not reach the tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakTracker {
    pub current: i32,
    pub best: i32,
    pub worst: i32,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_win(&mut self) {
        self.current = if self.current >= 0 {
            self.current + 1
        } else {
            1
        };
        self.best = self.best.max(self.current);
    }

    pub fn record_loss(&mut self) {
        self.current = if self.current <= 0 {
            self.current - 1
        } else {
            -1
        };
        self.worst = self.worst.min(self.current);
    }

    /// Feed one trading day. A flat day leaves the counter untouched.
    pub fn record(&mut self, pnl: f64) {
        if pnl > 0.0 {
            self.record_win();
        } else if pnl < 0.0 {
            self.record_loss();
        }
    }
}

/// Derive the statistics snapshot for an entry collection.
pub fn compute(entries: &[JournalEntry], config: &AccountConfig) -> TradingStats {
    // Stable sort: same-date entries keep their insertion order
    let mut trading_days: Vec<(jiff::civil::Date, f64)> = entries
        .iter()
        .filter_map(|e| e.pnl().map(|pnl| (e.date, pnl)))
        .collect();
    trading_days.sort_by_key(|(date, _)| *date);

    let mut wins = 0;
    let mut losses = 0;
    let mut streaks = StreakTracker::new();

    for &(_, pnl) in &trading_days {
        if pnl > 0.0 {
            wins += 1;
        } else if pnl < 0.0 {
            losses += 1;
        }
        streaks.record(pnl);
    }

    let cumulative_pnl = order_independent_sum(trading_days.iter().map(|&(_, pnl)| pnl));

    let payouts: Vec<f64> = entries
        .iter()
        .filter_map(|e| match e.kind {
            EntryKind::Payout { amount } => Some(amount),
            EntryKind::Trade { .. } => None,
        })
        .collect();
    let payout_count = payouts.len();
    let total_payouts = order_independent_sum(payouts);

    let day_count = trading_days.len();
    let current_balance = config.initial_balance + cumulative_pnl - total_payouts;
    let (win_rate, daily_average) = if day_count > 0 {
        (
            wins as f64 / day_count as f64 * 100.0,
            cumulative_pnl / day_count as f64,
        )
    } else {
        (0.0, 0.0)
    };

    let remaining_to_goal = config.profit_goal - total_payouts;

    TradingStats {
        current_balance,
        cumulative_pnl,
        win_rate,
        daily_average,
        projected_days_to_goal: project_days_to_goal(remaining_to_goal, daily_average),
        best_streak: streaks.best,
        worst_streak: streaks.worst,
        total_payouts,
        profit_goal_progress: goal_progress(total_payouts, config.profit_goal),
        remaining_to_goal,
        trading_days: day_count,
        wins,
        losses,
        payout_count,
    }
}

/// Sum in ascending value order so the result does not depend on the order
/// entries were appended in
pub fn order_independent_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Days needed at the current daily average, rounded up.
///
/// No projection for a zero or negative average. Once the goal is already
/// covered the projection is zero rather than negative.
pub fn project_days_to_goal(remaining_to_goal: f64, daily_average: f64) -> Option<i64> {
    if daily_average > 0.0 {
        Some(((remaining_to_goal / daily_average).ceil() as i64).max(0))
    } else {
        None
    }
}

/// Payout progress toward the goal as a 0-100 percentage
pub fn goal_progress(total_payouts: f64, profit_goal: f64) -> f64 {
    if profit_goal <= 0.0 {
        return 100.0;
    }
    (total_payouts / profit_goal * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_tracker_transitions() {
        let mut tracker = StreakTracker::new();
        tracker.record(5.0);
        tracker.record(5.0);
        assert_eq!(tracker.current, 2);

        tracker.record(0.0);
        assert_eq!(tracker.current, 2);

        tracker.record(-1.0);
        assert_eq!(tracker.current, -1);
        tracker.record(-1.0);
        assert_eq!(tracker.current, -2);

        tracker.record(1.0);
        assert_eq!(tracker.current, 1);
        assert_eq!(tracker.best, 2);
        assert_eq!(tracker.worst, -2);
    }

    #[test]
    fn test_project_days_to_goal() {
        assert_eq!(project_days_to_goal(4_500.0, 500.0), Some(9));
        assert_eq!(project_days_to_goal(4_501.0, 500.0), Some(10));
        assert_eq!(project_days_to_goal(4_500.0, 0.0), None);
        assert_eq!(project_days_to_goal(4_500.0, -20.0), None);
        assert_eq!(project_days_to_goal(-5_000.0, 500.0), Some(0));
    }

    #[test]
    fn test_goal_progress_clamps() {
        assert_eq!(goal_progress(0.0, 20_000.0), 0.0);
        assert_eq!(goal_progress(5_000.0, 20_000.0), 25.0);
        assert_eq!(goal_progress(25_000.0, 20_000.0), 100.0);
        assert_eq!(goal_progress(10.0, 0.0), 100.0);
    }
}
