use serde::{Deserialize, Serialize};

/// Derived statistics snapshot.
///
/// Always rebuilt from the full entry collection by [`crate::compute`];
/// never updated incrementally and never the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingStats {
    /// Initial balance + cumulative P/L - total payouts
    pub current_balance: f64,
    /// Sum of trading-day P/L, payouts excluded
    #[serde(rename = "cumulativePnL")]
    pub cumulative_pnl: f64,
    /// Winning days as a percentage (0-100) of all trading days
    pub win_rate: f64,
    /// Cumulative P/L divided by the number of trading days
    pub daily_average: f64,
    /// Trading days needed to close the remaining gap at the daily average.
    /// `None` when the average is zero or negative.
    pub projected_days_to_goal: Option<i64>,
    /// Longest run of winning days (non-negative)
    pub best_streak: i32,
    /// Longest run of losing days, reported as a non-positive number
    pub worst_streak: i32,
    pub total_payouts: f64,
    /// Payouts as a percentage of the goal, clamped to 0-100
    pub profit_goal_progress: f64,
    /// Goal minus total payouts; negative once the goal is exceeded
    pub remaining_to_goal: f64,
    pub trading_days: usize,
    pub wins: usize,
    pub losses: usize,
    pub payout_count: usize,
}

impl TradingStats {
    /// Trading days that were neither a win nor a loss
    pub fn flat_days(&self) -> usize {
        self.trading_days - self.wins - self.losses
    }
}
