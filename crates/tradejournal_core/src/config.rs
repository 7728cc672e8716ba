//! Account parameters the statistics engine is evaluated against.

use serde::{Deserialize, Serialize};

/// Starting balance of a standard 50K funded account
pub const DEFAULT_INITIAL_BALANCE: f64 = 50_000.0;

/// Cumulative payouts that count as "goal reached"
pub const DEFAULT_PROFIT_GOAL: f64 = 20_000.0;

/// Fixed parameters of the funded account.
///
/// Passed explicitly to [`crate::compute`] so the engine has no ambient
/// constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Balance before any trading day or payout
    pub initial_balance: f64,
    /// Payout total that completes the goal
    pub profit_goal: f64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            profit_goal: DEFAULT_PROFIT_GOAL,
        }
    }
}

impl AccountConfig {
    #[must_use]
    pub fn new(initial_balance: f64, profit_goal: f64) -> Self {
        Self {
            initial_balance,
            profit_goal,
        }
    }

    /// Whether the given payout total meets the goal.
    ///
    /// A non-positive goal is always met.
    #[must_use]
    pub fn goal_met(&self, total_payouts: f64) -> bool {
        self.profit_goal <= 0.0 || total_payouts >= self.profit_goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_funded_account() {
        let config = AccountConfig::default();
        assert_eq!(config.initial_balance, 50_000.0);
        assert_eq!(config.profit_goal, 20_000.0);
    }

    #[test]
    fn test_goal_met_boundary() {
        let config = AccountConfig::default();
        assert!(!config.goal_met(19_999.99));
        assert!(config.goal_met(20_000.0));
        assert!(config.goal_met(25_000.0));
        assert!(AccountConfig::new(50_000.0, 0.0).goal_met(0.0));
    }
}
