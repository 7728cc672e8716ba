//! One-shot payout goal celebration.
//!
//! The celebration flag is an explicit value owned by the caller and advanced
//! with [`CelebrationState::observe`] after every recomputation. Persisting the
//! flag is the caller's job; the returned [`GoalTransition`] says when it
//! changed.

use serde::{Deserialize, Serialize};

use crate::config::AccountConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CelebrationState {
    #[default]
    NotCelebrated,
    Celebrated,
}

/// A change of the celebration flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTransition {
    /// Payouts reached the goal for the first time since the flag was clear.
    /// The presentation shows the celebration exactly once for this.
    Reached,
    /// Payouts were observed below the goal while celebrated; the flag is
    /// cleared so a later crossing celebrates again.
    Rearmed,
}

impl CelebrationState {
    pub fn from_flag(celebrated: bool) -> Self {
        if celebrated {
            CelebrationState::Celebrated
        } else {
            CelebrationState::NotCelebrated
        }
    }

    pub fn is_celebrated(&self) -> bool {
        matches!(self, CelebrationState::Celebrated)
    }

    /// Advance the state for the latest payout total.
    ///
    /// With `rearm_below_goal` unset the flag, once set, stays set for good.
    pub fn observe(
        &mut self,
        total_payouts: f64,
        config: &AccountConfig,
        rearm_below_goal: bool,
    ) -> Option<GoalTransition> {
        let met = config.goal_met(total_payouts);

        match (*self, met) {
            (CelebrationState::NotCelebrated, true) => {
                *self = CelebrationState::Celebrated;
                Some(GoalTransition::Reached)
            }
            (CelebrationState::Celebrated, false) if rearm_below_goal => {
                *self = CelebrationState::NotCelebrated;
                Some(GoalTransition::Rearmed)
            }
            _ => None,
        }
    }
}
