//! Trading journal statistics library
//!
//! This crate turns a list of journal entries into the derived metrics of a
//! funded trading account. It supports:
//! - Append-only storage of daily P/L entries and payout withdrawals
//! - Full recomputation of balance, win rate, streaks and goal progress
//! - A one-shot goal-reached transition for the payout target
//! - Chart series (cumulative P/L, cumulative payouts, recent daily bars)
//!
//! # Example
//!
//! ```ignore
//! use tradejournal_core::{AccountConfig, EntryDraft, EntryId, EntryStore, compute};
//!
//! let mut store = EntryStore::new();
//! let draft = EntryDraft::trade(jiff::civil::date(2025, 3, 3), 450.0);
//! store.append(draft.into_entry(EntryId::new("a1")));
//!
//! let stats = compute(store.entries(), &AccountConfig::default());
//! assert_eq!(stats.cumulative_pnl, 450.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod config;
pub mod error;
pub mod goal;
pub mod series;
pub mod stats;
pub mod store;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::AccountConfig;
pub use error::EntryError;
pub use goal::{CelebrationState, GoalTransition};
pub use model::{DraftKind, EntryDraft, EntryId, EntryKind, JournalEntry, TradingStats};
pub use stats::compute;
pub use store::EntryStore;
