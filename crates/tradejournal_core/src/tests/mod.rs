//! Tests for the journal statistics engine
//!
//! Tests are organized by topic:
//! - `stats` - Balance, win rate, averages and goal projection
//! - `streaks` - Win/loss streak state machine over date-sorted days
//! - `goal` - One-shot celebration transition
//! - `series` - Chart series derivation
//! - `persisted_shape` - Compatibility with the flat JSON entry shape

mod goal;

use jiff::civil::Date;

use crate::model::{EntryDraft, EntryId, JournalEntry};

/// Trading-day entry on 2025-01-`day`
pub(crate) fn trade(id: &str, day: i8, pnl: f64) -> JournalEntry {
    trade_on(id, jiff::civil::date(2025, 1, day), pnl)
}

pub(crate) fn trade_on(id: &str, date: Date, pnl: f64) -> JournalEntry {
    EntryDraft::trade(date, pnl).into_entry(EntryId::new(id))
}

/// Payout entry on 2025-01-`day`
pub(crate) fn payout(id: &str, day: i8, amount: f64) -> JournalEntry {
    EntryDraft::payout(jiff::civil::date(2025, 1, day), amount).into_entry(EntryId::new(id))
}
