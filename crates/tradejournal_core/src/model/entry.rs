//! Journal entry definitions
//!
//! An entry is either a trading day (carries a signed P/L) or a payout
//! (carries a non-negative withdrawal amount). The two roles are encoded in
//! [`EntryKind`] so that code reading a payout's P/L, or a trade's payout
//! amount, does not type-check.
//!
//! The persisted shape is flat (`pnl`, `isPayout`, `payoutAmount`) and is
//! converted at the serde boundary.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::EntryId;

/// What an entry records
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryKind {
    /// Net profit or loss of one trading day. Zero is a flat day.
    Trade { pnl: f64 },
    /// Withdrawal from the account, always stored as an absolute value
    Payout { amount: f64 },
}

impl EntryKind {
    /// Create a payout kind, normalizing the amount to its absolute value
    pub fn payout(amount: f64) -> Self {
        EntryKind::Payout {
            amount: amount.abs(),
        }
    }

    pub fn is_payout(&self) -> bool {
        matches!(self, EntryKind::Payout { .. })
    }
}

/// A single journal record, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "StoredEntry")]
pub struct JournalEntry {
    pub id: EntryId,
    pub date: Date,
    pub kind: EntryKind,
    pub notes: Option<String>,
    pub setup: Option<String>,
}

impl JournalEntry {
    pub fn is_payout(&self) -> bool {
        self.kind.is_payout()
    }

    /// P/L of a trading day, `None` for payouts
    pub fn pnl(&self) -> Option<f64> {
        match self.kind {
            EntryKind::Trade { pnl } => Some(pnl),
            EntryKind::Payout { .. } => None,
        }
    }

    /// Withdrawn amount of a payout, `None` for trading days
    pub fn payout_amount(&self) -> Option<f64> {
        match self.kind {
            EntryKind::Payout { amount } => Some(amount),
            EntryKind::Trade { .. } => None,
        }
    }
}

/// Flat on-disk representation.
///
/// Every field except `id` and `date` is optional on read so that older or
/// hand-edited journals still load.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: EntryId,
    date: Date,
    #[serde(default)]
    pnl: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    setup: Option<String>,
    #[serde(default)]
    is_payout: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payout_amount: Option<f64>,
}

impl From<StoredEntry> for JournalEntry {
    fn from(stored: StoredEntry) -> Self {
        let kind = if stored.is_payout {
            EntryKind::payout(stored.payout_amount.unwrap_or(0.0))
        } else {
            EntryKind::Trade { pnl: stored.pnl }
        };

        Self {
            id: stored.id,
            date: stored.date,
            kind,
            notes: stored.notes.filter(|n| !n.is_empty()),
            setup: stored.setup.filter(|s| !s.is_empty()),
        }
    }
}

impl From<JournalEntry> for StoredEntry {
    fn from(entry: JournalEntry) -> Self {
        let (pnl, is_payout, payout_amount) = match entry.kind {
            EntryKind::Trade { pnl } => (pnl, false, None),
            EntryKind::Payout { amount } => (0.0, true, Some(amount)),
        };

        Self {
            id: entry.id,
            date: entry.date,
            pnl,
            notes: entry.notes,
            setup: entry.setup,
            is_payout,
            payout_amount,
        }
    }
}
