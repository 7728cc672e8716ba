//! Entry creation requests coming from the presentation layer.
//!
//! A draft is a fully validated entry that has not been assigned an id yet.
//! [`EntryDraft::parse`] is the only way raw form text becomes a draft, so
//! the store never receives a structurally invalid entry.

use jiff::civil::Date;

use super::entry::{EntryKind, JournalEntry};
use super::ids::EntryId;
use crate::error::{EntryError, Result};

/// Which tab of the entry form produced the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftKind {
    #[default]
    Trade,
    Payout,
}

impl DraftKind {
    pub fn label(&self) -> &'static str {
        match self {
            DraftKind::Trade => "Trade P/L",
            DraftKind::Payout => "Payout",
        }
    }

    pub fn amount_label(&self) -> &'static str {
        match self {
            DraftKind::Trade => "Daily Net P/L",
            DraftKind::Payout => "Withdrawal Amount",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            DraftKind::Trade => DraftKind::Payout,
            DraftKind::Payout => DraftKind::Trade,
        }
    }
}

/// A validated journal entry awaiting its id
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub date: Date,
    pub kind: EntryKind,
    pub notes: Option<String>,
    pub setup: Option<String>,
}

impl EntryDraft {
    pub fn trade(date: Date, pnl: f64) -> Self {
        Self {
            date,
            kind: EntryKind::Trade { pnl },
            notes: None,
            setup: None,
        }
    }

    pub fn payout(date: Date, amount: f64) -> Self {
        Self {
            date,
            kind: EntryKind::payout(amount),
            notes: None,
            setup: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_text(&notes.into());
        self
    }

    #[must_use]
    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = normalize_text(&setup.into());
        self
    }

    /// Validate raw form input.
    ///
    /// Amounts accept an optional leading `$` and thousands separators.
    /// Payout amounts are stored as absolute values.
    pub fn parse(kind: DraftKind, date: &str, amount: &str, notes: &str) -> Result<Self> {
        let date = parse_date(date)?;
        let amount = parse_amount(amount)?;

        let draft = match kind {
            DraftKind::Trade => Self::trade(date, amount),
            DraftKind::Payout => Self::payout(date, amount),
        };

        Ok(draft.with_notes(notes))
    }

    pub fn into_entry(self, id: EntryId) -> JournalEntry {
        JournalEntry {
            id,
            date: self.date,
            kind: self.kind,
            notes: self.notes,
            setup: self.setup,
        }
    }
}

fn parse_date(input: &str) -> Result<Date> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EntryError::MissingDate);
    }

    trimmed
        .parse::<Date>()
        .map_err(|e| EntryError::InvalidDate {
            input: trimmed.to_string(),
            reason: e.to_string(),
        })
}

fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EntryError::MissingAmount);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EntryError::InvalidAmount(trimmed.to_string())),
    }
}

fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
