//! Chart series derived from the entry collection.
//!
//! All series are sorted by date (stable, insertion order breaks ties).

use jiff::civil::Date;

use crate::model::{EntryKind, JournalEntry};

/// Default number of bars in the daily P/L chart
pub const DEFAULT_RECENT_DAYS: usize = 14;

/// One point of a running-total series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: Date,
    /// Running total up to and including this point
    pub value: f64,
    /// This entry's own contribution
    pub delta: f64,
}

/// One bar of the daily P/L chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub date: Date,
    pub pnl: f64,
}

fn sorted_trades(entries: &[JournalEntry]) -> Vec<(Date, f64)> {
    let mut trades: Vec<(Date, f64)> = entries
        .iter()
        .filter_map(|e| e.pnl().map(|pnl| (e.date, pnl)))
        .collect();
    trades.sort_by_key(|(date, _)| *date);
    trades
}

fn running_total(points: Vec<(Date, f64)>) -> Vec<SeriesPoint> {
    let mut total = 0.0;
    points
        .into_iter()
        .map(|(date, delta)| {
            total += delta;
            SeriesPoint {
                date,
                value: total,
                delta,
            }
        })
        .collect()
}

/// Running P/L over trading days
pub fn cumulative_pnl_series(entries: &[JournalEntry]) -> Vec<SeriesPoint> {
    running_total(sorted_trades(entries))
}

/// Running payout total over payout entries
pub fn cumulative_payout_series(entries: &[JournalEntry]) -> Vec<SeriesPoint> {
    let mut payouts: Vec<(Date, f64)> = entries
        .iter()
        .filter_map(|e| match e.kind {
            EntryKind::Payout { amount } => Some((e.date, amount)),
            EntryKind::Trade { .. } => None,
        })
        .collect();
    payouts.sort_by_key(|(date, _)| *date);
    running_total(payouts)
}

/// The latest `n` trading days by date, oldest first
pub fn recent_daily_bars(entries: &[JournalEntry], n: usize) -> Vec<DailyBar> {
    let trades = sorted_trades(entries);
    let start = trades.len().saturating_sub(n);
    trades[start..]
        .iter()
        .map(|&(date, pnl)| DailyBar { date, pnl })
        .collect()
}
