use tradejournal_core::series::{self, DailyBar, SeriesPoint};

use crate::platform::Storage;
use crate::session::JournalSession;

use super::ModalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown in the status bar until replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Chart data derived from the entries, rebuilt after every append
#[derive(Debug, Default)]
pub struct ChartCache {
    pub cumulative_pnl: Vec<SeriesPoint>,
    pub cumulative_payouts: Vec<SeriesPoint>,
    pub daily_bars: Vec<DailyBar>,
}

pub struct AppState {
    pub session: JournalSession<Box<dyn Storage>>,
    pub modal: ModalState,
    pub status: Option<StatusMessage>,
    pub charts: ChartCache,
    /// First row of the recent entries list, counted from the newest entry
    pub entry_scroll: usize,
    pub exit: bool,
}

impl AppState {
    pub fn new(session: JournalSession<Box<dyn Storage>>) -> Self {
        let mut state = Self {
            session,
            modal: ModalState::None,
            status: None,
            charts: ChartCache::default(),
            entry_scroll: 0,
            exit: false,
        };
        state.refresh_charts();
        state
    }

    pub fn refresh_charts(&mut self) {
        let entries = self.session.entries();
        self.charts = ChartCache {
            cumulative_pnl: series::cumulative_pnl_series(entries),
            cumulative_payouts: series::cumulative_payout_series(entries),
            daily_bars: series::recent_daily_bars(entries, series::DEFAULT_RECENT_DAYS),
        };
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::info(text));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::error(text));
    }

    pub fn has_modal(&self) -> bool {
        !matches!(self.modal, ModalState::None)
    }
}
