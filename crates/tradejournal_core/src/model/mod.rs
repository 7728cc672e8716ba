mod draft;
mod entry;
mod ids;
mod stats;

pub use draft::{DraftKind, EntryDraft};
pub use entry::{EntryKind, JournalEntry};
pub use ids::EntryId;
pub use stats::TradingStats;
