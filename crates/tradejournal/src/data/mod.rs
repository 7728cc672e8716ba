pub mod journal_data;

pub use journal_data::{ANALYSIS_KEY, CELEBRATED_KEY, ENTRIES_KEY, JournalRepository};
