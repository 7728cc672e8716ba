//! Terminal trading journal for a funded futures account.
//!
//! The statistics live in `tradejournal_core`; this crate adds persistence,
//! settings, the optional coach narrative and the ratatui interface.

pub mod app;
pub mod components;
pub mod data;
pub mod error;
pub mod logging;
pub mod modals;
pub mod narrative;
pub mod platform;
pub mod session;
pub mod settings;
pub mod state;
pub mod util;

pub use app::App;
pub use logging::init_logging;
pub use session::{AddOutcome, JournalSession, NarrativeEvent};
pub use settings::Settings;
