mod app_state;
mod modal;

pub use app_state::{AppState, ChartCache, StatusKind, StatusMessage};
pub use modal::{CelebrationModal, EntryFormModal, FormField, ModalState};
