use std::fmt;

/// Errors raised while turning raw form input into an entry draft
#[derive(Debug, Clone, PartialEq)]
pub enum EntryError {
    MissingDate,
    InvalidDate { input: String, reason: String },
    MissingAmount,
    InvalidAmount(String),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::MissingDate => write!(f, "date is required"),
            EntryError::InvalidDate { input, reason } => {
                write!(f, "invalid date {input:?} (expected YYYY-MM-DD): {reason}")
            }
            EntryError::MissingAmount => write!(f, "amount is required"),
            EntryError::InvalidAmount(input) => write!(f, "invalid amount {input:?}"),
        }
    }
}

impl std::error::Error for EntryError {}

pub type Result<T> = std::result::Result<T, EntryError>;
