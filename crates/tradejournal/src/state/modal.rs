//! Modal overlays: the new entry form and the goal celebration.

use jiff::civil::Date;
use tradejournal_core::{DraftKind, EntryDraft, EntryError};

#[derive(Debug)]
pub enum ModalState {
    None,
    EntryForm(EntryFormModal),
    Celebration(CelebrationModal),
}

/// Editable fields of the entry form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Amount,
    Setup,
    Notes,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Date,
        FormField::Amount,
        FormField::Setup,
        FormField::Notes,
    ];

    pub fn label(&self, kind: DraftKind) -> &'static str {
        match self {
            FormField::Date => "Date",
            FormField::Amount => kind.amount_label(),
            FormField::Setup => "Setup",
            FormField::Notes => "Notes",
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Raw text of the entry form.
///
/// Nothing is validated while typing; [`EntryFormModal::to_draft`] runs the
/// same parser the rest of the journal uses.
#[derive(Debug, Clone)]
pub struct EntryFormModal {
    pub kind: DraftKind,
    pub date: String,
    pub amount: String,
    pub setup: String,
    pub notes: String,
    pub focused: FormField,
    pub error: Option<String>,
}

impl EntryFormModal {
    /// Empty form with the date prefilled
    pub fn new(today: Date) -> Self {
        Self {
            kind: DraftKind::Trade,
            date: today.to_string(),
            amount: String::new(),
            setup: String::new(),
            notes: String::new(),
            focused: FormField::Amount,
            error: None,
        }
    }

    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Amount => &self.amount,
            FormField::Setup => &self.setup,
            FormField::Notes => &self.notes,
        }
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focused {
            FormField::Date => &mut self.date,
            FormField::Amount => &mut self.amount,
            FormField::Setup => &mut self.setup,
            FormField::Notes => &mut self.notes,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let accepted = match self.focused {
            FormField::Date => c.is_ascii_digit() || c == '-',
            FormField::Amount => c.is_ascii_digit() || matches!(c, '.' | '-' | ',' | '$'),
            FormField::Setup | FormField::Notes => !c.is_control(),
        };
        if accepted {
            self.focused_value_mut().push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.focused_value_mut().pop();
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Switch between trade and payout. Typed text is kept.
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
        self.error = None;
    }

    pub fn to_draft(&self) -> Result<EntryDraft, EntryError> {
        EntryDraft::parse(self.kind, &self.date, &self.amount, &self.notes)
            .map(|draft| draft.with_setup(self.setup.as_str()))
    }
}

/// Shown once when payouts first reach the goal
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationModal {
    pub total_payouts: f64,
    pub profit_goal: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradejournal_core::EntryKind;

    fn form() -> EntryFormModal {
        EntryFormModal::new(jiff::civil::date(2024, 8, 12))
    }

    fn type_str(form: &mut EntryFormModal, text: &str) {
        for c in text.chars() {
            form.insert_char(c);
        }
    }

    #[test]
    fn test_new_form_defaults() {
        let form = form();
        assert_eq!(form.kind, DraftKind::Trade);
        assert_eq!(form.date, "2024-08-12");
        assert_eq!(form.focused, FormField::Amount);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_field_cycle_wraps() {
        let mut form = form();
        form.next_field();
        assert_eq!(form.focused, FormField::Setup);
        form.next_field();
        form.next_field();
        assert_eq!(form.focused, FormField::Date);
        form.prev_field();
        assert_eq!(form.focused, FormField::Notes);
    }

    #[test]
    fn test_amount_field_filters_letters() {
        let mut form = form();
        type_str(&mut form, "-1a,2b50.5");
        assert_eq!(form.amount, "-1,250.5");
    }

    #[test]
    fn test_trade_draft() {
        let mut form = form();
        type_str(&mut form, "-1,250.5");
        form.next_field();
        type_str(&mut form, "ORB");
        form.next_field();
        type_str(&mut form, "  stopped out twice ");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.kind, EntryKind::Trade { pnl: -1_250.5 });
        assert_eq!(draft.setup.as_deref(), Some("ORB"));
        assert_eq!(draft.notes.as_deref(), Some("stopped out twice"));
    }

    #[test]
    fn test_payout_draft_is_absolute() {
        let mut form = form();
        form.toggle_kind();
        type_str(&mut form, "-2000");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.kind, EntryKind::Payout { amount: 2_000.0 });
        assert!(draft.setup.is_none());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut form = form();
        assert!(matches!(form.to_draft(), Err(EntryError::MissingAmount)));

        type_str(&mut form, "100");
        form.focused = FormField::Date;
        form.backspace();
        form.backspace();
        type_str(&mut form, "45");
        assert!(matches!(form.to_draft(), Err(EntryError::InvalidDate { .. })));
    }
}
