use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use tradejournal_core::EntryDraft;

use crate::components::{
    Component, EventResult, charts::ChartsPanel, coach_panel::CoachPanel, entry_list::EntryList,
    goal_panel::GoalPanel, header::Header, stats_cards::StatsCards, status_bar::StatusBar,
};
use crate::modals::{ModalResult, handle_modal_key, render_modal};
use crate::narrative::generator_from_settings;
use crate::platform::{MemoryStorage, NativeStorage, Storage};
use crate::session::{JournalSession, NarrativeEvent};
use crate::settings::Settings;
use crate::state::{AppState, CelebrationModal, EntryFormModal, ModalState};

/// How long to wait for input before checking the narrative worker again
const TICK: Duration = Duration::from_millis(200);

pub struct App {
    state: AppState,
    header: Header,
    stats_cards: StatsCards,
    goal_panel: GoalPanel,
    charts: ChartsPanel,
    coach_panel: CoachPanel,
    entry_list: EntryList,
    status_bar: StatusBar,
}

impl App {
    pub fn new(session: JournalSession<Box<dyn Storage>>) -> Self {
        let mut app = Self {
            state: AppState::new(session),
            header: Header::new(),
            stats_cards: StatsCards::new(),
            goal_panel: GoalPanel::new(),
            charts: ChartsPanel::new(),
            coach_panel: CoachPanel::new(),
            entry_list: EntryList::new(),
            status_bar: StatusBar::new(),
        };
        app.check_celebration();
        app
    }

    /// Open the journal stored in `data_dir`
    pub fn with_data_dir(data_dir: PathBuf, offline: bool) -> Self {
        let settings = Settings::load_or_init(&data_dir);
        let generator = generator_from_settings(&settings.narrative, offline);
        let (storage, warning): (Box<dyn Storage>, _) = match std::fs::create_dir_all(&data_dir) {
            Ok(()) => (Box::new(NativeStorage::new(data_dir)), None),
            Err(e) => {
                tracing::error!(path = %data_dir.display(), error = %e, "Data directory unavailable");
                (
                    Box::new(MemoryStorage::new()),
                    Some(format!("Data directory unavailable, entries will not be saved: {e}")),
                )
            }
        };

        let mut app = Self::new(JournalSession::open(storage, settings, generator));
        if let Some(warning) = warning {
            app.state.set_error(warning);
        }
        app
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
            self.poll_narrative();
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(4), // Stat cards
                Constraint::Length(4), // Goal gauge
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.header.render(frame, chunks[0], &self.state);
        self.stats_cards.render(frame, chunks[1], &self.state);
        self.goal_panel.render(frame, chunks[2], &self.state);
        self.render_content(frame, chunks[3]);
        self.status_bar.render(frame, chunks[4], &self.state);

        render_modal(frame, &self.state);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(area);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        self.charts.render(frame, columns[0], &self.state);
        self.coach_panel.render(frame, side[0], &self.state);
        self.entry_list.render(frame, side[1], &self.state);
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(TICK)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.state.exit = true;
            return;
        }

        if self.state.has_modal() {
            match handle_modal_key(key_event, &mut self.state) {
                ModalResult::Submitted(draft) => {
                    self.state.modal = ModalState::None;
                    self.add_entry(draft);
                }
                ModalResult::Cancelled => {
                    self.state.modal = ModalState::None;
                }
                ModalResult::Continue => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') if key_event.modifiers.is_empty() => {
                self.state.exit = true;
            }
            KeyCode::Char('n') if key_event.modifiers.is_empty() => {
                let today = jiff::Zoned::now().date();
                self.state.modal = ModalState::EntryForm(EntryFormModal::new(today));
            }
            KeyCode::Esc => {
                self.state.status = None;
            }
            _ => {
                if self.entry_list.handle_key(key_event, &mut self.state) == EventResult::Exit {
                    self.state.exit = true;
                }
            }
        }
    }

    fn add_entry(&mut self, draft: EntryDraft) {
        let outcome = self.state.session.add_entry(draft);
        self.state.refresh_charts();
        self.state.entry_scroll = 0;

        if let Some(e) = outcome.persistence_error {
            self.state
                .set_error(format!("Entry kept for this session but not saved: {e}"));
        } else if outcome.narrative_requested {
            self.state.set_info("Entry saved. Coach is reviewing...");
        } else {
            self.state.set_info("Entry saved.");
        }

        self.check_celebration();
    }

    fn poll_narrative(&mut self) {
        for event in self.state.session.poll_narrative() {
            match event {
                NarrativeEvent::Updated => self.state.set_info("Coach analysis updated."),
                NarrativeEvent::Failed(e) => {
                    self.state.set_error(format!("Coach analysis failed: {e}"))
                }
            }
        }
    }

    fn check_celebration(&mut self) {
        if !self.state.session.take_celebration() {
            return;
        }
        let modal = CelebrationModal {
            total_payouts: self.state.session.stats().total_payouts,
            profit_goal: self.state.session.settings().account.profit_goal,
        };
        self.state.modal = ModalState::Celebration(modal);
    }
}
