//! The journal session: entries, derived stats, celebration state and coach
//! analysis, kept consistent across appends.
//!
//! Everything here runs on the UI thread. The only asynchronous piece is the
//! optional narrative worker, which is polled with [`JournalSession::poll_narrative`].

use tradejournal_core::{
    CelebrationState, EntryDraft, EntryId, EntryStore, GoalTransition, JournalEntry,
    TradingStats, compute,
};

use crate::data::JournalRepository;
use crate::error::{NarrativeError, StorageError};
use crate::narrative::{
    CoachAnalysis, NarrativeGenerator, NarrativeRequest, NarrativeResponse, NarrativeWorker,
};
use crate::platform::Storage;
use crate::settings::Settings;

/// What happened while adding one entry
#[derive(Debug)]
pub struct AddOutcome {
    pub entry_id: EntryId,
    /// Celebration transition caused by this append, if any
    pub goal: Option<GoalTransition>,
    /// A coach analysis was queued for this append
    pub narrative_requested: bool,
    /// The entry stands in memory but could not be written
    pub persistence_error: Option<StorageError>,
}

impl AddOutcome {
    pub fn goal_reached(&self) -> bool {
        self.goal == Some(GoalTransition::Reached)
    }
}

/// A finished narrative request, as seen by the UI
#[derive(Debug)]
pub enum NarrativeEvent {
    Updated,
    Failed(NarrativeError),
}

pub struct JournalSession<S: Storage> {
    repo: JournalRepository<S>,
    settings: Settings,
    store: EntryStore,
    stats: TradingStats,
    celebration: CelebrationState,
    /// Set on a `Reached` transition until the UI takes it
    celebration_pending: bool,
    analysis: Option<CoachAnalysis>,
    narrative: Option<NarrativeWorker>,
}

impl<S: Storage> JournalSession<S> {
    /// Load persisted state and start the narrative worker if a generator
    /// is available.
    ///
    /// A journal that already sits at or above the goal with the flag unset
    /// celebrates once on open.
    pub fn open(
        storage: S,
        settings: Settings,
        generator: Option<Box<dyn NarrativeGenerator>>,
    ) -> Self {
        let repo = JournalRepository::new(storage);
        let store = EntryStore::from_entries(repo.load_entries());
        let analysis = repo.load_analysis();
        let celebration = CelebrationState::from_flag(repo.load_celebrated());
        let stats = compute(store.entries(), &settings.account);

        let narrative = generator.map(|generator| {
            tracing::info!(generator = generator.name(), "Coach narrative enabled");
            NarrativeWorker::new(generator)
        });

        tracing::info!(
            entries = store.len(),
            celebrated = celebration.is_celebrated(),
            "Journal opened"
        );

        let mut session = Self {
            repo,
            settings,
            store,
            stats,
            celebration,
            celebration_pending: false,
            analysis,
            narrative,
        };

        session.observe_goal();
        session
    }

    /// Append a validated draft under a fresh id.
    ///
    /// The in-memory append always stands. A failed write is logged and
    /// reported in the outcome.
    pub fn add_entry(&mut self, draft: EntryDraft) -> AddOutcome {
        let entry_id = EntryId::new(uuid::Uuid::new_v4().to_string());
        let entry = draft.into_entry(entry_id.clone());

        tracing::info!(
            id = %entry_id,
            date = %entry.date,
            payout = entry.is_payout(),
            "Adding journal entry"
        );

        self.store.append(entry);

        let mut persistence_error = None;
        if let Err(e) = self.repo.save_entries(self.store.entries()) {
            tracing::error!(error = %e, "Failed to persist journal entries");
            persistence_error = Some(e);
        }

        self.stats = compute(self.store.entries(), &self.settings.account);

        let (goal, flag_error) = self.observe_goal();
        if let Some(e) = flag_error {
            persistence_error.get_or_insert(e);
        }

        let narrative_requested = self.dispatch_narrative();

        AddOutcome {
            entry_id,
            goal,
            narrative_requested,
            persistence_error,
        }
    }

    /// Drain finished narrative requests without blocking
    pub fn poll_narrative(&mut self) -> Vec<NarrativeEvent> {
        let mut events = Vec::new();
        let Some(worker) = &self.narrative else {
            return events;
        };

        let mut latest = None;
        while let Some(response) = worker.try_recv() {
            match response {
                NarrativeResponse::Complete {
                    request_id,
                    analysis,
                } => {
                    tracing::debug!(request_id, "Coach analysis received");
                    latest = Some(analysis);
                    events.push(NarrativeEvent::Updated);
                }
                NarrativeResponse::Failed { request_id, error } => {
                    tracing::error!(request_id, error = %error, "Coach analysis failed");
                    events.push(NarrativeEvent::Failed(error));
                }
            }
        }

        if let Some(analysis) = latest {
            self.set_analysis(analysis);
        }
        events
    }

    pub fn entries(&self) -> &[JournalEntry] {
        self.store.entries()
    }

    pub fn stats(&self) -> &TradingStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn analysis(&self) -> Option<&CoachAnalysis> {
        self.analysis.as_ref()
    }

    pub fn celebration(&self) -> CelebrationState {
        self.celebration
    }

    /// Whether a coach analysis is being generated right now
    pub fn narrative_busy(&self) -> bool {
        self.narrative.as_ref().is_some_and(NarrativeWorker::is_busy)
    }

    pub fn narrative_enabled(&self) -> bool {
        self.narrative.is_some()
    }

    /// Returns `true` once per `Reached` transition
    pub fn take_celebration(&mut self) -> bool {
        std::mem::take(&mut self.celebration_pending)
    }

    /// Run the celebration transition for the current stats and persist any
    /// flag change. On a failed write the transition still holds in memory.
    fn observe_goal(&mut self) -> (Option<GoalTransition>, Option<StorageError>) {
        let transition = self.celebration.observe(
            self.stats.total_payouts,
            &self.settings.account,
            self.settings.celebration.rearm_below_goal,
        );

        let Some(transition) = transition else {
            return (None, None);
        };

        match transition {
            GoalTransition::Reached => {
                tracing::info!(total_payouts = self.stats.total_payouts, "Profit goal reached");
                self.celebration_pending = true;
            }
            GoalTransition::Rearmed => {
                tracing::info!("Payouts below goal, celebration re-armed");
            }
        }

        let error = self
            .repo
            .save_celebrated(self.celebration.is_celebrated())
            .err();
        if let Some(e) = &error {
            tracing::error!(error = %e, "Failed to persist celebration flag");
        }
        (Some(transition), error)
    }

    fn dispatch_narrative(&mut self) -> bool {
        if let Some(worker) = &mut self.narrative {
            let recent = self.store.last_n(self.settings.narrative.recent_entries);
            let request = NarrativeRequest::new(recent, &self.stats, &self.settings.account);
            return match worker.submit(request) {
                Ok(request_id) => {
                    tracing::debug!(request_id, "Coach analysis requested");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to queue coach analysis");
                    false
                }
            };
        }

        if self.store.len() == 1 && self.analysis.is_none() {
            self.set_analysis(CoachAnalysis::placeholder());
        }
        false
    }

    fn set_analysis(&mut self, analysis: CoachAnalysis) {
        if let Err(e) = self.repo.save_analysis(&analysis) {
            tracing::error!(error = %e, "Failed to persist coach analysis");
        }
        self.analysis = Some(analysis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{Receiver, Sender, channel};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use crate::data::{ANALYSIS_KEY, CELEBRATED_KEY, ENTRIES_KEY};
    use crate::platform::MemoryStorage;

    fn day(d: i8) -> jiff::civil::Date {
        jiff::civil::date(2024, 7, d)
    }

    fn open(storage: &MemoryStorage) -> JournalSession<MemoryStorage> {
        JournalSession::open(storage.clone(), Settings::default(), None)
    }

    /// Records each request and answers from a queue of canned results
    struct ScriptedGenerator {
        seen: Sender<NarrativeRequest>,
        results: Arc<Mutex<Vec<Result<CoachAnalysis, NarrativeError>>>>,
    }

    impl NarrativeGenerator for ScriptedGenerator {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn generate(&self, request: &NarrativeRequest) -> Result<CoachAnalysis, NarrativeError> {
            let _ = self.seen.send(request.clone());
            self.results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(NarrativeError::EmptyResponse))
        }
    }

    fn scripted(
        results: Vec<Result<CoachAnalysis, NarrativeError>>,
    ) -> (Box<dyn NarrativeGenerator>, Receiver<NarrativeRequest>) {
        let (tx, rx) = channel();
        let mut results = results;
        results.reverse();
        let generator = ScriptedGenerator {
            seen: tx,
            results: Arc::new(Mutex::new(results)),
        };
        (Box::new(generator), rx)
    }

    fn poll_until_event(session: &mut JournalSession<MemoryStorage>) -> Vec<NarrativeEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let events = session.poll_narrative();
            if !events.is_empty() || Instant::now() > deadline {
                return events;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn analysis(focus: &str) -> CoachAnalysis {
        CoachAnalysis {
            next_focus: focus.to_string(),
            ..CoachAnalysis::placeholder()
        }
    }

    #[test]
    fn test_open_empty_journal() {
        let storage = MemoryStorage::new();
        let mut session = open(&storage);

        assert!(session.entries().is_empty());
        assert_eq!(session.stats().current_balance, 50_000.0);
        assert!(session.analysis().is_none());
        assert!(!session.take_celebration());
        assert!(!session.narrative_enabled());
    }

    #[test]
    fn test_open_survives_malformed_slots() {
        let storage = MemoryStorage::with_slots([(ENTRIES_KEY, "oops"), (ANALYSIS_KEY, "{{")]);
        let session = open(&storage);

        assert!(session.entries().is_empty());
        assert!(session.analysis().is_none());
    }

    #[test]
    fn test_add_entry_persists_and_recomputes() {
        let storage = MemoryStorage::new();
        let mut session = open(&storage);

        let outcome = session.add_entry(EntryDraft::trade(day(1), 400.0));
        assert!(outcome.persistence_error.is_none());
        assert!(outcome.goal.is_none());
        assert!(!outcome.narrative_requested);

        session.add_entry(EntryDraft::trade(day(2), -100.0));

        assert_eq!(session.stats().cumulative_pnl, 300.0);
        assert_eq!(session.stats().win_rate, 50.0);

        let reopened = open(&storage);
        assert_eq!(reopened.entries(), session.entries());
        assert_eq!(reopened.stats(), session.stats());
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let storage = MemoryStorage::new();
        let mut session = open(&storage);

        let a = session.add_entry(EntryDraft::trade(day(1), 1.0)).entry_id;
        let b = session.add_entry(EntryDraft::trade(day(1), 1.0)).entry_id;
        assert_ne!(a, b);
    }

    #[test]
    fn test_placeholder_only_for_first_entry_without_generator() {
        let storage = MemoryStorage::new();
        let mut session = open(&storage);

        session.add_entry(EntryDraft::trade(day(1), 50.0));
        assert_eq!(session.analysis(), Some(&CoachAnalysis::placeholder()));
        assert!(storage.get(ANALYSIS_KEY).is_some());
    }

    #[test]
    fn test_placeholder_not_set_when_analysis_exists() {
        let existing = serde_json::to_string(&analysis("Keep size small")).unwrap();
        let storage = MemoryStorage::with_slots([(ANALYSIS_KEY, existing)]);
        let mut session = open(&storage);

        session.add_entry(EntryDraft::trade(day(1), 50.0));
        assert_eq!(session.analysis().unwrap().next_focus, "Keep size small");
    }

    #[test]
    fn test_goal_crossing_celebrates_once() {
        let storage = MemoryStorage::new();
        let mut session = open(&storage);

        let first = session.add_entry(EntryDraft::payout(day(1), 19_000.0));
        assert!(!first.goal_reached());
        assert_eq!(storage.get(CELEBRATED_KEY), None);

        let second = session.add_entry(EntryDraft::payout(day(2), 2_000.0));
        assert!(second.goal_reached());
        assert!(session.take_celebration());
        assert!(!session.take_celebration());
        assert_eq!(storage.get(CELEBRATED_KEY).as_deref(), Some("true"));

        let third = session.add_entry(EntryDraft::payout(day(3), 500.0));
        assert!(third.goal.is_none());
        assert!(!session.take_celebration());
    }

    #[test]
    fn test_already_celebrated_journal_does_not_celebrate_again() {
        let entries = r#"[{"id":"p","date":"2024-07-01","pnl":0,"isPayout":true,"payoutAmount":25000}]"#;
        let storage = MemoryStorage::with_slots([(ENTRIES_KEY, entries), (CELEBRATED_KEY, "true")]);
        let mut session = open(&storage);

        assert!(!session.take_celebration());
        assert!(session.celebration().is_celebrated());
    }

    #[test]
    fn test_open_above_goal_celebrates_when_flag_unset() {
        let entries = r#"[{"id":"p","date":"2024-07-01","pnl":0,"isPayout":true,"payoutAmount":25000}]"#;
        let storage = MemoryStorage::with_slots([(ENTRIES_KEY, entries)]);
        let mut session = open(&storage);

        assert!(session.take_celebration());
        assert_eq!(storage.get(CELEBRATED_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_stale_flag_is_rearmed_below_goal() {
        let storage = MemoryStorage::with_slots([(CELEBRATED_KEY, "true")]);
        let session = open(&storage);

        assert!(!session.celebration().is_celebrated());
        assert_eq!(storage.get(CELEBRATED_KEY), None);
    }

    #[test]
    fn test_stale_flag_kept_when_rearm_disabled() {
        let storage = MemoryStorage::with_slots([(CELEBRATED_KEY, "true")]);
        let mut settings = Settings::default();
        settings.celebration.rearm_below_goal = false;
        let session = JournalSession::open(storage.clone(), settings, None);

        assert!(session.celebration().is_celebrated());
        assert_eq!(storage.get(CELEBRATED_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_write_failure_keeps_entry_in_memory() {
        let storage = MemoryStorage::new();
        let mut session = open(&storage);
        storage.set_fail_writes(true);

        let outcome = session.add_entry(EntryDraft::trade(day(1), 125.0));
        assert!(matches!(outcome.persistence_error, Some(StorageError::Io(_))));
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.stats().cumulative_pnl, 125.0);
        assert_eq!(storage.get(ENTRIES_KEY), None);
    }

    #[test]
    fn test_narrative_request_carries_recent_entries_and_fresh_stats() {
        let storage = MemoryStorage::new();
        let (generator, seen) = scripted(vec![]);
        let mut session = JournalSession::open(storage.clone(), Settings::default(), Some(generator));

        for d in 1..=11 {
            session.add_entry(EntryDraft::trade(day(d), 100.0));
        }

        let mut last = None;
        for _ in 0..11 {
            last = seen.recv_timeout(Duration::from_secs(5)).ok();
        }
        let request = last.unwrap();
        assert_eq!(request.recent_entries.len(), 10);
        assert_eq!(request.recent_entries[0].date, day(2));
        assert_eq!(request.stats.cumulative_pnl, 1_100.0);
        assert_eq!(request.account, Settings::default().account);
    }

    #[test]
    fn test_narrative_success_replaces_and_persists_analysis() {
        let storage = MemoryStorage::new();
        let (generator, _seen) = scripted(vec![Ok(analysis("Trade the open only"))]);
        let mut session = JournalSession::open(storage.clone(), Settings::default(), Some(generator));

        let outcome = session.add_entry(EntryDraft::trade(day(1), 300.0));
        assert!(outcome.narrative_requested);
        // No placeholder when a generator is present
        assert!(session.analysis().is_none());

        let events = poll_until_event(&mut session);
        assert!(matches!(events.as_slice(), [NarrativeEvent::Updated]));
        assert_eq!(session.analysis().unwrap().next_focus, "Trade the open only");

        let stored: CoachAnalysis = serde_json::from_str(&storage.get(ANALYSIS_KEY).unwrap()).unwrap();
        assert_eq!(stored.next_focus, "Trade the open only");
    }

    #[test]
    fn test_narrative_failure_keeps_previous_analysis() {
        let existing = serde_json::to_string(&analysis("Previous")).unwrap();
        let storage = MemoryStorage::with_slots([(ANALYSIS_KEY, existing)]);
        let (generator, _seen) = scripted(vec![Err(NarrativeError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })]);
        let mut session = JournalSession::open(storage, Settings::default(), Some(generator));

        session.add_entry(EntryDraft::trade(day(1), -200.0));
        let events = poll_until_event(&mut session);

        assert!(matches!(
            events.as_slice(),
            [NarrativeEvent::Failed(NarrativeError::Status { status: 503, .. })]
        ));
        assert_eq!(session.analysis().unwrap().next_focus, "Previous");
        // The entry itself is unaffected
        assert_eq!(session.stats().cumulative_pnl, -200.0);
    }
}
