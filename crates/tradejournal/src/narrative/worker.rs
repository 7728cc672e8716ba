//! Background worker that runs the narrative generator without blocking the UI.
//!
//! Requests are handled one at a time in submission order, so responses
//! come back in the same order they were sent. After [`NarrativeWorker::cancel`]
//! any request still queued is dropped unanswered.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use super::{CoachAnalysis, NarrativeGenerator, NarrativeRequest};
use crate::error::NarrativeError;

/// Sequence number of a submitted request
pub type RequestId = u64;

enum WorkerRequest {
    Generate {
        request_id: RequestId,
        request: Box<NarrativeRequest>,
    },
    Shutdown,
}

/// Result of one request
#[derive(Debug)]
pub enum NarrativeResponse {
    Complete {
        request_id: RequestId,
        analysis: CoachAnalysis,
    },
    Failed {
        request_id: RequestId,
        error: NarrativeError,
    },
}

/// Owns the generator thread
pub struct NarrativeWorker {
    generator_name: &'static str,
    request_tx: Sender<WorkerRequest>,
    response_rx: Receiver<NarrativeResponse>,
    /// Submitted but not yet answered
    in_flight: Arc<AtomicUsize>,
    cancel_flag: Arc<AtomicBool>,
    next_id: RequestId,
    thread: Option<JoinHandle<()>>,
}

impl NarrativeWorker {
    /// Move the generator onto a new background thread
    pub fn new(generator: Box<dyn NarrativeGenerator>) -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let generator_name = generator.name();

        let ctx = WorkerContext {
            generator,
            response_tx,
            in_flight: in_flight.clone(),
            cancel_flag: cancel_flag.clone(),
        };

        let thread = thread::Builder::new()
            .name("narrative".to_string())
            .spawn(move || ctx.run(request_rx))
            .map_err(|e| tracing::error!(error = %e, "Failed to spawn narrative worker"))
            .ok();

        Self {
            generator_name,
            request_tx,
            response_rx,
            in_flight,
            cancel_flag,
            next_id: 0,
            thread,
        }
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator_name
    }

    /// Queue a request, returning its id
    pub fn submit(&mut self, request: NarrativeRequest) -> Result<RequestId, NarrativeError> {
        if self.thread.is_none() || self.is_cancelled() {
            return Err(NarrativeError::WorkerUnavailable);
        }

        self.next_id += 1;
        let request_id = self.next_id;

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let sent = self.request_tx.send(WorkerRequest::Generate {
            request_id,
            request: Box::new(request),
        });

        if sent.is_err() {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            return Err(NarrativeError::WorkerUnavailable);
        }
        Ok(request_id)
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Option<NarrativeResponse> {
        self.response_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next response
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<NarrativeResponse> {
        self.response_rx.recv_timeout(timeout).ok()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    /// Drop every request that has not started yet. The one running now
    /// still finishes.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    pub fn shutdown(&self) {
        self.cancel();
        let _ = self.request_tx.send(WorkerRequest::Shutdown);
    }
}

impl Drop for NarrativeWorker {
    fn drop(&mut self) {
        self.shutdown();
        let Some(thread) = self.thread.take() else {
            return;
        };
        // A request mid-flight can block for the whole HTTP timeout; let the
        // thread finish it on its own instead of holding up the caller
        if self.is_busy() {
            tracing::debug!(in_flight = self.in_flight(), "Detaching busy narrative worker");
            return;
        }
        let _ = thread.join();
    }
}

struct WorkerContext {
    generator: Box<dyn NarrativeGenerator>,
    response_tx: Sender<NarrativeResponse>,
    in_flight: Arc<AtomicUsize>,
    cancel_flag: Arc<AtomicBool>,
}

impl WorkerContext {
    fn run(&self, request_rx: Receiver<WorkerRequest>) {
        while let Ok(request) = request_rx.recv() {
            match request {
                WorkerRequest::Shutdown => break,

                WorkerRequest::Generate {
                    request_id,
                    request,
                } => {
                    if self.cancel_flag.load(Ordering::SeqCst) {
                        tracing::debug!(request_id, "Skipping cancelled narrative request");
                        self.in_flight.fetch_sub(1, Ordering::SeqCst);
                        continue;
                    }

                    let response = match self.generator.generate(&request) {
                        Ok(analysis) => NarrativeResponse::Complete {
                            request_id,
                            analysis,
                        },
                        Err(error) => NarrativeResponse::Failed { request_id, error },
                    };

                    self.in_flight.fetch_sub(1, Ordering::SeqCst);
                    if self.response_tx.send(response).is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!(generator = self.generator.name(), "Narrative worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tradejournal_core::{AccountConfig, TradingStats, compute};

    struct EchoGenerator;

    impl NarrativeGenerator for EchoGenerator {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn generate(&self, request: &NarrativeRequest) -> Result<CoachAnalysis, NarrativeError> {
            if request.recent_entries.is_empty() {
                let mut analysis = CoachAnalysis::placeholder();
                analysis.next_focus = format!("{:.0}", request.stats.current_balance);
                Ok(analysis)
            } else {
                Err(NarrativeError::Http("offline".to_string()))
            }
        }
    }

    /// Sleeps before answering, like a slow network call
    struct SlowGenerator(Duration);

    impl NarrativeGenerator for SlowGenerator {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn generate(&self, _request: &NarrativeRequest) -> Result<CoachAnalysis, NarrativeError> {
            std::thread::sleep(self.0);
            Ok(CoachAnalysis::placeholder())
        }
    }

    fn empty_request() -> NarrativeRequest {
        let account = AccountConfig::default();
        let stats: TradingStats = compute(&[], &account);
        NarrativeRequest::new(&[], &stats, &account)
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_submit_and_receive_in_order() {
        let mut worker = NarrativeWorker::new(Box::new(EchoGenerator));
        assert_eq!(worker.generator_name(), "echo");

        let first = worker.submit(empty_request()).unwrap();
        let second = worker.submit(empty_request()).unwrap();
        assert!(second > first);

        match worker.recv_timeout(WAIT) {
            Some(NarrativeResponse::Complete {
                request_id,
                analysis,
            }) => {
                assert_eq!(request_id, first);
                assert_eq!(analysis.next_focus, "50000");
            }
            other => panic!("unexpected response: {other:?}"),
        }
        assert!(matches!(
            worker.recv_timeout(WAIT),
            Some(NarrativeResponse::Complete { request_id, .. }) if request_id == second
        ));
        assert_eq!(worker.in_flight(), 0);
    }

    #[test]
    fn test_generator_errors_come_back_as_failed() {
        let mut worker = NarrativeWorker::new(Box::new(EchoGenerator));
        let mut request = empty_request();
        request.recent_entries = vec![
            tradejournal_core::EntryDraft::trade(jiff::civil::date(2024, 1, 2), 1.0)
                .into_entry(tradejournal_core::EntryId::new("x")),
        ];

        let id = worker.submit(request).unwrap();
        assert!(matches!(
            worker.recv_timeout(WAIT),
            Some(NarrativeResponse::Failed { request_id, error: NarrativeError::Http(_) }) if request_id == id
        ));
    }

    #[test]
    fn test_try_recv_is_non_blocking() {
        let worker = NarrativeWorker::new(Box::new(EchoGenerator));
        assert!(worker.try_recv().is_none());
        assert!(!worker.is_busy());
    }

    #[test]
    fn test_drop_with_queued_requests_returns_promptly() {
        let mut worker = NarrativeWorker::new(Box::new(SlowGenerator(Duration::from_secs(1))));
        for _ in 0..4 {
            worker.submit(empty_request()).unwrap();
        }

        let started = std::time::Instant::now();
        drop(worker);
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_cancel_skips_queued_requests() {
        let mut worker =
            NarrativeWorker::new(Box::new(SlowGenerator(Duration::from_millis(200))));
        for _ in 0..3 {
            worker.submit(empty_request()).unwrap();
        }
        worker.cancel();
        assert!(worker.is_cancelled());
        assert!(matches!(
            worker.submit(empty_request()),
            Err(NarrativeError::WorkerUnavailable)
        ));

        // At most the request already running gets answered
        let mut answered = 0;
        while worker.recv_timeout(Duration::from_millis(800)).is_some() {
            answered += 1;
        }
        assert!(answered <= 1);
        assert_eq!(worker.in_flight(), 0);
    }
}
