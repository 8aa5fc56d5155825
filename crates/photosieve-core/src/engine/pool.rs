//! Bounded worker pool for concurrent scoring.
//!
//! Requests fan out over a fixed set of workers through a round-robin
//! dispatcher; every worker runs the full pipeline synchronously per
//! request. A collector task owns the pending map keyed by request id and
//! delivers each outcome to the ticket that is still waiting for it.
//! Completion order is unrelated to submission order; correlation is by
//! id only.
//!
//! Requests are independent and share no mutable state, so the only
//! synchronized resources are the channels and the pending map. The pool
//! performs no admission control; callers bound their own batch sizes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::{score_request, ScoreOutcome, ScoreRequest};

type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<ScoreOutcome>>>>;

/// Handle to one in-flight request.
///
/// Dropping the ticket abandons the request; the engine will quietly
/// discard its outcome.
#[derive(Debug)]
pub struct ScoreTicket {
    id: String,
    rx: oneshot::Receiver<ScoreOutcome>,
}

impl ScoreTicket {
    /// The id this ticket correlates to.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait for the outcome. Returns `None` if the request was cancelled
    /// or the engine shut down first.
    pub async fn wait(self) -> Option<ScoreOutcome> {
        self.rx.await.ok()
    }
}

/// Worker pool scoring many images concurrently.
///
/// The engine holds no cross-request state beyond the pending map; each
/// request's buffers live and die inside one worker.
pub struct ScoringEngine {
    task_tx: mpsc::UnboundedSender<ScoreRequest>,
    pending: PendingMap,
    workers: Vec<JoinHandle<()>>,
}

impl ScoringEngine {
    /// Create an engine with one worker per available CPU.
    pub fn with_default_workers() -> Self {
        Self::new(num_cpus::get())
    }

    /// Create an engine with a fixed worker count (floored at 1).
    ///
    /// Must be called from within a Tokio runtime; the pool spawns its
    /// dispatcher, workers, and collector onto it.
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let (task_tx, mut task_rx) = mpsc::unbounded_channel::<ScoreRequest>();
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<ScoreOutcome>();

        // Round-robin dispatcher feeding one channel per worker
        let (worker_txs, worker_rxs): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<ScoreRequest>())
            .unzip();

        tokio::spawn(async move {
            let mut next = 0;
            while let Some(request) = task_rx.recv().await {
                let _ = worker_txs[next].send(request);
                next = (next + 1) % worker_txs.len();
            }
        });

        let mut workers = Vec::with_capacity(worker_count + 1);
        for mut worker_rx in worker_rxs {
            let done_tx = done_tx.clone();
            workers.push(tokio::spawn(async move {
                while let Some(request) = worker_rx.recv().await {
                    let outcome = score_request(request);
                    let _ = done_tx.send(outcome);
                }
            }));
        }
        drop(done_tx);

        // Collector: resolves each outcome against the pending map. An id
        // missing from the map was cancelled; its outcome is discarded.
        let collector_pending = Arc::clone(&pending);
        workers.push(tokio::spawn(async move {
            while let Some(outcome) = done_rx.recv().await {
                let sender = collector_pending
                    .lock()
                    .expect("pending map lock poisoned")
                    .remove(outcome.id());
                if let Some(sender) = sender {
                    let _ = sender.send(outcome);
                }
            }
        }));

        Self {
            task_tx,
            pending,
            workers,
        }
    }

    /// Number of spawned tasks (workers plus the collector).
    pub fn task_count(&self) -> usize {
        self.workers.len()
    }

    /// Submit a request and receive a ticket for its outcome.
    ///
    /// Ids must be unique among in-flight requests; reusing an id
    /// abandons the earlier ticket.
    pub fn submit(&self, request: ScoreRequest) -> ScoreTicket {
        let id = request.id.clone();
        let (tx, rx) = oneshot::channel();

        self.pending
            .lock()
            .expect("pending map lock poisoned")
            .insert(id.clone(), tx);

        if self.task_tx.send(request).is_err() {
            // Engine is shutting down; the dropped sender resolves the
            // ticket to None.
            self.pending
                .lock()
                .expect("pending map lock poisoned")
                .remove(&id);
        }

        ScoreTicket { id, rx }
    }

    /// Submit a request and wait for its outcome.
    pub async fn score(&self, request: ScoreRequest) -> Option<ScoreOutcome> {
        self.submit(request).wait().await
    }

    /// Cancel an in-flight request by id.
    ///
    /// In-progress pixel work is not interrupted, but no outcome will be
    /// delivered for this id once cancellation is observed. Returns true
    /// if the id was still pending.
    pub fn cancel(&self, id: &str) -> bool {
        self.pending
            .lock()
            .expect("pending map lock poisoned")
            .remove(id)
            .is_some()
    }
}

impl Drop for ScoringEngine {
    fn drop(&mut self) {
        // Workers drain and exit once the task channel closes; outstanding
        // tickets resolve to None when their pending entries drop.
        for worker in &self.workers {
            worker.abort();
        }
    }
}
