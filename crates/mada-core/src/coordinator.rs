// ── Status poll coordination ──
//
// Owns the periodic status fetch and distributes the resulting snapshot
// through a `watch` channel. One background task performs all fetches
// sequentially, so at most one request is ever in flight; out-of-cycle
// refresh requests go through a capacity-1 channel and coalesce.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mada_api::DeviceClient;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;

/// One complete status document from a successful poll. Replaced
/// wholesale behind an `Arc` each cycle -- readers always see either the
/// previous complete document or the new one, never a partial merge.
pub type StatusSnapshot = Map<String, Value>;

/// Observable poller state, distributed via `watch`.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    /// Last known-good snapshot. Retained across failed cycles.
    pub snapshot: Option<Arc<StatusSnapshot>>,
    /// Cause of the most recent failed cycle, `None` after a success.
    /// While set, entity views read as unavailable even though the
    /// stale snapshot is still held.
    pub last_error: Option<String>,
    /// When the last successful poll completed.
    pub last_updated: Option<DateTime<Utc>>,
}

impl PollState {
    /// Whether entity reads may use the snapshot right now.
    pub fn is_available(&self) -> bool {
        self.snapshot.is_some() && self.last_error.is_none()
    }
}

/// Periodic status poller for one device.
///
/// Cheaply cloneable via `Arc`. Created by `Session::establish`;
/// consumers interact with it through [`subscribe`](Self::subscribe)
/// and [`request_refresh`](Self::request_refresh).
#[derive(Clone)]
pub struct PollCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    client: DeviceClient,
    interval: Duration,
    state: watch::Sender<PollState>,
    refresh_tx: mpsc::Sender<()>,
    refresh_rx: Mutex<Option<mpsc::Receiver<()>>>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PollCoordinator {
    pub(crate) fn new(client: DeviceClient, interval: Duration) -> Self {
        let (state, _) = watch::channel(PollState::default());
        // Capacity 1: a refresh requested while a fetch is in flight
        // queues exactly one follow-up; further requests coalesce.
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        Self {
            inner: Arc::new(CoordinatorInner {
                client,
                interval,
                state,
                refresh_tx,
                refresh_rx: Mutex::new(Some(refresh_rx)),
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    /// Perform the first fetch inline, then spawn the periodic poll task.
    ///
    /// The session is not "ready" until this returns: the first cycle's
    /// outcome -- success or failure -- is recorded in [`PollState`]
    /// either way, and the periodic timer starts counting from here.
    pub(crate) async fn start(&self) -> Result<(), CoreError> {
        let first = fetch_once(&self.inner).await;

        if let Some(rx) = self.inner.refresh_rx.lock().await.take() {
            let inner = Arc::clone(&self.inner);
            *self.inner.task.lock().await = Some(tokio::spawn(poll_task(inner, rx)));
        }

        first
    }

    /// Schedule an out-of-cycle fetch.
    ///
    /// Does not reset the periodic timer's phase. Requests arriving while
    /// a fetch is in flight collapse to at most one queued follow-up.
    pub fn request_refresh(&self) {
        if self.inner.refresh_tx.try_send(()).is_err() {
            debug!("refresh already pending; request coalesced");
        }
    }

    /// Current poller state (cheap clone of `Arc`s).
    pub fn state(&self) -> PollState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to poll-state changes.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.inner.state.subscribe()
    }

    /// The last known-good snapshot, if any poll has ever succeeded.
    pub fn snapshot(&self) -> Option<Arc<StatusSnapshot>> {
        self.inner.state.borrow().snapshot.clone()
    }

    /// Stop the poll task and wait for it to finish.
    pub(crate) async fn shutdown(&self) {
        self.inner.cancel.cancel();
        if let Some(task) = self.inner.task.lock().await.take() {
            let _ = task.await;
        }
    }
}

// ── Background task ──────────────────────────────────────────────────

/// Poll on the fixed interval, interleaving coalesced refresh requests.
/// Fetches run sequentially in this task -- that is what guarantees "at
/// most one in flight".
async fn poll_task(inner: Arc<CoordinatorInner>, mut refresh_rx: mpsc::Receiver<()>) {
    let mut interval = tokio::time::interval(inner.interval);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = inner.cancel.cancelled() => break,
            _ = interval.tick() => {
                let _ = fetch_once(&inner).await;
            }
            Some(()) = refresh_rx.recv() => {
                let _ = fetch_once(&inner).await;
            }
        }
    }
}

/// One fetch cycle: bounded by the client's per-request timeout. On
/// timeout the response future is dropped, so a late answer can never
/// overwrite a newer snapshot.
async fn fetch_once(inner: &CoordinatorInner) -> Result<(), CoreError> {
    match inner.client.fetch_status().await {
        Ok(doc) => {
            let snapshot = Arc::new(doc);
            inner.state.send_modify(|s| {
                s.snapshot = Some(Arc::clone(&snapshot));
                s.last_error = None;
                s.last_updated = Some(Utc::now());
            });
            debug!(keys = snapshot.len(), "status poll succeeded");
            Ok(())
        }
        Err(e) => {
            let reason = if e.is_timeout() {
                "status request timed out".to_owned()
            } else {
                e.to_string()
            };
            warn!(error = %reason, "status poll failed");
            inner.state.send_modify(|s| {
                s.last_error = Some(reason.clone());
            });
            Err(CoreError::UpdateFailed { reason })
        }
    }
}
