//! Bounded-concurrency clone worker pool.

use crate::cloner::Cloner;
use crate::search::RepoRef;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// A fixed-size pool of workers applying a [`Cloner`] to submitted
/// repositories.
///
/// Construction spawns the workers, so there is no unstarted state to
/// misuse. The channel between driver and workers is bounded at the worker
/// count; once every worker is busy and the queue is full, [`submit`]
/// blocks, which is the pipeline's only backpressure mechanism.
///
/// A clone failure is logged and isolated to its item: sibling workers and
/// later submissions are unaffected, and failed items are not re-queued.
///
/// [`submit`]: ClonePool::submit
pub struct ClonePool {
    tx: mpsc::Sender<RepoRef>,
    workers: Vec<JoinHandle<()>>,
}

impl ClonePool {
    /// Starts `workers` clone workers sharing `cloner`.
    #[must_use]
    pub fn start(cloner: Arc<dyn Cloner>, workers: usize) -> Self {
        let workers = workers.max(1);
        let (tx, rx) = mpsc::channel::<RepoRef>(workers);
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..workers)
            .map(|worker| {
                let rx = Arc::clone(&rx);
                let cloner = Arc::clone(&cloner);
                tokio::spawn(async move {
                    loop {
                        // Hold the lock only for the receive so siblings can
                        // pull work while this clone runs.
                        let repo = { rx.lock().await.recv().await };
                        let Some(repo) = repo else { break };

                        debug!(worker, repo = %repo.slug(), "picked up clone");
                        if let Err(err) = cloner.clone_repo(&repo).await {
                            error!(repo = %repo.slug(), error = %err, "clone failed");
                        }
                    }
                })
            })
            .collect();

        Self { tx, workers }
    }

    /// Hands one repository to the pool, in submission order.
    ///
    /// Blocks once all workers are busy and the queue is full.
    pub async fn submit(&self, repo: RepoRef) {
        // The receiver lives until shutdown, so this only fails if every
        // worker died.
        if let Err(err) = self.tx.send(repo).await {
            error!(repo = %err.0.slug(), "clone pool is gone, dropping submission");
        }
    }

    /// Signals that no more work is coming and waits for in-flight and
    /// queued clones to finish.
    pub async fn shutdown(self) {
        drop(self.tx);
        for result in join_all(self.workers).await {
            if result.is_err() {
                warn!("clone worker panicked");
            }
        }
    }
}
