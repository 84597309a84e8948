//! Thread-pool-with-timeout job runner used by the orchestrator to fan a
//! batch of independent jobs (one genetic-TSP solve, or one A* stitch, per
//! cluster) out across threads and collect results in submission order.
//!
//! Mirrors the shape of a `multiprocessing.Pool`-based fan-out (one worker
//! per job, `apply_async` + a per-job `get(timeout)`) but realized with OS
//! threads and `mpsc` channels, since Rust has no interpreter-level lock
//! forcing process isolation for parallel CPU work.

use std::sync::mpsc;
use std::time::Duration;

use crate::error::RoutingError;

/// runs each job on its own thread, returning one result per job in the
/// same order the jobs were submitted. A job whose thread doesn't report
/// back within `timeout` yields `RoutingError::Timeout`; the thread itself
/// is not cancelled and may continue running to completion in the
/// background, its result simply discarded.
pub fn run_jobs<T, F>(jobs: Vec<F>, timeout: Duration) -> Vec<Result<T, RoutingError>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    // Every job is submitted before any result is awaited: a pool sized one
    // thread per job, not a sequential spawn-then-wait loop, so the wall
    // clock for the whole batch is the slowest job, not the sum of all of
    // them.
    let receivers: Vec<mpsc::Receiver<T>> = jobs
        .into_iter()
        .map(|job| {
            let (tx, rx) = mpsc::channel();
            std::thread::spawn(move || {
                let _ = tx.send(job());
            });
            rx
        })
        .collect();

    receivers
        .into_iter()
        .map(|rx| {
            rx.recv_timeout(timeout)
                .map_err(|_| RoutingError::Timeout(timeout))
        })
        .collect()
}
