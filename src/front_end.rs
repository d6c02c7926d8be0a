//! Front end that queues paths and feeds them to the digest engine.
//!
//! Paths arrive either as startup arguments (filtered silently to existing
//! regular files) or as drop events (queued as-is). Processing drains the
//! queue, appends each result to the display surface, and announces each
//! failure on the surface's notification channel without stopping the batch.
//! A surface that cannot show one file is logged and counted as a failure
//! for that file; the rest of the queue still runs.

use std::collections::VecDeque;
use std::ops::AddAssign;
use std::path::PathBuf;
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;
use tracing::{debug, info, warn};

use crate::contract::Report;
use crate::error::DigestError;
use crate::hashing::{file_digest, Algorithm};
use crate::paths::{absolute_path, accept_startup_paths};
use crate::surface::DisplaySurface;

/// Counts for one processed batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) hashed: usize,
    pub(crate) failed: usize,
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.hashed += other.hashed;
        self.failed += other.failed;
    }
}

/// Queue of paths waiting for the digest engine.
pub(crate) struct FrontEnd {
    queue: VecDeque<PathBuf>,
    algorithm: Algorithm,
    jobs: usize,
}

impl FrontEnd {
    /// Create an empty queue; `jobs` below one is treated as one.
    pub(crate) fn new(algorithm: Algorithm, jobs: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            algorithm,
            jobs: jobs.max(1),
        }
    }

    /// Queue startup arguments, skipping anything that is not a regular file.
    pub(crate) fn accept_startup<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let offered = paths.len();
        let accepted = accept_startup_paths(paths);
        debug!(
            offered,
            accepted = accepted.len(),
            "filtered startup arguments"
        );
        let count = accepted.len();
        self.queue.extend(accepted);
        count
    }

    /// Queue every path delivered by a drop event.
    pub(crate) fn drop_paths<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let before = self.queue.len();
        self.queue.extend(paths.into_iter().map(Into::into));
        debug!(dropped = self.queue.len() - before, "queued drop event");
    }

    /// Number of queued paths not yet processed.
    pub(crate) fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue through the engine.
    ///
    /// With one job, results arrive in queue order. With more, they arrive
    /// in completion order.
    pub(crate) fn process(&mut self, surface: &mut dyn DisplaySurface) -> Summary {
        let workers = self.jobs.min(self.queue.len());
        info!(
            files = self.queue.len(),
            workers,
            algorithm = self.algorithm.name(),
            "processing batch"
        );
        if workers <= 1 {
            return self.process_sequential(surface);
        }
        self.process_parallel(surface, workers)
    }

    fn process_sequential(&mut self, surface: &mut dyn DisplaySurface) -> Summary {
        let mut summary = Summary::default();
        while let Some(path) = self.queue.pop_front() {
            let outcome = hash_one(path, self.algorithm);
            deliver(surface, outcome, &mut summary);
        }
        summary
    }

    fn process_parallel(
        &mut self,
        surface: &mut dyn DisplaySurface,
        workers: usize,
    ) -> Summary {
        let queue = Mutex::new(std::mem::take(&mut self.queue));
        let algorithm = self.algorithm;
        let (tx, rx) = mpsc::channel();
        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let queue = &queue;
                scope.spawn(move || {
                    while let Some(path) = next_path(queue) {
                        if tx.send(hash_one(path, algorithm)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            let mut summary = Summary::default();
            for outcome in rx {
                deliver(surface, outcome, &mut summary);
            }
            summary
        })
    }
}

fn next_path(queue: &Mutex<VecDeque<PathBuf>>) -> Option<PathBuf> {
    let mut queue = queue.lock().unwrap_or_else(PoisonError::into_inner);
    queue.pop_front()
}

fn hash_one(path: PathBuf, algorithm: Algorithm) -> Result<Report, DigestError> {
    let path = absolute_path(&path).unwrap_or(path);
    let digest = file_digest(&path, algorithm)?;
    Ok(Report {
        path,
        algorithm,
        digest,
    })
}

fn deliver(
    surface: &mut dyn DisplaySurface,
    outcome: Result<Report, DigestError>,
    summary: &mut Summary,
) {
    match outcome {
        Ok(report) => {
            debug!(path = %report.path.display(), digest = %report.digest, "hashed");
            match surface.append(&report) {
                Ok(()) => summary.hashed += 1,
                Err(err) => {
                    warn!(path = %report.path.display(), "failed to display result: {err:#}");
                    summary.failed += 1;
                }
            }
        }
        Err(err) => {
            debug!(code = err.code(), error = %err, "digest failed");
            summary.failed += 1;
            if let Err(display_err) = surface.notify(&err) {
                warn!("failed to display notification for '{err}': {display_err:#}");
            }
        }
    }
}
