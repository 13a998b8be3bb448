//! Background compilation with cancellation of superseded runs.
//!
//! Every [`CompileWorker::submit`] starts a new generation. A run polls the
//! generation counter between entries and gives up as soon as a newer
//! submission exists, so only the latest configuration produces a result.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};

use crate::error::Result;
use crate::model::OutlineNode;
use crate::options::CompileOptions;
use crate::pipeline::{compile_with, Compilation};

/// Output of one background run.
#[derive(Debug)]
pub struct CompileResult {
    pub generation: u64,
    pub outcome: Result<Compilation>,
}

/// Runs compilations on background threads.
pub struct CompileWorker {
    generation: Arc<AtomicU64>,
    running: Arc<AtomicUsize>,
    tx: Sender<CompileResult>,
    rx: Receiver<CompileResult>,
}

struct RunningGuard(Arc<AtomicUsize>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CompileWorker {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            running: Arc::new(AtomicUsize::new(0)),
            tx,
            rx,
        }
    }

    /// Start compiling `root` with `options`, superseding any earlier run.
    ///
    /// Returns the generation of the new run.
    pub fn submit(&self, root: Arc<OutlineNode>, options: CompileOptions) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();

        self.running.fetch_add(1, Ordering::SeqCst);
        let guard = RunningGuard(Arc::clone(&self.running));

        thread::spawn(move || {
            let _guard = guard;
            let keep_going = || current.load(Ordering::SeqCst) == generation;

            match compile_with(Some(&root), &options, keep_going) {
                Ok(Some(compilation)) => {
                    let _ = tx.send(CompileResult {
                        generation,
                        outcome: Ok(compilation),
                    });
                }
                Ok(None) => log::debug!("Compile run {} superseded", generation),
                Err(e) => {
                    let _ = tx.send(CompileResult {
                        generation,
                        outcome: Err(e),
                    });
                }
            }
        });

        generation
    }

    /// Cancel the current run without starting another.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Generation of the most recent submission.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether any run is still in progress.
    pub fn is_busy(&self) -> bool {
        self.running.load(Ordering::SeqCst) > 0
    }

    fn is_current(&self, result: &CompileResult) -> bool {
        result.generation == self.generation()
    }

    /// The newest finished result of the current generation, if any.
    ///
    /// Results of superseded runs are discarded.
    pub fn latest(&self) -> Option<CompileResult> {
        self.rx
            .try_iter()
            .filter(|result| self.is_current(result))
            .last()
    }

    /// Block until the current generation finishes or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Option<CompileResult> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(result) if self.is_current(&result) => return Some(result),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }
}

impl Default for CompileWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn wide(n: usize) -> Arc<OutlineNode> {
        let mut root = OutlineNode::root();
        for i in 0..n {
            root.add_child(
                OutlineNode::labeled(format!("Chapter {}", i))
                    .with_child(OutlineNode::labeled(format!("Section {}", i))),
            );
        }
        Arc::new(root)
    }

    #[test]
    fn test_submit_and_wait() {
        let worker = CompileWorker::new();
        let generation = worker.submit(wide(10), CompileOptions::new().with_todo_depth(0));
        let result = worker.wait(TIMEOUT).unwrap();
        assert_eq!(result.generation, generation);
        let compilation = result.outcome.unwrap();
        assert_eq!(compilation.project().unwrap().items.len(), 10);
    }

    #[test]
    fn test_only_latest_generation_is_reported() {
        let worker = CompileWorker::new();
        let root = wide(20_000);
        worker.submit(Arc::clone(&root), CompileOptions::new().with_todo_depth(0));
        let last = worker.submit(root, CompileOptions::new().with_todo_depth(1));

        let result = worker.wait(TIMEOUT).unwrap();
        assert_eq!(result.generation, last);
        assert_eq!(
            result.outcome.unwrap().report.stats.todos,
            20_000
        );
        assert!(worker.latest().is_none());
    }

    #[test]
    fn test_errors_are_delivered() {
        let worker = CompileWorker::new();
        worker.submit(wide(1), CompileOptions::new().with_todo_depth(5));
        let result = worker.wait(TIMEOUT).unwrap();
        assert!(matches!(result.outcome, Err(Error::DepthOutOfRange { .. })));
    }

    #[test]
    fn test_cancel_discards_run() {
        let worker = CompileWorker::new();
        worker.submit(wide(10), CompileOptions::new().with_todo_depth(0));
        worker.cancel();
        assert!(worker.wait(Duration::from_millis(200)).is_none());
        assert!(worker.latest().is_none());
    }
}
