//! Background solving with cooperative cancellation.
//!
//! `Engine::solve` validates the puzzle on the caller's thread, then runs
//! the search on a dedicated worker thread and hands the path to a
//! callback. Every run gets its own cancel flag, so a cancelled run never
//! reports back and the engine can start the next run right away.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::board::Board;
use crate::config::Configuration;
use crate::error::SolveError;
use crate::pieces::Piece;
use crate::solver::Search;

/// Handle to a running solve.
pub struct SolveHandle {
    thread: JoinHandle<()>,
}

impl SolveHandle {
    /// Blocks until the worker has finished, including the callback.
    pub fn join(self) {
        if self.thread.join().is_err() {
            warn!("solver thread panicked");
        }
    }

    /// Whether the worker has exited, callback included.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}

/// Front end that runs one search at a time off the calling thread.
#[derive(Default)]
pub struct Engine {
    cancel: Arc<AtomicBool>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts solving `pieces` in the background.
    ///
    /// Invalid puzzles are rejected here, before any thread is started.
    /// Otherwise `on_complete` runs once on the worker thread with the path
    /// (initial board first), or `None` when the goal is unreachable. It
    /// does not run if the search is cancelled.
    ///
    /// Starting a run while another is still going is not guarded against;
    /// cancel the previous one first.
    pub fn solve<F>(
        &mut self,
        pieces: Vec<Piece>,
        config: Configuration,
        on_complete: F,
    ) -> Result<SolveHandle, SolveError>
    where
        F: FnOnce(Option<Vec<Board>>) + Send + 'static,
    {
        let search = Search::new(pieces, config)?;

        let cancel = Arc::new(AtomicBool::new(false));
        self.cancel = Arc::clone(&cancel);

        let thread = thread::Builder::new()
            .name("huarong-solver".to_string())
            .spawn(move || {
                let outcome = search.run(&cancel);
                if cancel.load(Ordering::Acquire) {
                    debug!("dropping result of cancelled run");
                    return;
                }
                match outcome {
                    Ok(solution) => on_complete(Some(solution.path)),
                    Err(SolveError::NoSolution { .. }) => on_complete(None),
                    Err(e) => warn!("search stopped: {e}"),
                }
            })?;

        Ok(SolveHandle { thread })
    }

    /// Asks the current run to stop. Idempotent, and harmless when no run
    /// is active.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }
}
