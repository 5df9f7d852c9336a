use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::Config;
use crate::dispatch::{DispatchError, Dispatcher, LinearProgramDispatcher, MeritOrderDispatcher};
use crate::domain::{Allocation, LoadRequest};
use crate::telemetry::SystemMonitor;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub controller: Arc<DispatchController>,
    pub monitor: Arc<SystemMonitor>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        let controller = Arc::new(DispatchController::new(Duration::from_millis(
            cfg.dispatch.solve_timeout_ms,
        )));

        Self {
            cfg: Arc::new(cfg),
            controller,
            monitor: Arc::new(SystemMonitor::new()),
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("dispatch exceeded its {0:?} budget")]
    Timeout(Duration),

    #[error("dispatch task failed: {0}")]
    Task(String),
}

/// Owns both dispatch strategies and the time budget of the exact solve
pub struct DispatchController {
    heuristic: Arc<Dispatcher>,
    optimal: Arc<Dispatcher>,
    solve_timeout: Duration,
}

impl DispatchController {
    pub fn new(solve_timeout: Duration) -> Self {
        Self {
            heuristic: Arc::new(Dispatcher::new(MeritOrderDispatcher)),
            optimal: Arc::new(Dispatcher::new(LinearProgramDispatcher)),
            solve_timeout,
        }
    }

    pub fn solve_timeout(&self) -> Duration {
        self.solve_timeout
    }

    /// Merit-order dispatch. Cheap enough to run on the async executor.
    pub fn dispatch_heuristic(&self, request: &LoadRequest) -> Result<Vec<Allocation>, DispatchError> {
        self.heuristic.dispatch(request)
    }

    /// Exact dispatch on the blocking pool, bounded by the solve timeout.
    ///
    /// On timeout the solve is abandoned; its thread finishes in the background
    /// and the result is dropped.
    pub async fn dispatch_optimal(&self, request: LoadRequest) -> Result<Vec<Allocation>, ControllerError> {
        let dispatcher = Arc::clone(&self.optimal);
        let task = tokio::task::spawn_blocking(move || dispatcher.dispatch(&request));

        match tokio::time::timeout(self.solve_timeout, task).await {
            Ok(Ok(result)) => Ok(result?),
            Ok(Err(join_error)) => Err(ControllerError::Task(join_error.to_string())),
            Err(_) => {
                tracing::warn!(timeout = ?self.solve_timeout, "optimal dispatch timed out");
                Err(ControllerError::Timeout(self.solve_timeout))
            }
        }
    }
}
