//! Fixed-interval loop around the patrol cycle.

use crate::patrol::cycle::{PatrolCycle, PatrolReport};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Result of one scheduled iteration.
#[derive(Debug)]
pub enum IterationOutcome {
    Completed(PatrolReport),
    /// The cycle panicked or was cancelled; the loop keeps going
    Crashed(String),
}

/// Runs the patrol cycle forever, one pass at a time.
pub struct PatrolScheduler {
    cycle: Arc<PatrolCycle>,
    interval: Duration,
}

impl PatrolScheduler {
    pub fn new(cycle: Arc<PatrolCycle>, interval: Duration) -> Self {
        Self { cycle, interval }
    }

    pub fn cycle(&self) -> &Arc<PatrolCycle> {
        &self.cycle
    }

    /// Run a single pass inside its own task so a panic stays contained.
    pub async fn run_iteration(&self) -> IterationOutcome {
        let cycle = Arc::clone(&self.cycle);
        match tokio::spawn(async move { cycle.run_once().await }).await {
            Ok(report) => IterationOutcome::Completed(report),
            Err(e) => {
                error!("Critical error in patrol cycle: {}", e);
                IterationOutcome::Crashed(e.to_string())
            }
        }
    }

    /// Loop until the process is stopped externally.
    pub async fn run(self) {
        info!(
            "Patrol scheduler is running. Interval {} seconds.",
            self.interval.as_secs()
        );

        loop {
            self.run_iteration().await;

            info!(
                "Patrol finished. Next round in {:.1} minutes.",
                self.interval.as_secs_f64() / 60.0
            );
            tokio::time::sleep(self.interval).await;
        }
    }
}
