//! Execution strategies.
//!
//! The store never runs anything itself; it asks an [`ExecutionStrategy`] for
//! the output of a command. The bundled strategy waits a fixed delay and
//! replays the catalog's canned output. A real backend could implement the
//! same trait without touching the store.

use std::time::Duration;

use async_trait::async_trait;
use clitutor_types::Command;
use thiserror::Error;
use tracing::debug;

/// Delay used by [`SimulatedExecution::default`].
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1000);

/// Failure reported by a strategy. Rendered into the transcript, never raised
/// past the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("{0}")]
    Failed(String),
}

/// Produces the output of a command, eventually.
#[async_trait]
pub trait ExecutionStrategy: Send + Sync {
    async fn execute(&self, command: &Command) -> Result<String, ExecutionError>;
}

/// Waits `delay`, then returns the command's canned output.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedExecution {
    delay: Duration,
}

impl SimulatedExecution {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay at all; used by tests and scripted runs.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedExecution {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

#[async_trait]
impl ExecutionStrategy for SimulatedExecution {
    async fn execute(&self, command: &Command) -> Result<String, ExecutionError> {
        debug!(command = %command.id, delay_ms = self.delay.as_millis() as u64, "simulating execution");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(command.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clitutor_types::Difficulty;
    use std::time::Instant;

    fn command() -> Command {
        Command {
            id: "claude-version".into(),
            name: "claude --version".into(),
            description: String::new(),
            syntax: "claude --version".into(),
            example: "claude --version".into(),
            output: "Claude CLI v2.1.0".into(),
            category: "basic".into(),
            difficulty: Difficulty::Beginner,
            best_practices: vec![],
            common_mistakes: vec![],
            related_commands: vec![],
        }
    }

    #[tokio::test]
    async fn replays_canned_output() {
        let output = SimulatedExecution::instant().execute(&command()).await.unwrap();
        assert_eq!(output, "Claude CLI v2.1.0");
    }

    #[tokio::test]
    async fn waits_for_the_configured_delay() {
        let started = Instant::now();
        SimulatedExecution::new(Duration::from_millis(30))
            .execute(&command())
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn default_delay_is_one_second() {
        assert_eq!(SimulatedExecution::default().delay(), Duration::from_millis(1000));
    }
}
