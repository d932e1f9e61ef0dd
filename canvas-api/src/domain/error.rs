use thiserror::Error;

/// Errors from timer state transitions.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("a timer is already running for this designer")]
    AlreadyRunning,
    #[error("timer not found or already stopped")]
    NotFound,
}
