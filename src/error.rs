use thiserror::Error;

/// Failures surfaced by the host layer while the shell runs.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("window backend failed: {0}")]
    Backend(String),
    #[error("render surface lost")]
    SurfaceLost,
    #[error("task queue is closed")]
    TaskQueueClosed,
    #[error("task queue is full")]
    TaskQueueFull,
}

pub type ShellResult<T> = Result<T, ShellError>;
