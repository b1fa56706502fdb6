//! Runtime errors

use sprig_core::RenderError;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Runtime error
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Still busy after {ticks} idle ticks")]
    Stalled { ticks: usize },
}
