//! Engine errors

use crate::FiberId;

/// Result type for engine operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors surfaced by the reconciler and its render target
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Element rejected by builder-time validation
    #[error("Invalid element: {0}")]
    InvalidElement(String),

    /// The render target refused a mutation
    #[error("Render target error: {0}")]
    Target(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// A fiber handle that should be live no longer resolves
    #[error("Fiber {0:?} is not live")]
    MissingFiber(FiberId),
}

impl RenderError {
    /// Wrap a render target error
    pub fn target<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Target(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_target_error_keeps_source() {
        let err = RenderError::target(Boom);
        assert_eq!(err.to_string(), "Render target error: boom");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_element_message() {
        let err = RenderError::InvalidElement("empty tag".into());
        assert_eq!(err.to_string(), "Invalid element: empty tag");
    }
}
