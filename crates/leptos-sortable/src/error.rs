//! Controller errors
//!
//! Every variant describes an input that was ignored. State is never
//! modified when one of these is returned.

/// Result type for controller operations
pub type SortableResult<T> = Result<T, SortableError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SortableError {
    #[error("a drag session is already active")]
    Busy,

    #[error("no drag session is active")]
    NoSession,

    #[error("item is not in the list")]
    UnknownItem,

    #[error("item has no measurable geometry")]
    Unmeasured,
}
