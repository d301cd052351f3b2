//! Error taxonomy for ember-ui.
//!
//! Setup-time registration failures surface as recoverable `Result`s so the
//! host can report them. Per-frame dispatch failures are logged and the
//! offending operation skipped - a corrupted index must never take the whole
//! interactive session down.

use thiserror::Error;

use crate::engine::ops::OpCode;

/// Everything that can go wrong inside the interaction core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A fixed-capacity store is full. The core never grows its arenas.
    #[error("fixed-capacity {store} store is full ({capacity} slots)")]
    CapacityExceeded {
        store: &'static str,
        capacity: usize,
    },

    /// Operation index outside the store's populated range.
    #[error("operation index {0} is out of range")]
    InvalidOperationIndex(u16),

    /// Entity was never registered with a vertex span.
    #[error("entity {0} has no registered geometry component")]
    InvalidEntity(u16),

    /// Bounds index outside the registered range.
    #[error("bounds index {0} is out of range")]
    InvalidBoundsIndex(u16),

    /// Opcode with no dispatch handler.
    #[error("operation code {0:?} has no dispatch handler")]
    UnsupportedOperation(OpCode),

    /// New bounds rectangle would overlap one already registered.
    ///
    /// Overlapping regions would break the one-active-bounds-per-entry
    /// invariant of the hit-test scan, so registration rejects them instead
    /// of guessing a priority order.
    #[error("bounds rectangle overlaps already registered bounds {0}")]
    OverlappingBounds(u16),

    /// A vertex span reaches past the end of the geometry buffer.
    #[error("vertex span needs {needed} bytes but the geometry buffer holds {available}")]
    SpanExceedsBuffer { needed: usize, available: usize },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
