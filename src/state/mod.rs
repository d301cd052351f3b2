//! Pointer hit-test state - bounds registry and the active-bounds set.
//!
//! Each registered bounds is a two-state machine: Inactive (pointer outside)
//! and Active (pointer inside). The scan that drives transitions lives on
//! [`crate::engine::Engine::pointer_moved`], since firing a handler chain
//! needs the operation store and scheduler; this module owns the data the
//! scan walks.
//!
//! - [`bounds`] - bounds records, packed handler counts, cascade chains
//! - [`hover`] - the set of bounds currently containing the pointer

pub mod bounds;
pub mod hover;

pub use bounds::{BoundsFlags, BoundsTable, PointerBounds, DISABLED};
pub use hover::HoverState;
