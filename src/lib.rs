//! # ember-ui
//!
//! Pointer interaction core for GPU-rendered immediate-mode UIs.
//!
//! The host application owns the window, the input events, and the mapped
//! vertex memory; this crate owns what happens between an input event and a
//! geometry write. Four pieces cooperate:
//!
//! ```text
//! pointer event → hit-test scan → handler chains → operation dispatch
//!                                                      ↓
//! frame tick ───→ per-frame set ──────────────→ vertex span writes
//! ```
//!
//! - Stored operations are registered once at scene setup and replayed by
//!   index, so a handler is just a `u16`.
//! - A `PER_FRAME` operation invoked once joins the continuous set and runs
//!   every tick until a `DeactivateOp` removes it.
//! - Bounds are normalized rectangles with cascading enter/exit handler
//!   chains; the hit-test scan tracks which ones contain the pointer.
//! - All coordinates are packed [`Norm16`] fixed point over [-1, 1].
//!
//! ## Modules
//!
//! - [`types`] - fixed-point coordinates, rectangles, entities, vertex spans
//! - [`engine`] - operation store, scheduler, components, span writer, [`Engine`]
//! - [`state`] - bounds registry and the active-bounds set
//! - [`error`] - the crate error taxonomy

pub mod engine;
pub mod error;
pub mod state;
pub mod types;

pub use error::{EngineError, Result};

pub use types::{Entity, Norm16, NormPoint, NormRect, VertexSpan, NORM_SCALE};

pub use engine::components::ComponentTable;
pub use engine::geometry::{add_to_span, POSITION_BYTES};
pub use engine::ops::{OpCode, OpFlags, OpPayload, OpRecord, OpStore, WidthClass};
pub use engine::scheduler::{FrameScheduler, Scheduled};
pub use engine::{Engine, EngineConfig};

pub use state::{BoundsFlags, BoundsTable, HoverState, PointerBounds, DISABLED};
