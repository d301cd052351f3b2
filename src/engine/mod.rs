//! Interaction engine - stores, scheduler, and dispatch.
//!
//! The engine owns the four tightly coupled pieces of the interaction core:
//! the operation store, the per-frame scheduler, the geometry component
//! table, and the pointer hit-test state. Bounds reference operations by
//! index, operations rewrite component spans and bounds rectangles, and the
//! scheduler decides which operations run every tick.
//!
//! All state is explicit: the engine is a plain value the host frame loop
//! owns, and the mapped geometry memory is passed into [`Engine::tick`] and
//! [`Engine::pointer_moved`] per call rather than held globally.
//!
//! # Modules
//!
//! - [`ops`] - variable-width operation records and the fixed-capacity store
//! - [`scheduler`] - the continuous-execution set
//! - [`components`] - entity to vertex-span mapping
//! - [`geometry`] - the span writer that mutates vertex memory

pub mod components;
pub mod geometry;
pub mod ops;
pub mod scheduler;

use log::{debug, warn};

use crate::error::{EngineError, Result};
use crate::state::{BoundsTable, HoverState, PointerBounds, DISABLED};
use crate::types::{Entity, NormPoint, VertexSpan};

use components::ComponentTable;
use ops::{OpCode, OpFlags, OpPayload, OpRecord, OpStore};
use scheduler::{FrameScheduler, Scheduled};

// =============================================================================
// Configuration
// =============================================================================

/// Capacities of the engine's fixed-size arenas.
///
/// Everything is sized up front; nothing grows at runtime. Exceeding a
/// capacity surfaces as a recoverable `CapacityExceeded` during setup, or a
/// logged skip during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_operations: usize,
    pub max_entities: usize,
    pub max_bounds: usize,
    pub max_active_operations: usize,
    pub max_active_bounds: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_operations: 256,
            max_entities: 256,
            max_bounds: 64,
            max_active_operations: 64,
            max_active_bounds: 16,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// The interaction core.
///
/// Single-threaded by design: pointer events and the frame tick run on the
/// same logical thread with no suspension points, so there is nothing to
/// lock. Handler chains consist of stored operations only - they may
/// schedule further operations but cannot re-enter the pointer scan.
pub struct Engine {
    ops: OpStore,
    scheduler: FrameScheduler,
    components: ComponentTable,
    bounds: BoundsTable,
    hover: HoverState,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ops: OpStore::new(config.max_operations),
            scheduler: FrameScheduler::new(config.max_active_operations),
            components: ComponentTable::new(config.max_entities),
            bounds: BoundsTable::new(config.max_bounds),
            hover: HoverState::new(config.max_active_bounds),
        }
    }

    // -------------------------------------------------------------------------
    // Scene setup
    // -------------------------------------------------------------------------

    /// Store an operation, returning its stable index.
    pub fn insert_operation(&mut self, extra_flags: OpFlags, payload: OpPayload) -> Result<u16> {
        self.ops.insert(extra_flags, payload)
    }

    /// Allocate the next entity identifier.
    pub fn allocate_entity(&mut self) -> Result<Entity> {
        self.components.allocate()
    }

    /// Bind an entity to its span in the shared vertex buffer.
    pub fn register_component(&mut self, entity: Entity, span: VertexSpan) -> Result<()> {
        self.components.register(entity, span)
    }

    /// Register a pointer bounds, returning its stable index.
    pub fn register_bounds(&mut self, bounds: PointerBounds) -> Result<u16> {
        self.bounds.register(bounds)
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    /// Checked access to a stored operation record.
    pub fn operation(&self, index: u16) -> Result<&OpRecord> {
        self.ops.at(index)
    }

    /// Checked access to a registered bounds record.
    pub fn bounds(&self, index: u16) -> Result<&PointerBounds> {
        self.bounds.get(index)
    }

    /// Span registered for an entity.
    pub fn component_for(&self, entity: Entity) -> Result<VertexSpan> {
        self.components.span_for(entity)
    }

    /// Number of operations in the per-frame set.
    pub fn active_operation_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Whether an operation is in the per-frame set.
    pub fn is_per_frame_listed(&self, index: u16) -> bool {
        self.scheduler.is_listed(index)
    }

    /// Number of bounds currently containing the pointer.
    pub fn active_bounds_count(&self) -> usize {
        self.hover.len()
    }

    /// Whether a bounds currently contains the pointer.
    pub fn is_bounds_active(&self, index: u16) -> bool {
        self.hover.contains(index)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Feed one operation into the scheduler.
    ///
    /// A `PER_FRAME` operation not yet active joins the continuous set and
    /// runs from the next tick; everything else executes exactly once, now,
    /// against `geometry`.
    pub fn invoke(&mut self, index: u16, geometry: &mut [u8]) -> Result<()> {
        match self.scheduler.schedule(index, &mut self.ops)? {
            Scheduled::Activated => Ok(()),
            Scheduled::RunNow => self.execute(index, geometry),
        }
    }

    /// Execute one stored operation against the world.
    fn execute(&mut self, index: u16, geometry: &mut [u8]) -> Result<()> {
        let payload = self.ops.at(index)?.payload;

        match payload {
            OpPayload::RelativeMove {
                target,
                add_x,
                add_y,
            } => {
                let span = self.components.span_for(target)?;
                geometry::add_to_span(geometry, span, add_x.to_f32(), add_y.to_f32())
            }
            OpPayload::AbsoluteMove { .. } => {
                Err(EngineError::UnsupportedOperation(OpCode::AbsoluteMove))
            }
            OpPayload::MoveBounds {
                bounds,
                add_x,
                add_y,
            } => self.bounds.nudge(bounds, add_x, add_y),
            OpPayload::Deactivate { operation } => {
                self.scheduler.deactivate(operation, &mut self.ops)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Frame tick
    // -------------------------------------------------------------------------

    /// Run every operation in the continuous set exactly once, in insertion
    /// order.
    ///
    /// Called by the host loop once per rendered frame, after input
    /// processing and before the geometry buffer is consumed for drawing.
    ///
    /// Iteration works off a snapshot of the active list: a `DeactivateOp`
    /// member may remove any operation - itself included - and the removal
    /// takes effect deterministically. An operation deactivated earlier in
    /// the same tick is skipped via its cleared `ACTIVE` flag. Dispatch
    /// failures are logged and skipped; one bad record never aborts the
    /// frame.
    pub fn tick(&mut self, geometry: &mut [u8]) {
        for index in self.scheduler.snapshot() {
            let still_active = self
                .ops
                .at(index)
                .map(|record| record.flags.contains(OpFlags::ACTIVE))
                .unwrap_or(false);
            if !still_active {
                continue;
            }

            if let Err(error) = self.execute(index, geometry) {
                warn!("skipping per-frame operation {index}: {error}");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Pointer hit-test scan
    // -------------------------------------------------------------------------

    /// Process one pointer-move event.
    ///
    /// `position` must already be normalized to the bounds coordinate space
    /// by the host windowing layer. Two passes per event:
    ///
    /// 1. Exit scan: every active bounds the pointer has left is removed
    ///    from the active set, then its exit chain fires.
    /// 2. Enter scan: every inactive bounds with entry detection enabled
    ///    that now contains the pointer fires its enter chain; it joins the
    ///    active set first unless it has no exit handlers (momentary bounds
    ///    are never tracked).
    ///
    /// Chain operations go through [`Engine::invoke`], so a handler may
    /// activate per-frame work; failures are logged and the chain continues.
    pub fn pointer_moved(&mut self, position: NormPoint, geometry: &mut [u8]) {
        // Exit scan over a snapshot: chains may move other bounds.
        for index in self.hover.snapshot() {
            let chain = match self.bounds.get(index) {
                Ok(bounds) if bounds.area.contains(position) => continue,
                Ok(bounds) => bounds.exit_chain().collect::<Vec<u16>>(),
                Err(error) => {
                    warn!("dropping stale active bounds {index}: {error}");
                    self.hover.remove(index);
                    continue;
                }
            };

            self.hover.remove(index);
            debug!("pointer left bounds {index}");
            self.fire_chain(&chain, geometry);
        }

        for index in 0..self.bounds.len() as u16 {
            if self.hover.contains(index) {
                continue;
            }

            let Ok(bounds) = self.bounds.get(index) else {
                continue;
            };
            if bounds.flags.enter_count() == 0
                || bounds.on_hover_enter == DISABLED
                || !bounds.area.contains(position)
            {
                continue;
            }

            let track = bounds.flags.exit_count() != 0;
            let chain = bounds.enter_chain().collect::<Vec<u16>>();

            if track {
                if let Err(error) = self.hover.insert(index) {
                    warn!("cannot track entered bounds {index}: {error}");
                }
            }

            debug!("pointer entered bounds {index}");
            self.fire_chain(&chain, geometry);
        }
    }

    /// Fire a resolved handler chain, skipping disabled slots.
    fn fire_chain(&mut self, chain: &[u16], geometry: &mut [u8]) {
        for &operation in chain {
            if operation == DISABLED {
                continue;
            }
            if let Err(error) = self.invoke(operation, geometry) {
                warn!("handler chain operation {operation} failed: {error}");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
