//! Per-Frame Scheduler - the continuous-execution set.
//!
//! Maintains the list of operation indices that must run once every frame
//! tick, in insertion order. Membership and the `ACTIVE` flag on the stored
//! record are kept in lockstep: an operation with `ACTIVE` set appears in the
//! list exactly once, and vice versa.
//!
//! The scheduler owns only the bookkeeping. Execution of the members is the
//! engine's job - see [`crate::engine::Engine::tick`] - which iterates a
//! snapshot of the list so that a `DeactivateOp` fired mid-tick (including
//! one removing the operation currently running) stays deterministic.

use log::trace;

use crate::engine::ops::{OpFlags, OpStore};
use crate::error::{EngineError, Result};

/// What [`FrameScheduler::schedule`] decided to do with an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// The operation joined the per-frame set; it runs from the next tick.
    Activated,
    /// One-shot semantics: the caller should execute the operation now.
    RunNow,
}

/// Fixed-capacity, insertion-ordered list of active operation indices.
pub struct FrameScheduler {
    active: Vec<u16>,
    capacity: usize,
}

impl FrameScheduler {
    /// Create a scheduler with room for `capacity` concurrently active
    /// operations.
    pub fn new(capacity: usize) -> Self {
        Self {
            active: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of currently active operations.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether an operation index is in the active list.
    pub fn is_listed(&self, index: u16) -> bool {
        self.active.contains(&index)
    }

    /// Copy of the active list, in insertion order.
    ///
    /// Tick iteration works off this snapshot so deactivations during the
    /// tick cannot skip or double-run members.
    pub fn snapshot(&self) -> Vec<u16> {
        self.active.clone()
    }

    /// Decide what to do with an incoming operation.
    ///
    /// A `PER_FRAME` operation that is not yet `ACTIVE` joins the list and
    /// has its flag set. Anything else - one-shot operations, and per-frame
    /// operations already activated - is left to the caller to execute
    /// immediately.
    pub fn schedule(&mut self, index: u16, ops: &mut OpStore) -> Result<Scheduled> {
        let record = ops.at_mut(index)?;

        if record.flags.contains(OpFlags::PER_FRAME) && !record.flags.contains(OpFlags::ACTIVE) {
            if self.active.len() >= self.capacity {
                return Err(EngineError::CapacityExceeded {
                    store: "active operation",
                    capacity: self.capacity,
                });
            }

            record.flags |= OpFlags::ACTIVE;
            self.active.push(index);
            trace!("operation {index} activated ({} active)", self.active.len());
            return Ok(Scheduled::Activated);
        }

        Ok(Scheduled::RunNow)
    }

    /// Remove an operation from the per-frame set and clear its `ACTIVE`
    /// flag.
    ///
    /// Removal preserves the order of the remaining members. Deactivating an
    /// operation that is not currently active is a no-op as long as the
    /// index exists.
    pub fn deactivate(&mut self, index: u16, ops: &mut OpStore) -> Result<()> {
        let record = ops.at_mut(index)?;
        record.flags -= OpFlags::ACTIVE;

        if let Some(position) = self.active.iter().position(|&listed| listed == index) {
            self.active.remove(position);
            trace!("operation {index} deactivated ({} active)", self.active.len());
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ops::OpPayload;
    use crate::types::{Entity, Norm16};

    fn per_frame_move(store: &mut OpStore) -> u16 {
        store
            .insert(
                OpFlags::PER_FRAME,
                OpPayload::RelativeMove {
                    target: Entity(0),
                    add_x: Norm16::from_raw(1),
                    add_y: Norm16::from_raw(1),
                },
            )
            .unwrap()
    }

    #[test]
    fn test_per_frame_op_is_activated_once() {
        let mut ops = OpStore::new(8);
        let mut scheduler = FrameScheduler::new(8);
        let index = per_frame_move(&mut ops);

        assert_eq!(scheduler.schedule(index, &mut ops).unwrap(), Scheduled::Activated);
        assert!(ops.at(index).unwrap().flags.contains(OpFlags::ACTIVE));
        assert!(scheduler.is_listed(index));

        // Already active: the caller executes it instead.
        assert_eq!(scheduler.schedule(index, &mut ops).unwrap(), Scheduled::RunNow);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_one_shot_op_runs_immediately() {
        let mut ops = OpStore::new(8);
        let mut scheduler = FrameScheduler::new(8);
        let index = ops
            .insert(OpFlags::empty(), OpPayload::Deactivate { operation: 0 })
            .unwrap();

        assert_eq!(scheduler.schedule(index, &mut ops).unwrap(), Scheduled::RunNow);
        assert!(scheduler.is_empty());
        assert!(!ops.at(index).unwrap().flags.contains(OpFlags::ACTIVE));
    }

    #[test]
    fn test_deactivate_preserves_order() {
        let mut ops = OpStore::new(8);
        let mut scheduler = FrameScheduler::new(8);
        let first = per_frame_move(&mut ops);
        let second = per_frame_move(&mut ops);
        let third = per_frame_move(&mut ops);

        scheduler.schedule(first, &mut ops).unwrap();
        scheduler.schedule(second, &mut ops).unwrap();
        scheduler.schedule(third, &mut ops).unwrap();

        scheduler.deactivate(second, &mut ops).unwrap();

        assert_eq!(scheduler.snapshot(), vec![first, third]);
        assert!(!ops.at(second).unwrap().flags.contains(OpFlags::ACTIVE));
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut ops = OpStore::new(8);
        let mut scheduler = FrameScheduler::new(8);
        let index = per_frame_move(&mut ops);

        scheduler.schedule(index, &mut ops).unwrap();
        scheduler.deactivate(index, &mut ops).unwrap();
        scheduler.deactivate(index, &mut ops).unwrap();

        assert!(scheduler.is_empty());
        assert!(!ops.at(index).unwrap().flags.contains(OpFlags::ACTIVE));
    }

    #[test]
    fn test_deactivate_unknown_index_errors() {
        let mut ops = OpStore::new(8);
        let mut scheduler = FrameScheduler::new(8);

        assert_eq!(
            scheduler.deactivate(3, &mut ops).unwrap_err(),
            EngineError::InvalidOperationIndex(3)
        );
    }

    #[test]
    fn test_schedule_capacity_exceeded() {
        let mut ops = OpStore::new(8);
        let mut scheduler = FrameScheduler::new(1);
        let first = per_frame_move(&mut ops);
        let second = per_frame_move(&mut ops);

        scheduler.schedule(first, &mut ops).unwrap();
        let err = scheduler.schedule(second, &mut ops).unwrap_err();
        assert!(matches!(
            err,
            EngineError::CapacityExceeded { store: "active operation", .. }
        ));
        // Failed activation must not leave a dangling ACTIVE flag.
        assert!(!ops.at(second).unwrap().flags.contains(OpFlags::ACTIVE));
    }
}
