//! Operation Store - stored, replayable user actions.
//!
//! Operations live in one fixed-capacity buffer and are addressed purely by
//! storage index; that index is the operation's identity for its whole
//! lifetime (records are never moved or compacted - deactivation clears a
//! flag, it does not reclaim the slot).
//!
//! Records are variable-width on the wire: every record carries a 2-unit
//! header whose two high flag bits select the payload width class (2, 4, 8 or
//! 16 storage units). The original encoding reinterpreted raw memory at the
//! width the flag bits implied; here the payload is a tagged variant keyed by
//! an explicit discriminant, so misreading a narrow record as a wide one is
//! unrepresentable. The width-class bits are still derived and stored so the
//! packed layout stays inspectable.
//!
//! # API
//!
//! - `OpStore::insert(extra_flags, payload)` - append, returns the index
//! - `OpStore::at(index)` / `at_mut(index)` - checked record access
//! - `OpFlags` - `PER_FRAME`, `ACTIVE`, width-class bits
//! - `OpPayload` - the closed set of operation kinds

use bitflags::bitflags;

use crate::error::{EngineError, Result};
use crate::types::{Entity, Norm16};

// =============================================================================
// Width Classes
// =============================================================================

/// Payload width class in storage units. Fixed at insertion; an operation can
/// never change class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Two,
    Four,
    Eight,
    Sixteen,
}

impl WidthClass {
    /// Encode as the two high bits of the flags byte.
    pub const fn flag_bits(self) -> u8 {
        match self {
            WidthClass::Two => 0b0000_0000,
            WidthClass::Four => 0b0100_0000,
            WidthClass::Eight => 0b1000_0000,
            WidthClass::Sixteen => 0b1100_0000,
        }
    }

    /// Storage units occupied by a record of this class.
    pub const fn units(self) -> u8 {
        match self {
            WidthClass::Two => 2,
            WidthClass::Four => 4,
            WidthClass::Eight => 8,
            WidthClass::Sixteen => 16,
        }
    }
}

bitflags! {
    /// Header flags of a stored operation.
    ///
    /// The low bits carry two independent booleans; the two high bits hold
    /// the width class and are set by the store, never by callers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct OpFlags: u8 {
        /// Operation belongs in the continuous per-frame execution set.
        const PER_FRAME = 0b0000_0001;
        /// Operation is currently scheduled (guards double-activation).
        const ACTIVE = 0b0000_0010;
        /// Mask over the width-class bits.
        const WIDTH_MASK = 0b1100_0000;
    }
}

impl OpFlags {
    /// Decode the width class carried in the high bits.
    pub fn width_class(self) -> WidthClass {
        match self.bits() & Self::WIDTH_MASK.bits() {
            0b0000_0000 => WidthClass::Two,
            0b0100_0000 => WidthClass::Four,
            0b1000_0000 => WidthClass::Eight,
            _ => WidthClass::Sixteen,
        }
    }
}

// =============================================================================
// Opcodes & Payloads
// =============================================================================

/// The closed set of operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    RelativeMove,
    AbsoluteMove,
    ApplyMoveToBounds,
    DeactivateOp,
}

/// Opcode-specific payload. The variant is the record's discriminant; the
/// width class falls out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpPayload {
    /// Nudge every vertex of the target entity's span by `(add_x, add_y)`.
    RelativeMove {
        target: Entity,
        add_x: Norm16,
        add_y: Norm16,
    },
    /// Reposition an entity's span outright. Recognized but not dispatched;
    /// execution reports `UnsupportedOperation`.
    AbsoluteMove {
        target: Entity,
        x: Norm16,
        y: Norm16,
    },
    /// Nudge a registered bounds rectangle's top-left corner.
    MoveBounds {
        bounds: u16,
        add_x: Norm16,
        add_y: Norm16,
    },
    /// Remove another operation from the per-frame set and clear its
    /// `ACTIVE` flag.
    Deactivate { operation: u16 },
}

impl OpPayload {
    /// The opcode this payload dispatches as.
    pub fn code(&self) -> OpCode {
        match self {
            OpPayload::RelativeMove { .. } => OpCode::RelativeMove,
            OpPayload::AbsoluteMove { .. } => OpCode::AbsoluteMove,
            OpPayload::MoveBounds { .. } => OpCode::ApplyMoveToBounds,
            OpPayload::Deactivate { .. } => OpCode::DeactivateOp,
        }
    }

    /// The width class a record of this payload occupies.
    pub fn width_class(&self) -> WidthClass {
        match self {
            OpPayload::Deactivate { .. } => WidthClass::Four,
            OpPayload::RelativeMove { .. }
            | OpPayload::AbsoluteMove { .. }
            | OpPayload::MoveBounds { .. } => WidthClass::Eight,
        }
    }
}

/// One stored operation record: 2-unit header plus payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpRecord {
    pub code: OpCode,
    pub flags: OpFlags,
    pub payload: OpPayload,
}

// =============================================================================
// Store
// =============================================================================

/// Fixed-capacity arena of operation records.
///
/// The store only holds and classifies operations; it never executes them.
pub struct OpStore {
    records: Vec<OpRecord>,
    capacity: usize,
}

impl OpStore {
    /// Create a store with room for `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record, deriving the header from the payload.
    ///
    /// `extra_flags` carries the caller booleans (`PER_FRAME`); the width
    /// class bits are overwritten from the payload. Returns the assigned
    /// index, or `CapacityExceeded` when the arena is full.
    pub fn insert(&mut self, extra_flags: OpFlags, payload: OpPayload) -> Result<u16> {
        if self.records.len() >= self.capacity {
            return Err(EngineError::CapacityExceeded {
                store: "operation",
                capacity: self.capacity,
            });
        }

        let width_bits = OpFlags::from_bits_retain(payload.width_class().flag_bits());
        let flags = (extra_flags - OpFlags::WIDTH_MASK) | width_bits;

        let index = self.records.len() as u16;
        self.records.push(OpRecord {
            code: payload.code(),
            flags,
            payload,
        });

        Ok(index)
    }

    /// Checked read access to a record header and payload.
    pub fn at(&self, index: u16) -> Result<&OpRecord> {
        self.records
            .get(index as usize)
            .ok_or(EngineError::InvalidOperationIndex(index))
    }

    /// Checked mutable access, used to toggle `ACTIVE`.
    pub fn at_mut(&mut self, index: u16) -> Result<&mut OpRecord> {
        self.records
            .get_mut(index as usize)
            .ok_or(EngineError::InvalidOperationIndex(index))
    }
}

// =============================================================================
// TESTS
// =============================================================================
