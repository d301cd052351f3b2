//! Pointer bounds registry - rectangular regions with handler chains.
//!
//! A bounds record couples a normalized rectangle with up to six stored
//! operation indices and two packed 2-bit counts saying how many handlers
//! fire on a hover-enter and a hover-exit transition. The counts select a
//! cascading slice of the slot list rather than independent toggles: a
//! bounds configured with exit-count 3 fires three handlers on one exit,
//! exit-count 1 fires only the least-specific one.
//!
//! # API
//!
//! - `BoundsFlags::with_counts(enter, exit)` - pack the handler counts
//! - `PointerBounds::enter_chain()` / `exit_chain()` - resolved cascades
//! - `BoundsTable::register(bounds)` - fixed-capacity, overlap-checked
//! - `BoundsTable::nudge(index, dx, dy)` - move a rectangle's origin

use bitflags::bitflags;

use crate::error::{EngineError, Result};
use crate::types::{Norm16, NormRect};

/// Sentinel marking a handler slot as unbound.
pub const DISABLED: u16 = u16::MAX;

// =============================================================================
// Flags
// =============================================================================

bitflags! {
    /// Two independent 2-bit handler counts packed into one byte.
    ///
    /// Bits 0-1 count enter handlers, bits 2-3 count exit handlers (0-3
    /// each). A count of 0 on the enter side disables entry detection for
    /// the bounds entirely.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BoundsFlags: u8 {
        const ENTER_1 = 0b0000_0001;
        const ENTER_2 = 0b0000_0010;
        const ENTER_3 = 0b0000_0011;
        const EXIT_1 = 0b0000_0100;
        const EXIT_2 = 0b0000_1000;
        const EXIT_3 = 0b0000_1100;
        const ENTER_MASK = 0b0000_0011;
        const EXIT_MASK = 0b0000_1100;
    }
}

impl BoundsFlags {
    /// Pack handler counts, clamping each to the representable 0-3.
    pub fn with_counts(enter: u8, exit: u8) -> Self {
        Self::from_bits_retain(enter.min(3) | (exit.min(3) << 2))
    }

    /// Number of handlers fired on a hover-enter transition.
    pub fn enter_count(self) -> usize {
        (self.bits() & Self::ENTER_MASK.bits()) as usize
    }

    /// Number of handlers fired on a hover-exit transition.
    pub fn exit_count(self) -> usize {
        ((self.bits() & Self::EXIT_MASK.bits()) >> 2) as usize
    }
}

// =============================================================================
// Bounds Record
// =============================================================================

/// A registered pointer region and the operations its transitions fire.
///
/// Handler slots hold operation-store indices or [`DISABLED`]. The slot
/// order doubles as the cascade priority order; see [`PointerBounds::slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerBounds {
    pub area: NormRect,
    pub flags: BoundsFlags,
    pub on_hover_enter: u16,
    pub on_hover_exit: u16,
    pub on_l_click: u16,
    pub on_r_click: u16,
    pub on_m_click: u16,
    pub sub_areas: u16,
}

impl PointerBounds {
    /// A bounds with every handler slot disabled.
    pub fn new(area: NormRect, flags: BoundsFlags) -> Self {
        Self {
            area,
            flags,
            on_hover_enter: DISABLED,
            on_hover_exit: DISABLED,
            on_l_click: DISABLED,
            on_r_click: DISABLED,
            on_m_click: DISABLED,
            sub_areas: DISABLED,
        }
    }

    /// Handler slots in cascade order, most-specific role first.
    ///
    /// The enter chain reads slots `[0..enter_count]` forward; the exit
    /// chain reads the `exit_count` slots after the enter block, backward.
    /// Splitting the six slots this way is what lets one record drive both
    /// transitions without the chains colliding.
    pub fn slots(&self) -> [u16; 6] {
        [
            self.on_hover_enter,
            self.on_hover_exit,
            self.on_l_click,
            self.on_r_click,
            self.on_m_click,
            self.sub_areas,
        ]
    }

    /// Operations fired on a hover-enter transition, in firing order.
    pub fn enter_chain(&self) -> impl Iterator<Item = u16> {
        let slots = self.slots();
        let count = self.flags.enter_count();
        (0..count).map(move |slot| slots[slot])
    }

    /// Operations fired on a hover-exit transition, in firing order.
    ///
    /// The cascade runs from the most-specific configured slot down to the
    /// least-specific one: exit-count 3 fires three handlers, exit-count 1
    /// fires only the lowest-priority slot of the block.
    pub fn exit_chain(&self) -> impl Iterator<Item = u16> {
        let slots = self.slots();
        let start = self.flags.enter_count();
        let count = self.flags.exit_count();
        (0..count).rev().map(move |slot| slots[start + slot])
    }
}

// =============================================================================
// Table
// =============================================================================

/// Fixed-capacity registry of pointer bounds; the index is the bounds'
/// stable identity.
pub struct BoundsTable {
    bounds: Vec<PointerBounds>,
    capacity: usize,
}

impl BoundsTable {
    /// Create a table with room for `capacity` bounds.
    pub fn new(capacity: usize) -> Self {
        Self {
            bounds: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of registered bounds.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Register a bounds, returning its index.
    ///
    /// Rejects a rectangle whose interior intersects an already registered
    /// one: the hit-test active set assumes at most one bounds matches a
    /// single entry, and registration is the place to enforce that rather
    /// than guessing a priority order at scan time.
    pub fn register(&mut self, bounds: PointerBounds) -> Result<u16> {
        if self.bounds.len() >= self.capacity {
            return Err(EngineError::CapacityExceeded {
                store: "bounds",
                capacity: self.capacity,
            });
        }

        for (existing_index, existing) in self.bounds.iter().enumerate() {
            if existing.area.overlaps(&bounds.area) {
                return Err(EngineError::OverlappingBounds(existing_index as u16));
            }
        }

        let index = self.bounds.len() as u16;
        self.bounds.push(bounds);
        Ok(index)
    }

    /// Checked read access.
    pub fn get(&self, index: u16) -> Result<&PointerBounds> {
        self.bounds
            .get(index as usize)
            .ok_or(EngineError::InvalidBoundsIndex(index))
    }

    /// Add `(dx, dy)` to a bounds rectangle's top-left corner.
    ///
    /// This is the `ApplyMoveToBounds` dispatch target; the rectangle's
    /// extent is unchanged.
    pub fn nudge(&mut self, index: u16, dx: Norm16, dy: Norm16) -> Result<()> {
        let bounds = self
            .bounds
            .get_mut(index as usize)
            .ok_or(EngineError::InvalidBoundsIndex(index))?;

        bounds.area.top_left.x = bounds.area.top_left.x.add(dx);
        bounds.area.top_left.y = bounds.area.top_left.y.add(dy);
        Ok(())
    }

    /// Iterate all registered bounds with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &PointerBounds)> {
        self.bounds
            .iter()
            .enumerate()
            .map(|(index, bounds)| (index as u16, bounds))
    }
}

// =============================================================================
// TESTS
// =============================================================================
