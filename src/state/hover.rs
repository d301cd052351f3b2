//! Active-bounds set - the hit-test state machine's current state.
//!
//! A small, fixed-capacity, unordered list of bounds indices whose
//! rectangles currently contain the pointer. Each bounds is either Inactive
//! (absent) or Active (present, at most once); the pointer scan in
//! [`crate::engine::Engine::pointer_moved`] drives the transitions.

use crate::error::{EngineError, Result};

/// Set of bounds indices the pointer is currently inside.
pub struct HoverState {
    active: Vec<u16>,
    capacity: usize,
}

impl HoverState {
    /// Create a set with room for `capacity` simultaneously active bounds.
    pub fn new(capacity: usize) -> Self {
        Self {
            active: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of bounds currently containing the pointer.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether a bounds is currently active.
    pub fn contains(&self, index: u16) -> bool {
        self.active.contains(&index)
    }

    /// Copy of the active indices, used to iterate while transitions mutate
    /// the set.
    pub fn snapshot(&self) -> Vec<u16> {
        self.active.clone()
    }

    /// Mark a bounds active. Inserting an already-active index is a no-op,
    /// preserving the at-most-once invariant.
    pub fn insert(&mut self, index: u16) -> Result<()> {
        if self.contains(index) {
            return Ok(());
        }

        if self.active.len() >= self.capacity {
            return Err(EngineError::CapacityExceeded {
                store: "active bounds",
                capacity: self.capacity,
            });
        }

        self.active.push(index);
        Ok(())
    }

    /// Mark a bounds inactive. Returns whether it was active.
    pub fn remove(&mut self, index: u16) -> bool {
        if let Some(position) = self.active.iter().position(|&listed| listed == index) {
            self.active.remove(position);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut hover = HoverState::new(4);

        assert!(!hover.contains(2));
        hover.insert(2).unwrap();
        assert!(hover.contains(2));
        assert_eq!(hover.len(), 1);

        assert!(hover.remove(2));
        assert!(!hover.contains(2));
        assert!(!hover.remove(2));
        assert!(hover.is_empty());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut hover = HoverState::new(4);

        hover.insert(5).unwrap();
        hover.insert(5).unwrap();
        assert_eq!(hover.len(), 1);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut hover = HoverState::new(2);

        hover.insert(0).unwrap();
        hover.insert(1).unwrap();
        let err = hover.insert(2).unwrap_err();
        assert!(matches!(
            err,
            EngineError::CapacityExceeded { store: "active bounds", .. }
        ));
    }

    #[test]
    fn test_snapshot_is_stable_under_mutation() {
        let mut hover = HoverState::new(4);
        hover.insert(0).unwrap();
        hover.insert(1).unwrap();

        let snapshot = hover.snapshot();
        hover.remove(0);

        assert_eq!(snapshot, vec![0, 1]);
        assert_eq!(hover.snapshot(), vec![1]);
    }
}
