//! Geometry Component Table - entity to vertex-span mapping.
//!
//! Translates an entity identifier into the writable vertex span that
//! represents it in the shared geometry buffer. The table only describes
//! where writers should write; it never touches vertex memory itself (that
//! is the span writer's job, see [`crate::engine::geometry`]).
//!
//! Entities are allocated monotonically and never reused within a session.
//! Capacity is fixed at construction.

use crate::error::{EngineError, Result};
use crate::types::{Entity, VertexSpan};

/// Fixed-capacity table of per-entity vertex spans.
pub struct ComponentTable {
    spans: Vec<Option<VertexSpan>>,
    next_entity: u16,
}

impl ComponentTable {
    /// Create a table with room for `capacity` entities.
    pub fn new(capacity: usize) -> Self {
        Self {
            spans: vec![None; capacity],
            next_entity: 0,
        }
    }

    /// Allocate the next entity identifier.
    ///
    /// Identifiers count up and are never handed out twice.
    pub fn allocate(&mut self) -> Result<Entity> {
        if self.next_entity as usize >= self.spans.len() {
            return Err(EngineError::CapacityExceeded {
                store: "entity",
                capacity: self.spans.len(),
            });
        }

        let entity = Entity(self.next_entity);
        self.next_entity += 1;
        Ok(entity)
    }

    /// Number of entities allocated so far.
    pub fn allocated(&self) -> usize {
        self.next_entity as usize
    }

    /// Insert or overwrite the span for an entity.
    ///
    /// The caller owns the guarantee that the span fits the geometry buffer
    /// it will be applied to; the table stores it verbatim.
    pub fn register(&mut self, entity: Entity, span: VertexSpan) -> Result<()> {
        if entity.0 >= self.next_entity {
            return Err(EngineError::InvalidEntity(entity.0));
        }

        self.spans[entity.index()] = Some(span);
        Ok(())
    }

    /// Look up the span for an entity.
    pub fn span_for(&self, entity: Entity) -> Result<VertexSpan> {
        self.spans
            .get(entity.index())
            .copied()
            .flatten()
            .ok_or(EngineError::InvalidEntity(entity.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_monotonic() {
        let mut table = ComponentTable::new(4);

        assert_eq!(table.allocate().unwrap(), Entity(0));
        assert_eq!(table.allocate().unwrap(), Entity(1));
        assert_eq!(table.allocate().unwrap(), Entity(2));
        assert_eq!(table.allocated(), 3);
    }

    #[test]
    fn test_allocate_exhaustion() {
        let mut table = ComponentTable::new(1);

        table.allocate().unwrap();
        let err = table.allocate().unwrap_err();
        assert!(matches!(err, EngineError::CapacityExceeded { store: "entity", .. }));
    }

    #[test]
    fn test_register_and_lookup() {
        let mut table = ComponentTable::new(4);
        let entity = table.allocate().unwrap();

        let span = VertexSpan::new(128, 4, 20);
        table.register(entity, span).unwrap();
        assert_eq!(table.span_for(entity).unwrap(), span);

        // Overwrite is allowed during scene construction.
        let moved = VertexSpan::new(256, 4, 20);
        table.register(entity, moved).unwrap();
        assert_eq!(table.span_for(entity).unwrap(), moved);
    }

    #[test]
    fn test_unregistered_entity_is_recoverable() {
        let mut table = ComponentTable::new(4);
        let entity = table.allocate().unwrap();

        assert_eq!(
            table.span_for(entity).unwrap_err(),
            EngineError::InvalidEntity(0)
        );
        assert_eq!(
            table.span_for(Entity(9)).unwrap_err(),
            EngineError::InvalidEntity(9)
        );
    }

    #[test]
    fn test_register_unallocated_entity_rejected() {
        let mut table = ComponentTable::new(4);

        let err = table
            .register(Entity(0), VertexSpan::new(0, 1, 8))
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidEntity(0));
    }
}
