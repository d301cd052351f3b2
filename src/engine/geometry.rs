//! Vertex span writer - the shared routine that mutates geometry memory.
//!
//! The host rendering layer maps a region of vertex memory and hands it in
//! as a plain byte slice; this module computes offsets and strides into it
//! and rewrites vertex position fields in place. Nothing here allocates,
//! maps or unmaps - the buffer's lifecycle belongs to the host.
//!
//! Vertex layout contract: each vertex begins with its position as two
//! little-endian `f32` values (x, y). Whatever follows within the stride
//! (color, texture coordinates) is stepped over untouched.

use crate::error::{EngineError, Result};
use crate::types::VertexSpan;

/// Bytes of position data at the head of each vertex (two `f32`).
pub const POSITION_BYTES: usize = 8;

/// Add `(dx, dy)` to the position of every vertex in `span`.
///
/// Walks `span_elements` vertices starting at `offset_bytes`, stepping by
/// `stride_bytes`. The whole span is validated against the buffer before the
/// first write, so a bad span mutates nothing.
pub fn add_to_span(buffer: &mut [u8], span: VertexSpan, dx: f32, dy: f32) -> Result<()> {
    let offset = span.offset_bytes as usize;
    let stride = span.stride_bytes as usize;
    let count = span.span_elements as usize;

    if count == 0 {
        return Ok(());
    }

    let needed = offset + (count - 1) * stride + POSITION_BYTES;
    if stride < POSITION_BYTES || needed > buffer.len() {
        return Err(EngineError::SpanExceedsBuffer {
            needed: needed.max(offset + count * POSITION_BYTES),
            available: buffer.len(),
        });
    }

    for element in 0..count {
        let at = offset + element * stride;
        let (x, y) = read_position(buffer, at);
        write_position(buffer, at, x + dx, y + dy);
    }

    Ok(())
}

fn read_position(buffer: &[u8], at: usize) -> (f32, f32) {
    let x = f32::from_le_bytes([buffer[at], buffer[at + 1], buffer[at + 2], buffer[at + 3]]);
    let y = f32::from_le_bytes([
        buffer[at + 4],
        buffer[at + 5],
        buffer[at + 6],
        buffer[at + 7],
    ]);
    (x, y)
}

fn write_position(buffer: &mut [u8], at: usize, x: f32, y: f32) {
    buffer[at..at + 4].copy_from_slice(&x.to_le_bytes());
    buffer[at + 4..at + 8].copy_from_slice(&y.to_le_bytes());
}

// =============================================================================
// TESTS
// =============================================================================
