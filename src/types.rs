//! Core types for ember-ui.
//!
//! These types define the foundation that everything builds on: the packed
//! fixed-point coordinate representation, the normalized geometry it
//! describes, and the entity/span records that tie UI elements to vertex
//! memory.

// =============================================================================
// Fixed Point
// =============================================================================

/// Scale factor between a normalized coordinate and its packed form.
pub const NORM_SCALE: i32 = 10_000;

/// Signed fixed-point coordinate, scaled by 10,000.
///
/// Four decimal digits of precision over the normalized [-1, 1] screen space.
/// Using a packed integer keeps records compact and arithmetic deterministic -
/// no floating-point drift inside stored operations or bounds.
///
/// Conversion from `f64` truncates toward zero; the round trip through
/// [`Norm16::to_f64`] recovers any in-range value within 1/10,000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Norm16(i16);

impl Norm16 {
    /// Left/top edge of the normalized space (-1.0).
    pub const MIN: Self = Norm16(-10_000);

    /// Right/bottom edge of the normalized space (1.0).
    pub const MAX: Self = Norm16(10_000);

    /// Center of the normalized space.
    pub const ZERO: Self = Norm16(0);

    /// Wrap a raw packed value.
    pub const fn from_raw(raw: i16) -> Self {
        Norm16(raw)
    }

    /// The raw packed value.
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Pack a normalized coordinate, truncating toward zero.
    pub fn from_f64(value: f64) -> Self {
        Norm16((value * NORM_SCALE as f64) as i16)
    }

    /// Unpack to `f64`.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / NORM_SCALE as f64
    }

    /// Unpack to `f32` (the precision vertex positions are stored at).
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / NORM_SCALE as f32
    }

    /// Sum of two packed values, saturating at the `i16` range.
    ///
    /// In-range operands (|value| <= 1.0) can never saturate; the clamp only
    /// matters for values already outside the normalized space.
    pub fn add(self, other: Self) -> Self {
        Norm16(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A point in the normalized coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormPoint {
    pub x: Norm16,
    pub y: Norm16,
}

impl NormPoint {
    pub const fn new(x: Norm16, y: Norm16) -> Self {
        Self { x, y }
    }

    /// Build from unpacked coordinates (truncating conversion per axis).
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: Norm16::from_f64(x),
            y: Norm16::from_f64(y),
        }
    }
}

/// An axis-aligned rectangle in the normalized coordinate space.
///
/// Stored as top-left corner plus extent, matching how bounds records are
/// registered. Containment is a closed-interval test on both axes, so points
/// exactly on an edge count as inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormRect {
    pub top_left: NormPoint,
    pub width: Norm16,
    pub height: Norm16,
}

impl NormRect {
    pub const fn new(top_left: NormPoint, width: Norm16, height: Norm16) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Right edge (top-left x + width).
    pub fn right(&self) -> Norm16 {
        self.top_left.x.add(self.width)
    }

    /// Bottom edge (top-left y + height).
    pub fn bottom(&self) -> Norm16 {
        self.top_left.y.add(self.height)
    }

    /// Closed-interval containment test.
    pub fn contains(&self, point: NormPoint) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.right()
            && point.y >= self.top_left.y
            && point.y <= self.bottom()
    }

    /// Whether the interiors of two rectangles intersect.
    ///
    /// Edge-adjacent rectangles do not count as overlapping, so tiled
    /// layouts that share borders remain registrable.
    pub fn overlaps(&self, other: &NormRect) -> bool {
        self.top_left.x < other.right()
            && other.top_left.x < self.right()
            && self.top_left.y < other.bottom()
            && other.top_left.y < self.bottom()
    }
}

// =============================================================================
// Entities & Vertex Spans
// =============================================================================

/// Identifier for one logical UI element.
///
/// Monotonically assigned by the component table and never reused within a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u16);

impl Entity {
    /// The entity's table index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where an entity's vertices sit inside the shared vertex buffer.
///
/// `offset_bytes` locates the first vertex, `span_elements` counts them, and
/// `stride_bytes` steps between consecutive vertices. The caller supplying
/// these values owns the guarantee that the span fits the buffer it will be
/// used against; the span writer re-checks at write time and reports rather
/// than touching memory outside the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexSpan {
    pub offset_bytes: u32,
    pub span_elements: u16,
    pub stride_bytes: u16,
}

impl VertexSpan {
    pub const fn new(offset_bytes: u32, span_elements: u16, stride_bytes: u16) -> Self {
        Self {
            offset_bytes,
            span_elements,
            stride_bytes,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_round_trip() {
        for value in [-1.0, -0.5, -0.1234, 0.0, 0.0001, 0.4321, 0.9999, 1.0] {
            let packed = Norm16::from_f64(value);
            let recovered = packed.to_f64();
            assert!(
                (recovered - value).abs() <= 1.0 / NORM_SCALE as f64,
                "{value} -> {recovered}"
            );
        }
    }

    #[test]
    fn test_fixed_point_truncates_toward_zero() {
        assert_eq!(Norm16::from_f64(0.00009).raw(), 0);
        assert_eq!(Norm16::from_f64(-0.00009).raw(), 0);
        assert_eq!(Norm16::from_f64(0.12349).raw(), 1234);
        assert_eq!(Norm16::from_f64(-0.12349).raw(), -1234);
    }

    #[test]
    fn test_fixed_point_add() {
        let half = Norm16::from_f64(0.5);
        assert_eq!(half.add(half), Norm16::MAX);
        assert_eq!(Norm16::MIN.add(Norm16::MAX), Norm16::ZERO);
    }

    #[test]
    fn test_rect_contains_closed_edges() {
        let rect = NormRect::new(
            NormPoint::from_f64(-0.5, -0.5),
            Norm16::from_f64(1.0),
            Norm16::from_f64(1.0),
        );

        assert!(rect.contains(NormPoint::from_f64(0.0, 0.0)));
        assert!(rect.contains(NormPoint::from_f64(-0.5, -0.5)));
        assert!(rect.contains(NormPoint::from_f64(0.5, 0.5)));
        assert!(!rect.contains(NormPoint::from_f64(0.51, 0.0)));
        assert!(!rect.contains(NormPoint::from_f64(0.0, -0.51)));
    }

    #[test]
    fn test_rect_overlap_excludes_shared_edges() {
        let left = NormRect::new(
            NormPoint::from_f64(-1.0, -1.0),
            Norm16::from_f64(1.0),
            Norm16::from_f64(2.0),
        );
        let right = NormRect::new(
            NormPoint::from_f64(0.0, -1.0),
            Norm16::from_f64(1.0),
            Norm16::from_f64(2.0),
        );
        let overlapping = NormRect::new(
            NormPoint::from_f64(-0.5, -0.5),
            Norm16::from_f64(1.0),
            Norm16::from_f64(1.0),
        );

        assert!(!left.overlaps(&right));
        assert!(!right.overlaps(&left));
        assert!(left.overlaps(&overlapping));
        assert!(overlapping.overlaps(&right));
    }
}
