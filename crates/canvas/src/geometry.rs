//! # Relation Geometry
//!
//! Connector curves and cardinality markers between entity cards.
//!
//! A connector leaves the right edge of the source card and enters the left
//! edge of the target card, both at a fixed height below the card top. The
//! curve is a cubic Bézier whose control points share the horizontal midpoint,
//! so it flattens into an S between the two anchors.
//!
//! ## Markers
//!
//! Each end of a connector carries the notation for its cardinality token:
//! - **one** (`1`): a single vertical bar just inside the anchor
//! - **many** (`N`, `M`): a crow's foot of three strokes fanning out from the anchor
//!
//! Strokes point away from the card on the source side and toward it on the
//! target side.

use erd_core::{CardinalityToken, Side};
use erd_ir::{Relation, SchemaStore};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Width of an entity card
pub const CARD_WIDTH: f32 = 240.0;

/// Distance from the card top to the connector anchor
pub const ANCHOR_OFFSET_Y: f32 = 50.0;

/// Horizontal reach of a crow's foot; its vertical spread is half of it
pub const MARKER_SIZE: f32 = 10.0;

/// Horizontal inset of the "one" bar
const BAR_INSET: f32 = 5.0;

/// Half the height of the "one" bar
const BAR_HALF_HEIGHT: f32 = 6.0;

/// Curve samples used for hit testing
const HIT_SAMPLES: usize = 20;

// ============================================================================
// Point & Segment
// ============================================================================

/// A point on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A straight stroke, rendered as `M{x1},{y1} L{x2},{y2}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// SVG path data
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{} L{}", self.start, self.end)
    }
}

// ============================================================================
// Connector Path
// ============================================================================

/// Cubic Bézier between two anchors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl ConnectorPath {
    /// Curve from `start` to `end` with both control points on the midpoint x
    pub fn between(start: Point, end: Point) -> Self {
        let mx = (start.x + end.x) / 2.0;
        Self {
            start,
            control1: Point::new(mx, start.y),
            control2: Point::new(mx, end.y),
            end,
        }
    }

    /// SVG path data, `M{fx},{fy} C{mx},{fy} {mx},{ty} {tx},{ty}`
    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    /// Point on the curve at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f32) -> Point {
        bezier_point(t, self.start, self.control1, self.control2, self.end)
    }
}

impl fmt::Display for ConnectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M{} C{} {} {}",
            self.start, self.control1, self.control2, self.end
        )
    }
}

/// Calculate a point on a cubic bezier curve
pub fn bezier_point(t: f32, p0: Point, p1: Point, p2: Point, p3: Point) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    Point {
        x: mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x,
        y: mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y,
    }
}

/// Check if a point is near a connector (for hit testing)
pub fn point_near_connector(point: Point, path: &ConnectorPath, tolerance: f32) -> bool {
    (0..=HIT_SAMPLES).any(|i| {
        let t = i as f32 / HIT_SAMPLES as f32;
        point.distance_to(&path.point_at(t)) <= tolerance
    })
}

// ============================================================================
// Projections
// ============================================================================

/// Anchor of one end of a relation, or `None` when that entity is missing
fn anchor(store: &SchemaStore, relation: &Relation, side: Side) -> Option<Point> {
    let entity = store.entity(relation.endpoint(side))?;
    let x = match side {
        Side::From => entity.position.x + CARD_WIDTH,
        Side::To => entity.position.x,
    };
    Some(Point::new(x, entity.position.y + ANCHOR_OFFSET_Y))
}

/// Connector from the source card's right edge to the target card's left edge
///
/// `None` when either endpoint is missing from the store.
pub fn connector_path(store: &SchemaStore, relation: &Relation) -> Option<ConnectorPath> {
    let start = anchor(store, relation, Side::From)?;
    let end = anchor(store, relation, Side::To)?;
    Some(ConnectorPath::between(start, end))
}

/// Marker strokes for one end of a relation
///
/// Empty when either endpoint is missing. Malformed cardinality tokens draw
/// as "one".
pub fn cardinality_markers(store: &SchemaStore, relation: &Relation, side: Side) -> Vec<Segment> {
    if store.entity(relation.endpoint(side.opposite())).is_none() {
        return Vec::new();
    }
    let Some(Point { x, y }) = anchor(store, relation, side) else {
        return Vec::new();
    };

    let sign = match side {
        Side::From => 1.0,
        Side::To => -1.0,
    };

    match relation.parsed_cardinality().token(side) {
        CardinalityToken::N | CardinalityToken::M => {
            let tip = x + sign * MARKER_SIZE;
            let spread = MARKER_SIZE / 2.0;
            vec![
                Segment::new((x, y), (tip, y - spread)),
                Segment::new((x, y), (tip, y + spread)),
                Segment::new((x, y), (tip, y)),
            ]
        }
        CardinalityToken::One => {
            let bar = x + sign * BAR_INSET;
            vec![Segment::new(
                (bar, y - BAR_HALF_HEIGHT),
                (bar, y + BAR_HALF_HEIGHT),
            )]
        }
    }
}

/// Everything needed to draw one relation
#[derive(Debug, Clone, PartialEq)]
pub struct RelationGeometry {
    pub path: ConnectorPath,
    pub from_markers: Vec<Segment>,
    pub to_markers: Vec<Segment>,
    /// Midpoint of the curve, where a label sits
    pub label_anchor: Point,
}

/// Connector and both marker sets, or `None` when an endpoint is missing
pub fn relation_geometry(store: &SchemaStore, relation: &Relation) -> Option<RelationGeometry> {
    let path = connector_path(store, relation)?;
    Some(RelationGeometry {
        label_anchor: path.point_at(0.5),
        from_markers: cardinality_markers(store, relation, Side::From),
        to_markers: cardinality_markers(store, relation, Side::To),
        path,
    })
}

// ============================================================================
// Tests
// ============================================================================
