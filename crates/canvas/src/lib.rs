//! # ERD Builder Canvas
//!
//! Pure canvas logic for the diagram editor. Nothing here renders; every
//! function reads a [`SchemaStore`](erd_ir::SchemaStore) and returns values a
//! front end can draw, or drives the store through its public operations.
//!
//! - [`geometry`]: connector curves and cardinality markers between entity cards
//! - [`attribute_drag`]: drag-to-reorder state machine for attribute rows
//! - [`entity_drag`]: pointer drag that moves entity cards

pub mod attribute_drag;
pub mod entity_drag;
pub mod geometry;

pub use attribute_drag::AttributeDrag;
pub use entity_drag::EntityDrag;
pub use geometry::{
    ANCHOR_OFFSET_Y, CARD_WIDTH, ConnectorPath, MARKER_SIZE, Point, RelationGeometry, Segment,
    bezier_point, cardinality_markers, connector_path, point_near_connector, relation_geometry,
};
