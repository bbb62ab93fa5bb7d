//! # ERD Core
//!
//! Core types, traits, and error handling for ERD Builder.
//!
//! This crate provides the foundational building blocks shared by the
//! schema model, the canvas engines and the DDL generator:
//!
//! - **Types**: integer ids, canvas positions, cardinality
//! - **Traits**: `Validatable` and `Identifiable`
//! - **Errors**: unified error handling with `ErdError` and `ErdResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ErdError, ErdResult};
pub use traits::{Identifiable, Validatable};
pub use types::{
    AttributeId, Cardinality, CardinalityToken, EntityId, Position, RelationId, Side,
};

