//! Core traits for ERD Builder
//!
//! This module defines the traits that schema objects implement to provide
//! consistent behavior for validation and id lookup.

use crate::error::ErdResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Validation is advisory. The store accepts any state and the generator
/// degrades gracefully; `validate` lets a front end report problems such as
/// duplicate names before the DDL reaches a database.
///
/// # Example
///
/// ```rust,ignore
/// use erd_core::{Validatable, ErdResult, ErdError};
///
/// struct Table {
///     name: String,
/// }
///
/// impl Validatable for Table {
///     fn validate(&self) -> ErdResult<()> {
///         if self.name.is_empty() {
///             return Err(ErdError::validation("Name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `ErdError` describing the first problem.
    fn validate(&self) -> ErdResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for schema objects carrying an integer id
pub trait Identifiable {
    /// Get the object's id
    fn id(&self) -> u64;

    /// Check if this object has the given id
    fn matches_id(&self, id: u64) -> bool {
        self.id() == id
    }
}

/// Find the position of the item with `id` in a slice
pub fn position_of<T: Identifiable>(items: &[T], id: u64) -> Option<usize> {
    items.iter().position(|item| item.matches_id(id))
}

/// The largest id in a slice, if any
pub fn max_id<T: Identifiable>(items: &[T]) -> Option<u64> {
    items.iter().map(Identifiable::id).max()
}

// ============================================================================
// Tests
// ============================================================================
