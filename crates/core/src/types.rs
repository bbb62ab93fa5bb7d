//! Core types used throughout ERD Builder
//!
//! This module contains the identifier aliases, canvas geometry primitives
//! and the cardinality notation shared by the schema model, the canvas
//! engines and the DDL generator.

use serde::{Deserialize, Serialize};

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Identifier of an entity (table)
pub type EntityId = u64;

/// Identifier of an attribute (column)
pub type AttributeId = u64;

/// Identifier of a relation (foreign-key association)
pub type RelationId = u64;

// ============================================================================
// Geometry Types
// ============================================================================

/// Position on the 2D canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Clamp both coordinates to be non-negative
    pub fn clamp_non_negative(&self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

// ============================================================================
// Relation Sides
// ============================================================================

/// One end of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The source entity
    From,
    /// The target entity
    To,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::From => write!(f, "from"),
            Side::To => write!(f, "to"),
        }
    }
}

// ============================================================================
// Cardinality
// ============================================================================

/// One token of a cardinality pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalityToken {
    /// `1`
    One,
    /// `N`
    N,
    /// `M`
    M,
}

impl CardinalityToken {
    /// Parse a single token
    ///
    /// Looser than the notation the editor writes, which is exactly `1`, `N`
    /// or `M`: lowercase `n`/`m` are also read as "many" and surrounding
    /// whitespace is ignored, so hand-edited snapshots like `"1 : n"` still
    /// draw a crow's foot.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "1" => Some(CardinalityToken::One),
            "N" | "n" => Some(CardinalityToken::N),
            "M" | "m" => Some(CardinalityToken::M),
            _ => None,
        }
    }

    /// Whether this token denotes a "many" side
    pub fn is_many(&self) -> bool {
        matches!(self, CardinalityToken::N | CardinalityToken::M)
    }

    /// Canonical notation
    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalityToken::One => "1",
            CardinalityToken::N => "N",
            CardinalityToken::M => "M",
        }
    }
}

impl std::fmt::Display for CardinalityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed `"<from>:<to>"` cardinality pair
///
/// Parsing never fails. Any token that is missing or not one of `1`, `N`,
/// `M` reads as [`CardinalityToken::One`], so a malformed tag renders as a
/// plain one-to-one bar instead of breaking the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    pub from: CardinalityToken,
    pub to: CardinalityToken,
}

impl Cardinality {
    /// `1:1`
    pub const ONE_TO_ONE: Cardinality = Cardinality::new(CardinalityToken::One, CardinalityToken::One);
    /// `1:N`
    pub const ONE_TO_MANY: Cardinality = Cardinality::new(CardinalityToken::One, CardinalityToken::N);
    /// `N:1`
    pub const MANY_TO_ONE: Cardinality = Cardinality::new(CardinalityToken::N, CardinalityToken::One);
    /// `N:M`
    pub const MANY_TO_MANY: Cardinality = Cardinality::new(CardinalityToken::N, CardinalityToken::M);

    /// Create a cardinality from two tokens
    pub const fn new(from: CardinalityToken, to: CardinalityToken) -> Self {
        Self { from, to }
    }

    /// Parse a cardinality tag, degrading unknown tokens to `1`
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.split(':');
        let from = parts.next().and_then(CardinalityToken::parse);
        let to = parts.next().and_then(CardinalityToken::parse);
        let extra = parts.next().is_some();

        if from.is_none() || to.is_none() || extra {
            tracing::debug!(tag, "malformed cardinality, unknown tokens read as '1'");
        }

        Self {
            from: from.unwrap_or(CardinalityToken::One),
            to: to.unwrap_or(CardinalityToken::One),
        }
    }

    /// Whether `tag` is a well-formed two-token cardinality
    pub fn is_well_formed(tag: &str) -> bool {
        let parts: Vec<&str> = tag.split(':').collect();
        parts.len() == 2 && parts.iter().all(|p| CardinalityToken::parse(p).is_some())
    }

    /// Get the token for one side of the relation
    pub fn token(&self, side: Side) -> CardinalityToken {
        match side {
            Side::From => self.from,
            Side::To => self.to,
        }
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::ONE_TO_MANY
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_position_clamp() {
        let pos = Position::new(-12.5, 40.0).clamp_non_negative();
        assert_eq!(pos, Position::new(0.0, 40.0));
    }

    #[test]
    fn test_position_difference() {
        let a = Position::new(10.0, 20.0);
        let b = Position::new(3.0, 5.0);
        assert_eq!(a - b, Position::new(7.0, 15.0));
    }

    #[test]
    fn test_cardinality_parse() {
        assert_eq!(Cardinality::parse("1:N"), Cardinality::ONE_TO_MANY);
        assert_eq!(Cardinality::parse("N:1"), Cardinality::MANY_TO_ONE);
        assert_eq!(Cardinality::parse("N:M"), Cardinality::MANY_TO_MANY);
        assert_eq!(Cardinality::parse("1:1"), Cardinality::ONE_TO_ONE);
        assert_eq!(
            Cardinality::parse("m:n"),
            Cardinality::new(CardinalityToken::M, CardinalityToken::N)
        );
        assert_eq!(Cardinality::parse("1 : n"), Cardinality::ONE_TO_MANY);
    }

    #[test]
    fn test_cardinality_malformed_reads_as_one() {
        assert_eq!(Cardinality::parse(""), Cardinality::ONE_TO_ONE);
        assert_eq!(Cardinality::parse("N"), Cardinality::MANY_TO_ONE);
        assert_eq!(Cardinality::parse("X:N"), Cardinality::ONE_TO_MANY);
        assert_eq!(Cardinality::parse("0..*:1"), Cardinality::ONE_TO_ONE);
    }

    #[test]
    fn test_cardinality_well_formed() {
        assert!(Cardinality::is_well_formed("1:N"));
        assert!(Cardinality::is_well_formed("N:M"));
        assert!(!Cardinality::is_well_formed("N"));
        assert!(!Cardinality::is_well_formed("1:N:M"));
        assert!(!Cardinality::is_well_formed("one:many"));
    }

    #[test]
    fn test_cardinality_token_by_side() {
        let card = Cardinality::MANY_TO_ONE;
        assert!(card.token(Side::From).is_many());
        assert!(!card.token(Side::To).is_many());
        assert_eq!(card.to_string(), "N:1");
        assert_eq!(Side::From.opposite(), Side::To);
    }
}
