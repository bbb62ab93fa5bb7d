//! Attribute definitions for entity columns
//!
//! This module contains the `Attribute` struct (one table column), its
//! foreign-key reference, and `AttributePatch` for partial updates.

use erd_core::{AttributeId, ErdError, ErdResult, Identifiable, Validatable};
use serde::{Deserialize, Serialize};

/// Name given to attributes created from the "add column" action
pub const NEW_ATTRIBUTE_NAME: &str = "new_col";

// ============================================================================
// Attribute
// ============================================================================

/// Represents a column of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Unique identifier for this attribute
    pub id: AttributeId,

    /// Column name
    pub name: String,

    /// SQL type tag (e.g. `INT`, `VARCHAR`)
    #[serde(rename = "type")]
    pub data_type: String,

    /// Display width / precision, empty when unset
    #[serde(default)]
    pub length: String,

    /// Part of the primary key
    #[serde(default)]
    pub pk: bool,

    /// Foreign key column
    #[serde(default)]
    pub fk: bool,

    /// NOT NULL
    #[serde(default)]
    pub nn: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub unsigned: bool,

    #[serde(default)]
    pub auto_increment: bool,

    /// Raw default expression, empty when unset
    #[serde(default)]
    pub default_value: String,

    /// Column character set, empty to inherit the table's
    #[serde(default)]
    pub charset: String,

    #[serde(default)]
    pub comment: String,

    /// Referenced table/column, meaningful only when `fk` is set
    #[serde(default)]
    pub fk_ref: ForeignKeyRef,
}

impl Attribute {
    /// Create a new attribute with every flag cleared
    pub fn new(id: AttributeId, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            data_type: data_type.into(),
            length: String::new(),
            pk: false,
            fk: false,
            nn: false,
            unique: false,
            unsigned: false,
            auto_increment: false,
            default_value: String::new(),
            charset: String::new(),
            comment: String::new(),
            fk_ref: ForeignKeyRef::default(),
        }
    }

    /// The key column every new entity starts with:
    /// `id INT UNSIGNED NOT NULL AUTO_INCREMENT`, primary key
    pub fn primary_key(id: AttributeId) -> Self {
        Self::new(id, "id", "INT")
            .pk()
            .not_null()
            .unsigned()
            .auto_increment()
    }

    /// The neutral column appended by "add column": `new_col VARCHAR(255)`
    pub fn placeholder(id: AttributeId) -> Self {
        Self::new(id, NEW_ATTRIBUTE_NAME, "VARCHAR").with_length("255")
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the length / precision
    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = length.into();
        self
    }

    /// Mark as part of the primary key
    pub fn pk(mut self) -> Self {
        self.pk = true;
        self
    }

    /// Mark as NOT NULL
    pub fn not_null(mut self) -> Self {
        self.nn = true;
        self
    }

    /// Mark as unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark as unsigned
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Mark as auto-increment
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Set the default expression
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set the character set
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Set the column comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Mark as a foreign key referencing `table(column)`
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.fk = true;
        self.fk_ref = ForeignKeyRef::new(table, column);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Type with its length, e.g. `VARCHAR(255)`
    pub fn type_display(&self) -> String {
        if self.length.is_empty() {
            self.data_type.clone()
        } else {
            format!("{}({})", self.data_type, self.length)
        }
    }

    /// Whether this is a foreign key with both reference parts filled in
    pub fn has_resolved_fk(&self) -> bool {
        self.fk && self.fk_ref.is_resolved()
    }

    /// Whether this is flagged as a foreign key but points nowhere
    pub fn is_dangling_fk(&self) -> bool {
        self.fk && !self.fk_ref.is_resolved()
    }

    /// Whether a default expression is set
    pub fn has_default(&self) -> bool {
        !self.default_value.is_empty()
    }
}

impl Identifiable for Attribute {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Validatable for Attribute {
    fn validate(&self) -> ErdResult<()> {
        if self.name.trim().is_empty() {
            return Err(ErdError::validation("Attribute name cannot be empty"));
        }

        if self.data_type.trim().is_empty() {
            return Err(ErdError::validation(format!(
                "Attribute '{}' has no type",
                self.name
            )));
        }

        if self.is_dangling_fk() {
            return Err(ErdError::validation(format!(
                "Attribute '{}' is a foreign key without a referenced table and column",
                self.name
            )));
        }

        Ok(())
    }
}

// ============================================================================
// ForeignKeyRef
// ============================================================================

/// Target of a foreign key, linked by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Referenced table name
    #[serde(default)]
    pub table: String,

    /// Referenced column name
    #[serde(default)]
    pub column: String,
}

impl ForeignKeyRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Both table and column are set
    pub fn is_resolved(&self) -> bool {
        !self.table.is_empty() && !self.column.is_empty()
    }

    /// Reset to the unlinked state
    pub fn clear(&mut self) {
        self.table.clear();
        self.column.clear();
    }
}

// ============================================================================
// AttributePatch
// ============================================================================

/// Partial update for an attribute. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributePatch {
    pub name: Option<String>,
    pub data_type: Option<String>,
    pub length: Option<String>,
    pub pk: Option<bool>,
    pub fk: Option<bool>,
    pub nn: Option<bool>,
    pub unique: Option<bool>,
    pub unsigned: Option<bool>,
    pub auto_increment: Option<bool>,
    pub default_value: Option<String>,
    pub charset: Option<String>,
    pub comment: Option<String>,
    pub fk_ref: Option<ForeignKeyRef>,
}

impl AttributePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(length.into());
        self
    }

    pub fn pk(mut self, pk: bool) -> Self {
        self.pk = Some(pk);
        self
    }

    pub fn fk(mut self, fk: bool) -> Self {
        self.fk = Some(fk);
        self
    }

    pub fn nn(mut self, nn: bool) -> Self {
        self.nn = Some(nn);
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    pub fn unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = Some(unsigned);
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn fk_ref(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.fk_ref = Some(ForeignKeyRef::new(table, column));
        self
    }

    /// Merge the set fields into `attribute`
    pub fn apply(self, attribute: &mut Attribute) {
        if let Some(name) = self.name {
            attribute.name = name;
        }
        if let Some(data_type) = self.data_type {
            attribute.data_type = data_type;
        }
        if let Some(length) = self.length {
            attribute.length = length;
        }
        if let Some(pk) = self.pk {
            attribute.pk = pk;
        }
        if let Some(fk) = self.fk {
            attribute.fk = fk;
        }
        if let Some(nn) = self.nn {
            attribute.nn = nn;
        }
        if let Some(unique) = self.unique {
            attribute.unique = unique;
        }
        if let Some(unsigned) = self.unsigned {
            attribute.unsigned = unsigned;
        }
        if let Some(auto_increment) = self.auto_increment {
            attribute.auto_increment = auto_increment;
        }
        if let Some(default_value) = self.default_value {
            attribute.default_value = default_value;
        }
        if let Some(charset) = self.charset {
            attribute.charset = charset;
        }
        if let Some(comment) = self.comment {
            attribute.comment = comment;
        }
        if let Some(fk_ref) = self.fk_ref {
            attribute.fk_ref = fk_ref;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
