//! # MySQL DDL
//!
//! Renders a [`SchemaStore`] as one `CREATE TABLE` statement per entity, in
//! store order, for MySQL/InnoDB.
//!
//! The output depends only on the store and the options: no timestamps, no
//! sorting, no lookups outside the entity being rendered. Foreign keys are
//! emitted from each column's own `fk_ref`; a foreign-key column whose
//! reference is incomplete is written as a plain column.

use erd_ir::{Attribute, Entity, SchemaStore};
use regex::Regex;
use std::sync::LazyLock;

/// First line of every generated document
pub const DDL_HEADER: &str = "-- ERD Builder Pro";

/// Table options closing every statement
pub const TABLE_SUFFIX: &str = ") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";

/// Defaults written without quotes: numbers, `NULL`, `CURRENT_*`
static UNQUOTED_DEFAULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]|NULL|CURRENT)").expect("default-value pattern is valid")
});

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdlOptions {
    /// Emit `COMMENT '...'` for columns that have one
    pub include_comments: bool,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            include_comments: true,
        }
    }
}

impl DdlOptions {
    pub fn without_comments() -> Self {
        Self {
            include_comments: false,
        }
    }
}

/// Generate the DDL document for every entity in the store
pub fn generate_ddl(store: &SchemaStore, options: &DdlOptions) -> String {
    let mut sql = format!("{DDL_HEADER}\n\n");
    for entity in store.entities() {
        sql.push_str(&create_table(entity, options));
        sql.push_str("\n\n");
    }
    sql
}

/// `CREATE TABLE` statement for one entity, without trailing newline
pub fn create_table(entity: &Entity, options: &DdlOptions) -> String {
    let mut clauses: Vec<String> = entity
        .attributes
        .iter()
        .map(|a| column_definition(a, options))
        .collect();

    let pks = entity.primary_keys();
    if !pks.is_empty() {
        let names: Vec<&str> = pks.iter().map(|a| a.name.as_str()).collect();
        clauses.push(format!("  PRIMARY KEY ({})", names.join(",")));
    }

    for fk in entity.resolved_foreign_keys() {
        clauses.push(format!(
            "  FOREIGN KEY ({}) REFERENCES {}({})",
            fk.name, fk.fk_ref.table, fk.fk_ref.column
        ));
    }

    format!(
        "CREATE TABLE {} (\n{}\n{}",
        entity.name,
        clauses.join(",\n"),
        TABLE_SUFFIX
    )
}

/// Column clause, indented by two spaces
pub fn column_definition(attribute: &Attribute, options: &DdlOptions) -> String {
    let mut column = format!("  {} {}", attribute.name, attribute.type_display());

    if attribute.unsigned {
        column.push_str(" UNSIGNED");
    }
    if !attribute.charset.is_empty() {
        column.push_str(" CHARACTER SET ");
        column.push_str(&attribute.charset);
    }
    if attribute.nn {
        column.push_str(" NOT NULL");
    } else if !attribute.pk {
        column.push_str(" NULL");
    }
    if attribute.has_default() {
        column.push_str(" DEFAULT ");
        column.push_str(&default_literal(&attribute.default_value));
    }
    if attribute.auto_increment {
        column.push_str(" AUTO_INCREMENT");
    }
    if attribute.unique && !attribute.pk {
        column.push_str(" UNIQUE");
    }
    if options.include_comments && !attribute.comment.is_empty() {
        column.push_str(" COMMENT ");
        column.push_str(&quote(&attribute.comment));
    }

    column
}

/// A default value as it appears after `DEFAULT`
///
/// Values starting with a digit, `NULL` or `CURRENT` (any case) are emitted
/// verbatim; everything else becomes a string literal.
pub fn default_literal(value: &str) -> String {
    if UNQUOTED_DEFAULT.is_match(value) {
        value.to_string()
    } else {
        quote(value)
    }
}

/// Single-quoted SQL string literal with embedded quotes doubled
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
