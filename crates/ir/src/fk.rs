//! Foreign-key helpers
//!
//! Naming and construction of the column a relation adds to the entity that
//! holds its foreign key.

use crate::attribute::Attribute;
use crate::relation::RelationDraft;
use erd_core::AttributeId;
use heck::ToSnakeCase;

/// Suggested foreign-key column name for a referenced table
///
/// - "User" -> "user_id"
/// - "BlogPost" -> "blog_post_id"
/// - "order_item" -> "order_item_id"
pub fn fk_column_name(entity_name: &str) -> String {
    format!("{}_id", entity_name.to_snake_case())
}

/// Build the foreign-key column described by a draft
///
/// `column_name` and `ref_table` are the resolved values, i.e. already
/// defaulted by the caller when the draft left them empty.
pub fn fk_attribute(
    id: AttributeId,
    draft: &RelationDraft,
    column_name: &str,
    ref_table: &str,
) -> Attribute {
    let mut attribute = Attribute::new(id, column_name, &draft.fk_column_type)
        .with_length(&draft.fk_column_length)
        .references(ref_table, &draft.ref_column);
    attribute.unsigned = draft.fk_column_unsigned;
    attribute.nn = !draft.fk_nullable;
    attribute
}
