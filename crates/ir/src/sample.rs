//! Seed dataset
//!
//! A two-table blog schema used by the CLI when no snapshot is given and by
//! tests that need a realistic store.

use crate::attribute::Attribute;
use crate::entity::{Entity, EntityTemplate};
use crate::entity_type::default_palette;
use crate::id::IdAllocator;
use crate::relation::{Relation, RelationTemplate};
use crate::store::SchemaStore;

impl SchemaStore {
    /// `User` and `Post` joined by a `1:N` relation through `Post.user_id`
    pub fn sample() -> Self {
        let palette = default_palette();

        let mut user = Entity::from_template(
            1,
            1,
            EntityTemplate::new("User")
                .at(50.0, 50.0)
                .of_type(&palette[0]),
        );
        user.attributes.extend([
            Attribute::new(2, "username", "VARCHAR")
                .with_length("50")
                .with_charset("utf8mb4")
                .not_null()
                .unique(),
            Attribute::new(3, "email", "VARCHAR")
                .with_length("255")
                .not_null()
                .unique(),
        ]);

        let mut post = Entity::from_template(
            2,
            4,
            EntityTemplate::new("Post")
                .at(380.0, 50.0)
                .of_type(&palette[1]),
        );
        post.attributes[0].data_type = "BIGINT".to_string();
        post.attributes.extend([
            Attribute::new(5, "user_id", "INT")
                .references("User", "id")
                .not_null()
                .unsigned(),
            Attribute::new(6, "title", "VARCHAR")
                .with_length("200")
                .not_null(),
        ]);

        let relation = Relation::from_template(
            1,
            RelationTemplate::new(1, 2, "1:N")
                .with_fk("user_id", 2)
                .linked_to(5),
        );

        // ids overlap across kinds; the highest is the last attribute
        let ids = IdAllocator::seeded_above(6).unwrap_or_default();
        SchemaStore::assemble(vec![user, post], vec![relation], ids)
    }
}
