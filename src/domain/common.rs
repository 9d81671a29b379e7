//! Shared traits for the input value types consumed by the statistics engine.

use uuid::Uuid;

/// Associates entities with optional category ownership.
pub trait BelongsToCategory {
    fn category_id(&self) -> Option<Uuid>;
}

/// Supplies the net contribution of an entity, in minor currency units.
pub trait Amounted {
    fn signed_amount(&self) -> i64;
}
