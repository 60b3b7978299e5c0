//! Records the backend owns and addresses by identifier.

/// A backend record with a stable identifier.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Drop the record with `id` from a locally held list (after a delete).
///
/// Returns whether anything was removed.
pub fn remove_by_id<E: Entity>(items: &mut Vec<E>, id: &E::Id) -> bool {
    let before = items.len();
    items.retain(|e| e.id() != id);
    items.len() != before
}
