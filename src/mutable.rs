//! Mutable capability wrapper.

use std::any::{Any, TypeId};
use std::fmt;

use crate::entry::TraitEntry;

/// A payload holder whose value may be replaced in place.
///
/// Payloads are treated as immutable values: [`set`](MutableTrait::set)
/// swaps the whole payload for a new one, it never mutates the old value.
/// Equality is payload equality, not identity, so two independently
/// constructed wrappers holding equal payloads compare equal. Keep that
/// in mind before using these in any de-duplicating collection.
///
/// # Example
///
/// ```
/// use trait_compose::MutableTrait;
///
/// let mut legs = MutableTrait::new(4u32);
/// legs.set(3);
/// assert_eq!(*legs.payload(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutableTrait<T> {
    payload: T,
}

impl<T> MutableTrait<T> {
    /// Wrap a payload value.
    pub fn new(payload: T) -> Self {
        Self { payload }
    }

    /// Read access to the current payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Mutable access to the current payload.
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Replace the payload wholesale.
    pub fn set(&mut self, payload: T) {
        self.payload = payload;
    }

    /// Consume the wrapper, yielding the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T: fmt::Debug> fmt::Display for MutableTrait<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.payload)
    }
}

impl<T: fmt::Debug + Any> TraitEntry for MutableTrait<T> {
    fn wrapper_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn wrapper_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn payload_type(&self) -> Option<TypeId> {
        Some(TypeId::of::<T>())
    }

    fn is_mutable(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_payload() {
        let mut m = MutableTrait::new(1);
        m.set(2);
        assert_eq!(*m.payload(), 2);
        *m.payload_mut() += 1;
        assert_eq!(m.into_payload(), 3);
    }

    #[test]
    fn test_equality_is_payload_equality_not_identity() {
        let a = MutableTrait::new("p1".to_string());
        let b = MutableTrait::new("p1".to_string());
        assert_eq!(a, b);

        let mut c = b.clone();
        c.set("p2".to_string());
        assert_ne!(a, c);
    }

    #[test]
    fn test_wrapper_forms_are_distinct_types() {
        use crate::Trait;
        assert_ne!(
            TypeId::of::<MutableTrait<u32>>(),
            TypeId::of::<Trait<u32>>()
        );
    }
}
