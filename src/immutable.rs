//! Immutable capability wrapper.

use std::any::{Any, TypeId};
use std::fmt;

use crate::entry::TraitEntry;

/// An immutable holder of a single payload value.
///
/// The payload is fixed at construction and only readable afterwards. To
/// obtain a replaceable form, convert with
/// [`to_mutable`](crate::convert::to_mutable), which snapshots the
/// payload into a new, independent wrapper.
///
/// # Example
///
/// ```
/// use trait_compose::Trait;
///
/// let wings = Trait::new(2u32);
/// assert_eq!(*wings.payload(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trait<T> {
    payload: T,
}

impl<T> Trait<T> {
    /// Wrap a payload value.
    pub fn new(payload: T) -> Self {
        Self { payload }
    }

    /// Read-only access to the payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the wrapper, yielding the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T: fmt::Debug> fmt::Display for Trait<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.payload)
    }
}

impl<T: fmt::Debug + Any> TraitEntry for Trait<T> {
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
        false
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
    fn test_payload_access() {
        let t = Trait::new("fixed".to_string());
        assert_eq!(t.payload(), "fixed");
        assert_eq!(t.into_payload(), "fixed");
    }

    #[test]
    fn test_equality_is_payload_equality() {
        assert_eq!(Trait::new(5), Trait::new(5));
        assert_ne!(Trait::new(5), Trait::new(6));
    }

    #[test]
    fn test_display_renders_payload() {
        assert_eq!(Trait::new(42u8).to_string(), "42");
        assert_eq!(Trait::new("x").to_string(), "\"x\"");
    }
}
