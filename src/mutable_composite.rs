//! The overwriting composite form.

use std::any::TypeId;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::composite::CompositeTrait;
use crate::entry::{TraitBox, TraitEntry};
use crate::error::TraitError;

/// A [`CompositeTrait`] whose entries can be inserted or overwritten
/// after construction.
///
/// Every lookup of the immutable composite is available through `Deref`.
/// There is no removal operation: entries can only be replaced, never
/// detached.
///
/// # Example
///
/// ```
/// use trait_compose::{MutableCompositeTrait, MutableTrait, Trait};
///
/// let mut composite = MutableCompositeTrait::new();
/// composite.set(Box::new(MutableTrait::new(1i32)));
/// assert_eq!(composite.value::<i32>(), Some(&1));
///
/// // Overwrites the entry registered under MutableTrait<i32>.
/// composite.set(Box::new(MutableTrait::new(2i32)));
/// assert_eq!(composite.value::<i32>(), Some(&2));
/// assert_eq!(composite.len(), 1);
/// ```
#[derive(Debug)]
pub struct MutableCompositeTrait {
    inner: CompositeTrait,
}

impl MutableCompositeTrait {
    /// Build an empty mutable composite. This is the only empty
    /// composite form; entries arrive via
    /// [`set`](MutableCompositeTrait::set).
    pub fn new() -> Self {
        Self { inner: CompositeTrait::empty() }
    }

    /// Build a mutable composite holding a single wrapper, keyed by its
    /// own concrete type.
    pub fn with_entry(entry: TraitBox) -> Self {
        Self { inner: CompositeTrait::new(entry) }
    }

    /// Build a mutable composite holding a single explicitly keyed
    /// entry.
    pub fn from_pair(key: TypeId, entry: TraitBox) -> Self {
        Self { inner: CompositeTrait::from_pair(key, entry) }
    }

    /// Build a mutable composite from a sequence of wrappers, under the
    /// same rules as [`CompositeTrait::from_entries`].
    pub fn from_entries(
        entries: impl IntoIterator<Item = TraitBox>,
    ) -> Result<Self, TraitError> {
        Ok(Self { inner: CompositeTrait::from_entries(entries)? })
    }

    /// Build a mutable composite from explicitly keyed entries.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (TypeId, TraitBox)>,
    ) -> Result<Self, TraitError> {
        Ok(Self { inner: CompositeTrait::from_pairs(pairs)? })
    }

    /// Insert or overwrite the entry keyed by the wrapper's own concrete
    /// type. Overwriting keeps the key's position in enumeration order;
    /// a new key appends.
    pub fn set(&mut self, entry: TraitBox) -> &mut Self {
        let key = entry.wrapper_type();
        self.inner.insert_or_replace(key, entry);
        self
    }

    /// Insert or overwrite the entry keyed by `W` itself.
    pub fn set_as<W: TraitEntry>(&mut self, entry: W) -> &mut Self {
        self.inner.insert_or_replace(TypeId::of::<W>(), Box::new(entry));
        self
    }

    /// Freeze into the immutable composite form.
    pub fn into_inner(self) -> CompositeTrait {
        self.inner
    }
}

impl Default for MutableCompositeTrait {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MutableCompositeTrait {
    type Target = CompositeTrait;

    fn deref(&self) -> &CompositeTrait {
        &self.inner
    }
}

impl DerefMut for MutableCompositeTrait {
    fn deref_mut(&mut self) -> &mut CompositeTrait {
        &mut self.inner
    }
}

impl fmt::Display for MutableCompositeTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl TraitEntry for MutableCompositeTrait {
    fn wrapper_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn wrapper_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn payload_type(&self) -> Option<TypeId> {
        None
    }

    fn is_mutable(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MutableTrait, Trait};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Priority(i32);

    #[derive(Debug, Clone, PartialEq)]
    struct Name(String);

    #[test]
    fn test_set_inserts_new_key() {
        let mut composite = MutableCompositeTrait::new();
        assert!(composite.is_empty());

        composite.set(Box::new(Trait::new(Priority(0))));
        assert_eq!(composite.len(), 1);
        assert_eq!(composite.value::<Priority>(), Some(&Priority(0)));
    }

    #[test]
    fn test_set_overwrites_same_wrapper_type() {
        let mut composite =
            MutableCompositeTrait::with_entry(Box::new(Trait::new(Priority(0))));

        composite.set(Box::new(Trait::new(Priority(2))));
        assert_eq!(composite.len(), 1);
        assert_eq!(composite.value::<Priority>(), Some(&Priority(2)));
    }

    #[test]
    fn test_overwrite_keeps_enumeration_position() {
        let mut composite = MutableCompositeTrait::from_entries([
            Box::new(Trait::new(Priority(1))) as TraitBox,
            Box::new(MutableTrait::new(Name("a".into()))),
        ])
        .unwrap();

        composite.set(Box::new(Trait::new(Priority(9))));

        let names: Vec<_> =
            composite.iter().map(|e| e.wrapper_name()).collect();
        assert!(names[0].contains("Priority"));
        assert!(names[1].contains("Name"));
        assert_eq!(composite.value::<Priority>(), Some(&Priority(9)));
    }

    #[test]
    fn test_set_as_uses_the_type_parameter_as_key() {
        let mut composite = MutableCompositeTrait::new();
        composite.set_as(MutableTrait::new(Name("n".into())));
        assert!(composite.contains_key(TypeId::of::<MutableTrait<Name>>()));
    }

    #[test]
    fn test_lookups_available_through_deref() {
        let mut composite = MutableCompositeTrait::new();
        composite.set(Box::new(MutableTrait::new(Priority(5))));

        composite.mutable_mut::<Priority>().unwrap().set(Priority(6));
        assert_eq!(composite.value::<Priority>(), Some(&Priority(6)));

        let missing = composite.resolve(TypeId::of::<Trait<Name>>());
        assert!(missing.is_err());
    }

    #[test]
    fn test_into_inner_freezes() {
        let mut composite = MutableCompositeTrait::new();
        composite.set(Box::new(Trait::new(Priority(1))));
        let frozen = composite.into_inner();
        assert_eq!(frozen.value::<Priority>(), Some(&Priority(1)));
    }
}
