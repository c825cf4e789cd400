//! Composition, conversion, and payload-extraction operations.
//!
//! Conversion between the wrapper forms is snapshot-based: when the
//! input is not already the requested form, the payload is cloned into a
//! new, independent wrapper. No back-link is kept, so mutating either
//! side afterwards never shows through the other. Callers tempted to
//! treat the conversion result as a live view will be surprised; the
//! tests below pin the non-aliasing behavior down.

use std::borrow::Cow;
use std::fmt;
use std::iter;

use crate::composite::CompositeTrait;
use crate::entry::{TraitBox, TraitEntry};
use crate::error::TraitError;
use crate::immutable::Trait;
use crate::mutable::MutableTrait;
use crate::mutable_composite::MutableCompositeTrait;

/// Build an immutable composite from `base` together with `others`.
///
/// Enumeration order is `others` first, then `base` last; fallback scans
/// over the result observe that order. Fails with
/// [`TraitError::DuplicateKey`] if any two entries share a concrete
/// wrapper type.
pub fn compose(
    base: TraitBox,
    others: impl IntoIterator<Item = TraitBox>,
) -> Result<CompositeTrait, TraitError> {
    CompositeTrait::from_entries(others.into_iter().chain(iter::once(base)))
}

/// Like [`compose`], producing the overwriting composite form.
pub fn compose_mutable(
    base: TraitBox,
    others: impl IntoIterator<Item = TraitBox>,
) -> Result<MutableCompositeTrait, TraitError> {
    MutableCompositeTrait::from_entries(
        others.into_iter().chain(iter::once(base)),
    )
}

/// Resolve `entry` to an immutable wrapper of payload type `T`.
///
/// Already a [`Trait<T>`]: returned as `Cow::Borrowed`, identity
/// preserved, nothing copied. A [`MutableTrait<T>`]: a new `Cow::Owned`
/// wrapper snapshotting the current payload. A composite: delegate to
/// its payload-type scan and apply the same two rules to the first
/// match. `None` when no payload of type `T` is found anywhere.
pub fn to_immutable<T>(entry: &dyn TraitEntry) -> Option<Cow<'_, Trait<T>>>
where
    T: Clone + fmt::Debug + 'static,
{
    if let Some(already) = entry.downcast_ref::<Trait<T>>() {
        return Some(Cow::Borrowed(already));
    }
    if let Some(mutable) = entry.downcast_ref::<MutableTrait<T>>() {
        return Some(Cow::Owned(Trait::new(mutable.payload().clone())));
    }
    composite_of(entry)?
        .by_payload::<T>()
        .and_then(|found| to_immutable(found.as_ref()))
}

/// Resolve `entry` to a mutable wrapper of payload type `T`.
///
/// Symmetric to [`to_immutable`]: aliased (`Cow::Borrowed`) when already
/// mutable of payload type `T`, otherwise an independent snapshot of the
/// immutable match; composites delegate to their payload-type scan.
pub fn to_mutable<T>(entry: &dyn TraitEntry) -> Option<Cow<'_, MutableTrait<T>>>
where
    T: Clone + fmt::Debug + 'static,
{
    if let Some(already) = entry.downcast_ref::<MutableTrait<T>>() {
        return Some(Cow::Borrowed(already));
    }
    if let Some(immutable) = entry.downcast_ref::<Trait<T>>() {
        return Some(Cow::Owned(MutableTrait::new(immutable.payload().clone())));
    }
    composite_of(entry)?
        .by_payload::<T>()
        .and_then(|found| to_mutable(found.as_ref()))
}

/// Extract a payload of type `T` from any entry form: either wrapper
/// directly, or the first payload-type match inside a composite.
pub fn payload_of<T>(entry: &dyn TraitEntry) -> Option<&T>
where
    T: fmt::Debug + 'static,
{
    if let Some(immutable) = entry.downcast_ref::<Trait<T>>() {
        return Some(immutable.payload());
    }
    if let Some(mutable) = entry.downcast_ref::<MutableTrait<T>>() {
        return Some(mutable.payload());
    }
    composite_of(entry)?.value::<T>()
}

/// View an entry as a composite, through either composite form.
fn composite_of(entry: &dyn TraitEntry) -> Option<&CompositeTrait> {
    if let Some(composite) = entry.downcast_ref::<CompositeTrait>() {
        return Some(composite);
    }
    entry.downcast_ref::<MutableCompositeTrait>().map(|m| &**m)
}

/// Composition and conversion methods for any sized entry.
///
/// Blanket-implemented, so wrappers and composites pick these up for
/// free:
///
/// ```
/// use trait_compose::{MutableTrait, Trait, TraitBox, TraitExt};
///
/// let composite = Trait::new(2u32)
///     .compose([Box::new(MutableTrait::new("name".to_string())) as TraitBox])?;
/// assert_eq!(composite.payload_of::<u32>(), Some(&2));
/// # Ok::<(), trait_compose::TraitError>(())
/// ```
pub trait TraitExt: TraitEntry + Sized {
    /// See [`compose`]. `self` lands last in enumeration order.
    fn compose(
        self,
        others: impl IntoIterator<Item = TraitBox>,
    ) -> Result<CompositeTrait, TraitError> {
        compose(Box::new(self), others)
    }

    /// See [`compose_mutable`].
    fn compose_mutable(
        self,
        others: impl IntoIterator<Item = TraitBox>,
    ) -> Result<MutableCompositeTrait, TraitError> {
        compose_mutable(Box::new(self), others)
    }

    /// Wrap `self` as a single-entry composite.
    fn into_composite(self) -> CompositeTrait {
        CompositeTrait::new(Box::new(self))
    }

    /// See [`to_immutable`].
    fn to_immutable<T>(&self) -> Option<Cow<'_, Trait<T>>>
    where
        T: Clone + fmt::Debug + 'static,
    {
        to_immutable(self)
    }

    /// See [`to_mutable`].
    fn to_mutable<T>(&self) -> Option<Cow<'_, MutableTrait<T>>>
    where
        T: Clone + fmt::Debug + 'static,
    {
        to_mutable(self)
    }

    /// See [`payload_of`].
    fn payload_of<T>(&self) -> Option<&T>
    where
        T: fmt::Debug + 'static,
    {
        payload_of(self)
    }
}

impl<E: TraitEntry + Sized> TraitExt for E {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Wings(u32);

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Legs(u32);

    #[test]
    fn test_compose_puts_base_last() {
        let composite = Trait::new(Wings(2))
            .compose([Box::new(MutableTrait::new(Legs(4))) as TraitBox])
            .unwrap();

        let names: Vec<_> = composite.iter().map(|e| e.wrapper_name()).collect();
        assert!(names[0].contains("Legs"));
        assert!(names[1].contains("Wings"));
    }

    #[test]
    fn test_compose_rejects_duplicate_wrapper_types() {
        let result = Trait::new(Wings(2))
            .compose([Box::new(Trait::new(Wings(0))) as TraitBox]);
        assert!(matches!(result, Err(TraitError::DuplicateKey { .. })));
    }

    #[test]
    fn test_to_immutable_is_identity_preserving_when_already_immutable() {
        let wings = Trait::new(Wings(2));
        match wings.to_immutable::<Wings>() {
            Some(Cow::Borrowed(same)) => assert!(std::ptr::eq(same, &wings)),
            other => panic!("expected a borrowed identity, got {:?}", other),
        }
    }

    #[test]
    fn test_to_immutable_snapshots_a_mutable_wrapper() {
        let mut legs = MutableTrait::new(Legs(4));

        let snapshot = legs.to_immutable::<Legs>().unwrap().into_owned();
        legs.set(Legs(3));

        // No back-link: the snapshot still sees the payload it copied.
        assert_eq!(*snapshot.payload(), Legs(4));
        assert_eq!(*legs.payload(), Legs(3));
    }

    #[test]
    fn test_to_mutable_snapshot_does_not_alias_the_original() {
        let wings = Trait::new(Wings(2));

        let mut grounded = wings.to_mutable::<Wings>().unwrap().into_owned();
        grounded.set(Wings(0));

        assert_eq!(*wings.payload(), Wings(2));
        assert_eq!(*grounded.payload(), Wings(0));
    }

    #[test]
    fn test_to_mutable_is_aliased_when_already_mutable() {
        let legs = MutableTrait::new(Legs(4));
        assert!(matches!(
            legs.to_mutable::<Legs>(),
            Some(Cow::Borrowed(_))
        ));
    }

    #[test]
    fn test_conversion_delegates_through_a_composite() {
        let composite = Trait::new(Wings(2))
            .compose([Box::new(MutableTrait::new(Legs(4))) as TraitBox])
            .unwrap();

        // Immutable match inside the composite: borrowed.
        assert!(matches!(
            composite.to_immutable::<Wings>(),
            Some(Cow::Borrowed(_))
        ));
        // Mutable match inside the composite: snapshot.
        assert!(matches!(
            composite.to_immutable::<Legs>(),
            Some(Cow::Owned(_))
        ));
        assert!(composite.to_immutable::<String>().is_none());
    }

    #[test]
    fn test_conversion_delegates_through_a_mutable_composite() {
        let mut composite = MutableCompositeTrait::new();
        composite.set(Box::new(Trait::new(Wings(2))));

        let snapshot = composite.to_mutable::<Wings>().unwrap().into_owned();
        assert_eq!(*snapshot.payload(), Wings(2));
    }

    #[test]
    fn test_payload_of_all_entry_forms() {
        let wings = Trait::new(Wings(2));
        assert_eq!(wings.payload_of::<Wings>(), Some(&Wings(2)));
        assert_eq!(wings.payload_of::<Legs>(), None);

        let legs = MutableTrait::new(Legs(4));
        assert_eq!(legs.payload_of::<Legs>(), Some(&Legs(4)));

        let composite = wings.compose([Box::new(legs) as TraitBox]).unwrap();
        assert_eq!(composite.payload_of::<Wings>(), Some(&Wings(2)));
        assert_eq!(composite.payload_of::<Legs>(), Some(&Legs(4)));
    }

    #[test]
    fn test_into_composite_single_entry() {
        let composite = MutableTrait::new(Legs(4)).into_composite();
        assert_eq!(composite.len(), 1);
        assert_eq!(composite.value::<Legs>(), Some(&Legs(4)));
    }

    #[test]
    fn test_flight_and_run_scenario() {
        // A chimera: composes flight (2 wings, immutable) with running
        // (4 legs, mutable).
        let mut chimera = Trait::new(Wings(2))
            .compose_mutable([Box::new(MutableTrait::new(Legs(4))) as TraitBox])
            .unwrap();

        assert_eq!(chimera.value::<Wings>(), Some(&Wings(2)));
        assert_eq!(chimera.value::<Legs>(), Some(&Legs(4)));

        chimera.mutable_mut::<Legs>().unwrap().set(Legs(3));
        assert_eq!(chimera.value::<Legs>(), Some(&Legs(3)));

        // Grounding the chimera: the snapshot loses its wings without
        // affecting the composite's own wing count.
        let mut grounded = chimera.to_mutable::<Wings>().unwrap().into_owned();
        grounded.set(Wings(0));
        assert_eq!(chimera.value::<Wings>(), Some(&Wings(2)));
    }
}
