//! The type-erasure seam shared by all wrapper and composite forms.
//!
//! A composite stores its members as `Box<dyn TraitEntry>`. The trait
//! carries just enough runtime identity for the registry to work: the
//! entry's own concrete type (the registry key), the payload type (used
//! by the payload-directed scans), and `dyn Any` hooks for downcasting
//! back to the concrete form.

use std::any::{Any, TypeId};
use std::fmt;

/// A boxed, type-erased entry as stored inside a composite.
pub type TraitBox = Box<dyn TraitEntry>;

/// Runtime identity of a capability wrapper or composite.
///
/// Implemented by [`Trait<T>`](crate::Trait),
/// [`MutableTrait<T>`](crate::MutableTrait),
/// [`CompositeTrait`](crate::CompositeTrait) and
/// [`MutableCompositeTrait`](crate::MutableCompositeTrait). The registry
/// keys entries by [`wrapper_type`](TraitEntry::wrapper_type), which is
/// the entry's own concrete type and distinct from the payload's type.
pub trait TraitEntry: fmt::Display + 'static {
    /// The entry's own concrete type. This is the registry key.
    fn wrapper_type(&self) -> TypeId;

    /// Human-readable name of the concrete type, for diagnostics.
    fn wrapper_name(&self) -> &'static str;

    /// The payload's type, or `None` for composites (which carry entries,
    /// not a payload of their own).
    fn payload_type(&self) -> Option<TypeId>;

    /// Whether the payload can be replaced in place.
    fn is_mutable(&self) -> bool;

    /// Downcast hook used by the fallback scans.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast hook.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn TraitEntry {
    /// Check whether this entry's concrete type is `W`.
    pub fn is<W: TraitEntry>(&self) -> bool {
        self.wrapper_type() == TypeId::of::<W>()
    }

    /// Try to view this entry as concrete type `W`.
    pub fn downcast_ref<W: TraitEntry>(&self) -> Option<&W> {
        self.as_any().downcast_ref::<W>()
    }

    /// Try to view this entry mutably as concrete type `W`.
    pub fn downcast_mut<W: TraitEntry>(&mut self) -> Option<&mut W> {
        self.as_any_mut().downcast_mut::<W>()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
