//! The composite registry: an aggregate of capability wrappers keyed by
//! each wrapper's own concrete type.
//!
//! Exact lookups go through the key map. The fallback and payload-type
//! lookups walk the entries in insertion order and return the first
//! match, so the order wrappers were composed in is observable and part
//! of the contract.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use crate::entry::{TraitBox, TraitEntry};
use crate::error::TraitError;
use crate::immutable::Trait;
use crate::mutable::MutableTrait;

/// An immutable aggregate of capability wrappers.
///
/// "Immutable" refers to the key set: once built, no entries are added,
/// replaced, or removed (see
/// [`MutableCompositeTrait`](crate::MutableCompositeTrait) for the
/// overwriting form). Payloads inside mutable wrappers can still be
/// replaced through [`mutable_mut`](CompositeTrait::mutable_mut), since
/// the composite owns its entries.
///
/// # Example
///
/// ```
/// use trait_compose::{CompositeTrait, MutableTrait, Trait, TraitBox};
///
/// let composite = CompositeTrait::from_entries([
///     Box::new(Trait::new(2u32)) as TraitBox,
///     Box::new(MutableTrait::new("name".to_string())),
/// ])?;
///
/// assert_eq!(composite.value::<u32>(), Some(&2));
/// assert_eq!(composite.value::<String>().map(String::as_str), Some("name"));
/// assert_eq!(composite.value::<f64>(), None);
/// # Ok::<(), trait_compose::TraitError>(())
/// ```
pub struct CompositeTrait {
    /// Entries keyed by wrapper type.
    entries: HashMap<TypeId, TraitBox>,
    /// Keys in insertion order; the fallback scans walk this.
    order: Vec<TypeId>,
}

impl CompositeTrait {
    /// Build a composite holding a single wrapper, keyed by its own
    /// concrete type.
    pub fn new(entry: TraitBox) -> Self {
        let key = entry.wrapper_type();
        Self::from_pair(key, entry)
    }

    /// Build a composite holding a single explicitly keyed entry.
    pub fn from_pair(key: TypeId, entry: TraitBox) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key, entry);
        Self { entries, order: vec![key] }
    }

    /// Build a composite from a sequence of wrappers, each keyed by its
    /// own concrete type.
    ///
    /// Fails with [`TraitError::DuplicateKey`] if two wrappers share a
    /// concrete wrapper type, and with [`TraitError::InvalidArgument`]
    /// if the sequence is empty ([`MutableCompositeTrait::new`] is the
    /// empty form).
    ///
    /// [`MutableCompositeTrait::new`]: crate::MutableCompositeTrait::new
    pub fn from_entries(
        entries: impl IntoIterator<Item = TraitBox>,
    ) -> Result<Self, TraitError> {
        Self::from_pairs(entries.into_iter().map(|e| (e.wrapper_type(), e)))
    }

    /// Build a composite from explicitly keyed entries, under the same
    /// rules as [`from_entries`](CompositeTrait::from_entries).
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (TypeId, TraitBox)>,
    ) -> Result<Self, TraitError> {
        let mut built = Self { entries: HashMap::new(), order: Vec::new() };
        for (key, entry) in pairs {
            if built.entries.contains_key(&key) {
                return Err(TraitError::DuplicateKey {
                    type_name: entry.wrapper_name(),
                });
            }
            log::trace!("composite: register {}", entry.wrapper_name());
            built.order.push(key);
            built.entries.insert(key, entry);
        }
        if built.order.is_empty() {
            return Err(TraitError::InvalidArgument {
                reason: "at least one wrapper is required",
            });
        }
        Ok(built)
    }

    /// Exact keyed lookup. Never falls back to a scan.
    ///
    /// This is the one lookup that fails loudly: a missing key is
    /// [`TraitError::NotFound`]. The generic-parameter lookups below
    /// return `Option` instead.
    pub fn resolve(&self, key: TypeId) -> Result<&TraitBox, TraitError> {
        self.entries.get(&key).ok_or(TraitError::NotFound { key })
    }

    /// Look up an entry of concrete type `W`.
    ///
    /// First tries the slot keyed by `W` itself; if that slot exists and
    /// holds a `W`, it wins. Otherwise the entries are scanned in
    /// insertion order and the first `W` found is returned, so an entry
    /// registered under a foreign key (via
    /// [`from_pair`](CompositeTrait::from_pair)) is still reachable.
    pub fn get<W: TraitEntry>(&self) -> Option<&W> {
        if let Some(entry) = self.entries.get(&TypeId::of::<W>()) {
            if let Some(found) = entry.as_ref().downcast_ref::<W>() {
                return Some(found);
            }
        }
        self.iter().find_map(|e| e.as_ref().downcast_ref::<W>())
    }

    /// Mutable form of [`get`](CompositeTrait::get).
    pub fn get_mut<W: TraitEntry>(&mut self) -> Option<&mut W> {
        // Split lookup: borrowck rejects the exact-then-scan shape with
        // two live `&mut self.entries` borrows, so find the key first.
        let key = if self
            .entries
            .get(&TypeId::of::<W>())
            .is_some_and(|e| e.as_ref().is::<W>())
        {
            Some(TypeId::of::<W>())
        } else {
            self.order
                .iter()
                .copied()
                .find(|k| self.entries[k].as_ref().is::<W>())
        }?;
        self.entries.get_mut(&key)?.as_mut().downcast_mut::<W>()
    }

    /// First entry, in insertion order, that is an immutable wrapper of
    /// payload type `T`.
    pub fn immutable<T: fmt::Debug + 'static>(&self) -> Option<&Trait<T>> {
        self.iter().find_map(|e| e.as_ref().downcast_ref::<Trait<T>>())
    }

    /// First entry, in insertion order, that is a mutable wrapper of
    /// payload type `T`.
    pub fn mutable<T: fmt::Debug + 'static>(&self) -> Option<&MutableTrait<T>> {
        self.iter()
            .find_map(|e| e.as_ref().downcast_ref::<MutableTrait<T>>())
    }

    /// Like [`mutable`](CompositeTrait::mutable), but yields write access
    /// so the payload can be replaced after the wrapper was moved into
    /// the composite.
    pub fn mutable_mut<T: fmt::Debug + 'static>(
        &mut self,
    ) -> Option<&mut MutableTrait<T>> {
        let key = self
            .order
            .iter()
            .copied()
            .find(|k| self.entries[k].as_ref().is::<MutableTrait<T>>())?;
        self.entries
            .get_mut(&key)?
            .as_mut()
            .downcast_mut::<MutableTrait<T>>()
    }

    /// First entry, in insertion order, whose payload type is `T`,
    /// regardless of which wrapper form holds it or under which key it
    /// was registered.
    pub fn by_payload<T: 'static>(&self) -> Option<&TraitBox> {
        self.iter().find(|e| e.payload_type() == Some(TypeId::of::<T>()))
    }

    /// First payload of type `T`, checking the immutable form before the
    /// mutable form on each entry.
    pub fn value<T: fmt::Debug + 'static>(&self) -> Option<&T> {
        self.iter().find_map(|e| {
            let e = e.as_ref();
            if let Some(t) = e.downcast_ref::<Trait<T>>() {
                return Some(t.payload());
            }
            e.downcast_ref::<MutableTrait<T>>().map(|m| m.payload())
        })
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TraitBox> {
        self.order.iter().map(|k| &self.entries[k])
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.order.iter().copied()
    }

    /// Whether an entry is registered under `key`.
    pub fn contains_key(&self, key: TypeId) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the composite holds no entries. Only reachable through
    /// the mutable composite's empty constructor.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn insert_or_replace(&mut self, key: TypeId, entry: TraitBox) {
        log::trace!("composite: set {}", entry.wrapper_name());
        if self.entries.insert(key, entry).is_none() {
            self.order.push(key);
        }
        // Overwriting an existing key keeps its position in the
        // enumeration order.
    }

    pub(crate) fn empty() -> Self {
        Self { entries: HashMap::new(), order: Vec::new() }
    }
}

impl fmt::Display for CompositeTrait {
    /// Diagnostic rendering: each entry's textual form in parentheses,
    /// joined with `", "`, in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "({})", entry)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for CompositeTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTrait")
            .field("len", &self.len())
            .field(
                "entries",
                &self.iter().map(|e| e.wrapper_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TraitEntry for CompositeTrait {
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
        false
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
