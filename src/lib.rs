//! # trait-compose
//!
//! Runtime trait composition: build an object's behavior out of
//! independently defined capability wrappers, each carrying a typed
//! payload, without static inheritance.
//!
//! A capability is a payload boxed in one of two wrapper forms:
//! [`Trait<T>`] (payload fixed at construction) or [`MutableTrait<T>`]
//! (payload replaceable wholesale). Wrappers aggregate into a
//! [`CompositeTrait`] keyed by each wrapper's own concrete type; the
//! overwriting form is [`MutableCompositeTrait`]. Lookups resolve a
//! capability either by exact wrapper type or by a payload-type fallback
//! scan in insertion order, first match wins.
//!
//! # Example
//!
//! ```
//! use trait_compose::{MutableTrait, Trait, TraitBox, TraitExt};
//!
//! // A chimera that flies on 2 wings and runs on 4 (replaceable) legs.
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Wings(u32);
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Legs(u32);
//!
//! let mut chimera = Trait::new(Wings(2))
//!     .compose_mutable([Box::new(MutableTrait::new(Legs(4))) as TraitBox])?;
//!
//! assert_eq!(chimera.value::<Wings>(), Some(&Wings(2)));
//!
//! // Payload replacement goes through the composite, which owns the
//! // wrapper after composition.
//! chimera.mutable_mut::<Legs>().unwrap().set(Legs(3));
//! assert_eq!(chimera.value::<Legs>(), Some(&Legs(3)));
//! # Ok::<(), trait_compose::TraitError>(())
//! ```
//!
//! # Conversion is a snapshot, not a view
//!
//! [`to_immutable`](crate::convert::to_immutable) and
//! [`to_mutable`](crate::convert::to_mutable) return the input unchanged
//! when it is already the requested form, and otherwise clone the
//! payload into a new, independent wrapper. Mutations never travel
//! across a conversion.
//!
//! Single-threaded use is assumed throughout; the composite types take
//! no locks and add no `Send`/`Sync` bounds.

pub mod composite;
pub mod convert;
pub mod entry;
pub mod error;
pub mod immutable;
pub mod mutable;
pub mod mutable_composite;

pub use composite::CompositeTrait;
pub use convert::{compose, compose_mutable, payload_of, to_immutable, to_mutable, TraitExt};
pub use entry::{TraitBox, TraitEntry};
pub use error::TraitError;
pub use immutable::Trait;
pub use mutable::MutableTrait;
pub use mutable_composite::MutableCompositeTrait;
