//! Error types for trait composition.

use std::any::TypeId;

use thiserror::Error;

/// Errors raised by composite construction and exact keyed lookup.
///
/// Generic-parameter lookups (`get::<W>`, `immutable::<T>`, `value::<T>`,
/// the conversion functions) never produce these: they return `Option`
/// and leave "no match" to the caller. Only the operations below fail.
#[derive(Debug, Error)]
pub enum TraitError {
    /// A required argument was missing, e.g. an empty wrapper sequence
    /// passed to an immutable-composite constructor.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// Two entries in one composition share the same concrete wrapper
    /// type. Wrapper types key the registry, so they must be unique.
    #[error("duplicate wrapper type: {type_name}")]
    DuplicateKey { type_name: &'static str },

    /// Exact keyed lookup found no entry under the requested type.
    #[error("no wrapper registered under key {key:?}")]
    NotFound { key: TypeId },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
