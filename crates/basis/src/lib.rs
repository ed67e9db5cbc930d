//! Basis-object resolution and lifecycle for keyed mapping fixtures.
//!
//! A mapping fixture hands a test one lookup object through which it requests
//! resources by key. Each key maps to a *basis object*: a plain value, a
//! factory returning the value, or a yielding factory that returns the value
//! and later runs cleanup.
//!
//! # Flow
//!
//! `entries -> classify -> MappingSpec -> MappingResource::lookup -> resolve -> ScopeScheduler`
//!
//! 1. [`MappingSpec`] classifies raw [`Basis`] entries into [`Descriptor`]s once.
//! 2. Every invocation gets a fresh [`MappingResource`] with its own cache.
//! 3. The first lookup of a key calls [`resolve`]; yielding factories produce a
//!    [`Teardown`] that is handed to the invocation's [`ScopeScheduler`].
//!
//! # Classification modes
//!
//! - [`ClassifyMode::Explicit`]: factories are wrapped as
//!   [`Basis::Callable`] or [`Basis::Generator`]. Nothing is called up front.
//! - [`ClassifyMode::Simple`]: bare [`Basis::Function`]s are called on first
//!   lookup; a [`Produced::Value`] makes them a callable factory, a
//!   [`Produced::Sequence`] a yielding one.
//!
//! # Invariants
//!
//! - A yielding factory's sequence is resumed exactly twice: once for the
//!   value, once at teardown. Any other shape is a [`BasisError::Lifecycle`].
//! - A key is realized at most once per resource.
//! - Basis objects do not depend on each other; teardowns still run last
//!   realized first.

mod descriptor;
mod error;
mod factory;
mod resolve;
mod resource;
mod scheduler;
mod sequence;
mod spec;

pub use descriptor::{Basis, BasisKind, ClassifyMode, Descriptor, classify};
pub use error::{BasisError, LifecycleViolation, Result};
pub use factory::{Factory, NullaryFn, UnaryFn};
pub use resolve::{BasisHandle, Realized, resolve};
pub use resource::MappingResource;
pub use scheduler::{ScopeScheduler, Teardown};
pub use sequence::{BasisSequence, BoxSequence, IterSequence, Produced, Scoped};
pub use spec::MappingSpec;

#[cfg(test)]
mod test_support;
