//! Raw mapping entries and their classification into descriptors.

use std::fmt;
use std::sync::Arc;

use crate::error::{BasisError, Result};
use crate::factory::Factory;
use crate::sequence::{BasisSequence, BoxSequence, Produced};

/// A basis object as written in a mapping.
pub enum Basis<V, P = ()> {
	/// A plain value, handed to tests as-is.
	Value(V),
	/// Factory returning the value.
	Callable(Factory<V, P>),
	/// Factory returning a sequence that yields the value and then cleans up.
	Generator(Factory<BoxSequence<V>, P>),
	/// Factory whose kind is only known once it has been called.
	Function(Factory<Produced<V>, P>),
}

impl<V, P> Basis<V, P> {
	pub fn value(value: V) -> Self {
		Self::Value(value)
	}

	pub fn callable<F>(f: F) -> Self
	where
		F: Fn() -> anyhow::Result<V> + Send + Sync + 'static,
	{
		Self::Callable(Factory::nullary(f))
	}

	pub fn callable_with<F>(f: F) -> Self
	where
		F: Fn(&P) -> anyhow::Result<V> + Send + Sync + 'static,
	{
		Self::Callable(Factory::unary(f))
	}

	pub fn generator<F, S>(f: F) -> Self
	where
		F: Fn() -> anyhow::Result<S> + Send + Sync + 'static,
		S: BasisSequence<V> + 'static,
	{
		Self::Generator(Factory::nullary(move || Ok(Box::new(f()?) as BoxSequence<V>)))
	}

	pub fn generator_with<F, S>(f: F) -> Self
	where
		F: Fn(&P) -> anyhow::Result<S> + Send + Sync + 'static,
		S: BasisSequence<V> + 'static,
	{
		Self::Generator(Factory::unary(move |param: &P| Ok(Box::new(f(param)?) as BoxSequence<V>)))
	}

	pub fn function<F>(f: F) -> Self
	where
		F: Fn() -> anyhow::Result<Produced<V>> + Send + Sync + 'static,
	{
		Self::Function(Factory::nullary(f))
	}

	pub fn function_with<F>(f: F) -> Self
	where
		F: Fn(&P) -> anyhow::Result<Produced<V>> + Send + Sync + 'static,
	{
		Self::Function(Factory::unary(f))
	}
}

impl<V, P> From<V> for Basis<V, P> {
	fn from(value: V) -> Self {
		Self::Value(value)
	}
}

impl<V, P> fmt::Debug for Basis<V, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(_) => f.write_str("Basis::Value(..)"),
			Self::Callable(factory) => f.debug_tuple("Basis::Callable").field(factory).finish(),
			Self::Generator(factory) => f.debug_tuple("Basis::Generator").field(factory).finish(),
			Self::Function(factory) => f.debug_tuple("Basis::Function").field(factory).finish(),
		}
	}
}

/// How factories in a mapping are recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClassifyMode {
	/// Factories must be wrapped as callable or generator factories.
	#[default]
	Explicit,
	/// Bare functions are called and their output decides their kind.
	///
	/// A function meant to return a [`Produced::Sequence`] as its value cannot be told
	/// apart from a yielding factory. Use [`ClassifyMode::Explicit`] when that
	/// matters.
	Simple,
}

/// The kind a basis object was realized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasisKind {
	Literal,
	Callable,
	Generator,
}

impl BasisKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Literal => "literal",
			Self::Callable => "callable",
			Self::Generator => "generator",
		}
	}
}

/// How to obtain one basis object.
pub enum Descriptor<V, P = ()> {
	Literal(Arc<V>),
	CallableFactory(Factory<V, P>),
	GeneratorFactory(Factory<BoxSequence<V>, P>),
	/// A bare function in simple mode, classified when it is first called.
	Undetermined(Factory<Produced<V>, P>),
}

impl<V, P> Descriptor<V, P> {
	/// Returns the kind, or `None` while it depends on the function's output.
	pub const fn kind(&self) -> Option<BasisKind> {
		match self {
			Self::Literal(_) => Some(BasisKind::Literal),
			Self::CallableFactory(_) => Some(BasisKind::Callable),
			Self::GeneratorFactory(_) => Some(BasisKind::Generator),
			Self::Undetermined(_) => None,
		}
	}
}

impl<V, P> fmt::Debug for Descriptor<V, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(_) => f.write_str("Literal(..)"),
			Self::CallableFactory(_) => f.write_str("CallableFactory(..)"),
			Self::GeneratorFactory(_) => f.write_str("GeneratorFactory(..)"),
			Self::Undetermined(_) => f.write_str("Undetermined(..)"),
		}
	}
}

/// Turns a raw entry into a descriptor without calling anything.
///
/// Explicit wrappers are honoured in both modes. A bare function is rejected
/// in explicit mode, since it cannot be handed out as a value.
pub fn classify<V, P>(key: &str, entry: Basis<V, P>, mode: ClassifyMode) -> Result<Descriptor<V, P>> {
	let descriptor = match (entry, mode) {
		(Basis::Value(value), _) => Descriptor::Literal(Arc::new(value)),
		(Basis::Callable(factory), _) => Descriptor::CallableFactory(factory),
		(Basis::Generator(factory), _) => Descriptor::GeneratorFactory(factory),
		(Basis::Function(factory), ClassifyMode::Simple) => Descriptor::Undetermined(factory),
		(Basis::Function(_), ClassifyMode::Explicit) => return Err(BasisError::Unwrapped { key: key.to_owned() }),
	};
	tracing::trace!(key, kind = descriptor.kind().map_or("undetermined", BasisKind::as_str), "basis.classify");
	Ok(descriptor)
}
