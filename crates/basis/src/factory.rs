use std::fmt;
use std::sync::Arc;

use crate::error::{BasisError, Result};

/// Zero-argument factory body.
pub type NullaryFn<T> = dyn Fn() -> anyhow::Result<T> + Send + Sync;

/// One-argument factory body, receiving the current parameter value.
pub type UnaryFn<T, P> = dyn Fn(&P) -> anyhow::Result<T> + Send + Sync;

/// A user function producing `T`, called with no arguments or with the
/// current parameter value.
///
/// Which shape is valid depends on the mapping: parametrized mappings call
/// [`Factory::Unary`], the others call [`Factory::Nullary`].
pub enum Factory<T, P> {
	Nullary(Arc<NullaryFn<T>>),
	Unary(Arc<UnaryFn<T, P>>),
}

impl<T, P> Factory<T, P> {
	/// Wraps a zero-argument function.
	pub fn nullary<F>(f: F) -> Self
	where
		F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
	{
		Self::Nullary(Arc::new(f))
	}

	/// Wraps a function of the parameter value.
	pub fn unary<F>(f: F) -> Self
	where
		F: Fn(&P) -> anyhow::Result<T> + Send + Sync + 'static,
	{
		Self::Unary(Arc::new(f))
	}

	/// Returns true when the factory expects the parameter value.
	pub const fn takes_param(&self) -> bool {
		matches!(self, Self::Unary(_))
	}

	/// Calls the factory. `param` is `Some` exactly when the mapping is
	/// parametrized.
	pub(crate) fn invoke(&self, key: &str, param: Option<&P>) -> Result<T> {
		match (self, param) {
			(Self::Nullary(f), None) => f().map_err(BasisError::Factory),
			(Self::Unary(f), Some(param)) => f(param).map_err(BasisError::Factory),
			(Self::Nullary(_), Some(_)) => Err(BasisError::Signature {
				key: key.to_owned(),
				parametrized: true,
			}),
			(Self::Unary(_), None) => Err(BasisError::Signature {
				key: key.to_owned(),
				parametrized: false,
			}),
		}
	}
}

impl<T, P> Clone for Factory<T, P> {
	fn clone(&self) -> Self {
		match self {
			Self::Nullary(f) => Self::Nullary(Arc::clone(f)),
			Self::Unary(f) => Self::Unary(Arc::clone(f)),
		}
	}
}

impl<T, P> fmt::Debug for Factory<T, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Nullary(_) => f.write_str("Factory::Nullary(..)"),
			Self::Unary(_) => f.write_str("Factory::Unary(..)"),
		}
	}
}
