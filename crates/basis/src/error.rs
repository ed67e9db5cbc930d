//! Error types for basis-object resolution.

use std::fmt;

use thiserror::Error;

/// Ways a yielding factory can break its two-phase protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleViolation {
	/// The sequence completed without yielding a value.
	NoValue,
	/// The sequence yielded, or is known to hold, a second value.
	ExtraValue,
	/// The handle was closed after it had already been closed.
	AlreadyClosed,
}

impl LifecycleViolation {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::NoValue => "sequence completed without yielding a value",
			Self::ExtraValue => "sequence yielded more than one value",
			Self::AlreadyClosed => "handle was already closed",
		}
	}
}

impl fmt::Display for LifecycleViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors raised while classifying, realizing or tearing down basis objects.
///
/// Keys are carried as their `Debug` rendering so one error type serves every
/// key type.
#[derive(Debug, Error)]
pub enum BasisError {
	/// Lookup of a key that is not part of the mapping.
	#[error("no basis object registered under key {key}")]
	KeyNotFound { key: String },

	/// A yielding factory yielded zero or several values.
	#[error("basis object {key}: {violation}")]
	Lifecycle { key: String, violation: LifecycleViolation },

	/// The user factory failed. The error is passed through as-is.
	#[error(transparent)]
	Factory(anyhow::Error),

	/// A factory's arity does not match whether the mapping is parametrized.
	#[error("basis object {key}: factory arity does not fit a {} mapping", mapping_label(.parametrized))]
	Signature { key: String, parametrized: bool },

	/// A bare function was given to an explicit-mode mapping.
	#[error("basis object {key}: bare function in explicit mode; wrap it as a callable or generator factory")]
	Unwrapped { key: String },
}

impl BasisError {
	pub(crate) fn lifecycle(key: &str, violation: LifecycleViolation) -> Self {
		Self::Lifecycle {
			key: key.to_owned(),
			violation,
		}
	}

	/// Returns the lifecycle violation, if this is a lifecycle error.
	pub fn violation(&self) -> Option<LifecycleViolation> {
		match self {
			Self::Lifecycle { violation, .. } => Some(*violation),
			_ => None,
		}
	}

	/// Returns the user factory's error, if this wraps one.
	pub fn factory_error(&self) -> Option<&anyhow::Error> {
		match self {
			Self::Factory(err) => Some(err),
			_ => None,
		}
	}

	/// Returns the key label this error refers to, if any.
	pub fn key(&self) -> Option<&str> {
		match self {
			Self::KeyNotFound { key } | Self::Lifecycle { key, .. } | Self::Signature { key, .. } | Self::Unwrapped { key } => Some(key),
			Self::Factory(_) => None,
		}
	}
}

fn mapping_label(parametrized: &bool) -> &'static str {
	if *parametrized { "parametrized" } else { "non-parametrized" }
}

/// Result type for basis operations.
pub type Result<T> = std::result::Result<T, BasisError>;
