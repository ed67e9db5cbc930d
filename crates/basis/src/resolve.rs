//! Realization of descriptors into values and teardown actions.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::{BasisKind, Descriptor};
use crate::error::{BasisError, LifecycleViolation, Result};
use crate::scheduler::Teardown;
use crate::sequence::{BoxSequence, Produced};

/// A realized basis object.
pub struct Realized<V> {
	pub value: Arc<V>,
	pub teardown: Option<Teardown>,
	pub kind: BasisKind,
}

impl<V> Realized<V> {
	fn plain(value: Arc<V>, kind: BasisKind) -> Self {
		Self {
			value,
			teardown: None,
			kind,
		}
	}
}

impl<V> fmt::Debug for Realized<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Realized")
			.field("kind", &self.kind)
			.field("teardown", &self.teardown)
			.finish_non_exhaustive()
	}
}

/// Realizes `descriptor`. `param` is `Some` exactly when the mapping is
/// parametrized; literals ignore it.
///
/// Factory failures propagate unchanged. Nothing is stepped beyond the first
/// value of a yielding factory; the rest happens in the returned teardown.
pub fn resolve<V, P>(descriptor: &Descriptor<V, P>, key: &str, param: Option<&P>) -> Result<Realized<V>>
where
	V: 'static,
{
	match descriptor {
		Descriptor::Literal(value) => Ok(Realized::plain(Arc::clone(value), BasisKind::Literal)),
		Descriptor::CallableFactory(factory) => {
			let value = factory.invoke(key, param)?;
			Ok(Realized::plain(Arc::new(value), BasisKind::Callable))
		}
		Descriptor::GeneratorFactory(factory) => open(key, factory.invoke(key, param)?),
		Descriptor::Undetermined(factory) => match factory.invoke(key, param)? {
			Produced::Value(value) => Ok(Realized::plain(Arc::new(value), BasisKind::Callable)),
			Produced::Sequence(sequence) => open(key, sequence),
		},
	}
}

fn open<V: 'static>(key: &str, sequence: BoxSequence<V>) -> Result<Realized<V>> {
	let (value, handle) = BasisHandle::open(key, sequence)?;
	Ok(Realized {
		value: Arc::new(value),
		teardown: Some(handle.into_teardown()),
		kind: BasisKind::Generator,
	})
}

/// Open yielding factory: the value has been taken, cleanup is pending.
pub struct BasisHandle<V> {
	key: String,
	sequence: Option<BoxSequence<V>>,
}

impl<V> BasisHandle<V> {
	/// Takes the single value from `sequence`.
	///
	/// Fails when the sequence is empty, or when it already reports further
	/// values; in both cases the sequence is dropped without cleanup.
	pub fn open(key: impl Into<String>, mut sequence: BoxSequence<V>) -> Result<(V, Self)> {
		let key = key.into();
		let Some(value) = sequence.resume().map_err(BasisError::Factory)? else {
			return Err(BasisError::lifecycle(&key, LifecycleViolation::NoValue));
		};
		if sequence.pending_hint() > 0 {
			return Err(BasisError::lifecycle(&key, LifecycleViolation::ExtraValue));
		}
		Ok((value, Self {
			key,
			sequence: Some(sequence),
		}))
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn is_closed(&self) -> bool {
		self.sequence.is_none()
	}

	/// Resumes the sequence once, which must complete it.
	pub fn close(&mut self) -> Result<()> {
		let Some(mut sequence) = self.sequence.take() else {
			return Err(BasisError::lifecycle(&self.key, LifecycleViolation::AlreadyClosed));
		};
		match sequence.resume().map_err(BasisError::Factory)? {
			None => Ok(()),
			Some(_) => Err(BasisError::lifecycle(&self.key, LifecycleViolation::ExtraValue)),
		}
	}

	/// Converts into a teardown action that closes the handle.
	pub fn into_teardown(mut self) -> Teardown
	where
		V: 'static,
	{
		let key = self.key.clone();
		Teardown::new(key, move || self.close())
	}
}

impl<V> fmt::Debug for BasisHandle<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BasisHandle")
			.field("key", &self.key)
			.field("closed", &self.is_closed())
			.finish()
	}
}

#[cfg(test)]
mod tests;
