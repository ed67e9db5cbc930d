//! Single-step sequences backing yielding factories.
//!
//! A yielding factory hands back a [`BasisSequence`]: the first resumption
//! yields the value, the second one runs cleanup and completes. [`Scoped`] is
//! the usual way to write one; [`IterSequence`] adapts plain iterators.

use std::fmt;

/// A lazily stepped sequence of values.
pub trait BasisSequence<V>: Send {
	/// Advances the sequence. `Some` is a yielded value, `None` is completion.
	fn resume(&mut self) -> anyhow::Result<Option<V>>;

	/// Lower bound on the values the sequence will still yield.
	///
	/// Checked right after the first value is taken, so over-long sequences
	/// can be rejected before their value reaches a test.
	fn pending_hint(&self) -> usize {
		0
	}
}

/// Boxed sequence as stored in descriptors and handles.
pub type BoxSequence<V> = Box<dyn BasisSequence<V>>;

/// A value paired with the cleanup that releases it.
///
/// Yields the value on the first resumption and runs `cleanup` on the second.
pub struct Scoped<V, F> {
	value: Option<V>,
	cleanup: Option<F>,
}

impl<V, F> Scoped<V, F>
where
	F: FnOnce() -> anyhow::Result<()>,
{
	pub fn new(value: V, cleanup: F) -> Self {
		Self {
			value: Some(value),
			cleanup: Some(cleanup),
		}
	}
}

impl<V, F> BasisSequence<V> for Scoped<V, F>
where
	V: Send,
	F: FnOnce() -> anyhow::Result<()> + Send,
{
	fn resume(&mut self) -> anyhow::Result<Option<V>> {
		if let Some(value) = self.value.take() {
			return Ok(Some(value));
		}
		if let Some(cleanup) = self.cleanup.take() {
			cleanup()?;
		}
		Ok(None)
	}

	fn pending_hint(&self) -> usize {
		usize::from(self.value.is_some())
	}
}

impl<V, F> fmt::Debug for Scoped<V, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scoped")
			.field("yielded", &self.value.is_none())
			.field("cleaned_up", &self.cleanup.is_none())
			.finish()
	}
}

/// Adapts an iterator. Its pending hint is the iterator's lower size bound.
#[derive(Debug, Clone)]
pub struct IterSequence<I>(I);

impl<I: Iterator> IterSequence<I> {
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter())
	}
}

impl<I> BasisSequence<I::Item> for IterSequence<I>
where
	I: Iterator + Send,
{
	fn resume(&mut self) -> anyhow::Result<Option<I::Item>> {
		Ok(self.0.next())
	}

	fn pending_hint(&self) -> usize {
		self.0.size_hint().0
	}
}

/// Output of a bare function whose kind is detected on invocation.
pub enum Produced<V> {
	/// The function returned the value directly.
	Value(V),
	/// The function returned a sequence; it is a yielding factory.
	Sequence(BoxSequence<V>),
}

impl<V> Produced<V> {
	pub fn sequence<S>(sequence: S) -> Self
	where
		S: BasisSequence<V> + 'static,
	{
		Self::Sequence(Box::new(sequence))
	}

	pub fn scoped<F>(value: V, cleanup: F) -> Self
	where
		V: Send + 'static,
		F: FnOnce() -> anyhow::Result<()> + Send + 'static,
	{
		Self::sequence(Scoped::new(value, cleanup))
	}

	pub fn iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = V>,
		I::IntoIter: Send + 'static,
	{
		Self::sequence(IterSequence::new(iter))
	}

	pub const fn is_sequence(&self) -> bool {
		matches!(self, Self::Sequence(_))
	}
}

impl<V> From<V> for Produced<V> {
	fn from(value: V) -> Self {
		Self::Value(value)
	}
}

impl<V> fmt::Debug for Produced<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(_) => f.write_str("Produced::Value(..)"),
			Self::Sequence(_) => f.write_str("Produced::Sequence(..)"),
		}
	}
}
