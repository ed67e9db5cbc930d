use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::descriptor::{Basis, ClassifyMode, Descriptor, classify};
use crate::error::Result;

pub(crate) struct SpecEntry<V, P> {
	pub(crate) label: String,
	pub(crate) descriptor: Descriptor<V, P>,
}

/// Classified mapping of keys to descriptors.
///
/// Built once and read-only afterwards; share it through an `Arc`. Keys keep
/// their registration order. A key given twice keeps its first position and
/// its last entry.
pub struct MappingSpec<K, V, P = ()> {
	entries: IndexMap<K, SpecEntry<V, P>>,
	mode: ClassifyMode,
}

impl<K, V, P> MappingSpec<K, V, P>
where
	K: Hash + Eq + fmt::Debug,
{
	/// Builds a mapping whose factories are wrapped explicitly.
	pub fn explicit(entries: impl IntoIterator<Item = (K, Basis<V, P>)>) -> Result<Self> {
		Self::with_mode(ClassifyMode::Explicit, entries)
	}

	/// Builds a mapping whose bare functions are classified on invocation.
	pub fn simple(entries: impl IntoIterator<Item = (K, Basis<V, P>)>) -> Result<Self> {
		Self::with_mode(ClassifyMode::Simple, entries)
	}

	pub fn with_mode(mode: ClassifyMode, entries: impl IntoIterator<Item = (K, Basis<V, P>)>) -> Result<Self> {
		let entries = entries.into_iter();
		let mut map = IndexMap::with_capacity(entries.size_hint().0);
		for (key, basis) in entries {
			let label = format!("{key:?}");
			let descriptor = classify(&label, basis, mode)?;
			map.insert(key, SpecEntry { label, descriptor });
		}
		tracing::debug!(mode = ?mode, len = map.len(), "basis.spec.build");
		Ok(Self { entries: map, mode })
	}
}

impl<K, V, P> MappingSpec<K, V, P>
where
	K: Hash + Eq,
{
	pub fn mode(&self) -> ClassifyMode {
		self.mode
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Keys in registration order.
	pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
		self.entries.keys()
	}

	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.entries.contains_key(key)
	}

	pub fn descriptor<Q>(&self, key: &Q) -> Option<&Descriptor<V, P>>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.entries.get(key).map(|entry| &entry.descriptor)
	}

	pub(crate) fn entry<Q>(&self, key: &Q) -> Option<(&K, &SpecEntry<V, P>)>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.entries.get_key_value(key)
	}
}

impl<K: fmt::Debug, V, P> fmt::Debug for MappingSpec<K, V, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MappingSpec")
			.field("mode", &self.mode)
			.field("entries", &self.entries.iter().map(|(key, entry)| (key, &entry.descriptor)).collect::<Vec<_>>())
			.finish()
	}
}
