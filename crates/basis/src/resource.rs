use std::borrow::Borrow;
use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::descriptor::BasisKind;
use crate::error::{BasisError, Result};
use crate::resolve::resolve;
use crate::scheduler::ScopeScheduler;
use crate::spec::MappingSpec;

#[derive(Debug)]
struct RealizedEntry<V> {
	value: Arc<V>,
	kind: BasisKind,
}

/// Per-invocation key lookup over a [`MappingSpec`].
///
/// Each key is realized at most once; later lookups return the same `Arc`.
/// Teardowns go to the scheduler in realization order. Owned by a single
/// invocation and not meant to be shared between threads.
pub struct MappingResource<K, V, P = ()> {
	spec: Arc<MappingSpec<K, V, P>>,
	param: Option<P>,
	scheduler: Arc<dyn ScopeScheduler>,
	realized: RefCell<IndexMap<K, RealizedEntry<V>>>,
}

impl<K, V, P> MappingResource<K, V, P>
where
	K: Hash + Eq + Clone,
	V: 'static,
{
	/// Creates a resource. `param` is the current parameter value of a
	/// parametrized mapping and `None` otherwise.
	pub fn new(spec: Arc<MappingSpec<K, V, P>>, param: Option<P>, scheduler: Arc<dyn ScopeScheduler>) -> Self {
		Self {
			spec,
			param,
			scheduler,
			realized: RefCell::new(IndexMap::new()),
		}
	}

	/// Returns the value for `key`, realizing it on first use.
	///
	/// A failed realization caches nothing and registers no teardown.
	pub fn lookup<Q>(&self, key: &Q) -> Result<Arc<V>>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + fmt::Debug + ?Sized,
	{
		if let Some(entry) = self.realized.borrow().get(key) {
			return Ok(Arc::clone(&entry.value));
		}

		let Some((stored_key, entry)) = self.spec.entry(key) else {
			return Err(BasisError::KeyNotFound { key: format!("{key:?}") });
		};

		let realized = match resolve(&entry.descriptor, &entry.label, self.param.as_ref()) {
			Ok(realized) => realized,
			Err(err) => {
				tracing::debug!(key = %entry.label, error = %err, "basis.realize.failed");
				return Err(err);
			}
		};
		tracing::trace!(
			key = %entry.label,
			kind = realized.kind.as_str(),
			teardown = realized.teardown.is_some(),
			"basis.realize"
		);

		if let Some(teardown) = realized.teardown {
			self.scheduler.register_teardown(teardown);
		}
		let value = Arc::clone(&realized.value);
		self.realized.borrow_mut().insert(
			stored_key.clone(),
			RealizedEntry {
				value: realized.value,
				kind: realized.kind,
			},
		);
		Ok(value)
	}

	/// Alias for [`MappingResource::lookup`].
	pub fn get<Q>(&self, key: &Q) -> Result<Arc<V>>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + fmt::Debug + ?Sized,
	{
		self.lookup(key)
	}

	/// Kind `key` was realized as in this invocation, if it has been.
	pub fn realized_kind<Q>(&self, key: &Q) -> Option<BasisKind>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.realized.borrow().get(key).map(|entry| entry.kind)
	}

	/// Keys realized so far, in realization order.
	pub fn realized_keys(&self) -> Vec<K> {
		self.realized.borrow().keys().cloned().collect()
	}

	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.spec.contains_key(key)
	}

	pub fn param(&self) -> Option<&P> {
		self.param.as_ref()
	}

	pub fn spec(&self) -> &Arc<MappingSpec<K, V, P>> {
		&self.spec
	}
}

impl<K: fmt::Debug, V, P: fmt::Debug> fmt::Debug for MappingResource<K, V, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MappingResource")
			.field("param", &self.param)
			.field("realized", &self.realized.borrow().keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}
