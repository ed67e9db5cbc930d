//! Explicit registry of named mapping fixtures.
//!
//! Fixtures have different key, value and parameter types, so entries are
//! stored type-erased and recovered with [`FixtureRegistry::get`]. The
//! registry is an ordinary value: create one per process (or per test
//! module) and pass it to whatever needs to resolve fixtures by name.

use std::any::{Any, type_name};
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::config::Scope;
use crate::error::RegistryError;
use crate::fixture::MappingFixture;

/// Snapshot of one registered fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRecord {
	pub name: String,
	pub scope: Scope,
	pub autouse: bool,
	/// Parameter ids; empty when unparametrized.
	pub ids: Vec<String>,
	/// Number of keys in the mapping.
	pub keys: usize,
}

struct Registered {
	record: FixtureRecord,
	fixture: Arc<dyn Any + Send + Sync>,
}

/// Named fixtures in registration order.
#[derive(Default)]
pub struct FixtureRegistry {
	entries: RwLock<IndexMap<String, Registered>>,
}

impl FixtureRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `fixture` under its name and returns a shared handle to it.
	pub fn register<K, V, P>(&self, fixture: MappingFixture<K, V, P>) -> Result<Arc<MappingFixture<K, V, P>>, RegistryError>
	where
		K: Hash + Eq + Clone + Send + Sync + 'static,
		V: Send + Sync + 'static,
		P: Send + Sync + 'static,
	{
		let mut entries = self.entries.write();
		if entries.contains_key(fixture.name()) {
			return Err(RegistryError::DuplicateName {
				name: fixture.name().to_owned(),
			});
		}

		let record = FixtureRecord {
			name: fixture.name().to_owned(),
			scope: fixture.scope(),
			autouse: fixture.autouse(),
			ids: fixture.ids().to_vec(),
			keys: fixture.spec().len(),
		};
		tracing::debug!(fixture = %record.name, scope = record.scope.as_str(), autouse = record.autouse, "fixture.register");

		let fixture = Arc::new(fixture);
		let erased: Arc<dyn Any + Send + Sync> = fixture.clone();
		entries.insert(record.name.clone(), Registered { record, fixture: erased });
		Ok(fixture)
	}

	/// Returns the fixture registered as `name` with the given types.
	pub fn get<K, V, P>(&self, name: &str) -> Result<Arc<MappingFixture<K, V, P>>, RegistryError>
	where
		K: Send + Sync + 'static,
		V: Send + Sync + 'static,
		P: Send + Sync + 'static,
	{
		let fixture = {
			let entries = self.entries.read();
			let Some(entry) = entries.get(name) else {
				return Err(RegistryError::UnknownFixture { name: name.to_owned() });
			};
			Arc::clone(&entry.fixture)
		};
		fixture.downcast::<MappingFixture<K, V, P>>().map_err(|_| RegistryError::TypeMismatch {
			name: name.to_owned(),
			expected: type_name::<MappingFixture<K, V, P>>(),
		})
	}

	/// Removes a fixture. Returns false when nothing was registered as `name`.
	pub fn remove(&self, name: &str) -> bool {
		self.entries.write().shift_remove(name).is_some()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.read().contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Names of autouse fixtures, in registration order.
	pub fn autouse(&self) -> Vec<String> {
		self.entries
			.read()
			.values()
			.filter(|entry| entry.record.autouse)
			.map(|entry| entry.record.name.clone())
			.collect()
	}

	/// Returns snapshots sorted by name.
	pub fn snapshots(&self) -> Vec<FixtureRecord> {
		let mut records: Vec<_> = self.entries.read().values().map(|entry| entry.record.clone()).collect();
		records.sort_by(|a, b| a.name.cmp(&b.name));
		records
	}
}

impl std::fmt::Debug for FixtureRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FixtureRegistry")
			.field("fixtures", &self.entries.read().keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests;
