//! Registration options for a mapping fixture.
//!
//! These mirror the options a host test framework accepts for its own
//! fixtures. The harness validates them and passes scope and autouse through
//! untouched; only `params` and `ids` change what the harness itself does.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Lifetime of the resource produced by a fixture, as understood by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	#[default]
	Function,
	Class,
	Module,
	Package,
	Session,
}

impl Scope {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Function => "function",
			Self::Class => "class",
			Self::Module => "module",
			Self::Package => "package",
			Self::Session => "session",
		}
	}
}

/// Options for one mapping fixture.
///
/// ```toml
/// scope = "module"
/// autouse = false
/// params = [10, 20]
/// ids = ["ten", "twenty"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureConfig<P> {
	pub scope: Scope,
	pub autouse: bool,
	/// Parameter values; the fixture runs once per value when set.
	pub params: Option<Vec<P>>,
	/// Display ids matching `params` one to one.
	pub ids: Option<Vec<String>>,
}

impl<P> Default for FixtureConfig<P> {
	fn default() -> Self {
		Self {
			scope: Scope::default(),
			autouse: false,
			params: None,
			ids: None,
		}
	}
}

impl<P> FixtureConfig<P> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn scope(mut self, scope: Scope) -> Self {
		self.scope = scope;
		self
	}

	pub fn autouse(mut self, autouse: bool) -> Self {
		self.autouse = autouse;
		self
	}

	pub fn params(mut self, params: impl IntoIterator<Item = P>) -> Self {
		self.params = Some(params.into_iter().collect());
		self
	}

	pub fn ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
		self.ids = Some(ids.into_iter().map(Into::into).collect());
		self
	}

	pub fn is_parametrized(&self) -> bool {
		self.params.is_some()
	}

	/// Checks that `ids` only appear alongside non-empty `params` of the same
	/// length.
	///
	/// An empty `params` list is rejected with [`ConfigError::EmptyParams`];
	/// it is not reported as a skipped fixture.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match (&self.params, &self.ids) {
			(None, Some(_)) => Err(ConfigError::IdsWithoutParams),
			(Some(params), _) if params.is_empty() => Err(ConfigError::EmptyParams),
			(Some(params), Some(ids)) if params.len() != ids.len() => Err(ConfigError::IdsLength {
				params: params.len(),
				ids: ids.len(),
			}),
			_ => Ok(()),
		}
	}
}

impl<P: DeserializeOwned> FixtureConfig<P> {
	/// Parses and validates a TOML table.
	pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests;
