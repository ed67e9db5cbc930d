//! Error types for fixture configuration, registration and runs.

use mapfix_basis::BasisError;
use thiserror::Error;

/// Invalid fixture configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// `ids` were given for a fixture without `params`.
	#[error("ids given without params")]
	IdsWithoutParams,

	/// `ids` and `params` differ in length.
	#[error("{ids} ids given for {params} params")]
	IdsLength { params: usize, ids: usize },

	/// `params` is present but empty, so the fixture would never run.
	#[error("params must not be empty")]
	EmptyParams,

	/// A resource was built with a parameter for an unparametrized fixture,
	/// or without one for a parametrized fixture.
	#[error("{}", param_mismatch(.parametrized))]
	ParamMismatch { parametrized: bool },

	/// The TOML source could not be parsed.
	#[error("invalid fixture config: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Registry lookup and registration failures.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
	#[error("fixture {name:?} is already registered")]
	DuplicateName { name: String },

	#[error("no fixture registered as {name:?}")]
	UnknownFixture { name: String },

	/// The fixture exists with other key, value or parameter types.
	#[error("fixture {name:?} is not a {expected}")]
	TypeMismatch { name: String, expected: &'static str },
}

/// First failure of a fixture run.
#[derive(Debug, Error)]
pub enum RunError {
	/// The test body returned an error.
	#[error("fixture {fixture:?} [{id}]: test body failed: {source}")]
	Body {
		fixture: String,
		id: String,
		#[source]
		source: anyhow::Error,
	},

	/// One or more teardowns failed after the body finished.
	#[error("fixture {fixture:?} [{id}]: {} teardown(s) failed", .failures.len())]
	Teardown {
		fixture: String,
		id: String,
		failures: Vec<BasisError>,
	},
}

fn param_mismatch(parametrized: &bool) -> &'static str {
	if *parametrized {
		"parametrized fixture built without a param"
	} else {
		"param given to a fixture without params"
	}
}
