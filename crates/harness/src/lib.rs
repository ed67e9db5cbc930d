//! Registration and invocation of keyed mapping fixtures.
//!
//! This crate sits between a test harness and [`mapfix_basis`]. It owns the
//! parts the core leaves to its host:
//!
//! - [`FixtureConfig`]: scope, autouse, params and ids, built in code or read
//!   from TOML.
//! - [`MappingFixture`]: a named mapping with its options; builds one
//!   [`MappingResource`] per invocation and runs test bodies once per
//!   parameter.
//! - [`TeardownStack`]: the per-invocation teardown scope.
//! - [`FixtureRegistry`]: named fixtures, passed explicitly instead of living
//!   in a global.
//!
//! ```
//! use mapfix_harness::{Basis, FixtureConfig, MappingFixture, MappingSpec};
//!
//! let spec = MappingSpec::explicit([
//! 	("a", Basis::value(1)),
//! 	("b", Basis::callable_with(|p: &i32| Ok(p * 2))),
//! ])?;
//! let fixture = MappingFixture::new("numbers", spec, FixtureConfig::new().params([10, 20]))?;
//!
//! fixture.run_checked(|instance, mapping| {
//! 	let expected = instance.param.unwrap() * 2;
//! 	assert_eq!(*mapping.lookup("b")?, expected);
//! 	Ok(())
//! })?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod config;
mod error;
mod fixture;
mod ids;
mod registry;
mod stack;

pub use config::{FixtureConfig, Scope};
pub use error::{ConfigError, RegistryError, RunError};
pub use fixture::{FixtureInstance, InvocationOutcome, MappingFixture};
pub use ids::{derive_id, param_ids};
pub use mapfix_basis::{
	Basis, BasisError, BasisKind, BasisSequence, ClassifyMode, IterSequence, LifecycleViolation, MappingResource, MappingSpec,
	Produced, ScopeScheduler, Scoped, Teardown,
};
pub use registry::{FixtureRecord, FixtureRegistry};
pub use stack::TeardownStack;
