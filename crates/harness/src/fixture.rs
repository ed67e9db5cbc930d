use std::fmt;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use mapfix_basis::{BasisError, MappingResource, MappingSpec, ScopeScheduler};

use crate::config::{FixtureConfig, Scope};
use crate::error::{ConfigError, RunError};
use crate::ids::param_ids;
use crate::stack::TeardownStack;

/// One run of a fixture: a parameter value and its display id, or the
/// single run of an unparametrized fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureInstance<P> {
	pub index: usize,
	pub id: Option<String>,
	pub param: Option<P>,
}

impl<P> FixtureInstance<P> {
	/// Id for reports; unparametrized instances show as `-`.
	pub fn label(&self) -> &str {
		self.id.as_deref().unwrap_or("-")
	}
}

/// Result of running a test body against one fixture instance.
#[derive(Debug)]
pub struct InvocationOutcome {
	pub index: usize,
	pub id: Option<String>,
	pub body: anyhow::Result<()>,
	/// Teardowns that failed after the body finished.
	pub teardown: Vec<BasisError>,
}

impl InvocationOutcome {
	pub fn is_success(&self) -> bool {
		self.body.is_ok() && self.teardown.is_empty()
	}
}

/// A named mapping fixture: a classified mapping plus its registration
/// options. Builds one [`MappingResource`] per invocation.
pub struct MappingFixture<K, V, P = ()> {
	name: String,
	spec: Arc<MappingSpec<K, V, P>>,
	config: FixtureConfig<P>,
	ids: Vec<String>,
}

impl<K, V, P> MappingFixture<K, V, P>
where
	K: Hash + Eq + Clone,
	V: 'static,
{
	/// Validates `config` and derives display ids for its parameters.
	pub fn new(name: impl Into<String>, spec: MappingSpec<K, V, P>, config: FixtureConfig<P>) -> Result<Self, ConfigError>
	where
		P: fmt::Debug,
	{
		config.validate()?;
		let ids = match &config.params {
			Some(params) => param_ids(params, config.ids.as_deref()),
			None => Vec::new(),
		};
		let name = name.into();
		tracing::debug!(fixture = %name, scope = config.scope.as_str(), autouse = config.autouse, instances = ids.len().max(1), "fixture.new");
		Ok(Self {
			name,
			spec: Arc::new(spec),
			config,
			ids,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn scope(&self) -> Scope {
		self.config.scope
	}

	pub fn autouse(&self) -> bool {
		self.config.autouse
	}

	pub fn config(&self) -> &FixtureConfig<P> {
		&self.config
	}

	pub fn spec(&self) -> &Arc<MappingSpec<K, V, P>> {
		&self.spec
	}

	/// Display ids, one per parameter; empty when unparametrized.
	pub fn ids(&self) -> &[String] {
		&self.ids
	}

	/// Builds a fresh resource for one invocation.
	///
	/// `param` must be the current parameter value of a parametrized fixture
	/// and `None` otherwise; teardowns go to `scheduler`.
	pub fn build(&self, param: Option<P>, scheduler: Arc<dyn ScopeScheduler>) -> Result<MappingResource<K, V, P>, ConfigError> {
		let parametrized = self.config.is_parametrized();
		if parametrized != param.is_some() {
			return Err(ConfigError::ParamMismatch { parametrized });
		}
		Ok(MappingResource::new(Arc::clone(&self.spec), param, scheduler))
	}

	/// Instances to run: one per parameter, or a single one.
	pub fn instances(&self) -> Vec<FixtureInstance<P>>
	where
		P: Clone,
	{
		match &self.config.params {
			Some(params) => params
				.iter()
				.zip(&self.ids)
				.enumerate()
				.map(|(index, (param, id))| FixtureInstance {
					index,
					id: Some(id.clone()),
					param: Some(param.clone()),
				})
				.collect(),
			None => vec![FixtureInstance {
				index: 0,
				id: None,
				param: None,
			}],
		}
	}

	/// Runs `body` once per instance, each with its own resource and
	/// teardown scope.
	///
	/// Teardowns run after the body returns. If the body panics they still
	/// run, and the panic is resumed afterwards.
	pub fn run<F>(&self, mut body: F) -> Vec<InvocationOutcome>
	where
		P: Clone,
		F: FnMut(&FixtureInstance<P>, &MappingResource<K, V, P>) -> anyhow::Result<()>,
	{
		let mut outcomes = Vec::new();
		for instance in self.instances() {
			let _span = tracing::debug_span!("fixture.invocation", fixture = %self.name, id = instance.label()).entered();

			let stack = Arc::new(TeardownStack::new());
			let scheduler: Arc<dyn ScopeScheduler> = stack.clone();
			let resource = MappingResource::new(Arc::clone(&self.spec), instance.param.clone(), scheduler);

			let result = panic::catch_unwind(AssertUnwindSafe(|| body(&instance, &resource)));
			drop(resource);
			let teardown = stack.unwind();

			let body_result = match result {
				Ok(body_result) => body_result,
				Err(payload) => {
					tracing::debug!(teardown_failures = teardown.len(), "fixture.invocation.panicked");
					panic::resume_unwind(payload);
				}
			};
			if let Err(error) = &body_result {
				tracing::debug!(error = %error, "fixture.invocation.failed");
			}
			outcomes.push(InvocationOutcome {
				index: instance.index,
				id: instance.id,
				body: body_result,
				teardown,
			});
		}
		outcomes
	}

	/// Like [`MappingFixture::run`], but returns the first failure.
	///
	/// Every instance runs even when an earlier one failed.
	pub fn run_checked<F>(&self, body: F) -> Result<(), RunError>
	where
		P: Clone,
		F: FnMut(&FixtureInstance<P>, &MappingResource<K, V, P>) -> anyhow::Result<()>,
	{
		let outcomes = self.run(body);
		for outcome in outcomes {
			let id = outcome.id.unwrap_or_else(|| "-".to_owned());
			if let Err(source) = outcome.body {
				return Err(RunError::Body {
					fixture: self.name.clone(),
					id,
					source,
				});
			}
			if !outcome.teardown.is_empty() {
				return Err(RunError::Teardown {
					fixture: self.name.clone(),
					id,
					failures: outcome.teardown,
				});
			}
		}
		Ok(())
	}
}

impl<K: fmt::Debug, V, P: fmt::Debug> fmt::Debug for MappingFixture<K, V, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MappingFixture")
			.field("name", &self.name)
			.field("spec", &self.spec)
			.field("config", &self.config)
			.field("ids", &self.ids)
			.finish()
	}
}
