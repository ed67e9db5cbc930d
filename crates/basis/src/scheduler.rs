use std::fmt;

use crate::error::Result;

type TeardownFn = Box<dyn FnOnce() -> Result<()> + Send>;

/// A cleanup action for one realized basis object. Runs at most once.
pub struct Teardown {
	key: String,
	action: TeardownFn,
}

impl Teardown {
	pub fn new<F>(key: impl Into<String>, action: F) -> Self
	where
		F: FnOnce() -> Result<()> + Send + 'static,
	{
		Self {
			key: key.into(),
			action: Box::new(action),
		}
	}

	/// Label of the key whose value this tears down.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Runs the action, consuming it.
	pub fn run(self) -> Result<()> {
		tracing::trace!(key = %self.key, "basis.teardown");
		(self.action)()
	}
}

impl fmt::Debug for Teardown {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Teardown").field("key", &self.key).finish_non_exhaustive()
	}
}

/// Owner of the teardown scope for one invocation.
///
/// The resource hands over teardowns in realization order. Implementations
/// must run each one exactly once after the invocation's body, last
/// registered first, and must surface their failures.
pub trait ScopeScheduler {
	fn register_teardown(&self, teardown: Teardown);
}
