use mapfix_basis::{BasisError, ScopeScheduler, Teardown};
use parking_lot::Mutex;

/// Teardown scope for one invocation: runs registered teardowns last first.
///
/// [`TeardownStack::unwind`] runs everything pending and returns the
/// failures. A stack dropped with pending teardowns runs them and logs the
/// failures, so an aborted invocation still releases its resources.
#[derive(Debug, Default)]
pub struct TeardownStack {
	pending: Mutex<Vec<Teardown>>,
}

impl TeardownStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.pending.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.lock().is_empty()
	}

	/// Keys of the pending teardowns, in the order they will run.
	pub fn pending_keys(&self) -> Vec<String> {
		self.pending.lock().iter().rev().map(|teardown| teardown.key().to_owned()).collect()
	}

	/// Runs every pending teardown, including ones registered while
	/// unwinding. Each runs once; all failures are returned.
	pub fn unwind(&self) -> Vec<BasisError> {
		let mut failures = Vec::new();
		loop {
			let next = self.pending.lock().pop();
			let Some(teardown) = next else { break };
			let key = teardown.key().to_owned();
			if let Err(error) = teardown.run() {
				tracing::warn!(key = %key, error = %error, "teardown.failed");
				failures.push(error);
			}
		}
		failures
	}
}

impl ScopeScheduler for TeardownStack {
	fn register_teardown(&self, teardown: Teardown) {
		let mut pending = self.pending.lock();
		pending.push(teardown);
		tracing::trace!(pending = pending.len(), "teardown.register");
	}
}

impl Drop for TeardownStack {
	fn drop(&mut self) {
		if self.pending.get_mut().is_empty() {
			return;
		}
		let failures = self.unwind();
		if !failures.is_empty() {
			tracing::error!(failed = failures.len(), "teardowns failed in a dropped scope");
		}
	}
}
