use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::BasisError;
use crate::scheduler::{ScopeScheduler, Teardown};

/// Scheduler that records teardowns and runs them on demand, last first.
#[derive(Default)]
pub(crate) struct RecordingScheduler {
	pending: Mutex<Vec<Teardown>>,
}

impl RecordingScheduler {
	pub(crate) fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub(crate) fn pending(&self) -> usize {
		self.pending.lock().len()
	}

	pub(crate) fn pending_keys(&self) -> Vec<String> {
		self.pending.lock().iter().map(|teardown| teardown.key().to_owned()).collect()
	}

	pub(crate) fn run_all(&self) -> Vec<BasisError> {
		let mut failures = Vec::new();
		loop {
			let next = self.pending.lock().pop();
			let Some(teardown) = next else { break };
			if let Err(err) = teardown.run() {
				failures.push(err);
			}
		}
		failures
	}
}

impl ScopeScheduler for RecordingScheduler {
	fn register_teardown(&self, teardown: Teardown) {
		self.pending.lock().push(teardown);
	}
}

/// Shared call counter for factories under test.
#[derive(Debug, Default, Clone)]
pub(crate) struct Calls(Arc<AtomicUsize>);

impl Calls {
	pub(crate) fn hit(&self) -> usize {
		self.0.fetch_add(1, Ordering::SeqCst) + 1
	}

	pub(crate) fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}
}

/// Shared event log for ordering assertions.
#[derive(Debug, Default, Clone)]
pub(crate) struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
	pub(crate) fn push(&self, event: impl Into<String>) {
		self.0.lock().push(event.into());
	}

	pub(crate) fn events(&self) -> Vec<String> {
		self.0.lock().clone()
	}
}
