use std::fmt;

use super::*;
use crate::descriptor::{Basis, ClassifyMode, classify};
use crate::sequence::{BasisSequence, IterSequence, Scoped};
use crate::test_support::{Calls, Log};

fn descriptor<V, P>(entry: Basis<V, P>) -> Descriptor<V, P> {
	classify("key", entry, ClassifyMode::Simple).unwrap()
}

/// Yields twice while claiming to be done after the first value.
struct Sneaky(u8);

impl BasisSequence<u8> for Sneaky {
	fn resume(&mut self) -> anyhow::Result<Option<u8>> {
		self.0 += 1;
		Ok((self.0 <= 2).then_some(self.0))
	}
}

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("refused")
	}
}

impl std::error::Error for Refused {}

#[test]
fn literal_ignores_param() {
	let descriptor = descriptor::<_, u32>(Basis::value("lit"));
	let realized = resolve(&descriptor, "key", Some(&7)).unwrap();
	assert_eq!(*realized.value, "lit");
	assert_eq!(realized.kind, BasisKind::Literal);
	assert!(realized.teardown.is_none());
}

#[test]
fn callable_receives_param_when_parametrized() {
	let descriptor = descriptor::<u32, u32>(Basis::callable_with(|x| Ok(x * 2)));
	assert_eq!(*resolve(&descriptor, "key", Some(&10)).unwrap().value, 20);
	assert_eq!(*resolve(&descriptor, "key", Some(&20)).unwrap().value, 40);
}

#[test]
fn arity_must_match_parametrization() {
	let unary = descriptor::<u32, u32>(Basis::callable_with(|x| Ok(*x)));
	let err = resolve(&unary, "key", None).unwrap_err();
	assert!(matches!(err, BasisError::Signature { parametrized: false, .. }), "unexpected error: {err}");

	let nullary = descriptor::<u32, u32>(Basis::callable(|| Ok(1)));
	let err = resolve(&nullary, "key", Some(&1)).unwrap_err();
	assert!(matches!(err, BasisError::Signature { parametrized: true, .. }), "unexpected error: {err}");
}

#[test]
fn factory_error_passes_through_unchanged() {
	let descriptor = descriptor::<u32, ()>(Basis::callable(|| Err(Refused.into())));
	let err = resolve(&descriptor, "key", None).unwrap_err();

	assert_eq!(err.to_string(), "refused");
	let source = err.factory_error().expect("factory error");
	assert!(source.downcast_ref::<Refused>().is_some());
}

#[test]
fn generator_steps_twice_across_resolve_and_teardown() {
	let log = Log::default();
	let factory_log = log.clone();
	let descriptor = descriptor::<&'static str, ()>(Basis::generator(move || {
		let log = factory_log.clone();
		log.push("setup");
		Ok(Scoped::new("open", move || {
			log.push("cleanup");
			Ok(())
		}))
	}));

	let realized = resolve(&descriptor, "key", None).unwrap();
	assert_eq!(*realized.value, "open");
	assert_eq!(realized.kind, BasisKind::Generator);
	assert_eq!(log.events(), vec!["setup".to_string()]);

	realized.teardown.expect("teardown").run().unwrap();
	assert_eq!(log.events(), vec!["setup".to_string(), "cleanup".to_string()]);
}

#[test]
fn generator_without_value_fails_at_resolution() {
	let descriptor = descriptor::<u8, ()>(Basis::generator(|| Ok(IterSequence::new(Vec::<u8>::new()))));
	let err = resolve(&descriptor, "key", None).unwrap_err();
	assert_eq!(err.violation(), Some(LifecycleViolation::NoValue));
	assert_eq!(err.key(), Some("key"));
}

#[test]
fn known_second_value_fails_at_resolution() {
	let descriptor = descriptor::<u8, ()>(Basis::generator(|| Ok(IterSequence::new(vec![1, 2]))));
	let err = resolve(&descriptor, "key", None).unwrap_err();
	assert_eq!(err.violation(), Some(LifecycleViolation::ExtraValue));
}

#[test]
fn late_second_value_fails_at_teardown() {
	let descriptor = descriptor::<u8, ()>(Basis::generator(|| Ok(Sneaky(0))));
	let realized = resolve(&descriptor, "key", None).unwrap();
	assert_eq!(*realized.value, 1);

	let err = realized.teardown.expect("teardown").run().unwrap_err();
	assert_eq!(err.violation(), Some(LifecycleViolation::ExtraValue));
}

#[test]
fn handle_close_is_checked() {
	let sequence: BoxSequence<i32> = Box::new(Scoped::new(9, || Ok(())));
	let (value, mut handle) = BasisHandle::open("key", sequence).unwrap();
	assert_eq!(value, 9);
	assert!(!handle.is_closed());

	handle.close().unwrap();
	assert!(handle.is_closed());

	let err = handle.close().unwrap_err();
	assert_eq!(err.violation(), Some(LifecycleViolation::AlreadyClosed));
}

#[test]
fn undetermined_function_follows_its_output() {
	let calls = Calls::default();
	let counted = calls.clone();
	let returning = descriptor::<u8, ()>(Basis::function(move || {
		counted.hit();
		Ok(Produced::Value(4))
	}));
	let realized = resolve(&returning, "key", None).unwrap();
	assert_eq!((*realized.value, realized.kind), (4, BasisKind::Callable));
	assert!(realized.teardown.is_none());
	assert_eq!(calls.count(), 1);

	let yielding = descriptor::<u8, ()>(Basis::function(|| Ok(Produced::scoped(5, || Ok(())))));
	let realized = resolve(&yielding, "key", None).unwrap();
	assert_eq!((*realized.value, realized.kind), (5, BasisKind::Generator));
	assert!(realized.teardown.is_some());
}
