use mapfix_basis::{Basis, MappingSpec};
use pretty_assertions::assert_eq;

use super::*;
use crate::config::FixtureConfig;

fn numbers(name: &str, config: FixtureConfig<u32>) -> MappingFixture<&'static str, u32, u32> {
	let spec = MappingSpec::explicit([("one", Basis::value(1)), ("scaled", Basis::callable_with(|p| Ok(*p)))]).unwrap();
	MappingFixture::new(name, spec, config).unwrap()
}

fn words(name: &str) -> MappingFixture<&'static str, String> {
	let spec = MappingSpec::explicit([("hello", Basis::value("hello".to_string()))]).unwrap();
	MappingFixture::new(name, spec, FixtureConfig::default()).unwrap()
}

#[test]
fn register_and_get_round_trip() {
	let registry = FixtureRegistry::new();
	let registered = registry.register(numbers("numbers", FixtureConfig::new().params([1, 2]))).unwrap();

	let found = registry.get::<&'static str, u32, u32>("numbers").unwrap();
	assert!(Arc::ptr_eq(&registered, &found));
	assert_eq!(found.ids(), ["1", "2"]);
	assert!(registry.contains("numbers"));
	assert_eq!(registry.len(), 1);
}

#[test]
fn duplicate_names_are_rejected() {
	let registry = FixtureRegistry::new();
	registry.register(words("shared")).unwrap();

	let err = registry.register(words("shared")).unwrap_err();
	assert!(matches!(err, RegistryError::DuplicateName { ref name } if name == "shared"), "unexpected error: {err}");
}

#[test]
fn lookups_check_name_and_types() {
	let registry = FixtureRegistry::new();
	registry.register(words("words")).unwrap();

	let err = registry.get::<&'static str, String, ()>("missing").unwrap_err();
	assert!(matches!(err, RegistryError::UnknownFixture { .. }), "unexpected error: {err}");

	let err = registry.get::<&'static str, u32, ()>("words").unwrap_err();
	assert!(matches!(err, RegistryError::TypeMismatch { .. }), "unexpected error: {err}");
}

#[test]
fn autouse_and_snapshots() {
	let registry = FixtureRegistry::new();
	registry.register(numbers("zeta", FixtureConfig::new().autouse(true).scope(Scope::Session))).unwrap();
	registry.register(words("alpha")).unwrap();
	registry.register(numbers("mid", FixtureConfig::new().autouse(true))).unwrap();

	assert_eq!(registry.autouse(), vec!["zeta", "mid"]);

	let snapshots = registry.snapshots();
	let names: Vec<_> = snapshots.iter().map(|record| record.name.as_str()).collect();
	assert_eq!(names, vec!["alpha", "mid", "zeta"]);
	assert_eq!(
		snapshots[2],
		FixtureRecord {
			name: "zeta".into(),
			scope: Scope::Session,
			autouse: true,
			ids: Vec::new(),
			keys: 2,
		}
	);

	assert!(registry.remove("mid"));
	assert!(!registry.remove("mid"));
	assert_eq!(registry.autouse(), vec!["zeta"]);
}
