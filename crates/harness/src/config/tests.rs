use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[test]
fn defaults_match_host_fixture_defaults() {
	let config = FixtureConfig::<u32>::default();
	assert_eq!(config.scope, Scope::Function);
	assert!(!config.autouse);
	assert!(!config.is_parametrized());
	config.validate().unwrap();
}

#[test]
fn parses_full_table() {
	let config = FixtureConfig::<u32>::from_toml(
		r#"
scope = "module"
autouse = true
params = [10, 20]
ids = ["ten", "twenty"]
"#,
	)
	.unwrap();

	assert_eq!(
		config,
		FixtureConfig::new()
			.scope(Scope::Module)
			.autouse(true)
			.params([10, 20])
			.ids(["ten", "twenty"])
	);
}

#[test]
fn empty_table_is_default() {
	let config = FixtureConfig::<String>::from_toml("").unwrap();
	assert_eq!(config, FixtureConfig::default());
}

#[test]
fn unknown_keys_are_rejected() {
	let err = FixtureConfig::<u32>::from_toml("name = \"x\"").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)), "unexpected error: {err}");
}

#[rstest]
#[case::ids_without_params(FixtureConfig::new().ids(["a"]), "ids given without params")]
#[case::length_mismatch(FixtureConfig::new().params([1, 2]).ids(["a"]), "1 ids given for 2 params")]
#[case::empty_params(FixtureConfig::new().params(Vec::<u32>::new()), "params must not be empty")]
fn invalid_configs(#[case] config: FixtureConfig<u32>, #[case] message: &str) {
	assert_eq!(config.validate().unwrap_err().to_string(), message);
}

#[test]
fn scope_names_round_trip() {
	for scope in [Scope::Function, Scope::Class, Scope::Module, Scope::Package, Scope::Session] {
		let config = FixtureConfig::<u32>::from_toml(&format!("scope = \"{}\"", scope.as_str())).unwrap();
		assert_eq!(config.scope, scope);
	}
}

#[test]
fn empty_params_table_is_rejected_not_skipped() {
	let err = FixtureConfig::<u32>::from_toml("params = []").unwrap_err();
	assert!(matches!(err, ConfigError::EmptyParams), "unexpected error: {err}");
}
