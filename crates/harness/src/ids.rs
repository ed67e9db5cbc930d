use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

/// Display ids for a parameter list.
///
/// Explicit `ids` win; otherwise each id is the parameter's `Debug` text,
/// with the quotes of plain string parameters removed. Ids that occur more
/// than once get a counter suffix (`a0`, `a1`), separated by `_` when the id
/// already ends in a digit (`1_0`). Counters skip values that would collide
/// with another id, so the result never repeats.
pub fn param_ids<P: fmt::Debug>(params: &[P], ids: Option<&[String]>) -> Vec<String> {
	let raw: Vec<String> = match ids {
		Some(ids) => ids.to_vec(),
		None => params.iter().map(derive_id).collect(),
	};
	disambiguate(raw)
}

/// Deterministic id for one parameter value.
pub fn derive_id<P: fmt::Debug>(param: &P) -> String {
	let text = format!("{param:?}");
	match text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
		Some(inner) if !inner.contains(['"', '\\']) => inner.to_owned(),
		_ => text,
	}
}

fn disambiguate(ids: Vec<String>) -> Vec<String> {
	let mut totals: FxHashMap<&str, usize> = FxHashMap::default();
	for id in &ids {
		*totals.entry(id.as_str()).or_default() += 1;
	}
	if totals.len() == ids.len() {
		return ids;
	}

	let mut taken: FxHashSet<String> = ids.iter().cloned().collect();
	let mut counters: FxHashMap<&str, usize> = FxHashMap::default();
	let mut out = Vec::with_capacity(ids.len());
	for id in &ids {
		if totals[id.as_str()] == 1 {
			out.push(id.clone());
			continue;
		}
		let separator = if id.ends_with(|c: char| c.is_ascii_digit()) { "_" } else { "" };
		let counter = counters.entry(id.as_str()).or_default();
		let mut candidate = format!("{id}{separator}{counter}");
		while taken.contains(&candidate) {
			*counter += 1;
			candidate = format!("{id}{separator}{counter}");
		}
		*counter += 1;
		taken.insert(candidate.clone());
		out.push(candidate);
	}
	out
}
