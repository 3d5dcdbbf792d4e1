/* src/scope.rs */

//!
//! Scope sets: named partitions of configuration content.
//!
//! A [`Scopes`] value is either the single wildcard `*` or, once normalized,
//! a sorted, duplicate-free list of non-empty scope names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The reserved "all scopes" token.
pub const WILDCARD: &str = "*";

/// An ordered collection of scope names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scopes(Vec<String>);

impl Scopes {
	/// Creates an empty scope set.
	pub const fn new() -> Self {
		Self(Vec::new())
	}

	/// Returns the wildcard scope set.
	pub fn wildcard() -> Self {
		Self(vec![WILDCARD.to_string()])
	}

	/// Returns the normalized form of this scope set.
	///
	/// Scanning from the back, the first wildcard found collapses the whole
	/// set to `["*"]`. Otherwise empty names are dropped and the rest is
	/// sorted and deduplicated.
	pub fn normalize(self) -> Self {
		let mut names = self.0;
		if let Some(pos) = names.iter().rposition(|s| s == WILDCARD) {
			let wildcard = names.swap_remove(pos);
			return Self(vec![wildcard]);
		}
		names.retain(|s| !s.is_empty());
		names.sort_unstable();
		names.dedup();
		Self(names)
	}

	/// Reports whether `scope` is covered by this set.
	///
	/// The set must already be normalized: membership is a binary search.
	pub fn has(&self, scope: &str) -> bool {
		if self.is_wildcard() {
			return true;
		}
		self.0.binary_search_by(|s| s.as_str().cmp(scope)).is_ok()
	}

	/// Returns true if this set is exactly the wildcard.
	pub fn is_wildcard(&self) -> bool {
		self.0.len() == 1 && self.0[0] == WILDCARD
	}

	/// Returns true if any entry is the wildcard token.
	pub fn contains_wildcard(&self) -> bool {
		self.0.iter().any(|s| s == WILDCARD)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn into_inner(self) -> Vec<String> {
		self.0
	}
}

impl fmt::Display for Scopes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(","))
	}
}

impl<S: Into<String>> FromIterator<S> for Scopes {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl<S: Into<String>> From<Vec<S>> for Scopes {
	fn from(names: Vec<S>) -> Self {
		names.into_iter().collect()
	}
}

impl<'a> IntoIterator for &'a Scopes {
	type Item = &'a String;
	type IntoIter = std::slice::Iter<'a, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scopes(names: &[&str]) -> Scopes {
		names.iter().copied().collect()
	}

	#[test]
	fn wildcard_anywhere_collapses() {
		for input in [
			&["*"][..],
			&["a", "*"],
			&["*", "b", "a"],
			&["b", "", "*", "a", "*"],
		] {
			assert_eq!(scopes(input).normalize(), Scopes::wildcard(), "{input:?}");
		}
	}

	#[test]
	fn normalize_sorts_dedups_and_drops_empty() {
		let normalized = scopes(&["item", "", "bag", "item", "", "avatar"]).normalize();
		assert_eq!(normalized, scopes(&["avatar", "bag", "item"]));
		assert!(!normalized.is_wildcard());
	}

	#[test]
	fn normalize_empty_stays_empty() {
		assert!(scopes(&["", ""]).normalize().is_empty());
		assert!(Scopes::new().normalize().is_empty());
	}

	#[test]
	fn has_uses_normalized_membership() {
		let set = scopes(&["item", "bag", "avatar", "bag"]).normalize();
		assert!(set.has("bag"));
		assert!(set.has("avatar"));
		assert!(!set.has("shop"));
		assert!(!set.has(""));
	}

	#[test]
	fn wildcard_has_everything() {
		let set = scopes(&["x", "*"]).normalize();
		assert!(set.is_wildcard());
		assert!(set.has("anything"));
		assert!(set.has(""));
	}

	#[test]
	fn display_joins_with_commas() {
		assert_eq!(scopes(&["b", "a"]).normalize().to_string(), "a,b");
		assert_eq!(Scopes::new().to_string(), "");
	}

	#[test]
	fn deserializes_as_plain_list() {
		let set: Scopes = serde_json::from_str(r#"["b","a"]"#).unwrap();
		assert_eq!(set.len(), 2);
		assert!(!set.contains_wildcard());
	}
}
