//! Classification of raw input into direct navigation or a search phrase.
//!
//! The navigation heuristic is loose: anything carrying an
//! `http://`/`https://` prefix, or any single dotted token without whitespace,
//! is treated as an address. Inputs such as `3.14` or `v1.2` therefore open as
//! URLs instead of being searched.

use thiserror::Error;

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// What the user asked for after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
	/// Open the address directly. Always carries a scheme.
	Navigate(String),
	/// Run the refinement and retrieval pipeline for this phrase.
	Search(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
	#[error("Type a query first.")]
	Empty,
}

/// Trim and classify a raw input string.
pub fn classify(raw: &str) -> Result<Submission, InputError> {
	let query = raw.trim();
	if query.is_empty() {
		return Err(InputError::Empty);
	}

	if has_scheme(query) {
		return Ok(Submission::Navigate(query.to_string()));
	}
	if looks_like_address(query) {
		return Ok(Submission::Navigate(format!("http://{query}")));
	}
	Ok(Submission::Search(query.to_string()))
}

fn has_scheme(query: &str) -> bool {
	SCHEMES.iter().any(|scheme| query.starts_with(scheme))
}

fn looks_like_address(query: &str) -> bool {
	query.contains('.') && !query.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dotted_token_navigates() {
		assert_eq!(
			classify("example.com"),
			Ok(Submission::Navigate("http://example.com".into()))
		);
	}

	#[test]
	fn scheme_prefix_navigates_verbatim() {
		assert_eq!(
			classify("https://x"),
			Ok(Submission::Navigate("https://x".into()))
		);
		assert_eq!(
			classify("  http://a b  "),
			Ok(Submission::Navigate("http://a b".into()))
		);
	}

	#[test]
	fn phrases_are_searched() {
		assert_eq!(
			classify("hello world"),
			Ok(Submission::Search("hello world".into()))
		);
		assert_eq!(classify("cats"), Ok(Submission::Search("cats".into())));
		assert_eq!(
			classify("node.js tutorial"),
			Ok(Submission::Search("node.js tutorial".into()))
		);
	}

	#[test]
	fn numeric_and_version_tokens_are_treated_as_addresses() {
		for input in ["3.14", "v1.2"] {
			assert!(matches!(classify(input), Ok(Submission::Navigate(_))));
		}
	}

	#[test]
	fn blank_input_is_rejected() {
		assert_eq!(classify(""), Err(InputError::Empty));
		assert_eq!(classify(" \t\n"), Err(InputError::Empty));
	}
}
