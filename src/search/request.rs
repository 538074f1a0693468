use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::DEFAULT_MAX_RESULTS;

pub const DEFAULT_REGION: &str = "wt-wt";

/// Safe-search level passed to the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SafeSearch {
	#[default]
	Off,
	Moderate,
	Strict,
}

impl SafeSearch {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			SafeSearch::Off => "off",
			SafeSearch::Moderate => "moderate",
			SafeSearch::Strict => "strict",
		}
	}
}

/// Recency window for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeLimit {
	Day,
	Week,
	Month,
	#[default]
	Year,
	Any,
}

impl TimeLimit {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			TimeLimit::Day => "day",
			TimeLimit::Week => "week",
			TimeLimit::Month => "month",
			TimeLimit::Year => "year",
			TimeLimit::Any => "any",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseOptionError {
	kind: &'static str,
	value: String,
}

impl FromStr for SafeSearch {
	type Err = ParseOptionError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"off" => Ok(SafeSearch::Off),
			"moderate" => Ok(SafeSearch::Moderate),
			"strict" | "on" => Ok(SafeSearch::Strict),
			_ => Err(ParseOptionError {
				kind: "safe-search level",
				value: value.to_string(),
			}),
		}
	}
}

impl FromStr for TimeLimit {
	type Err = ParseOptionError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"day" | "d" => Ok(TimeLimit::Day),
			"week" | "w" => Ok(TimeLimit::Week),
			"month" | "m" => Ok(TimeLimit::Month),
			"year" | "y" => Ok(TimeLimit::Year),
			"any" | "" => Ok(TimeLimit::Any),
			_ => Err(ParseOptionError {
				kind: "time limit",
				value: value.to_string(),
			}),
		}
	}
}

impl fmt::Display for SafeSearch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl fmt::Display for TimeLimit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Provider settings shared by every search of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
	pub region: String,
	pub safe_search: SafeSearch,
	pub time_limit: TimeLimit,
	pub max_results: usize,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			region: DEFAULT_REGION.to_string(),
			safe_search: SafeSearch::default(),
			time_limit: TimeLimit::default(),
			max_results: DEFAULT_MAX_RESULTS,
		}
	}
}

impl SearchOptions {
	/// Build the request for `query` under these options.
	#[must_use]
	pub fn request(&self, query: impl Into<String>) -> SearchRequest {
		SearchRequest {
			query: query.into(),
			region: self.region.clone(),
			safe_search: self.safe_search,
			time_limit: self.time_limit,
			max_results: self.max_results,
		}
	}
}

/// Provider-independent description of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
	pub query: String,
	pub region: String,
	pub safe_search: SafeSearch,
	pub time_limit: TimeLimit,
	pub max_results: usize,
}

impl SearchRequest {
	/// A request for `query` with default options.
	#[must_use]
	pub fn new(query: impl Into<String>) -> Self {
		SearchOptions::default().request(query)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_option_names() {
		assert_eq!("Strict".parse::<SafeSearch>(), Ok(SafeSearch::Strict));
		assert_eq!("y".parse::<TimeLimit>(), Ok(TimeLimit::Year));
		assert!("sometimes".parse::<SafeSearch>().is_err());
	}

	#[test]
	fn defaults_match_unrestricted_yearly_search() {
		let request = SearchRequest::new("cats");
		assert_eq!(request.region, "wt-wt");
		assert_eq!(request.safe_search, SafeSearch::Off);
		assert_eq!(request.time_limit, TimeLimit::Year);
		assert_eq!(request.max_results, 64);
	}
}
