//! Retrieval of web results from a search provider.
//!
//! Providers return raw [`ProviderRecord`]s and may fail; [`search`] turns a
//! provider response into a bounded [`ResultSet`], logging failures and
//! yielding an empty set instead of propagating them.

mod duckduckgo;
mod record;
mod request;

use thiserror::Error;

use crate::types::ResultSet;

pub use duckduckgo::{
	DEFAULT_ENDPOINT, DEFAULT_RETRIES, DEFAULT_TIMEOUT as DEFAULT_SEARCH_TIMEOUT, DuckDuckGo,
};
pub use record::ProviderRecord;
pub use request::{
	DEFAULT_REGION, ParseOptionError, SafeSearch, SearchOptions, SearchRequest, TimeLimit,
};

#[derive(Debug, Error)]
pub enum SearchError {
	#[error("search request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("invalid search endpoint '{endpoint}': {source}")]
	Endpoint {
		endpoint: String,
		#[source]
		source: url::ParseError,
	},
	#[error("search provider returned an unrecognised page")]
	Malformed,
}

/// Source of raw search hits.
pub trait SearchProvider: Send + Sync {
	/// Fetch up to `request.max_results` records in provider order.
	fn fetch(&self, request: &SearchRequest) -> Result<Vec<ProviderRecord>, SearchError>;
}

/// Run `request` against `provider`, returning an empty set on failure.
pub fn search(provider: &dyn SearchProvider, request: &SearchRequest) -> ResultSet {
	match provider.fetch(request) {
		Ok(records) => ResultSet::bounded(
			records.into_iter().map(ProviderRecord::normalize),
			request.max_results,
		),
		Err(err) => {
			tracing::warn!(%err, query = %request.query, "search provider failed");
			ResultSet::new()
		}
	}
}
