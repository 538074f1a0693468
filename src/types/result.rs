use serde::Serialize;

/// Number of results kept per search unless configured otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 64;

/// Placeholder shown for results the provider returned without a title.
pub const NO_TITLE: &str = "(no title)";
/// Placeholder shown in the detail view for results without a link.
pub const NO_LINK: &str = "(no link)";
/// Placeholder shown in the detail view for results without a snippet.
pub const NO_SNIPPET: &str = "(no snippet)";

const LIST_SNIPPET_CHARS: usize = 120;

/// A single normalized search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
	pub title: String,
	pub href: String,
	pub body: String,
}

impl SearchResult {
	/// Construct a result, substituting the title placeholder for an empty title.
	#[must_use]
	pub fn new(title: impl Into<String>, href: impl Into<String>, body: impl Into<String>) -> Self {
		let title = title.into();
		Self {
			title: if title.is_empty() {
				NO_TITLE.to_string()
			} else {
				title
			},
			href: href.into(),
			body: body.into(),
		}
	}

	#[must_use]
	pub fn has_link(&self) -> bool {
		!self.href.trim().is_empty()
	}

	/// One-line representation used by the results list. `position` is zero based.
	#[must_use]
	pub fn list_line(&self, position: usize) -> String {
		let snippet: String = self.body.chars().take(LIST_SNIPPET_CHARS).collect();
		format!("{}. {} - {}", position + 1, self.title, snippet.trim())
	}

	/// Read-only text shown by the snippet detail view.
	#[must_use]
	pub fn detail_text(&self) -> String {
		let href = if self.href.is_empty() {
			NO_LINK
		} else {
			self.href.as_str()
		};
		let body = if self.body.is_empty() {
			NO_SNIPPET
		} else {
			self.body.as_str()
		};
		format!("Title: {}\n\nURL: {href}\n\nSnippet:\n{body}", self.title)
	}
}

/// Ordered, bounded collection of results in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
	results: Vec<SearchResult>,
}

impl ResultSet {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Collect at most `max_results` entries, keeping their order.
	#[must_use]
	pub fn bounded(results: impl IntoIterator<Item = SearchResult>, max_results: usize) -> Self {
		Self {
			results: results.into_iter().take(max_results).collect(),
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.results.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.results.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&SearchResult> {
		self.results.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
		self.results.iter()
	}
}

impl<'a> IntoIterator for &'a ResultSet {
	type Item = &'a SearchResult;
	type IntoIter = std::slice::Iter<'a, SearchResult>;

	fn into_iter(self) -> Self::IntoIter {
		self.results.iter()
	}
}
