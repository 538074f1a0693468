use crate::types::SearchResult;

/// A raw hit as produced by a provider, before normalization.
///
/// Providers fill whichever fields they know about; `text` and `url` are the
/// alternate spellings some providers use for the title and the link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRecord {
	pub title: Option<String>,
	pub text: Option<String>,
	pub href: Option<String>,
	pub url: Option<String>,
	pub body: Option<String>,
}

impl ProviderRecord {
	/// Apply the per-field fallbacks. Empty strings count as missing.
	#[must_use]
	pub fn normalize(self) -> SearchResult {
		let title = first_present([self.title, self.text]).unwrap_or_default();
		let href = first_present([self.href, self.url]).unwrap_or_default();
		let body = first_present([self.body]).unwrap_or_default();
		SearchResult::new(title, href, body)
	}
}

fn first_present<const N: usize>(values: [Option<String>; N]) -> Option<String> {
	values
		.into_iter()
		.flatten()
		.find(|value| !value.trim().is_empty())
}
