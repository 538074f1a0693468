use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{ProviderRecord, SafeSearch, SearchError, SearchProvider, SearchRequest, TimeLimit};

pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_RETRIES: u32 = 1;

const USER_AGENT: &str =
	"Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
const MAX_PAGES: usize = 5;
const REDIRECT_PARAM: &str = "uddg";

struct Selectors {
	links: Selector,
	result: Selector,
	title: Selector,
	snippet: Selector,
	display_url: Selector,
}

fn selectors() -> &'static Selectors {
	static SELECTORS: OnceLock<Selectors> = OnceLock::new();
	SELECTORS.get_or_init(|| {
		let parse = |css: &str| Selector::parse(css).expect("static selectors must parse");
		Selectors {
			links: parse("#links, .results, .no-results"),
			result: parse("div.result"),
			title: parse("a.result__a"),
			snippet: parse(".result__snippet"),
			display_url: parse(".result__url"),
		}
	})
}

/// Search provider backed by DuckDuckGo's HTML endpoint.
#[derive(Debug, Clone)]
pub struct DuckDuckGo {
	client: Client,
	endpoint: Url,
	retries: u32,
}

impl DuckDuckGo {
	/// Build a provider with a per-request `timeout` and `retries` extra attempts.
	pub fn new(endpoint: &str, timeout: Duration, retries: u32) -> Result<Self, SearchError> {
		let endpoint = Url::parse(endpoint).map_err(|source| SearchError::Endpoint {
			endpoint: endpoint.to_string(),
			source,
		})?;
		let client = Client::builder()
			.user_agent(USER_AGENT)
			.timeout(timeout)
			.build()?;
		Ok(Self {
			client,
			endpoint,
			retries,
		})
	}

	fn fetch_page(&self, request: &SearchRequest, offset: usize) -> Result<String, SearchError> {
		let form = form_fields(request, offset);
		let mut attempt = 0;
		loop {
			let response = self
				.client
				.post(self.endpoint.clone())
				.form(&form)
				.send()
				.and_then(|response| response.error_for_status())
				.and_then(|response| response.text());
			match response {
				Ok(body) => return Ok(body),
				Err(err) if attempt < self.retries => {
					attempt += 1;
					tracing::debug!(%err, attempt, "search request failed, retrying");
				}
				Err(err) => return Err(err.into()),
			}
		}
	}
}

impl SearchProvider for DuckDuckGo {
	fn fetch(&self, request: &SearchRequest) -> Result<Vec<ProviderRecord>, SearchError> {
		let mut records = Vec::new();
		let mut seen = HashSet::new();
		let mut offset = 0;
		for page in 0..MAX_PAGES {
			if records.len() >= request.max_results {
				break;
			}
			let page_records = match self
				.fetch_page(request, offset)
				.and_then(|html| parse_results(&html))
			{
				Ok(page_records) => page_records,
				Err(err) if page > 0 => {
					tracing::debug!(%err, page, "stopping pagination after failed page");
					break;
				}
				Err(err) => return Err(err),
			};
			offset += page_records.len();

			let before = records.len();
			records.extend(
				page_records
					.into_iter()
					.filter(|record| first_sighting(&mut seen, record)),
			);
			if records.len() == before {
				break;
			}
		}
		records.truncate(request.max_results);
		Ok(records)
	}
}

/// Whether `record` has not been returned by an earlier page. Records without
/// any link cannot be told apart and are always kept.
fn first_sighting(seen: &mut HashSet<String>, record: &ProviderRecord) -> bool {
	match record.href.as_ref().or(record.url.as_ref()) {
		Some(link) => seen.insert(link.clone()),
		None => true,
	}
}

fn form_fields(request: &SearchRequest, offset: usize) -> Vec<(&'static str, String)> {
	let mut form = vec![
		("q", request.query.clone()),
		("kl", request.region.clone()),
		("kp", safe_search_param(request.safe_search).to_string()),
		("df", time_limit_param(request.time_limit).to_string()),
	];
	if offset > 0 {
		form.push(("s", offset.to_string()));
		form.push(("dc", (offset + 1).to_string()));
	}
	form
}

fn safe_search_param(level: SafeSearch) -> &'static str {
	match level {
		SafeSearch::Off => "-2",
		SafeSearch::Moderate => "-1",
		SafeSearch::Strict => "1",
	}
}

fn time_limit_param(limit: TimeLimit) -> &'static str {
	match limit {
		TimeLimit::Day => "d",
		TimeLimit::Week => "w",
		TimeLimit::Month => "m",
		TimeLimit::Year => "y",
		TimeLimit::Any => "",
	}
}

/// Extract result records from one HTML results page, in page order.
pub(crate) fn parse_results(html: &str) -> Result<Vec<ProviderRecord>, SearchError> {
	let selectors = selectors();
	let document = Html::parse_document(html);
	if document.select(&selectors.links).next().is_none() {
		return Err(SearchError::Malformed);
	}

	let records = document
		.select(&selectors.result)
		.filter(|node| !is_ad(node))
		.map(|node| parse_record(node, selectors))
		.collect();
	Ok(records)
}

fn is_ad(node: &ElementRef<'_>) -> bool {
	node.value().classes().any(|class| class == "result--ad")
}

fn parse_record(node: ElementRef<'_>, selectors: &Selectors) -> ProviderRecord {
	let anchor = node.select(&selectors.title).next();
	ProviderRecord {
		title: anchor.map(element_text),
		href: anchor
			.and_then(|anchor| anchor.value().attr("href"))
			.map(resolve_redirect),
		url: node
			.select(&selectors.display_url)
			.next()
			.map(element_text)
			.map(|display| with_scheme(&display)),
		body: node.select(&selectors.snippet).next().map(element_text),
		..ProviderRecord::default()
	}
}

fn element_text(element: ElementRef<'_>) -> String {
	element
		.text()
		.collect::<String>()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
}

/// Unwrap `//duckduckgo.com/l/?uddg=<target>` links to their target.
fn resolve_redirect(href: &str) -> String {
	let absolute = if href.starts_with("//") {
		format!("https:{href}")
	} else {
		href.to_string()
	};
	Url::parse(&absolute)
		.ok()
		.and_then(|url| {
			url.query_pairs()
				.find(|(key, _)| key == REDIRECT_PARAM)
				.map(|(_, target)| target.into_owned())
		})
		.unwrap_or(absolute)
}

fn with_scheme(display: &str) -> String {
	if display.is_empty() || display.contains("://") {
		display.to_string()
	} else {
		format!("https://{display}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const PAGE: &str = r#"
<html><body>
<div id="links" class="results">
  <div class="result results_links result--ad">
    <h2 class="result__title"><a class="result__a" href="https://ads.example/">Sponsored</a></h2>
  </div>
  <div class="result results_links results_links_deep web-result">
    <h2 class="result__title">
      <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FCat&amp;rut=abc">Cat -
        Wikipedia</a>
    </h2>
    <a class="result__url" href="//duckduckgo.com/l/?uddg=x">en.wikipedia.org/wiki/Cat</a>
    <a class="result__snippet" href="//duckduckgo.com/l/?uddg=x">The <b>cat</b> is a small carnivorous mammal.</a>
  </div>
  <div class="result results_links results_links_deep web-result">
    <h2 class="result__title"><a class="result__a" href="https://cats.example/care">Cat care</a></h2>
  </div>
  <div class="result results_links results_links_deep web-result">
    <a class="result__url">cats.example/no-title</a>
  </div>
</div>
</body></html>"#;

	#[test]
	fn parses_results_in_page_order_and_skips_ads() {
		let records = parse_results(PAGE).expect("page parses");
		let results: Vec<_> = records.into_iter().map(ProviderRecord::normalize).collect();
		assert_eq!(results.len(), 3);

		assert_eq!(results[0].title, "Cat - Wikipedia");
		assert_eq!(results[0].href, "https://en.wikipedia.org/wiki/Cat");
		assert_eq!(results[0].body, "The cat is a small carnivorous mammal.");

		assert_eq!(results[1].title, "Cat care");
		assert_eq!(results[1].href, "https://cats.example/care");
		assert_eq!(results[1].body, "");

		assert_eq!(results[2].title, crate::types::NO_TITLE);
		assert_eq!(results[2].href, "https://cats.example/no-title");
	}

	#[test]
	fn no_results_page_is_empty_not_malformed() {
		let html = r#"<html><body><div class="no-results">No results.</div></body></html>"#;
		assert!(parse_results(html).expect("parses").is_empty());
	}

	#[test]
	fn unrecognised_page_is_malformed() {
		let html = "<html><body><form id=\"challenge-form\"></form></body></html>";
		assert!(matches!(parse_results(html), Err(SearchError::Malformed)));
	}

	#[test]
	fn form_encodes_provider_options() {
		let mut request = SearchRequest::new("cats");
		request.safe_search = SafeSearch::Moderate;
		request.time_limit = TimeLimit::Week;
		let form = form_fields(&request, 0);
		assert!(form.contains(&("q", "cats".to_string())));
		assert!(form.contains(&("kl", "wt-wt".to_string())));
		assert!(form.contains(&("kp", "-1".to_string())));
		assert!(form.contains(&("df", "w".to_string())));
		assert!(!form.iter().any(|(key, _)| *key == "s"));

		let next = form_fields(&request, 10);
		assert!(next.contains(&("s", "10".to_string())));
		assert!(next.contains(&("dc", "11".to_string())));
	}

	#[test]
	fn plain_links_pass_through_redirect_resolution() {
		assert_eq!(resolve_redirect("https://a.example/x"), "https://a.example/x");
	}

	#[test]
	fn invalid_endpoint_is_rejected() {
		let err = DuckDuckGo::new("not a url", DEFAULT_TIMEOUT, 0).unwrap_err();
		assert!(matches!(err, SearchError::Endpoint { .. }));
	}

	#[test]
	fn unreachable_endpoint_is_an_error() {
		let provider =
			DuckDuckGo::new("http://127.0.0.1:9/html/", Duration::from_millis(500), 1).unwrap();
		assert!(provider.fetch(&SearchRequest::new("cats")).is_err());
	}

	mod against_local_server {
		use std::io::{BufRead, BufReader, Read, Write};
		use std::net::TcpListener;
		use std::sync::{Arc, Mutex};
		use std::thread;

		use super::*;

		const CHALLENGE: &str =
			"<html><body><form id=\"challenge-form\"></form></body></html>";
		const NO_RESULTS: &str =
			"<html><body><div class=\"no-results\">No results.</div></body></html>";

		/// HTTP server answering each connection with `respond(index, form_body)`.
		struct StubServer {
			endpoint: String,
			requests: Arc<Mutex<Vec<String>>>,
		}

		impl StubServer {
			fn start<F>(respond: F) -> Self
			where
				F: Fn(usize) -> (u16, String) + Send + 'static,
			{
				let listener = TcpListener::bind("127.0.0.1:0").unwrap();
				let endpoint = format!("http://{}/html/", listener.local_addr().unwrap());
				let requests = Arc::new(Mutex::new(Vec::new()));
				let log = Arc::clone(&requests);
				thread::spawn(move || {
					for (index, stream) in listener.incoming().enumerate() {
						let Ok(mut stream) = stream else { break };
						let body = read_form(&mut stream);
						log.lock().unwrap().push(body);
						let (status, html) = respond(index);
						let response = format!(
							"HTTP/1.1 {status} Stub\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{html}",
							html.len()
						);
						let _ = stream.write_all(response.as_bytes());
					}
				});
				Self { endpoint, requests }
			}

			fn provider(&self, retries: u32) -> DuckDuckGo {
				DuckDuckGo::new(&self.endpoint, Duration::from_secs(5), retries).unwrap()
			}

			fn requests(&self) -> Vec<String> {
				self.requests.lock().unwrap().clone()
			}
		}

		fn read_form(stream: &mut std::net::TcpStream) -> String {
			let mut reader = BufReader::new(stream);
			let mut length = 0;
			loop {
				let mut line = String::new();
				if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
					break;
				}
				if let Some((name, value)) = line.split_once(':')
					&& name.eq_ignore_ascii_case("content-length")
				{
					length = value.trim().parse().unwrap_or(0);
				}
			}
			let mut body = vec![0; length];
			let _ = reader.read_exact(&mut body);
			String::from_utf8_lossy(&body).into_owned()
		}

		fn page(titles: &[&str]) -> String {
			let results: String = titles
				.iter()
				.map(|title| {
					format!(
						"<div class=\"result\"><a class=\"result__a\" href=\"https://{title}.example/\">{title}</a></div>"
					)
				})
				.collect();
			format!("<html><body><div id=\"links\">{results}</div></body></html>")
		}

		fn titles(records: &[ProviderRecord]) -> Vec<String> {
			records
				.iter()
				.map(|record| record.title.clone().unwrap_or_default())
				.collect()
		}

		#[test]
		fn pages_accumulate_with_offsets() {
			let server = StubServer::start(|index| match index {
				0 => (200, page(&["a", "b"])),
				1 => (200, page(&["c", "d"])),
				_ => (200, NO_RESULTS.to_string()),
			});
			let records = server.provider(0).fetch(&SearchRequest::new("cats")).unwrap();
			assert_eq!(titles(&records), ["a", "b", "c", "d"]);

			let requests = server.requests();
			assert_eq!(requests.len(), 3);
			assert!(requests[0].starts_with("q=cats"));
			assert!(!requests[0].contains("&s="));
			assert!(requests[1].contains("&s=2&dc=3"));
			assert!(requests[2].contains("&s=4&dc=5"));
		}

		#[test]
		fn unrecognised_later_page_keeps_earlier_results() {
			let server = StubServer::start(|index| match index {
				0 => (200, page(&["a", "b"])),
				_ => (200, CHALLENGE.to_string()),
			});
			let records = server.provider(0).fetch(&SearchRequest::new("cats")).unwrap();
			assert_eq!(titles(&records), ["a", "b"]);
			assert_eq!(server.requests().len(), 2);
		}

		#[test]
		fn unrecognised_first_page_is_an_error() {
			let server = StubServer::start(|_| (200, CHALLENGE.to_string()));
			let err = server.provider(0).fetch(&SearchRequest::new("cats")).unwrap_err();
			assert!(matches!(err, SearchError::Malformed));
		}

		#[test]
		fn repeated_page_ends_pagination_without_duplicates() {
			let server = StubServer::start(|_| (200, page(&["a", "b"])));
			let records = server.provider(0).fetch(&SearchRequest::new("cats")).unwrap();
			assert_eq!(titles(&records), ["a", "b"]);
			assert_eq!(server.requests().len(), 2);
		}

		#[test]
		fn results_are_truncated_across_pages() {
			let server = StubServer::start(|index| match index {
				0 => (200, page(&["a", "b", "c"])),
				_ => (200, page(&["d", "e", "f"])),
			});
			let mut request = SearchRequest::new("cats");
			request.max_results = 4;
			let records = server.provider(0).fetch(&request).unwrap();
			assert_eq!(titles(&records), ["a", "b", "c", "d"]);
			assert_eq!(server.requests().len(), 2);
		}

		#[test]
		fn pagination_stops_after_page_limit() {
			let server = StubServer::start(|index| {
				let title = format!("r{index}");
				(200, page(&[title.as_str()]))
			});
			let records = server.provider(0).fetch(&SearchRequest::new("cats")).unwrap();
			assert_eq!(records.len(), MAX_PAGES);
			assert_eq!(server.requests().len(), MAX_PAGES);
		}

		#[test]
		fn one_retry_recovers_from_a_failed_request() {
			let server = StubServer::start(|index| match index {
				0 => (500, String::new()),
				1 => (200, page(&["a"])),
				_ => (200, NO_RESULTS.to_string()),
			});
			let records = server.provider(1).fetch(&SearchRequest::new("cats")).unwrap();
			assert_eq!(titles(&records), ["a"]);
			assert_eq!(server.requests().len(), 3);
		}

		#[test]
		fn failure_without_retries_is_an_error() {
			let server = StubServer::start(|index| match index {
				0 => (500, String::new()),
				_ => (200, page(&["a"])),
			});
			assert!(server.provider(0).fetch(&SearchRequest::new("cats")).is_err());
			assert_eq!(server.requests().len(), 1);
		}
	}
}
