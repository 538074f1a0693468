//! Hand-off of URLs to whatever displays web pages.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to open {url}: {source}")]
pub struct BrowserError {
	pub url: String,
	#[source]
	pub source: io::Error,
}

/// Opens a URL in a navigable view. Fire-and-forget: nothing is read back.
pub trait Browser: Send {
	fn open(&mut self, url: &str) -> Result<(), BrowserError>;
}

/// Opens URLs with the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
	fn open(&mut self, url: &str) -> Result<(), BrowserError> {
		tracing::info!(url, "opening in system browser");
		open::that_detached(url).map_err(|source| BrowserError {
			url: url.to_string(),
			source,
		})
	}
}

/// Records opened URLs instead of launching anything.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingBrowser {
	opened: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl RecordingBrowser {
	pub(crate) fn opened(&self) -> Vec<String> {
		self.opened.lock().map(|urls| urls.clone()).unwrap_or_default()
	}
}

#[cfg(test)]
impl Browser for RecordingBrowser {
	fn open(&mut self, url: &str) -> Result<(), BrowserError> {
		if let Ok(mut urls) = self.opened.lock() {
			urls.push(url.to_string());
		}
		Ok(())
	}
}
