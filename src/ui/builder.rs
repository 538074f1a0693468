use std::sync::Arc;

use anyhow::Result;

use super::App;
use crate::browser::{Browser, SystemBrowser};
use crate::pipeline::Pipeline;

/// A small builder for configuring the interactive search UI before running it.
pub struct SearchUi {
	pipeline: Arc<Pipeline>,
	initial_query: Option<String>,
	browser: Option<Box<dyn Browser>>,
}

impl SearchUi {
	pub fn new(pipeline: Arc<Pipeline>) -> Self {
		Self {
			pipeline,
			initial_query: None,
			browser: None,
		}
	}

	/// Pre-fill the input line. A non-empty query is submitted on start-up.
	pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
		self.initial_query = Some(query.into());
		self
	}

	pub fn with_browser(mut self, browser: Box<dyn Browser>) -> Self {
		self.browser = Some(browser);
		self
	}

	/// Assemble the [`App`] without starting the terminal.
	pub fn build<'a>(self) -> App<'a> {
		let browser = self
			.browser
			.unwrap_or_else(|| Box::new(SystemBrowser));
		let mut app = App::with_browser(self.pipeline, browser);
		if let Some(query) = self.initial_query {
			app.search_input.set_text(query);
		}
		app
	}

	/// Run the interactive UI until the user quits.
	pub fn run(self) -> Result<()> {
		let mut app = self.build();
		app.run()
	}
}
