use std::sync::Arc;
use std::sync::mpsc::TryRecvError;

use super::App;
use super::state::Focus;
use crate::pipeline::{ExecutorError, PipelineEvent};
use crate::query::{Submission, classify};

impl<'a> App<'a> {
	/// Handle the search trigger for whatever is in the input line.
	pub(crate) fn submit_query(&mut self) {
		if self.session.is_busy() {
			self.session.set_status(ExecutorError::Busy.to_string());
			return;
		}

		match classify(self.search_input.text()) {
			Err(err) => self.session.set_status(err.to_string()),
			Ok(Submission::Navigate(url)) => self.open_url(&url),
			Ok(Submission::Search(query)) => self.issue_search(query),
		}
	}

	/// Drain pipeline events waiting on the executor channel.
	pub(crate) fn pump_pipeline_events(&mut self) {
		loop {
			match self.executor.try_recv() {
				Ok(event) => self.handle_pipeline_event(event),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => break,
			}
		}
	}

	fn handle_pipeline_event(&mut self, event: PipelineEvent) {
		let replaces_results = matches!(event, PipelineEvent::Completed { .. });
		if !self.session.apply(event) {
			return;
		}
		if replaces_results {
			self.snippet = None;
			self.list_state.select(None);
			self.ensure_selection();
		}
	}

	fn issue_search(&mut self, query: String) {
		let pipeline = Arc::clone(&self.pipeline);
		let submitted = self
			.executor
			.try_submit(move |job, events| pipeline.run_job(job, query, events));
		match submitted {
			Ok(job) => {
				self.session.begin(job, self.pipeline.refines());
				self.focus = Focus::Input;
			}
			Err(err) => {
				tracing::warn!(%err, "search submission refused");
				self.session.set_status(err.to_string());
			}
		}
	}

	pub(crate) fn open_url(&mut self, url: &str) {
		self.session.set_status(format!("Opening {url}..."));
		if let Err(err) = self.browser.open(url) {
			tracing::warn!(%err, "browser hand-off failed");
			self.session.set_status(format!("Could not open {url}."));
		}
	}
}
