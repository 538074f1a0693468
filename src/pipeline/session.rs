use super::{JobId, PipelineEvent};
use crate::types::ResultSet;

pub const INITIAL_STATUS: &str = "Type a query and hit Enter to search.";
const REFINING_STATUS: &str = "Refining query with local AI (if available)...";
const SEARCHING_STATUS: &str = "Searching...";
const CLEARED_STATUS: &str = "Results cleared.";
const INTERRUPTED_STATUS: &str = "Search stopped before returning results.";

/// Where the current submission is in the refine/search cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Idle,
	Refining,
	Searching,
	Displaying,
}

/// UI-owned state of a search session. Only mutated on the UI thread.
#[derive(Debug, Clone)]
pub struct Session {
	phase: Phase,
	results: ResultSet,
	status: String,
	active_job: Option<JobId>,
}

impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}

impl Session {
	#[must_use]
	pub fn new() -> Self {
		Self {
			phase: Phase::Idle,
			results: ResultSet::new(),
			status: INITIAL_STATUS.to_string(),
			active_job: None,
		}
	}

	#[must_use]
	pub fn phase(&self) -> Phase {
		self.phase
	}

	#[must_use]
	pub fn results(&self) -> &ResultSet {
		&self.results
	}

	#[must_use]
	pub fn status(&self) -> &str {
		&self.status
	}

	pub fn set_status(&mut self, status: impl Into<String>) {
		self.status = status.into();
	}

	/// The search trigger is disabled while a job is outstanding.
	#[must_use]
	pub fn is_busy(&self) -> bool {
		self.active_job.is_some()
	}

	/// Idle -> Refining (or straight to Searching when refinement is off).
	pub fn begin(&mut self, job: JobId, refining: bool) {
		self.active_job = Some(job);
		if refining {
			self.phase = Phase::Refining;
			self.set_status(REFINING_STATUS);
		} else {
			self.phase = Phase::Searching;
			self.set_status(SEARCHING_STATUS);
		}
	}

	/// Apply a worker event. Events for anything but the active job are
	/// dropped; returns whether the event was applied.
	pub fn apply(&mut self, event: PipelineEvent) -> bool {
		if self.active_job != Some(event.job()) {
			return false;
		}

		match event {
			PipelineEvent::Refined {
				original, refined, ..
			} => {
				self.phase = Phase::Searching;
				if refined != original {
					self.set_status(format!("Refined query: {refined}, searching..."));
				} else {
					self.set_status(SEARCHING_STATUS);
				}
			}
			PipelineEvent::Completed { query, results, .. } => {
				self.phase = Phase::Displaying;
				self.display(results, &query);
			}
			PipelineEvent::Finished { .. } => {
				if matches!(self.phase, Phase::Refining | Phase::Searching) {
					self.set_status(INTERRUPTED_STATUS);
				}
				self.phase = Phase::Idle;
				self.active_job = None;
			}
		}
		true
	}

	/// Drop all results.
	pub fn clear(&mut self) {
		self.results = ResultSet::new();
		self.set_status(CLEARED_STATUS);
	}

	fn display(&mut self, results: ResultSet, query: &str) {
		self.results = results;
		if self.results.is_empty() {
			self.set_status(format!("No results for \"{query}\"."));
		} else {
			self.set_status(format!(
				"Found {} results for \"{query}\". Press Enter to open.",
				self.results.len()
			));
		}
	}
}
