//! The refine-then-search pipeline and the machinery that runs it off the UI
//! thread.
//!
//! [`Pipeline`] performs the two external calls in order. A
//! [`SingleSlotExecutor`] runs one pipeline job at a time on a worker thread
//! and reports progress as [`PipelineEvent`]s, which the UI applies to its
//! [`Session`] on its own thread.

mod executor;
mod session;

use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::refine::{QueryRefiner, refine_or_original};
use crate::search::{SearchOptions, SearchProvider, search};
use crate::types::ResultSet;

pub use executor::{ExecutorError, SingleSlotExecutor};
pub use session::{Phase, Session};

/// Identifies one submission so stale events can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(u64);

/// Progress reported by a pipeline job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
	/// Refinement finished; `refined` equals `original` when it fell back.
	Refined {
		job: JobId,
		original: String,
		refined: String,
	},
	/// Retrieval finished for `query`.
	Completed {
		job: JobId,
		query: String,
		results: ResultSet,
	},
	/// The job is over and the executor slot is free.
	Finished { job: JobId },
}

impl PipelineEvent {
	#[must_use]
	pub fn job(&self) -> JobId {
		match self {
			PipelineEvent::Refined { job, .. }
			| PipelineEvent::Completed { job, .. }
			| PipelineEvent::Finished { job } => *job,
		}
	}
}

/// Refinement followed by retrieval.
#[derive(Clone)]
pub struct Pipeline {
	refiner: Arc<dyn QueryRefiner>,
	provider: Arc<dyn SearchProvider>,
	options: SearchOptions,
}

impl Pipeline {
	pub fn new(
		refiner: Arc<dyn QueryRefiner>,
		provider: Arc<dyn SearchProvider>,
		options: SearchOptions,
	) -> Self {
		Self {
			refiner,
			provider,
			options,
		}
	}

	#[must_use]
	pub fn refines(&self) -> bool {
		self.refiner.enabled()
	}

	/// Refine `query`, falling back to it unchanged.
	pub fn refine(&self, query: &str) -> String {
		refine_or_original(self.refiner.as_ref(), query)
	}

	/// Search for `query`; provider failures yield an empty set.
	pub fn retrieve(&self, query: &str) -> ResultSet {
		search(self.provider.as_ref(), &self.options.request(query))
	}

	/// Run both stages synchronously, returning the query used and its results.
	pub fn run(&self, query: &str) -> (String, ResultSet) {
		let refined = self.refine(query);
		let results = self.retrieve(&refined);
		(refined, results)
	}

	/// Body of a background job: reports each stage as it completes.
	pub fn run_job(&self, job: JobId, query: String, events: &Sender<PipelineEvent>) {
		tracing::info!(query, "search submitted");
		let refined = self.refine(&query);
		let _ = events.send(PipelineEvent::Refined {
			job,
			original: query,
			refined: refined.clone(),
		});

		let results = self.retrieve(&refined);
		tracing::info!(query = %refined, count = results.len(), "search completed");
		let _ = events.send(PipelineEvent::Completed {
			job,
			query: refined,
			results,
		});
	}
}


#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::mpsc;

	use super::testing::{FixedRefiner, StubProvider, pipeline, unavailable_refiner};
	use super::*;

	#[test]
	fn unavailable_refiner_searches_original_query() {
		let provider = Arc::new(StubProvider::with_titles(&["a", "b"]));
		let pipeline = pipeline(unavailable_refiner(), provider.clone());
		let (used, results) = pipeline.run("cats");
		assert_eq!(used, "cats");
		assert_eq!(results.len(), 2);
		assert_eq!(
			provider.last_query.lock().unwrap().as_deref(),
			Some("cats")
		);
	}

	#[test]
	fn refined_query_is_what_gets_searched() {
		let provider = Arc::new(StubProvider::with_titles(&["a"]));
		let pipeline = pipeline(Arc::new(FixedRefiner("cat pictures")), provider.clone());
		let (used, _) = pipeline.run("cats");
		assert_eq!(used, "cat pictures");
		assert_eq!(
			provider.last_query.lock().unwrap().as_deref(),
			Some("cat pictures")
		);
	}

	#[test]
	fn job_reports_refinement_before_completion() {
		let pipeline = pipeline(
			Arc::new(FixedRefiner("better")),
			Arc::new(StubProvider::with_titles(&["x"])),
		);
		let (tx, rx) = mpsc::channel();
		pipeline.run_job(JobId(7), "orig".into(), &tx);

		assert_eq!(
			rx.recv().unwrap(),
			PipelineEvent::Refined {
				job: JobId(7),
				original: "orig".into(),
				refined: "better".into(),
			}
		);
		match rx.recv().unwrap() {
			PipelineEvent::Completed { job, query, results } => {
				assert_eq!(job, JobId(7));
				assert_eq!(query, "better");
				assert_eq!(results.len(), 1);
			}
			other => panic!("unexpected event {other:?}"),
		}
	}

	#[test]
	fn provider_failure_completes_with_empty_results() {
		let pipeline = pipeline(unavailable_refiner(), Arc::new(StubProvider::failing()));
		let (_, results) = pipeline.run("cats");
		assert!(results.is_empty());
	}
}
