use std::sync::Arc;

use anyhow::{Context, Result};
use brainlink::refine::{DisabledRefiner, OllamaRefiner, QueryRefiner};
use brainlink::search::{DEFAULT_ENDPOINT, DuckDuckGo};
use brainlink::{Pipeline, ResultSet, SearchUi, Submission, classify};

use crate::settings::{RefineSettings, ResolvedConfig, SearchSettings};

/// What a headless run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HeadlessOutcome {
	/// The input was an address; nothing was searched.
	Navigate { url: String },
	/// `refined` is the query that was actually searched.
	Results {
		query: String,
		refined: String,
		results: ResultSet,
	},
}

/// Coordinates building the pipeline and running it interactively or once.
pub(crate) struct SearchWorkflow {
	pipeline: Arc<Pipeline>,
	initial_query: String,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let ResolvedConfig {
			refine,
			search,
			initial_query,
		} = config;
		let pipeline = PipelineFactory::build(refine, search)?;
		Ok(Self {
			pipeline: Arc::new(pipeline),
			initial_query,
		})
	}

	/// Run the terminal UI until the user quits.
	pub(crate) fn run_interactive(self) -> Result<()> {
		SearchUi::new(self.pipeline)
			.with_initial_query(self.initial_query)
			.run()
	}

	/// Classify and, for searches, refine and retrieve once on this thread.
	pub(crate) fn run_headless(self) -> Result<HeadlessOutcome> {
		let submission = classify(&self.initial_query).context("nothing to search for")?;
		Ok(match submission {
			Submission::Navigate(url) => HeadlessOutcome::Navigate { url },
			Submission::Search(query) => {
				tracing::info!(query, "headless search");
				let (refined, results) = self.pipeline.run(&query);
				HeadlessOutcome::Results {
					query,
					refined,
					results,
				}
			}
		})
	}
}

/// Helper for translating resolved configuration into a [`Pipeline`].
struct PipelineFactory;

impl PipelineFactory {
	fn build(refine: RefineSettings, search: SearchSettings) -> Result<Pipeline> {
		let refiner = Self::refiner(refine);
		let provider = DuckDuckGo::new(DEFAULT_ENDPOINT, search.timeout, search.retries)
			.context("failed to set up the search provider")?;
		Ok(Pipeline::new(refiner, Arc::new(provider), search.options))
	}

	fn refiner(settings: RefineSettings) -> Arc<dyn QueryRefiner> {
		if settings.enabled {
			Arc::new(OllamaRefiner::new(
				settings.program,
				settings.model,
				settings.timeout,
			))
		} else {
			Arc::new(DisabledRefiner)
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use brainlink::search::SearchOptions;

	use super::*;

	fn config(query: &str) -> ResolvedConfig {
		ResolvedConfig {
			refine: RefineSettings {
				enabled: false,
				program: "ollama".into(),
				model: "llama4".into(),
				timeout: Duration::from_secs(15),
			},
			search: SearchSettings {
				options: SearchOptions::default(),
				timeout: Duration::from_secs(1),
				retries: 0,
			},
			initial_query: query.into(),
		}
	}

	#[test]
	fn headless_navigation_skips_search() {
		let outcome = SearchWorkflow::from_config(config("example.com"))
			.expect("workflow")
			.run_headless()
			.expect("runs");
		assert_eq!(
			outcome,
			HeadlessOutcome::Navigate {
				url: "http://example.com".into()
			}
		);
	}

	#[test]
	fn headless_rejects_blank_query() {
		let workflow = SearchWorkflow::from_config(config("  ")).expect("workflow");
		assert!(workflow.run_headless().is_err());
	}

	#[test]
	fn disabled_refinement_is_reported_to_the_pipeline() {
		let workflow = SearchWorkflow::from_config(config("cats")).expect("workflow");
		assert!(!workflow.pipeline.refines());
	}
}
