//! Query refinement through a locally running language model.
//!
//! The model is driven through its command-line client (`ollama run <model>
//! <prompt>`). Every failure mode is reported as a [`RefineError`]; callers
//! that only want a usable query go through [`refine_or_original`], which
//! falls back to the input unchanged.

mod process;
mod sanitize;

use std::io;
use std::process::{Command, ExitStatus};
use std::time::Duration;

use thiserror::Error;

pub use sanitize::{prompt_for, sanitize_output};

pub const DEFAULT_PROGRAM: &str = "ollama";
pub const DEFAULT_MODEL: &str = "llama4";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum RefineError {
	#[error("failed to start `{program}`: {source}")]
	Spawn {
		program: String,
		#[source]
		source: io::Error,
	},
	#[error("refinement process exited with {0}")]
	Exit(ExitStatus),
	#[error("refinement process did not finish within {0:?}")]
	Timeout(Duration),
	#[error("failed to read refinement output: {0}")]
	Io(#[from] io::Error),
	#[error("refinement produced no usable output")]
	Empty,
	#[error("refinement candidate rejected: {0:?}")]
	Rejected(String),
}

/// Something that can rewrite a query before it is searched.
pub trait QueryRefiner: Send + Sync {
	fn refine(&self, query: &str) -> Result<String, RefineError>;

	/// Whether refinement is attempted at all. Disabled refiners skip the
	/// "Refining" status entirely.
	fn enabled(&self) -> bool {
		true
	}
}

/// Refiner that shells out to the `ollama` client.
#[derive(Debug, Clone)]
pub struct OllamaRefiner {
	program: String,
	model: String,
	timeout: Duration,
}

impl Default for OllamaRefiner {
	fn default() -> Self {
		Self::new(DEFAULT_PROGRAM, DEFAULT_MODEL, DEFAULT_TIMEOUT)
	}
}

impl OllamaRefiner {
	#[must_use]
	pub fn new(program: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
		Self {
			program: program.into(),
			model: model.into(),
			timeout,
		}
	}

	fn command(&self, prompt: &str) -> Command {
		let mut command = Command::new(&self.program);
		command.arg("run").arg(&self.model).arg(prompt);
		command
	}
}

impl QueryRefiner for OllamaRefiner {
	fn refine(&self, query: &str) -> Result<String, RefineError> {
		let prompt = prompt_for(query);
		let output = process::run_captured(self.command(&prompt), self.timeout)?;
		if !output.status.success() {
			return Err(RefineError::Exit(output.status));
		}
		sanitize_output(&output.stdout, &prompt)
	}
}

/// Refiner used when refinement is switched off; returns queries untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRefiner;

impl QueryRefiner for DisabledRefiner {
	fn refine(&self, query: &str) -> Result<String, RefineError> {
		Ok(query.to_string())
	}

	fn enabled(&self) -> bool {
		false
	}
}

/// Refine `query`, returning it unchanged on any failure.
pub fn refine_or_original(refiner: &dyn QueryRefiner, query: &str) -> String {
	match refiner.refine(query) {
		Ok(refined) => refined,
		Err(err) => {
			tracing::debug!(%err, query, "refinement unavailable, using original query");
			query.to_string()
		}
	}
}

/// Refine `query` with `model_id` through the default `ollama` client.
pub fn refine(query: &str, model_id: &str, timeout: Duration) -> String {
	let refiner = OllamaRefiner::new(DEFAULT_PROGRAM, model_id, timeout);
	refine_or_original(&refiner, query)
}
