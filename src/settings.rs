use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use brainlink::app_dirs;
use brainlink::refine::{DEFAULT_MODEL, DEFAULT_PROGRAM, DEFAULT_TIMEOUT as DEFAULT_REFINE_TIMEOUT};
use brainlink::search::{
	DEFAULT_REGION, DEFAULT_RETRIES, DEFAULT_SEARCH_TIMEOUT, SafeSearch, SearchOptions, TimeLimit,
};
use brainlink::types::DEFAULT_MAX_RESULTS;

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	refine: RefineSection,
	search: SearchSection,
	ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RefineSection {
	enabled: Option<bool>,
	program: Option<String>,
	model: Option<String>,
	timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	region: Option<String>,
	safe_search: Option<String>,
	time_limit: Option<String>,
	max_results: Option<usize>,
	timeout_secs: Option<u64>,
	retries: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	initial_query: Option<String>,
}

/// How queries are rewritten before searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineSettings {
	pub enabled: bool,
	pub program: String,
	pub model: String,
	pub timeout: Duration,
}

/// Provider connection settings plus the per-search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
	pub options: SearchOptions,
	pub timeout: Duration,
	pub retries: u32,
}

pub struct ResolvedConfig {
	pub refine: RefineSettings,
	pub search: SearchSettings,
	pub initial_query: String,
}

impl ResolvedConfig {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Refinement: {}", bool_to_word(self.refine.enabled));
		if self.refine.enabled {
			println!("  Refine program: {}", self.refine.program);
			println!("  Refine model: {}", self.refine.model);
			println!("  Refine timeout: {}s", self.refine.timeout.as_secs());
		}
		println!("  Region: {}", self.search.options.region);
		println!("  Safe search: {}", self.search.options.safe_search);
		println!("  Time limit: {}", self.search.options.time_limit);
		println!("  Max results: {}", self.search.options.max_results);
		println!("  Search timeout: {}s", self.search.timeout.as_secs());
		println!("  Search retries: {}", self.search.retries);
		if !self.initial_query.is_empty() {
			println!("  Initial query: {}", self.initial_query);
		}
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("brainlink")
			.prefix_separator("__")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".brainlink.toml"));
		files.push(current_dir.join("brainlink.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if cli.no_refine {
			self.refine.enabled = Some(false);
		}
		if let Some(program) = cli.ollama_program.clone() {
			self.refine.program = Some(program);
		}
		if let Some(model) = cli.model.clone() {
			self.refine.model = Some(model);
		}
		if let Some(secs) = cli.refine_timeout {
			self.refine.timeout_secs = Some(secs);
		}

		if let Some(region) = cli.region.clone() {
			self.search.region = Some(region);
		}
		if let Some(level) = cli.safe_search {
			self.search.safe_search = Some(level.as_str().to_string());
		}
		if let Some(limit) = cli.time_limit {
			self.search.time_limit = Some(limit.as_str().to_string());
		}
		if let Some(max) = cli.max_results {
			self.search.max_results = Some(max);
		}
		if let Some(secs) = cli.search_timeout {
			self.search.timeout_secs = Some(secs);
		}

		if let Some(query) = cli.query_text() {
			self.ui.initial_query = Some(query);
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let refine = RefineSettings {
			enabled: self.refine.enabled.unwrap_or(true),
			program: non_empty(self.refine.program, DEFAULT_PROGRAM, "refine.program")?,
			model: non_empty(self.refine.model, DEFAULT_MODEL, "refine.model")?,
			timeout: seconds(
				self.refine.timeout_secs,
				DEFAULT_REFINE_TIMEOUT,
				"refine.timeout_secs",
			)?,
		};

		let safe_search = match self.search.safe_search {
			Some(value) => value.parse::<SafeSearch>()?,
			None => SafeSearch::default(),
		};
		let time_limit = match self.search.time_limit {
			Some(value) => value.parse::<TimeLimit>()?,
			None => TimeLimit::default(),
		};
		let max_results = self.search.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
		ensure!(max_results >= 1, "search.max_results must be at least 1");

		let search = SearchSettings {
			options: SearchOptions {
				region: non_empty(self.search.region, DEFAULT_REGION, "search.region")?,
				safe_search,
				time_limit,
				max_results,
			},
			timeout: seconds(
				self.search.timeout_secs,
				DEFAULT_SEARCH_TIMEOUT,
				"search.timeout_secs",
			)?,
			retries: self.search.retries.unwrap_or(DEFAULT_RETRIES),
		};

		Ok(ResolvedConfig {
			refine,
			search,
			initial_query: self
				.ui
				.initial_query
				.map(|query| query.trim().to_string())
				.unwrap_or_default(),
		})
	}
}

fn non_empty(value: Option<String>, default: &str, key: &str) -> Result<String> {
	match value {
		None => Ok(default.to_string()),
		Some(value) => {
			let trimmed = value.trim();
			ensure!(!trimmed.is_empty(), "{key} must not be empty");
			Ok(trimmed.to_string())
		}
	}
}

fn seconds(value: Option<u64>, default: Duration, key: &str) -> Result<Duration> {
	match value {
		None => Ok(default),
		Some(secs) => {
			ensure!(secs >= 1, "{key} must be at least 1 second");
			Ok(Duration::from_secs(secs))
		}
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "enabled" } else { "disabled" }
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::{CommandFactory, FromArgMatches};
	use tempfile::tempdir;

	use super::*;

	fn cli(args: &[&str]) -> CliArgs {
		let mut argv = vec!["brainlink", "--no-config"];
		argv.extend_from_slice(args);
		let mut matches = CliArgs::command()
			.try_get_matches_from(argv)
			.expect("arguments parse");
		CliArgs::from_arg_matches_mut(&mut matches).expect("parses")
	}

	#[test]
	fn defaults_match_documented_values() {
		let resolved = load(&cli(&[])).expect("config loads");
		assert!(resolved.refine.enabled);
		assert_eq!(resolved.refine.program, "ollama");
		assert_eq!(resolved.refine.model, "llama4");
		assert_eq!(resolved.refine.timeout, Duration::from_secs(15));
		assert_eq!(resolved.search.options, SearchOptions::default());
		assert_eq!(resolved.search.options.max_results, 64);
		assert!(resolved.initial_query.is_empty());
	}

	#[test]
	fn config_file_values_are_applied() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("settings.toml");
		fs::write(
			&path,
			"[refine]\nmodel = \"mistral\"\ntimeout_secs = 5\n\n[search]\nsafe_search = \"moderate\"\ntime_limit = \"month\"\nmax_results = 10\n",
		)
		.expect("write config");

		let resolved = load(&cli(&["-c", path.to_str().expect("utf-8 path")])).expect("loads");
		assert_eq!(resolved.refine.model, "mistral");
		assert_eq!(resolved.refine.timeout, Duration::from_secs(5));
		assert_eq!(resolved.search.options.safe_search, SafeSearch::Moderate);
		assert_eq!(resolved.search.options.time_limit, TimeLimit::Month);
		assert_eq!(resolved.search.options.max_results, 10);
	}

	#[test]
	fn cli_flags_override_config_files() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("settings.toml");
		fs::write(&path, "[search]\nmax_results = 10\n[refine]\nenabled = true\n")
			.expect("write config");

		let resolved = load(&cli(&[
			"-c",
			path.to_str().expect("utf-8 path"),
			"-m",
			"3",
			"--no-refine",
			"cute",
			"cats",
		]))
		.expect("loads");
		assert_eq!(resolved.search.options.max_results, 3);
		assert!(!resolved.refine.enabled);
		assert_eq!(resolved.initial_query, "cute cats");
	}

	#[test]
	fn missing_explicit_config_file_is_an_error() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("absent.toml");
		assert!(load(&cli(&["-c", path.to_str().expect("utf-8 path")])).is_err());
	}

	#[test]
	fn zero_max_results_is_rejected() {
		let err = load(&cli(&["-m", "0"])).err().expect("rejected");
		assert!(err.to_string().contains("max_results"));
	}

	#[test]
	fn unknown_safe_search_level_is_rejected() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("settings.toml");
		fs::write(&path, "[search]\nsafe_search = \"extreme\"\n").expect("write config");
		assert!(load(&cli(&["-c", path.to_str().expect("utf-8 path")])).is_err());
	}

	#[test]
	fn blank_model_is_rejected() {
		let err = load(&cli(&["--model", " "])).err().expect("rejected");
		assert!(err.to_string().contains("refine.model"));
	}
}
