use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{OutputFormat, SafeSearchArg, TimeLimitArg};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `brainlink` binary.
#[derive(Parser, Debug)]
#[command(
	name = "brainlink",
	version,
	long_version = long_version(),
	about = "Web search assistant with local query refinement",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "BRAINLINK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		long,
		value_name = "MODEL",
		help = "Model used to refine queries (default: llama4)"
	)]
	pub(crate) model: Option<String>,
	#[arg(
		long = "ollama-program",
		value_name = "PROGRAM",
		help = "Inference client to run for refinement (default: ollama)"
	)]
	pub(crate) ollama_program: Option<String>,
	#[arg(
		long = "refine-timeout",
		value_name = "SECS",
		help = "Seconds to wait for a refined query (default: 15)"
	)]
	pub(crate) refine_timeout: Option<u64>,
	#[arg(
		long = "no-refine",
		help = "Search the query exactly as typed (default: disabled)"
	)]
	pub(crate) no_refine: bool,
	#[arg(
		long,
		value_name = "REGION",
		help = "Search region code (default: wt-wt)"
	)]
	pub(crate) region: Option<String>,
	#[arg(
		long = "safe-search",
		value_enum,
		help = "Safe-search level (default: off)"
	)]
	pub(crate) safe_search: Option<SafeSearchArg>,
	#[arg(
		long = "time-limit",
		value_enum,
		help = "Only return results this recent (default: year)"
	)]
	pub(crate) time_limit: Option<TimeLimitArg>,
	#[arg(
		short = 'm',
		long = "max-results",
		value_name = "NUM",
		help = "Maximum number of results to show (default: 64)"
	)]
	pub(crate) max_results: Option<usize>,
	#[arg(
		long = "search-timeout",
		value_name = "SECS",
		help = "Seconds to wait for the search provider (default: 20)"
	)]
	pub(crate) search_timeout: Option<u64>,
	#[arg(
		long,
		requires = "query",
		help = "Run one search without the terminal UI and print the results (default: disabled)"
	)]
	pub(crate) headless: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how headless results are printed"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		value_name = "QUERY",
		num_args = 0..,
		help = "Query to submit on start-up (default: empty)"
	)]
	pub(crate) query: Vec<String>,
}

impl CliArgs {
	/// Positional words joined into a single query, if any were given.
	pub(crate) fn query_text(&self) -> Option<String> {
		if self.query.is_empty() {
			None
		} else {
			Some(self.query.join(" "))
		}
	}
}
