mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use brainlink::app_dirs;
use brainlink::logging::{self, LogTarget};
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	init_logging(&cli);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	if cli.headless {
		run_headless(cli.output, resolved)
	} else {
		SearchWorkflow::from_config(resolved)?.run_interactive()
	}
}

/// Logging problems are reported but never stop the program.
fn init_logging(cli: &CliArgs) {
	let target = if cli.headless {
		Ok(LogTarget::Stderr)
	} else {
		app_dirs::get_log_file().map(LogTarget::File)
	};
	if let Err(err) = target.and_then(logging::initialize) {
		eprintln!("brainlink: logging disabled: {err:#}");
	}
}

/// Run one search without the terminal UI and print it in the chosen format.
fn run_headless(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let workflow = SearchWorkflow::from_config(settings)?;
	let outcome = workflow.run_headless()?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
