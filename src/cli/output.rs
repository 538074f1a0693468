use anyhow::Result;
use serde_json::json;

use crate::workflow::HeadlessOutcome;

/// Print a plain-text representation of a headless run.
pub(crate) fn print_plain(outcome: &HeadlessOutcome) {
	print!("{}", format_plain(outcome));
}

fn format_plain(outcome: &HeadlessOutcome) -> String {
	match outcome {
		HeadlessOutcome::Navigate { url } => format!("{url}\n"),
		HeadlessOutcome::Results {
			query,
			refined,
			results,
		} => {
			let mut text = String::new();
			if refined != query {
				text.push_str(&format!("Refined query: {refined}\n"));
			}
			if results.is_empty() {
				text.push_str(&format!("No results for \"{refined}\".\n"));
			}
			for (position, result) in results.iter().enumerate() {
				text.push_str(&result.list_line(position));
				text.push('\n');
				if result.has_link() {
					text.push_str(&format!("   {}\n", result.href));
				}
			}
			text
		}
	}
}

/// Format a headless run as a JSON string.
pub(crate) fn format_outcome_json(outcome: &HeadlessOutcome) -> Result<String> {
	let payload = match outcome {
		HeadlessOutcome::Navigate { url } => json!({
			"type": "navigate",
			"url": url,
		}),
		HeadlessOutcome::Results {
			query,
			refined,
			results,
		} => json!({
			"type": "search",
			"query": query,
			"refined_query": refined,
			"results": results,
		}),
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of a headless run.
pub(crate) fn print_json(outcome: &HeadlessOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
