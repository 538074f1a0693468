use super::RefineError;

const PROMPT_PREFIX: &str = "Reword this for a web search (concise): ";
const MIN_CANDIDATE_CHARS: usize = 3;
const MAX_CANDIDATE_CHARS: usize = 400;

/// Prompt text sent to the model for `query`.
#[must_use]
pub fn prompt_for(query: &str) -> String {
	format!("{PROMPT_PREFIX}{query}")
}

/// Pick the replacement query out of raw model output.
///
/// The last non-blank line wins; it must be 3..=400 characters long and must
/// not merely echo the prompt.
pub fn sanitize_output(output: &str, prompt: &str) -> Result<String, RefineError> {
	let candidate = output
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.last()
		.ok_or(RefineError::Empty)?;

	if accepts_candidate(candidate, prompt) {
		Ok(candidate.to_string())
	} else {
		Err(RefineError::Rejected(candidate.to_string()))
	}
}

fn accepts_candidate(candidate: &str, prompt: &str) -> bool {
	let length = candidate.chars().count();
	(MIN_CANDIDATE_CHARS..=MAX_CANDIDATE_CHARS).contains(&length)
		&& candidate.to_lowercase() != prompt.to_lowercase()
}
