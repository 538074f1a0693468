use clap::ValueEnum;

/// Safe-search levels accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SafeSearchArg {
	Off,
	Moderate,
	Strict,
}

impl SafeSearchArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			SafeSearchArg::Off => "off",
			SafeSearchArg::Moderate => "moderate",
			SafeSearchArg::Strict => "strict",
		}
	}
}

/// Recency windows accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum TimeLimitArg {
	Day,
	Week,
	Month,
	Year,
	Any,
}

impl TimeLimitArg {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			TimeLimitArg::Day => "day",
			TimeLimitArg::Week => "week",
			TimeLimitArg::Month => "month",
			TimeLimitArg::Year => "year",
			TimeLimitArg::Any => "any",
		}
	}
}

/// Output formats supported in headless mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
