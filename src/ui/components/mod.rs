//! UI building blocks shared across rendering and state modules.

/// Query input line.
pub mod input;
/// Results list rendering.
pub mod results;
/// Result detail overlay.
pub mod snippet;
/// Status bar with progress spinner.
pub mod status;

pub use input::SearchInput;
pub use results::{ResultsContext, render_results};
pub use snippet::render_snippet;
pub use status::{StatusContext, render_status};
