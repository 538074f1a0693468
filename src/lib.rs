//! Core crate exports for building and running the `brainlink` search assistant.
//!
//! The root module re-exports the pipeline and UI entry points so that
//! embedders can wire a refiner, a provider and a browser together without
//! digging through the module hierarchy.

pub mod app_dirs;
pub mod browser;
pub mod logging;
pub mod pipeline;
pub mod query;
pub mod refine;
pub mod search;
pub mod types;
pub mod ui;

pub use browser::{Browser, BrowserError, SystemBrowser};
pub use pipeline::{Phase, Pipeline, PipelineEvent, Session, SingleSlotExecutor};
pub use query::{InputError, Submission, classify};
pub use refine::{DisabledRefiner, OllamaRefiner, QueryRefiner, RefineError, refine};
pub use search::{DuckDuckGo, SearchError, SearchOptions, SearchProvider, search};
pub use types::{ResultSet, SearchResult};
pub use ui::{App, SearchUi, Theme, run};
