//! Types shared across the user interface and the search pipeline.

mod result;

pub use result::{DEFAULT_MAX_RESULTS, NO_LINK, NO_SNIPPET, NO_TITLE, ResultSet, SearchResult};
