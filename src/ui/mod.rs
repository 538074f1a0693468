//! Interactive terminal UI for `brainlink`.
//!
//! The [`builder`] module exposes the public-facing [`SearchUi`] builder. The
//! remaining submodules implement the event loop, rendering, key handling and
//! the widgets/style definitions that make up the terminal application.

mod actions;
mod builder;
pub mod components;
mod render;
mod runtime;
mod search;
mod state;
pub mod style;


pub use builder::SearchUi;
pub use runtime::run;
pub use state::{App, Focus};
pub use style::Theme;
