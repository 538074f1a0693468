use std::sync::Arc;

use ratatui::widgets::ListState;
use throbber_widgets_tui::ThrobberState;

use super::components::SearchInput;
use super::style::Theme;
use crate::browser::{Browser, SystemBrowser};
use crate::pipeline::{Pipeline, Session, SingleSlotExecutor};
use crate::types::SearchResult;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
	#[default]
	Input,
	Results,
}

pub struct App<'a> {
	pub session: Session,
	pub search_input: SearchInput<'a>,
	pub list_state: ListState,
	pub focus: Focus,
	pub theme: Theme,
	/// Result shown in the detail overlay, if open.
	pub(crate) snippet: Option<SearchResult>,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) pipeline: Arc<Pipeline>,
	pub(crate) executor: SingleSlotExecutor,
	pub(crate) browser: Box<dyn Browser>,
}

impl<'a> App<'a> {
	pub fn new(pipeline: Arc<Pipeline>) -> Self {
		Self::with_browser(pipeline, Box::new(SystemBrowser))
	}

	pub fn with_browser(pipeline: Arc<Pipeline>, browser: Box<dyn Browser>) -> Self {
		Self {
			session: Session::new(),
			search_input: SearchInput::new(""),
			list_state: ListState::default(),
			focus: Focus::Input,
			theme: Theme::default(),
			snippet: None,
			throbber_state: ThrobberState::default(),
			pipeline,
			executor: SingleSlotExecutor::new(),
			browser,
		}
	}

	/// Index of the highlighted result, if it still exists.
	#[must_use]
	pub fn selected_index(&self) -> Option<usize> {
		self.list_state
			.selected()
			.filter(|index| *index < self.session.results().len())
	}

	#[must_use]
	pub fn selected_result(&self) -> Option<&SearchResult> {
		self.selected_index()
			.and_then(|index| self.session.results().get(index))
	}

	/// Keep the list selection inside the current result set.
	pub(crate) fn ensure_selection(&mut self) {
		let len = self.session.results().len();
		if len == 0 {
			self.list_state.select(None);
		} else if let Some(selected) = self.list_state.selected()
			&& selected >= len
		{
			self.list_state.select(Some(len - 1));
		}
	}

	#[must_use]
	pub fn snippet(&self) -> Option<&SearchResult> {
		self.snippet.as_ref()
	}
}
