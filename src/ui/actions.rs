use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::state::Focus;

const NO_SELECTION: &str = "No result selected.";
const NO_LINK: &str = "Result has no link.";

impl<'a> App<'a> {
	/// Dispatch a key press. Returns `true` when the application should exit.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

		if self.snippet.is_some() {
			match key.code {
				KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.snippet = None,
				KeyCode::Char('c') if ctrl => return true,
				_ => {}
			}
			return false;
		}

		if ctrl {
			match key.code {
				KeyCode::Char('c') => return true,
				KeyCode::Char('l') => self.clear_results(),
				KeyCode::Char('o') => self.open_selected(),
				KeyCode::Char('s') => self.show_snippet(),
				_ => {
					if self.focus == Focus::Input {
						self.search_input.input(key);
					}
				}
			}
			return false;
		}

		match key.code {
			KeyCode::Esc => return true,
			KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
			_ => match self.focus {
				Focus::Input => self.handle_input_key(key),
				Focus::Results => self.handle_results_key(key),
			},
		}
		false
	}

	fn handle_input_key(&mut self, key: KeyEvent) {
		match key.code {
			KeyCode::Enter => self.submit_query(),
			KeyCode::Down => self.focus_results(),
			_ => {
				self.search_input.input(key);
			}
		}
	}

	fn handle_results_key(&mut self, key: KeyEvent) {
		match key.code {
			KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
			KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
			KeyCode::Home => self.select_first(),
			KeyCode::End => self.select_last(),
			KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
			KeyCode::Char('s') => self.show_snippet(),
			KeyCode::Char('/') | KeyCode::Char('i') => self.focus = Focus::Input,
			_ => {}
		}
	}

	fn toggle_focus(&mut self) {
		match self.focus {
			Focus::Input => self.focus_results(),
			Focus::Results => self.focus = Focus::Input,
		}
	}

	fn focus_results(&mut self) {
		self.focus = Focus::Results;
		if self.list_state.selected().is_none() {
			self.select_first();
		}
	}

	/// Hand the highlighted result to the browser.
	pub(crate) fn open_selected(&mut self) {
		let Some(result) = self.selected_result() else {
			self.session.set_status(NO_SELECTION);
			return;
		};
		if !result.has_link() {
			self.session.set_status(NO_LINK);
			return;
		}
		let href = result.href.clone();
		self.open_url(&href);
	}

	/// Open the detail overlay for the highlighted result.
	pub(crate) fn show_snippet(&mut self) {
		match self.selected_result() {
			Some(result) => self.snippet = Some(result.clone()),
			None => self.session.set_status(NO_SELECTION),
		}
	}

	pub(crate) fn clear_results(&mut self) {
		self.session.clear();
		self.list_state.select(None);
		self.snippet = None;
	}

	fn select_first(&mut self) {
		if !self.session.results().is_empty() {
			self.list_state.select(Some(0));
		}
	}

	fn select_last(&mut self) {
		let len = self.session.results().len();
		if len > 0 {
			self.list_state.select(Some(len - 1));
		}
	}

	fn move_selection_up(&mut self) {
		match self.list_state.selected() {
			Some(selected) if selected > 0 => self.list_state.select(Some(selected - 1)),
			Some(_) => {}
			None => self.select_first(),
		}
	}

	fn move_selection_down(&mut self) {
		let len = self.session.results().len();
		match self.list_state.selected() {
			Some(selected) if selected + 1 < len => self.list_state.select(Some(selected + 1)),
			Some(_) => {}
			None => self.select_first(),
		}
	}
}
