use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_textarea::{CursorMove, TextArea};

const PLACEHOLDER: &str = "Search the web or enter an address";

/// Single-line query editor.
pub struct SearchInput<'a> {
	textarea: TextArea<'a>,
}

impl<'a> SearchInput<'a> {
	#[must_use]
	pub fn new(initial: impl Into<String>) -> Self {
		let mut textarea = TextArea::new(vec![initial.into()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.set_placeholder_text(PLACEHOLDER);
		textarea.move_cursor(CursorMove::End);
		Self { textarea }
	}

	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Replace the contents, leaving the cursor at the end.
	pub fn set_text(&mut self, text: impl Into<String>) {
		*self = Self::new(text);
	}

	/// Feed a key to the editor. Keys that would add a line are swallowed.
	/// Returns whether the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let newline = key.code == KeyCode::Enter
			|| (key.modifiers.contains(KeyModifiers::CONTROL)
				&& matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
		if newline {
			return false;
		}
		self.textarea.input(key)
	}

	pub fn render(&mut self, frame: &mut Frame, area: Rect, block: Block<'a>) {
		self.textarea.set_block(block);
		frame.render_widget(&self.textarea, area);
	}
}
