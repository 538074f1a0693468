use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::ui::style::Theme;

/// Argument bundle for the status line.
pub struct StatusContext<'a> {
	pub text: &'a str,
	pub busy: bool,
	pub throbber_state: &'a ThrobberState,
	pub theme: &'a Theme,
}

/// Render the one-line status bar, with a spinner while a search runs.
pub fn render_status(frame: &mut Frame, area: Rect, context: StatusContext<'_>) {
	let StatusContext {
		text,
		busy,
		throbber_state,
		theme,
	} = context;

	let mut line = Line::default().style(theme.status);
	if busy {
		let spinner = Throbber::default()
			.style(theme.status)
			.throbber_style(theme.status);
		line.spans.push(spinner.to_symbol_span(throbber_state));
	} else {
		line.spans.push(Span::raw(" "));
	}
	line.spans.push(Span::styled(text.to_string(), theme.status));

	frame.render_widget(Paragraph::new(line).style(theme.status), area);
}
