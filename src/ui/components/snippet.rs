use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::types::SearchResult;
use crate::ui::style::Theme;

const TITLE_WIDTH: usize = 40;

/// Read-only detail view for a single result, drawn over the results pane.
pub fn render_snippet(frame: &mut Frame, area: Rect, result: &SearchResult, theme: &Theme) {
	let popup = centered(area, 80, 60);
	let title = truncate_to_width(&result.title, TITLE_WIDTH);
	let block = Block::default()
		.borders(Borders::ALL)
		.border_style(theme.focused_border)
		.title(format!(" Snippet - {title} "))
		.title_style(theme.header)
		.title_bottom(" Esc to close ");

	let body = Paragraph::new(result.detail_text())
		.block(block)
		.wrap(Wrap { trim: false });

	frame.render_widget(Clear, popup);
	frame.render_widget(body, popup);
}

/// Longest prefix of `text` that fits in `max_width` terminal columns.
fn truncate_to_width(text: &str, max_width: usize) -> &str {
	let mut width = 0;
	for (index, ch) in text.char_indices() {
		width += ch.width().unwrap_or(0);
		if width > max_width {
			return &text[..index];
		}
	}
	text
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
	let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
		.flex(Flex::Center)
		.areas(area);
	let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
		.flex(Flex::Center)
		.areas(row);
	cell
}
