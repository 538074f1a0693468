use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph};

use crate::types::ResultSet;
use crate::ui::style::Theme;

const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Argument bundle for the results pane.
pub struct ResultsContext<'a> {
	pub results: &'a ResultSet,
	pub focused: bool,
	pub theme: &'a Theme,
}

/// Render one line per result, in result-set order.
pub fn render_results(
	frame: &mut Frame,
	area: Rect,
	list_state: &mut ListState,
	context: ResultsContext<'_>,
) {
	let ResultsContext {
		results,
		focused,
		theme,
	} = context;

	let block = Block::default()
		.borders(Borders::ALL)
		.border_style(theme.border_style(focused))
		.title(" Results ")
		.title_style(theme.header);

	if results.is_empty() {
		let inner = block.inner(area);
		frame.render_widget(block, area);
		if inner.height > 0 {
			let empty = Paragraph::new("No results")
				.alignment(Alignment::Center)
				.style(theme.empty);
			frame.render_widget(empty, inner);
		}
		return;
	}

	let items: Vec<ListItem<'_>> = results
		.iter()
		.enumerate()
		.map(|(position, result)| ListItem::new(result.list_line(position)))
		.collect();

	let list = List::new(items)
		.block(block)
		.highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL)
		.highlight_spacing(HighlightSpacing::WhenSelected);

	frame.render_stateful_widget(list, area, list_state);
}
