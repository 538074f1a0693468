use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

use super::App;
use super::components::{ResultsContext, StatusContext, render_results, render_snippet, render_status};
use super::state::Focus;

const INPUT_TITLE: &str = " BrainLink ";

impl<'a> App<'a> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});

		let [input_area, results_area, status_area] = Layout::vertical([
			Constraint::Length(3),
			Constraint::Min(1),
			Constraint::Length(1),
		])
		.areas(area);

		let input_block = Block::default()
			.borders(Borders::ALL)
			.border_style(self.theme.border_style(self.focus == Focus::Input))
			.title(Span::styled(INPUT_TITLE, self.theme.prompt));
		self.search_input.render(frame, input_area, input_block);

		render_results(
			frame,
			results_area,
			&mut self.list_state,
			ResultsContext {
				results: self.session.results(),
				focused: self.focus == Focus::Results,
				theme: &self.theme,
			},
		);

		render_status(
			frame,
			status_area,
			StatusContext {
				text: self.session.status(),
				busy: self.session.is_busy(),
				throbber_state: &self.throbber_state,
				theme: &self.theme,
			},
		);

		if let Some(result) = &self.snippet {
			render_snippet(frame, results_area, result, &self.theme);
		}
	}
}
