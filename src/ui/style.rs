use ratatui::style::{Color, Modifier, Style};

/// Styles used by the terminal interface.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	pub header: Style,
	pub row_highlight: Style,
	pub prompt: Style,
	pub empty: Style,
	pub status: Style,
	pub border: Style,
	pub focused_border: Style,
}

pub const SLATE: Theme = Theme {
	header: Style::new()
		.fg(Color::Rgb(226, 232, 240))
		.bg(Color::Rgb(15, 23, 42)),
	row_highlight: Style::new()
		.bg(Color::Rgb(30, 41, 59))
		.fg(Color::Rgb(250, 204, 21)),
	prompt: Style::new().fg(Color::LightCyan),
	empty: Style::new().fg(Color::DarkGray),
	status: Style::new()
		.fg(Color::Rgb(226, 232, 240))
		.bg(Color::Rgb(30, 41, 59)),
	border: Style::new().fg(Color::DarkGray),
	focused_border: Style::new()
		.fg(Color::LightCyan)
		.add_modifier(Modifier::BOLD),
};

impl Default for Theme {
	fn default() -> Self {
		SLATE
	}
}

impl Theme {
	#[must_use]
	pub fn border_style(&self, focused: bool) -> Style {
		if focused {
			self.focused_border
		} else {
			self.border
		}
	}
}
