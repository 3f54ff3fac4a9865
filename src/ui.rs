use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, metrics::Metrics, session::Outcome};

pub const HELP_TEXT: &str = "ctrl+r to restart, ctrl+c to quit";

const HORIZONTAL_MARGIN: u16 = 1;
// two border rows plus one padding row above and below
const PROMPT_CHROME_LINES: u16 = 4;

pub fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Correct => Style::default().fg(Color::Green),
        Outcome::Incorrect => Style::default().fg(Color::Red),
    }
}

pub fn stats_line(m: &Metrics) -> String {
    format!(
        "Time: {:.0}s | WPM: {:.1} | Accuracy: {:.1}% | CPM: {:.1} | Mistakes: {}",
        m.elapsed_seconds, m.words_per_minute, m.accuracy_percent, m.characters_per_minute, m.mistakes
    )
}

/// The prompt with typed positions colored by outcome and the rest unstyled.
pub fn prompt_spans(app: &App) -> Vec<Span<'static>> {
    let session = &app.session;
    let prompt = session.prompt();
    let typed = session.typed();

    let mut spans = Vec::with_capacity(typed.len() + 1);
    let mut untyped_from = prompt.len();
    for (idx, c) in prompt.char_indices() {
        match typed.get(idx) {
            Some(input) => {
                let shown = match (input.outcome, c) {
                    // a missed space would otherwise be invisible
                    (Outcome::Incorrect, ' ') => "·".to_owned(),
                    _ => c.to_string(),
                };
                spans.push(Span::styled(shown, outcome_style(input.outcome)));
            }
            None => {
                untyped_from = idx;
                break;
            }
        }
    }
    if untyped_from < prompt.len() {
        spans.push(Span::raw(prompt[untyped_from..].to_string()));
    }
    spans
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        let inner_width = area
            .width
            .saturating_sub(HORIZONTAL_MARGIN * 2 + PROMPT_CHROME_LINES)
            .max(1);
        // never taller than the screen, so the u16 math cannot overflow
        let prompt_lines = (session.prompt().width() as f64 / inner_width as f64)
            .ceil()
            .min(area.height as f64) as u16;
        let prompt_height = prompt_lines.max(1).saturating_add(PROMPT_CHROME_LINES);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(1)
            .constraints([
                Constraint::Length(prompt_height),
                Constraint::Length(1), // padding
                Constraint::Length(1), // stats
                Constraint::Length(1), // padding
                Constraint::Length(1), // help
                Constraint::Min(0),
            ])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(format!(" {} ", session.state())).centered())
            .padding(Padding::uniform(1));

        Paragraph::new(Line::from(prompt_spans(self)))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(chunks[0], buf);

        Paragraph::new(stats_line(&session.metrics_snapshot()))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        Paragraph::new(HELP_TEXT)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
