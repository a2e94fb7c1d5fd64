use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

/// Renders the single status row: score on the left, length and pace on the right.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let pace = format!("Length: {}  Tick: {}ms", state.snake.len(), state.interval_ms);
    let pace_width = u16::try_from(pace.len()).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(pace_width)]).areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state.score, theme)).alignment(Alignment::Left),
        left,
    );

    frame.render_widget(
        Paragraph::new(Line::from(pace))
            .alignment(Alignment::Right)
            .style(Style::new().fg(theme.hud_muted)),
        right,
    );
}

fn score_line(score: u32, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(
            score.to_string(),
            Style::new()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
