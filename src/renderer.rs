use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, Palette, Theme};
use crate::game::GameState;
use crate::grid::{Grid, Position};
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from an immutable snapshot.
pub fn render(
    frame: &mut Frame<'_>,
    state: &GameState,
    grid: Grid,
    palette: &Palette,
    theme: &Theme,
) {
    let (hud_area, board_area) = layout(frame.area(), grid);
    render_hud(frame, hud_area, state, theme);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, grid, state.food, theme);
    render_snake(frame, inner, grid, state, palette.tint_for_score(state.score).into());

    if state.is_over {
        render_game_over_menu(frame, board_area, state.score, state.end_reason, theme);
    }
}

/// Splits the screen into a HUD row and a bordered board centered below it.
fn layout(area: Rect, grid: Grid) -> (Rect, Rect) {
    let board_width = (grid.size().saturating_mul(CELL_WIDTH))
        .saturating_add(2)
        .min(area.width);
    let board_height = grid.size().saturating_add(2).min(area.height.saturating_sub(1));
    let total_height = board_height.saturating_add(1);

    let x = area.x + (area.width - board_width) / 2;
    let y = area.y + area.height.saturating_sub(total_height) / 2;

    let hud = Rect::new(x, y, board_width, 1_u16.min(area.height));
    let board = Rect::new(x, y.saturating_add(1), board_width, board_height);
    (hud, board)
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, grid: Grid, food: Position, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, grid, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, grid: Grid, state: &GameState, tint: Color) {
    let buffer = frame.buffer_mut();

    for (index, segment) in state.snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new().fg(tint).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(tint));
        }
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, position: Position) -> Option<(u16, u16)> {
    if !grid.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.saturating_mul(CELL_WIDTH);
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
