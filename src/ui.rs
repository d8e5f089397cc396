//! `ratatui` front-end: sentence bar, board grid, core-words dock and the add-tile form.

use crate::app::{App, Move, Selection, DOCK_COLUMNS, FORM_FIELDS, GRID_COLUMNS};
use crate::board::Tile;
use crate::terminal_restore::TerminalRestoreGuard;
use anyhow::Result;
use crossterm::event;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TILE_HEIGHT: u16 = 3;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

const ACCENT: Color = Color::Rgb(110, 170, 255);
const DIM_BORDER: Color = Color::Rgb(70, 90, 130);
const TEXT: Color = Color::Rgb(225, 230, 240);
const STATUS_TEXT: Color = Color::Rgb(150, 160, 180);
const SELECTED: Color = Color::Rgb(255, 220, 100);
const BOARD_TILE: Color = Color::Rgb(40, 70, 110);
const DEFAULT_TILE: Color = Color::Rgb(21, 32, 67);

/// Configure the terminal, run the drawing loop, and tear everything down.
pub fn run_app(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    let terminal_guard = TerminalRestoreGuard::enter(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app_loop(&mut terminal, app);

    drop(terminal);
    terminal_guard.restore();

    result
}

fn app_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw(frame, app))?;

    loop {
        let mut should_draw = app.take_redraw_request();
        let mut should_quit = false;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    should_quit = handle_key_event(app, key)?;
                    should_draw = true;
                }
                Event::Mouse(mouse) => {
                    let area = terminal.size()?;
                    should_draw = handle_mouse_event(app, mouse, area) || should_draw;
                }
                Event::Resize(_, _) => should_draw = true,
                _ => {}
            }
        }

        if should_draw {
            terminal.draw(|frame| draw(frame, app))?;
        }

        if should_quit {
            break;
        }
    }
    Ok(())
}

/// Interpret keystrokes. Returns `true` when the app should quit.
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }
    debug!(code = ?key.code, modifiers = ?key.modifiers, "key event");

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    if app.form().is_some() {
        handle_form_key(app, key);
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Left => app.move_selection(Move::Left),
        KeyCode::Right => app.move_selection(Move::Right),
        KeyCode::Up => app.move_selection(Move::Up),
        KeyCode::Down => app.move_selection(Move::Down),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),
        KeyCode::Backspace => app.delete_last_word(),
        KeyCode::Esc | KeyCode::Char('b') => app.go_back(),
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Char('s') => app.speak_sentence(),
        KeyCode::Char('c') => app.clear_sentence(),
        KeyCode::Char('a') => app.open_form(),
        _ => {}
    }
    Ok(false)
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form_mut() {
                form.move_down();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form_mut() {
                form.move_up();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(form) = app.form_mut() {
                form.push_char(ch);
            }
        }
        _ => {}
    }
}

/// Activate the tile under a left click. Returns whether anything was hit.
fn handle_mouse_event(app: &mut App, mouse: MouseEvent, area: Rect) -> bool {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || app.form().is_some() {
        return false;
    }
    match tile_at(app, area, mouse.column, mouse.row) {
        Some(selection) => {
            app.select(selection);
            app.activate_selected();
            true
        }
        None => false,
    }
}

struct Regions {
    sentence: Rect,
    header: Rect,
    grid: Rect,
    dock: Rect,
    status: Rect,
}

fn regions(area: Rect, dock_len: usize) -> Regions {
    let dock_rows = dock_len.div_ceil(DOCK_COLUMNS) as u16;
    let dock_height = if dock_len == 0 {
        0
    } else {
        dock_rows * TILE_HEIGHT + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(TILE_HEIGHT),
            Constraint::Length(dock_height),
            Constraint::Length(1),
        ])
        .split(area);
    Regions {
        sentence: chunks[0],
        header: chunks[1],
        grid: chunks[2],
        dock: chunks[3],
        status: chunks[4],
    }
}

fn dock_inner(dock: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(dock)
}

/// Tile index and cell for `count` tiles laid out `columns` wide. Cells that do not fit are dropped.
fn cell_rects(area: Rect, count: usize, columns: usize) -> Vec<(usize, Rect)> {
    if area.width == 0 || columns == 0 {
        return Vec::new();
    }
    let columns_u16 = columns as u16;
    let cell_width = (area.width / columns_u16).max(1);
    (0..count)
        .map_while(|index| {
            let row = u16::try_from(index / columns).ok()?;
            let y = area.y.checked_add(row.checked_mul(TILE_HEIGHT)?)?;
            if y.saturating_add(TILE_HEIGHT) > area.bottom() {
                return None;
            }
            Some((index, y))
        })
        .filter_map(|(index, y)| {
            let column = (index % columns) as u16;
            let x = area.x.saturating_add(column.saturating_mul(cell_width));
            if x >= area.right() {
                return None;
            }
            let room = area.right() - x;
            let width = if column + 1 == columns_u16 {
                room
            } else {
                cell_width.min(room)
            };
            Some((index, Rect::new(x, y, width, TILE_HEIGHT)))
        })
        .collect()
}

fn hit(cells: &[(usize, Rect)], column: u16, row: u16) -> Option<usize> {
    cells
        .iter()
        .find(|(_, rect)| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        })
        .map(|(index, _)| *index)
}

/// Which tile sits at a screen position for the current layout.
fn tile_at(app: &App, area: Rect, column: u16, row: u16) -> Option<Selection> {
    let session = app.session();
    let regions = regions(area, session.core_tiles().len());
    let grid = cell_rects(regions.grid, session.visible_tiles().len(), GRID_COLUMNS);
    if let Some(index) = hit(&grid, column, row) {
        return Some(Selection::Grid(index));
    }
    let dock = cell_rects(
        dock_inner(regions.dock),
        session.core_tiles().len(),
        DOCK_COLUMNS,
    );
    hit(&dock, column, row).map(Selection::Dock)
}

/// Clip `text` to `max_width` display columns, adding an ellipsis when cut.
fn fit_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width + 1 > max_width {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}

fn tile_color(tile: &Tile) -> Color {
    if let Some(color) = tile.color.as_deref().and_then(|raw| raw.parse::<Color>().ok()) {
        return color;
    }
    if tile.target_board().is_some() {
        BOARD_TILE
    } else {
        DEFAULT_TILE
    }
}

fn render_tile(frame: &mut Frame<'_>, tile: &Tile, rect: Rect, selected: bool) {
    let mut text = match tile.icon.as_deref() {
        Some(icon) => format!("{icon} {}", tile.label),
        None => tile.label.clone(),
    };
    if tile.target_board().is_some() {
        text.push_str(" ›");
    }
    let inner_width = rect.width.saturating_sub(2) as usize;
    let border = if selected { SELECTED } else { DIM_BORDER };
    let mut style = Style::default().fg(TEXT).bg(tile_color(tile));
    if selected {
        style = style.add_modifier(Modifier::BOLD);
    }
    let widget = Paragraph::new(fit_width(&text, inner_width))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(if selected {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(Style::default().fg(border)),
        )
        .style(style);
    frame.render_widget(widget, rect);
}

/// Render the whole board screen, plus the form overlay when open.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let session = app.session();
    let regions = regions(frame.size(), session.core_tiles().len());

    let sentence = session.sentence();
    let sentence_text = if sentence.is_empty() {
        Span::styled("Tap tiles to build a sentence", Style::default().fg(STATUS_TEXT))
    } else {
        Span::styled(sentence, Style::default().fg(TEXT).add_modifier(Modifier::BOLD))
    };
    let sentence_block = Paragraph::new(Line::from(sentence_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT))
            .title(Span::styled(
                " Vocaboard ",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(sentence_block, regions.sentence);

    let board = session.current_board();
    let mut header = vec![Span::styled(
        board.title.clone(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if session.can_go_back() {
        header.push(Span::styled("  (Esc back, h home)", Style::default().fg(STATUS_TEXT)));
    }
    let selected_tile = app.selected_tile();
    let hint = selected_tile.as_ref().and_then(|tile| tile.hint.as_deref());
    let mut header_lines = vec![Line::from(header)];
    if let Some(hint) = hint {
        header_lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(STATUS_TEXT),
        )));
    }
    frame.render_widget(Paragraph::new(header_lines), regions.header);

    let tiles = session.visible_tiles();
    let selection = app.selection();
    for (index, rect) in cell_rects(regions.grid, tiles.len(), GRID_COLUMNS) {
        render_tile(frame, tiles[index], rect, selection == Selection::Grid(index));
    }

    let core = session.core_tiles();
    if !core.is_empty() {
        let dock_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(DIM_BORDER))
            .title(Span::styled(" Core words ", Style::default().fg(STATUS_TEXT)));
        frame.render_widget(dock_block, regions.dock);
        for (index, rect) in cell_rects(dock_inner(regions.dock), core.len(), DOCK_COLUMNS) {
            render_tile(frame, &core[index], rect, selection == Selection::Dock(index));
        }
    }

    let status = Line::from(vec![
        Span::styled(app.status_text().to_string(), Style::default().fg(STATUS_TEXT)),
        Span::styled(
            "  |  Enter speak  s sentence  ⌫ delete  c clear  a add  q quit",
            Style::default().fg(DIM_BORDER),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), regions.status);

    if app.form().is_some() {
        draw_form(frame, app);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_form(frame: &mut Frame<'_>, app: &App) {
    let Some(form) = app.form() else {
        return;
    };
    let area = centered(frame.size(), 56, FORM_FIELDS.len() as u16 + 4);
    let value_width = area.width.saturating_sub(14) as usize;

    let mut lines: Vec<Line> = FORM_FIELDS
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let selected = index == form.selected;
            let marker = if selected { "▸" } else { " " };
            let value = form.value(*field);
            let value_span = if value.is_empty() {
                Span::styled(field.placeholder(), Style::default().fg(DIM_BORDER))
            } else {
                Span::styled(fit_width(value, value_width), Style::default().fg(TEXT))
            };
            let label_style = if selected {
                Style::default().fg(SELECTED).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(STATUS_TEXT)
            };
            Line::from(vec![
                Span::styled(format!("{marker} {:<7}", field.title()), label_style),
                value_span,
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab move  Enter save  Esc cancel",
        Style::default().fg(STATUS_TEXT),
    )));

    let title = format!(" Add tile to {} ", app.session().current_board().title);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT))
            .title(Span::styled(
                title,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FormField;
    use crate::board::{BuiltinCatalog, HOME_ID};
    use crate::session::BoardSession;
    use crate::speech::MemorySpeaker;
    use crate::store::{CustomTiles, MemoryStore};
    use ratatui::backend::TestBackend;

    fn test_app() -> App {
        App::new(BoardSession::new(
            BuiltinCatalog::Classic.build(),
            CustomTiles::load(Box::new(MemoryStore::new())),
            Box::new(MemorySpeaker::new()),
        ))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::empty())).expect("key event")
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn quit_keys() {
        let mut app = test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        )
        .expect("key event"));
    }

    #[test]
    fn enter_speaks_and_backspace_deletes() {
        let mut app = test_app();
        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.session().words(), ["I"]);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session().sentence(), "I my");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session().sentence(), "I");
        press(&mut app, KeyCode::Char('c'));
        assert!(app.session().words().is_empty());
    }

    #[test]
    fn navigation_keys_move_between_boards() {
        let mut app = test_app();
        let needs = app
            .session()
            .visible_tiles()
            .iter()
            .position(|tile| tile.label == "Needs")
            .expect("needs tile");
        app.select(Selection::Grid(needs));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().current_board().id, "needs");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session().current_board().id, HOME_ID);
        app.select(Selection::Grid(needs));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.session().navigator().history(), [HOME_ID]);
    }

    #[test]
    fn form_captures_letters_that_are_shortcuts_elsewhere() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        for ch in "qhsb".chars() {
            assert!(!press(&mut app, KeyCode::Char(ch)));
        }
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('x'));
        let form = app.form().expect("form open");
        assert_eq!(form.value(FormField::Label), "qhsb");
        assert_eq!(form.value(FormField::Speak), "x");
        press(&mut app, KeyCode::Enter);
        assert!(app.form().is_none());
        assert_eq!(app.session().custom_tiles().len(), 1);
    }

    #[test]
    fn esc_in_form_cancels_without_going_back() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Esc);
        assert!(app.form().is_none());
        assert_eq!(app.session().current_board().id, HOME_ID);
    }

    #[test]
    fn draw_shows_board_sentence_and_dock() {
        let mut app = test_app();
        let screen = render(&app, 120, 30);
        assert!(screen.contains("Vocaboard"));
        assert!(screen.contains("Home"));
        assert!(screen.contains("Needs"));
        assert!(screen.contains("Core words"));
        assert!(screen.contains("Tap tiles to build a sentence"));

        press(&mut app, KeyCode::Enter);
        let screen = render(&app, 120, 30);
        assert!(!screen.contains("Tap tiles to build a sentence"));
    }

    #[test]
    fn draw_form_overlay() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        let screen = render(&app, 100, 30);
        assert!(screen.contains("Add tile to Home"));
        assert!(screen.contains("Label"));
        assert!(screen.contains("Esc cancel"));
    }

    #[test]
    fn draw_survives_tiny_terminal() {
        let app = test_app();
        let _ = render(&app, 10, 4);
    }

    #[test]
    fn left_click_activates_tile_under_cursor() {
        let mut app = test_app();
        let area = Rect::new(0, 0, 120, 30);
        let regions = regions(area, app.session().core_tiles().len());
        let cells = cell_rects(regions.grid, app.session().visible_tiles().len(), GRID_COLUMNS);
        let (_, target) = cells[1];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.x + 1,
            row: target.y + 1,
            modifiers: KeyModifiers::empty(),
        };
        assert!(handle_mouse_event(&mut app, click, area));
        assert_eq!(app.session().words(), ["my"]);
        assert_eq!(app.selection(), Selection::Grid(1));

        let miss = MouseEvent {
            column: 0,
            row: 0,
            ..click
        };
        assert!(!handle_mouse_event(&mut app, miss, area));
    }

    #[test]
    fn fit_width_adds_ellipsis() {
        assert_eq!(fit_width("hello", 10), "hello");
        assert_eq!(fit_width("hello world", 6), "hello…");
    }
}
