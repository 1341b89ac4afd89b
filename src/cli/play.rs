//! Play command implementation - interactive TUI.

use super::input::{direction_for_key, direction_for_swipe};
use super::output::status_label;
use super::{init_logging, resolve_data_dir, resolve_seed, CliError, LOG_FILE};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use twenty48::game::SIZE;
use twenty48::persist::FileStore;
use twenty48::{Board, Direction, GameStatus, Session};

/// Width of one tile, borders included.
const CELL_WIDTH: u16 = 8;
/// Height of one tile, borders included.
const CELL_HEIGHT: u16 = 3;
/// Tiles per side as a layout length.
#[allow(clippy::cast_possible_truncation)]
const SIDE: u16 = SIZE as u16;
/// Board widget size, outer border included.
const BOARD_WIDTH: u16 = CELL_WIDTH * SIDE + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * SIDE + 2;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the data directory or the terminal cannot be set up.
pub(crate) fn execute(
    data_dir: Option<PathBuf>,
    seed: Option<u64>,
    no_save: bool,
) -> Result<(), CliError> {
    let dir = resolve_data_dir(data_dir)?;
    init_logging(Some(&dir.join(LOG_FILE)));

    let seed = resolve_seed(seed);
    let rng = ChaCha8Rng::seed_from_u64(seed);
    info!("Starting play session, seed {seed}");

    let session = if no_save {
        Session::ephemeral(rng)
    } else {
        Session::open(rng, FileStore::open(&dir)?)
    };

    run_tui(App::new(session))
}

/// App state for the TUI.
struct App {
    session: Session<ChaCha8Rng, FileStore>,
    drag_start: Option<(u16, u16)>,
    last_gain: Option<u32>,
}

impl App {
    fn new(session: Session<ChaCha8Rng, FileStore>) -> Self {
        Self {
            session,
            drag_start: None,
            last_gain: None,
        }
    }

    fn apply(&mut self, direction: Direction) {
        // Input is ignored once the game is over, until restart
        if self.session.game().is_over() {
            return;
        }
        let outcome = self.session.apply(direction);
        if outcome.moved {
            self.last_gain = Some(outcome.score_gained);
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.last_gain = None;
        self.drag_start = None;
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some((x, y)) = self.drag_start.take() {
                    let dx = i32::from(mouse.column) - i32::from(x);
                    let dy = i32::from(mouse.row) - i32::from(y);
                    if let Some(direction) = direction_for_swipe(dx, dy) {
                        self.apply(direction);
                    }
                }
            }
            _ => {}
        }
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut out = stdout();
    let setup = execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .and_then(|()| Terminal::new(CrosstermBackend::new(out)));

    let result = match setup {
        Ok(mut terminal) => {
            let result = event_loop(&mut terminal, &mut app);
            // The cursor is hidden while drawing
            result.and(terminal.show_cursor().map_err(CliError::from))
        }
        Err(e) => Err(e.into()),
    };

    // Restore terminal, every step even if an earlier one failed
    let restored = restore_terminal();
    result.and(restored)
}

/// Leave raw mode and the alternate screen, reporting the first failure.
fn restore_terminal() -> Result<(), CliError> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    let screen = execute!(out, DisableMouseCapture, LeaveAlternateScreen);
    raw.and(screen).map_err(CliError::from)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('r' | 'R') => app.restart(),
                code => {
                    if let Some(direction) = direction_for_key(code) {
                        app.apply(direction);
                    }
                }
            },
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.session.snapshot();

    let chunks = Layout::vertical([
        Constraint::Length(3),         // Header
        Constraint::Min(BOARD_HEIGHT), // Board
        Constraint::Length(3),         // Footer
    ])
    .split(f.area());

    render_header(f, chunks[0], app);

    let board_area = centered(chunks[1], BOARD_WIDTH, BOARD_HEIGHT);
    render_board(f, board_area, &snapshot.board);

    if snapshot.status == GameStatus::Over {
        render_game_over(f, board_area, snapshot.score);
    }

    render_footer(f, chunks[2], snapshot.status);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.session.snapshot();

    let gain = match app.last_gain {
        Some(gain) if gain > 0 => format!(" (+{gain})"),
        _ => String::new(),
    };

    let title = format!(
        " 2048 | Score: {}{gain} | Best: {} | {} ",
        snapshot.score,
        snapshot.best_score,
        status_label(snapshot.status).to_uppercase()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, board: &Board) {
    let outer = Block::default().borders(Borders::ALL);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::vertical([Constraint::Length(CELL_HEIGHT); SIZE]).split(inner);

    for (row_area, values) in rows.iter().zip(board.rows()) {
        let cells = Layout::horizontal([Constraint::Length(CELL_WIDTH); SIZE]).split(*row_area);
        for (cell_area, &value) in cells.iter().zip(values) {
            render_tile(f, *cell_area, value);
        }
    }
}

fn render_tile(f: &mut Frame, area: Rect, value: u32) {
    let color = tile_color(value);
    let text = if value == 0 {
        String::new()
    } else {
        value.to_string()
    };

    let tile = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    f.render_widget(tile, area);
}

fn tile_color(value: u32) -> Color {
    match value {
        0 => Color::DarkGray,
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::Yellow,
        16 => Color::LightRed,
        32 => Color::Red,
        64 => Color::LightMagenta,
        128 => Color::Magenta,
        256 => Color::LightBlue,
        512 => Color::Blue,
        1024 => Color::LightCyan,
        2048 => Color::Cyan,
        _ => Color::LightGreen,
    }
}

fn render_game_over(f: &mut Frame, board_area: Rect, score: u32) {
    let area = centered(board_area, BOARD_WIDTH - 4, 5);
    let message = Paragraph::new(format!("Game Over!\nScore: {score}\n[r] to restart"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(message, area);
}

fn render_footer(f: &mut Frame, area: Rect, status: GameStatus) {
    let controls = match status {
        GameStatus::Over => " [q] Quit  [r] Restart ",
        GameStatus::InProgress => " [q] Quit  [←↑↓→/wasd] Move  [drag] Swipe  [r] Restart ",
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

/// A `width` × `height` rectangle centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered(area, BOARD_WIDTH, BOARD_HEIGHT);
        assert_eq!(rect, Rect::new(23, 5, BOARD_WIDTH, BOARD_HEIGHT));
    }

    #[test]
    fn test_centered_clips_to_small_area() {
        let area = Rect::new(2, 3, 10, 4);
        let rect = centered(area, BOARD_WIDTH, BOARD_HEIGHT);
        assert_eq!(rect, area);
    }

    #[test]
    fn test_restore_without_setup_is_harmless() {
        // Runs after a failed setup, when raw mode may never have been entered
        assert!(restore_terminal().is_ok());
        assert!(restore_terminal().is_ok());
    }

    #[test]
    fn test_tile_colors_distinguish_small_tiles() {
        assert_ne!(tile_color(2), tile_color(4));
        assert_eq!(tile_color(4096), tile_color(8192));
    }
}
