//! Terminal blockfall runner (default binary).
//!
//! Gravity runs on the flow's ticker thread; this thread only blocks on
//! crossterm events and forwards them as input ids. Both threads repaint
//! through the shared screen via the flow's redraw hook.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing_subscriber::EnvFilter;

use blockfall::core::{standard_catalog, Board, Game, GameBoard};
use blockfall::flow::GameFlow;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer};
use blockfall::types::{
    InputId, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_HIDDEN_ROWS,
    DEFAULT_TICK_INTERVAL_MS,
};

const MOVE_LEFT: InputId = 1;
const MOVE_RIGHT: InputId = 2;
const MOVE_DOWN: InputId = 3;
const ROTATE_LEFT: InputId = 4;
const ROTATE_RIGHT: InputId = 5;
const DROP: InputId = 6;
const TOGGLE_PAUSED: InputId = 7;

struct Screen {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl Screen {
    fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
        }
    }

    fn draw(&mut self, game: &Game, paused: bool) {
        self.view.render_into(game, paused, &mut self.fb);
        let _ = self.renderer.draw(&self.fb);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn main() -> Result<()> {
    // Raw mode owns the main screen; keep diagnostics on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let game = build_game()?;
    let screen = Arc::new(Mutex::new(Screen::new()));
    lock(&screen).renderer.enter()?;

    let result = run(game, &screen);

    // Always try to restore terminal state.
    let _ = lock(&screen).renderer.exit();
    result
}

fn build_game() -> Result<Game> {
    let board = Board::new(DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH)?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos())
        .unwrap_or(0);
    let game = Game::new(
        GameBoard::new(board, DEFAULT_HIDDEN_ROWS),
        standard_catalog(),
        seed,
    )?;
    Ok(game)
}

fn run(game: Game, screen: &Arc<Mutex<Screen>>) -> Result<()> {
    // The flow is dropped before the caller restores the terminal, which
    // joins the ticker thread and ends redraws.
    let flow = Arc::new(GameFlow::new(game, DEFAULT_TICK_INTERVAL_MS));

    let hook_screen = Arc::clone(screen);
    let hook_flow = Arc::downgrade(&flow);
    flow.set_redraw(move |game| {
        let paused = hook_flow
            .upgrade()
            .map(|flow| flow.is_paused())
            .unwrap_or(false);
        lock(&hook_screen).draw(game, paused);
    });

    bind_inputs(&flow);
    flow.new_game();

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(key) {
                    return Ok(());
                }
                if key.code == KeyCode::Char('n') {
                    flow.new_game();
                    continue;
                }
                if let Some(id) = input_for(key.code) {
                    flow.process_input(id);
                }
            }
            Event::Resize(_, _) => {
                let paused = flow.is_paused();
                flow.with_game(|game| lock(screen).draw(game, paused));
            }
            _ => {}
        }
    }
}

fn bind_inputs(flow: &GameFlow) {
    flow.bind_input(MOVE_LEFT, "move_left");
    flow.bind_input(MOVE_RIGHT, "move_right");
    flow.bind_input(MOVE_DOWN, "move_down");
    flow.bind_input(ROTATE_LEFT, "rotate_left");
    flow.bind_input(ROTATE_RIGHT, "rotate_right");
    flow.bind_input(DROP, "drop");
    flow.bind_input(TOGGLE_PAUSED, "toggle_paused");
}

fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn input_for(code: KeyCode) -> Option<InputId> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(MOVE_LEFT),
        KeyCode::Right | KeyCode::Char('d') => Some(MOVE_RIGHT),
        KeyCode::Down | KeyCode::Char('s') => Some(MOVE_DOWN),
        KeyCode::Char('z') => Some(ROTATE_LEFT),
        KeyCode::Up | KeyCode::Char('x') => Some(ROTATE_RIGHT),
        KeyCode::Char(' ') => Some(DROP),
        KeyCode::Char('p') => Some(TOGGLE_PAUSED),
        _ => None,
    }
}
