//! GameFlow module - thread-safe command dispatch over a running game.
//!
//! Wraps a `Game` with a gravity ticker, a table of named commands and a
//! rebindable input-id -> command-name table. The ticker's worker and any
//! number of caller threads serialize game mutation through one mutex.
//!
//! Lock order is fixed: input bindings, then command table, then game.
//! No two of the three are ever held together; dispatch clones what it
//! needs out of each table and releases it before touching the next, so a
//! command action runs with no table lock held and acquires only the game
//! lock itself. Never call `pause`/`resume` while holding the game lock:
//! stopping the ticker joins a worker that may be waiting on it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info};

use blockfall_core::Game;
use blockfall_types::InputId;

use crate::ticker::Ticker;

/// A zero-argument command body.
pub type CommandAction = Arc<dyn Fn() + Send + Sync>;

/// Collaborator-supplied redraw notification, invoked after each
/// state-changing action. The hook runs under the game lock and must not
/// call back into the flow.
pub type RedrawHook = Arc<dyn Fn(&Game) + Send + Sync>;

struct Command {
    name: String,
    action: CommandAction,
}

struct FlowState {
    game: Mutex<Game>,
    commands: Mutex<Vec<Command>>,
    bindings: Mutex<HashMap<InputId, String>>,
    redraw: Mutex<Option<RedrawHook>>,
    ticker: Ticker,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FlowState {
    fn is_paused(&self) -> bool {
        !self.ticker.is_running()
    }

    fn is_game_over(&self) -> bool {
        lock(&self.game).is_game_over()
    }

    fn pause(&self) {
        self.ticker.stop();
    }

    fn resume(&self) {
        if !self.is_game_over() {
            self.ticker.start();
        }
    }

    /// Run a game mutation behind the paused and game-over guards, then
    /// notify the redraw hook. A game found (or left) over triggers the
    /// over-handler instead of further mutation.
    fn guarded(&self, op: impl FnOnce(&mut Game)) {
        if !self.is_paused() {
            let over = {
                let mut game = lock(&self.game);
                if game.is_game_over() {
                    true
                } else {
                    op(&mut game);
                    game.is_game_over()
                }
            };
            if over {
                self.on_game_over();
            }
        }
        self.draw();
    }

    fn on_advance(&self) {
        self.guarded(|game| {
            game.advance();
        });
    }

    fn on_game_over(&self) {
        info!("game over, pausing the ticker");
        self.pause();
    }

    fn draw(&self) {
        let hook = lock(&self.redraw).clone();
        if let Some(hook) = hook {
            let game = lock(&self.game);
            hook(&game);
        }
    }
}

/// The concurrent control layer around one game instance.
pub struct GameFlow {
    state: Arc<FlowState>,
}

impl GameFlow {
    /// Wrap a game and start ticking immediately. The default command set
    /// (advance, move_down, move_left, move_right, rotate_left,
    /// rotate_right, drop, pause, resume, toggle_paused) is installed.
    pub fn new(game: Game, interval_ms: u64) -> Self {
        let state = Arc::new_cyclic(|weak: &Weak<FlowState>| {
            let tick = weak.clone();
            FlowState {
                game: Mutex::new(game),
                commands: Mutex::new(Vec::new()),
                bindings: Mutex::new(HashMap::new()),
                redraw: Mutex::new(None),
                ticker: Ticker::new(
                    move || {
                        if let Some(state) = tick.upgrade() {
                            state.on_advance();
                        }
                    },
                    interval_ms,
                ),
            }
        });

        let flow = Self { state };
        flow.install_default_commands();
        flow
    }

    fn install_default_commands(&self) {
        self.default_command("advance", FlowState::on_advance);
        self.default_command("move_down", FlowState::on_advance);
        self.default_command("move_left", |s| s.guarded(Game::move_left));
        self.default_command("move_right", |s| s.guarded(Game::move_right));
        self.default_command("rotate_left", |s| s.guarded(Game::rotate_left));
        self.default_command("rotate_right", |s| s.guarded(Game::rotate_right));
        self.default_command("drop", |s| {
            s.guarded(|game| {
                game.hard_drop();
            })
        });
        self.default_command("pause", FlowState::pause);
        self.default_command("resume", FlowState::resume);
        self.default_command("toggle_paused", |s| {
            if s.is_paused() {
                s.resume();
            } else {
                s.pause();
            }
        });
    }

    fn default_command(&self, name: &str, body: fn(&FlowState)) {
        let weak = Arc::downgrade(&self.state);
        self.make_new_command(name, move || {
            if let Some(state) = weak.upgrade() {
                body(&state);
            }
        });
    }

    /// Register a command under a new name. Fails (without mutation) when
    /// the name is already taken.
    pub fn make_new_command(&self, name: &str, action: impl Fn() + Send + Sync + 'static) -> bool {
        let mut commands = lock(&self.state.commands);
        if commands.iter().any(|cmd| cmd.name == name) {
            return false;
        }
        debug!(name, "registering command");
        commands.push(Command {
            name: name.to_owned(),
            action: Arc::new(action),
        });
        true
    }

    /// Replace the action of an existing command. Fails when absent.
    pub fn rebind_command(&self, name: &str, action: impl Fn() + Send + Sync + 'static) -> bool {
        let mut commands = lock(&self.state.commands);
        match commands.iter_mut().find(|cmd| cmd.name == name) {
            Some(cmd) => {
                cmd.action = Arc::new(action);
                true
            }
            None => false,
        }
    }

    /// Remove a command. Fails when absent.
    pub fn remove_command(&self, name: &str) -> bool {
        let mut commands = lock(&self.state.commands);
        match commands.iter().position(|cmd| cmd.name == name) {
            Some(index) => {
                commands.remove(index);
                true
            }
            None => false,
        }
    }

    /// Bind an input id to a registered command. Fails when the command
    /// does not exist. An input already bound is re-bound; a command
    /// already bound to another input loses that binding first.
    pub fn bind_input(&self, id: InputId, command_name: &str) -> bool {
        let known = lock(&self.state.commands)
            .iter()
            .any(|cmd| cmd.name == command_name);
        if !known {
            return false;
        }

        let mut bindings = lock(&self.state.bindings);
        bindings.retain(|_, bound| bound != command_name);
        bindings.insert(id, command_name.to_owned());
        true
    }

    /// Remove an input binding, reporting whether one existed.
    pub fn unbind_input(&self, id: InputId) -> bool {
        lock(&self.state.bindings).remove(&id).is_some()
    }

    /// Look up and invoke the command bound to this input id, if any.
    /// Each table is snapshotted and released before the next is touched.
    pub fn process_input(&self, id: InputId) {
        let name = match lock(&self.state.bindings).get(&id) {
            Some(name) => name.clone(),
            None => return,
        };

        let action = lock(&self.state.commands)
            .iter()
            .find(|cmd| cmd.name == name)
            .map(|cmd| Arc::clone(&cmd.action));

        if let Some(action) = action {
            action();
        }
    }

    /// Pause, reset the wrapped game and resume.
    pub fn new_game(&self) {
        self.state.pause();
        lock(&self.state.game).new_game();
        self.state.resume();
    }

    /// Pause and swap in another game. The controller stays paused; call
    /// `resume` (or `new_game`) to continue.
    pub fn set_game(&self, game: Game) {
        info!("swapping the controlled game");
        self.state.pause();
        *lock(&self.state.game) = game;
    }

    /// Read access to the wrapped game under its lock.
    pub fn with_game<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&lock(&self.state.game))
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Idempotent; only prevents future ticks, an in-flight action
    /// completes first.
    pub fn pause(&self) {
        debug!("pause requested");
        self.state.pause();
    }

    /// Idempotent; a no-op while the wrapped game is over.
    pub fn resume(&self) {
        debug!("resume requested");
        self.state.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn interval_ms(&self) -> u64 {
        self.state.ticker.interval_ms()
    }

    pub fn set_interval_ms(&self, interval_ms: u64) {
        self.state.ticker.set_interval_ms(interval_ms);
    }

    /// Install the redraw notification hook.
    pub fn set_redraw(&self, hook: impl Fn(&Game) + Send + Sync + 'static) {
        *lock(&self.state.redraw) = Some(Arc::new(hook));
    }
}
