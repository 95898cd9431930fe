//! Game module - spawn policy, line-clear bookkeeping and game-over
//! detection on top of the GameBoard.

use blockfall_types::Coords;

use crate::error::ConfigError;
use crate::game_board::GameBoard;
use crate::rng::SimpleRng;
use crate::shape::Shape;

#[derive(Debug)]
pub struct Game {
    game_board: GameBoard,
    catalog: Vec<Shape>,
    rng: SimpleRng,
    /// One-ahead lookahead; refilled on every spawn.
    next_shape: Option<Shape>,
    game_over: bool,
}

impl Game {
    /// Create a game over the given board with a non-empty template
    /// catalog. The seed fixes the spawn sequence.
    pub fn new(game_board: GameBoard, catalog: Vec<Shape>, seed: u32) -> Result<Self, ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        Ok(Self {
            game_board,
            catalog,
            rng: SimpleRng::new(seed),
            next_shape: None,
            game_over: false,
        })
    }

    pub fn game_board(&self) -> &GameBoard {
        &self.game_board
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The shape that will spawn after the current one locks.
    pub fn next_shape(&self) -> Option<&Shape> {
        self.next_shape.as_ref()
    }

    /// Reset to a fresh session: empty board, cleared flag, first spawn.
    pub fn new_game(&mut self) {
        self.game_board.clear();
        self.game_over = false;
        self.next_shape = None;
        self.spawn_shape();
    }

    /// One gravity step.
    ///
    /// A landed shape is locked and filled rows are removed; if the top
    /// visible row is then occupied the game ends (no spawn, returns 0),
    /// otherwise the next shape spawns and the clear count is returned.
    /// A shape still falling moves down one row. Returns 0 once the game
    /// is over.
    pub fn advance(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        if self.game_board.has_landed() {
            self.game_board.lock();
            let removed = self.game_board.remove_filled_rows();

            if self.top_row_occupied() {
                self.game_over = true;
                return 0;
            }

            self.spawn_shape();
            removed
        } else {
            self.game_board.move_down();
            0
        }
    }

    /// Advance until the current shape lands, then once more to lock it.
    /// Returns the final advance's clear count.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        while self.game_board.current_shape().is_some()
            && !self.game_board.has_landed()
            && !self.game_over
        {
            self.advance();
        }
        self.advance()
    }

    pub fn rotate_left(&mut self) {
        self.game_board.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.game_board.rotate_right();
    }

    pub fn move_left(&mut self) {
        self.game_board.move_left();
    }

    pub fn move_right(&mut self) {
        self.game_board.move_right();
    }

    /// Install the lookahead shape (drawing one when absent) as the current
    /// shape, anchored so its lowest occupied row sits at the top of the
    /// hidden buffer. A spawn that lands on occupied cells ends the game.
    fn spawn_shape(&mut self) {
        let shape = match self.next_shape.take() {
            Some(shape) => shape,
            None => self.choose_shape(),
        };
        self.next_shape = Some(self.choose_shape());

        let lowest = shape
            .block_positions()
            .iter()
            .map(|pos| pos.vertical)
            .max()
            .unwrap_or(-1);
        let vertical = -self.game_board.hidden_rows().min(lowest);

        self.game_board.set_current_shape(Some(shape));
        self.game_board.set_position(Coords::new(vertical, 0));

        if !self.game_board.is_at_valid_pos() {
            self.game_over = true;
        }
    }

    /// Uniform template choice with 0-3 uniform pre-rotations.
    fn choose_shape(&mut self) -> Shape {
        let index = self.rng.next_range(self.catalog.len() as u32) as usize;
        let mut shape = self.catalog[index].clone();

        let turns = self.rng.next_range(4);
        for _ in 0..turns {
            shape.rotate_right();
        }
        shape
    }

    fn top_row_occupied(&self) -> bool {
        let board = self.game_board.board();
        (0..board.width()).any(|h| board.get(0, h).is_some())
    }
}
