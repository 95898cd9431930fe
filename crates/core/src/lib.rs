//! Blockfall engine core.
//!
//! The board/shape collision model and the game state machine: spawn
//! validity, rotation legality, landing detection, locking, row clearing
//! and game-over detection. Concurrency lives in `blockfall-flow`;
//! rendering in `blockfall-term`.

pub mod board;
pub mod error;
pub mod game;
pub mod game_board;
pub mod rng;
pub mod shape;
pub mod tetromino;

pub use board::Board;
pub use error::ConfigError;
pub use game::Game;
pub use game_board::GameBoard;
pub use rng::SimpleRng;
pub use shape::Shape;
pub use tetromino::{shape_for, standard_catalog};
