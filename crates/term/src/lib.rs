//! Terminal front end for blockfall.
//!
//! A small game-oriented rendering layer: `GameView` maps engine state
//! into a styled `FrameBuffer`, `TerminalRenderer` flushes that buffer to
//! the terminal. The view stays pure so layout is unit-testable.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::GameView;
pub use renderer::{encode_frame_into, TerminalRenderer};
