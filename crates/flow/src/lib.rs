//! Blockfall control layer.
//!
//! Runs the engine in real time: a `Ticker` drives gravity from a worker
//! thread while `GameFlow` serializes that worker and any number of input
//! threads over one game, behind a rebindable command table.

pub mod game_flow;
pub mod ticker;

pub use game_flow::{CommandAction, GameFlow, RedrawHook};
pub use ticker::{TickAction, Ticker};
