pub mod attacks;
pub mod board;
pub mod fen;
pub mod perft;
pub mod position;
pub mod setup;
pub mod square_set;
pub mod types;
pub mod utils;

pub use board::Board;
pub use position::{Context, Position, PositionError};
pub use setup::{Material, MaterialSide, Setup};
pub use square_set::SquareSet;
pub use types::{Color, Move, Outcome, Piece, Role, Rules, Square};

/// Builds the lazily initialized lookup tables up front.
pub fn init() {
    attacks::init_attack_tables();
}
