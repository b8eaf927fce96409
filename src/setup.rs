// Unvalidated position snapshots and material counting

use std::str::FromStr;

use crate::board::Board;
use crate::fen::{self, FenError};
use crate::types::{Color, Role};

/// A not necessarily legal position: the input to validation and the output
/// of `Position::to_setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Setup {
    pub board: Board,
    pub turn: Color,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Setup {
    pub const fn empty() -> Setup {
        Setup {
            board: Board::empty(),
            turn: Color::Red,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup {
            board: Board::new(),
            ..Setup::empty()
        }
    }
}

impl FromStr for Setup {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Setup, FenError> {
        fen::parse_fen(s)
    }
}

/// Piece counts of one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialSide {
    by_role: [u8; 7],
}

impl MaterialSide {
    pub fn from_board(board: &Board, color: Color) -> MaterialSide {
        let mut side = MaterialSide::default();
        for role in Role::ALL {
            side.by_role[role.index()] = board.pieces(color, role).count() as u8;
        }
        side
    }

    #[inline]
    pub fn count(&self, role: Role) -> usize {
        self.by_role[role.index()] as usize
    }

    pub fn total(&self) -> usize {
        self.by_role.iter().map(|&n| n as usize).sum()
    }

    pub fn has_pawns(&self) -> bool {
        self.count(Role::Pawn) > 0
    }

    pub fn has_non_pawns(&self) -> bool {
        Role::ALL[1..].iter().any(|&role| self.count(role) > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Piece counts of both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Material {
    pub red: MaterialSide,
    pub black: MaterialSide,
}

impl Material {
    pub fn from_board(board: &Board) -> Material {
        Material {
            red: MaterialSide::from_board(board, Color::Red),
            black: MaterialSide::from_board(board, Color::Black),
        }
    }

    pub fn by_color(&self, color: Color) -> &MaterialSide {
        match color {
            Color::Red => &self.red,
            Color::Black => &self.black,
        }
    }

    /// Pieces of `role` on both sides.
    pub fn count(&self, role: Role) -> usize {
        self.red.count(role) + self.black.count(role)
    }

    pub fn total(&self) -> usize {
        self.red.total() + self.black.total()
    }

    pub fn has_pawns(&self) -> bool {
        self.red.has_pawns() || self.black.has_pawns()
    }

    pub fn has_non_pawns(&self) -> bool {
        self.red.has_non_pawns() || self.black.has_non_pawns()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty() && self.black.is_empty()
    }
}
