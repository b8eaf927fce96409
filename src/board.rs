// Piece placement: one bitboard per role, one per color, plus occupancy.
// Every mutation goes through take/set so the three views never disagree.

use crate::attacks;
use crate::square_set::SquareSet;
use crate::types::{Color, Piece, Role, Square, NUM_SQUARES};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    occupied: SquareSet,
    // indexed by Color::index()
    by_color: [SquareSet; 2],
    // indexed by Role::index()
    by_role: [SquareSet; 7],
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            occupied: SquareSet::EMPTY,
            by_color: [SquareSet::EMPTY; 2],
            by_role: [SquareSet::EMPTY; 7],
        }
    }

    /// Standard opening array, red on ranks 1-4.
    pub const fn new() -> Board {
        Board {
            occupied: SquareSet::from_bits(0x3fe_0041_5540_000a_aa08_01ff),
            by_color: [
                SquareSet::from_bits(0xa_aa08_01ff),
                SquareSet::from_bits(0x3fe_0041_5540_0000_0000_0000),
            ],
            by_role: [
                SquareSet::from_bits(0x5540_000a_a800_0000),
                SquareSet::from_bits(0x41_0000_0000_0208_0000),
                SquareSet::from_bits(0x202_0000_0000_0000_0000_0101),
                SquareSet::from_bits(0x104_0000_0000_0000_0000_0082),
                SquareSet::from_bits(0x88_0000_0000_0000_0000_0044),
                SquareSet::from_bits(0x50_0000_0000_0000_0000_0028),
                SquareSet::from_bits(0x20_0000_0000_0000_0000_0010),
            ],
        }
    }

    pub fn reset(&mut self) {
        *self = Board::new();
    }

    pub fn clear(&mut self) {
        *self = Board::empty();
    }

    #[inline]
    pub fn occupied(&self) -> SquareSet {
        self.occupied
    }

    #[inline]
    pub fn by_color(&self, color: Color) -> SquareSet {
        self.by_color[color.index()]
    }

    #[inline]
    pub fn by_role(&self, role: Role) -> SquareSet {
        self.by_role[role.index()]
    }

    /// Pieces of `color` with `role`.
    #[inline]
    pub fn pieces(&self, color: Color, role: Role) -> SquareSet {
        self.by_color(color) & self.by_role(role)
    }

    #[inline]
    pub fn has(&self, sq: Square) -> bool {
        self.occupied.contains(sq)
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        Color::ALL.into_iter().find(|&c| self.by_color(c).contains(sq))
    }

    pub fn role_at(&self, sq: Square) -> Option<Role> {
        Role::ALL.into_iter().find(|&r| self.by_role(r).contains(sq))
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        let color = self.color_at(sq)?;
        let role = self.role_at(sq)?;
        Some(Piece { role, color })
    }

    /// Removes and returns the piece on `sq`, if any.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.get(sq)?;
        self.occupied = self.occupied.without(sq);
        self.by_color[piece.color.index()] = self.by_color(piece.color).without(sq);
        self.by_role[piece.role.index()] = self.by_role(piece.role).without(sq);
        Some(piece)
    }

    /// Puts `piece` on `sq` and returns whatever stood there before.
    /// Off-board squares are left alone.
    pub fn set(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        if sq >= NUM_SQUARES {
            return None;
        }
        let old = self.take(sq);
        self.occupied = self.occupied.with(sq);
        self.by_color[piece.color.index()] = self.by_color(piece.color).with(sq);
        self.by_role[piece.role.index()] = self.by_role(piece.role).with(sq);
        old
    }

    /// The king of `color`, unless there is none or more than one.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces(color, Role::King).single_square()
    }

    /// All pieces in ascending square order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied
            .iter()
            .filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Pieces of `attacker` that attack `sq`, given `occupied`.
    pub fn attackers(&self, sq: Square, attacker: Color, occupied: SquareSet) -> SquareSet {
        self.by_color(attacker)
            & ((attacks::chariot_attacks(sq, occupied) & self.by_role(Role::Chariot))
                | (attacks::cannon_attacks(sq, occupied) & self.by_role(Role::Cannon))
                | (attacks::horse_inv_attacks(sq, occupied) & self.by_role(Role::Horse))
                | (attacks::pawn_inv_attacks(attacker, sq) & self.by_role(Role::Pawn))
                | (attacks::elephant_attacks(attacker, sq, occupied)
                    & self.by_role(Role::Elephant))
                | (attacks::advisor_attacks(attacker, sq) & self.by_role(Role::Advisor))
                | (attacks::king_attacks(attacker, sq) & self.by_role(Role::King)))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::fen::make_board_fen(self))
    }
}

// Simple grid, rank 10 on top
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..10).rev() {
            for file in 0..9 {
                match self.get(file + 9 * rank) {
                    Some(piece) => write!(f, "{} ", piece.char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
