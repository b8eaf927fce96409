// 90-bit square sets.
// A xiangqi board has 9x10 squares, so one set fits in the low 90 bits of a
// `u128`. Every constructor and operation masks back to those bits, which
// keeps the upper 38 bits zero at all times.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub};

use crate::types::{Color, Square, NUM_SQUARES};

const MASK: u128 = (1u128 << NUM_SQUARES) - 1;
const RANK_1: u128 = 0x1ff;
const FILE_A: u128 = 0x0002_0100_8040_2010_0804_0201;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u128);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);
    pub const FULL: SquareSet = SquareSet(MASK);

    /// Builds a set from raw bits; anything past bit 89 is dropped.
    #[inline]
    pub const fn from_bits(bits: u128) -> SquareSet {
        SquareSet(bits & MASK)
    }

    #[inline]
    pub const fn bits(self) -> u128 {
        self.0
    }

    #[inline]
    pub const fn empty() -> SquareSet {
        SquareSet::EMPTY
    }

    #[inline]
    pub const fn full() -> SquareSet {
        SquareSet::FULL
    }

    /// Off-board squares give the empty set.
    #[inline]
    pub const fn from_square(square: Square) -> SquareSet {
        if square < NUM_SQUARES {
            SquareSet(1u128 << square)
        } else {
            SquareSet::EMPTY
        }
    }

    pub const fn from_squares(squares: &[Square]) -> SquareSet {
        let mut set = SquareSet::EMPTY;
        let mut i = 0;
        while i < squares.len() {
            set = set.with(squares[i]);
            i += 1;
        }
        set
    }

    /// All nine squares of `rank` (0 is rank 1).
    pub const fn from_rank(rank: usize) -> SquareSet {
        if rank < 10 {
            SquareSet(RANK_1 << (9 * rank))
        } else {
            SquareSet::EMPTY
        }
    }

    /// All ten squares of `file` (0 is file a).
    pub const fn from_file(file: usize) -> SquareSet {
        if file < 9 {
            SquareSet(FILE_A << file)
        } else {
            SquareSet::EMPTY
        }
    }

    /// Rank 1 and rank 10.
    pub const fn backranks() -> SquareSet {
        SquareSet(SquareSet::from_rank(0).0 | SquareSet::from_rank(9).0)
    }

    /// The rank furthest from `color`'s palace, where its pawns can only move sideways.
    pub const fn far_rank(color: Color) -> SquareSet {
        match color {
            Color::Red => SquareSet::from_rank(9),
            Color::Black => SquareSet::from_rank(0),
        }
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        square < NUM_SQUARES && self.0 & (1u128 << square) != 0
    }

    #[inline]
    pub const fn with(self, square: Square) -> SquareSet {
        SquareSet(self.0 | SquareSet::from_square(square).0)
    }

    #[inline]
    pub const fn without(self, square: Square) -> SquareSet {
        SquareSet(self.0 & !SquareSet::from_square(square).0)
    }

    #[inline]
    pub const fn toggle(self, square: Square) -> SquareSet {
        SquareSet(self.0 ^ SquareSet::from_square(square).0)
    }

    #[inline]
    pub const fn set(self, square: Square, on: bool) -> SquareSet {
        if on {
            self.with(square)
        } else {
            self.without(square)
        }
    }

    #[inline]
    pub const fn union(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    #[inline]
    pub const fn intersect(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & other.0)
    }

    #[inline]
    pub const fn diff(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & !other.0)
    }

    #[inline]
    pub const fn xor(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 ^ other.0)
    }

    /// Complement within the 90 board squares.
    #[inline]
    pub const fn complement(self) -> SquareSet {
        SquareSet(!self.0 & MASK)
    }

    #[inline]
    pub const fn intersects(self, other: SquareSet) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_disjoint(self, other: SquareSet) -> bool {
        self.0 & other.0 == 0
    }

    #[inline]
    pub const fn is_subset(self, other: SquareSet) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub const fn is_superset(self, other: SquareSet) -> bool {
        other.is_subset(self)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Lowest square, if any.
    #[inline]
    pub const fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as Square)
        }
    }

    /// Highest square, if any.
    #[inline]
    pub const fn last(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(127 - self.0.leading_zeros() as Square)
        }
    }

    #[inline]
    pub const fn without_first(self) -> SquareSet {
        SquareSet(self.0 & self.0.wrapping_sub(1))
    }

    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.without_first().0 != 0
    }

    /// The only member, or `None` when empty or ambiguous.
    #[inline]
    pub const fn single_square(self) -> Option<Square> {
        if self.more_than_one() {
            None
        } else {
            self.first()
        }
    }

    /// Moves every square `shift` bits up; squares pushed past 89 fall off.
    #[inline]
    pub const fn shl(self, shift: usize) -> SquareSet {
        if shift >= NUM_SQUARES {
            SquareSet::EMPTY
        } else {
            SquareSet((self.0 << shift) & MASK)
        }
    }

    /// Moves every square `shift` bits down; squares pushed below 0 fall off.
    #[inline]
    pub const fn shr(self, shift: usize) -> SquareSet {
        if shift >= NUM_SQUARES {
            SquareSet::EMPTY
        } else {
            SquareSet(self.0 >> shift)
        }
    }

    /// Ascending iteration; call `.rev()` for descending order.
    #[inline]
    pub const fn iter(self) -> SquareIter {
        SquareIter { bits: self.0 }
    }
}

// Bit iteration, lowest square first from the front and highest from the back
#[derive(Debug, Clone)]
pub struct SquareIter {
    bits: u128,
}

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }
        let sq = self.bits.trailing_zeros() as Square;
        self.bits &= self.bits - 1;
        Some(sq)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for SquareIter {
    #[inline]
    fn next_back(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }
        let sq = 127 - self.bits.leading_zeros() as Square;
        self.bits ^= 1u128 << sq;
        Some(sq)
    }
}

impl ExactSizeIterator for SquareIter {}
impl FusedIterator for SquareIter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareIter;

    fn into_iter(self) -> SquareIter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> SquareSet {
        iter.into_iter().fold(SquareSet::EMPTY, SquareSet::with)
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn bitor(self, rhs: SquareSet) -> SquareSet {
        self.union(rhs)
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn bitand(self, rhs: SquareSet) -> SquareSet {
        self.intersect(rhs)
    }
}

impl BitXor for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn bitxor(self, rhs: SquareSet) -> SquareSet {
        self.xor(rhs)
    }
}

impl Sub for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn sub(self, rhs: SquareSet) -> SquareSet {
        self.diff(rhs)
    }
}

impl Not for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn not(self) -> SquareSet {
        self.complement()
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for SquareSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: SquareSet) {
        self.0 &= rhs.0;
    }
}

impl BitXorAssign for SquareSet {
    #[inline]
    fn bitxor_assign(&mut self, rhs: SquareSet) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SquareSet({:#025x})", self.0)
    }
}

// Grid view, rank 10 on top
impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..10).rev() {
            for file in 0..9 {
                let ch = if self.contains(file + 9 * rank) { '1' } else { '.' };
                if file < 8 {
                    write!(f, "{} ", ch)?;
                } else {
                    writeln!(f, "{}", ch)?;
                }
            }
        }
        Ok(())
    }
}
