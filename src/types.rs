// Core value types shared by every module
// Square mapping: a1=0, b1=1, ..., i1=8, a2=9, ..., i10=89

use std::fmt;

/// Square index, `file + 9 * rank`. Only 0..90 is on the board.
pub type Square = usize;

pub const NUM_SQUARES: usize = 90;
pub const NUM_FILES: usize = 9;
pub const NUM_RANKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }

    // FEN side-to-move letter
    pub const fn char(self) -> char {
        match self {
            Color::Red => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Color {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Pawn = 0,
    Cannon = 1,
    Chariot = 2,
    Horse = 3,
    Elephant = 4,
    Advisor = 5,
    King = 6,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Pawn,
        Role::Cannon,
        Role::Chariot,
        Role::Horse,
        Role::Elephant,
        Role::Advisor,
        Role::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower case FEN letter.
    pub const fn char(self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Cannon => 'c',
            Role::Chariot => 'r',
            Role::Horse => 'n',
            Role::Elephant => 'b',
            Role::Advisor => 'a',
            Role::King => 'k',
        }
    }

    /// Parses a FEN letter of either case.
    pub fn from_char(ch: char) -> Option<Role> {
        Some(match ch.to_ascii_lowercase() {
            'p' => Role::Pawn,
            'c' => Role::Cannon,
            'r' => Role::Chariot,
            'n' => Role::Horse,
            'b' => Role::Elephant,
            'a' => Role::Advisor,
            'k' => Role::King,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Role::Pawn => "pawn",
            Role::Cannon => "cannon",
            Role::Chariot => "chariot",
            Role::Horse => "horse",
            Role::Elephant => "elephant",
            Role::Advisor => "advisor",
            Role::King => "king",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub role: Role,
    pub color: Color,
}

impl Piece {
    pub const fn new(role: Role, color: Color) -> Piece {
        Piece { role, color }
    }

    /// FEN letter, upper case for red.
    pub fn char(self) -> char {
        match self.color {
            Color::Red => self.role.char().to_ascii_uppercase(),
            Color::Black => self.role.char(),
        }
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        let role = Role::from_char(ch)?;
        let color = if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            Color::Red
        };
        Some(Piece { role, color })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::utils::make_uci(*self))
    }
}

/// Result of a finished game; `winner == None` is a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub winner: Option<Color>,
}

impl Outcome {
    pub const DRAW: Outcome = Outcome { winner: None };

    pub const fn decisive(winner: Color) -> Outcome {
        Outcome {
            winner: Some(winner),
        }
    }

    pub fn is_draw(self) -> bool {
        self.winner.is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(Color::Red) => f.write_str("1-0"),
            Some(Color::Black) => f.write_str("0-1"),
            None => f.write_str("1/2-1/2"),
        }
    }
}

/// Rule sets. Only standard xiangqi exists today; validation and the initial
/// array dispatch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rules {
    #[default]
    Xiangqi,
}
