// Rules engine: validation, legal destinations, check and game end.
// Legality is decided by playing each candidate on a copy of the board and
// looking at the mover's king afterwards.

use std::collections::BTreeMap;

use crate::attacks::{self, ADVISOR_SQUARES, ELEPHANT_SQUARES, KING_SQUARES, PAWN_SQUARES};
use crate::board::Board;
use crate::setup::{Material, Setup};
use crate::square_set::SquareSet;
use crate::types::{Color, Move, Outcome, Piece, Role, Rules, Square, NUM_SQUARES};
use crate::utils::square_file;

/// Side-to-move king and the enemy pieces giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context {
    pub king: Option<Square>,
    pub checkers: SquareSet,
}

/// Reasons a `Setup` is rejected, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum PositionError {
    #[error("board is empty")]
    EmptyBoard,
    #[error("each side needs exactly one king inside its palace")]
    MissingOrDuplicateKing,
    #[error("side not to move is in check")]
    OpponentAlreadyInCheck,
    #[error("kings face each other on an open file")]
    FacingKings,
    #[error("too many or misplaced advisors")]
    TooManyOrMisplacedAdvisors,
    #[error("too many or misplaced elephants")]
    TooManyOrMisplacedElephants,
    #[error("too many or misplaced horses")]
    TooManyOrMisplacedHorses,
    #[error("too many or misplaced chariots")]
    TooManyOrMisplacedChariots,
    #[error("too many or misplaced cannons")]
    TooManyOrMisplacedCannons,
    #[error("too many or misplaced pawns")]
    TooManyOrMisplacedPawns,
}

// Piece limits -------------------------------------------------------

const fn max_count(role: Role) -> usize {
    match role {
        Role::Pawn => 5,
        Role::King => 1,
        _ => 2,
    }
}

fn allowed_squares(role: Role, color: Color) -> SquareSet {
    match role {
        Role::King => KING_SQUARES[color.index()],
        Role::Advisor => ADVISOR_SQUARES[color.index()],
        Role::Elephant => ELEPHANT_SQUARES[color.index()],
        Role::Pawn => PAWN_SQUARES[color.index()],
        Role::Horse | Role::Chariot | Role::Cannon => SquareSet::FULL,
    }
}

const fn placement_error(role: Role) -> PositionError {
    match role {
        Role::Pawn => PositionError::TooManyOrMisplacedPawns,
        Role::Cannon => PositionError::TooManyOrMisplacedCannons,
        Role::Chariot => PositionError::TooManyOrMisplacedChariots,
        Role::Horse => PositionError::TooManyOrMisplacedHorses,
        Role::Elephant => PositionError::TooManyOrMisplacedElephants,
        Role::Advisor => PositionError::TooManyOrMisplacedAdvisors,
        Role::King => PositionError::MissingOrDuplicateKing,
    }
}

/// A validated position. Mutated in place by [`Position::play`]; copy it to
/// explore variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    turn: Color,
    halfmoves: u32,
    fullmoves: u32,
    rules: Rules,
}

impl Position {
    /// Standard opening array, red to move.
    pub fn new() -> Position {
        Position::default_for(Rules::Xiangqi)
    }

    pub fn default_for(rules: Rules) -> Position {
        match rules {
            Rules::Xiangqi => Position {
                board: Board::new(),
                turn: Color::Red,
                halfmoves: 0,
                fullmoves: 1,
                rules,
            },
        }
    }

    pub fn from_setup(setup: Setup) -> Result<Position, PositionError> {
        Position::from_setup_with(Rules::Xiangqi, setup)
    }

    pub fn from_setup_with(rules: Rules, setup: Setup) -> Result<Position, PositionError> {
        let pos = Position {
            board: setup.board,
            turn: setup.turn,
            halfmoves: setup.halfmoves,
            fullmoves: setup.fullmoves,
            rules,
        };
        pos.validate()?;
        Ok(pos)
    }

    pub fn reset(&mut self) {
        *self = Position::default_for(self.rules);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    #[inline]
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Snapshot for notation layers. Clocks are clamped to what FEN can hold.
    pub fn to_setup(&self) -> Setup {
        Setup {
            board: self.board,
            turn: self.turn,
            halfmoves: self.halfmoves.min(150),
            fullmoves: self.fullmoves.clamp(1, 9999),
        }
    }

    /// Structural legality checks run by `from_setup`.
    pub fn validate(&self) -> Result<(), PositionError> {
        let board = &self.board;
        if board.occupied().is_empty() {
            return Err(PositionError::EmptyBoard);
        }

        let (Some(our_king), Some(their_king)) =
            (board.king_of(self.turn), board.king_of(!self.turn))
        else {
            return Err(PositionError::MissingOrDuplicateKing);
        };

        if kings_face(board, our_king, their_king) {
            return Err(PositionError::FacingKings);
        }

        if self.attackers(their_king, self.turn, board.occupied()).any() {
            return Err(PositionError::OpponentAlreadyInCheck);
        }

        for color in Color::ALL {
            for role in Role::ALL {
                let pieces = board.pieces(color, role);
                if pieces.count() > max_count(role)
                    || !pieces.is_subset(allowed_squares(role, color))
                {
                    return Err(placement_error(role));
                }
            }
        }

        Ok(())
    }

    // Check detection ------------------------------------------------

    /// Pieces of `attacker` attacking `square`, given `occupied`.
    pub fn attackers(&self, square: Square, attacker: Color, occupied: SquareSet) -> SquareSet {
        self.board.attackers(square, attacker, occupied)
    }

    pub fn ctx(&self) -> Context {
        match self.board.king_of(self.turn) {
            Some(king) => Context {
                king: Some(king),
                checkers: self.attackers(king, !self.turn, self.board.occupied()),
            },
            None => Context::default(),
        }
    }

    pub fn checkers(&self) -> SquareSet {
        self.ctx().checkers
    }

    pub fn is_check(&self) -> bool {
        self.is_check_with(&self.ctx())
    }

    pub fn is_check_with(&self, ctx: &Context) -> bool {
        ctx.checkers.any()
    }

    /// Both kings on one file with nothing in between.
    pub fn is_facing_kings(&self) -> bool {
        match (
            self.board.king_of(Color::Red),
            self.board.king_of(Color::Black),
        ) {
            (Some(red), Some(black)) => kings_face(&self.board, red, black),
            _ => false,
        }
    }

    /// More checkers than legal play can produce. Xiangqi allows up to
    /// quadruple check.
    pub fn is_impossible_check(&self) -> bool {
        self.checkers().count() > 4
    }

    // Move generation ------------------------------------------------

    /// Squares `piece` on `square` could move to, ignoring king safety.
    pub fn pseudo_dests(&self, piece: Piece, square: Square) -> SquareSet {
        attacks::attacks(piece, square, self.board.occupied()) - self.board.by_color(self.turn)
    }

    /// Legal destinations of the side-to-move piece on `square`. Empty for
    /// empty or enemy squares.
    pub fn dests(&self, square: Square) -> SquareSet {
        self.dests_with(square, &self.ctx())
    }

    /// Like [`Position::dests`], reusing a context computed for this position.
    pub fn dests_with(&self, square: Square, ctx: &Context) -> SquareSet {
        let Some(piece) = self.board.get(square) else {
            return SquareSet::EMPTY;
        };
        if piece.color != self.turn {
            return SquareSet::EMPTY;
        }

        let mut dests = self.pseudo_dests(piece, square);
        // without a king of our own there is nothing to expose
        if ctx.king.is_none() {
            return dests;
        }
        for to in dests {
            let mut after = *self;
            after.board.take(square);
            after.board.set(to, piece);
            if after.is_check() || after.is_facing_kings() {
                dests = dests.without(to);
            }
        }
        dests
    }

    /// Legal destinations of every side-to-move piece, keyed by origin.
    pub fn all_dests(&self) -> BTreeMap<Square, SquareSet> {
        self.all_dests_with(&self.ctx())
    }

    pub fn all_dests_with(&self, ctx: &Context) -> BTreeMap<Square, SquareSet> {
        self.board
            .by_color(self.turn)
            .iter()
            .map(|from| (from, self.dests_with(from, ctx)))
            .collect()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, dests) in self.all_dests() {
            moves.extend(dests.iter().map(|to| Move::new(from, to)));
        }
        moves
    }

    pub fn has_dests(&self) -> bool {
        self.has_dests_with(&self.ctx())
    }

    pub fn has_dests_with(&self, ctx: &Context) -> bool {
        self.board
            .by_color(self.turn)
            .iter()
            .any(|from| self.dests_with(from, ctx).any())
    }

    pub fn is_legal(&self, m: Move) -> bool {
        self.dests(m.from).contains(m.to)
    }

    // Game end -------------------------------------------------------

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate_with(&self.ctx())
    }

    pub fn is_checkmate_with(&self, ctx: &Context) -> bool {
        ctx.checkers.any() && !self.has_dests_with(ctx)
    }

    /// No legal move while not in check. Unlike chess this loses.
    pub fn is_stalemate(&self) -> bool {
        self.is_stalemate_with(&self.ctx())
    }

    pub fn is_stalemate_with(&self, ctx: &Context) -> bool {
        ctx.checkers.is_empty() && !self.has_dests_with(ctx)
    }

    /// `color` cannot mate with what it has left.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        let board = &self.board;
        if (board.pieces(color, Role::Chariot) | board.pieces(color, Role::Horse)).any() {
            return false;
        }
        if board.pieces(color, Role::Cannon).any() {
            // a cannon needs a screen that cannot be chased away
            return board.by_role(Role::Advisor).is_empty() && board.by_role(Role::Pawn).is_empty();
        }
        // pawns stuck on the last rank never reach the palace center
        (board.pieces(color, Role::Pawn) - SquareSet::far_rank(color)).is_empty()
    }

    pub fn is_insufficient_material(&self) -> bool {
        Color::ALL
            .into_iter()
            .all(|color| self.has_insufficient_material(color))
    }

    pub fn is_50_moves(&self) -> bool {
        self.halfmoves >= 50
    }

    pub fn is_end(&self) -> bool {
        self.is_insufficient_material() || self.is_50_moves() || !self.has_dests()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome_with(&self.ctx())
    }

    pub fn outcome_with(&self, ctx: &Context) -> Option<Outcome> {
        if self.is_checkmate_with(ctx) || self.is_stalemate_with(ctx) {
            Some(Outcome::decisive(!self.turn))
        } else if self.is_insufficient_material() || self.is_50_moves() {
            Some(Outcome::DRAW)
        } else {
            None
        }
    }

    // Mutation -------------------------------------------------------

    /// Applies `m` without checking legality. Moves from an empty square or
    /// to an off-board square leave the position untouched.
    pub fn play(&mut self, m: Move) {
        if m.to >= NUM_SQUARES {
            return;
        }
        let Some(piece) = self.board.take(m.from) else {
            return;
        };

        // clocks from an unchecked setup may already sit at the top of the range
        self.halfmoves = self.halfmoves.saturating_add(1);
        if self.turn == Color::Black {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.turn = !self.turn;

        if self.board.set(m.to, piece).is_some() {
            self.halfmoves = 0;
        }
    }

    // Comparison and material ----------------------------------------

    /// Same board and side to move, clocks ignored.
    pub fn eq_ignore_moves(&self, other: &Position) -> bool {
        self.board == other.board && self.turn == other.turn
    }

    pub fn material(&self) -> Material {
        Material::from_board(&self.board)
    }

    /// One king per side and no more pieces of any role than the opening has.
    pub fn is_standard_material(&self) -> bool {
        let material = self.material();
        Color::ALL.into_iter().all(|color| {
            let side = material.by_color(color);
            side.count(Role::King) == 1
                && Role::ALL.into_iter().all(|role| side.count(role) <= max_count(role))
        })
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

impl TryFrom<Setup> for Position {
    type Error = PositionError;

    fn try_from(setup: Setup) -> Result<Position, PositionError> {
        Position::from_setup(setup)
    }
}

fn kings_face(board: &Board, a: Square, b: Square) -> bool {
    square_file(a) == square_file(b) && attacks::between(a, b).is_disjoint(board.occupied())
}

/// Opening position for `rules`.
pub fn default_position(rules: Rules) -> Position {
    Position::default_for(rules)
}

/// Validates `setup` under `rules`.
pub fn setup_position(rules: Rules, setup: Setup) -> Result<Position, PositionError> {
    Position::from_setup_with(rules, setup)
}
