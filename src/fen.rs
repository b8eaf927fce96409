// FEN reading and writing.
// Xiangqi FEN lists rank 10 first. The castling and en passant fields of
// chess FEN survive only as `-` placeholders.

use crate::board::Board;
use crate::setup::Setup;
use crate::types::{Color, Piece, Role, NUM_FILES, NUM_RANKS};

pub const INITIAL_BOARD_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR";
pub const INITIAL_EPD: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - -";
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";
pub const EMPTY_BOARD_FEN: &str = "9/9/9/9/9/9/9/9/9/9";
pub const EMPTY_EPD: &str = "9/9/9/9/9/9/9/9/9/9 w - -";
pub const EMPTY_FEN: &str = "9/9/9/9/9/9/9/9/9/9 w - - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("invalid fen")]
    Fen,
    #[error("invalid board part in fen")]
    Board,
    #[error("invalid turn in fen")]
    Turn,
    #[error("invalid halfmove clock in fen")]
    Halfmoves,
    #[error("invalid fullmove number in fen")]
    Fullmoves,
}

// Accepts the h/e letters some sources use for horse and elephant
fn char_to_piece(ch: char) -> Option<Piece> {
    let role = match ch.to_ascii_lowercase() {
        'h' => Role::Horse,
        'e' => Role::Elephant,
        _ => Role::from_char(ch)?,
    };
    let color = if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        Color::Red
    };
    Some(Piece::new(role, color))
}

// At most four decimal digits
fn parse_small_uint(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 4 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parses the piece placement field.
pub fn parse_board_fen(board_part: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    let mut rank = NUM_RANKS as i32 - 1;
    let mut file = 0;
    for ch in board_part.chars() {
        if ch == '/' && file == NUM_FILES {
            file = 0;
            rank -= 1;
        } else if let Some(step) = ch.to_digit(10).filter(|&d| d > 0) {
            file += step as usize;
        } else {
            if file >= NUM_FILES || rank < 0 {
                return Err(FenError::Board);
            }
            let piece = char_to_piece(ch).ok_or(FenError::Board)?;
            board.set(file + NUM_FILES * rank as usize, piece);
            file += 1;
        }
    }
    if rank != 0 || file != NUM_FILES {
        return Err(FenError::Board);
    }
    Ok(board)
}

/// Parses a full or partial FEN. Missing trailing fields take their
/// defaults: red to move, halfmove clock 0, fullmove number 1.
pub fn parse_fen(fen: &str) -> Result<Setup, FenError> {
    let mut parts = fen
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty());

    let board_part = parts.next().ok_or(FenError::Board)?;

    let turn = match parts.next() {
        None | Some("w") => Color::Red,
        Some("b") => Color::Black,
        Some(_) => return Err(FenError::Turn),
    };

    for _ in 0..2 {
        if parts.next().is_some_and(|part| part != "-") {
            return Err(FenError::Fen);
        }
    }

    let board = parse_board_fen(board_part)?;

    let halfmoves = match parts.next() {
        Some(part) => parse_small_uint(part).ok_or(FenError::Halfmoves)?,
        None => 0,
    };
    let fullmoves = match parts.next() {
        Some(part) => parse_small_uint(part).ok_or(FenError::Fullmoves)?,
        None => 1,
    };

    if parts.next().is_some() {
        return Err(FenError::Fen);
    }

    Ok(Setup {
        board,
        turn,
        halfmoves,
        fullmoves: fullmoves.max(1),
    })
}

pub fn make_board_fen(board: &Board) -> String {
    let mut fen = String::with_capacity(90);
    for rank in (0..NUM_RANKS).rev() {
        let mut empty = 0;
        for file in 0..NUM_FILES {
            match board.get(file + NUM_FILES * rank) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }
    fen
}

/// Writes `setup` as FEN, or as EPD (no clocks) when `epd` is set.
pub fn make_fen(setup: &Setup, epd: bool) -> String {
    let mut fen = format!("{} {} - -", make_board_fen(&setup.board), setup.turn.char());
    if !epd {
        let halfmoves = setup.halfmoves.min(9999);
        let fullmoves = setup.fullmoves.clamp(1, 9999);
        fen.push_str(&format!(" {} {}", halfmoves, fullmoves));
    }
    fen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_board_fens() {
        assert_eq!(make_board_fen(&Board::new()), INITIAL_BOARD_FEN);
        assert_eq!(make_board_fen(&Board::empty()), EMPTY_BOARD_FEN);
        assert_eq!(format!("{:?}", Board::new()), INITIAL_BOARD_FEN);
    }

    #[test]
    fn make_initial_fen() {
        assert_eq!(make_fen(&Setup::default(), false), INITIAL_FEN);
        assert_eq!(make_fen(&Setup::default(), true), INITIAL_EPD);
        assert_eq!(make_fen(&Setup::empty(), false), EMPTY_FEN);
        assert_eq!(make_fen(&Setup::empty(), true), EMPTY_EPD);
    }

    #[test]
    fn parse_initial_fen() {
        let setup = parse_fen(INITIAL_FEN).unwrap();
        assert_eq!(setup, Setup::default());

        let alt = parse_fen("rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR w - - 0 1");
        assert_eq!(alt, Ok(setup));

        let underscored = parse_fen("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR_w_-_-_0_1");
        assert_eq!(underscored, Ok(setup));
    }

    #[test]
    fn partial_fen_takes_defaults() {
        assert_eq!(parse_fen(INITIAL_BOARD_FEN), Ok(Setup::default()));
        assert_eq!(parse_fen(INITIAL_EPD), Ok(Setup::default()));

        let setup = parse_fen("9/9/9/9/9/9/9/9/9/9 b").unwrap();
        assert_eq!(setup.turn, Color::Black);
        assert_eq!(setup.halfmoves, 0);
        assert_eq!(setup.fullmoves, 1);
    }

    #[test]
    fn fullmoves_are_at_least_one() {
        assert_eq!(parse_fen("9/9/9/9/9/9/9/9/9/9 w - - 0 0").unwrap().fullmoves, 1);
    }

    #[test]
    fn invalid_fens() {
        assert_eq!(
            parse_fen("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - w cq - 0P1"),
            Err(FenError::Fen)
        );
        assert_eq!(
            parse_fen("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w  - 0 1"),
            Err(FenError::Fen)
        );
        assert_eq!(parse_fen(""), Err(FenError::Board));
        assert_eq!(parse_fen("9/9/9/9/9/9/9/9/9 w - - 0 1"), Err(FenError::Board));
        assert_eq!(parse_fen("9/9/9/9/9/9/9/9/9/9/9 w - - 0 1"), Err(FenError::Board));
        assert_eq!(parse_fen("8/9/9/9/9/9/9/9/9/9 w - - 0 1"), Err(FenError::Board));
        assert_eq!(parse_fen("9x/9/9/9/9/9/9/9/9/9 w - - 0 1"), Err(FenError::Board));
        assert_eq!(parse_fen("9/9/9/9/9/9/9/9/9/9 x - - 0 1"), Err(FenError::Turn));
        assert_eq!(parse_fen("9/9/9/9/9/9/9/9/9/9 w - - 12345 1"), Err(FenError::Halfmoves));
        assert_eq!(parse_fen("9/9/9/9/9/9/9/9/9/9 w - - 1 -1"), Err(FenError::Fullmoves));
        assert_eq!(parse_fen("9/9/9/9/9/9/9/9/9/9 w - - 1 1 1"), Err(FenError::Fen));
    }

    #[test]
    fn parse_and_make_fen() {
        for fen in [
            "9/9/9/9/9/9/9/9/9/9 w - - 12 42",
            "9/9/9/9/9/9/9/9/9/9 b - - 0 1",
            "1nbakabn1/r7r/1c7/p1p1C1p1p/4C2c1/9/P1P1P1P1P/9/9/RNBAKABNR b - - 4 4",
            "4k3P/9/9/9/9/9/9/9/8p/3K5 w - - 0 1",
        ] {
            let setup = parse_fen(fen).unwrap();
            assert_eq!(make_fen(&setup, false), fen);
        }
    }

    #[test]
    fn make_fen_clamps_clocks() {
        let setup = Setup {
            halfmoves: 20_000,
            fullmoves: 0,
            ..Setup::empty()
        };
        assert_eq!(make_fen(&setup, false), "9/9/9/9/9/9/9/9/9/9 w - - 9999 1");
    }
}
