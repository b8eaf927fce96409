// Square geometry, square names and UCI move text

use crate::types::{Move, Square, NUM_FILES, NUM_RANKS};

pub const FILE_NAMES: [char; 9] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];
pub const RANK_NAMES: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

#[inline]
pub const fn square_file(sq: Square) -> usize {
    sq % NUM_FILES
}

#[inline]
pub const fn square_rank(sq: Square) -> usize {
    sq / NUM_FILES
}

#[inline]
pub fn square_from_coords(file: i32, rank: i32) -> Option<Square> {
    if (0..NUM_FILES as i32).contains(&file) && (0..NUM_RANKS as i32).contains(&rank) {
        Some(file as usize + NUM_FILES * rank as usize)
    } else {
        None
    }
}

/// Parse a square name like "e10" (a1 = 0, i10 = 89)
pub fn parse_square(name: &str) -> Option<Square> {
    let mut chars = name.chars();
    let file_ch = chars.next()?;
    let file = FILE_NAMES.iter().position(|&c| c == file_ch)?;
    let rank = RANK_NAMES.iter().position(|&r| r == chars.as_str())?;
    square_from_coords(file as i32, rank as i32)
}

/// Square name, e.g. 4 -> "e1". Off-board squares give "-".
pub fn make_square(sq: Square) -> String {
    if square_rank(sq) >= NUM_RANKS {
        return "-".to_string();
    }
    format!("{}{}", FILE_NAMES[square_file(sq)], RANK_NAMES[square_rank(sq)])
}

/// Parse UCI text like "h3e3" or "a10a9"
pub fn parse_uci(uci: &str) -> Option<Move> {
    if !uci.is_ascii() || uci.len() < 4 || uci.len() > 6 {
        return None;
    }
    // The origin ends right before the second file letter
    let split = uci[1..].find(|c: char| c.is_ascii_alphabetic())? + 1;
    let from = parse_square(&uci[..split])?;
    let to = parse_square(&uci[split..])?;
    Some(Move::new(from, to))
}

pub fn make_uci(m: Move) -> String {
    format!("{}{}", make_square(m.from), make_square(m.to))
}
