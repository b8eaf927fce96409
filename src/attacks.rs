// Attack and ray computation.
// Pure functions from (role, color, origin, occupancy) to the set of squares
// a piece attacks or defends. Leapers check fixed offsets against a
// precomputed set of reachable squares or a wrap guard; the chariot and
// cannon walk their rays square by square.

use std::sync::OnceLock;

use crate::square_set::SquareSet;
use crate::types::{Color, Piece, Role, Square, NUM_SQUARES};
use crate::utils::{square_file, square_rank};

/// Palace squares each king is confined to.
pub const KING_SQUARES: [SquareSet; 2] = [
    SquareSet::from_squares(&[3, 4, 5, 12, 13, 14, 21, 22, 23]),
    SquareSet::from_squares(&[66, 67, 68, 75, 76, 77, 84, 85, 86]),
];

/// Palace corners and center, the only points an advisor can stand on.
pub const ADVISOR_SQUARES: [SquareSet; 2] = [
    SquareSet::from_squares(&[3, 5, 13, 21, 23]),
    SquareSet::from_squares(&[66, 68, 76, 84, 86]),
];

/// The seven points an elephant can reach on its own side of the river.
pub const ELEPHANT_SQUARES: [SquareSet; 2] = [
    SquareSet::from_squares(&[2, 6, 18, 22, 26, 38, 42]),
    SquareSet::from_squares(&[47, 51, 63, 67, 71, 83, 87]),
];

/// Squares a pawn can ever stand on: its starting files on its own side of the
/// river, anything on the far side.
pub const PAWN_SQUARES: [SquareSet; 2] = [
    SquareSet::from_bits(0x3ff_ffff_ffff_f55a_a800_0000),
    SquareSet::from_bits(0x556a_bfff_ffff_ffff),
];

/// First square past the river for red; black pawns have crossed below it.
const RIVER: Square = 45;

const KING_DIRS: [i32; 4] = [-9, 9, -1, 1];
const ADVISOR_DIRS: [i32; 4] = [-10, -8, 8, 10];
const ORTHOGONAL_DIRS: [i32; 4] = [-9, 9, -1, 1];

// (destination, eye)
const ELEPHANT_DIR_BLOCKERS: [(i32, i32); 4] = [(-20, -10), (-16, -8), (16, 8), (20, 10)];

// (destination, leg) seen from the horse
const HORSE_DIR_BLOCKERS: [(i32, i32); 8] = [
    (-19, -9),
    (-17, -9),
    (-11, -1),
    (7, -1),
    (-7, 1),
    (11, 1),
    (17, 9),
    (19, 9),
];

// (horse origin, leg) seen from the attacked square
const HORSE_INV_DIR_BLOCKERS: [(i32, i32); 8] = [
    (-19, -10),
    (-17, -8),
    (-11, -10),
    (7, 8),
    (-7, -8),
    (11, 10),
    (17, 8),
    (19, 10),
];

static FILE_RANGE: OnceLock<[SquareSet; NUM_SQUARES]> = OnceLock::new();
static RANK_RANGE: OnceLock<[SquareSet; NUM_SQUARES]> = OnceLock::new();

fn init_file_range() -> [SquareSet; NUM_SQUARES] {
    let mut table = [SquareSet::EMPTY; NUM_SQUARES];
    for (sq, entry) in table.iter_mut().enumerate() {
        *entry = SquareSet::from_file(square_file(sq)).without(sq);
    }
    table
}

fn init_rank_range() -> [SquareSet; NUM_SQUARES] {
    let mut table = [SquareSet::EMPTY; NUM_SQUARES];
    for (sq, entry) in table.iter_mut().enumerate() {
        *entry = SquareSet::from_rank(square_rank(sq)).without(sq);
    }
    table
}

pub fn init_attack_tables() {
    FILE_RANGE.get_or_init(init_file_range);
    RANK_RANGE.get_or_init(init_rank_range);
}

#[inline]
fn file_range(sq: Square) -> SquareSet {
    FILE_RANGE.get_or_init(init_file_range)[sq]
}

#[inline]
fn rank_range(sq: Square) -> SquareSet {
    RANK_RANGE.get_or_init(init_rank_range)[sq]
}

#[inline]
fn offset(origin: Square, delta: i32) -> Option<Square> {
    let dest = origin as i32 + delta;
    if (0..NUM_SQUARES as i32).contains(&dest) {
        Some(dest as Square)
    } else {
        None
    }
}

/// A step from `origin` by `delta` stays on the board without wrapping onto
/// the other edge.
#[inline]
pub fn is_valid_step(origin: Square, delta: i32) -> bool {
    match offset(origin, delta) {
        Some(dest) => square_file(origin).abs_diff(square_file(dest)) <= 2,
        None => false,
    }
}

#[inline]
fn is_empty_at(occupied: SquareSet, origin: Square, delta: i32) -> bool {
    offset(origin, delta).map_or(true, |sq| !occupied.contains(sq))
}

fn step_into(origin: Square, dirs: &[i32], allowed: SquareSet) -> SquareSet {
    let mut range = SquareSet::EMPTY;
    for &dir in dirs {
        if let Some(dest) = offset(origin, dir) {
            if allowed.contains(dest) {
                range = range.with(dest);
            }
        }
    }
    range
}

/// Squares attacked by a king of `color` on `square`.
pub fn king_attacks(color: Color, square: Square) -> SquareSet {
    step_into(square, &KING_DIRS, KING_SQUARES[color.index()])
}

/// Squares attacked by an advisor of `color` on `square`.
pub fn advisor_attacks(color: Color, square: Square) -> SquareSet {
    step_into(square, &ADVISOR_DIRS, ADVISOR_SQUARES[color.index()])
}

/// Squares attacked by an elephant of `color` on `square`. A piece on the eye
/// blocks that diagonal.
pub fn elephant_attacks(color: Color, square: Square, occupied: SquareSet) -> SquareSet {
    let allowed = ELEPHANT_SQUARES[color.index()];
    let mut range = SquareSet::EMPTY;
    for (dir, eye) in ELEPHANT_DIR_BLOCKERS {
        if !is_empty_at(occupied, square, eye) {
            continue;
        }
        if let Some(dest) = offset(square, dir) {
            if allowed.contains(dest) {
                range = range.with(dest);
            }
        }
    }
    range
}

/// Squares attacked by a horse on `square`. A piece on the leg blocks the
/// two leaps through it.
pub fn horse_attacks(square: Square, occupied: SquareSet) -> SquareSet {
    leaps(square, occupied, &HORSE_DIR_BLOCKERS)
}

/// Squares a horse could attack `square` from, given `occupied`.
///
/// Unlike chess knights, horse attacks are not symmetric: the leg that
/// matters is next to the horse, not next to the target.
pub fn horse_inv_attacks(square: Square, occupied: SquareSet) -> SquareSet {
    leaps(square, occupied, &HORSE_INV_DIR_BLOCKERS)
}

fn leaps(square: Square, occupied: SquareSet, dir_blockers: &[(i32, i32)]) -> SquareSet {
    let mut range = SquareSet::EMPTY;
    for &(dir, leg) in dir_blockers {
        if is_valid_step(square, dir) && is_empty_at(occupied, square, leg) {
            range = range.with((square as i32 + dir) as Square);
        }
    }
    range
}

fn pawn_dirs(color: Color, square: Square) -> &'static [i32] {
    match color {
        Color::Red if square >= RIVER => &[-1, 9, 1],
        Color::Red => &[9],
        Color::Black if square < RIVER => &[-1, -9, 1],
        Color::Black => &[-9],
    }
}

/// Squares attacked by a pawn of `color` on `square`: one step forward, plus
/// one step sideways once across the river.
pub fn pawn_attacks(color: Color, square: Square) -> SquareSet {
    let mut range = SquareSet::EMPTY;
    for &dir in pawn_dirs(color, square) {
        if is_valid_step(square, dir) {
            range = range.with((square as i32 + dir) as Square);
        }
    }
    range
}

/// Squares a pawn of `color` could attack `square` from.
pub fn pawn_inv_attacks(color: Color, square: Square) -> SquareSet {
    let (behind, crossed) = match color {
        Color::Red => (-9, square >= RIVER),
        Color::Black => (9, square < RIVER),
    };
    let sideways: &[i32] = if crossed { &[-1, 1] } else { &[] };
    let mut range = SquareSet::EMPTY;
    for dir in std::iter::once(behind).chain(sideways.iter().copied()) {
        if is_valid_step(square, dir) {
            range = range.with((square as i32 + dir) as Square);
        }
    }
    range
}

// Ray bounds for `dir`: sideways rays stay on the origin's rank
#[inline]
fn ray_bounds(square: Square, dir: i32) -> (i32, i32) {
    if dir == -1 || dir == 1 {
        let min = (square_rank(square) * 9) as i32;
        (min, min + 9)
    } else {
        (0, NUM_SQUARES as i32)
    }
}

/// Squares attacked by a chariot on `square`: each ray runs up to and
/// including the first occupied square.
pub fn chariot_attacks(square: Square, occupied: SquareSet) -> SquareSet {
    let mut range = SquareSet::EMPTY;
    for dir in ORTHOGONAL_DIRS {
        let (min, max) = ray_bounds(square, dir);
        let mut cand = square as i32 + dir;
        while min <= cand && cand < max {
            range = range.with(cand as Square);
            if occupied.contains(cand as Square) {
                break;
            }
            cand += dir;
        }
    }
    range
}

fn cannon_rays(square: Square, occupied: SquareSet, keep_mount: bool) -> SquareSet {
    let mut range = SquareSet::EMPTY;
    for dir in ORTHOGONAL_DIRS {
        let (min, max) = ray_bounds(square, dir);
        let mut cand = square as i32 + dir;
        let mut mounted = false;
        while min <= cand && cand < max {
            let sq = cand as Square;
            if mounted {
                if occupied.contains(sq) {
                    range = range.with(sq);
                    break;
                }
            } else if occupied.contains(sq) {
                mounted = true;
                if keep_mount {
                    range = range.with(sq);
                }
            } else {
                range = range.with(sq);
            }
            cand += dir;
        }
    }
    range
}

/// Squares attacked by a cannon on `square`: empty squares up to the first
/// piece (the screen), then the next piece beyond the screen.
pub fn cannon_attacks(square: Square, occupied: SquareSet) -> SquareSet {
    cannon_rays(square, occupied, false)
}

/// Like [`cannon_attacks`], but the screens are included too. Move notation
/// needs them to tell cannons apart.
pub fn cannon_attacks_with_mounts(square: Square, occupied: SquareSet) -> SquareSet {
    cannon_rays(square, occupied, true)
}

/// Squares seen by `piece` on `square`, given `occupied` squares.
pub fn attacks(piece: Piece, square: Square, occupied: SquareSet) -> SquareSet {
    match piece.role {
        Role::Pawn => pawn_attacks(piece.color, square),
        Role::Cannon => cannon_attacks(square, occupied),
        Role::Chariot => chariot_attacks(square, occupied),
        Role::Horse => horse_attacks(square, occupied),
        Role::Elephant => elephant_attacks(piece.color, square, occupied),
        Role::Advisor => advisor_attacks(piece.color, square),
        Role::King => king_attacks(piece.color, square),
    }
}

/// The full rank or file through `a` and `b`, or empty if they are not aligned.
pub fn ray(a: Square, b: Square) -> SquareSet {
    if a >= NUM_SQUARES || b >= NUM_SQUARES {
        return SquareSet::EMPTY;
    }
    if rank_range(a).contains(b) {
        rank_range(a).with(a)
    } else if file_range(a).contains(b) {
        file_range(a).with(a)
    } else {
        SquareSet::EMPTY
    }
}

/// Squares strictly between `a` and `b`, or empty if they are not on the same
/// rank or file.
pub fn between(a: Square, b: Square) -> SquareSet {
    ray(a, b)
        .intersect(SquareSet::FULL.shl(a).xor(SquareSet::FULL.shl(b)))
        .without_first()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(set: SquareSet) -> Vec<Square> {
        set.iter().collect()
    }

    fn cross(file: usize, rank: usize) -> SquareSet {
        SquareSet::from_file(file).xor(SquareSet::from_rank(rank))
    }

    #[test]
    fn ray_through_aligned_squares() {
        assert_eq!(ray(0, 9), SquareSet::from_file(0));
        assert_eq!(ray(0, 8), SquareSet::from_rank(0));
        assert_eq!(ray(0, 10), SquareSet::EMPTY);
        assert_eq!(ray(42, 42), SquareSet::EMPTY);
    }

    #[test]
    fn pawn_moves() {
        assert_eq!(squares(pawn_attacks(Color::Red, 40)), vec![49]);
        assert_eq!(squares(pawn_attacks(Color::Red, 49)), vec![48, 50, 58]);
        assert_eq!(squares(pawn_attacks(Color::Black, 49)), vec![40]);
        assert_eq!(squares(pawn_attacks(Color::Black, 40)), vec![31, 39, 41]);

        assert_eq!(squares(pawn_attacks(Color::Red, 89)), vec![88]);
        assert_eq!(squares(pawn_attacks(Color::Red, 72)), vec![73, 81]);
        assert_eq!(squares(pawn_attacks(Color::Red, 80)), vec![79, 89]);
        assert_eq!(squares(pawn_attacks(Color::Black, 0)), vec![1]);
    }

    #[test]
    fn pawn_inverse_matches_forward() {
        for color in Color::ALL {
            for target in 0..NUM_SQUARES {
                let expected: SquareSet = (0..NUM_SQUARES)
                    .filter(|&from| pawn_attacks(color, from).contains(target))
                    .collect();
                assert_eq!(pawn_inv_attacks(color, target), expected, "{color} {target}");
            }
        }
    }

    #[test]
    fn king_moves() {
        assert_eq!(squares(king_attacks(Color::Red, 3)), vec![4, 12]);
        assert_eq!(squares(king_attacks(Color::Red, 13)), vec![4, 12, 14, 22]);
        assert_eq!(squares(king_attacks(Color::Red, 23)), vec![14, 22]);

        assert_eq!(squares(king_attacks(Color::Black, 85)), vec![76, 84, 86]);
        assert_eq!(squares(king_attacks(Color::Black, 76)), vec![67, 75, 77, 85]);
        assert_eq!(squares(king_attacks(Color::Black, 66)), vec![67, 75]);
    }

    #[test]
    fn advisor_moves() {
        assert_eq!(squares(advisor_attacks(Color::Red, 3)), vec![13]);
        assert_eq!(squares(advisor_attacks(Color::Red, 13)), vec![3, 5, 21, 23]);

        assert_eq!(squares(advisor_attacks(Color::Black, 76)), vec![66, 68, 84, 86]);
        assert_eq!(squares(advisor_attacks(Color::Black, 86)), vec![76]);
    }

    #[test]
    fn elephant_moves_and_eyes() {
        let none = SquareSet::EMPTY;
        assert_eq!(squares(elephant_attacks(Color::Red, 22, none)), vec![2, 6, 38, 42]);
        assert_eq!(squares(elephant_attacks(Color::Black, 63, none)), vec![47, 83]);

        let eye = SquareSet::from_square(32);
        assert_eq!(squares(elephant_attacks(Color::Red, 22, eye)), vec![2, 6, 38]);
        let eye = SquareSet::from_square(73);
        assert_eq!(squares(elephant_attacks(Color::Black, 63, eye)), vec![47]);

        let all_eyes = SquareSet::from_squares(&[12, 14, 32, 30]);
        assert!(elephant_attacks(Color::Red, 22, all_eyes).is_empty());
        // never across the river
        assert_eq!(squares(elephant_attacks(Color::Red, 38, none)), vec![18, 22]);
    }

    #[test]
    fn horse_moves_and_legs() {
        assert_eq!(squares(horse_attacks(8, SquareSet::EMPTY)), vec![15, 25]);
        assert_eq!(squares(horse_attacks(8, SquareSet::from_square(17))), vec![15]);

        assert_eq!(
            squares(horse_attacks(22, SquareSet::EMPTY)),
            vec![3, 5, 11, 15, 29, 33, 39, 41]
        );
        assert_eq!(
            squares(horse_attacks(22, SquareSet::from_square(13))),
            vec![11, 15, 29, 33, 39, 41]
        );
        assert!(horse_attacks(22, SquareSet::from_squares(&[13, 21, 23, 31])).is_empty());
        // no wrap from the a-file onto the i-file
        assert_eq!(squares(horse_attacks(9, SquareSet::EMPTY)), vec![2, 20, 28]);
    }

    #[test]
    fn horse_inverse_matches_forward() {
        let occupied = SquareSet::from_squares(&[13, 21, 31, 40, 44, 58, 66]);
        for target in 0..NUM_SQUARES {
            let expected: SquareSet = (0..NUM_SQUARES)
                .filter(|&from| horse_attacks(from, occupied).contains(target))
                .collect();
            assert_eq!(horse_inv_attacks(target, occupied), expected, "{target}");
        }
    }

    #[test]
    fn chariot_rays() {
        assert_eq!(chariot_attacks(22, SquareSet::EMPTY), cross(4, 2));
        assert_eq!(
            chariot_attacks(0, SquareSet::from_squares(&[1, 9])),
            SquareSet::from_squares(&[1, 9])
        );
        assert_eq!(chariot_attacks(22, SquareSet::from_file(0)), cross(4, 2));
        assert_eq!(
            chariot_attacks(22, SquareSet::from_file(1)),
            cross(4, 2).without(18)
        );
        assert_eq!(
            chariot_attacks(22, SquareSet::from_file(1) ^ SquareSet::from_file(0)),
            cross(4, 2).without(18)
        );
        assert_eq!(
            chariot_attacks(22, SquareSet::from_rank(2)),
            SquareSet::from_file(4).without(22).with(21).with(23)
        );
    }

    #[test]
    fn cannon_rays_need_a_screen() {
        assert_eq!(cannon_attacks(22, SquareSet::EMPTY), cross(4, 2));
        assert_eq!(cannon_attacks(0, SquareSet::from_squares(&[1, 9])), SquareSet::EMPTY);
        assert_eq!(
            cannon_attacks(0, SquareSet::from_squares(&[1, 2, 9, 18])),
            SquareSet::from_squares(&[2, 18])
        );
        assert_eq!(
            cannon_attacks(22, SquareSet::from_squares(&[19, 24, 26, 49, 67])),
            SquareSet::from_squares(&[20, 21, 23, 26, 4, 13, 31, 40, 67])
        );
        assert_eq!(
            cannon_attacks(22, SquareSet::from_squares(&[20, 24])),
            SquareSet::from_file(4).without(22).with(21).with(23)
        );
        assert_eq!(
            cannon_attacks(22, SquareSet::from_squares(&[18, 20, 24, 26])),
            SquareSet::from_file(4)
                .without(22)
                .union(SquareSet::from_squares(&[18, 21, 23, 26]))
        );
    }

    #[test]
    fn cannon_mounts_are_optional() {
        let occupied = SquareSet::from_squares(&[1, 2, 9, 18]);
        assert_eq!(
            cannon_attacks_with_mounts(0, occupied),
            SquareSet::from_squares(&[1, 2, 9, 18])
        );
        let occupied = SquareSet::from_squares(&[1, 9]);
        assert_eq!(cannon_attacks_with_mounts(0, occupied), occupied);
    }

    #[test]
    fn squares_between() {
        assert_eq!(between(42, 42), SquareSet::EMPTY);
        assert_eq!(squares(between(0, 3)), vec![1, 2]);
        assert_eq!(squares(between(3, 0)), vec![1, 2]);
        assert_eq!(squares(between(0, 18)), vec![9]);
        assert_eq!(squares(between(0, 27)), vec![9, 18]);
        assert_eq!(squares(between(87, 89)), vec![88]);
        assert_eq!(squares(between(4, 85)), vec![13, 22, 31, 40, 49, 58, 67, 76]);
        assert!(between(61, 47).is_empty());
        assert!(between(0, 1).is_empty());
    }

    #[test]
    fn placement_tables() {
        for color in Color::ALL {
            assert!(ADVISOR_SQUARES[color.index()].is_subset(KING_SQUARES[color.index()]));
            assert_eq!(ELEPHANT_SQUARES[color.index()].count(), 7);
            assert_eq!(PAWN_SQUARES[color.index()].count(), 55);
        }
        assert_eq!(
            squares(PAWN_SQUARES[Color::Red.index()]).into_iter().take(10).collect::<Vec<_>>(),
            vec![27, 29, 31, 33, 35, 36, 38, 40, 42, 44]
        );
        assert!(PAWN_SQUARES[Color::Black.index()].contains(0));
        assert!(!PAWN_SQUARES[Color::Black.index()].contains(46));
    }
}
