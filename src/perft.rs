// Leaf counting over the legal move tree, for checking move generation
// against published node counts.

use crate::position::Position;
use crate::types::Move;

pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let dests = pos.all_dests();
    if depth == 1 {
        return dests.values().map(|to| to.count() as u64).sum();
    }

    let mut nodes = 0u64;
    for (from, to_set) in dests {
        for to in to_set {
            let mut child = *pos;
            child.play(Move::new(from, to));
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}

/// Node count below each root move, in generation order.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    let mut counts = Vec::new();
    for m in pos.legal_moves() {
        let mut child = *pos;
        child.play(m);
        counts.push((m, perft(&child, depth.saturating_sub(1))));
    }
    counts
}
