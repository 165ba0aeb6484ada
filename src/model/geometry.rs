//! # Board geometry
//!
//! Pure functions over squares; no game state. Rays are produced
//! closer-squares-first so occupancy scans can stop at the first
//! blocker.

use crate::model::{BoardRank, ChessColor, CompassRose, Square};

/// All squares along a compass direction from `from`, nearest first,
/// not including `from` itself.
pub fn ray(from: Square, dir: CompassRose) -> impl Iterator<Item = Square> {
    std::iter::successors(from.step(dir), move |sq| sq.step(dir))
}

/// The up-to-eight knight jumps from a square.
pub fn knight_jumps(from: Square) -> impl Iterator<Item = Square> {
    const JUMPS: [(i8, i8); 8] = [
        (1, 2),
        (2, 1),
        (2, -1),
        (1, -2),
        (-1, -2),
        (-2, -1),
        (-2, 1),
        (-1, 2),
    ];
    JUMPS.into_iter().filter_map(move |(f, r)| from.offset(f, r))
}

/// The up-to-eight squares a king can step to from a square.
pub fn king_steps(from: Square) -> impl Iterator<Item = Square> {
    [CompassRose::ORTHOGONALS, CompassRose::DIAGONALS]
        .concat()
        .into_iter()
        .filter_map(move |dir| from.step(dir))
}

/// The two squares a pawn of the given color attacks from a square.
///
/// This is the capture pattern, not the movement pattern; it is what
/// threat detection wants.
pub fn pawn_attacks(from: Square, color: ChessColor) -> impl Iterator<Item = Square> {
    let rank = color.sign();
    [(-1, rank), (1, rank)]
        .into_iter()
        .filter_map(move |(f, r)| from.offset(f, r))
}

/// The diagonal coloring of the chessboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    LIGHT,
    DARK,
}

/// The diagonal color of a square: light when file + rank is odd,
/// counting the a-file as 1.
pub fn shade(sq: Square) -> Shade {
    let (f, r) = sq.coords();
    if (f as u8 + r as u8) % 2 == 1 {
        Shade::LIGHT
    } else {
        Shade::DARK
    }
}

/// Whether `sq` lies on the straight line from `from` in direction
/// `dir`, and every square strictly between passes the predicate.
pub fn open_line(
    from: Square,
    dir: CompassRose,
    to: Square,
    mut empty: impl FnMut(Square) -> bool,
) -> bool {
    for sq in ray(from, dir) {
        if sq == to {
            return true;
        }
        if !empty(sq) {
            return false;
        }
    }
    false
}

/// Double-push geometry: the rank a pawn double-steps from.
pub fn pawn_start_rank(color: ChessColor) -> BoardRank {
    match color {
        ChessColor::WHITE => BoardRank::_2,
        ChessColor::BLACK => BoardRank::_7,
    }
}

#[test]
fn rays_are_closer_first() {
    let northwest: Vec<Square> = ray(Square::e4, CompassRose::NORTHWEST).collect();
    assert_eq!(
        northwest,
        vec![Square::f5, Square::g6, Square::h7]
    );

    let south: Vec<Square> = ray(Square::c3, CompassRose::SOUTH).collect();
    assert_eq!(south, vec![Square::c2, Square::c1]);

    assert_eq!(ray(Square::h5, CompassRose::WEST).count(), 0);
}

#[test]
fn knight_jump_counts() {
    assert_eq!(knight_jumps(Square::a1).count(), 2);
    assert_eq!(knight_jumps(Square::b1).count(), 3);
    assert_eq!(knight_jumps(Square::e4).count(), 8);
}

#[test]
fn corner_king_steps() {
    let mut steps: Vec<Square> = king_steps(Square::h1).collect();
    steps.sort();
    assert_eq!(steps, vec![Square::g1, Square::g2, Square::h2]);
}

#[test]
fn shade_of_known_squares() {
    // a1 is the classic dark corner; h1 the light one.
    assert_eq!(shade(Square::a1), Shade::DARK);
    assert_eq!(shade(Square::h1), Shade::LIGHT);
    assert_eq!(shade(Square::h8), Shade::DARK);
    assert_eq!(shade(Square::b2), Shade::DARK);
    assert_eq!(shade(Square::g8), Shade::LIGHT);
}

#[test]
fn pawn_attack_directions() {
    let white: Vec<Square> = pawn_attacks(Square::e4, ChessColor::WHITE).collect();
    assert_eq!(white, vec![Square::d5, Square::f5]);

    let black_edge: Vec<Square> = pawn_attacks(Square::a7, ChessColor::BLACK).collect();
    assert_eq!(black_edge, vec![Square::b6]);
}
