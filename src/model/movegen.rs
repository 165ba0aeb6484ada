//! # Pseudo-legal move generation
//!
//! Destination sets per chessman, honouring geometry, occupancy and the
//! en-passant window, but *not* the own-king-in-check rule. Legality
//! filtering happens in the applier by speculative play, which is
//! simpler and loses little at this scale.

use crate::model::game::Game;
use crate::model::geometry::{king_steps, knight_jumps, pawn_start_rank, ray};
use crate::model::{
    CastlingDirection, ChessColor, ChessPiece, CompassRose, Square,
};

impl Game {
    /// Pseudo-legal destinations of the man on `sq`; empty when the
    /// square is.
    pub fn destinations(&self, sq: Square) -> Vec<Square> {
        let Some(man) = self.piece_at(sq) else {
            return vec![];
        };

        match man.kind {
            ChessPiece::PAWN => self.pawn_destinations(sq, man.color),
            ChessPiece::KNIGHT => knight_jumps(sq)
                .filter(|to| !self.is_own(*to, man.color))
                .collect(),
            ChessPiece::BISHOP => self.slides(sq, man.color, &CompassRose::DIAGONALS),
            ChessPiece::ROOK => self.slides(sq, man.color, &CompassRose::ORTHOGONALS),
            ChessPiece::QUEEN => {
                let mut dests = self.slides(sq, man.color, &CompassRose::ORTHOGONALS);
                dests.extend(self.slides(sq, man.color, &CompassRose::DIAGONALS));
                dests
            }
            ChessPiece::KING => {
                let mut dests: Vec<Square> = king_steps(sq)
                    .filter(|to| !self.is_own(*to, man.color))
                    .collect();
                dests.extend(self.castle_destinations(sq, man.color));
                dests
            }
        }
    }

    /// Ray prefixes: up to but not including an own blocker, up to and
    /// including an enemy blocker.
    fn slides(&self, sq: Square, color: ChessColor, dirs: &[CompassRose]) -> Vec<Square> {
        let mut dests = vec![];

        for dir in dirs {
            for to in ray(sq, *dir) {
                match self.piece_at(to) {
                    None => dests.push(to),
                    Some(man) if man.color != color => {
                        dests.push(to);
                        break;
                    }
                    Some(_) => break,
                }
            }
        }

        dests
    }

    fn pawn_destinations(&self, sq: Square, color: ChessColor) -> Vec<Square> {
        let mut dests = vec![];
        let climb = color.sign();

        if let Some(one) = sq.offset(0, climb) {
            if self.is_empty_square(one) {
                dests.push(one);

                if sq.rank() == pawn_start_rank(color) {
                    if let Some(two) = sq.offset(0, 2 * climb) {
                        if self.is_empty_square(two) {
                            dests.push(two);
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(diag) = sq.offset(side, climb) else {
                continue;
            };

            if self.is_enemy(diag, color) {
                dests.push(diag);
            } else if let Some(ep) = self.en_passant {
                // Only the side the doubled pawn belongs to is barred.
                if ep.square == diag
                    && self
                        .piece_at(ep.capture)
                        .is_some_and(|pawn| pawn.color != color)
                {
                    dests.push(diag);
                }
            }
        }

        dests
    }

    /// Castle destinations: the g/c landing file while the right is
    /// live; under Chess960 also the implicated rook's home square.
    fn castle_destinations(&self, sq: Square, color: ChessColor) -> Vec<Square> {
        let mut dests = vec![];

        if sq != self.rules.king_home(color) {
            return dests;
        }

        for dir in [CastlingDirection::EAST, CastlingDirection::WEST] {
            if !self.right(color, dir) {
                continue;
            }

            let landing = self.rules.king_landing(color, dir);
            if landing != sq {
                dests.push(landing);
            }

            if self.rules.chess960 {
                let rook = self.rules.rook_home(color, dir);
                if rook != landing {
                    dests.push(rook);
                }
            }
        }

        dests
    }

    pub(crate) fn is_own(&self, sq: Square, color: ChessColor) -> bool {
        self.piece_at(sq).is_some_and(|man| man.color == color)
    }

    pub(crate) fn is_enemy(&self, sq: Square, color: ChessColor) -> bool {
        self.piece_at(sq).is_some_and(|man| man.color != color)
    }
}

#[allow(unused)]
fn sorted(mut dests: Vec<Square>) -> Vec<Square> {
    dests.sort();
    dests.dedup();
    dests
}

#[test]
fn opening_knight_and_pawn_moves() {
    let game = Game::new();

    assert_eq!(
        sorted(game.destinations(Square::g1)),
        vec![Square::f3, Square::h3]
    );
    assert_eq!(
        sorted(game.destinations(Square::e2)),
        vec![Square::e3, Square::e4]
    );
    // Sliders are boxed in at the start.
    assert_eq!(game.destinations(Square::c1), vec![]);
    assert_eq!(game.destinations(Square::d1), vec![]);
    assert_eq!(game.destinations(Square::a1), vec![]);
}

#[test]
fn slider_stops_at_first_blocker() {
    let game = Game::from_fen("4k3/8/8/3q4/8/1P6/8/4K2R w K - 0 1").unwrap();

    // The rook ray north stops where it stands; west is blocked by the king.
    let rook = sorted(game.destinations(Square::h1));
    assert!(rook.contains(&Square::h8));
    assert!(rook.contains(&Square::g1));
    assert!(!rook.contains(&Square::e1));

    // The black queen can take the b3 pawn but not pass through it.
    let queen = sorted(game.destinations(Square::d5));
    assert!(queen.contains(&Square::b3));
    assert!(!queen.contains(&Square::a2));
}

#[test]
fn pawn_captures_and_en_passant_window() {
    let mut game = Game::new();
    game.play_san("e4").unwrap();
    game.play_san("d5").unwrap();
    game.play_san("e5").unwrap();
    game.play_san("f5").unwrap();

    // The e5 pawn may push, or take f6 en passant; d5 is its own
    // doubled enemy no longer, so no capture there.
    let dests = sorted(game.destinations(Square::e5));
    assert_eq!(dests, vec![Square::e6, Square::f6]);
}

#[test]
fn king_gains_castle_destinations() {
    let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let dests = game.destinations(Square::e1);
    assert!(dests.contains(&Square::c1));
    assert!(dests.contains(&Square::g1));

    let none = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    let dests = none.destinations(Square::e1);
    assert!(!dests.contains(&Square::c1));
    assert!(!dests.contains(&Square::g1));
}
