//! # Threat and check detection
//!
//! Whether a square is attacked, by whom, and — when the attacker
//! checks a king — which squares an interposing piece could use to
//! block or capture it.

use crate::model::game::Game;
use crate::model::geometry::{king_steps, knight_jumps, open_line, pawn_attacks, ray};
use crate::model::{ChessColor, ChessPiece, CompassRose, Square};

/// The check status of one king.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Safe,
    One(Square),
    Many(Vec<Square>),
}

impl Check {
    pub fn is_safe(&self) -> bool {
        matches!(self, Check::Safe)
    }

    /// The checking squares, empty when safe.
    pub fn attackers(&self) -> &[Square] {
        match self {
            Check::Safe => &[],
            Check::One(sq) => std::slice::from_ref(sq),
            Check::Many(sqs) => sqs,
        }
    }
}

impl Game {
    /// Squares of every `by`-colored man that attacks `sq`.
    ///
    /// Pawns count by their attack pattern, not their movement; rays
    /// stop at the first blocker.
    pub fn attackers_of(&self, sq: Square, by: ChessColor) -> Vec<Square> {
        let mut attackers = vec![];

        // Leapers and the king: look outward from the target.
        for from in knight_jumps(sq) {
            if self.holds(from, by, ChessPiece::KNIGHT) {
                attackers.push(from);
            }
        }
        for from in king_steps(sq) {
            if self.holds(from, by, ChessPiece::KING) {
                attackers.push(from);
            }
        }

        // A pawn attacks `sq` iff `sq` pawn-attacks it in reverse.
        for from in pawn_attacks(sq, by.opp()) {
            if self.holds(from, by, ChessPiece::PAWN) {
                attackers.push(from);
            }
        }

        for dir in CompassRose::ORTHOGONALS {
            if let Some(from) = self.first_man_along(sq, dir) {
                if self.holds(from, by, ChessPiece::ROOK)
                    || self.holds(from, by, ChessPiece::QUEEN)
                {
                    attackers.push(from);
                }
            }
        }

        for dir in CompassRose::DIAGONALS {
            if let Some(from) = self.first_man_along(sq, dir) {
                if self.holds(from, by, ChessPiece::BISHOP)
                    || self.holds(from, by, ChessPiece::QUEEN)
                {
                    attackers.push(from);
                }
            }
        }

        attackers
    }

    pub fn is_attacked(&self, sq: Square, by: ChessColor) -> bool {
        !self.attackers_of(sq, by).is_empty()
    }

    /// The check status of a color's king.
    pub fn check(&self, color: ChessColor) -> Check {
        let Some(king) = self.field.king(color) else {
            return Check::Safe;
        };

        let mut attackers = self.attackers_of(king, color.opp());
        match attackers.len() {
            0 => Check::Safe,
            1 => Check::One(attackers.remove(0)),
            _ => Check::Many(attackers),
        }
    }

    pub fn in_check(&self, color: ChessColor) -> bool {
        !self.check(color).is_safe()
    }

    /// Squares where an interposing man could block or capture the
    /// checker: the attacker's own square, plus — for sliders — the
    /// open line between king and attacker.
    pub fn path_to_king(&self, attacker: Square, king: Square) -> Vec<Square> {
        let kind = match self.piece_at(attacker) {
            Some(man) => man.kind,
            None => return vec![],
        };

        if matches!(kind, ChessPiece::KNIGHT | ChessPiece::PAWN | ChessPiece::KING) {
            return vec![attacker];
        }

        for dir in [CompassRose::ORTHOGONALS, CompassRose::DIAGONALS].concat() {
            if open_line(king, dir, attacker, |sq| self.is_empty_square(sq)) {
                let mut path = vec![];
                for sq in ray(king, dir) {
                    path.push(sq);
                    if sq == attacker {
                        break;
                    }
                }
                return path;
            }
        }

        vec![]
    }

    fn holds(&self, sq: Square, color: ChessColor, kind: ChessPiece) -> bool {
        self.piece_at(sq)
            .is_some_and(|man| man.color == color && man.kind == kind)
    }

    fn first_man_along(&self, sq: Square, dir: CompassRose) -> Option<Square> {
        ray(sq, dir).find(|to| !self.is_empty_square(*to))
    }
}

#[test]
fn startpos_threat_picture() {
    let game = Game::new();

    // e4 is covered by nothing; f3 by the g1 knight and e2/g2 pawns... from white's side.
    assert!(!game.is_attacked(Square::e4, ChessColor::BLACK));
    let f3: Vec<Square> = game.attackers_of(Square::f3, ChessColor::WHITE);
    assert!(f3.contains(&Square::g1));
    assert!(f3.contains(&Square::e2));
    assert!(f3.contains(&Square::g2));

    assert!(game.check(ChessColor::WHITE).is_safe());
    assert!(game.check(ChessColor::BLACK).is_safe());
}

#[test]
fn sliders_attack_through_open_lines_only() {
    let game = Game::from_fen("4k3/8/8/8/b7/8/2P5/4K3 w - - 0 1").unwrap();

    // The a4 bishop eyes e1 through b3, c2, d1 — blocked at c2.
    assert!(!game.is_attacked(Square::e1, ChessColor::BLACK));
    assert!(game.is_attacked(Square::b3, ChessColor::BLACK));

    let open = Game::from_fen("4k3/8/8/8/b7/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(open.check(ChessColor::WHITE), Check::One(Square::a4));
}

#[test]
fn double_check_lists_both_attackers() {
    // The e8 rook and the d3 knight both hit the white king at once.
    let game = Game::from_fen("2k1r3/8/8/8/8/3n4/8/4K3 w - - 0 1").unwrap();
    match game.check(ChessColor::WHITE) {
        Check::Many(attackers) => {
            assert!(attackers.contains(&Square::e8));
            assert!(attackers.contains(&Square::d3));
        }
        other => panic!("expected double check, got {:?}", other),
    }
}

#[test]
fn interposition_path_runs_king_to_attacker() {
    let game = Game::from_fen("k3r3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(
        game.path_to_king(Square::e8, Square::e1),
        vec![
            Square::e2,
            Square::e3,
            Square::e4,
            Square::e5,
            Square::e6,
            Square::e7,
            Square::e8
        ]
    );

    let knight = Game::from_fen("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1").unwrap();
    assert_eq!(
        knight.path_to_king(Square::d3, Square::e1),
        vec![Square::d3]
    );
}
