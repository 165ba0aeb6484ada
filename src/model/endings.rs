//! # How games end
//!
//! Checkmate, stalemate, and the draws — forced (stalemate, fivefold
//! repetition, bare-material) and claimable (threefold, the 50-move
//! rule). Everything here reads the position or probes it inside a
//! snapshot; no query leaves a trace in the move log or the ledger.

use crate::model::game::Game;
use crate::model::geometry::{king_steps, shade};
use crate::model::{
    CastlingDirection, ChessColor, ChessPiece, Outcome, Square,
};

impl Game {
    /// Checkmate for the side to move.
    pub fn in_checkmate(&mut self) -> bool {
        self.in_checkmate_of(self.to_move)
    }

    /// A king is mated when it is in check, cannot step anywhere safe,
    /// and — unless it is double check — no friendly man can block or
    /// capture the checker without abandoning the king.
    pub(crate) fn in_checkmate_of(&mut self, color: ChessColor) -> bool {
        let attackers = self.check(color).attackers().to_vec();
        if attackers.is_empty() {
            return false;
        }

        let Some(king) = self.field.king(color) else {
            return false;
        };

        for to in king_steps(king) {
            if self.is_own(to, color) {
                continue;
            }
            if self.keeps_king_safe(king, to, color) {
                return false;
            }
        }

        if attackers.len() > 1 {
            return true;
        }

        let attacker = attackers[0];
        let path = self.path_to_king(attacker, king);
        let defenders: Vec<Square> = self
            .field
            .men(color)
            .filter(|man| man.kind != ChessPiece::KING)
            .map(|man| man.square)
            .collect();

        for from in defenders {
            let dests = self.destinations(from);
            for sq in &path {
                if dests.contains(sq) && self.keeps_king_safe(from, *sq, color) {
                    return false;
                }
            }

            // A checking pawn fresh off a double step can fall to an
            // en-passant capture the path squares never mention.
            if let Some(ep) = self.en_passant {
                if ep.capture == attacker
                    && dests.contains(&ep.square)
                    && self.keeps_king_safe(from, ep.square, color)
                {
                    return false;
                }
            }
        }

        true
    }

    /// Stalemate: the side to move has no legal move and is not in
    /// check.
    pub fn in_stalemate(&mut self) -> bool {
        !self.in_check(self.to_move) && !self.has_any_legal_move()
    }

    /// Exhaustive probe of every own move, each inside a snapshot.
    pub(crate) fn has_any_legal_move(&mut self) -> bool {
        let us = self.to_move;
        let men: Vec<Square> = self.field.men(us).map(|man| man.square).collect();

        for from in men {
            for to in self.destinations(from) {
                // Castle destinations get the full castling validator
                // below; a 960 rook-home destination is own-occupied
                // and must not be probed as a plain step.
                if self.is_own(to, us) {
                    continue;
                }
                let disguised = self
                    .piece_at(from)
                    .is_some_and(|man| man.kind == ChessPiece::KING)
                    && self.castle_in_disguise(to).is_some();
                if disguised {
                    continue;
                }

                if self.keeps_king_safe(from, to, us) {
                    return true;
                }
            }
        }

        for dir in [CastlingDirection::EAST, CastlingDirection::WEST] {
            if !self.right(us, dir) {
                continue;
            }
            self.begin();
            let possible = self.castle(dir).is_ok();
            self.rollback();
            if possible {
                return true;
            }
        }

        false
    }

    /// The half-move clock has reached 100 plies: a claimable draw.
    pub fn in_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// The position has stood at least three times: a claimable draw.
    pub fn in_repetition_draw(&self) -> bool {
        self.repetitions() >= 3
    }

    /// The position has stood at least five times: a forced draw.
    pub fn in_fivefold_draw(&self) -> bool {
        self.repetitions() >= 5
    }

    /// Bare-material draw: with at most two non-king men on the board,
    /// king against king, a lone minor either side, two knights
    /// against a bare king, or minor against minor — except bishops on
    /// opposite shades, which can still construct a mate.
    pub fn in_basic_draw(&self) -> bool {
        use ChessPiece::*;

        let mut minors: [Vec<(ChessPiece, Square)>; 2] = [vec![], vec![]];

        for color in [ChessColor::WHITE, ChessColor::BLACK] {
            for man in self.field.men(color) {
                match man.kind {
                    KING => {}
                    KNIGHT | BISHOP => minors[color.ix()].push((man.kind, man.square)),
                    _ => return false,
                }
            }
        }

        let [white, black] = minors;
        match (&white[..], &black[..]) {
            ([], []) => true,
            ([_], []) | ([], [_]) => true,
            ([(a, _), (b, _)], []) | ([], [(a, _), (b, _)]) => {
                *a == KNIGHT && *b == KNIGHT
            }
            ([(BISHOP, ours)], [(BISHOP, theirs)]) => shade(*ours) == shade(*theirs),
            ([_], [_]) => true,
            _ => false,
        }
    }

    /// Whether a side still has the material to deliver mate at all:
    /// any queen, rook or pawn; or two bishops; or three knights; or
    /// bishop and knight together.
    pub fn mating_material(&self, color: ChessColor) -> bool {
        use ChessPiece::*;

        let mut bishops = 0;
        let mut knights = 0;

        for man in self.field.men(color) {
            match man.kind {
                QUEEN | ROOK | PAWN => return true,
                BISHOP => bishops += 1,
                KNIGHT => knights += 1,
                KING => {}
            }
        }

        bishops >= 2 || knights >= 3 || (bishops >= 1 && knights >= 1)
    }

    /// Any forced end of the game right now: stalemate, fivefold
    /// repetition, or bare material. Claimable draws do not count.
    pub fn in_forced_draw(&mut self) -> bool {
        self.in_fivefold_draw() || self.in_basic_draw() || self.in_stalemate()
    }

    /// The verdict, if the game is over: the winner on checkmate, a
    /// draw on any forced draw, `None` while play continues.
    pub fn game_over(&mut self) -> Option<Outcome> {
        if self.in_checkmate() {
            return Some(Outcome::Win(self.to_move.opp()));
        }
        if self.in_forced_draw() {
            return Some(Outcome::Draw);
        }
        None
    }
}

#[test]
fn back_rank_mate_is_mate() {
    let mut game = Game::from_fen("3k2R1/8/3K4/8/8/8/8/8 b - -").unwrap();
    assert!(game.in_checkmate());
    assert!(!game.in_stalemate());
    assert_eq!(game.game_over(), Some(Outcome::Win(ChessColor::WHITE)));
}

#[test]
fn mate_by_queen_chase() {
    let mut game = Game::from_fen("rn3b1N/pp2k2p/4p2q/1NQ5/3P4/8/PPP3PP/5RK1 b - - 1 1").unwrap();

    for mv in ["Kd8", "Qc7+", "Ke8", "Qc8+", "Ke7", "Rf7#"] {
        game.play_san(mv).unwrap();
    }

    assert_eq!(game.game_over(), Some(Outcome::Win(ChessColor::WHITE)));
    let marked = game.log().marked();
    assert_eq!(marked[1], "Qc7+");
    assert_eq!(marked[3], "Qc8+");
    assert_eq!(marked[5], "Rf7#");
}

#[test]
fn cornered_king_stalemate() {
    let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();

    let log_before = game.log().clone();
    assert!(game.in_stalemate());
    assert!(game.in_forced_draw());
    assert!(!game.in_checkmate());
    assert_eq!(game.game_over(), Some(Outcome::Draw));

    // The probing must not leave a trace in the record.
    assert_eq!(*game.log(), log_before);
}

#[test]
fn interposition_and_escape_defeat_mate() {
    // The classic back rank: boxed in by its own pawns, nothing to
    // interpose, mate.
    let mut mated = Game::from_fen("6k1/8/8/8/8/8/5PPP/r5K1 w - -").unwrap();
    assert!(mated.in_checkmate());

    // The same rank with a knight on d2, which can drop back to block
    // on f1 (or b1). Not mate.
    let mut blockable = Game::from_fen("6k1/8/8/8/8/8/3N1PPP/r5K1 w - -").unwrap();
    assert!(blockable.in_check(ChessColor::WHITE));
    assert!(!blockable.in_checkmate());

    // And with the g2 pawn gone the king simply steps out.
    let mut roomy = Game::from_fen("6k1/8/8/8/8/8/5P1P/r5K1 w - -").unwrap();
    assert!(!roomy.in_checkmate());
}

#[test]
fn double_check_forces_the_king_to_move() {
    use crate::model::attacking::Check;

    // Rook and bishop check together; either alone could be blocked,
    // but the king has no square, so together they mate.
    let mut game = Game::from_fen("k3r3/8/8/8/7b/8/3P4/3RKB2 w - -").unwrap();
    assert!(matches!(game.check(ChessColor::WHITE), Check::Many(_)));
    assert!(game.in_checkmate());
}

#[test]
fn bishop_shades_decide_the_basic_draw() {
    let same = Game::from_fen("7B/8/8/8/8/6k1/1b6/5K2 w - -").unwrap();
    assert!(same.in_basic_draw());

    let different = Game::from_fen("6B1/8/8/8/8/6k1/1b6/5K2 w - -").unwrap();
    assert!(!different.in_basic_draw());

    let bare = Game::from_fen("8/8/8/8/8/6k1/8/5K2 w - -").unwrap();
    assert!(bare.in_basic_draw());

    let two_knights = Game::from_fen("8/8/8/3NN3/8/6k1/8/5K2 w - -").unwrap();
    assert!(two_knights.in_basic_draw());

    let knight_and_bishop = Game::from_fen("8/8/8/3NB3/8/6k1/8/5K2 w - -").unwrap();
    assert!(!knight_and_bishop.in_basic_draw());

    let rook = Game::from_fen("8/8/8/3R4/8/6k1/8/5K2 w - -").unwrap();
    assert!(!rook.in_basic_draw());
}

#[test]
fn mating_material_census() {
    let game = Game::from_fen("8/8/8/3R4/8/6k1/8/5K2 w - -").unwrap();
    assert!(game.mating_material(ChessColor::WHITE));
    assert!(!game.mating_material(ChessColor::BLACK));

    let two_bishops = Game::from_fen("8/8/8/3BB3/8/6k1/8/5K2 w - -").unwrap();
    assert!(two_bishops.mating_material(ChessColor::WHITE));

    let lone_bishop = Game::from_fen("8/8/8/3B4/8/6k1/8/5K2 w - -").unwrap();
    assert!(!lone_bishop.mating_material(ChessColor::WHITE));

    let pair = Game::from_fen("8/8/8/3BN3/8/6k1/8/5K2 w - -").unwrap();
    assert!(pair.mating_material(ChessColor::WHITE));

    let two_knights = Game::from_fen("8/8/8/3NN3/8/6k1/8/5K2 w - -").unwrap();
    assert!(!two_knights.mating_material(ChessColor::WHITE));

    let pawn = Game::from_fen("8/8/8/3P4/8/6k1/8/5K2 w - -").unwrap();
    assert!(pawn.mating_material(ChessColor::WHITE));
}

#[test]
fn shuffling_knights_to_a_fivefold_draw() {
    let mut game = Game::new();

    // Nc3 Nc6 Nb1 Nb8, around and around. The starting position
    // recurs after every fourth ply; at the twentieth it has stood
    // five times beyond the seed.
    let mut plies = 0;
    'outer: for _ in 0..6 {
        for mv in ["Nc3", "Nc6", "Nb1", "Nb8"] {
            game.play_san(mv).unwrap();
            plies += 1;

            if plies == 8 {
                // Two full cycles: thrice on the board, claimable only.
                assert!(game.in_repetition_draw());
                assert!(!game.in_fivefold_draw());
                assert!(!game.in_forced_draw());
                assert_eq!(game.game_over(), None);
            }

            if game.in_fivefold_draw() {
                break 'outer;
            }
        }
    }

    assert!(plies <= 22);
    assert!(game.in_repetition_draw());
    assert!(game.in_forced_draw());
    assert_eq!(game.game_over(), Some(Outcome::Draw));
}

#[test]
fn fifty_move_clock_is_claimable_not_forced() {
    let mut game = Game::from_fen("8/8/8/3R4/8/6k1/8/5K2 w - - 99 80").unwrap();
    assert!(!game.in_fifty_move_draw());

    game.play_san("Ra5").unwrap();
    assert!(game.in_fifty_move_draw());
    assert_eq!(game.game_over(), None);
}
