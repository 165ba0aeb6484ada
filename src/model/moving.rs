//! # The move applier
//!
//! One state machine turns a parsed move into a position change, or an
//! error and no change at all. Every entry point snapshots the game
//! first and rolls back on any failure, so the observable state is
//! untouched when an `Err` comes back.
//!
//! Square-pair and PMN inputs are converted to SAN and re-parsed, so
//! every move walks the same validation and lands in the same log.

use crate::error::{ChessError, Result};
use crate::model::castling::file_span;
use crate::model::game::Game;
use crate::model::{
    BoardFile, BoardRank, CastlingDirection, ChessColor, ChessOfficer, ChessPiece, EnPassant,
    PawnPromotion, Square,
};
use crate::notation::{
    CoordNotation, InCheck, StdAlgCastling, StdAlgNotation, StdAlgOfficer, StdAlgPawn, pmn,
    stdalg,
};

impl Game {
    /// Parse and play one SAN move for the side to move.
    pub fn play_san(&mut self, text: &str) -> Result<()> {
        let san = stdalg::parse(text)?;
        self.begin();
        match self.apply(san) {
            Ok(()) => {
                self.commit();
                Ok(())
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Decode and play one PMN pair.
    pub fn play_pmn(&mut self, text: &str) -> Result<()> {
        self.play_coord(pmn::decode(text)?)
    }

    /// Play a from/to/promotion triple by way of its SAN rendering.
    pub fn play_coord(&mut self, mv: CoordNotation) -> Result<()> {
        let san = self.san_for(mv)?;
        self.play_san(&san.to_string())
    }

    /// The PMN pair for a triple, promotion glyphs included.
    pub fn pmn_for(&self, mv: CoordNotation) -> Result<String> {
        pmn::encode(mv)
    }

    fn apply(&mut self, san: StdAlgNotation) -> Result<()> {
        let text = match san {
            StdAlgNotation::Castling(StdAlgCastling::OO(_)) => {
                self.castle(CastlingDirection::WEST)?
            }
            StdAlgNotation::Castling(StdAlgCastling::OOO(_)) => {
                self.castle(CastlingDirection::EAST)?
            }
            StdAlgNotation::Placement(place) => {
                // Wild placement is parsed but a standard game refuses it.
                return Err(
                    if place.piece == ChessPiece::PAWN
                        && matches!(place.to.rank(), BoardRank::_1 | BoardRank::_8)
                    {
                        ChessError::CantPlaceOnBackRank {
                            rank: place.to.rank(),
                        }
                    } else {
                        ChessError::NoPieceCanDoThat {
                            piece: place.piece,
                            to: place.to,
                        }
                    },
                );
            }
            StdAlgNotation::Pawn(mv) => self.pawn_move(mv)?,
            StdAlgNotation::Officer(mv) => self.officer_move(mv)?,
        };

        self.conclude(text);
        Ok(())
    }

    /// Shared tail of every successful transition: log, annotate,
    /// flip, count, fingerprint.
    fn conclude(&mut self, san: String) {
        self.log.push(san);

        let them = self.to_move.opp();
        if self.in_check(them) {
            if self.in_checkmate_of(them) {
                self.log.mark_last(InCheck::Mate);
            } else {
                self.log.mark_last(InCheck::Check);
            }
        }

        self.to_move = them;
        if them.is_white() {
            self.turn += 1;
        }

        self.record_position();
    }

    pub(crate) fn castle(&mut self, dir: CastlingDirection) -> Result<String> {
        let us = self.to_move;

        if self.in_check(us) {
            return Err(ChessError::InCheck { color: us });
        }

        if !self.right(us, dir) {
            return Err(match dir {
                CastlingDirection::WEST => ChessError::CantCastleKingside { color: us },
                CastlingDirection::EAST => ChessError::CantCastleQueenside { color: us },
            });
        }

        let king_from = self.rules.king_home(us);
        let rook_from = self.rules.rook_home(us, dir);
        let king_to = self.rules.king_landing(us, dir);
        let rook_to = self.rules.rook_landing(us, dir);
        let home = BoardRank::home(us);

        // Everything the two movers sweep over must be clear of third
        // pieces: the span between them, the king's walk, and both
        // landing squares.
        let clear = |a: BoardFile, b: BoardFile| -> Result<()> {
            for file in file_span(a, b) {
                let sq = Square::from_coords(file, home);
                if sq != king_from && sq != rook_from && !self.is_empty_square(sq) {
                    return Err(ChessError::CastlePiecesInWay { square: sq });
                }
            }
            Ok(())
        };
        clear(king_from.file(), rook_from.file())?;
        clear(king_from.file(), king_to.file())?;
        clear(rook_from.file(), rook_to.file())?;

        // The rook steps aside while the king walks a square at a
        // time; on any failure the entry snapshot rolls all this back.
        let rook = self.field.lift(rook_from).ok_or(ChessError::NoPiece {
            square: rook_from,
        })?;

        let mut cursor = king_from;
        while cursor != king_to {
            let toward = (king_to.file() as i8 - cursor.file() as i8).signum();
            let next = cursor
                .offset(toward, 0)
                .expect("the walk stays on the home rank");
            self.field.shift(cursor, next);
            cursor = next;

            if self.is_attacked(cursor, us.opp()) {
                return Err(ChessError::CastleWouldCheck { square: cursor });
            }
        }

        self.field.put(rook, rook_to);

        self.rights[us.ix()] = [false; 2];
        self.en_passant = None;
        self.halfmove_clock += 1;

        Ok(match dir {
            CastlingDirection::WEST => "O-O".to_string(),
            CastlingDirection::EAST => "O-O-O".to_string(),
        })
    }

    fn pawn_move(&mut self, mv: StdAlgPawn) -> Result<String> {
        let us = self.to_move;
        let was_check = self.in_check(us);
        let to = mv.to;

        let from = self.resolve(ChessPiece::PAWN, mv.from_file, mv.from_rank, to)?;

        let target = self.piece_at(to);
        let en_passant = self.en_passant.filter(|ep| {
            ep.square == to
                && from.file() != to.file()
                && self.piece_at(ep.capture).is_some_and(|p| p.color != us)
        });

        if mv.capture && target.is_none() && en_passant.is_none() {
            return Err(ChessError::NoPiece { square: to });
        }
        if target.is_some_and(|t| t.color == us) {
            return Err(ChessError::CantCaptureOwn { square: to });
        }

        let captures = target.is_some() || en_passant.is_some();
        let promoting = matches!(to.rank(), BoardRank::_1 | BoardRank::_8);

        if mv.promotion.is_some() && !promoting {
            return Err(ChessError::InvalidPromote {
                text: mv.to_string(),
            });
        }
        let promotion = if promoting {
            Some(mv.promotion.unwrap_or(PawnPromotion::QUEEN))
        } else {
            None
        };

        // The log line reflects the position before the move.
        let san = StdAlgNotation::Pawn(if captures {
            StdAlgPawn::takes(from.file(), to, promotion)
        } else {
            StdAlgPawn::push(to, promotion)
        })
        .to_string();

        if let Some(ep) = en_passant {
            self.field.capture(ep.capture);
        } else if target.is_some() {
            self.field.capture(to);
        }
        self.field.shift(from, to);
        if let Some(p) = promotion {
            self.field.promote(to, p);
        }

        if self.in_check(us) {
            return Err(self.check_refusal(us, was_check));
        }

        self.halfmove_clock = 0;
        self.en_passant = if from.rank().ix().abs_diff(to.rank().ix()) == 2 {
            Some(EnPassant {
                square: from.offset(0, us.sign()).expect("between rank 2 and 4"),
                capture: to,
            })
        } else {
            None
        };

        if let Some(fallen) = target {
            self.strip_captured_rook_right(fallen.square);
        }

        Ok(san)
    }

    fn officer_move(&mut self, mv: StdAlgOfficer) -> Result<String> {
        let us = self.to_move;
        let was_check = self.in_check(us);
        let kind: ChessPiece = mv.officer.into();
        let to = mv.to;

        // A king move matching castle geometry is a castle in disguise.
        if mv.officer == ChessOfficer::KING {
            if let Some(dir) = self.castle_in_disguise(to) {
                return self.castle(dir);
            }
        }

        let from = self.resolve(kind, mv.from_file, mv.from_rank, to)?;

        let target = self.piece_at(to);
        if mv.capture && target.is_none() {
            return Err(ChessError::NoPiece { square: to });
        }
        if target.is_some_and(|t| t.color == us) {
            return Err(ChessError::CantCaptureOwn { square: to });
        }

        let san = StdAlgNotation::Officer(StdAlgOfficer::new(
            mv.officer,
            self.needed_file(kind, from, to),
            self.needed_rank(kind, from, to),
            target.is_some(),
            to,
            None,
        ))
        .to_string();

        if target.is_some() {
            self.field.capture(to);
        }
        self.field.shift(from, to);

        if self.in_check(us) {
            return Err(self.check_refusal(us, was_check));
        }

        if target.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        self.en_passant = None;

        if kind == ChessPiece::KING {
            self.rights[us.ix()] = [false; 2];
        }
        if kind == ChessPiece::ROOK {
            for dir in [CastlingDirection::EAST, CastlingDirection::WEST] {
                if from == self.rules.rook_home(us, dir) {
                    self.rights[us.ix()][dir.ix()] = false;
                }
            }
        }
        if let Some(fallen) = target {
            self.strip_captured_rook_right(fallen.square);
        }

        Ok(san)
    }

    /// A capture on an opponent rook-home square kills that right.
    fn strip_captured_rook_right(&mut self, sq: Square) {
        let them = self.to_move.opp();
        for dir in [CastlingDirection::EAST, CastlingDirection::WEST] {
            if sq == self.rules.rook_home(them, dir) {
                self.rights[them.ix()][dir.ix()] = false;
            }
        }
    }

    fn check_refusal(&self, us: ChessColor, was_check: bool) -> ChessError {
        if was_check {
            ChessError::StillInCheck { color: us }
        } else {
            ChessError::MoveWouldCheck { color: us }
        }
    }

    /// From-square resolution: movegen candidates, then the stated
    /// disambiguation, then speculative legality as the tiebreak.
    fn resolve(
        &mut self,
        kind: ChessPiece,
        file: Option<BoardFile>,
        rank: Option<BoardRank>,
        to: Square,
    ) -> Result<Square> {
        let us = self.to_move;

        let mut candidates: Vec<Square> = self
            .field
            .men(us)
            .filter(|man| man.kind == kind)
            .map(|man| man.square)
            .filter(|sq| self.destinations(*sq).contains(&to))
            .collect();

        if candidates.is_empty() {
            return Err(ChessError::NoPieceCanDoThat { piece: kind, to });
        }

        // A lone candidate wins outright, stated disambiguation or no.
        if let [only] = candidates[..] {
            return Ok(only);
        }

        candidates.retain(|sq| {
            file.is_none_or(|f| sq.file() == f) && rank.is_none_or(|r| sq.rank() == r)
        });

        match candidates.len() {
            0 => Err(ChessError::NoPieceCanDoThat { piece: kind, to }),
            1 => Ok(candidates[0]),
            _ => {
                let legal: Vec<Square> = candidates
                    .into_iter()
                    .filter(|from| self.keeps_king_safe(*from, to, us))
                    .collect();

                match legal[..] {
                    [only] => Ok(only),
                    _ => Err(ChessError::Ambiguous { piece: kind, to }),
                }
            }
        }
    }

    /// Try the bare physical move and see whether the mover's king
    /// survives it.
    pub(crate) fn keeps_king_safe(&mut self, from: Square, to: Square, color: ChessColor) -> bool {
        self.begin();
        self.execute_raw(from, to);
        let safe = !self.in_check(color);
        self.rollback();
        safe
    }

    /// The physical mutation alone: captures (en passant included),
    /// the shift, and a default-queen promotion. No validation.
    fn execute_raw(&mut self, from: Square, to: Square) {
        let pawn = self
            .piece_at(from)
            .is_some_and(|man| man.kind == ChessPiece::PAWN);

        if pawn {
            if let Some(ep) = self.en_passant {
                if ep.square == to && from.file() != to.file() {
                    self.field.capture(ep.capture);
                }
            }
        }

        if self.piece_at(to).is_some() {
            self.field.capture(to);
        }
        self.field.shift(from, to);

        if pawn && matches!(to.rank(), BoardRank::_1 | BoardRank::_8) {
            self.field.promote(to, PawnPromotion::QUEEN);
        }
    }

    /// Minimal SAN disambiguation: nothing if the mover is alone, its
    /// file if that settles it, its rank if that does, else both.
    fn rivals(&self, kind: ChessPiece, from: Square, to: Square) -> Vec<Square> {
        self.field
            .men(self.to_move)
            .filter(|man| man.kind == kind && man.square != from)
            .map(|man| man.square)
            .filter(|sq| self.destinations(*sq).contains(&to))
            .collect()
    }

    fn needed_file(&self, kind: ChessPiece, from: Square, to: Square) -> Option<BoardFile> {
        let rivals = self.rivals(kind, from, to);
        if rivals.is_empty() {
            return None;
        }
        if rivals.iter().all(|sq| sq.file() != from.file()) {
            return Some(from.file());
        }
        if rivals.iter().all(|sq| sq.rank() != from.rank()) {
            return None;
        }
        Some(from.file())
    }

    fn needed_rank(&self, kind: ChessPiece, from: Square, to: Square) -> Option<BoardRank> {
        let rivals = self.rivals(kind, from, to);
        if rivals.is_empty() || rivals.iter().all(|sq| sq.file() != from.file()) {
            return None;
        }
        Some(from.rank())
    }

    /// Whether a king move to `to` is really a castle: two or more
    /// files toward a rook with the right still live, or straight onto
    /// the implicated rook's home square.
    pub(crate) fn castle_in_disguise(&self, to: Square) -> Option<CastlingDirection> {
        let us = self.to_move;
        let home = self.rules.king_home(us);

        if self.field.king(us) != Some(home) || to.rank() != home.rank() {
            return None;
        }

        for dir in [CastlingDirection::EAST, CastlingDirection::WEST] {
            if !self.right(us, dir) {
                continue;
            }

            if to == self.rules.rook_home(us, dir) {
                return Some(dir);
            }

            let toward = match dir {
                CastlingDirection::EAST => home.file() as i8 - to.file() as i8,
                CastlingDirection::WEST => to.file() as i8 - home.file() as i8,
            };
            if toward >= 2 {
                return Some(dir);
            }
        }

        None
    }

    /// Render the canonical SAN for a square-pair move, castles and
    /// all, against the current position.
    pub fn san_for(&self, mv: CoordNotation) -> Result<StdAlgNotation> {
        let man = self.piece_at(mv.from).ok_or(ChessError::NoPiece {
            square: mv.from,
        })?;

        if man.color != self.to_move {
            return Err(ChessError::WrongColor {
                square: mv.from,
                color: man.color,
            });
        }

        if man.kind == ChessPiece::KING {
            if let Some(dir) = self.castle_in_disguise(mv.to) {
                return Ok(StdAlgNotation::Castling(match dir {
                    CastlingDirection::EAST => StdAlgCastling::OOO(None),
                    CastlingDirection::WEST => StdAlgCastling::OO(None),
                }));
            }
        }

        if self.is_own(mv.to, man.color) {
            return Err(ChessError::CantCaptureOwn { square: mv.to });
        }

        if !self.destinations(mv.from).contains(&mv.to) {
            return Err(ChessError::CantMoveThatWay {
                piece: man.kind,
                from: mv.from,
                to: mv.to,
            });
        }

        if man.kind == ChessPiece::PAWN {
            let en_passant = self
                .en_passant
                .is_some_and(|ep| ep.square == mv.to && mv.from.file() != mv.to.file());
            let captures = self.is_enemy(mv.to, man.color) || en_passant;

            let promoting = matches!(mv.to.rank(), BoardRank::_1 | BoardRank::_8);
            if mv.prom.is_some() && !promoting {
                return Err(ChessError::InvalidPromote {
                    text: mv.to_string(),
                });
            }
            let promotion = if promoting {
                Some(mv.prom.unwrap_or(PawnPromotion::QUEEN))
            } else {
                None
            };

            return Ok(StdAlgNotation::Pawn(if captures {
                StdAlgPawn::takes(mv.from.file(), mv.to, promotion)
            } else {
                StdAlgPawn::push(mv.to, promotion)
            }));
        }

        if mv.prom.is_some() {
            return Err(ChessError::InvalidPromote {
                text: mv.to_string(),
            });
        }

        let officer = ChessOfficer::from_piece(man.kind).expect("not a pawn");
        Ok(StdAlgNotation::Officer(StdAlgOfficer::new(
            officer,
            self.needed_file(man.kind, mv.from, mv.to),
            self.needed_rank(man.kind, mv.from, mv.to),
            self.is_enemy(mv.to, man.color),
            mv.to,
            None,
        )))
    }
}

#[test]
fn the_sicilian_three_plies() {
    let mut game = Game::new();
    game.play_san("e4").unwrap();
    game.play_san("c5").unwrap();
    game.play_san("Nf3").unwrap();

    assert_eq!(
        game.fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
    assert_eq!(game.log().movetext(), "1.e4 c5 2.Nf3");
    assert!(game.field().consistent());
}

#[test]
fn san_and_pmn_land_on_identical_positions() {
    let mut by_san = Game::new();
    let mut by_pmn = Game::new();

    // e2e4, e7e5, g1f3 in the square alphabet.
    for (san, pmn) in [("e4", "mC"), ("e5", "0K"), ("Nf3", "gv")] {
        by_san.play_san(san).unwrap();
        by_pmn.play_pmn(pmn).unwrap();
        assert_eq!(by_san.fen(), by_pmn.fen());
    }

    assert_eq!(by_san.log().plain(), by_pmn.log().plain());
}

#[test]
fn failed_moves_leave_no_trace() {
    let mut game = Game::new();
    let before = game.fen();

    for bad in ["e5", "Qd4", "Ke3", "O-O", "exd3"] {
        assert!(game.play_san(bad).is_err());
        assert_eq!(game.fen(), before);
        assert_eq!(game.log().len(), 0);
    }
}

#[test]
fn resolution_error_kinds() {
    let mut game = Game::new();

    assert_eq!(
        game.play_san("Qd4"),
        Err(ChessError::NoPieceCanDoThat {
            piece: ChessPiece::QUEEN,
            to: Square::d4
        })
    );

    // Two knights, both free to take d3: the writer has to say which.
    let mut fork = Game::from_fen("k7/8/8/8/8/8/1N3N2/K7 w - -").unwrap();
    assert_eq!(
        fork.play_san("Nd3"),
        Err(ChessError::Ambiguous {
            piece: ChessPiece::KNIGHT,
            to: Square::d3
        })
    );
    fork.play_san("Nbd3").unwrap();
    assert!(fork.piece_at(Square::d3).is_some());
}

#[test]
fn a_pin_settles_ambiguity_silently() {
    // Knights d2 and g1 both reach f3, but d2 shields the king from
    // the b4 bishop; only the g1 knight may actually go.
    let mut game = Game::from_fen("k7/8/8/8/1b6/8/3N4/4K1N1 w - -").unwrap();
    game.play_san("Nf3").unwrap();

    assert!(game.piece_at(Square::g1).is_none());
    assert_eq!(
        game.piece_at(Square::d2).unwrap().kind,
        ChessPiece::KNIGHT
    );
}

#[test]
fn coordinate_move_error_kinds() {
    let mut game = Game::new();

    assert_eq!(
        game.play_coord(CoordNotation::new(Square::e4, Square::e5, None)),
        Err(ChessError::NoPiece { square: Square::e4 })
    );
    assert_eq!(
        game.play_coord(CoordNotation::new(Square::e7, Square::e5, None)),
        Err(ChessError::WrongColor {
            square: Square::e7,
            color: ChessColor::BLACK
        })
    );
    assert_eq!(
        game.play_coord(CoordNotation::new(Square::a1, Square::a2, None)),
        Err(ChessError::CantCaptureOwn { square: Square::a2 })
    );
    assert_eq!(
        game.play_coord(CoordNotation::new(Square::e2, Square::e5, None)),
        Err(ChessError::CantMoveThatWay {
            piece: ChessPiece::PAWN,
            from: Square::e2,
            to: Square::e5
        })
    );
}

#[test]
fn castling_guards() {
    // Out of check: refused outright.
    let mut checked = Game::from_fen("4r1k1/8/8/8/8/8/8/4K2R w K -").unwrap();
    assert_eq!(
        checked.play_san("O-O"),
        Err(ChessError::InCheck {
            color: ChessColor::WHITE
        })
    );

    // Through check: the f1 square is swept by the f8 rook.
    let mut through = Game::from_fen("3k1r2/8/8/8/8/8/8/4K2R w K -").unwrap();
    assert_eq!(
        through.play_san("O-O"),
        Err(ChessError::CastleWouldCheck { square: Square::f1 })
    );

    // Into check: g1 is covered.
    let mut into = Game::from_fen("3k2r1/8/8/8/8/8/8/4K2R w K -").unwrap();
    assert_eq!(
        into.play_san("O-O"),
        Err(ChessError::CastleWouldCheck { square: Square::g1 })
    );

    // Pieces in the way.
    let mut blocked = Game::new();
    assert_eq!(
        blocked.play_san("O-O"),
        Err(ChessError::CastlePiecesInWay { square: Square::f1 })
    );

    // No right left.
    let mut spent = Game::from_fen("3k4/8/8/8/8/8/8/R3K2R w Q -").unwrap();
    assert_eq!(
        spent.play_san("O-O"),
        Err(ChessError::CantCastleKingside {
            color: ChessColor::WHITE
        })
    );
    spent.play_san("O-O-O").unwrap();
    assert_eq!(spent.piece_at(Square::c1).unwrap().kind, ChessPiece::KING);
    assert_eq!(spent.piece_at(Square::d1).unwrap().kind, ChessPiece::ROOK);
}

#[test]
fn castling_updates_rights_and_log() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();

    game.play_san("O-O").unwrap();
    assert!(!game.right(ChessColor::WHITE, CastlingDirection::WEST));
    assert!(!game.right(ChessColor::WHITE, CastlingDirection::EAST));
    assert!(game.right(ChessColor::BLACK, CastlingDirection::WEST));
    assert_eq!(game.piece_at(Square::g1).unwrap().kind, ChessPiece::KING);
    assert_eq!(game.piece_at(Square::f1).unwrap().kind, ChessPiece::ROOK);

    // A king move phrased as a square pair castles all the same.
    game.play_coord(CoordNotation::new(Square::e8, Square::c8, None))
        .unwrap();
    assert_eq!(game.log().plain(), &["O-O".to_string(), "O-O-O".to_string()]);
    assert_eq!(game.piece_at(Square::c8).unwrap().kind, ChessPiece::KING);
    assert_eq!(game.piece_at(Square::d8).unwrap().kind, ChessPiece::ROOK);
}

#[test]
fn rook_moves_and_rook_captures_strip_rights() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();

    game.play_san("Rxa8").unwrap();
    // Our queenside rook left home, and theirs fell there.
    assert!(!game.right(ChessColor::WHITE, CastlingDirection::EAST));
    assert!(!game.right(ChessColor::BLACK, CastlingDirection::EAST));
    assert!(game.right(ChessColor::WHITE, CastlingDirection::WEST));
    assert!(game.right(ChessColor::BLACK, CastlingDirection::WEST));

    // The capture reset the half-move clock.
    assert_eq!(game.halfmove_clock(), 0);
}

#[test]
fn chess960_swap_castle() {
    // King f1, kingside rook g1: castling swaps them in place.
    let fen = "nbrnbkrq/pppppppp/8/8/8/8/PPPPPPPP/NBRNBKRQ w KQkq - 0 1";
    let mut game = Game::from_fen_chess960(fen).unwrap();

    game.play_san("O-O").unwrap();
    assert_eq!(game.piece_at(Square::g1).unwrap().kind, ChessPiece::KING);
    assert_eq!(game.piece_at(Square::f1).unwrap().kind, ChessPiece::ROOK);
    assert!(!game.right(ChessColor::WHITE, CastlingDirection::WEST));
    assert!(game.field().consistent());
}

#[test]
fn en_passant_happens_and_pins_forbid_it() {
    let mut game = Game::new();
    for mv in ["e4", "a6", "e5", "d5"] {
        game.play_san(mv).unwrap();
    }
    game.play_san("exd6").unwrap();

    assert!(game.piece_at(Square::d5).is_none());
    assert_eq!(game.piece_at(Square::d6).unwrap().kind, ChessPiece::PAWN);
    assert_eq!(game.log().plain().last().unwrap(), "exd6");

    // The capturing pawn shields its king along the fifth rank.
    let mut pinned = Game::from_fen("4k3/8/8/K3Pp1r/8/8/8/8 w - f6 0 2").unwrap();
    assert_eq!(
        pinned.play_san("exf6"),
        Err(ChessError::MoveWouldCheck {
            color: ChessColor::WHITE
        })
    );
}

#[test]
fn promotions_change_the_moving_kind() {
    let mut game = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - -").unwrap();
    game.play_san("a8=N").unwrap();
    assert_eq!(game.piece_at(Square::a8).unwrap().kind, ChessPiece::KNIGHT);

    // Without a suffix the pawn queens.
    let mut queened = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - -").unwrap();
    queened.play_san("a8").unwrap();
    assert_eq!(
        queened.piece_at(Square::a8).unwrap().kind,
        ChessPiece::QUEEN
    );
    assert_eq!(queened.log().plain().last().unwrap(), "a8=Q");

    // Promotion marks off the back rank are nonsense.
    let mut early = Game::new();
    assert!(matches!(
        early.play_san("e4=Q"),
        Err(ChessError::InvalidPromote { .. })
    ));
}

#[test]
fn placement_moves_are_refused_by_a_standard_game() {
    let mut game = Game::new();

    assert_eq!(
        game.play_san("P@e1"),
        Err(ChessError::CantPlaceOnBackRank {
            rank: BoardRank::_1
        })
    );
    assert_eq!(
        game.play_san("Q@e4"),
        Err(ChessError::NoPieceCanDoThat {
            piece: ChessPiece::QUEEN,
            to: Square::e4
        })
    );
}

#[test]
fn still_in_check_versus_would_check() {
    // In check, and the reply ignores it.
    let mut ignoring = Game::from_fen("4r1k1/8/8/8/8/8/3P4/4K3 w - -").unwrap();
    assert_eq!(
        ignoring.play_san("d3"),
        Err(ChessError::StillInCheck {
            color: ChessColor::WHITE
        })
    );

    // Not in check, but the move would open the e-file.
    let mut opening = Game::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - -").unwrap();
    assert_eq!(
        opening.play_san("Bd3"),
        Err(ChessError::MoveWouldCheck {
            color: ChessColor::WHITE
        })
    );
}

#[test]
fn minimal_disambiguation_in_the_log() {
    // Rooks a1 and h1 both see e1: file disambiguation.
    let mut rooks = Game::from_fen("7k/8/8/8/8/8/K7/R6R w - -").unwrap();
    rooks.play_san("Rae1").unwrap();
    assert_eq!(rooks.log().plain().last().unwrap(), "Rae1");

    // Lone knight: none at all, however the writer phrased it.
    let mut lone = Game::new();
    lone.play_san("Ngf3").unwrap();
    assert_eq!(lone.log().plain().last().unwrap(), "Nf3");

    // Queens on e8, a4 and e4 all see c6: the mover shares its file
    // with one rival and its rank with another, so both are spelled.
    let mut queens = Game::from_fen("4Q3/8/8/8/Q3Q3/8/7k/K7 w - -").unwrap();
    queens.play_san("Qe4c6").unwrap();
    assert_eq!(queens.log().plain().last().unwrap(), "Qe4c6");
}
