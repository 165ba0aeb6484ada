//! # Standard algebraic notation, reading side
//!
//! The grammar, in token order:
//!
//! - `O-O` / `O-O-O` castling;
//! - pawn moves `[P]?<file>?<rank>?x?<square>(=?[QRNB])?` — the `P`
//!   prefix is tolerated, never required;
//! - officer moves `[QRBN](<file>|<rank>|<file><rank>)?x?<square>`;
//! - king moves `Kx?<square>` — there is only one king, so it never
//!   takes disambiguation;
//! - placement moves `[QRBN]@<square>` and `P@<square>`;
//! - an optional trailing `+` or `#` on any of the above.
//!
//! Disambiguation alternatives are tried longest-first so `Nbd7`,
//! `N1d2` and `Nb1d2` all land where they should before the bare
//! `Nd7` form wins.

use chumsky::prelude::*;

use crate::error::ChessError;
use crate::model::{BoardFile, BoardRank, ChessOfficer, ChessPiece, PawnPromotion, Square};
use crate::notation::{
    InCheck, Parsable, StdAlgCastling, StdAlgNotation, StdAlgOfficer, StdAlgPawn,
    StdAlgPlacement,
};

/// Parse one SAN token, requiring the whole input to be consumed.
pub fn parse(text: &str) -> Result<StdAlgNotation, ChessError> {
    StdAlgNotation::parser()
        .then_ignore(end())
        .parse(text)
        .into_output()
        .ok_or_else(|| ChessError::InvalidSan {
            text: text.to_string(),
        })
}

impl Parsable for StdAlgNotation {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        choice((
            StdAlgCastling::parser().map(Into::into),
            StdAlgPlacement::parser().map(Into::into),
            StdAlgPawn::parser().map(Into::into),
            StdAlgOfficer::parser().map(Into::into),
        ))
    }
}

impl Parsable for StdAlgPawn {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        just('P')
            .or_not()
            .ignore_then(choice((
                group((
                    BoardFile::parser().map(Some),
                    BoardRank::parser().map(Some),
                    is_it(just('x')),
                    Square::parser(),
                )),
                group((
                    BoardFile::parser().map(Some),
                    empty().to(None::<BoardRank>),
                    is_it(just('x')),
                    Square::parser(),
                )),
                group((
                    empty().to(None::<BoardFile>),
                    empty().to(None::<BoardRank>),
                    is_it(just('x')),
                    Square::parser(),
                )),
            )))
            .then(just('=').or_not().ignore_then(pawn_promotion()).or_not())
            .then(InCheck::parser().or_not())
            .map(|(((file, rank, capture, to), promotion), in_check)| {
                StdAlgPawn::new(file, rank, capture, to, promotion, in_check)
            })
    }
}

fn pawn_promotion<'s>() -> impl Parser<'s, &'s str, PawnPromotion> {
    use PawnPromotion::*;
    choice((
        just('N').to(KNIGHT),
        just('B').to(BISHOP),
        just('R').to(ROOK),
        just('Q').to(QUEEN),
    ))
}

impl Parsable for StdAlgOfficer {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        let disambiguated = officer()
            .then(choice((
                group((
                    BoardFile::parser().map(Some),
                    BoardRank::parser().map(Some),
                    is_it(just('x')),
                    Square::parser(),
                )),
                group((
                    BoardFile::parser().map(Some),
                    empty().to(None::<BoardRank>),
                    is_it(just('x')),
                    Square::parser(),
                )),
                group((
                    empty().to(None::<BoardFile>),
                    BoardRank::parser().map(Some),
                    is_it(just('x')),
                    Square::parser(),
                )),
                group((
                    empty().to(None::<BoardFile>),
                    empty().to(None::<BoardRank>),
                    is_it(just('x')),
                    Square::parser(),
                )),
            )))
            .map(|(officer, (file, rank, capture, to))| (officer, file, rank, capture, to));

        // There is only one king per side; `Kb1d2` is nonsense, not
        // disambiguation.
        let king = just('K')
            .to(ChessOfficer::KING)
            .then(is_it(just('x')))
            .then(Square::parser())
            .map(|((officer, capture), to)| {
                (officer, None::<BoardFile>, None::<BoardRank>, capture, to)
            });

        choice((disambiguated, king))
            .then(InCheck::parser().or_not())
            .map(|((officer, file, rank, capture, to), in_check)| {
                StdAlgOfficer::new(officer, file, rank, capture, to, in_check)
            })
    }
}

fn officer<'s>() -> impl Parser<'s, &'s str, ChessOfficer> {
    use ChessOfficer::*;
    choice((
        just('N').to(KNIGHT),
        just('B').to(BISHOP),
        just('R').to(ROOK),
        just('Q').to(QUEEN),
    ))
}

pub fn is_it<'s, T>(
    p: impl Parser<'s, &'s str, T>,
) -> impl Parser<'s, &'s str, bool> {
    p.or_not().map(|s| s.is_some())
}

impl Parsable for StdAlgCastling {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        choice((
            just("O-O-O").ignore_then(InCheck::parser().or_not().map(StdAlgCastling::OOO)),
            just("O-O").ignore_then(InCheck::parser().or_not().map(StdAlgCastling::OO)),
        ))
    }
}

impl Parsable for StdAlgPlacement {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        choice((
            just('P').to(ChessPiece::PAWN),
            officer().map(ChessPiece::from),
        ))
        .then_ignore(just('@'))
        .then(Square::parser())
        .map(|(piece, to)| StdAlgPlacement { piece, to })
    }
}

impl Parsable for InCheck {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        choice((just('+').to(InCheck::Check), just('#').to(InCheck::Mate)))
    }
}

#[test]
fn pawn_forms() {
    assert_eq!(
        parse("e4").unwrap(),
        StdAlgNotation::Pawn(StdAlgPawn::push(Square::e4, None))
    );
    assert_eq!(
        parse("Pe4").unwrap(),
        StdAlgNotation::Pawn(StdAlgPawn::push(Square::e4, None))
    );
    assert_eq!(
        parse("exd5").unwrap(),
        StdAlgNotation::Pawn(StdAlgPawn::takes(BoardFile::e_, Square::d5, None))
    );
    assert_eq!(
        parse("e8=Q").unwrap(),
        StdAlgNotation::Pawn(StdAlgPawn::push(Square::e8, Some(PawnPromotion::QUEEN)))
    );
    assert_eq!(
        parse("gxh1R").unwrap(),
        StdAlgNotation::Pawn(StdAlgPawn::takes(
            BoardFile::g_,
            Square::h1,
            Some(PawnPromotion::ROOK)
        ))
    );

    let full = parse("e7e8=N").unwrap();
    assert_eq!(
        full,
        StdAlgNotation::Pawn(StdAlgPawn::new(
            Some(BoardFile::e_),
            Some(BoardRank::_7),
            false,
            Square::e8,
            Some(PawnPromotion::KNIGHT),
            None
        ))
    );
}

#[test]
fn officer_disambiguation_forms() {
    let bare = parse("Nd7").unwrap();
    let by_file = parse("Nbd7").unwrap();
    let by_rank = parse("N1d2").unwrap();
    let by_square = parse("Nb1d2").unwrap();

    match (bare, by_file, by_rank, by_square) {
        (
            StdAlgNotation::Officer(a),
            StdAlgNotation::Officer(b),
            StdAlgNotation::Officer(c),
            StdAlgNotation::Officer(d),
        ) => {
            assert_eq!((a.from_file, a.from_rank, a.to), (None, None, Square::d7));
            assert_eq!((b.from_file, b.from_rank), (Some(BoardFile::b_), None));
            assert_eq!((c.from_file, c.from_rank), (None, Some(BoardRank::_1)));
            assert_eq!(
                (d.from_file, d.from_rank),
                (Some(BoardFile::b_), Some(BoardRank::_1))
            );
        }
        other => panic!("unexpected parse {:?}", other),
    }
}

#[test]
fn castles_captures_and_checks() {
    assert_eq!(
        parse("O-O").unwrap(),
        StdAlgNotation::Castling(StdAlgCastling::OO(None))
    );
    assert_eq!(
        parse("O-O-O+").unwrap(),
        StdAlgNotation::Castling(StdAlgCastling::OOO(Some(InCheck::Check)))
    );

    match parse("Qh4xe1#").unwrap() {
        StdAlgNotation::Officer(q) => {
            assert_eq!(q.officer, ChessOfficer::QUEEN);
            assert!(q.capture);
            assert_eq!(q.to, Square::e1);
            assert_eq!(q.in_check, Some(InCheck::Mate));
        }
        other => panic!("unexpected parse {:?}", other),
    }

    match parse("Kxe2").unwrap() {
        StdAlgNotation::Officer(k) => {
            assert_eq!(k.officer, ChessOfficer::KING);
            assert!(k.capture);
            assert_eq!((k.from_file, k.from_rank), (None, None));
        }
        other => panic!("unexpected parse {:?}", other),
    }
}

#[test]
fn the_king_takes_no_disambiguation() {
    match parse("Kd7").unwrap() {
        StdAlgNotation::Officer(k) => {
            assert_eq!(k.officer, ChessOfficer::KING);
            assert_eq!((k.from_file, k.from_rank, k.to), (None, None, Square::d7));
        }
        other => panic!("unexpected parse {:?}", other),
    }

    for bad in ["Kb1d2", "Kee2", "K1e2"] {
        assert!(matches!(
            parse(bad),
            Err(ChessError::InvalidSan { .. })
        ));
    }
}

#[test]
fn placements_parse_but_stay_wild() {
    assert_eq!(
        parse("Q@e4").unwrap(),
        StdAlgNotation::Placement(StdAlgPlacement {
            piece: ChessPiece::QUEEN,
            to: Square::e4
        })
    );
    assert_eq!(
        parse("P@e1").unwrap(),
        StdAlgNotation::Placement(StdAlgPlacement {
            piece: ChessPiece::PAWN,
            to: Square::e1
        })
    );
}

#[test]
fn garbage_is_invalid_san() {
    for bad in ["", "e9", "Nd", "O-O-O-O", "exd", "Q@", "K@e4", "9", "Pxx4", "e4e"] {
        assert!(matches!(
            parse(bad),
            Err(ChessError::InvalidSan { .. })
        ));
    }
}
