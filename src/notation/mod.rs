//! # Move and position notations
//!
//! The textual skins of the engine: standard algebraic notation for
//! moves, FEN for positions, and the two-character piot move notation.
//! Parsers are chumsky combinators behind the [`Parsable`] trait;
//! rendering is plain [`Display`].

pub mod fen;
pub mod pmn;
pub mod square;
pub mod stdalg;

use std::fmt::{Display, Write};

use chumsky::Parser;
use strum::VariantNames;

use crate::error::ChessError;
use crate::model::{
    BoardFile, BoardRank, ChessColor, ChessOfficer, ChessPiece, PawnPromotion, Square,
};

/// Anything with a canonical chumsky parser.
pub trait Parsable: Sized {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self>;
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Self::VARIANTS[self.ix()])
    }
}

impl Display for BoardFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Self::VARIANTS[self.ix()])
    }
}

impl Display for BoardRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Self::VARIANTS[self.ix()])
    }
}

/// Full English color names, as substituted into error messages.
impl Display for ChessColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(["white", "black"][self.ix()])
    }
}

impl std::str::FromStr for ChessColor {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "W" | "white" => Ok(ChessColor::WHITE),
            "b" | "B" | "black" => Ok(ChessColor::BLACK),
            _ => Err(ChessError::InvalidColor {
                text: s.to_string(),
            }),
        }
    }
}

/// Full English piece names, as substituted into error messages.
impl Display for ChessPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(["pawn", "knight", "bishop", "rook", "queen", "king"][self.ix()])
    }
}

impl std::str::FromStr for ChessPiece {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ChessPiece::*;
        match s {
            "P" | "pawn" => Ok(PAWN),
            "N" | "knight" => Ok(KNIGHT),
            "B" | "bishop" => Ok(BISHOP),
            "R" | "rook" => Ok(ROOK),
            "Q" | "queen" => Ok(QUEEN),
            "K" | "king" => Ok(KING),
            _ => Err(ChessError::InvalidPiece {
                text: s.to_string(),
            }),
        }
    }
}

/// Bare from/to/promotion coordinate notation, `e7e8q` style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CoordNotation {
    pub from: Square,
    pub to: Square,
    pub prom: Option<PawnPromotion>,
}

impl CoordNotation {
    pub fn new(from: Square, to: Square, prom: Option<PawnPromotion>) -> Self {
        Self { from, to, prom }
    }
}

impl Display for CoordNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.from.fmt(f)?;
        self.to.fmt(f)?;
        f.write_str(["", "n", "b", "r", "q"][self.prom.map(|x| x.ix()).unwrap_or(0)])?;
        Ok(())
    }
}

/// A parsed standard-algebraic move, not yet resolved against a
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StdAlgNotation {
    Pawn(StdAlgPawn),
    Officer(StdAlgOfficer),
    Castling(StdAlgCastling),
    Placement(StdAlgPlacement),
}

impl From<StdAlgCastling> for StdAlgNotation {
    fn from(value: StdAlgCastling) -> Self {
        Self::Castling(value)
    }
}

impl From<StdAlgPawn> for StdAlgNotation {
    fn from(value: StdAlgPawn) -> Self {
        Self::Pawn(value)
    }
}

impl From<StdAlgOfficer> for StdAlgNotation {
    fn from(value: StdAlgOfficer) -> Self {
        Self::Officer(value)
    }
}

impl From<StdAlgPlacement> for StdAlgNotation {
    fn from(value: StdAlgPlacement) -> Self {
        Self::Placement(value)
    }
}

impl StdAlgNotation {
    pub const OFFICERS: &'static [&'static str] = &["", "N", "B", "R", "Q", "K"];
}

impl Display for StdAlgNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pawn(mv) => mv.fmt(f),
            Self::Officer(mv) => mv.fmt(f),
            Self::Castling(mv) => mv.fmt(f),
            Self::Placement(mv) => mv.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StdAlgPawn {
    pub to: Square,
    pub from_file: Option<BoardFile>,
    pub from_rank: Option<BoardRank>,
    pub capture: bool,
    pub promotion: Option<PawnPromotion>,
    pub in_check: Option<InCheck>,
}

impl StdAlgPawn {
    pub fn new(
        from_file: Option<BoardFile>,
        from_rank: Option<BoardRank>,
        capture: bool,
        to: Square,
        promotion: Option<PawnPromotion>,
        in_check: Option<InCheck>,
    ) -> Self {
        Self {
            to,
            from_file,
            from_rank,
            capture,
            promotion,
            in_check,
        }
    }

    /// The plain destination form, `e4`.
    pub fn push(to: Square, promotion: Option<PawnPromotion>) -> Self {
        Self::new(None, None, false, to, promotion, None)
    }

    /// The capture form, `exd5`.
    pub fn takes(from_file: BoardFile, to: Square, promotion: Option<PawnPromotion>) -> Self {
        Self::new(Some(from_file), None, true, to, promotion, None)
    }
}

impl Display for StdAlgPawn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(d) = self.from_file {
            d.fmt(f)?;
        }

        if let Some(d) = self.from_rank {
            d.fmt(f)?;
        }

        if self.capture {
            f.write_char('x')?;
        }

        self.to.fmt(f)?;

        if let Some(p) = self.promotion {
            f.write_char('=')?;
            f.write_str(StdAlgNotation::OFFICERS[p.ix()])?;
        }

        if let Some(in_check) = self.in_check {
            in_check.fmt(f)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StdAlgOfficer {
    pub officer: ChessOfficer,
    pub from_file: Option<BoardFile>,
    pub from_rank: Option<BoardRank>,
    pub capture: bool,
    pub to: Square,
    pub in_check: Option<InCheck>,
}

impl StdAlgOfficer {
    pub fn new(
        officer: ChessOfficer,
        from_file: Option<BoardFile>,
        from_rank: Option<BoardRank>,
        capture: bool,
        to: Square,
        in_check: Option<InCheck>,
    ) -> Self {
        Self {
            officer,
            from_file,
            from_rank,
            capture,
            to,
            in_check,
        }
    }
}

impl Display for StdAlgOfficer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(StdAlgNotation::OFFICERS[self.officer.ix()])?;

        if let Some(d) = self.from_file {
            d.fmt(f)?;
        }

        if let Some(d) = self.from_rank {
            d.fmt(f)?;
        }

        if self.capture {
            f.write_char('x')?;
        }

        self.to.fmt(f)?;

        if let Some(in_check) = self.in_check {
            in_check.fmt(f)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum StdAlgCastling {
    OOO(Option<InCheck>),
    OO(Option<InCheck>),
}

impl Display for StdAlgCastling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Self::OOO(c) => {
                f.write_str("O-O-O")?;
                *c
            }
            Self::OO(c) => {
                f.write_str("O-O")?;
                *c
            }
        };

        if let Some(c) = c {
            c.fmt(f)?;
        }

        Ok(())
    }
}

/// A 'wild' piece-placement move, `Q@e4`. Recognised by the parser;
/// a standard game refuses to apply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StdAlgPlacement {
    pub piece: ChessPiece,
    pub to: Square,
}

impl Display for StdAlgPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.piece == ChessPiece::PAWN {
            f.write_char('P')?;
        } else {
            f.write_str(StdAlgNotation::OFFICERS[self.piece.ix()])?;
        }
        f.write_char('@')?;
        self.to.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum InCheck {
    Check,
    Mate,
}

impl Display for InCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check => f.write_str("+"),
            Self::Mate => f.write_str("#"),
        }
    }
}

#[test]
fn colors_and_pieces_parse_by_letter_or_name() {
    assert_eq!("w".parse::<ChessColor>().unwrap(), ChessColor::WHITE);
    assert_eq!("black".parse::<ChessColor>().unwrap(), ChessColor::BLACK);
    assert_eq!(
        "green".parse::<ChessColor>(),
        Err(ChessError::InvalidColor {
            text: "green".to_string()
        })
    );

    assert_eq!("Q".parse::<ChessPiece>().unwrap(), ChessPiece::QUEEN);
    assert_eq!("knight".parse::<ChessPiece>().unwrap(), ChessPiece::KNIGHT);
    assert_eq!(
        "archbishop".parse::<ChessPiece>(),
        Err(ChessError::InvalidPiece {
            text: "archbishop".to_string()
        })
    );
}

#[test]
fn display_roundtrips_read_well() {
    assert_eq!(Square::e4.to_string(), "e4");
    assert_eq!(ChessPiece::KNIGHT.to_string(), "knight");
    assert_eq!(ChessColor::BLACK.to_string(), "black");
    assert_eq!(
        CoordNotation::new(Square::e7, Square::e8, Some(PawnPromotion::QUEEN)).to_string(),
        "e7e8q"
    );
    assert_eq!(
        StdAlgNotation::Pawn(StdAlgPawn::takes(BoardFile::e_, Square::d5, None)).to_string(),
        "exd5"
    );
    assert_eq!(
        StdAlgNotation::Officer(StdAlgOfficer::new(
            ChessOfficer::KNIGHT,
            Some(BoardFile::b_),
            None,
            false,
            Square::d7,
            None
        ))
        .to_string(),
        "Nbd7"
    );
    assert_eq!(
        StdAlgNotation::Castling(StdAlgCastling::OOO(Some(InCheck::Mate))).to_string(),
        "O-O-O#"
    );
    assert_eq!(
        StdAlgNotation::Placement(StdAlgPlacement {
            piece: ChessPiece::PAWN,
            to: Square::d4
        })
        .to_string(),
        "P@d4"
    );
}
