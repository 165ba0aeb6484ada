use chumsky::prelude::*;
use strum::IntoEnumIterator;

use crate::error::ChessError;
use crate::model::{BoardFile, BoardRank, Square};
use crate::notation::Parsable;

impl Parsable for BoardFile {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        one_of('a'..='h').map(|c: char| BoardFile::from_u8((c as u32 - 'a' as u32) as u8))
    }
}

impl Parsable for BoardRank {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        one_of('1'..='8').map(|c: char| BoardRank::from_u8((c as u32 - '1' as u32) as u8))
    }
}

impl Parsable for Square {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        BoardFile::parser()
            .then(BoardRank::parser())
            .map(|(f, r)| Square::from_coords(f, r))
    }
}

impl std::str::FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parser()
            .then_ignore(end())
            .parse(s)
            .into_output()
            .ok_or_else(|| ChessError::InvalidSquare {
                text: s.to_string(),
            })
    }
}

#[test]
fn test_square_parser() {
    for sq in Square::iter() {
        let sqs = sq.to_string();
        assert_eq!(sqs.parse::<Square>().unwrap(), sq);
    }
}

#[test]
fn malformed_squares_are_refused() {
    for bad in ["", "e", "e9", "i4", "e44", "4e"] {
        assert_eq!(
            bad.parse::<Square>(),
            Err(ChessError::InvalidSquare {
                text: bad.to_string()
            })
        );
    }
}
