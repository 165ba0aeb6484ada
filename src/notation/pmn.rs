//! # Piot move notation
//!
//! Every half-move in two characters. The first character names the
//! source square out of a 64-symbol alphabet — the lowercase letters,
//! then the uppercase letters, then the digits, then `!` and `?` —
//! covering `a1 … h8` file-major, so `a` is a1, `i` is a2, `!` is g8
//! and `?` is h8.
//!
//! The second character is either a destination-square symbol, or one
//! of twelve promotion glyphs naming the piece chosen and the pawn's
//! sideways drift (toward the a-file, straight, or toward the h-file):
//!
//! ```text
//!          left  straight  right
//! knight    (       ^        )
//! rook      [       _        ]
//! bishop    @       #        $
//! queen     {       ~        }
//! ```
//!
//! A glyph's destination is derived from the source: rank 1 when the
//! pawn stood on rank 2, rank 8 otherwise, with the file shifted per
//! the drift. A plain pair that walks a pawn onto a back rank promotes
//! to queen by default — that default needs sight of the board, so it
//! lives with the game, not here.

use crate::error::{ChessError, Result};
use crate::model::{BoardRank, PawnPromotion, Square};
use crate::notation::CoordNotation;

/// The square alphabet, in square order.
const ALPHABET: [char; 64] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J',
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1',
    '2', '3', '4', '5', '6', '7', '8', '9', '!', '?',
];

/// Promotion glyphs, rows in [`PawnPromotion`] order, columns by drift
/// (left, straight, right).
const GLYPHS: [[char; 3]; 4] = [
    ['(', '^', ')'],
    ['@', '#', '$'],
    ['[', '_', ']'],
    ['{', '~', '}'],
];

/// The alphabet symbol of a square.
pub fn square_symbol(sq: Square) -> char {
    ALPHABET[sq.ix()]
}

/// The square of an alphabet symbol.
pub fn symbol_square(ch: char) -> Option<Square> {
    ALPHABET
        .iter()
        .position(|c| *c == ch)
        .map(|ix| Square::from_u8(ix as u8))
}

fn glyph(prom: PawnPromotion, drift: i8) -> char {
    GLYPHS[prom.ix() - 1][(drift + 1) as usize]
}

fn unglyph(ch: char) -> Option<(PawnPromotion, i8)> {
    use PawnPromotion::*;

    for (row, prom) in [KNIGHT, BISHOP, ROOK, QUEEN].into_iter().enumerate() {
        for col in 0..3usize {
            if GLYPHS[row][col] == ch {
                return Some((prom, col as i8 - 1));
            }
        }
    }

    None
}

/// Decode a two-character pair into from/to/promotion.
pub fn decode(text: &str) -> Result<CoordNotation> {
    let invalid = || ChessError::InvalidSan {
        text: text.to_string(),
    };

    let mut chars = text.chars();
    let (first, second) = match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => (a, b),
        _ => return Err(invalid()),
    };

    let from = symbol_square(first).ok_or_else(|| ChessError::InvalidSquare {
        text: first.to_string(),
    })?;

    if let Some((prom, drift)) = unglyph(second) {
        // The target rank is absolute: 1 from rank 2, else 8.
        let to_rank = if from.rank() == BoardRank::_2 {
            BoardRank::_1
        } else {
            BoardRank::_8
        };
        let to = from
            .offset(drift, to_rank.ix() as i8 - from.rank().ix() as i8)
            .ok_or_else(|| ChessError::InvalidSquare {
                text: second.to_string(),
            })?;

        return Ok(CoordNotation::new(from, to, Some(prom)));
    }

    let to = symbol_square(second).ok_or_else(|| ChessError::InvalidSquare {
        text: second.to_string(),
    })?;

    Ok(CoordNotation::new(from, to, None))
}

/// Encode a from/to/promotion triple as a two-character pair.
pub fn encode(mv: CoordNotation) -> Result<String> {
    let mut text = String::new();
    text.push(square_symbol(mv.from));

    match mv.prom {
        None => text.push(square_symbol(mv.to)),
        Some(prom) => {
            let drift = mv.to.file() as i8 - mv.from.file() as i8;
            if !(-1..=1).contains(&drift) {
                return Err(ChessError::InvalidPromote {
                    text: mv.to_string(),
                });
            }
            text.push(glyph(prom, drift));
        }
    }

    Ok(text)
}

#[test]
fn the_alphabet_covers_the_board_in_order() {
    use strum::IntoEnumIterator;

    assert_eq!(square_symbol(Square::a1), 'a');
    assert_eq!(square_symbol(Square::h1), 'h');
    assert_eq!(square_symbol(Square::a2), 'i');
    assert_eq!(square_symbol(Square::g8), '!');
    assert_eq!(square_symbol(Square::h8), '?');

    for sq in Square::iter() {
        assert_eq!(symbol_square(square_symbol(sq)), Some(sq));
    }
}

#[test]
fn plain_pairs_roundtrip() {
    use strum::IntoEnumIterator;

    for from in Square::iter() {
        // Pair every square with its 180-degree opposite.
        let to = Square::from_u8(63 - from as u8);
        let mv = CoordNotation::new(from, to, None);
        assert_eq!(decode(&encode(mv).unwrap()).unwrap(), mv);
    }
}

#[test]
fn promotion_glyphs_carry_piece_and_drift() {
    // White pawn g7, capturing left onto f8 as a knight.
    let mv = decode("2(").unwrap();
    assert_eq!(mv.from, Square::g7);
    assert_eq!(mv.to, Square::f8);
    assert_eq!(mv.prom, Some(PawnPromotion::KNIGHT));
    assert_eq!(encode(mv).unwrap(), "2(");

    // Black pawn b2, pushing straight to b1 as a queen.
    let mv = decode("j~").unwrap();
    assert_eq!(mv.from, Square::b2);
    assert_eq!(mv.to, Square::b1);
    assert_eq!(mv.prom, Some(PawnPromotion::QUEEN));
    assert_eq!(encode(mv).unwrap(), "j~");

    // Rook promotion drifting right: black c2 takes d1.
    let mv = decode("k]").unwrap();
    assert_eq!(mv.from, Square::c2);
    assert_eq!(mv.to, Square::d1);
    assert_eq!(mv.prom, Some(PawnPromotion::ROOK));
}

#[test]
fn edge_files_only_promote_straight_or_inward() {
    // a7 has no left capture; the left glyph walks off the board.
    assert!(matches!(
        decode("W{"),
        Err(ChessError::InvalidSquare { .. })
    ));

    // Straight is fine.
    let mv = decode("W~").unwrap();
    assert_eq!((mv.from, mv.to), (Square::a7, Square::a8));

    // h2 has no right capture for black.
    assert!(matches!(
        decode("p}"),
        Err(ChessError::InvalidSquare { .. })
    ));
}

#[test]
fn malformed_pairs_are_refused() {
    assert!(matches!(decode("e"), Err(ChessError::InvalidSan { .. })));
    assert!(matches!(decode("abc"), Err(ChessError::InvalidSan { .. })));
    assert!(matches!(
        decode("*a"),
        Err(ChessError::InvalidSquare { .. })
    ));
}
