//! # The board and the musters
//!
//! The physical side of a chess position: a 'mailbox' board mapping
//! each square to at most one chessman, and per-color *musters* — fixed
//! tables of sixteen identity slots, one per chessman an army can ever
//! field.
//!
//! Chessmen have stable identities independent of their squares. A
//! promoted pawn keeps its pawn slot and merely changes the kind it
//! *moves as*; consequently a missing slot is always a captured man,
//! and its recorded kind is the kind it had when captured. Officers
//! beyond the starting complement (a second queen in a loaded position,
//! say) are booked as promoted pawns and consume a free pawn slot, which
//! bounds every army at sixteen men.

use strum::VariantArray;

use crate::error::{ChessError, Result};
use crate::model::{
    BoardRank, ChessColor, ChessCommoner, ChessPiece, PawnPromotion, Square,
};

/// Data for each square on the board.
///
/// This is the simple and most obvious representation, using a separate
/// value in an array for each square, a so-called 'board'-centric
/// representation.
///
/// This is a generalized version allowing any values, not just
/// chessman references, to fill the squares.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct DataBoard<T>(pub [T; 64]);

impl<T> DataBoard<T> {
    /// Write to a square.
    pub fn set(&mut self, sq: Square, it: T) {
        self.0[sq.ix()] = it
    }

    /// Read a square.
    pub fn at(&self, sq: Square) -> &T {
        &self.0[sq.ix()]
    }
}

impl<T: Copy> DataBoard<Option<T>> {
    pub fn empty() -> Self {
        Self([None; 64])
    }

    /// Take the value off a square, leaving it empty.
    pub fn clear(&mut self, sq: Square) -> Option<T> {
        self.0[sq.ix()].take()
    }
}

/// Stable identity of a chessman: its color and its slot in that
/// color's muster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManId {
    pub color: ChessColor,
    pub slot: u8,
}

/// Where a mustered man currently is.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posting {
    /// Slot not in use; the man was never fielded.
    VACANT,
    /// On the board.
    AT(Square),
    /// Captured.
    TAKEN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MusterSlot {
    posting: Posting,
    /// Pawn slots only: the kind this pawn now moves as.
    promoted: Option<PawnPromotion>,
}

/// The sixteen identity slots of one army.
///
/// Fixed layout: slot 0 the king, 1 the queen, 2-3 the rooks, 4-5 the
/// bishops, 6-7 the knights, 8-15 the pawns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Muster {
    slots: [MusterSlot; 16],
}

const PAWN_SLOTS: std::ops::Range<u8> = 8..16;

fn base_kind(slot: u8) -> ChessPiece {
    match slot {
        0 => ChessPiece::KING,
        1 => ChessPiece::QUEEN,
        2 | 3 => ChessPiece::ROOK,
        4 | 5 => ChessPiece::BISHOP,
        6 | 7 => ChessPiece::KNIGHT,
        _ => ChessPiece::PAWN,
    }
}

fn complement_slots(piece: ChessPiece) -> std::ops::Range<u8> {
    match piece {
        ChessPiece::KING => 0..1,
        ChessPiece::QUEEN => 1..2,
        ChessPiece::ROOK => 2..4,
        ChessPiece::BISHOP => 4..6,
        ChessPiece::KNIGHT => 6..8,
        ChessPiece::PAWN => PAWN_SLOTS,
    }
}

impl Muster {
    pub fn empty() -> Self {
        Self {
            slots: [MusterSlot {
                posting: Posting::VACANT,
                promoted: None,
            }; 16],
        }
    }

    /// Claim a vacant slot for a man of the given kind.
    ///
    /// Officers past the starting complement fall through to a free
    /// pawn slot as promoted pawns; kings and pawns never do.
    fn enlist(&mut self, piece: ChessPiece) -> Option<u8> {
        for slot in complement_slots(piece) {
            if self.slots[slot as usize].posting == Posting::VACANT {
                return Some(slot);
            }
        }

        if piece == ChessPiece::KING || piece == ChessPiece::PAWN {
            return None;
        }

        for slot in PAWN_SLOTS {
            if self.slots[slot as usize].posting == Posting::VACANT {
                self.slots[slot as usize].promoted =
                    Some(unsafe { std::mem::transmute::<u8, PawnPromotion>(piece as u8) });
                return Some(slot);
            }
        }

        None
    }

    /// The kind a slot's man currently moves as.
    pub fn kind(&self, slot: u8) -> ChessPiece {
        match self.slots[slot as usize].promoted {
            Some(p) => p.into(),
            None => base_kind(slot),
        }
    }

    pub fn posting(&self, slot: u8) -> Posting {
        self.slots[slot as usize].posting
    }
}

/// The field of play: board and musters, kept mutually consistent.
///
/// For every live man at square `s`, the board at `s` resolves to that
/// man and the man's posting is `s`; every other square is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub board: DataBoard<Option<ManId>>,
    muster: [Muster; 2],
}

/// A resolved view of one chessman on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manned {
    pub id: ManId,
    pub color: ChessColor,
    pub kind: ChessPiece,
    pub square: Square,
}

impl Field {
    pub fn empty() -> Self {
        Self {
            board: DataBoard::empty(),
            muster: [Muster::empty(), Muster::empty()],
        }
    }

    /// The standard starting position.
    pub fn startpos() -> Self {
        use ChessPiece::*;
        let mut field = Self::empty();
        let back = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];

        for (file, piece) in back.into_iter().enumerate() {
            for color in ChessColor::VARIANTS {
                let home = BoardRank::home(*color).ix() as u8;
                field
                    .place(*color, piece, Square::from_u8(home << 3 | file as u8))
                    .expect("the starting complement always fits");
                let pawns = (home as i8 + color.sign()) as u8;
                field
                    .place(*color, PAWN, Square::from_u8(pawns << 3 | file as u8))
                    .expect("the starting complement always fits");
            }
        }

        field
    }

    /// Field a man of the given color and kind on a square.
    ///
    /// Fails with [`ChessError::DuplicateSquare`] when the square is
    /// occupied, [`ChessError::CantPlaceOnBackRank`] for pawns on ranks
    /// 1 and 8, and [`ChessError::TooMany`] when neither the kind's own
    /// complement nor the promoted-pawn fallback has a slot free.
    pub fn place(&mut self, color: ChessColor, piece: ChessPiece, sq: Square) -> Result<ManId> {
        if self.board.at(sq).is_some() {
            return Err(ChessError::DuplicateSquare { square: sq });
        }

        if piece == ChessPiece::PAWN
            && matches!(sq.rank(), BoardRank::_1 | BoardRank::_8)
        {
            return Err(ChessError::CantPlaceOnBackRank { rank: sq.rank() });
        }

        let slot = self.muster[color.ix()]
            .enlist(piece)
            .ok_or(ChessError::TooMany { color, piece })?;

        self.muster[color.ix()].slots[slot as usize].posting = Posting::AT(sq);
        let id = ManId { color, slot };
        self.board.set(sq, Some(id));
        Ok(id)
    }

    /// Take a man off the board entirely, freeing its slot.
    pub fn remove(&mut self, sq: Square) -> Option<Manned> {
        let man = self.piece_at(sq)?;
        self.board.clear(sq);
        self.muster[man.id.color.ix()].slots[man.id.slot as usize] = MusterSlot {
            posting: Posting::VACANT,
            promoted: None,
        };
        Some(man)
    }

    /// Capture the man on a square: it leaves the board but its slot
    /// stays booked, frozen at its current kind.
    pub fn capture(&mut self, sq: Square) -> Option<Manned> {
        let man = self.piece_at(sq)?;
        self.board.clear(sq);
        self.muster[man.id.color.ix()].slots[man.id.slot as usize].posting = Posting::TAKEN;
        Some(man)
    }

    /// Take a man off the board without freeing its slot. Until the
    /// matching [`Field::put`], board-driven queries skip the man but
    /// its posting still names the old square.
    pub(crate) fn lift(&mut self, sq: Square) -> Option<ManId> {
        self.board.clear(sq)
    }

    /// Set a lifted man back down.
    pub(crate) fn put(&mut self, id: ManId, sq: Square) {
        self.board.set(sq, Some(id));
        self.muster[id.color.ix()].slots[id.slot as usize].posting = Posting::AT(sq);
    }

    /// Move a man between squares. The destination must be empty.
    pub fn shift(&mut self, from: Square, to: Square) {
        debug_assert!(self.board.at(to).is_none());
        if let Some(id) = self.board.clear(from) {
            self.board.set(to, Some(id));
            self.muster[id.color.ix()].slots[id.slot as usize].posting = Posting::AT(to);
        }
    }

    /// Change the kind the pawn on `sq` moves as.
    pub fn promote(&mut self, sq: Square, to: PawnPromotion) {
        if let Some(id) = self.board.at(sq) {
            self.muster[id.color.ix()].slots[id.slot as usize].promoted = Some(to);
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Manned> {
        let id = (*self.board.at(sq))?;
        Some(Manned {
            id,
            color: id.color,
            kind: self.muster[id.color.ix()].kind(id.slot),
            square: sq,
        })
    }

    /// Where a mustered man currently stands, if on the board.
    pub fn locate(&self, id: ManId) -> Option<Square> {
        match self.muster[id.color.ix()].posting(id.slot) {
            Posting::AT(sq) => Some(sq),
            _ => None,
        }
    }

    /// The king's square. Every legal position has one per color.
    pub fn king(&self, color: ChessColor) -> Option<Square> {
        self.locate(ManId { color, slot: 0 })
    }

    /// All live men of a color.
    pub fn men(&self, color: ChessColor) -> impl Iterator<Item = Manned> + '_ {
        (0..16u8).filter_map(move |slot| {
            let id = ManId { color, slot };
            let square = self.locate(id)?;
            Some(Manned {
                id,
                color,
                kind: self.muster[color.ix()].kind(slot),
                square,
            })
        })
    }

    /// Live men of a color currently moving as the given kind.
    pub fn count(&self, color: ChessColor, piece: ChessPiece) -> usize {
        self.men(color).filter(|m| m.kind == piece).count()
    }

    /// The capture tally: kinds of this color's fallen men, as of when
    /// each fell.
    pub fn captured(&self, color: ChessColor) -> impl Iterator<Item = ChessCommoner> + '_ {
        (0..16u8).filter_map(move |slot| {
            let muster = &self.muster[color.ix()];
            if muster.posting(slot) == Posting::TAKEN {
                ChessCommoner::from_piece(muster.kind(slot))
            } else {
                None
            }
        })
    }

    /// Board/muster mutual-consistency check, for tests and debugging.
    pub fn consistent(&self) -> bool {
        use strum::IntoEnumIterator;

        for sq in Square::iter() {
            if let Some(id) = self.board.at(sq) {
                if self.locate(*id) != Some(sq) {
                    return false;
                }
            }
        }

        for color in ChessColor::VARIANTS {
            for slot in 0..16u8 {
                if let Posting::AT(sq) = self.muster[color.ix()].posting(slot) {
                    if *self.board.at(sq) != Some(ManId { color: *color, slot }) {
                        return false;
                    }
                }
            }
        }

        true
    }
}

#[test]
fn startpos_is_consistent() {
    let field = Field::startpos();
    assert!(field.consistent());
    assert_eq!(field.men(ChessColor::WHITE).count(), 16);
    assert_eq!(field.men(ChessColor::BLACK).count(), 16);
    assert_eq!(field.king(ChessColor::WHITE), Some(Square::e1));
    assert_eq!(field.king(ChessColor::BLACK), Some(Square::e8));
}

#[test]
fn second_king_is_too_many() {
    let mut field = Field::empty();
    field.place(ChessColor::WHITE, ChessPiece::KING, Square::e1).unwrap();
    assert_eq!(
        field.place(ChessColor::WHITE, ChessPiece::KING, Square::e2),
        Err(ChessError::TooMany {
            color: ChessColor::WHITE,
            piece: ChessPiece::KING
        })
    );
}

#[test]
fn extra_officers_consume_pawn_slots() {
    let mut field = Field::empty();
    let mut queens = vec![];
    for ix in 0..9u8 {
        queens.push(
            field
                .place(ChessColor::WHITE, ChessPiece::QUEEN, Square::from_u8(ix))
                .unwrap(),
        );
    }

    // One complement queen, eight promoted pawns.
    assert_eq!(queens[0].slot, 1);
    assert!(queens[1..].iter().all(|id| (8..16).contains(&id.slot)));
    assert_eq!(field.count(ChessColor::WHITE, ChessPiece::QUEEN), 9);

    // The tenth queen finds no slot, and neither does a pawn.
    assert_eq!(
        field.place(ChessColor::WHITE, ChessPiece::QUEEN, Square::b5),
        Err(ChessError::TooMany {
            color: ChessColor::WHITE,
            piece: ChessPiece::QUEEN
        })
    );
    assert_eq!(
        field.place(ChessColor::WHITE, ChessPiece::PAWN, Square::b5),
        Err(ChessError::TooMany {
            color: ChessColor::WHITE,
            piece: ChessPiece::PAWN
        })
    );
}

#[test]
fn pawns_never_on_back_ranks() {
    let mut field = Field::empty();
    assert_eq!(
        field.place(ChessColor::WHITE, ChessPiece::PAWN, Square::e8),
        Err(ChessError::CantPlaceOnBackRank { rank: BoardRank::_8 })
    );
}

#[test]
fn capture_freezes_effective_kind() {
    let mut field = Field::empty();
    field.place(ChessColor::WHITE, ChessPiece::PAWN, Square::e7).unwrap();
    field.promote(Square::e7, PawnPromotion::ROOK);

    let man = field.piece_at(Square::e7).unwrap();
    assert_eq!(man.kind, ChessPiece::ROOK);
    assert!((8..16).contains(&man.id.slot));

    field.capture(Square::e7);
    let tally: Vec<ChessCommoner> = field.captured(ChessColor::WHITE).collect();
    assert_eq!(tally, vec![ChessCommoner::ROOK]);
}
