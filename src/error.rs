//! # Errors
//!
//! Every way a caller can be told "no". All fallible operations in this
//! crate return [`Result`]; nothing panics on user input.
//!
//! The messages interpolate chessmen and colors by their full English
//! names, and squares in algebraic coordinates, so they can be surfaced
//! to players as-is.

use thiserror::Error;

use crate::model::{BoardRank, ChessColor, ChessPiece, Square};

pub type Result<T> = std::result::Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("cannot understand '{text}' as a move")]
    InvalidSan { text: String },

    #[error("a FEN record has three to six fields, found {count}")]
    FenCount { count: usize },

    #[error("a FEN field is empty")]
    EmptyFen,

    #[error("the FEN board describes too many squares")]
    FenTooMuch,

    #[error("the FEN board describes too few squares or is missing a king")]
    FenTooLittle,

    #[error("the active player must be 'w' or 'b', found '{text}'")]
    FenTomoveWrong { text: String },

    #[error("castling rights '{text}' name more than four letters")]
    FenCastleTooLong { text: String },

    #[error("cannot understand '{text}' as castling rights")]
    FenCastleWrong { text: String },

    #[error("'{text}' is not a possible en-passant square")]
    FenInvalidEnPassant { text: String },

    #[error("'{text}' is not a valid half-move clock")]
    FenInvalidPly { text: String },

    #[error("'{text}' is not a valid turn number")]
    FenInvalidMoveNumber { text: String },

    #[error("'{ch}' does not name a chessman, an empty run, or a rank break")]
    FenInvalidPiece { ch: char },

    #[error("the position fields more {color} {piece}s than one army can muster")]
    FenMultiPiece { color: ChessColor, piece: ChessPiece },

    #[error("{color} is in check")]
    InCheck { color: ChessColor },

    #[error("{color} can no longer castle kingside")]
    CantCastleKingside { color: ChessColor },

    #[error("{color} can no longer castle queenside")]
    CantCastleQueenside { color: ChessColor },

    #[error("cannot castle with a piece on {square}")]
    CastlePiecesInWay { square: Square },

    #[error("castling would take the king through check on {square}")]
    CastleWouldCheck { square: Square },

    #[error("that move would put the {color} king in check")]
    MoveWouldCheck { color: ChessColor },

    #[error("that move would leave the {color} king in check")]
    StillInCheck { color: ChessColor },

    #[error("the chessman on {square} cannot capture its own color")]
    CantCaptureOwn { square: Square },

    #[error("there is nothing to capture on {square}")]
    NoPiece { square: Square },

    #[error("the chessman on {square} belongs to {color}")]
    WrongColor { square: Square, color: ChessColor },

    #[error("the {piece} on {from} cannot move to {to}")]
    CantMoveThatWay {
        piece: ChessPiece,
        from: Square,
        to: Square,
    },

    #[error("{color} already fields a full muster of {piece}s")]
    TooMany { color: ChessColor, piece: ChessPiece },

    #[error("{square} is already occupied")]
    DuplicateSquare { square: Square },

    #[error("'{text}' does not name a color")]
    InvalidColor { text: String },

    #[error("'{text}' does not name a square")]
    InvalidSquare { text: String },

    #[error("'{text}' does not name a chessman")]
    InvalidPiece { text: String },

    #[error("'{text}' is not a piece a pawn can promote to")]
    InvalidPromote { text: String },

    #[error("more than one {piece} can reach {to}")]
    Ambiguous { piece: ChessPiece, to: Square },

    #[error("no {piece} can reach {to}")]
    NoPieceCanDoThat { piece: ChessPiece, to: Square },

    #[error("a pawn can never stand on rank {rank}")]
    CantPlaceOnBackRank { rank: BoardRank },
}
