//! # pawnder
//!
//! A self-contained chess rules engine: a deterministic state machine
//! that represents legal positions, parses and applies moves under the
//! full rules of chess — castling, en passant, promotion, Chess960 —
//! and recognises checkmate, stalemate and the draws.
//!
//! Positions come and go as FEN records; moves come and go as standard
//! algebraic notation or as two-character piot move notation pairs.
//! There is no search, no evaluation, no clock and no I/O: a [`Game`]
//! is a plain value owned by its caller.
//!
//! ```
//! use pawnder::Game;
//!
//! let mut game = Game::new();
//! game.play_san("e4").unwrap();
//! game.play_san("c5").unwrap();
//! game.play_san("Nf3").unwrap();
//!
//! assert_eq!(
//!     game.fen(),
//!     "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
//! );
//! assert_eq!(game.log().movetext(), "1.e4 c5 2.Nf3");
//! ```

pub mod error;

/// Modeling the game of chess.
pub mod model;

/// Reading and writing the notations.
pub mod notation;

pub use crate::error::{ChessError, Result};
pub use crate::model::game::Game;
pub use crate::model::{ChessColor, ChessPiece, Outcome, Square};
pub use crate::notation::CoordNotation;
