//! # The game value
//!
//! [`Game`] is the whole mutable state of one chess game: the field of
//! play, the transient metadata (side to move, castling rights,
//! en-passant window, clocks), the SAN move log, and the repetition
//! ledger. It is a plain value; callers wanting to share one instance
//! are responsible for serialising access.
//!
//! The transactional snapshot stack lives here too. Speculative play —
//! disambiguation, mate search, the castling walk — is `begin()`, try,
//! `rollback()`; the contract is that rollback restores *everything*
//! observed at `begin()`, move log and ledger included.

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::board::{Field, ManId, Manned};
use crate::notation::InCheck;
use crate::model::castling::{CastlingRules, shuffle960};
use crate::model::{
    BoardRank, CastlingDirection, ChessColor, ChessPiece, EnPassant, Square,
};

/// The SAN record of the game so far.
///
/// Two parallel arrays per ply: the bare SAN, and the SAN with a
/// trailing `+`/`#` where the move gave check or mate. The starting
/// turn and color are kept so positions loaded from a black-to-move
/// FEN render a `..` in white's column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLog {
    start_turn: u16,
    start_color: ChessColor,
    plain: Vec<String>,
    marked: Vec<String>,
}

impl MoveLog {
    pub fn new(start_turn: u16, start_color: ChessColor) -> Self {
        Self {
            start_turn,
            start_color,
            plain: Vec::new(),
            marked: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, san: String) {
        self.plain.push(san.clone());
        self.marked.push(san);
    }

    pub(crate) fn mark_last(&mut self, mark: InCheck) {
        if let Some(last) = self.marked.last_mut() {
            last.push_str(&mark.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.plain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// Bare SAN per ply, in play order.
    pub fn plain(&self) -> &[String] {
        &self.plain
    }

    /// Annotated SAN per ply, in play order.
    pub fn marked(&self) -> &[String] {
        &self.marked
    }

    /// Annotated moves paired up by turn number, `..` standing in for
    /// an absent white move.
    pub fn rounds(&self) -> Vec<(u16, String, String)> {
        let mut rounds = vec![];
        let mut plies = self.marked.iter().cloned();
        let mut turn = self.start_turn;

        if self.start_color.is_black() {
            if let Some(black) = plies.next() {
                rounds.push((turn, "..".to_string(), black));
                turn += 1;
            }
        }

        loop {
            match (plies.next(), plies.next()) {
                (Some(white), Some(black)) => rounds.push((turn, white, black)),
                (Some(white), None) => rounds.push((turn, white, String::new())),
                _ => break,
            }
            turn += 1;
        }

        rounds
    }

    /// The space-joined movetext, `1.e4 e5 2.Nf3 ..` style.
    pub fn movetext(&self) -> String {
        let mut text = String::new();

        for (turn, white, black) in self.rounds() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&format!("{}.{}", turn, white));
            if !black.is_empty() {
                text.push(' ');
                text.push_str(&black);
            }
        }

        text
    }
}

/// One game of chess, from seed position to (possibly) verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub(crate) field: Field,
    pub(crate) to_move: ChessColor,
    /// Castling rights, indexed first by [`ChessColor`] then [`CastlingDirection`].
    pub(crate) rights: [[bool; 2]; 2],
    pub(crate) en_passant: Option<EnPassant>,
    /// Plies since the last capture or pawn move.
    pub(crate) halfmove_clock: u16,
    /// Turn counter; increments after black moves.
    pub(crate) turn: u16,
    pub(crate) rules: CastlingRules,
    pub(crate) log: MoveLog,
    /// Canonical-fingerprint occurrence counts, first-reached order.
    pub(crate) ledger: IndexMap<String, u8>,
    saves: Vec<Game>,
}

impl Game {
    /// The standard starting position.
    pub fn new() -> Self {
        let mut game = Self {
            field: Field::startpos(),
            to_move: ChessColor::WHITE,
            rights: [[true; 2]; 2],
            en_passant: None,
            halfmove_clock: 0,
            turn: 1,
            rules: CastlingRules::STANDARD,
            log: MoveLog::new(1, ChessColor::WHITE),
            ledger: IndexMap::new(),
            saves: Vec::new(),
        };
        game.record_position();
        game
    }

    /// An empty board with no rights and zeroed clocks, ready for
    /// piece placement.
    pub fn blank() -> Self {
        Self {
            field: Field::empty(),
            to_move: ChessColor::WHITE,
            rights: [[false; 2]; 2],
            en_passant: None,
            halfmove_clock: 0,
            turn: 1,
            rules: CastlingRules::STANDARD,
            log: MoveLog::new(1, ChessColor::WHITE),
            ledger: IndexMap::new(),
            saves: Vec::new(),
        }
    }

    /// Seed a position from a FEN record.
    pub fn from_fen(fen: &str) -> Result<Self> {
        crate::notation::fen::parse(fen, false)
    }

    /// Seed a position from a FEN record, reading the back ranks for
    /// Chess960 castling files.
    pub fn from_fen_chess960(fen: &str) -> Result<Self> {
        crate::notation::fen::parse(fen, true)
    }

    /// Deal a fresh Chess960 game.
    pub fn shuffled<R: rand::Rng>(rng: &mut R) -> Self {
        use ChessPiece::PAWN;

        let back = shuffle960(rng);
        let mut game = Self::blank();
        game.rights = [[true; 2]; 2];
        game.rules = CastlingRules::chess_960(back);

        for (file, officer) in back.into_iter().enumerate() {
            for color in [ChessColor::WHITE, ChessColor::BLACK] {
                let home = BoardRank::home(color);
                let sq = Square::from_u8((home.ix() as u8) << 3 | file as u8);
                game.field
                    .place(color, officer.into(), sq)
                    .expect("a dealt back rank always fits");
                let pawns = (home.ix() as i8 + color.sign()) as u8;
                game.field
                    .place(color, PAWN, Square::from_u8(pawns << 3 | file as u8))
                    .expect("a dealt back rank always fits");
            }
        }

        game.record_position();
        game
    }

    pub fn to_move(&self) -> ChessColor {
        self.to_move
    }

    pub fn turn(&self) -> u16 {
        self.turn
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn right(&self, color: ChessColor, dir: CastlingDirection) -> bool {
        self.rights[color.ix()][dir.ix()]
    }

    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    pub fn rules(&self) -> &CastlingRules {
        &self.rules
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn piece_at(&self, sq: Square) -> Option<Manned> {
        self.field.piece_at(sq)
    }

    /// Field a man, for position setup on a [`Game::blank`] board.
    pub fn place(&mut self, color: ChessColor, piece: ChessPiece, sq: Square) -> Result<ManId> {
        self.field.place(color, piece, sq)
    }

    /// Take a man off the board entirely, for position setup.
    pub fn remove(&mut self, sq: Square) -> Option<Manned> {
        self.field.remove(sq)
    }

    /// Where a mustered man currently stands.
    pub fn locate(&self, id: ManId) -> Option<Square> {
        self.field.locate(id)
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// The position as a six-field FEN record.
    pub fn fen(&self) -> String {
        crate::notation::fen::render(self)
    }

    /// The canonical repetition fingerprint: the FEN truncated to its
    /// first four fields, optionally also dropping the en-passant
    /// square.
    pub fn fingerprint(&self, strip_en_passant: bool) -> String {
        crate::notation::fen::render_fingerprint(self, strip_en_passant)
    }

    /// Times the current position has been on the board.
    pub fn repetitions(&self) -> u8 {
        *self.ledger.get(&self.fingerprint(false)).unwrap_or(&0)
    }

    pub(crate) fn record_position(&mut self) {
        let fp = self.fingerprint(false);
        *self.ledger.entry(fp).or_insert(0) += 1;
    }

    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        self.field.board.at(sq).is_none()
    }

    /// Push the current state onto the snapshot stack.
    pub fn begin(&mut self) {
        let saves = std::mem::take(&mut self.saves);
        let copy = self.clone();
        self.saves = saves;
        self.saves.push(copy);
    }

    /// Pop the snapshot stack and restore that state exactly.
    pub fn rollback(&mut self) -> bool {
        match self.saves.pop() {
            Some(save) => {
                let saves = std::mem::take(&mut self.saves);
                *self = save;
                self.saves = saves;
                true
            }
            None => false,
        }
    }

    /// Pop the snapshot stack, keeping the current state.
    pub fn commit(&mut self) -> bool {
        self.saves.pop().is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn blank_board_starts_with_zero_clock() {
    assert_eq!(Game::new().halfmove_clock(), 0);

    let mut game = Game::blank();
    assert_eq!(game.halfmove_clock(), 0);

    let king = game
        .place(ChessColor::WHITE, ChessPiece::KING, Square::e1)
        .unwrap();
    game.place(ChessColor::BLACK, ChessPiece::KING, Square::e8)
        .unwrap();

    // Placement is setup, not play: the clock stays put.
    assert_eq!(game.halfmove_clock(), 0);
    assert_eq!(game.locate(king), Some(Square::e1));

    game.remove(Square::e1);
    assert_eq!(game.locate(king), None);
}

#[test]
fn snapshots_nest_and_restore() {
    let mut game = Game::new();
    let before = game.fen();

    game.begin();
    game.play_san("e4").unwrap();
    game.begin();
    game.play_san("e5").unwrap();
    game.rollback();
    assert_eq!(game.log().len(), 1);
    game.rollback();

    assert_eq!(game.fen(), before);
    assert_eq!(game.log().len(), 0);
    assert_eq!(game.repetitions(), 1);
}

#[test]
fn commit_keeps_changes() {
    let mut game = Game::new();
    game.begin();
    game.play_san("Nf3").unwrap();
    assert!(game.commit());
    assert!(!game.rollback());
    assert_eq!(game.log().plain(), &["Nf3".to_string()]);
}

#[test]
fn movetext_fills_in_missing_white_move() {
    let mut log = MoveLog::new(3, ChessColor::BLACK);
    log.push("e5".into());
    log.push("Nf3".into());
    log.push("Nc6".into());
    assert_eq!(log.movetext(), "3... e5 4.Nf3 Nc6");
    assert_eq!(log.rounds().len(), 2);
}
