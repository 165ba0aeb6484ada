//! # Forsyth-Edwards Notation
//!
//! FEN is the standard way of representing a chess position. It
//! consists of six fields separated by whitespace:
//!
//! - The chessboard, eight solidus-separated ranks from the 8th down,
//!   letters for chessmen (lowercase black, uppercase white) and
//!   digits run-length-encoding empty squares.
//! - The active player, `w` or `b`.
//! - The castling rights, a subset of `KQkq` or a single dash. With
//!   Chess960 enabled, rights whose rook does not start on the a/h
//!   file are written with that rook's home-file letter instead,
//!   Shredder-FEN style.
//! - The en-passant square, or a dash.
//! - The half-move clock: plies since the last capture or pawn move.
//! - The turn number, starting at 1.
//!
//! Records with only the first three, four or five fields are padded
//! with `- 0 1` / `0 1` / `1` respectively.
//!
//! The canonical *fingerprint* used by the repetition ledger is the
//! same record truncated to its first four fields.

use chumsky::prelude::*;

use crate::error::{ChessError, Result};
use crate::model::castling::CastlingRules;
use crate::model::game::{Game, MoveLog};
use crate::model::{
    BoardFile, BoardRank, CastlingDirection, ChessColor, ChessPiece, EnPassant, Square,
};
use crate::notation::Parsable;

const WHITE_LETTERS: [char; 6] = ['P', 'N', 'B', 'R', 'Q', 'K'];
const BLACK_LETTERS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];

/// A chessman letter, colored by case.
fn chessman(ch: char) -> Option<(ChessColor, ChessPiece)> {
    use ChessPiece::*;
    let kind = |ix: usize| [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING][ix];

    if let Some(ix) = WHITE_LETTERS.iter().position(|c| *c == ch) {
        Some((ChessColor::WHITE, kind(ix)))
    } else if let Some(ix) = BLACK_LETTERS.iter().position(|c| *c == ch) {
        Some((ChessColor::BLACK, kind(ix)))
    } else {
        None
    }
}

/// One castling-rights letter: a plain side, or an explicit Chess960
/// home file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastlingFile {
    Side(CastlingDirection),
    Explicit(BoardFile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCase<T> {
    White(T),
    Black(T),
}

fn castling_letter(ch: char, chess960: bool) -> Option<ColorCase<CastlingFile>> {
    use CastlingDirection::*;
    use ColorCase::*;

    match ch {
        'K' => Some(White(CastlingFile::Side(WEST))),
        'Q' => Some(White(CastlingFile::Side(EAST))),
        'k' => Some(Black(CastlingFile::Side(WEST))),
        'q' => Some(Black(CastlingFile::Side(EAST))),
        'a'..='h' if chess960 => Some(Black(CastlingFile::Explicit(BoardFile::from_u8(
            ch as u8 - b'a',
        )))),
        'A'..='H' if chess960 => Some(White(CastlingFile::Explicit(BoardFile::from_u8(
            ch as u8 - b'A',
        )))),
        _ => None,
    }
}

fn fen_color<'s>() -> impl Parser<'s, &'s str, ChessColor> {
    choice((
        just('w').to(ChessColor::WHITE),
        just('b').to(ChessColor::BLACK),
    ))
}

/// Read a position out of a FEN record.
pub fn parse(text: &str, chess960: bool) -> Result<Game> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ChessError::EmptyFen);
    }

    if text.split(' ').any(|f| f.is_empty()) {
        return Err(ChessError::EmptyFen);
    }

    let mut fields: Vec<&str> = text.split(' ').collect();
    match fields.len() {
        3 => fields.extend(["-", "0", "1"]),
        4 => fields.extend(["0", "1"]),
        5 => fields.extend(["1"]),
        6 => {}
        count => return Err(ChessError::FenCount { count }),
    }

    let mut game = Game::blank();
    parse_board(fields[0], &mut game)?;

    if chess960 {
        game.rules = detect_chess960(&game)?;
    }

    game.to_move = fen_color()
        .then_ignore(end())
        .parse(fields[1])
        .into_output()
        .ok_or_else(|| ChessError::FenTomoveWrong {
            text: fields[1].to_string(),
        })?;

    parse_castling(fields[2], chess960, &mut game)?;
    game.en_passant = parse_en_passant(fields[3], &game)?;

    game.halfmove_clock = fields[4].parse().map_err(|_| ChessError::FenInvalidPly {
        text: fields[4].to_string(),
    })?;

    game.turn = fields[5]
        .parse()
        .map_err(|_| ChessError::FenInvalidMoveNumber {
            text: fields[5].to_string(),
        })?;

    if game.field.king(ChessColor::WHITE).is_none()
        || game.field.king(ChessColor::BLACK).is_none()
    {
        return Err(ChessError::FenTooLittle);
    }

    game.log = MoveLog::new(game.turn, game.to_move);
    game.record_position();
    Ok(game)
}

fn parse_board(field: &str, game: &mut Game) -> Result<()> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() > 8 {
        return Err(ChessError::FenTooMuch);
    }
    if rows.len() < 8 {
        return Err(ChessError::FenTooLittle);
    }

    for (ix, row) in rows.iter().enumerate() {
        let rank = BoardRank::from_u8(7 - ix as u8);
        let mut file = 0u8;

        for ch in row.chars() {
            if let Some(run) = ch.to_digit(10) {
                if run == 0 || run > 8 {
                    return Err(ChessError::FenInvalidPiece { ch });
                }
                file += run as u8;
                continue;
            }

            let (color, piece) = chessman(ch).ok_or(ChessError::FenInvalidPiece { ch })?;

            if file >= 8 {
                return Err(ChessError::FenTooMuch);
            }

            let sq = Square::from_coords(BoardFile::from_u8(file), rank);
            game.field.place(color, piece, sq).map_err(|e| match e {
                ChessError::TooMany { color, piece } => ChessError::FenMultiPiece { color, piece },
                other => other,
            })?;
            file += 1;
        }

        if file > 8 {
            return Err(ChessError::FenTooMuch);
        }
        if file < 8 {
            return Err(ChessError::FenTooLittle);
        }
    }

    Ok(())
}

/// Walk black's back rank for the Chess960 home files: the first rook
/// met is the queenside one, the second the kingside one, and the king
/// fixes the king file. White's king must mirror the file, or the
/// record is refused.
fn detect_chess960(game: &Game) -> Result<CastlingRules> {
    let mut rules = CastlingRules {
        chess960: true,
        ..CastlingRules::STANDARD
    };
    let mut rooks = vec![];

    for file in 0..8u8 {
        let sq = Square::from_coords(BoardFile::from_u8(file), BoardRank::_8);
        match game.piece_at(sq) {
            Some(man) if man.color.is_black() && man.kind == ChessPiece::ROOK => {
                rooks.push(BoardFile::from_u8(file));
            }
            Some(man) if man.color.is_black() && man.kind == ChessPiece::KING => {
                rules.king_file = BoardFile::from_u8(file);
            }
            _ => {}
        }
    }

    if let [east, west, ..] = rooks[..] {
        rules.rook_files = [east, west];
    }

    if let Some(white_king) = game.field.king(ChessColor::WHITE) {
        if white_king.rank() == BoardRank::_1 && white_king.file() != rules.king_file {
            return Err(ChessError::FenCastleWrong {
                text: "white and black home files disagree".to_string(),
            });
        }
    }

    Ok(rules)
}

fn parse_castling(field: &str, chess960: bool, game: &mut Game) -> Result<()> {
    if field == "-" {
        return Ok(());
    }

    if field.len() > 4 {
        return Err(ChessError::FenCastleTooLong {
            text: field.to_string(),
        });
    }

    for ch in field.chars() {
        let case = castling_letter(ch, chess960).ok_or_else(|| ChessError::FenCastleWrong {
            text: field.to_string(),
        })?;

        let (color, letter) = match case {
            ColorCase::White(l) => (ChessColor::WHITE, l),
            ColorCase::Black(l) => (ChessColor::BLACK, l),
        };

        let dir = match letter {
            CastlingFile::Side(dir) => dir,
            CastlingFile::Explicit(file) => {
                game.rules
                    .direction_of(file)
                    .ok_or_else(|| ChessError::FenCastleWrong {
                        text: field.to_string(),
                    })?
            }
        };

        game.rights[color.ix()][dir.ix()] = true;
    }

    // A right the position cannot support is quietly dropped in
    // standard chess and refused under Chess960, where the home files
    // were just read off the board.
    for color in [ChessColor::WHITE, ChessColor::BLACK] {
        for dir in [CastlingDirection::EAST, CastlingDirection::WEST] {
            if !game.rights[color.ix()][dir.ix()] {
                continue;
            }

            let supported = game.holds_home(color, ChessPiece::KING, game.rules.king_home(color))
                && game.holds_home(color, ChessPiece::ROOK, game.rules.rook_home(color, dir));

            if !supported {
                if chess960 {
                    return Err(ChessError::FenCastleWrong {
                        text: field.to_string(),
                    });
                }
                game.rights[color.ix()][dir.ix()] = false;
            }
        }
    }

    Ok(())
}

fn parse_en_passant(field: &str, game: &Game) -> Result<Option<EnPassant>> {
    if field == "-" {
        return Ok(None);
    }

    let wrong = || ChessError::FenInvalidEnPassant {
        text: field.to_string(),
    };

    let square = Square::parser()
        .then_ignore(end())
        .parse(field)
        .into_output()
        .ok_or_else(wrong)?;

    let (behind, doubled) = match square.rank() {
        BoardRank::_3 => (square.offset(0, 1), ChessColor::WHITE),
        BoardRank::_6 => (square.offset(0, -1), ChessColor::BLACK),
        _ => return Err(wrong()),
    };

    let capture = behind.ok_or_else(wrong)?;
    let pawn = game.piece_at(capture).ok_or_else(wrong)?;
    if pawn.kind != ChessPiece::PAWN || pawn.color != doubled {
        return Err(wrong());
    }

    Ok(Some(EnPassant { square, capture }))
}

/// Write a position as a six-field FEN record.
pub fn render(game: &Game) -> String {
    let fields = render_fields(game);
    fields.join(" ")
}

/// The first four fields only, keyed into the repetition ledger.
pub fn render_fingerprint(game: &Game, strip_en_passant: bool) -> String {
    let fields = render_fields(game);
    let ep = if strip_en_passant {
        "-"
    } else {
        fields[3].as_str()
    };
    format!("{} {} {} {}", fields[0], fields[1], fields[2], ep)
}

fn render_fields(game: &Game) -> [String; 6] {
    let mut board = String::new();

    for rank in (0..8u8).rev() {
        if rank < 7 {
            board.push('/');
        }

        let mut run = 0;
        for file in 0..8u8 {
            let sq = Square::from_coords(BoardFile::from_u8(file), BoardRank::from_u8(rank));
            match game.piece_at(sq) {
                None => run += 1,
                Some(man) => {
                    if run > 0 {
                        board.push_str(&run.to_string());
                        run = 0;
                    }
                    let letters = match man.color {
                        ChessColor::WHITE => WHITE_LETTERS,
                        ChessColor::BLACK => BLACK_LETTERS,
                    };
                    board.push(letters[man.kind.ix()]);
                }
            }
        }
        if run > 0 {
            board.push_str(&run.to_string());
        }
    }

    let to_move = match game.to_move {
        ChessColor::WHITE => "w",
        ChessColor::BLACK => "b",
    }
    .to_string();

    let mut castling = String::new();
    for (color, dir, standard_file, letter) in [
        (ChessColor::WHITE, CastlingDirection::WEST, BoardFile::h_, 'K'),
        (ChessColor::WHITE, CastlingDirection::EAST, BoardFile::a_, 'Q'),
        (ChessColor::BLACK, CastlingDirection::WEST, BoardFile::h_, 'k'),
        (ChessColor::BLACK, CastlingDirection::EAST, BoardFile::a_, 'q'),
    ] {
        if !game.right(color, dir) {
            continue;
        }

        let home = game.rules.rook_files[dir.ix()];
        if game.rules.chess960 && home != standard_file {
            let file = BoardFile::VARIANTS[home.ix()];
            castling.push_str(&match color {
                ChessColor::WHITE => file.to_uppercase(),
                ChessColor::BLACK => file.to_lowercase(),
            });
        } else {
            castling.push(letter);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = match game.en_passant {
        Some(ep) => ep.square.to_string(),
        None => "-".to_string(),
    };

    [
        board,
        to_move,
        castling,
        en_passant,
        game.halfmove_clock.to_string(),
        game.turn.to_string(),
    ]
}

impl Game {
    pub(crate) fn holds_home(&self, color: ChessColor, kind: ChessPiece, home: Square) -> bool {
        self.piece_at(home)
            .is_some_and(|man| man.color == color && man.kind == kind)
    }
}

pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn startpos_renders_and_reparses() {
    assert_eq!(Game::new().fen(), STARTPOS);

    let loaded = parse(STARTPOS, false).unwrap();
    assert_eq!(loaded.fen(), STARTPOS);
    assert!(loaded.field().consistent());
}

#[test]
fn wellformed_fens_roundtrip() {
    for fen in [
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
        "rn3b1N/pp2k2p/4p2q/1NQ5/3P4/8/PPP3PP/5RK1 b - - 1 1",
        "3k2R1/8/3K4/8/8/8/8/8 b - - 0 1",
        "8/3P4/8/8/8/7k/1b6/5K2 w - - 12 56",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    ] {
        assert_eq!(parse(fen, false).unwrap().fen(), fen);
    }
}

#[test]
fn short_records_get_default_tails() {
    let game = parse("8/8/8/8/8/8/k7/2K5 w -", false).unwrap();
    assert_eq!(game.fen(), "8/8/8/8/8/8/k7/2K5 w - - 0 1");

    let four = parse("8/8/8/8/8/8/k7/2K5 b - -", false).unwrap();
    assert_eq!(four.halfmove_clock(), 0);
    assert_eq!(four.turn(), 1);

    let five = parse("8/8/8/8/8/8/k7/2K5 w - - 42", false).unwrap();
    assert_eq!(five.halfmove_clock(), 42);
    assert_eq!(five.turn(), 1);
}

#[test]
fn field_count_and_shape_errors() {
    use ChessError::*;

    assert_eq!(parse("", false), Err(EmptyFen));
    assert_eq!(parse("8/8/8/8/8/8/k7/2K5  w -", false), Err(EmptyFen));
    assert_eq!(
        parse("8/8/8/8/8/8/k7/2K5 w", false),
        Err(FenCount { count: 2 })
    );
    assert_eq!(
        parse("8/8/8/8/8/8/k7/2K5 w - - 0 1 x", false),
        Err(FenCount { count: 7 })
    );
    assert_eq!(parse("8/8/8/8/8/8/8 w - -", false), Err(FenTooLittle));
    assert_eq!(parse("8/8/8/8/8/8/8/8/8 w - -", false), Err(FenTooMuch));
    assert_eq!(
        parse("9/8/8/8/8/8/k7/2K5 w - -", false),
        Err(FenInvalidPiece { ch: '9' })
    );
    assert_eq!(parse("81/8/8/8/8/8/k7/2K5 w - -", false), Err(FenTooMuch));
    assert_eq!(
        parse("ppppppppp/8/8/8/8/8/k7/2K5 w - -", false),
        Err(FenTooMuch)
    );
    assert_eq!(parse("7/8/8/8/8/8/k7/2K5 w - -", false), Err(FenTooLittle));
    assert_eq!(
        parse("8/8/8/8/8/8/k7/2K4x w - -", false),
        Err(FenInvalidPiece { ch: 'x' })
    );
    // A board with no kings is no position at all.
    assert_eq!(parse("8/8/8/8/8/8/8/8 w - -", false), Err(FenTooLittle));
}

#[test]
fn bad_trailing_fields() {
    use ChessError::*;

    let board = "8/8/8/8/8/8/k7/2K5";
    assert_eq!(
        parse(&format!("{board} white - -"), false),
        Err(FenTomoveWrong {
            text: "white".to_string()
        })
    );
    assert_eq!(
        parse(&format!("{board} w KQkqK -"), false),
        Err(FenCastleTooLong {
            text: "KQkqK".to_string()
        })
    );
    assert_eq!(
        parse(&format!("{board} w X -"), false),
        Err(FenCastleWrong {
            text: "X".to_string()
        })
    );
    assert_eq!(
        parse(&format!("{board} w - e4"), false),
        Err(FenInvalidEnPassant {
            text: "e4".to_string()
        })
    );
    assert_eq!(
        parse(&format!("{board} w - - x 1"), false),
        Err(FenInvalidPly {
            text: "x".to_string()
        })
    );
    assert_eq!(
        parse(&format!("{board} w - - 0 x"), false),
        Err(FenInvalidMoveNumber {
            text: "x".to_string()
        })
    );
}

#[test]
fn complement_overflow_is_multi_piece() {
    // Nine extra queens exhaust the pawn slots; the tenth has nowhere to go.
    let fen = "QQQQQQQQ/QQ6/8/8/8/8/k7/2K5 w - -";
    assert_eq!(
        parse(fen, false),
        Err(ChessError::FenMultiPiece {
            color: ChessColor::WHITE,
            piece: ChessPiece::QUEEN
        })
    );

    let two_kings = "k1k5/8/8/8/8/8/8/2K5 w - -";
    assert_eq!(
        parse(two_kings, false),
        Err(ChessError::FenMultiPiece {
            color: ChessColor::BLACK,
            piece: ChessPiece::KING
        })
    );
}

#[test]
fn unsupported_rights_are_dropped_in_standard_chess() {
    // Black's king has wandered; black's stated rights cannot stand.
    let game = parse("4k3/8/8/8/8/8/8/R3K2R w KQkq - 0 1", false).unwrap();
    assert!(game.right(ChessColor::WHITE, CastlingDirection::WEST));
    assert!(game.right(ChessColor::WHITE, CastlingDirection::EAST));
    assert!(!game.right(ChessColor::BLACK, CastlingDirection::WEST));
    assert!(!game.right(ChessColor::BLACK, CastlingDirection::EAST));
}

#[test]
fn en_passant_must_have_its_pawn() {
    assert!(matches!(
        parse(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1",
            false
        ),
        Err(ChessError::FenInvalidEnPassant { .. })
    ));

    let real = parse(
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        false,
    )
    .unwrap();
    let ep = real.en_passant().unwrap();
    assert_eq!(ep.square, Square::e3);
    assert_eq!(ep.capture, Square::e4);
}

#[test]
fn chess960_round_trip_on_a_shuffled_setup() {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    let mut rng = SmallRng::seed_from_u64(960);

    for _ in 0..20 {
        let game = Game::shuffled(&mut rng);
        let fen = game.fen();
        let loaded = parse(&fen, true).unwrap();

        assert_eq!(loaded.fen(), fen);
        assert_eq!(loaded.rules(), game.rules());
        assert!(loaded.right(ChessColor::WHITE, CastlingDirection::EAST));
        assert!(loaded.right(ChessColor::BLACK, CastlingDirection::WEST));
    }
}

#[test]
fn chess960_asymmetry_fails_loudly() {
    // Black's king file says c, white's king stands on e.
    let fen = "2kr3r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
    assert!(matches!(
        parse(fen, true),
        Err(ChessError::FenCastleWrong { .. })
    ));
}
