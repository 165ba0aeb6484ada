use strum::{EnumIs, EnumIter, VariantArray, VariantNames};

pub mod attacking;
pub mod board;
pub mod castling;
pub mod endings;
pub mod game;
pub mod geometry;
pub mod movegen;
pub mod moving;

/// Representation of the squares on a chessboard.
///
/// This enum uses the convention of numbering
/// squares starting with a1 = 0 and then counting
/// up over the files first, b1 = 1, c1 = 2, ... and then the
/// ranks, a2 = 8, a3 = 16, ... ending with h8 = 63.
///
/// This is the so called file-major little-endian layout.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    VariantNames, EnumIter)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    a1 = 0o00, b1 = 0o01, c1 = 0o02, d1 = 0o03, e1 = 0o04, f1 = 0o05, g1 = 0o06, h1 = 0o07,
    a2 = 0o10, b2 = 0o11, c2 = 0o12, d2 = 0o13, e2 = 0o14, f2 = 0o15, g2 = 0o16, h2 = 0o17,
    a3 = 0o20, b3 = 0o21, c3 = 0o22, d3 = 0o23, e3 = 0o24, f3 = 0o25, g3 = 0o26, h3 = 0o27,
    a4 = 0o30, b4 = 0o31, c4 = 0o32, d4 = 0o33, e4 = 0o34, f4 = 0o35, g4 = 0o36, h4 = 0o37,
    a5 = 0o40, b5 = 0o41, c5 = 0o42, d5 = 0o43, e5 = 0o44, f5 = 0o45, g5 = 0o46, h5 = 0o47,
    a6 = 0o50, b6 = 0o51, c6 = 0o52, d6 = 0o53, e6 = 0o54, f6 = 0o55, g6 = 0o56, h6 = 0o57,
    a7 = 0o60, b7 = 0o61, c7 = 0o62, d7 = 0o63, e7 = 0o64, f7 = 0o65, g7 = 0o66, h7 = 0o67,
    a8 = 0o70, b8 = 0o71, c8 = 0o72, d8 = 0o73, e8 = 0o74, f8 = 0o75, g8 = 0o76, h8 = 0o77,
}

impl Square {
    /// Use this Square as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x3F) }
    }

    /// Split a square into file and rank.
    #[inline]
    pub fn coords(self) -> (BoardFile, BoardRank) {
        (self.file(), self.rank())
    }

    #[inline]
    pub fn file(self) -> BoardFile {
        BoardFile::from_u8(self as u8)
    }

    #[inline]
    pub fn rank(self) -> BoardRank {
        BoardRank::from_u8((self as u8 & 0x38) >> 3)
    }

    /// Join a file and rank into a square.
    #[inline]
    pub fn from_coords(f: BoardFile, r: BoardRank) -> Self {
        Self::from_u8(f as u8 | (r as u8) << 3)
    }

    /// The square offset by whole-board coordinates, or `None` when it
    /// would fall off an edge.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        let f = self.file() as i8 + files;
        let r = self.rank() as i8 + ranks;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Self::from_u8((f | r << 3) as u8))
        } else {
            None
        }
    }

    /// One step along a compass direction.
    #[inline]
    pub fn step(self, dir: CompassRose) -> Option<Self> {
        let (f, r) = dir.deltas();
        self.offset(f, r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BoardRank {
    _1 = 0,
    _2 = 1,
    _3 = 2,
    _4 = 3,
    _5 = 4,
    _6 = 5,
    _7 = 6,
    _8 = 7,
}

impl BoardRank {
    pub const VARIANTS: &'static [&'static str] = &["1", "2", "3", "4", "5", "6", "7", "8"];

    /// Use this rank as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x7) }
    }

    /// The rank a color's royalty starts the game on.
    #[inline]
    pub fn home(color: ChessColor) -> Self {
        match color {
            ChessColor::WHITE => Self::_1,
            ChessColor::BLACK => Self::_8,
        }
    }

    /// The rank a color promotes on, i.e. the opponent's home rank.
    #[inline]
    pub fn promotion(color: ChessColor) -> Self {
        Self::home(color.opp())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum BoardFile {
    a_ = 0,
    b_ = 1,
    c_ = 2,
    d_ = 3,
    e_ = 4,
    f_ = 5,
    g_ = 6,
    h_ = 7,
}

impl BoardFile {
    pub const VARIANTS: &'static [&'static str] = &["a", "b", "c", "d", "e", "f", "g", "h"];

    /// Use this file as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x7) }
    }
}

/// Representation of color of a player or chessman.
///
/// Used extensively in indexing of arrays of the form
/// `[<white value>, <black value>]`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, VariantArray)]
#[repr(u8)]
pub enum ChessColor {
    WHITE = 0,
    BLACK = 1,
}

impl ChessColor {
    /// Opposing color.
    #[inline]
    pub fn opp(self) -> Self {
        unsafe { std::mem::transmute(self as u8 ^ 1) }
    }

    /// Direction of pawn travel: +1 rank for white, -1 for black.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Self::WHITE => 1,
            Self::BLACK => -1,
        }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// Representation of the piece types of chessmen.
///
/// This enum is further subdivided into named ranges: the
/// [`ChessOfficer`]s exclude pawns, the [`ChessCommoner`]s exclude
/// kings, and the [`PawnPromotion`]s exclude both. The shared
/// discriminant values make the subset inclusions free.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum ChessPiece {
    PAWN = 1,
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

impl ChessPiece {
    /// Use as an array index: equal to one less than the discriminant value.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }
}

/// Subset inclusion.
impl From<ChessOfficer> for ChessPiece {
    #[inline]
    fn from(value: ChessOfficer) -> Self {
        unsafe { std::mem::transmute(value) }
    }
}

/// Subset inclusion.
impl From<PawnPromotion> for ChessPiece {
    #[inline]
    fn from(value: PawnPromotion) -> Self {
        unsafe { std::mem::transmute(value) }
    }
}

/// Subset inclusion.
impl From<ChessCommoner> for ChessPiece {
    #[inline]
    fn from(value: ChessCommoner) -> Self {
        unsafe { std::mem::transmute(value) }
    }
}

/// Representation of the chess officers, that is, not pawns.
///
/// In several instances in this codebase, the exclusion of pawns
/// at a type-level is a convenient guarantee.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum ChessOfficer {
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

impl ChessOfficer {
    /// See [`ChessPiece::ix`].
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }

    #[inline]
    pub fn from_piece(ech: ChessPiece) -> Option<Self> {
        if ech == ChessPiece::PAWN {
            None
        } else {
            Some(unsafe { std::mem::transmute(ech as u8) })
        }
    }
}

/// Representation of the chess commoners, that is, not kings.
///
/// Kings cannot be captured, so the capture tally speaks in commoners.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, VariantArray, Hash)]
#[repr(u8)]
pub enum ChessCommoner {
    PAWN = 1,
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
}

impl ChessCommoner {
    /// See [`ChessPiece::ix`].
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }

    #[inline]
    pub fn from_piece(ech: ChessPiece) -> Option<Self> {
        if ech == ChessPiece::KING {
            None
        } else {
            Some(unsafe { std::mem::transmute(ech as u8) })
        }
    }
}

/// Representation of the chess promotion echelons, that is, not pawns or kings.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum PawnPromotion {
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
}

impl PawnPromotion {
    /// See [`ChessPiece::ix`].
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }
}

/// Representation of the directions on a chessboard.
///
/// ```text
///  NE     North    NW
///      +7  +8  +9
/// East -1  ..  +1 West
///      -9  -8  -7
///  SE     south    SW
/// ```
///
/// This is the classic compass rose associated with the
/// '64'-representation of chessboard squares: adding a direction value
/// to a square index moves one step in that direction, so long as it
/// would not move off the board.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray)]
#[repr(i8)]
pub enum CompassRose {
    NORTH = 8,
    WEST = 1,
    EAST = -1,
    SOUTH = -8,

    NORTHWEST = Self::NORTH as i8 + Self::WEST as i8,
    NORTHEAST = Self::NORTH as i8 + Self::EAST as i8,
    SOUTHWEST = Self::SOUTH as i8 + Self::WEST as i8,
    SOUTHEAST = Self::SOUTH as i8 + Self::EAST as i8,
}

impl CompassRose {
    pub const ORTHOGONALS: [CompassRose; 4] = [Self::NORTH, Self::WEST, Self::EAST, Self::SOUTH];

    pub const DIAGONALS: [CompassRose; 4] = [
        Self::NORTHWEST,
        Self::NORTHEAST,
        Self::SOUTHWEST,
        Self::SOUTHEAST,
    ];

    /// The (file, rank) coordinate deltas of one step in this direction.
    #[inline]
    pub fn deltas(self) -> (i8, i8) {
        match self {
            Self::NORTH => (0, 1),
            Self::WEST => (1, 0),
            Self::EAST => (-1, 0),
            Self::SOUTH => (0, -1),
            Self::NORTHWEST => (1, 1),
            Self::NORTHEAST => (-1, 1),
            Self::SOUTHWEST => (1, -1),
            Self::SOUTHEAST => (-1, -1),
        }
    }
}

/// Representation of the directions of castling.
///
/// Note here that the discriminant values are not equal
/// to those of [`CompassRose`], this is owing to their use
/// as array indexes.
///
/// The naming convention is chosen to account for Chess960,
/// wherein the rook's relative position to the king is not fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum CastlingDirection {
    /// Aka. the 'long' or 'queen-side' castling.
    EAST = 0,
    /// Aka. the 'short' or 'king-side' castling.
    WEST = 1,
}

impl CastlingDirection {
    /// Use as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// Subset inclusion (with mapping.)
impl From<CastlingDirection> for CompassRose {
    #[inline]
    fn from(value: CastlingDirection) -> Self {
        match value {
            CastlingDirection::EAST => Self::EAST,
            CastlingDirection::WEST => Self::WEST,
        }
    }
}

/// Representation of the en-passant capture rule.
///
/// En-passant capture is a special pawn capture, where
/// a pawn moving two squares as its initial move can be
/// captured by an enemy pawn as if it had only moved one.
///
/// This rule exists in tandem with the rule allowing pawns to
/// move two squares as their first move, to prevent the unopposed
/// creation of passed pawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnPassant {
    /// Square upon which en-passant capture is possible.
    pub square: Square,
    /// Square of the capturable pawn.
    pub capture: Square,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(ChessColor),
    Draw,
}

#[test]
fn square_coords_roundtrip() {
    use strum::IntoEnumIterator;
    for sq in Square::iter() {
        let (f, r) = sq.coords();
        assert_eq!(Square::from_coords(f, r), sq);
    }
}

#[test]
fn compass_deltas_match_discriminants() {
    for dir in [CompassRose::ORTHOGONALS, CompassRose::DIAGONALS].concat() {
        let (f, r) = dir.deltas();
        assert_eq!(f + r * 8, dir as i8);
    }
}

#[test]
fn square_step_stays_on_board() {
    assert_eq!(Square::a1.step(CompassRose::EAST), None);
    assert_eq!(Square::a1.step(CompassRose::SOUTH), None);
    assert_eq!(Square::h8.step(CompassRose::WEST), None);
    assert_eq!(Square::e4.step(CompassRose::NORTH), Some(Square::e5));
    assert_eq!(Square::e4.step(CompassRose::SOUTHEAST), Some(Square::d3));
}
