//! # Castling rules
//!
//! Data representation of the castling moves, for standard chess and
//! for randomized variants in the Chess960 family. The king and rook
//! *landing* files are fixed by rule (c/d queenside, g/f kingside);
//! what varies is where they start.

use rand::Rng;

use crate::model::{
    BoardFile, BoardRank, CastlingDirection, ChessColor, ChessOfficer, Square,
};

/// Home files of the castling pieces, plus the variant flag.
///
/// The rook files are indexed by [`CastlingDirection`], so
/// `rook_files[EAST]` is the queenside rook. Both colors share one set
/// of files; asymmetric starting arrays are not representable, by
/// design of the FEN loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRules {
    pub chess960: bool,
    pub king_file: BoardFile,
    pub rook_files: [BoardFile; 2],
}

impl CastlingRules {
    pub const STANDARD: CastlingRules = CastlingRules {
        chess960: false,
        king_file: BoardFile::e_,
        rook_files: [BoardFile::a_, BoardFile::h_],
    };

    /// Derive the castling files from a Chess960 back rank, a-file first.
    pub fn chess_960(back: [ChessOfficer; 8]) -> Self {
        let mut king_file = BoardFile::e_;
        let mut rooks = vec![];

        for (file, officer) in back.into_iter().enumerate() {
            match officer {
                ChessOfficer::KING => king_file = BoardFile::from_u8(file as u8),
                ChessOfficer::ROOK => rooks.push(BoardFile::from_u8(file as u8)),
                _ => {}
            }
        }

        Self {
            chess960: true,
            king_file,
            rook_files: [rooks[0], rooks[1]],
        }
    }

    pub fn king_home(&self, color: ChessColor) -> Square {
        Square::from_coords(self.king_file, BoardRank::home(color))
    }

    pub fn rook_home(&self, color: ChessColor, dir: CastlingDirection) -> Square {
        Square::from_coords(self.rook_files[dir.ix()], BoardRank::home(color))
    }

    /// File the king lands on: c queenside, g kingside.
    pub fn king_target(dir: CastlingDirection) -> BoardFile {
        match dir {
            CastlingDirection::EAST => BoardFile::c_,
            CastlingDirection::WEST => BoardFile::g_,
        }
    }

    /// File the rook lands on: d queenside, f kingside.
    pub fn rook_target(dir: CastlingDirection) -> BoardFile {
        match dir {
            CastlingDirection::EAST => BoardFile::d_,
            CastlingDirection::WEST => BoardFile::f_,
        }
    }

    pub fn king_landing(&self, color: ChessColor, dir: CastlingDirection) -> Square {
        Square::from_coords(Self::king_target(dir), BoardRank::home(color))
    }

    pub fn rook_landing(&self, color: ChessColor, dir: CastlingDirection) -> Square {
        Square::from_coords(Self::rook_target(dir), BoardRank::home(color))
    }

    /// Which side a castle toward the given rook is, by home file.
    pub fn direction_of(&self, rook_file: BoardFile) -> Option<CastlingDirection> {
        if rook_file == self.rook_files[CastlingDirection::EAST.ix()] {
            Some(CastlingDirection::EAST)
        } else if rook_file == self.rook_files[CastlingDirection::WEST.ix()] {
            Some(CastlingDirection::WEST)
        } else {
            None
        }
    }
}

/// Every file in the inclusive span between two files, ascending.
pub fn file_span(a: BoardFile, b: BoardFile) -> impl Iterator<Item = BoardFile> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (lo as u8..=hi as u8).map(BoardFile::from_u8)
}

/// Deal a random legal Chess960 back rank, in a-file order.
///
/// The constraints are the classic ones: the bishops land on opposite
/// shades and the king lands between the rooks. All 960 arrays are
/// reachable and equally likely.
pub fn shuffle960<R: Rng>(rng: &mut R) -> [ChessOfficer; 8] {
    use ChessOfficer::*;

    let mut rank: [Option<ChessOfficer>; 8] = [None; 8];

    let dark = [0, 2, 4, 6];
    let light = [1, 3, 5, 7];
    rank[dark[rng.random_range(0..4)]] = Some(BISHOP);
    rank[light[rng.random_range(0..4)]] = Some(BISHOP);

    for officer in [QUEEN, KNIGHT, KNIGHT] {
        let free: Vec<usize> = (0..8).filter(|f| rank[*f].is_none()).collect();
        rank[free[rng.random_range(0..free.len())]] = Some(officer);
    }

    // Rook, king, rook fill the last three files in that order, which
    // is exactly the king-between-rooks constraint.
    for officer in [ROOK, KING, ROOK] {
        let file = (0..8).find(|f| rank[*f].is_none()).unwrap();
        rank[file] = Some(officer);
    }

    rank.map(Option::unwrap)
}

#[test]
fn standard_homes() {
    let rules = CastlingRules::STANDARD;
    assert_eq!(rules.king_home(ChessColor::WHITE), Square::e1);
    assert_eq!(rules.king_home(ChessColor::BLACK), Square::e8);
    assert_eq!(
        rules.rook_home(ChessColor::WHITE, CastlingDirection::EAST),
        Square::a1
    );
    assert_eq!(
        rules.rook_home(ChessColor::BLACK, CastlingDirection::WEST),
        Square::h8
    );
    assert_eq!(
        rules.king_landing(ChessColor::WHITE, CastlingDirection::WEST),
        Square::g1
    );
    assert_eq!(
        rules.rook_landing(ChessColor::BLACK, CastlingDirection::EAST),
        Square::d8
    );
}

#[test]
fn shuffled_back_ranks_are_legal() {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    let mut rng = SmallRng::seed_from_u64(0xCA57);

    for _ in 0..100 {
        let back = shuffle960(&mut rng);

        let files = |officer| {
            (0..8)
                .filter(|f| back[*f as usize] == officer)
                .collect::<Vec<u8>>()
        };

        let rooks = files(ChessOfficer::ROOK);
        let king = files(ChessOfficer::KING)[0];
        assert!(rooks[0] < king && king < rooks[1]);

        let bishops = files(ChessOfficer::BISHOP);
        assert!(bishops[0] % 2 != bishops[1] % 2);

        let rules = CastlingRules::chess_960(back);
        assert_eq!(rules.king_file as u8, king);
        assert_eq!(rules.rook_files[0] as u8, rooks[0]);
        assert_eq!(rules.rook_files[1] as u8, rooks[1]);
    }
}
