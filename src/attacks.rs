// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed attack tables. King, knight, and pawn attacks are pure
//! table lookups; sliding attacks cast rays through an occupancy set,
//! cut off at the first blocker. The tables are built once on first
//! use.
use crate::squareset::SquareSet;
use crate::squareset::{
    SS_FILE_A, SS_FILE_AB, SS_FILE_GH, SS_FILE_H, SS_RANK_1, SS_RANK_12, SS_RANK_78, SS_RANK_8,
};
use crate::types::{Color, Direction, Square, TableIndex, COLORS, SQUARES};

struct KingTable {
    table: [SquareSet; 64],
}

impl KingTable {
    pub fn new() -> KingTable {
        let mut kt = KingTable {
            table: [SquareSet::none(); 64],
        };

        for &sq in SQUARES.iter() {
            let mut set = SquareSet::none();
            if !SS_RANK_8.test(sq) {
                set.set(sq.plus(8));
                if !SS_FILE_A.test(sq) {
                    set.set(sq.plus(7));
                }
                if !SS_FILE_H.test(sq) {
                    set.set(sq.plus(9));
                }
            }

            if !SS_RANK_1.test(sq) {
                set.set(sq.plus(-8));
                if !SS_FILE_A.test(sq) {
                    set.set(sq.plus(-9));
                }
                if !SS_FILE_H.test(sq) {
                    set.set(sq.plus(-7));
                }
            }

            if !SS_FILE_A.test(sq) {
                set.set(sq.plus(-1));
            }
            if !SS_FILE_H.test(sq) {
                set.set(sq.plus(1));
            }

            kt.table[sq.as_index()] = set;
        }

        kt
    }

    pub fn attacks(&self, sq: Square) -> SquareSet {
        self.table[sq.as_index()]
    }
}

struct PawnTable {
    table: [[SquareSet; 2]; 64],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[SquareSet::none(); 2]; 64],
        };

        for &sq in SQUARES.iter() {
            for &color in COLORS.iter() {
                let mut set = SquareSet::none();
                let (promo_rank, up_left, up_right) = match color {
                    Color::White => (SS_RANK_8, 7, 9),
                    Color::Black => (SS_RANK_1, -9, -7),
                };

                if promo_rank.test(sq) {
                    // Pawns never stand on their promotion rank; they
                    // would already have been promoted.
                    continue;
                }

                if !SS_FILE_A.test(sq) {
                    set.set(sq.plus(up_left));
                }
                if !SS_FILE_H.test(sq) {
                    set.set(sq.plus(up_right));
                }

                pt.table[sq.as_index()][color.as_index()] = set;
            }
        }

        pt
    }

    pub fn attacks(&self, sq: Square, color: Color) -> SquareSet {
        self.table[sq.as_index()][color.as_index()]
    }
}

struct KnightTable {
    table: [SquareSet; 64],
}

impl KnightTable {
    pub fn new() -> KnightTable {
        let mut kt = KnightTable {
            table: [SquareSet::none(); 64],
        };

        for &sq in SQUARES.iter() {
            let mut set = SquareSet::none();
            if !SS_FILE_A.test(sq) && !SS_RANK_78.test(sq) {
                set.set(sq.plus(15));
            }
            if !SS_FILE_H.test(sq) && !SS_RANK_78.test(sq) {
                set.set(sq.plus(17));
            }
            if !SS_FILE_GH.test(sq) && !SS_RANK_8.test(sq) {
                set.set(sq.plus(10));
            }
            if !SS_FILE_GH.test(sq) && !SS_RANK_1.test(sq) {
                set.set(sq.plus(-6));
            }
            if !SS_FILE_H.test(sq) && !SS_RANK_12.test(sq) {
                set.set(sq.plus(-15));
            }
            if !SS_FILE_A.test(sq) && !SS_RANK_12.test(sq) {
                set.set(sq.plus(-17));
            }
            if !SS_FILE_AB.test(sq) && !SS_RANK_1.test(sq) {
                set.set(sq.plus(-10));
            }
            if !SS_FILE_AB.test(sq) && !SS_RANK_8.test(sq) {
                set.set(sq.plus(6));
            }
            kt.table[sq.as_index()] = set;
        }
        kt
    }

    pub fn attacks(&self, sq: Square) -> SquareSet {
        self.table[sq.as_index()]
    }
}

struct RayTable {
    // Entry 64 is the empty ray, used as the target of a miss when a
    // ray scan runs off the board.
    table: [[SquareSet; 8]; 65],
}

impl RayTable {
    pub fn new() -> RayTable {
        let mut rt = RayTable {
            table: [[SquareSet::none(); 8]; 65],
        };

        for &sq in SQUARES.iter() {
            let mut populate_dir = |dir: Direction, edge: SquareSet| {
                let mut entry = SquareSet::none();
                if edge.test(sq) {
                    // No ray extends from this square in this direction.
                    rt.table[sq.as_index()][dir.as_index()] = entry;
                    return;
                }

                let mut cursor = sq;
                loop {
                    cursor = cursor.towards(dir);
                    entry.set(cursor);
                    if edge.test(cursor) {
                        break;
                    }
                }
                rt.table[sq.as_index()][dir.as_index()] = entry;
            };

            populate_dir(Direction::North, SS_RANK_8);
            populate_dir(Direction::NorthEast, SS_RANK_8.or(SS_FILE_H));
            populate_dir(Direction::East, SS_FILE_H);
            populate_dir(Direction::SouthEast, SS_RANK_1.or(SS_FILE_H));
            populate_dir(Direction::South, SS_RANK_1);
            populate_dir(Direction::SouthWest, SS_RANK_1.or(SS_FILE_A));
            populate_dir(Direction::West, SS_FILE_A);
            populate_dir(Direction::NorthWest, SS_RANK_8.or(SS_FILE_A));
        }
        rt
    }

    pub fn attacks(&self, sq: usize, dir: Direction) -> SquareSet {
        self.table[sq][dir.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: KingTable = KingTable::new();
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref KNIGHT_TABLE: KnightTable = KnightTable::new();
    static ref RAY_TABLE: RayTable = RayTable::new();
}

fn positive_ray_attacks(sq: Square, occupancy: SquareSet, dir: Direction) -> SquareSet {
    debug_assert!(dir.as_vector() > 0);
    let attacks = RAY_TABLE.attacks(sq.as_index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = blocker.trailing_zeros() as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

fn negative_ray_attacks(sq: Square, occupancy: SquareSet, dir: Direction) -> SquareSet {
    debug_assert!(dir.as_vector() < 0);
    let attacks = RAY_TABLE.attacks(sq.as_index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = (64 - blocker.leading_zeros()).checked_sub(1).unwrap_or(64) as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

fn diagonal_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    positive_ray_attacks(sq, occupancy, Direction::NorthWest)
        | negative_ray_attacks(sq, occupancy, Direction::SouthEast)
}

fn antidiagonal_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    positive_ray_attacks(sq, occupancy, Direction::NorthEast)
        | negative_ray_attacks(sq, occupancy, Direction::SouthWest)
}

fn file_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    positive_ray_attacks(sq, occupancy, Direction::North)
        | negative_ray_attacks(sq, occupancy, Direction::South)
}

fn rank_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    positive_ray_attacks(sq, occupancy, Direction::East)
        | negative_ray_attacks(sq, occupancy, Direction::West)
}

/// The squares a pawn of the given color attacks from the given
/// square. Attacks only; pushes are not attacks.
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    PAWN_TABLE.attacks(sq, color)
}

pub fn bishop_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    diagonal_attacks(sq, occupancy) | antidiagonal_attacks(sq, occupancy)
}

pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_TABLE.attacks(sq)
}

pub fn rook_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    file_attacks(sq, occupancy) | rank_attacks(sq, occupancy)
}

pub fn queen_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

pub fn king_attacks(sq: Square) -> SquareSet {
    KING_TABLE.attacks(sq)
}
