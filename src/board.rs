// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The board engine: the mutable, queryable heart of the rules side.
//!
//! A `Board` owns a `Position` and the per-square legal-move cache.
//! Every query answers against the cache, which is rebuilt lazily on
//! the first query after a mutation; `execute_move` is the only
//! mutator and refuses moves that are not in the current legal set.
//!
//! The `BoardView` trait is the read-only slice of this surface that
//! the command validator consumes, so the validator can stay a free
//! function borrowing the board rather than a co-owner of it.
use std::cell::RefCell;
use std::fmt;

use crate::castling;
use crate::movegen;
use crate::moves::Move;
use crate::position::{FenParseError, Position};
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square, TableIndex, COLORS};

/// The game-ending states a position can be in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
}

/// Read-only board queries, as consumed by the command validator. The
/// engine's `Board` is the only implementor in this crate; the trait
/// exists so the validator borrows a capability instead of the
/// concrete engine.
pub trait BoardView {
    fn piece_at(&self, square: Square) -> Option<Piece>;
    fn side_to_move(&self) -> Color;
    fn en_passant_target(&self) -> Option<Square>;
    fn find_pieces(&self, kind: PieceKind, color: Color) -> Vec<Square>;
    fn occupied_squares(&self, color: Color) -> Vec<Square>;
    fn legal_moves_from(&self, square: Square) -> Vec<Move>;
    fn kingside_castle(&self) -> Option<Move>;
    fn queenside_castle(&self) -> Option<Move>;
}

/// Per-square legal move lists for the side to move. The cache's
/// presence doubles as the dirty flag: `None` means stale, and every
/// mutation resets it to `None`.
type MoveTable = Vec<Vec<Move>>;

#[derive(Debug)]
pub struct Board {
    pos: Position,
    cache: RefCell<Option<MoveTable>>,
}

impl Board {
    /// A board at the standard initial position.
    pub fn new() -> Board {
        Board::from_position(Position::from_start_position())
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Board, FenParseError> {
        Ok(Board::from_position(Position::from_fen(fen)?))
    }

    pub fn from_position(pos: Position) -> Board {
        Board {
            pos,
            cache: RefCell::new(None),
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.side_to_move()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pos.piece_at(square)
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.pos.castle_status()
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.pos.can_castle_kingside(color)
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.pos.can_castle_queenside(color)
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.pos.en_passant_target()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.pos.halfmove_clock()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.pos.fullmove_number()
    }

    pub fn find_pieces(&self, kind: PieceKind, color: Color) -> Vec<Square> {
        self.pos.pieces_of_kind(color, kind).iter().collect()
    }

    pub fn as_fen(&self) -> String {
        self.pos.as_fen()
    }

    /// The legal moves available from the given square: empty if the
    /// square is empty, holds an opposing piece, or its piece has no
    /// legal move.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        self.ensure_cache();
        let cache = self.cache.borrow();
        let table = cache.as_ref().expect("move cache populated by ensure_cache");
        table[square.as_index()].clone()
    }

    /// All legal moves for the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.ensure_cache();
        let cache = self.cache.borrow();
        let table = cache.as_ref().expect("move cache populated by ensure_cache");
        table.iter().flatten().cloned().collect()
    }

    /// The squares the piece on the given square can legally move to.
    pub fn target_squares_from(&self, square: Square) -> Vec<Square> {
        self.legal_moves_from(square)
            .iter()
            .map(|m| m.destination())
            .collect()
    }

    /// Whether the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        self.pos.is_check(self.pos.side_to_move())
    }

    /// The terminal state of the current position, if any.
    pub fn status(&self) -> GameStatus {
        if self.all_legal_moves().is_empty() {
            return if self.is_in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }

        if self.pos.halfmove_clock() >= 100 {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }

        if self.insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::Running
    }

    /// Executes a move. Returns false — leaving the board untouched —
    /// if the move is not legal in the current position or its piece
    /// and color disagree with what stands on the source square.
    pub fn execute_move(&mut self, mov: Move) -> bool {
        match self.pos.piece_at(mov.source()) {
            Some(piece) if piece == mov.piece() => {}
            _ => return false,
        }

        if !self.legal_moves_from(mov.source()).contains(&mov) {
            return false;
        }

        self.pos.apply_move(mov);
        self.cache.replace(None);
        true
    }

    fn ensure_cache(&self) {
        let mut cache = self.cache.borrow_mut();
        if cache.is_some() {
            return;
        }

        let mut table: MoveTable = vec![Vec::new(); 64];
        for square in self.pos.pieces(self.pos.side_to_move()) {
            table[square.as_index()] = self.compute_legal_moves_from(square);
        }

        *cache = Some(table);
    }

    fn compute_legal_moves_from(&self, square: Square) -> Vec<Move> {
        let mut moves: Vec<Move> = movegen::pseudo_moves_from(&self.pos, square)
            .into_iter()
            .filter(|&mov| self.leaves_king_safe(mov))
            .collect();

        // Castles are not pseudo-moves; the helper emits them directly
        // onto the king's list, already fully validated.
        let is_king = self
            .pos
            .piece_at(square)
            .map_or(false, |p| p.kind == PieceKind::King);
        if is_king {
            moves.extend(castling::kingside_castle_move(&self.pos));
            moves.extend(castling::queenside_castle_move(&self.pos));
        }

        moves
    }

    /// The legality filter: a pseudo-move survives if the mover's king
    /// is not attacked once it has been applied. Applied to a scratch
    /// copy; the board itself is untouched.
    fn leaves_king_safe(&self, mov: Move) -> bool {
        let mut scratch = self.pos.clone();
        let mover = scratch.side_to_move();
        scratch.apply_move(mov);
        !scratch.is_check(mover)
    }

    /// Neither side can force checkmate: bare kings, a lone minor
    /// piece, or same-colored lone bishops.
    fn insufficient_material(&self) -> bool {
        for &color in &COLORS {
            let heavy =
                self.pos.pawns(color) | self.pos.rooks(color) | self.pos.queens(color);
            if !heavy.empty() {
                return false;
            }
        }

        let minors = |color: Color| {
            (self.pos.knights(color).count() + self.pos.bishops(color).count()) as usize
        };

        match (minors(Color::White), minors(Color::Black)) {
            // King against king.
            (0, 0) => true,
            // King and one minor piece against a bare king.
            (1, 0) | (0, 1) => true,
            // One bishop each, standing on same-colored squares.
            (1, 1) => {
                let white = self.pos.bishops(Color::White).first();
                let black = self.pos.bishops(Color::Black).first();
                match (white, black) {
                    (Some(w), Some(b)) => square_parity(w) == square_parity(b),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

/// The color class of a square: squares whose file and rank indices
/// sum to an even number form one class, the rest the other.
fn square_parity(square: Square) -> u32 {
    let file = square.file().as_index() as u32;
    let rank = square.rank().as_index() as u32;
    (file + rank) & 1
}

impl BoardView for Board {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        Board::piece_at(self, square)
    }

    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }

    fn en_passant_target(&self) -> Option<Square> {
        Board::en_passant_target(self)
    }

    fn find_pieces(&self, kind: PieceKind, color: Color) -> Vec<Square> {
        Board::find_pieces(self, kind, color)
    }

    fn occupied_squares(&self, color: Color) -> Vec<Square> {
        self.pos.pieces(color).iter().collect()
    }

    fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        Board::legal_moves_from(self, square)
    }

    fn kingside_castle(&self) -> Option<Move> {
        castling::kingside_castle_move(&self.pos)
    }

    fn queenside_castle(&self) -> Option<Move> {
        castling::queenside_castle_move(&self.pos)
    }
}

impl Clone for Board {
    /// Cloning deep-copies the position and starts with a cold cache,
    /// so the clone shares nothing with the original.
    fn clone(&self) -> Board {
        Board::from_position(self.pos.clone())
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.pos.fmt(f)
    }
}
