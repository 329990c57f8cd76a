// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The command validator: given a parsed `Command` and a board, decide
//! whether the intent resolves to exactly one legal move.
//!
//! The command's descriptors are constraints, not coordinates. A start
//! descriptor narrows the candidate source squares, an end descriptor
//! narrows the candidate destinations, and the board's own legal move
//! lists do the rest: a (start, end) pair is a candidate only when the
//! board says a legal move connects them. Commands are accepted only
//! when exactly one candidate survives — "queen to d6" with two queens
//! that both reach d6 is rejected as ambiguous, and the caller can
//! inspect [`candidate_moves`] to tell ambiguity from impossibility.
use crate::board::BoardView;
use crate::command::{Action, Command, CommandInfo};
use crate::moves::Move;
use crate::types::{Color, PieceKind, Rank, Square, SQUARES};

/// True iff the command is acceptable in the given position: its
/// action is self-sufficient (resignation, a legal castle, a possible
/// promotion) or its descriptors resolve to exactly one legal move.
pub fn validate<B: BoardView>(command: &Command, board: &B) -> bool {
    match command.action {
        None => false,
        Some(Action::Resign) => true,
        Some(Action::ShortCastle) => board.kingside_castle().is_some(),
        Some(Action::LongCastle) => board.queenside_castle().is_some(),
        Some(Action::Promote) => can_promote(board),
        Some(Action::Move) | Some(Action::Capture) => candidate_moves(command, board).len() == 1,
    }
}

/// The legal moves matching a Move or Capture command's descriptors.
/// Empty for any other action. The length distinguishes the three
/// outcomes the session reports: no match, a unique move, ambiguity.
pub fn candidate_moves<B: BoardView>(command: &Command, board: &B) -> Vec<Move> {
    let action = match command.action {
        Some(action @ Action::Move) | Some(action @ Action::Capture) => action,
        _ => return Vec::new(),
    };

    let starts = resolve_starts(command.start, board);
    let ends = resolve_ends(command.end, board);

    let mut found = Vec::new();
    for &start in &starts {
        let legal = board.legal_moves_from(start);
        if legal.is_empty() {
            continue;
        }

        let mover = board
            .piece_at(start)
            .expect("candidate start square is occupied");
        for &end in &ends {
            if start == end {
                continue;
            }

            // A spoken capture must actually take something: either a
            // piece on the destination or the pawn bypassed en
            // passant. A spoken move is indifferent.
            if action == Action::Capture {
                let takes_piece = board
                    .piece_at(end)
                    .map_or(false, |p| p.color != mover.color);
                let takes_en_passant =
                    mover.kind == PieceKind::Pawn && Some(end) == board.en_passant_target();
                if !takes_piece && !takes_en_passant {
                    continue;
                }
            }

            if let Some(&mov) = legal.iter().find(|m| m.destination() == end) {
                found.push(mov);
            }
        }
    }

    found
}

/// Candidate source squares: absent means any square holding one of
/// the mover's pieces; otherwise the descriptor narrows it down.
fn resolve_starts<B: BoardView>(info: Option<CommandInfo>, board: &B) -> Vec<Square> {
    let mover = board.side_to_move();
    match info {
        None => board.occupied_squares(mover),
        Some(CommandInfo::Square(square)) => match board.piece_at(square) {
            Some(piece) if piece.color == mover => vec![square],
            _ => Vec::new(),
        },
        Some(CommandInfo::File(file)) => board
            .occupied_squares(mover)
            .into_iter()
            .filter(|sq| sq.file() == file)
            .collect(),
        Some(CommandInfo::Piece(kind)) => board.find_pieces(kind, mover),
    }
}

/// Candidate destination squares. A piece-kind descriptor names a
/// *target piece* of the opposing color ("takes knight"), not a
/// destination pattern.
fn resolve_ends<B: BoardView>(info: Option<CommandInfo>, board: &B) -> Vec<Square> {
    match info {
        None => SQUARES.to_vec(),
        Some(CommandInfo::Square(square)) => vec![square],
        Some(CommandInfo::File(file)) => SQUARES
            .iter()
            .cloned()
            .filter(|sq| sq.file() == file)
            .collect(),
        Some(CommandInfo::Piece(kind)) => {
            board.find_pieces(kind, board.side_to_move().toggle())
        }
    }
}

/// Whether the side to move has a legal move that promotes a pawn.
fn can_promote<B: BoardView>(board: &B) -> bool {
    let color = board.side_to_move();
    let last_rank = match color {
        Color::White => Rank::Eight,
        Color::Black => Rank::One,
    };

    board
        .find_pieces(PieceKind::Pawn, color)
        .into_iter()
        .any(|square| {
            board
                .legal_moves_from(square)
                .iter()
                .any(|m| m.destination().rank() == last_rank)
        })
}

/// The promoting moves currently available to the side to move. Used
/// by the session to resolve a bare "promote" command when it is
/// unambiguous.
pub(crate) fn promoting_moves<B: BoardView>(board: &B) -> Vec<Move> {
    let color = board.side_to_move();
    let last_rank = match color {
        Color::White => Rank::Eight,
        Color::Black => Rank::One,
    };

    let mut moves = Vec::new();
    for square in board.find_pieces(PieceKind::Pawn, color) {
        moves.extend(
            board
                .legal_moves_from(square)
                .into_iter()
                .filter(|m| m.destination().rank() == last_rank),
        );
    }

    moves
}
