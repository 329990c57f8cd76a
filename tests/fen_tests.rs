// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;

use caissa::{Color, FenParseError, Piece, PieceKind, Position, Square};

#[test]
fn fen_smoke() {
    let pos = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();

    // white's turn to move.
    assert_eq!(Color::White, pos.side_to_move());

    // no castling.
    assert!(!pos.can_castle_kingside(Color::White));
    assert!(!pos.can_castle_kingside(Color::Black));
    assert!(!pos.can_castle_queenside(Color::White));
    assert!(!pos.can_castle_queenside(Color::Black));

    // no en passant.
    assert!(pos.en_passant_target().is_none());

    // the clocks are at their initial values.
    assert_eq!(0, pos.halfmove_clock());
    assert_eq!(1, pos.fullmove_number());
}

#[test]
fn starting_position() {
    let pos = Position::from_start_position();

    let check_square = |name: &'static str, piece: Piece| {
        let square = Square::try_from(name).unwrap();
        let piece_on_square = pos.piece_at(square).unwrap();
        assert_eq!(piece.kind, piece_on_square.kind);
        assert_eq!(piece.color, piece_on_square.color);
    };

    check_square("a1", Piece::new(PieceKind::Rook, Color::White));
    check_square("b1", Piece::new(PieceKind::Knight, Color::White));
    check_square("c1", Piece::new(PieceKind::Bishop, Color::White));
    check_square("d1", Piece::new(PieceKind::Queen, Color::White));
    check_square("e1", Piece::new(PieceKind::King, Color::White));
    check_square("f1", Piece::new(PieceKind::Bishop, Color::White));
    check_square("g1", Piece::new(PieceKind::Knight, Color::White));
    check_square("h1", Piece::new(PieceKind::Rook, Color::White));
    check_square("e2", Piece::new(PieceKind::Pawn, Color::White));
    check_square("a8", Piece::new(PieceKind::Rook, Color::Black));
    check_square("b8", Piece::new(PieceKind::Knight, Color::Black));
    check_square("d8", Piece::new(PieceKind::Queen, Color::Black));
    check_square("e8", Piece::new(PieceKind::King, Color::Black));
    check_square("e7", Piece::new(PieceKind::Pawn, Color::Black));

    // the middle of the board is empty.
    for rank in 3..=6 {
        for file in b'a'..=b'h' {
            let name = format!("{}{}", file as char, rank);
            let square = Square::try_from(name.as_str()).unwrap();
            assert!(pos.piece_at(square).is_none());
        }
    }

    assert!(pos.can_castle_kingside(Color::White));
    assert!(pos.can_castle_kingside(Color::Black));
    assert!(pos.can_castle_queenside(Color::White));
    assert!(pos.can_castle_queenside(Color::Black));
}

#[test]
fn empty() {
    let err = Position::from_fen("").unwrap_err();
    assert_eq!(FenParseError::UnexpectedEnd, err);
}

#[test]
fn unknown_piece() {
    let err = Position::from_fen("z7/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
    assert_eq!(FenParseError::UnknownPiece, err);
}

#[test]
fn invalid_digit() {
    let err = Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
    assert_eq!(FenParseError::InvalidDigit, err);
}

#[test]
fn not_sum_to_8() {
    let err = Position::from_fen("pppp5/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
    assert_eq!(FenParseError::FileDoesNotSumToEight, err);
}

#[test]
fn bad_side_to_move() {
    let err = Position::from_fen("8/8/8/8/8/8/8/8 c - - 0 1").unwrap_err();
    assert_eq!(FenParseError::InvalidSideToMove, err);
}

#[test]
fn bad_castle_status() {
    let err = Position::from_fen("8/8/8/8/8/8/8/8 w a - 0 1").unwrap_err();
    assert_eq!(FenParseError::InvalidCastle, err);
}

#[test]
fn bad_en_passant() {
    let err = Position::from_fen("8/8/8/8/8/8/8/8 w - 88 0 1").unwrap_err();
    assert_eq!(FenParseError::InvalidEnPassant, err);
}

#[test]
fn garbage_halfmove() {
    let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - q 1").unwrap_err();
    assert_eq!(FenParseError::EmptyHalfmove, err);
}

#[test]
fn halfmove_overflow() {
    let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 4294967296 1").unwrap_err();
    assert_eq!(FenParseError::InvalidHalfmove, err);
}

#[test]
fn garbage_fullmove() {
    let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 q").unwrap_err();
    assert_eq!(FenParseError::EmptyFullmove, err);
}

#[test]
fn missing_clocks_are_defaulted() {
    // Stored positions sometimes drop the clock fields; the parser
    // fills in 0 and 1.
    let pos = Position::from_fen("8/8/8/8/8/8/8/8 w - -").unwrap();
    assert_eq!(0, pos.halfmove_clock());
    assert_eq!(1, pos.fullmove_number());

    let pos = Position::from_fen("8/8/8/8/8/8/8/8 b - - 42").unwrap();
    assert_eq!(42, pos.halfmove_clock());
    assert_eq!(1, pos.fullmove_number());
}

#[test]
fn en_passant_field_parsed() {
    let pos = Position::from_fen("8/8/8/3Pp3/8/8/8/8 w - e6 0 1").unwrap();
    assert_eq!(Some(Square::E6), pos.en_passant_target());
}

#[test]
fn inconsistent_castle_rights_are_dropped() {
    // The field claims KQkq but no king or rook is home.
    let pos = Position::from_fen("8/8/8/8/8/8/8/8 w KQkq - 0 1").unwrap();
    assert!(!pos.can_castle_kingside(Color::White));
    assert!(!pos.can_castle_queenside(Color::White));
    assert!(!pos.can_castle_kingside(Color::Black));
    assert!(!pos.can_castle_queenside(Color::Black));
}

fn fen_roundtrip(fen: &'static str) {
    let pos = Position::from_fen(fen).unwrap();
    assert_eq!(fen, pos.as_fen());
}

#[test]
fn starting_position_roundtrip() {
    fen_roundtrip("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
}

#[test]
fn empty_roundtrip() {
    fen_roundtrip("8/8/8/8/8/8/8/8 w - - 0 1");
}

#[test]
fn open_game_roundtrip() {
    fen_roundtrip("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2");
}

#[test]
fn normalized_emission_of_missing_clocks() {
    // Parsed without clocks, emitted with them.
    let pos = Position::from_fen("8/8/8/8/8/8/8/8 w - -").unwrap();
    assert_eq!("8/8/8/8/8/8/8/8 w - - 0 1", pos.as_fen());
}
