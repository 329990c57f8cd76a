// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! caissa is the rules and command core of a voice-driven chess
//! application. It turns free-form transcribed utterances ("knight f
//! three", "bd3", "castle long") into structured, partially-specified
//! intents, resolves those intents against a full chess rules engine,
//! and executes the single legal move they describe.
//!
//! The crate has two halves:
//!
//! * The **rules engine** (`Board`, `Position`, and friends) maintains
//!   a position, generates fully legal moves — castling, en passant,
//!   pins, and self-check avoidance included — and detects terminal
//!   states (checkmate, stalemate, fifty-move and insufficient-material
//!   draws).
//! * The **command pipeline** (`parse_command`, `validate`, `Session`)
//!   parses noisy transcription text into a `Command` and accepts it
//!   only when it resolves to exactly one legal move in the current
//!   position.
//!
//! Speech recognition, board rendering, and application bootstrap are
//! all upstream or downstream of this crate; the only inbound surface
//! is a string of text (optionally wrapped in the transcriber's
//! `{"text": ...}` envelope).

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate serde_derive;

mod attacks;
mod board;
mod castling;
mod command;
mod movegen;
mod moves;
mod position;
mod session;
mod squareset;
mod types;
mod validator;

pub use crate::board::{Board, BoardView, DrawReason, GameStatus};
pub use crate::command::{
    parse_command, parse_command_lossy, Action, Command, CommandInfo, ParseError,
};
pub use crate::moves::Move;
pub use crate::position::{FenParseError, Position};
pub use crate::session::{RejectReason, Reply, Session, Transcript};
pub use crate::squareset::{SquareSet, SquareSetIterator};
pub use crate::types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
pub use crate::validator::{candidate_moves, validate};
