// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The session layer: the seam between the transcriber and the rules
//! core. A `Session` owns a board and runs each utterance through the
//! whole pipeline — parse, validate, resolve, execute — replying with
//! what happened. The transcriber's wire format (a JSON `{"text":
//! ...}` envelope per recognized utterance) is accepted directly, but
//! plain strings work too; everything upstream of that is someone
//! else's problem.
use crate::board::{Board, BoardView, GameStatus};
use crate::command::{parse_command, Action, Command};
use crate::moves::Move;
use crate::position::FenParseError;
use crate::types::Color;
use crate::validator;

/// The transcriber's message envelope, one per recognized utterance.
#[derive(Clone, Debug, Deserialize)]
pub struct Transcript {
    pub text: String,
}

/// Why a command was not acted upon.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The utterance was empty or did not survive parsing.
    ParseFailure,
    /// The command parsed but matches no legal move.
    NoMatchingMove,
    /// The command parsed but matches more than one legal move.
    AmbiguousMove,
}

/// The session's answer to one utterance.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// A move was executed; `status` is the game state after it.
    Accepted { mov: Move, status: GameStatus },
    /// The given color resigned.
    Resigned { color: Color },
    Rejected { reason: RejectReason },
}

pub struct Session {
    board: Board,
}

impl Session {
    /// A session starting at the standard initial position.
    pub fn new() -> Session {
        Session {
            board: Board::new(),
        }
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Session, FenParseError> {
        Ok(Session {
            board: Board::from_fen(fen)?,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Handles one raw JSON envelope from the transcriber.
    pub fn handle_json(&mut self, raw: &str) -> Reply {
        let transcript: Transcript = match serde_json::from_str(raw) {
            Ok(t) => t,
            Err(err) => {
                warn!("undecodable transcript envelope: {}", err);
                return Reply::Rejected {
                    reason: RejectReason::ParseFailure,
                };
            }
        };

        self.handle_text(&transcript.text)
    }

    /// Handles one transcribed utterance.
    pub fn handle_text(&mut self, text: &str) -> Reply {
        let command = match parse_command(text) {
            Ok(command) => command,
            Err(err) => {
                warn!("unparseable utterance {:?}: {:?}", text, err);
                return Reply::Rejected {
                    reason: RejectReason::ParseFailure,
                };
            }
        };

        debug!("utterance {:?} parsed as {}", text, command);
        self.dispatch(command)
    }

    fn dispatch(&mut self, command: Command) -> Reply {
        match command.action {
            None => Reply::Rejected {
                reason: RejectReason::ParseFailure,
            },
            Some(Action::Resign) => {
                let color = self.board.side_to_move();
                info!("{:?} resigns", color);
                Reply::Resigned { color }
            }
            Some(Action::ShortCastle) => match self.board.kingside_castle() {
                Some(mov) => self.apply(mov),
                None => self.reject(RejectReason::NoMatchingMove),
            },
            Some(Action::LongCastle) => match self.board.queenside_castle() {
                Some(mov) => self.apply(mov),
                None => self.reject(RejectReason::NoMatchingMove),
            },
            Some(Action::Promote) => {
                let moves = validator::promoting_moves(&self.board);
                match moves.as_slice() {
                    [] => self.reject(RejectReason::NoMatchingMove),
                    [mov] => self.apply(*mov),
                    _ => self.reject(RejectReason::AmbiguousMove),
                }
            }
            Some(Action::Move) | Some(Action::Capture) => {
                let candidates = validator::candidate_moves(&command, &self.board);
                match candidates.as_slice() {
                    [] => self.reject(RejectReason::NoMatchingMove),
                    [mov] => self.apply(*mov),
                    _ => {
                        debug!(
                            "command {} is ambiguous between {} moves",
                            command,
                            candidates.len()
                        );
                        self.reject(RejectReason::AmbiguousMove)
                    }
                }
            }
        }
    }

    fn apply(&mut self, mov: Move) -> Reply {
        if !self.board.execute_move(mov) {
            // Candidates come from the board's own legal move lists,
            // so this indicates a bug in the resolution path.
            warn!("resolved move {} was refused by the board", mov);
            return self.reject(RejectReason::NoMatchingMove);
        }

        let status = self.board.status();
        info!("executed {}; game is {:?}", mov, status);
        Reply::Accepted { mov, status }
    }

    fn reject(&self, reason: RejectReason) -> Reply {
        debug!("command rejected: {:?}", reason);
        Reply::Rejected { reason }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}
