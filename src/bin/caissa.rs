// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented driver for exercising the command pipeline without
//! a microphone: feed it the utterances the transcriber would have
//! sent, one per line, either as plain text or as the `{"text": ...}`
//! JSON envelope.

#[macro_use]
extern crate clap;

use std::io::{self, BufRead};
use std::process;

use caissa::{GameStatus, RejectReason, Reply, Session};
use clap::{App, Arg};

fn main() -> io::Result<()> {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("fen")
                .help("FEN string for the starting position")
                .value_name("FEN")
                .long("--fen")
                .takes_value(true),
        )
        .get_matches();

    let mut session = if let Some(fen) = matches.value_of("fen") {
        match Session::from_fen(fen) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("invalid fen: {:?}", err);
                process::exit(1);
            }
        }
    } else {
        Session::new()
    };

    println!("{}", session.board());
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = if trimmed.starts_with('{') {
            session.handle_json(trimmed)
        } else {
            session.handle_text(trimmed)
        };

        match reply {
            Reply::Accepted { mov, status } => {
                println!("{}", mov);
                println!("{}", session.board());
                match status {
                    GameStatus::Running => {}
                    GameStatus::Checkmate => {
                        println!("checkmate");
                        break;
                    }
                    GameStatus::Stalemate => {
                        println!("stalemate");
                        break;
                    }
                    GameStatus::Draw(reason) => {
                        println!("draw: {:?}", reason);
                        break;
                    }
                }
            }
            Reply::Resigned { color } => {
                println!("{} resigns", color);
                break;
            }
            Reply::Rejected { reason } => {
                let message = match reason {
                    RejectReason::ParseFailure => "didn't catch that",
                    RejectReason::NoMatchingMove => "no legal move matches",
                    RejectReason::AmbiguousMove => "more than one move matches",
                };
                println!("{}", message);
            }
        }
    }

    Ok(())
}
