// Copyright 2019-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The command parser: transcription text in, structured intent out.
//!
//! Speech transcription is noisy. Ranks arrive as spoken words
//! ("three"), square names arrive split across words ("f 3") or glued
//! to a file ("bd3"), and "knight" is routinely heard as "night". The
//! parser normalizes all of that and then assembles a `Command`: an
//! optional start descriptor, an action, and an optional end
//! descriptor, each as under-specified as the utterance itself. The
//! validator is what decides whether the intent pins down exactly one
//! legal move.
use std::convert::TryFrom;
use std::fmt;

use crate::types::{File, PieceKind, Square};

/// What the speaker wants to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move,
    Capture,
    Resign,
    Promote,
    ShortCastle,
    LongCastle,
}

/// One descriptor inside a command: a piece kind ("knight"), a file
/// ("the b pawn"), or a full square ("d3").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandInfo {
    Piece(PieceKind),
    File(File),
    Square(Square),
}

/// A parsed intent. Any of the three parts may be absent; the
/// validator decides whether what remains identifies a unique legal
/// move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub start: Option<CommandInfo>,
    pub action: Option<Action>,
    pub end: Option<CommandInfo>,
}

impl Command {
    fn with_action(action: Action) -> Command {
        Command {
            start: None,
            action: Some(action),
            end: None,
        }
    }
}

impl Default for Command {
    /// The benign do-nothing command: an unadorned Move with no
    /// descriptors, which no validator will ever accept.
    fn default() -> Command {
        Command::with_action(Action::Move)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} --{:?}--> {:?}",
            self.start, self.action, self.end
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    EmptyUtterance,
}

/// One classified word of the utterance. Words that classify as
/// nothing are transcription noise and are dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Token {
    Piece(PieceKind),
    Act(Action),
    Square(Square),
    File(File),
}

/// Parses a transcribed utterance into a `Command`. Only an empty (or
/// all-whitespace) utterance fails; anything else produces a command,
/// however under-specified. Callers that prefer a command over an
/// error can use [`parse_command_lossy`].
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let text = preprocess(input);
    if text.is_empty() {
        return Err(ParseError::EmptyUtterance);
    }

    // Castling, resignation, and promotion are whole-utterance
    // commands, matched before any tokenization.
    if text.contains("castl") {
        let long = ["long", "queenside", "queen side", "queen-side"]
            .iter()
            .any(|needle| text.contains(needle));
        let action = if long {
            Action::LongCastle
        } else {
            Action::ShortCastle
        };
        return Ok(Command::with_action(action));
    }

    match text.as_str() {
        "resign" | "i resign" => return Ok(Command::with_action(Action::Resign)),
        "promote" | "pawn promote" | "promote pawn" => {
            return Ok(Command::with_action(Action::Promote))
        }
        _ => {}
    }

    Ok(assemble(&tokenize(&text)))
}

/// Like [`parse_command`], but an unparseable utterance degrades to
/// the benign default command instead of an error.
pub fn parse_command_lossy(input: &str) -> Command {
    parse_command(input).unwrap_or_default()
}

/// Normalizes an utterance: lowercases and trims it, rewrites spoken
/// digits ("three" -> "3"), and merges separated file/rank words into
/// square words ("f 3" -> "f3", "ad 5" -> "ad5").
fn preprocess(input: &str) -> String {
    let words: Vec<String> = input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(|word| match spoken_digit(word) {
            Some(digit) => digit.to_string(),
            None => word.to_owned(),
        })
        .collect();

    let mut merged: Vec<String> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if i + 1 < words.len() && is_file_run(&words[i]) && is_rank_word(&words[i + 1]) {
            merged.push(format!("{}{}", words[i], words[i + 1]));
            i += 2;
        } else {
            merged.push(words[i].clone());
            i += 1;
        }
    }

    merged.join(" ")
}

fn spoken_digit(word: &str) -> Option<char> {
    let digit = match word {
        "one" => '1',
        "two" => '2',
        "three" => '3',
        "four" => '4',
        "five" => '5',
        "six" => '6',
        "seven" => '7',
        "eight" => '8',
        _ => return None,
    };
    Some(digit)
}

/// One or two file letters: the head of a splittable square name.
fn is_file_run(word: &str) -> bool {
    (word.len() == 1 || word.len() == 2) && word.chars().all(|c| ('a'..='h').contains(&c))
}

fn is_rank_word(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some('1'..='8'), None) => true,
        _ => false,
    }
}

/// Classifies each word of the preprocessed utterance. Rules apply in
/// order; the first match wins, and unmatched words are discarded.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        if let Some(kind) = piece_word(word) {
            tokens.push(Token::Piece(kind));
            continue;
        }

        match word {
            "takes" | "captures" | "capture" | "x" => {
                tokens.push(Token::Act(Action::Capture));
                continue;
            }
            "to" | "moves" | "move" => {
                tokens.push(Token::Act(Action::Move));
                continue;
            }
            _ => {}
        }

        let chars: Vec<char> = word.chars().collect();
        match chars.len() {
            2 => {
                if let Some(square) = square_of(chars[0], chars[1]) {
                    tokens.push(Token::Square(square));
                }
            }
            1 => {
                if let Ok(file) = File::try_from(chars[0]) {
                    tokens.push(Token::File(file));
                }
            }
            // A file glued onto a square name, like "bd3": the b-file
            // piece to d3. Expands to two tokens.
            3 => {
                if let (Ok(file), Some(square)) =
                    (File::try_from(chars[0]), square_of(chars[1], chars[2]))
                {
                    tokens.push(Token::File(file));
                    tokens.push(Token::Square(square));
                }
            }
            _ => {}
        }
    }

    tokens
}

fn piece_word(word: &str) -> Option<PieceKind> {
    let kind = match word {
        "king" => PieceKind::King,
        "queen" => PieceKind::Queen,
        "rook" => PieceKind::Rook,
        "bishop" => PieceKind::Bishop,
        // "night" is the transcriber's favorite rendition of "knight".
        "knight" | "night" => PieceKind::Knight,
        "pawn" => PieceKind::Pawn,
        _ => return None,
    };
    Some(kind)
}

fn square_of(file: char, rank: char) -> Option<Square> {
    use std::convert::TryInto;

    let file: File = file.try_into().ok()?;
    let rank = rank.try_into().ok()?;
    Some(Square::of(rank, file))
}

/// Builds a command from the token stream. An explicit action token
/// splits the stream into start and end halves; without one the shape
/// of the stream decides, defaulting to an implicit Move.
fn assemble(tokens: &[Token]) -> Command {
    if let Some(idx) = tokens.iter().position(|t| matches!(t, Token::Act(_))) {
        let action = match tokens[idx] {
            Token::Act(action) => action,
            _ => unreachable!(),
        };
        return Command {
            start: extract_info(&tokens[..idx]),
            action: Some(action),
            end: extract_info(&tokens[idx + 1..]),
        };
    }

    match *tokens {
        [Token::Square(square)] => Command {
            start: None,
            action: Some(Action::Move),
            end: Some(CommandInfo::Square(square)),
        },
        [Token::File(file), Token::Square(square)] => Command {
            start: Some(CommandInfo::File(file)),
            action: Some(Action::Move),
            end: Some(CommandInfo::Square(square)),
        },
        [Token::Piece(kind), Token::Square(square)] => Command {
            start: Some(CommandInfo::Piece(kind)),
            action: Some(Action::Move),
            end: Some(CommandInfo::Square(square)),
        },
        [Token::Square(start), Token::Square(end)] => Command {
            start: Some(CommandInfo::Square(start)),
            action: Some(Action::Move),
            end: Some(CommandInfo::Square(end)),
        },
        [] => Command::default(),
        _ => {
            let (head, tail) = tokens.split_at(tokens.len() - 1);
            Command {
                start: extract_info(head),
                action: Some(Action::Move),
                end: extract_info(tail),
            }
        }
    }
}

/// Condenses a token group into at most one descriptor, preferring a
/// piece over a square over a file.
fn extract_info(tokens: &[Token]) -> Option<CommandInfo> {
    let mut square = None;
    let mut file = None;
    for token in tokens {
        match *token {
            Token::Piece(kind) => return Some(CommandInfo::Piece(kind)),
            Token::Square(sq) => square = square.or(Some(sq)),
            Token::File(f) => file = file.or(Some(f)),
            Token::Act(_) => {}
        }
    }

    square
        .map(CommandInfo::Square)
        .or_else(|| file.map(CommandInfo::File))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, PieceKind, Square};

    fn parsed(input: &str) -> Command {
        parse_command(input).unwrap()
    }

    #[test]
    fn empty_fails() {
        assert_eq!(Err(ParseError::EmptyUtterance), parse_command(""));
        assert_eq!(Err(ParseError::EmptyUtterance), parse_command("   "));
        assert_eq!(Command::default(), parse_command_lossy(""));
    }

    #[test]
    fn noise_degrades_to_default() {
        let cmd = parsed("please do something");
        assert_eq!(Command::default(), cmd);
    }

    #[test]
    fn castle_variants() {
        for input in &["castle", "castles", "castling", "i want to castle"] {
            let cmd = parsed(input);
            assert_eq!(Some(Action::ShortCastle), cmd.action, "input {:?}", input);
        }

        for input in &[
            "castle long",
            "long castle",
            "castle queenside",
            "queen side castle",
            "queen-side castles",
        ] {
            let cmd = parsed(input);
            assert_eq!(Some(Action::LongCastle), cmd.action, "input {:?}", input);
        }
    }

    #[test]
    fn resign_exact_match_only() {
        assert_eq!(Some(Action::Resign), parsed("resign").action);
        assert_eq!(Some(Action::Resign), parsed("I resign").action);

        // "resign" buried in a longer utterance is not a resignation.
        assert_ne!(Some(Action::Resign), parsed("maybe resign later").action);
    }

    #[test]
    fn promote_noun_forms() {
        assert_eq!(Some(Action::Promote), parsed("promote").action);
        assert_eq!(Some(Action::Promote), parsed("pawn promote").action);
        assert_eq!(Some(Action::Promote), parsed("promote pawn").action);
    }

    #[test]
    fn bare_square_is_destination() {
        let cmd = parsed("e4");
        assert_eq!(None, cmd.start);
        assert_eq!(Some(Action::Move), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::E4)), cmd.end);
    }

    #[test]
    fn glued_file_square() {
        let cmd = parsed("bd3");
        assert_eq!(Some(CommandInfo::File(File::B)), cmd.start);
        assert_eq!(Some(Action::Move), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::D3)), cmd.end);
    }

    #[test]
    fn spoken_rank_merge() {
        // "knight f three" -> "knight f3"
        let cmd = parsed("knight f three");
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Knight)), cmd.start);
        assert_eq!(Some(Action::Move), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::F3)), cmd.end);
    }

    #[test]
    fn split_double_file_merge() {
        // "ad 5" -> "ad5" -> file a, square d5
        let cmd = parsed("ad 5");
        assert_eq!(Some(CommandInfo::File(File::A)), cmd.start);
        assert_eq!(Some(CommandInfo::Square(Square::D5)), cmd.end);
    }

    #[test]
    fn night_is_knight() {
        let cmd = parsed("night to f3");
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Knight)), cmd.start);
        assert_eq!(Some(Action::Move), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::F3)), cmd.end);
    }

    #[test]
    fn explicit_capture_splits_stream() {
        let cmd = parsed("knight takes d5");
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Knight)), cmd.start);
        assert_eq!(Some(Action::Capture), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::D5)), cmd.end);
    }

    #[test]
    fn x_is_a_capture_keyword() {
        let cmd = parsed("e4 x d5");
        assert_eq!(Some(CommandInfo::Square(Square::E4)), cmd.start);
        assert_eq!(Some(Action::Capture), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::D5)), cmd.end);
    }

    #[test]
    fn pawn_takes_piece() {
        let cmd = parsed("pawn takes queen");
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Pawn)), cmd.start);
        assert_eq!(Some(Action::Capture), cmd.action);
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Queen)), cmd.end);
    }

    #[test]
    fn square_to_square() {
        let cmd = parsed("e2 e4");
        assert_eq!(Some(CommandInfo::Square(Square::E2)), cmd.start);
        assert_eq!(Some(Action::Move), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::E4)), cmd.end);
    }

    #[test]
    fn noise_words_are_dropped() {
        let cmd = parsed("um the knight goes to f3 please");
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Knight)), cmd.start);
        assert_eq!(Some(Action::Move), cmd.action);
        assert_eq!(Some(CommandInfo::Square(Square::F3)), cmd.end);
    }

    #[test]
    fn extraction_priority_piece_over_square_over_file() {
        // Start group contains a file and a piece; the piece wins.
        let cmd = parsed("b knight to f3");
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Knight)), cmd.start);

        // Fallback shape: everything before the last token condenses.
        let cmd = parsed("e2 b e4");
        assert_eq!(Some(CommandInfo::Square(Square::E2)), cmd.start);
        assert_eq!(Some(CommandInfo::Square(Square::E4)), cmd.end);
    }

    #[test]
    fn uppercase_and_whitespace_tolerated() {
        let cmd = parsed("  KNIGHT   F THREE ");
        assert_eq!(Some(CommandInfo::Piece(PieceKind::Knight)), cmd.start);
        assert_eq!(Some(CommandInfo::Square(Square::F3)), cmd.end);
    }
}
