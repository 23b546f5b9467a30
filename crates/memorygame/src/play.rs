//! Interactive, line-oriented play loop.
//!
//! Reads one command per line and redraws the board after every change.
//! Works over any reader/writer so the whole loop can be driven from tests.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::board::BoardSize;
use crate::error::Result;
use crate::game::FlipOutcome;
use crate::render::render_session;
use crate::session::{GameSession, QUIT_PROMPT, WIN_MESSAGE};
use crate::store::{download_board, DocumentStore};

/// Help text listing the play commands.
pub const HELP: &str = "\
Commands:
  <n> | flip <n>        flip the card at position n
  new                   restart the current board
  difficulty <level>    switch to easy, medium or hard
  download <name>       play a custom board
  help                  show this help
  quit                  leave the game";

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Flip the card at this 1-based position.
    Flip(usize),
    /// Restart the current board.
    New,
    /// Switch difficulty.
    Difficulty(BoardSize),
    /// Download and play a custom board.
    Download(String),
    /// Show the help text.
    Help,
    /// Leave the loop.
    Quit,
}

/// Parse a line of player input.
///
/// # Errors
///
/// Returns a message for the player if the line is not a command.
pub fn parse_command(line: &str) -> std::result::Result<Action, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let parse_position = |text: &str| match text.parse::<usize>() {
        Ok(0) => Err("positions start at 1".to_string()),
        Ok(n) => Ok(Action::Flip(n)),
        Err(_) => Err(format!("'{text}' is not a card position")),
    };

    match word.to_ascii_lowercase().as_str() {
        "flip" | "f" if !rest.is_empty() => parse_position(rest),
        "new" | "n" | "refresh" if rest.is_empty() => Ok(Action::New),
        "difficulty" | "d" if !rest.is_empty() => rest
            .parse::<BoardSize>()
            .map(Action::Difficulty)
            .map_err(|e| e.to_string()),
        "download" | "dl" if !rest.is_empty() => Ok(Action::Download(rest.to_string())),
        "help" | "h" | "?" => Ok(Action::Help),
        "quit" | "q" | "exit" => Ok(Action::Quit),
        _ if rest.is_empty() && word.chars().all(|c| c.is_ascii_digit()) && !word.is_empty() => {
            parse_position(word)
        }
        _ => Err(format!("unknown command '{line}' (type 'help')")),
    }
}

/// Settings for the play loop that do not belong to the game itself.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Collection holding custom boards.
    pub collection: String,
    /// Use ANSI colours.
    pub color: bool,
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    Ok(read_line(input)?.is_some_and(|answer| {
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }))
}

fn draw<W: Write>(output: &mut W, session: &GameSession, color: bool) -> Result<()> {
    writeln!(output)?;
    write!(output, "{}", render_session(session, color))?;
    Ok(())
}

/// Run the play loop until the player quits or input ends.
///
/// Rejected moves and failed downloads are reported to the player and the
/// loop carries on.
///
/// Reads from `input` block the calling thread, so drive this on a
/// current-thread runtime (as `memgame` does) or off the async workers.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    store: &dyn DocumentStore,
    options: &PlayOptions,
    mut input: R,
    mut output: W,
) -> Result<()> {
    draw(&mut output, session, options.color)?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        debug!("Play command: {:?}", command);

        match command {
            Action::Quit => break,
            Action::Help => writeln!(output, "{HELP}")?,
            Action::Flip(position) => match session.flip(position - 1) {
                Ok(report) => {
                    draw(&mut output, session, options.color)?;
                    if report.outcome == FlipOutcome::Match {
                        writeln!(output, "Found a match!")?;
                    }
                    if report.won {
                        writeln!(output, "{WIN_MESSAGE}")?;
                    }
                }
                Err(e) if e.is_rejected_move() => writeln!(output, "{e}")?,
                Err(e) => return Err(e),
            },
            Action::New => {
                if session.needs_quit_confirmation()
                    && !confirm(&mut input, &mut output, QUIT_PROMPT)?
                {
                    continue;
                }
                session.setup_board()?;
                draw(&mut output, session, options.color)?;
            }
            Action::Difficulty(board_size) => {
                session.choose_difficulty(board_size)?;
                draw(&mut output, session, options.color)?;
            }
            Action::Download(name) => {
                let loaded = download_board(store, &options.collection, &name)
                    .await
                    .and_then(|board| session.apply_custom_board(board));
                match loaded {
                    Ok(()) => {
                        draw(&mut output, session, options.color)?;
                        writeln!(output, "You are now playing {}", session.title())?;
                    }
                    Err(e) => {
                        warn!("Exception when retrieving game '{}': {}", name, e);
                        writeln!(output, "{e}")?;
                    }
                }
            }
        }
    }

    writeln!(output)?;
    Ok(())
}
