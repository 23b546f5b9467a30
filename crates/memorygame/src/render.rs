//! Text rendering of the board and the status lines.

use std::fmt::Write as _;

use crate::card::MemoryCard;
use crate::game::MemoryGame;
use crate::session::GameSession;

/// Width of one grid cell, in characters.
const CELL_WIDTH: usize = 11;

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pairs counter colour before any pair is found.
pub const PROGRESS_NONE: Rgb = Rgb::new(0xC6, 0x28, 0x28);

/// Pairs counter colour once every pair is found.
pub const PROGRESS_FULL: Rgb = Rgb::new(0x43, 0xA0, 0x47);

/// Blend linearly from `from` (at 0.0) to `to` (at 1.0).
///
/// `fraction` is clamped to `[0, 1]`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless
)]
pub fn interpolate_color(fraction: f32, from: Rgb, to: Rgb) -> Rgb {
    let t = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let channel = |a: u8, b: u8| -> u8 {
        let value = a as f32 + (b as f32 - a as f32) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(from.r, to.r), channel(from.g, to.g), channel(from.b, to.b))
}

/// Decide whether to emit ANSI colour.
///
/// Colour needs both the setting on and the output going to a terminal, so
/// redirected output stays plain text.
#[must_use]
pub fn color_enabled(configured: bool, is_terminal: bool) -> bool {
    configured && is_terminal
}

fn paint(text: &str, color: Rgb) -> String {
    format!(
        "\x1b[38;2;{};{};{}m{text}\x1b[0m",
        color.r, color.g, color.b
    )
}

fn dim(text: &str) -> String {
    format!("\x1b[2m{text}\x1b[0m")
}

fn cell(position: usize, card: &MemoryCard, color: bool) -> String {
    if !card.is_face_up {
        return format!("{:^CELL_WIDTH$}", format!("[{:>2}]", position + 1));
    }
    let label = card.face.label();
    if card.is_matched {
        let text = format!("{:^CELL_WIDTH$}", format!("({label})"));
        if color {
            dim(&text)
        } else {
            text
        }
    } else {
        format!("{label:^CELL_WIDTH$}")
    }
}

/// Draw the grid, one board row per line.
///
/// Face-down cards show their 1-based position, face-up cards their label,
/// and matched cards their label in parentheses (dimmed when `color` is on).
#[must_use]
pub fn render_board(game: &MemoryGame, color: bool) -> String {
    let width = game.board_size().width();
    let mut out = String::new();
    for (row, cards) in game.cards().chunks(width).enumerate() {
        let line: Vec<String> = cards
            .iter()
            .enumerate()
            .map(|(col, card)| cell(row * width + col, card, color))
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out
}

/// Draw the title, counters and grid.
#[must_use]
pub fn render_session(session: &GameSession, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", session.title());

    let pairs = session.pairs_label();
    let pairs = if color {
        let tint = interpolate_color(session.game().progress(), PROGRESS_NONE, PROGRESS_FULL);
        paint(&pairs, tint)
    } else {
        pairs
    };
    let counter = if session.game().num_moves() == 0 {
        session.board_label()
    } else {
        session.moves_label()
    };
    let _ = writeln!(out, "{counter}    {pairs}");
    out.push('\n');
    out.push_str(&render_board(session.game(), color));
    out
}
