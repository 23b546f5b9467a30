//! `memorygame` - A card-pairs memory game
//!
//! This library provides the game model (boards, cards, flips and matches),
//! a single-screen session controller, text rendering, and the document
//! stores that hold downloadable custom boards.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod board;
pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod play;
pub mod render;
pub mod session;
pub mod store;

pub use board::BoardSize;
pub use card::{CardFace, Icon, MemoryCard};
pub use config::Config;
pub use error::{Error, Result};
pub use game::{FlipOutcome, MemoryGame};
pub use logging::init_logging;
pub use session::{FlipReport, GameSession};
pub use store::{CustomBoard, DocumentStore};
