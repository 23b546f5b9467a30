//! Error types for memorygame.
//!
//! This module defines all error types used throughout the memorygame crate,
//! providing detailed context for debugging and messages that can be shown
//! directly to the player.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for memorygame operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Game Errors ===
    /// The game has already been won; no more flips are accepted.
    #[error("You already won")]
    GameAlreadyWon,

    /// The selected card is already face up (or already matched).
    #[error("Invalid move")]
    CardAlreadyFaceUp {
        /// Zero-based board position of the card.
        position: usize,
    },

    /// The position does not exist on the current board.
    #[error("position {position} is off the board (board has {num_cards} cards)")]
    InvalidPosition {
        /// Zero-based position that was requested.
        position: usize,
        /// Number of cards on the board.
        num_cards: usize,
    },

    /// No board size holds the requested number of cards.
    #[error("no board size holds {num_cards} cards")]
    UnsupportedCardCount {
        /// Number of cards that was requested.
        num_cards: usize,
    },

    /// A custom board does not provide one image per pair.
    #[error("expected {expected} images for this board, got {actual}")]
    WrongImageCount {
        /// Number of images the board size needs.
        expected: usize,
        /// Number of images supplied.
        actual: usize,
    },

    // === Custom Board Errors ===
    /// No custom game with this name exists in the document store.
    #[error("Sorry, we couldn't find such a game: '{name}'")]
    GameNotFound {
        /// The requested game name.
        name: String,
    },

    /// A custom game document exists but cannot be played.
    #[error("invalid custom game data for '{name}': {message}")]
    InvalidGameData {
        /// The requested game name.
        name: String,
        /// Description of what is wrong with the document.
        message: String,
    },

    /// The game name is not acceptable for a new custom game.
    #[error("invalid game name '{name}': {reason}")]
    InvalidGameName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A custom game with this name already exists.
    #[error("game name '{name}' is already taken")]
    GameNameTaken {
        /// The conflicting name.
        name: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Remote Errors ===
    /// An HTTP request to the document store failed.
    #[error("request to document store failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The document store answered with an unexpected status.
    #[error("document store returned {status} for {url}")]
    RemoteStatus {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for memorygame operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a game-not-found error.
    #[must_use]
    pub fn game_not_found(name: impl Into<String>) -> Self {
        Self::GameNotFound { name: name.into() }
    }

    /// Create an invalid game data error.
    #[must_use]
    pub fn invalid_game_data(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGameData {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid game name error.
    #[must_use]
    pub fn invalid_game_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGameName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is a rejected move that leaves the game untouched.
    ///
    /// The play loop reports these to the player and keeps going.
    #[must_use]
    pub fn is_rejected_move(&self) -> bool {
        matches!(
            self,
            Self::GameAlreadyWon | Self::CardAlreadyFaceUp { .. } | Self::InvalidPosition { .. }
        )
    }

    /// Check if this error means the requested custom game does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GameNotFound { .. })
    }
}
