//! The single-screen game controller.
//!
//! [`GameSession`] keeps the settings that survive a restart (difficulty and
//! any loaded custom board) and owns the current [`MemoryGame`]. Front ends
//! call into it and show the labels it produces.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::board::BoardSize;
use crate::error::{Error, Result};
use crate::game::{FlipOutcome, MemoryGame};
use crate::store::CustomBoard;

/// Title shown when no custom board is loaded.
pub const DEFAULT_TITLE: &str = "Memory Game";

/// Message shown when the last pair is found.
pub const WIN_MESSAGE: &str = "Congratulations, you won!";

/// Prompt shown before abandoning a game in progress.
pub const QUIT_PROMPT: &str = "Quit your current game?";

/// Result of a flip, as seen by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipReport {
    /// What the flip did.
    pub outcome: FlipOutcome,
    /// Whether this flip won the game.
    pub won: bool,
}

/// Game settings plus the game currently being played.
#[derive(Debug)]
pub struct GameSession {
    board_size: BoardSize,
    game_name: Option<String>,
    custom_images: Option<Vec<String>>,
    game: MemoryGame,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Start a session on the built-in deck.
    ///
    /// A `seed` makes every deal of this session reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if the first board cannot be dealt.
    pub fn new(board_size: BoardSize, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let game = MemoryGame::new(board_size, None, &mut rng)?;
        Ok(Self {
            board_size,
            game_name: None,
            custom_images: None,
            game,
            rng,
        })
    }

    /// Start a fresh game with the current settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the loaded custom images no longer fit the board.
    pub fn setup_board(&mut self) -> Result<()> {
        self.game = MemoryGame::new(
            self.board_size,
            self.custom_images.as_deref(),
            &mut self.rng,
        )?;
        debug!("Set up board: {}", self.board_size.description());
        Ok(())
    }

    /// Switch to `board_size` on the built-in deck and start over.
    ///
    /// Any loaded custom board is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the new board cannot be dealt.
    pub fn choose_difficulty(&mut self, board_size: BoardSize) -> Result<()> {
        self.board_size = board_size;
        self.game_name = None;
        self.custom_images = None;
        self.setup_board()?;
        info!("Switched to {}", board_size.description());
        Ok(())
    }

    /// Load a downloaded custom board and start playing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the image count fits no board size. The current
    /// game is left untouched in that case.
    pub fn apply_custom_board(&mut self, board: CustomBoard) -> Result<()> {
        let num_cards = board.images.len() * 2;
        let board_size = BoardSize::from_num_cards(num_cards)
            .ok_or(Error::UnsupportedCardCount { num_cards })?;

        let game = MemoryGame::new(board_size, Some(&board.images), &mut self.rng)?;

        info!("You are now playing {}", board.name);
        self.board_size = board_size;
        self.game_name = Some(board.name);
        self.custom_images = Some(board.images);
        self.game = game;
        Ok(())
    }

    /// Flip the card at zero-based `position`.
    ///
    /// # Errors
    ///
    /// Returns the rejection from [`MemoryGame::flip_card`]; the game is
    /// unchanged.
    pub fn flip(&mut self, position: usize) -> Result<FlipReport> {
        let outcome = self.game.flip_card(position)?;
        let won = outcome.is_match() && self.game.has_won_game();
        if won {
            info!("Game won in {} moves", self.game.num_moves());
        }
        Ok(FlipReport { outcome, won })
    }

    /// Check if restarting now would throw away progress.
    #[must_use]
    pub fn needs_quit_confirmation(&self) -> bool {
        self.game.num_moves() > 0 && !self.game.has_won_game()
    }

    /// The game being played.
    #[must_use]
    pub fn game(&self) -> &MemoryGame {
        &self.game
    }

    /// Current difficulty tier.
    #[must_use]
    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    /// Name of the loaded custom board, if any.
    #[must_use]
    pub fn game_name(&self) -> Option<&str> {
        self.game_name.as_deref()
    }

    /// Screen title: the custom board's name or the default title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.game_name.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Difficulty label, e.g. `Easy: 4 x 2`.
    #[must_use]
    pub fn board_label(&self) -> String {
        self.board_size.description()
    }

    /// Pairs counter, e.g. `Pairs: 3 / 4`.
    #[must_use]
    pub fn pairs_label(&self) -> String {
        format!(
            "Pairs: {} / {}",
            self.game.num_pairs_found(),
            self.board_size.num_pairs()
        )
    }

    /// Moves counter, e.g. `Moves: 5`.
    #[must_use]
    pub fn moves_label(&self) -> String {
        format!("Moves: {}", self.game.num_moves())
    }
}
