//! The card-pairs game model.
//!
//! [`MemoryGame`] owns the shuffled deck and tracks which card, if any, is
//! waiting for its partner. All rule checks happen in
//! [`MemoryGame::flip_card`]; callers never mutate cards directly.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::board::BoardSize;
use crate::card::{CardFace, MemoryCard, DEFAULT_ICONS};
use crate::error::{Error, Result};

/// What a successful flip did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of an attempt; it waits for a partner.
    FirstCard,
    /// Second card of an attempt, and it matched the first.
    Match,
    /// Second card of an attempt, and it did not match.
    NoMatch,
}

impl FlipOutcome {
    /// Check if this flip completed a pair.
    #[must_use]
    pub fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

/// In-memory state of one game.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    board_size: BoardSize,
    cards: Vec<MemoryCard>,
    num_pairs_found: usize,
    num_card_flips: usize,
    selected: Option<usize>,
}

impl MemoryGame {
    /// Deal a new shuffled board.
    ///
    /// Without `custom_images` the deck is drawn from the built-in icons.
    /// With them, each image becomes one pair, so exactly
    /// `board_size.num_pairs()` images are required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongImageCount`] if the custom image list does not
    /// fit the board.
    pub fn new<R: Rng + ?Sized>(
        board_size: BoardSize,
        custom_images: Option<&[String]>,
        rng: &mut R,
    ) -> Result<Self> {
        let num_pairs = board_size.num_pairs();

        let faces: Vec<CardFace> = match custom_images {
            None => {
                let mut icons = DEFAULT_ICONS;
                icons.shuffle(rng);
                icons[..num_pairs].iter().map(|&icon| icon.into()).collect()
            }
            Some(images) => {
                if images.len() != num_pairs {
                    return Err(Error::WrongImageCount {
                        expected: num_pairs,
                        actual: images.len(),
                    });
                }
                images
                    .iter()
                    .enumerate()
                    .map(|(index, url)| CardFace::Image {
                        index,
                        url: url.clone(),
                    })
                    .collect()
            }
        };

        let mut cards: Vec<MemoryCard> = faces
            .iter()
            .chain(faces.iter())
            .cloned()
            .map(MemoryCard::new)
            .collect();
        cards.shuffle(rng);

        debug!(
            "Dealt {} board with {} cards{}",
            board_size,
            cards.len(),
            if custom_images.is_some() {
                " from custom images"
            } else {
                ""
            }
        );

        Ok(Self {
            board_size,
            cards,
            num_pairs_found: 0,
            num_card_flips: 0,
            selected: None,
        })
    }

    /// Flip the card at `position`.
    ///
    /// The first card of an attempt turns every unmatched card face down
    /// before turning itself up, so a failed pair stays visible until the
    /// player starts the next attempt.
    ///
    /// # Errors
    ///
    /// Rejects the flip, leaving the game unchanged, if the game is already
    /// won, the position is off the board, or the card is already face up.
    pub fn flip_card(&mut self, position: usize) -> Result<FlipOutcome> {
        if self.has_won_game() {
            return Err(Error::GameAlreadyWon);
        }
        if position >= self.cards.len() {
            return Err(Error::InvalidPosition {
                position,
                num_cards: self.cards.len(),
            });
        }
        if self.cards[position].is_face_up {
            return Err(Error::CardAlreadyFaceUp { position });
        }

        self.num_card_flips += 1;

        let outcome = match self.selected.take() {
            None => {
                self.restore_cards();
                self.selected = Some(position);
                FlipOutcome::FirstCard
            }
            Some(first) => {
                if self.check_for_match(first, position) {
                    FlipOutcome::Match
                } else {
                    FlipOutcome::NoMatch
                }
            }
        };

        let card = &mut self.cards[position];
        card.is_face_up = !card.is_face_up;

        Ok(outcome)
    }

    fn check_for_match(&mut self, first: usize, second: usize) -> bool {
        if !self.cards[first].pairs_with(&self.cards[second]) {
            return false;
        }
        self.cards[first].is_matched = true;
        self.cards[second].is_matched = true;
        self.num_pairs_found += 1;
        info!(
            "Found a match! Num of pairs found: {}",
            self.num_pairs_found
        );
        true
    }

    fn restore_cards(&mut self) {
        for card in self.cards.iter_mut().filter(|card| !card.is_matched) {
            card.is_face_up = false;
        }
    }

    /// The board's difficulty tier.
    #[must_use]
    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    /// The card at `position`, if it exists.
    #[must_use]
    pub fn card(&self, position: usize) -> Option<&MemoryCard> {
        self.cards.get(position)
    }

    /// Check if the card at `position` is face up. Off-board positions are not.
    #[must_use]
    pub fn is_card_face_up(&self, position: usize) -> bool {
        self.card(position).is_some_and(|card| card.is_face_up)
    }

    /// Number of pairs matched so far.
    #[must_use]
    pub fn num_pairs_found(&self) -> usize {
        self.num_pairs_found
    }

    /// Number of completed moves. A move is two flips.
    #[must_use]
    pub fn num_moves(&self) -> usize {
        self.num_card_flips / 2
    }

    /// Check if every pair has been found.
    #[must_use]
    pub fn has_won_game(&self) -> bool {
        self.num_pairs_found == self.board_size.num_pairs()
    }

    /// Fraction of pairs found, from 0.0 to 1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        self.num_pairs_found as f32 / self.board_size.num_pairs() as f32
    }
}
