//! Card types for memorygame.
//!
//! A card shows either one of the built-in icons or an image from a custom
//! board. Two cards are a pair when their faces are equal: icons compare by
//! variant, images by their slot in the board's image list.

use serde::{Deserialize, Serialize};

/// The built-in card faces used when no custom board is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    /// A smiling face.
    Face,
    /// An aeroplane.
    Aeroplane,
    /// A ship's anchor.
    Anchor,
    /// A boat.
    Boat,
    /// A car.
    Car,
    /// A cloud.
    Cloudy,
    /// A burger.
    Fastfood,
    /// A phone.
    Phone,
    /// A scooter.
    Scooter,
    /// The sun.
    Sunny,
    /// A tractor.
    Tractor,
    /// A wristwatch.
    Watch,
}

/// Every built-in icon. The hard board uses all of them.
pub const DEFAULT_ICONS: [Icon; 12] = [
    Icon::Face,
    Icon::Aeroplane,
    Icon::Anchor,
    Icon::Boat,
    Icon::Car,
    Icon::Cloudy,
    Icon::Fastfood,
    Icon::Phone,
    Icon::Scooter,
    Icon::Sunny,
    Icon::Tractor,
    Icon::Watch,
];

impl Icon {
    /// Short label used when drawing the card in a terminal.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Aeroplane => "plane",
            Self::Anchor => "anchor",
            Self::Boat => "boat",
            Self::Car => "car",
            Self::Cloudy => "cloud",
            Self::Fastfood => "burger",
            Self::Phone => "phone",
            Self::Scooter => "scooter",
            Self::Sunny => "sun",
            Self::Tractor => "tractor",
            Self::Watch => "watch",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a card shows when turned face up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CardFace {
    /// A built-in icon.
    Icon {
        /// The icon shown.
        icon: Icon,
    },
    /// An image from a custom board.
    Image {
        /// Index of the image within the custom board's image list.
        index: usize,
        /// Where the image lives.
        url: String,
    },
}

impl CardFace {
    /// Short label used when drawing the card in a terminal.
    ///
    /// Custom images are not fetched, so they are labelled by their
    /// 1-based index in the board's image list.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Icon { icon } => icon.label().to_string(),
            Self::Image { index, .. } => format!("img{}", index + 1),
        }
    }

    /// The image URL, for faces from a custom board.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::Icon { .. } => None,
            Self::Image { url, .. } => Some(url),
        }
    }
}

impl From<Icon> for CardFace {
    fn from(icon: Icon) -> Self {
        Self::Icon { icon }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCard {
    /// What the card shows when face up.
    pub face: CardFace,
    /// Whether the card is currently turned over.
    pub is_face_up: bool,
    /// Whether the card has been paired. Matched cards stay face up.
    pub is_matched: bool,
}

impl MemoryCard {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(face: CardFace) -> Self {
        Self {
            face,
            is_face_up: false,
            is_matched: false,
        }
    }

    /// Check if this card and `other` form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Self) -> bool {
        self.face == other.face
    }
}
