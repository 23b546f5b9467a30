//! Custom board documents and the stores that hold them.
//!
//! A custom board is the document `<collection>/<game name>` whose `images`
//! field lists one image URL per pair. This module defines the
//! [`DocumentStore`] seam, the document shape, and the download/upload flows
//! built on top of it.

pub mod http;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::BoardSize;
use crate::config::{Config, StoreBackend};
use crate::error::{Error, Result};

pub use http::HttpDocumentStore;
pub use sqlite::SqliteDocumentStore;

/// Shortest accepted custom game name.
pub const MIN_GAME_NAME_LENGTH: usize = 3;

/// Longest accepted custom game name.
pub const MAX_GAME_NAME_LENGTH: usize = 14;

/// A keyed JSON document store.
///
/// Implementors only move whole documents; interpreting them is left to
/// [`download_board`] and [`upload_board`].
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// The name of this store (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Fetch a document, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or answers badly.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>>;

    /// Create or replace a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or rejects the write.
    async fn put(&self, collection: &str, id: &str, document: &serde_json::Value) -> Result<()>;
}

/// The stored shape of a custom board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserImageList {
    /// One image URL per pair.
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// When the board was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A custom board ready to be played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomBoard {
    /// The game name it was stored under.
    pub name: String,
    /// Tier implied by the number of images.
    pub board_size: BoardSize,
    /// One image URL per pair.
    pub images: Vec<String>,
}

fn game_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("game name pattern is valid"))
}

/// Check that `name` can be used for a new custom game.
///
/// Names are 3 to 14 ASCII letters or digits.
///
/// # Errors
///
/// Returns [`Error::InvalidGameName`] describing the first rule broken.
pub fn validate_game_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len < MIN_GAME_NAME_LENGTH {
        return Err(Error::invalid_game_name(
            name,
            format!("must be at least {MIN_GAME_NAME_LENGTH} characters"),
        ));
    }
    if len > MAX_GAME_NAME_LENGTH {
        return Err(Error::invalid_game_name(
            name,
            format!("must be at most {MAX_GAME_NAME_LENGTH} characters"),
        ));
    }
    if !game_name_pattern().is_match(name) {
        return Err(Error::invalid_game_name(
            name,
            "only letters and digits are allowed",
        ));
    }
    Ok(())
}

/// Look up the custom board stored under `name`.
///
/// # Errors
///
/// Returns [`Error::GameNotFound`] if there is no document or it carries no
/// images, [`Error::InvalidGameData`] if the document is malformed or its
/// image count fits no board size, or the store's own error.
pub async fn download_board(
    store: &dyn DocumentStore,
    collection: &str,
    name: &str,
) -> Result<CustomBoard> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::game_not_found(name));
    }

    // A JSON null body is how REST stores report an absent key.
    let document = store
        .get(collection, name)
        .await?
        .filter(|document| !document.is_null());
    let Some(document) = document else {
        warn!("No custom game document for '{}' in {}", name, store.name());
        return Err(Error::game_not_found(name));
    };

    let list: UserImageList = serde_json::from_value(document)
        .map_err(|e| Error::invalid_game_data(name, e.to_string()))?;

    let images = match list.images {
        Some(images) if !images.is_empty() => images,
        _ => {
            warn!("Invalid custom game data for '{}': no images", name);
            return Err(Error::game_not_found(name));
        }
    };

    let board_size = BoardSize::from_num_cards(images.len() * 2).ok_or_else(|| {
        Error::invalid_game_data(
            name,
            format!("{} images do not fit any board size", images.len()),
        )
    })?;

    info!(
        "Downloaded custom game '{}' ({}, {} images)",
        name,
        board_size,
        images.len()
    );

    Ok(CustomBoard {
        name: name.to_string(),
        board_size,
        images,
    })
}

/// Store a new custom board under `name`.
///
/// # Errors
///
/// Returns an error if the name is invalid or already taken, if the number of
/// images is not exactly one per pair of `board_size`, or if the store fails.
pub async fn upload_board(
    store: &dyn DocumentStore,
    collection: &str,
    name: &str,
    board_size: BoardSize,
    images: Vec<String>,
) -> Result<CustomBoard> {
    validate_game_name(name)?;

    if images.len() != board_size.num_pairs() {
        return Err(Error::WrongImageCount {
            expected: board_size.num_pairs(),
            actual: images.len(),
        });
    }

    if store.get(collection, name).await?.is_some() {
        return Err(Error::GameNameTaken {
            name: name.to_string(),
        });
    }

    let document = UserImageList {
        images: Some(images.clone()),
        created_at: Some(Utc::now()),
    };
    store
        .put(collection, name, &serde_json::to_value(&document)?)
        .await?;

    info!("Created custom game '{}' in {}", name, store.name());

    Ok(CustomBoard {
        name: name.to_string(),
        board_size,
        images,
    })
}

/// Open the document store selected by `config`.
///
/// # Errors
///
/// Returns an error if the store cannot be set up.
pub fn open_store(config: &Config) -> Result<Box<dyn DocumentStore>> {
    match config.store.backend {
        StoreBackend::Http => Ok(Box::new(HttpDocumentStore::new(
            &config.store.base_url,
            config.store.api_key.clone(),
            config.request_timeout(),
        )?)),
        StoreBackend::Sqlite => Ok(Box::new(SqliteDocumentStore::open(
            config.database_path(),
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLLECTION: &str = "games";

    fn store() -> SqliteDocumentStore {
        SqliteDocumentStore::open_in_memory().expect("failed to create test store")
    }

    fn images(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("https://img.example/{i}.jpg"))
            .collect()
    }

    #[test]
    fn test_validate_game_name() {
        assert!(validate_game_name("abc").is_ok());
        assert!(validate_game_name("Beach2024").is_ok());
        assert!(validate_game_name("abcdefghijklmn").is_ok());

        assert!(validate_game_name("ab").is_err());
        assert!(validate_game_name("abcdefghijklmno").is_err());
        assert!(validate_game_name("my game").is_err());
        assert!(validate_game_name("héllo").is_err());
    }

    #[test]
    fn test_validate_game_name_reason() {
        let err = validate_game_name("ab").unwrap_err().to_string();
        assert!(err.contains("at least 3"));
        let err = validate_game_name("no-dash").unwrap_err().to_string();
        assert!(err.contains("letters and digits"));
    }

    #[test]
    fn test_user_image_list_missing_images() {
        let list: UserImageList = serde_json::from_value(json!({})).unwrap();
        assert!(list.images.is_none());
        assert!(list.created_at.is_none());
    }

    #[tokio::test]
    async fn test_download_board() {
        let store = store();
        store
            .put(COLLECTION, "beach", &json!({ "images": images(4) }))
            .await
            .unwrap();

        let board = download_board(&store, COLLECTION, "beach").await.unwrap();
        assert_eq!(board.name, "beach");
        assert_eq!(board.board_size, BoardSize::Easy);
        assert_eq!(board.images, images(4));
    }

    #[tokio::test]
    async fn test_download_board_trims_name() {
        let store = store();
        store
            .put(COLLECTION, "beach", &json!({ "images": images(9) }))
            .await
            .unwrap();

        let board = download_board(&store, COLLECTION, "  beach ").await.unwrap();
        assert_eq!(board.board_size, BoardSize::Medium);
    }

    #[tokio::test]
    async fn test_download_missing_board() {
        let err = download_board(&store(), COLLECTION, "nothing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_download_null_document() {
        let store = store();
        store
            .put(COLLECTION, "ghost", &serde_json::Value::Null)
            .await
            .unwrap();

        let err = download_board(&store, COLLECTION, "ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("couldn't find such a game"));
    }

    #[tokio::test]
    async fn test_download_empty_name() {
        let err = download_board(&store(), COLLECTION, "   ").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_download_board_without_images() {
        let store = store();
        store
            .put(COLLECTION, "blank", &json!({ "title": "no images here" }))
            .await
            .unwrap();
        store
            .put(COLLECTION, "empty", &json!({ "images": [] }))
            .await
            .unwrap();

        for name in ["blank", "empty"] {
            let err = download_board(&store, COLLECTION, name).await.unwrap_err();
            assert!(err.is_not_found());
        }
    }

    #[tokio::test]
    async fn test_download_board_unsupported_count() {
        let store = store();
        store
            .put(COLLECTION, "odd", &json!({ "images": images(5) }))
            .await
            .unwrap();

        let err = download_board(&store, COLLECTION, "odd").await.unwrap_err();
        assert!(matches!(err, Error::InvalidGameData { .. }));
        assert!(err.to_string().contains("5 images"));
    }

    #[tokio::test]
    async fn test_download_board_malformed() {
        let store = store();
        store
            .put(COLLECTION, "broken", &json!({ "images": "not a list" }))
            .await
            .unwrap();

        let err = download_board(&store, COLLECTION, "broken")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidGameData { .. }));
    }

    #[tokio::test]
    async fn test_upload_then_download() {
        let store = store();
        let uploaded = upload_board(&store, COLLECTION, "garden", BoardSize::Hard, images(12))
            .await
            .unwrap();
        assert_eq!(uploaded.board_size, BoardSize::Hard);

        let stored = store.get(COLLECTION, "garden").await.unwrap().unwrap();
        let list: UserImageList = serde_json::from_value(stored).unwrap();
        assert!(list.created_at.is_some());

        let downloaded = download_board(&store, COLLECTION, "garden").await.unwrap();
        assert_eq!(downloaded, uploaded);
    }

    #[tokio::test]
    async fn test_upload_name_taken() {
        let store = store();
        upload_board(&store, COLLECTION, "garden", BoardSize::Easy, images(4))
            .await
            .unwrap();

        let err = upload_board(&store, COLLECTION, "garden", BoardSize::Easy, images(4))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GameNameTaken { .. }));
    }

    #[tokio::test]
    async fn test_upload_wrong_image_count() {
        let err = upload_board(&store(), COLLECTION, "garden", BoardSize::Medium, images(4))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::WrongImageCount {
                expected: 9,
                actual: 4
            }
        ));
    }

    #[tokio::test]
    async fn test_upload_invalid_name() {
        let err = upload_board(&store(), COLLECTION, "x", BoardSize::Easy, images(4))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidGameName { .. }));
    }

    #[test]
    fn test_open_store_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.backend = StoreBackend::Sqlite;
        config.store.database_path = Some(dir.path().join("boards.db"));

        let store = open_store(&config).unwrap();
        assert_eq!(store.name(), "sqlite");
    }

    #[test]
    fn test_open_store_http() {
        let store = open_store(&Config::default()).unwrap();
        assert_eq!(store.name(), "http");
    }
}
