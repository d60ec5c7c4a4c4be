//! Read-only content and mini-game catalogs.
//!
//! Catalogs are TOML documents:
//!
//! ```toml
//! special_message = { id = "m-special", text = "..." }
//!
//! [[photos]]
//! id = "p-01"
//! caption = "First light"
//! path = "photos/first-light.jpg"
//!
//! [[messages]]
//! id = "m-01"
//! text = "..."
//!
//! [[games]]
//! id = "memory-match"
//! name = "Memory Match"
//! difficulty = "easy"
//! ```

use std::collections::HashSet;
use std::path::Path;

use indoc::indoc;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Anything selectable by id.
pub trait CatalogEntry {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
}

impl CatalogEntry for Photo {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Message {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Game {
    fn id(&self) -> &str {
        &self.id
    }
}

const BUILTIN_CATALOG: &str = indoc! {r#"
    special_message = { id = "m-special", text = "Seventeen cycles in. Whatever today holds, you kept showing up, and that is the whole point." }

    [[photos]]
    id = "p-harbor"
    caption = "Harbor at dawn"
    path = "photos/harbor.jpg"

    [[photos]]
    id = "p-lanterns"
    caption = "Paper lanterns"
    path = "photos/lanterns.jpg"

    [[photos]]
    id = "p-orchard"
    caption = "Orchard in bloom"
    path = "photos/orchard.jpg"

    [[photos]]
    id = "p-snowfield"
    caption = "First snow"
    path = "photos/snowfield.jpg"

    [[photos]]
    id = "p-tidepool"
    caption = "Tide pool"
    path = "photos/tidepool.jpg"

    [[messages]]
    id = "m-small-steps"
    text = "Small steps still count as steps."

    [[messages]]
    id = "m-kind-to-yourself"
    text = "Be as kind to yourself as you are to the people you love."

    [[messages]]
    id = "m-rest"
    text = "Rest is part of the work."

    [[messages]]
    id = "m-noticed"
    text = "Someone noticed the effort today."

    [[messages]]
    id = "m-curious"
    text = "Stay curious about what tomorrow brings."

    [[games]]
    id = "memory-match"
    name = "Memory Match"
    difficulty = "easy"

    [[games]]
    id = "word-scramble"
    name = "Word Scramble"
    difficulty = "easy"

    [[games]]
    id = "color-sort"
    name = "Color Sort"
    difficulty = "easy"

    [[games]]
    id = "sliding-tiles"
    name = "Sliding Tiles"
    difficulty = "medium"

    [[games]]
    id = "pattern-recall"
    name = "Pattern Recall"
    difficulty = "medium"

    [[games]]
    id = "nonogram"
    name = "Nonogram"
    difficulty = "hard"

    [[games]]
    id = "cipher-break"
    name = "Cipher Break"
    difficulty = "hard"
"#};

/// All catalogs the engine selects from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub photos: Vec<Photo>,
    pub messages: Vec<Message>,
    /// Reserved message shown at the milestone streak; never drawn randomly.
    pub special_message: Message,
    pub games: Vec<Game>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// Parse and validate a TOML catalog.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load from `path`, or the built-in catalog when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Self::from_toml(&content)
            }
            None => Self::builtin(),
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.photos.is_empty() {
            return Err(CatalogError::Empty("photos"));
        }
        if self.messages.is_empty() {
            return Err(CatalogError::Empty("messages"));
        }
        if self.games.is_empty() {
            return Err(CatalogError::Empty("games"));
        }
        check_unique("photo", &self.photos)?;
        check_unique("message", &self.messages)?;
        check_unique("game", &self.games)?;
        if find(&self.messages, &self.special_message.id).is_some() {
            return Err(CatalogError::SpecialMessageListed(
                self.special_message.id.clone(),
            ));
        }
        Ok(())
    }

    pub fn photo(&self, id: &str) -> Option<&Photo> {
        find(&self.photos, id)
    }

    /// Regular messages and the special message both resolve here.
    pub fn message(&self, id: &str) -> Option<&Message> {
        find(&self.messages, id).or_else(|| {
            (self.special_message.id == id).then_some(&self.special_message)
        })
    }

    pub fn game(&self, id: &str) -> Option<&Game> {
        find(&self.games, id)
    }
}

fn find<'a, T: CatalogEntry>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

fn check_unique<T: CatalogEntry>(kind: &'static str, items: &[T]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: item.id().to_string(),
            });
        }
    }
    Ok(())
}
