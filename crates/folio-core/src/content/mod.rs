//! Content catalog: translated copy and the carousel item list
//!
//! The catalog is a TOML document with an opaque `[messages]` tree (looked up
//! with dotted keys such as `Hero.overviewIntro`) and an `[[items]]` array of
//! carousel items. A default catalog is compiled into the crate.

mod media;
mod models;

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use media::{EmbedResolver, MediaRef, MediaResolver, ResolvedMedia};
pub use models::{CarouselItem, ItemKey};

const BUILTIN_CATALOG: &str = include_str!("../../content/default.toml");

/// Keys rendered through the word reveal; they must be plain strings
pub const REVEAL_KEYS: [&str; 2] = ["Hero.overviewIntro", "Hero.overviewDetails"];

/// Pre-resolved key → value mapping
#[derive(Debug, Clone, Default)]
pub struct Messages {
    root: toml::Table,
}

impl Messages {
    pub fn new(root: toml::Table) -> Self {
        Self { root }
    }

    /// Raw value at a dotted path
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.root.get(first)?;
        for part in parts {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// String message; missing keys and non-string values are errors
    pub fn text(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(toml::Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(Error::Content(format!(
                "message '{}' is a {}, expected a string",
                key,
                other.type_str()
            ))),
            None => Err(Error::MissingMessage(key.to_string())),
        }
    }

    /// Text for a word reveal. Anything but a plain string is rejected.
    pub fn reveal_text(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(toml::Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(Error::RevealTarget {
                key: key.to_string(),
                found: other.type_str(),
            }),
            None => Err(Error::MissingMessage(key.to_string())),
        }
    }

    /// Display label; falls back to the key itself when absent
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        match self.get(key) {
            Some(toml::Value::String(s)) => s.as_str(),
            _ => key,
        }
    }

    /// Ordered list of strings; missing or malformed lists are empty
    pub fn list(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    messages: toml::Table,
    #[serde(default)]
    items: Vec<CarouselItem>,
}

/// The content source consumed by the page
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    pub messages: Messages,
    items: Vec<Arc<CarouselItem>>,
}

impl ContentCatalog {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(source)?;
        let catalog = Self {
            messages: Messages::new(raw.messages),
            items: raw.items.into_iter().map(Arc::new).collect(),
        };
        debug!(items = catalog.items.len(), "content catalog parsed");
        Ok(catalog)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&source)?;
        info!(path = %path.display(), items = catalog.items.len(), "loaded content catalog");
        Ok(catalog)
    }

    /// Load from `path` if given, otherwise the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Canonical item list
    pub fn items(&self) -> &[Arc<CarouselItem>] {
        &self.items
    }

    pub fn item(&self, key: ItemKey) -> Option<&Arc<CarouselItem>> {
        self.items.get(key.0)
    }

    /// Contract checks the page relies on
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::Content("catalog has no items".to_string()));
        }
        for (idx, item) in self.items.iter().enumerate() {
            if item.title.trim().is_empty() {
                return Err(Error::Content(format!("item {} has an empty title", idx)));
            }
            if item.image.is_empty() {
                return Err(Error::Content(format!(
                    "item '{}' has no image reference",
                    item.title
                )));
            }
        }
        for key in REVEAL_KEYS {
            self.messages.reveal_text(key)?;
        }
        Ok(())
    }
}
