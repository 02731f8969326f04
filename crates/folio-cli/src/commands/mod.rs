pub mod check;
pub mod config;
pub mod items;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::{AppConfig, ContentCatalog};

/// Catalog from `--content`, else `general.content_path`, else the built-in one
pub fn load_catalog(config: &AppConfig, content: Option<&Path>) -> Result<ContentCatalog> {
    let path = content.map(Path::to_path_buf).or_else(|| config.content_path());
    ContentCatalog::load_or_builtin(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("failed to load content catalog {}", path.display()),
        None => "failed to load the built-in content catalog".to_string(),
    })
}
