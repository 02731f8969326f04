use std::path::Path;

use anyhow::Result;
use folio_core::content::CarouselItem;
use folio_core::AppConfig;

pub fn run(config: &AppConfig, content: Option<&Path>, json: bool) -> Result<()> {
    let catalog = super::load_catalog(config, content)?;

    if json {
        let items: Vec<&CarouselItem> = catalog.items().iter().map(|item| item.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if catalog.items().is_empty() {
        println!("No carousel items.");
        return Ok(());
    }

    println!("Items ({}):\n", catalog.items().len());

    for (idx, item) in catalog.items().iter().enumerate() {
        let role = if item.role.is_empty() {
            String::new()
        } else {
            format!(" ({})", item.role)
        };
        println!("  [{}] {}{}", idx, item.title, role);
        if let Some(video) = &item.video {
            println!("    Video: {}", video);
        }
        if item.has_extra_media() {
            println!("    Extra videos: {}", item.extra_videos.len());
        }
        if !item.tags.is_empty() {
            println!("    Tags: {}", item.tags.join(", "));
        }
        println!();
    }

    Ok(())
}
