use std::path::Path;

use anyhow::Result;
use folio_core::content::{MediaResolver, REVEAL_KEYS};
use folio_core::{AppConfig, EmbedResolver, WordRevealAnimator};

pub fn run(config: &AppConfig, content: Option<&Path>) -> Result<()> {
    let catalog = super::load_catalog(config, content)?;
    catalog.validate()?;

    let reveals = [&config.reveal.intro, &config.reveal.details];
    for (key, reveal) in REVEAL_KEYS.iter().zip(reveals) {
        let animator = WordRevealAnimator::from_message(&catalog.messages, key, reveal)?;
        println!("  {}: {} words", key, animator.words().len());
    }

    // Media problems only degrade the panel, so they are reported, not fatal
    let resolver = EmbedResolver;
    let mut degraded = 0;
    for item in catalog.items() {
        if let Some(video) = &item.video {
            if resolver.resolve_video(video).is_none() {
                degraded += 1;
                println!("  {}: video '{}' falls back to the thumbnail", item.title, video);
            }
        }
        for extra in &item.extra_videos {
            if resolver.resolve_video(extra).is_none() {
                degraded += 1;
                println!("  {}: extra video '{}' will be skipped", item.title, extra);
            }
        }
    }

    println!(
        "\nCatalog OK: {} items, {} media warnings",
        catalog.items().len(),
        degraded
    );
    Ok(())
}
