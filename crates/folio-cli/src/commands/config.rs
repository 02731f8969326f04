use anyhow::{bail, Result};
use folio_core::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    if !write {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let path = AppConfig::config_path();
    if path.exists() {
        bail!("{} already exists; remove it first to write the defaults", path.display());
    }
    let path = AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
