// Cache command for managing the local catalog cache

use crate::ui;
use moodleorg::constants;
use moodleorg::{Config, FileCache};

pub fn clear(config: &Config) -> anyhow::Result<()> {
    let cache = FileCache::from_config(config)?;
    if config.cache_read_only {
        anyhow::bail!(
            "Cache at {} is read-only; refusing to clear it",
            cache.dir().display()
        );
    }

    cache.remove(constants::CACHE_KEY)?;
    ui::success(&format!("Cleared catalog cache in {}", cache.dir().display()));
    Ok(())
}
