// Packages command for listing synthesized packages

use crate::commands;
use crate::ui;
use moodleorg::{Config, MoodleOrgPlugin, SynthesizedPackage};

pub async fn packages(config: &Config, json: bool, filter: Option<String>) -> anyhow::Result<()> {
    // JSON output goes to stdout untouched, so skip the spinner
    let plugin = if json {
        MoodleOrgPlugin::activate(config).await?
    } else {
        commands::activate(config).await?
    };

    let needle = filter.map(|f| f.to_lowercase());
    let matching: Vec<&SynthesizedPackage> = plugin
        .repository
        .packages()
        .iter()
        .filter(|p| {
            needle
                .as_deref()
                .is_none_or(|n| p.name.to_lowercase().contains(n))
        })
        .collect();

    if json {
        ui::raw(&serde_json::to_string_pretty(&matching)?);
        return Ok(());
    }

    if matching.is_empty() {
        ui::warning("No packages matched");
        return Ok(());
    }

    for package in &matching {
        ui::package_line(&package.name, &package.version);
    }
    ui::success(&format!("{} package version(s)", matching.len()));
    Ok(())
}
