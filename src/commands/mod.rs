// Commands module: one file per CLI subcommand

pub mod cache;
pub mod download;
pub mod packages;
pub mod show;

use crate::ui;
use moodleorg::{Config, MoodleOrgPlugin};

/// Activate the integration, showing a spinner while the catalog loads
pub async fn activate(config: &Config) -> anyhow::Result<MoodleOrgPlugin> {
    let pb = ui::spinner("Loading moodle.org catalog...");
    match MoodleOrgPlugin::activate(config).await {
        Ok(plugin) => {
            ui::finish_spinner_success(
                &pb,
                &format!("Loaded {} package(s)", plugin.repository.len()),
            );
            Ok(plugin)
        }
        Err(e) => {
            ui::finish_spinner_error(&pb, "Failed to load catalog");
            Err(e)
        }
    }
}
