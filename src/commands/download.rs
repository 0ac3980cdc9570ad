// Download command: fetch a package archive and run the download guard on it

use crate::commands;
use crate::ui;
use log::warn;
use moodleorg::http;
use moodleorg::{Config, DownloadEvent, SynthesizedPackage};
use std::fs;
use std::path::Path;

pub async fn download(
    config: &Config,
    name: &str,
    version: Option<&str>,
    output: &Path,
) -> anyhow::Result<()> {
    let mut plugin = commands::activate(config).await?;
    let repository = &plugin.repository;

    let package: SynthesizedPackage = match version {
        Some(v) => repository.find_package(name, v).cloned().ok_or_else(|| {
            anyhow::anyhow!("Version '{}' not found for package '{}'", v, name)
        })?,
        None => repository
            .find_packages(name)
            .max_by(|a, b| a.release_date.cmp(&b.release_date))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Package '{}' not found", name))?,
    };

    let url = package.dist.url.clone();
    let fallback = format!(
        "{}-{}.zip",
        package.installer_name().unwrap_or("package"),
        package.version
    );
    let target = output.join(http::filename_from_url(&url, &fallback));

    let pb = ui::spinner(&format!("Downloading {}...", package.pretty_string()));
    let bytes = match http::fetch_bytes(&url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            ui::finish_spinner_error(&pb, &format!("Download failed: {}", package.pretty_string()));
            return Err(e.into());
        }
    };

    fs::create_dir_all(output)?;
    fs::write(&target, &bytes)?;

    let event = DownloadEvent::new(&target, &url).for_package(&package);
    if let Err(e) = plugin.guard.post_file_download(&event).await {
        ui::finish_spinner_error(&pb, &package.pretty_string());
        // Don't leave an unverified archive behind
        if let Err(remove_err) = fs::remove_file(&target) {
            warn!(
                "Failed to remove unverified archive {}: {}",
                target.display(),
                remove_err
            );
        }
        return Err(e.into());
    }

    ui::finish_spinner_success(
        &pb,
        &format!("{} verified ({})", package.pretty_string(), target.display()),
    );
    Ok(())
}
