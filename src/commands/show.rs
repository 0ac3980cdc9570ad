// Show command for printing every version of one package

use crate::commands;
use crate::ui;
use moodleorg::Config;

pub async fn show(config: &Config, name: &str) -> anyhow::Result<()> {
    let plugin = commands::activate(config).await?;

    let mut versions: Vec<_> = plugin.repository.find_packages(name).collect();
    if versions.is_empty() {
        anyhow::bail!("Package '{}' not found in {}", name, plugin.repository.name());
    }

    // Newest release first
    versions.sort_by(|a, b| b.release_date.cmp(&a.release_date));

    let first = versions[0];
    ui::header(&first.name);
    ui::detail("description", &first.description);
    ui::detail("type", &first.kind);
    if let Some(homepage) = &first.homepage {
        ui::detail("homepage", homepage);
    }

    for package in versions {
        ui::action(&package.version);
        ui::detail("released", &package.release_date.to_rfc3339());
        ui::detail("dist", &package.dist.url);
        if let Some(md5) = package.dist_md5() {
            ui::detail("md5", md5);
        }
        if let Some(source) = &package.source {
            ui::detail(
                "source",
                &format!("{} {} ({})", source.kind, source.url, source.reference),
            );
        }
    }

    Ok(())
}
