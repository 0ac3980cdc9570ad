mod cli;
mod commands;
mod ui;

use clap::Parser;
use cli::{CacheAction, Cli, Commands};
use moodleorg::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli).await {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env();

    match cli.command {
        Commands::Packages { json, filter } => {
            commands::packages::packages(&config, json, filter).await
        }
        Commands::Show { name } => commands::show::show(&config, &name).await,
        Commands::Download {
            name,
            version,
            output,
        } => commands::download::download(&config, &name, version.as_deref(), &output).await,
        Commands::Cache { action } => match action {
            CacheAction::Clear => commands::cache::clear(&config),
        },
    }
}
