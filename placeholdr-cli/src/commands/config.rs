use crate::config::{ConfigLoader, PROJECT_CONFIG_DIR_ENV};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged, defaults applied)
    Show,
    /// Show configuration file paths
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => show_paths(),
    }
}

fn show_config() -> Result<()> {
    let config = ConfigLoader::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn show_paths() -> Result<()> {
    match ConfigLoader::user_config_path() {
        Some(path) => println!("User config:    {}", path.display()),
        None => println!("User config:    (no home directory)"),
    }
    println!(
        "Project config: {} (override with {})",
        ConfigLoader::project_config_path().display(),
        PROJECT_CONFIG_DIR_ENV
    );
    Ok(())
}
