use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use funnel_document::initial_document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Document file to create
    #[arg(short, long, default_value = "funnels.json")]
    pub data_path: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing funnel builder...".bright_blue().bold());

    let config = Config {
        data_path: args.data_path.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Seed the document file with the initial dataset
    let data_path = config.get_data_path(cwd);
    if !data_path.exists() {
        if let Some(parent) = data_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&data_path, initial_document().to_json_pretty()?)?;
        println!("  {} Created {}", "✓".green(), args.data_path);
    }

    println!();
    println!("{}", "✅ Builder initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: funnel show");
    println!("  2. Run: funnel create-funnel \"My funnel\"");

    Ok(())
}
