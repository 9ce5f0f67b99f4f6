use super::open_session;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use funnel_document::Mutation;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Mutation as JSON, or @path to read it from a file
    pub mutation: String,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let json = match args.mutation.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read mutation file {}", path))?,
        None => args.mutation.clone(),
    };
    let mutation: Mutation = serde_json::from_str(&json).context("Invalid mutation JSON")?;
    let label = mutation.label();

    let mut session = open_session(cwd)?;
    if session.apply(mutation)? {
        session.save_now()?;
        println!("{} {}", "✓".green(), label);
    } else {
        println!("{} {} (no change)", "•".yellow(), label);
    }

    Ok(())
}
