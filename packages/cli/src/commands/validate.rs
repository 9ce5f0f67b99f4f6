use crate::config::Config;
use anyhow::{anyhow, Result};
use colored::Colorize;
use funnel_document::Level;
use funnel_editor::{DocumentStore, JsonFileStore};

pub fn validate(cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.get_data_path(cwd);

    // Loading runs the document invariants
    let doc = JsonFileStore::new(&path)
        .load()?
        .ok_or_else(|| anyhow!("Document file does not exist: {}", path.display()))?;

    println!("{} {} is valid", "✓".green(), path.display());
    let ids = doc.ids();
    for level in Level::ALL {
        let count = ids.iter().filter(|(l, _)| *l == level).count();
        println!("  {:<13} {}", level.to_string(), count);
    }

    Ok(())
}
