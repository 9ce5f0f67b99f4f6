use super::open_session;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use funnel_editor::View;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Select this entity (and its ancestors) before printing
    #[arg(short, long)]
    pub select: Option<String>,

    /// Print the selection as JSON instead
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd)?;

    if let Some(id) = &args.select {
        if !session.select_entity(id) {
            return Err(anyhow!("No entity with id {}", id));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.selection())?);
        return Ok(());
    }

    let view = session.view();
    println!("{}", "Active path".bright_blue().bold());
    for (level, id) in view.active_path() {
        println!("  {} {:<13} {}", "›".green(), level.to_string(), id.bright_white());
    }
    if view.chain.is_none() {
        println!("  {}", "(nothing selected)".dimmed());
    }

    print_children(&view);
    Ok(())
}

fn print_children(view: &View<'_>) {
    let lists: [(&str, Vec<(&str, &str)>); 6] = [
        ("Categories", view.categories.iter().map(|e| (e.id.as_str(), e.name.as_str())).collect()),
        ("Subcategories", view.subcategories.iter().map(|e| (e.id.as_str(), e.name.as_str())).collect()),
        ("Landing pages", view.landing_pages.iter().map(|e| (e.id.as_str(), e.name.as_str())).collect()),
        ("Funnels", view.funnels.iter().map(|e| (e.id.as_str(), e.name.as_str())).collect()),
        ("Pages", view.pages.iter().map(|e| (e.id.as_str(), e.name.as_str())).collect()),
        ("Blocks", view.blocks.iter().map(|e| (e.id.as_str(), e.kind.as_str())).collect()),
    ];

    for (title, items) in lists {
        if items.is_empty() {
            continue;
        }
        println!();
        println!("{} ({})", title.bold(), items.len());
        for (id, label) in items {
            println!("  - {} {}", label, format!("[{}]", id).dimmed());
        }
    }
}
