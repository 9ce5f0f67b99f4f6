use super::open_session;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use funnel_document::Level;

#[derive(Debug, Args)]
pub struct CreateFunnelArgs {
    /// Funnel name
    pub name: String,

    /// Landing page to add the funnel to (defaults to the auto-selected one)
    #[arg(short, long)]
    pub landing_page: Option<String>,
}

pub fn create_funnel(args: CreateFunnelArgs, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd)?;

    if let Some(id) = &args.landing_page {
        let is_landing_page = session
            .document()
            .path_to(id)
            .and_then(|path| path.last().map(|(level, _)| *level))
            == Some(Level::LandingPage);
        if !is_landing_page || !session.select_entity(id) {
            return Err(anyhow!("No landing page with id {}", id));
        }
    }

    let landing_page = session
        .view()
        .landing_page
        .map(|lp| lp.name.clone())
        .ok_or_else(|| anyhow!("No landing page is active"))?;

    let created = session
        .create_funnel(&args.name)?
        .ok_or_else(|| anyhow!("Funnel name must not be blank"))?;
    session.save_now()?;

    println!(
        "{} Created funnel {} in {}",
        "✓".green(),
        args.name.trim().bright_white(),
        landing_page
    );
    println!("  funnel: {}", created.funnel_id);
    println!("  page:   {}", created.page_id);

    Ok(())
}
