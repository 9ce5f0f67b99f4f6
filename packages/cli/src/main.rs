mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, create_funnel, init, show, validate, ApplyArgs, CreateFunnelArgs, InitArgs, ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// Funnel builder CLI - edit landing-page funnels from the terminal
#[derive(Parser, Debug)]
#[command(name = "funnel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and seed the document
    Init(InitArgs),

    /// Print the active path and the derived lists
    Show(ShowArgs),

    /// Create a funnel with one empty page
    CreateFunnel(CreateFunnelArgs),

    /// Apply a JSON mutation to the document
    Apply(ApplyArgs),

    /// Check the document file
    Validate,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::CreateFunnel(args) => create_funnel(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Validate => validate(&cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
