//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use anyhow::Result;
use clap::Parser;
use dfs_optimizer::{
    cli::{Commands, DfsCli},
    commands::{
        import::handle_import,
        optimize::{handle_optimize, OptimizeParams},
        sites::handle_sites,
    },
};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
fn main() -> Result<()> {
    let app = DfsCli::parse();
    init_logging(app.verbose);

    match app.command {
        Commands::Optimize {
            slate,
            csv,
            constraints,
            json,
            out,
        } => {
            let outcome = match handle_optimize(OptimizeParams {
                site: slate.site,
                season: slate.season,
                week: slate.week,
                csv,
                constraints,
                as_json: json,
                out,
            }) {
                Ok(outcome) => outcome,
                Err(e) if e.is_resolution_error() => {
                    eprintln!("Error: {}", e);
                    eprintln!("Pass the player's exact display name or numeric id.");
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };
            if !outcome.is_optimal() {
                std::process::exit(2);
            }
        }

        Commands::Import {
            slate,
            csv,
            clear_db,
        } => {
            handle_import(slate.site, slate.season, slate.week, &csv, clear_db)?;
        }

        Commands::Sites { json } => handle_sites(json)?,
    }

    Ok(())
}
