//! Plinth CLI - static site compiler and publishing tool
//!
//! Usage: plinth <COMMAND>
//!
//! Commands:
//!   init    Scaffold a new site
//!   build   Render the site into the output directory
//!   diff    Preview changes without writing
//!   serve   Preview the site locally
//!   watch   Rebuild continuously on change
//!   deploy  Build, then run the site's deploy script
//!   page    Create, rename, or delete pages

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, PageCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => commands::init::cmd_init(&path, force, cli.json),
        Commands::Build { source, output } => {
            commands::build::cmd_build(&source, output, cli.json, cli.verbose)
        }
        Commands::Diff { source, output } => {
            commands::diff::cmd_diff(&source, output, cli.json, cli.verbose)
        }
        Commands::Serve { source, port } => commands::serve::cmd_serve(&source, port),
        Commands::Watch { source, output } => commands::watch::cmd_watch(&source, output, cli.json),
        Commands::Deploy {
            source,
            output,
            script,
            skip_build,
        } => commands::deploy::cmd_deploy(&source, output, script, skip_build, cli.json),
        Commands::Page { command } => match command {
            PageCommands::New {
                name,
                dir,
                directory,
                source,
            } => commands::page::cmd_page_new(&source, &name, dir, directory, cli.json),
            PageCommands::Mv { from, to, source } => {
                commands::page::cmd_page_mv(&source, &from, &to, cli.json)
            }
            PageCommands::Rm { path, yes, source } => {
                commands::page::cmd_page_rm(&source, &path, yes, cli.json)
            }
        },
    }
}
