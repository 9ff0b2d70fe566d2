use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Plinth - static site compiler and publishing tool
#[derive(Parser, Debug)]
#[command(name = "plinth")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'plinth init' to scaffold a new site in the current directory.")]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new site (layout, starter page, deploy script)
    Init {
        /// Directory to scaffold into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Scaffold even if the directory is not empty
        #[arg(long)]
        force: bool,
    },

    /// Render the site into the output directory
    Build {
        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory (defaults to [build] output in plinth.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Preview what a build would change without writing
    Diff {
        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory (defaults to [build] output in plinth.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the site locally, rendering pages on request
    Serve {
        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Port to listen on (defaults to [serve] port in plinth.toml)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Watch for changes and rebuild continuously
    Watch {
        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory (defaults to [build] output in plinth.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the site, then run its deploy script
    Deploy {
        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory (defaults to [build] output in plinth.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deploy script (defaults to [deploy] script in plinth.toml)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Run the deploy script without building first
        #[arg(long)]
        skip_build: bool,
    },

    /// Create, rename, or delete pages
    Page {
        #[command(subcommand)]
        command: PageCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// Create a new page (or directory with --directory)
    New {
        /// Page name; a bare name gets the .md extension
        name: String,

        /// Parent directory, relative to the site root
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Create a directory instead of a page
        #[arg(long)]
        directory: bool,

        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,
    },

    /// Rename a page or directory in place
    Mv {
        /// Page to rename, relative to the site root
        from: PathBuf,

        /// New name (stays in the same directory)
        to: String,

        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,
    },

    /// Delete a page or directory
    Rm {
        /// Page to delete, relative to the site root
        path: PathBuf,

        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,

        /// Path to the site root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,
    },
}
