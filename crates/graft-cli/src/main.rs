//! Graft CLI
//!
//! Command-line interface for inspecting, rendering and verifying persisted
//! syntax-graph stores

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use graft_core::{Layout, init_tracing};
use std::path::PathBuf;
use tracing::debug;

use crate::commands::Outcome;

#[derive(Parser)]
#[command(name = "graft")]
#[command(about = "Graft: versioned syntax-graph stores and source reconstruction")]
#[command(version = graft_core::VERSION)]
#[command(
    long_about = "Graft keeps every parse of a source file as a version in a node store and \
turns any stored subtree back into source text.\n\
\n\
Examples:\n  \
graft history app.store.json             # List versions\n  \
graft show app.store.json --version 0    # Dump the first version as a tree\n  \
graft render app.store.json --layout compact\n  \
graft verify app.store.json --round-trip # Render, re-ingest and compare\n  \
graft merge app.store.json edit.json -m \"rename\""
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        env = "GRAFT_CONFIG",
        help = "Path to configuration file (.graftrc.json/.graftrc.toml/graft.yaml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the versions of a store
    #[command(alias = "log")]
    History {
        /// Persisted store (.json, .yaml, .yml or .toml)
        store: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Print a stored subtree as an indented tree
    Show {
        /// Persisted store
        store: PathBuf,

        /// Node to start from
        #[arg(long, help = "Node id to dump (default: root of the selected version)")]
        node: Option<String>,

        /// Version whose root to start from
        #[arg(long, help = "Version index, starting at 0 (default: latest)")]
        version: Option<usize>,
    },

    /// Reconstruct and print source text
    Render {
        /// Persisted store
        store: PathBuf,

        /// Node to render
        #[arg(long, help = "Node id to render (default: root of the selected version)")]
        node: Option<String>,

        /// Version to render
        #[arg(long, help = "Version index, starting at 0 (default: latest)")]
        version: Option<usize>,

        /// Layout of the printed text
        #[arg(short, long, help = "Layout: readable, compact or minified")]
        layout: Option<Layout>,

        /// Leave comments out
        #[arg(long, help = "Omit comments from the output")]
        no_comments: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, help = "Output file (default: stdout)")]
        output: Option<PathBuf>,
    },

    /// Check two subtrees for structural equivalence
    Verify {
        /// Persisted store
        store: PathBuf,

        /// Left-hand node
        #[arg(long, help = "Left node id (default: root of the previous version)")]
        left: Option<String>,

        /// Right-hand node
        #[arg(long, help = "Right node id (default: root of the latest version)")]
        right: Option<String>,

        /// Render, re-ingest and compare instead
        #[arg(
            long,
            help = "Verify that a subtree survives reconstruct, render and re-ingest",
            conflicts_with = "left"
        )]
        round_trip: bool,

        /// Node to round-trip
        #[arg(long, help = "Node id to round-trip (default: latest root)", requires = "round_trip")]
        node: Option<String>,

        /// Also compare comments
        #[arg(long, help = "Treat comment differences as divergence")]
        compare_comments: bool,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Check graph integrity and that the latest version reconstructs cleanly
    Check {
        /// Persisted store
        store: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Merge a serialized parse result into a store as a new version
    Merge {
        /// Persisted store; created when it does not exist yet
        store: PathBuf,

        /// Fragment holding the parse result (root, nodes, stats)
        fragment: PathBuf,

        /// Description of the new version
        #[arg(short, long, help = "Description of the new version")]
        message: Option<String>,

        /// Source file name for a newly created store
        #[arg(long, help = "Source file name when creating a store (default: store file stem)")]
        file_name: Option<String>,

        /// Write the result elsewhere instead of updating the store in place
        #[arg(short, long, help = "Output path (default: overwrite the store)")]
        output: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Config,

    /// Show version information
    #[command(alias = "ver")]
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON for programmatic consumption
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Initialize colored output
    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "graft=error",
        1 => "graft=warn",
        2 => "graft=info",
        3 => "graft=debug",
        _ => "graft=trace",
    };
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    match run_command(cli) {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Failure) => std::process::exit(1),
        Err(err) => {
            output::print_error(&err);
            std::process::exit(2);
        }
    }
}

fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let config = commands::load_config(cli.config.as_deref())?;
    debug!("Resolved configuration: {:?}", config);

    match cli.command {
        Some(Commands::History { store, format }) => commands::history_command(&store, format),

        Some(Commands::Show {
            store,
            node,
            version,
        }) => commands::show_command(&store, node, version),

        Some(Commands::Render {
            store,
            node,
            version,
            layout,
            no_comments,
            output,
        }) => {
            let mut options = config.pipeline_options();
            if let Some(layout) = layout {
                options.render.layout = layout;
            }
            if no_comments {
                options.reconstruct.include_comments = false;
                options.render.include_comments = false;
            }
            commands::render_command(&store, node, version, &options, output.as_deref())
        }

        Some(Commands::Verify {
            store,
            left,
            right,
            round_trip,
            node,
            compare_comments,
            format,
        }) => {
            let mut options = config.pipeline_options();
            if compare_comments {
                options.equivalence.compare_comments = true;
            }
            if round_trip {
                commands::round_trip_command(&store, node, &options, format)
            } else {
                commands::verify_command(&store, left, right, &options, format)
            }
        }

        Some(Commands::Check { store, format }) => {
            commands::check_command(&store, &config.pipeline_options(), format)
        }

        Some(Commands::Merge {
            store,
            fragment,
            message,
            file_name,
            output,
        }) => commands::merge_command(&store, &fragment, message, file_name, output.as_deref()),

        Some(Commands::Config) => commands::config_show_command(&config),

        Some(Commands::Version) => {
            println!("graft {}", graft_core::VERSION);
            Ok(Outcome::Success)
        }

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(Outcome::Success)
        }
    }
}
