mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vidflow",
    about = "Video lifecycle tracker: phases, per-aspect progress, and field editing",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from settings.yaml)
    #[arg(long, global = true, env = "VIDFLOW_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create settings.yaml, the index and the data directory
    Init,

    /// Show every phase with its video count
    Phases,

    /// List videos with phase and overall progress
    List {
        /// Only videos in this phase (name or id)
        #[arg(long)]
        phase: Option<String>,
    },

    /// Create a new video
    Create {
        name: String,
        #[arg(long, short = 'c')]
        category: String,
    },

    /// Show a video's phase and per-aspect progress
    Show {
        name: String,
        #[arg(long, short = 'c')]
        category: String,
    },

    /// Set one field (by its API field name, e.g. `sponsorship.amount`)
    Set {
        name: String,
        #[arg(long, short = 'c')]
        category: String,
        field: String,
        value: String,
    },

    /// Delete a video, its script and its index entry
    Delete {
        name: String,
        #[arg(long, short = 'c')]
        category: String,
    },

    /// Aspect overview, with completion counts when a video is given
    Aspects {
        #[arg(long, requires = "category")]
        name: Option<String>,
        #[arg(long, short = 'c', requires = "name")]
        category: Option<String>,
    },

    /// Field metadata for one aspect
    Fields { aspect: String },

    /// Check settings.yaml for common mistakes
    Validate,

    /// Run the REST API
    Serve {
        /// Port to listen on (default: server.port from settings.yaml)
        #[arg(long)]
        port: Option<u16>,

        /// Open a browser once listening
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let json = cli.json;

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, json),
        Commands::Phases => cmd::phases::run(&root, json),
        Commands::List { phase } => cmd::video::list(&root, phase.as_deref(), json),
        Commands::Create { name, category } => cmd::video::create(&root, &name, &category, json),
        Commands::Show { name, category } => cmd::video::show(&root, &name, &category, json),
        Commands::Set {
            name,
            category,
            field,
            value,
        } => cmd::video::set(&root, &name, &category, &field, &value, json),
        Commands::Delete { name, category } => cmd::video::delete(&root, &name, &category, json),
        Commands::Aspects { name, category } => {
            cmd::aspects::overview(&root, name.as_deref(), category.as_deref(), json)
        }
        Commands::Fields { aspect } => cmd::aspects::fields(&aspect, json),
        Commands::Validate => cmd::config::validate(&root, json),
        Commands::Serve { port, open } => cmd::serve::run(&root, port, open),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
