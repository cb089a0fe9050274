/// Changelog fragments:
/// every change is written down as its own small file the moment it is made,
/// so parallel branches never fight over CHANGELOG.md. The changelog documents
/// are then regenerated from those files, grouped by release and by tag.
use anyhow::Result;
use changelog_fragments::{logging, utils};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "changelog-fragments", version)]
#[command(about = "Record changes as fragments and render them into changelogs")]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .changes directory and a default configuration
    Init,
    /// Record a new unreleased change
    New {
        /// Tag of the change (repeat for several)
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,
        /// What changed, as it should read in the changelog
        #[arg(short, long)]
        description: String,
    },
    /// Regenerate every configured changelog document
    Generate {
        /// Print the documents instead of writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Check the configuration for problems
    Validate,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Init => utils::initialize_project(),
        Commands::New { tags, description } => utils::add_entry(tags, description),
        Commands::Generate { dry_run } => utils::generate(dry_run),
        Commands::Validate => utils::validate(),
    }
}
