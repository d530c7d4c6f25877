//! CLI entry point for blockpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blockpress")]
#[command(version)]
#[command(about = "A block-based blog engine and static site publisher", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blockpress site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post document
    New {
        /// Title of the new post
        title: String,

        /// Category for the new post
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Excerpt shown in listings and feeds
        #[arg(short, long)]
        excerpt: Option<String>,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// List site content
    List {
        /// Type of content to list (post, category, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blockpress=debug,info"
    } else {
        "blockpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli
        .cwd
        .unwrap_or_else(|| std::env::current_dir().expect("current directory is accessible"));

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blockpress site in {:?}", target_dir);
            blockpress::commands::init::init_site(&target_dir)?;
            println!("Initialized empty blockpress site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            excerpt,
            tags,
        } => {
            let app = blockpress::Blockpress::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            blockpress::commands::new::run(
                &app,
                &title,
                category.as_deref(),
                excerpt.as_deref(),
                tags.as_deref(),
            )?;
        }

        Commands::Generate => {
            let app = blockpress::Blockpress::new(&base_dir)?;
            tracing::info!("Generating static files...");
            app.generate()?;
            println!("Generated successfully!");
        }

        Commands::List { r#type } => {
            let app = blockpress::Blockpress::new(&base_dir)?;
            blockpress::commands::list::run(&app, &r#type)?;
        }

        Commands::Clean => {
            let app = blockpress::Blockpress::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blockpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
