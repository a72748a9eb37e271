//! guardian CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use guardian::{
    commands::{
        cmd_classify, cmd_clean, cmd_corrections_apply, cmd_corrections_template, cmd_init,
        cmd_patterns_list, cmd_patterns_record, cmd_score, cmd_status, print_classify_stats,
        print_clean_stats, print_corrections_report, print_patterns, print_patterns_stats,
        print_score_stats, print_status, ClassifyOptions, InitOptions, ScoreOptions,
    },
    config::Config,
    error::Result,
    server,
    store::DocumentStore,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "guardian")]
#[command(version, about = "Document topic classification and framework scoring", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize guardian configuration and databases
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Assign topic labels to documents
    Classify {
        /// Reclassify every document, not just unsettled ones
        #[arg(long)]
        all: bool,

        /// Report changes without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute framework scores
    Score {
        /// Recompute scores even for already-scored documents
        #[arg(long)]
        force: bool,

        /// Report changes without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Sanitize document metadata fields
    Clean {
        /// Report changes without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Apply declarative record corrections
    Corrections {
        #[command(subcommand)]
        action: CorrectionsAction,
    },

    /// Manage the learned-patterns database
    Patterns {
        #[command(subcommand)]
        action: PatternsAction,
    },

    /// Show system status
    Status,

    /// Start the scoring API server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CorrectionsAction {
    /// Apply corrections from a TOML file
    Apply {
        /// Corrections file
        #[arg(short, long)]
        file: PathBuf,

        /// Check corrections against live rows without committing
        #[arg(long)]
        dry_run: bool,
    },

    /// Print an example corrections file
    Template,
}

#[derive(Subcommand)]
enum PatternsAction {
    /// Load patterns from a TOML file
    Record {
        /// Patterns file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List learned patterns
    List,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Handle init command specially (doesn't need existing config)
    if let Commands::Init { force } = cli.command {
        let base_dir = cli
            .config
            .as_deref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Config::default_base_dir);
        return cmd_init(InitOptions { base_dir, force }).await;
    }

    // Handle completions command (doesn't need config or store)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "guardian", &mut std::io::stdout());
        return Ok(());
    }

    // The corrections template is static text
    if let Commands::Corrections {
        action: CorrectionsAction::Template,
    } = cli.command
    {
        cmd_corrections_template();
        return Ok(());
    }

    // Load configuration
    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::load_from(None)?,
    };

    // The patterns commands only touch the patterns database
    if let Commands::Patterns { action } = &cli.command {
        match action {
            PatternsAction::Record { file } => {
                let stats = cmd_patterns_record(&config, file).await?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    print_patterns_stats(&stats);
                }
            }
            PatternsAction::List => {
                let rows = cmd_patterns_list(&config).await?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    print_patterns(&rows);
                }
            }
        }
        return Ok(());
    }

    // Everything else needs the row store; DATABASE_URL absence is fatal
    let store = DocumentStore::connect().await?;

    match cli.command {
        Commands::Init { .. }
        | Commands::Completions { .. }
        | Commands::Patterns { .. }
        | Commands::Corrections {
            action: CorrectionsAction::Template,
        } => unreachable!(),

        Commands::Classify { all, dry_run } => {
            let stats = cmd_classify(&config, &store, ClassifyOptions { all, dry_run }).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_classify_stats(&stats);
            }
        }

        Commands::Score { force, dry_run } => {
            let stats = cmd_score(&config, &store, ScoreOptions { force, dry_run }).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_score_stats(&stats);
            }
        }

        Commands::Clean { dry_run } => {
            let stats = cmd_clean(&config, &store, dry_run).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_clean_stats(&stats);
            }
        }

        Commands::Corrections {
            action: CorrectionsAction::Apply { file, dry_run },
        } => {
            let (stats, report) = cmd_corrections_apply(&store, &file, dry_run).await?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "stats": stats,
                        "report": report,
                    }))?
                );
            } else {
                print_corrections_report(&stats, &report);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &store).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }

        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            server::serve(store, &config.server.bind, port).await?;
        }
    }

    Ok(())
}
