use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod container;
mod error;

use config::Config;
use error::{format_error_with_suggestions, CliError};

#[derive(Parser)]
#[command(name = "ibdx")]
#[command(about = "IBDx - Synthetic RNA-seq explorer for IBD models")]
#[command(version)]
#[command(long_about = "
IBDx generates reproducible synthetic expression data for mouse models of
inflammatory bowel disease and human IBD samples, and renders it as SVG charts.

Examples:
  ibdx gene TNF --out tnf.svg
  ibdx gene TNF IL6 IL10 --model il10ko --out charts/
  ibdx correlation --out similarity.svg
  ibdx volcano --comparison il10ko_IL10KO_vs_WT --out volcano.svg
  ibdx targets TNF
  ibdx network STAT3
  ibdx export --out snapshot/
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session seed (overrides the configuration file)
    #[arg(long, global = true)]
    pub seed: Option<String>,

    /// Use the legacy character-sum generator
    #[arg(long, global = true)]
    pub charsum: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expression bar chart for one or more genes
    Gene {
        /// Gene names; unknown names are generated on first use
        #[arg(required = true)]
        names: Vec<String>,

        /// Restrict bars to one model (id or display name)
        #[arg(long)]
        model: Option<String>,

        /// Output SVG file, or a directory for one file per gene
        #[arg(short, long, required = true)]
        out: PathBuf,
    },

    /// Pathway enrichment heatmap
    Pathways {
        /// Print the scores of one pathway
        #[arg(long)]
        pathway: Option<String>,

        /// Output SVG file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Mouse model similarity to human IBD
    Compare {
        #[arg(short, long, required = true)]
        out: PathBuf,
    },

    /// Model-by-model expression correlation heatmap
    Correlation {
        #[arg(short, long, required = true)]
        out: PathBuf,
    },

    /// Volcano plot for a differential comparison
    Volcano {
        #[arg(long, default_value = ibdx_core::volcano::DEFAULT_COMPARISON)]
        comparison: String,

        #[arg(short, long, required = true)]
        out: PathBuf,
    },

    /// PCA of samples across models and conditions
    Pca {
        #[arg(short, long, required = true)]
        out: PathBuf,
    },

    /// Therapeutic target ranking, or the scores of one target
    Targets {
        name: Option<String>,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Case-insensitive gene name search
    Search { term: String },

    /// Gene description and expression values
    Info { gene: String },

    /// Regulatory network rules of a gene
    Network { gene: String },

    /// Write JSON snapshots of all session tables
    Export {
        #[arg(short, long, required = true)]
        out: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Print the default configuration
        #[arg(long)]
        example: bool,

        /// Write the default configuration to a file
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.seed, cli.charsum);

    if let Commands::Config { example, write } = &cli.command {
        commands::config::execute(&config, *example, write.as_deref())?;
        return Ok(());
    }

    let mut session = commands::build_session(&config);

    match cli.command {
        Commands::Gene { names, model, out } => {
            commands::charts::gene(&config, &mut session, &names, model.as_deref(), &out)?;
        }
        Commands::Pathways { pathway, out } => {
            commands::charts::pathways(&config, &session, pathway.as_deref(), out.as_deref())?;
        }
        Commands::Compare { out } => {
            commands::charts::compare(&config, &session, &out)?;
        }
        Commands::Correlation { out } => {
            commands::charts::correlation(&config, &session, &out)?;
        }
        Commands::Volcano { comparison, out } => {
            commands::charts::volcano(&config, &session, &comparison, &out)?;
        }
        Commands::Pca { out } => {
            commands::charts::pca(&config, &session, &out)?;
        }
        Commands::Targets { name, out } => {
            commands::targets::execute(&config, &session, name.as_deref(), out.as_deref())?;
        }
        Commands::Search { term } => {
            commands::query::search(&session, &term)?;
        }
        Commands::Info { gene } => {
            commands::query::info(&mut session, &gene)?;
        }
        Commands::Network { gene } => {
            commands::query::network(&gene)?;
        }
        Commands::Export { out } => {
            commands::export::execute(&session, &out)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet)?;

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => eprintln!("Error: {}", format_error_with_suggestions(cli_err)),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }

    Ok(())
}
