//! Point d'entrée CLI pour choropleth-viewer

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use choropleth_viewer::cli::{self, Commands};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Colorier des limites GeoJSON à partir d'une table de valeurs
#[derive(Parser)]
#[command(name = "choropleth-viewer")]
#[command(author, version)]
#[command(about = "Joindre une table de valeurs à des limites GeoJSON et colorier chaque région")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging (stderr, stdout peut porter le GeoJSON)
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Render(args) => {
            let report = cli::cmd_render(&args)?;
            debug!(summary = %report.summary(), "Render finished");
            std::process::exit(cli::exit_code(&report));
        }
        Commands::Scales => cli::cmd_scales()?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
