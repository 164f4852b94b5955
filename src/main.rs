use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use strokeforge::config::ValidationParams;
use strokeforge::scorer::Scorer;
use tracing::{info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scores hand-drawn Hangul jamo against reference strokes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file of validation parameters; explicit flags override it
    #[arg(global = true, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Validate(cmd::validate::ValidateArgs),
    Catalog(cmd::catalog::CatalogArgs),
    Calibrate(cmd::calibrate::CalibrateArgs),
}

/// File parameters (or defaults) with explicit command-line values on top.
fn resolve_params(
    file: Option<&str>,
    cli_params: &ValidationParams,
    sub_matches: Option<&ArgMatches>,
) -> ValidationParams {
    let mut params = match file {
        Some(path) => {
            info!("⚖️  Loading parameters from: {}", path);
            ValidationParams::load_from_file(path).unwrap_or_else(|e| {
                eprintln!("❌ {}", e);
                process::exit(1);
            })
        }
        None => ValidationParams::default(),
    };
    if let Some(m) = sub_matches {
        params.merge_from_cli(cli_params, m);
    }
    params
}

fn build_scorer(params: ValidationParams) -> Scorer<'static> {
    Scorer::new(params).unwrap_or_else(|e| {
        eprintln!("\n❌ FATAL ERROR INITIALIZING SCORER:");
        eprintln!("   {}", e);
        process::exit(1);
    })
}

fn main() {
    // Raw matches tell explicit flags apart from clap defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Validate(args) => {
            let params = resolve_params(
                cli.params.as_deref(),
                &args.params,
                matches.subcommand_matches("validate"),
            );
            cmd::validate::run(args, &build_scorer(params))
        }
        Commands::Catalog(args) => cmd::catalog::run(args),
        Commands::Calibrate(args) => {
            let params = resolve_params(
                cli.params.as_deref(),
                &args.params,
                matches.subcommand_matches("calibrate"),
            );
            cmd::calibrate::run(args, &build_scorer(params))
        }
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
