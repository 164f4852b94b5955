use crate::reports;
use clap::Args;
use strokeforge::calibrate::{run_calibration, CalibrationOptions};
use strokeforge::config::ValidationParams;
use strokeforge::error::{SfResult, StrokeForgeError};
use strokeforge::scorer::Scorer;
use strokeforge::templates::TemplateLibrary;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CalibrateArgs {
    #[command(flatten)]
    pub params: ValidationParams,

    /// Calibrate a single character instead of the whole catalog
    #[arg(short, long)]
    pub symbol: Option<String>,

    #[arg(long, default_value_t = 200)]
    pub trials: usize,

    /// Max per-axis noise in canvas units
    #[arg(long, default_value_t = 3.0)]
    pub jitter: f32,

    #[arg(long, default_value_t = 12)]
    pub samples: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: CalibrateArgs, scorer: &Scorer) -> SfResult<()> {
    let library = TemplateLibrary::builtin();

    let symbols: Vec<char> = match &args.symbol {
        Some(raw) => {
            let c = super::parse_symbol(raw)?;
            if library.get(c).is_none() {
                return Err(StrokeForgeError::UnknownSymbol(raw.clone()));
            }
            vec![c]
        }
        None => scorer.catalog().iter().map(|p| p.symbol).collect(),
    };

    let opts = CalibrationOptions {
        trials: args.trials,
        jitter: args.jitter,
        samples: args.samples,
        seed: args.seed,
    };

    info!(
        "🎯 Calibrating {} symbols ({} trials, jitter {:.1})",
        symbols.len(),
        opts.trials,
        opts.jitter
    );
    let rows = run_calibration(scorer, library, &symbols, &opts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        reports::print_calibration_report(&rows, opts.jitter);
    }
    Ok(())
}
