use crate::reports;
use clap::Args;
use strokeforge::api::CheckResponse;
use strokeforge::config::ValidationParams;
use strokeforge::error::SfResult;
use strokeforge::loader::load_strokes;
use strokeforge::scorer::Scorer;
use strokeforge::templates::TemplateLibrary;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub params: ValidationParams,

    /// Character the attempt is meant to be
    #[arg(short, long)]
    pub symbol: String,

    /// Attempt strokes (.json or .csv)
    #[arg(short, long)]
    pub input: String,

    /// Reference strokes in the same format; defaults to the built-in template
    #[arg(short, long)]
    pub template: Option<String>,

    /// Print the result as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ValidateArgs, scorer: &Scorer) -> SfResult<()> {
    let symbol = super::parse_symbol(&args.symbol)?;
    let strokes = load_strokes(&args.input)?;

    let custom = match &args.template {
        Some(path) => Some(load_strokes(path)?),
        None => None,
    };
    let template = match custom.as_deref() {
        Some(t) => Some(t),
        None => {
            let builtin = TemplateLibrary::builtin().get(symbol).map(|t| t.as_slice());
            if builtin.is_none() {
                warn!("No reference template for '{}'", symbol);
            }
            builtin
        }
    };

    info!("🔎 Validating {} strokes as '{}'", strokes.len(), symbol);
    let result = scorer.validate(&strokes, symbol, template);

    if args.json {
        let resp = CheckResponse {
            symbol: args.symbol,
            message: result.reason.message(),
            result,
        };
        println!("{}", serde_json::to_string_pretty(&resp)?);
    } else {
        reports::print_validation_report(&args.symbol, &result, &scorer.params);
    }
    Ok(())
}
