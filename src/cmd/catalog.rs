use crate::reports;
use clap::Args;
use strokeforge::catalog::PatternCatalog;
use strokeforge::error::{SfResult, StrokeForgeError};
use strokeforge::templates::TemplateLibrary;

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Show only this character
    #[arg(short, long)]
    pub symbol: Option<String>,
}

pub fn run(args: CatalogArgs) -> SfResult<()> {
    let catalog = PatternCatalog::hangul();
    let templates = TemplateLibrary::builtin();

    match args.symbol {
        Some(raw) => {
            let pattern = catalog
                .get_str(&raw)
                .ok_or(StrokeForgeError::UnknownSymbol(raw))?;
            reports::print_catalog(std::iter::once(pattern), templates);
        }
        None => {
            println!("\n📚 {} patterns, {} templates", catalog.len(), templates.len());
            reports::print_catalog(catalog.iter(), templates);
        }
    }
    Ok(())
}
