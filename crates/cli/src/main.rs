use anyhow::Context;

use discover_cli::{CliConfig, load, summary_json};
use discover_export::FeedExporter;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())?;
    discover_observability::init_with(config.log_format);

    let (settings, catalog) = load(&config)?;
    tracing::info!(
        settings = %config.settings_path.display(),
        catalog = %config.catalog_path.display(),
        "starting feed export"
    );

    match FeedExporter::new(catalog).run(&settings) {
        Ok(result) => {
            println!("{}", summary_json(&result)?);
            Ok(())
        }
        Err(aborted) => {
            println!("{}", summary_json(&aborted.result)?);
            Err(anyhow::Error::new(aborted.error)).context("export run aborted")
        }
    }
}
