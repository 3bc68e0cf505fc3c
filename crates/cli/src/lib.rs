//! `discover-cli`: command-line entry point for one feed export run.
//!
//! Configuration comes from positional arguments, falling back to
//! environment variables:
//!
//! - `DISCOVER_SETTINGS`: export settings JSON (default `discover-settings.json`)
//! - `DISCOVER_CATALOG`: catalog snapshot JSON (default `catalog.json`)
//! - `DISCOVER_LOG_FORMAT`: `json` (default) or `pretty`

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};

use discover_export::{ExportSettings, FeedResult, InMemoryCatalog};
use discover_observability::LogFormat;

const DEFAULT_SETTINGS: &str = "discover-settings.json";
const DEFAULT_CATALOG: &str = "catalog.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub settings_path: PathBuf,
    pub catalog_path: PathBuf,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Resolve configuration from `[settings] [catalog]` arguments and `env`.
    pub fn from_sources<I, F>(args: I, env: F) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let settings_arg = args.next();
        let catalog_arg = args.next();
        if let Some(extra) = args.next() {
            bail!("unexpected argument '{extra}' (usage: discover-export [settings.json] [catalog.json])");
        }

        let settings_path = settings_arg
            .or_else(|| env("DISCOVER_SETTINGS"))
            .unwrap_or_else(|| DEFAULT_SETTINGS.to_string());
        let catalog_path = catalog_arg
            .or_else(|| env("DISCOVER_CATALOG"))
            .unwrap_or_else(|| DEFAULT_CATALOG.to_string());

        let log_format = match env("DISCOVER_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(anyhow::Error::msg)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            settings_path: settings_path.into(),
            catalog_path: catalog_path.into(),
            log_format,
        })
    }
}

/// Read the settings and the catalog snapshot named by `config`.
pub fn load(config: &CliConfig) -> anyhow::Result<(ExportSettings, InMemoryCatalog)> {
    let raw = fs::read_to_string(&config.settings_path)
        .with_context(|| format!("reading settings {}", config.settings_path.display()))?;
    let settings = ExportSettings::from_json(&raw)
        .with_context(|| format!("parsing settings {}", config.settings_path.display()))?;

    let raw = fs::read_to_string(&config.catalog_path)
        .with_context(|| format!("reading catalog {}", config.catalog_path.display()))?;
    let catalog = InMemoryCatalog::from_json(&raw)
        .with_context(|| format!("parsing catalog {}", config.catalog_path.display()))?;

    Ok((settings, catalog))
}

pub fn summary_json(result: &FeedResult) -> anyhow::Result<String> {
    serde_json::to_string_pretty(result).context("serializing run summary")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_args_or_env() {
        let config = CliConfig::from_sources(Vec::new(), env(&[])).unwrap();
        assert_eq!(config.settings_path, PathBuf::from(DEFAULT_SETTINGS));
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn args_take_precedence_over_env() {
        let config = CliConfig::from_sources(
            vec!["s.json".to_string()],
            env(&[
                ("DISCOVER_SETTINGS", "env-s.json"),
                ("DISCOVER_CATALOG", "env-c.json"),
                ("DISCOVER_LOG_FORMAT", "pretty"),
            ]),
        )
        .unwrap();
        assert_eq!(config.settings_path, PathBuf::from("s.json"));
        assert_eq!(config.catalog_path, PathBuf::from("env-c.json"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_extra_args_and_bad_log_format() {
        let args = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(CliConfig::from_sources(args, env(&[])).is_err());
        assert!(CliConfig::from_sources(Vec::new(), env(&[("DISCOVER_LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn loads_files_and_runs_an_export() {
        let dir = tempfile::tempdir().unwrap();
        let settings_path = dir.path().join("settings.json");
        let catalog_path = dir.path().join("catalog.json");
        let feed_dir = dir.path().join("feeds");

        let settings = format!(
            r#"{{
                "process": {{"categories": true, "products": true}},
                "sites": [{{"name": "Storefront", "catalog": "Shop", "storefront": "Storefront"}}],
                "category_feed": {{"file_path": {cat:?}}},
                "product_feed": {{"file_path": {prod:?}, "default_currency": "USD",
                                  "include_standalone_products": true}}
            }}"#,
            cat = feed_dir.join("categories.csv").display().to_string(),
            prod = feed_dir.join("products.csv").display().to_string(),
        );
        fs::write(&settings_path, settings).unwrap();
        fs::write(
            &catalog_path,
            r#"{
                "storefronts": [{"name": "Storefront"}],
                "items": [
                    {"kind": "Catalog", "id": "Shop-Shop"},
                    {"kind": "Category", "id": "Shop-Mugs", "published": true, "parents": "Shop-Shop"},
                    {"kind": "SellableItem", "id": "Shop-Mug", "published": true, "parents": ["Shop-Mugs"],
                     "list_prices": [{"currency": "USD", "amount": 899}]}
                ]
            }"#,
        )
        .unwrap();

        let config = CliConfig {
            settings_path,
            catalog_path,
            log_format: LogFormat::Json,
        };
        let (settings, catalog) = load(&config).unwrap();
        let result = discover_export::FeedExporter::new(catalog).run(&settings).unwrap();
        assert_eq!(result.categories.appended, 1);
        assert_eq!(result.products.appended, 1);

        let json = summary_json(&result).unwrap();
        assert!(json.contains("\"products\""));

        let products = fs::read_to_string(feed_dir.join("products.csv")).unwrap();
        assert!(products.lines().nth(1).unwrap().starts_with("Mug,,products/Mug,,,Mug,Mugs,8.99,8.99,true,Product"));
    }

    #[test]
    fn missing_settings_file_reports_path() {
        let config = CliConfig {
            settings_path: PathBuf::from("/nonexistent/settings.json"),
            catalog_path: PathBuf::from("/nonexistent/catalog.json"),
            log_format: LogFormat::Json,
        };
        let err = load(&config).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/settings.json"));
    }
}
