//! Gojoin catalog CLI
//!
//! Lists, filters and imports the castle catalog from the terminal, and
//! prints the shareable link for the current view.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gojoin::{
    catalog::Catalog,
    error::{AppError, Result},
    locale,
    models::{Config, Language, Region, Seed, SiteRecord},
    storage::{CatalogStorage, LocalStorage},
};

/// Default line template for `list`.
const LIST_TEMPLATE: &str = "{id}\t{name}\t{prefecture} / {region}\t({lat}, {lng})";

/// Gojoin - Castle Stamp Catalog
#[derive(Parser, Debug)]
#[command(name = "gojoin", version, about = "Castle catalog with shareable views")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Directory holding the catalog snapshot
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the visible castles for a view
    List {
        /// Start from a shared fragment, e.g. "#lang=en&q=castle"
        #[arg(long)]
        fragment: Option<String>,

        /// Display language (ja, en, zh)
        #[arg(long)]
        lang: Option<Language>,

        /// Name search across all languages
        #[arg(short, long)]
        query: Option<String>,

        /// Region filter
        #[arg(short, long)]
        region: Option<String>,

        /// Prefecture filter
        #[arg(short, long)]
        pref: Option<String>,

        /// Line template ({id}, {name}, {prefecture}, {region}, {lat}, {lng}, {url}, {gojoin_url})
        #[arg(long, default_value = LIST_TEMPLATE)]
        template: String,
    },

    /// Replace the catalog with the rows of a CSV file
    Import {
        /// CSV file to import
        file: PathBuf,

        /// Report what would change without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Discard the imported snapshot and return to the seed
    Reset,

    /// List regions and their prefectures
    Regions,

    /// Validate configuration, seed and snapshot
    Validate,

    /// Show where the active catalog comes from
    Info,
}

/// Initialize logging. `RUST_LOG` wins, then `--verbose`, then the config.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Where the active catalog was loaded from.
enum Source {
    Snapshot(chrono::DateTime<chrono::Utc>),
    Seed,
}

/// Seed records: the configured seed file, or the built-in castles.
fn load_seed(config: &Config, config_path: &Path) -> Result<Seed> {
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    let seed = match config.seed_path(base) {
        Some(path) => Seed::load_or_default(path),
        None => Seed::default(),
    };
    seed.validate()?;
    Ok(seed)
}

/// Active records: the last imported snapshot, falling back to the seed.
async fn load_sites(
    config: &Config,
    config_path: &Path,
    storage: &LocalStorage,
) -> Result<(Vec<SiteRecord>, Source)> {
    if let Some(snapshot) = storage.load_snapshot().await? {
        log::debug!("Using snapshot from {}", snapshot.updated_at);
        return Ok((snapshot.sites, Source::Snapshot(snapshot.updated_at)));
    }
    Ok((load_seed(config, config_path)?.into_sites(), Source::Seed))
}

fn print_site(site: &SiteRecord, template: &str, lang: Language) {
    let m = locale::messages(lang);
    println!("{}", site.format(template, lang));
    if !site.gojoin_url.is_empty() {
        println!("\t{}: {}", m.stamp_available, site.gojoin_url);
    }
    if !site.url.is_empty() {
        println!("\t{}: {}", m.more_info, site.url);
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The logger takes its level from the file, so the file is read first.
    let loaded = Config::load(&cli.config);
    init_logging(
        cli.verbose,
        loaded
            .as_ref()
            .map(|c| c.logging.level.as_str())
            .unwrap_or("info"),
    );
    let config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });

    let storage =
        LocalStorage::new(&cli.storage_dir).with_snapshot_key(&config.catalog.snapshot_file);

    match cli.command {
        Command::List {
            fragment,
            lang,
            query,
            region,
            pref,
            template,
        } => {
            let (sites, _) = load_sites(&config, &cli.config, &storage).await?;
            let (mut catalog, warnings) = Catalog::new(sites, fragment.as_deref().unwrap_or(""));
            for warning in warnings {
                log::warn!("{}", warning);
            }

            let share = catalog.share_mut();
            if let Some(lang) = lang {
                share.set_language(lang);
            }
            if let Some(query) = query {
                share.set_query(query);
            }
            if region.is_some() {
                share.set_region(region.as_deref())?;
            }
            if pref.is_some() {
                share.set_prefecture(pref.as_deref())?;
            }

            let share = catalog.share();
            let lang = share.language();
            let m = locale::messages(lang);

            println!("{} - {}", m.title, m.subtitle);
            println!(
                "{}: {} = {} / {} = {} / {} = {} / {} = \"{}\"",
                m.filter,
                m.language,
                lang.native_name(),
                m.region,
                share.region().map_or(m.all, |r| r.name()),
                m.prefecture,
                share.prefecture().unwrap_or(m.all),
                m.search,
                share.query()
            );
            println!();

            let visible = catalog.visible();
            if visible.is_empty() {
                println!("{}", m.no_results);
            }
            for site in &visible {
                print_site(site, &template, lang);
            }

            println!();
            println!("{}: {}", m.share_link, share.share_link(&config.share.base_url()?));
        }

        Command::Import { file, dry_run } => {
            let (sites, _) = load_sites(&config, &cli.config, &storage).await?;
            let (mut catalog, _) = Catalog::new(sites, "");
            let m = locale::messages(Language::default());

            log::info!("{}: {}", m.import_csv, file.display());
            let report = match catalog.import_file(&file).await {
                Ok(report) => report,
                Err(e) if e.is_recoverable() => {
                    log::warn!("{}. Catalog unchanged.", e);
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            for row in &report.dropped {
                log::info!("Skipped line {}: {}", row.line, row.reason);
            }
            if !report.duplicate_ids.is_empty() {
                log::warn!("Duplicate ids (last row kept): {}", report.duplicate_ids.join(", "));
            }
            if !report.orphan_ids.is_empty() {
                log::warn!(
                    "Region/prefecture outside the known list: {}",
                    report.orphan_ids.join(", ")
                );
            }
            log::info!(
                "{}: {} sites, {} dropped ({} added, {} updated, {} removed)",
                m.data,
                report.accepted,
                report.dropped.len(),
                report.diff.added.len(),
                report.diff.updated.len(),
                report.diff.removed.len()
            );

            if dry_run {
                log::info!("Dry run: snapshot not written");
            } else {
                storage.write_snapshot(catalog.store().current()).await?;
            }
        }

        Command::Reset => {
            if storage.remove_snapshot().await? {
                log::info!("Snapshot removed; the seed catalog is active again");
            } else {
                log::info!("No snapshot to remove");
            }
        }

        Command::Regions => {
            let (sites, _) = load_sites(&config, &cli.config, &storage).await?;
            for region in Region::all() {
                let count = sites.iter().filter(|s| s.region == region.name()).count();
                println!("{} ({})", region, count);
                println!("\t{}", region.prefectures().join(" "));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let seed = load_seed(&config, &cli.config)?;
            log::info!("✓ Seed OK ({} sites)", seed.sites.len());

            if let Some(snapshot) = storage.load_snapshot().await? {
                if snapshot.count != snapshot.sites.len() {
                    return Err(AppError::validation(format!(
                        "snapshot declares {} sites but holds {}",
                        snapshot.count,
                        snapshot.sites.len()
                    )));
                }
                let orphans = snapshot.sites.iter().filter(|s| !s.is_in_taxonomy()).count();
                if orphans > 0 {
                    log::warn!("Snapshot has {} sites outside the region list", orphans);
                }
                log::info!("✓ Snapshot OK ({} sites)", snapshot.count);
            }

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Config: {}", cli.config.display());
            log::info!("Storage directory: {}", storage.root_dir().display());
            log::info!("Share base URL: {}", config.share.base_url);

            let (sites, source) = load_sites(&config, &cli.config, &storage).await?;
            match source {
                Source::Snapshot(updated_at) => {
                    log::info!("Active catalog: snapshot ({} sites)", sites.len());
                    log::info!("Last updated: {}", updated_at);
                }
                Source::Seed => log::info!("Active catalog: seed ({} sites)", sites.len()),
            }
        }
    }

    Ok(())
}
