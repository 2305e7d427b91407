mod cli;

use movielst::{
    config,
    metadata::OmdbProvider,
    report::{self, Order, View},
    scanner::{CatalogBuilder, ReleaseClassifier},
    store::CatalogStore,
};
use movielst_common::{Catalog, IndexReport};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::runtime::Runtime;

const NOT_INDEXED_HINT: &str = "Run `movielst index PATH` to index your movies directory.";

/// Conventional exit status after SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "movielst=debug,movielst_common=debug".to_string()
        } else {
            "movielst=info,movielst_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Index { path } => index(&path, config_path),
        Commands::Report {
            view,
            ascending,
            descending,
        } => {
            let order = if ascending {
                Order::Ascending
            } else if descending {
                Order::Descending
            } else {
                view.default_order()
            };
            show_report(config_path, view, order)
        }
        Commands::Export { file } => export(&file, config_path),
        Commands::InitConfig { path } => init_config(path),
    }
}

fn index(root: &Path, config_path: Option<&Path>) -> Result<ExitCode> {
    if !root.is_dir() {
        eprintln!("Directory does not exist. Please pass a valid directory containing movies.");
        return Ok(ExitCode::FAILURE);
    }

    let config = config::load_config_or_default(config_path)?;
    config.validate_for_index()?;

    let provider = Arc::new(OmdbProvider::new(&config.omdb)?);
    let builder = CatalogBuilder::new(Arc::new(ReleaseClassifier::new()), provider)
        .with_concurrency(config.index.concurrency);
    let store = CatalogStore::new(&config.index.location);

    println!("Indexing all movies inside {}", root.display());

    let rt = Runtime::new()?;
    let Some(report) = run_interruptible(rt, builder.build(root), interrupted()) else {
        eprintln!("Interrupted; the stored catalog was left unchanged.");
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    };
    let report = report?;

    store
        .save(&report.catalog)
        .with_context(|| format!("Failed to save catalog to {:?}", store.path()))?;

    print_summary(&report, store.path());
    Ok(ExitCode::SUCCESS)
}

/// Drive `work` on `rt` unless `interrupt` resolves first.
///
/// An interrupted runtime is shut down in the background, so a blocking
/// directory walk still in progress does not delay the exit.
fn run_interruptible<T>(
    rt: Runtime,
    work: impl Future<Output = T>,
    interrupt: impl Future<Output = ()>,
) -> Option<T> {
    let outcome = rt.block_on(async {
        tokio::select! {
            value = work => Some(value),
            _ = interrupt => None,
        }
    });

    if outcome.is_none() {
        rt.shutdown_background();
    }
    outcome
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn print_summary(report: &IndexReport, location: &Path) {
    if report.found_nothing() {
        println!("Given directory does not contain movies. Pass a directory containing movies.");
        return;
    }

    if !report.not_found.is_empty() {
        println!("\nData for the following movie(s) could not be fetched -");
        for name in &report.not_found {
            println!("  {}", name);
        }
        if report.service_errors > 0 {
            println!(
                "({} of these failed because of service errors; re-run later to retry)",
                report.service_errors
            );
        }
    }

    if !report.non_movies.is_empty() {
        println!("\nThe following media in the folder is not movie type -");
        for name in &report.non_movies {
            println!("  {}", name);
        }
    }

    println!(
        "\nIndexed {} movie(s) into {}",
        report.catalog.len(),
        location.display()
    );
    println!("Run `movielst report` to see them.");
}

/// Load the catalog, or print the first-run hint when there is none.
fn load_catalog(config_path: Option<&Path>) -> Result<Option<Catalog>> {
    let config = config::load_config_or_default(config_path)?;

    match CatalogStore::new(&config.index.location).load() {
        Ok(catalog) => Ok(Some(catalog)),
        Err(e) if e.is_not_indexed() => {
            eprintln!("{}", NOT_INDEXED_HINT);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn show_report(config_path: Option<&Path>, view: View, order: Order) -> Result<ExitCode> {
    let Some(catalog) = load_catalog(config_path)? else {
        return Ok(ExitCode::FAILURE);
    };

    let report = report::build(&catalog, view, order);
    println!("{}", report::render(&report));
    Ok(ExitCode::SUCCESS)
}

fn export(file: &Path, config_path: Option<&Path>) -> Result<ExitCode> {
    let Some(catalog) = load_catalog(config_path)? else {
        return Ok(ExitCode::FAILURE);
    };

    let report = report::build(&catalog, View::Default, Order::Ascending);
    let out = std::fs::File::create(file)
        .with_context(|| format!("Failed to create export file: {:?}", file))?;
    report::export::write_csv(&report, std::io::BufWriter::new(out))?;

    println!("Exported {} movie(s) to {}", report.rows.len(), file.display());
    Ok(ExitCode::SUCCESS)
}

fn init_config(path: Option<PathBuf>) -> Result<ExitCode> {
    let path = path.unwrap_or_else(config::default_config_path);
    config::persist::save_config(&path, &config::Config::default())?;
    println!("Wrote default configuration to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn interrupt_does_not_wait_for_blocking_walk() {
        let rt = Runtime::new().unwrap();
        let started = Instant::now();
        let walk = async {
            tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_secs(30))).await
        };

        let outcome = run_interruptible(rt, walk, async {});

        assert!(outcome.is_none());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn uninterrupted_work_returns_its_value() {
        let rt = Runtime::new().unwrap();
        let outcome = run_interruptible(rt, async { 42 }, std::future::pending());
        assert_eq!(outcome, Some(42));
    }
}
