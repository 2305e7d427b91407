//! Catalog builder.
//!
//! Walks a directory tree, keeps the qualifying video files, classifies
//! each one by filename and looks the movies up with a
//! [`MetadataProvider`]. Lookups run concurrently, bounded by a semaphore;
//! results are collected in discovery order.
//!
//! Per-file failures never abort a run: non-movies and failed lookups end
//! up in the two lists of the returned [`IndexReport`].

pub mod classifier;

use anyhow::{bail, Context, Result};
use movielst_common::{
    paths::{extension_of, is_qualifying},
    FetchError, IndexReport, MediaFile, MetadataRecord,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::metadata::MetadataProvider;

pub use classifier::{Classifier, ReleaseClassifier};

/// In-flight lookups when no concurrency is configured.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Builds a catalog for one directory tree per call.
///
/// Holds no per-run state, so one builder can serve repeated runs.
pub struct CatalogBuilder {
    classifier: Arc<dyn Classifier>,
    provider: Arc<dyn MetadataProvider>,
    concurrency: usize,
}

impl CatalogBuilder {
    pub fn new(classifier: Arc<dyn Classifier>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            classifier,
            provider,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Cap the number of concurrent metadata lookups (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Index every qualifying file under `root`.
    ///
    /// The caller is responsible for checking that `root` is a directory.
    /// Fails before touching the tree when the provider is not usable.
    pub async fn build(&self, root: &Path) -> Result<IndexReport> {
        let provider_name = self.provider.name();
        if !self.provider.is_available() {
            bail!("Metadata provider `{provider_name}` is not available; check its credentials");
        }
        info!(root = %root.display(), provider = provider_name, "Indexing directory");

        let walk_root = root.to_path_buf();
        let files = tokio::task::spawn_blocking(move || discover(&walk_root))
            .await
            .context("directory walk task failed")?;

        let mut report = IndexReport {
            qualifying: files.len(),
            ..IndexReport::default()
        };

        // --- Classification + parallel fetch phase ---
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut fetches: Vec<(String, JoinHandle<Result<MetadataRecord, FetchError>>)> =
            Vec::new();

        for file in files {
            let guess = self.classifier.classify(&file.file_name);
            if !guess.is_movie() {
                debug!(file = %file.file_name, "Not a movie");
                report.non_movies.push(file.file_name);
                continue;
            }

            let sem = semaphore.clone();
            let provider = self.provider.clone();
            let handle = tokio::spawn(async move {
                let _permit = sem
                    .acquire_owned()
                    .await
                    .map_err(|e| FetchError::Transport(e.to_string()))?;
                provider.fetch_movie(&guess.title, guess.year).await
            });
            fetches.push((file.file_name, handle));
        }

        // --- Collect in discovery order ---
        for (file_name, handle) in fetches {
            match handle.await {
                Ok(Ok(record)) => {
                    debug!(file = %file_name, title = %record.title, "Metadata found");
                    report.catalog.push(record);
                }
                Ok(Err(e)) if e.is_not_found() => {
                    info!(file = %file_name, "No metadata match");
                    report.not_found.push(file_name);
                }
                Ok(Err(e)) => {
                    warn!(file = %file_name, error = %e, "Metadata lookup failed");
                    report.service_errors += 1;
                    report.not_found.push(file_name);
                }
                Err(e) => {
                    warn!(file = %file_name, error = %e, "Metadata task panicked");
                    report.service_errors += 1;
                    report.not_found.push(file_name);
                }
            }
        }

        info!(
            qualifying = report.qualifying,
            movies = report.catalog.len(),
            not_found = report.not_found.len(),
            non_movies = report.non_movies.len(),
            "Index complete"
        );
        Ok(report)
    }
}

/// Every qualifying file under `root`, in sorted walk order.
///
/// Unreadable entries are logged and skipped.
pub fn discover(root: &Path) -> Vec<MediaFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                warn!(file = %entry.path().display(), error = %e, "Cannot stat file");
                continue;
            }
        };

        if !is_qualifying(entry.path(), size) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let extension = extension_of(&file_name).unwrap_or_default().to_string();
        files.push(MediaFile {
            path: entry.path().to_path_buf(),
            file_name,
            size,
            extension,
        });
    }

    files
}
