//! Pipeline orchestration.
//!
//! One run goes through these stages:
//!
//! 1. **Fetch**: copy each category's remote file into the staging directory
//! 2. **Normalize**: load and normalize every category that has an input file
//! 3. **Assemble**: concatenate category rows; an empty result is fatal
//! 4. **Write**: serialize the combined feed into the output directory
//! 5. **Publish**: upload every file in the output directory, best effort
//!
//! Only directory creation, assembly, and the feed write can fail a run.
//! Everything else is logged and recorded in the [`RunReport`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use feed_ingest::{CategoryFile, CategoryInput, IngestError, read_source_table, resolve_inputs};
use feed_model::{CanonicalRow, Category};
use feed_output::{CombinedFeed, FEED_FILE_NAME, OutputError, content_type_for, write_feed};
use feed_transform::normalize_table;
use thiserror::Error;
use tracing::{info, info_span, warn};

use crate::collaborators::{ArtifactSink, FileSource};
use crate::config::FeedConfig;
use crate::report::{CategoryReport, CategoryStatus, FetchStatus, PublishOutcome, RunReport};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub struct Pipeline {
    config: FeedConfig,
    layout: Vec<CategoryFile>,
    overrides: BTreeMap<Category, PathBuf>,
    source: Option<Box<dyn FileSource>>,
    sink: Option<Box<dyn ArtifactSink>>,
}

impl Pipeline {
    pub fn new(
        config: FeedConfig,
        source: Option<Box<dyn FileSource>>,
        sink: Option<Box<dyn ArtifactSink>>,
    ) -> Self {
        Self {
            config,
            layout: CategoryFile::default_layout(),
            overrides: BTreeMap::new(),
            source,
            sink,
        }
    }

    /// Reads these categories from the given paths instead of the staging
    /// directory. They are not fetched.
    #[must_use]
    pub fn with_overrides(mut self, overrides: BTreeMap<Category, PathBuf>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Output file written by [`Pipeline::run`].
    pub fn output_path(&self) -> PathBuf {
        self.config.output_dir.join(FEED_FILE_NAME)
    }

    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let started = Instant::now();
        let span = info_span!(
            "run",
            output_dir = %self.config.output_dir.display(),
            staging_dir = %self.config.staging_dir.display()
        );
        let _guard = span.enter();

        create_dir(&self.config.output_dir)?;
        create_dir(&self.config.staging_dir)?;

        let mut fetched = self.fetch_inputs();
        let inputs = resolve_inputs(&self.layout, &self.config.staging_dir, &self.overrides);

        let mut categories = Vec::with_capacity(inputs.len());
        let mut parts: Vec<(Category, Vec<CanonicalRow>)> = Vec::new();
        for input in inputs {
            let fetch = fetched
                .remove(&input.category)
                .unwrap_or(FetchStatus::NotAttempted);
            let (status, rows) = self.process_category(&input);
            if let Some(rows) = rows {
                parts.push((input.category, rows));
            }
            categories.push(CategoryReport {
                category: input.category,
                path: input.path,
                fetch,
                status,
            });
        }

        let feed = CombinedFeed::assemble(parts)?;
        let output_path = self.output_path();
        write_feed(&output_path, &feed)?;

        let publish = self.publish();

        let report = RunReport {
            categories,
            output_path,
            rows: feed.len(),
            currency: self.config.options.pricing.target_currency.clone(),
            publish,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            finished_at: Utc::now(),
        };
        info!(
            rows = report.rows,
            categories = report.processed(),
            duration_ms = report.duration_ms,
            "feed run complete"
        );
        Ok(report)
    }

    fn fetch_inputs(&self) -> BTreeMap<Category, FetchStatus> {
        let mut statuses = BTreeMap::new();
        let Some(source) = &self.source else {
            if self.config.ftp.is_some() {
                warn!("remote credentials configured but no file source; using staged files");
            } else {
                info!("no file source configured; using staged files");
            }
            return statuses;
        };
        let span = info_span!("fetch", source = %source.describe());
        let _guard = span.enter();

        for file in &self.layout {
            if self.overrides.contains_key(&file.category) {
                continue;
            }
            let staged = file.staged_path(&self.config.staging_dir);
            let failure = match source.fetch(&file.remote_name) {
                Ok(bytes) => match fs::write(&staged, &bytes) {
                    Ok(()) => {
                        info!(
                            category = %file.category,
                            remote = %file.remote_name,
                            path = %staged.display(),
                            bytes = bytes.len(),
                            "downloaded input file"
                        );
                        statuses.insert(file.category, FetchStatus::Fetched { bytes: bytes.len() });
                        continue;
                    }
                    Err(error) => {
                        warn!(path = %staged.display(), %error, "failed to stage input file");
                        format!("{}: {error}", staged.display())
                    }
                },
                Err(error) => {
                    warn!(category = %file.category, %error, "failed to download input file");
                    error.to_string()
                }
            };
            let stale_input_secs = staged_age_secs(&staged);
            if let Some(age_secs) = stale_input_secs {
                warn!(
                    category = %file.category,
                    path = %staged.display(),
                    age_secs,
                    "using previously staged file"
                );
            }
            let status = FetchStatus::Failed {
                message: failure,
                stale_input_secs,
            };
            statuses.insert(file.category, status);
        }
        statuses
    }

    fn process_category(&self, input: &CategoryInput) -> (CategoryStatus, Option<Vec<CanonicalRow>>) {
        let span = info_span!("category", category = %input.category);
        let _guard = span.enter();

        let table = match read_source_table(&input.path) {
            Ok(table) => table,
            Err(IngestError::FileNotFound { path }) => {
                warn!(path = %path.display(), "missing input file; skipping category");
                return (CategoryStatus::Missing, None);
            }
            Err(error) => {
                warn!(path = %input.path.display(), %error, "failed to load input file; skipping category");
                return (
                    CategoryStatus::Failed {
                        message: error.to_string(),
                    },
                    None,
                );
            }
        };

        let normalized = normalize_table(&table, input.category, &self.config.options);
        let status = CategoryStatus::Processed {
            rows: normalized.rows.len(),
            missing_identifiers: normalized.missing_identifiers,
            prices: normalized.summary,
        };
        (status, Some(normalized.rows))
    }

    fn publish(&self) -> PublishOutcome {
        let Some(bucket) = &self.config.bucket else {
            info!("skipping upload: BUCKET_NAME or BUCKET_FOLDER not set");
            return PublishOutcome::Skipped {
                reason: "BUCKET_NAME or BUCKET_FOLDER not set".to_string(),
            };
        };
        let Some(sink) = &self.sink else {
            info!("skipping upload: no artifact sink configured");
            return PublishOutcome::Skipped {
                reason: "no artifact sink configured".to_string(),
            };
        };
        let span = info_span!("publish", bucket = %bucket.name, sink = %sink.describe());
        let _guard = span.enter();

        let files = match list_files(&self.config.output_dir) {
            Ok(files) => files,
            Err(error) => {
                warn!(dir = %self.config.output_dir.display(), %error, "failed to list output directory");
                return PublishOutcome::Failed {
                    message: error.to_string(),
                };
            }
        };

        let mut uploaded = Vec::new();
        let mut failed = Vec::new();
        for path in files {
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let destination = bucket.destination(file_name);
            let result = fs::read(&path)
                .map_err(|error| error.to_string())
                .and_then(|bytes| {
                    sink.upload(&bucket.name, &destination, &bytes, content_type_for(&path))
                        .map_err(|error| error.to_string())
                });
            match result {
                Ok(()) => {
                    info!(file = file_name, destination = %destination, "uploaded file");
                    uploaded.push(destination);
                }
                Err(error) => {
                    warn!(file = file_name, destination = %destination, %error, "upload failed");
                    failed.push(destination);
                }
            }
        }

        PublishOutcome::Published {
            bucket: bucket.name.clone(),
            uploaded,
            failed,
        }
    }
}

fn create_dir(path: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(path).map_err(|source| PipelineError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Age of a file already staged at `path`, or `None` when there is none.
fn staged_age_secs(path: &Path) -> Option<u64> {
    let metadata = fs::metadata(path).ok().filter(fs::Metadata::is_file)?;
    let age = metadata
        .modified()
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .unwrap_or_default();
    Some(age.as_secs())
}

/// Regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
