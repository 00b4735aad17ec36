//! End-to-end pipeline runs over temporary directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use feed_cli::collaborators::{
    ArtifactSink, DirectorySink, DirectorySource, FileSource, SinkError,
};
use feed_cli::config::{BucketTarget, FeedConfig};
use feed_cli::pipeline::{Pipeline, PipelineError};
use feed_cli::report::{CategoryStatus, FetchStatus, PublishOutcome};
use feed_model::{Category, ZeroPricePolicy};
use feed_output::{FEED_FILE_NAME, OutputError, read_feed};
use tempfile::TempDir;

const NATURAL_CSV: &str = "ReportNo,shape,carats,col,clar,lab,markupPrice,markupCurrency,image\n\
                           1111,ROUND,1.01,F,VS2,GIA,1000,,\n";

const GEMSTONE_CSV: &str = "ReportNo,shape,Color,gemType,carats,Clarity,Cut,Lab,markupPrice\n\
                            G-1,oval,Blue,Sapphire,2.1,VS,Mixed,GRS,\n";

struct Dirs {
    _root: TempDir,
    staging: std::path::PathBuf,
    output: std::path::PathBuf,
    remote: std::path::PathBuf,
    bucket_root: std::path::PathBuf,
}

fn dirs() -> Dirs {
    let root = TempDir::new().unwrap();
    let dirs = Dirs {
        staging: root.path().join("ftp"),
        output: root.path().join("output"),
        remote: root.path().join("remote"),
        bucket_root: root.path().join("buckets"),
        _root: root,
    };
    fs::create_dir_all(&dirs.remote).unwrap();
    dirs
}

fn config(dirs: &Dirs) -> FeedConfig {
    FeedConfig {
        output_dir: dirs.output.clone(),
        staging_dir: dirs.staging.clone(),
        ..FeedConfig::default()
    }
}

fn stage(dir: &Path, name: &str, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

fn read_output(dirs: &Dirs) -> Vec<feed_model::CanonicalRow> {
    read_feed(fs::File::open(dirs.output.join(FEED_FILE_NAME)).unwrap()).unwrap()
}

#[test]
fn no_inputs_is_fatal_and_writes_nothing() {
    let dirs = dirs();

    let err = Pipeline::new(config(&dirs), None, None).run().unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Output(OutputError::NoInputProcessed)
    ));
    assert_eq!(
        err.to_string(),
        "no input files were processed; combined feed not created"
    );
    assert!(!dirs.output.join(FEED_FILE_NAME).exists());
}

#[test]
fn staged_natural_file_produces_converted_row() {
    let dirs = dirs();
    stage(&dirs.staging, "Natural.csv", NATURAL_CSV);

    let report = Pipeline::new(config(&dirs), None, None).run().unwrap();

    assert_eq!(report.rows, 1);
    assert_eq!(report.processed(), 1);
    assert_eq!(report.categories[0].category, Category::Natural);
    assert_eq!(report.categories[1].status, CategoryStatus::Missing);
    assert_eq!(report.categories[2].status, CategoryStatus::Missing);

    let rows = read_output(&dirs);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "1111CA");
    assert_eq!(rows[0].price, "1410.00 CAD");
    assert_eq!(
        rows[0].image_link,
        "https://storage.googleapis.com/sitemaps.leeladiamond.com/shapes/ROUND.png"
    );
}

#[test]
fn fetches_from_source_then_processes_in_category_order() {
    let dirs = dirs();
    stage(&dirs.remote, "Leela Diamond_gemstones.csv", GEMSTONE_CSV);
    stage(&dirs.remote, "Leela Diamond_natural.csv", NATURAL_CSV);
    let source: Box<dyn FileSource> = Box::new(DirectorySource::new(&dirs.remote));

    let report = Pipeline::new(config(&dirs), Some(source), None)
        .run()
        .unwrap();

    assert!(dirs.staging.join("Natural.csv").exists());
    assert!(dirs.staging.join("gemstones.csv").exists());
    assert!(matches!(
        report.categories[0].fetch,
        FetchStatus::Fetched { .. }
    ));
    assert!(matches!(
        report.categories[1].fetch,
        FetchStatus::Failed { .. }
    ));
    assert_eq!(report.categories[1].status, CategoryStatus::Missing);

    let ids: Vec<String> = read_output(&dirs).into_iter().map(|row| row.id).collect();
    assert_eq!(ids, vec!["1111CA", "G-1CA"]);
}

#[test]
fn failed_fetch_reports_previously_staged_file() {
    let dirs = dirs();
    stage(&dirs.remote, "Leela Diamond_natural.csv", NATURAL_CSV);
    stage(&dirs.staging, "gemstones.csv", GEMSTONE_CSV);
    let source: Box<dyn FileSource> = Box::new(DirectorySource::new(&dirs.remote));

    let report = Pipeline::new(config(&dirs), Some(source), None)
        .run()
        .unwrap();

    let FetchStatus::Failed {
        stale_input_secs, ..
    } = &report.categories[2].fetch
    else {
        panic!("expected failed fetch, got {:?}", report.categories[2].fetch);
    };
    assert!(stale_input_secs.is_some());
    assert!(matches!(
        report.categories[2].status,
        CategoryStatus::Processed { rows: 1, .. }
    ));
    assert!(matches!(
        report.categories[1].fetch,
        FetchStatus::Failed {
            stale_input_secs: None,
            ..
        }
    ));
}

#[test]
fn unparseable_category_is_skipped() {
    let dirs = dirs();
    stage(&dirs.staging, "Natural.csv", NATURAL_CSV);
    stage(&dirs.staging, "Labgrown.csv", "");

    let report = Pipeline::new(config(&dirs), None, None).run().unwrap();

    assert!(matches!(
        report.categories[1].status,
        CategoryStatus::Failed { .. }
    ));
    assert_eq!(report.rows, 1);
}

#[test]
fn input_overrides_replace_staged_paths() {
    let dirs = dirs();
    stage(&dirs.remote, "lab.csv", "stockId,shape,carats,cut,clar,lab,markupPrice,markupCurrency\n\
                                    LG-1,Pear,1.50,Very Good,VS1,IGI,500,CAD\n");
    let overrides = BTreeMap::from([(Category::LabGrown, dirs.remote.join("lab.csv"))]);

    let report = Pipeline::new(config(&dirs), None, None)
        .with_overrides(overrides)
        .run()
        .unwrap();

    assert_eq!(report.categories[1].path, dirs.remote.join("lab.csv"));
    let rows = read_output(&dirs);
    assert_eq!(rows[0].id, "LG-1CA");
    assert_eq!(rows[0].price, "500.00 CAD");
    assert_eq!(
        rows[0].link,
        "https://leeladiamond.com/pages/lab-grown-diamonds/pear-1-50-carat-very-good-vs1-clarity-igi-certified-LG-1"
    );
}

#[test]
fn zero_price_policy_drop_removes_unpriced_rows() {
    let dirs = dirs();
    stage(&dirs.staging, "Natural.csv", NATURAL_CSV);
    stage(&dirs.staging, "gemstones.csv", GEMSTONE_CSV);
    let mut config = config(&dirs);
    config.options.zero_price = ZeroPricePolicy::Drop;

    let report = Pipeline::new(config, None, None).run().unwrap();

    assert_eq!(report.rows, 1);
    let gemstone = report.categories[2].prices().unwrap();
    assert_eq!(gemstone.dropped, 1);
}

#[test]
fn publish_skipped_without_bucket() {
    let dirs = dirs();
    stage(&dirs.staging, "Natural.csv", NATURAL_CSV);
    let sink: Box<dyn ArtifactSink> = Box::new(DirectorySink::new(&dirs.bucket_root));

    let report = Pipeline::new(config(&dirs), None, Some(sink)).run().unwrap();

    assert!(matches!(report.publish, PublishOutcome::Skipped { .. }));
    assert!(!dirs.bucket_root.exists());
}

#[test]
fn publishes_every_output_file() {
    let dirs = dirs();
    stage(&dirs.staging, "Natural.csv", NATURAL_CSV);
    stage(&dirs.output, "notes.txt", "extra");
    let mut config = config(&dirs);
    config.bucket = Some(BucketTarget {
        name: "sitemaps".to_string(),
        folder: "Googlefinal/".to_string(),
    });
    let sink: Box<dyn ArtifactSink> = Box::new(DirectorySink::new(&dirs.bucket_root));

    let report = Pipeline::new(config, None, Some(sink)).run().unwrap();

    let PublishOutcome::Published {
        uploaded, failed, ..
    } = &report.publish
    else {
        panic!("expected publish, got {:?}", report.publish);
    };
    assert_eq!(
        uploaded,
        &vec![
            format!("Googlefinal/{FEED_FILE_NAME}"),
            "Googlefinal/notes.txt".to_string(),
        ]
    );
    assert!(failed.is_empty());
    let published = dirs
        .bucket_root
        .join("sitemaps/Googlefinal")
        .join(FEED_FILE_NAME);
    assert_eq!(
        fs::read(published).unwrap(),
        fs::read(dirs.output.join(FEED_FILE_NAME)).unwrap()
    );
}

/// Records content types and rejects one file.
struct RecordingSink {
    calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl ArtifactSink for RecordingSink {
    fn describe(&self) -> String {
        "recording".to_string()
    }

    fn upload(
        &self,
        _bucket: &str,
        destination: &str,
        _bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), SinkError> {
        if destination.ends_with("broken.txt") {
            return Err(SinkError::InvalidDestination {
                destination: destination.to_string(),
            });
        }
        self.calls
            .lock()
            .unwrap()
            .push((destination.to_string(), content_type.map(str::to_string)));
        Ok(())
    }
}

#[test]
fn upload_failures_do_not_fail_the_run() {
    let dirs = dirs();
    stage(&dirs.staging, "Natural.csv", NATURAL_CSV);
    stage(&dirs.output, "broken.txt", "x");
    let mut config = config(&dirs);
    config.bucket = Some(BucketTarget {
        name: "b".to_string(),
        folder: "f".to_string(),
    });
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink: Box<dyn ArtifactSink> = Box::new(RecordingSink {
        calls: Arc::clone(&calls),
    });

    let report = Pipeline::new(config, None, Some(sink)).run().unwrap();

    let PublishOutcome::Published {
        uploaded, failed, ..
    } = &report.publish
    else {
        panic!("expected publish, got {:?}", report.publish);
    };
    assert_eq!(failed, &vec!["f/broken.txt".to_string()]);
    assert_eq!(uploaded.len(), 1);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![(
            format!("f/{FEED_FILE_NAME}"),
            Some("text/csv".to_string())
        )]
    );
}
