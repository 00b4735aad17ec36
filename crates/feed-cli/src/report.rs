//! Outcome of a pipeline run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use feed_model::{Category, ResolutionSummary};
use serde::Serialize;

/// What happened when pulling a category's file from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    /// No source configured, or the input path was given explicitly.
    NotAttempted,
    Fetched {
        bytes: usize,
    },
    Failed {
        message: String,
        /// Age in seconds of the file left in the staging directory by an
        /// earlier run, which is processed in place of the fresh download.
        stale_input_secs: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryStatus {
    Processed {
        rows: usize,
        missing_identifiers: usize,
        prices: ResolutionSummary,
    },
    /// Input file absent; the category was skipped.
    Missing,
    /// Input file present but unreadable; the category was skipped.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub path: PathBuf,
    pub fetch: FetchStatus,
    pub status: CategoryStatus,
}

impl CategoryReport {
    pub fn rows(&self) -> usize {
        match &self.status {
            CategoryStatus::Processed { rows, .. } => *rows,
            CategoryStatus::Missing | CategoryStatus::Failed { .. } => 0,
        }
    }

    pub fn prices(&self) -> Option<&ResolutionSummary> {
        match &self.status {
            CategoryStatus::Processed { prices, .. } => Some(prices),
            CategoryStatus::Missing | CategoryStatus::Failed { .. } => None,
        }
    }
}

/// Result of publishing the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    Skipped {
        reason: String,
    },
    Published {
        bucket: String,
        uploaded: Vec<String>,
        failed: Vec<String>,
    },
    /// The output directory could not be listed.
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub categories: Vec<CategoryReport>,
    pub output_path: PathBuf,
    pub rows: usize,
    /// Currency of every price in the feed.
    pub currency: String,
    pub publish: PublishOutcome,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Categories that contributed to the feed.
    pub fn processed(&self) -> usize {
        self.categories
            .iter()
            .filter(|report| matches!(report.status, CategoryStatus::Processed { .. }))
            .count()
    }

    /// One-line outcome for status bodies.
    pub fn message(&self) -> String {
        format!(
            "wrote {} rows from {} of {} categories to {}",
            self.rows,
            self.processed(),
            self.categories.len(),
            self.output_path.display()
        )
    }
}

/// `{"status": ..., "message": ...}` body reported by the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    pub message: String,
}

impl StatusBody {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: CategoryStatus) -> CategoryReport {
        CategoryReport {
            category: Category::Natural,
            path: PathBuf::from("/tmp/ftp/Natural.csv"),
            fetch: FetchStatus::NotAttempted,
            status,
        }
    }

    #[test]
    fn skipped_categories_have_no_rows() {
        assert_eq!(report(CategoryStatus::Missing).rows(), 0);
        assert!(report(CategoryStatus::Missing).prices().is_none());
        let processed = report(CategoryStatus::Processed {
            rows: 4,
            missing_identifiers: 0,
            prices: ResolutionSummary::default(),
        });
        assert_eq!(processed.rows(), 4);
    }

    #[test]
    fn serializes_with_status_tags() {
        let value = serde_json::to_value(report(CategoryStatus::Failed {
            message: "bad csv".into(),
        }))
        .unwrap();
        assert_eq!(value["category"], "natural");
        assert_eq!(value["status"]["status"], "failed");
        assert_eq!(value["fetch"]["status"], "not_attempted");

        let failed = serde_json::to_value(FetchStatus::Failed {
            message: "timeout".into(),
            stale_input_secs: Some(90),
        })
        .unwrap();
        assert_eq!(failed["status"], "failed");
        assert_eq!(failed["stale_input_secs"], 90);
    }

    #[test]
    fn status_body_shape() {
        let body = serde_json::to_string(&StatusBody::error("boom")).unwrap();
        assert_eq!(body, r#"{"status":"error","message":"boom"}"#);
    }
}
