//! Checks on a finished output directory.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Error, Store};

/// Files every successful run writes, one per page.
pub const PAGE_FILES: [&str; 3] = ["faq.json", "product_page.json", "comparison_page.json"];

/// Run report written alongside the pages.
pub const REPORT_FILE: &str = "workflow_report.json";

/// An FAQ page below this many questions fails validation.
pub const MIN_FAQ_QUESTIONS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCheck {
  pub file: String,
  pub exists: bool,
}

/// Outcome of [`validate_outputs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
  pub files: Vec<FileCheck>,
  /// `content.total_questions` of the FAQ page, when it could be read.
  pub faq_questions: Option<u64>,
  /// Human-readable problems found. Empty means the outputs are valid.
  pub problems: Vec<String>,
}

impl ValidationReport {
  pub fn is_valid(&self) -> bool {
    self.problems.is_empty()
  }
}

/// Check that every page file exists and the FAQ page carries enough
/// questions.
///
/// Missing or malformed pages are reported as problems; only storage
/// failures other than `NotFound` are returned as errors.
pub async fn validate_outputs(store: &dyn Store) -> Result<ValidationReport, Error> {
  let mut files = Vec::with_capacity(PAGE_FILES.len());
  let mut problems = Vec::new();

  for file in PAGE_FILES {
    let exists = store.exists(file).await?;
    if !exists {
      problems.push(format!("missing page file '{file}'"));
    }
    files.push(FileCheck {
      file: file.to_string(),
      exists,
    });
  }

  let faq_questions = match store.get(PAGE_FILES[0]).await {
    Ok(page) => page["content"]["total_questions"].as_u64(),
    Err(Error::NotFound(_)) => None,
    Err(Error::InvalidJson { key, .. }) => {
      problems.push(format!("page file '{key}' is not valid JSON"));
      None
    }
    Err(e) => return Err(e),
  };

  match faq_questions {
    Some(n) if n < MIN_FAQ_QUESTIONS => problems.push(format!(
      "faq has {n} questions, expected at least {MIN_FAQ_QUESTIONS}"
    )),
    None if files[0].exists => problems.push("faq page has no question count".to_string()),
    _ => {}
  }

  if problems.is_empty() {
    info!(faq_questions, "outputs_valid");
  } else {
    warn!(problems = problems.len(), "outputs_invalid");
  }

  Ok(ValidationReport {
    files,
    faq_questions,
    problems,
  })
}

/// Delete page files a run did not produce, so an earlier run's pages are
/// not mistaken for this one's. Returns the files removed.
pub async fn remove_stale_pages(
  store: &dyn Store,
  produced: &[String],
) -> Result<Vec<String>, Error> {
  let mut removed = Vec::new();

  for file in PAGE_FILES {
    if produced.iter().any(|p| p == file) {
      continue;
    }
    match store.delete(file).await {
      Ok(()) => {
        debug!(file, "stale_page_removed");
        removed.push(file.to_string());
      }
      Err(Error::NotFound(_)) => {}
      Err(e) => return Err(e),
    }
  }

  Ok(removed)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::FsStore;
  use serde_json::json;

  async fn write_pages(store: &FsStore, total_questions: u64) {
    let faq = json!({"page_type": "faq", "content": {"total_questions": total_questions}});
    store.put("faq.json", &faq).await.unwrap();
    store.put("product_page.json", &json!({"page_type": "product_page"})).await.unwrap();
    store.put("comparison_page.json", &json!({"page_type": "comparison_page"})).await.unwrap();
  }

  #[tokio::test]
  async fn test_complete_outputs_are_valid() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    write_pages(&store, 15).await;

    let report = validate_outputs(&store).await.unwrap();

    assert!(report.is_valid(), "{:?}", report.problems);
    assert_eq!(report.faq_questions, Some(15));
    assert!(report.files.iter().all(|f| f.exists));
  }

  #[tokio::test]
  async fn test_too_few_questions() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    write_pages(&store, 4).await;

    let report = validate_outputs(&store).await.unwrap();

    assert!(!report.is_valid());
    assert_eq!(report.problems, ["faq has 4 questions, expected at least 5"]);
  }

  #[tokio::test]
  async fn test_missing_files_are_listed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    store.put("product_page.json", &json!({})).await.unwrap();

    let report = validate_outputs(&store).await.unwrap();

    assert_eq!(
      report.problems,
      ["missing page file 'faq.json'", "missing page file 'comparison_page.json'"]
    );
    assert_eq!(report.faq_questions, None);
  }

  #[tokio::test]
  async fn test_malformed_faq() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("faq.json"), "not json").unwrap();
    let store = FsStore::new(dir.path());
    store.put("product_page.json", &json!({})).await.unwrap();
    store.put("comparison_page.json", &json!({})).await.unwrap();

    let report = validate_outputs(&store).await.unwrap();

    assert_eq!(
      report.problems,
      ["page file 'faq.json' is not valid JSON", "faq page has no question count"]
    );
  }

  #[tokio::test]
  async fn test_stale_pages_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    write_pages(&store, 15).await;

    let produced = vec!["product_page.json".to_string()];
    let removed = remove_stale_pages(&store, &produced).await.unwrap();

    assert_eq!(removed, ["faq.json", "comparison_page.json"]);
    assert!(store.exists("product_page.json").await.unwrap());

    let report = validate_outputs(&store).await.unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.files.iter().filter(|f| f.exists).count(), 1);
  }

  #[tokio::test]
  async fn test_removing_pages_that_never_existed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    let removed = remove_stale_pages(&store, &[]).await.unwrap();

    assert!(removed.is_empty());
  }
}
