use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::{Error, Store};

/// Filesystem-based document store.
///
/// Each document is stored as pretty-printed UTF-8 JSON at
/// `{base_path}/{key}`. Parent directories are created automatically.
pub struct FsStore {
  base_path: PathBuf,
}

impl FsStore {
  /// Create a new filesystem store with the given base path.
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  pub fn base_path(&self) -> &Path {
    &self.base_path
  }

  /// Path a key is stored at.
  pub fn key_to_path(&self, key: &str) -> PathBuf {
    self.base_path.join(key)
  }
}

fn not_found_or_io(key: &str, e: std::io::Error) -> Error {
  if e.kind() == ErrorKind::NotFound {
    Error::NotFound(key.to_string())
  } else {
    Error::Io(e)
  }
}

#[async_trait]
impl Store for FsStore {
  async fn get(&self, key: &str) -> Result<Value, Error> {
    let path = self.key_to_path(key);
    let content = fs::read(&path).await.map_err(|e| not_found_or_io(key, e))?;
    serde_json::from_slice(&content).map_err(|source| Error::InvalidJson {
      key: key.to_string(),
      source,
    })
  }

  async fn put(&self, key: &str, document: &Value) -> Result<(), Error> {
    let path = self.key_to_path(key);

    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).await?;
    }

    let mut content = serde_json::to_vec_pretty(document).map_err(|source| Error::InvalidJson {
      key: key.to_string(),
      source,
    })?;
    content.push(b'\n');

    fs::write(&path, content).await?;
    debug!(path = %path.display(), "document_written");
    Ok(())
  }

  async fn exists(&self, key: &str) -> Result<bool, Error> {
    Ok(fs::try_exists(self.key_to_path(key)).await?)
  }

  async fn delete(&self, key: &str) -> Result<(), Error> {
    let path = self.key_to_path(key);
    fs::remove_file(&path).await.map_err(|e| not_found_or_io(key, e))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[tokio::test]
  async fn test_put_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.put("pages/faq.json", &json!({"title": "FAQ", "price": "₹699"})).await.unwrap();

    let document = store.get("pages/faq.json").await.unwrap();
    assert_eq!(document["price"], "₹699");
    assert!(store.exists("pages/faq.json").await.unwrap());
  }

  #[tokio::test]
  async fn test_writes_pretty_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.put("p.json", &json!({"price": "₹699"})).await.unwrap();

    let text = std::fs::read_to_string(dir.path().join("p.json")).unwrap();
    assert_eq!(text, "{\n  \"price\": \"₹699\"\n}\n");
  }

  #[tokio::test]
  async fn test_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    assert!(matches!(
      store.get("nope.json").await,
      Err(Error::NotFound(key)) if key == "nope.json"
    ));
    assert!(matches!(store.delete("nope.json").await, Err(Error::NotFound(_))));
    assert!(!store.exists("nope.json").await.unwrap());
  }

  #[tokio::test]
  async fn test_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
    let store = FsStore::new(dir.path());

    assert!(matches!(store.get("bad.json").await, Err(Error::InvalidJson { .. })));
  }

  #[tokio::test]
  async fn test_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.put("x.json", &json!(1)).await.unwrap();
    store.delete("x.json").await.unwrap();
    assert!(!store.exists("x.json").await.unwrap());
  }
}
