use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::{normalize_path, DocumentStore};
use crate::error::{PlannerError, Result};

/// Stores each document as `<root>/<path>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_file(&self, path: &str) -> Result<PathBuf> {
        let path = normalize_path(path)?;
        Ok(self.root.join(format!("{}.json", path)))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    #[tracing::instrument(skip(self, document), fields(root = %self.root.display()))]
    async fn write(&self, path: &str, document: &Value) -> Result<()> {
        let file = self.document_file(path)?;

        if document.is_null() {
            return match fs::remove_file(&file).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(PlannerError::io_operation("remove", file.display(), e)),
            };
        }

        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PlannerError::io_operation("create directory", parent.display(), e))?;
        }

        let body = serde_json::to_string_pretty(document)?;
        let tmp = file.with_extension("json.tmp");
        fs::write(&tmp, body)
            .await
            .map_err(|e| PlannerError::io_operation("write", tmp.display(), e))?;
        fs::rename(&tmp, &file)
            .await
            .map_err(|e| PlannerError::io_operation("replace", file.display(), e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    async fn read(&self, path: &str) -> Result<Option<Value>> {
        let file = self.document_file(path)?;

        let body = match fs::read_to_string(&file).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PlannerError::io_operation("read", file.display(), e)),
        };

        let document: Value = serde_json::from_str(&body)
            .map_err(|e| PlannerError::malformed(&file.display().to_string(), e))?;
        Ok((!document.is_null()).then_some(document))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.root.display())
    }
}
