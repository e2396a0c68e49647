//! Plain-text documents on disk

use crate::error::{Error, Result};
use excerpt_core::{DocumentSource, LoadError, Page};
use std::path::{Path, PathBuf};

/// Form feed separates pages in extracted text files
pub const PAGE_BREAK: char = '\x0C';

/// A `.txt` file whose pages are separated by form feeds
#[derive(Debug, Clone)]
pub struct TextFileSource {
    id: String,
    path: PathBuf,
}

impl TextFileSource {
    /// The document id is the file name
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { id, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for TextFileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self, max_pages: usize) -> std::result::Result<Vec<Page>, LoadError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| LoadError::new(format!("{}: {}", self.path.display(), e)))?;
        let text = String::from_utf8_lossy(&bytes);
        let pages = split_pages(&self.id, &text, max_pages);
        tracing::debug!(document = %self.id, pages = pages.len(), "document loaded");
        Ok(pages)
    }
}

/// Split text on form feeds into at most `max_pages` pages numbered from 1
pub fn split_pages(document: &str, text: &str, max_pages: usize) -> Vec<Page> {
    text.split(PAGE_BREAK)
        .take(max_pages)
        .enumerate()
        .map(|(i, page)| Page::new(document, i as u32 + 1, page))
        .collect()
}

/// Every `.txt` file directly inside `dir`, sorted by file name
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::ReadDocument {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::ReadDocument {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_text = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if path.is_file() && is_text {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
