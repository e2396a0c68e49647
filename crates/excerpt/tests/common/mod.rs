#![allow(dead_code)]

use excerpt_core::{Config, Document, DocumentSource, Query};
use excerpt_io::TextFileSource;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn sample_config() -> Config {
    Config {
        workers: 2,
        ..Config::new()
    }
}

pub fn literature_query() -> Query {
    Query::new("PhD researcher", "prepare a literature review")
}

pub fn travel_query() -> Query {
    Query::new("Travel planner", "plan a trip with budget hotels and beaches")
}

/// Body shared by the literature fixtures
pub const METHODOLOGY_BODY: &str =
    "This chapter explains the literature review methodology used by the group in detail.";

pub fn titled_doc(id: &str, title: &str, body: &str) -> Document {
    Document::from_texts(id, [format!("{}\n{}", title, body)])
}

pub fn in_memory(docs: Vec<Document>) -> Vec<Arc<dyn DocumentSource>> {
    docs.into_iter()
        .map(|d| Arc::new(d) as Arc<dyn DocumentSource>)
        .collect()
}

/// Write `files` into `dir`, pages joined with form feeds
pub fn write_corpus(dir: &Path, files: &[(&str, &[&str])]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, pages)| {
            let path = dir.join(name);
            std::fs::write(&path, pages.join("\x0C")).unwrap();
            path
        })
        .collect()
}

pub fn on_disk(paths: &[PathBuf]) -> Vec<Arc<dyn DocumentSource>> {
    paths
        .iter()
        .map(|p| Arc::new(TextFileSource::new(p)) as Arc<dyn DocumentSource>)
        .collect()
}
