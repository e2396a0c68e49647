use excerpt_core::{Config, Document, DocumentSource, Segmenter};
use excerpt_io::{read_json, TextFileSource};
use serde_json::json;
use std::path::Path;

pub fn run(file: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let config: Config = match config {
        Some(path) => read_json(path)?,
        None => Config::new(),
    };
    config.validate()?;

    let output = describe(&TextFileSource::new(file), &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn describe(source: &dyn DocumentSource, config: &Config) -> anyhow::Result<serde_json::Value> {
    let pages = source.load(config.max_pages_per_document)?;
    let mut document = Document::new(source.id(), pages);
    document.retain_content(config.min_page_chars, config.max_pages_per_document);

    let segmentation = Segmenter::new(config).segment(&document);
    let sections: Vec<_> = segmentation
        .sections
        .iter()
        .map(|s| {
            json!({
                "ordinal": s.ordinal,
                "title": s.title,
                "pages": s.pages,
                "origin": s.origin,
                "chars": s.body.chars().count(),
            })
        })
        .collect();

    Ok(json!({
        "document": document.id,
        "title": document.title(),
        "pages": document.pages.len(),
        "strategy": segmentation.strategy,
        "degraded": segmentation.degraded,
        "sections": sections,
    }))
}
