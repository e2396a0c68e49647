use crate::cli::RankArgs;
use anyhow::Context;
use chrono::Utc;
use excerpt_core::{Config, DocumentSource, Pipeline};
use excerpt_io::{discover_documents, read_json, write_json, Report, RunRequest, TextFileSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn run(args: &RankArgs) -> anyhow::Result<()> {
    let report = build_report(args)?;

    match &args.output {
        Some(path) => {
            write_json(path, &report)?;
            tracing::info!(
                path = %path.display(),
                sections = report.extracted_sections.len(),
                "report written"
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Resolve the request, run the pipeline and lay out the report
pub fn build_report(args: &RankArgs) -> anyhow::Result<Report> {
    let (mut request, base) = match &args.request {
        Some(path) => {
            let request = RunRequest::load(path)?;
            (request, request_dir(path))
        }
        None => (RunRequest::default(), PathBuf::from(".")),
    };

    if let Some(persona) = &args.persona {
        request.persona = persona.clone();
    }
    if let Some(job) = &args.job {
        request.job_to_be_done = job.clone();
    }

    let config = resolve_config(args, &request)?;
    let paths = resolve_documents(args, &request, &base)?;
    tracing::info!(documents = paths.len(), "ranking documents");

    let sources: Vec<Arc<dyn DocumentSource>> = paths
        .into_iter()
        .map(|p| Arc::new(TextFileSource::new(p)) as Arc<dyn DocumentSource>)
        .collect();

    let query = request.query();
    let pipeline = Pipeline::new(config)?;
    let outcome = pipeline.run(&query, sources)?;

    if outcome.partial {
        tracing::warn!("deadline elapsed, report covers finished documents only");
    }

    Ok(Report::from_outcome(&query, &outcome, Utc::now()))
}

/// Directory a request path lives in; a bare file name means the working directory
fn request_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn resolve_config(args: &RankArgs, request: &RunRequest) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => read_json(path)
            .with_context(|| format!("loading config overrides from {}", path.display()))?,
        None => request.config.clone().unwrap_or_default(),
    };

    if let Some(n) = args.max_sections {
        config.max_sections = n;
    }
    if let Some(n) = args.max_sub_excerpts {
        config.max_sub_excerpts = n;
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout_ms = Some(ms);
    }
    if let Some(n) = args.workers {
        config.workers = n;
    }
    Ok(config)
}

/// Listed documents win; otherwise every .txt in the input directory
fn resolve_documents(
    args: &RankArgs,
    request: &RunRequest,
    base: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    if !request.documents.is_empty() {
        return Ok(request.resolve_documents(base));
    }
    let dir = args.input_dir.as_deref().unwrap_or(base);
    Ok(discover_documents(dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const GUIDE: &str = "1. Budget Hotels\nBudget hotels near the station are the best choice for a short trip.\n\
                         2. Museums\nThe museums in the old town open at nine and close early on Sundays.";

    #[test]
    fn test_flags_override_request() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("guide.txt"), GUIDE).unwrap();
        let request = dir.path().join("request.json");
        std::fs::write(
            &request,
            r#"{"persona": "Student", "job": "study", "config": {"max_sections": 4}}"#,
        )
        .unwrap();

        let args = RankArgs {
            request: Some(request),
            persona: Some("Travel planner".to_string()),
            job: Some("find budget hotels".to_string()),
            max_sections: Some(1),
            ..RankArgs::default()
        };
        let report = build_report(&args).unwrap();
        assert_eq!(report.metadata.persona, "Travel planner");
        assert_eq!(report.extracted_sections.len(), 1);
        assert_eq!(report.extracted_sections[0].section_title, "1. Budget Hotels");
    }

    #[test]
    fn test_request_dir_of_bare_file_name() {
        assert_eq!(request_dir(Path::new("request.json")), PathBuf::from("."));
        assert_eq!(
            request_dir(Path::new("runs/request.json")),
            PathBuf::from("runs")
        );
    }

    #[test]
    #[serial]
    fn test_bare_request_name_discovers_sibling_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("guide.txt"), GUIDE).unwrap();
        std::fs::write(
            dir.path().join("request.json"),
            r#"{"persona": "Travel planner", "job": "find budget hotels"}"#,
        )
        .unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let args = RankArgs {
            request: Some(PathBuf::from("request.json")),
            ..RankArgs::default()
        };
        let report = build_report(&args);
        std::env::set_current_dir(previous).unwrap();

        let report = report.unwrap();
        assert_eq!(report.metadata.processed_documents, vec!["guide.txt"]);
    }

    #[test]
    fn test_missing_persona_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("guide.txt"), GUIDE).unwrap();
        let args = RankArgs {
            input_dir: Some(dir.path().to_path_buf()),
            job: Some("find hotels".to_string()),
            ..RankArgs::default()
        };
        let err = build_report(&args).unwrap_err();
        assert!(err.to_string().contains("persona"));
    }

    #[test]
    fn test_output_file_written() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("guide.txt"), GUIDE).unwrap();
        let output = dir.path().join("out").join("report.json");
        let args = RankArgs {
            input_dir: Some(dir.path().to_path_buf()),
            persona: Some("Travel planner".to_string()),
            job: Some("find budget hotels".to_string()),
            output: Some(output.clone()),
            ..RankArgs::default()
        };
        run(&args).unwrap();
        let report: Report = read_json(&output).unwrap();
        assert_eq!(report.metadata.processed_documents, vec!["guide.txt"]);
    }
}
