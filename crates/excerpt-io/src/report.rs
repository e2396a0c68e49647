//! JSON report layout

use chrono::{DateTime, Utc};
use excerpt_core::{DocumentFailure, Query, RunOutcome};
use excerpt_text::truncate_chars;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const REPORT_VERSION: &str = "1.0";

/// Section previews are cut to this many characters
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: DateTime<Utc>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processed_documents: Vec<String>,
    pub total_sections_extracted: usize,
    pub sections_considered: usize,
    pub processing_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub section_title: String,
    pub document_name: String,
    pub document_title: String,
    pub page_number: u32,
    pub pages: Vec<u32>,
    pub importance_rank: usize,
    pub relevance_score: f64,
    pub content_preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document_name: String,
    pub section_title: String,
    pub importance_rank: usize,
    pub refined_text: String,
    pub page_number: u32,
    pub relevance_score: f64,
}

/// Everything written for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
    pub failures: Vec<DocumentFailure>,
    pub degraded: Vec<String>,
    pub partial: bool,
}

impl Report {
    pub fn from_outcome(query: &Query, outcome: &RunOutcome, timestamp: DateTime<Utc>) -> Self {
        let titles: HashMap<&str, &str> = outcome
            .documents
            .iter()
            .map(|d| (d.document.as_str(), d.title.as_str()))
            .collect();

        let extracted_sections = outcome
            .ranked
            .iter()
            .map(|r| ExtractedSection {
                section_title: r.section.title.clone(),
                document_name: r.section.document.clone(),
                document_title: titles
                    .get(r.section.document.as_str())
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| r.section.document.clone()),
                page_number: r.section.first_page(),
                pages: r.section.pages.clone(),
                importance_rank: r.rank,
                relevance_score: round_score(r.score),
                content_preview: preview(&r.section.body),
            })
            .collect();

        let subsection_analysis = outcome
            .ranked
            .iter()
            .flat_map(|r| {
                r.sub_excerpts.iter().map(move |sub| SubsectionAnalysis {
                    document_name: r.section.document.clone(),
                    section_title: r.section.title.clone(),
                    importance_rank: r.rank,
                    refined_text: sub.snippet.clone(),
                    page_number: sub.page,
                    relevance_score: round_score(sub.score),
                })
            })
            .collect();

        Self {
            metadata: Metadata {
                timestamp,
                persona: query.persona.clone(),
                job_to_be_done: query.job.clone(),
                processed_documents: outcome.documents.iter().map(|d| d.document.clone()).collect(),
                total_sections_extracted: outcome.ranked.len(),
                sections_considered: outcome.sections_considered,
                processing_version: REPORT_VERSION.to_string(),
            },
            extracted_sections,
            subsection_analysis,
            failures: outcome.failures.clone(),
            degraded: outcome.degraded.clone(),
            partial: outcome.partial,
        }
    }
}

/// Round to four decimal places
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

/// First `PREVIEW_CHARS` characters, with `...` when cut
pub fn preview(text: &str) -> String {
    let cut = truncate_chars(text, PREVIEW_CHARS);
    if cut.len() < text.len() {
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use excerpt_core::{
        DocumentSummary, FailureReason, RankedResult, Section, SectionOrigin, SubExcerpt,
    };

    fn outcome() -> RunOutcome {
        let section = Section {
            document: "a.txt".to_string(),
            document_index: 0,
            ordinal: 0,
            title: "1. Budget Hotels".to_string(),
            pages: vec![2, 3],
            page_starts: vec![0, 120],
            body: "b".repeat(250),
            origin: SectionOrigin::Heading,
            score: Some(1.234_567),
        };
        RunOutcome {
            ranked: vec![RankedResult {
                rank: 1,
                score: 1.234_567,
                section,
                sub_excerpts: vec![SubExcerpt {
                    title: "Budget".to_string(),
                    snippet: "Budget hotels near the station.".to_string(),
                    page: 2,
                    score: 0.333_33,
                }],
            }],
            failures: vec![DocumentFailure {
                document: "gone.txt".to_string(),
                reason: FailureReason::LoadFailed {
                    message: "not found".to_string(),
                },
            }],
            degraded: vec![],
            documents: vec![DocumentSummary {
                document: "a.txt".to_string(),
                title: "A Guide to Budget Travel".to_string(),
                pages: 3,
                sections: 4,
                strategy: None,
                degraded: false,
            }],
            sections_considered: 4,
            partial: false,
        }
    }

    #[test]
    fn test_round_and_preview() {
        assert_eq!(round_score(1.234_567), 1.2346);
        assert_eq!(preview("short"), "short");
        let long = "é".repeat(250);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_report_layout() {
        let query = Query::new("Travel planner", "find budget hotels");
        let report = Report::from_outcome(&query, &outcome(), Utc::now());

        assert_eq!(report.metadata.processing_version, "1.0");
        assert_eq!(report.metadata.processed_documents, vec!["a.txt"]);
        assert_eq!(report.metadata.total_sections_extracted, 1);

        let section = &report.extracted_sections[0];
        assert_eq!(section.document_title, "A Guide to Budget Travel");
        assert_eq!(section.page_number, 2);
        assert_eq!(section.relevance_score, 1.2346);
        assert!(section.content_preview.ends_with("..."));

        assert_eq!(report.subsection_analysis[0].relevance_score, 0.3333);
        assert_eq!(report.failures[0].document, "gone.txt");
    }

    #[test]
    fn test_report_json_shape() {
        let query = Query::new("Travel planner", "find budget hotels");
        let report = Report::from_outcome(&query, &outcome(), Utc::now());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["metadata"]["persona"], "Travel planner");
        assert_eq!(json["extracted_sections"][0]["importance_rank"], 1);
        assert_eq!(json["failures"][0]["reason"]["kind"], "load_failed");

        let back: Report = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
