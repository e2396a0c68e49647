//! Parallel run orchestration: load, segment, score, rank

use crate::config::Config;
use crate::error::{Error, LoadError, Result};
use crate::rank::Ranker;
use crate::score::Scorer;
use crate::segment::{Segmenter, StrategyKind};
use crate::types::{Document, DocumentFailure, FailureReason, Page, RankedResult, Section};
use excerpt_text::KeywordSignature;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Instant;

/// Anything that can hand the pipeline an ordered page stream
pub trait DocumentSource: Send + Sync {
    fn id(&self) -> &str;

    /// Load at most `max_pages` pages
    fn load(&self, max_pages: usize) -> std::result::Result<Vec<Page>, LoadError>;
}

impl DocumentSource for Document {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self, max_pages: usize) -> std::result::Result<Vec<Page>, LoadError> {
        Ok(self
            .pages
            .iter()
            .filter(|p| p.index as usize <= max_pages)
            .cloned()
            .collect())
    }
}

/// Persona and job-to-be-done text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub persona: String,
    pub job: String,
}

impl Query {
    pub fn new(persona: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            job: job.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.persona.trim().is_empty() {
            return Err(Error::MissingPersona);
        }
        if self.job.trim().is_empty() {
            return Err(Error::MissingJob);
        }
        Ok(())
    }
}

/// Run-wide cancellation flag checked by workers between stages
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-document processing summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub document: String,
    pub title: String,
    pub pages: usize,
    pub sections: usize,
    pub strategy: Option<StrategyKind>,
    pub degraded: bool,
}

/// Scored sections of one document
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub summary: DocumentSummary,
    pub sections: Vec<Section>,
}

/// Everything a run produced, full or partial
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub ranked: Vec<RankedResult>,
    pub failures: Vec<DocumentFailure>,
    /// Documents that fell back to fixed-size chunking
    pub degraded: Vec<String>,
    /// Documents that were segmented and scored, in request order
    pub documents: Vec<DocumentSummary>,
    pub sections_considered: usize,
    /// The deadline elapsed before every document reported
    pub partial: bool,
}

/// Frozen per-run state shared with every worker task
#[derive(Clone)]
struct Worker {
    segmenter: Arc<Segmenter>,
    scorer: Arc<Scorer>,
    query: Arc<KeywordSignature>,
    cancel: CancelToken,
    min_page_chars: usize,
    max_pages: usize,
}

impl Worker {
    fn process(
        &self,
        source: &dyn DocumentSource,
        ingest_index: usize,
    ) -> std::result::Result<ProcessedDocument, FailureReason> {
        self.checkpoint()?;
        let pages = source
            .load(self.max_pages)
            .map_err(|e| FailureReason::LoadFailed { message: e.message })?;

        let mut document = Document::new(source.id(), pages).with_ingest_index(ingest_index);
        document.retain_content(self.min_page_chars, self.max_pages);
        if document.is_empty() {
            return Err(FailureReason::NoPages);
        }

        self.checkpoint()?;
        let segmentation = self.segmenter.segment(&document);
        let mut sections = segmentation.sections;
        for section in &mut sections {
            self.checkpoint()?;
            section.score = Some(self.scorer.score(section, &self.query));
        }

        tracing::debug!(
            document = %document.id,
            pages = document.pages.len(),
            sections = sections.len(),
            degraded = segmentation.degraded,
            "document processed"
        );

        Ok(ProcessedDocument {
            summary: DocumentSummary {
                document: document.id.clone(),
                title: document.title(),
                pages: document.pages.len(),
                sections: sections.len(),
                strategy: segmentation.strategy,
                degraded: segmentation.degraded,
            },
            sections,
        })
    }

    fn checkpoint(&self) -> std::result::Result<(), FailureReason> {
        if self.cancel.is_cancelled() {
            return Err(FailureReason::TimedOut);
        }
        Ok(())
    }
}

type WorkerReport = (usize, std::result::Result<ProcessedDocument, FailureReason>);

/// Section ranking over a batch of documents
pub struct Pipeline {
    config: Config,
    segmenter: Arc<Segmenter>,
    scorer: Arc<Scorer>,
    ranker: Ranker,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let scorer = Arc::new(Scorer::from_config(&config));
        Ok(Self {
            segmenter: Arc::new(Segmenter::new(&config)),
            ranker: Ranker::new(&config, Arc::clone(&scorer)),
            scorer,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn persona_signature(&self, query: &Query) -> KeywordSignature {
        self.scorer.persona_signature(&query.persona, &query.job)
    }

    /// Process a single document on the calling thread
    pub fn process_document(
        &self,
        source: &dyn DocumentSource,
        ingest_index: usize,
        query: &Query,
    ) -> std::result::Result<ProcessedDocument, FailureReason> {
        self.worker(Arc::new(self.persona_signature(query)), CancelToken::new())
            .process(source, ingest_index)
    }

    /// Rank sections across `sources`.
    ///
    /// Documents are processed on a dedicated pool. Per-document failures
    /// are recorded and never abort the run; when the configured deadline
    /// elapses, unfinished documents are recorded as timed out and the
    /// ranking covers whatever completed.
    pub fn run(&self, query: &Query, sources: Vec<Arc<dyn DocumentSource>>) -> Result<RunOutcome> {
        query.validate()?;
        if sources.is_empty() {
            return Err(Error::NoDocuments);
        }

        let started = Instant::now();
        let deadline = self.config.timeout().map(|t| started + t);
        let signature = Arc::new(self.persona_signature(query));
        let cancel = CancelToken::new();
        let worker = self.worker(Arc::clone(&signature), cancel.clone());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count())
            .thread_name(|i| format!("excerpt-worker-{}", i))
            .panic_handler(|_| tracing::error!("document worker panicked"))
            .build()
            .map_err(|source| Error::WorkerPool { source })?;

        let (tx, rx) = mpsc::channel::<WorkerReport>();
        for (index, source) in sources.iter().enumerate() {
            let tx = tx.clone();
            let worker = worker.clone();
            let source = Arc::clone(source);
            pool.spawn(move || {
                let outcome = worker.process(source.as_ref(), index);
                // Receiver is gone once the deadline passed
                let _ = tx.send((index, outcome));
            });
        }
        drop(tx);

        let mut results: Vec<Option<std::result::Result<ProcessedDocument, FailureReason>>> =
            (0..sources.len()).map(|_| None).collect();
        let mut received = 0;
        let mut partial = false;

        while received < sources.len() {
            let next = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    match rx.recv_timeout(remaining) {
                        Ok(report) => Some(report),
                        Err(RecvTimeoutError::Timeout) => {
                            partial = true;
                            cancel.cancel();
                            tracing::warn!(
                                finished = received,
                                total = sources.len(),
                                "run deadline elapsed"
                            );
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => None,
                    }
                }
                None => rx.recv().ok(),
            };
            let Some((index, outcome)) = next else {
                break;
            };
            results[index] = Some(outcome);
            received += 1;
        }

        let mut failures = Vec::new();
        let mut documents = Vec::new();
        let mut degraded = Vec::new();
        let mut sections = Vec::new();

        for (source, result) in sources.iter().zip(results) {
            let outcome = result.unwrap_or(Err(if partial {
                FailureReason::TimedOut
            } else {
                FailureReason::WorkerLost
            }));
            match outcome {
                Ok(processed) => {
                    if processed.summary.degraded {
                        degraded.push(processed.summary.document.clone());
                    }
                    documents.push(processed.summary);
                    sections.extend(processed.sections);
                }
                Err(reason) => {
                    tracing::warn!(document = %source.id(), reason = %reason, "document skipped");
                    failures.push(DocumentFailure {
                        document: source.id().to_string(),
                        reason,
                    });
                }
            }
        }

        let sections_considered = sections.len();
        let ranked = self.ranker.rank_with_excerpts(sections, &signature);

        tracing::info!(
            documents = documents.len(),
            failures = failures.len(),
            sections = sections_considered,
            ranked = ranked.len(),
            partial,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run complete"
        );

        Ok(RunOutcome {
            ranked,
            failures,
            degraded,
            documents,
            sections_considered,
            partial,
        })
    }

    fn worker(&self, query: Arc<KeywordSignature>, cancel: CancelToken) -> Worker {
        Worker {
            segmenter: Arc::clone(&self.segmenter),
            scorer: Arc::clone(&self.scorer),
            query,
            cancel,
            min_page_chars: self.config.min_page_chars,
            max_pages: self.config.max_pages_per_document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Missing(String);

    impl DocumentSource for Missing {
        fn id(&self) -> &str {
            &self.0
        }

        fn load(&self, _max_pages: usize) -> std::result::Result<Vec<Page>, LoadError> {
            Err(LoadError::new(format!("{} not found", self.0)))
        }
    }

    struct Slow(Document, Duration);

    impl DocumentSource for Slow {
        fn id(&self) -> &str {
            &self.0.id
        }

        fn load(&self, max_pages: usize) -> std::result::Result<Vec<Page>, LoadError> {
            std::thread::sleep(self.1);
            self.0.load(max_pages)
        }
    }

    fn doc(id: &str, text: &str) -> Arc<dyn DocumentSource> {
        Arc::new(Document::from_texts(id, [text]))
    }

    fn query() -> Query {
        Query::new("Travel planner", "plan a trip with budget hotels")
    }

    const HOTELS: &str = "1. Budget Hotels\nBudget hotels near the station are the best choice for a short trip.\n\
                          2. Museums\nThe museums in the old town open at nine and close early on Sundays.";

    #[test]
    fn test_query_validation() {
        assert!(matches!(
            Query::new("  ", "job").validate(),
            Err(Error::MissingPersona)
        ));
        assert!(matches!(
            Query::new("persona", "").validate(),
            Err(Error::MissingJob)
        ));
    }

    #[test]
    fn test_run_requires_documents() {
        let pipeline = Pipeline::new(Config::new()).unwrap();
        assert!(matches!(
            pipeline.run(&query(), vec![]),
            Err(Error::NoDocuments)
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config {
            max_sections: 0,
            ..Config::new()
        };
        assert!(matches!(
            Pipeline::new(config),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_run_ranks_across_documents() {
        let pipeline = Pipeline::new(Config::new()).unwrap();
        let outcome = pipeline
            .run(&query(), vec![doc("a.txt", HOTELS), doc("b.txt", HOTELS)])
            .unwrap();
        assert!(!outcome.partial);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.sections_considered, 4);
        assert_eq!(outcome.ranked[0].section.title, "1. Budget Hotels");
        // Equal scores resolve by ingestion order
        assert_eq!(outcome.ranked[0].section.document, "a.txt");
        assert_eq!(outcome.ranked[1].section.document, "b.txt");
    }

    #[test]
    fn test_load_failure_recorded() {
        let pipeline = Pipeline::new(Config::new()).unwrap();
        let outcome = pipeline
            .run(
                &query(),
                vec![
                    doc("a.txt", HOTELS),
                    Arc::new(Missing("gone.txt".to_string())),
                    doc("c.txt", HOTELS),
                ],
            )
            .unwrap();
        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].document, "gone.txt");
        assert!(matches!(
            outcome.failures[0].reason,
            FailureReason::LoadFailed { .. }
        ));
    }

    #[test]
    fn test_noise_only_document_has_no_pages() {
        let pipeline = Pipeline::new(Config::new()).unwrap();
        let outcome = pipeline
            .run(&query(), vec![doc("tiny.txt", "only thirty characters here..")])
            .unwrap();
        assert!(outcome.ranked.is_empty());
        assert_eq!(outcome.failures[0].reason, FailureReason::NoPages);
    }

    #[test]
    fn test_deadline_yields_partial_outcome() {
        let config = Config {
            workers: 2,
            timeout_ms: Some(100),
            ..Config::new()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let slow = Slow(
            Document::from_texts("slow.txt", [HOTELS]),
            Duration::from_secs(3),
        );
        let outcome = pipeline
            .run(&query(), vec![doc("fast.txt", HOTELS), Arc::new(slow)])
            .unwrap();
        assert!(outcome.partial);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].document, "slow.txt");
        assert_eq!(outcome.failures[0].reason, FailureReason::TimedOut);
        assert!(outcome
            .ranked
            .iter()
            .all(|r| r.section.document == "fast.txt"));
    }

    #[test]
    fn test_process_document_reports_strategy() {
        let pipeline = Pipeline::new(Config::new()).unwrap();
        let source = Document::from_texts("a.txt", [HOTELS]);
        let processed = pipeline.process_document(&source, 0, &query()).unwrap();
        assert_eq!(processed.summary.strategy, Some(StrategyKind::Heading));
        assert!(processed.sections.iter().all(|s| s.score.is_some()));
    }

    #[test]
    fn test_cancel_token_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
