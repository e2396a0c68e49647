mod common;

use common::*;
use excerpt_core::{
    Document, DocumentSource, FailureReason, LoadError, Page, Pipeline,
};
use std::sync::Arc;
use std::time::Duration;

/// Sleeps before handing out its pages
struct SlowSource {
    inner: Document,
    delay: Duration,
}

impl DocumentSource for SlowSource {
    fn id(&self) -> &str {
        &self.inner.id
    }

    fn load(&self, max_pages: usize) -> Result<Vec<Page>, LoadError> {
        std::thread::sleep(self.delay);
        self.inner.load(max_pages)
    }
}

#[test]
fn test_deadline_returns_partial_ranking() {
    let mut config = sample_config();
    config.timeout_ms = Some(150);
    let pipeline = Pipeline::new(config).unwrap();

    let fast = titled_doc("fast.txt", "Literature Review Methodology", METHODOLOGY_BODY);
    let slow = SlowSource {
        inner: titled_doc("slow.txt", "Literature Review Methodology", METHODOLOGY_BODY),
        delay: Duration::from_secs(5),
    };
    let sources: Vec<Arc<dyn DocumentSource>> = vec![Arc::new(fast), Arc::new(slow)];

    let started = std::time::Instant::now();
    let outcome = pipeline.run(&literature_query(), sources).unwrap();

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(outcome.partial);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].document, "slow.txt");
    assert_eq!(outcome.failures[0].reason, FailureReason::TimedOut);
    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.ranked[0].section.document, "fast.txt");
}

#[test]
fn test_generous_deadline_is_not_partial() {
    let mut config = sample_config();
    config.timeout_ms = Some(10_000);
    let pipeline = Pipeline::new(config).unwrap();

    let slow = SlowSource {
        inner: titled_doc("slow.txt", "Literature Review Methodology", METHODOLOGY_BODY),
        delay: Duration::from_millis(20),
    };
    let outcome = pipeline
        .run(&literature_query(), vec![Arc::new(slow)])
        .unwrap();

    assert!(!outcome.partial);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.ranked.len(), 1);
}
