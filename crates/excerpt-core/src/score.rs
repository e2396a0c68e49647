//! Multi-signal relevance scoring

use crate::config::{Config, ScoringConfig};
use crate::types::Section;
use excerpt_text::{KeywordExtractor, KeywordSignature};
use serde::Serialize;
use std::f64::consts::E;

/// A named score signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    ExactMatch,
    PartialMatch,
    Title,
    Density,
    Floor,
}

/// One signal's share of the raw score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub signal: Signal,
    pub value: f64,
}

/// Every contribution plus the normalization applied to their sum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<Contribution>,
    pub raw: f64,
    pub normalizer: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, signal: Signal) -> f64 {
        self.contributions
            .iter()
            .filter(|c| c.signal == signal)
            .map(|c| c.value)
            .sum()
    }
}

/// Summed query weight of stems the section shares with the query
pub fn exact_match(query: &KeywordSignature, section: &KeywordSignature, threshold: f64) -> f64 {
    query
        .iter()
        .filter(|(term, weight)| *weight >= threshold && section.contains(term))
        .map(|(_, weight)| weight)
        .sum()
}

/// Distinct (query stem, section stem) pairs where one is a prefix of the other
pub fn partial_match(
    query: &KeywordSignature,
    section: &KeywordSignature,
    min_prefix: usize,
) -> usize {
    query
        .terms()
        .map(|q| {
            section
                .terms()
                .filter(|s| prefix_related(q, s, min_prefix))
                .count()
        })
        .sum()
}

fn prefix_related(a: &str, b: &str, min_prefix: usize) -> bool {
    if a == b {
        return false;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= min_prefix && long.starts_with(short)
}

/// Distinct query stems present in the title
pub fn title_hits(query: &KeywordSignature, title: &KeywordSignature) -> usize {
    query.terms().filter(|t| title.contains(t)).count()
}

/// Token diversity scaled by how full the body is, in `[0, 1]`
pub fn content_density(body: &KeywordSignature, saturation_tokens: usize) -> f64 {
    let total = body.token_count();
    if total == 0 {
        return 0.0;
    }
    let diversity = body.len() as f64 / total as f64;
    let fullness = (total as f64 / saturation_tokens.max(1) as f64).min(1.0);
    diversity * fullness
}

/// `ln(e + n)`: 1 for an empty body, strictly increasing in `n`
pub fn length_normalizer(body_tokens: usize) -> f64 {
    (E + body_tokens as f64).ln()
}

/// Scores sections against a query signature
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
    extractor: KeywordExtractor,
}

impl Scorer {
    pub fn new(config: ScoringConfig, extractor: KeywordExtractor) -> Self {
        Self { config, extractor }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.scoring.clone(), config.keywords.extractor())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Query signature over persona and job text together
    pub fn persona_signature(&self, persona: &str, job: &str) -> KeywordSignature {
        self.extractor.extract(&format!("{}\n{}", persona, job))
    }

    pub fn breakdown(&self, title: &str, body: &str, query: &KeywordSignature) -> ScoreBreakdown {
        let weights = &self.config.weights;
        let title_sig = self.extractor.extract(title);
        let body_sig = self.extractor.extract(body);
        let section_sig = self.extractor.extract(&format!("{}\n{}", title, body));

        let contributions = vec![
            Contribution {
                signal: Signal::ExactMatch,
                value: weights.exact_match
                    * exact_match(query, &section_sig, self.config.exact_match_threshold),
            },
            Contribution {
                signal: Signal::PartialMatch,
                value: weights.partial_match
                    * partial_match(query, &section_sig, self.config.min_partial_prefix) as f64,
            },
            Contribution {
                signal: Signal::Title,
                value: weights.title * title_hits(query, &title_sig) as f64,
            },
            Contribution {
                signal: Signal::Density,
                value: weights.density
                    * content_density(&body_sig, self.config.density_saturation_tokens),
            },
            Contribution {
                signal: Signal::Floor,
                value: weights.floor,
            },
        ];

        let raw: f64 = contributions.iter().map(|c| c.value).sum();
        let normalizer = length_normalizer(body_sig.token_count());

        ScoreBreakdown {
            contributions,
            raw,
            normalizer,
            score: raw / normalizer,
        }
    }

    pub fn score_text(&self, title: &str, body: &str, query: &KeywordSignature) -> f64 {
        self.breakdown(title, body, query).score
    }

    pub fn score(&self, section: &Section, query: &KeywordSignature) -> f64 {
        self.score_text(&section.title, &section.body, query)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::from_config(&Config::new())
    }
}
