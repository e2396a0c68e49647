//! Run request files

use crate::error::Result;
use crate::io::read_json;
use excerpt_core::{Config, Query};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A run request as read from JSON.
///
/// Missing persona or job text is left empty here and rejected by the
/// pipeline, so the CLI can fill either in from flags first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub persona: String,

    #[serde(default, alias = "job")]
    pub job_to_be_done: String,

    /// Document paths; relative ones resolve against the request's directory
    #[serde(default)]
    pub documents: Vec<PathBuf>,

    /// Overrides for the default configuration
    #[serde(default)]
    pub config: Option<Config>,
}

impl RunRequest {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    pub fn query(&self) -> Query {
        Query::new(self.persona.clone(), self.job_to_be_done.clone())
    }

    /// Document paths made absolute against `base`
    pub fn resolve_documents(&self, base: &Path) -> Vec<PathBuf> {
        self.documents
            .iter()
            .map(|p| {
                if p.is_absolute() {
                    p.clone()
                } else {
                    base.join(p)
                }
            })
            .collect()
    }
}
