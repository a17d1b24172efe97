//! The sub-topic collaborator seam.
//!
//! Expanding a node means asking some generative backend for sub-topics of
//! the node's name. The tree controller only ever sees the label sequence;
//! transport, authentication and prompting belong to the implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Failure from a sub-topic source.
#[derive(Debug, Error)]
pub enum TopicError {
    #[error("sub-topic request failed: {0}")]
    Request(String),
    #[error("sub-topic response was malformed: {0}")]
    Malformed(String),
}

/// Anything that can turn a subject into an ordered list of short
/// sub-topic labels. An empty list is treated as a failure by the caller.
#[async_trait]
pub trait TopicSource: Send + Sync {
    async fn subtopics(&self, subject: &str) -> Result<Vec<String>, TopicError>;
}

/// Fixed offline source: a label table with a generic fallback, enough to
/// drive the tree without a generative backend.
#[derive(Debug, Clone, Default)]
pub struct CannedTopics {
    table: HashMap<String, Vec<String>>,
}

/// What `CannedTopics` serves for subjects it has no entry for.
const FALLBACK: &[&str] = &[
    "History",
    "Key Concepts",
    "Applications",
    "Open Problems",
    "Notable Figures",
];

impl CannedTopics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: impl Into<String>, labels: Vec<String>) {
        self.table.insert(subject.into(), labels);
    }
}

#[async_trait]
impl TopicSource for CannedTopics {
    async fn subtopics(&self, subject: &str) -> Result<Vec<String>, TopicError> {
        if let Some(labels) = self.table.get(subject) {
            return Ok(labels.clone());
        }
        Ok(FALLBACK.iter().map(|s| s.to_string()).collect())
    }
}
