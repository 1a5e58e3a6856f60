//! Read model for listing collaborators (cards, lists, filters)

use serde::{Deserialize, Serialize};
use shared_types::{DocumentId, DocumentStatus, Timestamp};
use std::str::FromStr;

use crate::domain::document::Document;

/// What a document card or list row needs to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: String,
    pub status: DocumentStatus,
    pub completed_signatures: u32,
    pub total_signatures: u32,
    pub progress_percent: u8,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id(),
            title: doc.title().to_string(),
            status: doc.current_status(),
            completed_signatures: doc.completed_signatures(),
            total_signatures: doc.total_signatures(),
            progress_percent: doc.progress_percent(),
            created_at: doc.created_at(),
            expires_at: doc.expires_at(),
        }
    }
}

/// Status filter as offered by document lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(DocumentStatus),
}

impl StatusFilter {
    pub fn matches(&self, summary: &DocumentSummary) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(status) => summary.status == *status,
        }
    }

    /// Keep the matching summaries, newest first.
    pub fn apply<'a, I>(&self, summaries: I) -> Vec<&'a DocumentSummary>
    where
        I: IntoIterator<Item = &'a DocumentSummary>,
    {
        let mut matched: Vec<_> = summaries.into_iter().filter(|s| self.matches(s)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }
}

impl FromStr for StatusFilter {
    type Err = shared_types::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Status)
    }
}
