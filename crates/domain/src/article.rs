//! Article service payloads.

use serde::{Deserialize, Serialize};

/// Identifier of an article in the remote catalog.
pub type ArticleId = u64;

/// One entry of the title listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Article identifier.
    pub id: ArticleId,
    /// Article title.
    pub title: String,
}

/// A full article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article identifier.
    pub id: ArticleId,
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
}
