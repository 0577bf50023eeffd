use serde::{Deserialize, Serialize};

use super::Article;

/// One response from the endpoint.
///
/// `total_results` is the number of matches available server side, not the
/// size of this page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewsPage {
    pub status: String,
    pub total_results: u64,
    pub articles: Vec<Article>,
}

impl NewsPage {
    pub fn new(status: String, total_results: u64, articles: Vec<Article>) -> Self {
        Self {
            status,
            total_results,
            articles,
        }
    }

    /// The cleared value used when a query changes or the list is reset.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn first_article(&self) -> Option<&Article> {
        self.articles.first()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
