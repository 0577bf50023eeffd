use std::sync::Arc;

use crate::domain::{Article, NewsPage};
use crate::errors::RequestError;

/// Outcome of the last paginated request.
#[derive(Debug, Clone, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    /// The raw page as received, not the accumulated list.
    Success(NewsPage),
    Error(Arc<RequestError>),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Success(_) => "success",
            RequestStatus::Error(_) => "error",
        }
    }
}

/// What a single `request_page` call ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Dropped because another request was still loading.
    Skipped,
    /// The fetch succeeded; `received == 0` leaves the cursor where it was.
    Loaded { received: usize },
    Failed,
}

/// Top headline signal payload.
#[derive(Debug, Clone)]
pub enum HeadlineUpdate {
    Loaded(Option<Article>),
    Failed(Arc<RequestError>),
}

/// Accumulated list signal payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleList {
    pub articles: Vec<Article>,
    pub total_results: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub current_query: String,
    /// Cursor for the next fetch, starts at 1.
    pub current_page: u32,
    pub accumulated_articles: Vec<Article>,
    pub total_results: u64,
}

impl PaginationState {
    pub fn new() -> Self {
        Self {
            current_query: String::new(),
            current_page: 1,
            accumulated_articles: Vec::new(),
            total_results: 0,
        }
    }

    pub fn is_at_last_page(&self) -> bool {
        self.accumulated_articles.len() as u64 >= self.total_results
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
        self.accumulated_articles.clear();
        self.total_results = 0;
    }

    /// Reset the cursor and list for a new query.
    pub fn start_query(&mut self, query: &str) {
        self.reset();
        self.current_query = query.to_string();
    }

    /// Fold a non-empty page into the list and advance the cursor.
    /// Page 1 replaces the list, later pages append in arrival order.
    pub fn merge(&mut self, page: &NewsPage) {
        if page.articles.is_empty() {
            return;
        }

        if self.current_page == 1 {
            self.accumulated_articles = page.articles.clone();
        } else {
            self.accumulated_articles.extend(page.articles.iter().cloned());
        }
        self.total_results = page.total_results;
        self.current_page += 1;
    }

    pub fn article_list(&self) -> ArticleList {
        ArticleList {
            articles: self.accumulated_articles.clone(),
            total_results: self.total_results,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}
