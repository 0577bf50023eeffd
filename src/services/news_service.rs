use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::ApiKey;
use crate::services::pagination::{
    ArticleList, HeadlineUpdate, PageOutcome, PaginationState, RequestStatus,
};
use crate::services::publisher::Publisher;
use crate::sources::ArticleFetcher;

struct Inner {
    pagination: PaginationState,
    status: RequestStatus,
}

/// Owns the paginated article list for one screen session.
///
/// At most one page request is in flight at a time: a call made while the
/// status is `Loading` is dropped, not queued. The state lock is never held
/// across a fetch.
pub struct NewsService<F: ArticleFetcher> {
    fetcher: F,
    api_key: ApiKey,
    inner: Mutex<Inner>,
    status_signal: Publisher<RequestStatus>,
    articles_signal: Publisher<ArticleList>,
    headline_signal: Publisher<HeadlineUpdate>,
}

impl<F: ArticleFetcher> NewsService<F> {
    pub fn new(fetcher: F, api_key: ApiKey) -> Self {
        Self {
            fetcher,
            api_key,
            inner: Mutex::new(Inner {
                pagination: PaginationState::new(),
                status: RequestStatus::Idle,
            }),
            status_signal: Publisher::new(),
            articles_signal: Publisher::new(),
            headline_signal: Publisher::new(),
        }
    }

    /// Fetch the next page for `query`.
    ///
    /// A new query resets the cursor and list before the fetch is issued.
    pub async fn request_page(&self, query: &str) -> PageOutcome {
        let page = {
            let mut inner = self.lock();
            if inner.status.is_loading() {
                debug!("Dropping page request for '{}': already loading", query);
                return PageOutcome::Skipped;
            }

            if inner.pagination.current_query != query {
                debug!(
                    "Query changed from '{}' to '{}', resetting pagination",
                    inner.pagination.current_query, query
                );
                inner.pagination.start_query(query);
                self.articles_signal.publish(inner.pagination.article_list());
            }

            inner.status = RequestStatus::Loading;
            self.status_signal.publish(RequestStatus::Loading);
            inner.pagination.current_page
        };

        debug!("Requesting page {} for '{}'", page, query);
        let result = self
            .fetcher
            .fetch_everything(query, self.api_key.as_str(), page)
            .await;

        let mut inner = self.lock();
        match result {
            Ok(news_page) => {
                let received = news_page.articles.len();
                if received > 0 {
                    inner.pagination.merge(&news_page);
                    self.articles_signal.publish(inner.pagination.article_list());
                } else {
                    debug!("Page {} for '{}' returned no articles", page, query);
                }

                debug!(
                    "Loaded {} articles for '{}' ({} of {} accumulated)",
                    received,
                    query,
                    inner.pagination.accumulated_articles.len(),
                    inner.pagination.total_results
                );
                self.set_status(&mut inner, RequestStatus::Success(news_page));
                PageOutcome::Loaded { received }
            }
            Err(err) => {
                warn!("Page {} for '{}' failed: {}", page, query, err);
                self.set_status(&mut inner, RequestStatus::Error(Arc::new(err)));
                PageOutcome::Failed
            }
        }
    }

    /// Single-shot top headline fetch. Leaves the pagination state alone.
    pub async fn fetch_top_headline(&self, category: &str) -> HeadlineUpdate {
        let update = match self
            .fetcher
            .fetch_top_headline(category, self.api_key.as_str())
            .await
        {
            Ok(page) => HeadlineUpdate::Loaded(page.articles.into_iter().next()),
            Err(err) => {
                warn!("Top headline for '{}' failed: {}", category, err);
                HeadlineUpdate::Failed(Arc::new(err))
            }
        };

        self.headline_signal.publish(update.clone());
        update
    }

    /// Back to page 1 with an empty list. Status and query are kept.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.pagination.reset();
        self.articles_signal.publish(inner.pagination.article_list());
    }

    /// Gate for the presentation layer; not enforced by `request_page`.
    pub fn is_at_last_page(&self) -> bool {
        self.lock().pagination.is_at_last_page()
    }

    pub fn status(&self) -> RequestStatus {
        self.lock().status.clone()
    }

    pub fn snapshot(&self) -> PaginationState {
        self.lock().pagination.clone()
    }

    pub fn subscribe_status(&self) -> UnboundedReceiver<RequestStatus> {
        self.status_signal.subscribe()
    }

    pub fn subscribe_articles(&self) -> UnboundedReceiver<ArticleList> {
        self.articles_signal.subscribe()
    }

    pub fn subscribe_headline(&self) -> UnboundedReceiver<HeadlineUpdate> {
        self.headline_signal.subscribe()
    }

    fn set_status(&self, inner: &mut Inner, status: RequestStatus) {
        inner.status = status.clone();
        self.status_signal.publish(status);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
