use crate::domain::NewsPage;
use crate::errors::RequestError;

/// Typed access to the two endpoint requests the client needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch the top headlines for a category
    async fn fetch_top_headline(
        &self,
        category: &str,
        api_key: &str,
    ) -> Result<NewsPage, RequestError>;

    /// Search all articles for a query. `page` is 1-based.
    async fn fetch_everything(
        &self,
        query: &str,
        api_key: &str,
        page: u32,
    ) -> Result<NewsPage, RequestError>;
}
