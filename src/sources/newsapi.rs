use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::domain::{Article, NewsPage};
use crate::errors::{NewsError, NewsResult, RequestError};
use crate::sources::traits::ArticleFetcher;

const TOP_HEADLINES_PATH: &str = "v2/top-headlines";
const EVERYTHING_PATH: &str = "v2/everything";

/// Fetcher backed by the newsapi.org REST endpoint.
pub struct NewsApiSource {
    client: Client,
    top_headlines_url: Url,
    everything_url: Url,
}

impl NewsApiSource {
    pub fn new(base_url: &Url, timeout: Duration) -> NewsResult<Self> {
        let join = |path: &str| {
            base_url
                .join(path)
                .map_err(|e| NewsError::Config(format!("Cannot build {} url: {}", path, e)))
        };

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            top_headlines_url: join(TOP_HEADLINES_PATH)?,
            everything_url: join(EVERYTHING_PATH)?,
        })
    }

    pub fn from_config(config: &Config) -> NewsResult<Self> {
        Self::new(&config.base_url, config.timeout)
    }

    async fn get_page(
        &self,
        url: &Url,
        params: &[(&str, &str)],
    ) -> Result<NewsPage, RequestError> {
        let response = self.client.get(url.clone()).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        decode_page(&body)
    }
}

#[async_trait::async_trait]
impl ArticleFetcher for NewsApiSource {
    async fn fetch_top_headline(
        &self,
        category: &str,
        api_key: &str,
    ) -> Result<NewsPage, RequestError> {
        debug!("GET {} category={}", self.top_headlines_url.path(), category);

        self.get_page(
            &self.top_headlines_url,
            &[("category", category), ("apiKey", api_key)],
        )
        .await
    }

    async fn fetch_everything(
        &self,
        query: &str,
        api_key: &str,
        page: u32,
    ) -> Result<NewsPage, RequestError> {
        debug!("GET {} q={} page={}", self.everything_url.path(), query, page);

        let page = page.to_string();
        self.get_page(
            &self.everything_url,
            &[("q", query), ("apiKey", api_key), ("page", page.as_str())],
        )
        .await
    }
}

// Wire format. Only the fields the client renders are decoded.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    status: String,
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<ApiArticle>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    source: Option<ApiSourceRef>,
    title: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSourceRef {
    name: Option<String>,
}

impl ApiArticle {
    fn into_article(self) -> Article {
        Article::new(self.title.unwrap_or_default(), self.url.unwrap_or_default())
            .with_source_name(self.source.and_then(|s| s.name).unwrap_or_default())
            .with_published_at(self.published_at.unwrap_or_default())
            .with_image_url(self.url_to_image)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

fn decode_page(body: &str) -> Result<NewsPage, RequestError> {
    let response: ApiResponse = serde_json::from_str(body)?;

    // The endpoint can report errors with a 2xx status
    if response.status == "error" {
        return Err(RequestError::Status {
            code: StatusCode::OK.as_u16(),
            message: error_message(response.code, response.message, "error"),
        });
    }

    Ok(NewsPage::new(
        response.status,
        response.total_results,
        response.articles.into_iter().map(ApiArticle::into_article).collect(),
    ))
}

fn status_error(status: StatusCode, body: &str) -> RequestError {
    let fallback = status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string();

    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => error_message(parsed.code, parsed.message, &fallback),
        Err(_) => fallback,
    };

    RequestError::Status {
        code: status.as_u16(),
        message,
    }
}

fn error_message(code: Option<String>, message: Option<String>, fallback: &str) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{} ({})", message, code),
        (None, Some(message)) => message,
        (Some(code), None) => code,
        (None, None) => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE_BODY: &str = r#"{
        "status": "ok",
        "totalResults": 157,
        "articles": [
            {
                "source": {"id": null, "name": "Reuters"},
                "author": "Jane Doe",
                "title": "Banks rally",
                "description": "Shares up",
                "url": "https://example.com/banks-rally",
                "urlToImage": "https://example.com/banks.jpg",
                "publishedAt": "2024-03-05T10:00:00Z",
                "content": "..."
            },
            {
                "source": {"id": "bbc-news", "name": "BBC News"},
                "title": "Rates hold",
                "url": "https://example.com/rates-hold",
                "urlToImage": null,
                "publishedAt": "2024-03-04T08:30:00Z"
            }
        ]
    }"#;

    async fn source_for(server: &MockServer) -> NewsApiSource {
        let base = crate::config::parse_base_url(&server.uri()).unwrap();
        NewsApiSource::new(&base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_decode_page() {
        let page = decode_page(PAGE_BODY).unwrap();

        assert_eq!(page.status, "ok");
        assert_eq!(page.total_results, 157);
        assert_eq!(page.articles.len(), 2);

        let first = &page.articles[0];
        assert_eq!(first.title, "Banks rally");
        assert_eq!(first.source_name, "Reuters");
        assert_eq!(first.url, "https://example.com/banks-rally");
        assert_eq!(first.image_url.as_deref(), Some("https://example.com/banks.jpg"));
        assert_eq!(first.published_at, "2024-03-05T10:00:00Z");

        assert_eq!(page.articles[1].image_url, None);
    }

    #[test]
    fn test_decode_tolerates_null_fields() {
        let body = r#"{"status":"ok","totalResults":1,"articles":[
            {"source": null, "title": null, "url": "https://example.com/x", "publishedAt": null}
        ]}"#;

        let page = decode_page(body).unwrap();
        let article = &page.articles[0];
        assert_eq!(article.title, "");
        assert_eq!(article.source_name, "");
        assert_eq!(article.url, "https://example.com/x");
    }

    #[test]
    fn test_decode_malformed_payload_fails_whole_page() {
        let body = r#"{"status":"ok","totalResults":2,"articles":[{"title": 5}]}"#;
        assert!(matches!(decode_page(body), Err(RequestError::Decode(_))));

        assert!(matches!(decode_page("not json"), Err(RequestError::Decode(_))));
    }

    #[test]
    fn test_decode_error_status_in_body() {
        let body = r#"{"status":"error","code":"rateLimited","message":"Too many requests"}"#;

        match decode_page(body) {
            Err(RequestError::Status { code, message }) => {
                assert_eq!(code, 200);
                assert_eq!(message, "Too many requests (rateLimited)");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_everything_sends_query_key_and_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("q", "Bank"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_BODY, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let page = source.fetch_everything("Bank", "test-key", 2).await.unwrap();

        assert_eq!(page.total_results, 157);
        assert_eq!(page.articles.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_top_headline_sends_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/top-headlines"))
            .and(query_param("category", "business"))
            .and(query_param("apiKey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_BODY, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let page = source.fetch_top_headline("business", "test-key").await.unwrap();

        assert_eq!(page.first_article().unwrap().title, "Banks rally");
    }

    #[tokio::test]
    async fn test_non_success_status_uses_endpoint_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .respond_with(ResponseTemplate::new(401).set_body_raw(
                r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let err = source.fetch_everything("Bank", "bad", 1).await.unwrap_err();

        match err {
            RequestError::Status { code, message } => {
                assert_eq!(code, 401);
                assert_eq!(message, "Your API key is invalid. (apiKeyInvalid)");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_success_status_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let err = source.fetch_top_headline("business", "k").await.unwrap_err();

        match err {
            RequestError::Status { code, message } => {
                assert_eq!(code, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on port 1
        let base = crate::config::parse_base_url("http://127.0.0.1:1").unwrap();

        let source = NewsApiSource::new(&base, Duration::from_secs(2)).unwrap();
        let err = source.fetch_everything("Bank", "k", 1).await.unwrap_err();

        assert!(matches!(err, RequestError::Transport(_)));
    }
}
