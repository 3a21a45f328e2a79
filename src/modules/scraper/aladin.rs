use super::parser::AladinPageParser;
use super::BookScraper;
use crate::modules::catalog::domain::entities::{AuthorInfo, BookInfo};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::utils::RateLimiter;
use crate::{log_debug, log_info, log_warn};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::{Duration, Instant};

pub const ALADIN_BASE_URL: &str = "https://www.aladin.co.kr";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Scraper for Aladin product pages.
///
/// Requests are paced by a shared rate limiter and are never retried.
pub struct AladinScraper {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    parser: AladinPageParser,
}

impl AladinScraper {
    pub fn new(requests_per_second: f64) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(requests_per_second),
            parser: AladinPageParser::new()?,
        })
    }

    /// Only Aladin pages are scraped
    pub fn is_supported_url(url: &str) -> bool {
        url.starts_with(ALADIN_BASE_URL)
    }

    async fn fetch_page(&self, url: &str) -> AppResult<String> {
        self.rate_limiter.wait().await;

        let start = Instant::now();
        LogContext::http_fetch("scrape", url, "started", None);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        LogContext::http_fetch(
            "scrape",
            url,
            "ok",
            Some(start.elapsed().as_millis() as u64),
        );
        Ok(body)
    }
}

#[async_trait]
impl BookScraper for AladinScraper {
    async fn scrape(&self, url: &str) -> Option<(AuthorInfo, BookInfo)> {
        let html = match self.fetch_page(url).await {
            Ok(html) => html,
            Err(e) => {
                log_warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        match self.parser.parse(&html) {
            Some((author, book)) => {
                log_info!(
                    "Scraped '{}' (isbn {}) from {}",
                    book.title.as_deref().unwrap_or("-"),
                    book.isbn.as_deref().unwrap_or("-"),
                    url
                );
                Some((author, book))
            }
            None => {
                log_debug!("No ISBN found on {}", url);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::scraper::parser::tests::SAMPLE_PAGE;
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;
    use axum::Router;

    async fn serve_pages() -> String {
        let app = Router::new()
            .route("/shop/wproduct.aspx", get(|| async { Html(SAMPLE_PAGE) }))
            .route("/gone", get(|| async { StatusCode::NOT_FOUND }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn only_aladin_urls_are_supported() {
        assert!(AladinScraper::is_supported_url(
            "https://www.aladin.co.kr/shop/wproduct.aspx?ItemId=40869703"
        ));
        assert!(!AladinScraper::is_supported_url("https://www.yes24.com/Product/Goods/1"));
        assert!(!AladinScraper::is_supported_url("http://www.aladin.co.kr/shop"));
    }

    #[tokio::test]
    async fn scrapes_page_over_http() {
        let base = serve_pages().await;
        let scraper = AladinScraper::new(100.0).unwrap();

        let (author, book) = scraper
            .scrape(&format!("{}/shop/wproduct.aspx?ItemId=40869703", base))
            .await
            .unwrap();

        assert_eq!(author.name.as_deref(), Some("한강"));
        assert_eq!(book.isbn.as_deref(), Some("9788936434120"));
    }

    #[tokio::test]
    async fn http_errors_yield_none() {
        let base = serve_pages().await;
        let scraper = AladinScraper::new(100.0).unwrap();

        assert!(scraper.scrape(&format!("{}/gone", base)).await.is_none());
    }
}
