use async_trait::async_trait;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::translation::translate_query;
use super::{FoodDataError, FoodDataSource, FoodSearch, FoodSearchResponse};
use crate::config::FoodDataConfig;

/// 单次请求的结果数上限
const MAX_PAGE_SIZE: usize = 10;

const DEFAULT_DATA_TYPES: [&str; 2] = ["Foundation", "SR Legacy"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    page_size: usize,
    require_all_words: bool,
    data_type: Vec<String>,
}

/// USDA FoodData Central 客户端
///
/// 两次请求之间至少间隔 `min_request_interval_ms`，避免超出免费配额。
pub struct UsdaClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout_seconds: u64,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl UsdaClient {
    pub fn new(config: &FoodDataConfig) -> Result<Self, FoodDataError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(FoodDataError::Request)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds,
            min_interval: Duration::from_millis(config.min_request_interval_ms),
            last_request: Mutex::new(None),
        })
    }

    /// 等待到距离上次请求满足最小间隔，最多等待 `timeout_seconds` 秒
    async fn throttle(&self) -> Result<(), FoodDataError> {
        tokio::time::timeout(Duration::from_secs(self.timeout_seconds), self.wait_turn())
            .await
            .map_err(|_| FoodDataError::Timeout(self.timeout_seconds))
    }

    async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn map_request_error(&self, error: reqwest::Error) -> FoodDataError {
        if error.is_timeout() {
            FoodDataError::Timeout(self.timeout_seconds)
        } else if error.is_decode() {
            FoodDataError::Decode(error.to_string())
        } else {
            FoodDataError::Request(error)
        }
    }
}

#[async_trait]
impl FoodDataSource for UsdaClient {
    async fn search_foods(
        &self,
        query: &str,
        data_types: &[String],
        page_size: usize,
    ) -> Result<FoodSearch, FoodDataError> {
        self.throttle().await?;

        let translated_query = translate_query(query);
        let data_type = if data_types.is_empty() {
            DEFAULT_DATA_TYPES.iter().map(|t| t.to_string()).collect()
        } else {
            data_types.to_vec()
        };
        let request = SearchRequest {
            query: &translated_query,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            require_all_words: false,
            data_type,
        };

        tracing::debug!(query, translated = %translated_query, "searching USDA foods");

        let response = self
            .http
            .post(format!("{}/foods/search", self.base_url))
            .query(&[("api_key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FoodDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response = response
            .json::<FoodSearchResponse>()
            .await
            .map_err(|e| self.map_request_error(e))?;

        Ok(FoodSearch {
            original_query: query.to_string(),
            translated_query,
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(base_url: &str, interval_ms: u64) -> FoodDataConfig {
        FoodDataConfig {
            enabled: true,
            api_key: "DEMO_KEY".to_string(),
            base_url: base_url.to_string(),
            data_types: vec![],
            page_size: 3,
            timeout_seconds: 2,
            min_request_interval_ms: interval_ms,
        }
    }

    #[test]
    fn test_request_body_shape() {
        let request = SearchRequest {
            query: "salmon",
            page_size: 3,
            require_all_words: false,
            data_type: vec!["Foundation".to_string(), "SR Legacy".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "query": "salmon",
                "pageSize": 3,
                "requireAllWords": false,
                "dataType": ["Foundation", "SR Legacy"]
            })
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = UsdaClient::new(&config("https://api.nal.usda.gov/fdc/v1/", 0)).unwrap();
        assert_eq!(client.base_url, "https://api.nal.usda.gov/fdc/v1");
    }

    /// 应答一次请求，返回收到的请求体
    async fn serve_once(listener: TcpListener, body: &'static str) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut chunk = [0u8; 4096];
        let request_body = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request was complete");
            received.extend_from_slice(&chunk[..n]);

            let Some(header_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&received[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = header_end + 4;
            if received.len() >= body_start + content_length {
                break String::from_utf8_lossy(&received[body_start..body_start + content_length])
                    .to_string();
            }
        };

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request_body
    }

    async fn search_against_local_server(query: &str) -> (FoodSearch, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve_once(listener, r#"{"foods":[],"totalHits":0}"#));

        let client = UsdaClient::new(&config(&format!("http://{}", addr), 0)).unwrap();
        let search = client.search_foods(query, &[], 3).await.unwrap();
        (search, server.await.unwrap())
    }

    #[tokio::test]
    async fn test_search_sends_translated_query() {
        let (search, body) = search_against_local_server("salmón").await;

        assert!(body.contains(r#""query":"salmon""#), "body: {}", body);
        assert!(body.contains(r#""dataType":["Foundation","SR Legacy"]"#));
        assert_eq!(search.original_query, "salmón");
        assert_eq!(search.translated_query, "salmon");
        assert_eq!(search.response.total_hits, Some(0));
    }

    #[tokio::test]
    async fn test_search_passes_unknown_terms_through() {
        let (search, body) = search_against_local_server("kale").await;

        assert!(body.contains(r#""query":"kale""#), "body: {}", body);
        assert!(search.translation_note().is_none());
    }

    #[tokio::test]
    async fn test_throttle_enforces_min_interval() {
        let client = UsdaClient::new(&config("http://127.0.0.1:9", 50)).unwrap();
        let start = Instant::now();
        client.throttle().await.unwrap();
        client.throttle().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_throttle_wait_is_bounded_by_timeout() {
        let mut config = config("http://127.0.0.1:9", 60_000);
        config.timeout_seconds = 1;
        let client = UsdaClient::new(&config).unwrap();

        client.throttle().await.unwrap();
        let start = Instant::now();
        let err = client.throttle().await.unwrap_err();

        assert!(matches!(err, FoodDataError::Timeout(1)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_error() {
        let client = UsdaClient::new(&config("http://127.0.0.1:9", 0)).unwrap();
        let result = client.search_foods("salmón", &[], 3).await;
        assert!(result.is_err());
    }
}
