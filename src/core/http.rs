//! HTTP transport for the ASA API

use crate::core::cache::{RequestKey, ResponseCache};
use crate::error::{AsaError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Proxy};
use serde_json::Value;
use tracing::debug;

/// Versioned root of the ASA API.
pub const BASE_URL: &str = "https://app.americansocceranalysis.com/api/v1";

const USER_AGENT: &str = concat!("itscalledsoccer-rs/", env!("CARGO_PKG_VERSION"));

/// Blocking-style HTTP collaborator: one GET at a time, JSON bodies,
/// non-2xx statuses surfaced as errors.
#[derive(Debug)]
pub struct Transport {
    client: Client,
    base_url: String,
    cache: Option<ResponseCache>,
}

/// Everything needed to construct a [`Transport`].
pub struct TransportConfig {
    pub base_url: String,
    /// (scheme, proxy url) pairs; scheme is one of `http`, `https`, `all`.
    pub proxies: Vec<(String, String)>,
    pub cache: bool,
    pub cache_capacity: usize,
    pub disk_cache: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            proxies: Vec::new(),
            cache: true,
            cache_capacity: 100,
            disk_cache: false,
        }
    }
}

fn common_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

impl Transport {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(common_headers());

        for (scheme, url) in &config.proxies {
            let proxy = match scheme.as_str() {
                "http" => Proxy::http(url)?,
                "https" => Proxy::https(url)?,
                "all" => Proxy::all(url)?,
                other => {
                    return Err(AsaError::InvalidProxyScheme {
                        scheme: other.to_string(),
                    })
                }
            };
            builder = builder.proxy(proxy);
        }

        let cache = config
            .cache
            .then(|| ResponseCache::new(config.cache_capacity, config.disk_cache));

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` with `params`, returning the decoded JSON body.
    ///
    /// Responses are served from the cache when present; a non-success
    /// status or network failure is an error and nothing is cached.
    pub async fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Value> {
        let key = RequestKey::new(url, params);
        if let Some(cache) = &self.cache {
            if let Some(value) = cache.get(&key) {
                debug!(%url, "request served from cache");
                return Ok(value);
            }
        }

        debug!(%url, ?params, "GET");
        let value = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        if let Some(cache) = &self.cache {
            cache.put(key, value.clone());
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_transport(base_url: &str, cache: bool) -> Transport {
        Transport::new(TransportConfig {
            base_url: base_url.to_string(),
            cache,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mls/teams"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"team_id": "t1"}])))
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri(), false);
        let url = format!("{}/mls/teams", transport.base_url());
        let value = transport.get_json(&url, &[]).await.unwrap();

        assert_eq!(value, json!([{"team_id": "t1"}]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri(), false);
        let url = format!("{}/mls/teams", transport.base_url());
        let err = transport.get_json(&url, &[]).await.unwrap_err();

        assert!(matches!(err, AsaError::Http(_)));
    }

    #[tokio::test]
    async fn test_cache_spares_repeat_requests() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mls/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(&server.uri(), true);
        let url = format!("{}/mls/teams", transport.base_url());

        let first = transport.get_json(&url, &[]).await.unwrap();
        let second = transport.get_json(&url, &[]).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_proxy_scheme() {
        let err = Transport::new(TransportConfig {
            proxies: vec![("socks9".to_string(), "http://localhost:1".to_string())],
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, AsaError::InvalidProxyScheme { .. }));
    }

    #[test]
    fn test_base_url_constant() {
        assert_eq!(BASE_URL, "https://app.americansocceranalysis.com/api/v1");
    }
}
