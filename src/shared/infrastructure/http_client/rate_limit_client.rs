//! Rate limited HTTP client shared by the REST collaborators
//!
//! Every request waits on a governor quota, is sent exactly once and has its
//! status checked before the JSON body is decoded. There is no retry layer:
//! a failed request surfaces to the caller as an `AppError` carrying the
//! transport status description.

use crate::shared::config::{AppwriteConfig, TmdbConfig};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;

const USER_AGENT: &str = "reeldeck/0.1 (+https://github.com/reeldeck/reeldeck)";

/// HTTP client that paces requests through a token bucket
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the TMDB v3 API: JSON accept header plus bearer credential
    pub fn for_tmdb(config: &TmdbConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {}", config.api_key))?,
        );

        // TMDB allows roughly 40 req/sec; stay well below with a small burst
        Self::new("TMDB", headers, Self::create_rate_limiter(20.0, 10))
    }

    /// Client for an Appwrite-compatible document database REST API
    pub fn for_appwrite(config: &AppwriteConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-appwrite-project"),
            header_value(&config.project_id)?,
        );
        if let Some(api_key) = &config.api_key {
            headers.insert(
                HeaderName::from_static("x-appwrite-key"),
                header_value(api_key)?,
            );
        }

        Self::new("Appwrite", headers, Self::create_rate_limiter(10.0, 5))
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DefaultDirectRateLimiter {
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);

        let quota = if requests_per_second > 0.0 {
            Quota::with_period(Duration::from_secs_f64(1.0 / requests_per_second))
                .map(|quota| quota.allow_burst(burst))
        } else {
            None
        };

        GovernorRateLimiter::direct(quota.unwrap_or_else(|| Quota::per_second(burst)))
    }

    /// Create a custom client
    pub fn new(
        provider_name: &str,
        default_headers: HeaderMap,
        rate_limiter: DefaultDirectRateLimiter,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to build {} client: {}", provider_name, e))
            })?;

        Ok(Self {
            client,
            rate_limiter,
            provider_name: provider_name.to_string(),
        })
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// GET a JSON document
    pub async fn get<T>(&self, url: &str, context: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.send_json(Method::GET, url, &[], None, context).await
    }

    /// Send a request and decode its JSON response
    ///
    /// `context` prefixes the error message of a non-2xx response, e.g.
    /// `"Failed to fetch movies"` becomes `"Failed to fetch movies: Not Found"`.
    pub async fn send_json<T>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        context: &str,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.rate_limiter.until_ready().await;

        let endpoint = endpoint_for_log(url);
        LogContext::api_call(&self.provider_name, &endpoint, method.as_str(), None);
        let timer = TimedOperation::new(&format!("{} {}", self.provider_name, endpoint));

        let mut request = self.client.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        let response = request.send().await.map_err(|e| {
            log::warn!("{} request to {} failed: {}", self.provider_name, endpoint, e);
            AppError::from(e)
        })?;

        let status = response.status();
        LogContext::api_call(
            &self.provider_name,
            &endpoint,
            status.as_str(),
            Some(timer.finish()),
        );

        if !status.is_success() {
            return Err(status_error(status, context));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::SerializationError(format!(
                "{}: invalid {} response: {}",
                context, self.provider_name, e
            ))
        })
    }
}

/// Human readable status description, e.g. "Not Found"
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Map a non-2xx status to an error that carries the status description
pub fn status_error(status: StatusCode, context: &str) -> AppError {
    let message = format!("{}: {}", context, status_text(status));
    match status.as_u16() {
        401 | 403 => AppError::Unauthorized(message),
        404 => AppError::NotFound(message),
        429 => AppError::RateLimitError(message),
        _ => AppError::ApiError(message),
    }
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::ConfigError(format!("Invalid header value: {}", e)))
}

// Credentials travel in query strings for some endpoints; never log them.
fn endpoint_for_log(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_string()
}
