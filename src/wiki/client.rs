//! `MediaWiki` image API client.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::WikiSettings;
use crate::wiki::FetchError;
use crate::wiki::retry::RetryPolicy;

/// HTTP client bound to one wiki API endpoint.
#[derive(Debug, Clone)]
pub struct WikiClient {
    /// Pooled HTTP client.
    http: reqwest::Client,
    /// `api.php` endpoint.
    api_url: String,
    /// Retry policy applied to every request.
    retry: RetryPolicy,
}

impl WikiClient {
    /// What: Build a client from the `[wiki]` section.
    ///
    /// Inputs:
    /// - `settings`: Endpoint, timeout and retry options.
    ///
    /// Output:
    /// - Ready client.
    ///
    /// # Errors
    /// - `FetchError::Client` when the TLS backend cannot be initialized.
    pub fn new(settings: &WikiSettings) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(format!("langslide/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            retry: RetryPolicy::from_settings(settings),
        })
    }

    /// What: Resolve the direct download URL of a wiki file.
    ///
    /// Inputs:
    /// - `file_name`: Media file name without the `File:` namespace.
    ///
    /// Output:
    /// - `Ok(Some(url))` when the file exists, `Ok(None)` when it does not.
    ///
    /// # Errors
    /// - `FetchError` when the request fails after retries or the response is malformed.
    pub async fn image_url(&self, file_name: &str) -> Result<Option<String>, FetchError> {
        let query = image_info_query(file_name);
        let (http, api_url, query) = (&self.http, self.api_url.as_str(), &query);
        let body = self
            .retry
            .run(file_name, move || async move {
                let response = http
                    .get(api_url)
                    .query(query)
                    .send()
                    .await
                    .map_err(|e| FetchError::from_reqwest(&e))?;
                let response = check_status(response)?;
                response
                    .json::<Value>()
                    .await
                    .map_err(|e| FetchError::from_reqwest(&e))
            })
            .await?;
        let url = parse_image_url(&body);
        debug!(file = file_name, found = url.is_some(), "image info lookup");
        Ok(url)
    }

    /// What: Download a file, retrying transient failures.
    ///
    /// Inputs:
    /// - `url`: Direct download URL.
    ///
    /// Output:
    /// - Response body bytes.
    ///
    /// # Errors
    /// - `FetchError` when the download fails after retries.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let http = &self.http;
        let bytes = self
            .retry
            .run(url, move || async move {
                let response = http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| FetchError::from_reqwest(&e))?;
                let response = check_status(response)?;
                response
                    .bytes()
                    .await
                    .map_err(|e| FetchError::from_reqwest(&e))
            })
            .await?;
        info!(url, bytes = bytes.len(), "downloaded image");
        Ok(bytes.to_vec())
    }
}

/// What: Query parameters of an `imageinfo` lookup.
///
/// Inputs:
/// - `file_name`: Media file name.
///
/// Output:
/// - `(name, value)` pairs for `action=query&prop=imageinfo&iiprop=url`.
#[must_use]
pub fn image_info_query(file_name: &str) -> [(&'static str, String); 5] {
    [
        ("action", "query".to_string()),
        ("titles", format!("File:{file_name}")),
        ("prop", "imageinfo".to_string()),
        ("iiprop", "url".to_string()),
        ("format", "json".to_string()),
    ]
}

/// What: Extract the first image URL from an `imageinfo` response.
///
/// Inputs:
/// - `body`: Parsed JSON response.
///
/// Output:
/// - `Some(url)` from the first page carrying `imageinfo`, otherwise `None`.
///
/// Details:
/// - Missing files come back as pages without `imageinfo` (and a `missing` flag).
#[must_use]
pub fn parse_image_url(body: &Value) -> Option<String> {
    body.get("query")?
        .get("pages")?
        .as_object()?
        .values()
        .find_map(|page| {
            page.get("imageinfo")?
                .as_array()?
                .first()?
                .get("url")?
                .as_str()
                .map(ToString::to_string)
        })
}

/// Turn non-success statuses into `FetchError::Http`.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::Http(http_error_message(
            status,
            response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok()),
        )));
    }
    Ok(response)
}

/// What: Format an HTTP error status for logs.
///
/// Inputs:
/// - `status`: Response status.
/// - `retry_after`: `Retry-After` header value, if any.
///
/// Output:
/// - Message naming rate limiting and unavailability explicitly.
fn http_error_message(status: reqwest::StatusCode, retry_after: Option<&str>) -> String {
    let mut msg = match status.as_u16() {
        429 => "HTTP 429 Too Many Requests - rate limited by server".to_string(),
        503 => "HTTP 503 Service Unavailable".to_string(),
        _ => format!("HTTP error: {status}"),
    };
    if let Some(retry) = retry_after
        && matches!(status.as_u16(), 429 | 503)
    {
        msg.push_str(" (Retry-After: ");
        msg.push_str(retry);
        msg.push(')');
    }
    msg
}
