use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::aggregator::FeedAggregator;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::observability::RequestTimer;

/// Typed client for the news backend.
///
/// With no base URL every operation takes its no-backend path: reads return
/// empty data, live feed and search run client-side, writes fail with
/// [`AppError::BackendNotConfigured`].
pub struct NewsApi {
    http: Client,
    base: Option<Url>,
    token: Option<String>,
    aggregator: FeedAggregator,
}

impl NewsApi {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        let aggregator = FeedAggregator::new(http.clone(), config.aggregator.clone());

        Ok(Self {
            http,
            base: config.api_url.clone(),
            token: None,
            aggregator,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.base.is_some()
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    pub fn aggregator(&self) -> &FeedAggregator {
        &self.aggregator
    }

    /// Resolves path segments against the base URL, escaping each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone().ok_or(AppError::BackendNotConfigured)?;
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("backend URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request; a non-success status becomes [`AppError::Backend`]
    /// carrying the backend's message, or `failure` when it has none.
    pub(crate) async fn execute(&self, builder: RequestBuilder, failure: &str) -> AppResult<Response> {
        let request = builder.build()?;
        let timer = RequestTimer::start(request.method().as_str(), request.url().path());
        let response = self.http.execute(request).await?;
        let status = response.status();
        timer.finish(status.as_u16());

        if status.is_success() {
            Ok(response)
        } else {
            Err(backend_error(response, failure).await)
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        failure: &str,
    ) -> AppResult<T> {
        let url = self.endpoint(segments)?;
        let response = self.execute(self.request(Method::GET, url), failure).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        failure: &str,
    ) -> AppResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = self
            .execute(self.request(method, url).json(body), failure)
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn send_empty(
        &self,
        method: Method,
        segments: &[&str],
        failure: &str,
    ) -> AppResult<()> {
        let url = self.endpoint(segments)?;
        self.execute(self.request(method, url), failure).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Text(String),
    Detailed { message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorField>,
    message: Option<String>,
}

async fn backend_error(response: Response, failure: &str) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| failure.to_string());
    log::warn!("Backend returned {}: {}", status, message);
    AppError::Backend {
        status: status.as_u16(),
        message,
    }
}

/// Pulls a human message out of `{"error": "..."}`, `{"error": {"message": ".."}}`
/// or `{"message": "..."}`.
fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.error {
        Some(ErrorField::Text(text)) => Some(text),
        Some(ErrorField::Detailed { message }) => Some(message),
        None => parsed.message,
    };
    message.filter(|m| !m.trim().is_empty())
}
