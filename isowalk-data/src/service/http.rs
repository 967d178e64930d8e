//! Blocking HTTP transport for the walking-isochrone service.

use std::time::Duration;

use isowalk_core::{
    Endpoint, IsochroneQuery, NearbyQuery, PoiTarget, RawResponse, WalkError, WalkService,
};
use log::debug;
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use crate::request::{PoiFeatureCollection, endpoint_url};

/// Error type for [`HttpWalkService`] construction failures.
#[derive(Debug, Error)]
pub enum ServiceBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Production base URL of the service.
pub const DEFAULT_BASE_URL: &str = "https://api.walkalytics.com";

/// Default user agent for service requests.
pub const DEFAULT_USER_AGENT: &str = "isowalk/0.1";

/// Header carrying the subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpWalkService`].
#[derive(Clone)]
pub struct WalkServiceConfig {
    /// Base URL of the service, without the endpoint path.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Subscription key; requests fail before sending when absent.
    pub subscription_key: Option<String>,
}

impl std::fmt::Debug for WalkServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkServiceConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field(
                "subscription_key",
                &self.subscription_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Default for WalkServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            subscription_key: None,
        }
    }
}

impl WalkServiceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the subscription key.
    #[must_use]
    pub fn with_subscription_key(mut self, key: impl Into<String>) -> Self {
        self.subscription_key = Some(key.into());
        self
    }
}

/// HTTP implementation of [`WalkService`].
///
/// The service owns a current-thread Tokio runtime reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime, requests run on the owned runtime. Inside a
/// multi-threaded runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]) the caller's handle is used with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime the owned runtime is used instead, which may
/// deadlock if the caller's runtime drives IO this request depends on.
///
/// Responses are buffered whatever their status; judging the status is the
/// decoder's job.
pub struct HttpWalkService {
    client: Client,
    config: WalkServiceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpWalkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpWalkService")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpWalkService {
    /// Create a service for `base_url` authenticated with `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(
        base_url: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, ServiceBuildError> {
        Self::with_config(WalkServiceConfig::new(base_url).with_subscription_key(key))
    }

    /// Create a service with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: WalkServiceConfig) -> Result<Self, ServiceBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ServiceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ServiceBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &WalkServiceConfig {
        &self.config
    }

    fn subscription_key(&self) -> Result<&str, WalkError> {
        self.config
            .subscription_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WalkError::MissingRequiredField { field: "key" })
    }

    fn url_for(
        &self,
        endpoint: Endpoint,
        pairs: &[(&'static str, String)],
    ) -> Result<Url, WalkError> {
        endpoint_url(&self.config.base_url, endpoint, pairs).map_err(|err| WalkError::Network {
            url: self.config.base_url.clone(),
            message: format!("invalid service URL: {err}"),
        })
    }

    /// Send a prepared request and buffer the response.
    async fn send_async(&self, request: RequestBuilder, url: &Url) -> Result<RawResponse, WalkError> {
        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        debug!("{final_url} answered {status} with {} bytes", body.len());
        Ok(RawResponse::new(status, final_url, body.to_vec()))
    }

    /// Block on `send_async` using whichever runtime is safe here.
    fn send(&self, request: RequestBuilder, url: &Url) -> Result<RawResponse, WalkError> {
        let future = self.send_async(request, url);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// Convert a reqwest error to a `WalkError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> WalkError {
        if error.is_timeout() {
            return WalkError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        WalkError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl WalkService for HttpWalkService {
    fn isochrone(
        &self,
        query: &IsochroneQuery,
        pois: &[PoiTarget],
    ) -> Result<RawResponse, WalkError> {
        let key = self.subscription_key()?;
        let url = self.url_for(Endpoint::Isochrone, &query.query_pairs())?;
        debug!("POST {url} with {} points of interest", pois.len());

        let mut request = self
            .client
            .post(url.clone())
            .header(SUBSCRIPTION_KEY_HEADER, key);
        if !pois.is_empty() {
            request = request.json(&PoiFeatureCollection::from_targets(pois));
        }
        self.send(request, &url)
    }

    fn nearby_stations(&self, query: &NearbyQuery) -> Result<RawResponse, WalkError> {
        let key = self.subscription_key()?;
        let url = self.url_for(Endpoint::PubTrans, &query.query_pairs())?;
        debug!("GET {url}");

        let request = self
            .client
            .get(url.clone())
            .header(SUBSCRIPTION_KEY_HEADER, key);
        self.send(request, &url)
    }
}
