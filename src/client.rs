//! Main Feedly client implementation.

use crate::cache::{cache_key, Cache, FileCache};
use crate::error::{Error, Result};
use crate::request::{resolve_url, Request};
use crate::resources::{Categories, Entries, Markers, Profiles, Streams, Subscriptions};
use crate::response::{Rate, Response};
use crate::version::{build_user_agent, API_VERSION};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Environment variable consulted for the access token when none is given.
pub const ACCESS_TOKEN_ENV: &str = "FEEDLY_ACCESS_TOKEN";

const BASE_URL_CLOUD: &str = "https://cloud.feedly.com";
const BASE_URL_SANDBOX: &str = "https://sandbox.feedly.com";

/// Feedly deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production cloud.
    #[default]
    Cloud,
    /// Developer sandbox.
    Sandbox,
}

impl Environment {
    /// Base URL of the environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Cloud => BASE_URL_CLOUD,
            Environment::Sandbox => BASE_URL_SANDBOX,
        }
    }
}

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    access_token: Option<String>,
    base_url: String,
    api_version: String,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
    cache: Option<Arc<dyn Cache>>,
    cache_enabled: bool,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self {
            access_token: None,
            base_url: BASE_URL_CLOUD.to_string(),
            api_version: API_VERSION.to_string(),
            user_agent: Some(build_user_agent(None)),
            http_client: None,
            cache: None,
            cache_enabled: false,
        }
    }

    /// Set the access token. Without one, `FEEDLY_ACCESS_TOKEN` is read at
    /// build time.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Talk to the given environment.
    pub fn environment(mut self, env: Environment) -> Self {
        self.base_url = env.base_url().to_string();
        self
    }

    /// Set the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API version segment.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into().trim_matches('/').to_string();
        self
    }

    /// Set the User-Agent header, or `None` to send none.
    pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, TLS).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a custom cache implementation.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Store cached responses under the given directory.
    pub fn cache_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.cache = Some(Arc::new(FileCache::new(dir)));
        self
    }

    /// Enable or disable caching.
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;

        if self.api_version.is_empty() {
            return Err(Error::Config("API version is required".into()));
        }

        if base_url.scheme() != "https" {
            warn!(
                base_url = %base_url,
                "API base URL is not using HTTPS. This is insecure."
            );
        }

        let access_token = self
            .access_token
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
            .filter(|t| !t.is_empty());
        if access_token.is_none() {
            debug!("No access token configured; requests will be unauthenticated");
        }

        let cache: Arc<dyn Cache> = self
            .cache
            .unwrap_or_else(|| Arc::new(FileCache::default()));

        Ok(Client {
            access_token,
            base_url,
            api_version: self.api_version,
            user_agent: self.user_agent.filter(|ua| !ua.is_empty()),
            http_client: self.http_client.unwrap_or_default(),
            cache,
            cache_enabled: AtomicBool::new(self.cache_enabled),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Feedly API client.
///
/// # Example
///
/// ```rust,no_run
/// use feedly::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), feedly::Error> {
///     let client = Client::builder().access_token("your-token").build()?;
///
///     for category in client.categories().get().await?.iter() {
///         println!("{} ({})", category.label, category.id);
///     }
///     Ok(())
/// }
/// ```
pub struct Client {
    access_token: Option<String>,
    base_url: Url,
    api_version: String,
    user_agent: Option<String>,
    http_client: reqwest::Client,
    cache: Arc<dyn Cache>,
    cache_enabled: AtomicBool,
}

/// Body of a dispatched request, before decoding.
struct RawResponse {
    body: Vec<u8>,
    rate: Rate,
    status: u16,
    cached: bool,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether responses are currently cached.
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled.load(Ordering::Relaxed)
    }

    /// Turn response caching on or off.
    pub fn set_cache_enabled(&self, enabled: bool) {
        self.cache_enabled.store(enabled, Ordering::Relaxed);
    }

    // === Resources ===

    /// Category endpoints.
    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    /// Entry endpoints.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    /// Marker endpoints.
    pub fn markers(&self) -> Markers<'_> {
        Markers::new(self)
    }

    /// Profile endpoints.
    pub fn profile(&self) -> Profiles<'_> {
        Profiles::new(self)
    }

    /// Stream endpoints.
    pub fn streams(&self) -> Streams<'_> {
        Streams::new(self)
    }

    /// Subscription endpoints.
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    // === Plumbing ===

    /// Build a request for a path relative to the versioned API root.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        rel: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        let url = resolve_url(&self.base_url, &self.api_version, rel)?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &self.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::MalformedRequest(format!("invalid access token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(ua) = &self.user_agent {
            let value = HeaderValue::from_str(ua)
                .map_err(|e| Error::MalformedRequest(format!("invalid user agent: {e}")))?;
            headers.insert(USER_AGENT, value);
        }

        let body = match body {
            Some(b) => {
                let bytes = serde_json::to_vec(b)
                    .map_err(|e| Error::MalformedRequest(format!("invalid body: {e}")))?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(bytes)
            }
            None => None,
        };

        Ok(Request {
            method,
            url,
            headers,
            body,
        })
    }

    /// Execute a request and decode its JSON body into `T`.
    ///
    /// An empty body decodes to `T::default()`.
    pub async fn execute<T>(&self, request: Request) -> Result<Response<T>>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.dispatch(request).await?;

        let data = if raw.body.trim_ascii().is_empty() {
            T::default()
        } else {
            match serde_json::from_slice(&raw.body) {
                Ok(data) => data,
                Err(source) => {
                    return Err(Error::Decode {
                        source,
                        rate: raw.rate,
                    })
                }
            }
        };

        Ok(Response {
            data,
            rate: raw.rate,
            status: raw.status,
            cached: raw.cached,
        })
    }

    /// Execute a request and copy the raw body into `sink`.
    ///
    /// Returns the number of bytes written.
    pub async fn execute_raw<W>(&self, request: Request, sink: &mut W) -> Result<Response<u64>>
    where
        W: Write + ?Sized,
    {
        let raw = self.dispatch(request).await?;
        sink.write_all(&raw.body)?;

        Ok(Response {
            data: raw.body.len() as u64,
            rate: raw.rate,
            status: raw.status,
            cached: raw.cached,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned + Default>(&self, rel: &str) -> Result<Response<T>> {
        let request = self.new_request(Method::GET, rel, None::<&()>)?;
        self.execute(request).await
    }

    pub(crate) async fn post<T, B>(&self, rel: &str, body: &B) -> Result<Response<T>>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(Method::POST, rel, Some(body))?;
        self.execute(request).await
    }

    async fn dispatch(&self, request: Request) -> Result<RawResponse> {
        // Only GETs are cached: POST bodies are not part of the key.
        let key = (self.cache_enabled() && request.method == Method::GET)
            .then(|| cache_key(&request.url));

        if let Some(key) = &key {
            if let Some(body) = self.cache.get(key)? {
                debug!(key = %key, bytes = body.len(), "Serving response from cache");
                return Ok(RawResponse {
                    body,
                    rate: Rate::default(),
                    status: StatusCode::OK.as_u16(),
                    cached: true,
                });
            }
        }

        debug!(method = %request.method, url = %request.url, "Sending request");

        let mut req = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let rate = Rate::from_headers(response.headers());
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            return Err(Error::from_response(status, &body, rate));
        }

        if let Some(key) = &key {
            self.cache.put(key, &body)?;
        }

        Ok(RawResponse {
            body,
            rate,
            status: status.as_u16(),
            cached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::builder()
            .access_token("tok")
            .user_agent(Some("test-agent".into()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_request_headers() {
        let req = client()
            .new_request(Method::GET, "profile", None::<&()>)
            .unwrap();
        assert_eq!(req.url.as_str(), "https://cloud.feedly.com/v3/profile");
        assert_eq!(req.headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert_eq!(req.headers.get(USER_AGENT).unwrap(), "test-agent");
        assert!(req.headers.get(CONTENT_TYPE).is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_new_request_body() {
        let ids = vec!["a", "b"];
        let req = client()
            .new_request(Method::POST, "entries/.mget", Some(&ids))
            .unwrap();
        assert_eq!(req.body.as_deref(), Some(&br#"["a","b"]"#[..]));
        assert_eq!(req.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_new_request_without_user_agent() {
        let client = Client::builder()
            .access_token("tok")
            .user_agent(None)
            .build()
            .unwrap();
        let req = client.new_request(Method::GET, "profile", None::<&()>).unwrap();
        assert!(req.headers.get(USER_AGENT).is_none());
    }

    #[test]
    fn test_environment_base_url() {
        let client = Client::builder()
            .access_token("tok")
            .environment(Environment::Sandbox)
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://sandbox.feedly.com/");
    }

    #[test]
    fn test_build_rejects_bad_config() {
        assert!(matches!(
            Client::builder().base_url("not a url").build(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Client::builder().api_version("/").build(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_cache_flag_toggles() {
        let client = client();
        assert!(!client.cache_enabled());
        client.set_cache_enabled(true);
        assert!(client.cache_enabled());
    }
}
