use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, USER_AGENT};
use reqwest::{Body, Client, Method, Request, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::Target;
use crate::error::ApiError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Process-wide handle, built on first use against the build-time target.
pub fn client() -> &'static ClientHandle {
    static CLIENT: OnceLock<ClientHandle> = OnceLock::new();
    init_once(&CLIENT, build_shared)
}

fn init_once<F>(cell: &OnceLock<ClientHandle>, build: F) -> &ClientHandle
where
    F: FnOnce() -> Result<ClientHandle, ApiError>,
{
    cell.get_or_init(|| build().expect("failed to build HTTP client"))
}

fn build_shared() -> Result<ClientHandle, ApiError> {
    if let Some(raw) = Target::unrecognized_build_value() {
        warn!(value = raw, "unknown COUNTRYINFO_TARGET, using production");
    }
    let target = Target::selected();
    let handle = ClientHandle::new(ClientConfig::for_target(target)?)?;
    debug!(%target, base_url = %handle.base_url(), "shared HTTP client initialized");
    Ok(handle)
}

/// How much of each exchange the handle records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    None,
    /// Request line and response status.
    #[cfg_attr(not(test), allow(dead_code))]
    Basic,
    /// Basic plus headers.
    #[cfg_attr(not(test), allow(dead_code))]
    Headers,
    /// Headers plus full bodies.
    Body,
}

impl LogLevel {
    fn logs_headers(self) -> bool {
        self >= LogLevel::Headers
    }

    fn logs_bodies(self) -> bool {
        self >= LogLevel::Body
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => write!(f, "none"),
            LogLevel::Basic => write!(f, "basic"),
            LogLevel::Headers => write!(f, "headers"),
            LogLevel::Body => write!(f, "body"),
        }
    }
}

/// JSON encoding of request payloads and decoding of response payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub const CONTENT_TYPE: &'static str = "application/json";

    pub fn encode<B: Serialize + ?Sized>(&self, body: &B) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(body).map_err(ApiError::Encode)
    }

    pub fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|source| ApiError::Decode {
            source,
            body: body.to_string(),
        })
    }

    /// Server errors come back as `{"error": "..."}`; anything else is shown as-is.
    fn error_message(&self, body: &str) -> String {
        if let Ok(value) = serde_json::from_str::<Value>(body)
            && let Some(message) = value.get("error").and_then(Value::as_str)
        {
            return message.to_string();
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "(empty body)".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub log_level: LogLevel,
}

impl ClientConfig {
    pub fn for_target(target: Target) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(target.base_url())?,
            log_level: LogLevel::Body,
        })
    }
}

/// Configured transport shared by every call site. Immutable once built.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    http: Client,
    base_url: Url,
    log_level: LogLevel,
    codec: JsonCodec,
}

impl ClientHandle {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            log_level: config.log_level,
            codec: JsonCodec,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, query, None).await
    }

    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, query)?;
        let encoded = body.map(|b| self.codec.encode(b)).transpose()?;

        // Set per request so the logged headers are the ones sent.
        let mut builder = self
            .http
            .request(method, url)
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, JsonCodec::CONTENT_TYPE);
        if let Some(bytes) = encoded {
            builder = builder
                .header(CONTENT_TYPE, JsonCodec::CONTENT_TYPE)
                .body(bytes);
        }
        let request = builder.build()?;
        self.log_request(&request);

        let started = Instant::now();
        let response = self.http.execute(request).await.inspect_err(|err| {
            if self.log_level > LogLevel::None {
                debug!("<-- HTTP FAILED: {}", err);
            }
        })?;
        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let text = response.text().await?;
        self.log_response(status, &url, &headers, &text, started.elapsed());

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: self.codec.error_message(&text),
            });
        }
        self.codec.decode(&text)
    }

    fn log_request(&self, request: &Request) {
        if self.log_level == LogLevel::None {
            return;
        }
        let method = request.method();
        let body = request.body().and_then(Body::as_bytes);
        let size = body.map_or(0, <[u8]>::len);
        debug!("--> {} {} ({}-byte body)", method, request.url(), size);
        if self.log_level.logs_headers() {
            log_headers(request.headers());
        }
        if self.log_level.logs_bodies() {
            if let Some(body) = body {
                debug!("{}", String::from_utf8_lossy(body));
            }
            debug!("--> END {}", method);
        }
    }

    fn log_response(
        &self,
        status: StatusCode,
        url: &Url,
        headers: &HeaderMap,
        body: &str,
        elapsed: Duration,
    ) {
        if self.log_level == LogLevel::None {
            return;
        }
        debug!(
            "<-- {} {} ({}ms, {}-byte body)",
            status,
            url,
            elapsed.as_millis(),
            body.len()
        );
        if self.log_level.logs_headers() {
            log_headers(headers);
        }
        if self.log_level.logs_bodies() {
            if !body.is_empty() {
                debug!("{}", body);
            }
            debug!("<-- END HTTP");
        }
    }
}

fn log_headers(headers: &HeaderMap) {
    for (name, value) in headers {
        debug!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
}
