use std::time::Instant;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE,
};
use reqwest::{Method, Url};
use tracing::debug;
use zerokite_core::{
    normalize, ApiBody, ConfigError, RawResponse, API_VERSION, API_VERSION_HEADER,
    MAX_RESPONSE_BYTES,
};

use crate::errors::CliError;
use crate::modules::system::AuthContext;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One call against the remote API. Built per call, never retained.
#[derive(Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    route: String,
    api_key: String,
    access_token: Option<String>,
    params: Vec<(String, String)>,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, route: impl Into<String>, api_key: &str) -> Self {
        Self {
            method,
            route: route.into(),
            api_key: api_key.to_string(),
            access_token: None,
            params: Vec::new(),
        }
    }

    pub(crate) fn authorized(method: Method, route: impl Into<String>, auth: &AuthContext) -> Self {
        Self::new(method, route, &auth.api_key).access_token(&auth.access_token)
    }

    pub(crate) fn access_token(mut self, access_token: &str) -> Self {
        self.access_token = Some(access_token.to_string());
        self
    }

    /// Empty values are dropped, matching how the API treats absent fields.
    pub(crate) fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.params.push((key.to_string(), value));
        }
        self
    }

    pub(crate) fn opt_param<V: Into<String>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub(crate) fn params<K, V, I>(self, params: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        params
            .into_iter()
            .fold(self, |request, (key, value)| request.param(key.as_ref(), value))
    }
}

fn params_in_query(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::DELETE | Method::HEAD | Method::OPTIONS
    )
}

#[derive(Debug)]
pub(crate) struct PreparedRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<Vec<u8>>,
}

/// Single request/response cycle. No retries, no redirects, no caching.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Transport {
    pub(crate) fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            max_body_bytes: MAX_RESPONSE_BYTES,
        }
    }

    pub(crate) async fn send(&self, request: PreparedRequest) -> Result<RawResponse, CliError> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let transport_error = |source| CliError::Transport {
            url: url.to_string(),
            source,
        };

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        debug!(method = %method, url = %url, "http request");
        let start = Instant::now();
        let mut response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        let too_large = || CliError::BodyTooLarge {
            url: url.to_string(),
            limit: self.max_body_bytes,
        };
        if response
            .content_length()
            .is_some_and(|length| length > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        debug!(
            method = %method,
            url = %url,
            status = %status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        Ok(RawResponse {
            status_code: status.as_u16(),
            body,
        })
    }
}

/// Authenticated request client: transport plus error normalization.
/// Stateless, so clones can be driven concurrently.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    transport: Transport,
    base_url: String,
}

impl ApiClient {
    pub(crate) fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            transport: Transport::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.transport.max_body_bytes = limit;
        self
    }

    pub(crate) fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest, CliError> {
        let target = format!("{}{}", self.base_url, request.route);
        let mut url = Url::parse(&target).map_err(|_| ConfigError::InvalidApiBase(target))?;

        let mut headers = HeaderMap::new();
        let version_header = HeaderName::from_bytes(API_VERSION_HEADER.as_bytes())
            .map_err(|_| ConfigError::InvalidHeaderValue)?;
        headers.insert(version_header, HeaderValue::from_static(API_VERSION));
        if let Some(access_token) = request.access_token.as_deref() {
            let value = HeaderValue::from_str(&format!(
                "token {}:{}",
                request.api_key, access_token
            ))
            .map_err(|_| ConfigError::InvalidHeaderValue)?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut body = None;
        if !request.params.is_empty() {
            if params_in_query(&request.method) {
                url.query_pairs_mut().extend_pairs(&request.params);
            } else {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&request.params)
                    .finish()
                    .into_bytes();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                headers.insert(CONTENT_LENGTH, HeaderValue::from(encoded.len()));
                body = Some(encoded);
            }
        }

        Ok(PreparedRequest {
            method: request.method.clone(),
            url,
            headers,
            body,
        })
    }

    pub(crate) async fn call(&self, request: ApiRequest) -> Result<ApiBody, CliError> {
        let prepared = self.prepare(&request)?;
        let raw = self.transport.send(prepared).await?;
        Ok(normalize(raw)?)
    }
}
