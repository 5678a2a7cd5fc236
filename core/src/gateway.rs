//! The one place where endpoints become HTTP requests and bodies become JSON.
//!
//! # Design
//! `Gateway` holds an immutable base URL and a `Transport`, nothing else, so
//! calls are independent and can run concurrently when the transport allows
//! it. `build_request` and `parse_response` are pure; `call` chains them
//! around a single `Transport::execute` and never retries.

use log::{debug, warn};
use serde_json::Value;
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::Params;

#[derive(Debug, Clone)]
pub struct Gateway<T> {
    base_url: Url,
    transport: T,
}

impl<T> Gateway<T> {
    pub fn new(base_url: &str, transport: T) -> ApiResult<Self> {
        let mut parsed = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{base_url}: cannot carry path segments"
            )));
        }
        parsed.set_query(None);
        parsed.set_fragment(None);

        Ok(Self {
            base_url: parsed,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `endpoint`.
    ///
    /// The URL is `base/name/` followed by one `segment/` per path argument,
    /// each segment percent-encoded. GET parameters become the query string;
    /// POST parameters become a JSON body.
    pub fn build_request(
        &self,
        endpoint: Endpoint,
        path: &[&str],
        params: Option<&Params>,
    ) -> ApiResult<HttpRequest> {
        let descriptor = endpoint.descriptor();
        if !descriptor.path_args.accepts(path.len()) {
            return Err(ApiError::Validation(format!(
                "{} takes {:?} path arguments, got {}",
                descriptor.name,
                descriptor.path_args,
                path.len()
            )));
        }
        if path.iter().any(|segment| segment.is_empty()) {
            return Err(ApiError::Validation(format!(
                "{}: path arguments must not be empty",
                descriptor.name
            )));
        }
        // `.` and `..` would be resolved away by the URL parser.
        if let Some(segment) = path.iter().find(|segment| matches!(**segment, "." | "..")) {
            return Err(ApiError::Validation(format!(
                "{}: `{segment}` is not a valid path argument",
                descriptor.name
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(descriptor.name)
            .extend(path)
            .push("");

        let params = params.filter(|p| !p.is_empty());
        let (headers, body) = match descriptor.method {
            HttpMethod::Get => {
                if let Some(params) = params {
                    url.query_pairs_mut().extend_pairs(params.query_pairs());
                }
                (Vec::new(), None)
            }
            HttpMethod::Post => match params {
                Some(params) => {
                    let body = serde_json::to_string(&params.to_json())
                        .map_err(ApiError::Serialization)?;
                    (
                        vec![("content-type".to_string(), "application/json".to_string())],
                        Some(body),
                    )
                }
                None => (Vec::new(), None),
            },
        };

        Ok(HttpRequest {
            method: descriptor.method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Decode a response body as JSON, whatever the status code.
    ///
    /// Error payloads from the remote service are returned as data.
    pub fn parse_response(&self, response: HttpResponse) -> ApiResult<Value> {
        let value: Value = serde_json::from_str(&response.body).map_err(|source| {
            warn!("undecodable response body (HTTP {}): {source}", response.status);
            ApiError::Decode {
                status: response.status,
                source,
            }
        })?;

        if let Some(message) = remote_error(&value) {
            debug!("remote service answered with an error payload: {message}");
        }
        Ok(value)
    }
}

impl<T: Transport> Gateway<T> {
    /// Build, send and decode one request.
    pub fn call(
        &self,
        endpoint: Endpoint,
        path: &[&str],
        params: Option<&Params>,
    ) -> ApiResult<Value> {
        let request = self.build_request(endpoint, path, params)?;
        debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.execute(&request)?;
        self.parse_response(response)
    }
}

/// The message of a `{"error": "..."}` payload, if `value` is one.
pub fn remote_error(value: &Value) -> Option<&str> {
    value.get("error").and_then(Value::as_str)
}
