//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! The gateway describes requests and responses as plain data. `Gateway::call`
//! hands the request to a `Transport`; hosts that want to run the IO
//! themselves can use `Gateway::build_request` and `Gateway::parse_response`
//! directly and never touch a `Transport` at all.

use crate::error::ApiResult;

/// HTTP method for a request. The remote API only uses these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is fully qualified, including any query string.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one `HttpRequest` and returns whatever the server answered.
///
/// Implementations must return non-2xx responses as `Ok`; only failures to
/// complete the exchange are errors, and those should be
/// `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> ApiResult<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> ApiResult<HttpResponse> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> ApiResult<HttpResponse> {
        (**self).execute(request)
    }
}
