//! Blocking client for the ShapeShift exchange API.
//!
//! # Overview
//! A single `Gateway` turns an endpoint descriptor, optional path arguments
//! and optional parameters into one HTTP request, and decodes the answer as
//! JSON. `ShapeShiftClient` puts a typed method in front of each remote
//! operation.
//!
//! # Design
//! - The endpoint table (`Endpoint`) is data; adding an operation is one
//!   descriptor plus one wrapper method.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so the network can be swapped for any `Transport`, or skipped entirely
//!   with `Gateway::build_request` / `Gateway::parse_response`.
//! - Remote error payloads are data, not errors. `ApiError` only covers
//!   local validation, transport failures and undecodable bodies.
//!
//! # Example
//!
//! ```no_run
//! use shapeshift_core::{ClientConfig, ShapeShiftClient};
//!
//! let client = ShapeShiftClient::new(&ClientConfig::default())?;
//! let rate = client.rate("btc_ltc")?;
//! println!("{}", rate["rate"]);
//! # Ok::<(), shapeshift_core::ApiError>(())
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod http;
pub mod settings;
pub mod transport;
pub mod types;

pub use client::{ShapeShiftClient, API_DOC_URL, DEFAULT_RECENT_TX, MAX_RECENT_TX};
pub use endpoint::{Endpoint, EndpointDescriptor, PathArgs};
pub use error::{ApiError, ApiResult};
pub use gateway::{remote_error, Gateway};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use settings::ClientConfig;
pub use transport::UreqTransport;
pub use types::{
    CancelPendingRequest, MailRequest, Params, SendAmountRequest, ShiftOptions, ShiftRequest,
};

pub use rust_decimal::Decimal;
