//! Typed wrappers, one per remote operation.
//!
//! # Design
//! Every method is a fixed-shape call through `Gateway::call`. Arguments the
//! remote service would reject anyway are checked here first when the check
//! is cheap and local (the `recenttx` range); everything else goes out as-is.
//! Responses are returned as untyped JSON because their shape belongs to the
//! remote service.

use std::fmt;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::{ApiError, ApiResult};
use crate::gateway::Gateway;
use crate::http::Transport;
use crate::settings::ClientConfig;
use crate::transport::UreqTransport;
use crate::types::{CancelPendingRequest, MailRequest, Params, SendAmountRequest, ShiftRequest};

pub const API_DOC_URL: &str = "https://info.shapeshift.io/api/";

/// Largest value `recent_tx` accepts.
pub const MAX_RECENT_TX: u32 = 50;
/// What the remote service returns when `recent_tx` gets no count.
pub const DEFAULT_RECENT_TX: u32 = 5;

/// Client for the ShapeShift public API.
#[derive(Debug, Clone)]
pub struct ShapeShiftClient<T = UreqTransport> {
    gateway: Gateway<T>,
}

impl ShapeShiftClient<UreqTransport> {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Self::with_transport(&config.base_url, UreqTransport::new(config.timeout()))
    }

    /// Client configured from `SHAPESHIFT_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(&ClientConfig::from_env()?)
    }
}

impl<T: Transport> ShapeShiftClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> ApiResult<Self> {
        Ok(Self {
            gateway: Gateway::new(base_url, transport)?,
        })
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    /// Current rate for `pair`, e.g. `btc_ltc`. Excludes the miner fee.
    pub fn rate(&self, pair: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::Rate, &[pair], None)
    }

    /// Current deposit limit for `pair`.
    pub fn limit(&self, pair: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::Limit, &[pair], None)
    }

    /// Market info (rate, limits, miner fee) for one pair, or for every pair
    /// when `pair` is `None` or empty.
    pub fn market_info(&self, pair: Option<&str>) -> ApiResult<Value> {
        match pair.filter(|p| !p.is_empty()) {
            Some(pair) => self.gateway.call(Endpoint::MarketInfo, &[pair], None),
            None => self.gateway.call(Endpoint::MarketInfo, &[], None),
        }
    }

    /// Most recent transactions, `DEFAULT_RECENT_TX` of them unless told
    /// otherwise.
    ///
    /// Counts outside `1..=MAX_RECENT_TX` are rejected without a request.
    pub fn recent_tx(&self, max: Option<u32>) -> ApiResult<Value> {
        let max = max.unwrap_or(DEFAULT_RECENT_TX);
        if !(1..=MAX_RECENT_TX).contains(&max) {
            return Err(ApiError::Validation(format!(
                "max transactions must be between 1 and {MAX_RECENT_TX}, got {max}"
            )));
        }
        self.gateway.call(Endpoint::RecentTx, &[&max.to_string()], None)
    }

    /// Status of the most recent deposit to `address`.
    pub fn tx_stat(&self, address: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::TxStat, &[address], None)
    }

    /// Seconds left before a fixed-amount transaction expires.
    pub fn time_remaining(&self, address: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::TimeRemaining, &[address], None)
    }

    pub fn get_coins(&self) -> ApiResult<Value> {
        self.gateway.call(Endpoint::GetCoins, &[], None)
    }

    pub fn online_coins(&self) -> ApiResult<Value> {
        self.gateway.call(Endpoint::OnlineCoins, &[], None)
    }

    pub fn offline_coins(&self) -> ApiResult<Value> {
        self.gateway.call(Endpoint::OfflineCoins, &[], None)
    }

    pub fn valid_pairs(&self) -> ApiResult<Value> {
        self.gateway.call(Endpoint::ValidPairs, &[], None)
    }

    /// Every transaction created with the affiliate key pair. Takes the
    /// PRIVATE key.
    pub fn tx_by_api_key(&self, private_key: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::TxByApiKey, &[private_key], None)
    }

    /// Transactions sent to `address` that were created with the affiliate
    /// key pair. Takes the PRIVATE key.
    pub fn tx_by_address(&self, address: &str, private_key: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::TxByAddress, &[address, private_key], None)
    }

    pub fn validate_address(&self, address: &str, coin_symbol: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::ValidateAddress, &[address, coin_symbol], None)
    }

    pub fn order_info(&self, order_id: &str) -> ApiResult<Value> {
        self.gateway.call(Endpoint::OrderInfo, &[order_id], None)
    }

    /// Open an exchange; the response carries the deposit address.
    pub fn shift(&self, request: &ShiftRequest) -> ApiResult<Value> {
        self.post(Endpoint::Shift, request)
    }

    /// Request a fixed amount sent to the withdrawal address.
    pub fn send_amount(&self, request: &SendAmountRequest) -> ApiResult<Value> {
        self.post(Endpoint::SendAmount, request)
    }

    /// Price quote for sending `amount` over `pair`. No deposit address is
    /// created.
    pub fn quote_send_amount(&self, amount: Decimal, pair: &str) -> ApiResult<Value> {
        self.post(Endpoint::SendAmount, &SendAmountRequest::quote(amount, pair))
    }

    /// Ask for an email receipt of the withdrawal `txid`.
    pub fn mail(&self, email: &str, txid: &str) -> ApiResult<Value> {
        let request = MailRequest {
            email: email.to_string(),
            txid: txid.to_string(),
        };
        self.post(Endpoint::Mail, &request)
    }

    /// Cancel a pending transaction by its deposit address. Fails remotely
    /// once funds have been sent.
    pub fn cancel_pending(&self, address: &str) -> ApiResult<Value> {
        let request = CancelPendingRequest {
            address: address.to_string(),
        };
        self.post(Endpoint::CancelPending, &request)
    }

    fn post<P: serde::Serialize>(&self, endpoint: Endpoint, payload: &P) -> ApiResult<Value> {
        let params = Params::from_serialize(payload)?;
        self.gateway.call(endpoint, &[], Some(&params))
    }
}

impl<T> fmt::Display for ShapeShiftClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShapeShift API client for {}\nDocumentation can be found here: {API_DOC_URL}",
            self.gateway.base_url()
        )
    }
}
