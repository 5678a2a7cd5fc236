//! Request parameters and typed payloads for the POST endpoints.
//!
//! # Design
//! Optional fields are `Option`s that are skipped during serialization, and
//! `Params` drops any null that still gets through, so the wire never carries
//! a key whose value was not supplied.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Parameter set for one call. Null values are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`. A null value (including `None`) removes
    /// the key instead.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        match value.into() {
            Value::Null => {
                self.0.remove(&key);
            }
            value => {
                self.0.insert(key, value);
            }
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Build a parameter set from any value that serializes to a JSON object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> ApiResult<Self> {
        match serde_json::to_value(value).map_err(ApiError::Serialization)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ApiError::Validation(format!(
                "request parameters must be a JSON object, got {other}"
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key/value pairs as they appear in a query string.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.0.iter().map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.as_str(), text)
        })
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Optional fields shared by `shift` and `sendamount`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftOptions {
    /// Where the deposit goes back to if the exchange fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address: Option<String>,
    /// Ripple destination tag appended to the outgoing payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_tag: Option<String>,
    /// NXT public key, needed to fund new NXT accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rs_address: Option<String>,
    /// Affiliate PUBLIC key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ShiftOptions {
    pub fn return_address(mut self, address: impl Into<String>) -> Self {
        self.return_address = Some(address.into());
        self
    }

    pub fn dest_tag(mut self, tag: impl Into<String>) -> Self {
        self.dest_tag = Some(tag.into());
        self
    }

    pub fn rs_address(mut self, address: impl Into<String>) -> Self {
        self.rs_address = Some(address.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Payload for `shift`: open an exchange with a variable amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRequest {
    pub withdrawal: String,
    pub pair: String,
    #[serde(flatten)]
    pub options: ShiftOptions,
}

impl ShiftRequest {
    pub fn new(withdrawal: impl Into<String>, pair: impl Into<String>) -> Self {
        Self {
            withdrawal: withdrawal.into(),
            pair: pair.into(),
            options: ShiftOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ShiftOptions) -> Self {
        self.options = options;
        self
    }
}

/// Payload for `sendamount`.
///
/// Without a withdrawal address the remote service only quotes a price and
/// does not create a deposit address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendAmountRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal: Option<String>,
    pub pair: String,
    #[serde(flatten)]
    pub options: ShiftOptions,
}

impl SendAmountRequest {
    pub fn new(amount: Decimal, withdrawal: impl Into<String>, pair: impl Into<String>) -> Self {
        Self {
            amount,
            withdrawal: Some(withdrawal.into()),
            pair: pair.into(),
            options: ShiftOptions::default(),
        }
    }

    pub fn quote(amount: Decimal, pair: impl Into<String>) -> Self {
        Self {
            amount,
            withdrawal: None,
            pair: pair.into(),
            options: ShiftOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ShiftOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailRequest {
    pub email: String,
    /// Txid of the withdrawal to the user, not the deposit.
    pub txid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelPendingRequest {
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn insert_drops_null_values() {
        let params = Params::new()
            .with("pair", "btc_ltc")
            .with("destTag", None::<String>)
            .with("amount", 1.5);
        assert_eq!(params.len(), 2);
        assert!(params.get("destTag").is_none());
    }

    #[test]
    fn inserting_null_removes_existing_key() {
        let mut params = Params::new().with("apiKey", "abc");
        params.insert("apiKey", Value::Null);
        assert!(params.is_empty());
    }

    #[test]
    fn from_serialize_strips_nulls() {
        let params = Params::from_serialize(&json!({"address": "1abc", "note": null})).unwrap();
        assert_eq!(params.to_json(), json!({"address": "1abc"}));
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        let err = Params::from_serialize(&[1, 2, 3]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn query_pairs_render_scalars_as_text() {
        let params = Params::new().with("limit", 5).with("pair", "btc_ltc").with("live", true);
        let mut pairs: Vec<_> = params.query_pairs().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            [
                ("limit", "5".to_string()),
                ("live", "true".to_string()),
                ("pair", "btc_ltc".to_string()),
            ]
        );
    }

    #[test]
    fn shift_request_serializes_only_supplied_fields() {
        let req = ShiftRequest::new("LWITHDRAW", "btc_ltc")
            .with_options(ShiftOptions::default().return_address("1RETURN"));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"withdrawal": "LWITHDRAW", "pair": "btc_ltc", "returnAddress": "1RETURN"})
        );
    }

    #[test]
    fn shift_options_use_camel_case_keys() {
        let options = ShiftOptions::default()
            .return_address("r")
            .dest_tag("12")
            .rs_address("rs")
            .api_key("pub");
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"returnAddress": "r", "destTag": "12", "rsAddress": "rs", "apiKey": "pub"})
        );
    }

    #[test]
    fn amount_is_serialized_without_rounding() {
        let amount = Decimal::from_str("0.000000000000000001").unwrap();
        let req = SendAmountRequest::quote(amount, "eth_btc");
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"amount":0.000000000000000001,"pair":"eth_btc"}"#
        );

        let amount = Decimal::from_str("12345678.123456789012345678").unwrap();
        let req = SendAmountRequest::quote(amount, "eth_btc");
        let params = Params::from_serialize(&req).unwrap();
        assert_eq!(
            serde_json::to_string(&params.to_json()).unwrap(),
            r#"{"amount":12345678.123456789012345678,"pair":"eth_btc"}"#
        );
    }

    #[test]
    fn quote_request_has_no_withdrawal() {
        let req = SendAmountRequest::quote(Decimal::new(1235, 1), "ltc_btc");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"amount": 123.5, "pair": "ltc_btc"})
        );
    }
}
