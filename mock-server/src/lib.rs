//! In-process stand-in for the ShapeShift API.
//!
//! Serves the same paths as the public service (every path ends with `/`)
//! with canned market data and an in-memory order book keyed by deposit
//! address, so shift / txstat / cancelpending round-trips behave plausibly.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Private key accepted by the affiliate lookups.
pub const PRIVATE_API_KEY: &str = "private-key";

/// Pair, rate, deposit limit, minimum, miner fee.
const MARKETS: [(&str, f64, f64, f64, f64); 2] = [
    ("btc_ltc", 70.1234, 1.5, 0.0002, 0.001),
    ("ltc_btc", 0.01412, 105.0, 0.02, 0.00003),
];

const ONLINE_COINS: [(&str, &str); 2] = [("BTC", "Bitcoin"), ("LTC", "Litecoin")];
const OFFLINE_COINS: [(&str, &str); 1] = [("DOGE", "Dogecoin")];

const QUOTE_TTL_SECONDS: u64 = 600;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: Uuid,
    pub deposit: String,
    pub pair: String,
    pub withdrawal: Option<String>,
    pub return_address: Option<String>,
    pub amount: Option<f64>,
    pub status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftInput {
    pub withdrawal: String,
    pub pair: String,
    pub return_address: Option<String>,
    pub dest_tag: Option<String>,
    pub rs_address: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAmountInput {
    pub amount: f64,
    pub withdrawal: Option<String>,
    pub pair: String,
    pub return_address: Option<String>,
    pub dest_tag: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct MailInput {
    pub email: String,
    pub txid: String,
}

#[derive(Deserialize)]
pub struct CancelInput {
    pub address: String,
}

pub type Db = Arc<RwLock<HashMap<String, Order>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/rate/{pair}/", get(rate))
        .route("/limit/{pair}/", get(limit))
        .route("/marketinfo/", get(all_market_info))
        .route("/marketinfo/{pair}/", get(market_info))
        .route("/recenttx/{max}/", get(recent_tx))
        .route("/txstat/{address}/", get(tx_stat))
        .route("/timeremaining/{address}/", get(time_remaining))
        .route("/getcoins/", get(get_coins))
        .route("/onlinecoins/", get(online_coins))
        .route("/offlinecoins/", get(offline_coins))
        .route("/validpairs/", get(valid_pairs))
        .route("/txbyapikey/{key}/", get(tx_by_api_key))
        .route("/txbyaddress/{address}/{key}/", get(tx_by_address))
        .route("/validateaddress/{address}/{coin}/", get(validate_address))
        .route("/orderInfo/{id}/", get(order_info))
        .route("/shift/", post(shift))
        .route("/sendamount/", post(send_amount))
        .route("/mail/", post(mail))
        .route("/cancelpending/", post(cancel_pending))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("mock ShapeShift API listening on {addr}");
    }
    axum::serve(listener, app()).await
}

fn market(pair: &str) -> Option<(&'static str, f64, f64, f64, f64)> {
    MARKETS.iter().copied().find(|m| m.0 == pair)
}

fn market_json((pair, rate, limit, min, miner_fee): (&str, f64, f64, f64, f64)) -> Value {
    json!({
        "pair": pair,
        "rate": rate,
        "limit": limit,
        "minimum": min,
        "minerFee": miner_fee,
    })
}

fn unknown_pair() -> Json<Value> {
    Json(json!({"error": "Unknown pair"}))
}

fn deposit_symbol(pair: &str) -> String {
    pair.split('_').next().unwrap_or_default().to_uppercase()
}

fn withdrawal_symbol(pair: &str) -> String {
    pair.split('_').nth(1).unwrap_or_default().to_uppercase()
}

async fn rate(Path(pair): Path<String>) -> Json<Value> {
    match market(&pair) {
        Some((pair, rate, ..)) => Json(json!({"pair": pair, "rate": format!("{rate}")})),
        None => unknown_pair(),
    }
}

async fn limit(Path(pair): Path<String>) -> Json<Value> {
    match market(&pair) {
        Some((pair, _, limit, min, _)) => Json(json!({
            "pair": pair,
            "limit": format!("{limit}"),
            "min": min,
        })),
        None => unknown_pair(),
    }
}

async fn all_market_info() -> Json<Value> {
    Json(Value::Array(MARKETS.iter().copied().map(market_json).collect()))
}

async fn market_info(Path(pair): Path<String>) -> Json<Value> {
    match market(&pair) {
        Some(m) => Json(market_json(m)),
        None => unknown_pair(),
    }
}

async fn recent_tx(Path(max): Path<usize>) -> Json<Value> {
    let txs = (0..max.min(50))
        .map(|i| {
            json!({
                "curIn": "BTC",
                "curOut": "LTC",
                "amount": 0.01 * (i + 1) as f64,
                "timestamp": 1_506_000_000 - i as u64 * 60,
            })
        })
        .collect();
    Json(Value::Array(txs))
}

async fn tx_stat(State(db): State<Db>, Path(address): Path<String>) -> Json<Value> {
    match db.read().await.get(&address) {
        Some(order) => Json(json!({"status": order.status, "address": address})),
        None => Json(json!({"status": "error", "error": "Address not found"})),
    }
}

async fn time_remaining(State(db): State<Db>, Path(address): Path<String>) -> Json<Value> {
    match db.read().await.get(&address) {
        Some(order) if order.amount.is_some() => Json(json!({
            "status": "pending",
            "seconds_remaining": QUOTE_TTL_SECONDS.to_string(),
        })),
        _ => Json(json!({"error": "Unable to find pending fixed amount transaction"})),
    }
}

fn coins_json<const N: usize>(coins: [(&str, &str); N], status: &str) -> Vec<(String, Value)> {
    coins
        .iter()
        .map(|(symbol, name)| {
            (
                symbol.to_string(),
                json!({
                    "name": name,
                    "symbol": symbol,
                    "image": format!(
                        "https://shapeshift.io/images/coins/{}.png",
                        name.to_lowercase()
                    ),
                    "status": status,
                }),
            )
        })
        .collect()
}

async fn get_coins() -> Json<Value> {
    let mut coins = coins_json(ONLINE_COINS, "available");
    coins.extend(coins_json(OFFLINE_COINS, "unavailable"));
    Json(Value::Object(coins.into_iter().collect()))
}

async fn online_coins() -> Json<Value> {
    Json(json!(ONLINE_COINS.map(|(symbol, _)| symbol)))
}

async fn offline_coins() -> Json<Value> {
    Json(json!(OFFLINE_COINS.map(|(symbol, _)| symbol)))
}

async fn valid_pairs() -> Json<Value> {
    Json(json!(MARKETS.map(|m| m.0)))
}

async fn tx_by_api_key(State(db): State<Db>, Path(key): Path<String>) -> Json<Value> {
    if key != PRIVATE_API_KEY {
        return Json(json!({"error": "Invalid API key"}));
    }
    let orders: Vec<Order> = db.read().await.values().cloned().collect();
    Json(json!(orders))
}

async fn tx_by_address(
    State(db): State<Db>,
    Path((address, key)): Path<(String, String)>,
) -> Json<Value> {
    if key != PRIVATE_API_KEY {
        return Json(json!({"error": "Invalid API key"}));
    }
    let orders: Vec<Order> = db
        .read()
        .await
        .values()
        .filter(|o| o.withdrawal.as_deref() == Some(address.as_str()))
        .cloned()
        .collect();
    Json(json!(orders))
}

async fn validate_address(Path((address, coin)): Path<(String, String)>) -> Json<Value> {
    let known = ONLINE_COINS
        .iter()
        .chain(OFFLINE_COINS.iter())
        .any(|(symbol, _)| symbol.eq_ignore_ascii_case(&coin));
    if !known {
        return Json(json!({"isvalid": false, "error": "Unknown coin"}));
    }
    let well_formed =
        (26..=35).contains(&address.len()) && address.chars().all(|c| c.is_ascii_alphanumeric());
    Json(json!({"isvalid": well_formed}))
}

async fn order_info(State(db): State<Db>, Path(id): Path<String>) -> Json<Value> {
    let orders = db.read().await;
    match orders.values().find(|o| o.order_id.to_string() == id) {
        Some(order) => Json(json!(order)),
        None => Json(json!({"error": "Order not found"})),
    }
}

fn new_order(
    pair: &str,
    withdrawal: Option<String>,
    return_address: Option<String>,
    amount: Option<f64>,
) -> Order {
    let order_id = Uuid::new_v4();
    Order {
        order_id,
        deposit: format!("dep{}", order_id.simple()),
        pair: pair.to_string(),
        withdrawal,
        return_address,
        amount,
        status: "no_deposits".to_string(),
    }
}

async fn shift(State(db): State<Db>, Json(input): Json<ShiftInput>) -> Json<Value> {
    if market(&input.pair).is_none() {
        return unknown_pair();
    }
    let order = new_order(
        &input.pair,
        Some(input.withdrawal.clone()),
        input.return_address.clone(),
        None,
    );

    let mut body = json!({
        "orderId": order.order_id,
        "deposit": order.deposit,
        "depositType": deposit_symbol(&input.pair),
        "withdrawal": input.withdrawal,
        "withdrawalType": withdrawal_symbol(&input.pair),
    });
    let optional = [
        ("returnAddress", input.return_address),
        ("destTag", input.dest_tag),
        ("rsAddress", input.rs_address),
        ("apiPubKey", input.api_key),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            body[key] = Value::String(value);
        }
    }

    db.write().await.insert(order.deposit.clone(), order);
    Json(body)
}

async fn send_amount(State(db): State<Db>, Json(input): Json<SendAmountInput>) -> Json<Value> {
    let Some((pair, rate, _, _, miner_fee)) = market(&input.pair) else {
        return unknown_pair();
    };

    let mut success = json!({
        "pair": pair,
        "withdrawalAmount": format!("{}", input.amount),
        "depositAmount": format!("{:.8}", (input.amount + miner_fee) / rate),
        "expiration": QUOTE_TTL_SECONDS,
        "quotedRate": format!("{rate}"),
        "minerFee": format!("{miner_fee}"),
    });

    if let Some(withdrawal) = input.withdrawal {
        let order = new_order(
            pair,
            Some(withdrawal.clone()),
            input.return_address,
            Some(input.amount),
        );
        success["orderId"] = json!(order.order_id);
        success["deposit"] = json!(order.deposit);
        success["withdrawal"] = json!(withdrawal);
        if let Some(tag) = input.dest_tag {
            success["destTag"] = json!(tag);
        }
        if let Some(key) = input.api_key {
            success["apiPubKey"] = json!(key);
        }
        db.write().await.insert(order.deposit.clone(), order);
    }

    Json(json!({"success": success}))
}

async fn mail(Json(input): Json<MailInput>) -> Json<Value> {
    if !input.email.contains('@') || input.txid.is_empty() {
        return Json(json!({"error": "Invalid email or txid"}));
    }
    Json(json!({"email": {"status": "success", "message": "Email receipt sent"}}))
}

async fn cancel_pending(State(db): State<Db>, Json(input): Json<CancelInput>) -> Json<Value> {
    match db.write().await.remove(&input.address) {
        Some(_) => Json(json!({"success": " Pending Transaction cancelled "})),
        None => Json(json!({"error": "Unable to find pending transaction"})),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_serializes_with_camel_case_keys() {
        let order = Order {
            order_id: Uuid::nil(),
            deposit: "dep".to_string(),
            pair: "btc_ltc".to_string(),
            withdrawal: Some("LADDR".to_string()),
            return_address: None,
            amount: None,
            status: "no_deposits".to_string(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["returnAddress"], Value::Null);
        assert_eq!(json["status"], "no_deposits");
    }

    #[test]
    fn shift_input_optional_fields_default_to_none() {
        let input: ShiftInput =
            serde_json::from_str(r#"{"withdrawal":"LADDR","pair":"btc_ltc"}"#).unwrap();
        assert!(input.return_address.is_none());
        assert!(input.dest_tag.is_none());
        assert!(input.api_key.is_none());
    }

    #[test]
    fn shift_input_rejects_missing_pair() {
        let result: Result<ShiftInput, _> = serde_json::from_str(r#"{"withdrawal":"LADDR"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn send_amount_input_accepts_quote_shape() {
        let input: SendAmountInput =
            serde_json::from_str(r#"{"amount":123.5,"pair":"ltc_btc"}"#).unwrap();
        assert_eq!(input.amount, 123.5);
        assert!(input.withdrawal.is_none());
    }

    #[test]
    fn pair_symbols() {
        assert_eq!(deposit_symbol("btc_ltc"), "BTC");
        assert_eq!(withdrawal_symbol("btc_ltc"), "LTC");
        assert!(market("btc_xyz").is_none());
    }
}
