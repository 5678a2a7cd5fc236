//! Every client operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `ShapeShiftClient`
//! over real HTTP through the default ureq transport, so URL building, body
//! encoding and response decoding are checked end-to-end.

use std::net::SocketAddr;

use serde_json::json;
use shapeshift_core::{
    remote_error, ApiError, ClientConfig, Decimal, SendAmountRequest, ShapeShiftClient,
    ShiftOptions, ShiftRequest,
};

fn start_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> ShapeShiftClient {
    ShapeShiftClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap()
}

#[test]
fn market_data_operations() {
    let client = client(start_mock_server());

    let rate = client.rate("btc_ltc").unwrap();
    assert_eq!(rate, json!({"pair": "btc_ltc", "rate": "70.1234"}));

    let limit = client.limit("btc_ltc").unwrap();
    assert_eq!(limit["pair"], "btc_ltc");

    let all = client.market_info(None).unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);
    let one = client.market_info(Some("ltc_btc")).unwrap();
    assert_eq!(one["pair"], "ltc_btc");

    let recent = client.recent_tx(None).unwrap();
    assert_eq!(recent.as_array().unwrap().len(), 5);
    let recent = client.recent_tx(Some(50)).unwrap();
    assert_eq!(recent.as_array().unwrap().len(), 50);

    let coins = client.get_coins().unwrap();
    assert_eq!(coins["LTC"]["name"], "Litecoin");
    assert_eq!(client.online_coins().unwrap(), json!(["BTC", "LTC"]));
    assert_eq!(client.offline_coins().unwrap(), json!(["DOGE"]));
    assert_eq!(client.valid_pairs().unwrap(), json!(["btc_ltc", "ltc_btc"]));

    let valid = client
        .validate_address("1BoatSLRHtKNngkdXEeobR76b53LETtpyT", "BTC")
        .unwrap();
    assert_eq!(valid["isvalid"], true);
}

#[test]
fn remote_errors_are_returned_as_data() {
    let client = client(start_mock_server());

    let value = client.rate("btc_xyz").unwrap();
    assert_eq!(remote_error(&value), Some("Unknown pair"));

    let value = client.tx_by_api_key("not-the-key").unwrap();
    assert_eq!(remote_error(&value), Some("Invalid API key"));
}

#[test]
fn recent_tx_out_of_range_is_rejected_locally() {
    let client = client(start_mock_server());
    let err = client.recent_tx(Some(60)).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn shift_lifecycle() {
    let client = client(start_mock_server());

    // Step 1: open a shift with one optional field.
    let request = ShiftRequest::new("LWITHDRAWADDRESS", "btc_ltc")
        .with_options(ShiftOptions::default().return_address("1RETURNADDRESS"));
    let created = client.shift(&request).unwrap();
    assert_eq!(created["withdrawal"], "LWITHDRAWADDRESS");
    assert_eq!(created["returnAddress"], "1RETURNADDRESS");
    assert!(created.get("destTag").is_none(), "omitted fields must not be sent");
    let deposit = created["deposit"].as_str().unwrap().to_string();
    let order_id = created["orderId"].as_str().unwrap().to_string();

    // Step 2: status lookups.
    assert_eq!(client.tx_stat(&deposit).unwrap()["status"], "no_deposits");
    assert_eq!(client.order_info(&order_id).unwrap()["deposit"], deposit.as_str());

    // Step 3: affiliate lookups.
    let by_key = client.tx_by_api_key(mock_server::PRIVATE_API_KEY).unwrap();
    assert_eq!(by_key.as_array().unwrap().len(), 1);
    let by_address = client
        .tx_by_address("LWITHDRAWADDRESS", mock_server::PRIVATE_API_KEY)
        .unwrap();
    assert_eq!(by_address.as_array().unwrap().len(), 1);

    // Step 4: a variable-amount shift has no expiry window.
    assert!(remote_error(&client.time_remaining(&deposit).unwrap()).is_some());

    // Step 5: cancel, then cancel again.
    assert!(client.cancel_pending(&deposit).unwrap().get("success").is_some());
    assert!(remote_error(&client.cancel_pending(&deposit).unwrap()).is_some());

    // Step 6: receipt.
    let mail = client.mail("mail@example.com", "123ABC").unwrap();
    assert_eq!(mail["email"]["status"], "success");
}

#[test]
fn send_amount_and_quote() {
    let client = client(start_mock_server());

    let quote = client.quote_send_amount(Decimal::new(15, 1), "ltc_btc").unwrap();
    assert_eq!(quote["success"]["withdrawalAmount"], "1.5");
    assert!(quote["success"].get("deposit").is_none());

    let request = SendAmountRequest::new(Decimal::new(15, 1), "1WITHDRAW", "ltc_btc")
        .with_options(ShiftOptions::default().api_key("public-key"));
    let fixed = client.send_amount(&request).unwrap();
    let deposit = fixed["success"]["deposit"].as_str().unwrap().to_string();
    assert_eq!(fixed["success"]["apiPubKey"], "public-key");

    let remaining = client.time_remaining(&deposit).unwrap();
    assert_eq!(remaining["status"], "pending");
}

#[test]
fn unknown_route_is_a_decode_error() {
    // The mock answers unknown routes with an empty 404 body.
    let addr = start_mock_server();
    let config = ClientConfig::new(format!("http://{addr}/nowhere/"));
    let stray = ShapeShiftClient::new(&config).unwrap();
    let err = stray.get_coins().unwrap_err();
    assert!(err.is_decode(), "{err}");
}

#[test]
fn refused_connection_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let err = client(addr).get_coins().unwrap_err();
    assert!(err.is_transport(), "{err}");
    assert!(err.is_retryable());
}
