//! End-to-end tests of the sub-clients against a mock API server.

use chrono::{Duration, SecondsFormat, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thesis_wallet_sdk::client::ProtectedOutcome;
use thesis_wallet_sdk::domain::payout::WithdrawalMethodDraft;
use thesis_wallet_sdk::error::{SdkError, ValidationError};
use thesis_wallet_sdk::prelude::*;

const TOKEN: &str = "test-token";

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn client_for(server: &MockServer) -> WalletClient {
    WalletClient::builder()
        .base_url(&server.uri())
        .access_token(TOKEN)
        .build()
        .unwrap()
}

fn account_json(balance: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "acc-1",
        "user_id": "u-1",
        "currency": "EUR",
        "balance": balance,
        "name": "Conto principale",
        "created_at": "2024-01-10T09:00:00Z"
    })
}

async fn mount_accounts(server: &MockServer, balance: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [account_json(json!(balance))]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn bitcoin(price: &str) -> MarketAsset {
    MarketAsset {
        id: "bitcoin".into(),
        symbol: "BTC".into(),
        name: "Bitcoin".into(),
        price: dec(price),
        change_24h: Decimal::ZERO,
        image: None,
        market_cap: None,
        explorer_url: None,
    }
}

fn in_five_minutes() -> String {
    (Utc::now() + Duration::minutes(5)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[tokio::test]
async fn bearer_token_is_sent_and_bad_balance_reads_as_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [account_json(json!("abc"))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = client_for(&server).accounts().list().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].balance, Decimal::ZERO);
    assert_eq!(accounts[0].name, "Conto principale");
}

#[tokio::test]
async fn top_up_invalidates_cached_accounts() {
    let server = MockServer::start().await;
    mount_accounts(&server, "100.00", 2).await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc-1/topup"))
        .and(body_json(json!({ "amount": "50" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_json(json!("150.00"))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.accounts().list().await.unwrap();
    // Served from cache.
    client.accounts().list().await.unwrap();
    assert!(client.cache().contains(&QueryKey::Accounts).await);

    let updated = client
        .accounts()
        .top_up(&AccountId::from("acc-1"), dec("50"))
        .await
        .unwrap();
    assert_eq!(updated.balance, dec("150.00"));
    assert!(!client.cache().contains(&QueryKey::Accounts).await);

    client.accounts().list().await.unwrap();
}

#[tokio::test]
async fn invalid_trades_never_reach_the_server() {
    let server = MockServer::start().await;
    mount_accounts(&server, "100.00", 1).await;
    Mock::given(method("POST"))
        .and(path("/market/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let trades = client.trades();

    let no_asset = TradeDraft::new(Side::Buy).account("acc-1").quantity("1");
    let err = trades.submit(&no_asset).await.unwrap_err();
    assert!(matches!(err, SdkError::Validation(ValidationError::MissingAsset)));

    let zero = TradeDraft::new(Side::Buy)
        .asset(&bitcoin("50"))
        .account("acc-1")
        .quantity("0");
    let err = trades.submit(&zero).await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Validation(ValidationError::NonPositiveQuantity)
    ));

    let too_much = zero.clone().quantity("2.5");
    match trades.submit(&too_much).await.unwrap_err() {
        SdkError::Validation(ValidationError::QuantityExceedsMax { quantity, max }) => {
            assert_eq!(quantity, dec("2.5"));
            assert_eq!(max, dec("2"));
        }
        other => panic!("expected QuantityExceedsMax, got {other:?}"),
    }
}

#[tokio::test]
async fn valid_trade_is_posted_and_refreshes_holdings() {
    let server = MockServer::start().await;
    mount_accounts(&server, "100.00", 1).await;
    Mock::given(method("POST"))
        .and(path("/market/orders"))
        .and(body_json(json!({
            "account_id": "acc-1",
            "asset_symbol": "BTC",
            "asset_name": "Bitcoin",
            "price_eur": "50",
            "quantity": "1.5",
            "side": "buy"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": account_json(json!("25.00")),
            "position": {
                "id": "p-1",
                "ticker": "BTC",
                "name": "Bitcoin",
                "amount": "1.5",
                "eur_value": "75.00",
                "created_at": "2024-01-10T09:00:00Z",
                "updated_at": "2024-01-10T09:00:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = TradeDraft::new(Side::Buy)
        .asset(&bitcoin("50"))
        .account("acc-1")
        .quantity("1.5");
    let result = client.trades().submit(&draft).await.unwrap();

    assert_eq!(result.account.balance, dec("25.00"));
    assert_eq!(result.position.map(|p| p.amount), Some(dec("1.5")));
    assert!(!client.cache().contains(&QueryKey::Accounts).await);
}

#[tokio::test]
async fn verified_otp_runs_the_pending_withdrawal_once() {
    let server = MockServer::start().await;
    mount_accounts(&server, "1000.00", 1).await;
    Mock::given(method("POST"))
        .and(path("/payouts/withdrawals"))
        .and(body_json(json!({
            "account_id": "acc-1",
            "method_id": "m-1",
            "amount": "200",
            "currency": "EUR"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "w-1",
            "user_id": "u-1",
            "method_id": "m-1",
            "account_id": "acc-1",
            "amount": "200.00",
            "fee": "1.00",
            "currency": "EUR",
            "total_debit": "201.00",
            "status": "PENDING",
            "requested_at": "2024-06-01T10:00:00Z",
            "reference": "WD-0A1B2C3D4E"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/otp/verify"))
        .and(body_json(json!({ "challenge_id": "c-1", "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "verified",
            "verified_at": Utc::now().to_rfc3339(),
            "expires_at": in_five_minutes()
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = WithdrawalDraft::new()
        .account("acc-1")
        .method("m-1")
        .amount("200");

    let outcome = client.payouts().request_withdrawal(&draft).await.unwrap();
    assert!(outcome.is_deferred());
    assert!(client.otp().has_pending());
    assert!(!client.otp().session_valid());

    let challenge = ChallengeId::from("c-1");
    let verified = client.otp().verify(Some(&challenge), " 123456 ").await.unwrap();
    let withdrawal = match verified.resumed {
        Some(Ok(ProtectedOutcome::Withdrawal(w))) => w,
        other => panic!("expected a withdrawal, got {other:?}"),
    };
    assert_eq!(withdrawal.reference, "WD-0A1B2C3D4E");
    assert_eq!(withdrawal.total_debit, dec("201.00"));
    assert!(!client.otp().has_pending());
    assert!(client.otp().session_valid());

    // Nothing left to resume.
    let again = client.otp().verify(Some(&challenge), "123456").await.unwrap();
    assert!(again.resumed.is_none());
}

#[tokio::test]
async fn rejected_code_keeps_the_action_parked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/otp/verify"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Codice non valido." })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payouts/withdrawal-methods"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = WithdrawalMethodDraft::new("Mario Rossi", "IT60X0542811101000000123456");
    let outcome = client.payouts().create_method(&draft).await.unwrap();
    assert!(outcome.is_deferred());

    let err = client
        .otp()
        .verify(Some(&ChallengeId::from("c-1")), "000000")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Codice non valido.");
    assert!(client.otp().has_pending());

    client.otp().dismiss();
    assert!(!client.otp().has_pending());
}

#[tokio::test]
async fn valid_session_runs_protected_action_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payouts/withdrawal-methods"))
        .and(body_json(json!({
            "account_holder_name": "Mario Rossi",
            "iban": "IT60X0542811101000000123456",
            "is_default": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "m-1",
            "user_id": "u-1",
            "type": "BANK_ACCOUNT",
            "iban": "IT60X0542811101000000123456",
            "bic": null,
            "bank_name": null,
            "account_holder_name": "Mario Rossi",
            "is_default": true,
            "status": "VERIFIED",
            "created_at": "2024-06-01T10:00:00Z",
            "verified_at": "2024-06-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .mfa()
        .store_expiry(Utc::now() + Duration::minutes(5))
        .unwrap();

    let draft = WithdrawalMethodDraft::new("Mario Rossi", "it60 x054 2811 1010 0000 0123 456")
        .default_method(true);
    let method = client
        .payouts()
        .create_method(&draft)
        .await
        .unwrap()
        .ready()
        .expect("session is valid");
    assert_eq!(method.masked_iban(), "IT60••••3456");
    assert!(!client.otp().has_pending());
}

#[tokio::test]
async fn server_side_mfa_rejection_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/profile/password"))
        .and(body_json(json!({
            "current_password": "old-password",
            "new_password": "new-password"
        })))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "La verifica MFA è scaduta. Ripeti la procedura di conferma."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .mfa()
        .store_expiry(Utc::now() + Duration::minutes(5))
        .unwrap();

    let change = PasswordChange::new("old-password", "new-password", "new-password");
    let err = client.profile().change_password(&change).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(matches!(&err, SdkError::Http(h) if h.is_mfa_required()));
    assert!(!client.otp().has_pending());
}

#[tokio::test]
async fn error_bodies_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market/prices"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["query"], "msg": "field required", "type": "missing" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/crypto-positions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.market().prices().await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.user_message(), "field required");

    let err = client.positions().list().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.user_message(), "API request failed with status 502");
}

#[tokio::test]
async fn withdrawal_above_balance_is_blocked_locally() {
    let server = MockServer::start().await;
    mount_accounts(&server, "100.00", 1).await;
    Mock::given(method("POST"))
        .and(path("/payouts/withdrawals"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = WithdrawalDraft::new()
        .account("acc-1")
        .method("m-1")
        .amount("99.50");
    let err = client.payouts().request_withdrawal(&draft).await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Validation(ValidationError::InsufficientBalance { .. })
    ));
    assert!(!client.otp().has_pending());
}
