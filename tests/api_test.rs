//! Admin API client tests against an in-process mock backend.

mod common;

use axum::http::{Method, StatusCode};
use rust_decimal_macros::dec;
use serde_json::json;

use peerdesk::PeerdeskError;
use peerdesk::api::PageSource;
use peerdesk::models::{BidStatus, PaymentDecision, PeerStatus};
use peerdesk::tui::Message;
use peerdesk::tui::dispatch::execute;
use peerdesk::workflow::PeerStatusController;

use common::{MockBackend, Reply, TOKEN, ok, outcome};

fn bid(id: u64, status: &str) -> serde_json::Value {
    json!({ "id": id, "amount": "10.00", "status": status })
}

fn peer(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "reference": format!("PR-{id}"),
        "status": "awaiting_payment",
        "pair_amount": "40",
        "bid_user": { "id": 3, "username": "carol" },
        "ask_user": { "id": 4, "username": "dave" }
    })
}

#[tokio::test]
async fn test_bids_request_carries_token_and_page() {
    let backend = MockBackend::start(vec![(
        "/api/bids/pending?page=3",
        ok(json!({
            "data": [bid(1, "pending"), bid(2, "cancelled")],
            "current_page": 3,
            "last_page": 4
        })),
    )])
    .await;

    let page = backend
        .client()
        .bids_by_status(BidStatus::Pending, 3)
        .await
        .expect("bids page");

    assert_eq!(page.current_page, 3);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].status, BidStatus::Cancelled);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_refused_listing_yields_empty_page() {
    let backend = MockBackend::start(vec![
        (
            "/api/bids/failed?page=1",
            Reply::Json(
                StatusCode::OK,
                json!({ "success": false, "message": "nothing here" }),
            ),
        ),
        (
            "/api/peers/payment_declined",
            Reply::Json(StatusCode::OK, json!({ "success": true })),
        ),
    ])
    .await;
    let api = backend.client();

    let bids = api
        .bids_by_status(BidStatus::Failed, 1)
        .await
        .expect("refusal is not an error");
    assert!(bids.data.is_empty());
    assert_eq!(bids.last_page, 1);

    let peers = api
        .peers(&PageSource::First(PeerStatus::PaymentDeclined))
        .await
        .expect("missing data is not an error");
    assert!(peers.data.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_transport_failure() {
    let backend = MockBackend::start(vec![(
        "/api/bids/paired?page=1",
        Reply::Text(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
    )])
    .await;

    let err = backend
        .client()
        .bids_by_status(BidStatus::Paired, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, PeerdeskError::Json(_)));
}

#[tokio::test]
async fn test_cancel_reads_envelope_on_error_status() {
    let backend = MockBackend::start(vec![
        ("/api/cancel-bid/5", outcome(StatusCode::OK, true, "Bid cancelled successfully")),
        (
            "/api/cancel-bid/6",
            outcome(StatusCode::UNPROCESSABLE_ENTITY, false, "Bid already paired"),
        ),
    ])
    .await;
    let api = backend.client();

    let accepted = api.cancel_bid(5).await.expect("cancel 5");
    assert!(accepted.success);
    assert_eq!(accepted.message_or("-"), "Bid cancelled successfully");

    let refused = api.cancel_bid(6).await.expect("refusal is not an error");
    assert!(!refused.success);
    assert_eq!(refused.message_or("-"), "Bid already paired");
}

#[tokio::test]
async fn test_bid_detail_without_data_is_none() {
    let backend = MockBackend::start(vec![
        ("/api/bid-details/8", ok(bid(8, "completed"))),
        ("/api/bid-details/9", Reply::Json(StatusCode::NOT_FOUND, json!({ "message": "Not found" }))),
    ])
    .await;
    let api = backend.client();

    let found = api.bid_detail(8).await.expect("detail 8");
    assert_eq!(found.map(|b| b.status), Some(BidStatus::Completed));
    assert!(api.bid_detail(9).await.expect("detail 9").is_none());
}

#[tokio::test]
async fn test_payment_decisions_post_json_bodies() {
    let backend = MockBackend::start(vec![(
        "/api/approve-payment/41",
        outcome(StatusCode::OK, true, "Done"),
    )])
    .await;
    let api = backend.client();

    api.decide_payment(41, &PaymentDecision::Approved)
        .await
        .expect("approve");
    api.decide_payment(
        41,
        &PaymentDecision::Declined {
            reason: "receipt is blurred".into(),
        },
    )
    .await
    .expect("decline");

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.method == Method::POST));

    let approve: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(approve, json!({ "status": "approved" }));
    let decline: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(
        decline,
        json!({ "status": "declined", "reason": "receipt is blurred" })
    );
}

#[tokio::test]
async fn test_unpair_and_block_paths() {
    let backend = MockBackend::start(vec![
        ("/api/unpair-peering/41", outcome(StatusCode::OK, true, "Unpaired")),
        (
            "/api/user-status-update/7/blocked",
            outcome(StatusCode::OK, true, "User blocked"),
        ),
    ])
    .await;
    let api = backend.client();

    assert!(api.unpair(41).await.expect("unpair").success);
    assert!(api.block_user(7).await.expect("block").success);

    let targets: Vec<_> = backend.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(
        targets,
        ["/api/unpair-peering/41", "/api/user-status-update/7/blocked"]
    );
}

#[tokio::test]
async fn test_peer_pagination_follows_server_link() {
    let backend = MockBackend::start(vec![
        (
            "/api/peers/awaiting_payment",
            ok(json!({
                "data": [peer(1)],
                "current_page": 1,
                "last_page": 2,
                "next_page_url": "{origin}/api/peers/awaiting_payment?page=2",
                "prev_page_url": null
            })),
        ),
        (
            "/api/peers/awaiting_payment?page=2",
            ok(json!({
                "data": [peer(2)],
                "current_page": 2,
                "last_page": 2,
                "next_page_url": null,
                "prev_page_url": "{origin}/api/peers/awaiting_payment?page=1"
            })),
        ),
    ])
    .await;
    let api = backend.client();

    let first = api
        .peers(&PageSource::First(PeerStatus::AwaitingPayment))
        .await
        .expect("first page");
    let link = first.next_page_url.clone().expect("next link");
    assert_eq!(
        link,
        format!("{}/api/peers/awaiting_payment?page=2", backend.origin)
    );

    let second = api.peers(&PageSource::Link(link)).await.expect("second page");
    assert_eq!(second.data[0].id, 2);
    assert!(!second.has_next());
    assert_eq!(second.data[0].pair_amount, dec!(40));

    let targets: Vec<_> = backend.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(
        targets,
        [
            "/api/peers/awaiting_payment",
            "/api/peers/awaiting_payment?page=2"
        ]
    );
}

#[tokio::test]
async fn test_foreign_link_is_never_requested() {
    let backend = MockBackend::start(vec![]).await;

    let err = backend
        .client()
        .peers(&PageSource::Link(
            "https://elsewhere.example.net/api/peers/awaiting_payment?page=2".into(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, PeerdeskError::ForeignLink(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_admin_stats_from_configured_path() {
    let backend = MockBackend::start(vec![(
        "/api/dashboard/stats",
        ok(json!({ "users": 12, "sum_bids": "99.5" })),
    )])
    .await;

    let stats = backend
        .client()
        .admin_stats("dashboard/stats")
        .await
        .expect("stats")
        .expect("snapshot present");
    assert_eq!(stats.users, 12);
    assert_eq!(stats.sum_bids, dec!(99.5));
    assert_eq!(stats.asks, 0);
}

#[tokio::test]
async fn test_executed_fetch_feeds_back_into_controller() {
    let backend = MockBackend::start(vec![(
        "/api/peers/awaiting_payment",
        ok(json!({ "data": [peer(1), peer(2)], "current_page": 1, "last_page": 1 })),
    )])
    .await;
    let api = backend.client();
    let mut controller = PeerStatusController::new();

    let effect = controller.mount();
    let Message::PeersLoaded { ticket, result } = execute(&api, effect).await else {
        panic!("expected a peers page");
    };
    assert!(controller.apply_page(ticket, result));
    assert_eq!(controller.records().len(), 2);
    assert!(!controller.is_loading());
}
