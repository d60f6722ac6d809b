mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use revtickets_client::checkout::{
    CheckoutFlow, CheckoutOutcome, CheckoutPrefill, GatewayEvent, GatewayReceipt, HostedCheckout,
};
use revtickets_client::models::{OrderResponse, PaymentRequest, PricingZone, Seat};
use revtickets_client::selection::{SeatSelection, ZoneSelection};
use revtickets_client::storage::{KEY_EMAIL, KEY_USERNAME};

/// Скриптованный чекаут вместо размещённого у шлюза.
enum Scripted {
    Pay,
    Dismiss,
}

impl HostedCheckout for Scripted {
    async fn collect_payment(
        &self,
        order: &OrderResponse,
        _prefill: &CheckoutPrefill,
    ) -> anyhow::Result<GatewayEvent> {
        Ok(match self {
            Scripted::Pay => GatewayEvent::Completed(GatewayReceipt {
                order_id: order.order_id.clone(),
                payment_id: "pay_test_1".to_string(),
                signature: "sig_test_1".to_string(),
            }),
            Scripted::Dismiss => GatewayEvent::Dismissed,
        })
    }
}

fn seat(row: &str, number: i32, price: f64) -> Seat {
    Seat {
        seat_id: number as i64,
        row_label: row.to_string(),
        seat_number: number,
        seat_type: None,
        price,
        is_available: true,
        is_blocked: false,
    }
}

fn seat_request() -> PaymentRequest {
    let mut selection = SeatSelection::from_seats(vec![seat("A", 1, 200.0), seat("B", 5, 250.0)]);
    selection.toggle("A", 1);
    selection.toggle("B", 5);
    PaymentRequest::for_seats(5, &selection)
}

fn order_json() -> serde_json::Value {
    common::envelope(json!({
        "orderId": "order_abc",
        "bookingId": 77,
        "amount": "45000",
        "currency": "INR",
        "key": "rzp_test_key"
    }))
}

fn booking_json(status: &str) -> serde_json::Value {
    common::envelope(json!({
        "bookingId": 77,
        "bookingReference": "BK1756AB12CD",
        "totalSeats": 2,
        "totalAmount": 450.0,
        "bookingStatus": status,
        "paymentStatus": "PAID",
        "seatNumbers": ["A1", "B5"]
    }))
}

// Счастливый путь: заказ, оплата в шлюзе, успешная сверка.
#[tokio::test]
async fn checkout_confirms_booking() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-order"))
        .and(body_partial_json(json!({
            "showId": 5,
            "isOpenEvent": false,
            "seatNumbers": ["A1", "B5"],
            "totalAmount": 450.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .and(body_partial_json(json!({
            "razorpayOrderId": "order_abc",
            "razorpayPaymentId": "pay_test_1",
            "razorpaySignature": "sig_test_1",
            "bookingId": 77
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json("CONFIRMED")))
        .expect(1)
        .mount(&server)
        .await;

    let harness = common::harness(&server.uri());
    harness.store.set_item(KEY_USERNAME, "Test User");
    harness.store.set_item(KEY_EMAIL, "user@example.com");

    let flow = CheckoutFlow::new(&harness.api, &harness.store);
    let outcome = flow.run(&seat_request(), &Scripted::Pay).await.unwrap();

    match outcome {
        CheckoutOutcome::Confirmed(booking) => {
            assert_eq!(booking.booking_reference, "BK1756AB12CD");
            assert_eq!(booking.booking_status, "CONFIRMED");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

// Сбой сверки 5xx после успеха шлюза - "возможно, оплата прошла".
#[tokio::test]
async fn verify_server_error_is_ambiguous_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let harness = common::harness(&server.uri());
    let flow = CheckoutFlow::new(&harness.api, &harness.store);
    let outcome = flow.run(&seat_request(), &Scripted::Pay).await.unwrap();

    match outcome {
        CheckoutOutcome::AmbiguousSuccess { booking_id, message } => {
            assert_eq!(booking_id, 77);
            assert!(message.contains("My Bookings"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

// Истёкшая сессия при сверке - отдельная формулировка того же исхода.
#[tokio::test]
async fn verify_401_is_ambiguous_success_with_session_note() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false, "message": "Token expired", "data": null
        })))
        .mount(&server)
        .await;

    let harness = common::harness(&server.uri());
    let flow = CheckoutFlow::new(&harness.api, &harness.store);
    let outcome = flow.run(&seat_request(), &Scripted::Pay).await.unwrap();

    match outcome {
        CheckoutOutcome::AmbiguousSuccess { message, .. } => {
            assert!(message.contains("Session expired"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

// Отказ бэкенда (подпись не сошлась) - жёсткая ошибка, не "возможно успех".
#[tokio::test]
async fn verify_rejection_is_hard_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false, "message": "Invalid payment signature", "data": null
        })))
        .mount(&server)
        .await;

    let harness = common::harness(&server.uri());
    let flow = CheckoutFlow::new(&harness.api, &harness.store);
    let outcome = flow.run(&seat_request(), &Scripted::Pay).await.unwrap();

    match outcome {
        CheckoutOutcome::VerificationFailed { message, .. } => {
            assert!(message.contains("Invalid payment signature"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

// Закрытие чекаута: заказ остаётся висеть PENDING, сверка не вызывается.
#[tokio::test]
async fn dismissal_makes_no_backend_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json("CONFIRMED")))
        .expect(0)
        .mount(&server)
        .await;

    let harness = common::harness(&server.uri());
    let flow = CheckoutFlow::new(&harness.api, &harness.store);
    let outcome = flow.run(&seat_request(), &Scripted::Dismiss).await.unwrap();

    assert!(matches!(
        outcome,
        CheckoutOutcome::Dismissed { booking_id: 77 }
    ));
}

// Ошибка создания заказа всплывает как Err - экран показывает сообщение,
// повторов нет.
#[tokio::test]
async fn create_order_failure_bubbles_up() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-order"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false, "message": "Seat not found: A1", "data": null
        })))
        .mount(&server)
        .await;

    let harness = common::harness(&server.uri());
    let flow = CheckoutFlow::new(&harness.api, &harness.store);
    let error = flow.run(&seat_request(), &Scripted::Pay).await.unwrap_err();
    assert_eq!(error.to_string(), "Seat not found: A1");
}

// Зонная заявка несёт разбивку по зонам в формате бэкенда.
#[tokio::test]
async fn zone_checkout_sends_breakdown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-order"))
        .and(body_partial_json(json!({
            "openShowId": 21,
            "isOpenEvent": true,
            "zoneBookings": [
                {"zoneName": "VIP", "quantity": 2, "pricePerTicket": 1500.0}
            ],
            "totalAmount": 3000.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json("CONFIRMED")))
        .mount(&server)
        .await;

    let mut selection = ZoneSelection::from_zones(vec![PricingZone {
        name: "VIP".into(),
        price: 1500.0,
        capacity: 50,
        available_capacity: Some(20),
    }]);
    selection.increment("VIP");
    selection.increment("VIP");

    let harness = common::harness(&server.uri());
    let flow = CheckoutFlow::new(&harness.api, &harness.store);
    let outcome = flow
        .run(&PaymentRequest::for_zones(21, &selection), &Scripted::Pay)
        .await
        .unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Confirmed(_)));
}
