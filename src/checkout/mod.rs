//! checkout
//!
//! Оформление оплаты: сборка заказа из выбора, создание заказа на бэкенде,
//! передача управления внешнему платёжному чекауту и сверка результата.
//!
//! Ключевое решение о неоднозначных исходах унаследовано от оригинала:
//! если шлюз сообщил об успехе, а вызов сверки упал по сети, 401 или 5xx,
//! платёж мог уже пройти - пользователю сообщается "проверьте Мои
//! бронирования", а не жёсткая ошибка. Автоматических повторов нет.

use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{Booking, OrderResponse, PaymentRequest, PaymentVerifyRequest};
use crate::selection::{SeatSelection, ZoneSelection};
use crate::storage::{LocalStore, KEY_EMAIL, KEY_USERNAME};

impl PaymentRequest {
    /// Заказ по выбранным местам обычного сеанса.
    pub fn for_seats(show_id: i64, selection: &SeatSelection) -> Self {
        Self {
            show_id: Some(show_id),
            open_show_id: None,
            is_open_event: Some(false),
            seat_numbers: Some(selection.selected_labels().to_vec()),
            zone_bookings: None,
            total_amount: selection.total_price(),
        }
    }

    /// Заказ по зонам открытого сеанса.
    pub fn for_zones(open_show_id: i64, selection: &ZoneSelection) -> Self {
        Self {
            show_id: None,
            open_show_id: Some(open_show_id),
            is_open_event: Some(true),
            seat_numbers: None,
            zone_bookings: Some(selection.breakdown()),
            total_amount: selection.total_price(),
        }
    }
}

/// Данные для предзаполнения формы чекаута. Читаются напрямую из
/// локального хранилища, с пустой строкой как запасным значением -
/// ровно так делал оригинал.
#[derive(Debug, Clone)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
}

impl CheckoutPrefill {
    pub fn from_store(store: &LocalStore) -> Self {
        Self {
            name: store.get_item(KEY_USERNAME).unwrap_or_default(),
            email: store.get_item(KEY_EMAIL).unwrap_or_default(),
        }
    }
}

/// Идентификаторы, которые шлюз передаёт обработчику успешной оплаты.
#[derive(Debug, Clone)]
pub struct GatewayReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Итог работы внешнего чекаута.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    Completed(GatewayReceipt),
    /// Пользователь закрыл чекаут, не заплатив.
    Dismissed,
}

/// Внешний платёжный чекаут, размещённый у шлюза. Продакшен-реализация
/// выводит ссылку и собирает квитанцию у пользователя; тесты подставляют
/// скриптованный вариант.
pub trait HostedCheckout {
    fn collect_payment(
        &self,
        order: &OrderResponse,
        prefill: &CheckoutPrefill,
    ) -> impl std::future::Future<Output = anyhow::Result<GatewayEvent>> + Send;
}

/// Итог оформления для экрана.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Платёж сверен, бронирование подтверждено.
    Confirmed(Booking),
    /// Шлюз сообщил об успехе, но сверка не дошла до бэкенда.
    /// Платёж, вероятно, прошёл - бронирование стоит проверить вручную.
    AmbiguousSuccess { booking_id: i64, message: String },
    /// Бэкенд отверг сверку.
    VerificationFailed { booking_id: i64, message: String },
    /// Чекаут закрыт без оплаты. Никаких вызовов бэкенда не делается.
    Dismissed { booking_id: i64 },
}

pub struct CheckoutFlow<'a> {
    api: &'a ApiClient,
    store: &'a LocalStore,
}

impl<'a> CheckoutFlow<'a> {
    pub fn new(api: &'a ApiClient, store: &'a LocalStore) -> Self {
        Self { api, store }
    }

    /// Полный проход: create-order -> чекаут шлюза -> verify.
    /// Ошибка создания заказа возвращается как Err - экран сбрасывает
    /// флаг загрузки и показывает сообщение, повторов нет.
    pub async fn run<G: HostedCheckout>(
        &self,
        request: &PaymentRequest,
        gateway: &G,
    ) -> ApiResult<CheckoutOutcome> {
        let order = self.api.create_order(request).await?;
        info!(
            "Order {} created for booking {} ({} {})",
            order.order_id, order.booking_id, order.amount, order.currency
        );

        let prefill = CheckoutPrefill::from_store(self.store);
        let receipt = match gateway.collect_payment(&order, &prefill).await {
            Ok(GatewayEvent::Completed(receipt)) => receipt,
            Ok(GatewayEvent::Dismissed) => {
                info!("Checkout dismissed for booking {}", order.booking_id);
                return Ok(CheckoutOutcome::Dismissed {
                    booking_id: order.booking_id,
                });
            }
            Err(e) => {
                // Ошибка самого шлюза равносильна закрытию: сбрасываемся
                // без обращений к бэкенду
                warn!("Gateway checkout failed: {}", e);
                return Ok(CheckoutOutcome::Dismissed {
                    booking_id: order.booking_id,
                });
            }
        };

        let verify = PaymentVerifyRequest {
            razorpay_order_id: receipt.order_id,
            razorpay_payment_id: receipt.payment_id,
            razorpay_signature: receipt.signature,
            booking_id: order.booking_id,
        };

        match self.api.verify_payment(&verify).await {
            Ok(booking) => {
                info!(
                    "Payment verified, booking {} confirmed",
                    booking.booking_reference
                );
                Ok(CheckoutOutcome::Confirmed(booking))
            }
            Err(e) => Ok(classify_verify_failure(order.booking_id, e)),
        }
    }

    /// Явная отмена ещё не оплаченного заказа.
    pub async fn cancel(&self, booking_id: i64) -> ApiResult<Booking> {
        self.api.cancel_payment(booking_id).await
    }
}

/// Политика неоднозначных исходов после успеха шлюза.
fn classify_verify_failure(booking_id: i64, error: ApiError) -> CheckoutOutcome {
    match &error {
        ApiError::Transport(_) => {
            error!("Verification transport error: {}", error);
            CheckoutOutcome::AmbiguousSuccess {
                booking_id,
                message: "Payment processed but verification incomplete. \
                          Please check \"My Bookings\" to confirm your booking."
                    .to_string(),
            }
        }
        ApiError::Api { status: 401, .. } => CheckoutOutcome::AmbiguousSuccess {
            booking_id,
            message: "Your payment has been processed! Please check \"My Bookings\" \
                      to confirm. (Session expired during verification)"
                .to_string(),
        },
        ApiError::Api { status, .. } if *status >= 500 => {
            error!("Verification server error: {}", error);
            CheckoutOutcome::AmbiguousSuccess {
                booking_id,
                message: "Payment processed but verification incomplete. \
                          Please check \"My Bookings\" to confirm your booking."
                    .to_string(),
            }
        }
        _ => CheckoutOutcome::VerificationFailed {
            booking_id,
            message: format!("Payment verification failed: {}", error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PricingZone, Seat};
    use crate::selection::{SeatSelection, ZoneSelection};

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

    #[test]
    fn seat_request_carries_labels_and_exact_total() {
        let mut selection = SeatSelection::from_seats(vec![
            seat("A", 1, 200.0),
            seat("B", 5, 250.0),
        ]);
        selection.toggle("A", 1);
        selection.toggle("B", 5);

        let request = PaymentRequest::for_seats(42, &selection);
        assert_eq!(request.show_id, Some(42));
        assert_eq!(request.is_open_event, Some(false));
        assert_eq!(
            request.seat_numbers.as_deref(),
            Some(["A1".to_string(), "B5".to_string()].as_slice())
        );
        assert_eq!(request.total_amount, 450.0);
        assert!(request.zone_bookings.is_none());
    }

    #[test]
    fn zone_request_carries_breakdown() {
        let mut selection = ZoneSelection::from_zones(vec![PricingZone {
            name: "VIP".into(),
            price: 1000.0,
            capacity: 5,
            available_capacity: Some(5),
        }]);
        selection.increment("VIP");
        selection.increment("VIP");

        let request = PaymentRequest::for_zones(7, &selection);
        assert_eq!(request.open_show_id, Some(7));
        assert_eq!(request.is_open_event, Some(true));
        assert_eq!(request.total_amount, 2000.0);
        let zones = request.zone_bookings.unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].quantity, 2);
    }

    #[test]
    fn verify_failure_classification() {
        let ambiguous = classify_verify_failure(
            1,
            ApiError::Api {
                status: 503,
                message: "unavailable".into(),
            },
        );
        assert!(matches!(ambiguous, CheckoutOutcome::AmbiguousSuccess { .. }));

        let expired = classify_verify_failure(
            1,
            ApiError::Api {
                status: 401,
                message: "expired".into(),
            },
        );
        match expired {
            CheckoutOutcome::AmbiguousSuccess { message, .. } => {
                assert!(message.contains("Session expired"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let rejected = classify_verify_failure(
            1,
            ApiError::Api {
                status: 400,
                message: "Invalid payment signature".into(),
            },
        );
        assert!(matches!(
            rejected,
            CheckoutOutcome::VerificationFailed { .. }
        ));
    }
}
