use tokio::sync::Mutex;
use tracing::info;

use crate::checkout::{
    CheckoutFlow, CheckoutOutcome, CheckoutPrefill, GatewayEvent, GatewayReceipt, HostedCheckout,
};
use crate::models::{OrderResponse, PaymentRequest};
use crate::selection::{SeatSelection, Toggle, ZoneSelection};
use crate::App;

use super::catalog::format_show_time;
use super::{money, Term};

#[derive(Debug, Clone, Copy)]
pub enum BookingTarget {
    Show(i64),
    OpenShow(i64),
}

/// Команда пользователя на экране выбора.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Done,
    Cancel,
    Seat(String),
    ZoneInc(String),
    ZoneDec(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "done" | "pay" => return Command::Done,
        "cancel" | "back" => return Command::Cancel,
        _ => {}
    }
    if let Some(rest) = trimmed.strip_prefix('+') {
        return Command::ZoneInc(rest.trim().to_string());
    }
    if let Some(rest) = trimmed.strip_prefix('-') {
        return Command::ZoneDec(rest.trim().to_string());
    }
    Command::Seat(trimmed.to_string())
}

/// Текстовая схема зала: номер - свободно, *N - выбрано, -- занято.
pub fn render_seat_grid(selection: &SeatSelection) -> String {
    let mut out = String::new();
    for row in selection.rows() {
        out.push_str(&format!("{:>3} ", row.label));
        for seat in &row.seats {
            let label = seat.label();
            let cell = if !seat.is_available || seat.is_blocked {
                " --".to_string()
            } else if selection.is_selected(&label) {
                format!("*{:>2}", seat.seat_number)
            } else {
                format!(" {:>2}", seat.seat_number)
            };
            out.push_str(&cell);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("    (free: N, selected: *N, booked: --)\n");
    out
}

pub async fn run(app: &App, term: &mut Term, target: BookingTarget) -> anyhow::Result<()> {
    if !app.session.is_authenticated() {
        println!("Please login to book tickets.");
        return Ok(());
    }
    match target {
        BookingTarget::Show(id) => seat_flow(app, term, id).await,
        BookingTarget::OpenShow(id) => zone_flow(app, term, id).await,
    }
}

/// Выбор мест обычного сеанса. Экран заново запрашивает и сеанс, и места -
/// никакое состояние из списка сеансов сюда не переносится.
async fn seat_flow(app: &App, term: &mut Term, show_id: i64) -> anyhow::Result<()> {
    let show = app.api.show(show_id).await?;
    let seats = app.api.seats_for_show(show_id).await?;
    let mut selection = SeatSelection::from_seats(seats);

    println!("\nSelect your seat");
    print!("{}", show.title());
    if let Some(venue) = &show.venue {
        print!(" • {}, {}", venue.venue_name, venue.city);
    }
    println!(
        " • {} • {}",
        show.show_date.format("%a, %d %b, %Y"),
        format_show_time(show.show_time)
    );
    println!("{} per seat (base)", money(show.base_price));

    loop {
        println!("\n{}", render_seat_grid(&selection));
        if selection.count() > 0 {
            println!(
                "{} seat(s): {} — total {}",
                selection.count(),
                selection.selected_labels().join(", "),
                money(selection.total_price())
            );
        }

        let input = term.prompt("Seat (e.g. A1), done, cancel: ").await?;
        match parse_command(&input) {
            Command::Cancel => return Ok(()),
            Command::Done => {
                if selection.count() == 0 {
                    println!("Nothing selected yet.");
                    continue;
                }
                break;
            }
            Command::Seat(label) => match selection.toggle_label(&label) {
                Toggle::Selected | Toggle::Deselected => {}
                Toggle::Unavailable => println!("That seat is already booked or blocked."),
                Toggle::LimitReached => println!("You can book at most 10 seats."),
                Toggle::Unknown => println!("No such seat."),
            },
            Command::ZoneInc(_) | Command::ZoneDec(_) => {
                println!("This show has reserved seating - pick seats like A1.")
            }
        }
    }

    let request = PaymentRequest::for_seats(show_id, &selection);
    pay(app, term, request).await
}

/// Выбор количества билетов по зонам открытого сеанса.
async fn zone_flow(app: &App, term: &mut Term, open_show_id: i64) -> anyhow::Result<()> {
    let show = app.api.open_event_show(open_show_id).await?;
    let mut selection = ZoneSelection::from_zones(show.pricing_zones.clone());

    println!("\nSelect your zone");
    if let Some(event) = &show.event {
        print!("{}", event.title);
    }
    println!(
        " • Open Ground Event • {} • {}",
        show.show_date.format("%a, %d %b, %Y"),
        format_show_time(show.show_time)
    );

    loop {
        println!();
        for zone in selection.zones() {
            println!(
                "  {:<10} {} per ticket, {} available — tickets: {}",
                zone.name,
                money(zone.price),
                zone.effective_capacity(),
                selection.count(&zone.name)
            );
        }
        if selection.total_tickets() > 0 {
            println!(
                "{} ticket(s) — total {}",
                selection.total_tickets(),
                money(selection.total_price())
            );
        }

        let input = term.prompt("+Zone / -Zone, done, cancel: ").await?;
        match parse_command(&input) {
            Command::Cancel => return Ok(()),
            Command::Done => {
                if selection.total_tickets() == 0 {
                    println!("Nothing selected yet.");
                    continue;
                }
                break;
            }
            Command::ZoneInc(name) => {
                if !selection.increment(&name) {
                    println!("Cannot add more tickets for that zone.");
                }
            }
            Command::ZoneDec(name) => {
                // На нуле просто no-op
                selection.decrement(&name);
            }
            Command::Seat(_) => println!("This is an open-ground show - use +Zone / -Zone."),
        }
    }

    let request = PaymentRequest::for_zones(open_show_id, &selection);
    pay(app, term, request).await
}

/// Запуск оформления и разбор итога. Сообщения повторяют оригинальные
/// алерты, включая осторожную формулировку неоднозначного исхода.
async fn pay(app: &App, term: &mut Term, request: PaymentRequest) -> anyhow::Result<()> {
    println!("\nTotal: {}. Creating order...", money(request.total_amount));

    let flow = CheckoutFlow::new(&app.api, &app.store);
    let outcome = {
        let gateway = TerminalCheckout {
            term: Mutex::new(&mut *term),
            checkout_url: &app.config.payment.checkout_url,
            merchant_name: &app.config.payment.merchant_name,
        };
        flow.run(&request, &gateway).await
    };

    match outcome {
        Err(e) => {
            // Сброс "loading" и сообщение; повторов нет
            println!("Failed to create payment order: {}", e);
        }
        Ok(CheckoutOutcome::Confirmed(booking)) => {
            println!("Payment successful! Your booking has been confirmed.");
            println!(
                "Reference: {} — {} for {}",
                booking.booking_reference,
                booking.booking_status,
                money(booking.total_amount)
            );
        }
        Ok(CheckoutOutcome::AmbiguousSuccess { message, .. }) => {
            println!("{}", message);
        }
        Ok(CheckoutOutcome::VerificationFailed { message, .. }) => {
            println!("{}", message);
        }
        Ok(CheckoutOutcome::Dismissed { booking_id }) => {
            println!("Checkout closed, nothing was charged.");
            // Отмена заказа - только явным действием пользователя
            if term.confirm("Cancel the pending order?").await? {
                match flow.cancel(booking_id).await {
                    Ok(_) => println!("Payment cancelled"),
                    Err(e) => println!("Error cancelling payment: {}", e),
                }
            }
        }
    }
    Ok(())
}

/// Продакшен-реализация внешнего чекаута: печатает ссылку на оплату
/// и собирает у пользователя идентификаторы, которые шлюз показывает
/// после успешного платежа. Пустой ввод - закрытие чекаута.
struct TerminalCheckout<'a> {
    term: Mutex<&'a mut Term>,
    checkout_url: &'a str,
    merchant_name: &'a str,
}

impl HostedCheckout for TerminalCheckout<'_> {
    async fn collect_payment(
        &self,
        order: &OrderResponse,
        prefill: &CheckoutPrefill,
    ) -> anyhow::Result<GatewayEvent> {
        let mut term = self.term.lock().await;
        info!("Opening hosted checkout for order {}", order.order_id);

        println!("\n--- {} checkout ---", self.merchant_name);
        println!(
            "Order {} • {} {} (key {})",
            order.order_id, order.amount, order.currency, order.key
        );
        if !prefill.name.is_empty() || !prefill.email.is_empty() {
            println!("Paying as {} <{}>", prefill.name, prefill.email);
        }
        println!(
            "Open in your browser and complete the payment:\n  {}#order={}",
            self.checkout_url, order.order_id
        );

        let payment_id = term
            .prompt("Gateway payment id (empty to close checkout): ")
            .await?;
        if payment_id.is_empty() {
            return Ok(GatewayEvent::Dismissed);
        }
        let signature = term
            .prompt("Gateway signature (empty to close checkout): ")
            .await?;
        if signature.is_empty() {
            return Ok(GatewayEvent::Dismissed);
        }

        Ok(GatewayEvent::Completed(GatewayReceipt {
            order_id: order.order_id.clone(),
            payment_id,
            signature,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seat;

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command("done"), Command::Done);
        assert_eq!(parse_command(" PAY "), Command::Done);
        assert_eq!(parse_command("cancel"), Command::Cancel);
        assert_eq!(parse_command("+VIP"), Command::ZoneInc("VIP".into()));
        assert_eq!(parse_command("- Gold"), Command::ZoneDec("Gold".into()));
        assert_eq!(parse_command("A12"), Command::Seat("A12".into()));
    }

    #[test]
    fn grid_marks_selected_and_booked() {
        let seats = vec![
            Seat {
                seat_id: 1,
                row_label: "A".into(),
                seat_number: 1,
                seat_type: None,
                price: 200.0,
                is_available: true,
                is_blocked: false,
            },
            Seat {
                seat_id: 2,
                row_label: "A".into(),
                seat_number: 2,
                seat_type: None,
                price: 200.0,
                is_available: false,
                is_blocked: false,
            },
        ];
        let mut selection = SeatSelection::from_seats(seats);
        selection.toggle("A", 1);

        let grid = render_seat_grid(&selection);
        assert!(grid.contains("* 1"));
        assert!(grid.contains("--"));
    }
}
