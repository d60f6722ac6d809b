//! selection
//!
//! Локальная машина выбора мест и зон. Выбор оптимистичный: никакой
//! серверной резервации при клике нет, два клиента могут выбрать одно и
//! то же место - авторитетная проверка происходит только при создании
//! бронирования на бэкенде.
//!
//! Локальные инварианты, которые машина держит сама:
//! - выбрано не больше 10 мест / 10 билетов суммарно по зонам;
//! - недоступное или заблокированное место не попадает в выбор;
//! - счётчик зоны не превышает её доступную ёмкость и не уходит ниже нуля;
//! - итоговая цена - сумма цен конкретных мест (или цена зоны × количество),
//!   никогда не "базовая цена × количество".

use std::collections::HashMap;

use crate::models::{PricingZone, Seat, ZoneBooking};

/// Лимит билетов на одно бронирование.
pub const MAX_TICKETS_PER_BOOKING: usize = 10;

/// Ряд для отображения: места отсортированы по номеру.
#[derive(Debug, Clone)]
pub struct SeatRow {
    pub label: String,
    pub seats: Vec<Seat>,
}

/// Результат переключения места - экран показывает причину отказа.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
    /// Место занято или заблокировано.
    Unavailable,
    /// Достигнут лимит в 10 мест.
    LimitReached,
    /// Такого места в схеме нет.
    Unknown,
}

/// Выбор мест для обычного сеанса.
pub struct SeatSelection {
    index: HashMap<String, Seat>,
    rows: Vec<SeatRow>,
    // Порядок выбора сохраняется - так строится строка "A1, B5" в сводке
    selected: Vec<String>,
}

impl SeatSelection {
    pub fn from_seats(seats: Vec<Seat>) -> Self {
        let mut index = HashMap::with_capacity(seats.len());
        let mut by_row: HashMap<String, Vec<Seat>> = HashMap::new();
        for seat in seats {
            by_row.entry(seat.row_label.clone()).or_default().push(seat.clone());
            index.insert(seat.label(), seat);
        }

        let mut rows: Vec<SeatRow> = by_row
            .into_iter()
            .map(|(label, mut seats)| {
                seats.sort_by_key(|s| s.seat_number);
                SeatRow { label, seats }
            })
            .collect();
        rows.sort_by(|a, b| a.label.cmp(&b.label));

        Self {
            index,
            rows,
            selected: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[SeatRow] {
        &self.rows
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.iter().any(|s| s == label)
    }

    pub fn toggle(&mut self, row_label: &str, seat_number: i32) -> Toggle {
        let key = format!("{}{}", row_label, seat_number);
        let seat = match self.index.get(&key) {
            Some(seat) => seat,
            None => return Toggle::Unknown,
        };
        if !seat.is_available || seat.is_blocked {
            return Toggle::Unavailable;
        }

        if let Some(pos) = self.selected.iter().position(|s| *s == key) {
            self.selected.remove(pos);
            return Toggle::Deselected;
        }
        if self.selected.len() >= MAX_TICKETS_PER_BOOKING {
            return Toggle::LimitReached;
        }
        self.selected.push(key);
        Toggle::Selected
    }

    /// Переключение по строковой метке вида "A1".
    pub fn toggle_label(&mut self, label: &str) -> Toggle {
        match parse_seat_label(label) {
            Some((row, number)) => self.toggle(&row, number),
            None => Toggle::Unknown,
        }
    }

    pub fn selected_labels(&self) -> &[String] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Сумма цен конкретных выбранных мест. Цены мест различаются,
    /// поэтому считать count × basePrice нельзя.
    pub fn total_price(&self) -> f64 {
        self.selected
            .iter()
            .filter_map(|key| self.index.get(key))
            .map(|seat| seat.price)
            .sum()
    }

    pub fn selected_seat_ids(&self) -> Vec<i64> {
        self.selected
            .iter()
            .filter_map(|key| self.index.get(key))
            .map(|seat| seat.seat_id)
            .collect()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Разбирает метку "A12" на ряд и номер. Буквенный префикс - ряд,
/// числовой хвост - номер места.
pub fn parse_seat_label(label: &str) -> Option<(String, i32)> {
    let trimmed = label.trim();
    let split = trimmed.find(|c: char| c.is_ascii_digit())?;
    let (row, number) = trimmed.split_at(split);
    if row.is_empty() || !row.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let number: i32 = number.parse().ok()?;
    Some((row.to_uppercase(), number))
}

/// Выбор количества билетов по зонам для открытого сеанса.
pub struct ZoneSelection {
    zones: Vec<PricingZone>,
    tickets: HashMap<String, u32>,
}

impl ZoneSelection {
    pub fn from_zones(zones: Vec<PricingZone>) -> Self {
        let tickets = zones.iter().map(|z| (z.name.clone(), 0)).collect();
        Self { zones, tickets }
    }

    pub fn zones(&self) -> &[PricingZone] {
        &self.zones
    }

    pub fn count(&self, zone_name: &str) -> u32 {
        self.tickets.get(zone_name).copied().unwrap_or(0)
    }

    pub fn total_tickets(&self) -> u32 {
        self.tickets.values().sum()
    }

    /// Увеличение ограничено свободной ёмкостью зоны и общим лимитом в 10.
    /// Зона с нулевой ёмкостью никогда не уйдёт выше нуля.
    pub fn increment(&mut self, zone_name: &str) -> bool {
        let zone = match self.zones.iter().find(|z| z.name == zone_name) {
            Some(zone) => zone,
            None => return false,
        };
        let capacity = zone.effective_capacity().max(0) as u32;
        let current = self.count(zone_name);
        if current >= capacity || self.total_tickets() as usize >= MAX_TICKETS_PER_BOOKING {
            return false;
        }
        self.tickets.insert(zone_name.to_string(), current + 1);
        true
    }

    /// Уменьшение с полом в ноль: на нуле - no-op.
    pub fn decrement(&mut self, zone_name: &str) -> bool {
        let current = self.count(zone_name);
        if current == 0 {
            return false;
        }
        self.tickets.insert(zone_name.to_string(), current - 1);
        true
    }

    /// Σ цена зоны × количество.
    pub fn total_price(&self) -> f64 {
        self.zones
            .iter()
            .map(|z| z.price * self.count(&z.name) as f64)
            .sum()
    }

    /// Разбивка для запроса на оплату: только зоны с билетами.
    pub fn breakdown(&self) -> Vec<ZoneBooking> {
        self.zones
            .iter()
            .filter(|z| self.count(&z.name) > 0)
            .map(|z| ZoneBooking {
                zone_name: z.name.clone(),
                quantity: self.count(&z.name) as i32,
                price_per_ticket: z.price,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        for count in self.tickets.values_mut() {
            *count = 0;
        }
    }
}
