//! Quote amount computation
//!
//! All arithmetic runs on `Decimal` and is rounded to 2 decimal places
//! before leaving this module as `f64` business values.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use shared::models::ServiceLine;

/// Subtotals of a budget document.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QuoteTotals {
    /// The reservation's snapshotted room amount
    pub room_subtotal: f64,
    /// Sum of unit price × quantity over all service lines
    pub services_subtotal: f64,
    /// room_subtotal + services_subtotal
    pub grand_total: f64,
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value, "Non-finite amount coerced to zero");
        Decimal::ZERO
    })
}

fn to_f64(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or(0.0)
}

/// Unit price × quantity for one service line, rounded to 2 places.
pub fn line_subtotal(price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(price) * Decimal::from(quantity))
}

/// Compute all subtotals for a reservation's quote.
/// `room_amount` is the amount snapshotted on the reservation, not the
/// room's current base price.
pub fn compute_totals(room_amount: f64, lines: &[ServiceLine]) -> QuoteTotals {
    let room = to_decimal(room_amount);
    let services = lines
        .iter()
        .map(|line| to_decimal(line.price) * Decimal::from(line.quantity))
        .sum::<Decimal>();

    QuoteTotals {
        room_subtotal: to_f64(room),
        services_subtotal: to_f64(services),
        grand_total: to_f64(room + services),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: i64) -> ServiceLine {
        ServiceLine {
            service_id: 1,
            name: "Servicio".to_string(),
            description: None,
            price,
            quantity,
        }
    }

    #[test]
    fn room_plus_services_round_trip() {
        // Room at 1000 with one service (50 × 2) totals 1100
        let totals = compute_totals(1000.0, &[line(50.0, 2)]);
        assert_eq!(totals.room_subtotal, 1000.0);
        assert_eq!(totals.services_subtotal, 100.0);
        assert_eq!(totals.grand_total, 1100.0);
    }

    #[test]
    fn no_services_totals_room_only() {
        let totals = compute_totals(2500.50, &[]);
        assert_eq!(totals.services_subtotal, 0.0);
        assert_eq!(totals.grand_total, 2500.50);
    }

    #[test]
    fn decimal_arithmetic_avoids_float_drift() {
        // 0.1 × 3 in f64 is 0.30000000000000004; Decimal keeps 0.30
        let totals = compute_totals(0.0, &[line(0.1, 3)]);
        assert_eq!(totals.services_subtotal, 0.3);
        assert_eq!(line_subtotal(0.1, 3), 0.3);
    }

    #[test]
    fn multiple_lines_accumulate() {
        let totals = compute_totals(1000.0, &[line(50.0, 2), line(19.99, 3), line(5.0, 1)]);
        assert_eq!(totals.services_subtotal, 164.97);
        assert_eq!(totals.grand_total, 1164.97);
    }
}
