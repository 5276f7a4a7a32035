//! Lane selection for booking and cancellation.
//!
//! Each sailing carries two capacity pools: the low-ceiling lane (LRL) and
//! the high-ceiling lane (HRL). This module holds the pure decision logic
//! that routes a vehicle into one of them; the mutating call sequences live
//! on [`Terminal`](crate::Terminal).

use crate::entity::{Sailing, Vehicle};

/// Buffer added to a vehicle's declared length when reserving lane space.
pub const LENGTH_BUFFER: f64 = 0.5;
/// Length assumed for a vehicle whose length was not declared.
pub const DEFAULT_VEHICLE_LENGTH: f64 = 4.5;
/// Height above which a vehicle requires the high-ceiling lane.
pub const SPECIAL_HEIGHT: f64 = 2.0;
/// Length above which a vehicle requires the high-ceiling lane.
pub const SPECIAL_LENGTH: f64 = 7.0;

/// The capacity pool a reservation is charged to or refunded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// The low-ceiling lane (LRL pool).
    Low,
    /// The high-ceiling lane (HRL pool).
    High,
}

/// Returns the lane length a vehicle reserves: its declared length plus
/// the buffer margin, with the default regular-vehicle length substituted
/// when the length is undeclared.
#[must_use]
pub fn reserved_length(vehicle: &Vehicle) -> f64 {
    let length = if vehicle.length > 0.0 {
        vehicle.length
    } else {
        DEFAULT_VEHICLE_LENGTH
    };
    length + LENGTH_BUFFER
}

/// Returns `true` if the vehicle requires the high-ceiling lane by its own
/// dimensions.
#[must_use]
pub fn is_special(vehicle: &Vehicle) -> bool {
    vehicle.height > SPECIAL_HEIGHT || vehicle.length > SPECIAL_LENGTH
}

/// Chooses the lane to charge when booking a vehicle onto a sailing.
///
/// Special vehicles always go to the high lane. A regular vehicle also
/// overflows into the high lane when the low lane cannot hold its reserved
/// length.
#[must_use]
pub fn booking_lane(vehicle: &Vehicle, sailing: &Sailing) -> Lane {
    if is_special(vehicle) || sailing.low_remaining < reserved_length(vehicle) {
        Lane::High
    } else {
        Lane::Low
    }
}

/// Chooses the lane to refund when cancelling a reservation.
///
/// Only the vehicle's static attributes are available here: a regular
/// vehicle that was overflow-routed into the high lane at booking is
/// refunded to the low lane. The reservation record does not carry the
/// charged lane.
#[must_use]
pub fn refund_lane(vehicle: &Vehicle) -> Lane {
    // TODO: record the charged lane on the reservation so refunds can
    // follow the original charge instead of recomputing it here.
    if is_special(vehicle) {
        Lane::High
    } else {
        Lane::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(length: f64, height: f64) -> Vehicle {
        Vehicle {
            plate: "ABC123".to_string(),
            phone: "555-0000".to_string(),
            length,
            height,
        }
    }

    fn sailing(low_remaining: f64, high_remaining: f64) -> Sailing {
        Sailing {
            sailing_id: "S1".to_string(),
            vessel_id: "QUEEN".to_string(),
            low_remaining,
            high_remaining,
        }
    }

    #[test]
    fn reserved_length_adds_buffer() {
        assert_eq!(reserved_length(&vehicle(5.0, 1.5)), 5.5);
    }

    #[test]
    fn reserved_length_defaults_undeclared() {
        assert_eq!(reserved_length(&vehicle(0.0, 1.5)), 5.0);
    }

    #[test]
    fn special_by_height() {
        assert!(is_special(&vehicle(4.0, 2.1)));
        assert!(!is_special(&vehicle(4.0, 2.0)));
    }

    #[test]
    fn special_by_length() {
        assert!(is_special(&vehicle(7.5, 1.5)));
        assert!(!is_special(&vehicle(7.0, 1.5)));
    }

    #[test]
    fn regular_vehicle_books_low_lane() {
        assert_eq!(
            booking_lane(&vehicle(5.0, 1.5), &sailing(400.0, 200.0)),
            Lane::Low
        );
    }

    #[test]
    fn special_vehicle_books_high_lane_regardless_of_low() {
        assert_eq!(
            booking_lane(&vehicle(4.0, 2.5), &sailing(400.0, 200.0)),
            Lane::High
        );
    }

    #[test]
    fn regular_vehicle_overflows_to_high_lane() {
        // 4.0m vehicle reserves 4.5m; 0.0 < 4.5 routes to the high lane
        assert_eq!(
            booking_lane(&vehicle(4.0, 1.0), &sailing(0.0, 200.0)),
            Lane::High
        );
    }

    #[test]
    fn exact_fit_stays_in_low_lane() {
        assert_eq!(
            booking_lane(&vehicle(5.0, 1.5), &sailing(5.5, 200.0)),
            Lane::Low
        );
    }

    #[test]
    fn refund_ignores_overflow_routing() {
        // The overflow decision is not reconstructible at cancellation;
        // a regular vehicle always refunds to the low lane.
        assert_eq!(refund_lane(&vehicle(4.0, 1.0)), Lane::Low);
        assert_eq!(refund_lane(&vehicle(4.0, 2.5)), Lane::High);
    }
}
