//! Entity types and their fixed binary record layouts.
//!
//! Every entity is persisted as a fixed-size record with no padding between
//! fields: identifier fields are fixed-width NUL-padded ASCII, numeric
//! fields are little-endian IEEE-754 binary64, flags are a single byte.
//! Record files carry no header; byte offset = position x record size.

use ferrydb_storage::{layout, FixedRecord};

/// Width of an identifier field in bytes (20 usable chars + NUL).
pub const ID_FIELD: usize = 21;
/// Width of a phone field in bytes (15 usable chars + NUL).
pub const PHONE_FIELD: usize = 16;

/// Maximum length of an identifier (vessel id, sailing id, plate).
pub const MAX_ID_LEN: usize = ID_FIELD - 1;
/// Maximum length of a phone number.
pub const MAX_PHONE_LEN: usize = PHONE_FIELD - 1;

/// A vessel with its declared lane capacities.
///
/// Immutable after creation; capacities are copied into a sailing's
/// remaining-lane fields when a sailing is created on this vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct Vessel {
    /// Unique vessel identifier.
    pub vessel_id: String,
    /// Total low-ceiling lane capacity in meters (LCLL).
    pub low_capacity: f64,
    /// Total high-ceiling lane capacity in meters (HCLL).
    pub high_capacity: f64,
}

impl FixedRecord for Vessel {
    const SIZE: usize = ID_FIELD + 8 + 8;

    fn encode_into(&self, buf: &mut [u8]) {
        layout::write_str(&mut buf[0..ID_FIELD], &self.vessel_id);
        layout::write_f64(&mut buf[ID_FIELD..ID_FIELD + 8], self.low_capacity);
        layout::write_f64(&mut buf[ID_FIELD + 8..ID_FIELD + 16], self.high_capacity);
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            vessel_id: layout::read_str(&buf[0..ID_FIELD]),
            low_capacity: layout::read_f64(&buf[ID_FIELD..ID_FIELD + 8]),
            high_capacity: layout::read_f64(&buf[ID_FIELD + 8..ID_FIELD + 16]),
        }
    }
}

/// A scheduled sailing with its remaining lane capacity.
///
/// The remaining-lane fields are the only mutable fields of any entity,
/// changed solely through capacity updates during booking and
/// cancellation. They may go negative; callers do not guard.
#[derive(Debug, Clone, PartialEq)]
pub struct Sailing {
    /// Unique sailing identifier.
    pub sailing_id: String,
    /// Identifier of the vessel operating this sailing.
    pub vessel_id: String,
    /// Remaining low-ceiling lane length in meters (LRL).
    pub low_remaining: f64,
    /// Remaining high-ceiling lane length in meters (HRL).
    pub high_remaining: f64,
}

impl FixedRecord for Sailing {
    const SIZE: usize = ID_FIELD * 2 + 8 + 8;

    fn encode_into(&self, buf: &mut [u8]) {
        layout::write_str(&mut buf[0..ID_FIELD], &self.sailing_id);
        layout::write_str(&mut buf[ID_FIELD..ID_FIELD * 2], &self.vessel_id);
        layout::write_f64(&mut buf[ID_FIELD * 2..ID_FIELD * 2 + 8], self.low_remaining);
        layout::write_f64(
            &mut buf[ID_FIELD * 2 + 8..ID_FIELD * 2 + 16],
            self.high_remaining,
        );
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            sailing_id: layout::read_str(&buf[0..ID_FIELD]),
            vessel_id: layout::read_str(&buf[ID_FIELD..ID_FIELD * 2]),
            low_remaining: layout::read_f64(&buf[ID_FIELD * 2..ID_FIELD * 2 + 8]),
            high_remaining: layout::read_f64(&buf[ID_FIELD * 2 + 8..ID_FIELD * 2 + 16]),
        }
    }
}

/// A registered vehicle.
///
/// Immutable after creation. A length of `0.0` means the length was not
/// declared; booking substitutes the default regular-vehicle length.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Unique license plate.
    pub plate: String,
    /// Contact phone number.
    pub phone: String,
    /// Vehicle length in meters (`0.0` = undeclared).
    pub length: f64,
    /// Vehicle height in meters.
    pub height: f64,
}

impl FixedRecord for Vehicle {
    const SIZE: usize = ID_FIELD + PHONE_FIELD + 8 + 8;

    fn encode_into(&self, buf: &mut [u8]) {
        let p = ID_FIELD + PHONE_FIELD;
        layout::write_str(&mut buf[0..ID_FIELD], &self.plate);
        layout::write_str(&mut buf[ID_FIELD..p], &self.phone);
        layout::write_f64(&mut buf[p..p + 8], self.length);
        layout::write_f64(&mut buf[p + 8..p + 16], self.height);
    }

    fn decode(buf: &[u8]) -> Self {
        let p = ID_FIELD + PHONE_FIELD;
        Self {
            plate: layout::read_str(&buf[0..ID_FIELD]),
            phone: layout::read_str(&buf[ID_FIELD..p]),
            length: layout::read_f64(&buf[p..p + 8]),
            height: layout::read_f64(&buf[p + 8..p + 16]),
        }
    }
}

/// A reservation of one vehicle on one sailing.
///
/// The logical key is the (sailing, plate) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Identifier of the sailing.
    pub sailing_id: String,
    /// Plate of the reserved vehicle.
    pub plate: String,
    /// Whether the vehicle has checked in at the terminal.
    pub checked_in: bool,
}

impl FixedRecord for Reservation {
    const SIZE: usize = ID_FIELD * 2 + 1;

    fn encode_into(&self, buf: &mut [u8]) {
        layout::write_str(&mut buf[0..ID_FIELD], &self.sailing_id);
        layout::write_str(&mut buf[ID_FIELD..ID_FIELD * 2], &self.plate);
        layout::write_bool(&mut buf[ID_FIELD * 2..], self.checked_in);
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            sailing_id: layout::read_str(&buf[0..ID_FIELD]),
            plate: layout::read_str(&buf[ID_FIELD..ID_FIELD * 2]),
            checked_in: layout::read_bool(&buf[ID_FIELD * 2..]),
        }
    }
}
