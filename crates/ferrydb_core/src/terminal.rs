//! Terminal facade and lifecycle.

use crate::booking::{self, Lane};
use crate::config::Config;
use crate::dir::TerminalDir;
use crate::entity::{Reservation, Sailing, Vehicle, Vessel, MAX_ID_LEN, MAX_PHONE_LEN};
use crate::error::{CoreError, CoreResult};
use crate::repository::{
    ReservationRepository, SailingRepository, VehicleRepository, VesselRepository,
};
use ferrydb_storage::{FileBackend, InMemoryBackend, RecordStore, StorageBackend};
use std::path::Path;
use tracing::{debug, info};

/// The main terminal handle.
///
/// `Terminal` is the entry point for the booking core. It owns the data
/// directory lock and one repository per entity type, and exposes the
/// boundary operations the (excluded) UI layer calls: vessel, sailing,
/// vehicle, and reservation creation, booking and cancellation with lane
/// accounting, check-in, cascading sailing deletion, and lookups.
///
/// All validation happens before any mutation is attempted, so a returned
/// error never leaves a partial state change - with one documented
/// exception: a failure while cascading reservation deletion leaves the
/// sailing deleted and some reservations orphaned (there is no rollback).
///
/// # Opening a terminal
///
/// ```rust,ignore
/// use ferrydb_core::Terminal;
/// use std::path::Path;
///
/// let mut terminal = Terminal::open(Path::new("terminal_data"))?;
/// terminal.create_vessel("QUEEN", 400.0, 200.0)?;
/// terminal.create_sailing("QUEEN", "S1")?;
/// terminal.close()?;
/// ```
///
/// # In-memory terminals
///
/// For testing, use [`Terminal::open_in_memory`].
pub struct Terminal {
    config: Config,
    /// Data directory (holds the lock). None for in-memory terminals.
    dir: Option<TerminalDir>,
    vessels: VesselRepository,
    sailings: SailingRepository,
    vehicles: VehicleRepository,
    reservations: ReservationRepository,
}

impl Terminal {
    /// Opens a terminal from a data directory path.
    ///
    /// Creates the directory if it doesn't exist, acquires the exclusive
    /// lock, and opens the four record files.
    ///
    /// # Errors
    ///
    /// Returns an error if another process holds the lock
    /// (`TerminalLocked`) or I/O errors occur.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens a terminal from a data directory path with custom
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened or locked.
    pub fn open_with_config(path: &Path, config: Config) -> CoreResult<Self> {
        let dir = TerminalDir::open(path, config.create_if_missing)?;

        let vessels = Box::new(FileBackend::open(&dir.vessels_path())?);
        let sailings = Box::new(FileBackend::open(&dir.sailings_path())?);
        let vehicles = Box::new(FileBackend::open(&dir.vehicles_path())?);
        let reservations = Box::new(FileBackend::open(&dir.reservations_path())?);

        info!(path = %path.display(), "terminal opened");

        Self::from_backends(config, Some(dir), vessels, sailings, vehicles, reservations)
    }

    /// Opens an ephemeral in-memory terminal.
    ///
    /// Nothing is persisted; useful for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be initialized.
    pub fn open_in_memory() -> CoreResult<Self> {
        Self::from_backends(
            Config::default(),
            None,
            Box::new(InMemoryBackend::new()),
            Box::new(InMemoryBackend::new()),
            Box::new(InMemoryBackend::new()),
            Box::new(InMemoryBackend::new()),
        )
    }

    fn from_backends(
        config: Config,
        dir: Option<TerminalDir>,
        vessels: Box<dyn StorageBackend>,
        sailings: Box<dyn StorageBackend>,
        vehicles: Box<dyn StorageBackend>,
        reservations: Box<dyn StorageBackend>,
    ) -> CoreResult<Self> {
        Ok(Self {
            config,
            dir,
            vessels: VesselRepository::new(RecordStore::new(vessels)?),
            sailings: SailingRepository::new(RecordStore::new(sailings)?),
            vehicles: VehicleRepository::new(RecordStore::new(vehicles)?),
            reservations: ReservationRepository::new(RecordStore::new(reservations)?),
        })
    }

    /// Returns the data directory path, if this terminal is file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TerminalDir::path)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Syncs all record files and releases the directory lock.
    ///
    /// Dropping a `Terminal` also releases the lock, but without the final
    /// sync.
    ///
    /// # Errors
    ///
    /// Returns the first sync error encountered.
    pub fn close(mut self) -> CoreResult<()> {
        self.vessels.sync()?;
        self.sailings.sync()?;
        self.vehicles.sync()?;
        self.reservations.sync()?;
        if let Some(dir) = &self.dir {
            info!(path = %dir.path().display(), "terminal closed");
        }
        Ok(())
    }

    // --- Vessels ---

    /// Creates a vessel with its declared lane capacities.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a bad identifier or non-positive
    /// capacities, `AlreadyExists` for a duplicate id.
    pub fn create_vessel(
        &mut self,
        vessel_id: &str,
        low_capacity: f64,
        high_capacity: f64,
    ) -> CoreResult<()> {
        validate_id("vessel id", vessel_id)?;
        validate_capacity("low-ceiling lane capacity", low_capacity)?;
        validate_capacity("high-ceiling lane capacity", high_capacity)?;
        if self.vessels.exists(vessel_id)? {
            return Err(CoreError::already_exists("vessel", vessel_id));
        }

        self.vessels.create(&Vessel {
            vessel_id: vessel_id.to_string(),
            low_capacity,
            high_capacity,
        })?;
        debug!(vessel_id, low_capacity, high_capacity, "vessel created");
        self.sync_if_configured()
    }

    /// Looks up a vessel by id.
    pub fn vessel(&self, vessel_id: &str) -> CoreResult<Option<Vessel>> {
        self.vessels.find(vessel_id)
    }

    /// Returns `true` if a vessel with this id exists.
    pub fn vessel_exists(&self, vessel_id: &str) -> CoreResult<bool> {
        self.vessels.exists(vessel_id)
    }

    /// Deletes a vessel by id.
    ///
    /// Sailings already created on this vessel are unaffected; they carry
    /// their own capacity fields.
    ///
    /// # Errors
    ///
    /// Returns `VesselNotFound` if no such vessel exists.
    pub fn delete_vessel(&mut self, vessel_id: &str) -> CoreResult<()> {
        if !self.vessels.delete(vessel_id)? {
            return Err(CoreError::vessel_not_found(vessel_id));
        }
        debug!(vessel_id, "vessel deleted");
        self.sync_if_configured()
    }

    // --- Sailings ---

    /// Creates a sailing on an existing vessel.
    ///
    /// The vessel's declared capacities become the sailing's initial
    /// remaining lane lengths.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a bad identifier, `VesselNotFound` if the
    /// vessel doesn't exist, `AlreadyExists` for a duplicate sailing id.
    pub fn create_sailing(&mut self, vessel_id: &str, sailing_id: &str) -> CoreResult<()> {
        validate_id("sailing id", sailing_id)?;
        let vessel = self
            .vessels
            .find(vessel_id)?
            .ok_or_else(|| CoreError::vessel_not_found(vessel_id))?;
        if self.sailings.exists(sailing_id)? {
            return Err(CoreError::already_exists("sailing", sailing_id));
        }

        self.sailings.create(&Sailing {
            sailing_id: sailing_id.to_string(),
            vessel_id: vessel_id.to_string(),
            low_remaining: vessel.low_capacity,
            high_remaining: vessel.high_capacity,
        })?;
        debug!(sailing_id, vessel_id, "sailing created");
        self.sync_if_configured()
    }

    /// Looks up a sailing by id.
    pub fn sailing(&self, sailing_id: &str) -> CoreResult<Option<Sailing>> {
        self.sailings.find(sailing_id)
    }

    /// Returns `true` if a sailing with this id exists.
    pub fn sailing_exists(&self, sailing_id: &str) -> CoreResult<bool> {
        self.sailings.exists(sailing_id)
    }

    /// Returns all sailings from `offset` to the end of the file.
    pub fn list_sailings(&self, offset: u64) -> CoreResult<Vec<Sailing>> {
        self.sailings.list_from(offset)
    }

    /// Deletes a sailing and every reservation booked on it.
    ///
    /// The sailing is deleted first, then the reservations. A failure
    /// mid-cascade leaves the sailing deleted and the remaining
    /// reservations orphaned; there is no rollback.
    ///
    /// # Errors
    ///
    /// Returns `SailingNotFound` if no such sailing exists.
    pub fn delete_sailing(&mut self, sailing_id: &str) -> CoreResult<()> {
        if !self.sailings.delete(sailing_id)? {
            return Err(CoreError::sailing_not_found(sailing_id));
        }
        let cascaded = self.reservations.delete_for_sailing(sailing_id)?;
        debug!(sailing_id, cascaded, "sailing deleted");
        self.sync_if_configured()
    }

    // --- Vehicles ---

    /// Registers a vehicle.
    ///
    /// A length of `0.0` means undeclared; booking substitutes the default
    /// regular-vehicle length.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a bad plate or phone, negative or
    /// non-finite dimensions, `AlreadyExists` for a duplicate plate.
    pub fn create_vehicle(
        &mut self,
        plate: &str,
        phone: &str,
        length: f64,
        height: f64,
    ) -> CoreResult<()> {
        validate_id("plate", plate)?;
        validate_phone(phone)?;
        validate_dimension("length", length)?;
        validate_dimension("height", height)?;
        if self.vehicles.exists(plate)? {
            return Err(CoreError::already_exists("vehicle", plate));
        }

        self.vehicles.create(&Vehicle {
            plate: plate.to_string(),
            phone: phone.to_string(),
            length,
            height,
        })?;
        debug!(plate, length, height, "vehicle created");
        self.sync_if_configured()
    }

    /// Looks up a vehicle by plate.
    pub fn vehicle(&self, plate: &str) -> CoreResult<Option<Vehicle>> {
        self.vehicles.find(plate)
    }

    /// Returns `true` if a vehicle with this plate exists.
    pub fn vehicle_exists(&self, plate: &str) -> CoreResult<bool> {
        self.vehicles.exists(plate)
    }

    // --- Reservations ---

    /// Books a vehicle onto a sailing and charges the chosen lane.
    ///
    /// The reserved length is the vehicle's length (or the regular-vehicle
    /// default if undeclared) plus the buffer margin. Special vehicles and
    /// regular vehicles that don't fit the low lane are charged to the
    /// high lane; everything else to the low lane. Lane pools are not
    /// guarded against going negative.
    ///
    /// # Errors
    ///
    /// Returns `VehicleNotFound` / `SailingNotFound` if either side is
    /// missing, `AlreadyExists` if this (sailing, plate) pair is already
    /// booked. No state changes on error.
    pub fn reserve(&mut self, sailing_id: &str, plate: &str) -> CoreResult<()> {
        let vehicle = self
            .vehicles
            .find(plate)?
            .ok_or_else(|| CoreError::vehicle_not_found(plate))?;
        let sailing = self
            .sailings
            .find(sailing_id)?
            .ok_or_else(|| CoreError::sailing_not_found(sailing_id))?;
        if self.reservations.exists(sailing_id, plate)? {
            return Err(CoreError::already_exists("reservation", format!("{sailing_id}/{plate}")));
        }

        self.reservations.create(&Reservation {
            sailing_id: sailing_id.to_string(),
            plate: plate.to_string(),
            checked_in: false,
        })?;

        let reserved = booking::reserved_length(&vehicle);
        let lane = booking::booking_lane(&vehicle, &sailing);
        match lane {
            Lane::Low => self.sailings.update_capacity(sailing_id, -reserved, 0.0)?,
            Lane::High => self.sailings.update_capacity(sailing_id, 0.0, -reserved)?,
        };
        debug!(sailing_id, plate, reserved, ?lane, "reservation booked");
        self.sync_if_configured()
    }

    /// Cancels a reservation and refunds the lane chosen from the
    /// vehicle's static attributes.
    ///
    /// Refund routing cannot see whether booking overflow-routed a regular
    /// vehicle into the high lane; such a cancellation refunds the low
    /// lane (see [`booking::refund_lane`]).
    ///
    /// # Errors
    ///
    /// Returns `ReservationNotFound` if this (sailing, plate) pair is not
    /// booked, `VehicleNotFound` if the vehicle record is missing. No
    /// state changes on error.
    pub fn cancel(&mut self, sailing_id: &str, plate: &str) -> CoreResult<()> {
        let vehicle = self
            .vehicles
            .find(plate)?
            .ok_or_else(|| CoreError::vehicle_not_found(plate))?;
        if !self.reservations.exists(sailing_id, plate)? {
            return Err(CoreError::reservation_not_found(sailing_id, plate));
        }

        self.reservations.delete(sailing_id, plate)?;

        let reserved = booking::reserved_length(&vehicle);
        let lane = booking::refund_lane(&vehicle);
        match lane {
            Lane::Low => self.sailings.update_capacity(sailing_id, reserved, 0.0)?,
            Lane::High => self.sailings.update_capacity(sailing_id, 0.0, reserved)?,
        };
        debug!(sailing_id, plate, reserved, ?lane, "reservation cancelled");
        self.sync_if_configured()
    }

    /// Marks the first reservation for this plate as checked in.
    ///
    /// # Errors
    ///
    /// Returns `NoReservationForPlate` if the plate has no reservation.
    pub fn check_in(&mut self, plate: &str) -> CoreResult<()> {
        if !self.reservations.check_in(plate)? {
            return Err(CoreError::NoReservationForPlate {
                plate: plate.to_string(),
            });
        }
        debug!(plate, "vehicle checked in");
        self.sync_if_configured()
    }

    /// Looks up the reservation for a (sailing, plate) pair.
    pub fn reservation(&self, sailing_id: &str, plate: &str) -> CoreResult<Option<Reservation>> {
        self.reservations.find(sailing_id, plate)
    }

    /// Looks up the first reservation for a plate on any sailing.
    pub fn reservation_for_plate(&self, plate: &str) -> CoreResult<Option<Reservation>> {
        self.reservations.find_by_plate(plate)
    }

    /// Returns `true` if a reservation for this (sailing, plate) pair
    /// exists.
    pub fn reservation_exists(&self, sailing_id: &str, plate: &str) -> CoreResult<bool> {
        self.reservations.exists(sailing_id, plate)
    }

    fn sync_if_configured(&mut self) -> CoreResult<()> {
        if self.config.sync_on_write {
            self.vessels.sync()?;
            self.sailings.sync()?;
            self.vehicles.sync()?;
            self.reservations.sync()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

fn validate_id(field: &str, value: &str) -> CoreResult<()> {
    if value.is_empty() {
        return Err(CoreError::validation(format!("{field} must not be empty")));
    }
    if value.len() > MAX_ID_LEN {
        return Err(CoreError::validation(format!(
            "{field} longer than {MAX_ID_LEN} characters: {value:?}"
        )));
    }
    if !value.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
        return Err(CoreError::validation(format!(
            "{field} must be printable ASCII: {value:?}"
        )));
    }
    Ok(())
}

fn validate_phone(value: &str) -> CoreResult<()> {
    if value.len() > MAX_PHONE_LEN {
        return Err(CoreError::validation(format!(
            "phone longer than {MAX_PHONE_LEN} characters: {value:?}"
        )));
    }
    if !value.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
        return Err(CoreError::validation(format!(
            "phone must be printable ASCII: {value:?}"
        )));
    }
    Ok(())
}

fn validate_dimension(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::validation(format!(
            "{field} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}

fn validate_capacity(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::validation(format!(
            "{field} must be finite and positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn terminal() -> Terminal {
        Terminal::open_in_memory().unwrap()
    }

    fn terminal_with_sailing() -> Terminal {
        let mut t = terminal();
        t.create_vessel("QUEEN", 400.0, 200.0).unwrap();
        t.create_sailing("QUEEN", "S1").unwrap();
        t
    }

    #[test]
    fn sailing_starts_with_vessel_capacities() {
        // Scenario: vessel QUEEN with LCLL=400, HCLL=200
        let t = terminal_with_sailing();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.vessel_id, "QUEEN");
        assert_eq!(sailing.low_remaining, 400.0);
        assert_eq!(sailing.high_remaining, 200.0);
    }

    #[test]
    fn reserve_and_cancel_regular_vehicle() {
        // Booking a 5.0m vehicle reserves 5.5m from the low lane;
        // cancelling restores it exactly.
        let mut t = terminal_with_sailing();
        t.create_vehicle("ABC123", "+1-555-123-4567", 5.0, 1.5)
            .unwrap();

        t.reserve("S1", "ABC123").unwrap();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.low_remaining, 394.5);
        assert_eq!(sailing.high_remaining, 200.0);
        assert!(t.reservation_exists("S1", "ABC123").unwrap());

        t.cancel("S1", "ABC123").unwrap();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.low_remaining, 400.0);
        assert_eq!(sailing.high_remaining, 200.0);
        assert!(!t.reservation_exists("S1", "ABC123").unwrap());
    }

    #[test]
    fn special_vehicle_charges_high_lane() {
        let mut t = terminal_with_sailing();
        t.create_vehicle("TRUCK1", "555-0001", 6.0, 3.5).unwrap();

        t.reserve("S1", "TRUCK1").unwrap();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.low_remaining, 400.0);
        assert_eq!(sailing.high_remaining, 193.5);
    }

    #[test]
    fn regular_vehicle_overflows_to_high_lane() {
        // Low lane exhausted: a regular 4.0m vehicle (4.5m reserved)
        // routes to the high lane.
        let mut t = terminal();
        t.create_vessel("DINGHY", 4.0, 200.0).unwrap();
        t.create_sailing("DINGHY", "S1").unwrap();
        t.create_vehicle("CAR1", "555-0002", 4.0, 1.0).unwrap();
        // First booking drains the low lane to -0.5
        t.reserve("S1", "CAR1").unwrap();
        let low_after_first = t.sailing("S1").unwrap().unwrap().low_remaining;
        assert_eq!(low_after_first, -0.5);

        t.create_vehicle("CAR2", "555-0003", 4.0, 1.0).unwrap();
        t.reserve("S1", "CAR2").unwrap();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.low_remaining, -0.5);
        assert_eq!(sailing.high_remaining, 195.5);
    }

    #[test]
    fn overflow_cancel_refunds_low_lane() {
        // The documented asymmetry: a regular vehicle charged to the high
        // lane by overflow routing is refunded to the low lane.
        let mut t = terminal();
        t.create_vessel("SMALL", 1.0, 200.0).unwrap();
        t.create_sailing("SMALL", "S1").unwrap();
        t.create_vehicle("CAR1", "555-0004", 4.0, 1.0).unwrap();

        t.reserve("S1", "CAR1").unwrap();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.low_remaining, 1.0);
        assert_eq!(sailing.high_remaining, 195.5);

        t.cancel("S1", "CAR1").unwrap();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.low_remaining, 5.5);
        assert_eq!(sailing.high_remaining, 195.5);
    }

    #[test]
    fn undeclared_length_uses_default() {
        let mut t = terminal_with_sailing();
        t.create_vehicle("CAR9", "555-0005", 0.0, 1.0).unwrap();

        t.reserve("S1", "CAR9").unwrap();
        let sailing = t.sailing("S1").unwrap().unwrap();
        assert_eq!(sailing.low_remaining, 395.0);
    }

    #[test]
    fn delete_sailing_cascades_reservations() {
        let mut t = terminal_with_sailing();
        t.create_vehicle("CAR1", "555-0006", 5.0, 1.5).unwrap();
        t.create_vehicle("CAR2", "555-0007", 5.0, 1.5).unwrap();
        t.reserve("S1", "CAR1").unwrap();
        t.reserve("S1", "CAR2").unwrap();

        t.delete_sailing("S1").unwrap();

        assert!(!t.sailing_exists("S1").unwrap());
        assert!(!t.reservation_exists("S1", "CAR1").unwrap());
        assert!(!t.reservation_exists("S1", "CAR2").unwrap());
    }

    #[test]
    fn delete_sailing_leaves_other_sailings_reservations() {
        let mut t = terminal_with_sailing();
        t.create_sailing("QUEEN", "S2").unwrap();
        t.create_vehicle("CAR1", "555-0008", 5.0, 1.5).unwrap();
        t.reserve("S1", "CAR1").unwrap();
        t.reserve("S2", "CAR1").unwrap();

        t.delete_sailing("S1").unwrap();

        assert!(t.sailing_exists("S2").unwrap());
        assert!(t.reservation_exists("S2", "CAR1").unwrap());
    }

    #[test]
    fn check_in_sets_flag() {
        let mut t = terminal_with_sailing();
        t.create_vehicle("CAR1", "555-0009", 5.0, 1.5).unwrap();
        t.reserve("S1", "CAR1").unwrap();

        assert!(!t.reservation("S1", "CAR1").unwrap().unwrap().checked_in);
        t.check_in("CAR1").unwrap();
        assert!(t.reservation("S1", "CAR1").unwrap().unwrap().checked_in);

        let result = t.check_in("GHOST");
        assert!(matches!(
            result,
            Err(CoreError::NoReservationForPlate { .. })
        ));
    }

    #[test]
    fn duplicate_keys_rejected() {
        let mut t = terminal_with_sailing();
        assert!(matches!(
            t.create_vessel("QUEEN", 100.0, 50.0),
            Err(CoreError::AlreadyExists { entity: "vessel", .. })
        ));
        assert!(matches!(
            t.create_sailing("QUEEN", "S1"),
            Err(CoreError::AlreadyExists { entity: "sailing", .. })
        ));

        t.create_vehicle("CAR1", "555-0010", 5.0, 1.5).unwrap();
        assert!(matches!(
            t.create_vehicle("CAR1", "555-0010", 5.0, 1.5),
            Err(CoreError::AlreadyExists { entity: "vehicle", .. })
        ));

        t.reserve("S1", "CAR1").unwrap();
        assert!(matches!(
            t.reserve("S1", "CAR1"),
            Err(CoreError::AlreadyExists { entity: "reservation", .. })
        ));
        // The failed re-booking did not charge the lane again
        assert_eq!(t.sailing("S1").unwrap().unwrap().low_remaining, 394.5);
    }

    #[test]
    fn validation_rejects_before_mutation() {
        let mut t = terminal();

        assert!(matches!(
            t.create_vessel("", 400.0, 200.0),
            Err(CoreError::Validation { .. })
        ));
        assert!(matches!(
            t.create_vessel("WAYTOOLONGVESSELIDENTIFIER", 400.0, 200.0),
            Err(CoreError::Validation { .. })
        ));
        assert!(matches!(
            t.create_vessel("QUEEN", 0.0, 200.0),
            Err(CoreError::Validation { .. })
        ));
        assert!(matches!(
            t.create_vehicle("CAR1", "555-0011", -1.0, 1.5),
            Err(CoreError::Validation { .. })
        ));
        assert!(matches!(
            t.create_vehicle("CAR1", "555-0011-way-too-long", 5.0, 1.5),
            Err(CoreError::Validation { .. })
        ));

        assert!(!t.vessel_exists("QUEEN").unwrap());
        assert!(!t.vehicle_exists("CAR1").unwrap());
    }

    #[test]
    fn missing_entities_reported() {
        let mut t = terminal();
        assert!(matches!(
            t.create_sailing("GHOST", "S1"),
            Err(CoreError::VesselNotFound { .. })
        ));
        assert!(matches!(
            t.reserve("S1", "CAR1"),
            Err(CoreError::VehicleNotFound { .. })
        ));
        t.create_vehicle("CAR1", "555-0012", 5.0, 1.5).unwrap();
        assert!(matches!(
            t.reserve("S1", "CAR1"),
            Err(CoreError::SailingNotFound { .. })
        ));
        assert!(matches!(
            t.cancel("S1", "CAR1"),
            Err(CoreError::ReservationNotFound { .. })
        ));
        assert!(matches!(
            t.delete_sailing("S1"),
            Err(CoreError::SailingNotFound { .. })
        ));
        assert!(matches!(
            t.delete_vessel("GHOST"),
            Err(CoreError::VesselNotFound { .. })
        ));
    }

    #[test]
    fn list_sailings_pages_from_offset() {
        let mut t = terminal();
        t.create_vessel("QUEEN", 400.0, 200.0).unwrap();
        for i in 0..4 {
            t.create_sailing("QUEEN", &format!("S{i}")).unwrap();
        }

        assert_eq!(t.list_sailings(0).unwrap().len(), 4);
        let page = t.list_sailings(2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].sailing_id, "S2");
        assert!(t.list_sailings(10).unwrap().is_empty());
    }

    #[test]
    fn persistence_across_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("terminal");

        {
            let mut t = Terminal::open(&path).unwrap();
            t.create_vessel("QUEEN", 400.0, 200.0).unwrap();
            t.create_sailing("QUEEN", "S1").unwrap();
            t.create_vehicle("ABC123", "+1-555-123-4567", 5.0, 1.5)
                .unwrap();
            t.reserve("S1", "ABC123").unwrap();
            t.close().unwrap();
        }

        {
            let t = Terminal::open(&path).unwrap();
            assert!(t.vessel_exists("QUEEN").unwrap());
            let sailing = t.sailing("S1").unwrap().unwrap();
            assert_eq!(sailing.low_remaining, 394.5);
            let vehicle = t.vehicle("ABC123").unwrap().unwrap();
            assert_eq!(vehicle.phone, "+1-555-123-4567");
            assert!(t.reservation_exists("S1", "ABC123").unwrap());
        }
    }

    #[test]
    fn second_open_is_locked_out() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("terminal");

        let _t1 = Terminal::open(&path).unwrap();
        assert!(matches!(
            Terminal::open(&path),
            Err(CoreError::TerminalLocked)
        ));
    }
}
