//! Typed repositories over the fixed-record store.
//!
//! Each repository wraps one [`RecordStore`] and provides lookup-by-key via
//! linear scan; the store itself knows nothing about keys. Repositories do
//! not enforce key uniqueness - the [`Terminal`](crate::Terminal) facade
//! pre-checks existence before creating.
//!
//! There is no transactional guarantee between the scan that finds a
//! position and the mutating call that uses it, which is why every mutation
//! re-resolves its key immediately and why positions never cross a method
//! boundary.

use crate::entity::{Reservation, Sailing, Vehicle, Vessel};
use crate::error::CoreResult;
use ferrydb_storage::{FixedRecord, RecordStore};

/// Scans a store from position 0 and returns the first record matching
/// `pred`, together with its position.
fn find_position<T: FixedRecord>(
    store: &RecordStore<T>,
    mut pred: impl FnMut(&T) -> bool,
) -> CoreResult<Option<(u64, T)>> {
    let mut position = 0;
    while let Some(record) = store.read_at(position)? {
        if pred(&record) {
            return Ok(Some((position, record)));
        }
        position += 1;
    }
    Ok(None)
}

/// Repository for [`Vessel`] records.
#[derive(Debug)]
pub struct VesselRepository {
    store: RecordStore<Vessel>,
}

impl VesselRepository {
    /// Creates a repository over the given store.
    pub fn new(store: RecordStore<Vessel>) -> Self {
        Self { store }
    }

    /// Appends a vessel record. The caller has already checked the key is
    /// not a duplicate.
    pub fn create(&mut self, vessel: &Vessel) -> CoreResult<()> {
        self.store.append(vessel)?;
        Ok(())
    }

    /// Finds a vessel by id.
    pub fn find(&self, vessel_id: &str) -> CoreResult<Option<Vessel>> {
        Ok(find_position(&self.store, |v| v.vessel_id == vessel_id)?.map(|(_, v)| v))
    }

    /// Returns `true` if a vessel with this id exists.
    pub fn exists(&self, vessel_id: &str) -> CoreResult<bool> {
        Ok(self.find(vessel_id)?.is_some())
    }

    /// Deletes a vessel by id. Returns `false` if no such vessel exists.
    pub fn delete(&mut self, vessel_id: &str) -> CoreResult<bool> {
        match find_position(&self.store, |v| v.vessel_id == vessel_id)? {
            Some((position, _)) => {
                self.store.swap_remove(position)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Syncs the underlying store to durable storage.
    pub fn sync(&mut self) -> CoreResult<()> {
        self.store.sync()?;
        Ok(())
    }
}

/// Repository for [`Sailing`] records.
#[derive(Debug)]
pub struct SailingRepository {
    store: RecordStore<Sailing>,
}

impl SailingRepository {
    /// Creates a repository over the given store.
    pub fn new(store: RecordStore<Sailing>) -> Self {
        Self { store }
    }

    /// Appends a sailing record. The caller has already checked the key is
    /// not a duplicate.
    pub fn create(&mut self, sailing: &Sailing) -> CoreResult<()> {
        self.store.append(sailing)?;
        Ok(())
    }

    /// Finds a sailing by id.
    pub fn find(&self, sailing_id: &str) -> CoreResult<Option<Sailing>> {
        Ok(find_position(&self.store, |s| s.sailing_id == sailing_id)?.map(|(_, s)| s))
    }

    /// Returns `true` if a sailing with this id exists.
    pub fn exists(&self, sailing_id: &str) -> CoreResult<bool> {
        Ok(self.find(sailing_id)?.is_some())
    }

    /// Deletes a sailing by id. Returns `false` if no such sailing exists.
    pub fn delete(&mut self, sailing_id: &str) -> CoreResult<bool> {
        match find_position(&self.store, |s| s.sailing_id == sailing_id)? {
            Some((position, _)) => {
                self.store.swap_remove(position)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Applies deltas to a sailing's remaining lane lengths in place.
    ///
    /// The key is re-resolved to a position immediately before the write;
    /// positions are never reused across calls. Returns `false` if the
    /// sailing does not exist.
    pub fn update_capacity(
        &mut self,
        sailing_id: &str,
        low_delta: f64,
        high_delta: f64,
    ) -> CoreResult<bool> {
        match find_position(&self.store, |s| s.sailing_id == sailing_id)? {
            Some((position, mut sailing)) => {
                sailing.low_remaining += low_delta;
                sailing.high_remaining += high_delta;
                self.store.write_at(position, &sailing)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns all sailings from `offset` to the end of the store.
    ///
    /// Page slicing beyond the starting offset is the caller's concern.
    pub fn list_from(&self, offset: u64) -> CoreResult<Vec<Sailing>> {
        let mut sailings = Vec::new();
        let mut position = offset;
        while let Some(sailing) = self.store.read_at(position)? {
            sailings.push(sailing);
            position += 1;
        }
        Ok(sailings)
    }

    /// Syncs the underlying store to durable storage.
    pub fn sync(&mut self) -> CoreResult<()> {
        self.store.sync()?;
        Ok(())
    }
}

/// Repository for [`Vehicle`] records.
#[derive(Debug)]
pub struct VehicleRepository {
    store: RecordStore<Vehicle>,
}

impl VehicleRepository {
    /// Creates a repository over the given store.
    pub fn new(store: RecordStore<Vehicle>) -> Self {
        Self { store }
    }

    /// Appends a vehicle record. The caller has already checked the key is
    /// not a duplicate.
    pub fn create(&mut self, vehicle: &Vehicle) -> CoreResult<()> {
        self.store.append(vehicle)?;
        Ok(())
    }

    /// Finds a vehicle by plate.
    pub fn find(&self, plate: &str) -> CoreResult<Option<Vehicle>> {
        Ok(find_position(&self.store, |v| v.plate == plate)?.map(|(_, v)| v))
    }

    /// Returns `true` if a vehicle with this plate exists.
    pub fn exists(&self, plate: &str) -> CoreResult<bool> {
        Ok(self.find(plate)?.is_some())
    }

    /// Syncs the underlying store to durable storage.
    pub fn sync(&mut self) -> CoreResult<()> {
        self.store.sync()?;
        Ok(())
    }
}

/// Repository for [`Reservation`] records.
#[derive(Debug)]
pub struct ReservationRepository {
    store: RecordStore<Reservation>,
}

impl ReservationRepository {
    /// Creates a repository over the given store.
    pub fn new(store: RecordStore<Reservation>) -> Self {
        Self { store }
    }

    /// Appends a reservation record. The caller has already checked the
    /// (sailing, plate) pair is not a duplicate.
    pub fn create(&mut self, reservation: &Reservation) -> CoreResult<()> {
        self.store.append(reservation)?;
        Ok(())
    }

    /// Finds the reservation for a (sailing, plate) pair.
    pub fn find(&self, sailing_id: &str, plate: &str) -> CoreResult<Option<Reservation>> {
        Ok(
            find_position(&self.store, |r| {
                r.sailing_id == sailing_id && r.plate == plate
            })?
            .map(|(_, r)| r),
        )
    }

    /// Returns `true` if a reservation for this (sailing, plate) pair exists.
    pub fn exists(&self, sailing_id: &str, plate: &str) -> CoreResult<bool> {
        Ok(self.find(sailing_id, plate)?.is_some())
    }

    /// Finds the first reservation for a plate on any sailing.
    pub fn find_by_plate(&self, plate: &str) -> CoreResult<Option<Reservation>> {
        Ok(find_position(&self.store, |r| r.plate == plate)?.map(|(_, r)| r))
    }

    /// Returns `true` if any reservation exists for this plate.
    pub fn exists_for_plate(&self, plate: &str) -> CoreResult<bool> {
        Ok(self.find_by_plate(plate)?.is_some())
    }

    /// Marks the first reservation for this plate as checked in.
    ///
    /// Returns `false` if no reservation for the plate exists.
    pub fn check_in(&mut self, plate: &str) -> CoreResult<bool> {
        match find_position(&self.store, |r| r.plate == plate)? {
            Some((position, mut reservation)) => {
                reservation.checked_in = true;
                self.store.write_at(position, &reservation)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes the reservation for a (sailing, plate) pair.
    ///
    /// Returns `false` if no such reservation exists.
    pub fn delete(&mut self, sailing_id: &str, plate: &str) -> CoreResult<bool> {
        match find_position(&self.store, |r| {
            r.sailing_id == sailing_id && r.plate == plate
        })? {
            Some((position, _)) => {
                self.store.swap_remove(position)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes every reservation for a sailing; returns how many were
    /// deleted.
    ///
    /// Matching positions are snapshotted first and deleted from the
    /// highest position down. Swap-and-truncate only relocates the current
    /// last record, and every position above the one being deleted has
    /// already been removed, so the record swapped in is never a match and
    /// the remaining snapshot positions stay valid.
    pub fn delete_for_sailing(&mut self, sailing_id: &str) -> CoreResult<usize> {
        let mut matches = Vec::new();
        let mut position = 0;
        while let Some(reservation) = self.store.read_at(position)? {
            if reservation.sailing_id == sailing_id {
                matches.push(position);
            }
            position += 1;
        }

        for &position in matches.iter().rev() {
            self.store.swap_remove(position)?;
        }

        Ok(matches.len())
    }

    /// Syncs the underlying store to durable storage.
    pub fn sync(&mut self) -> CoreResult<()> {
        self.store.sync()?;
        Ok(())
    }
}
