//! Error types for FerryDB core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in FerryDB core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] ferrydb_storage::StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input rejected before any mutation was attempted.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of what was invalid.
        message: String,
    },

    /// Vessel not found.
    #[error("vessel not found: {vessel_id}")]
    VesselNotFound {
        /// The vessel identifier that was not found.
        vessel_id: String,
    },

    /// Sailing not found.
    #[error("sailing not found: {sailing_id}")]
    SailingNotFound {
        /// The sailing identifier that was not found.
        sailing_id: String,
    },

    /// Vehicle not found.
    #[error("vehicle not found: {plate}")]
    VehicleNotFound {
        /// The vehicle plate that was not found.
        plate: String,
    },

    /// Reservation not found.
    #[error("reservation not found for sailing {sailing_id}, plate {plate}")]
    ReservationNotFound {
        /// The sailing identifier.
        sailing_id: String,
        /// The vehicle plate.
        plate: String,
    },

    /// No reservation exists for this plate on any sailing.
    #[error("no reservation for plate {plate}")]
    NoReservationForPlate {
        /// The vehicle plate.
        plate: String,
    },

    /// An entity with this key already exists.
    #[error("{entity} already exists: {key}")]
    AlreadyExists {
        /// Entity type name.
        entity: &'static str,
        /// The duplicate key.
        key: String,
    },

    /// The data directory is already open or locked.
    #[error("terminal data locked: another process has exclusive access")]
    TerminalLocked,
}

impl CoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a vessel-not-found error.
    pub fn vessel_not_found(vessel_id: impl Into<String>) -> Self {
        Self::VesselNotFound {
            vessel_id: vessel_id.into(),
        }
    }

    /// Creates a sailing-not-found error.
    pub fn sailing_not_found(sailing_id: impl Into<String>) -> Self {
        Self::SailingNotFound {
            sailing_id: sailing_id.into(),
        }
    }

    /// Creates a vehicle-not-found error.
    pub fn vehicle_not_found(plate: impl Into<String>) -> Self {
        Self::VehicleNotFound {
            plate: plate.into(),
        }
    }

    /// Creates a reservation-not-found error.
    pub fn reservation_not_found(
        sailing_id: impl Into<String>,
        plate: impl Into<String>,
    ) -> Self {
        Self::ReservationNotFound {
            sailing_id: sailing_id.into(),
            plate: plate.into(),
        }
    }

    /// Creates an already-exists error.
    pub fn already_exists(entity: &'static str, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.into(),
        }
    }
}
