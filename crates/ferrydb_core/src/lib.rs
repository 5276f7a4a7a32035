//! # FerryDB Core
//!
//! Ferry booking engine for FerryDB.
//!
//! This crate provides:
//! - Entity types with fixed binary record layouts
//! - Typed repositories over the fixed-record store
//! - Lane-selection logic for booking and cancellation
//! - Data directory management with single-process locking
//! - The [`Terminal`] facade exposing the boundary operations
//!
//! Everything is single-threaded and synchronous: each operation runs to
//! completion on the calling thread, and the data directory is exclusively
//! owned by one process for the life of the [`Terminal`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod booking;
mod config;
mod dir;
mod entity;
mod error;
mod repository;
mod terminal;

pub use config::Config;
pub use dir::TerminalDir;
pub use entity::{Reservation, Sailing, Vehicle, Vessel, MAX_ID_LEN, MAX_PHONE_LEN};
pub use error::{CoreError, CoreResult};
pub use repository::{
    ReservationRepository, SailingRepository, VehicleRepository, VesselRepository,
};
pub use terminal::Terminal;
