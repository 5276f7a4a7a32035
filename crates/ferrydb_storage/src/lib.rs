//! # FerryDB Storage
//!
//! Storage backend trait, implementations, and the generic fixed-record
//! store for FerryDB.
//!
//! This crate provides the lowest-level storage abstraction for FerryDB.
//! Storage backends are **opaque byte stores** - they do not interpret the
//! data they hold. The [`RecordStore`] layers position-addressed fixed-size
//! records on top of a backend; entity layouts themselves live in
//! `ferrydb_core`.
//!
//! ## Design Principles
//!
//! - Backends are simple byte stores (read, write, append, truncate)
//! - The record store owns position addressing and swap-and-truncate
//!   deletion; it has no index and no knowledge of entity keys
//! - Record positions are dense and unstable across deletes
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use ferrydb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(b"hello world").unwrap();
//! let data = backend.read_at(offset, 11).unwrap();
//! assert_eq!(&data, b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
pub mod layout;
mod memory;
mod record;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
pub use record::{FixedRecord, RecordStore};
