//! Generic fixed-record store.
//!
//! A [`RecordStore`] persists homogeneous fixed-size records in a single
//! backend, addressed by zero-based position. Deletion uses a
//! swap-and-truncate strategy: the last record is moved into the deleted
//! slot and the storage shrinks by one record. This makes deletion O(1) in
//! I/O, at the cost of record positions being unstable across deletes -
//! callers must re-resolve key to position immediately before every
//! mutating call.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::marker::PhantomData;

/// A record with a fixed binary encoding.
///
/// Implementors define the record size and a byte-exact encoding. Decoding
/// is infallible: any `SIZE` bytes decode to a value (identifier fields are
/// read up to their first NUL, numeric fields are plain IEEE-754).
pub trait FixedRecord: Sized {
    /// Encoded size of the record in bytes.
    const SIZE: usize;

    /// Encodes the record into `buf`, which is exactly `SIZE` bytes.
    fn encode_into(&self, buf: &mut [u8]);

    /// Decodes a record from `buf`, which is exactly `SIZE` bytes.
    fn decode(buf: &[u8]) -> Self;
}

/// A position-addressed store of fixed-size records.
///
/// The store owns a [`StorageBackend`] and interprets it as a flat array of
/// `T::SIZE`-byte records: byte offset = position x `T::SIZE`. There is no
/// index; lookup by key is a linear scan built by callers on top of
/// [`read_at`](Self::read_at).
///
/// # Partial records
///
/// A partial record at the end of the backend (a crash mid-append, or a
/// truncated copy) is dropped when the store opens, so the backend size is
/// always a whole number of records.
///
/// # Example
///
/// ```rust,ignore
/// let mut store: RecordStore<Vessel> = RecordStore::new(Box::new(backend))?;
/// let position = store.append(&vessel)?;
/// assert!(store.read_at(position)?.is_some());
/// ```
pub struct RecordStore<T: FixedRecord> {
    backend: Box<dyn StorageBackend>,
    _marker: PhantomData<T>,
}

impl<T: FixedRecord> RecordStore<T> {
    /// Opens a record store over the given backend.
    ///
    /// If the backend ends with a partial record it is truncated away.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend size cannot be read or the partial
    /// tail cannot be truncated.
    pub fn new(mut backend: Box<dyn StorageBackend>) -> StorageResult<Self> {
        let size = backend.size()?;
        let tail = size % T::SIZE as u64;
        if tail != 0 {
            backend.truncate(size - tail)?;
        }
        Ok(Self {
            backend,
            _marker: PhantomData,
        })
    }

    /// Returns the number of records in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend size cannot be read.
    pub fn len(&self) -> StorageResult<u64> {
        Ok(self.backend.size()? / T::SIZE as u64)
    }

    /// Returns `true` if the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend size cannot be read.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Appends a record and returns its position.
    ///
    /// The returned position equals the record count before the append.
    /// It is only valid until the next mutating call on this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn append(&mut self, record: &T) -> StorageResult<u64> {
        let mut buf = vec![0u8; T::SIZE];
        record.encode_into(&mut buf);
        let offset = self.backend.append(&buf)?;
        Ok(offset / T::SIZE as u64)
    }

    /// Reads the record at `position`.
    ///
    /// Returns `None` if `position` is at or past the end of the store.
    /// This is a normal outcome (it terminates linear scans), not a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn read_at(&self, position: u64) -> StorageResult<Option<T>> {
        if position >= self.len()? {
            return Ok(None);
        }
        let buf = self.backend.read_at(position * T::SIZE as u64, T::SIZE)?;
        Ok(Some(T::decode(&buf)))
    }

    /// Overwrites the record at `position` in place.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidPosition`] if `position` is at or
    /// past the end of the store, or an I/O error if the write fails.
    pub fn write_at(&mut self, position: u64, record: &T) -> StorageResult<()> {
        let count = self.len()?;
        if position >= count {
            return Err(StorageError::InvalidPosition { position, count });
        }
        let mut buf = vec![0u8; T::SIZE];
        record.encode_into(&mut buf);
        self.backend.write_at(position * T::SIZE as u64, &buf)
    }

    /// Deletes the record at `position` by swap-and-truncate.
    ///
    /// If `position` is the last record the store simply shrinks by one
    /// record. Otherwise the last record is read, written over the target
    /// position, and the store shrinks by one record. Either way this is
    /// two record-sized I/O operations at most.
    ///
    /// The record that was last is silently relocated; any position a
    /// caller obtained before this call is stale afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidPosition`] if `position` is at or
    /// past the end of the store, or an I/O error if a read, write, or
    /// truncate fails.
    pub fn swap_remove(&mut self, position: u64) -> StorageResult<()> {
        let count = self.len()?;
        if position >= count {
            return Err(StorageError::InvalidPosition { position, count });
        }

        let last = count - 1;
        if position != last {
            let buf = self.backend.read_at(last * T::SIZE as u64, T::SIZE)?;
            self.backend.write_at(position * T::SIZE as u64, &buf)?;
        }
        self.backend.truncate(last * T::SIZE as u64)
    }

    /// Flushes pending writes to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend flush fails.
    pub fn flush(&mut self) -> StorageResult<()> {
        self.backend.flush()
    }

    /// Syncs data and metadata to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend sync fails.
    pub fn sync(&mut self) -> StorageResult<()> {
        self.backend.sync()
    }
}

impl<T: FixedRecord> std::fmt::Debug for RecordStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("record_size", &T::SIZE)
            .field("len", &self.len().ok())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::memory::InMemoryBackend;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestRecord {
        id: String,
        value: f64,
    }

    impl FixedRecord for TestRecord {
        const SIZE: usize = 16 + 8;

        fn encode_into(&self, buf: &mut [u8]) {
            layout::write_str(&mut buf[0..16], &self.id);
            layout::write_f64(&mut buf[16..24], self.value);
        }

        fn decode(buf: &[u8]) -> Self {
            Self {
                id: layout::read_str(&buf[0..16]),
                value: layout::read_f64(&buf[16..24]),
            }
        }
    }

    fn record(id: &str, value: f64) -> TestRecord {
        TestRecord {
            id: id.to_string(),
            value,
        }
    }

    fn new_store() -> RecordStore<TestRecord> {
        RecordStore::new(Box::new(InMemoryBackend::new())).unwrap()
    }

    fn scan(store: &RecordStore<TestRecord>) -> Vec<TestRecord> {
        let mut out = Vec::new();
        let mut position = 0;
        while let Some(rec) = store.read_at(position).unwrap() {
            out.push(rec);
            position += 1;
        }
        out
    }

    #[test]
    fn append_returns_prior_count() {
        let mut store = new_store();
        assert_eq!(store.append(&record("A", 1.0)).unwrap(), 0);
        assert_eq!(store.append(&record("B", 2.0)).unwrap(), 1);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn append_read_round_trip() {
        let mut store = new_store();
        let rec = record("ABC123", 5.5);
        let position = store.append(&rec).unwrap();
        assert_eq!(store.read_at(position).unwrap(), Some(rec));
    }

    #[test]
    fn read_past_end_is_absent() {
        let mut store = new_store();
        assert_eq!(store.read_at(0).unwrap(), None);
        store.append(&record("A", 1.0)).unwrap();
        assert_eq!(store.read_at(1).unwrap(), None);
        assert_eq!(store.read_at(100).unwrap(), None);
    }

    #[test]
    fn write_at_overwrites_in_place() {
        let mut store = new_store();
        store.append(&record("A", 1.0)).unwrap();
        store.append(&record("B", 2.0)).unwrap();

        store.write_at(0, &record("A", 9.0)).unwrap();

        assert_eq!(store.read_at(0).unwrap(), Some(record("A", 9.0)));
        assert_eq!(store.read_at(1).unwrap(), Some(record("B", 2.0)));
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn write_at_past_end_fails() {
        let mut store = new_store();
        store.append(&record("A", 1.0)).unwrap();

        let result = store.write_at(1, &record("B", 2.0));
        assert!(matches!(
            result,
            Err(StorageError::InvalidPosition { position: 1, count: 1 })
        ));
    }

    #[test]
    fn swap_remove_last_is_pure_truncate() {
        let mut store = new_store();
        store.append(&record("A", 1.0)).unwrap();
        store.append(&record("B", 2.0)).unwrap();

        store.swap_remove(1).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.read_at(0).unwrap(), Some(record("A", 1.0)));
    }

    #[test]
    fn swap_remove_middle_relocates_last() {
        let mut store = new_store();
        store.append(&record("A", 1.0)).unwrap();
        store.append(&record("B", 2.0)).unwrap();
        store.append(&record("C", 3.0)).unwrap();

        store.swap_remove(0).unwrap();

        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.read_at(0).unwrap(), Some(record("C", 3.0)));
        assert_eq!(store.read_at(1).unwrap(), Some(record("B", 2.0)));
    }

    #[test]
    fn swap_remove_shrinks_exactly_one() {
        let mut store = new_store();
        for i in 0..5 {
            store.append(&record(&format!("R{i}"), i as f64)).unwrap();
        }

        store.swap_remove(2).unwrap();

        let survivors = scan(&store);
        assert_eq!(survivors.len(), 4);
        // Every record other than the deleted one is still present by value
        for i in [0u32, 1, 3, 4] {
            let expected = record(&format!("R{i}"), i as f64);
            assert_eq!(
                survivors.iter().filter(|r| **r == expected).count(),
                1,
                "record R{i} should survive exactly once"
            );
        }
    }

    #[test]
    fn swap_remove_past_end_fails() {
        let mut store = new_store();
        let result = store.swap_remove(0);
        assert!(matches!(result, Err(StorageError::InvalidPosition { .. })));
    }

    #[test]
    fn partial_tail_is_dropped_on_open() {
        let mut backend = InMemoryBackend::new();
        let mut buf = vec![0u8; TestRecord::SIZE];
        record("A", 1.0).encode_into(&mut buf);
        backend.append(&buf).unwrap();
        // Half a record at the end, as after a crash mid-append
        backend.append(&buf[..TestRecord::SIZE / 2]).unwrap();

        let store: RecordStore<TestRecord> = RecordStore::new(Box::new(backend)).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.read_at(0).unwrap(), Some(record("A", 1.0)));
        assert_eq!(store.read_at(1).unwrap(), None);
    }

    #[test]
    fn append_after_partial_tail_stays_aligned() {
        let mut backend = InMemoryBackend::new();
        backend.append(&[0xab; 7]).unwrap();

        let mut store: RecordStore<TestRecord> = RecordStore::new(Box::new(backend)).unwrap();
        assert_eq!(store.len().unwrap(), 0);

        let position = store.append(&record("B", 2.0)).unwrap();
        assert_eq!(position, 0);
        assert_eq!(store.read_at(0).unwrap(), Some(record("B", 2.0)));
    }

    proptest! {
        // Durability: a record appended and never deleted survives arbitrary
        // interleavings of other appends and deletes, exactly once.
        #[test]
        fn surviving_records_match_model(ops in proptest::collection::vec(
            (0u8..2, 0u64..8, -1000.0f64..1000.0),
            0..40,
        )) {
            let mut store = new_store();
            let mut model: Vec<TestRecord> = Vec::new();
            let mut next_id = 0u64;

            for (op, index, value) in ops {
                if op == 0 {
                    let rec = record(&format!("ID{next_id}"), value);
                    next_id += 1;
                    let position = store.append(&rec).unwrap();
                    prop_assert_eq!(position, model.len() as u64);
                    model.push(rec);
                } else if !model.is_empty() {
                    let position = index % model.len() as u64;
                    store.swap_remove(position).unwrap();
                    model.swap_remove(position as usize);
                }
            }

            prop_assert_eq!(store.len().unwrap(), model.len() as u64);
            let survivors = scan(&store);
            prop_assert_eq!(survivors, model);
        }
    }
}
