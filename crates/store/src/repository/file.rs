//! File-backed repository over a line store.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::Path;

use makerspace_core::{Equipment, Reservation, User};

use crate::codec::LineRecord;
use crate::error::Result;
use crate::line::LineStore;
use crate::repository::traits::EntityRepository;
use crate::repository::{EQUIPMENT_FILE, RESERVATIONS_FILE, USERS_FILE};

/// Generic file-based repository for line-encoded records.
///
/// One repository owns one data file. Creation appends, update and delete
/// rewrite the file keyed on the parsed id field, and loading scans every
/// line through the record's decoder. Lines whose id cannot be extracted
/// (foreign tags, corrupt rows) are never touched by rewrites, only by a
/// decoder growing to understand them.
pub struct FileRepository<R> {
    store: LineStore,
    _phantom: PhantomData<R>,
}

impl<R: LineRecord> FileRepository<R> {
    /// Open a repository over `filename` inside `data_dir`, creating the
    /// directory if needed.
    pub fn open(data_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            store: LineStore::open(data_dir, filename)?,
            _phantom: PhantomData,
        })
    }

    /// Full path of the backing file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl FileRepository<User> {
    /// Repository over the standard [`USERS_FILE`] in `data_dir`.
    pub fn users(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(data_dir, USERS_FILE)
    }
}

impl FileRepository<Equipment> {
    /// Repository over the standard [`EQUIPMENT_FILE`] in `data_dir`.
    pub fn equipment(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(data_dir, EQUIPMENT_FILE)
    }
}

impl FileRepository<Reservation> {
    /// Repository over the standard [`RESERVATIONS_FILE`] in `data_dir`.
    pub fn reservations(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(data_dir, RESERVATIONS_FILE)
    }
}

impl<R> EntityRepository<R> for FileRepository<R>
where
    R: LineRecord + Send + Sync,
{
    fn save(&self, record: &R) -> Result<()> {
        self.store.append(&record.encode())?;
        tracing::debug!(
            "Appended record {} to {}",
            record.record_id(),
            self.path().display()
        );
        Ok(())
    }

    fn load_all(&self) -> Result<HashMap<String, R>> {
        let mut records = HashMap::new();
        for line in self.store.lines()? {
            let line = line?;
            if let Some(record) = R::decode(&line) {
                records.insert(record.record_id().to_owned(), record);
            }
        }
        Ok(records)
    }

    fn update(&self, record: &R) -> Result<()> {
        let id = record.record_id();
        self.store
            .rewrite_excluding(|line| R::decode_id(line) == Some(id))?;
        self.store.append(&record.encode())?;
        tracing::debug!("Updated record {} in {}", id, self.path().display());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let removed = self
            .store
            .rewrite_excluding(|line| R::decode_id(line) == Some(id))?;
        if removed > 0 {
            tracing::debug!("Deleted record {} from {}", id, self.path().display());
        }
        Ok(removed > 0)
    }
}
