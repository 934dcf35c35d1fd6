//! In-memory repository for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::codec::LineRecord;
use crate::error::{Result, StoreError};
use crate::repository::traits::EntityRepository;

/// In-memory implementation of [`EntityRepository`].
///
/// Keeps records in a map keyed by id. `save` and `update` both overwrite,
/// which matches what a file store resolves to after a load.
pub struct InMemoryRepository<R> {
    records: RwLock<HashMap<String, R>>,
}

impl<R> InMemoryRepository<R> {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<R> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> EntityRepository<R> for InMemoryRepository<R>
where
    R: LineRecord + Clone + Send + Sync,
{
    fn save(&self, record: &R) -> Result<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(record.record_id().to_owned(), record.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<HashMap<String, R>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn update(&self, record: &R) -> Result<()> {
        self.save(record)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use makerspace_core::{Client, User, UserId};

    use super::*;

    fn client(id: &str, username: &str) -> User {
        User::Client(Client::new(
            UserId::new(id),
            username,
            format!("{username}@example.com"),
            "password",
        ))
    }

    #[test]
    fn save_load_update_delete() {
        let repo = InMemoryRepository::new();

        repo.save(&client("USER_1", "ada")).unwrap();
        repo.save(&client("USER_2", "grace")).unwrap();
        assert_eq!(repo.load_all().unwrap().len(), 2);

        repo.update(&client("USER_1", "ada-v2")).unwrap();
        let records = repo.load_all().unwrap();
        assert_eq!(records["USER_1"].username(), "ada-v2");

        assert!(repo.delete("USER_1").unwrap());
        assert!(!repo.delete("USER_1").unwrap());
        assert_eq!(repo.load_all().unwrap().len(), 1);
    }
}
