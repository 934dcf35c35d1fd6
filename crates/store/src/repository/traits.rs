//! Repository contract shared by the file and in-memory backends.

use std::collections::HashMap;

use crate::error::Result;

/// CRUD over one family of records keyed by their string identifier.
///
/// `save` registers a brand-new record; `update` replaces the stored version
/// of an existing one. Callers are expected to know which of the two they
/// mean: saving the same id twice leaves both versions in a file store, and
/// only the newer one survives a load.
pub trait EntityRepository<R>: Send + Sync {
    /// Persist a new record.
    fn save(&self, record: &R) -> Result<()>;

    /// Load every readable record, keyed by id.
    ///
    /// Records that fail to decode are skipped. When an id occurs more than
    /// once, the record written last wins.
    fn load_all(&self) -> Result<HashMap<String, R>>;

    /// Replace the stored record carrying the same id.
    ///
    /// Also works as an upsert: if no stored record matches, the record is
    /// simply added.
    fn update(&self, record: &R) -> Result<()>;

    /// Remove the record with exactly this id. Returns whether anything was
    /// removed.
    fn delete(&self, id: &str) -> Result<bool>;
}
