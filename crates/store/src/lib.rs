//! Flat-file persistence for makerspace records.
//!
//! Storage is deliberately simple: one text file per record family, one
//! pipe-delimited line per record, readable in any editor. Creation appends a
//! line, update and delete rewrite the file through a temp sibling, and loads
//! scan the whole file while skipping anything malformed. The layers are:
//!
//! - [`line`]: raw line operations on a single file (append, scan, rewrite)
//! - [`codec`]: the [`LineRecord`] trait mapping records to and from lines
//! - [`repository`]: typed CRUD over a line store, plus an in-memory twin
pub mod codec;
pub mod error;
pub mod line;
pub mod repository;

pub use codec::LineRecord;
pub use error::{Result, StoreError};
pub use line::{LineStore, Lines};
pub use repository::{
    EQUIPMENT_FILE, EntityRepository, FileRepository, InMemoryRepository, RESERVATIONS_FILE,
    USERS_FILE,
};
