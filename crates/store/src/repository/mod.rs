//! Typed CRUD repositories over line-encoded records.
//!
//! Repositories pair a [`LineRecord`](crate::codec::LineRecord) type with a
//! backing store. The file implementation is the production one; the
//! in-memory twin backs tests and embedders that do not want disk I/O.

mod file;
mod memory;
mod traits;

pub use file::FileRepository;
pub use memory::InMemoryRepository;
pub use traits::EntityRepository;

use makerspace_core::{Equipment, Reservation, User};

/// Standard file name for user records inside a data directory.
pub const USERS_FILE: &str = "users.txt";

/// Standard file name for equipment records inside a data directory.
pub const EQUIPMENT_FILE: &str = "equipment.txt";

/// Standard file name for reservation records inside a data directory.
pub const RESERVATIONS_FILE: &str = "reservations.txt";

/// File-backed user repository over [`USERS_FILE`].
pub type FileUserRepository = FileRepository<User>;

/// File-backed equipment repository over [`EQUIPMENT_FILE`].
pub type FileEquipmentRepository = FileRepository<Equipment>;

/// File-backed reservation repository over [`RESERVATIONS_FILE`].
pub type FileReservationRepository = FileRepository<Reservation>;
