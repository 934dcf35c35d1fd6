//! Business services over the makerspace flat-file stores.
//!
//! Each service owns the in-memory working set for one record family and
//! writes through to its repository on every mutation. [`Makerspace`]
//! bundles the three services over a shared data directory for embedders
//! that want the whole system with one call.
pub mod equipment;
pub mod error;
pub mod ids;
pub mod makerspace;
pub mod reservations;
pub mod users;

pub use equipment::EquipmentService;
pub use error::{Result, ServiceError};
pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use makerspace::{Makerspace, default_data_dir};
pub use reservations::{CONFIRMED_STATUS, ReservationService};
pub use users::UserService;
