//! Domain records shared across the makerspace crates.
//!
//! `makerspace-core` defines the canonical data types (users, equipment,
//! reservations) and the controlled status vocabulary. The types here are
//! plain data with no I/O; persistence lives in `makerspace-store` and
//! business rules in `makerspace-service`.
pub mod equipment;
pub mod ids;
pub mod reservation;
pub mod status;
pub mod user;

pub use equipment::{Equipment, EquipmentKind, PrinterSpec};
pub use ids::{EquipmentId, ReservationId, UserId};
pub use reservation::Reservation;
pub use status::EquipmentStatus;
pub use user::{Admin, Client, User, UserRole};
