//! Reservation records linking clients to equipment over a time window.

use chrono::NaiveDateTime;

use crate::ids::{EquipmentId, ReservationId, UserId};

/// A booking of one piece of equipment by one client.
///
/// `status` is free text (`CONFIRMED`, `CANCELLED`, ...) rather than a closed
/// vocabulary; workflows downstream attach their own meanings. Times carry
/// minute precision, which is also all the data files preserve.
#[derive(Clone, Debug, PartialEq)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub client_id: UserId,
    pub equipment_id: EquipmentId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
    pub cost: f64,
    pub created_at: NaiveDateTime,
}

impl Reservation {
    /// Status of a reservation that has not been through any workflow yet.
    pub const DEFAULT_STATUS: &'static str = "PENDING";

    /// New pending reservation with zero cost, created now.
    ///
    /// Callers are expected to price it and move it through their status
    /// workflow afterwards.
    pub fn new(
        reservation_id: ReservationId,
        client_id: UserId,
        equipment_id: EquipmentId,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            reservation_id,
            client_id,
            equipment_id,
            start_time,
            end_time,
            status: Self::DEFAULT_STATUS.to_owned(),
            cost: 0.0,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    /// Duration of the booked window in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}
