//! Reservation booking and lifecycle.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use makerspace_core::{EquipmentId, Reservation, ReservationId, UserId};
use makerspace_store::EntityRepository;

use crate::error::{Result, ServiceError};
use crate::ids::{IdGenerator, RandomIdGenerator, unique_id};

const RESERVATION_PREFIX: &str = "RES";

/// Status a reservation is booked under.
pub const CONFIRMED_STATUS: &str = "CONFIRMED";

/// Booking, lookup, and lifecycle of reservations.
///
/// Policy checks beyond the time window (is the equipment free, can the
/// client pay) belong to the workflows calling in; this service records
/// whatever they decided.
pub struct ReservationService {
    reservations: HashMap<ReservationId, Reservation>,
    repo: Box<dyn EntityRepository<Reservation>>,
    ids: Box<dyn IdGenerator>,
}

impl ReservationService {
    /// Build over `repo` with random id generation, loading existing records.
    pub fn new(repo: impl EntityRepository<Reservation> + 'static) -> Result<Self> {
        Self::with_id_generator(repo, RandomIdGenerator::new())
    }

    /// Build with a caller-chosen id generator.
    pub fn with_id_generator(
        repo: impl EntityRepository<Reservation> + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self> {
        let repo: Box<dyn EntityRepository<Reservation>> = Box::new(repo);
        let reservations: HashMap<ReservationId, Reservation> = repo
            .load_all()?
            .into_values()
            .map(|reservation| (reservation.reservation_id.clone(), reservation))
            .collect();
        tracing::debug!("Loaded {} reservations", reservations.len());

        Ok(Self {
            reservations,
            repo,
            ids: Box::new(ids),
        })
    }

    /// Book `equipment_id` for `client_id` over `[start_time, end_time)`.
    ///
    /// The window must be non-empty; `cost` is taken as computed by the
    /// caller. The booking is persisted as [`CONFIRMED_STATUS`].
    pub fn create(
        &mut self,
        client_id: UserId,
        equipment_id: EquipmentId,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        cost: f64,
    ) -> Result<ReservationId> {
        if start_time >= end_time {
            return Err(ServiceError::Validation(
                "reservation must end after it starts".to_owned(),
            ));
        }

        let id = self.fresh_id()?;
        let mut reservation = Reservation::new(
            ReservationId::new(id),
            client_id,
            equipment_id,
            start_time,
            end_time,
        );
        reservation.status = CONFIRMED_STATUS.to_owned();
        reservation.cost = cost;

        self.repo.save(&reservation)?;
        let reservation_id = reservation.reservation_id.clone();
        tracing::info!(
            "Created reservation {} for {} on {}",
            reservation_id,
            reservation.client_id,
            reservation.equipment_id
        );
        self.reservations.insert(reservation_id.clone(), reservation);
        Ok(reservation_id)
    }

    fn fresh_id(&mut self) -> Result<String> {
        let reservations = &self.reservations;
        unique_id(self.ids.as_mut(), RESERVATION_PREFIX, |candidate| {
            reservations.contains_key(&ReservationId::from(candidate))
        })
    }

    /// Look up one reservation by id.
    pub fn reservation(&self, id: &ReservationId) -> Result<&Reservation> {
        self.reservations.get(id).ok_or_else(|| not_found(id))
    }

    /// All reservations, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.values()
    }

    /// Reservations made by one client.
    pub fn by_client(&self, client_id: &UserId) -> Vec<&Reservation> {
        self.reservations
            .values()
            .filter(|reservation| &reservation.client_id == client_id)
            .collect()
    }

    /// Reservations holding one piece of equipment.
    pub fn by_equipment(&self, equipment_id: &EquipmentId) -> Vec<&Reservation> {
        self.reservations
            .values()
            .filter(|reservation| &reservation.equipment_id == equipment_id)
            .collect()
    }

    /// Overwrite the workflow status and persist the record.
    pub fn update_status(&mut self, id: &ReservationId, status: &str) -> Result<()> {
        let reservation = self.reservations.get_mut(id).ok_or_else(|| not_found(id))?;
        reservation.status = status.to_owned();
        self.repo.update(reservation)?;
        tracing::info!("Reservation {} is now {}", id, status);
        Ok(())
    }

    /// Remove a reservation entirely, from the map and the backing file.
    pub fn cancel(&mut self, id: &ReservationId) -> Result<()> {
        if !self.reservations.contains_key(id) {
            return Err(not_found(id));
        }
        self.repo.delete(id.as_str())?;
        self.reservations.remove(id);
        tracing::info!("Cancelled reservation {}", id);
        Ok(())
    }
}

fn not_found(id: &ReservationId) -> ServiceError {
    ServiceError::NotFound {
        kind: "reservation",
        id: id.to_string(),
    }
}
