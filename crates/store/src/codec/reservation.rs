//! Line format for reservation records.
//!
//! ```text
//! RESERVATION|<id>|<clientId>|<equipmentId>|<start>|<end>|<status>|<cost>|<createdAt>
//! ```
//!
//! Timestamps use minute precision (`2024-01-01 09:00`); seconds are dropped
//! on encode.

use makerspace_core::{EquipmentId, Reservation, ReservationId, UserId};

use crate::codec::{DATETIME_FORMAT, FIELD_SEPARATOR, LineRecord, decode_datetime, decode_f64};

const RESERVATION_TAG: &str = "RESERVATION";

impl LineRecord for Reservation {
    fn record_id(&self) -> &str {
        self.reservation_id.as_str()
    }

    fn encode(&self) -> String {
        format!(
            "{RESERVATION_TAG}|{}|{}|{}|{}|{}|{}|{:.2}|{}",
            self.reservation_id,
            self.client_id,
            self.equipment_id,
            self.start_time.format(DATETIME_FORMAT),
            self.end_time.format(DATETIME_FORMAT),
            self.status,
            self.cost,
            self.created_at.format(DATETIME_FORMAT),
        )
    }

    fn decode(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let decoded = decode_reservation(&fields);

        if decoded.is_none() && !line.trim().is_empty() {
            tracing::warn!("Skipping malformed reservation line: {}", line);
        }
        decoded
    }

    fn decode_id(line: &str) -> Option<&str> {
        let mut fields = line.split(FIELD_SEPARATOR);
        match fields.next()? {
            RESERVATION_TAG => fields.next(),
            _ => None,
        }
    }
}

fn decode_reservation(fields: &[&str]) -> Option<Reservation> {
    if fields.first() != Some(&RESERVATION_TAG) || fields.len() < 9 {
        return None;
    }

    Some(Reservation {
        reservation_id: ReservationId::new(fields[1]),
        client_id: UserId::new(fields[2]),
        equipment_id: EquipmentId::new(fields[3]),
        start_time: decode_datetime(fields[4])?,
        end_time: decode_datetime(fields[5])?,
        status: fields[6].to_owned(),
        cost: decode_f64(fields[7])?,
        created_at: decode_datetime(fields[8])?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn reservation_round_trips_all_fields() {
        let original = Reservation {
            reservation_id: ReservationId::new("RES_000042"),
            client_id: UserId::new("USER_000001"),
            equipment_id: EquipmentId::new("EQ_000001"),
            start_time: at(9, 0),
            end_time: at(10, 30),
            status: "CONFIRMED".to_owned(),
            cost: 22.5,
            created_at: at(8, 0),
        };

        let line = original.encode();
        assert_eq!(
            line,
            "RESERVATION|RES_000042|USER_000001|EQ_000001|2024-01-01 09:00|2024-01-01 10:30|CONFIRMED|22.50|2024-01-01 08:00"
        );

        let decoded = Reservation::decode(&line).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn known_line_decodes_to_expected_record() {
        let line = "RESERVATION|R1|C1|E1|2024-01-01 09:00|2024-01-01 10:00|CONFIRMED|15.00|2024-01-01 08:00";

        let decoded = Reservation::decode(line).unwrap();
        assert_eq!(decoded.reservation_id, ReservationId::new("R1"));
        assert_eq!(decoded.client_id, UserId::new("C1"));
        assert_eq!(decoded.equipment_id, EquipmentId::new("E1"));
        assert_eq!(decoded.start_time, at(9, 0));
        assert_eq!(decoded.end_time, at(10, 0));
        assert_eq!(decoded.status, "CONFIRMED");
        assert_eq!(decoded.cost, 15.0);
        assert_eq!(decoded.created_at, at(8, 0));
    }

    #[test]
    fn seconds_are_dropped_on_encode() {
        let mut reservation = Reservation::new(
            ReservationId::new("RES_1"),
            UserId::new("USER_1"),
            EquipmentId::new("EQ_1"),
            at(9, 0),
            at(10, 0),
        );
        reservation.created_at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 15, 59)
            .unwrap();

        let decoded = Reservation::decode(&reservation.encode()).unwrap();
        assert_eq!(
            decoded.created_at,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(8, 15, 0)
                .unwrap()
        );
    }

    #[test]
    fn bad_dates_and_costs_reject() {
        assert!(
            Reservation::decode(
                "RESERVATION|R1|C1|E1|yesterday|2024-01-01 10:00|CONFIRMED|15.00|2024-01-01 08:00"
            )
            .is_none()
        );
        assert!(
            Reservation::decode(
                "RESERVATION|R1|C1|E1|2024-01-01 09:00|2024-01-01 10:00|CONFIRMED|free|2024-01-01 08:00"
            )
            .is_none()
        );
        assert!(Reservation::decode("RESERVATION|R1|C1|E1").is_none());
        assert!(Reservation::decode("EQUIPMENT|EQ_1|Laser|LASER_CUTTER|30.00|Lab C").is_none());
    }
}
