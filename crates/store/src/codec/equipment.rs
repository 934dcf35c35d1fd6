//! Line format for equipment records.
//!
//! ```text
//! 3D_PRINTER|<id>|<name>|<hourCost>|<location>|<printTech>|<printVolume>
//! EQUIPMENT|<id>|<name>|<type>|<hourCost>|<location>
//! ```
//!
//! Printers use their type string as the tag and carry two extra descriptive
//! fields; note their hour cost sits one field earlier than in the generic
//! format. Status and maintenance time are runtime state, not part of the
//! format, so loaded equipment always comes back available.

use makerspace_core::{Equipment, EquipmentId, EquipmentKind};

use crate::codec::{FIELD_SEPARATOR, LineRecord, decode_f64};

const EQUIPMENT_TAG: &str = "EQUIPMENT";
const PRINTER_TAG: &str = Equipment::PRINTER_TYPE;

impl LineRecord for Equipment {
    fn record_id(&self) -> &str {
        self.equipment_id.as_str()
    }

    fn encode(&self) -> String {
        match &self.kind {
            EquipmentKind::Printer3d(spec) => format!(
                "{PRINTER_TAG}|{}|{}|{:.2}|{}|{}|{}",
                self.equipment_id,
                self.name,
                self.hour_cost,
                self.location,
                spec.print_tech,
                spec.print_volume,
            ),
            EquipmentKind::Standard => format!(
                "{EQUIPMENT_TAG}|{}|{}|{}|{:.2}|{}",
                self.equipment_id, self.name, self.equipment_type, self.hour_cost, self.location,
            ),
        }
    }

    fn decode(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let decoded = match fields.first().copied() {
            Some(PRINTER_TAG) => decode_printer(&fields),
            Some(EQUIPMENT_TAG) => decode_standard(&fields),
            _ => None,
        };

        if decoded.is_none() && !line.trim().is_empty() {
            tracing::warn!("Skipping malformed equipment line: {}", line);
        }
        decoded
    }

    fn decode_id(line: &str) -> Option<&str> {
        let mut fields = line.split(FIELD_SEPARATOR);
        match fields.next()? {
            EQUIPMENT_TAG | PRINTER_TAG => fields.next(),
            _ => None,
        }
    }
}

fn decode_printer(fields: &[&str]) -> Option<Equipment> {
    if fields.len() < 7 {
        return None;
    }
    let hour_cost = decode_f64(fields[3])?;
    Some(Equipment::printer(
        EquipmentId::new(fields[1]),
        fields[2],
        hour_cost,
        fields[4],
        fields[5],
        fields[6],
    ))
}

fn decode_standard(fields: &[&str]) -> Option<Equipment> {
    if fields.len() < 6 {
        return None;
    }
    let hour_cost = decode_f64(fields[4])?;
    Some(Equipment::new(
        EquipmentId::new(fields[1]),
        fields[2],
        fields[3],
        hour_cost,
        fields[5],
    ))
}
