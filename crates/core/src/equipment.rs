//! Equipment records and the 3-D printer specialization.

use chrono::NaiveDateTime;

use crate::ids::EquipmentId;
use crate::status::EquipmentStatus;

/// Descriptive capabilities of a 3-D printer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrinterSpec {
    /// Printing technology, e.g. `FDM` or `SLA`.
    pub print_tech: String,
    /// Build volume as free text, e.g. `250x210x210mm`.
    pub print_volume: String,
}

/// Variant payload separating plain equipment from 3-D printers.
///
/// Printers carry extra descriptive fields and use a dedicated line format;
/// everything else shares the generic one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EquipmentKind {
    Standard,
    Printer3d(PrinterSpec),
}

/// A reservable machine in the makerspace.
#[derive(Clone, Debug, PartialEq)]
pub struct Equipment {
    pub equipment_id: EquipmentId,
    pub name: String,
    /// Free-text category, e.g. `LASER_CUTTER`. Printers always use
    /// [`Equipment::PRINTER_TYPE`].
    pub equipment_type: String,
    pub status: EquipmentStatus,
    pub location: String,
    /// Cost of one hour of use, non-negative.
    pub hour_cost: f64,
    pub last_maintenance: NaiveDateTime,
    pub kind: EquipmentKind,
}

impl Equipment {
    /// Type string reserved for 3-D printers.
    pub const PRINTER_TYPE: &'static str = "3D_PRINTER";

    /// New piece of standard equipment, available and freshly maintained.
    pub fn new(
        equipment_id: EquipmentId,
        name: impl Into<String>,
        equipment_type: impl Into<String>,
        hour_cost: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            equipment_id,
            name: name.into(),
            equipment_type: equipment_type.into(),
            status: EquipmentStatus::Available,
            location: location.into(),
            hour_cost,
            last_maintenance: chrono::Local::now().naive_local(),
            kind: EquipmentKind::Standard,
        }
    }

    /// New 3-D printer, available and freshly maintained.
    pub fn printer(
        equipment_id: EquipmentId,
        name: impl Into<String>,
        hour_cost: f64,
        location: impl Into<String>,
        print_tech: impl Into<String>,
        print_volume: impl Into<String>,
    ) -> Self {
        Self {
            equipment_id,
            name: name.into(),
            equipment_type: Self::PRINTER_TYPE.to_owned(),
            status: EquipmentStatus::Available,
            location: location.into(),
            hour_cost,
            last_maintenance: chrono::Local::now().naive_local(),
            kind: EquipmentKind::Printer3d(PrinterSpec {
                print_tech: print_tech.into(),
                print_volume: print_volume.into(),
            }),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    pub fn is_printer(&self) -> bool {
        matches!(self.kind, EquipmentKind::Printer3d(_))
    }

    pub fn printer_spec(&self) -> Option<&PrinterSpec> {
        match &self.kind {
            EquipmentKind::Printer3d(spec) => Some(spec),
            EquipmentKind::Standard => None,
        }
    }

    /// Normalize arbitrary status text and apply it, returning the canonical
    /// status that was stored.
    pub fn set_status(&mut self, input: &str) -> EquipmentStatus {
        self.status = EquipmentStatus::normalize(input);
        self.status
    }
}
