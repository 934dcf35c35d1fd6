//! Equipment catalog management.

use std::collections::HashMap;

use makerspace_core::{Equipment, EquipmentId, EquipmentStatus};
use makerspace_store::EntityRepository;

use crate::error::{Result, ServiceError};
use crate::ids::{IdGenerator, RandomIdGenerator, unique_id};

const EQUIPMENT_PREFIX: &str = "EQ";

/// Catalog of reservable machines.
///
/// An empty store is seeded with the default inventory on startup so a new
/// installation has something to reserve on first run.
pub struct EquipmentService {
    equipment: HashMap<EquipmentId, Equipment>,
    repo: Box<dyn EntityRepository<Equipment>>,
    ids: Box<dyn IdGenerator>,
}

impl EquipmentService {
    /// Build over `repo` with random id generation, loading existing records
    /// and seeding the default inventory if there are none.
    pub fn new(repo: impl EntityRepository<Equipment> + 'static) -> Result<Self> {
        Self::with_id_generator(repo, RandomIdGenerator::new())
    }

    /// Build with a caller-chosen id generator.
    pub fn with_id_generator(
        repo: impl EntityRepository<Equipment> + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self> {
        let repo: Box<dyn EntityRepository<Equipment>> = Box::new(repo);
        let equipment: HashMap<EquipmentId, Equipment> = repo
            .load_all()?
            .into_values()
            .map(|item| (item.equipment_id.clone(), item))
            .collect();

        let mut service = Self {
            equipment,
            repo,
            ids: Box::new(ids),
        };

        if service.equipment.is_empty() {
            tracing::info!("No equipment on record, seeding default inventory");
            service.seed_default_inventory()?;
        } else {
            tracing::debug!("Loaded {} equipment records", service.equipment.len());
        }

        Ok(service)
    }

    fn seed_default_inventory(&mut self) -> Result<()> {
        self.add_printer("Prusa i3 MK3S+", 15.0, "Lab A", "FDM", "250x210x210mm")?;
        self.add_printer("Formlabs Form 3", 25.0, "Lab B", "SLA", "145x145x185mm")?;
        self.add_printer("Ultimaker S5", 20.0, "Lab A", "FDM", "330x240x300mm")?;
        self.add(Equipment::new(
            EquipmentId::new("EQ_LASER_001"),
            "Epilog Fusion",
            "LASER_CUTTER",
            30.0,
            "Lab C",
        ))?;
        self.add(Equipment::new(
            EquipmentId::new("EQ_CNC_001"),
            "Haas Mini Mill",
            "CNC_MACHINE",
            40.0,
            "Workshop",
        ))?;
        Ok(())
    }

    /// Add a fully-formed piece of equipment under its own id.
    pub fn add(&mut self, equipment: Equipment) -> Result<EquipmentId> {
        if equipment.hour_cost < 0.0 {
            return Err(ServiceError::Validation(
                "hourly cost must not be negative".to_owned(),
            ));
        }
        if self.equipment.contains_key(&equipment.equipment_id) {
            return Err(ServiceError::DuplicateId(
                equipment.equipment_id.to_string(),
            ));
        }

        self.repo.save(&equipment)?;
        let id = equipment.equipment_id.clone();
        tracing::info!("Added equipment {} ({})", equipment.name, id);
        self.equipment.insert(id.clone(), equipment);
        Ok(id)
    }

    /// Add standard equipment under a generated id.
    pub fn add_equipment(
        &mut self,
        name: &str,
        equipment_type: &str,
        hour_cost: f64,
        location: &str,
    ) -> Result<EquipmentId> {
        let id = self.fresh_id()?;
        self.add(Equipment::new(
            EquipmentId::new(id),
            name,
            equipment_type,
            hour_cost,
            location,
        ))
    }

    /// Add a 3-D printer under a generated id.
    pub fn add_printer(
        &mut self,
        name: &str,
        hour_cost: f64,
        location: &str,
        print_tech: &str,
        print_volume: &str,
    ) -> Result<EquipmentId> {
        let id = self.fresh_id()?;
        self.add(Equipment::printer(
            EquipmentId::new(id),
            name,
            hour_cost,
            location,
            print_tech,
            print_volume,
        ))
    }

    fn fresh_id(&mut self) -> Result<String> {
        let equipment = &self.equipment;
        unique_id(self.ids.as_mut(), EQUIPMENT_PREFIX, |candidate| {
            equipment.contains_key(&EquipmentId::from(candidate))
        })
    }

    /// Look up one piece of equipment by id.
    pub fn equipment(&self, id: &EquipmentId) -> Result<&Equipment> {
        self.equipment.get(id).ok_or_else(|| not_found(id))
    }

    /// The whole catalog, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Equipment> {
        self.equipment.values()
    }

    /// Equipment currently free to reserve.
    pub fn available(&self) -> Vec<&Equipment> {
        self.equipment
            .values()
            .filter(|item| item.is_available())
            .collect()
    }

    /// Equipment whose type matches, ignoring ASCII case.
    pub fn by_type(&self, equipment_type: &str) -> Vec<&Equipment> {
        self.equipment
            .values()
            .filter(|item| item.equipment_type.eq_ignore_ascii_case(equipment_type))
            .collect()
    }

    /// All 3-D printers.
    pub fn printers(&self) -> Vec<&Equipment> {
        self.equipment
            .values()
            .filter(|item| item.is_printer())
            .collect()
    }

    /// Normalize arbitrary status text, apply it, and persist the record.
    ///
    /// Returns the canonical status that was stored.
    pub fn set_status(&mut self, id: &EquipmentId, input: &str) -> Result<EquipmentStatus> {
        let item = self.equipment.get_mut(id).ok_or_else(|| not_found(id))?;
        let status = item.set_status(input);
        self.repo.update(item)?;
        tracing::info!("Equipment {} is now {}", id, status);
        Ok(status)
    }
}

fn not_found(id: &EquipmentId) -> ServiceError {
    ServiceError::NotFound {
        kind: "equipment",
        id: id.to_string(),
    }
}
