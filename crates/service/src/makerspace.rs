//! One handle bundling the three services over a shared data directory.

use std::path::{Path, PathBuf};

use makerspace_store::FileRepository;

use crate::equipment::EquipmentService;
use crate::error::Result;
use crate::reservations::ReservationService;
use crate::users::UserService;

/// The three services wired over one data directory.
///
/// Opening is all it takes: the directory is created, existing records are
/// loaded, and an empty equipment file is seeded with the default inventory.
pub struct Makerspace {
    pub users: UserService,
    pub equipment: EquipmentService,
    pub reservations: ReservationService,
}

impl Makerspace {
    /// Open (or initialize) a makerspace rooted at `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        tracing::info!("Opening makerspace data at {}", data_dir.display());

        Ok(Self {
            users: UserService::new(FileRepository::users(data_dir)?)?,
            equipment: EquipmentService::new(FileRepository::equipment(data_dir)?)?,
            reservations: ReservationService::new(FileRepository::reservations(data_dir)?)?,
        })
    }

    /// Open at the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(default_data_dir())
    }
}

/// Platform-specific data directory for makerspace files.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/makerspace`
/// - Linux: `~/.local/share/makerspace` (or `$XDG_DATA_HOME/makerspace`)
/// - Windows: `%APPDATA%\makerspace`
/// - Fallback: `./data`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "makerspace")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
