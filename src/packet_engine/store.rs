//! Profile persistence.
//!
//! | Store           | Backing                                              |
//! |-----------------|------------------------------------------------------|
//! | `JsonFileStore` | `<profiles>/<child>.json`, `<packets>/<child>-<date>.json` |
//! | `MemoryStore`   | in-process maps, for tests and dry runs              |
//!
//! File writes go through a temp file in the target directory and an atomic
//! rename, so an interrupted write never leaves a truncated profile.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::packet_engine::{
    config::StorageConfig,
    error::{EngineError, Result},
    models::{ChildId, ChildProfile, Packet},
};

pub trait ProfileStore: Send + Sync {
    /// Load a profile. A missing profile is `ChildNotFound`; unreadable or
    /// corrupt data is a persistence failure.
    fn load(&self, child: &ChildId) -> Result<ChildProfile>;

    fn save(&self, profile: &ChildProfile) -> Result<()>;

    /// Keep a generated packet for later reference.
    fn archive_packet(&self, packet: &Packet) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JSON files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    profiles_dir: PathBuf,
    packets_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(profiles_dir: impl Into<PathBuf>, packets_dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { profiles_dir: profiles_dir.into(), packets_dir: packets_dir.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.profiles_dir, &config.packets_dir)
    }

    /// Refuses ids that could step outside `profiles_dir`.
    pub fn profile_path(&self, child: &ChildId) -> Result<PathBuf> {
        let child = file_stem(child)?;
        Ok(self.profiles_dir.join(format!("{child}.json")))
    }

    pub fn packet_path(&self, packet: &Packet) -> Result<PathBuf> {
        let child = file_stem(&packet.child_id)?;
        Ok(self.packets_dir.join(format!("{child}-{}.json", packet.date)))
    }
}

fn file_stem(child: &ChildId) -> Result<&str> {
    if child.is_file_safe() {
        Ok(child.as_str())
    } else {
        Err(EngineError::InvalidChildId(child.to_string()))
    }
}

fn write_json_atomic<T: Serialize>(value: &T, target: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let parent = target
        .parent()
        .ok_or_else(|| EngineError::Persistence(format!("{} has no parent directory", target.display())))?;
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(json.as_bytes())?;
    temp.flush()?;
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

impl ProfileStore for JsonFileStore {
    fn load(&self, child: &ChildId) -> Result<ChildProfile> {
        let path = self.profile_path(child)?;
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::ChildNotFound(child.clone()));
            }
            Err(e) => return Err(EngineError::Persistence(format!("{}: {e}", path.display()))),
        };
        let profile: ChildProfile = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Persistence(format!("corrupt profile {}: {e}", path.display())))?;
        if profile.id() != child {
            return Err(EngineError::Persistence(format!(
                "{} holds profile {}, expected {child}",
                path.display(),
                profile.id()
            )));
        }
        debug!("Loaded profile from {:?}", path);
        Ok(profile)
    }

    fn save(&self, profile: &ChildProfile) -> Result<()> {
        let path = self.profile_path(profile.id())?;
        write_json_atomic(profile, &path)?;
        info!("Wrote profile to {:?}", path);
        Ok(())
    }

    fn archive_packet(&self, packet: &Packet) -> Result<()> {
        let path = self.packet_path(packet)?;
        write_json_atomic(packet, &path)?;
        info!("Archived packet to {:?}", path);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<ChildId, ChildProfile>>,
    packets: Mutex<Vec<Packet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = ChildProfile>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.profiles.lock() {
            map.extend(profiles.into_iter().map(|p| (p.id().clone(), p)));
        }
        store
    }

    pub fn packets(&self) -> Vec<Packet> {
        self.packets.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::Persistence("memory store lock poisoned".into())
}

impl ProfileStore for MemoryStore {
    fn load(&self, child: &ChildId) -> Result<ChildProfile> {
        self.profiles
            .lock()
            .map_err(poisoned)?
            .get(child)
            .cloned()
            .ok_or_else(|| EngineError::ChildNotFound(child.clone()))
    }

    fn save(&self, profile: &ChildProfile) -> Result<()> {
        self.profiles.lock().map_err(poisoned)?.insert(profile.id().clone(), profile.clone());
        Ok(())
    }

    fn archive_packet(&self, packet: &Packet) -> Result<()> {
        self.packets.lock().map_err(poisoned)?.push(packet.clone());
        Ok(())
    }
}
