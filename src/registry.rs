//! Name registries shared with the simulation around the geometry.

use std::collections::{BTreeSet, HashMap};

use slotmap::SlotMap;
use tracing::debug;

slotmap::new_key_type! {
    /// Unique identifier for a sensitive detector.
    pub struct SensitiveDetectorId;
}

/// Names of the volumes that count as "target" when tracks are attributed.
#[derive(Debug, Clone, Default)]
pub struct TargetVolumeRegistry {
    names: BTreeSet<String>,
}

impl TargetVolumeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name`; inserting it twice is harmless.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    #[must_use]
    pub fn is_target_volume(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// A hit-recording detector known to the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveDetector {
    pub name: String,
    /// Name of the hit collection the detector fills.
    pub collection: String,
}

/// A volume wired to a sensitive detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveRegistration {
    pub volume: String,
    pub detector: SensitiveDetectorId,
    pub depth: u32,
}

/// Sensitive detectors and the volumes that feed them.
///
/// Detectors are created on first request and looked up by name afterwards,
/// so several recipes can share one detector.
#[derive(Debug, Default)]
pub struct SensitiveDetectorRegistry {
    detectors: SlotMap<SensitiveDetectorId, SensitiveDetector>,
    by_name: HashMap<String, SensitiveDetectorId>,
    registrations: Vec<SensitiveRegistration>,
}

impl SensitiveDetectorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the detector called `name`, creating it with `collection` if
    /// it does not exist yet.
    pub fn get_or_create(&mut self, name: &str, collection: &str) -> SensitiveDetectorId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        debug!(detector = name, collection, "sensitive detector");
        let id = self.detectors.insert(SensitiveDetector {
            name: name.to_owned(),
            collection: collection.to_owned(),
        });
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Records that hits in `volume` go to `detector`, with the copy-number
    /// history taken `depth` levels up the placement tree.
    pub fn register_sensitive(&mut self, volume: &str, detector: SensitiveDetectorId, depth: u32) {
        self.registrations.push(SensitiveRegistration {
            volume: volume.to_owned(),
            detector,
            depth,
        });
    }

    #[must_use]
    pub fn detector(&self, id: SensitiveDetectorId) -> Option<&SensitiveDetector> {
        self.detectors.get(id)
    }

    #[must_use]
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    #[must_use]
    pub fn registrations(&self) -> &[SensitiveRegistration] {
        &self.registrations
    }

    /// Forgets the volume registrations; detectors outlive a geometry
    /// rebuild.
    pub fn clear_registrations(&mut self) {
        self.registrations.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn target_registry_insert_and_clear() {
        let mut targets = TargetVolumeRegistry::new();
        targets.insert("TargetCell_log");
        targets.insert("TargetCell_log");
        targets.insert("TargetWall_log");
        assert_eq!(targets.len(), 2);
        assert!(targets.is_target_volume("TargetCell_log"));
        assert!(!targets.is_target_volume("world_log"));
        assert_eq!(targets.names().collect::<Vec<_>>(), ["TargetCell_log", "TargetWall_log"]);
        targets.clear();
        assert!(targets.is_empty());
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let mut sd = SensitiveDetectorRegistry::new();
        let a = sd.get_or_create("FLUX", "FLUXHitsCollection");
        let b = sd.get_or_create("FLUX", "ignored");
        assert_eq!(a, b);
        assert_eq!(sd.detector_count(), 1);
        assert_eq!(sd.detector(a).unwrap().collection, "FLUXHitsCollection");
    }

    #[test]
    fn registrations_survive_until_cleared() {
        let mut sd = SensitiveDetectorRegistry::new();
        let id = sd.get_or_create("FLUX", "FLUXHitsCollection");
        sd.register_sensitive("fsph_log", id, 0);
        assert_eq!(sd.registrations().len(), 1);
        assert_eq!(sd.registrations()[0].volume, "fsph_log");
        sd.clear_registrations();
        assert!(sd.registrations().is_empty());
        assert_eq!(sd.get_or_create("FLUX", "FLUXHitsCollection"), id);
    }
}
