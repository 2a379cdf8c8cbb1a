//! Material lookup by name.
//!
//! Material properties live outside this crate. Recipes only need to know
//! that a name resolves, plus the radiation length of the radiator metal.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{MaterialError, Result};
use crate::units::{CM, M, MM};

/// Resolved reference to a material in some external table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialHandle {
    id: usize,
    name: Arc<str>,
}

impl MaterialHandle {
    #[must_use]
    pub fn new(id: usize, name: &str) -> Self {
        Self {
            id,
            name: Arc::from(name),
        }
    }

    /// Index of the material in the table that resolved it.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Opaque name-to-material lookup.
pub trait MaterialTable {
    /// Resolves `name` to a handle.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMaterial` if the table has no such material.
    fn material(&self, name: &str) -> Result<MaterialHandle>;

    /// Radiation length of the named material, in millimetres.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMaterial` if the table has no such material.
    fn radiation_length(&self, name: &str) -> Result<f64>;
}

#[derive(Debug, Clone)]
struct MaterialEntry {
    handle: MaterialHandle,
    radiation_length: f64,
}

/// An in-memory [`MaterialTable`].
#[derive(Debug, Clone, Default)]
pub struct StaticMaterialTable {
    entries: HashMap<String, MaterialEntry>,
}

impl StaticMaterialTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding every material the target recipes refer to.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (name, radiation_length) in STANDARD_MATERIALS {
            table.register(name, *radiation_length);
        }
        table
    }

    /// Adds `name`, or replaces its radiation length if already present.
    pub fn register(&mut self, name: &str, radiation_length: f64) -> MaterialHandle {
        let id = self
            .entries
            .get(name)
            .map_or(self.entries.len(), |entry| entry.handle.id());
        let handle = MaterialHandle::new(id, name);
        self.entries.insert(
            name.to_owned(),
            MaterialEntry {
                handle: handle.clone(),
                radiation_length,
            },
        );
        handle
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&MaterialEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| MaterialError::UnknownMaterial(name.to_owned()).into())
    }
}

impl MaterialTable for StaticMaterialTable {
    fn material(&self, name: &str) -> Result<MaterialHandle> {
        Ok(self.entry(name)?.handle.clone())
    }

    fn radiation_length(&self, name: &str) -> Result<f64> {
        Ok(self.entry(name)?.radiation_length)
    }
}

// Radiation lengths at nominal density; gases and vacuum are effectively
// transparent at target scale.
const STANDARD_MATERIALS: &[(&str, f64)] = &[
    ("Vacuum", f64::INFINITY),
    ("Air", 303.9 * M),
    ("Al", 88.97 * MM),
    ("Aluminum", 88.97 * MM),
    ("Carbon", 213.5 * MM),
    ("Carbon_Steel_1008", 17.6 * MM),
    ("Copper", 14.36 * MM),
    ("GE180", 77.0 * MM),
    ("Iron", 17.57 * MM),
    ("Kapton", 285.6 * MM),
    ("LD2", 745.4 * CM),
    ("LH2", 890.4 * CM),
    ("NEMAG10", 194.0 * MM),
    ("Stainless_Steel", 17.4 * MM),
    ("Ultem", 350.0 * MM),
    ("pol3He", 8.0e5 * CM),
    ("ref4He", 5.3e5 * CM),
    ("refD2", 7.0e5 * CM),
    ("refH2", 7.5e5 * CM),
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use approx::assert_relative_eq;

    #[test]
    fn standard_table_resolves_recipe_materials() {
        let table = StaticMaterialTable::standard();
        for name in ["Vacuum", "LH2", "GE180", "Carbon_Steel_1008", "pol3He", "Ultem"] {
            assert_eq!(table.material(name).unwrap().name(), name);
        }
        assert_eq!(table.len(), STANDARD_MATERIALS.len());
    }

    #[test]
    fn unknown_material_is_an_error() {
        let table = StaticMaterialTable::standard();
        assert!(matches!(
            table.material("Unobtainium"),
            Err(BuildError::Material(MaterialError::UnknownMaterial(name))) if name == "Unobtainium"
        ));
        assert!(table.radiation_length("Unobtainium").is_err());
    }

    #[test]
    fn copper_radiation_length() {
        let table = StaticMaterialTable::standard();
        assert_relative_eq!(table.radiation_length("Copper").unwrap(), 14.36, epsilon = 1e-9);
    }

    #[test]
    fn re_registering_keeps_the_handle_id() {
        let mut table = StaticMaterialTable::new();
        let first = table.register("Foam", 1.0);
        table.register("Glue", 2.0);
        let again = table.register("Foam", 3.0);
        assert_eq!(first.id(), again.id());
        assert_eq!(table.len(), 2);
        assert_relative_eq!(table.radiation_length("Foam").unwrap(), 3.0);
    }
}
