//! Typed body table loaded once at startup.
//!
//! The table replaces a name-keyed dictionary of speeds: every entry is
//! parsed into a [`BodySpec`] and the whole table is schema-checked before
//! the simulator ever sees it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use orrery_common::BodyId;

use crate::body::OrbitParams;

const DEFAULT_TABLE: &str = include_str!("default_bodies.yaml");

/// Errors from loading or validating a body table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("entry {index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate body id: {0}")]
    DuplicateId(BodyId),
    #[error("body {id}: {field} must be finite and >= 0, got {value}")]
    InvalidParameter {
        id: BodyId,
        field: &'static str,
        value: f32,
    },
}

/// One row of the body table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodySpec {
    pub id: BodyId,
    pub rotation_speed: f32,
    #[serde(default)]
    pub orbital_speed: f32,
    #[serde(default)]
    pub orbital_radius: f32,
}

impl BodySpec {
    pub fn params(&self) -> OrbitParams {
        OrbitParams {
            rotation_speed: self.rotation_speed,
            orbital_speed: self.orbital_speed,
            orbital_radius: self.orbital_radius,
        }
    }

    fn validate(&self, index: usize) -> Result<(), TableError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TableError::EmptyId { index });
        }
        let fields = [
            ("rotation_speed", self.rotation_speed),
            ("orbital_speed", self.orbital_speed),
            ("orbital_radius", self.orbital_radius),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(TableError::InvalidParameter {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Validated, ordered set of body definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyTable {
    bodies: Vec<BodySpec>,
}

impl BodyTable {
    /// Build a table from entries, rejecting malformed ones.
    pub fn new(bodies: Vec<BodySpec>) -> Result<Self, TableError> {
        let table = Self { bodies };
        table.validate()?;
        Ok(table)
    }

    /// The eight-planet table the system model ships with.
    pub fn solar_system() -> Self {
        // The embedded table is covered by `embedded_table_is_valid`.
        Self::from_yaml_str(DEFAULT_TABLE).unwrap_or_else(|e| {
            tracing::error!("embedded body table is invalid: {e}");
            Self { bodies: Vec::new() }
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, TableError> {
        let table: Self = serde_yaml::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_yaml_str(&text)?;
        tracing::info!(
            path = %path.as_ref().display(),
            bodies = table.len(),
            "body table loaded"
        );
        Ok(table)
    }

    pub fn to_yaml(&self) -> Result<String, TableError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn get(&self, id: &BodyId) -> Option<&BodySpec> {
        self.bodies.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BodyId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodySpec> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn validate(&self) -> Result<(), TableError> {
        let mut seen = BTreeSet::new();
        for (index, spec) in self.bodies.iter().enumerate() {
            spec.validate(index)?;
            if !seen.insert(&spec.id) {
                return Err(TableError::DuplicateId(spec.id.clone()));
            }
        }
        Ok(())
    }
}

impl Default for BodyTable {
    fn default() -> Self {
        Self::solar_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, rotation: f32, orbit: f32, radius: f32) -> BodySpec {
        BodySpec {
            id: BodyId::from(id),
            rotation_speed: rotation,
            orbital_speed: orbit,
            orbital_radius: radius,
        }
    }

    #[test]
    fn embedded_table_is_valid() {
        let table = BodyTable::from_yaml_str(DEFAULT_TABLE).unwrap();
        assert_eq!(table.len(), 8);
        let mars = table.get(&BodyId::from("mars_BezierCircle_14")).unwrap();
        assert_eq!(mars.rotation_speed, 0.008);
        assert_eq!(mars.orbital_speed, 0.0);
        assert_eq!(mars.orbital_radius, 9.0);
    }

    #[test]
    fn missing_orbit_fields_default_to_zero() {
        let table = BodyTable::from_yaml_str(
            "bodies:\n  - id: sun\n    rotation_speed: 0.0005\n",
        )
        .unwrap();
        let sun = table.get(&BodyId::from("sun")).unwrap();
        assert_eq!(sun.orbital_speed, 0.0);
        assert_eq!(sun.orbital_radius, 0.0);
    }

    #[test]
    fn rejects_negative_speed() {
        let err = BodyTable::new(vec![spec("mars", -0.1, 0.0, 9.0)]).unwrap_err();
        assert!(matches!(
            err,
            TableError::InvalidParameter { field: "rotation_speed", .. }
        ));
    }

    #[test]
    fn rejects_non_finite_radius() {
        let err = BodyTable::new(vec![spec("mars", 0.1, 0.0, f32::NAN)]).unwrap_err();
        assert!(matches!(
            err,
            TableError::InvalidParameter { field: "orbital_radius", .. }
        ));
    }

    #[test]
    fn rejects_duplicate_and_empty_ids() {
        let dup = BodyTable::new(vec![spec("a", 0.0, 0.0, 1.0), spec("a", 0.0, 0.0, 2.0)]);
        assert!(matches!(dup, Err(TableError::DuplicateId(_))));

        let empty = BodyTable::new(vec![spec("ok", 0.0, 0.0, 1.0), spec("  ", 0.0, 0.0, 1.0)]);
        assert!(matches!(empty, Err(TableError::EmptyId { index: 1 })));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = BodyTable::from_yaml_str(
            "bodies:\n  - id: mars\n    rotation_speed: 0.1\n    orbit: 2.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Yaml(_)));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let table = BodyTable::new(vec![spec("earth", 0.01, 0.5, 7.0)]).unwrap();
        std::fs::write(tmp.path(), table.to_yaml().unwrap()).unwrap();

        let loaded = BodyTable::load(tmp.path()).unwrap();
        assert_eq!(loaded, table);
    }
}
