use glam::Vec3;
use rustc_hash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CampusError, UnknownBuildingError};

/// Simplified volume standing in for a detailed building model.
///
/// Used for picking, camera placement and annotation anchoring. Immutable
/// once the registry is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct BuildingProxy {
    /// Unique key shared by menu entries, picking and annotations.
    pub id: String,
    /// Human-readable name for menus and overlays.
    #[serde(default)]
    pub label: String,
    /// Center of the proxy box in world space.
    #[schemars(with = "[f32; 3]")]
    pub position: Vec3,
    /// Camera position relative to `position` after a fly-to.
    #[schemars(with = "[f32; 3]")]
    pub focus_offset: Vec3,
    /// Where the hover annotation is pinned. Defaults to `position`.
    #[serde(default)]
    #[schemars(with = "Option<[f32; 3]>")]
    pub annotation_anchor: Option<Vec3>,
    /// Full box extents (x, y, z) before rotation.
    #[serde(default = "unit_size")]
    #[schemars(with = "[f32; 3]")]
    pub size: Vec3,
    /// Rotation about the world Y axis in radians.
    #[serde(default)]
    pub rotation_y: f32,
}

fn unit_size() -> Vec3 {
    Vec3::ONE
}

impl BuildingProxy {
    /// Camera state at the end of a fly-to with the given offset.
    #[must_use]
    pub fn destination(&self, offset: Vec3) -> (Vec3, Vec3) {
        (self.position + offset, self.position)
    }

    /// World-space annotation anchor.
    #[must_use]
    pub fn anchor(&self) -> Vec3 {
        self.annotation_anchor.unwrap_or(self.position)
    }
}

/// Id-keyed lookup over all building proxies, preserving authored order
/// for menus.
#[derive(Debug, Clone, Default)]
pub struct BuildingRegistry {
    buildings: Vec<BuildingProxy>,
    index: FxHashMap<String, usize>,
}

impl BuildingRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(
        buildings: impl IntoIterator<Item = BuildingProxy>,
    ) -> Result<Self, CampusError> {
        let mut registry = Self::default();
        for building in buildings {
            if registry.index.contains_key(&building.id) {
                return Err(CampusError::DuplicateBuilding(building.id));
            }
            let _ = registry
                .index
                .insert(building.id.clone(), registry.buildings.len());
            registry.buildings.push(building);
        }
        Ok(registry)
    }

    /// Look up a building by id.
    pub fn get(&self, id: &str) -> Result<&BuildingProxy, UnknownBuildingError> {
        self.index
            .get(id)
            .map(|&i| &self.buildings[i])
            .ok_or_else(|| UnknownBuildingError::new(id))
    }

    /// Whether a building with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Buildings in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingProxy> {
        self.buildings.iter()
    }

    /// Ids in authored order, one per menu entry.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.buildings.iter().map(|b| b.id.as_str())
    }

    /// Number of registered buildings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Check that every menu entry resolves to a registered building.
    pub fn validate_menu<'a>(
        &self,
        menu: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), UnknownBuildingError> {
        for id in menu {
            let _ = self.get(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(id: &str, position: Vec3) -> BuildingProxy {
        BuildingProxy {
            id: id.to_owned(),
            label: String::new(),
            position,
            focus_offset: Vec3::new(1.0, 2.0, 3.0),
            annotation_anchor: None,
            size: Vec3::ONE,
            rotation_y: 0.0,
        }
    }

    #[test]
    fn lookup_by_id() {
        let registry = BuildingRegistry::new([
            proxy("lib", Vec3::new(-14.0, 2.6, -130.0)),
            proxy("lab", Vec3::new(-75.0, 7.0, -105.0)),
        ])
        .unwrap();
        assert_eq!(registry.get("lab").unwrap().position.x, -75.0);
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["lib", "lab"]);
        assert_eq!(
            registry.get("gym").unwrap_err(),
            UnknownBuildingError::new("gym")
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = BuildingRegistry::new([
            proxy("lib", Vec3::ZERO),
            proxy("lib", Vec3::ONE),
        ])
        .unwrap_err();
        assert!(matches!(err, CampusError::DuplicateBuilding(id) if id == "lib"));
    }

    #[test]
    fn anchor_falls_back_to_position() {
        let mut b = proxy("rst", Vec3::new(0.0, 2.5, -100.0));
        assert_eq!(b.anchor(), b.position);
        b.annotation_anchor = Some(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(b.anchor(), Vec3::ONE);
    }

    #[test]
    fn menu_with_missing_id_fails_validation() {
        let registry = BuildingRegistry::new([proxy("lib", Vec3::ZERO)]).unwrap();
        assert!(registry.validate_menu(["lib"]).is_ok());
        assert_eq!(
            registry.validate_menu(["lib", "pool"]).unwrap_err().id,
            "pool"
        );
    }
}
