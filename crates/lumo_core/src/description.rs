//! JSON scene descriptions.
//!
//! A scene file names its materials and groups and refers to them by name:
//!
//! ```json
//! {
//!   "materials": [{ "name": "grey", "diffuse": [0.5, 0.5, 0.5] }],
//!   "objects": [{
//!     "name": "floor",
//!     "shape": { "type": "plane", "normal": [0, 1, 0], "offset": 0 },
//!     "material": "grey"
//!   }],
//!   "lights": [{ "name": "sky", "light": { "type": "ambient", "color": [0.2, 0.2, 0.2] } }]
//! }
//! ```
//!
//! Groups must be listed after their parent.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::material::Material;
use crate::scene::{GroupId, MaterialId, Scene, Transform};
use crate::shape::Shape;

/// Serializable form of a [`Scene`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: String,
    pub materials: Vec<NamedMaterial>,
    pub groups: Vec<GroupDescription>,
    pub objects: Vec<ObjectDescription>,
    pub lights: Vec<LightDescription>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedMaterial {
    pub name: String,
    #[serde(flatten)]
    pub material: Material,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupDescription {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub name: String,
    pub shape: Shape,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LightDescription {
    pub name: String,
    pub light: Light,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub group: Option<String>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve names and build the scene.
    pub fn build(self) -> SceneResult<Scene> {
        let mut scene = Scene::new(self.name);

        let mut materials: HashMap<String, MaterialId> = HashMap::new();
        for named in self.materials {
            if materials.contains_key(&named.name) {
                return Err(SceneError::DuplicateName(named.name));
            }
            let id = scene.add_material(named.material);
            materials.insert(named.name, id);
        }

        let mut groups: HashMap<String, GroupId> = HashMap::new();
        for group in self.groups {
            if groups.contains_key(&group.name) {
                return Err(SceneError::DuplicateName(group.name));
            }
            let parent = resolve_group(&groups, group.parent.as_deref())?;
            let id = scene.add_group(group.name.clone(), group.transform, parent)?;
            groups.insert(group.name, id);
        }

        for object in self.objects {
            let group = resolve_group(&groups, object.group.as_deref())?;
            let material = match object.material.as_deref() {
                Some(name) => Some(
                    *materials
                        .get(name)
                        .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))?,
                ),
                None => None,
            };
            let id = scene.add_object(object.name, object.shape, object.transform, group)?;
            if let Some(material) = material {
                scene.bind_material(id, material)?;
            }
        }

        for light in self.lights {
            let group = resolve_group(&groups, light.group.as_deref())?;
            scene.add_light(light.name, light.light, light.transform, group)?;
        }

        Ok(scene)
    }
}

fn resolve_group(groups: &HashMap<String, GroupId>, name: Option<&str>) -> SceneResult<Option<GroupId>> {
    match name {
        Some(name) => groups
            .get(name)
            .copied()
            .map(Some)
            .ok_or_else(|| SceneError::UnknownGroup(name.to_string())),
        None => Ok(None),
    }
}

impl Scene {
    /// Build a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Scene> {
        SceneDescription::from_json_str(json)?.build()
    }
}

/// Load a JSON scene file.
///
/// The scene is named after the file stem unless the file names it.
pub fn load_scene_json(path: impl AsRef<Path>) -> SceneResult<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut description = SceneDescription::from_json_str(&text)?;

    if description.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            description.name = stem.to_string_lossy().into_owned();
        }
    }

    let scene = description.build()?;
    log::info!(
        "Loaded scene '{}': {} objects, {} lights, {} materials",
        scene.name,
        scene.object_count(),
        scene.light_count(),
        scene.materials.len()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObjectId, SceneQuery};
    use lumo_math::Vec3;

    const SCENE: &str = r#"{
        "name": "box",
        "materials": [
            { "name": "red", "diffuse": [1, 0, 0], "shininess": 8 }
        ],
        "groups": [
            { "name": "root", "transform": { "translation": [0, 2, 0] } },
            { "name": "child", "parent": "root" }
        ],
        "objects": [
            {
                "name": "floor",
                "shape": { "type": "plane", "normal": [0, 1, 0], "offset": 0 },
                "material": "red"
            },
            {
                "name": "tri",
                "group": "child",
                "shape": { "type": "triangle", "positions": [[0, 0, 0], [1, 0, 0], [0, 1, 0]] }
            }
        ],
        "lights": [
            { "name": "sky", "light": { "type": "ambient", "color": [0.1, 0.1, 0.1] } },
            { "name": "bulb", "group": "root", "light": { "type": "point", "color": [1, 1, 1] } }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene = Scene::from_json_str(SCENE).unwrap();

        assert_eq!(scene.name, "box");
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.light_count(), 2);

        let red = scene.material_of(ObjectId(0)).unwrap();
        assert_eq!(red.diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(red.shininess, 8.0);
        assert!(scene.material_of(ObjectId(1)).is_none());
    }

    #[test]
    fn test_parse_scene_resolves_groups() {
        let scene = Scene::from_json_str(SCENE).unwrap();

        let objects = scene.tracing_objects();
        let origin = objects[1].local_to_world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);

        let lights = scene.light_objects();
        let bulb = lights[1].local_to_world.transform_point3(Vec3::ZERO);
        assert!((bulb - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_unknown_material_name() {
        let json = r#"{
            "objects": [{
                "name": "floor",
                "shape": { "type": "plane", "normal": [0, 1, 0] },
                "material": "missing"
            }]
        }"#;

        assert!(matches!(
            Scene::from_json_str(json),
            Err(SceneError::UnknownMaterial(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_group_before_parent_rejected() {
        let json = r#"{
            "groups": [
                { "name": "child", "parent": "root" },
                { "name": "root" }
            ]
        }"#;

        assert!(matches!(Scene::from_json_str(json), Err(SceneError::UnknownGroup(_))));
    }

    #[test]
    fn test_duplicate_material_name() {
        let json = r#"{ "materials": [{ "name": "a" }, { "name": "a" }] }"#;
        assert!(matches!(Scene::from_json_str(json), Err(SceneError::DuplicateName(_))));
    }

    #[test]
    fn test_load_scene_json_names_scene_after_file() {
        let path = std::env::temp_dir().join("lumo_core_unnamed_scene.json");
        std::fs::write(&path, r#"{ "objects": [] }"#).unwrap();

        let scene = load_scene_json(&path).unwrap();
        assert_eq!(scene.name, "lumo_core_unnamed_scene");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_scene_json("/definitely/not/here.json");
        assert!(matches!(result, Err(SceneError::Io(_))));
    }
}
