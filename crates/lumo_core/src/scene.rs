//! Scene store for Lumo.
//!
//! A deliberately small scene graph: shapes and lights with local
//! transforms, optionally parented to groups, plus a material table. The
//! tracer only sees it through [`SceneQuery`], which hands out resolved
//! local-to-world matrices.

use std::collections::HashMap;

use lumo_math::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::material::Material;
use crate::shape::Shape;

/// Index of an object in [`Scene::objects`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Index of a material in [`Scene::materials`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Index of a group in [`Scene::groups`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

/// Transform components that can be composed into a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion, `[x, y, z, w]` in JSON)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Create a new transform from a 4x4 matrix.
    ///
    /// Decomposes the matrix into translation, rotation, and scale.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// A transform node other nodes can hang from.
#[derive(Clone, Debug)]
pub struct Group {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<GroupId>,
}

/// A traceable shape placed in the scene.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub shape: Shape,
    pub transform: Transform,
    pub group: Option<GroupId>,
}

/// A light placed in the scene.
#[derive(Clone, Debug)]
pub struct SceneLight {
    pub name: String,
    pub light: Light,
    pub transform: Transform,
    pub group: Option<GroupId>,
}

/// A tracing-capable object with its resolved placement.
#[derive(Clone, Copy, Debug)]
pub struct TracingObject<'a> {
    pub name: &'a str,
    pub shape: &'a Shape,
    pub local_to_world: Mat4,
    /// `None` when no material was bound to the object
    pub material: Option<&'a Material>,
}

/// A light with its resolved placement.
#[derive(Clone, Copy, Debug)]
pub struct LightObject<'a> {
    pub name: &'a str,
    pub light: &'a Light,
    pub local_to_world: Mat4,
}

/// Read access the tracer needs from a scene.
///
/// Implementors resolve transforms however they like; callers only rely on
/// each returned object carrying its final local-to-world matrix.
pub trait SceneQuery {
    /// Every object exposing a shape to trace.
    fn tracing_objects(&self) -> Vec<TracingObject<'_>>;

    /// Every light-emitting object.
    fn light_objects(&self) -> Vec<LightObject<'_>>;
}

/// A complete scene: groups, objects, lights and the material table.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Transform groups; a group's parent always precedes it
    pub groups: Vec<Group>,

    /// Traceable objects
    pub objects: Vec<SceneObject>,

    /// Lights
    pub lights: Vec<SceneLight>,

    /// Materials used in the scene
    pub materials: Vec<Material>,

    /// Object -> material association table
    material_bindings: HashMap<ObjectId, MaterialId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        id
    }

    /// Add a transform group. The parent must already exist, which keeps the
    /// hierarchy acyclic.
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        parent: Option<GroupId>,
    ) -> SceneResult<GroupId> {
        let name = name.into();
        self.check_group(parent, &name)?;
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            name,
            transform,
            parent,
        });
        Ok(id)
    }

    /// Add a traceable object and return its ID.
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        shape: impl Into<Shape>,
        transform: Transform,
        group: Option<GroupId>,
    ) -> SceneResult<ObjectId> {
        let name = name.into();
        self.check_group(group, &name)?;
        let id = ObjectId(self.objects.len());
        self.objects.push(SceneObject {
            name,
            shape: shape.into(),
            transform,
            group,
        });
        Ok(id)
    }

    /// Add a light.
    pub fn add_light(
        &mut self,
        name: impl Into<String>,
        light: Light,
        transform: Transform,
        group: Option<GroupId>,
    ) -> SceneResult<()> {
        let name = name.into();
        self.check_group(group, &name)?;
        self.lights.push(SceneLight {
            name,
            light,
            transform,
            group,
        });
        Ok(())
    }

    /// Associate a material with an object, replacing any previous binding.
    pub fn bind_material(&mut self, object: ObjectId, material: MaterialId) -> SceneResult<()> {
        if object.0 >= self.objects.len() {
            return Err(SceneError::UnknownObject(object.0));
        }
        if material.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(format!("#{}", material.0)));
        }
        self.material_bindings.insert(object, material);
        Ok(())
    }

    /// Material bound to an object, if any.
    pub fn material_of(&self, object: ObjectId) -> Option<&Material> {
        self.material_bindings
            .get(&object)
            .and_then(|id| self.materials.get(id.0))
    }

    /// World matrix of a group, composed from the root down.
    pub fn group_matrix(&self, group: GroupId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(group);
        while let Some(id) = current {
            match self.groups.get(id.0) {
                Some(node) => {
                    matrix = node.transform.to_matrix() * matrix;
                    current = node.parent;
                }
                None => break,
            }
        }
        matrix
    }

    /// Local-to-world matrix for a transform hanging from `group`.
    pub fn world_matrix(&self, transform: &Transform, group: Option<GroupId>) -> Mat4 {
        let local = transform.to_matrix();
        match group {
            Some(id) => self.group_matrix(id) * local,
            None => local,
        }
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    fn check_group(&self, group: Option<GroupId>, name: &str) -> SceneResult<()> {
        match group {
            Some(id) if id.0 >= self.groups.len() => Err(SceneError::UnknownGroup(format!(
                "#{} (referenced by {})",
                id.0, name
            ))),
            _ => Ok(()),
        }
    }
}

impl SceneQuery for Scene {
    fn tracing_objects(&self) -> Vec<TracingObject<'_>> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                TracingObject {
                    name: &object.name,
                    shape: &object.shape,
                    local_to_world: self.world_matrix(&object.transform, object.group),
                    material: self.material_of(ObjectId(index)),
                }
            })
            .collect()
    }

    fn light_objects(&self) -> Vec<LightObject<'_>> {
        self.lights
            .iter()
            .map(|light| LightObject {
                name: &light.name,
                light: &light.light,
                local_to_world: self.world_matrix(&light.transform, light.group),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Plane;

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new("test");

        let floor = scene
            .add_object("floor", Plane::new(Vec3::Y, 0.0), Transform::default(), None)
            .unwrap();
        let grey = scene.add_material(Material::default());
        scene.bind_material(floor, grey).unwrap();
        scene
            .add_light("sun", Light::directional(Vec3::NEG_Y, Vec3::ONE), Transform::default(), None)
            .unwrap();

        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.material_of(floor), Some(&Material::default()));
    }

    #[test]
    fn test_unbound_object_has_no_material() {
        let mut scene = Scene::new("test");
        let floor = scene
            .add_object("floor", Plane::new(Vec3::Y, 0.0), Transform::default(), None)
            .unwrap();

        assert!(scene.material_of(floor).is_none());
        assert!(scene.tracing_objects()[0].material.is_none());
    }

    #[test]
    fn test_bind_unknown_material() {
        let mut scene = Scene::new("test");
        let floor = scene
            .add_object("floor", Plane::new(Vec3::Y, 0.0), Transform::default(), None)
            .unwrap();

        assert!(matches!(
            scene.bind_material(floor, MaterialId(3)),
            Err(SceneError::UnknownMaterial(_))
        ));
        assert!(matches!(
            scene.bind_material(ObjectId(9), MaterialId(0)),
            Err(SceneError::UnknownObject(9))
        ));
    }

    #[test]
    fn test_unknown_parent_group() {
        let mut scene = Scene::new("test");
        let result = scene.add_group("orphan", Transform::default(), Some(GroupId(0)));
        assert!(matches!(result, Err(SceneError::UnknownGroup(_))));
    }

    #[test]
    fn test_group_hierarchy_composition() {
        let mut scene = Scene::new("test");
        let outer = scene
            .add_group("outer", Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)), None)
            .unwrap();
        let inner = scene
            .add_group(
                "inner",
                Transform {
                    scale: Vec3::splat(2.0),
                    ..Default::default()
                },
                Some(outer),
            )
            .unwrap();
        scene
            .add_light(
                "bulb",
                Light::point(Vec3::ONE),
                Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
                Some(inner),
            )
            .unwrap();

        let lights = scene.light_objects();
        let position = lights[0].local_to_world.transform_point3(Vec3::ZERO);

        // Scaled by the inner group, then moved by the outer one
        assert!((position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_transform_matrix_roundtrip() {
        let transform = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        let matrix = transform.to_matrix();
        let recovered = Transform::from_matrix(matrix);

        assert!((recovered.translation - transform.translation).length() < 0.001);
        assert!((recovered.scale - transform.scale).length() < 0.001);
    }
}
