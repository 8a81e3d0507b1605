//! Scene organisation.
//!
//! A [`Scene`] owns everything a demo puts on screen: shared geometries and
//! materials, the objects referencing them, lights, the camera and the
//! background colour. Objects, materials and lights are addressed by small
//! copyable handles and are never removed once added.

use std::collections::BTreeMap;

use cgmath::{Point3, Vector3};

use crate::{
    camera::{Camera, OrbitControls},
    config::SceneConfig,
    data_structures::{
        instance::{Instance, InstanceRaw},
        material::{Colour, Material, MaterialId},
    },
    resources::primitives::MeshData,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(pub(crate) usize);

/// A drawable object: one geometry, one material and a transform.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(geometry: GeometryId, material: MaterialId) -> Self {
        Self {
            geometry,
            material,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            visible: true,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale = Vector3::new(factor, factor, factor);
        self
    }

    pub fn instance(&self) -> Instance {
        Instance::from_euler(self.position, self.rotation, self.scale)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays shining from `position` towards the origin.
    Directional,
    /// Sky colour from above blended into `ground` from below.
    Hemisphere { ground: Colour },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub colour: Colour,
    pub intensity: f32,
    pub position: Vector3<f32>,
}

impl Light {
    pub fn ambient(colour: Colour, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            colour,
            intensity,
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn directional(colour: Colour, intensity: f32, position: Vector3<f32>) -> Self {
        Self {
            kind: LightKind::Directional,
            colour,
            intensity,
            position,
        }
    }

    pub fn hemisphere(sky: Colour, ground: Colour, intensity: f32) -> Self {
        Self {
            kind: LightKind::Hemisphere { ground },
            colour: sky,
            intensity,
            position: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

/// Instances that share a geometry and a draw mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchKey {
    pub geometry: GeometryId,
    /// Draw the edge list instead of the triangles.
    pub lines: bool,
}

pub struct Scene {
    geometries: Vec<MeshData>,
    materials: Vec<Material>,
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
    pub camera: Camera,
    pub background: Colour,
    /// Mouse-driven camera orbit, if the demo enables it.
    pub orbit: Option<OrbitControls>,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let camera = Camera::from(&config.camera);
        let orbit = config.orbit.then(|| OrbitControls::from_camera(&camera));
        Self {
            geometries: Vec::new(),
            materials: Vec::new(),
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
            background: config.background,
            orbit,
        }
    }

    pub fn add_geometry(&mut self, mesh: MeshData) -> GeometryId {
        self.geometries.push(mesh);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&MeshData> {
        self.geometries.get(id.0)
    }

    pub fn geometries(&self) -> impl Iterator<Item = (GeometryId, &MeshData)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, mesh)| (GeometryId(i), mesh))
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        if self.geometry(object.geometry).is_none() || self.material(object.material).is_none() {
            log::warn!(
                "object references unknown geometry {:?} or material {:?}, it will not be drawn",
                object.geometry,
                object.material
            );
        }
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i), object))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Point the camera at `target` from `position`.
    pub fn look_from(&mut self, position: Point3<f32>, target: Point3<f32>) {
        self.camera.position = position;
        self.camera.target = target;
        if let Some(orbit) = &mut self.orbit {
            *orbit = OrbitControls::from_camera(&self.camera);
        }
    }

    /// Group the visible objects into per-geometry instance lists.
    ///
    /// Objects are skipped when they are hidden, when their material is
    /// hidden, or when they reference an unknown geometry or material.
    /// Line-only geometries and wireframe materials end up in `lines`
    /// batches.
    pub fn batches(&self) -> BTreeMap<BatchKey, Vec<InstanceRaw>> {
        let mut batches: BTreeMap<BatchKey, Vec<InstanceRaw>> = BTreeMap::new();
        for object in self.objects.iter().filter(|o| o.visible) {
            let (Some(mesh), Some(material)) =
                (self.geometry(object.geometry), self.material(object.material))
            else {
                continue;
            };
            if !material.visible {
                continue;
            }
            let key = BatchKey {
                geometry: object.geometry,
                lines: material.wireframe || mesh.indices.is_empty(),
            };
            batches
                .entry(key)
                .or_default()
                .push(object.instance().to_raw(material));
        }
        batches
    }
}
