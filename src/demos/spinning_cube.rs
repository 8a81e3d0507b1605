//! A normal-shaded cube tumbling inside a spinning ring.

use cgmath::{Array, Vector3};

use crate::{
    animation::{FrameTime, spin, wave},
    config::SceneConfig,
    data_structures::{
        material::Material,
        scene_graph::{ObjectId, Scene, SceneObject},
    },
    demos::{gray_scene, object, segments},
    flow::{GraphicsFlow, Out},
    resources::primitives,
};

#[derive(Debug, Default)]
pub struct SpinningCube {
    cube: Option<ObjectId>,
    ring: Option<ObjectId>,
}

impl GraphicsFlow<(), ()> for SpinningCube {
    fn config(&self) -> SceneConfig {
        gray_scene([0.0, 0.0, 5.0], false)
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut ()) -> Out<(), ()> {
        let normal = scene.add_material(Material::normal());
        let cube = scene.add_geometry(primitives::cuboid(1.0, 1.0, 1.0));
        let (radial, tubular) = segments::TORUS;
        let ring = scene.add_geometry(primitives::torus(2.0, 0.2, radial, tubular));
        self.cube = Some(scene.add(SceneObject::new(cube, normal)));
        self.ring = Some(scene.add(SceneObject::new(ring, normal)));
        Out::Empty
    }

    fn on_update(&mut self, scene: &mut Scene, _state: &(), time: FrameTime) -> Out<(), ()> {
        let e = time.elapsed;
        if let Some(cube) = object(scene, self.cube) {
            cube.rotation = Vector3::from_value(spin(e, 1.0));
            cube.scale = Vector3::from_value(wave(e, 0.5, 2.0));
        }
        if let Some(ring) = object(scene, self.ring) {
            ring.rotation.y = spin(e, 1.0);
        }
        Out::Empty
    }
}
