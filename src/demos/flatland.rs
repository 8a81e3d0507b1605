//! One sphere in front of a camera looking down the negative z axis.

use crate::{
    animation::FrameTime,
    config::{CameraConfig, SceneConfig},
    data_structures::{
        material::Material,
        scene_graph::{Scene, SceneObject},
    },
    demos::{gray_scene, segments},
    flow::{GraphicsFlow, Out},
    resources::primitives,
};

#[derive(Debug, Default)]
pub struct Flatland;

impl GraphicsFlow<(), ()> for Flatland {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            camera: CameraConfig {
                position: [0.0, 0.0, 0.0],
                target: [0.0, 0.0, -1.0],
                far: 100.0,
                ..Default::default()
            },
            ..gray_scene([0.0, 0.0, 0.0], false)
        }
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut ()) -> Out<(), ()> {
        let (width, height) = segments::SPHERE;
        let sphere = scene.add_geometry(primitives::sphere(1.0, width, height));
        let normal = scene.add_material(Material::normal());
        scene.add(SceneObject::new(sphere, normal).at(0.0, 0.0, -3.0));
        Out::Empty
    }

    fn on_update(&mut self, _scene: &mut Scene, _state: &(), _time: FrameTime) -> Out<(), ()> {
        Out::Empty
    }
}
