//! Sphere, torus and torus knot sharing one floor. Each shape can be shown,
//! hidden and animated on its own.

use cgmath::{Array, Vector3};
use winit::keyboard::KeyCode;

use crate::{
    animation::{FrameTime, spin, wave},
    config::SceneConfig,
    data_structures::{
        material::{Material, MaterialId},
        scene_graph::{ObjectId, Scene, SceneObject},
    },
    demos::{gray_scene, object, segments, wire_floor},
    flow::{GraphicsFlow, Input, Out},
    panel::{Folder, Panel},
    resources::primitives,
};

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryControls {
    pub wireframe: bool,
    pub sphere_visible: bool,
    pub play: bool,
    pub height: f32,
    pub torus_visible: bool,
    pub rotate_torus: bool,
    pub move_torus: bool,
    pub knot_visible: bool,
    pub rotate_knot: bool,
    pub move_knot: bool,
}

impl Default for GalleryControls {
    fn default() -> Self {
        Self {
            wireframe: true,
            sphere_visible: false,
            play: false,
            height: 0.0,
            torus_visible: false,
            rotate_torus: false,
            move_torus: false,
            knot_visible: true,
            rotate_knot: false,
            move_knot: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Shape {
    material: MaterialId,
    object: ObjectId,
}

#[derive(Debug, Default)]
pub struct ShapeGallery {
    floor: Option<MaterialId>,
    sphere: Option<Shape>,
    torus: Option<Shape>,
    knot: Option<Shape>,
}

impl ShapeGallery {
    fn add_shape(scene: &mut Scene, mesh: primitives::MeshData, visible: bool) -> Shape {
        let geometry = scene.add_geometry(mesh);
        let material = scene.add_material(Material::normal().visible(visible));
        Shape {
            material,
            object: scene.add(SceneObject::new(geometry, material)),
        }
    }

    fn show(scene: &mut Scene, shape: Option<Shape>, visible: bool) {
        if let Some(material) = shape.and_then(|s| scene.material_mut(s.material)) {
            material.visible = visible;
        }
    }
}

impl GraphicsFlow<GalleryControls, ()> for ShapeGallery {
    fn config(&self) -> SceneConfig {
        gray_scene([2.0, 2.0, 4.0], true)
    }

    fn panel(&self) -> Panel<GalleryControls> {
        Panel::new()
            .folder(Folder::<GalleryControls>::new("Plane").toggle("Wireframe", KeyCode::KeyW, |s| &mut s.wireframe))
            .folder(
                Folder::<GalleryControls>::new("Sphere")
                    .toggle("Sphere visible", KeyCode::Digit1, |s| &mut s.sphere_visible)
                    .toggle("Animate sphere", KeyCode::KeyP, |s| &mut s.play)
                    .slider(
                        "Sphere height",
                        (-5.0, 5.0, 0.1),
                        KeyCode::ArrowDown,
                        KeyCode::ArrowUp,
                        |s| &mut s.height,
                    ),
            )
            .folder(
                Folder::<GalleryControls>::new("Torus")
                    .toggle("Torus visible", KeyCode::Digit2, |s| &mut s.torus_visible)
                    .toggle("Rotate torus", KeyCode::KeyT, |s| &mut s.rotate_torus)
                    .toggle("Move torus", KeyCode::KeyG, |s| &mut s.move_torus),
            )
            .folder(
                Folder::<GalleryControls>::new("Torus Knot")
                    .toggle("Knot visible", KeyCode::Digit3, |s| &mut s.knot_visible)
                    .toggle("Rotate knot", KeyCode::KeyK, |s| &mut s.rotate_knot)
                    .toggle("Move knot", KeyCode::KeyM, |s| &mut s.move_knot),
            )
    }

    fn on_init(&mut self, scene: &mut Scene, state: &mut GalleryControls) -> Out<GalleryControls, ()> {
        let (floor, _) = wire_floor(scene);
        self.floor = Some(floor);

        let (width, height) = segments::SPHERE;
        let (radial, tubular) = segments::TORUS;
        let (knot_tubular, knot_radial) = segments::KNOT;
        self.sphere = Some(Self::add_shape(
            scene,
            primitives::sphere(1.0, width, height),
            state.sphere_visible,
        ));
        self.torus = Some(Self::add_shape(
            scene,
            primitives::torus(2.0, 0.4, radial, tubular),
            state.torus_visible,
        ));
        self.knot = Some(Self::add_shape(
            scene,
            primitives::torus_knot(3.0, 0.6, knot_tubular, knot_radial, 2, 3),
            state.knot_visible,
        ));
        Out::Empty
    }

    fn on_input(
        &mut self,
        scene: &mut Scene,
        state: &mut GalleryControls,
        input: &Input,
    ) -> Out<GalleryControls, ()> {
        match input {
            Input::Panel("Wireframe") => {
                if let Some(floor) = self.floor.and_then(|id| scene.material_mut(id)) {
                    floor.wireframe = state.wireframe;
                }
            }
            Input::Panel("Sphere visible") => Self::show(scene, self.sphere, state.sphere_visible),
            Input::Panel("Torus visible") => Self::show(scene, self.torus, state.torus_visible),
            Input::Panel("Knot visible") => Self::show(scene, self.knot, state.knot_visible),
            Input::Panel("Sphere height") => {
                if let Some(sphere) = object(scene, self.sphere.map(|s| s.object)) {
                    sphere.position.y = state.height;
                }
            }
            _ => (),
        }
        Out::Empty
    }

    fn on_update(
        &mut self,
        scene: &mut Scene,
        state: &GalleryControls,
        time: FrameTime,
    ) -> Out<GalleryControls, ()> {
        let e = time.elapsed;
        if state.play {
            if let Some(sphere) = object(scene, self.sphere.map(|s| s.object)) {
                sphere.position.y = wave(e, 0.4, 1.0);
            }
        }
        if let Some(torus) = object(scene, self.torus.map(|s| s.object)) {
            if state.rotate_torus {
                torus.rotation.y = spin(e, 0.5);
            }
            if state.move_torus {
                torus.position.y = wave(e, 0.4, 2.0);
            }
        }
        if let Some(knot) = object(scene, self.knot.map(|s| s.object)) {
            if state.rotate_knot {
                knot.rotation = Vector3::from_value(spin(e, 0.2));
            }
            if state.move_knot {
                knot.position.y = wave(e, 0.4, 2.0);
            }
        }
        Out::Empty
    }
}
