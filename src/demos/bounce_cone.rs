//! The floating-sphere scene plus an upside-down cone that bounces between
//! two heights and flips over near each end.

use std::f32::consts::PI;

use crate::{
    animation::{BounceOscillator, FrameTime, Flipper},
    config::SceneConfig,
    data_structures::{
        material::Material,
        scene_graph::{ObjectId, Scene, SceneObject},
    },
    demos::{
        floating_sphere::{SphereControls, SphereRig},
        gray_scene, object, segments,
    },
    flow::{GraphicsFlow, Input, Out},
    panel::Panel,
    resources::primitives,
};

const CONE_START: f32 = 3.0;

#[derive(Debug)]
pub struct BounceCone {
    rig: SphereRig,
    cone: Option<ObjectId>,
    bounce: BounceOscillator,
    flip: Flipper,
}

impl Default for BounceCone {
    fn default() -> Self {
        Self {
            rig: SphereRig::default(),
            cone: None,
            bounce: BounceOscillator::new(CONE_START, 0.02, -3.0, 3.0),
            flip: Flipper::new(PI, 0.1, -2.0, 2.0),
        }
    }
}

impl BounceCone {
    pub fn cone(&self) -> Option<ObjectId> {
        self.cone
    }

    pub fn sphere(&self) -> Option<ObjectId> {
        self.rig.sphere
    }
}

impl GraphicsFlow<SphereControls, ()> for BounceCone {
    fn config(&self) -> SceneConfig {
        gray_scene([2.0, 2.0, 4.0], true)
    }

    fn panel(&self) -> Panel<SphereControls> {
        SphereControls::panel()
    }

    fn on_init(&mut self, scene: &mut Scene, _state: &mut SphereControls) -> Out<SphereControls, ()> {
        self.rig.build(scene);
        let geometry = scene.add_geometry(primitives::cone(1.5, 3.0, segments::CONE));
        let normal = scene.add_material(Material::normal());
        self.cone = Some(scene.add(
            SceneObject::new(geometry, normal)
                .at(0.0, CONE_START, 0.0)
                .rotated(PI, 0.0, 0.0),
        ));
        Out::Empty
    }

    fn on_input(
        &mut self,
        scene: &mut Scene,
        state: &mut SphereControls,
        input: &Input,
    ) -> Out<SphereControls, ()> {
        self.rig.on_input(scene, state, input);
        Out::Empty
    }

    fn on_update(&mut self, scene: &mut Scene, state: &SphereControls, time: FrameTime) -> Out<SphereControls, ()> {
        self.rig.on_update(scene, state, time);

        let heading = self.bounce.heading;
        let y = self.bounce.advance();
        let angle = self.flip.follow(y, heading).clamp(0.0, PI);
        if let Some(cone) = object(scene, self.cone) {
            cone.position.y = y;
            cone.rotation.x = angle;
        }
        Out::Empty
    }
}
