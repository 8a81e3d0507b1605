use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::Point3;
use flow_scenes::{
    KeyCode,
    animation::FrameTime,
    config::RunConfig,
    corpus::CorpusSource,
    data_structures::scene_graph::{Scene, SceneObject},
    demos::{
        self,
        bounce_cone::BounceCone,
        cave::{Cave, CaveState, SUN_START},
        floating_sphere::{FloatingSphere, SphereControls},
        shape_gallery::{GalleryControls, ShapeGallery},
        spinning_cube::SpinningCube,
        tour_cube::{TourCube, TourState},
        tour_model::{MODEL_FILE, ModelLoaded, ModelState, TourModel},
        traveler::{Traveler, TravelerControls},
        words::{CorpusLoaded, Style, WordControls, WordScene},
        xr_room::{XrRoom, XrState},
    },
    flow::FrameDriver,
};

use crate::common::test_utils::{assert_close, run_frames, seeded_rng, write_corpus, write_triangle_gltf};

mod common;

const CORPUS: &str = "The cupboard. The Hat and the broom.";

fn nth(scene: &Scene, index: usize) -> &SceneObject {
    scene.objects().nth(index).map(|(_, o)| o).unwrap()
}

fn drawn(scene: &Scene) -> usize {
    scene.batches().values().map(Vec::len).sum()
}

fn line_batches(scene: &Scene) -> usize {
    scene.batches().keys().filter(|k| k.lines).count()
}

#[test]
fn spinning_cube_keeps_turning() {
    let mut driver: FrameDriver<(), ()> = FrameDriver::new(Box::new(SpinningCube::default()));
    let mut last = nth(driver.scene(), 0).rotation.x;
    for frame in 1..100 {
        driver.frame(FrameTime::at(frame as f32 / 60.0));
        let rotation = nth(driver.scene(), 0).rotation;
        assert!(rotation.x > last);
        assert_eq!(rotation.x, rotation.y);
        last = rotation.x;
    }
    assert_close(nth(driver.scene(), 1).rotation.y, 99.0 / 60.0);
}

#[test]
fn floating_sphere_follows_its_controls() {
    let mut driver: FrameDriver<SphereControls, ()> = FrameDriver::new(Box::new(FloatingSphere::default()));
    assert_eq!(line_batches(driver.scene()), 1);

    assert!(driver.set_toggle("wireframe", false));
    assert_eq!(line_batches(driver.scene()), 0);

    assert!(driver.set_slider("Height", 1.5));
    assert_close(nth(driver.scene(), 1).position.y, 1.5);

    driver.key(KeyCode::ArrowUp);
    assert_close(nth(driver.scene(), 1).position.y, 1.6);

    driver.key(KeyCode::KeyP);
    assert!(driver.state().play);
    driver.frame(FrameTime::at(PI));
    assert_close(nth(driver.scene(), 1).position.y, 2.0);
}

#[test]
fn bounce_cone_stays_in_range_and_flips() {
    let mut driver: FrameDriver<SphereControls, ()> = FrameDriver::new(Box::new(BounceCone::default()));
    let cone = nth(driver.scene(), 2);
    assert_close(cone.position.y, 3.0);
    assert_close(cone.rotation.x, PI);

    for frame in 0..320 {
        driver.frame(FrameTime::at(frame as f32 / 60.0));
        let cone = nth(driver.scene(), 2);
        assert!(cone.position.y > -3.05 && cone.position.y < 3.05);
        assert!((0.0..=PI).contains(&cone.rotation.x));
    }
    // turned upright near the bottom and on its way back up
    let cone = nth(driver.scene(), 2);
    assert_close(cone.rotation.x, 0.0);
    assert!(cone.position.y < -2.5);
}

#[test]
fn traveler_reset_keeps_the_floor_look() {
    let mut driver: FrameDriver<TravelerControls, ()> = FrameDriver::new(Box::new(Traveler::default()));
    driver.set_toggle("Wireframe", false);
    driver.set_slider("Speed", 4.0);
    driver.set_toggle("Play", true);
    driver.key(KeyCode::KeyR);
    assert!(driver.state().rotate);

    driver.frame(FrameTime::at(1.0));
    let torus = nth(driver.scene(), 1);
    assert_close(torus.position.y, (4.0f32).sin() * 2.0);
    assert_close(torus.rotation.x, 1.0);
    assert_close(torus.rotation.y, 1.0);

    assert!(driver.trigger("Reset"));
    let state = driver.state();
    assert!(!state.wireframe);
    assert!(!state.play);
    assert!(!state.rotate);
    assert_eq!(state.speed, 0.5);
    assert_eq!(state.distance, 2.0);
}

#[test]
fn shape_gallery_toggles_visibility() {
    let mut driver: FrameDriver<GalleryControls, ()> = FrameDriver::new(Box::new(ShapeGallery::default()));
    // floor and knot
    assert_eq!(drawn(driver.scene()), 2);

    driver.key(KeyCode::Digit1);
    driver.key(KeyCode::Digit2);
    assert_eq!(drawn(driver.scene()), 4);
    driver.set_toggle("Knot visible", false);
    assert_eq!(drawn(driver.scene()), 3);

    driver.set_toggle("Rotate torus", true);
    driver.set_toggle("Move knot", true);
    driver.frame(FrameTime::at(2.0));
    assert_close(nth(driver.scene(), 2).rotation.y, 1.0);
    assert_close(nth(driver.scene(), 3).position.y, (0.8f32).sin() * 2.0);
}

#[test]
fn tour_cube_buttons_only_work_in_their_part() {
    let mut driver: FrameDriver<TourState, ()> = FrameDriver::new(Box::new(TourCube::default()));
    run_frames(&mut driver, 0.0, 1.0 / 60.0, 10);
    let cube = nth(driver.scene(), 0);
    assert_close(cube.rotation.y, -0.02);
    assert_close(cube.rotation.z, -0.02);

    driver.key(KeyCode::Digit1);
    assert_eq!(driver.state().tour.stage(), 2);
    driver.key(KeyCode::Digit1);
    driver.key(KeyCode::Digit3);
    assert_eq!(driver.state().tour.stage(), 2);

    run_frames(&mut driver, 0.0, 1.0 / 60.0, 200);
    let y = nth(driver.scene(), 0).rotation.y;
    assert!(y > FRAC_PI_2 && y <= FRAC_PI_2 + 0.021);

    assert!(driver.press("second"));
    assert_eq!(driver.state().tour.stage(), 3);
    driver.key(KeyCode::Digit3);
    assert_eq!(driver.state().tour.stage(), 1);
}

#[test]
fn cave_restart_puts_everything_back() {
    let mut driver: FrameDriver<CaveState, ()> = FrameDriver::new(Box::new(Cave::default()));
    driver.frame(FrameTime::at(0.0));
    assert_eq!(driver.scene().camera.position, Point3::new(0.0, -1.0, 3.0));

    driver.press("continue-reading");
    driver.press("first-change");
    driver.press("third-change");
    driver.press("fourth-change");
    assert_eq!(driver.state().tour.stage(), 2);

    driver.frame(FrameTime::at(10.0));
    let scene = driver.scene();
    assert_eq!(scene.camera.position, Point3::new(15.0, 4.0, 14.0));
    assert_close(scene.lights()[0].position.y, SUN_START.y - 0.05);
    assert_close(nth(scene, 4).position.y, SUN_START.y - 0.05);
    let knot = nth(scene, 3);
    assert_close(knot.rotation.y, 10.0);
    assert_close(knot.position.y, 2.0);

    driver.key(KeyCode::KeyR);
    assert_eq!(*driver.state(), CaveState::default());
    assert_eq!(driver.scene().lights()[0].position, SUN_START);

    driver.frame(FrameTime::at(11.0));
    assert_eq!(nth(driver.scene(), 4).position, SUN_START);
    assert_eq!(driver.scene().camera.position, Point3::new(0.0, -1.0, 3.0));
}

#[test]
fn tour_model_survives_a_missing_file() {
    let mut driver: FrameDriver<ModelState, ModelLoaded> =
        FrameDriver::new(Box::new(TourModel::new("does/not/exist.gltf")));
    assert_eq!(driver.pending(), 1);
    driver.frame(FrameTime::at(0.0));
    assert_eq!(driver.pending(), 0);
    assert_eq!(driver.scene().object_count(), 0);

    driver.cursor(0.5, -0.25);
    assert_eq!(driver.state().cursor, (0.5, -0.25));
    driver.key(KeyCode::Digit1);
    assert_eq!(driver.state().tour.stage(), 2);
}

#[test]
fn tour_model_loads_the_configured_file() {
    assert_eq!(RunConfig::default().model, MODEL_FILE);

    let path = write_triangle_gltf("tour");
    let mut driver: FrameDriver<ModelState, ModelLoaded> =
        FrameDriver::new(Box::new(TourModel::new(path.to_str().unwrap())));
    driver.frame(FrameTime::at(0.0));
    assert_eq!(driver.pending(), 0);
    assert_eq!(driver.scene().object_count(), 1);
    let model = nth(driver.scene(), 0);
    assert_close(model.position.x, -2.0);
    assert_close(model.position.y, -0.5);
}

#[test]
fn static_word_cubes_stack_every_occurrence() {
    let path = write_corpus("static", CORPUS);
    let flow = WordScene::with_rng(Style::StaticCubes, CorpusSource::File(path), seeded_rng());
    let mut driver: FrameDriver<WordControls, CorpusLoaded> = FrameDriver::new(Box::new(flow));
    assert!(driver.panel().is_empty());
    // the marker cube
    assert_eq!(driver.scene().object_count(), 1);

    driver.frame(FrameTime::at(0.0));
    assert_eq!(driver.pending(), 0);
    assert_eq!(driver.scene().object_count(), 1 + 15);
}

#[test]
fn word_cubes_filter_by_term() {
    let path = write_corpus("filter", CORPUS);
    let flow = WordScene::with_rng(Style::Cubes, CorpusSource::File(path), seeded_rng());
    let mut driver: FrameDriver<WordControls, CorpusLoaded> = FrameDriver::new(Box::new(flow));
    driver.frame(FrameTime::at(0.0));
    assert_eq!(drawn(driver.scene()), 15);

    assert!(driver.set_toggle("hat", false));
    assert_eq!(drawn(driver.scene()), 10);
    driver.key(KeyCode::Digit1);
    assert_eq!(drawn(driver.scene()), 5);
    driver.key(KeyCode::Digit2);
    assert_eq!(drawn(driver.scene()), 10);
}

#[test]
fn word_camera_circles_the_stack() {
    let path = write_corpus("camera", CORPUS);
    let flow = WordScene::with_rng(Style::Bubbles, CorpusSource::File(path), seeded_rng());
    let mut driver: FrameDriver<WordControls, CorpusLoaded> = FrameDriver::new(Box::new(flow));
    driver.key(KeyCode::KeyC);
    driver.frame(FrameTime::at(0.0));
    let camera = &driver.scene().camera;
    assert_close(camera.position.x, 0.0);
    assert_close(camera.position.z, 16.0);
    // no dudley, snape or malfoy in this text
    assert_eq!(driver.scene().object_count(), 0);
}

#[test]
fn unreadable_corpus_leaves_the_scene_empty() {
    let flow = WordScene::with_rng(
        Style::Cubes,
        CorpusSource::File("/definitely/not/here.txt".into()),
        seeded_rng(),
    );
    let mut driver: FrameDriver<WordControls, CorpusLoaded> = FrameDriver::new(Box::new(flow));
    driver.frame(FrameTime::at(0.0));
    assert_eq!(driver.pending(), 0);
    assert_eq!(driver.scene().object_count(), 0);
}

#[test]
fn xr_cube_circles_while_selected() {
    let mut driver: FrameDriver<XrState, ()> = FrameDriver::new(Box::new(XrRoom::default()));
    driver.frame(FrameTime::at(1.0));
    assert_close(nth(driver.scene(), 1).position.x, 0.0);

    driver.select(true);
    assert!(driver.state().selected);
    driver.frame(FrameTime::at(1.0));
    let cube = nth(driver.scene(), 1);
    assert_close(cube.position.x, (0.2f32).sin() * 0.5);
    assert_close(cube.position.z, (0.2f32).cos() * 0.5);
    assert_close(cube.rotation.x, 0.2);

    driver.select(false);
    assert!(!driver.state().selected);
}

#[test]
fn unknown_demos_are_rejected() {
    let config = RunConfig {
        demo: "no-such-demo".to_string(),
        ..Default::default()
    };
    let err = demos::launch(&config).unwrap_err();
    assert!(err.to_string().contains("no-such-demo"));
    assert!(demos::DEMOS.contains(&"cave"));
    assert_eq!(demos::DEMOS.len(), 13);
}
