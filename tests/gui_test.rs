use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, vec2};
use flow_scenes::{
    KeyCode,
    animation::FrameTime,
    data_structures::scene_graph::Scene,
    demos::{spinning_cube::SpinningCube, tour_cube::{TourCube, TourState}},
    flow::{Button, FrameDriver, GraphicsFlow, Input, Out},
    gui::{Interaction, Overlay},
    panel::{Folder, Panel},
};

#[derive(Debug, Default)]
struct Controls {
    wireframe: bool,
    height: f32,
    resets: u32,
    inputs: Vec<Input>,
}

struct Controlled;

impl GraphicsFlow<Controls, ()> for Controlled {
    fn panel(&self) -> Panel<Controls> {
        Panel::new().folder(
            Folder::<Controls>::new("Plane")
                .toggle("Wireframe", KeyCode::KeyW, |s| &mut s.wireframe)
                .slider("Height", (-1.0, 1.0, 0.5), KeyCode::ArrowDown, KeyCode::ArrowUp, |s| {
                    &mut s.height
                })
                .action("Reset", KeyCode::Backspace, |s| s.resets += 1),
        )
    }

    fn buttons(&self) -> Vec<Button> {
        vec![Button::new("next", "Next page", KeyCode::KeyN)]
    }

    fn on_init(&mut self, _scene: &mut Scene, _state: &mut Controls) -> Out<Controls, ()> {
        Out::Empty
    }

    fn on_input(&mut self, _scene: &mut Scene, state: &mut Controls, input: &Input) -> Out<Controls, ()> {
        state.inputs.push(*input);
        Out::Empty
    }

    fn on_update(&mut self, _scene: &mut Scene, _state: &Controls, _time: FrameTime) -> Out<Controls, ()> {
        Out::Empty
    }
}

fn screen(events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
        events,
        ..Default::default()
    }
}

fn primary(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

/// Lay the overlay out, then press and release the primary button over the
/// widget called `name`.
fn click<S, E>(overlay: &mut Overlay, driver: &mut FrameDriver<S, E>, name: &str) {
    overlay.run(screen(vec![]), driver);
    let pos = overlay.rect(name).unwrap().center();
    overlay.run(screen(vec![Event::PointerMoved(pos), primary(pos, true)]), driver);
    overlay.run(screen(vec![primary(pos, false)]), driver);
}

#[test]
fn every_button_and_control_is_placed_on_screen() {
    let mut overlay = Overlay::new();
    let mut driver: FrameDriver<Controls, ()> = FrameDriver::new(Box::new(Controlled));
    overlay.run(screen(vec![]), &mut driver);

    let area = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
    for name in ["next", "Wireframe", "Height", "Reset"] {
        let rect = overlay.rect(name).unwrap();
        assert!(area.contains_rect(rect), "{} at {:?}", name, rect);
        assert!(rect.width() > 0.0 && rect.height() > 0.0);
    }
    // laid out in the right-hand side panel
    assert!(overlay.rect("next").unwrap().min.x > 400.0);
    assert!(driver.state().inputs.is_empty());
}

#[test]
fn clicking_a_button_delivers_a_button_input() {
    let mut overlay = Overlay::new();
    let mut driver: FrameDriver<Controls, ()> = FrameDriver::new(Box::new(Controlled));
    click(&mut overlay, &mut driver, "next");
    assert_eq!(driver.state().inputs, vec![Input::Button("next")]);
}

#[test]
fn clicking_panel_controls_updates_the_state() {
    let mut overlay = Overlay::new();
    let mut driver: FrameDriver<Controls, ()> = FrameDriver::new(Box::new(Controlled));

    click(&mut overlay, &mut driver, "Wireframe");
    assert!(driver.state().wireframe);
    click(&mut overlay, &mut driver, "Reset");
    assert_eq!(driver.state().resets, 1);
    click(&mut overlay, &mut driver, "Wireframe");
    assert!(!driver.state().wireframe);

    assert_eq!(
        driver.state().inputs,
        vec![
            Input::Panel("Wireframe"),
            Input::Panel("Reset"),
            Input::Panel("Wireframe"),
        ]
    );
}

#[test]
fn pointer_over_the_panel_is_claimed() {
    let mut overlay = Overlay::new();
    let mut driver: FrameDriver<Controls, ()> = FrameDriver::new(Box::new(Controlled));
    overlay.run(screen(vec![]), &mut driver);
    let pos = overlay.rect("Reset").unwrap().center();

    overlay.run(screen(vec![Event::PointerMoved(pos)]), &mut driver);
    assert!(overlay.wants_pointer());
    overlay.run(screen(vec![Event::PointerMoved(Pos2::new(20.0, 20.0))]), &mut driver);
    assert!(!overlay.wants_pointer());
}

#[test]
fn clicking_the_live_tour_button_advances_the_tour() {
    let mut overlay = Overlay::new();
    let mut driver: FrameDriver<TourState, ()> = FrameDriver::new(Box::new(TourCube::default()));

    click(&mut overlay, &mut driver, "second");
    assert_eq!(driver.state().tour.stage(), 1);
    click(&mut overlay, &mut driver, "first");
    assert_eq!(driver.state().tour.stage(), 2);
    click(&mut overlay, &mut driver, "second");
    assert_eq!(driver.state().tour.stage(), 3);
}

#[test]
fn interactions_go_through_the_panel() {
    let mut driver: FrameDriver<Controls, ()> = FrameDriver::new(Box::new(Controlled));

    assert!(Interaction::Slide("Height", 4.0).apply(&mut driver));
    assert_eq!(driver.state().height, 1.0);
    assert!(Interaction::Toggle("Wireframe", true).apply(&mut driver));
    assert!(driver.state().wireframe);
    assert!(!Interaction::Press("missing").apply(&mut driver));
    assert!(!Interaction::Toggle("Height", true).apply(&mut driver));
    assert_eq!(
        driver.state().inputs,
        vec![Input::Panel("Height"), Input::Panel("Wireframe")]
    );
}

#[test]
fn flows_without_controls_draw_nothing() {
    let mut overlay = Overlay::new();
    let mut driver: FrameDriver<(), ()> = FrameDriver::new(Box::new(SpinningCube::default()));
    let output = overlay.run(screen(vec![]), &mut driver);
    assert!(overlay.rect("first").is_none());
    assert!(output.shapes.is_empty());
}
