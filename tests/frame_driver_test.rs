use flow_scenes::{
    KeyCode,
    animation::FrameTime,
    data_structures::scene_graph::Scene,
    flow::{Button, FrameDriver, GraphicsFlow, Input, Out},
    panel::{Folder, Panel},
};
use futures::channel::oneshot;

use crate::common::test_utils::{State, run_frames};

mod common;

enum Event {
    Test,
    Ignored,
}

#[derive(Default)]
struct GraphicsElement {
    updates: u32,
}

impl GraphicsFlow<State, Event> for GraphicsElement {
    fn on_init(&mut self, _scene: &mut Scene, state: &mut State) -> Out<State, Event> {
        assert_eq!(state.frame_counter(), 0);
        assert_eq!(state.init_invocations(), 0);
        assert_eq!(state.update_invocations(), 0);

        state.init();
        Out::Empty
    }

    fn on_update(&mut self, _scene: &mut Scene, state: &State, _time: FrameTime) -> Out<State, Event> {
        assert_eq!(state.init_invocations(), 1);
        self.updates += 1;

        let serve_sencha: Box<dyn FnOnce(&mut State)> = Box::new(|state: &mut State| {
            state.dummy_state.push('🍵');
        });
        let serve_mate: Box<dyn FnOnce(&mut State)> = Box::new(|state: &mut State| {
            state.dummy_state.push('🧉');
        });
        let count: Box<dyn FnOnce(&mut State)> = Box::new(|state: &mut State| {
            state.update();
            state.frame();
        });
        match self.updates {
            4 => Out::FutEvent(vec![
                Box::new(async move { Event::Test }),
                Box::new(async move { Event::Ignored }),
            ]),
            6 => Out::FutFn(vec![
                Box::new(async move { serve_sencha }),
                Box::new(async move { serve_mate }),
                Box::new(async move { count }),
            ]),
            _ => Out::FutFn(vec![Box::new(async move { count })]),
        }
    }

    fn on_custom_events(&mut self, _scene: &mut Scene, state: &mut State, event: Event) -> Option<Event> {
        match event {
            Event::Test => {
                state.received_events += 1;
                None
            }
            Event::Ignored => Some(event),
        }
    }
}

#[test]
fn futures_resolve_on_the_next_frame() {
    let mut driver: FrameDriver<State, Event> = FrameDriver::new(Box::new(GraphicsElement::default()));
    assert_eq!(driver.state().init_invocations(), 1);
    assert_eq!(driver.pending(), 0);

    run_frames(&mut driver, 0.0, 1.0 / 60.0, 10);

    assert_eq!(driver.frames(), 10);
    // the last frame's counter is still queued
    assert_eq!(driver.pending(), 1);
    assert_eq!(driver.state().dummy_state, "🍵🧉");
    assert_eq!(driver.state().received_events, 1);
    // nine counters were queued (none on the event frame), eight have run
    assert_eq!(driver.state().update_invocations(), 8);
    assert_eq!(driver.state().frame_counter(), 8);
}

struct Waiting {
    rx: Option<oneshot::Receiver<&'static str>>,
}

impl GraphicsFlow<State, &'static str> for Waiting {
    fn on_init(&mut self, _scene: &mut Scene, _state: &mut State) -> Out<State, &'static str> {
        match self.rx.take() {
            Some(rx) => Out::FutEvent(vec![Box::new(async move { rx.await.unwrap_or("cancelled") })]),
            None => Out::Empty,
        }
    }

    fn on_update(&mut self, _scene: &mut Scene, _state: &State, _time: FrameTime) -> Out<State, &'static str> {
        Out::Empty
    }

    fn on_custom_events(
        &mut self,
        _scene: &mut Scene,
        state: &mut State,
        event: &'static str,
    ) -> Option<&'static str> {
        state.dummy_state.push_str(event);
        None
    }
}

#[test]
fn pending_futures_survive_until_ready() {
    let (tx, rx) = oneshot::channel();
    let mut driver: FrameDriver<State, &'static str> = FrameDriver::new(Box::new(Waiting { rx: Some(rx) }));

    run_frames(&mut driver, 0.0, 0.1, 3);
    assert_eq!(driver.pending(), 1);
    assert!(driver.state().dummy_state.is_empty());

    tx.send("corpus").expect("receiver is alive");
    driver.frame(FrameTime::at(1.0));
    assert_eq!(driver.pending(), 0);
    assert_eq!(driver.state().dummy_state, "corpus");
}

#[derive(Debug, Default)]
struct Flags {
    on: bool,
    inputs: Vec<Input>,
}

struct Keys;

impl GraphicsFlow<Flags, ()> for Keys {
    fn panel(&self) -> Panel<Flags> {
        Panel::new().folder(Folder::<Flags>::new("Flags").toggle("on", KeyCode::KeyO, |s| &mut s.on))
    }

    fn buttons(&self) -> Vec<Button> {
        vec![Button::new("next", "Next", KeyCode::KeyN)]
    }

    fn on_init(&mut self, _scene: &mut Scene, _state: &mut Flags) -> Out<Flags, ()> {
        Out::Empty
    }

    fn on_input(&mut self, _scene: &mut Scene, state: &mut Flags, input: &Input) -> Out<Flags, ()> {
        state.inputs.push(*input);
        Out::Empty
    }

    fn on_update(&mut self, _scene: &mut Scene, _state: &Flags, _time: FrameTime) -> Out<Flags, ()> {
        Out::Empty
    }
}

#[test]
fn keys_route_to_buttons_then_panel_then_raw() {
    let mut driver: FrameDriver<Flags, ()> = FrameDriver::new(Box::new(Keys));
    driver.key(KeyCode::KeyN);
    driver.key(KeyCode::KeyO);
    driver.key(KeyCode::KeyZ);

    assert!(driver.state().on);
    assert_eq!(
        driver.state().inputs,
        vec![
            Input::Button("next"),
            Input::Panel("on"),
            Input::Key(KeyCode::KeyZ),
        ]
    );
}

#[test]
fn named_controls_report_unknown_names() {
    let mut driver: FrameDriver<Flags, ()> = FrameDriver::new(Box::new(Keys));
    assert!(driver.press("next"));
    assert!(!driver.press("missing"));
    assert!(driver.set_toggle("on", true));
    assert!(driver.state().on);
    assert!(!driver.set_slider("on", 1.0));
    assert!(!driver.trigger("on"));

    driver.cursor(0.25, -0.5);
    driver.select(true);
    assert_eq!(
        &driver.state().inputs[2..],
        &[Input::Cursor { x: 0.25, y: -0.5 }, Input::Select(true)]
    );
}
