//! Flow control and application event loop.
//!
//! A "flow" is one demo: it builds a scene once, reacts to input and advances
//! its animations every frame. The [`FrameDriver`] owns the flow together with
//! its scene, interaction state, control panel and pending futures; the winit
//! [`App`] feeds it input and frame times and hands the scene to the renderer.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S, E>`] is the trait every demo implements
//! - [`Out<S, E>`] is the output type for async event handling
//! - [`Input`] is what a flow receives from buttons, the panel and the pointer
//!
//! # Lifecycle
//!
//! 1. `on_init` builds the scene before the first frame
//! 2. window input is translated into [`Input`]s and passed to `on_input`
//! 3. pending futures are polled once per frame; resolved events go to
//!    `on_custom_events`, resolved mutations are applied to the state
//! 4. `on_update` advances animations from the elapsed time
//! 5. the scene is rendered and the next frame is requested

use std::{
    fmt::Debug,
    pin::Pin,
    sync::Arc,
    task::{Context as TaskContext, Poll},
};

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    animation::{Clock, FrameTime},
    config::{SceneConfig, WindowConfig},
    context::Context,
    data_structures::scene_graph::Scene,
    panel::{FolderView, Panel},
    gui::Overlay,
    render::{GuiRenderer, SceneRenderer, ScreenSize},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

///
/// This is the Output Type for every lifecycle hook where the user can pass async work that is
/// resolved without blocking the frame loop.
///
/// `Out::FutEvent` resolves a future of an Event that is handed to `on_custom_events` once it is
/// ready. It has no side effects unless handled.
///
/// `Out::FutFn` resolves a future of a state mutation that is applied as soon as it is ready.
///
/// `Empty` is the default output used when no eventing/futures need to be handled.
///
pub enum Out<S, E> {
    FutEvent(Vec<Box<dyn Future<Output = E>>>),
    FutFn(Vec<Box<dyn Future<Output = Box<dyn FnOnce(&mut S)>>>>),
    Empty,
}

impl<S, E> Default for Out<S, E> {
    fn default() -> Self {
        Self::Empty
    }
}

/// Input delivered to [`GraphicsFlow::on_input`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// A named page button was pressed.
    Button(&'static str),
    /// A panel control changed the state field it is bound to.
    Panel(&'static str),
    /// A key that is bound to neither a button nor a panel control.
    Key(KeyCode),
    /// Cursor position normalised to `[-0.5, 0.5]` with y pointing up.
    Cursor { x: f32, y: f32 },
    /// Primary select started (`true`) or ended (`false`).
    Select(bool),
}

/// A named button triggered by a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    pub id: &'static str,
    pub label: &'static str,
    pub key: KeyCode,
}

impl Button {
    pub const fn new(id: &'static str, label: &'static str, key: KeyCode) -> Self {
        Self { id, label, key }
    }
}

/// Trait for implementing a demo scene.
///
/// `S` is the interaction state: named flags and values written by input and
/// read by `on_update`. `E` is the type of events produced by futures the flow
/// returns through [`Out`].
pub trait GraphicsFlow<S, E> {
    /// Camera, background and orbit set-up the scene is created with.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Controls bound to the state. Logged on start-up.
    fn panel(&self) -> Panel<S> {
        Panel::new()
    }

    /// Named buttons delivered as [`Input::Button`].
    fn buttons(&self) -> Vec<Button> {
        Vec::new()
    }

    /// Build the scene. Called exactly once, before the first frame.
    fn on_init(&mut self, scene: &mut Scene, state: &mut S) -> Out<S, E>;

    /// React to input. Input handlers may write the state and the scene.
    fn on_input(&mut self, _scene: &mut Scene, _state: &mut S, _input: &Input) -> Out<S, E> {
        Out::Empty
    }

    /// Advance the animations. The state is read-only here.
    fn on_update(&mut self, scene: &mut Scene, state: &S, time: FrameTime) -> Out<S, E>;

    /// Handle an event produced by a resolved future.
    ///
    /// Returns the event if it was not consumed.
    fn on_custom_events(&mut self, _scene: &mut Scene, _state: &mut S, event: E) -> Option<E> {
        Some(event)
    }
}

// Dummy impl to make wasm work
impl<State, Event> Debug for dyn GraphicsFlow<State, Event> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

type EventFuture<E> = Pin<Box<dyn Future<Output = E>>>;
type MutationFuture<S> = Pin<Box<dyn Future<Output = Box<dyn FnOnce(&mut S)>>>>;

/// Owns one flow with its scene and state and runs it frame by frame.
///
/// Nothing in here touches the GPU, so the whole input/update cycle can be
/// driven with synthetic [`FrameTime`]s.
pub struct FrameDriver<S, E> {
    flow: Box<dyn GraphicsFlow<S, E>>,
    scene: Scene,
    state: S,
    panel: Panel<S>,
    buttons: Vec<Button>,
    events: Vec<EventFuture<E>>,
    mutations: Vec<MutationFuture<S>>,
    frames: u64,
}

impl<S: Default, E> FrameDriver<S, E> {
    pub fn new(mut flow: Box<dyn GraphicsFlow<S, E>>) -> Self {
        let mut scene = Scene::new(&flow.config());
        let mut state = S::default();
        let panel = flow.panel();
        let buttons = flow.buttons();
        let out = flow.on_init(&mut scene, &mut state);

        let mut driver = Self {
            flow,
            scene,
            state,
            panel,
            buttons,
            events: Vec::new(),
            mutations: Vec::new(),
            frames: 0,
        };
        driver.queue(out);
        if !driver.panel.is_empty() {
            log::info!("controls:\n{}", driver.panel.describe(&mut driver.state));
        }
        for button in &driver.buttons {
            log::info!("button {:?}: {}", button.key, button.label);
        }
        driver
    }
}

impl<S, E> FrameDriver<S, E> {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn panel(&self) -> &Panel<S> {
        &self.panel
    }

    /// Panel folders with the current value of every control.
    pub fn panel_view(&mut self) -> Vec<FolderView> {
        self.panel.view(&mut self.state)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Number of frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Futures that have not resolved yet.
    pub fn pending(&self) -> usize {
        self.events.len() + self.mutations.len()
    }

    fn queue(&mut self, out: Out<S, E>) {
        match out {
            Out::FutEvent(futures) => self.events.extend(futures.into_iter().map(Pin::from)),
            Out::FutFn(futures) => self.mutations.extend(futures.into_iter().map(Pin::from)),
            Out::Empty => (),
        }
    }

    pub fn input(&mut self, input: Input) {
        let out = self.flow.on_input(&mut self.scene, &mut self.state, &input);
        self.queue(out);
    }

    /// Route a key press: buttons first, then panel controls, otherwise the
    /// raw key is passed on.
    pub fn key(&mut self, key: KeyCode) {
        if let Some(button) = self.buttons.iter().find(|b| b.key == key) {
            log::info!("{}", button.label);
            let id = button.id;
            self.input(Input::Button(id));
        } else if let Some(name) = self.panel.handle_key(&mut self.state, key) {
            self.input(Input::Panel(name));
        } else {
            self.input(Input::Key(key));
        }
    }

    /// Press the button with `id`. Returns `false` for unknown ids.
    pub fn press(&mut self, id: &str) -> bool {
        let Some(button) = self.buttons.iter().find(|b| b.id == id) else {
            log::warn!("no button {:?}", id);
            return false;
        };
        let id = button.id;
        self.input(Input::Button(id));
        true
    }

    pub fn set_toggle(&mut self, name: &str, value: bool) -> bool {
        match self.panel.set_toggle(&mut self.state, name, value) {
            Some(name) => {
                self.input(Input::Panel(name));
                true
            }
            None => false,
        }
    }

    pub fn set_slider(&mut self, name: &str, value: f32) -> bool {
        match self.panel.set_slider(&mut self.state, name, value) {
            Some(name) => {
                self.input(Input::Panel(name));
                true
            }
            None => false,
        }
    }

    pub fn trigger(&mut self, name: &str) -> bool {
        match self.panel.trigger(&mut self.state, name) {
            Some(name) => {
                self.input(Input::Panel(name));
                true
            }
            None => false,
        }
    }

    pub fn cursor(&mut self, x: f32, y: f32) {
        self.input(Input::Cursor { x, y });
    }

    pub fn select(&mut self, active: bool) {
        self.input(Input::Select(active));
    }

    /// Rotate the orbit controls, if the scene has them, by a mouse movement
    /// in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let scene = &mut self.scene;
        if let Some(orbit) = &mut scene.orbit {
            orbit.sync(&scene.camera);
            orbit.rotate(dx, dy);
            orbit.apply(&mut scene.camera);
        }
    }

    pub fn zoom(&mut self, lines: f32) {
        let scene = &mut self.scene;
        if let Some(orbit) = &mut scene.orbit {
            orbit.sync(&scene.camera);
            orbit.zoom(lines);
            orbit.apply(&mut scene.camera);
        }
    }

    /// Poll every pending future once without blocking.
    pub fn poll(&mut self) {
        if self.events.is_empty() && self.mutations.is_empty() {
            return;
        }
        let mut cx = TaskContext::from_waker(futures::task::noop_waker_ref());

        let mut resolved = Vec::new();
        self.events.retain_mut(|future| match future.as_mut().poll(&mut cx) {
            Poll::Ready(event) => {
                resolved.push(event);
                false
            }
            Poll::Pending => true,
        });
        let mut mutations = Vec::new();
        self.mutations.retain_mut(|future| match future.as_mut().poll(&mut cx) {
            Poll::Ready(mutation) => {
                mutations.push(mutation);
                false
            }
            Poll::Pending => true,
        });

        for mutation in mutations {
            mutation(&mut self.state);
        }
        for event in resolved {
            if self
                .flow
                .on_custom_events(&mut self.scene, &mut self.state, event)
                .is_some()
            {
                log::warn!("Warning! Custom event was not consumed this cycle");
            }
        }
    }

    /// Run one frame: resolve what is ready, then advance the animations.
    pub fn frame(&mut self, time: FrameTime) {
        self.poll();
        let out = self.flow.on_update(&mut self.scene, &self.state, time);
        self.queue(out);
        self.frames += 1;
    }
}

/// GPU bundle: context, renderers, overlay input state and surface status.
pub struct AppState {
    pub(crate) ctx: Context,
    renderer: SceneRenderer,
    gui: GuiRenderer,
    egui_input: egui_winit::State,
    is_surface_configured: bool,
}

impl Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("ctx", &self.ctx)
            .field("is_surface_configured", &self.is_surface_configured)
            .finish_non_exhaustive()
    }
}

impl AppState {
    async fn new(window: Arc<Window>, egui_ctx: egui::Context) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let renderer = SceneRenderer::new();
        let gui = GuiRenderer::new(&ctx.gpu);
        let egui_input = egui_winit::State::new(
            egui_ctx,
            egui::ViewportId::ROOT,
            &*ctx.window,
            Some(ctx.window.scale_factor() as f32),
            ctx.window.theme(),
            Some(ctx.gpu.device.limits().max_texture_dimension_2d as usize),
        );
        Ok(Self {
            ctx,
            renderer,
            gui,
            egui_input,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.resize(width, height);
            self.is_surface_configured = true;
        }
    }

    fn render(
        &mut self,
        scene: &Scene,
        primitives: &[egui::ClippedPrimitive],
        textures: &egui::TexturesDelta,
        pixels_per_point: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Texture uploads must not be skipped, egui sends the font atlas once
        self.gui.update_textures(&self.ctx.gpu, textures);

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.draw(&self.ctx.gpu, &view, scene);
        self.gui.draw(
            &self.ctx.gpu,
            &view,
            primitives,
            ScreenSize {
                width: self.ctx.config.width,
                height: self.ctx.config.height,
                pixels_per_point,
            },
        );
        output.present();
        Ok(())
    }
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(AppState),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
        }
    }
}

pub struct App<State: 'static, Event: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    window_config: WindowConfig,
    state: Option<AppState>,
    driver: FrameDriver<State, Event>,
    overlay: Overlay,
    clock: Clock,
    right_pressed: bool,
}

impl<State: Default, Event> App<State, Event> {
    fn new(
        event_loop: &EventLoop<FlowEvent>,
        flow: Box<dyn GraphicsFlow<State, Event>>,
        window_config: WindowConfig,
    ) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            window_config,
            state: None,
            driver: FrameDriver::new(flow),
            overlay: Overlay::new(),
            clock: Clock::start(),
            right_pressed: false,
        })
    }

    fn frame(&mut self) {
        let time = self.clock.tick();
        let Some(state) = &mut self.state else {
            return;
        };

        // overlay clicks are input, so they land before the update
        let input = state.egui_input.take_egui_input(&state.ctx.window);
        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = self.overlay.run(input, &mut self.driver);
        state
            .egui_input
            .handle_platform_output(&state.ctx.window, platform_output);
        let primitives = self.overlay.context().tessellate(shapes, pixels_per_point);

        {
            // reqwest futures need a reactor while they are polled
            #[cfg(not(target_arch = "wasm32"))]
            let _guard = self.async_runtime.enter();
            self.driver.frame(time);
        }

        match state.render(self.driver.scene(), &primitives, &textures_delta, pixels_per_point) {
            Ok(()) => (),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
            }
        }
        state.gui.free_textures(&textures_delta);
    }
}

impl<State: 'static + Default, Event: 'static> ApplicationHandler<FlowEvent> for App<State, Event> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create the main window: {}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self
                .async_runtime
                .block_on(AppState::new(window, self.overlay.context().clone()))
            {
                Ok(state) => {
                    state.ctx.window.request_redraw();
                    self.state = Some(state);
                }
                Err(e) => {
                    log::error!("App initialization failed. Cannot create the main context: {}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            let egui_ctx = self.overlay.context().clone();
            wasm_bindgen_futures::spawn_local(async move {
                match AppState::new(window, egui_ctx).await {
                    Ok(state) => {
                        if proxy.send_event(FlowEvent::Initialized(state)).is_err() {
                            log::error!("Event loop was closed before the context was ready");
                        }
                    }
                    Err(e) => log::error!("Cannot create the main context: {}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(mut state) => {
                // This is the message from our wasm `spawn_local`
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.right_pressed {
                self.driver.orbit(dx as f32, dy as f32);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        // the overlay sees every event first; it has no text fields, so keys
        // stay shortcuts even while one of its widgets has focus
        let consumed = match &mut self.state {
            Some(state) => {
                state
                    .egui_input
                    .on_window_event(&state.ctx.window, &event)
                    .consumed
            }
            None => false,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.frame(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                #[cfg(not(target_arch = "wasm32"))]
                KeyCode::Escape => event_loop.exit(),
                code => self.driver.key(code),
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(state) = &self.state {
                    let size = state.ctx.window.inner_size();
                    if size.width > 0 && size.height > 0 {
                        let x = position.x as f32 / size.width as f32 - 0.5;
                        let y = -(position.y as f32) / size.height as f32 + 0.5;
                        self.driver.cursor(x, y);
                    }
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let pressed = button_state.is_pressed();
                // a press on the overlay belongs to the overlay; releases
                // always go through so a drag can end anywhere
                if pressed && (consumed || self.overlay.wants_pointer()) {
                    return;
                }
                match button {
                    MouseButton::Left => self.driver.select(pressed),
                    MouseButton::Right => self.right_pressed = pressed,
                    _ => (),
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 50.0,
                };
                self.driver.zoom(lines);
            }
            _ => {}
        }
    }
}

/// Open a window and run `flow` until the window is closed.
pub fn run<State: 'static + Default, Event: 'static>(
    flow: Box<dyn GraphicsFlow<State, Event>>,
    window: WindowConfig,
) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let mut app: App<State, Event> = App::new(&event_loop, flow, window)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
