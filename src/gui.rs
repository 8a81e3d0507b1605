//! On-screen controls.
//!
//! Each frame the running flow's page buttons and panel folders are laid out
//! as an egui side panel. What the pointer did to them comes back as
//! [`Interaction`]s, which go through the [`FrameDriver`] the same way the
//! keyboard shortcuts do: a clicked button reaches the flow as
//! [`Input::Button`](crate::flow::Input::Button), a changed toggle, slider
//! or action as [`Input::Panel`](crate::flow::Input::Panel).
//!
//! Nothing here touches the GPU; [`GuiRenderer`](crate::render::GuiRenderer)
//! paints the tessellated output.

use std::collections::HashMap;

use crate::{
    flow::{Button, FrameDriver},
    panel::{ControlView, FolderView},
};

/// One pointer interaction with the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Press(&'static str),
    Toggle(&'static str, bool),
    Slide(&'static str, f32),
    Trigger(&'static str),
}

impl Interaction {
    /// Hand the interaction to the flow. Returns `false` if the driver has
    /// no button or control of that name.
    pub fn apply<S, E>(self, driver: &mut FrameDriver<S, E>) -> bool {
        match self {
            Interaction::Press(id) => driver.press(id),
            Interaction::Toggle(name, value) => driver.set_toggle(name, value),
            Interaction::Slide(name, value) => driver.set_slider(name, value),
            Interaction::Trigger(name) => driver.trigger(name),
        }
    }
}

pub struct Overlay {
    ctx: egui::Context,
    rects: HashMap<&'static str, egui::Rect>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            ctx: egui::Context::default(),
            rects: HashMap::new(),
        }
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// Where the button or control called `name` was placed in the last
    /// pass, in points.
    pub fn rect(&self, name: &str) -> Option<egui::Rect> {
        self.rects.get(name).copied()
    }

    /// Whether the pointer is over the overlay or dragging one of its
    /// widgets, so scene picking and orbiting should ignore it.
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    /// Lay out one pass for the driver's buttons and panel, then apply what
    /// the pointer did to them.
    pub fn run<S, E>(&mut self, input: egui::RawInput, driver: &mut FrameDriver<S, E>) -> egui::FullOutput {
        let folders = driver.panel_view();
        let buttons = driver.buttons().to_vec();
        let mut interactions = Vec::new();
        let mut rects = HashMap::new();
        let output = self.ctx.run(input, |ctx| {
            interactions.clear();
            rects.clear();
            if !buttons.is_empty() || !folders.is_empty() {
                layout(ctx, &buttons, &folders, &mut interactions, &mut rects);
            }
        });
        self.rects = rects;
        for interaction in interactions {
            log::debug!("{:?}", interaction);
            if !interaction.apply(driver) {
                log::warn!("{:?} matched nothing", interaction);
            }
        }
        output
    }
}

fn layout(
    ctx: &egui::Context,
    buttons: &[Button],
    folders: &[FolderView],
    out: &mut Vec<Interaction>,
    rects: &mut HashMap<&'static str, egui::Rect>,
) {
    egui::SidePanel::right("controls")
        .resizable(false)
        .show(ctx, |ui| {
            if !buttons.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for button in buttons {
                        let response = ui
                            .button(button.label)
                            .on_hover_text(format!("{:?}", button.key));
                        rects.insert(button.id, response.rect);
                        if response.clicked() {
                            out.push(Interaction::Press(button.id));
                        }
                    }
                });
                ui.separator();
            }
            for folder in folders {
                egui::CollapsingHeader::new(folder.name)
                    .default_open(true)
                    .show(ui, |ui| {
                        for control in &folder.controls {
                            controls(ui, control, out, rects);
                        }
                    });
            }
        });
}

fn controls(
    ui: &mut egui::Ui,
    control: &ControlView,
    out: &mut Vec<Interaction>,
    rects: &mut HashMap<&'static str, egui::Rect>,
) {
    match *control {
        ControlView::Toggle { name, value } => {
            let mut value = value;
            let response = ui.checkbox(&mut value, name);
            rects.insert(name, response.rect);
            if response.changed() {
                out.push(Interaction::Toggle(name, value));
            }
        }
        ControlView::Slider {
            name,
            min,
            max,
            step,
            value,
        } => {
            let mut value = value;
            let response = ui.add(
                egui::Slider::new(&mut value, min..=max)
                    .step_by(step as f64)
                    .text(name),
            );
            rects.insert(name, response.rect);
            if response.changed() {
                out.push(Interaction::Slide(name, value));
            }
        }
        ControlView::Action { name } => {
            let response = ui.button(name);
            rects.insert(name, response.rect);
            if response.clicked() {
                out.push(Interaction::Trigger(name));
            }
        }
    }
}
