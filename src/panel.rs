//! Control panel bound to demo state.
//!
//! A panel is a list of folders holding toggles, sliders and actions. Each
//! control is bound to a field of the demo state through a plain accessor
//! function and to one or two keyboard shortcuts. The on-screen overlay
//! draws a [`Panel::view`] snapshot and sets controls by name; a shortcut
//! changes the same field. Either way the new value is logged and the
//! control name is reported back so the demo can sync scene objects that
//! mirror the field (material visibility, wireframe, object height).

use std::fmt::Write;

use winit::keyboard::KeyCode;

pub enum Control<S> {
    Toggle {
        name: &'static str,
        key: KeyCode,
        field: fn(&mut S) -> &mut bool,
    },
    Slider {
        name: &'static str,
        min: f32,
        max: f32,
        step: f32,
        decrease: KeyCode,
        increase: KeyCode,
        field: fn(&mut S) -> &mut f32,
    },
    Action {
        name: &'static str,
        key: KeyCode,
        run: fn(&mut S),
    },
}

impl<S> Control<S> {
    pub fn name(&self) -> &'static str {
        match self {
            Control::Toggle { name, .. }
            | Control::Slider { name, .. }
            | Control::Action { name, .. } => name,
        }
    }
}

/// A control together with the current value of its field.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlView {
    Toggle {
        name: &'static str,
        value: bool,
    },
    Slider {
        name: &'static str,
        min: f32,
        max: f32,
        step: f32,
        value: f32,
    },
    Action {
        name: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FolderView {
    pub name: &'static str,
    pub controls: Vec<ControlView>,
}

pub struct Folder<S> {
    pub name: &'static str,
    pub controls: Vec<Control<S>>,
}

impl<S> Folder<S> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            controls: Vec::new(),
        }
    }

    pub fn toggle(mut self, name: &'static str, key: KeyCode, field: fn(&mut S) -> &mut bool) -> Self {
        self.controls.push(Control::Toggle { name, key, field });
        self
    }

    /// A slider moved by `step` with `decrease`/`increase`, clamped into
    /// `[min, max]`.
    pub fn slider(
        mut self,
        name: &'static str,
        (min, max, step): (f32, f32, f32),
        decrease: KeyCode,
        increase: KeyCode,
        field: fn(&mut S) -> &mut f32,
    ) -> Self {
        self.controls.push(Control::Slider {
            name,
            min,
            max,
            step,
            decrease,
            increase,
            field,
        });
        self
    }

    pub fn action(mut self, name: &'static str, key: KeyCode, run: fn(&mut S)) -> Self {
        self.controls.push(Control::Action { name, key, run });
        self
    }
}

pub struct Panel<S> {
    folders: Vec<Folder<S>>,
}

impl<S> Default for Panel<S> {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
        }
    }
}

impl<S> Panel<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(mut self, folder: Folder<S>) -> Self {
        self.folders.push(folder);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.folders.iter().all(|f| f.controls.is_empty())
    }

    pub fn folders(&self) -> &[Folder<S>] {
        &self.folders
    }

    fn controls(&self) -> impl Iterator<Item = &Control<S>> {
        self.folders.iter().flat_map(|f| f.controls.iter())
    }

    fn find(&self, name: &str) -> Option<&Control<S>> {
        self.controls().find(|c| c.name() == name)
    }

    /// Apply the control bound to `key`. Returns the name of the control that
    /// changed.
    pub fn handle_key(&self, state: &mut S, key: KeyCode) -> Option<&'static str> {
        let control = self.controls().find(|c| match c {
            Control::Toggle { key: k, .. } | Control::Action { key: k, .. } => *k == key,
            Control::Slider {
                decrease, increase, ..
            } => *decrease == key || *increase == key,
        })?;
        match control {
            Control::Toggle { name, field, .. } => {
                let value = field(state);
                *value = !*value;
                log::info!("{}: {}", name, value);
            }
            Control::Slider {
                name,
                min,
                max,
                step,
                decrease,
                field,
                ..
            } => {
                let value = field(state);
                let delta = if *decrease == key { -step } else { *step };
                *value = (*value + delta).clamp(*min, *max);
                log::info!("{}: {:.2}", name, value);
            }
            Control::Action { name, run, .. } => {
                run(state);
                log::info!("{}", name);
            }
        }
        Some(control.name())
    }

    /// Set a toggle by name. Returns `None` if there is no such toggle.
    pub fn set_toggle(&self, state: &mut S, name: &str, value: bool) -> Option<&'static str> {
        match self.find(name)? {
            Control::Toggle { name, field, .. } => {
                *field(state) = value;
                log::info!("{}: {}", name, value);
                Some(*name)
            }
            _ => None,
        }
    }

    /// Set a slider by name, clamped into its range. Returns `None` if there
    /// is no such slider.
    pub fn set_slider(&self, state: &mut S, name: &str, value: f32) -> Option<&'static str> {
        match self.find(name)? {
            Control::Slider {
                name,
                field,
                min,
                max,
                ..
            } => {
                let value = value.clamp(*min, *max);
                *field(state) = value;
                log::info!("{}: {:.2}", name, value);
                Some(*name)
            }
            _ => None,
        }
    }

    /// Run an action by name. Returns `None` if there is no such action.
    pub fn trigger(&self, state: &mut S, name: &str) -> Option<&'static str> {
        match self.find(name)? {
            Control::Action { name, run, .. } => {
                run(state);
                log::info!("{}", name);
                Some(*name)
            }
            _ => None,
        }
    }

    /// Every folder with the current value of each control.
    pub fn view(&self, state: &mut S) -> Vec<FolderView> {
        self.folders
            .iter()
            .map(|folder| FolderView {
                name: folder.name,
                controls: folder
                    .controls
                    .iter()
                    .map(|control| match control {
                        Control::Toggle { name, field, .. } => ControlView::Toggle {
                            name: *name,
                            value: *field(state),
                        },
                        Control::Slider {
                            name,
                            min,
                            max,
                            step,
                            field,
                            ..
                        } => ControlView::Slider {
                            name: *name,
                            min: *min,
                            max: *max,
                            step: *step,
                            value: *field(state),
                        },
                        Control::Action { name, .. } => ControlView::Action { name: *name },
                    })
                    .collect(),
            })
            .collect()
    }

    /// Human-readable listing of every control, its keys and current value.
    pub fn describe(&self, state: &mut S) -> String {
        let mut out = String::new();
        for folder in &self.folders {
            let _ = writeln!(out, "[{}]", folder.name);
            for control in &folder.controls {
                let _ = match control {
                    Control::Toggle { name, key, field } => {
                        writeln!(out, "  {:?}  {} = {}", key, name, field(state))
                    }
                    Control::Slider {
                        name,
                        min,
                        max,
                        decrease,
                        increase,
                        field,
                        ..
                    } => writeln!(
                        out,
                        "  {:?}/{:?}  {} = {:.2} ({}..{})",
                        decrease,
                        increase,
                        name,
                        field(state),
                        min,
                        max
                    ),
                    Control::Action { name, key, .. } => writeln!(out, "  {:?}  {}", key, name),
                };
            }
        }
        out
    }
}
