//! Materials and colours.

/// Linear RGB.
pub type Colour = [f32; 3];

/// Handle to a material registered in a [`Scene`](super::scene_graph::Scene).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) usize);

/// How a surface is coloured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Surface normals mapped to RGB, no lighting.
    Normal,
    /// Diffuse colour lit by the scene lights.
    Standard,
    /// Flat colour, no lighting.
    Basic,
    /// Self-lit colour.
    Emissive,
}

impl Shading {
    /// Value handed to the shader in the instance data.
    pub fn code(self) -> f32 {
        match self {
            Shading::Normal => 0.0,
            Shading::Standard => 1.0,
            Shading::Basic => 2.0,
            Shading::Emissive => 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub colour: Colour,
    /// Draw the edges of the geometry instead of its faces.
    pub wireframe: bool,
    /// Hides every object using this material.
    pub visible: bool,
}

impl Material {
    pub fn normal() -> Self {
        Self {
            shading: Shading::Normal,
            colour: [1.0; 3],
            wireframe: false,
            visible: true,
        }
    }

    pub fn standard(colour: Colour) -> Self {
        Self {
            shading: Shading::Standard,
            colour,
            ..Self::normal()
        }
    }

    pub fn basic(colour: Colour) -> Self {
        Self {
            shading: Shading::Basic,
            colour,
            ..Self::normal()
        }
    }

    pub fn emissive(colour: Colour) -> Self {
        Self {
            shading: Shading::Emissive,
            colour,
            ..Self::normal()
        }
    }

    pub fn wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::normal()
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` sRGB to linear RGB.
pub fn hex(rgb: u32) -> Colour {
    let channel = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

/// The CSS colour names the scenes use.
pub fn named(name: &str) -> Option<Colour> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "white" => 0xffffff,
        "black" => 0x000000,
        "red" => 0xff0000,
        "green" => 0x008000,
        "blue" => 0x0000ff,
        "orange" => 0xffa500,
        "pink" => 0xffc0cb,
        "aqua" => 0x00ffff,
        "gray" | "grey" => 0x808080,
        _ => return None,
    };
    Some(hex(rgb))
}
