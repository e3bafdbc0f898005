/// Opaque texture handle owned by the host renderer.
pub type TextureId = u32;

/// Intermediate draw command for a textured or flat quad.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCommand {
    /// `None` draws a flat-colored quad.
    pub texture: Option<TextureId>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4], // sRGB RGBA, alpha already faded
}

/// Intermediate draw command for a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: [f32; 4], // sRGB RGBA, alpha already faded
    pub font_size: f32,
}

/// Collects draw commands from a menu.
/// Decouples widget logic from the host's texture submission.
#[derive(Debug, Default)]
pub struct DrawList {
    pub quads: Vec<QuadCommand>,
    pub texts: Vec<TextCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            quads: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.quads.clear();
        self.texts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.texts.is_empty()
    }
}

/// Text measurement service. Used once, when a label is centred.
pub trait TextMeasure {
    /// Rendered width of `text` at `font_size`, in pixels.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed-advance estimate: every glyph is `glyph_ratio * font_size` wide.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMetrics {
    pub glyph_ratio: f32,
}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self { glyph_ratio: 0.6 }
    }
}

impl TextMeasure for ApproxMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.glyph_ratio
    }
}

/// Scale a color's alpha by `transparency` (clamped to [0, 1]).
pub fn fade(color: [f32; 4], transparency: f32) -> [f32; 4] {
    [
        color[0],
        color[1],
        color[2],
        color[3] * transparency.clamp(0.0, 1.0),
    ]
}
