/// Centralized visual style constants for the front-end menus.
///
/// Single theme, no runtime switching. Widgets read from Theme at
/// construction time (geometry) and at draw time (colors).
#[derive(Debug, Clone)]
pub struct Theme {
    // -- Color palette (sRGB RGBA) --
    /// Idle text: #C8D0B8
    pub text_normal: [f32; 4],
    /// Focused widget / list cursor under focus: #9BBC0F
    pub text_selected: [f32; 4],
    /// List cursor while the list itself is not focused: #8BAC0F at 60%
    pub text_cursor_idle: [f32; 4],
    /// Headings: #E0F8D0
    pub text_header: [f32; 4],
    /// Tint applied to button icons.
    pub icon_tint: [f32; 4],

    // -- Font defaults --
    /// Header font size in pixels.
    pub font_header_size: f32,
    /// Body / list font size in pixels.
    pub font_body_size: f32,

    // -- Button defaults --
    /// Square icon edge in pixels.
    pub icon_size: f32,
    /// Gap between icon and button text in pixels.
    pub icon_gap: f32,

    // -- List defaults --
    /// Added to the font size to get the row height.
    pub list_row_padding: f32,
    /// Text baseline offset inside a row.
    pub list_text_offset_y: f32,
    /// Horizontal text inset from the list's left edge.
    pub list_text_inset_x: f32,
    /// Scrollbar width in pixels.
    pub scrollbar_width: f32,
    /// Minimum scrollbar thumb height in pixels.
    pub scrollbar_min_thumb: f32,
    /// Scrollbar track color.
    pub scrollbar_track: [f32; 4],
    /// Scrollbar thumb color.
    pub scrollbar_thumb: [f32; 4],

    // -- Screen transitions --
    /// Length of a screen switch in frames.
    pub transition_frames: u32,
    /// Horizontal travel of a sliding screen in pixels.
    pub slide_distance: f32,
}

/// Convert a hex color (#RRGGBB) to sRGB [f32; 4] with alpha 1.0.
const fn hex(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Convert a hex color with custom alpha.
const fn hex_a(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_normal: hex(0xC8, 0xD0, 0xB8),
            text_selected: hex(0x9B, 0xBC, 0x0F),
            text_cursor_idle: hex_a(0x8B, 0xAC, 0x0F, 0.6),
            text_header: hex(0xE0, 0xF8, 0xD0),
            icon_tint: hex(0xFF, 0xFF, 0xFF),

            font_header_size: 32.0,
            font_body_size: 22.0,

            icon_size: 28.0,
            icon_gap: 10.0,

            list_row_padding: 14.0,
            list_text_offset_y: 7.0,
            list_text_inset_x: 4.0,
            scrollbar_width: 12.0,
            scrollbar_min_thumb: 20.0,
            scrollbar_track: hex_a(0x30, 0x38, 0x28, 0.6),
            scrollbar_thumb: hex_a(0x9B, 0xBC, 0x0F, 0.8),

            transition_frames: 15,
            slide_distance: 240.0,
        }
    }
}

impl Theme {
    /// Row height for a list using `font_size`.
    pub fn list_row_size(&self, font_size: f32) -> f32 {
        font_size + self.list_row_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion() {
        let white = hex(0xFF, 0xFF, 0xFF);
        assert!((white[0] - 1.0).abs() < 0.001);
        assert!((white[3] - 1.0).abs() < 0.001);

        let black = hex(0x00, 0x00, 0x00);
        assert!(black[0].abs() < 0.001);
        assert!(black[2].abs() < 0.001);

        let half_alpha = hex_a(0x80, 0x80, 0x80, 0.5);
        assert!((half_alpha[3] - 0.5).abs() < 0.001);
    }

    #[test]
    fn selected_differs_from_normal() {
        let t = Theme::default();
        assert_ne!(t.text_selected, t.text_normal);
        assert!(t.text_cursor_idle[3] < 1.0);
    }

    #[test]
    fn row_size_adds_padding() {
        let t = Theme::default();
        assert!((t.list_row_size(22.0) - 36.0).abs() < 1e-6);
    }
}
