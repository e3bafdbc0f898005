//! Stock front-end screens: the ROM browser and the settings page.
//!
//! Both are plain `Menu`s over a `FrontEnd` host context. Reactions only
//! record requests on the context; the host applies them after the frame
//! (launching a ROM, switching screens).

use crate::rom::{Rom, RomShelf};

use super::draw::{TextMeasure, TextureId};
use super::input::RepeatTiming;
use super::theme::Theme;
use super::widget::{Button, ButtonFace, MenuItem, RomList};
use super::{FocusPolicy, Menu};

pub const ROM_BROWSER: &str = "roms";
pub const SETTINGS: &str = "settings";

/// Selectable display palettes, in cycling order.
pub const PALETTES: [&str; 4] = ["Classic", "Grey", "Pocket", "Light"];

/// Texture the host binds for the browser logo.
pub const LOGO_TEXTURE: TextureId = 1;

/// Screen size the stock layouts are built for.
pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 576.0;

/// Host context for the stock screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontEnd {
    /// ROM chosen in the browser, waiting for the host to start it.
    pub launched: Option<Rom>,
    /// Index into `PALETTES`.
    pub palette: usize,
    /// Screen the host should switch to after this frame.
    pub screen_request: Option<&'static str>,
    pub exit_requested: bool,
}

impl FrontEnd {
    pub fn palette_name(&self) -> &'static str {
        PALETTES[self.palette % PALETTES.len()]
    }

    /// Step the palette by `step`, wrapping.
    pub fn cycle_palette(&mut self, step: isize) {
        let len = PALETTES.len() as isize;
        self.palette = (self.palette as isize + step).rem_euclid(len) as usize;
    }
}

fn palette_text(name: &str) -> String {
    format!("Palette: {name}")
}

/// Header, logo and the ROM list. The list swallows Up/Down, so Back is the
/// way out to the settings page.
pub fn build_rom_browser(
    roms: RomShelf,
    theme: &Theme,
    measure: &dyn TextMeasure,
    timing: RepeatTiming,
    policy: FocusPolicy,
) -> Menu<FrontEnd> {
    let mut menu = Menu::with_policy(policy);
    let margin = 40.0;
    let header_h = 64.0;

    menu.push(MenuItem::label(
        measure,
        "Select a game",
        theme.font_header_size,
        0.0,
        0.0,
        SCREEN_WIDTH,
        header_h,
        theme.text_header,
    ));
    menu.push(MenuItem::image(
        LOGO_TEXTURE,
        margin,
        (header_h - theme.icon_size) / 2.0,
        theme.icon_size,
        theme.icon_size,
        theme.icon_tint,
    ));

    let list_h = SCREEN_HEIGHT - header_h - margin;
    let list = RomList::new(
        roms,
        SCREEN_WIDTH - 2.0 * margin,
        list_h,
        theme.font_body_size,
        theme,
    )
    .on_choose(|rom: &Rom, fe: &mut FrontEnd| {
        log::info!("launching {}", rom.full_path_norm);
        fe.launched = Some(rom.clone());
    });
    menu.push(MenuItem::list(list, margin, header_h).with_timing(timing));

    menu.set_on_back(|fe: &mut FrontEnd| fe.screen_request = Some(SETTINGS));
    menu
}

/// Palette picker, Exit and Back. Back (button or action) returns to the
/// browser.
pub fn build_settings(
    theme: &Theme,
    measure: &dyn TextMeasure,
    timing: RepeatTiming,
    policy: FocusPolicy,
    palette: &str,
) -> Menu<FrontEnd> {
    let mut menu = Menu::with_policy(policy);
    let margin = 40.0;
    let row = theme.list_row_size(theme.font_body_size);
    let mut y = 96.0;

    menu.push(MenuItem::label(
        measure,
        "Settings",
        theme.font_header_size,
        0.0,
        0.0,
        SCREEN_WIDTH,
        64.0,
        theme.text_header,
    ));

    let relabel = |step: isize| {
        move |face: &mut ButtonFace, fe: &mut FrontEnd| {
            fe.cycle_palette(step);
            face.text = palette_text(fe.palette_name());
        }
    };
    let palette_button = Button::new(palette_text(palette), theme.font_body_size)
        .on_left(relabel(-1))
        .on_right(relabel(1))
        .on_activate(relabel(1));
    menu.push(MenuItem::button(palette_button, margin, y).with_timing(timing));
    y += row;

    let back = Button::new("Back", theme.font_body_size).on_activate(
        |_: &mut ButtonFace, fe: &mut FrontEnd| fe.screen_request = Some(ROM_BROWSER),
    );
    menu.push(MenuItem::button(back, margin, y).with_timing(timing));
    y += row;

    let exit = Button::new("Exit", theme.font_body_size)
        .on_activate(|_: &mut ButtonFace, fe: &mut FrontEnd| fe.exit_requested = true);
    menu.push(MenuItem::button(exit, margin, y).with_timing(timing));

    menu.set_on_back(|fe: &mut FrontEnd| fe.screen_request = Some(ROM_BROWSER));
    menu
}
