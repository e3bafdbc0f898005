//! Headless front-end driver: builds the stock screens over a fixed ROM
//! shelf, replays a scripted controller session and logs what happened.
//!
//! Run with `RUST_LOG=debug` to see focus moves and screen switches.

use vrboy::config::{self, MENU_CONFIG_PATH};
use vrboy::rom::{self, Rom};
use vrboy::ui::demo::{self, FrontEnd, ROM_BROWSER, SETTINGS};
use vrboy::ui::{ApproxMetrics, ButtonState, Buttons, DrawList, ScreenStack, Theme};

const ROM_DIR: &str = "/sdcard/VrBoy/Roms";
const SAVE_DIR: &str = "/sdcard/VrBoy/Saves";

const ROM_FILES: [&str; 12] = [
    "Tetris.gb",
    "Pokemon Gold.gbc",
    "Kirby's Dream Land.gb",
    "Link's Awakening DX.gbc",
    "Metroid II.gb",
    "Super Mario Land.gb",
    "Wario Land 3.gbc",
    "Dr. Mario.gb",
    "Shantae.gbc",
    "Mole Mania.gb",
    "Harvest Moon GBC.gbc",
    "Trip World.gb",
];

/// Controller script: buttons held for a number of frames.
const SCRIPT: &[(Buttons, u32)] = &[
    (Buttons::empty(), 2),
    // Hold down long enough to auto-repeat through the list.
    (Buttons::DPAD_DOWN, 36),
    (Buttons::empty(), 1),
    (Buttons::LSTICK_UP, 1),
    (Buttons::empty(), 1),
    // Open settings, wait out the slide.
    (Buttons::B, 1),
    (Buttons::empty(), 20),
    (Buttons::DPAD_RIGHT, 1),
    (Buttons::empty(), 1),
    (Buttons::LSTICK_RIGHT, 1),
    (Buttons::empty(), 1),
    // Back to the browser and launch.
    (Buttons::B, 1),
    (Buttons::empty(), 20),
    (Buttons::A, 1),
    (Buttons::empty(), 1),
];

/// Apply the requests reactions left on the context.
fn apply_requests(fe: &mut FrontEnd, screens: &mut ScreenStack<FrontEnd>) {
    if let Some(name) = fe.screen_request.take() {
        screens.switch_to(name);
    }
    if let Some(rom) = fe.launched.take() {
        log::info!(
            "start {} ({}), battery save at {}",
            rom.name,
            if rom.is_gbc { "color" } else { "classic" },
            rom.save_path
        );
    }
}

fn main() {
    env_logger::init();

    let menu_config = config::load_menu_config(MENU_CONFIG_PATH);
    let bindings = menu_config.button_bindings();
    let theme = Theme::default();
    let metrics = ApproxMetrics::default();

    let mut roms: Vec<Rom> = ROM_FILES
        .iter()
        .map(|file| Rom::from_path(&format!("{ROM_DIR}/{file}"), SAVE_DIR))
        .collect();
    rom::sort_by_name(&mut roms);
    log::info!("{} roms on the shelf", roms.len());
    let shelf = rom::shelf(roms);

    let mut fe = FrontEnd::default();
    let mut screens = ScreenStack::new(&theme);
    screens.add(
        ROM_BROWSER,
        demo::build_rom_browser(
            shelf,
            &theme,
            &metrics,
            menu_config.timing,
            menu_config.focus,
        ),
    );
    screens.add(
        SETTINGS,
        demo::build_settings(
            &theme,
            &metrics,
            menu_config.timing,
            menu_config.focus,
            fe.palette_name(),
        ),
    );

    let mut state = ButtonState::default();
    let mut draw_list = DrawList::new();

    'session: for &(buttons, frames) in SCRIPT {
        for _ in 0..frames {
            state = state.advance(buttons);
            screens.update(state, &bindings, &mut fe);
            apply_requests(&mut fe, &mut screens);

            draw_list.clear();
            screens.draw(&theme, &mut draw_list);
            log::trace!(
                "frame {}: {} texts, {} quads",
                screens.frame(),
                draw_list.texts.len(),
                draw_list.quads.len()
            );

            if fe.exit_requested {
                log::info!("exit requested");
                break 'session;
            }
        }
    }

    log::info!(
        "session ended on {:?} after {} frames, palette {}",
        screens.active_name().unwrap_or("none"),
        screens.frame(),
        fe.palette_name()
    );
}
