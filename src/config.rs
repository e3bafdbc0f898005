use std::collections::HashMap;

use serde::Deserialize;

use crate::ui::{Action, ButtonBindings, FocusPolicy, PhysicalButton, RepeatTiming};

/// Default location of the menu configuration, relative to the working directory.
pub const MENU_CONFIG_PATH: &str = "data/menu.ron";

/// Tunables read from `data/menu.ron`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Repeat timing applied to every stock widget.
    pub timing: RepeatTiming,
    pub focus: FocusPolicy,
    /// Actions listed here replace their default sources wholesale.
    pub bindings: HashMap<Action, Vec<PhysicalButton>>,
}

impl MenuConfig {
    pub fn button_bindings(&self) -> ButtonBindings {
        ButtonBindings::with_overrides(&self.bindings)
    }
}

/// Parse a RON menu configuration.
pub fn parse_menu_config(src: &str) -> Result<MenuConfig, ron::error::SpannedError> {
    ron::from_str(src)
}

/// Load the menu configuration from a RON file. Logs a warning and returns
/// defaults on failure.
pub fn load_menu_config(path: &str) -> MenuConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default menu config", path, e);
            return MenuConfig::default();
        }
    };
    match parse_menu_config(&content) {
        Ok(config) => {
            log::debug!("loaded menu config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default menu config", path, e);
            MenuConfig::default()
        }
    }
}
