use serde::Deserialize;

use super::keybindings::{Action, Buttons, PhysicalButton};

/// The pair of raw controller masks the host hands the menu each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub current: Buttons,
    pub previous: Buttons,
}

impl ButtonState {
    pub fn new(current: Buttons, previous: Buttons) -> Self {
        Self { current, previous }
    }

    /// Build from the host's untyped masks. Unknown bits are kept.
    pub fn from_raw(current: u32, previous: u32) -> Self {
        Self {
            current: Buttons::from_bits_retain(current),
            previous: Buttons::from_bits_retain(previous),
        }
    }

    /// State for the following frame: this frame's buttons become `previous`.
    pub fn advance(self, current: Buttons) -> Self {
        Self {
            current,
            previous: self.current,
        }
    }

    /// Any of `buttons` is down this frame.
    pub fn held(&self, buttons: Buttons) -> bool {
        self.current.intersects(buttons)
    }

    /// Down this frame and up the frame before.
    pub fn edge(&self, buttons: Buttons) -> bool {
        self.current.intersects(buttons) && !self.previous.intersects(buttons)
    }

    /// Any single source went down this frame.
    pub fn edge_any(&self, sources: &[PhysicalButton]) -> bool {
        sources.iter().any(|s| self.edge(s.mask()))
    }
}

/// Per-widget auto-repeat tuning, in frames.
///
/// A hold re-fires once the shared counter climbs past `scroll_delay`; each
/// fire pays the axis cost, so steady repeats land every `scroll_time_*`
/// frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepeatTiming {
    pub scroll_delay: i32,
    pub scroll_time_vertical: i32,
    pub scroll_time_horizontal: i32,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            scroll_delay: 15,
            scroll_time_vertical: 5,
            scroll_time_horizontal: 5,
        }
    }
}

impl RepeatTiming {
    /// Counter cost of firing `action`. Activate is charged like the
    /// horizontal axis.
    pub fn cost(&self, action: Action) -> i32 {
        match action {
            Action::Up | Action::Down => self.scroll_time_vertical,
            Action::Left | Action::Right | Action::Activate => self.scroll_time_horizontal,
            Action::Back => 0,
        }
    }
}

/// The single hold counter shared by every direction of a menu.
///
/// Deliberately not per-axis: holding Down and then sliding to Right keeps
/// the accumulated count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatCounter {
    button_down_count: i32,
}

impl RepeatCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more held frame, or reset the instant nothing directional is held.
    pub fn observe(&mut self, state: ButtonState, directional: Buttons) {
        if state.held(directional) {
            self.button_down_count = self.button_down_count.saturating_add(1);
        } else {
            self.button_down_count = 0;
        }
    }

    /// Whether an action bound to `sources` fires this frame.
    /// Each source is judged on its own edge; sources are ORed.
    pub fn fired(&self, state: ButtonState, sources: &[PhysicalButton], delay: i32) -> bool {
        sources.iter().any(|s| {
            let bit = s.mask();
            state.held(bit) && (!state.previous.intersects(bit) || self.button_down_count > delay)
        })
    }

    /// Pay for a fire. Subtracts instead of resetting.
    pub fn consume(&mut self, cost: i32) {
        self.button_down_count = self.button_down_count.saturating_sub(cost);
    }

    pub fn count(&self) -> i32 {
        self.button_down_count
    }
}
