use std::collections::HashMap;

use bitflags::bitflags;
use serde::Deserialize;
use smallvec::{SmallVec, smallvec};

bitflags! {
    /// Raw controller state as delivered by the host once per frame.
    /// Bit layout follows the VR runtime's button enumeration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const START = 1 << 4;
        const BACK = 1 << 5;
        const SELECT = 1 << 6;
        const MENU = 1 << 7;
        const RIGHT_TRIGGER = 1 << 8;
        const LEFT_TRIGGER = 1 << 9;
        const DPAD_UP = 1 << 10;
        const DPAD_DOWN = 1 << 11;
        const DPAD_LEFT = 1 << 12;
        const DPAD_RIGHT = 1 << 13;
        const LSTICK_UP = 1 << 14;
        const LSTICK_DOWN = 1 << 15;
        const LSTICK_LEFT = 1 << 16;
        const LSTICK_RIGHT = 1 << 17;
        const RSTICK_UP = 1 << 18;
        const RSTICK_DOWN = 1 << 19;
        const RSTICK_LEFT = 1 << 20;
        const RSTICK_RIGHT = 1 << 21;
        const TOUCH_SINGLE = 1 << 22;
        const TOUCH_DOUBLE = 1 << 23;
    }
}

/// A single physical input source. Named so bindings can be written in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PhysicalButton {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    Select,
    Menu,
    RightTrigger,
    LeftTrigger,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LstickUp,
    LstickDown,
    LstickLeft,
    LstickRight,
    RstickUp,
    RstickDown,
    RstickLeft,
    RstickRight,
    TouchSingle,
    TouchDouble,
}

impl PhysicalButton {
    /// Bit for this source in the raw controller mask.
    pub const fn mask(self) -> Buttons {
        match self {
            PhysicalButton::A => Buttons::A,
            PhysicalButton::B => Buttons::B,
            PhysicalButton::X => Buttons::X,
            PhysicalButton::Y => Buttons::Y,
            PhysicalButton::Start => Buttons::START,
            PhysicalButton::Back => Buttons::BACK,
            PhysicalButton::Select => Buttons::SELECT,
            PhysicalButton::Menu => Buttons::MENU,
            PhysicalButton::RightTrigger => Buttons::RIGHT_TRIGGER,
            PhysicalButton::LeftTrigger => Buttons::LEFT_TRIGGER,
            PhysicalButton::DpadUp => Buttons::DPAD_UP,
            PhysicalButton::DpadDown => Buttons::DPAD_DOWN,
            PhysicalButton::DpadLeft => Buttons::DPAD_LEFT,
            PhysicalButton::DpadRight => Buttons::DPAD_RIGHT,
            PhysicalButton::LstickUp => Buttons::LSTICK_UP,
            PhysicalButton::LstickDown => Buttons::LSTICK_DOWN,
            PhysicalButton::LstickLeft => Buttons::LSTICK_LEFT,
            PhysicalButton::LstickRight => Buttons::LSTICK_RIGHT,
            PhysicalButton::RstickUp => Buttons::RSTICK_UP,
            PhysicalButton::RstickDown => Buttons::RSTICK_DOWN,
            PhysicalButton::RstickLeft => Buttons::RSTICK_LEFT,
            PhysicalButton::RstickRight => Buttons::RSTICK_RIGHT,
            PhysicalButton::TouchSingle => Buttons::TOUCH_SINGLE,
            PhysicalButton::TouchDouble => Buttons::TOUCH_DOUBLE,
        }
    }
}

/// Logical menu actions. The menu never looks at raw bits directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    /// Confirm / press the focused widget.
    Activate,
    /// Cancel. Routed to the menu, never to the focused widget.
    Back,
}

impl Action {
    /// Actions whose hold feeds the shared repeat counter.
    pub const DIRECTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];
}

/// Physical sources bound to one action. Two is the common case (stick + pad).
pub type Sources = SmallVec<[PhysicalButton; 2]>;

/// Configurable mapping from logical actions to physical buttons.
#[derive(Debug, Clone)]
pub struct ButtonBindings {
    map: HashMap<Action, Sources>,
}

impl ButtonBindings {
    /// Stick and d-pad both steer, A confirms, B goes back.
    pub fn defaults() -> Self {
        let mut map = HashMap::new();

        map.insert(
            Action::Up,
            smallvec![PhysicalButton::LstickUp, PhysicalButton::DpadUp],
        );
        map.insert(
            Action::Down,
            smallvec![PhysicalButton::LstickDown, PhysicalButton::DpadDown],
        );
        map.insert(
            Action::Left,
            smallvec![PhysicalButton::LstickLeft, PhysicalButton::DpadLeft],
        );
        map.insert(
            Action::Right,
            smallvec![PhysicalButton::LstickRight, PhysicalButton::DpadRight],
        );
        map.insert(Action::Activate, smallvec![PhysicalButton::A]);
        map.insert(Action::Back, smallvec![PhysicalButton::B]);

        Self { map }
    }

    /// Defaults with the given actions replaced wholesale.
    pub fn with_overrides(overrides: &HashMap<Action, Vec<PhysicalButton>>) -> Self {
        let mut bindings = Self::defaults();
        for (&action, sources) in overrides {
            bindings.rebind(action, sources.iter().copied());
        }
        bindings
    }

    /// Replace the sources of one action. An empty list unbinds it.
    pub fn rebind(&mut self, action: Action, sources: impl IntoIterator<Item = PhysicalButton>) {
        let sources: Sources = sources.into_iter().collect();
        log::debug!("rebinding {action:?} to {sources:?}");
        self.map.insert(action, sources);
    }

    /// Physical sources for an action, in binding order.
    pub fn sources(&self, action: Action) -> &[PhysicalButton] {
        self.map.get(&action).map(|s| s.as_slice()).unwrap_or(&[])
    }

    /// Union of all bits bound to an action.
    pub fn mask(&self, action: Action) -> Buttons {
        self.sources(action)
            .iter()
            .fold(Buttons::empty(), |acc, s| acc | s.mask())
    }

    /// Union of the four directional bindings.
    pub fn directional_mask(&self) -> Buttons {
        Action::DIRECTIONS
            .iter()
            .fold(Buttons::empty(), |acc, &a| acc | self.mask(a))
    }

    /// Display label for an action's sources (e.g. "Stick Up/D-Pad Up").
    pub fn label_for(&self, action: Action) -> Option<String> {
        let sources = self.sources(action);
        if sources.is_empty() {
            return None;
        }
        let parts: Vec<&str> = sources.iter().map(|&s| button_name(s)).collect();
        Some(parts.join("/"))
    }
}

impl Default for ButtonBindings {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Human-readable name for a physical button.
fn button_name(button: PhysicalButton) -> &'static str {
    match button {
        PhysicalButton::A => "A",
        PhysicalButton::B => "B",
        PhysicalButton::X => "X",
        PhysicalButton::Y => "Y",
        PhysicalButton::Start => "Start",
        PhysicalButton::Back => "Back",
        PhysicalButton::Select => "Select",
        PhysicalButton::Menu => "Menu",
        PhysicalButton::RightTrigger => "RT",
        PhysicalButton::LeftTrigger => "LT",
        PhysicalButton::DpadUp => "D-Pad Up",
        PhysicalButton::DpadDown => "D-Pad Down",
        PhysicalButton::DpadLeft => "D-Pad Left",
        PhysicalButton::DpadRight => "D-Pad Right",
        PhysicalButton::LstickUp => "Stick Up",
        PhysicalButton::LstickDown => "Stick Down",
        PhysicalButton::LstickLeft => "Stick Left",
        PhysicalButton::LstickRight => "Stick Right",
        PhysicalButton::RstickUp => "R-Stick Up",
        PhysicalButton::RstickDown => "R-Stick Down",
        PhysicalButton::RstickLeft => "R-Stick Left",
        PhysicalButton::RstickRight => "R-Stick Right",
        PhysicalButton::TouchSingle => "Tap",
        PhysicalButton::TouchDouble => "Double Tap",
    }
}
