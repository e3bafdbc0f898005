use super::animation::{Animator, Easing};
use super::draw::DrawList;
use super::input::ButtonState;
use super::keybindings::ButtonBindings;
use super::theme::Theme;
use super::Menu;

const SLIDE: &str = "screen_slide";
const FADE: &str = "screen_fade";

/// Named menus, one active, with a slide/fade between them on switch.
///
/// During a transition the incoming menu is already active but sees an
/// all-released controller; the outgoing menu is drawn only.
pub struct ScreenStack<C> {
    screens: Vec<(String, Menu<C>)>,
    active: usize,
    outgoing: Option<usize>,
    /// +1 slides in from the right (forward), -1 from the left (back).
    direction: f32,
    animator: Animator,
    frame: u64,
    transition_frames: u32,
    slide_distance: f32,
}

impl<C> ScreenStack<C> {
    pub fn new(theme: &Theme) -> Self {
        Self {
            screens: Vec::new(),
            active: 0,
            outgoing: None,
            direction: 1.0,
            animator: Animator::new(),
            frame: 0,
            transition_frames: theme.transition_frames,
            slide_distance: theme.slide_distance,
        }
    }

    /// Register a screen. The first one added starts active. A name that is
    /// already taken replaces that screen's menu.
    pub fn add(&mut self, name: impl Into<String>, menu: Menu<C>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.screens[i].1 = menu,
            None => self.screens.push((name, menu)),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.screens.iter().position(|(n, _)| n == name)
    }

    /// Start a transition to `name`. Screens registered later slide in from
    /// the right, earlier ones from the left. Returns false for an unknown
    /// name or the screen already active.
    pub fn switch_to(&mut self, name: &str) -> bool {
        let Some(target) = self.position(name) else {
            log::warn!("unknown screen {name:?}");
            return false;
        };
        if target == self.active {
            return false;
        }
        log::debug!("screen {} -> {}", self.screens[self.active].0, name);
        self.direction = if target > self.active { 1.0 } else { -1.0 };
        self.outgoing = Some(self.active);
        self.active = target;
        self.animator.start(
            SLIDE,
            0.0,
            1.0,
            self.transition_frames,
            Easing::EaseOut,
            self.frame,
        );
        self.animator.start(
            FADE,
            0.0,
            1.0,
            self.transition_frames,
            Easing::Linear,
            self.frame,
        );
        true
    }

    pub fn active_name(&self) -> Option<&str> {
        self.screens.get(self.active).map(|(n, _)| n.as_str())
    }

    pub fn active(&self) -> Option<&Menu<C>> {
        self.screens.get(self.active).map(|(_, m)| m)
    }

    pub fn active_mut(&mut self) -> Option<&mut Menu<C>> {
        self.screens.get_mut(self.active).map(|(_, m)| m)
    }

    pub fn menu(&self, name: &str) -> Option<&Menu<C>> {
        self.position(name).map(|i| &self.screens[i].1)
    }

    pub fn menu_mut(&mut self, name: &str) -> Option<&mut Menu<C>> {
        self.position(name).map(|i| &mut self.screens[i].1)
    }

    pub fn is_transitioning(&self) -> bool {
        self.outgoing.is_some()
    }

    /// Frames elapsed since creation.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Eased slide progress in [0, 1]; 1 when idle.
    fn slide(&self) -> f32 {
        self.animator.get(SLIDE, self.frame).unwrap_or(1.0)
    }

    /// Opacity of the incoming screen, linear in frames; 1 when idle.
    fn fade(&self) -> f32 {
        self.animator.get(FADE, self.frame).unwrap_or(1.0)
    }

    /// Drive the active menu for one frame. Input is dropped while a
    /// transition runs.
    pub fn update(&mut self, buttons: ButtonState, bindings: &ButtonBindings, ctx: &mut C) {
        let buttons = if self.is_transitioning() {
            ButtonState::default()
        } else {
            buttons
        };
        if let Some((_, menu)) = self.screens.get_mut(self.active) {
            menu.update(buttons, bindings, ctx);
        }

        self.frame += 1;
        if !self.animator.is_active(SLIDE, self.frame) {
            self.outgoing = None;
        }
        self.animator.gc(self.frame);
    }

    /// Draw the active menu and, mid-transition, the outgoing one.
    pub fn draw(&self, theme: &Theme, out: &mut DrawList) {
        let p = self.slide();
        let alpha = self.fade();
        if let Some((_, menu)) = self.outgoing.and_then(|i| self.screens.get(i)) {
            menu.draw(-self.direction * self.slide_distance * p, 1.0 - alpha, theme, out);
        }
        if let Some((_, menu)) = self.screens.get(self.active) {
            let offset = if self.is_transitioning() {
                self.direction * self.slide_distance * (1.0 - p)
            } else {
                0.0
            };
            menu.draw(offset, alpha, theme, out);
        }
    }
}
