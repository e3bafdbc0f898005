mod animation;
pub mod demo;
mod draw;
mod input;
mod keybindings;
mod screens;
mod scroll;
mod theme;
mod widget;

pub use animation::{Animator, Easing};
pub use draw::{ApproxMetrics, DrawList, QuadCommand, TextCommand, TextMeasure, TextureId, fade};
pub use input::{ButtonState, RepeatCounter, RepeatTiming};
pub use keybindings::{Action, ButtonBindings, Buttons, PhysicalButton, Sources};
pub use screens::ScreenStack;
pub use scroll::{LOOKAHEAD_ROWS, ListViewport};
pub use theme::Theme;
pub use widget::{
    Button, ButtonFace, ChooseReaction, Direction, ItemProps, MenuItem, Reaction, RomList,
    TickHook, Widget,
};

use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Handle into a menu's widget arena. Stable for the menu's lifetime.
    pub struct WidgetId;
}

/// Which widgets focus traversal may land on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FocusPolicy {
    /// Also skip widgets with `visible == false`. Off: visibility only
    /// gates drawing.
    pub skip_invisible: bool,
}

/// Lifecycle of a menu. There is no terminal state; dropping ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Uninitialized,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("menu has no widget that can take focus")]
    NoSelectableWidget,
    #[error("widget index {index} out of range for a menu of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("widget at index {0} cannot take focus")]
    NotFocusable(usize),
    #[error("widget {0:?} is not in this menu")]
    UnknownWidget(WidgetId),
}

/// Menu-level Back reaction.
pub type BackReaction<C> = Box<dyn FnMut(&mut C)>;

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// Ordered widgets with a single focus, driven once per frame by [`Menu::update`].
///
/// Insertion order is traversal order. `C` is the host context handed to
/// every reaction.
pub struct Menu<C> {
    arena: SlotMap<WidgetId, MenuItem<C>>,
    order: Vec<WidgetId>,
    current: usize,
    repeat: RepeatCounter,
    on_back: Option<BackReaction<C>>,
    policy: FocusPolicy,
    state: MenuState,
}

impl<C> Menu<C> {
    pub fn new() -> Self {
        Self::with_policy(FocusPolicy::default())
    }

    pub fn with_policy(policy: FocusPolicy) -> Self {
        Self {
            arena: SlotMap::with_key(),
            order: Vec::new(),
            current: 0,
            repeat: RepeatCounter::new(),
            on_back: None,
            policy,
            state: MenuState::Uninitialized,
        }
    }

    /// Append a widget to the end of the traversal order.
    pub fn push(&mut self, item: MenuItem<C>) -> WidgetId {
        let id = self.arena.insert(item);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: WidgetId) -> Option<&MenuItem<C>> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut MenuItem<C>> {
        self.arena.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Widget ids in traversal order.
    pub fn ids(&self) -> &[WidgetId] {
        &self.order
    }

    /// Widgets in traversal order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem<C>> + '_ {
        self.order.iter().filter_map(|&id| self.arena.get(id))
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn policy(&self) -> FocusPolicy {
        self.policy
    }

    /// Traversal index of the focused widget.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_id(&self) -> Option<WidgetId> {
        self.order.get(self.current).copied()
    }

    pub fn current_item(&self) -> Option<&MenuItem<C>> {
        self.current_id().and_then(|id| self.arena.get(id))
    }

    fn current_item_mut(&mut self) -> Option<&mut MenuItem<C>> {
        let id = self.current_id()?;
        self.arena.get_mut(id)
    }

    /// Shared hold counter, exposed for diagnostics.
    pub fn button_down_count(&self) -> i32 {
        self.repeat.count()
    }

    pub fn set_on_back(&mut self, f: impl FnMut(&mut C) + 'static) {
        self.on_back = Some(Box::new(f));
    }

    fn focusable(&self, index: usize) -> bool {
        self.order
            .get(index)
            .and_then(|&id| self.arena.get(id))
            .is_some_and(|item| {
                item.props.selectable && (item.props.visible || !self.policy.skip_invisible)
            })
    }

    fn mark_current(&mut self, selected: bool) {
        if let Some(item) = self.current_item_mut() {
            item.set_selected(selected);
        }
    }

    /// Put focus on the widget at `index`. Before `init` this picks the
    /// initial focus.
    pub fn set_current(&mut self, index: usize) -> Result<(), MenuError> {
        let len = self.order.len();
        if index >= len {
            return Err(MenuError::IndexOutOfRange { index, len });
        }
        if !self.focusable(index) {
            return Err(MenuError::NotFocusable(index));
        }
        if self.state == MenuState::Active {
            self.mark_current(false);
            self.current = index;
            self.mark_current(true);
        } else {
            self.current = index;
        }
        Ok(())
    }

    /// Focus the widget `id`.
    pub fn focus(&mut self, id: WidgetId) -> Result<(), MenuError> {
        let index = self
            .order
            .iter()
            .position(|&other| other == id)
            .ok_or(MenuError::UnknownWidget(id))?;
        self.set_current(index)
    }

    /// Uninitialized -> Active: mark the initial focus.
    ///
    /// If the initial index cannot take focus, the next focusable widget
    /// (wrapping) gets it instead.
    pub fn init(&mut self) -> Result<(), MenuError> {
        let len = self.order.len();
        let start = self.current.min(len.saturating_sub(1));
        let index = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| self.focusable(i))
            .ok_or(MenuError::NoSelectableWidget)?;

        for item in self.arena.values_mut() {
            item.set_selected(false);
        }
        self.current = index;
        self.mark_current(true);
        self.state = MenuState::Active;
        log::debug!("menu initialized, focus at {index} of {len}");
        Ok(())
    }

    /// Move focus `step` places, wrapping and skipping widgets that cannot
    /// take focus. Visits each widget at most once.
    fn move_selection(&mut self, step: isize) {
        let len = self.order.len();
        if len == 0 {
            return;
        }
        let mut index = self.current;
        for _ in 0..len {
            index = (index as isize + step).rem_euclid(len as isize) as usize;
            if self.focusable(index) {
                log::debug!("focus {} -> {}", self.current, index);
                self.current = index;
                return;
            }
        }
    }

    /// Fire test for `action` against the focused widget's timing; pays the
    /// axis cost when it fires.
    fn fire(&mut self, buttons: ButtonState, bindings: &ButtonBindings, action: Action) -> bool {
        let Some(timing) = self.current_item().map(|item| item.props.timing) else {
            return false;
        };
        if !self
            .repeat
            .fired(buttons, bindings.sources(action), timing.scroll_delay)
        {
            return false;
        }
        self.repeat.consume(timing.cost(action));
        log::trace!("{action:?} fired, hold count {}", self.repeat.count());
        true
    }

    /// Hand focus on when the focused widget stopped being focusable
    /// outside navigation (tick hook, `get_mut`).
    fn revalidate_focus(&mut self) {
        if self.focusable(self.current) {
            return;
        }
        self.mark_current(false);
        self.move_selection(1);
        if self.focusable(self.current) {
            self.mark_current(true);
        } else {
            log::debug!("no widget can take focus, menu left without a selection");
        }
    }

    /// Run `on_tick` on every widget, in order.
    fn tick_all(&mut self, ctx: &mut C) {
        for &id in &self.order {
            if let Some(item) = self.arena.get_mut(id) {
                item.on_tick(ctx);
            }
        }
    }

    /// One frame of input handling.
    ///
    /// Up/Down go to the focused widget first and move focus when it does
    /// not consume them. Left/Right/Activate only ever reach the focused
    /// widget. Back goes to the menu's reaction. Every widget ticks last,
    /// then focus moves on if a hook made the focused widget unfocusable.
    pub fn update(&mut self, buttons: ButtonState, bindings: &ButtonBindings, ctx: &mut C) {
        if self.state == MenuState::Uninitialized
            && let Err(err) = self.init()
        {
            log::warn!("menu update skipped: {err}");
            self.tick_all(ctx);
            return;
        }

        self.mark_current(false);
        self.repeat.observe(buttons, bindings.directional_mask());

        for (action, direction, step) in [
            (Action::Up, Direction::Up, -1),
            (Action::Down, Direction::Down, 1),
        ] {
            if self.fire(buttons, bindings, action) {
                let consumed = self
                    .current_item_mut()
                    .is_some_and(|item| item.on_direction(direction, ctx));
                if !consumed {
                    self.move_selection(step);
                }
            }
        }

        self.mark_current(true);

        for (action, direction) in [
            (Action::Left, Direction::Left),
            (Action::Right, Direction::Right),
        ] {
            if self.fire(buttons, bindings, action)
                && let Some(item) = self.current_item_mut()
            {
                item.on_direction(direction, ctx);
            }
        }

        if self.fire(buttons, bindings, Action::Activate)
            && let Some(item) = self.current_item_mut()
        {
            item.on_activate(ctx);
        }

        if buttons.edge_any(bindings.sources(Action::Back))
            && let Some(back) = self.on_back.as_mut()
        {
            log::debug!("back pressed");
            back(ctx);
        }

        self.tick_all(ctx);
        self.revalidate_focus();
    }

    /// Emit every widget's draw commands, in order.
    pub fn draw(&self, offset_x: f32, transparency: f32, theme: &Theme, out: &mut DrawList) {
        for item in self.items() {
            item.draw(offset_x, transparency, theme, out);
        }
    }
}

impl<C> Default for Menu<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
