use crate::rom::{Rom, RomShelf};

use super::draw::{DrawList, QuadCommand, TextCommand, TextMeasure, TextureId, fade};
use super::input::RepeatTiming;
use super::scroll::ListViewport;
use super::theme::Theme;

/// Directional input delivered to the focused widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a button shows. Reactions receive it so they can relabel the button.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonFace {
    pub text: String,
    pub icon: Option<TextureId>,
}

/// Button reaction: the button's face plus the host context.
pub type Reaction<C> = Box<dyn FnMut(&mut ButtonFace, &mut C)>;
/// List reaction for the chosen item.
pub type ChooseReaction<C> = Box<dyn FnMut(&Rom, &mut C)>;
/// Per-frame hook, run before the widget's own bookkeeping.
pub type TickHook<C> = Box<dyn FnMut(&mut ItemProps, &mut Widget<C>, &mut C)>;

/// Properties shared by every widget variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemProps {
    /// May take focus.
    pub selectable: bool,
    /// Emits draw commands.
    pub visible: bool,
    pub x: f32,
    pub y: f32,
    pub timing: RepeatTiming,
}

impl Default for ItemProps {
    fn default() -> Self {
        Self {
            selectable: false,
            visible: true,
            x: 0.0,
            y: 0.0,
            timing: RepeatTiming::default(),
        }
    }
}

/// Push button with optional activate / left / right reactions.
pub struct Button<C> {
    pub face: ButtonFace,
    pub font_size: f32,
    on_activate: Option<Reaction<C>>,
    on_left: Option<Reaction<C>>,
    on_right: Option<Reaction<C>>,
}

impl<C> Button<C> {
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            face: ButtonFace {
                text: text.into(),
                icon: None,
            },
            font_size,
            on_activate: None,
            on_left: None,
            on_right: None,
        }
    }

    pub fn with_icon(mut self, icon: TextureId) -> Self {
        self.face.icon = Some(icon);
        self
    }

    pub fn on_activate(mut self, f: impl FnMut(&mut ButtonFace, &mut C) + 'static) -> Self {
        self.on_activate = Some(Box::new(f));
        self
    }

    pub fn on_left(mut self, f: impl FnMut(&mut ButtonFace, &mut C) + 'static) -> Self {
        self.on_left = Some(Box::new(f));
        self
    }

    pub fn on_right(mut self, f: impl FnMut(&mut ButtonFace, &mut C) + 'static) -> Self {
        self.on_right = Some(Box::new(f));
        self
    }

    fn react(slot: &mut Option<Reaction<C>>, face: &mut ButtonFace, ctx: &mut C) -> bool {
        match slot.as_mut() {
            Some(f) => {
                f(face, ctx);
                true
            }
            None => false,
        }
    }

    fn press(&mut self, direction: Direction, ctx: &mut C) -> bool {
        match direction {
            Direction::Left => Self::react(&mut self.on_left, &mut self.face, ctx),
            Direction::Right => Self::react(&mut self.on_right, &mut self.face, ctx),
            Direction::Up | Direction::Down => false,
        }
    }

    fn activate(&mut self, ctx: &mut C) -> bool {
        Self::react(&mut self.on_activate, &mut self.face, ctx)
    }
}

/// Scrolling list over a shared ROM collection.
pub struct RomList<C> {
    roms: RomShelf,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    selection: usize,
    viewport: ListViewport,
    on_choose: Option<ChooseReaction<C>>,
}

impl<C> RomList<C> {
    /// Row height and window size derive from `font_size` and the theme.
    pub fn new(roms: RomShelf, width: f32, height: f32, font_size: f32, theme: &Theme) -> Self {
        Self {
            roms,
            width,
            height,
            font_size,
            selection: 0,
            viewport: ListViewport::new(height, theme.list_row_size(font_size)),
            on_choose: None,
        }
    }

    pub fn on_choose(mut self, f: impl FnMut(&Rom, &mut C) + 'static) -> Self {
        self.on_choose = Some(Box::new(f));
        self
    }

    /// Index of the list cursor (independent of menu focus).
    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Move the cursor, clamped to the collection.
    pub fn set_selection(&mut self, index: usize) {
        self.selection = index.min(self.len().saturating_sub(1));
    }

    pub fn viewport(&self) -> &ListViewport {
        &self.viewport
    }

    pub fn len(&self) -> usize {
        self.roms.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the ROM under the cursor.
    pub fn selected_rom(&self) -> Option<Rom> {
        self.roms.borrow().get(self.selection).cloned()
    }

    fn press(&mut self, direction: Direction) -> bool {
        let len = self.len();
        match direction {
            Direction::Up => {
                if len > 0 {
                    self.selection = if self.selection == 0 {
                        len - 1
                    } else {
                        self.selection - 1
                    };
                }
                true
            }
            Direction::Down => {
                if len > 0 {
                    self.selection = if self.selection + 1 >= len {
                        0
                    } else {
                        self.selection + 1
                    };
                }
                true
            }
            Direction::Left | Direction::Right => false,
        }
    }

    fn activate(&mut self, ctx: &mut C) -> bool {
        // Clone out so the reaction may touch the shelf.
        let Some(rom) = self.selected_rom() else {
            return true;
        };
        if let Some(f) = self.on_choose.as_mut() {
            log::debug!("list chose {:?}", rom.name);
            f(&rom, ctx);
        }
        true
    }

    fn tick(&mut self) {
        let len = self.len();
        self.selection = self.selection.min(len.saturating_sub(1));
        self.viewport.track(self.selection, len);
    }

    fn draw(
        &self,
        props: &ItemProps,
        focused: bool,
        offset_x: f32,
        transparency: f32,
        theme: &Theme,
        out: &mut DrawList,
    ) {
        let roms = self.roms.borrow();
        let len = roms.len();
        let x = props.x + offset_x;
        let top = props.y + self.viewport.top_inset();
        let row = self.viewport.row_size();

        for (slot, index) in self.viewport.visible_range(len).enumerate() {
            let color = if index != self.selection {
                theme.text_normal
            } else if focused {
                theme.text_selected
            } else {
                theme.text_cursor_idle
            };
            out.texts.push(TextCommand {
                text: roms[index].name.clone(),
                x: x + theme.list_text_inset_x,
                y: top + slot as f32 * row + theme.list_text_offset_y,
                color: fade(color, transparency),
                font_size: self.font_size,
            });
        }

        // Scrollbar only when the collection overflows the window.
        let capacity = self.viewport.capacity();
        if len > capacity && capacity > 0 {
            let track_h = capacity as f32 * row;
            let track_x = x + self.width - theme.scrollbar_width;
            out.quads.push(QuadCommand {
                texture: None,
                x: track_x,
                y: top,
                width: theme.scrollbar_width,
                height: track_h,
                color: fade(theme.scrollbar_track, transparency),
            });

            let thumb_h = (track_h * capacity as f32 / len as f32).max(theme.scrollbar_min_thumb);
            let max_origin = self.viewport.max_origin(len).max(1);
            let progress = self.viewport.origin() as f32 / max_origin as f32;
            out.quads.push(QuadCommand {
                texture: None,
                x: track_x,
                y: top + progress * (track_h - thumb_h).max(0.0),
                width: theme.scrollbar_width,
                height: thumb_h,
                color: fade(theme.scrollbar_thumb, transparency),
            });
        }
    }
}

/// Closed widget set (no trait objects). Each variant carries its own fields.
pub enum Widget<C> {
    /// Static text, centred in its box at construction.
    Label {
        text: String,
        color: [f32; 4], // sRGB RGBA
        font_size: f32,
    },

    /// Static texture.
    Image {
        texture: TextureId,
        width: f32,
        height: f32,
        color: [f32; 4], // tint, sRGB RGBA
    },

    Button(Button<C>),

    List(RomList<C>),
}

/// A widget plus the properties and hook every variant shares.
pub struct MenuItem<C> {
    pub props: ItemProps,
    pub widget: Widget<C>,
    selected: bool,
    on_tick: Option<TickHook<C>>,
}

impl<C> MenuItem<C> {
    /// Wrap a widget. Buttons and lists are selectable by default.
    pub fn new(widget: Widget<C>, x: f32, y: f32) -> Self {
        let selectable = matches!(widget, Widget::Button(_) | Widget::List(_));
        Self {
            props: ItemProps {
                selectable,
                x,
                y,
                ..ItemProps::default()
            },
            widget,
            selected: false,
            on_tick: None,
        }
    }

    /// Label centred inside the box at (`x`, `y`) of size `width` x `height`.
    #[allow(clippy::too_many_arguments)]
    pub fn label(
        measure: &dyn TextMeasure,
        text: impl Into<String>,
        font_size: f32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: [f32; 4],
    ) -> Self {
        let text = text.into();
        let text_width = measure.text_width(&text, font_size);
        let cx = x + width / 2.0 - text_width / 2.0;
        let cy = y + height / 2.0 - font_size;
        Self::new(
            Widget::Label {
                text,
                color,
                font_size,
            },
            cx,
            cy,
        )
    }

    pub fn image(texture: TextureId, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self::new(
            Widget::Image {
                texture,
                width,
                height,
                color,
            },
            x,
            y,
        )
    }

    pub fn button(button: Button<C>, x: f32, y: f32) -> Self {
        Self::new(Widget::Button(button), x, y)
    }

    pub fn list(list: RomList<C>, x: f32, y: f32) -> Self {
        Self::new(Widget::List(list), x, y)
    }

    pub fn with_timing(mut self, timing: RepeatTiming) -> Self {
        self.props.timing = timing;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.props.visible = visible;
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.props.selectable = selectable;
        self
    }

    pub fn with_tick_hook(
        mut self,
        f: impl FnMut(&mut ItemProps, &mut Widget<C>, &mut C) + 'static,
    ) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    /// True iff this widget currently holds menu focus.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn as_button(&self) -> Option<&Button<C>> {
        match &self.widget {
            Widget::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&RomList<C>> {
        match &self.widget {
            Widget::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut RomList<C>> {
        match &mut self.widget {
            Widget::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns true if the widget consumed the input itself.
    pub fn on_direction(&mut self, direction: Direction, ctx: &mut C) -> bool {
        match &mut self.widget {
            Widget::Label { .. } | Widget::Image { .. } => false,
            Widget::Button(button) => button.press(direction, ctx),
            Widget::List(list) => list.press(direction),
        }
    }

    /// Returns true if the widget consumed the activation.
    pub fn on_activate(&mut self, ctx: &mut C) -> bool {
        match &mut self.widget {
            Widget::Label { .. } | Widget::Image { .. } => false,
            Widget::Button(button) => button.activate(ctx),
            Widget::List(list) => list.activate(ctx),
        }
    }

    /// Per-frame update, regardless of focus or visibility.
    pub fn on_tick(&mut self, ctx: &mut C) {
        if let Some(hook) = self.on_tick.as_mut() {
            hook(&mut self.props, &mut self.widget, ctx);
        }
        if let Widget::List(list) = &mut self.widget {
            list.tick();
        }
    }

    /// Emit draw commands shifted by `offset_x` with alpha scaled by `transparency`.
    pub fn draw(&self, offset_x: f32, transparency: f32, theme: &Theme, out: &mut DrawList) {
        if !self.props.visible {
            return;
        }
        let x = self.props.x + offset_x;
        let y = self.props.y;

        match &self.widget {
            Widget::Label {
                text,
                color,
                font_size,
            } => {
                out.texts.push(TextCommand {
                    text: text.clone(),
                    x,
                    y,
                    color: fade(*color, transparency),
                    font_size: *font_size,
                });
            }
            Widget::Image {
                texture,
                width,
                height,
                color,
            } => {
                out.quads.push(QuadCommand {
                    texture: Some(*texture),
                    x,
                    y,
                    width: *width,
                    height: *height,
                    color: fade(*color, transparency),
                });
            }
            Widget::Button(button) => {
                let mut text_x = x;
                if let Some(icon) = button.face.icon {
                    out.quads.push(QuadCommand {
                        texture: Some(icon),
                        x,
                        y,
                        width: theme.icon_size,
                        height: theme.icon_size,
                        color: fade(theme.icon_tint, transparency),
                    });
                    text_x += theme.icon_size + theme.icon_gap;
                }
                let color = if self.selected {
                    theme.text_selected
                } else {
                    theme.text_normal
                };
                out.texts.push(TextCommand {
                    text: button.face.text.clone(),
                    x: text_x,
                    y,
                    color: fade(color, transparency),
                    font_size: button.font_size,
                });
            }
            Widget::List(list) => {
                list.draw(&self.props, self.selected, offset_x, transparency, theme, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::shelf;
    use crate::ui::draw::ApproxMetrics;

    /// Host context that records every reaction.
    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    fn roms(n: usize) -> RomShelf {
        shelf(
            (0..n)
                .map(|i| Rom::from_path(&format!("roms/game{i:02}.gb"), "saves"))
                .collect(),
        )
    }

    /// List with 5 visible rows (row = 10 + 14 = 24px).
    fn list_item(n: usize) -> MenuItem<Log> {
        let theme = Theme::default();
        let list = RomList::new(roms(n), 300.0, 120.0, 10.0, &theme)
            .on_choose(|rom: &Rom, log: &mut Log| log.events.push(format!("chose {}", rom.name)));
        MenuItem::list(list, 0.0, 0.0)
    }

    fn list_selection(item: &MenuItem<Log>) -> usize {
        item.as_list().expect("list").selection()
    }

    #[test]
    fn label_is_centred_and_not_selectable() {
        let m = ApproxMetrics::default();
        let item: MenuItem<Log> =
            MenuItem::label(&m, "ABCD", 10.0, 100.0, 50.0, 200.0, 40.0, [1.0; 4]);
        // width 24 -> 100 + 100 - 12
        assert!((item.props.x - 188.0).abs() < 1e-4);
        // 50 + 20 - 10
        assert!((item.props.y - 60.0).abs() < 1e-4);
        assert!(!item.props.selectable);
    }

    #[test]
    fn label_and_image_never_consume() {
        let mut log = Log::default();
        let m = ApproxMetrics::default();
        let mut label: MenuItem<Log> =
            MenuItem::label(&m, "x", 10.0, 0.0, 0.0, 10.0, 10.0, [1.0; 4]);
        let mut image: MenuItem<Log> = MenuItem::image(3, 0.0, 0.0, 8.0, 8.0, [1.0; 4]);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!label.on_direction(dir, &mut log));
            assert!(!image.on_direction(dir, &mut log));
        }
        assert!(!label.on_activate(&mut log));
        assert!(!image.on_activate(&mut log));
    }

    #[test]
    fn button_consumes_only_registered_reactions() {
        let mut log = Log::default();
        let button = Button::new("Palette", 20.0)
            .on_right(|face: &mut ButtonFace, log: &mut Log| {
                face.text = "Palette: Grey".into();
                log.events.push("right".into());
            });
        let mut item = MenuItem::button(button, 0.0, 0.0);
        assert!(item.props.selectable);

        assert!(!item.on_direction(Direction::Left, &mut log));
        assert!(!item.on_direction(Direction::Up, &mut log));
        assert!(!item.on_activate(&mut log));
        assert!(item.on_direction(Direction::Right, &mut log));

        assert_eq!(log.events, vec!["right".to_string()]);
        assert_eq!(
            item.as_button().expect("button").face.text,
            "Palette: Grey"
        );
    }

    #[test]
    fn button_activate_runs_reaction() {
        let mut log = Log::default();
        let button =
            Button::new("Go", 20.0).on_activate(|_: &mut ButtonFace, log: &mut Log| {
                log.events.push("go".into())
            });
        let mut item = MenuItem::button(button, 0.0, 0.0);
        assert!(item.on_activate(&mut log));
        assert!(item.on_activate(&mut log));
        assert_eq!(log.events.len(), 2);
    }

    #[test]
    fn list_wraps_both_ways() {
        let mut log = Log::default();
        let mut item = list_item(4);
        assert!(item.on_direction(Direction::Up, &mut log));
        assert_eq!(list_selection(&item), 3);
        assert!(item.on_direction(Direction::Down, &mut log));
        assert_eq!(list_selection(&item), 0);
        assert!(!item.on_direction(Direction::Left, &mut log));
        assert!(!item.on_direction(Direction::Right, &mut log));
    }

    #[test]
    fn single_item_list_stays_put() {
        let mut log = Log::default();
        let mut item = list_item(1);
        assert!(item.on_direction(Direction::Up, &mut log));
        assert_eq!(list_selection(&item), 0);
        assert!(item.on_direction(Direction::Down, &mut log));
        assert_eq!(list_selection(&item), 0);
    }

    #[test]
    fn list_activate_passes_current_rom() {
        let mut log = Log::default();
        let mut item = list_item(3);
        item.on_direction(Direction::Down, &mut log);
        assert!(item.on_activate(&mut log));
        assert_eq!(log.events, vec!["chose game01".to_string()]);
    }

    #[test]
    fn empty_list_activate_is_consumed_noop() {
        let mut log = Log::default();
        let mut item = list_item(0);
        assert!(item.on_direction(Direction::Down, &mut log));
        assert!(item.on_activate(&mut log));
        assert_eq!(list_selection(&item), 0);
        assert!(log.events.is_empty());
    }

    #[test]
    fn tick_hook_runs_before_list_bookkeeping() {
        let mut log = Log::default();
        let mut item = list_item(20).with_tick_hook(|props, widget, log: &mut Log| {
            props.visible = false;
            if let Widget::List(list) = widget {
                list.set_selection(10);
            }
            log.events.push("tick".into());
        });
        item.on_tick(&mut log);
        assert!(!item.props.visible);
        // Hook moved the cursor to 10; the window stepped once toward it.
        assert_eq!(item.as_list().expect("list").viewport().origin(), 1);
        assert_eq!(log.events, vec!["tick".to_string()]);
    }

    #[test]
    fn list_selection_clamped_when_shelf_shrinks() {
        let mut log = Log::default();
        let shared = roms(10);
        let theme = Theme::default();
        let list: RomList<Log> = RomList::new(shared.clone(), 300.0, 120.0, 10.0, &theme);
        let mut item = MenuItem::list(list, 0.0, 0.0);
        if let Some(list) = item.as_list_mut() {
            list.set_selection(9);
        }
        shared.borrow_mut().truncate(4);
        item.on_tick(&mut log);
        assert_eq!(list_selection(&item), 3);
    }

    #[test]
    fn invisible_widget_draws_nothing() {
        let theme = Theme::default();
        let item = list_item(8).with_visible(false);
        let mut dl = DrawList::new();
        item.draw(0.0, 1.0, &theme, &mut dl);
        assert!(dl.is_empty());
    }

    #[test]
    fn list_draws_window_and_scrollbar() {
        let theme = Theme::default();
        let mut item = list_item(8);
        item.set_selected(true);
        let mut dl = DrawList::new();
        item.draw(10.0, 0.5, &theme, &mut dl);

        assert_eq!(dl.texts.len(), 5);
        assert_eq!(dl.texts[0].text, "game00");
        assert_eq!(dl.texts[0].color, fade(theme.text_selected, 0.5));
        assert_eq!(dl.texts[1].color, fade(theme.text_normal, 0.5));
        assert!((dl.texts[0].x - (10.0 + theme.list_text_inset_x)).abs() < 1e-4);
        // Track + thumb.
        assert_eq!(dl.quads.len(), 2);
    }

    #[test]
    fn short_list_has_no_scrollbar() {
        let theme = Theme::default();
        let item = list_item(3);
        let mut dl = DrawList::new();
        item.draw(0.0, 1.0, &theme, &mut dl);
        assert_eq!(dl.texts.len(), 3);
        assert!(dl.quads.is_empty());
        // Unfocused list shows the idle cursor color.
        assert_eq!(dl.texts[0].color, theme.text_cursor_idle);
    }

    #[test]
    fn button_with_icon_offsets_text() {
        let theme = Theme::default();
        let button: Button<Log> = Button::new("Settings", 20.0).with_icon(7);
        let item = MenuItem::button(button, 5.0, 5.0);
        let mut dl = DrawList::new();
        item.draw(0.0, 1.0, &theme, &mut dl);
        assert_eq!(dl.quads.len(), 1);
        assert_eq!(dl.quads[0].texture, Some(7));
        assert!((dl.texts[0].x - (5.0 + theme.icon_size + theme.icon_gap)).abs() < 1e-4);
        assert_eq!(dl.texts[0].color, theme.text_normal);
    }
}
