//! Property-style navigation invariants.
//!
//! Random menus are driven with random controller sessions from a seeded
//! `StdRng`, and structural invariants are checked after every frame.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use vrboy::rom::{Rom, RomShelf, shelf};
use vrboy::ui::{
    Button, ButtonBindings, ButtonState, Buttons, FocusPolicy, Menu, MenuItem, RomList, Theme,
    Widget,
};

/// Host context that swallows every reaction.
#[derive(Default)]
struct Host {
    reactions: usize,
}

/// Font 10 + padding 14.
const ROW: f32 = 24.0;

/// Masks a session draws from. Chords included.
const INPUTS: [Buttons; 12] = [
    Buttons::empty(),
    Buttons::DPAD_UP,
    Buttons::DPAD_DOWN,
    Buttons::DPAD_LEFT,
    Buttons::DPAD_RIGHT,
    Buttons::LSTICK_UP,
    Buttons::LSTICK_DOWN,
    Buttons::A,
    Buttons::B,
    Buttons::DPAD_DOWN.union(Buttons::LSTICK_DOWN),
    Buttons::DPAD_UP.union(Buttons::A),
    Buttons::LSTICK_RIGHT.union(Buttons::DPAD_DOWN),
];

fn roms(n: usize) -> RomShelf {
    shelf(
        (0..n)
            .map(|i| Rom::from_path(&format!("roms/game{i:03}.gb"), "saves"))
            .collect(),
    )
}

fn list(n: usize, capacity: usize) -> MenuItem<Host> {
    let theme = Theme::default();
    let list = RomList::new(roms(n), 300.0, capacity as f32 * ROW, 10.0, &theme)
        .on_choose(|_: &Rom, host: &mut Host| host.reactions += 1);
    MenuItem::list(list, 0.0, 0.0)
}

fn button(name: String) -> MenuItem<Host> {
    MenuItem::button(
        Button::new(name, 10.0)
            .on_activate(|_, host: &mut Host| host.reactions += 1)
            .on_right(|_, host: &mut Host| host.reactions += 1),
        0.0,
        0.0,
    )
}

fn label(name: String) -> MenuItem<Host> {
    MenuItem::new(
        Widget::Label {
            text: name,
            color: [1.0; 4],
            font_size: 10.0,
        },
        0.0,
        0.0,
    )
}

/// A random mix of widgets with at least one that can take focus.
fn random_menu(rng: &mut StdRng, with_lists: bool) -> Menu<Host> {
    let policy = FocusPolicy {
        skip_invisible: rng.random(),
    };
    let mut menu = Menu::with_policy(policy);
    let mut reachable = false;
    let count = rng.random_range(1..10);
    for i in 0..count {
        let item = match rng.random_range(0..4) {
            0 => label(format!("L{i}")),
            1 => MenuItem::image(i as u32, 0.0, 0.0, 8.0, 8.0, [1.0; 4]),
            2 if with_lists => list(rng.random_range(0..40), rng.random_range(5..10)),
            _ => button(format!("B{i}")),
        };
        let item = item
            .with_visible(rng.random_range(0..4) != 0)
            .with_selectable(rng.random_range(0..3) != 0);
        reachable |= item.props.selectable && (item.props.visible || !policy.skip_invisible);
        menu.push(item);
    }
    if !reachable {
        menu.push(button("fallback".into()));
    }
    menu
}

fn assert_focus_invariant(menu: &Menu<Host>, context: &str) {
    let selected: Vec<usize> = menu
        .items()
        .enumerate()
        .filter(|(_, item)| item.is_selected())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(selected, vec![menu.current_index()], "{context}");

    let item = menu.current_item().expect("focused widget exists");
    assert!(item.props.selectable, "{context}: focus on unselectable widget");
    if menu.policy().skip_invisible {
        assert!(item.props.visible, "{context}: focus on hidden widget");
    }
}

fn assert_lists_in_bounds(menu: &Menu<Host>, context: &str) {
    for item in menu.items() {
        if let Some(list) = item.as_list() {
            let len = list.len();
            let vp = list.viewport();
            assert!(vp.origin() <= vp.max_origin(len), "{context}: origin past end");
            assert!(
                list.selection() < len.max(1),
                "{context}: cursor {} outside {len}",
                list.selection()
            );
        }
    }
}

/// Random holds of random masks, `runs` of them.
fn random_session(rng: &mut StdRng, runs: usize) -> Vec<Buttons> {
    let mut frames = Vec::new();
    for _ in 0..runs {
        let mask = INPUTS[rng.random_range(0..INPUTS.len())];
        let hold = rng.random_range(1..30);
        frames.extend(std::iter::repeat_n(mask, hold));
    }
    frames
}

// ---------------------------------------------------------------------------
// Exactly one focused, selectable widget after every frame
// ---------------------------------------------------------------------------

#[test]
fn focus_invariant_holds_for_random_sessions() {
    let bindings = ButtonBindings::defaults();
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut menu = random_menu(&mut rng, true);
        let mut host = Host::default();
        let mut state = ButtonState::default();

        for (frame, buttons) in random_session(&mut rng, 40).into_iter().enumerate() {
            state = state.advance(buttons);
            menu.update(state, &bindings, &mut host);
            let context = format!("seed {seed} frame {frame}");
            assert_focus_invariant(&menu, &context);
            assert_lists_in_bounds(&menu, &context);
        }
    }
}

// ---------------------------------------------------------------------------
// Focus wraps in both directions over any selectable subset
// ---------------------------------------------------------------------------

#[test]
fn focus_wraps_over_selectable_subset() {
    let bindings = ButtonBindings::defaults();
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut menu = random_menu(&mut rng, false);
        let mut host = Host::default();
        menu.init().expect("menu has a reachable widget");

        let policy = menu.policy();
        let reachable = menu
            .items()
            .filter(|i| i.props.selectable && (i.props.visible || !policy.skip_invisible))
            .count();
        let start = menu.current_index();

        for (mask, label) in [(Buttons::DPAD_DOWN, "down"), (Buttons::LSTICK_UP, "up")] {
            let mut state = ButtonState::default();
            let mut visited = Vec::new();
            for _ in 0..reachable {
                for b in [mask, Buttons::empty()] {
                    state = state.advance(b);
                    menu.update(state, &bindings, &mut host);
                }
                visited.push(menu.current_index());
            }
            assert_eq!(
                menu.current_index(),
                start,
                "seed {seed}: {label} did not wrap after {reachable} steps"
            );
            visited.sort_unstable();
            visited.dedup();
            assert_eq!(visited.len(), reachable, "seed {seed}: {label} skipped a widget");
        }
    }
}

// ---------------------------------------------------------------------------
// Viewport settles with two rows of margin
// ---------------------------------------------------------------------------

fn assert_margin(menu: &Menu<Host>, context: &str) {
    for item in menu.items() {
        let Some(list) = item.as_list() else { continue };
        let (len, sel) = (list.len(), list.selection());
        let vp = list.viewport();
        let (origin, cap) = (vp.origin(), vp.capacity());
        assert!(
            sel >= origin + 2 || origin == 0,
            "{context}: cursor {sel} too close to top of window at {origin}"
        );
        assert!(
            origin + cap >= sel + 3 || origin + cap >= len,
            "{context}: cursor {sel} too close to bottom of window at {origin}+{cap} of {len}"
        );
    }
}

#[test]
fn viewport_settles_with_margin() {
    let bindings = ButtonBindings::defaults();
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let len = rng.random_range(0..60);
        let mut menu = Menu::new();
        menu.push(list(len, rng.random_range(5..10)));
        let mut host = Host::default();
        let mut state = ButtonState::default();

        for buttons in random_session(&mut rng, 20) {
            state = state.advance(buttons);
            menu.update(state, &bindings, &mut host);
        }
        // One row per tick: give the window time to catch up.
        for _ in 0..len + 2 {
            state = state.advance(Buttons::empty());
            menu.update(state, &bindings, &mut host);
        }
        assert_margin(&menu, &format!("seed {seed} len {len}"));
    }
}

#[test]
fn twenty_items_scroll_one_row_per_tick() {
    let bindings = ButtonBindings::defaults();
    let mut menu = Menu::new();
    menu.push(list(20, 5));
    let mut host = Host::default();
    let mut state = ButtonState::default();

    let mut origins = Vec::new();
    for _ in 0..6 {
        state = state.advance(Buttons::DPAD_DOWN);
        menu.update(state, &bindings, &mut host);
        let origin = menu
            .current_item()
            .and_then(|i| i.as_list())
            .map(|l| l.viewport().origin())
            .expect("list focused");
        origins.push(origin);
        assert_margin(&menu, "twenty items");

        state = state.advance(Buttons::empty());
        menu.update(state, &bindings, &mut host);
    }
    assert_eq!(origins, vec![0, 0, 1, 2, 3, 4]);
    assert_eq!(host.reactions, 0);
}
