//! Property and scenario tests for the splitter gesture.
//!
//! A tiny owner model applies emitted intents to a width, the way the layout
//! controller does, so settled-state properties can be checked without the
//! runtime crate.

use std::time::Duration;

use proptest::prelude::*;
use sidepane_layout::{SplitterConfig, SplitterGesture, SplitterHit, SplitterIntent};

const CONTAINER: u32 = 1000;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Minimal stand-in for the controller: applies intents to a width.
#[derive(Debug, Clone)]
struct Owner {
    width: u32,
    expanded_width: u32,
    collapsed: bool,
    drags_ended: usize,
    collapses: usize,
}

impl Owner {
    fn expanded(width: u32) -> Self {
        Self {
            width,
            expanded_width: width,
            collapsed: false,
            drags_ended: 0,
            collapses: 0,
        }
    }

    fn apply(&mut self, intents: impl IntoIterator<Item = SplitterIntent>) {
        for intent in intents {
            match intent {
                SplitterIntent::Expand => {
                    self.collapsed = false;
                    self.width = self.expanded_width;
                }
                SplitterIntent::Width(width) => self.width = width,
                SplitterIntent::Collapse => {
                    self.collapses += 1;
                    self.collapsed = true;
                    self.width = 0;
                }
                SplitterIntent::ToggleCollapsed => {
                    self.collapsed = !self.collapsed;
                    self.width = if self.collapsed { 0 } else { self.expanded_width };
                }
                SplitterIntent::DragEnded => self.drags_ended += 1,
            }
        }
    }
}

fn drag(gesture: &mut SplitterGesture, owner: &mut Owner, start: i32, path: &[i32]) {
    owner.apply(gesture.on_pointer_down(start, owner.collapsed, SplitterHit::Handle));
    let mut now = Duration::ZERO;
    for &x in path {
        now += ms(16);
        owner.apply(gesture.on_pointer_move(x, CONTAINER, now));
    }
    owner.apply(gesture.on_pointer_up(owner.width));
    owner.apply(gesture.poll(now + ms(1_000)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn transient_widths_stay_within_zero_and_max(
        start in 0i32..1000,
        path in prop::collection::vec(-200i32..1400, 1..40),
    ) {
        let config = SplitterConfig::default();
        let mut gesture = SplitterGesture::new(config).expect("valid config");
        gesture.on_pointer_down(start, false, SplitterHit::Handle);
        for (step, x) in path.into_iter().enumerate() {
            if let Some(SplitterIntent::Width(width)) =
                gesture.on_pointer_move(x, CONTAINER, ms(step as u64 * 16))
            {
                prop_assert!(width <= config.max_width);
                let raw = x.max(0) as f64;
                if raw > config.collapse_zone_edge() {
                    prop_assert!(width >= config.min_width);
                }
            }
        }
    }

    #[test]
    fn settled_width_is_in_bounds_or_collapsed(
        start in 100i32..800,
        path in prop::collection::vec(-50i32..1200, 0..40),
    ) {
        let config = SplitterConfig::default();
        let mut gesture = SplitterGesture::new(config).expect("valid config");
        let mut owner = Owner::expanded(300);
        drag(&mut gesture, &mut owner, start, &path);

        prop_assert_eq!(owner.collapsed, owner.width == 0);
        if !owner.collapsed {
            prop_assert!(owner.width >= config.min_width);
            prop_assert!(owner.width <= config.max_width);
        }
        prop_assert_eq!(owner.drags_ended, 1);
        prop_assert!(owner.collapses <= 1);
        prop_assert!(!gesture.is_dragging());
    }

    #[test]
    fn rightward_motion_never_auto_collapses(
        start in 0i32..50,
        steps in prop::collection::vec(1i32..20, 1..30),
    ) {
        let mut gesture = SplitterGesture::new(SplitterConfig::default()).expect("valid config");
        gesture.on_pointer_down(start, false, SplitterHit::Handle);
        let mut x = start;
        for (step, delta) in steps.into_iter().enumerate() {
            x += delta;
            gesture.on_pointer_move(x, CONTAINER, ms(step as u64 * 16));
            prop_assert!(!gesture.has_pending_collapse());
            prop_assert!(gesture.is_dragging());
        }
    }

    #[test]
    fn leftward_crossing_always_auto_collapses(
        start in 200i32..700,
        target in 0i32..=50,
        stride in 5i32..60,
    ) {
        let mut gesture = SplitterGesture::new(SplitterConfig::default()).expect("valid config");
        let mut owner = Owner::expanded(300);
        let mut path = Vec::new();
        let mut x = start;
        while x > target {
            x = (x - stride).max(target);
            path.push(x);
        }
        drag(&mut gesture, &mut owner, start, &path);
        prop_assert!(owner.collapsed);
        prop_assert_eq!(owner.width, 0);
        prop_assert_eq!(owner.collapses, 1);
    }
}

#[test]
fn drag_from_300_to_40_collapses_after_delay() {
    let mut gesture = SplitterGesture::new(SplitterConfig::default()).expect("valid config");
    let mut owner = Owner::expanded(300);

    owner.apply(gesture.on_pointer_down(300, false, SplitterHit::Handle));
    let mut now = Duration::ZERO;
    for x in (1..=13).map(|step| 300 - step * 20) {
        now += ms(16);
        owner.apply(gesture.on_pointer_move(x, CONTAINER, now));
    }
    assert!(gesture.has_pending_collapse());
    assert!(!owner.collapsed);

    owner.apply(gesture.poll(now + ms(50)));
    assert!(!owner.collapsed);

    owner.apply(gesture.poll(now + ms(100)));
    assert!(owner.collapsed);
    assert_eq!(owner.width, 0);
    assert_eq!(owner.drags_ended, 1);
}

#[test]
fn drag_from_40_to_60_rightward_snaps_to_min() {
    let config = SplitterConfig {
        collapse_zone_factor: 1.0,
        ..SplitterConfig::default()
    };
    let mut gesture = SplitterGesture::new(config).expect("valid config");
    let mut owner = Owner::expanded(300);

    drag(&mut gesture, &mut owner, 40, &[45, 50, 55, 60]);
    assert!(!owner.collapsed);
    assert_eq!(owner.width, config.min_width);
    assert_eq!(owner.collapses, 0);
}

#[test]
fn rightward_release_inside_wide_band_collapses_on_release() {
    let mut gesture = SplitterGesture::new(SplitterConfig::default()).expect("valid config");
    let mut owner = Owner::expanded(300);

    owner.apply(gesture.on_pointer_down(40, false, SplitterHit::Handle));
    for (step, x) in [45, 50, 55, 60].into_iter().enumerate() {
        owner.apply(gesture.on_pointer_move(x, CONTAINER, ms(step as u64 * 16)));
        assert!(!gesture.has_pending_collapse());
    }
    assert_eq!(owner.width, 60);
    owner.apply(gesture.on_pointer_up(owner.width));
    assert!(owner.collapsed);
}

#[test]
fn drag_open_from_collapsed() {
    let mut gesture = SplitterGesture::new(SplitterConfig::default()).expect("valid config");
    let mut owner = Owner::expanded(250);
    owner.apply([SplitterIntent::Collapse]);

    drag(&mut gesture, &mut owner, 0, &[80, 160, 240]);
    assert!(!owner.collapsed);
    assert_eq!(owner.width, 240);
}
