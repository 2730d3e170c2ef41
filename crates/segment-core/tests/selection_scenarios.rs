//! End-to-end selection scenarios through the `TabSegment` facade.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use segment_core::{
    blend, Argb, Config, IndicatorGeometry, Pager, PagerBridge, PagerScrollState, SegmentHost,
    TabMeasure, TabSegment, TabSelectedListener, TapOutcome,
};

#[derive(Default)]
struct Events {
    log: Mutex<Vec<String>>,
}

impl Events {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.lock())
    }

    fn count(&self, event: &str) -> usize {
        self.log.lock().iter().filter(|e| *e == event).count()
    }
}

impl TabSelectedListener for Events {
    fn on_tab_selected(&self, index: usize) {
        self.log.lock().push(format!("selected {}", index));
    }

    fn on_tab_unselected(&self, index: usize) {
        self.log.lock().push(format!("unselected {}", index));
    }

    fn on_tab_reselected(&self, index: usize) {
        self.log.lock().push(format!("reselected {}", index));
    }
}

struct NullHost;

impl SegmentHost for NullHost {}

fn segment_with(config: Config, count: usize) -> (TabSegment, Arc<Events>) {
    let segment = TabSegment::new(config);
    for i in 0..count {
        segment.add_text_tab(format!("Tab {}", i));
    }
    segment.notify_data_changed();
    segment.layout(100 * count as i32, &vec![TabMeasure::filled(100); count]);

    let events = Arc::new(Events::default());
    segment.add_listener(events.clone());
    (segment, events)
}

fn segment(count: usize) -> (TabSegment, Arc<Events>) {
    segment_with(Config::default(), count)
}

fn one_hot(count: usize, index: usize) -> Vec<f32> {
    (0..count).map(|i| if i == index { 1.0 } else { 0.0 }).collect()
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn non_animated_selection_leaves_exactly_one_tab_selected() {
    let (segment, _) = segment(5);
    for index in [0, 4, 2, 2, 1, 3, 0] {
        segment.select_tab(index, true, false);
        let snapshot = segment.snapshot();
        assert_eq!(snapshot.current, Some(index));
        assert_eq!(snapshot.fractions, one_hot(5, index));
        assert_eq!(segment.indicator().left, 100 * index as i32);
    }
}

#[test]
fn reselecting_is_idempotent_and_reports_each_click() {
    let (segment, events) = segment(3);
    segment.select_tab(1, true, false);
    events.take();

    let before = segment.snapshot();
    segment.select_tab(1, true, true);
    assert_eq!(segment.snapshot(), before);
    segment.select_tab(1, true, true);
    assert_eq!(segment.snapshot(), before);

    assert_eq!(events.count("reselected 1"), 2);
    assert_eq!(events.take().len(), 2);
}

#[test]
fn interpolation_hits_endpoints_exactly() {
    let a = (10, 40, Argb(0xFFFF_0000));
    let b = (210, 80, Argb(0xFF00_00FF));

    let start = IndicatorGeometry::interpolate(a, b, 0.0);
    assert_eq!((start.left, start.width, start.color), a);

    let end = IndicatorGeometry::interpolate(a, b, 1.0);
    assert_eq!((end.left, end.width, end.color), b);

    let middle = IndicatorGeometry::interpolate(a, b, 0.5);
    assert_eq!(middle.left, 110);
    assert_eq!(middle.width, 60);
}

#[test]
fn color_blend_is_channel_wise() {
    let table = [
        (0xFFFF_0000, 0xFF00_00FF, 0.5, 0xFF80_0080),
        (0x0000_0000, 0xFFFF_FFFF, 0.5, 0x8080_8080),
        (0xFF10_2030, 0x80F0_E0D0, 0.25, 0xDF48_5058),
        (0xFF00_FF00, 0xFF00_FF00, 0.7, 0xFF00_FF00),
    ];

    for (from, to, fraction, expected) in table {
        assert_eq!(
            blend(Argb(from), Argb(to), fraction),
            Argb(expected),
            "blend({:#010X}, {:#010X}, {})",
            from,
            to,
            fraction
        );
    }
}

#[test]
fn request_during_transition_becomes_pending_then_resolves() {
    let (segment, events) = segment(3);
    segment.select_tab(0, true, false);
    events.take();

    segment.select_tab(1, false, false);
    let t0 = Instant::now();
    assert!(segment.tick(t0));
    assert!(segment.tick(t0 + Duration::from_millis(100)));

    segment.select_tab(2, false, false);
    assert_eq!(segment.snapshot().pending, Some(2));
    assert_eq!(segment.selected_index(), Some(1));

    assert!(!segment.tick(t0 + Duration::from_millis(200)));
    let snapshot = segment.snapshot();
    assert_eq!(snapshot.current, Some(2));
    assert_eq!(snapshot.pending, None);
    assert!(!snapshot.transition_in_progress);
    assert_eq!(snapshot.fractions, one_hot(3, 2));
    assert_eq!(
        events.take(),
        vec!["selected 1", "unselected 0", "unselected 1", "selected 2"]
    );
}

#[test]
fn cancelling_mid_flight_stays_on_previous_tab() {
    let (segment, events) = segment(2);
    segment.select_tab(0, true, false);
    events.take();

    segment.select_tab(1, false, false);
    let t0 = Instant::now();
    segment.tick(t0);
    segment.tick(t0 + Duration::from_millis(90));
    assert!(segment.snapshot().fractions[1] > 0.0);

    segment.cancel_transition();
    let snapshot = segment.snapshot();
    assert_eq!(snapshot.current, Some(0));
    assert_eq!(snapshot.fractions, vec![1.0, 0.0]);
    assert!(!snapshot.transition_in_progress);
    assert_eq!(segment.indicator().left, 0);
    assert!(events.take().is_empty());
}

#[test]
fn drag_follow_blends_neighbours() {
    let (segment, _) = segment(3);
    segment.select_tab(0, true, false);

    segment.update_indicator_position(0, 0.3);
    let snapshot = segment.snapshot();
    assert!(close(snapshot.fractions[0], 0.7));
    assert!(close(snapshot.fractions[1], 0.3));
    assert_eq!(snapshot.indicator.left, 30);
    assert_eq!(snapshot.indicator.width, 100);
}

#[test]
fn taps_are_ignored_while_transitioning() {
    let (segment, events) = segment(3);
    segment.select(0);
    events.take();

    assert_eq!(segment.on_tab_click(1), TapOutcome::Click);
    assert_eq!(segment.on_tab_click(2), TapOutcome::Ignored);

    let t0 = Instant::now();
    assert!(segment.tick(t0));
    assert!(!segment.tick(t0 + Duration::from_millis(250)));
    assert_eq!(segment.selected_index(), Some(1));
    assert_eq!(segment.snapshot().pending, None);
    assert_eq!(events.take(), vec!["selected 1", "unselected 0"]);

    // Once settled, taps go through again
    assert_eq!(segment.on_tab_click(2), TapOutcome::Click);
    assert!(segment.controller().is_transitioning());
}

#[test]
fn dropped_host_makes_segment_inert() {
    let (segment, events) = segment(2);
    let host = Arc::new(NullHost);
    segment.attach_host(&host);
    segment.select(0);
    assert_eq!(segment.selected_index(), Some(0));

    drop(host);
    segment.select_tab(1, true, true);
    segment.update_indicator_position(0, 0.5);
    assert_eq!(segment.selected_index(), Some(0));
    assert_eq!(segment.snapshot().fractions, vec![1.0, 0.0]);
    assert_eq!(events.take(), vec!["selected 0"]);
}

struct RecordingPager {
    current: AtomicUsize,
}

impl Pager for RecordingPager {
    fn set_current_item(&self, index: usize, _smooth: bool) {
        self.current.store(index, Ordering::SeqCst);
    }

    fn current_item(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }
}

#[test]
fn pager_and_segment_stay_in_step() {
    let (segment, _) = segment_with(
        Config {
            select_no_animation: true,
            ..Default::default()
        },
        4,
    );
    let pager = Arc::new(RecordingPager {
        current: AtomicUsize::new(1),
    });
    let bridge = PagerBridge::new(segment.controller().clone());
    bridge.attach(&pager);
    assert_eq!(segment.selected_index(), Some(1));

    // Tab tap moves the pager
    segment.on_tab_click(3);
    assert_eq!(pager.current_item(), 3);

    // Swipe back one page
    bridge.on_page_scroll_state_changed(PagerScrollState::Dragging);
    bridge.on_page_scrolled(2, 0.6);
    assert!(close(segment.snapshot().fractions[3], 0.6));
    bridge.on_page_selected(2);
    assert_eq!(segment.snapshot().pending, Some(2));

    // Taps are parked while the pager is dragging
    assert_eq!(segment.on_tab_click(0), TapOutcome::Ignored);

    bridge.on_page_scroll_state_changed(PagerScrollState::Settling);
    bridge.on_page_scroll_state_changed(PagerScrollState::Idle);
    let snapshot = segment.snapshot();
    assert_eq!(snapshot.current, Some(2));
    assert_eq!(snapshot.pending, None);
    assert_eq!(snapshot.fractions, one_hot(4, 2));
    assert_eq!(pager.current_item(), 2);
}

#[test]
fn data_change_mid_transition_forgets_parked_request() {
    let (segment, events) = segment(4);
    segment.select_tab(0, true, false);

    segment.select_tab(1, false, false);
    let t0 = Instant::now();
    segment.tick(t0);
    segment.select_tab(2, false, false);
    assert_eq!(segment.snapshot().pending, Some(2));

    segment.notify_data_changed();
    let snapshot = segment.snapshot();
    assert_eq!(snapshot.current, Some(0));
    assert_eq!(snapshot.pending, None);
    assert!(!snapshot.transition_in_progress);
    events.take();

    segment.select_tab(3, false, false);
    let t1 = Instant::now();
    segment.tick(t1);
    assert!(!segment.tick(t1 + Duration::from_millis(250)));
    let snapshot = segment.snapshot();
    assert_eq!(snapshot.current, Some(3));
    assert_eq!(snapshot.pending, None);
    assert_eq!(snapshot.fractions, one_hot(4, 3));
    assert_eq!(events.take(), vec!["selected 3", "unselected 0"]);
}

#[test]
fn replacing_tabs_keeps_selection_state_consistent() {
    let (segment, _) = segment(3);
    segment.select_tab(0, true, false);

    // Replacing the incoming tab mid-flight stays on the outgoing one
    segment.select_tab(2, false, false);
    segment.tick(Instant::now());
    segment.select_tab(1, false, false);
    segment
        .replace_tab(2, segment.tab_builder().build("Archive"))
        .unwrap();
    let snapshot = segment.snapshot();
    assert_eq!(snapshot.current, Some(0));
    assert_eq!(snapshot.pending, None);
    assert!(!snapshot.transition_in_progress);
    assert_eq!(snapshot.fractions, one_hot(3, 0));

    // A request parked behind a pager drag survives a replace
    segment.set_pager_scroll_state(PagerScrollState::Dragging);
    segment.select_tab(1, true, false);
    segment
        .replace_tab(2, segment.tab_builder().build("Spam"))
        .unwrap();
    assert_eq!(segment.snapshot().pending, Some(1));
    assert_eq!(segment.selected_index(), Some(0));

    segment.set_pager_scroll_state(PagerScrollState::Idle);
    let snapshot = segment.snapshot();
    assert_eq!(snapshot.current, Some(1));
    assert_eq!(snapshot.pending, None);
    assert_eq!(snapshot.fractions, one_hot(3, 1));
}
