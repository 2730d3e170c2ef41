//! Tab Segment Demo
//!
//! Drives a segment the way a UI would: a frame ticker advances transitions
//! while a short script taps tabs, drags a pager and updates badges.
//!
//! Usage: `segment-demo [config.json]`

mod host;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{interval, Interval, MissedTickBehavior};

use segment_core::{
    Config, LayoutMode, PagerBridge, PagerScrollState, SignCount, TabMeasure, TabSegment,
};

use crate::host::{ConsoleHost, ConsolePager, LoggingListener};

const FRAME: Duration = Duration::from_millis(16);
const VIEWPORT_WIDTH: i32 = 320;
const TABS: [(&str, i32); 5] = [
    ("Inbox", 72),
    ("Starred", 96),
    ("Sent", 64),
    ("Newsletters", 120),
    ("Drafts", 88),
];

fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => Ok(Config {
            mode: LayoutMode::Scrollable { item_space: 24 },
            ..Default::default()
        }),
    }
}

/// Tick until the running transition finishes.
async fn animate(segment: &TabSegment, ticker: &mut Interval) {
    loop {
        let now = ticker.tick().await.into_std();
        if !segment.tick(now) {
            break;
        }
    }
}

fn print_snapshot(label: &str, segment: &TabSegment) -> Result<()> {
    let snapshot = serde_json::to_string(&segment.snapshot())?;
    println!("{:>14}: {}", label, snapshot);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    segment_core::init_logging();

    let config = load_config()?;
    let segment = TabSegment::new(config);

    let host = Arc::new(ConsoleHost::new(VIEWPORT_WIDTH));
    segment.attach_host(&host);
    segment.add_listener(Arc::new(LoggingListener));

    for (text, _) in TABS {
        segment.add_text_tab(text);
    }
    segment.notify_data_changed();

    let measures: Vec<TabMeasure> = TABS
        .iter()
        .map(|(_, width)| TabMeasure::new(*width, 12, width - 24))
        .collect();
    let layout = segment.layout(VIEWPORT_WIDTH, &measures);
    host.set_content_width(layout.content_width);
    tracing::info!(
        tabs = segment.tab_count(),
        content_width = layout.content_width,
        "Tab segment ready"
    );

    let pager = Arc::new(ConsolePager::new(0));
    let bridge = PagerBridge::new(segment.controller().clone());
    bridge.attach(&pager);
    print_snapshot("attached", &segment)?;

    let mut ticker = interval(FRAME);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Animated switch
    segment.on_tab_click(3);
    animate(&segment, &mut ticker).await;
    print_snapshot("tap 3", &segment)?;

    // A request while animating is parked, then applied
    segment.on_tab_click(1);
    segment.select(4);
    print_snapshot("busy", &segment)?;
    animate(&segment, &mut ticker).await;
    print_snapshot("pending done", &segment)?;

    // Swipe the pager back one page
    bridge.on_page_scroll_state_changed(PagerScrollState::Dragging);
    for step in (1..=4).rev() {
        bridge.on_page_scrolled(3, step as f32 * 0.2);
    }
    bridge.on_page_selected(3);
    bridge.on_page_scroll_state_changed(PagerScrollState::Idle);
    print_snapshot("swipe", &segment)?;

    // A held segment parks taps as well
    host.set_held(true);
    segment.select(0);
    host.set_held(false);
    segment.controller().on_lock_released();
    print_snapshot("released", &segment)?;

    let now = Instant::now();
    segment.on_tab_tap(0, now);
    segment.on_tab_tap(0, now + Duration::from_millis(120));

    segment.show_sign_count(1, SignCount::Count(7))?;
    segment.show_sign_count(2, SignCount::RedPoint)?;
    segment.show_sign_count(4, SignCount::Count(250))?;
    for index in 0..segment.tab_count() {
        if let Some(badge) = segment.badge_text(index) {
            println!("{:>14}: tab {} shows {}", "badge", index, badge);
        }
    }

    tracing::info!(frames = host.frames(), "Demo finished");
    Ok(())
}
