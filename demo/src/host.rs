//! Console stand-ins for the view, the pager and a listener

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicUsize, Ordering};

use segment_core::{Pager, SegmentHost, TabSelectedListener};

/// Renders nothing; counts frames and tracks the row's scroll offset.
pub struct ConsoleHost {
    viewport_width: i32,
    content_width: AtomicI32,
    scroll_x: AtomicI32,
    frames: AtomicU32,
    held: AtomicBool,
}

impl ConsoleHost {
    pub fn new(viewport_width: i32) -> Self {
        Self {
            viewport_width,
            content_width: AtomicI32::new(0),
            scroll_x: AtomicI32::new(0),
            frames: AtomicU32::new(0),
            held: AtomicBool::new(false),
        }
    }

    pub fn set_content_width(&self, width: i32) {
        self.content_width.store(width, Ordering::SeqCst);
    }

    /// Simulate a gesture holding the segment
    pub fn set_held(&self, held: bool) {
        self.held.store(held, Ordering::SeqCst);
    }

    pub fn frames(&self) -> u32 {
        self.frames.load(Ordering::SeqCst)
    }
}

impl SegmentHost for ConsoleHost {
    fn invalidate(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
    }

    fn request_layout(&self) {
        tracing::trace!("Layout requested");
    }

    fn need_prevent_event(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    fn scroll_x(&self) -> i32 {
        self.scroll_x.load(Ordering::SeqCst)
    }

    fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    fn smooth_scroll_by(&self, dx: i32) {
        let max = (self.content_width.load(Ordering::SeqCst) - self.viewport_width).max(0);
        let x = (self.scroll_x.load(Ordering::SeqCst) + dx).clamp(0, max);
        self.scroll_x.store(x, Ordering::SeqCst);
        tracing::info!(dx, scroll_x = x, "Scrolled tab row");
    }
}

pub struct ConsolePager {
    current: AtomicUsize,
}

impl ConsolePager {
    pub fn new(current: usize) -> Self {
        Self {
            current: AtomicUsize::new(current),
        }
    }
}

impl Pager for ConsolePager {
    fn set_current_item(&self, index: usize, smooth: bool) {
        self.current.store(index, Ordering::SeqCst);
        tracing::info!(index, smooth, "Pager moved");
    }

    fn current_item(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }
}

pub struct LoggingListener;

impl TabSelectedListener for LoggingListener {
    fn on_tab_selected(&self, index: usize) {
        tracing::info!(index, "Tab selected");
    }

    fn on_tab_unselected(&self, index: usize) {
        tracing::info!(index, "Tab unselected");
    }

    fn on_tab_reselected(&self, index: usize) {
        tracing::info!(index, "Tab reselected");
    }

    fn on_double_tap(&self, index: usize) {
        tracing::info!(index, "Tab double tapped");
    }
}
