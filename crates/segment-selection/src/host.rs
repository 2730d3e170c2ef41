//! Host collaborators
//!
//! The host owns rendering, scrolling and the paired pager. The controller
//! only holds a weak handle to it, and listeners are notified after the
//! controller's internal lock is released.

use serde::{Deserialize, Serialize};

/// View that renders the segment.
pub trait SegmentHost: Send + Sync {
    fn invalidate(&self) {}

    fn request_layout(&self) {}

    /// True while an external gesture owns the segment, e.g. a pager mid-scroll
    fn need_prevent_event(&self) -> bool {
        false
    }

    /// Horizontal scroll offset of the tab row
    fn scroll_x(&self) -> i32 {
        0
    }

    /// Visible width of the tab row
    fn viewport_width(&self) -> i32 {
        0
    }

    fn smooth_scroll_by(&self, _dx: i32) {}
}

pub trait TabSelectedListener: Send + Sync {
    fn on_tab_selected(&self, _index: usize) {}

    fn on_tab_unselected(&self, _index: usize) {}

    /// The already-selected tab was tapped again
    fn on_tab_reselected(&self, _index: usize) {}

    fn on_double_tap(&self, _index: usize) {}
}

/// Scroll state of a paired pager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagerScrollState {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl PagerScrollState {
    pub fn is_idle(&self) -> bool {
        matches!(self, PagerScrollState::Idle)
    }
}
