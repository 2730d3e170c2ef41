//! Pager binding
//!
//! Keeps a paged content view and the tab segment in step: tab selection
//! moves the pager, pager scrolling drags the indicator, and a settled page
//! selects its tab.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

use segment_selection::{PagerScrollState, SelectionController, TabSelectedListener};

/// The paged view the segment drives.
pub trait Pager: Send + Sync {
    fn set_current_item(&self, index: usize, smooth: bool);
    fn current_item(&self) -> usize;
}

/// Moves the pager when a tab gets selected.
struct PagerFollower {
    pager: Weak<dyn Pager>,
}

impl TabSelectedListener for PagerFollower {
    fn on_tab_selected(&self, index: usize) {
        if let Some(pager) = self.pager.upgrade() {
            if pager.current_item() != index {
                pager.set_current_item(index, false);
            }
        }
    }
}

pub struct PagerBridge {
    controller: SelectionController,
    follower: Mutex<Option<Arc<dyn TabSelectedListener>>>,
}

impl PagerBridge {
    pub fn new(controller: SelectionController) -> Self {
        Self {
            controller,
            follower: Mutex::new(None),
        }
    }

    /// Bind to `pager` and select its current page. Replaces any earlier pager.
    pub fn attach<P: Pager + 'static>(&self, pager: &Arc<P>) {
        self.detach();

        let pager: Arc<dyn Pager> = pager.clone();
        let follower: Arc<dyn TabSelectedListener> = Arc::new(PagerFollower {
            pager: Arc::downgrade(&pager),
        });
        self.controller.add_listener(follower.clone());
        *self.follower.lock() = Some(follower);

        let index = pager.current_item();
        tracing::debug!(index, "Attached pager");
        self.controller.select_tab(index, true, false);
    }

    pub fn detach(&self) {
        if let Some(follower) = self.follower.lock().take() {
            self.controller.remove_listener(&follower);
            tracing::debug!("Detached pager");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.follower.lock().is_some()
    }

    pub fn on_page_scroll_state_changed(&self, state: PagerScrollState) {
        self.controller.set_pager_scroll_state(state);
    }

    /// `position` is the page at the left edge, `offset` how far the next
    /// page has scrolled in.
    pub fn on_page_scrolled(&self, position: usize, offset: f32) {
        self.controller.update_indicator_position(position, offset);
    }

    pub fn on_page_selected(&self, position: usize) {
        if self.controller.retarget_pending(position) {
            tracing::debug!(position, "Page selected while busy, retargeted pending tab");
            return;
        }
        self.controller.select_tab(position, true, false);
    }
}

impl Drop for PagerBridge {
    fn drop(&mut self) {
        self.detach();
    }
}
