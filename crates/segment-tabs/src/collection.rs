//! Tab collection
//!
//! Ordered tabs plus the realized per-tab view state. Views are rebuilt by
//! [`TabCollection::setup`], so between an `add_tab` and the next setup the
//! two lists may have different lengths.

use serde::Serialize;

use crate::error::TabError;
use crate::tab::Tab;
use crate::Result;

/// Realized state of one tab slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TabView {
    pub selected: bool,
    /// 0.0 = fully normal look, 1.0 = fully selected look
    pub select_fraction: f32,
    /// Slot bounds from the last layout pass
    pub left: i32,
    pub width: i32,
}

impl TabView {
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn set_select_fraction(&mut self, fraction: f32) {
        self.select_fraction = fraction.clamp(0.0, 1.0);
    }

    /// Snap to the fully selected or fully normal look.
    pub fn settle(&mut self, selected: bool) {
        self.selected = selected;
        self.select_fraction = if selected { 1.0 } else { 0.0 };
    }
}

#[derive(Debug, Clone, Default)]
pub struct TabCollection {
    tabs: Vec<Tab>,
    views: Vec<TabView>,
}

impl TabCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tab(&mut self, tab: Tab) {
        tracing::debug!(index = self.tabs.len(), text = %tab.text, "Added tab");
        self.tabs.push(tab);
    }

    /// Replace the tab at `index`, returning the old one.
    pub fn replace_item(&mut self, index: usize, tab: Tab) -> Result<Tab> {
        let len = self.tabs.len();
        let slot = self
            .tabs
            .get_mut(index)
            .ok_or(TabError::IndexOutOfBounds { index, len })?;

        let old = std::mem::replace(slot, tab);
        if let Some(view) = self.views.get_mut(index) {
            view.settle(false);
        }

        tracing::debug!(index, "Replaced tab");
        Ok(old)
    }

    pub fn clear(&mut self) {
        self.tabs.clear();
        self.views.clear();
    }

    /// Rebuild views so there is exactly one per tab.
    ///
    /// Existing view state is kept for indices that survive.
    pub fn setup(&mut self) {
        self.views.resize(self.tabs.len(), TabView::default());
    }

    /// Return every view to the normal look.
    pub fn unselect_all(&mut self) {
        for view in &mut self.views {
            view.settle(false);
        }
    }

    pub fn is_synced(&self) -> bool {
        self.tabs.len() == self.views.len()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    pub fn view(&self, index: usize) -> Option<&TabView> {
        self.views.get(index)
    }

    pub fn view_mut(&mut self, index: usize) -> Option<&mut TabView> {
        self.views.get_mut(index)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn views(&self) -> &[TabView] {
        &self.views
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut [Tab], &mut [TabView]) {
        (self.tabs.as_mut_slice(), self.views.as_mut_slice())
    }
}
