//! Tab segment facade
//!
//! What a host view talks to: tab management through the shared template,
//! taps with double-tap detection, sign counts, layout and animation ticks.
//! Selection itself lives in [`SelectionController`].

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

use segment_indicator::{IndicatorState, Rect};
use segment_selection::{
    PagerScrollState, SegmentHost, SelectionController, SelectionSnapshot, TabSelectedListener,
};
use segment_tabs::{
    ColorResolver, LayoutParams, LayoutResult, SignCount, Tab, TabBuilder, TabError, TabMeasure,
};

use crate::config::Config;
use crate::Result;

/// How a tap was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Treated as a click on the tab
    Click,
    DoubleTap,
    /// Dropped: out of range, or the segment is busy
    Ignored,
}

pub struct TabSegment {
    config: Config,
    controller: SelectionController,
    template: Mutex<TabBuilder>,
    last_tap: Mutex<Option<(usize, Instant)>>,
}

impl TabSegment {
    pub fn new(config: Config) -> Self {
        let controller = SelectionController::new(config.indicator);
        controller.set_transition_duration(config.animation_duration());
        controller.set_interpolator(Arc::new(config.easing));

        let template = config.template.builder();

        Self {
            config,
            controller,
            template: Mutex::new(template),
            last_tap: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the underlying controller.
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn attach_host<H: SegmentHost + 'static>(&self, host: &Arc<H>) {
        self.controller.attach_host(host);
    }

    pub fn set_color_resolver(&self, resolver: Option<Arc<dyn ColorResolver>>) {
        self.controller.set_color_resolver(resolver);
    }

    pub fn add_listener(&self, listener: Arc<dyn TabSelectedListener>) {
        self.controller.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn TabSelectedListener>) {
        self.controller.remove_listener(listener);
    }

    /// A copy of the shared template; changes to it do not affect other tabs.
    pub fn tab_builder(&self) -> TabBuilder {
        self.template.lock().clone()
    }

    pub fn set_tab_builder(&self, builder: TabBuilder) {
        *self.template.lock() = builder;
    }

    pub fn add_tab(&self, tab: Tab) -> &Self {
        self.controller.add_tab(tab);
        self
    }

    /// Build a tab from the template and append it.
    pub fn add_text_tab(&self, text: impl Into<String>) -> &Self {
        let tab = self.template.lock().build(text);
        self.add_tab(tab)
    }

    pub fn replace_tab(&self, index: usize, tab: Tab) -> Result<()> {
        Ok(self.controller.replace_tab(index, tab)?)
    }

    pub fn update_tab_text(&self, index: usize, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        Ok(self.controller.update_tab(index, move |tab| tab.text = text)?)
    }

    pub fn reset(&self) {
        *self.last_tap.lock() = None;
        self.controller.reset();
    }

    pub fn notify_data_changed(&self) {
        self.controller.notify_data_changed();
    }

    pub fn tab_count(&self) -> usize {
        self.controller.tab_count()
    }

    pub fn tab(&self, index: usize) -> Option<Tab> {
        self.controller.tab(index)
    }

    pub fn show_sign_count(&self, index: usize, sign_count: SignCount) -> Result<()> {
        Ok(self
            .controller
            .update_tab(index, move |tab| tab.sign_count = sign_count)?)
    }

    pub fn clear_sign_count(&self, index: usize) -> Result<()> {
        self.show_sign_count(index, SignCount::None)
    }

    pub fn sign_count(&self, index: usize) -> Result<SignCount> {
        let len = self.tab_count();
        self.controller
            .tab(index)
            .map(|tab| tab.sign_count)
            .ok_or_else(|| TabError::IndexOutOfBounds { index, len }.into())
    }

    /// Badge text for a tab, honoring the configured digit limit.
    pub fn badge_text(&self, index: usize) -> Option<String> {
        self.controller
            .tab(index)
            .and_then(|tab| tab.sign_count.badge_text(self.config.sign_count_digits))
    }

    /// Select programmatically, animated unless configured otherwise.
    pub fn select(&self, index: usize) {
        self.controller
            .select_tab(index, self.config.select_no_animation, false);
    }

    pub fn select_tab(&self, index: usize, no_animation: bool, from_user_click: bool) {
        self.controller.select_tab(index, no_animation, from_user_click);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.controller.current_index()
    }

    pub fn update_indicator_position(&self, index: usize, offset_percent: f32) {
        self.controller.update_indicator_position(index, offset_percent);
    }

    pub fn set_pager_scroll_state(&self, state: PagerScrollState) {
        self.controller.set_pager_scroll_state(state);
    }

    pub fn tick(&self, now: Instant) -> bool {
        self.controller.tick(now)
    }

    pub fn cancel_transition(&self) {
        self.controller.cancel_transition();
    }

    /// A click on a tab. Ignored while a transition runs or the segment is held.
    pub fn on_tab_click(&self, index: usize) -> TapOutcome {
        if index >= self.tab_count() {
            return TapOutcome::Ignored;
        }
        if self.controller.is_busy() {
            tracing::debug!(index, "Ignoring tab click while busy");
            return TapOutcome::Ignored;
        }

        self.controller
            .select_tab(index, self.config.select_no_animation, true);
        TapOutcome::Click
    }

    /// A raw tap at `at`. A second tap on the same tab within the double-tap
    /// timeout is a double tap; any other tap is a click.
    pub fn on_tab_tap(&self, index: usize, at: Instant) -> TapOutcome {
        if index >= self.tab_count() {
            return TapOutcome::Ignored;
        }

        let is_double = {
            let mut last_tap = self.last_tap.lock();
            let is_double = matches!(
                *last_tap,
                Some((prev, when)) if prev == index
                    && at.saturating_duration_since(when) <= self.config.double_tap_timeout()
            );
            *last_tap = if is_double { None } else { Some((index, at)) };
            is_double
        };

        if is_double {
            tracing::debug!(index, "Double tap");
            self.controller.dispatch_double_tap(index);
            return TapOutcome::DoubleTap;
        }

        self.on_tab_click(index)
    }

    /// Lay out the row at `width` with host measurements.
    pub fn layout(&self, width: i32, measures: &[TabMeasure]) -> LayoutResult {
        let params = LayoutParams {
            mode: self.config.mode,
            width,
            padding_left: self.config.padding_left,
            padding_right: self.config.padding_right,
            follow_content: self.controller.indicator_style().follow_content,
        };
        self.controller.on_layout(&params, measures)
    }

    pub fn indicator(&self) -> IndicatorState {
        self.controller.indicator()
    }

    pub fn indicator_bounds(&self, container_height: i32) -> Option<Rect> {
        self.controller.indicator_bounds(container_height)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        self.controller.snapshot()
    }
}
