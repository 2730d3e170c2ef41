//! Selection controller
//!
//! Owns the tab collection, the indicator and the selection state. The
//! controller is a cheap `Clone` handle; all clones share one state.
//!
//! Listener and host callbacks are never invoked while the internal lock is
//! held. Selection sets a guard flag for the duration of its callbacks, so a
//! listener that selects again from inside a callback is ignored.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use segment_indicator::{
    Easing, IndicatorGeometry, IndicatorState, IndicatorStyle, Interpolator, Rect,
};
use segment_tabs::{
    ColorResolver, LayoutMode, LayoutParams, LayoutResult, Tab, TabCollection, TabError,
    TabMeasure, TabView,
};

use crate::host::{PagerScrollState, SegmentHost, TabSelectedListener};
use crate::scroll::reveal_scroll_delta;
use crate::transition::{Transition, DEFAULT_TRANSITION_DURATION};
use crate::Result;

/// Side effects gathered under the lock, delivered after it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    Selected(usize),
    Unselected(usize),
    Reselected(usize),
    DoubleTap(usize),
    Invalidate,
    RequestLayout,
    ScrollBy(i32),
}

/// Host facts sampled before taking the lock.
#[derive(Debug, Clone, Copy, Default)]
struct HostView {
    prevent_event: bool,
    scroll_x: i32,
    viewport_width: i32,
}

enum HostLink {
    /// Headless: no host was ever attached
    Detached,
    Attached(Weak<dyn SegmentHost>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    pub current: Option<usize>,
    pub pending: Option<usize>,
    pub transition_in_progress: bool,
    pub fractions: Vec<f32>,
    pub indicator: IndicatorState,
}

struct Inner {
    tabs: TabCollection,
    indicator: IndicatorGeometry,
    current: Option<usize>,
    pending: Option<usize>,
    transition: Option<Transition>,
    in_selection: bool,
    pager_state: PagerScrollState,
    mode: LayoutMode,
    content_width: i32,
    duration: Duration,
    interpolator: Arc<dyn Interpolator>,
    resolver: Option<Arc<dyn ColorResolver>>,
}

#[derive(Clone)]
pub struct SelectionController {
    inner: Arc<Mutex<Inner>>,
    host: Arc<RwLock<HostLink>>,
    listeners: Arc<RwLock<Vec<Arc<dyn TabSelectedListener>>>>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(IndicatorStyle::default())
    }
}

impl SelectionController {
    pub fn new(style: IndicatorStyle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                tabs: TabCollection::new(),
                indicator: IndicatorGeometry::new(style),
                current: None,
                pending: None,
                transition: None,
                in_selection: false,
                pager_state: PagerScrollState::Idle,
                mode: LayoutMode::Fixed,
                content_width: 0,
                duration: DEFAULT_TRANSITION_DURATION,
                interpolator: Arc::new(Easing::Linear),
                resolver: None,
            })),
            host: Arc::new(RwLock::new(HostLink::Detached)),
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn set_transition_duration(&self, duration: Duration) {
        self.inner.lock().duration = duration;
    }

    pub fn set_interpolator(&self, interpolator: Arc<dyn Interpolator>) {
        self.inner.lock().interpolator = interpolator;
    }

    pub fn set_color_resolver(&self, resolver: Option<Arc<dyn ColorResolver>>) {
        self.inner.lock().resolver = resolver;
    }

    pub fn set_indicator_style(&self, style: IndicatorStyle) {
        let mut inner = self.inner.lock();
        inner.indicator.set_style(style);
        if let Some(current) = inner.current {
            inner.layout_indicator_on(current);
        }
    }

    pub fn indicator_style(&self) -> IndicatorStyle {
        *self.inner.lock().indicator.style()
    }

    /// Keep a non-owning handle to the host view.
    ///
    /// Once the host is dropped, selection, ticks, drag updates and layout
    /// passes do nothing.
    pub fn attach_host<H: SegmentHost + 'static>(&self, host: &Arc<H>) {
        let host: Arc<dyn SegmentHost> = host.clone();
        *self.host.write() = HostLink::Attached(Arc::downgrade(&host));
    }

    pub fn detach_host(&self) {
        *self.host.write() = HostLink::Detached;
    }

    pub fn add_listener(&self, listener: Arc<dyn TabSelectedListener>) {
        self.listeners.write().push(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn TabSelectedListener>) {
        let target = Arc::as_ptr(listener) as *const ();
        self.listeners
            .write()
            .retain(|l| Arc::as_ptr(l) as *const () != target);
    }

    pub fn clear_listeners(&self) {
        self.listeners.write().clear();
    }

    pub fn add_tab(&self, tab: Tab) {
        self.inner.lock().tabs.add_tab(tab);
        self.deliver(vec![Effect::RequestLayout]);
    }

    /// Realize views for tabs added since the last setup.
    pub fn setup(&self) {
        self.inner.lock().tabs.setup();
    }

    /// Replace a tab. Replacing the selected tab clears the selection; the
    /// caller selects again if it wants one.
    pub fn replace_tab(&self, index: usize, tab: Tab) -> Result<()> {
        {
            let mut inner = self.inner.lock();
            inner.tabs.replace_item(index, tab)?;
            if inner.current == Some(index) {
                inner.current = None;
                tracing::debug!(index, "Replaced the selected tab, selection cleared");
            }
        }

        self.notify_data_changed();
        Ok(())
    }

    /// Edit a tab in place (text, sign count, colors).
    pub fn update_tab<F>(&self, index: usize, f: F) -> Result<()>
    where
        F: FnOnce(&mut Tab),
    {
        {
            let mut inner = self.inner.lock();
            let len = inner.tabs.len();
            let tab = inner
                .tabs
                .get_mut(index)
                .ok_or(TabError::IndexOutOfBounds { index, len })?;
            f(tab);
        }

        self.deliver(vec![Effect::RequestLayout, Effect::Invalidate]);
        Ok(())
    }

    /// Rebuild views and re-apply the current selection without animation.
    ///
    /// A running transition is dropped as if cancelled, together with the
    /// index parked behind it. An index parked by a host or pager hold is kept
    /// and still resolves once the hold ends.
    pub fn notify_data_changed(&self) {
        let effects = {
            let mut inner = self.inner.lock();
            let restore = match inner.transition.take() {
                Some(transition) => {
                    if let Some(pending) = inner.pending.take() {
                        tracing::debug!(pending, "Dropped pending selection with data change");
                    }
                    Some(transition.from())
                }
                None => inner.current,
            };
            inner.current = None;
            inner.tabs.setup();
            inner.tabs.unselect_all();

            let mut effects = vec![Effect::RequestLayout];
            if let Some(index) = restore.filter(|i| *i < inner.tabs.view_count()) {
                inner.settle_on(index);
                inner.current = Some(index);
                effects.push(Effect::Selected(index));
                effects.push(Effect::Invalidate);
            }
            effects
        };

        self.deliver(effects);
    }

    /// Drop every tab and all selection state. A running transition is
    /// discarded without callbacks.
    pub fn reset(&self) {
        {
            let mut inner = self.inner.lock();
            inner.tabs.clear();
            inner.current = None;
            inner.pending = None;
            inner.transition = None;
            inner.indicator.update_info(0, 0, segment_tabs::Argb::TRANSPARENT);
        }

        tracing::debug!("Reset tab segment");
        self.deliver(vec![Effect::RequestLayout, Effect::Invalidate]);
    }

    /// Run a layout pass with host measurements, then rest the indicator on
    /// the current tab unless a transition or drag owns it.
    pub fn on_layout(&self, params: &LayoutParams, measures: &[TabMeasure]) -> LayoutResult {
        let Some(env) = self.environment() else {
            return LayoutResult::default();
        };

        let mut inner = self.inner.lock();
        let result = inner.tabs.layout(params, measures);
        inner.mode = params.mode;
        inner.content_width = result.content_width;

        if let Some(current) = inner.current {
            if inner.transition.is_none() && !inner.is_locked(&env) {
                inner.layout_indicator_on(current);
            }
        }

        result
    }

    /// Select `index`.
    ///
    /// Out-of-range indices are ignored. While a transition runs or the host
    /// holds the segment, the request is parked as the pending index.
    pub fn select_tab(&self, index: usize, no_animation: bool, from_user_click: bool) {
        let Some(env) = self.environment() else {
            return;
        };

        let effects = {
            let mut inner = self.inner.lock();
            if inner.in_selection {
                tracing::trace!(index, "Dropped re-entrant selection");
                return;
            }
            inner.in_selection = true;

            let mut effects = Vec::new();
            inner.select(index, no_animation, from_user_click, &env, &mut effects);
            effects
        };

        self.deliver(effects);
        self.inner.lock().in_selection = false;
    }

    /// Advance the running transition to `now`.
    ///
    /// Returns true while further ticks are needed.
    pub fn tick(&self, now: Instant) -> bool {
        let Some(env) = self.environment() else {
            return false;
        };

        let (effects, pending, running) = self.inner.lock().advance(now, &env);
        self.deliver(effects);

        if let Some(index) = pending {
            tracing::debug!(index, "Resolving pending selection");
            self.select_tab(index, true, false);
        }

        running
    }

    /// Abort the running transition and stay on the previous tab.
    pub fn cancel_transition(&self) {
        let effects = self.inner.lock().cancel();
        self.deliver(effects);
    }

    /// Follow a pager drag: blend from `index` towards its neighbour by
    /// `offset_percent` in `[-1, 1]`.
    pub fn update_indicator_position(&self, index: usize, offset_percent: f32) {
        if self.environment().is_none() {
            return;
        }

        let effects = self.inner.lock().follow_drag(index, offset_percent);
        self.deliver(effects);
    }

    pub fn set_pager_scroll_state(&self, state: PagerScrollState) {
        self.inner.lock().pager_state = state;
        if state.is_idle() {
            self.on_lock_released();
        }
    }

    pub fn pager_scroll_state(&self) -> PagerScrollState {
        self.inner.lock().pager_state
    }

    /// Consume the pending index once nothing holds the segment anymore.
    pub fn on_lock_released(&self) {
        let pending = {
            let mut inner = self.inner.lock();
            if inner.transition.is_none() && inner.pager_state.is_idle() {
                inner.pending.take()
            } else {
                None
            }
        };

        if let Some(index) = pending {
            tracing::debug!(index, "Resolving pending selection");
            self.select_tab(index, true, false);
        }
    }

    /// Point an existing pending selection at `index`.
    /// Returns false when nothing was pending.
    pub fn retarget_pending(&self, index: usize) -> bool {
        let mut inner = self.inner.lock();
        match inner.pending {
            Some(_) => {
                inner.pending = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn dispatch_double_tap(&self, index: usize) {
        if index < self.inner.lock().tabs.view_count() {
            self.deliver(vec![Effect::DoubleTap(index)]);
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.inner.lock().current
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.inner.lock().pending
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.lock().transition.is_some()
    }

    /// True while a transition runs or something holds the segment, i.e.
    /// when a tap would be parked instead of selecting.
    pub fn is_busy(&self) -> bool {
        let Some(env) = self.environment() else {
            return true;
        };
        let inner = self.inner.lock();
        inner.transition.is_some() || inner.is_locked(&env)
    }

    pub fn is_in_selection(&self) -> bool {
        self.inner.lock().in_selection
    }

    pub fn tab_count(&self) -> usize {
        self.inner.lock().tabs.len()
    }

    pub fn tab(&self, index: usize) -> Option<Tab> {
        self.inner.lock().tabs.get(index).cloned()
    }

    pub fn view(&self, index: usize) -> Option<TabView> {
        self.inner.lock().tabs.view(index).copied()
    }

    pub fn select_fraction(&self, index: usize) -> Option<f32> {
        self.view(index).map(|v| v.select_fraction)
    }

    pub fn indicator(&self) -> IndicatorState {
        self.inner.lock().indicator.state()
    }

    pub fn indicator_bounds(&self, container_height: i32) -> Option<Rect> {
        self.inner.lock().indicator.bounds(container_height)
    }

    pub fn mode(&self) -> LayoutMode {
        self.inner.lock().mode
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        let inner = self.inner.lock();
        SelectionSnapshot {
            current: inner.current,
            pending: inner.pending,
            transition_in_progress: inner.transition.is_some(),
            fractions: inner.tabs.views().iter().map(|v| v.select_fraction).collect(),
            indicator: inner.indicator.state(),
        }
    }

    /// Run `f` against the collection without cloning it.
    pub fn with_tabs<T>(&self, f: impl FnOnce(&TabCollection) -> T) -> T {
        f(&self.inner.lock().tabs)
    }

    fn live_host(&self) -> Option<Arc<dyn SegmentHost>> {
        match &*self.host.read() {
            HostLink::Detached => None,
            HostLink::Attached(weak) => weak.upgrade(),
        }
    }

    /// Sample the host. `None` when the host view has been dropped.
    fn environment(&self) -> Option<HostView> {
        let weak = match &*self.host.read() {
            HostLink::Detached => return Some(HostView::default()),
            HostLink::Attached(weak) => weak.clone(),
        };

        match weak.upgrade() {
            Some(host) => Some(HostView {
                prevent_event: host.need_prevent_event(),
                scroll_x: host.scroll_x(),
                viewport_width: host.viewport_width(),
            }),
            None => {
                tracing::debug!("Host view is gone, ignoring call");
                None
            }
        }
    }

    fn deliver(&self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }

        let host = self.live_host();
        let listeners: Vec<Arc<dyn TabSelectedListener>> = self.listeners.read().clone();

        for effect in effects {
            match effect {
                Effect::Selected(index) => {
                    tracing::debug!(index, "Tab selected");
                    listeners.iter().for_each(|l| l.on_tab_selected(index));
                }
                Effect::Unselected(index) => {
                    listeners.iter().for_each(|l| l.on_tab_unselected(index));
                }
                Effect::Reselected(index) => {
                    listeners.iter().for_each(|l| l.on_tab_reselected(index));
                }
                Effect::DoubleTap(index) => {
                    listeners.iter().for_each(|l| l.on_double_tap(index));
                }
                Effect::Invalidate => {
                    if let Some(host) = &host {
                        host.invalidate();
                    }
                }
                Effect::RequestLayout => {
                    if let Some(host) = &host {
                        host.request_layout();
                    }
                }
                Effect::ScrollBy(dx) => {
                    if let Some(host) = &host {
                        host.smooth_scroll_by(dx);
                    }
                }
            }
        }
    }
}

impl Inner {
    fn is_locked(&self, env: &HostView) -> bool {
        env.prevent_event || !self.pager_state.is_idle()
    }

    fn layout_indicator_on(&mut self, index: usize) {
        if let Some(tab) = self.tabs.get(index) {
            self.indicator.layout_on(tab, self.resolver.as_deref());
        }
    }

    fn settle_on(&mut self, index: usize) {
        if let Some(view) = self.tabs.view_mut(index) {
            view.settle(true);
        }
        self.layout_indicator_on(index);
    }

    fn settle_off(&mut self, index: usize) {
        if let Some(view) = self.tabs.view_mut(index) {
            view.settle(false);
        }
    }

    /// Blend tab looks and the indicator from `from` towards `to`.
    fn blend_between(&mut self, from: usize, to: usize, fraction: f32) {
        let (Some(prev), Some(next)) = (self.tabs.get(from), self.tabs.get(to)) else {
            return;
        };
        self.indicator
            .layout_between(prev, next, fraction, self.resolver.as_deref());

        if let Some(view) = self.tabs.view_mut(from) {
            view.set_select_fraction(1.0 - fraction);
        }
        if let Some(view) = self.tabs.view_mut(to) {
            view.set_select_fraction(fraction);
        }
    }

    fn select(
        &mut self,
        index: usize,
        no_animation: bool,
        from_user_click: bool,
        env: &HostView,
        effects: &mut Vec<Effect>,
    ) {
        if !self.tabs.is_synced() {
            tracing::debug!(
                tabs = self.tabs.len(),
                views = self.tabs.view_count(),
                "Views out of sync with tabs, running setup"
            );
            self.tabs.setup();
        }

        if index >= self.tabs.view_count() {
            tracing::debug!(index, count = self.tabs.view_count(), "Ignoring out-of-range selection");
            return;
        }

        if self.transition.is_some() || self.is_locked(env) {
            tracing::debug!(index, "Selection deferred");
            self.pending = Some(index);
            return;
        }

        if self.current == Some(index) {
            if from_user_click {
                effects.push(Effect::Reselected(index));
            }
            effects.push(Effect::Invalidate);
            return;
        }

        if self.current.is_some_and(|c| c >= self.tabs.view_count()) {
            self.current = None;
        }

        let Some(prev) = self.current else {
            self.settle_on(index);
            self.current = Some(index);
            effects.push(Effect::Selected(index));
            effects.push(Effect::Invalidate);
            return;
        };

        if no_animation {
            effects.push(Effect::Unselected(prev));
            effects.push(Effect::Selected(index));
            self.settle_off(prev);
            self.settle_on(index);

            if self.mode.is_scrollable() {
                let delta = reveal_scroll_delta(
                    self.tabs.views(),
                    index,
                    prev,
                    env.scroll_x,
                    env.viewport_width,
                    self.content_width,
                );
                if let Some(dx) = delta {
                    effects.push(Effect::ScrollBy(dx));
                }
            }

            self.current = Some(index);
            effects.push(Effect::Invalidate);
            tracing::debug!(from = prev, to = index, "Switched tab");
            return;
        }

        self.transition = Some(Transition::new(prev, index, self.duration));
        self.current = Some(index);
        effects.push(Effect::Invalidate);
        tracing::debug!(from = prev, to = index, "Started tab transition");
    }

    fn advance(&mut self, now: Instant, env: &HostView) -> (Vec<Effect>, Option<usize>, bool) {
        let mut effects = Vec::new();
        let Some(transition) = self.transition.as_mut() else {
            return (effects, None, false);
        };

        let progress = transition.progress(now);
        let (from, to) = (transition.from(), transition.to());

        if progress < 1.0 {
            let fraction = self.interpolator.interpolate(progress);
            self.blend_between(from, to, fraction);
            effects.push(Effect::Invalidate);
            return (effects, None, true);
        }

        self.transition = None;
        self.settle_off(from);
        self.settle_on(to);
        effects.push(Effect::Selected(to));
        effects.push(Effect::Unselected(from));
        effects.push(Effect::Invalidate);
        tracing::debug!(from, to, "Finished tab transition");

        let pending = if self.is_locked(env) {
            None
        } else {
            self.pending.take()
        };
        (effects, pending, false)
    }

    fn cancel(&mut self) -> Vec<Effect> {
        let Some(transition) = self.transition.take() else {
            return Vec::new();
        };

        let (from, to) = (transition.from(), transition.to());
        self.settle_off(to);
        self.settle_on(from);
        self.current = Some(from);

        if let Some(pending) = self.pending.take() {
            tracing::debug!(pending, "Dropped pending selection with cancelled transition");
        }
        tracing::debug!(from, to, "Cancelled tab transition");

        vec![Effect::Invalidate]
    }

    fn follow_drag(&mut self, index: usize, offset_percent: f32) -> Vec<Effect> {
        if self.transition.is_some()
            || self.in_selection
            || offset_percent == 0.0
            || !offset_percent.is_finite()
        {
            return Vec::new();
        }

        let (target, fraction) = if offset_percent < 0.0 {
            match index.checked_sub(1) {
                Some(target) => (target, -offset_percent),
                None => return Vec::new(),
            }
        } else {
            (index + 1, offset_percent)
        };

        let count = self.tabs.view_count();
        if count <= index || count <= target {
            return Vec::new();
        }

        self.blend_between(index, target, fraction.min(1.0));
        vec![Effect::Invalidate]
    }
}
