//! Layout pass
//!
//! Places tab slots horizontally and writes each tab's content geometry.
//! Measurement itself belongs to the host, which reports per-tab intrinsic
//! sizes as [`TabMeasure`].

use serde::{Deserialize, Serialize};

use crate::collection::TabCollection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LayoutMode {
    /// Tabs share the available width equally
    #[default]
    Fixed,
    /// Tabs keep their intrinsic width and the row may scroll
    Scrollable { item_space: i32 },
}

impl LayoutMode {
    pub fn is_scrollable(&self) -> bool {
        matches!(self, LayoutMode::Scrollable { .. })
    }
}

/// Intrinsic size of one tab as measured by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabMeasure {
    pub width: i32,
    /// Offset of the text/icon content inside the slot
    pub content_left: i32,
    pub content_width: i32,
}

impl TabMeasure {
    pub fn new(width: i32, content_left: i32, content_width: i32) -> Self {
        Self {
            width,
            content_left,
            content_width,
        }
    }

    /// A measure whose content fills the whole slot.
    pub fn filled(width: i32) -> Self {
        Self::new(width, 0, width)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutParams {
    pub mode: LayoutMode,
    pub width: i32,
    pub padding_left: i32,
    pub padding_right: i32,
    /// Indicator spans the tab's content instead of its slot
    pub follow_content: bool,
}

impl LayoutParams {
    fn available_width(&self) -> i32 {
        (self.width - self.padding_left - self.padding_right).max(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutResult {
    /// Total width of the tab row including paddings
    pub content_width: i32,
    pub changed: bool,
}

impl TabCollection {
    /// Run one layout pass. Tabs without a realized view or a measure are skipped.
    pub fn layout(&mut self, params: &LayoutParams, measures: &[TabMeasure]) -> LayoutResult {
        let available = params.available_width();
        let (tabs, views) = self.parts_mut();
        let count = tabs.len().min(views.len()).min(measures.len());
        if count == 0 {
            return LayoutResult {
                content_width: params.padding_left + params.padding_right,
                changed: false,
            };
        }

        let mut slot_widths: Vec<i32> = Vec::with_capacity(count);
        match params.mode {
            LayoutMode::Fixed => {
                let slot = available / count as i32;
                slot_widths.resize(count, slot);
                for tab in tabs.iter_mut().take(count) {
                    tab.left_addon_margin = 0;
                    tab.right_addon_margin = 0;
                }
            }
            LayoutMode::Scrollable { item_space } => {
                let mut total = 0;
                let mut total_weight = 0.0;
                for (tab, measure) in tabs.iter_mut().zip(measures).take(count) {
                    slot_widths.push(measure.width.max(0));
                    total += measure.width.max(0) + item_space;
                    total_weight += tab.total_space_weight();
                    tab.left_addon_margin = 0;
                    tab.right_addon_margin = 0;
                }
                total -= item_space;

                if total_weight > 0.0 && total < available {
                    let remain = (available - total) as f32;
                    for tab in tabs.iter_mut().take(count) {
                        tab.left_addon_margin = (remain * tab.left_space_weight / total_weight) as i32;
                        tab.right_addon_margin =
                            (remain * tab.right_space_weight / total_weight) as i32;
                    }
                }
            }
        }

        let item_space = match params.mode {
            LayoutMode::Scrollable { item_space } => item_space,
            LayoutMode::Fixed => 0,
        };

        let mut changed = false;
        let mut prev_right = params.padding_left;
        for i in 0..count {
            let tab = &mut tabs[i];
            let view = &mut views[i];
            let measure = &measures[i];

            let left = prev_right + tab.left_addon_margin;
            let width = slot_widths[i];
            view.left = left;
            view.width = width;

            let (content_left, content_width) = if params.follow_content {
                (left + measure.content_left, measure.content_width)
            } else {
                (left, width)
            };

            if tab.content_left() != content_left || tab.content_width() != content_width {
                tab.set_content_geometry(content_left, content_width);
                changed = true;
            }

            prev_right = left + width + tab.right_addon_margin;
            if i + 1 < count {
                prev_right += item_space;
            }
        }

        let content_width = match params.mode {
            LayoutMode::Fixed => params.width.max(0),
            LayoutMode::Scrollable { .. } => {
                (prev_right + params.padding_right).max(params.width.max(0))
            }
        };

        tracing::trace!(count, content_width, changed, "Laid out tabs");

        LayoutResult {
            content_width,
            changed,
        }
    }
}
