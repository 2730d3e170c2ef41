//! Indicator geometry

use serde::{Deserialize, Serialize};

use segment_tabs::{Argb, ColorResolver, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorStyle {
    /// Bar thickness in pixels
    pub height: i32,
    /// Draw along the top edge instead of the bottom
    pub at_top: bool,
    /// Span the tab's content instead of the whole slot
    pub follow_content: bool,
    /// Fixed color; `None` uses each tab's selected color
    pub color: Option<Argb>,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            height: 6,
            at_top: false,
            follow_content: true,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorState {
    pub left: i32,
    pub width: i32,
    pub color: Argb,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self {
            left: 0,
            width: 0,
            color: Argb::TRANSPARENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorGeometry {
    style: IndicatorStyle,
    state: IndicatorState,
}

impl IndicatorGeometry {
    pub fn new(style: IndicatorStyle) -> Self {
        Self {
            style,
            state: IndicatorState::default(),
        }
    }

    pub fn style(&self) -> &IndicatorStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: IndicatorStyle) {
        tracing::debug!(
            height = style.height,
            at_top = style.at_top,
            follow_content = style.follow_content,
            "Indicator style changed"
        );
        self.style = style;
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    pub fn update_info(&mut self, left: i32, width: i32, color: Argb) {
        self.state = IndicatorState {
            left,
            width: width.max(0),
            color,
        };
    }

    /// Color the indicator takes on when resting on `tab`.
    pub fn color_for(&self, tab: &Tab, resolver: Option<&dyn ColorResolver>) -> Argb {
        self.style
            .color
            .unwrap_or_else(|| tab.selected_color_value(resolver))
    }

    /// Place the indicator directly on `tab`.
    pub fn layout_on(&mut self, tab: &Tab, resolver: Option<&dyn ColorResolver>) {
        let color = self.color_for(tab, resolver);
        self.update_info(tab.content_left(), tab.content_width(), color);
    }

    /// Place the indicator `fraction` of the way from `prev` to `next`.
    pub fn layout_between(
        &mut self,
        prev: &Tab,
        next: &Tab,
        fraction: f32,
        resolver: Option<&dyn ColorResolver>,
    ) {
        let state = Self::interpolate(
            (prev.content_left(), prev.content_width(), self.color_for(prev, resolver)),
            (next.content_left(), next.content_width(), self.color_for(next, resolver)),
            fraction,
        );
        self.state = state;
    }

    /// Blend two `(left, width, color)` placements.
    ///
    /// Left and width move linearly and truncate towards zero; the color blends
    /// each ARGB channel linearly. `0.0` yields `prev` and `1.0` yields `next`
    /// exactly.
    pub fn interpolate(
        prev: (i32, i32, Argb),
        next: (i32, i32, Argb),
        fraction: f32,
    ) -> IndicatorState {
        let t = fraction.clamp(0.0, 1.0);
        let (prev_left, prev_width, prev_color) = prev;
        let (next_left, next_width, next_color) = next;

        let left = prev_left + ((next_left - prev_left) as f32 * t) as i32;
        let width = prev_width + ((next_width - prev_width) as f32 * t) as i32;

        IndicatorState {
            left,
            width: width.max(0),
            color: prev_color.blend(next_color, t),
        }
    }

    /// Rectangle to draw inside a container of `container_height`.
    /// `None` while there is nothing to draw.
    pub fn bounds(&self, container_height: i32) -> Option<Rect> {
        if self.state.width <= 0 || self.style.height <= 0 {
            return None;
        }

        let (top, bottom) = if self.style.at_top {
            (0, self.style.height)
        } else {
            (container_height - self.style.height, container_height)
        };

        Some(Rect {
            left: self.state.left,
            top,
            right: self.state.left + self.state.width,
            bottom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment_tabs::TabBuilder;

    fn tab(left: i32, width: i32, color: Argb) -> Tab {
        let mut tab = TabBuilder::new().color(Argb::BLACK, color).build("t");
        tab.set_content_geometry(left, width);
        tab
    }

    #[test]
    fn test_interpolate_boundaries() {
        let a = (10, 80, Argb(0xFFFF_0000));
        let b = (120, 40, Argb(0xFF00_00FF));

        let start = IndicatorGeometry::interpolate(a, b, 0.0);
        assert_eq!((start.left, start.width, start.color), a);

        let end = IndicatorGeometry::interpolate(a, b, 1.0);
        assert_eq!((end.left, end.width, end.color), b);
    }

    #[test]
    fn test_interpolate_midway() {
        let mid = IndicatorGeometry::interpolate(
            (0, 100, Argb(0xFFFF_0000)),
            (200, 50, Argb(0xFF00_00FF)),
            0.5,
        );
        assert_eq!(mid.left, 100);
        assert_eq!(mid.width, 75);
        assert_eq!(mid.color, Argb(0xFF80_0080));
    }

    #[test]
    fn test_layout_between_tabs() {
        let mut indicator = IndicatorGeometry::default();
        let a = tab(0, 100, Argb::WHITE);
        let b = tab(100, 100, Argb::WHITE);

        indicator.layout_between(&a, &b, 0.3, None);
        assert_eq!(indicator.state().left, 30);
        assert_eq!(indicator.state().width, 100);
    }

    #[test]
    fn test_fixed_color_overrides_tab_color() {
        let style = IndicatorStyle {
            color: Some(Argb(0xFF00_FF00)),
            ..Default::default()
        };
        let mut indicator = IndicatorGeometry::new(style);
        indicator.layout_on(&tab(5, 50, Argb::WHITE), None);
        assert_eq!(indicator.state().color, Argb(0xFF00_FF00));

        let mut follows = IndicatorGeometry::default();
        follows.layout_on(&tab(5, 50, Argb::WHITE), None);
        assert_eq!(follows.state().color, Argb::WHITE);
    }

    #[test]
    fn test_bounds() {
        let mut indicator = IndicatorGeometry::new(IndicatorStyle {
            height: 4,
            ..Default::default()
        });
        assert_eq!(indicator.bounds(48), None);

        indicator.update_info(10, 30, Argb::BLACK);
        assert_eq!(
            indicator.bounds(48),
            Some(Rect {
                left: 10,
                top: 44,
                right: 40,
                bottom: 48
            })
        );

        indicator.set_style(IndicatorStyle {
            height: 4,
            at_top: true,
            ..Default::default()
        });
        assert_eq!(indicator.bounds(48).map(|r| (r.top, r.bottom)), Some((0, 4)));
    }

    #[test]
    fn test_style_defaults_from_partial_json() {
        let style: IndicatorStyle = serde_json::from_str(r#"{"height": 2}"#).unwrap();
        assert_eq!(style.height, 2);
        assert!(style.follow_content);
        assert_eq!(style.color, None);
    }
}
