//! Tab data structure
//!
//! A tab carries what the segment needs to draw and lay out one segment:
//! - Text, sizes and colors for the normal and selected looks
//! - Optional icon with its position relative to the text
//! - Sign count badge (red point or number)
//! - Space weights used to share leftover width in scrollable mode
//! - Content geometry written by the layout pass

use serde::{Deserialize, Serialize};

use crate::color::Argb;

/// Color of a tab, either a concrete value or a theme attribute the host resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabColor {
    Value(Argb),
    Attr(u32),
}

impl TabColor {
    pub fn resolve(&self, resolver: Option<&dyn ColorResolver>, fallback: Argb) -> Argb {
        match self {
            TabColor::Value(color) => *color,
            TabColor::Attr(attr) => resolver
                .and_then(|r| r.resolve_color(*attr))
                .unwrap_or(fallback),
        }
    }
}

impl From<Argb> for TabColor {
    fn from(color: Argb) -> Self {
        TabColor::Value(color)
    }
}

/// Theme lookup supplied by the host.
pub trait ColorResolver: Send + Sync {
    fn resolve_color(&self, attr: u32) -> Option<Argb>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    Left,
    #[default]
    Top,
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    #[default]
    Center,
    Left,
    Right,
}

/// Icon visuals are opaque handles owned by the host (drawable ids, asset names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabIcon {
    pub normal: String,
    pub selected: Option<String>,
    /// Tint the icon with the tab's text color
    #[serde(default)]
    pub tint_with_text_color: bool,
}

impl TabIcon {
    pub fn new(normal: impl Into<String>) -> Self {
        Self {
            normal: normal.into(),
            selected: None,
            tint_with_text_color: false,
        }
    }

    pub fn with_selected(mut self, selected: impl Into<String>) -> Self {
        self.selected = Some(selected.into());
        self
    }

    /// The visual to show at a select fraction. Without a dedicated selected
    /// visual the normal one is used throughout.
    pub fn visual_at(&self, fraction: f32) -> &str {
        match &self.selected {
            Some(selected) if fraction >= 0.5 => selected,
            _ => &self.normal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SignCount {
    #[default]
    None,
    RedPoint,
    Count(u32),
}

impl SignCount {
    pub fn is_shown(&self) -> bool {
        !matches!(self, SignCount::None)
    }

    /// Badge text for numeric counts; counts wider than `max_digits` become `99+`-style.
    pub fn badge_text(&self, max_digits: u32) -> Option<String> {
        match self {
            SignCount::Count(count) => {
                let digits = count.to_string();
                if max_digits > 0 && digits.len() > max_digits as usize {
                    Some(format!("{}+", "9".repeat(max_digits as usize)))
                } else {
                    Some(digits)
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub text: String,
    pub normal_text_size: f32,
    pub selected_text_size: f32,
    pub normal_color: TabColor,
    pub selected_color: TabColor,
    pub icon: Option<TabIcon>,
    pub icon_position: IconPosition,
    pub gravity: Gravity,
    pub sign_count: SignCount,
    pub left_space_weight: f32,
    pub right_space_weight: f32,
    /// Extra margins assigned from space weights during layout
    #[serde(skip)]
    pub(crate) left_addon_margin: i32,
    #[serde(skip)]
    pub(crate) right_addon_margin: i32,
    #[serde(skip)]
    content_left: i32,
    #[serde(skip)]
    content_width: i32,
}

impl Tab {
    pub fn content_left(&self) -> i32 {
        self.content_left
    }

    pub fn content_width(&self) -> i32 {
        self.content_width
    }

    /// Set content geometry. Negative widths clamp to zero.
    pub fn set_content_geometry(&mut self, left: i32, width: i32) {
        self.content_left = left;
        self.content_width = width.max(0);
    }

    pub fn left_addon_margin(&self) -> i32 {
        self.left_addon_margin
    }

    pub fn right_addon_margin(&self) -> i32 {
        self.right_addon_margin
    }

    pub fn total_space_weight(&self) -> f32 {
        self.left_space_weight + self.right_space_weight
    }

    pub fn normal_color_value(&self, resolver: Option<&dyn ColorResolver>) -> Argb {
        self.normal_color.resolve(resolver, Argb::BLACK)
    }

    pub fn selected_color_value(&self, resolver: Option<&dyn ColorResolver>) -> Argb {
        self.selected_color.resolve(resolver, Argb::BLACK)
    }

    /// Text color while `fraction` of the way towards selected.
    pub fn text_color_at(&self, fraction: f32, resolver: Option<&dyn ColorResolver>) -> Argb {
        self.normal_color_value(resolver)
            .blend(self.selected_color_value(resolver), fraction)
    }

    pub fn text_size_at(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        self.normal_text_size + (self.selected_text_size - self.normal_text_size) * t
    }

    pub fn icon_visual_at(&self, fraction: f32) -> Option<&str> {
        self.icon.as_ref().map(|icon| icon.visual_at(fraction))
    }
}

/// Template for building tabs.
///
/// The segment keeps one builder as a shared template and hands out clones,
/// so per-tab tweaks never leak back into the template.
#[derive(Debug, Clone, PartialEq)]
pub struct TabBuilder {
    normal_text_size: f32,
    selected_text_size: f32,
    normal_color: TabColor,
    selected_color: TabColor,
    icon: Option<TabIcon>,
    icon_position: IconPosition,
    gravity: Gravity,
    sign_count: SignCount,
    left_space_weight: f32,
    right_space_weight: f32,
}

impl Default for TabBuilder {
    fn default() -> Self {
        Self {
            normal_text_size: 14.0,
            selected_text_size: 14.0,
            normal_color: TabColor::Value(Argb(0xFF66_6666)),
            selected_color: TabColor::Value(Argb(0xFF1E_88E5)),
            icon: None,
            icon_position: IconPosition::default(),
            gravity: Gravity::default(),
            sign_count: SignCount::None,
            left_space_weight: 0.0,
            right_space_weight: 0.0,
        }
    }
}

impl TabBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_size(mut self, normal: f32, selected: f32) -> Self {
        self.normal_text_size = normal.max(0.0);
        self.selected_text_size = selected.max(0.0);
        self
    }

    pub fn color(mut self, normal: impl Into<TabColor>, selected: impl Into<TabColor>) -> Self {
        self.normal_color = normal.into();
        self.selected_color = selected.into();
        self
    }

    pub fn color_attr(mut self, normal: u32, selected: u32) -> Self {
        self.normal_color = TabColor::Attr(normal);
        self.selected_color = TabColor::Attr(selected);
        self
    }

    pub fn icon(mut self, icon: TabIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn no_icon(mut self) -> Self {
        self.icon = None;
        self
    }

    pub fn icon_position(mut self, position: IconPosition) -> Self {
        self.icon_position = position;
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn sign_count(mut self, sign_count: SignCount) -> Self {
        self.sign_count = sign_count;
        self
    }

    /// Weights used to share leftover width in scrollable mode; negatives clamp to zero.
    pub fn space_weight(mut self, left: f32, right: f32) -> Self {
        self.left_space_weight = left.max(0.0);
        self.right_space_weight = right.max(0.0);
        self
    }

    pub fn build(&self, text: impl Into<String>) -> Tab {
        Tab {
            text: text.into(),
            normal_text_size: self.normal_text_size,
            selected_text_size: self.selected_text_size,
            normal_color: self.normal_color,
            selected_color: self.selected_color,
            icon: self.icon.clone(),
            icon_position: self.icon_position,
            gravity: self.gravity,
            sign_count: self.sign_count,
            left_space_weight: self.left_space_weight,
            right_space_weight: self.right_space_weight,
            left_addon_margin: 0,
            right_addon_margin: 0,
            content_left: 0,
            content_width: 0,
        }
    }
}
