//! Tab segment configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use segment_indicator::{Easing, IndicatorStyle};
use segment_tabs::{Argb, Gravity, IconPosition, LayoutMode, TabBuilder};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed (equal slots) or scrollable row
    pub mode: LayoutMode,
    pub padding_left: i32,
    pub padding_right: i32,
    /// Taps and `select` switch tabs without a transition
    pub select_no_animation: bool,
    pub animation_duration_ms: u64,
    pub easing: Easing,
    /// Second tap on the same tab within this window is a double tap
    pub double_tap_timeout_ms: u64,
    /// Badges wider than this many digits collapse to `99+`
    pub sign_count_digits: u32,
    pub indicator: IndicatorStyle,
    pub template: TemplateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Fixed,
            padding_left: 0,
            padding_right: 0,
            select_no_animation: false,
            animation_duration_ms: 200,
            easing: Easing::Linear,
            double_tap_timeout_ms: 300,
            sign_count_digits: 2,
            indicator: IndicatorStyle::default(),
            template: TemplateConfig::default(),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "Loaded tab segment config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let LayoutMode::Scrollable { item_space } = self.mode {
            if item_space < 0 {
                return Err(CoreError::Config(format!(
                    "item_space must not be negative, got {}",
                    item_space
                )));
            }
        }
        if self.padding_left < 0 || self.padding_right < 0 {
            return Err(CoreError::Config("paddings must not be negative".to_string()));
        }
        if self.indicator.height < 0 {
            return Err(CoreError::Config(format!(
                "indicator height must not be negative, got {}",
                self.indicator.height
            )));
        }
        if self.sign_count_digits > 9 {
            return Err(CoreError::Config(format!(
                "sign_count_digits must be at most 9, got {}",
                self.sign_count_digits
            )));
        }
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn double_tap_timeout(&self) -> Duration {
        Duration::from_millis(self.double_tap_timeout_ms)
    }
}

/// Defaults every new tab starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub normal_text_size: f32,
    pub selected_text_size: f32,
    pub normal_color: Argb,
    pub selected_color: Argb,
    pub icon_position: IconPosition,
    pub gravity: Gravity,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            normal_text_size: 14.0,
            selected_text_size: 14.0,
            normal_color: Argb(0xFF66_6666),
            selected_color: Argb(0xFF1E_88E5),
            icon_position: IconPosition::Top,
            gravity: Gravity::Center,
        }
    }
}

impl TemplateConfig {
    pub fn builder(&self) -> TabBuilder {
        TabBuilder::new()
            .text_size(self.normal_text_size, self.selected_text_size)
            .color(self.normal_color, self.selected_color)
            .icon_position(self.icon_position)
            .gravity(self.gravity)
    }
}
