//! Tab Segment Core
//!
//! Entry point for hosts: configuration, the [`TabSegment`] facade over the
//! selection controller, and the bridge that keeps a pager and the segment
//! in step.

mod config;
mod error;
mod pager;
mod segment;

pub use config::{Config, TemplateConfig};
pub use error::CoreError;
pub use pager::{Pager, PagerBridge};
pub use segment::{TabSegment, TapOutcome};

// Re-export the building blocks
pub use segment_indicator::{
    Easing, IndicatorGeometry, IndicatorState, IndicatorStyle, Interpolator, Rect,
};
pub use segment_selection::{
    PagerScrollState, SegmentHost, SelectionController, SelectionError, SelectionSnapshot,
    TabSelectedListener,
};
pub use segment_tabs::{
    blend, Argb, ColorResolver, Gravity, IconPosition, LayoutMode, LayoutParams, LayoutResult,
    SignCount, Tab, TabBuilder, TabColor, TabError, TabIcon, TabMeasure, TabView,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
