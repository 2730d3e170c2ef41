//! Tab Segment - Indicator
//!
//! Geometry and color of the bar marking the selected tab. The indicator
//! has no state machine of its own: it is either placed directly on a tab
//! or blended between two tabs by a fraction.

mod easing;
mod indicator;

pub use easing::{Easing, Interpolator};
pub use indicator::{IndicatorGeometry, IndicatorState, IndicatorStyle, Rect};
